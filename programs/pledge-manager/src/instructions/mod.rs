pub mod initialize_registry;
pub mod set_escrow_reference;
pub mod set_authority_reference;
pub mod set_min_amount;
pub mod set_max_pledges;
pub mod create_pledge;
pub mod update_pledge;
pub mod cancel_pledge;
pub mod execute_payment;
pub mod emit_payment_quote;
pub mod get_pledge_count;

pub use initialize_registry::*;
pub use set_escrow_reference::*;
pub use set_authority_reference::*;
pub use set_min_amount::*;
pub use set_max_pledges::*;
pub use create_pledge::*;
pub use update_pledge::*;
pub use cancel_pledge::*;
pub use execute_payment::*;
pub use emit_payment_quote::*;
pub use get_pledge_count::*;
