pub mod config;
pub mod index;
pub mod pledge;

pub use config::*;
pub use index::*;
pub use pledge::*;
