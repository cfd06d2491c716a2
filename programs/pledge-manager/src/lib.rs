use anchor_lang::prelude::*;

pub mod constants;
pub mod context;
pub mod error;
pub mod instructions;
pub mod registry;
pub mod state;
pub mod utils;

use instructions::*;
use state::PledgeTerms;

declare_id!("6ca6dy3YqoToVzMGPRLxXnyXgJZgwfmSZx9j86KifAhH");

#[program]
pub mod pledge_manager {
    use super::*;

    pub fn initialize_registry(ctx: Context<InitializeRegistry>) -> Result<()> {
        instructions::initialize_registry(ctx)
    }

    pub fn set_escrow_reference(ctx: Context<SetEscrowReference>, escrow: Pubkey) -> Result<()> {
        instructions::set_escrow_reference(ctx, escrow)
    }

    pub fn set_authority_reference(
        ctx: Context<SetAuthorityReference>,
        authority: Pubkey,
    ) -> Result<()> {
        instructions::set_authority_reference(ctx, authority)
    }

    pub fn set_min_amount(ctx: Context<SetMinAmount>, min_amount: u64) -> Result<()> {
        instructions::set_min_amount(ctx, min_amount)
    }

    pub fn set_max_pledges(ctx: Context<SetMaxPledges>, max_pledges: u64) -> Result<()> {
        instructions::set_max_pledges(ctx, max_pledges)
    }

    pub fn create_pledge(ctx: Context<CreatePledge>, terms: PledgeTerms) -> Result<u64> {
        instructions::create_pledge(ctx, terms)
    }

    pub fn update_pledge(
        ctx: Context<UpdatePledge>,
        pledge_id: u64,
        amount: u64,
        interval: u64,
        duration: u64,
    ) -> Result<()> {
        instructions::update_pledge(ctx, pledge_id, amount, interval, duration)
    }

    pub fn cancel_pledge(ctx: Context<CancelPledge>, pledge_id: u64) -> Result<()> {
        instructions::cancel_pledge(ctx, pledge_id)
    }

    pub fn execute_payment(ctx: Context<ExecutePayment>, pledge_id: u64) -> Result<()> {
        instructions::execute_payment(ctx, pledge_id)
    }

    pub fn emit_payment_quote(ctx: Context<EmitPaymentQuote>, pledge_id: u64) -> Result<()> {
        instructions::emit_payment_quote(ctx, pledge_id)
    }

    pub fn get_pledge_count(ctx: Context<GetPledgeCount>) -> Result<u64> {
        instructions::get_pledge_count(ctx)
    }
}
