use anchor_lang::prelude::*;

use crate::constants::{PLEDGE_SEED, REGISTRY_SEED};
use crate::context::CallContext;
use crate::state::{Currency, Pledge, RegistryConfig};

/// Books a due payment. Funds stay with the escrow holder; the transfer it
/// owes the creator is published as `PaymentExecuted`.
pub fn execute_payment(ctx: Context<ExecutePayment>, pledge_id: u64) -> Result<()> {
    let call = CallContext::current(ctx.accounts.keeper.key())?;
    let mut pledge = Pledge::load(&ctx.accounts.pledge)?;
    let transfer = pledge.record_payment(&call, &ctx.accounts.registry)?;
    pledge.store(&ctx.accounts.pledge)?;

    msg!(
        "Pledge {} payment {}/{} at height {}",
        pledge_id,
        pledge.payments_made,
        pledge.duration,
        call.height
    );
    emit!(PaymentExecuted {
        pledge_id,
        amount: transfer.amount,
        currency: transfer.currency,
        from: transfer.from,
        to: transfer.to,
        height: transfer.height,
        payments_made: pledge.payments_made,
    });
    Ok(())
}

#[derive(Accounts)]
#[instruction(pledge_id: u64)]
pub struct ExecutePayment<'info> {
    #[account(seeds = [REGISTRY_SEED], bump = registry.bump)]
    pub registry: Account<'info, RegistryConfig>,

    #[account(
        mut,
        seeds = [PLEDGE_SEED, pledge_id.to_le_bytes().as_ref()],
        bump
    )]
    /// CHECK: Loaded in-handler so a missing pledge reports `PledgeNotFound`.
    pub pledge: UncheckedAccount<'info>,

    pub keeper: Signer<'info>,
}

#[event]
pub struct PaymentExecuted {
    pub pledge_id: u64,
    pub amount: u64,
    pub currency: Currency,
    pub from: Pubkey,
    pub to: Pubkey,
    pub height: u64,
    pub payments_made: u64,
}
