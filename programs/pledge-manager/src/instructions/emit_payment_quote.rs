use anchor_lang::prelude::*;

use crate::constants::PLEDGE_SEED;
use crate::state::Pledge;
use crate::utils::schedule;

/// Read-only: reports where a pledge stands in its payment schedule.
pub fn emit_payment_quote(ctx: Context<EmitPaymentQuote>, pledge_id: u64) -> Result<()> {
    let pledge = Pledge::load(&ctx.accounts.pledge)?;
    let height = Clock::get()?.slot;
    let next_due_block = pledge.next_due_block()?;

    emit!(PaymentQuote {
        pledge_id,
        height,
        next_due_block,
        blocks_until_due: schedule::blocks_until_due(
            height,
            pledge.last_payment_block,
            pledge.interval,
        )?,
        payments_remaining: pledge.payments_remaining(),
        active: pledge.active,
        due_now: pledge.is_payment_due(height)?,
    });

    Ok(())
}

#[derive(Accounts)]
#[instruction(pledge_id: u64)]
pub struct EmitPaymentQuote<'info> {
    #[account(
        seeds = [PLEDGE_SEED, pledge_id.to_le_bytes().as_ref()],
        bump
    )]
    /// CHECK: Loaded in-handler so a missing pledge reports `PledgeNotFound`.
    pub pledge: UncheckedAccount<'info>,
}

#[event]
pub struct PaymentQuote {
    pub pledge_id: u64,
    pub height: u64,
    pub next_due_block: u64,
    pub blocks_until_due: u64,
    pub payments_remaining: u64,
    pub active: bool,
    pub due_now: bool,
}
