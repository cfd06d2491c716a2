use anchor_lang::prelude::*;

use crate::constants::PLEDGE_SEED;
use crate::context::CallContext;
use crate::state::Pledge;

pub fn cancel_pledge(ctx: Context<CancelPledge>, pledge_id: u64) -> Result<()> {
    let call = CallContext::current(ctx.accounts.patron.key())?;
    let mut pledge = Pledge::load(&ctx.accounts.pledge)?;
    pledge.cancel(&call)?;
    pledge.store(&ctx.accounts.pledge)?;

    msg!("Pledge {} cancelled", pledge_id);
    emit!(PledgeCancelled {
        pledge_id,
        patron: pledge.patron,
        payments_made: pledge.payments_made,
        cancelled_at: call.height,
    });
    Ok(())
}

#[derive(Accounts)]
#[instruction(pledge_id: u64)]
pub struct CancelPledge<'info> {
    #[account(
        mut,
        seeds = [PLEDGE_SEED, pledge_id.to_le_bytes().as_ref()],
        bump
    )]
    /// CHECK: Loaded in-handler so a missing pledge reports `PledgeNotFound`.
    pub pledge: UncheckedAccount<'info>,

    pub patron: Signer<'info>,
}

#[event]
pub struct PledgeCancelled {
    pub pledge_id: u64,
    pub patron: Pubkey,
    pub payments_made: u64,
    pub cancelled_at: u64,
}
