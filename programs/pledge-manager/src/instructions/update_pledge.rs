use anchor_lang::prelude::*;

use crate::constants::{PLEDGE_SEED, PLEDGE_UPDATE_SEED, REGISTRY_SEED};
use crate::context::CallContext;
use crate::state::{Pledge, PledgeUpdate, RegistryConfig};

pub fn update_pledge(
    ctx: Context<UpdatePledge>,
    pledge_id: u64,
    amount: u64,
    interval: u64,
    duration: u64,
) -> Result<()> {
    let call = CallContext::current(ctx.accounts.patron.key())?;

    let mut pledge = Pledge::load(&ctx.accounts.pledge)?;
    let update = pledge.apply_update(&call, &ctx.accounts.registry, amount, interval, duration)?;
    pledge.store(&ctx.accounts.pledge)?;
    ctx.accounts.pledge_update.set_inner(PledgeUpdate {
        bump: ctx.bumps.pledge_update,
        ..update
    });

    msg!("Pledge {} updated at height {}", pledge_id, call.height);
    emit!(PledgeUpdated {
        pledge_id,
        updater: call.caller,
        amount,
        interval,
        duration,
        updated_at: call.height,
    });
    Ok(())
}

#[derive(Accounts)]
#[instruction(pledge_id: u64)]
pub struct UpdatePledge<'info> {
    #[account(seeds = [REGISTRY_SEED], bump = registry.bump)]
    pub registry: Account<'info, RegistryConfig>,

    #[account(
        mut,
        seeds = [PLEDGE_SEED, pledge_id.to_le_bytes().as_ref()],
        bump
    )]
    /// CHECK: Loaded in-handler so a missing pledge reports `PledgeNotFound`.
    pub pledge: UncheckedAccount<'info>,

    #[account(
        init_if_needed,
        payer = patron,
        space = 8 + PledgeUpdate::SIZE,
        seeds = [PLEDGE_UPDATE_SEED, pledge_id.to_le_bytes().as_ref()],
        bump
    )]
    pub pledge_update: Account<'info, PledgeUpdate>,

    #[account(mut)]
    pub patron: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct PledgeUpdated {
    pub pledge_id: u64,
    pub updater: Pubkey,
    pub amount: u64,
    pub interval: u64,
    pub duration: u64,
    pub updated_at: u64,
}
