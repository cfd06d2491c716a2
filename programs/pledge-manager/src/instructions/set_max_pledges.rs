use anchor_lang::prelude::*;

use crate::constants::REGISTRY_SEED;
use crate::state::RegistryConfig;

pub fn set_max_pledges(ctx: Context<SetMaxPledges>, max_pledges: u64) -> Result<()> {
    let registry = &mut ctx.accounts.registry;
    let old = registry.max_pledges;
    registry.set_max_pledges(max_pledges)?;

    msg!("Max pledges: {} -> {}", old, max_pledges);
    emit!(MaxPledgesSet {
        caller: ctx.accounts.caller.key(),
        old_max_pledges: old,
        new_max_pledges: max_pledges,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct SetMaxPledges<'info> {
    #[account(mut, seeds = [REGISTRY_SEED], bump = registry.bump)]
    pub registry: Account<'info, RegistryConfig>,

    pub caller: Signer<'info>,
}

#[event]
pub struct MaxPledgesSet {
    pub caller: Pubkey,
    pub old_max_pledges: u64,
    pub new_max_pledges: u64,
}
