use anchor_lang::prelude::*;

use crate::constants::REGISTRY_SEED;
use crate::state::RegistryConfig;

/// Pledges ever created, returned as instruction return data.
pub fn get_pledge_count(ctx: Context<GetPledgeCount>) -> Result<u64> {
    Ok(ctx.accounts.registry.next_pledge_id)
}

#[derive(Accounts)]
pub struct GetPledgeCount<'info> {
    #[account(seeds = [REGISTRY_SEED], bump = registry.bump)]
    pub registry: Account<'info, RegistryConfig>,
}
