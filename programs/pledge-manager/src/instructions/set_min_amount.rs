use anchor_lang::prelude::*;

use crate::constants::REGISTRY_SEED;
use crate::state::RegistryConfig;

pub fn set_min_amount(ctx: Context<SetMinAmount>, min_amount: u64) -> Result<()> {
    let registry = &mut ctx.accounts.registry;
    let old = registry.min_amount;
    registry.set_min_amount(min_amount)?;

    msg!("Min amount: {} -> {}", old, min_amount);
    emit!(MinAmountSet {
        caller: ctx.accounts.caller.key(),
        old_min_amount: old,
        new_min_amount: min_amount,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct SetMinAmount<'info> {
    #[account(mut, seeds = [REGISTRY_SEED], bump = registry.bump)]
    pub registry: Account<'info, RegistryConfig>,

    pub caller: Signer<'info>,
}

#[event]
pub struct MinAmountSet {
    pub caller: Pubkey,
    pub old_min_amount: u64,
    pub new_min_amount: u64,
}
