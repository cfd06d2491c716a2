use anchor_lang::prelude::*;

use crate::constants::REGISTRY_SEED;
use crate::state::RegistryConfig;

pub fn initialize_registry(ctx: Context<InitializeRegistry>) -> Result<()> {
    let registry = &mut ctx.accounts.registry;
    registry.set_inner(RegistryConfig::new(ctx.bumps.registry));

    msg!(
        "Registry initialized: max_pledges={} min_amount={}",
        registry.max_pledges,
        registry.min_amount
    );
    emit!(RegistryInitialized {
        payer: ctx.accounts.payer.key(),
        max_pledges: registry.max_pledges,
        min_amount: registry.min_amount,
        default_interval: registry.default_interval,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct InitializeRegistry<'info> {
    #[account(
        init,
        payer = payer,
        space = 8 + RegistryConfig::SIZE,
        seeds = [REGISTRY_SEED],
        bump
    )]
    pub registry: Account<'info, RegistryConfig>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct RegistryInitialized {
    pub payer: Pubkey,
    pub max_pledges: u64,
    pub min_amount: u64,
    pub default_interval: u64,
}
