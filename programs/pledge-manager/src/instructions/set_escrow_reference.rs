use anchor_lang::prelude::*;

use crate::constants::REGISTRY_SEED;
use crate::state::RegistryConfig;

/// Records the escrow holder. Unconditional: any signer may set it.
pub fn set_escrow_reference(ctx: Context<SetEscrowReference>, escrow: Pubkey) -> Result<()> {
    let registry = &mut ctx.accounts.registry;
    let old = registry.escrow;
    registry.set_escrow_reference(escrow);

    msg!("Escrow reference set: {}", escrow);
    emit!(EscrowReferenceSet {
        caller: ctx.accounts.caller.key(),
        old_escrow: old,
        new_escrow: escrow,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct SetEscrowReference<'info> {
    #[account(mut, seeds = [REGISTRY_SEED], bump = registry.bump)]
    pub registry: Account<'info, RegistryConfig>,

    pub caller: Signer<'info>,
}

#[event]
pub struct EscrowReferenceSet {
    pub caller: Pubkey,
    pub old_escrow: Option<Pubkey>,
    pub new_escrow: Pubkey,
}
