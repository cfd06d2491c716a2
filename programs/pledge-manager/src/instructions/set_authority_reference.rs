use anchor_lang::prelude::*;

use crate::constants::REGISTRY_SEED;
use crate::state::RegistryConfig;

/// Records the authority gate. Unconditional, like the escrow reference.
pub fn set_authority_reference(
    ctx: Context<SetAuthorityReference>,
    authority: Pubkey,
) -> Result<()> {
    let registry = &mut ctx.accounts.registry;
    let old = registry.authority;
    registry.set_authority_reference(authority);

    msg!("Authority reference set: {}", authority);
    emit!(AuthorityReferenceSet {
        caller: ctx.accounts.caller.key(),
        old_authority: old,
        new_authority: authority,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct SetAuthorityReference<'info> {
    #[account(mut, seeds = [REGISTRY_SEED], bump = registry.bump)]
    pub registry: Account<'info, RegistryConfig>,

    pub caller: Signer<'info>,
}

#[event]
pub struct AuthorityReferenceSet {
    pub caller: Pubkey,
    pub old_authority: Option<Pubkey>,
    pub new_authority: Pubkey,
}
