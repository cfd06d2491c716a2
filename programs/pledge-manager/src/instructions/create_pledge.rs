use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};

use crate::constants::{CREATOR_INDEX_SEED, PATRON_INDEX_SEED, PLEDGE_SEED, REGISTRY_SEED};
use crate::context::CallContext;
use crate::state::{Currency, IndexRole, Pledge, PledgeIndex, PledgeTerms, RegistryConfig};

/// Creates a pledge from the signing patron to `terms.creator`; returns its id.
pub fn create_pledge(ctx: Context<CreatePledge>, terms: PledgeTerms) -> Result<u64> {
    let call = CallContext::current(ctx.accounts.patron.key())?;

    let registry = &mut ctx.accounts.registry;
    let currency = registry.check_new_pledge(&call, &terms)?;

    // Index PDAs may have just been created by init_if_needed.
    let patron_index = &mut ctx.accounts.patron_index;
    let creator_index = &mut ctx.accounts.creator_index;
    patron_index.claim(call.caller, IndexRole::Patron, ctx.bumps.patron_index);
    creator_index.claim(terms.creator, IndexRole::Creator, ctx.bumps.creator_index);

    let id = registry.allocate_pledge_id()?;
    ctx.accounts
        .pledge
        .set_inner(Pledge::open(id, call.caller, &terms, currency, ctx.bumps.pledge));

    let payer = ctx.accounts.patron.to_account_info();
    let system = ctx.accounts.system_program.to_account_info();
    for index in [patron_index, creator_index] {
        grow_index(&index.to_account_info(), &payer, &system, index.ids.len() + 1)?;
        index.append(id);
    }

    msg!(
        "Pledge {} created: {} {} every {} blocks",
        id,
        terms.amount,
        currency.ticker(),
        terms.interval
    );
    emit!(PledgeCreated {
        pledge_id: id,
        patron: call.caller,
        creator: terms.creator,
        amount: terms.amount,
        interval: terms.interval,
        start_block: terms.start_block,
        duration: terms.duration,
        currency,
    });

    Ok(id)
}

/// Resizes an index PDA to hold `ids` entries, topping up rent from `payer`.
fn grow_index<'info>(
    index: &AccountInfo<'info>,
    payer: &AccountInfo<'info>,
    system: &AccountInfo<'info>,
    ids: usize,
) -> Result<()> {
    let space = PledgeIndex::space(ids);
    let rent = Rent::get()?.minimum_balance(space);
    let shortfall = rent.saturating_sub(index.lamports());
    if shortfall > 0 {
        system_program::transfer(
            CpiContext::new(
                system.clone(),
                Transfer {
                    from: payer.clone(),
                    to: index.clone(),
                },
            ),
            shortfall,
        )?;
    }
    index.resize(space)?;
    Ok(())
}

#[derive(Accounts)]
#[instruction(terms: PledgeTerms)]
pub struct CreatePledge<'info> {
    #[account(mut, seeds = [REGISTRY_SEED], bump = registry.bump)]
    pub registry: Account<'info, RegistryConfig>,

    #[account(
        init,
        payer = patron,
        space = 8 + Pledge::SIZE,
        seeds = [PLEDGE_SEED, registry.next_pledge_id.to_le_bytes().as_ref()],
        bump
    )]
    pub pledge: Account<'info, Pledge>,

    #[account(
        init_if_needed,
        payer = patron,
        // Existing indexes keep their current (grown) size.
        space = PledgeIndex::space(0).max(patron_index.data_len()),
        seeds = [PATRON_INDEX_SEED, patron.key().as_ref()],
        bump
    )]
    pub patron_index: Box<Account<'info, PledgeIndex>>,

    #[account(
        init_if_needed,
        payer = patron,
        space = PledgeIndex::space(0).max(creator_index.data_len()),
        seeds = [CREATOR_INDEX_SEED, terms.creator.as_ref()],
        bump
    )]
    pub creator_index: Box<Account<'info, PledgeIndex>>,

    #[account(mut)]
    pub patron: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct PledgeCreated {
    pub pledge_id: u64,
    pub patron: Pubkey,
    pub creator: Pubkey,
    pub amount: u64,
    pub interval: u64,
    pub start_block: u64,
    pub duration: u64,
    pub currency: Currency,
}
