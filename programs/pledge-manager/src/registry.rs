//! In-memory pledge registry.
//!
//! Holds the primary pledge store, the per-patron and per-creator indexes, the
//! last update per pledge and the log of recorded transfers, all behind one
//! `RegistryConfig`. Every operation either completes or leaves the registry
//! untouched. The on-chain instructions run the same `state` transitions
//! against PDAs; this type is the whole state machine in one place, for
//! off-chain mirrors and tests.

use std::collections::BTreeMap;

use anchor_lang::prelude::Pubkey;

use crate::context::CallContext;
use crate::error::{PledgeError, PledgeResult};
use crate::state::{PaymentTransfer, Pledge, PledgeTerms, PledgeUpdate, RegistryConfig};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PledgeRegistry {
    config: RegistryConfig,
    pledges: BTreeMap<u64, Pledge>,
    updates: BTreeMap<u64, PledgeUpdate>,
    by_patron: BTreeMap<Pubkey, Vec<u64>>,
    by_creator: BTreeMap<Pubkey, Vec<u64>>,
    transfers: Vec<PaymentTransfer>,
}

impl PledgeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty registry over an existing configuration.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn set_escrow_reference(&mut self, escrow: Pubkey) {
        self.config.set_escrow_reference(escrow);
    }

    pub fn set_authority_reference(&mut self, authority: Pubkey) {
        self.config.set_authority_reference(authority);
    }

    pub fn set_min_amount(&mut self, min_amount: u64) -> PledgeResult<()> {
        self.config.set_min_amount(min_amount)
    }

    pub fn set_max_pledges(&mut self, max_pledges: u64) -> PledgeResult<()> {
        self.config.set_max_pledges(max_pledges)
    }

    /// Creates a pledge with the caller as patron and returns its id.
    pub fn create_pledge(
        &mut self,
        call: &CallContext,
        terms: &PledgeTerms,
    ) -> PledgeResult<u64> {
        let currency = self.config.check_new_pledge(call, terms)?;
        // Counter overflow is the only failure left; nothing is written before it.
        let id = self.config.allocate_pledge_id()?;

        self.pledges
            .insert(id, Pledge::open(id, call.caller, terms, currency, 0));
        self.by_patron.entry(call.caller).or_default().push(id);
        self.by_creator.entry(terms.creator).or_default().push(id);
        Ok(id)
    }

    pub fn update_pledge(
        &mut self,
        call: &CallContext,
        id: u64,
        amount: u64,
        interval: u64,
        duration: u64,
    ) -> PledgeResult<()> {
        let pledge = self.pledges.get_mut(&id).ok_or(PledgeError::PledgeNotFound)?;
        let update = pledge.apply_update(call, &self.config, amount, interval, duration)?;
        self.updates.insert(id, update);
        Ok(())
    }

    pub fn cancel_pledge(&mut self, call: &CallContext, id: u64) -> PledgeResult<()> {
        self.pledges
            .get_mut(&id)
            .ok_or(PledgeError::PledgeNotFound)?
            .cancel(call)
    }

    /// Books one due payment and records the escrow transfer it implies.
    pub fn execute_payment(
        &mut self,
        call: &CallContext,
        id: u64,
    ) -> PledgeResult<PaymentTransfer> {
        let pledge = self.pledges.get_mut(&id).ok_or(PledgeError::PledgeNotFound)?;
        let transfer = pledge.record_payment(call, &self.config)?;
        self.transfers.push(transfer);
        Ok(transfer)
    }

    pub fn get_pledge(&self, id: u64) -> Option<&Pledge> {
        self.pledges.get(&id)
    }

    /// Pledges ever created, cancelled ones included.
    pub fn get_pledge_count(&self) -> u64 {
        self.config.next_pledge_id
    }

    pub fn get_pledge_update(&self, id: u64) -> Option<&PledgeUpdate> {
        self.updates.get(&id)
    }

    pub fn pledges_by_patron(&self, patron: &Pubkey) -> &[u64] {
        self.by_patron.get(patron).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn pledges_by_creator(&self, creator: &Pubkey) -> &[u64] {
        self.by_creator.get(creator).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Recorded transfer instructions, oldest first.
    pub fn transfers(&self) -> &[PaymentTransfer] {
        &self.transfers
    }

    /// Recomputes both indexes from the primary store.
    pub fn rebuild_indexes(&mut self) {
        let mut by_patron: BTreeMap<Pubkey, Vec<u64>> = BTreeMap::new();
        let mut by_creator: BTreeMap<Pubkey, Vec<u64>> = BTreeMap::new();
        // BTreeMap iterates ids in ascending, i.e. creation, order.
        for (id, pledge) in &self.pledges {
            by_patron.entry(pledge.patron).or_default().push(*id);
            by_creator.entry(pledge.creator).or_default().push(*id);
        }
        self.by_patron = by_patron;
        self.by_creator = by_creator;
    }
}
