use anchor_lang::prelude::*;

use crate::constants::{
    DEFAULT_INTERVAL, DEFAULT_MAX_PLEDGES, DEFAULT_MIN_AMOUNT, MAX_GRACE_PERIOD, MAX_PENALTY_RATE,
};
use crate::context::CallContext;
use crate::error::{PledgeError, PledgeResult};
use crate::state::{Currency, PledgeTerms};

/// Registry configuration PDA (singleton).
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Id handed to the next created pledge; also the count of pledges ever created.
    pub next_pledge_id: u64,
    /// Ceiling on `next_pledge_id`.
    pub max_pledges: u64,
    /// Floor on pledge amounts at creation and update.
    pub min_amount: u64,
    /// Suggested payment interval for clients; not enforced.
    pub default_interval: u64,
    /// Escrow holder paying out pledges. Required to create and pay.
    pub escrow: Option<Pubkey>,
    /// Authority gate for privileged settings.
    pub authority: Option<Pubkey>,
    pub bump: u8,
}

impl RegistryConfig {
    pub const SIZE: usize =
        8 +      // next_pledge_id
        8 +      // max_pledges
        8 +      // min_amount
        8 +      // default_interval
        1 + 32 + // escrow
        1 + 32 + // authority
        1;       // bump

    pub fn new(bump: u8) -> Self {
        Self {
            next_pledge_id: 0,
            max_pledges: DEFAULT_MAX_PLEDGES,
            min_amount: DEFAULT_MIN_AMOUNT,
            default_interval: DEFAULT_INTERVAL,
            escrow: None,
            authority: None,
            bump,
        }
    }

    pub fn set_escrow_reference(&mut self, escrow: Pubkey) {
        self.escrow = Some(escrow);
    }

    pub fn set_authority_reference(&mut self, authority: Pubkey) {
        self.authority = Some(authority);
    }

    /// Only checks that an authority is configured, not that the caller is it.
    pub fn set_min_amount(&mut self, min_amount: u64) -> PledgeResult<()> {
        self.require_authority()?;
        self.min_amount = min_amount;
        Ok(())
    }

    /// Gated like `set_min_amount`.
    pub fn set_max_pledges(&mut self, max_pledges: u64) -> PledgeResult<()> {
        self.require_authority()?;
        self.max_pledges = max_pledges;
        Ok(())
    }

    pub fn require_authority(&self) -> PledgeResult<Pubkey> {
        self.authority.ok_or(PledgeError::AuthorityNotVerified)
    }

    pub fn require_escrow(&self) -> PledgeResult<Pubkey> {
        self.escrow.ok_or(PledgeError::EscrowNotSet)
    }

    /// Runs the creation checks in order, stopping at the first failure.
    /// Returns the parsed currency on success.
    pub fn check_new_pledge(
        &self,
        call: &CallContext,
        terms: &PledgeTerms,
    ) -> PledgeResult<Currency> {
        if self.next_pledge_id >= self.max_pledges {
            return Err(PledgeError::MaxPledgesExceeded);
        }
        if terms.creator == call.caller {
            return Err(PledgeError::InvalidCreator);
        }
        if terms.amount < self.min_amount {
            return Err(PledgeError::InvalidAmount);
        }
        if terms.interval == 0 {
            return Err(PledgeError::InvalidInterval);
        }
        if terms.duration == 0 {
            return Err(PledgeError::InvalidDuration);
        }
        if terms.start_block < call.height {
            return Err(PledgeError::InvalidStartBlock);
        }
        let currency =
            Currency::from_ticker(&terms.currency).ok_or(PledgeError::InvalidCurrency)?;
        if terms.grace_period > MAX_GRACE_PERIOD {
            return Err(PledgeError::InvalidGracePeriod);
        }
        if terms.penalty_rate > MAX_PENALTY_RATE {
            return Err(PledgeError::InvalidPenalty);
        }
        if terms.perk_threshold == 0 {
            return Err(PledgeError::InvalidPerkThreshold);
        }
        self.require_escrow()?;
        Ok(currency)
    }

    /// Hands out the next id and advances the counter.
    pub fn allocate_pledge_id(&mut self) -> PledgeResult<u64> {
        let id = self.next_pledge_id;
        self.next_pledge_id = id.checked_add(1).ok_or(PledgeError::MathOverflow)?;
        Ok(id)
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(creator: Pubkey) -> PledgeTerms {
        PledgeTerms {
            creator,
            amount: 100,
            interval: 4320,
            start_block: 0,
            duration: 12,
            currency: "STX".to_string(),
            grace_period: 7,
            penalty_rate: 5,
            perk_threshold: 50,
        }
    }

    fn configured() -> RegistryConfig {
        let mut config = RegistryConfig::default();
        config.set_escrow_reference(Pubkey::new_unique());
        config
    }

    #[test]
    fn defaults() {
        let config = RegistryConfig::default();
        assert_eq!(config.next_pledge_id, 0);
        assert_eq!(config.max_pledges, 10_000);
        assert_eq!(config.min_amount, 10);
        assert_eq!(config.default_interval, 4320);
        assert!(config.escrow.is_none());
        assert!(config.authority.is_none());
    }

    #[test]
    fn max_pledges_requires_authority() {
        let mut config = RegistryConfig::default();
        assert!(matches!(
            config.set_max_pledges(1),
            Err(PledgeError::AuthorityNotVerified)
        ));
        config.set_authority_reference(Pubkey::new_unique());
        config.set_max_pledges(1).unwrap();
        assert_eq!(config.max_pledges, 1);
    }

    #[test]
    fn capacity_is_checked_before_anything_else() {
        let mut config = RegistryConfig::default();
        config.max_pledges = 0;
        let caller = Pubkey::new_unique();
        // Self-pledge, bad amount, no escrow: capacity still wins.
        let mut bad = terms(caller);
        bad.amount = 0;
        assert!(matches!(
            config.check_new_pledge(&CallContext::new(caller, 0), &bad),
            Err(PledgeError::MaxPledgesExceeded)
        ));
    }

    #[test]
    fn escrow_is_checked_last() {
        let config = RegistryConfig::default();
        let call = CallContext::new(Pubkey::new_unique(), 0);
        let mut bad = terms(Pubkey::new_unique());
        bad.perk_threshold = 0;
        assert!(matches!(
            config.check_new_pledge(&call, &bad),
            Err(PledgeError::InvalidPerkThreshold)
        ));
        assert!(matches!(
            config.check_new_pledge(&call, &terms(Pubkey::new_unique())),
            Err(PledgeError::EscrowNotSet)
        ));
    }

    #[test]
    fn start_block_may_equal_current_height() {
        let config = configured();
        let call = CallContext::new(Pubkey::new_unique(), 10);
        let mut t = terms(Pubkey::new_unique());
        t.start_block = 10;
        assert_eq!(config.check_new_pledge(&call, &t).unwrap(), Currency::Stx);
        t.start_block = 9;
        assert!(matches!(
            config.check_new_pledge(&call, &t),
            Err(PledgeError::InvalidStartBlock)
        ));
    }

    #[test]
    fn bounds_on_grace_and_penalty_are_inclusive() {
        let config = configured();
        let call = CallContext::new(Pubkey::new_unique(), 0);
        let mut t = terms(Pubkey::new_unique());
        t.grace_period = 30;
        t.penalty_rate = 100;
        assert!(config.check_new_pledge(&call, &t).is_ok());
        t.grace_period = 31;
        assert!(matches!(
            config.check_new_pledge(&call, &t),
            Err(PledgeError::InvalidGracePeriod)
        ));
        t.grace_period = 0;
        t.penalty_rate = 101;
        assert!(matches!(
            config.check_new_pledge(&call, &t),
            Err(PledgeError::InvalidPenalty)
        ));
    }

    #[test]
    fn allocate_advances_counter() {
        let mut config = RegistryConfig::default();
        assert_eq!(config.allocate_pledge_id().unwrap(), 0);
        assert_eq!(config.allocate_pledge_id().unwrap(), 1);
        assert_eq!(config.next_pledge_id, 2);
    }
}
