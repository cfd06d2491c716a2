use anchor_lang::prelude::*;

use crate::constants::ACCEPTED_CURRENCIES;
use crate::context::CallContext;
use crate::error::{PledgeError, PledgeResult};
use crate::state::RegistryConfig;
use crate::utils::schedule;

/// Denominations a pledge may be made in.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Currency {
    Stx,
    Usd,
    Btc,
}

impl Currency {
    /// Same order as `ACCEPTED_CURRENCIES`.
    const ALL: [Currency; 3] = [Currency::Stx, Currency::Usd, Currency::Btc];

    pub fn from_ticker(ticker: &str) -> Option<Self> {
        ACCEPTED_CURRENCIES
            .iter()
            .position(|accepted| *accepted == ticker)
            .map(|i| Self::ALL[i])
    }

    pub fn ticker(self) -> &'static str {
        match self {
            Currency::Stx => ACCEPTED_CURRENCIES[0],
            Currency::Usd => ACCEPTED_CURRENCIES[1],
            Currency::Btc => ACCEPTED_CURRENCIES[2],
        }
    }
}

/// Instruction input for a new pledge. The patron is the caller.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct PledgeTerms {
    pub creator: Pubkey,
    pub amount: u64,
    pub interval: u64,
    pub start_block: u64,
    pub duration: u64,
    /// Ticker, parsed against the accepted set at creation.
    pub currency: String,
    pub grace_period: u8,
    pub penalty_rate: u8,
    pub perk_threshold: u64,
}

/// One recurring pledge (PDA per id).
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct Pledge {
    pub id: u64,
    /// Caller at creation time. Immutable.
    pub patron: Pubkey,
    /// Payment recipient. Immutable.
    pub creator: Pubkey,
    /// Per-payment amount in `currency` units.
    pub amount: u64,
    /// Heights between payments.
    pub interval: u64,
    /// First payment becomes eligible at `start_block + interval`.
    pub start_block: u64,
    /// Maximum number of payments.
    pub duration: u64,
    pub payments_made: u64,
    /// Starts at `start_block`; moves to the height of each payment.
    pub last_payment_block: u64,
    /// Cleared by cancellation, never set again.
    pub active: bool,
    pub currency: Currency,
    pub grace_period: u8,
    pub penalty_rate: u8,
    pub perk_threshold: u64,
    pub bump: u8,
}

impl Pledge {
    pub const SIZE: usize =
        8 +  // id
        32 + // patron
        32 + // creator
        8 +  // amount
        8 +  // interval
        8 +  // start_block
        8 +  // duration
        8 +  // payments_made
        8 +  // last_payment_block
        1 +  // active
        1 +  // currency
        1 +  // grace_period
        1 +  // penalty_rate
        8 +  // perk_threshold
        1;   // bump

    /// Builds a fresh pledge from terms already validated by
    /// `RegistryConfig::check_new_pledge`.
    pub fn open(
        id: u64,
        patron: Pubkey,
        terms: &PledgeTerms,
        currency: Currency,
        bump: u8,
    ) -> Self {
        Self {
            id,
            patron,
            creator: terms.creator,
            amount: terms.amount,
            interval: terms.interval,
            start_block: terms.start_block,
            duration: terms.duration,
            payments_made: 0,
            last_payment_block: terms.start_block,
            active: true,
            currency,
            grace_period: terms.grace_period,
            penalty_rate: terms.penalty_rate,
            perk_threshold: terms.perk_threshold,
            bump,
        }
    }

    /// Reads a pledge PDA. An account this program never initialized is
    /// `PledgeNotFound`.
    pub fn load(info: &AccountInfo) -> Result<Self> {
        if info.owner != &crate::ID || info.data_is_empty() {
            return Err(PledgeError::PledgeNotFound.into());
        }
        let data = info.try_borrow_data()?;
        Self::try_deserialize(&mut &data[..])
    }

    pub fn store(&self, info: &AccountInfo) -> Result<()> {
        let mut data = info.try_borrow_mut_data()?;
        let mut dst: &mut [u8] = &mut data;
        self.try_serialize(&mut dst)
    }

    fn require_patron(&self, caller: &Pubkey) -> PledgeResult<()> {
        if self.patron != *caller {
            return Err(PledgeError::NotAuthorized);
        }
        Ok(())
    }

    fn require_active(&self) -> PledgeResult<()> {
        if !self.active {
            return Err(PledgeError::PledgeInactive);
        }
        Ok(())
    }

    /// Replaces amount, interval and duration. Everything is validated before
    /// the first write; returns the snapshot to store for this pledge.
    pub fn apply_update(
        &mut self,
        call: &CallContext,
        config: &RegistryConfig,
        amount: u64,
        interval: u64,
        duration: u64,
    ) -> PledgeResult<PledgeUpdate> {
        self.require_patron(&call.caller)?;
        self.require_active()?;
        if amount < config.min_amount {
            return Err(PledgeError::InvalidAmount);
        }
        if interval == 0 {
            return Err(PledgeError::InvalidInterval);
        }
        if duration == 0 {
            return Err(PledgeError::InvalidDuration);
        }

        self.amount = amount;
        self.interval = interval;
        self.duration = duration;

        Ok(PledgeUpdate {
            pledge_id: self.id,
            amount,
            interval,
            duration,
            updated_at: call.height,
            updater: call.caller,
            bump: 0,
        })
    }

    pub fn cancel(&mut self, call: &CallContext) -> PledgeResult<()> {
        self.require_patron(&call.caller)?;
        self.require_active()?;
        self.active = false;
        Ok(())
    }

    pub fn next_due_block(&self) -> PledgeResult<u64> {
        schedule::next_due_block(self.last_payment_block, self.interval)
    }

    pub fn payments_remaining(&self) -> u64 {
        schedule::payments_remaining(self.duration, self.payments_made)
    }

    /// Whether a payment could run at `height`, escrow aside.
    pub fn is_payment_due(&self, height: u64) -> PledgeResult<bool> {
        Ok(self.active
            && self.payments_remaining() > 0
            && schedule::is_due(height, self.last_payment_block, self.interval)?)
    }

    /// Books one payment at the call height. Quota exhaustion reports
    /// `PaymentNotDue`, same as an early call.
    pub fn record_payment(
        &mut self,
        call: &CallContext,
        config: &RegistryConfig,
    ) -> PledgeResult<PaymentTransfer> {
        self.require_active()?;
        if !schedule::is_due(call.height, self.last_payment_block, self.interval)? {
            return Err(PledgeError::PaymentNotDue);
        }
        if self.payments_made >= self.duration {
            return Err(PledgeError::PaymentNotDue);
        }
        let escrow = config.require_escrow()?;
        let payments_made = self
            .payments_made
            .checked_add(1)
            .ok_or(PledgeError::MathOverflow)?;

        self.payments_made = payments_made;
        self.last_payment_block = call.height;

        Ok(PaymentTransfer {
            pledge_id: self.id,
            amount: self.amount,
            currency: self.currency,
            from: escrow,
            to: self.creator,
            height: call.height,
        })
    }
}

/// Last parameter change applied to a pledge (PDA per pledge id).
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct PledgeUpdate {
    pub pledge_id: u64,
    pub amount: u64,
    pub interval: u64,
    pub duration: u64,
    /// Height of the update.
    pub updated_at: u64,
    pub updater: Pubkey,
    pub bump: u8,
}

impl PledgeUpdate {
    pub const SIZE: usize = 8 + 8 + 8 + 8 + 8 + 32 + 1;
}

/// Transfer the escrow holder is instructed to make. Recorded, not executed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaymentTransfer {
    pub pledge_id: u64,
    pub amount: u64,
    pub currency: Currency,
    pub from: Pubkey,
    pub to: Pubkey,
    pub height: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        patron: Pubkey,
        creator: Pubkey,
        config: RegistryConfig,
        pledge: Pledge,
    }

    fn fixture(duration: u64) -> Fixture {
        let patron = Pubkey::new_unique();
        let creator = Pubkey::new_unique();
        let mut config = RegistryConfig::default();
        config.set_escrow_reference(Pubkey::new_unique());
        let terms = PledgeTerms {
            creator,
            amount: 100,
            interval: 4320,
            start_block: 0,
            duration,
            currency: "STX".to_string(),
            grace_period: 7,
            penalty_rate: 5,
            perk_threshold: 50,
        };
        let pledge = Pledge::open(0, patron, &terms, Currency::Stx, 0);
        Fixture {
            patron,
            creator,
            config,
            pledge,
        }
    }

    #[test]
    fn currency_tickers() {
        assert_eq!(Currency::from_ticker("USD"), Some(Currency::Usd));
        assert_eq!(Currency::from_ticker("ETH"), None);
        assert_eq!(Currency::from_ticker("stx"), None);
        assert_eq!(Currency::Btc.ticker(), "BTC");
    }

    #[test]
    fn open_initialises_bookkeeping() {
        let f = fixture(12);
        assert_eq!(f.pledge.patron, f.patron);
        assert_eq!(f.pledge.creator, f.creator);
        assert_eq!(f.pledge.payments_made, 0);
        assert_eq!(f.pledge.last_payment_block, 0);
        assert!(f.pledge.active);
        assert_eq!(f.pledge.next_due_block().unwrap(), 4320);
    }

    #[test]
    fn update_leaves_schedule_fields_alone() {
        let mut f = fixture(12);
        let call = CallContext::new(f.patron, 77);
        let update = f
            .pledge
            .apply_update(&call, &f.config, 200, 8640, 24)
            .unwrap();
        assert_eq!((f.pledge.amount, f.pledge.interval, f.pledge.duration), (200, 8640, 24));
        assert_eq!(f.pledge.start_block, 0);
        assert_eq!(f.pledge.last_payment_block, 0);
        assert_eq!(update.updated_at, 77);
        assert_eq!(update.updater, f.patron);
    }

    #[test]
    fn rejected_update_writes_nothing() {
        let mut f = fixture(12);
        let before = f.pledge.clone();
        let call = CallContext::new(f.patron, 0);
        assert!(matches!(
            f.pledge.apply_update(&call, &f.config, 200, 8640, 0),
            Err(PledgeError::InvalidDuration)
        ));
        assert!(matches!(
            f.pledge.apply_update(&call, &f.config, 5, 8640, 24),
            Err(PledgeError::InvalidAmount)
        ));
        assert_eq!(f.pledge, before);
    }

    #[test]
    fn patron_check_precedes_active_check() {
        let mut f = fixture(12);
        f.pledge.cancel(&CallContext::new(f.patron, 0)).unwrap();
        let stranger = CallContext::new(Pubkey::new_unique(), 0);
        assert!(matches!(
            f.pledge.cancel(&stranger),
            Err(PledgeError::NotAuthorized)
        ));
        assert!(matches!(
            f.pledge.cancel(&CallContext::new(f.patron, 0)),
            Err(PledgeError::PledgeInactive)
        ));
    }

    #[test]
    fn payment_re_anchors_at_call_height() {
        let mut f = fixture(12);
        let transfer = f
            .pledge
            .record_payment(&CallContext::new(Pubkey::new_unique(), 5000), &f.config)
            .unwrap();
        assert_eq!(transfer.to, f.creator);
        assert_eq!(transfer.amount, 100);
        assert_eq!(f.pledge.last_payment_block, 5000);
        assert_eq!(f.pledge.next_due_block().unwrap(), 9320);
        assert!(!f.pledge.is_payment_due(9319).unwrap());
        assert!(f.pledge.is_payment_due(9320).unwrap());
    }

    #[test]
    fn exhausted_quota_is_not_due() {
        let mut f = fixture(1);
        let keeper = Pubkey::new_unique();
        f.pledge
            .record_payment(&CallContext::new(keeper, 4320), &f.config)
            .unwrap();
        assert_eq!(f.pledge.payments_remaining(), 0);
        assert!(!f.pledge.is_payment_due(8640).unwrap());
        assert!(matches!(
            f.pledge.record_payment(&CallContext::new(keeper, 8640), &f.config),
            Err(PledgeError::PaymentNotDue)
        ));
        assert_eq!(f.pledge.payments_made, 1);
    }

    #[test]
    fn payment_without_escrow_is_rejected_after_schedule_checks() {
        let mut f = fixture(12);
        f.config.escrow = None;
        let keeper = Pubkey::new_unique();
        assert!(matches!(
            f.pledge.record_payment(&CallContext::new(keeper, 10), &f.config),
            Err(PledgeError::PaymentNotDue)
        ));
        assert!(matches!(
            f.pledge.record_payment(&CallContext::new(keeper, 4320), &f.config),
            Err(PledgeError::EscrowNotSet)
        ));
        assert_eq!(f.pledge.payments_made, 0);
    }

    #[test]
    fn load_reports_missing_pledge_as_not_found() {
        let key = Pubkey::new_unique();
        let system = anchor_lang::system_program::ID;
        let mut lamports = 0;
        let mut data: Vec<u8> = Vec::new();
        let info = AccountInfo::new(&key, false, true, &mut lamports, &mut data, &system, false, 0);
        assert_eq!(
            Pledge::load(&info).unwrap_err(),
            anchor_lang::error::Error::from(PledgeError::PledgeNotFound)
        );
    }

    #[test]
    fn foreign_account_is_not_a_pledge() {
        let f = fixture(12);
        let key = Pubkey::new_unique();
        let stranger = Pubkey::new_unique();
        let mut lamports = 1;
        let mut data = vec![0u8; 8 + Pledge::SIZE];
        let info = AccountInfo::new(&key, false, true, &mut lamports, &mut data, &stranger, false, 0);
        f.pledge.store(&info).unwrap();
        assert_eq!(
            Pledge::load(&info).unwrap_err(),
            anchor_lang::error::Error::from(PledgeError::PledgeNotFound)
        );
    }

    #[test]
    fn store_then_load_keeps_payment_progress() {
        let mut f = fixture(12);
        let keeper = Pubkey::new_unique();
        f.pledge
            .record_payment(&CallContext::new(keeper, 4320), &f.config)
            .unwrap();

        let key = Pubkey::new_unique();
        let owner = crate::ID;
        let mut lamports = 1;
        let mut data = vec![0u8; 8 + Pledge::SIZE];
        let info = AccountInfo::new(&key, false, true, &mut lamports, &mut data, &owner, false, 0);
        f.pledge.store(&info).unwrap();

        let loaded = Pledge::load(&info).unwrap();
        assert_eq!(loaded, f.pledge);
        assert_eq!(loaded.payments_made, 1);
        assert_eq!(loaded.last_payment_block, 4320);
    }
}
