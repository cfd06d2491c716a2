use anchor_lang::prelude::*;

/// Error codes returned by every pledge registry operation.
///
/// Discriminants keep the registry's historical numbering (100..=120); the
/// on-chain custom error code is `6000 + discriminant`.
#[error_code]
pub enum PledgeError {
    #[msg("Unauthorized: caller is not the pledge patron")]
    NotAuthorized = 100,

    #[msg("Invalid amount (below registry minimum)")]
    InvalidAmount = 101,

    #[msg("Invalid interval (must be > 0)")]
    InvalidInterval = 102,

    #[msg("Invalid duration (must be > 0)")]
    InvalidDuration = 103,

    #[msg("Start block is before the current height")]
    InvalidStartBlock = 104,

    #[msg("Pledge not found")]
    PledgeNotFound = 106,

    #[msg("Pledge is inactive")]
    PledgeInactive = 107,

    #[msg("Payment is not due")]
    PaymentNotDue = 109,

    #[msg("Creator must differ from patron")]
    InvalidCreator = 110,

    #[msg("Registry is at its pledge capacity")]
    MaxPledgesExceeded = 112,

    #[msg("Escrow reference is not set")]
    EscrowNotSet = 114,

    #[msg("Invalid perk threshold (must be > 0)")]
    InvalidPerkThreshold = 115,

    #[msg("Currency is not accepted")]
    InvalidCurrency = 116,

    #[msg("Grace period exceeds maximum")]
    InvalidGracePeriod = 118,

    #[msg("Penalty rate exceeds 100 percent")]
    InvalidPenalty = 119,

    #[msg("Authority reference is not set")]
    AuthorityNotVerified = 120,

    #[msg("Math overflow")]
    MathOverflow = 121,
}

/// Result of the registry's state transitions, independent of Anchor's `Result`.
pub type PledgeResult<T> = std::result::Result<T, PledgeError>;
