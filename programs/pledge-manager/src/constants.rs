//! Program-wide constants: registry defaults, validation bounds and PDA seeds.

/// Default ceiling on the number of pledges a registry will ever create.
pub const DEFAULT_MAX_PLEDGES: u64 = 10_000;

/// Default floor on a pledge's per-payment amount.
pub const DEFAULT_MIN_AMOUNT: u64 = 10;

/// Default payment interval in height units (about 30 days of 10-minute blocks).
pub const DEFAULT_INTERVAL: u64 = 4_320;

/// Largest accepted grace period.
pub const MAX_GRACE_PERIOD: u8 = 30;

/// Largest accepted penalty rate, in percent.
pub const MAX_PENALTY_RATE: u8 = 100;

/// Accepted currency tickers, in `Currency` discriminant order.
pub const ACCEPTED_CURRENCIES: [&str; 3] = ["STX", "USD", "BTC"];

pub const REGISTRY_SEED: &[u8] = b"registry";
pub const PLEDGE_SEED: &[u8] = b"pledge";
pub const PLEDGE_UPDATE_SEED: &[u8] = b"pledge_update";
pub const PATRON_INDEX_SEED: &[u8] = b"patron_index";
pub const CREATOR_INDEX_SEED: &[u8] = b"creator_index";
