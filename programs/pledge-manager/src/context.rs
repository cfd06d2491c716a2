use anchor_lang::prelude::*;

/// Ambient inputs of a single call: who is calling and at what height.
///
/// Fixed for the duration of the call. On chain the caller is the signer and
/// the height is the current slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallContext {
    pub caller: Pubkey,
    pub height: u64,
}

impl CallContext {
    pub fn new(caller: Pubkey, height: u64) -> Self {
        Self { caller, height }
    }

    /// Context for the current transaction.
    pub fn current(caller: Pubkey) -> Result<Self> {
        Ok(Self::new(caller, Clock::get()?.slot))
    }
}
