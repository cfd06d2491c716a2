use anchor_lang::prelude::*;

/// Which side of a pledge an index is keyed by.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexRole {
    Patron,
    Creator,
}

/// Append-only list of pledge ids for one owner in one role.
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct PledgeIndex {
    pub owner: Pubkey,
    pub role: IndexRole,
    /// Creation order; never reordered or shrunk.
    pub ids: Vec<u64>,
    pub bump: u8,
}

impl PledgeIndex {
    /// Space for discriminator + owner + role + a vec of `ids` entries + bump.
    /// The PDA grows by one entry per appended id.
    pub const fn space(ids: usize) -> usize {
        8 + 32 + 1 + 4 + 8 * ids + 1
    }

    /// Claims a freshly created (zeroed) index. No-op once claimed.
    pub fn claim(&mut self, owner: Pubkey, role: IndexRole, bump: u8) {
        if self.owner == Pubkey::default() {
            self.owner = owner;
            self.role = role;
            self.bump = bump;
        }
    }

    pub fn append(&mut self, id: u64) {
        self.ids.push(id);
    }
}
