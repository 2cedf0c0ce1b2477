//! Strongly typed behavior-thread identifier.
//!
//! A `BtId` is the index of a thread in the program roster, assigned in
//! registration order at build time.  Identity is by id, never by name: two
//! threads registered under the same name are distinct participants.

use std::fmt;

/// Index of a behavior thread in the program roster.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BtId(pub u32);

impl BtId {
    /// Sentinel meaning "no valid ID" — equivalent to `u32::MAX`.
    pub const INVALID: BtId = BtId(u32::MAX);

    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Default for BtId {
    /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for BtId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BtId({})", self.0)
    }
}

impl From<BtId> for usize {
    #[inline(always)]
    fn from(id: BtId) -> usize {
        id.0 as usize
    }
}

impl TryFrom<usize> for BtId {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<BtId, Self::Error> {
        u32::try_from(n).map(BtId)
    }
}
