use core::fmt;

/// Seat of a participant at the table, counted from zero.
///
/// The seat is the only identity the score sheet knows about; names and
/// remote player ids are resolved by front-ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ParticipantIndex(pub u8);

impl ParticipantIndex {
    pub const FIRST: Self = Self(0);

    #[inline]
    pub const fn new(seat: u8) -> Self {
        Self(seat)
    }

    /// Position of this participant inside aggregate tables.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u8> for ParticipantIndex {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl fmt::Display for ParticipantIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
