// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Controls the [Quirks] behavior of the CPU on a granular level.

/// Controls the quirk behavior of the CPU on a granular level.
///
/// `false` is Cosmac-VIP-like behavior
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quirks {
    /// Super Chip: Shift ops in `8xy`(`6`, `E`) shift vX in place, instead of sourcing from vY
    pub shift: bool,
    /// Super Chip: Indexed jump instructions should go to `adr` + v`a` where `a` is high nibble of `adr`.
    pub stupid_jumps: bool,
}

impl From<bool> for Quirks {
    fn from(value: bool) -> Self {
        Quirks {
            shift: value,
            stupid_jumps: value,
        }
    }
}

impl Quirks {
    /// Returns true if any quirk is enabled
    /// # Examples
    /// ```rust
    /// # use chirp_core::cpu::quirks::Quirks;
    /// assert!(Quirks::from(true).any());
    /// assert!(!Quirks::default().any());
    /// ```
    pub fn any(&self) -> bool {
        self.shift || self.stupid_jumps
    }
}
