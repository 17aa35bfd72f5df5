// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Selects the machine revision the [super::CPU] imitates

use super::Quirks;
use crate::error::Error;
use std::str::FromStr;

/// Selects the machine revision the interpreter imitates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// VIP emulation mode
    #[default]
    Chip8,
    /// Chip-48 / Super Chip emulation mode
    SChip,
}

impl From<Mode> for Quirks {
    /// Gets the [Quirks] a [Mode] expects
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Chip8 => Quirks::from(false),
            Mode::SChip => Quirks::from(true),
        }
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chip8" | "chip-8" => Ok(Mode::Chip8),
            "schip" | "superchip" | "chip48" | "chip-48" => Ok(Mode::SChip),
            _ => Err(Error::InvalidMode {
                mode: s.to_string(),
            }),
        }
    }
}
