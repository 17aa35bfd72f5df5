// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Represents flags that aid in implementation but aren't a part of the Chip-8 machine

use super::{Mode, Quirks};

/// Represents flags that aid in operation, but aren't inherent to the CPU
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Flags {
    /// Set when debug (live disassembly) mode enabled
    pub debug: bool,
    /// Represents the current emulator [Mode]
    pub mode: Mode,
    /// Represents the set of emulator [Quirks] to enable, independent of the [Mode]
    pub quirks: Quirks,
}

impl Flags {
    /// Toggles debug mode
    ///
    /// # Examples
    /// ```rust
    /// # use chirp_core::*;
    /// let mut cpu = CPU::default();
    /// assert_eq!(false, cpu.flags.debug);
    /// // Toggle debug mode
    /// cpu.flags.debug();
    /// assert_eq!(true, cpu.flags.debug);
    /// ```
    pub fn debug(&mut self) {
        self.debug = !self.debug
    }

    /// Switches to a new [Mode], replacing the [Quirks] with the ones that mode expects
    ///
    /// # Examples
    /// ```rust
    /// # use chirp_core::*;
    /// let mut cpu = CPU::default();
    /// cpu.flags.set_mode(Mode::SChip);
    /// assert!(cpu.flags.quirks.shift);
    /// assert!(cpu.flags.quirks.stupid_jumps);
    /// ```
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.quirks = mode.into();
    }
}
