// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Error type for Chirp

use std::ops::Range;
use thiserror::Error;

/// Result type, equivalent to [std::result::Result]<T, [enum@Error]>
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for Chirp.
#[derive(Debug, Error)]
pub enum Error {
    /// Represents an unimplemented operation.
    ///
    /// This is a warning, not a fault: the program counter has already moved
    /// past the offending word, and the next [step](crate::cpu::CPU::step)
    /// continues with the following instruction.
    #[error("opcode {word:04x} not recognized")]
    UnimplementedInstruction {
        /// The offending word
        word: u16,
    },
    /// Tried to return from a subroutine with nothing on the stack
    #[error("stack underflow: return at {pc:03x} with an empty stack")]
    StackUnderflow {
        /// The address of the offending `ret`
        pc: u16,
    },
    /// Tried to access memory outside of the address space
    #[error("range {range:04x?} is outside of memory")]
    InvalidAddressRange {
        /// The offending range
        range: Range<usize>,
    },
    /// Tried to press a key that doesn't exist
    #[error("tried to press key {key:X} which does not exist")]
    InvalidKey {
        /// The offending key
        key: usize,
    },
    /// Tried to get/set an out-of-bounds register
    #[error("tried to access register v{reg:X} which does not exist")]
    InvalidRegister {
        /// The offending register
        reg: usize,
    },
    /// Tried to convert string into mode, but it did not match.
    #[error("no suitable conversion of \"{mode}\" into Mode")]
    InvalidMode {
        /// The string which failed to become a mode
        mode: String,
    },
    /// Error originated in [std::io]
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

impl Error {
    /// Returns true if the interpreter cannot meaningfully continue after this error.
    ///
    /// # Examples
    /// ```rust
    /// # use chirp_core::error::Error;
    /// assert!(!Error::UnimplementedInstruction { word: 0xffff }.is_fatal());
    /// assert!(Error::StackUnderflow { pc: 0x200 }.is_fatal());
    /// ```
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::UnimplementedInstruction { .. })
    }
}
