// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE.txt for details)

//! This crate implements a Chip-8 interpreter core as if it were a real CPU architecture.
//!
//! The interpreter owns its memory, screen, registers, stack, timers, and keypad.
//! A host drives it by calling [CPU::step] at its chosen instruction rate, and
//! [CPU::tick_timers] at 60 Hz, then renders [CPU::screen] and plays a tone
//! while [CPU::is_sounding].
//!
//! ```rust
//! use chirp_core::*;
//! let mut cpu = CPU::new();
//! cpu.load_program_bytes(&[
//!     0x60, 0x0a, // mov #0a, v0
//!     0x70, 0x05, // add #05, v0
//! ])?;
//! cpu.step()?.step()?;
//! assert_eq!(15, cpu.v()[0]);
//! # Ok::<(), Error>(())
//! ```

pub mod cpu;
pub mod error;
pub mod mem;
pub mod screen;

pub use cpu::{
    flags::Flags, instruction::Insn, mode::Mode, quirks::Quirks, CPU, KEY_COUNT, REGISTER_COUNT,
};
pub use error::{Error, Result};
pub use mem::{Mem, Region, FONT, FONT_BASE, MEMORY_SIZE, PROGRAM_START};
pub use screen::{Screen, SCREEN_HEIGHT, SCREEN_WIDTH};
