// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Decodes and runs instructions


pub mod behavior;
pub mod flags;
pub mod instruction;
pub mod mode;
pub mod quirks;

use self::{flags::Flags, instruction::Insn, mode::Mode, quirks::Quirks};
use crate::{
    error::{Error, Result},
    mem::{Mem, Region, PROGRAM_START},
    screen::Screen,
};
use imperative_rs::InstructionSet;
use owo_colors::OwoColorize;

type Reg = usize;
type Adr = u16;
type Nib = u8;

/// Number of general purpose registers
pub const REGISTER_COUNT: usize = 16;
/// Number of keys on the keypad
pub const KEY_COUNT: usize = 16;

/// Represents the internal state of the CPU interpreter
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CPU {
    /// Flags that control how the CPU behaves, but which aren't inherent to the
    /// chip-8. Includes [Quirks] and debug output.
    pub flags: Flags,
    // memory
    mem: Mem,
    screen: Screen,
    stack: Vec<Adr>,
    // registers
    pc: Adr,
    i: Adr,
    v: [u8; REGISTER_COUNT],
    delay: u8,
    sound: u8,
    // I/O
    keys: u16,
    // Execution data
    cycle: usize,
}

// public interface
impl CPU {
    /// Constructs a new CPU with the font preloaded and the pc at [PROGRAM_START]
    /// # Examples
    /// ```rust
    /// # use chirp_core::*;
    /// let cpu = CPU::new();
    /// assert_eq!(0x200, cpu.pc());
    /// assert_eq!(&FONT[..], &cpu.memory()[0x50..0xa0]);
    /// ```
    pub fn new() -> Self {
        CPU {
            flags: Flags::default(),
            mem: Mem::new(),
            screen: Screen::new(),
            stack: vec![],
            pc: PROGRAM_START,
            i: 0,
            v: [0; REGISTER_COUNT],
            delay: 0,
            sound: 0,
            keys: 0,
            cycle: 0,
        }
    }

    /// Constructs a new CPU which imitates the given [Mode]
    /// # Examples
    /// ```rust
    /// # use chirp_core::*;
    /// let cpu = CPU::with_mode(Mode::SChip);
    /// assert_eq!(Quirks::from(true), cpu.flags.quirks);
    /// ```
    pub fn with_mode(mode: Mode) -> Self {
        let mut cpu = CPU::new();
        cpu.flags.set_mode(mode);
        cpu
    }

    /// Loads a program into the CPU's program space
    pub fn load_program(&mut self, rom: impl AsRef<std::path::Path>) -> Result<&mut Self> {
        self.load_program_bytes(&std::fs::read(rom)?)
    }

    /// Loads bytes into the CPU's program space, clearing whatever was there.
    ///
    /// Returns [Error::InvalidAddressRange] if the program won't fit in memory.
    /// # Examples
    /// ```rust
    /// # use chirp_core::*;
    /// let mut cpu = CPU::new();
    /// cpu.load_program_bytes(&[0x00, 0xe0]).unwrap();
    /// assert_eq!(cpu.memory()[0x200..0x202], [0x00, 0xe0]);
    /// assert!(cpu.load_program_bytes(&[0; 0xe01]).is_err());
    /// ```
    pub fn load_program_bytes(&mut self, rom: &[u8]) -> Result<&mut Self> {
        if rom.len() > Region::Program.range().len() {
            let start = PROGRAM_START as usize;
            return Err(Error::InvalidAddressRange {
                range: start..start + rom.len(),
            });
        }
        self.mem.clear_region(Region::Program);
        self.mem.load_region(Region::Program, rom)?;
        Ok(self)
    }

    /// Sets the state of a key, and reports whether the key's state changed.
    /// If key does not exist, returns [Error::InvalidKey].
    ///
    /// # Examples
    /// ```rust
    /// # use chirp_core::*;
    /// let mut cpu = CPU::default();
    ///
    /// // press key `7`
    /// assert!(cpu.set_key_state(0x7, true).unwrap());
    /// // press key `7` again, even though it's already pressed
    /// assert!(!cpu.set_key_state(0x7, true).unwrap());
    /// // release it
    /// assert!(cpu.set_key_state(0x7, false).unwrap());
    /// // there is no key `10`
    /// assert!(cpu.set_key_state(0x10, true).is_err());
    /// ```
    pub fn set_key_state(&mut self, key: usize, pressed: bool) -> Result<bool> {
        if key >= KEY_COUNT {
            return Err(Error::InvalidKey { key });
        }
        let mask = 1u16 << key;
        let was_pressed = self.keys & mask != 0;
        if pressed {
            self.keys |= mask;
        } else {
            self.keys &= !mask;
        }
        Ok(was_pressed != pressed)
    }

    /// Returns true if the key is currently held. Keys that don't exist are never held.
    ///
    /// # Examples
    /// ```rust
    /// # use chirp_core::*;
    /// let mut cpu = CPU::default();
    /// cpu.set_key_state(0xa, true).unwrap();
    /// assert!(cpu.is_key_down(0xa));
    /// assert!(!cpu.is_key_down(0xb));
    /// assert!(!cpu.is_key_down(0x42));
    /// ```
    pub fn is_key_down(&self, key: usize) -> bool {
        key < KEY_COUNT && self.keys & (1 << key) != 0
    }

    /// Gets the keypad state as a bitmask, where bit `k` is set while key `k` is held
    pub fn keys(&self) -> u16 {
        self.keys
    }

    /// Sets a general purpose register in the CPU.
    /// If the register doesn't exist, returns [Error::InvalidRegister]
    /// # Examples
    /// ```rust
    /// # use chirp_core::*;
    /// // Create a new CPU, and set v4 to 0x41
    /// let mut cpu = CPU::default();
    /// cpu.set_v(0x4, 0x41).unwrap();
    /// assert_eq!(0x41, cpu.v()[4]);
    /// assert!(cpu.set_v(0x10, 0).is_err());
    /// ```
    pub fn set_v(&mut self, reg: Reg, value: u8) -> Result<()> {
        if let Some(gpr) = self.v.get_mut(reg) {
            *gpr = value;
            Ok(())
        } else {
            Err(Error::InvalidRegister { reg })
        }
    }

    /// Gets a slice of the entire general purpose registers
    pub fn v(&self) -> &[u8] {
        self.v.as_slice()
    }

    /// Gets the program counter
    pub fn pc(&self) -> Adr {
        self.pc
    }

    /// Gets the I register
    pub fn i(&self) -> Adr {
        self.i
    }

    /// Gets the call stack, oldest return address first
    pub fn stack(&self) -> &[Adr] {
        self.stack.as_slice()
    }

    /// Gets the value in the Sound Timer register
    pub fn sound(&self) -> u8 {
        self.sound
    }

    /// Returns true while the sound timer is running, which is when a tone should play
    pub fn is_sounding(&self) -> bool {
        self.sound > 0
    }

    /// Gets the value in the Delay Timer register
    pub fn delay(&self) -> u8 {
        self.delay
    }

    /// Gets the number of instructions the CPU has executed
    pub fn cycle(&self) -> usize {
        self.cycle
    }

    /// Gets the screen, for rendering
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Gets the memory
    pub fn mem(&self) -> &Mem {
        &self.mem
    }

    /// Gets the raw memory buffer
    pub fn memory(&self) -> &[u8] {
        self.mem.as_slice()
    }

    /// Gets the raw memory buffer, mutably, for loaders which place data themselves
    pub fn memory_mut(&mut self) -> &mut [u8] {
        self.mem.as_mut_slice()
    }

    /// Turns every pixel on the screen off
    pub fn clear_display(&mut self) {
        self.screen.clear();
    }

    /// Enables or disables every [Quirks] toggle at once
    pub fn set_quirks_mode(&mut self, quirks: bool) {
        self.flags.quirks = Quirks::from(quirks);
    }

    /// Counts both timers down by one, stopping at zero.
    ///
    /// The host should call this at 60 Hz, independent of [CPU::step].
    /// # Examples
    /// ```rust
    /// # use chirp_core::*;
    /// let mut cpu = CPU::default();
    /// cpu.tick_timers();
    /// assert_eq!(0, cpu.delay());
    /// assert_eq!(0, cpu.sound());
    /// ```
    pub fn tick_timers(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    /// Makes this CPU an exact copy of `source`, reusing this CPU's allocations.
    ///
    /// Useful for save states and rewinding.
    /// # Examples
    /// ```rust
    /// # use chirp_core::*;
    /// let mut cpu = CPU::default();
    /// let mut snapshot = CPU::default();
    /// cpu.set_v(0, 0x99).unwrap();
    /// snapshot.copy_state_from(&cpu);
    /// assert_eq!(cpu, snapshot);
    /// ```
    pub fn copy_state_from(&mut self, source: &CPU) {
        self.flags.clone_from(&source.flags);
        self.mem.copy_from(&source.mem);
        self.screen.copy_from(&source.screen);
        self.stack.clone_from(&source.stack);
        self.pc = source.pc;
        self.i = source.i;
        self.v = source.v;
        self.delay = source.delay;
        self.sound = source.sound;
        self.keys = source.keys;
        self.cycle = source.cycle;
    }

    /// Resets the emulator.
    ///
    /// Touches the stack, pc, registers, timers, keys, screen, and cycle count.
    ///
    /// Does not touch [Flags] or memory.
    pub fn reset(&mut self) {
        // clear the stack
        self.stack.truncate(0);
        // Reset the program counter
        self.pc = PROGRAM_START;
        // Zero the registers
        self.i = 0;
        self.v = [0; REGISTER_COUNT];
        self.delay = 0;
        self.sound = 0;
        // I/O
        self.keys = 0;
        self.screen.clear();
        // Execution data
        self.cycle = 0;
    }

    /// Executes a single instruction
    ///
    /// The pc is advanced past the instruction before it runs.
    ///
    /// Returns [Error::UnimplementedInstruction] if the word at `pc` isn't an instruction.
    /// This is a warning: the pc has moved on, and stepping again runs the next instruction.
    ///
    /// Any other error is fatal, and leaves the CPU exactly as it was before the step.
    /// # Examples
    /// ```rust
    /// # use chirp_core::*;
    /// let mut cpu = CPU::default();
    /// cpu.load_program_bytes(&[
    ///     0x00, 0xe0, // cls
    ///     0x12, 0x02, // jump 0x202 (pc)
    /// ]).unwrap();
    /// cpu.step()
    ///     .expect("0x00e0 (cls) should be a valid opcode.");
    /// assert_eq!(0x202, cpu.pc());
    /// assert_eq!(1, cpu.cycle());
    /// ```
    /// Returns [Error::UnimplementedInstruction] if the instruction is not implemented.
    /// ```rust
    /// # use chirp_core::*;
    /// let mut cpu = CPU::default();
    /// cpu.load_program_bytes(&[
    ///     0xff, 0xff, // invalid!
    ///     0x12, 0x02, // jump 0x202 (pc)
    /// ]).unwrap();
    /// let error = cpu.step().expect_err("0xffff is not an instruction");
    /// assert!(!error.is_fatal());
    /// assert_eq!(0x202, cpu.pc());
    /// ```
    pub fn step(&mut self) -> Result<&mut Self> {
        let pc = self.pc;
        let word = self.fetch()?;
        self.pc = pc.wrapping_add(2);
        self.cycle += 1;

        let insn = match Insn::decode(&word.to_be_bytes()) {
            Ok((_, insn)) => insn,
            Err(_) => {
                if self.flags.debug {
                    eprintln!(
                        "{:3} {:03x}: {}",
                        self.cycle.bright_black(),
                        pc,
                        format!("inval  {word:04x}").bold().red(),
                    );
                }
                return Err(Error::UnimplementedInstruction { word });
            }
        };

        // Print opcode disassembly:
        if self.flags.debug {
            println!(
                "{:3} {:03x}: {:<36}",
                self.cycle.bright_black(),
                pc,
                insn.green(),
            );
        }

        if let Err(e) = self.execute(insn) {
            self.pc = pc;
            self.cycle -= 1;
            return Err(e);
        }
        Ok(self)
    }

    /// Dumps the current state of all CPU registers, and the cycle count
    /// # Examples
    /// ```rust
    /// # use chirp_core::*;
    /// let mut cpu = CPU::default();
    /// cpu.dump();
    /// ```
    /// outputs
    /// ```text
    /// PC: 0200, SP: 0000, I: 0000
    /// v0: 00 v1: 00 v2: 00 v3: 00
    /// v4: 00 v5: 00 v6: 00 v7: 00
    /// v8: 00 v9: 00 vA: 00 vB: 00
    /// vC: 00 vD: 00 vE: 00 vF: 00
    /// DLY: 0, SND: 0, CYC:      0
    /// ```
    pub fn dump(&self) {
        std::println!(
            "PC: {:04x}, SP: {:04x}, I: {:04x}\n{}DLY: {}, SND: {}, CYC: {:6}",
            self.pc,
            self.stack.len(),
            self.i,
            self.v
                .into_iter()
                .enumerate()
                .map(|(i, gpr)| {
                    format!(
                        "v{i:X}: {gpr:02x} {}",
                        match i % 4 {
                            3 => "\n",
                            _ => "",
                        }
                    )
                })
                .collect::<String>(),
            self.delay,
            self.sound,
            self.cycle,
        );
    }
}

// internals
impl CPU {
    /// Reads the big-endian word at the pc
    fn fetch(&self) -> Result<u16> {
        let pc = self.pc as usize;
        let bytes = self.mem.grab(pc..pc + 2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }
}

impl Default for CPU {
    /// Constructs a new CPU with sane defaults
    ///
    /// | value  | default | description
    /// |--------|---------|------------
    /// | font   |`0x0050` | Location of font memory.
    /// | pc     |`0x0200` | Start location.
    ///
    /// # Examples
    /// ```rust
    /// use chirp_core::*;
    /// let mut cpu = CPU::default();
    /// ```
    fn default() -> Self {
        Self::new()
    }
}
