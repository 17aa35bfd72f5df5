// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The Mem represents the interpreter's 4 KiB address space
//!
//! Contains the memory map, the built-in font, and bounds-checked accessors

use crate::error::{Error, Result};
use owo_colors::{OwoColorize, Style};
use std::{
    fmt::{Display, Formatter},
    ops::Range,
};

/// Size of the address space, in bytes
pub const MEMORY_SIZE: usize = 0x1000;
/// Location of the built-in hexadecimal font
pub const FONT_BASE: u16 = 0x050;
/// Location where programs are loaded and execution begins
pub const PROGRAM_START: u16 = 0x200;

/// The canonical 4x5 hexadecimal digit glyphs, `0` through `F`
#[rustfmt::skip]
pub const FONT: [u8; 80] = [
    0xf0, 0x90, 0x90, 0x90, 0xf0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xf0, 0x10, 0xf0, 0x80, 0xf0, // 2
    0xf0, 0x10, 0xf0, 0x10, 0xf0, // 3
    0x90, 0x90, 0xf0, 0x10, 0x10, // 4
    0xf0, 0x80, 0xf0, 0x10, 0xf0, // 5
    0xf0, 0x80, 0xf0, 0x90, 0xf0, // 6
    0xf0, 0x10, 0x20, 0x40, 0x40, // 7
    0xf0, 0x90, 0xf0, 0x90, 0xf0, // 8
    0xf0, 0x90, 0xf0, 0x10, 0xf0, // 9
    0xf0, 0x90, 0xf0, 0x90, 0x90, // A
    0xe0, 0x90, 0xe0, 0x90, 0xe0, // B
    0xf0, 0x80, 0x80, 0x80, 0xf0, // C
    0xe0, 0x90, 0x90, 0x90, 0xe0, // D
    0xf0, 0x80, 0xf0, 0x80, 0xf0, // E
    0xf0, 0x80, 0xf0, 0x80, 0x80, // F
];

/// Represents a named region in memory
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Region {
    /// Character ROM (but writable!)
    Charset,
    /// Program memory
    Program,
}

impl Region {
    /// Gets the range of addresses this region occupies
    /// # Examples
    /// ```rust
    /// # use chirp_core::mem::Region;
    /// assert_eq!(0x050..0x0a0, Region::Charset.range());
    /// assert_eq!(0x200..0x1000, Region::Program.range());
    /// ```
    pub const fn range(self) -> Range<usize> {
        match self {
            Region::Charset => FONT_BASE as usize..FONT_BASE as usize + FONT.len(),
            Region::Program => PROGRAM_START as usize..MEMORY_SIZE,
        }
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            Region::Charset => "Charset",
            Region::Program => "Program",
        })
    }
}

/// Stores the interpreter's memory
///
/// The backing store is always exactly [MEMORY_SIZE] bytes long.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<u8>", into = "Vec<u8>"))]
pub struct Mem {
    memory: Vec<u8>,
}

impl Mem {
    /// Constructs a zeroed [Mem] with the [FONT] loaded into [Region::Charset]
    /// # Examples
    /// ```rust
    /// # use chirp_core::mem::*;
    /// let mem = Mem::new();
    /// assert_eq!(MEMORY_SIZE, mem.as_slice().len());
    /// assert_eq!(&FONT[..], mem.get_region(Region::Charset));
    /// ```
    pub fn new() -> Self {
        let mut mem = Mem {
            memory: vec![0; MEMORY_SIZE],
        };
        mem.memory[Region::Charset.range()].copy_from_slice(&FONT);
        mem
    }

    /// Gets the entire backing memory
    pub fn as_slice(&self) -> &[u8] {
        &self.memory
    }

    /// Gets the entire backing memory, mutably
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.memory
    }

    /// Gets a slice of memory, or [Error::InvalidAddressRange] if any of it is out of bounds
    /// # Examples
    /// ```rust
    /// # use chirp_core::mem::*;
    /// let mem = Mem::new();
    /// assert_eq!(&FONT[0..5], mem.grab(0x50..0x55).unwrap());
    /// assert!(mem.grab(0xfff..0x1001).is_err());
    /// ```
    #[inline(always)]
    pub fn grab(&self, range: Range<usize>) -> Result<&[u8]> {
        match self.memory.get(range.clone()) {
            Some(slice) => Ok(slice),
            None => Err(Error::InvalidAddressRange { range }),
        }
    }

    /// Gets a mutable slice of memory, or [Error::InvalidAddressRange] if any of it is out of bounds
    #[inline(always)]
    pub fn grab_mut(&mut self, range: Range<usize>) -> Result<&mut [u8]> {
        match self.memory.get_mut(range.clone()) {
            Some(slice) => Ok(slice),
            None => Err(Error::InvalidAddressRange { range }),
        }
    }

    /// Loads data into a named [Region], returning [Error::InvalidAddressRange] if it won't fit
    /// # Examples
    /// ```rust
    /// # use chirp_core::mem::*;
    /// let mut mem = Mem::new();
    /// mem.load_region(Region::Program, b"Hello, world!").unwrap();
    /// assert_eq!(b"Hello, world!", mem.grab(0x200..0x20d).unwrap());
    /// ```
    pub fn load_region(&mut self, name: Region, data: &[u8]) -> Result<&mut Self> {
        let region = name.range();
        if data.len() > region.len() {
            return Err(Error::InvalidAddressRange {
                range: region.start..region.start + data.len(),
            });
        }
        self.memory[region.start..region.start + data.len()].copy_from_slice(data);
        Ok(self)
    }

    /// Fills a [Region] with zeroes
    pub fn clear_region(&mut self, name: Region) -> &mut Self {
        self.memory[name.range()].fill(0);
        self
    }

    /// Gets a slice of a named [Region] of memory
    #[inline(always)]
    pub fn get_region(&self, name: Region) -> &[u8] {
        &self.memory[name.range()]
    }

    /// Copies the contents of another [Mem] into this one, reusing the allocation
    pub(crate) fn copy_from(&mut self, other: &Mem) {
        self.memory.clone_from(&other.memory);
    }
}

impl Default for Mem {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Vec<u8>> for Mem {
    type Error = Error;
    /// Adopts a raw memory image, which must be exactly [MEMORY_SIZE] bytes long
    fn try_from(memory: Vec<u8>) -> Result<Self> {
        if memory.len() != MEMORY_SIZE {
            return Err(Error::InvalidAddressRange {
                range: 0..memory.len(),
            });
        }
        Ok(Mem { memory })
    }
}

impl From<Mem> for Vec<u8> {
    fn from(mem: Mem) -> Self {
        mem.memory
    }
}

impl Display for Mem {
    /// Hexdumps the memory, sixteen bytes to a line
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // Green phosphor style formatting, for taste
        let term: Style = Style::new().bold().green().on_black();
        for (index, byte) in self.memory.iter().enumerate() {
            if index % 16 == 0 {
                write!(f, "{:>03x}{} ", index.style(term), ":".style(term))?
            }
            write!(f, "{byte:02x}")?;
            write!(
                f,
                "{}",
                match index % 16 {
                    0xf => "\n",
                    0x7 => "  ",
                    _ if index % 2 == 1 => " ",
                    _ => "",
                }
            )?
        }
        Ok(())
    }
}
