// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)
#![allow(clippy::bad_bit_mask)]
//! Contains the definition of a Chip-8 [Insn]
//!
//! Decoding is derived by [imperative_rs]: every opcode pattern names its
//! fixed nibbles in lowercase hex, and its operand nibbles in letters.
//! Words matching no pattern fail to decode.

use imperative_rs::InstructionSet;
use std::fmt::Display;

#[allow(non_snake_case, missing_docs)]
#[derive(Clone, Copy, Debug, InstructionSet, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
/// A single decoded Chip-8 instruction
///
/// Operand letters: `N` is a 12-bit address, `K` an 8-bit immediate,
/// `x`/`y` register indices, and `n` a 4-bit immediate.
pub enum Insn {
    /// `00E0` Clear the display
    #[opcode = "0x00e0"]
    Cls,
    /// `00EE` Return from subroutine
    #[opcode = "0x00ee"]
    Ret,
    /// `1NNN` Jump to NNN
    #[opcode = "0x1NNN"]
    Jump { N: u16 },
    /// `2NNN` Call subroutine at NNN
    #[opcode = "0x2NNN"]
    Call { N: u16 },
    /// `3XKK` Skip if vX == KK
    #[opcode = "0x3xKK"]
    SkipEqImm { x: usize, K: u8 },
    /// `4XKK` Skip if vX != KK
    #[opcode = "0x4xKK"]
    SkipNeImm { x: usize, K: u8 },
    /// `5XY0` Skip if vX == vY
    #[opcode = "0x5xy0"]
    SkipEq { x: usize, y: usize },
    /// `6XKK` vX = KK
    #[opcode = "0x6xKK"]
    LoadImm { x: usize, K: u8 },
    /// `7XKK` vX += KK, without carry
    #[opcode = "0x7xKK"]
    AddImm { x: usize, K: u8 },
    /// `8XY0` vX = vY
    #[opcode = "0x8xy0"]
    Load { x: usize, y: usize },
    /// `8XY1` vX |= vY
    #[opcode = "0x8xy1"]
    Or { x: usize, y: usize },
    /// `8XY2` vX &= vY
    #[opcode = "0x8xy2"]
    And { x: usize, y: usize },
    /// `8XY3` vX ^= vY
    #[opcode = "0x8xy3"]
    Xor { x: usize, y: usize },
    /// `8XY4` vX += vY, vF = carry
    #[opcode = "0x8xy4"]
    Add { x: usize, y: usize },
    /// `8XY5` vX -= vY, vF = !borrow
    #[opcode = "0x8xy5"]
    Sub { x: usize, y: usize },
    /// `8XY6` vX = vY >> 1, vF = shifted-out bit
    #[opcode = "0x8xy6"]
    ShiftRight { x: usize, y: usize },
    /// `8XY7` vX = vY - vX, vF = !borrow
    #[opcode = "0x8xy7"]
    SubFrom { x: usize, y: usize },
    /// `8XYE` vX = vY << 1, vF = shifted-out bit
    #[opcode = "0x8xye"]
    ShiftLeft { x: usize, y: usize },
    /// `9XY0` Skip if vX != vY
    #[opcode = "0x9xy0"]
    SkipNe { x: usize, y: usize },
    /// `ANNN` I = NNN
    #[opcode = "0xaNNN"]
    LoadIndex { N: u16 },
    /// `BNNN` Jump to NNN + v0
    #[opcode = "0xbNNN"]
    JumpOffset { N: u16 },
    /// `CXKK` vX = random & KK
    #[opcode = "0xcxKK"]
    Random { x: usize, K: u8 },
    /// `DXYN` Draw an n-row sprite from I at (vX, vY)
    #[opcode = "0xdxyn"]
    Draw { x: usize, y: usize, n: u8 },
    /// `EX9E` Skip if key vX is held
    #[opcode = "0xex9e"]
    SkipKey { x: usize },
    /// `EXA1` Skip if key vX is not held
    #[opcode = "0xexa1"]
    SkipNotKey { x: usize },
    /// `FX07` vX = DT
    #[opcode = "0xfx07"]
    GetDelay { x: usize },
    /// `FX0A` Wait for a key, and put it in vX
    #[opcode = "0xfx0a"]
    WaitKey { x: usize },
    /// `FX15` DT = vX
    #[opcode = "0xfx15"]
    SetDelay { x: usize },
    /// `FX18` ST = vX
    #[opcode = "0xfx18"]
    SetSound { x: usize },
    /// `FX1E` I += vX
    #[opcode = "0xfx1e"]
    AddIndex { x: usize },
    /// `FX29` I = font base + vX
    #[opcode = "0xfx29"]
    Glyph { x: usize },
    /// `FX33` Store the decimal digits of vX at I, I+1, I+2
    #[opcode = "0xfx33"]
    Bcd { x: usize },
    /// `FX55` Store v0..=vX at I
    #[opcode = "0xfx55"]
    Store { x: usize },
    /// `FX65` Load v0..=vX from I
    #[opcode = "0xfx65"]
    Restore { x: usize },
}

impl Display for Insn {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Insn::Cls                   => write!(f, "CLS"),
            Insn::Ret                   => write!(f, "RET"),
            Insn::Jump { N }            => write!(f, "JP   {N:03X}"),
            Insn::Call { N }            => write!(f, "CALL {N:03X}"),
            Insn::SkipEqImm { x, K }    => write!(f, "SE   V{x:X}, #{K:02X}"),
            Insn::SkipNeImm { x, K }    => write!(f, "SNE  V{x:X}, #{K:02X}"),
            Insn::SkipEq { x, y }       => write!(f, "SE   V{x:X}, V{y:X}"),
            Insn::LoadImm { x, K }      => write!(f, "LD   V{x:X}, #{K:02X}"),
            Insn::AddImm { x, K }       => write!(f, "ADD  V{x:X}, #{K:02X}"),
            Insn::Load { x, y }         => write!(f, "LD   V{x:X}, V{y:X}"),
            Insn::Or { x, y }           => write!(f, "OR   V{x:X}, V{y:X}"),
            Insn::And { x, y }          => write!(f, "AND  V{x:X}, V{y:X}"),
            Insn::Xor { x, y }          => write!(f, "XOR  V{x:X}, V{y:X}"),
            Insn::Add { x, y }          => write!(f, "ADD  V{x:X}, V{y:X}"),
            Insn::Sub { x, y }          => write!(f, "SUB  V{x:X}, V{y:X}"),
            Insn::ShiftRight { x, y }   => write!(f, "SHR  V{x:X}, V{y:X}"),
            Insn::SubFrom { x, y }      => write!(f, "SUBN V{x:X}, V{y:X}"),
            Insn::ShiftLeft { x, y }    => write!(f, "SHL  V{x:X}, V{y:X}"),
            Insn::SkipNe { x, y }       => write!(f, "SNE  V{x:X}, V{y:X}"),
            Insn::LoadIndex { N }       => write!(f, "LD   I, {N:03X}"),
            Insn::JumpOffset { N }      => write!(f, "JP   V0, {N:03X}"),
            Insn::Random { x, K }       => write!(f, "RND  V{x:X}, #{K:02X}"),
            Insn::Draw { x, y, n }      => write!(f, "DRW  V{x:X}, V{y:X}, {n:X}"),
            Insn::SkipKey { x }         => write!(f, "SKP  V{x:X}"),
            Insn::SkipNotKey { x }      => write!(f, "SKNP V{x:X}"),
            Insn::GetDelay { x }        => write!(f, "LD   V{x:X}, DT"),
            Insn::WaitKey { x }         => write!(f, "LD   V{x:X}, K"),
            Insn::SetDelay { x }        => write!(f, "LD   DT, V{x:X}"),
            Insn::SetSound { x }        => write!(f, "LD   ST, V{x:X}"),
            Insn::AddIndex { x }        => write!(f, "ADD  I, V{x:X}"),
            Insn::Glyph { x }           => write!(f, "LD   F, V{x:X}"),
            Insn::Bcd { x }             => write!(f, "LD   B, V{x:X}"),
            Insn::Store { x }           => write!(f, "LD   [I], V{x:X}"),
            Insn::Restore { x }         => write!(f, "LD   V{x:X}, [I]"),
        }
    }
}
