// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Contains implementations for each Chip-8 [Insn]
//!
//! Every handler runs after the program counter has been advanced past
//! the instruction, so skips and returns are relative to the *next* word.
//! Handlers which can fault check their bounds before touching any state.

use super::*;
use crate::{
    mem::FONT_BASE,
    screen::{SCREEN_HEIGHT, SCREEN_WIDTH},
};
use rand::random;

/// Largest address reachable through the I register before it wraps
const ADDRESS_MASK: Adr = 0xfff;

impl CPU {
    /// Executes a single [Insn]
    #[rustfmt::skip]
    #[allow(non_snake_case)]
    #[inline(always)]
    pub(super) fn execute(&mut self, instruction: Insn) -> Result<()> {
        match instruction {
            Insn::Cls                   => self.clear_screen(),
            Insn::Ret                   => self.ret()?,
            Insn::Jump       { N }      => self.jump(N),
            Insn::Call       { N }      => self.call(N),
            Insn::SkipEqImm  { x, K }   => self.skip_equals_immediate(x, K),
            Insn::SkipNeImm  { x, K }   => self.skip_not_equals_immediate(x, K),
            Insn::SkipEq     { x, y }   => self.skip_equals(x, y),
            Insn::LoadImm    { x, K }   => self.load_immediate(x, K),
            Insn::AddImm     { x, K }   => self.add_immediate(x, K),
            Insn::Load       { x, y }   => self.load(x, y),
            Insn::Or         { x, y }   => self.or(x, y),
            Insn::And        { x, y }   => self.and(x, y),
            Insn::Xor        { x, y }   => self.xor(x, y),
            Insn::Add        { x, y }   => self.add(x, y),
            Insn::Sub        { x, y }   => self.sub(x, y),
            Insn::ShiftRight { x, y }   => self.shift_right(x, y),
            Insn::SubFrom    { x, y }   => self.backwards_sub(x, y),
            Insn::ShiftLeft  { x, y }   => self.shift_left(x, y),
            Insn::SkipNe     { x, y }   => self.skip_not_equals(x, y),
            Insn::LoadIndex  { N }      => self.load_i_immediate(N),
            Insn::JumpOffset { N }      => self.jump_indexed(N),
            Insn::Random     { x, K }   => self.rand(x, K),
            Insn::Draw       { x, y, n }=> self.draw(x, y, n)?,
            Insn::SkipKey    { x }      => self.skip_key_equals(x),
            Insn::SkipNotKey { x }      => self.skip_key_not_equals(x),
            Insn::GetDelay   { x }      => self.load_delay_timer(x),
            Insn::WaitKey    { x }      => self.wait_for_key(x),
            Insn::SetDelay   { x }      => self.store_delay_timer(x),
            Insn::SetSound   { x }      => self.store_sound_timer(x),
            Insn::AddIndex   { x }      => self.add_i(x),
            Insn::Glyph      { x }      => self.load_sprite(x),
            Insn::Bcd        { x }      => self.bcd_convert(x)?,
            Insn::Store      { x }      => self.store_dma(x)?,
            Insn::Restore    { x }      => self.load_dma(x)?,
        }
        Ok(())
    }
}

/// |`00e0`| Clear screen memory to all 0
/// |`00ee`| Return from subroutine
impl CPU {
    /// |`00e0`| Clears the screen memory to 0
    #[inline(always)]
    pub(super) fn clear_screen(&mut self) {
        self.screen.clear();
    }
    /// |`00ee`| Returns from subroutine
    ///
    /// Returning with an empty stack is a [Error::StackUnderflow]
    #[inline(always)]
    pub(super) fn ret(&mut self) -> Result<()> {
        self.pc = self.stack.pop().ok_or(Error::StackUnderflow {
            pc: self.pc.wrapping_sub(2),
        })?;
        Ok(())
    }
}

/// |`1aaa`| Sets pc to an absolute address
/// |`2aaa`| Pushes pc onto the stack, then jumps to a
impl CPU {
    /// |`1aaa`| Sets the program counter to an absolute address
    #[inline(always)]
    pub(super) fn jump(&mut self, a: Adr) {
        self.pc = a;
    }
    /// |`2aaa`| Pushes pc onto the stack, then jumps to a
    #[inline(always)]
    pub(super) fn call(&mut self, a: Adr) {
        self.stack.push(self.pc);
        self.pc = a;
    }
}

/// |`3xbb`| Skips next instruction if register X == b
/// |`4xbb`| Skips next instruction if register X != b
/// |`5xy0`| Skips next instruction if register X == register Y
/// |`9xy0`| Skips next instruction if register X != register Y
impl CPU {
    #[inline(always)]
    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.pc = self.pc.wrapping_add(2);
        }
    }
    /// |`3xbb`| Skips the next instruction if register X == b
    #[inline(always)]
    pub(super) fn skip_equals_immediate(&mut self, x: Reg, b: u8) {
        self.skip_if(self.v[x] == b)
    }
    /// |`4xbb`| Skips the next instruction if register X != b
    #[inline(always)]
    pub(super) fn skip_not_equals_immediate(&mut self, x: Reg, b: u8) {
        self.skip_if(self.v[x] != b)
    }
    /// |`5xy0`| Skips the next instruction if register X == register Y
    #[inline(always)]
    pub(super) fn skip_equals(&mut self, x: Reg, y: Reg) {
        self.skip_if(self.v[x] == self.v[y])
    }
    /// |`9xy0`| Skips the next instruction if register X != register Y
    #[inline(always)]
    pub(super) fn skip_not_equals(&mut self, x: Reg, y: Reg) {
        self.skip_if(self.v[x] != self.v[y])
    }
}

/// |`6xbb`| Loads immediate byte b into register vX
/// |`7xbb`| Adds immediate byte b to register vX
impl CPU {
    /// |`6xbb`| Loads immediate byte b into register vX
    #[inline(always)]
    pub(super) fn load_immediate(&mut self, x: Reg, b: u8) {
        self.v[x] = b;
    }
    /// |`7xbb`| Adds immediate byte b to register vX. Never touches vF.
    #[inline(always)]
    pub(super) fn add_immediate(&mut self, x: Reg, b: u8) {
        self.v[x] = self.v[x].wrapping_add(b);
    }
}

/// |`8xyn`| Performs ALU operation
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`8xy0`| X = Y                              |
/// |`8xy1`| X = X \| Y                         |
/// |`8xy2`| X = X & Y                          |
/// |`8xy3`| X = X ^ Y                          |
/// |`8xy4`| X = X + Y; Set vF=carry            |
/// |`8xy5`| X = X - Y; Set vF=!borrow          |
/// |`8xy6`| X = Y >> 1; Set vF=shifted bit     |
/// |`8xy7`| X = Y - X; Set vF=!borrow          |
/// |`8xyE`| X = Y << 1; Set vF=shifted bit     |
///
/// The result is always written before the flag, so when X is F,
/// vF holds the flag whenever one is written.
impl CPU {
    /// |`8xy0`| Loads the value of y into x
    #[inline(always)]
    pub(super) fn load(&mut self, x: Reg, y: Reg) {
        self.v[x] = self.v[y];
    }
    /// |`8xy1`| Performs bitwise or of vX and vY, and stores the result in vX
    #[inline(always)]
    pub(super) fn or(&mut self, x: Reg, y: Reg) {
        self.v[x] |= self.v[y];
    }
    /// |`8xy2`| Performs bitwise and of vX and vY, and stores the result in vX
    #[inline(always)]
    pub(super) fn and(&mut self, x: Reg, y: Reg) {
        self.v[x] &= self.v[y];
    }
    /// |`8xy3`| Performs bitwise xor of vX and vY, and stores the result in vX
    #[inline(always)]
    pub(super) fn xor(&mut self, x: Reg, y: Reg) {
        self.v[x] ^= self.v[y];
    }
    /// |`8xy4`| Performs addition of vX and vY, and stores the result in vX
    ///
    /// vF is set on carry, and left alone otherwise.
    #[inline(always)]
    pub(super) fn add(&mut self, x: Reg, y: Reg) {
        let carry;
        (self.v[x], carry) = self.v[x].overflowing_add(self.v[y]);
        if carry {
            self.v[0xf] = 1;
        }
    }
    /// |`8xy5`| Performs subtraction of vX and vY, and stores the result in vX
    ///
    /// vF is 0 if the subtraction borrowed, and 1 otherwise.
    #[inline(always)]
    pub(super) fn sub(&mut self, x: Reg, y: Reg) {
        let borrow;
        (self.v[x], borrow) = self.v[x].overflowing_sub(self.v[y]);
        self.v[0xf] = (!borrow).into();
    }
    /// |`8xy6`| Performs bitwise right shift of vY, and stores the result in vX
    ///
    /// # Quirk
    /// On the Super-Chip, this shifts vX in place and ignores vY
    #[inline(always)]
    pub(super) fn shift_right(&mut self, x: Reg, y: Reg) {
        let src: Reg = if self.flags.quirks.shift { x } else { y };
        let shift_out = self.v[src] & 1;
        self.v[x] = self.v[src] >> 1;
        self.v[0xf] = shift_out;
    }
    /// |`8xy7`| Performs subtraction of vY and vX, and stores the result in vX
    ///
    /// vF is 0 if the subtraction borrowed, and 1 otherwise.
    #[inline(always)]
    pub(super) fn backwards_sub(&mut self, x: Reg, y: Reg) {
        let borrow;
        (self.v[x], borrow) = self.v[y].overflowing_sub(self.v[x]);
        self.v[0xf] = (!borrow).into();
    }
    /// |`8xyE`| Performs bitwise left shift of vY, and stores the result in vX
    ///
    /// # Quirk
    /// On the Super-Chip, this shifts vX in place and ignores vY
    #[inline(always)]
    pub(super) fn shift_left(&mut self, x: Reg, y: Reg) {
        let src: Reg = if self.flags.quirks.shift { x } else { y };
        let shift_out = self.v[src] >> 7;
        self.v[x] = self.v[src] << 1;
        self.v[0xf] = shift_out;
    }
}

/// |`Aaaa`| Load address #a into register I
/// |`Baaa`| Jump to &adr + v0
/// |`Cxbb`| Stores a random number & the provided byte into vX
impl CPU {
    /// |`Aadr`| Load address #adr into register I
    #[inline(always)]
    pub(super) fn load_i_immediate(&mut self, a: Adr) {
        self.i = a;
    }
    /// |`Badr`| Jump to &adr + v0
    ///
    /// # Quirk
    /// On the Super-Chip, this jumps to &adr + vX, where X is the high nibble of adr
    #[inline(always)]
    pub(super) fn jump_indexed(&mut self, a: Adr) {
        let reg = if self.flags.quirks.stupid_jumps {
            (a as usize >> 8) & 0xf
        } else {
            0
        };
        self.pc = a.wrapping_add(self.v[reg] as Adr);
    }
    /// |`Cxbb`| Stores a random number & the provided byte into vX
    #[inline(always)]
    pub(super) fn rand(&mut self, x: Reg, b: u8) {
        self.v[x] = random::<u8>() & b;
    }
}

/// |`Dxyn`| Draws n-byte sprite to the screen at coordinates (vX, vY)
impl CPU {
    /// |`Dxyn`| Draws n-byte sprite to the screen at coordinates (vX, vY)
    ///
    /// The starting coordinates wrap around the screen, but the sprite does not:
    /// rows and columns which fall off the edge are dropped.
    /// vF is set if any lit pixel was erased.
    #[inline(always)]
    pub(super) fn draw(&mut self, x: Reg, y: Reg, n: Nib) -> Result<()> {
        let (x, y) = (
            self.v[x] as usize % SCREEN_WIDTH,
            self.v[y] as usize % SCREEN_HEIGHT,
        );
        // Rows below the bottom edge are never read
        let rows = (n as usize).min(SCREEN_HEIGHT - y);
        let i = self.i as usize;
        let sprite = self.mem.grab(i..i + rows)?;
        self.v[0xf] = 0;
        for (line, &byte) in sprite.iter().enumerate() {
            let py = y + line;
            for bit in 0..8 {
                let px = x + bit;
                if px >= SCREEN_WIDTH {
                    break;
                }
                if byte & (0x80 >> bit) != 0 && self.screen.toggle(px, py) {
                    self.v[0xf] = 1;
                }
            }
        }
        Ok(())
    }
}

/// |`Exbb`| Skips instruction on value of keypress
///
/// |opcode| effect                                 |
/// |------|----------------------------------------|
/// |`eX9e`| Skip next instruction if key vX is held|
/// |`eXa1`| Skip next instruction if key vX is up  |
impl CPU {
    /// |`Ex9E`| Skip next instruction if key vX is held
    #[inline(always)]
    pub(super) fn skip_key_equals(&mut self, x: Reg) {
        self.skip_if(self.is_key_down(self.v[x] as usize & 0xf))
    }
    /// |`ExA1`| Skip next instruction if key vX is not held
    #[inline(always)]
    pub(super) fn skip_key_not_equals(&mut self, x: Reg) {
        self.skip_if(!self.is_key_down(self.v[x] as usize & 0xf))
    }
}

/// |`Fxbb`| Performs IO
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`fX07`| Set vX to value in delay timer     |
/// |`fX0a`| Wait for input, store key in vX    |
/// |`fX15`| Set delay timer to the value in vX |
/// |`fX18`| Set sound timer to the value in vX |
/// |`fX1e`| Add vX to I                        |
/// |`fX29`| Set I to the font base plus vX     |
/// |`fX33`| BCD convert X into I[0..3]         |
/// |`fX55`| DMA Stor from I to registers 0..=X |
/// |`fX65`| DMA Load from I to registers 0..=X |
impl CPU {
    /// |`Fx07`| Get the current DT, and put it in vX
    /// ```py
    /// vX = DT
    /// ```
    #[inline(always)]
    pub(super) fn load_delay_timer(&mut self, x: Reg) {
        self.v[x] = self.delay;
    }
    /// |`Fx0A`| Wait for key, then vX = K
    ///
    /// Waiting is done by rewinding the pc, so this instruction runs again next step.
    /// If several keys are held, the lowest-numbered one wins.
    #[inline(always)]
    pub(super) fn wait_for_key(&mut self, x: Reg) {
        if self.keys == 0 {
            self.pc = self.pc.wrapping_sub(2);
        } else {
            self.v[x] = self.keys.trailing_zeros() as u8;
        }
    }
    /// |`Fx15`| Load vX into DT
    /// ```py
    /// DT = vX
    /// ```
    #[inline(always)]
    pub(super) fn store_delay_timer(&mut self, x: Reg) {
        self.delay = self.v[x];
    }
    /// |`Fx18`| Load vX into ST
    /// ```py
    /// ST = vX;
    /// ```
    #[inline(always)]
    pub(super) fn store_sound_timer(&mut self, x: Reg) {
        self.sound = self.v[x];
    }
    /// |`Fx1e`| Add vX to I
    /// ```py
    /// I += vX;
    /// ```
    /// If I leaves the 12-bit address space, it wraps and vF is set
    #[inline(always)]
    pub(super) fn add_i(&mut self, x: Reg) {
        let i = self.i.wrapping_add(self.v[x] as Adr);
        if i > ADDRESS_MASK {
            self.i = i & ADDRESS_MASK;
            self.v[0xf] = 1;
        } else {
            self.i = i;
        }
    }
    /// |`Fx29`| Point I into the font, offset by vX
    /// ```py
    /// I = FONT_BASE + vX;
    /// ```
    #[inline(always)]
    pub(super) fn load_sprite(&mut self, x: Reg) {
        self.i = FONT_BASE.wrapping_add(self.v[x] as Adr);
    }
    /// |`Fx33`| BCD convert X into I`[0..3]`
    #[inline(always)]
    pub(super) fn bcd_convert(&mut self, x: Reg) -> Result<()> {
        let x = self.v[x];
        let i = self.i as usize;
        self.mem
            .grab_mut(i..i + 3)?
            .copy_from_slice(&[x / 100 % 10, x / 10 % 10, x % 10]);
        Ok(())
    }
    /// |`Fx55`| DMA Stor from I to registers 0..=X
    ///
    /// I is left untouched.
    #[inline(always)]
    pub(super) fn store_dma(&mut self, x: Reg) -> Result<()> {
        let i = self.i as usize;
        self.mem
            .grab_mut(i..i + x + 1)?
            .copy_from_slice(&self.v[..=x]);
        Ok(())
    }
    /// |`Fx65`| DMA Load from I to registers 0..=X
    ///
    /// I is left untouched.
    #[inline(always)]
    pub(super) fn load_dma(&mut self, x: Reg) -> Result<()> {
        let i = self.i as usize;
        self.v[..=x].copy_from_slice(self.mem.grab(i..i + x + 1)?);
        Ok(())
    }
}
