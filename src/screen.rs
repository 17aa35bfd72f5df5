// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Stores and displays the Chip-8's screen memory

use crate::error::{Error, Result};
use std::fmt::{Display, Formatter};

/// Width of the display, in pixels
pub const SCREEN_WIDTH: usize = 64;
/// Height of the display, in pixels
pub const SCREEN_HEIGHT: usize = 32;

/// A 64x32 monochrome display, stored row-major with one `bool` per pixel
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<bool>", into = "Vec<bool>"))]
pub struct Screen {
    pixels: Vec<bool>,
}

impl Screen {
    /// Constructs a blank screen
    /// # Examples
    /// ```rust
    /// # use chirp_core::screen::*;
    /// let screen = Screen::new();
    /// assert_eq!(SCREEN_WIDTH * SCREEN_HEIGHT, screen.pixels().len());
    /// assert!(screen.pixels().iter().all(|&px| !px));
    /// ```
    pub fn new() -> Self {
        Screen {
            pixels: vec![false; SCREEN_WIDTH * SCREEN_HEIGHT],
        }
    }

    /// Width of the screen, in pixels
    pub fn width(&self) -> usize {
        SCREEN_WIDTH
    }

    /// Height of the screen, in pixels
    pub fn height(&self) -> usize {
        SCREEN_HEIGHT
    }

    /// Gets every pixel, row-major
    pub fn pixels(&self) -> &[bool] {
        &self.pixels
    }

    /// Gets the pixel at (`x`, `y`), or None if it's off-screen
    pub fn get(&self, x: usize, y: usize) -> Option<bool> {
        if x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT {
            return None;
        }
        self.pixels.get(y * SCREEN_WIDTH + x).copied()
    }

    /// Turns every pixel off
    pub fn clear(&mut self) {
        self.pixels.fill(false);
    }

    /// Flips the pixel at (`x`, `y`), returning true if it was lit before the flip.
    ///
    /// Off-screen coordinates are ignored.
    /// # Examples
    /// ```rust
    /// # use chirp_core::screen::*;
    /// let mut screen = Screen::new();
    /// assert!(!screen.toggle(3, 4)); // lit it, nothing was erased
    /// assert_eq!(Some(true), screen.get(3, 4));
    /// assert!(screen.toggle(3, 4)); // erased it
    /// assert_eq!(Some(false), screen.get(3, 4));
    /// ```
    pub fn toggle(&mut self, x: usize, y: usize) -> bool {
        if x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT {
            return false;
        }
        match self.pixels.get_mut(y * SCREEN_WIDTH + x) {
            Some(px) => {
                let was_lit = *px;
                *px = !was_lit;
                was_lit
            }
            None => false,
        }
    }

    pub(crate) fn copy_from(&mut self, other: &Screen) {
        self.pixels.clone_from(&other.pixels);
    }

    /// Prints the screen to stdout
    ///
    /// With the `drawille` feature, the screen is drawn in braille characters.
    pub fn print_screen(&self) {
        #[cfg(feature = "drawille")]
        {
            use drawille::Canvas;
            let mut canvas = Canvas::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32);
            self.pixels
                .iter()
                .enumerate()
                .filter(|(_, px)| **px)
                .for_each(|(index, _)| {
                    canvas.set(
                        (index % SCREEN_WIDTH) as u32,
                        (index / SCREEN_WIDTH) as u32,
                    )
                });
            println!("{}", canvas.frame());
        }
        #[cfg(not(feature = "drawille"))]
        print!("{self}");
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Vec<bool>> for Screen {
    type Error = Error;
    /// Adopts a raw pixel buffer, which must be exactly
    /// [SCREEN_WIDTH] * [SCREEN_HEIGHT] pixels long
    fn try_from(pixels: Vec<bool>) -> Result<Self> {
        if pixels.len() != SCREEN_WIDTH * SCREEN_HEIGHT {
            return Err(Error::InvalidAddressRange {
                range: 0..pixels.len(),
            });
        }
        Ok(Screen { pixels })
    }
}

impl From<Screen> for Vec<bool> {
    fn from(screen: Screen) -> Self {
        screen.pixels
    }
}

impl Display for Screen {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (y, row) in self.pixels.chunks_exact(SCREEN_WIDTH).enumerate() {
            write!(f, "{y:02x}|")?;
            for &px in row {
                write!(f, "{}", if px { '█' } else { ' ' })?;
            }
            writeln!(f, "|")?;
        }
        Ok(())
    }
}
