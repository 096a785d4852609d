use std::fmt;

use crate::error::{Error, Result};

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;
pub const BYTES_PER_PIXEL: usize = 4;

/// The original implementation of the Chip-8 language used a 64x32-pixel monochrome display with this format:
/// ( 0, 0)   (63, 0)
/// ( 0,31)   (63,31)
#[derive(Clone, PartialEq, Eq)]
pub struct Display([bool; DISPLAY_WIDTH * DISPLAY_HEIGHT]);

impl Display {
    pub fn new() -> Self {
        Display([false; DISPLAY_WIDTH * DISPLAY_HEIGHT])
    }

    pub fn clear(&mut self) {
        for i in &mut self.0 {
            *i = false
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Result<bool> {
        Ok(self.0[self.compute_idx(x, y)?])
    }

    /// Xors the pixel at position (`x`, `y`) and returns `true`
    /// if the pixel was cleared.
    pub fn xor_pixel(&mut self, x: usize, y: usize, value: bool) -> Result<bool> {
        let idx = self.compute_idx(x, y)?;
        Ok(self.xor_at(idx, value))
    }

    fn xor_at(&mut self, idx: usize, value: bool) -> bool {
        let last_value = self.0[idx];
        let new_value = last_value ^ value;
        self.0[idx] = new_value;

        last_value && !new_value
    }

    /// XORs a sprite onto the screen with its top left corner at (`x`, `y`).
    ///
    /// Every byte of `rows` is one line of eight pixels, most significant bit leftmost.
    /// Pixels falling off an edge wrap around to the opposite side. Returns `true`
    /// if any lit pixel was turned off.
    pub fn draw_sprite(&mut self, x: usize, y: usize, rows: &[u8]) -> bool {
        let mut was_cleared = false;

        for (offset, sprite) in rows.iter().enumerate() {
            let row = (y + offset) % DISPLAY_HEIGHT;

            for bit in 0..8 {
                if sprite & (0b1000_0000 >> bit) == 0 {
                    continue;
                }

                let col = (x + bit) % DISPLAY_WIDTH;
                was_cleared |= self.xor_at(row * DISPLAY_WIDTH + col, true);
            }
        }

        was_cleared
    }

    pub fn compute_idx(&self, x: usize, y: usize) -> Result<usize> {
        if x >= self.width() || y >= self.height() {
            return Err(Error::PixelOutOfRange { x, y });
        }

        Ok(y * self.width() + x)
    }

    pub fn pixels(&self) -> &[bool] {
        &self.0
    }

    /// Row-major RGBA surface, four bytes per pixel. Lit pixels are `0xFF`, dark ones `0x00`.
    pub fn to_rgba(&self) -> Vec<u8> {
        self.0
            .iter()
            .flat_map(|&lit| [if lit { 0xFF } else { 0x00 }; BYTES_PER_PIXEL])
            .collect()
    }

    pub fn width(&self) -> usize {
        DISPLAY_WIDTH
    }

    pub fn height(&self) -> usize {
        DISPLAY_HEIGHT
    }
}

impl Default for Display {
    fn default() -> Self {
        Display::new()
    }
}

impl fmt::Debug for Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lit = self.0.iter().filter(|p| **p).count();
        write!(f, "Display {{ lit: {} }}", lit)
    }
}

impl fmt::Display for Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.0.chunks(DISPLAY_WIDTH) {
            for lit in row {
                write!(f, "{}", if *lit { "#" } else { " " })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
