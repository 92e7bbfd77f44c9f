//! LED matrix primitives: colours, 8x8 frames, rotation and scrolling text.
//!
//! Everything here is pure data. Writing a frame to the physical matrix is
//! the job of a [`LedMatrix`](crate::app::ports::LedMatrix) adapter.

pub mod font;
pub mod patterns;
pub mod scroll;

use crate::error::DisplayError;

/// Colour as (R, G, B) tuple, each 0–255.
pub type Rgb = (u8, u8, u8);

/// Width and height of the matrix.
pub const SIZE: usize = 8;

// ── Well-known colours ────────────────────────────────────────

pub const OFF: Rgb = (0, 0, 0);
pub const WHITE: Rgb = (255, 255, 255);
pub const RED: Rgb = (255, 0, 0);
pub const GREEN: Rgb = (0, 255, 0);
pub const BLUE: Rgb = (0, 0, 255);
pub const YELLOW: Rgb = (255, 255, 0);
pub const MAGENTA: Rgb = (255, 0, 255);
pub const CYAN: Rgb = (0, 255, 255);
pub const GREY: Rgb = (128, 128, 128);

/// Display rotation in degrees clockwise, as the HAT can be mounted upside down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    /// Parse a rotation given in degrees. Only right angles are accepted.
    pub fn from_degrees(deg: u16) -> Option<Self> {
        match deg % 360 {
            0 => Some(Self::R0),
            90 => Some(Self::R90),
            180 => Some(Self::R180),
            270 => Some(Self::R270),
            _ => None,
        }
    }

    pub fn degrees(self) -> u16 {
        match self {
            Self::R0 => 0,
            Self::R90 => 90,
            Self::R180 => 180,
            Self::R270 => 270,
        }
    }
}

/// One full 8x8 image, row-major (`pixels[y][x]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pixels: [[Rgb; SIZE]; SIZE],
}

impl Default for Frame {
    fn default() -> Self {
        Self::filled(OFF)
    }
}

impl Frame {
    /// A frame with every pixel set to `colour`.
    pub const fn filled(colour: Rgb) -> Self {
        Self {
            pixels: [[colour; SIZE]; SIZE],
        }
    }

    /// Build a frame from an on/off mask (`mask[y][x]`).
    pub fn from_mask(mask: &[[u8; SIZE]; SIZE], on: Rgb, off: Rgb) -> Self {
        let mut frame = Self::filled(off);
        for (y, row) in mask.iter().enumerate() {
            for (x, &bit) in row.iter().enumerate() {
                if bit != 0 {
                    frame.pixels[y][x] = on;
                }
            }
        }
        frame
    }

    pub fn set(&mut self, x: usize, y: usize, colour: Rgb) -> Result<(), DisplayError> {
        if x >= SIZE || y >= SIZE {
            return Err(DisplayError::OutOfBounds { x, y });
        }
        self.pixels[y][x] = colour;
        Ok(())
    }

    /// Setter for coordinates already known to lie in `0..SIZE`.
    pub(crate) fn put(&mut self, x: usize, y: usize, colour: Rgb) {
        self.pixels[y][x] = colour;
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        self.pixels.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Number of pixels that are not [`OFF`].
    pub fn lit_count(&self) -> usize {
        self.pixels
            .iter()
            .flatten()
            .filter(|&&p| p != OFF)
            .count()
    }

    /// True when every pixel has the same colour.
    pub fn is_uniform(&self, colour: Rgb) -> bool {
        self.pixels.iter().flatten().all(|&p| p == colour)
    }

    /// Row-major iterator over `(x, y, colour)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Rgb)> + '_ {
        self.pixels
            .iter()
            .enumerate()
            .flat_map(|(y, row)| row.iter().enumerate().map(move |(x, &c)| (x, y, c)))
    }

    /// Return a copy rotated clockwise by `rotation`.
    pub fn rotated(&self, rotation: Rotation) -> Self {
        let mut out = Self::default();
        let n = SIZE - 1;
        for (x, y, c) in self.iter() {
            let (nx, ny) = match rotation {
                Rotation::R0 => (x, y),
                Rotation::R90 => (n - y, x),
                Rotation::R180 => (n - x, n - y),
                Rotation::R270 => (y, n - x),
            };
            out.pixels[ny][nx] = c;
        }
        out
    }
}

/// Convert a colour to the RGB565 word used by the Sense HAT framebuffer.
pub fn to_rgb565((r, g, b): Rgb) -> u16 {
    ((u16::from(r) >> 3) << 11) | ((u16::from(g) >> 2) << 5) | (u16::from(b) >> 3)
}
