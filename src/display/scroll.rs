//! Right-to-left scrolling text.
//!
//! The message is laid out as a strip of columns: 8 blank columns, then
//! each glyph followed by one spacing column, then 8 blank columns. Frame
//! `i` shows strip columns `i..i + 8`, so the text enters from the right
//! edge and fully leaves on the left.

use core::time::Duration;

use super::font::{glyph, GLYPH_HEIGHT};
use super::{Frame, Rgb, SIZE};
use crate::app::ports::{Clock, LedMatrix};
use crate::error::Result;

/// Row of the matrix that holds the top row of each glyph.
const TOP_ROW: usize = 1;

/// Frame generator for one pass of a message.
pub struct ScrollingText {
    columns: Vec<u8>,
    fg: Rgb,
    bg: Rgb,
    offset: usize,
}

impl ScrollingText {
    pub fn new(text: &str, fg: Rgb, bg: Rgb) -> Self {
        let mut columns = vec![0u8; SIZE];
        for c in text.chars() {
            columns.extend_from_slice(glyph(c));
            columns.push(0);
        }
        columns.extend(core::iter::repeat_n(0u8, SIZE));
        Self {
            columns,
            fg,
            bg,
            offset: 0,
        }
    }

    /// Total number of frames in one pass.
    pub fn frame_count(&self) -> usize {
        self.columns.len() - SIZE + 1
    }

    fn render(&self, offset: usize) -> Frame {
        let mut frame = Frame::filled(self.bg);
        for (x, &bits) in self.columns[offset..offset + SIZE].iter().enumerate() {
            for row in 0..GLYPH_HEIGHT {
                if bits & (1 << row) != 0 {
                    // x < SIZE and TOP_ROW + row < SIZE
                    frame.put(x, TOP_ROW + row, self.fg);
                }
            }
        }
        frame
    }
}

impl Iterator for ScrollingText {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.offset >= self.frame_count() {
            return None;
        }
        let frame = self.render(self.offset);
        self.offset += 1;
        Some(frame)
    }
}

/// Scroll `text` across the matrix once, `speed` between frames, then leave
/// the background showing. `board` is anything that has both a matrix and a
/// clock, usually the whole HAT adapter.
pub fn show_message<B>(board: &mut B, text: &str, speed: Duration, fg: Rgb, bg: Rgb) -> Result<()>
where
    B: LedMatrix + Clock + ?Sized,
{
    for frame in ScrollingText::new(text, fg, bg) {
        board.set_frame(&frame)?;
        board.sleep(speed);
    }
    board.clear(bg)
}
