//! Built-in bitmap face used when no TrueType font can be loaded.
//!
//! Glyphs are 5x7 pixel patterns drawn at an integer pixel scale. Clue text
//! only contains digits and spaces; `-` is included and any other character
//! renders as `?`.

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

/// Glyph pattern width in font pixels
pub const GLYPH_WIDTH: u32 = 5;

/// Glyph pattern height in font pixels
pub const GLYPH_HEIGHT: u32 = 7;

/// Blank columns between adjacent glyphs, in font pixels
pub const GLYPH_SPACING: u32 = 1;

/// Default font-pixel to image-pixel scale (10x14 px glyphs)
pub const DEFAULT_PIXEL_SCALE: u32 = 2;

// One byte per row, top to bottom; bit 4 is the leftmost column.
const DIGITS: [[u8; 7]; 10] = [
    [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
    [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
    [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
    [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
    [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
    [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
    [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
    [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
    [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
];

const SPACE: [u8; 7] = [0; 7];
const MINUS: [u8; 7] = [0, 0, 0, 0b11111, 0, 0, 0];
const UNKNOWN: [u8; 7] = [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b00000, 0b00100];

/// Row patterns for a character.
fn glyph_rows(ch: char) -> &'static [u8; 7] {
    match ch {
        '0'..='9' => &DIGITS[(ch as u8 - b'0') as usize],
        ' ' => &SPACE,
        '-' => &MINUS,
        _ => &UNKNOWN,
    }
}

/// Monospace bitmap face. Always available, fully deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapFace {
    pixel_scale: u32,
}

impl BitmapFace {
    pub fn new(pixel_scale: u32) -> Self {
        Self {
            pixel_scale: pixel_scale.max(1),
        }
    }

    pub fn pixel_scale(&self) -> u32 {
        self.pixel_scale
    }

    /// Horizontal distance between glyph origins, in image pixels.
    pub fn advance(&self) -> u32 {
        (GLYPH_WIDTH + GLYPH_SPACING) * self.pixel_scale
    }

    /// Size of the box covered by `text`; no trailing spacing is counted.
    pub fn measure(&self, text: &str) -> (i32, i32) {
        let count = text.chars().count() as u32;
        if count == 0 {
            return (0, 0);
        }
        let width = count * self.advance() - GLYPH_SPACING * self.pixel_scale;
        let height = GLYPH_HEIGHT * self.pixel_scale;
        (width as i32, height as i32)
    }

    /// Draw `text` with its top-left corner at `(x, y)`. Off-canvas pixels are clipped.
    pub fn draw(&self, canvas: &mut RgbaImage, color: Rgba<u8>, x: i32, y: i32, text: &str) {
        let scale = self.pixel_scale as i32;
        let advance = self.advance() as i32;

        for (index, ch) in text.chars().enumerate() {
            let origin_x = x + index as i32 * advance;
            for (row, &bits) in glyph_rows(ch).iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if (bits >> (GLYPH_WIDTH - 1 - col)) & 1 == 0 {
                        continue;
                    }
                    let px = origin_x + col as i32 * scale;
                    let py = y + row as i32 * scale;
                    draw_filled_rect_mut(
                        canvas,
                        Rect::at(px, py).of_size(self.pixel_scale, self.pixel_scale),
                        color,
                    );
                }
            }
        }
    }
}

impl Default for BitmapFace {
    fn default() -> Self {
        Self::new(DEFAULT_PIXEL_SCALE)
    }
}
