//! Bitmap drawing for raster exports
//!
//! Text is drawn with the 8×8 monospaced glyphs of `font8x8`, scaled by
//! nearest neighbour to the requested pixel size.

use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use image::{Rgb as Pixel, RgbImage};

const GLYPH_SIZE: u32 = 8;

/// Largest glyph drawn, in pixels
const MAX_TEXT_SIZE: u32 = 512;

/// Hollow box for characters the font does not cover
const REPLACEMENT: [u8; 8] = [0x7E, 0x42, 0x42, 0x42, 0x42, 0x42, 0x7E, 0x00];

/// Horizontal anchoring of a text run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
}

fn glyph(c: char) -> [u8; 8] {
    BASIC_FONTS
        .get(c)
        .or_else(|| LATIN_FONTS.get(c))
        .unwrap_or(REPLACEMENT)
}

/// Width in pixels of `text` drawn at `size`
pub fn text_width(text: &str, size: u32) -> f64 {
    text.chars().count() as f64 * size.clamp(1, MAX_TEXT_SIZE) as f64
}

/// Draw `text` vertically centered on `y`; pixels outside the image are dropped
pub fn draw_text(
    img: &mut RgbImage,
    text: &str,
    x: f64,
    y: f64,
    size: u32,
    color: Pixel<u8>,
    anchor: Anchor,
) {
    let size = size.clamp(1, MAX_TEXT_SIZE);
    let left = match anchor {
        Anchor::Start => x,
        Anchor::Middle => x - text_width(text, size) / 2.0,
    };
    let top = y - size as f64 / 2.0;

    for (i, c) in text.chars().enumerate() {
        let bits = glyph(c);
        let origin = left + i as f64 * size as f64;

        for py in 0..size {
            let row = bits[(py * GLYPH_SIZE / size) as usize];
            for px in 0..size {
                if row & (1 << (px * GLYPH_SIZE / size)) == 0 {
                    continue;
                }

                let (ix, iy) = ((origin + px as f64).round(), (top + py as f64).round());
                if ix < 0.0 || iy < 0.0 {
                    continue;
                }
                let (ix, iy) = (ix as u32, iy as u32);
                if ix < img.width() && iy < img.height() {
                    img.put_pixel(ix, iy, color);
                }
            }
        }
    }
}
