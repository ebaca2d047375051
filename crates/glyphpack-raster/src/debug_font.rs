//! Tiny built-in procedural font.
//!
//! Seven-segment-style strokes drawn into an A8 coverage mask: crude but
//! readable at small sizes, deterministic, and entirely self-contained (no
//! font files, no shaping). Tests and the demo driver use it so the atlas can
//! be exercised without pulling in a real font backend.

use crate::{GlyphBitmap, GlyphBounds, GlyphRasterizer, PixelMode};

// Segment bits for a seven-segment cell.
const TOP: u8 = 1 << 0;
const MID: u8 = 1 << 1;
const BOT: u8 = 1 << 2;
const UL: u8 = 1 << 3; // upper-left vertical
const LL: u8 = 1 << 4; // lower-left vertical
const UR: u8 = 1 << 5; // upper-right vertical
const LR: u8 = 1 << 6; // lower-right vertical

const ALL: u8 = TOP | MID | BOT | UL | LL | UR | LR;

/// Monospace cell metrics in pixels at scale 1.
#[derive(Clone, Copy, Debug)]
pub struct DebugFontMetrics {
    /// Cell width = horizontal advance.
    pub advance_px: u32,
    /// Cell height.
    pub height_px: u32,
    /// Baseline offset from the top of the cell.
    pub baseline_from_top_px: u32,
}

/// Built-in monospace "font".
///
/// Every printable character rasterizes to a fixed-size cell; unknown shapes
/// fall back to a placeholder box. Control characters are reported as
/// unsupported so callers exercise their not-found path.
#[derive(Clone, Debug)]
pub struct DebugFont {
    metrics: DebugFontMetrics,
    scale: u32,
}

impl Default for DebugFont {
    fn default() -> Self {
        Self::new()
    }
}

impl DebugFont {
    /// Base cell is 8x12 with the baseline 9px from the top.
    pub fn new() -> Self {
        Self {
            metrics: DebugFontMetrics {
                advance_px: 8,
                height_px: 12,
                baseline_from_top_px: 9,
            },
            scale: 1,
        }
    }

    /// Integer upscale of the base cell. Clamped to >= 1.
    pub fn with_scale(scale: u32) -> Self {
        Self {
            scale: scale.max(1),
            ..Self::new()
        }
    }

    pub fn metrics(&self) -> DebugFontMetrics {
        self.metrics
    }

    /// Scaled horizontal advance, also used for whitespace glyphs.
    pub fn advance_px(&self) -> i32 {
        (self.metrics.advance_px * self.scale) as i32
    }

    fn rasterize_char(&self, ch: char) -> GlyphBitmap {
        let scale = self.scale;
        let w = self.metrics.advance_px * scale;
        let h = self.metrics.height_px * scale;
        let mut pixels = vec![0u8; (w * h) as usize];

        // Stroke box inside the cell, leaving a little padding so adjacent
        // glyphs stay visually separated even when packed edge to edge.
        let pad_x = scale;
        let pad_y = 2 * scale;
        let x0 = pad_x;
        let y0 = pad_y;
        let x1 = (w - pad_x).max(x0 + 1);
        let y1 = (h - pad_y).max(y0 + 1);
        let mid_y = (y0 + y1) / 2;
        let t = scale;

        match segments_for(ch) {
            Some(mask) => {
                if mask & TOP != 0 {
                    hline(&mut pixels, w, h, x0, x1, y0, t);
                }
                if mask & MID != 0 {
                    hline(&mut pixels, w, h, x0, x1, mid_y, t);
                }
                if mask & BOT != 0 {
                    hline(&mut pixels, w, h, x0, x1, y1 - t, t);
                }
                if mask & UL != 0 {
                    vline(&mut pixels, w, h, x0, y0, mid_y + t, t);
                }
                if mask & LL != 0 {
                    vline(&mut pixels, w, h, x0, mid_y, y1, t);
                }
                if mask & UR != 0 {
                    vline(&mut pixels, w, h, x1 - t, y0, mid_y + t, t);
                }
                if mask & LR != 0 {
                    vline(&mut pixels, w, h, x1 - t, mid_y, y1, t);
                }
            }
            None => {
                // Placeholder box for anything without a segment pattern.
                hline(&mut pixels, w, h, x0, x1, y0, t);
                hline(&mut pixels, w, h, x0, x1, y1 - t, t);
                vline(&mut pixels, w, h, x0, y0, y1, t);
                vline(&mut pixels, w, h, x1 - t, y0, y1, t);
            }
        }

        GlyphBitmap {
            pixels,
            width: w,
            height: h,
            mode: PixelMode::A8,
            advance_px: self.advance_px(),
            bounds: GlyphBounds::new(
                0,
                (self.metrics.baseline_from_top_px * scale) as i32,
                w as i32,
                h as i32,
            ),
        }
    }
}

impl GlyphRasterizer for DebugFont {
    fn rasterize(&mut self, code: u64) -> Option<GlyphBitmap> {
        let ch = u32::try_from(code).ok().and_then(char::from_u32)?;
        if ch.is_control() {
            return None;
        }
        if ch == ' ' {
            // Whitespace: advance only, no pixels.
            return Some(GlyphBitmap {
                pixels: Vec::new(),
                width: 0,
                height: 0,
                mode: PixelMode::A8,
                advance_px: self.advance_px(),
                bounds: GlyphBounds::default(),
            });
        }
        Some(self.rasterize_char(ch))
    }
}

/// Seven-segment pattern for a character, `None` for "draw the placeholder".
fn segments_for(ch: char) -> Option<u8> {
    let mask = match ch.to_ascii_uppercase() {
        '0' | 'O' | 'D' => TOP | BOT | UL | LL | UR | LR,
        '1' | 'I' => UR | LR,
        '2' | 'Z' => TOP | MID | BOT | UR | LL,
        '3' => TOP | MID | BOT | UR | LR,
        '4' => MID | UL | UR | LR,
        '5' | 'S' => TOP | MID | BOT | UL | LR,
        '6' => TOP | MID | BOT | UL | LL | LR,
        '7' | 'T' => TOP | UR | LR,
        '8' | 'B' => ALL,
        '9' | 'Q' => TOP | MID | BOT | UL | UR | LR,
        'A' => TOP | MID | UL | LL | UR | LR,
        'C' => TOP | BOT | UL | LL,
        'E' => TOP | MID | BOT | UL | LL,
        'F' => TOP | MID | UL | LL,
        'G' => TOP | BOT | UL | LL | LR,
        'H' | 'K' | 'X' => MID | UL | LL | UR | LR,
        'J' => BOT | LL | UR | LR,
        'L' => BOT | UL | LL,
        'M' | 'N' => TOP | UL | LL | UR | LR,
        'P' => TOP | MID | UL | LL | UR,
        'R' => TOP | UL | LL | UR,
        'U' | 'V' | 'W' => BOT | UL | LL | UR | LR,
        'Y' => MID | UL | UR | LR,
        '-' => MID,
        '_' => BOT,
        '=' => MID | BOT,
        '.' | ',' => LL,
        '\'' | '`' => UR,
        _ => return None,
    };
    Some(mask)
}

fn set_px(pixels: &mut [u8], w: u32, h: u32, x: u32, y: u32) {
    if x >= w || y >= h {
        return;
    }
    pixels[(y * w + x) as usize] = 255;
}

fn hline(pixels: &mut [u8], w: u32, h: u32, x0: u32, x1: u32, y: u32, thickness: u32) {
    for t in 0..thickness {
        for x in x0.min(w)..x1.min(w) {
            set_px(pixels, w, h, x, y.saturating_add(t));
        }
    }
}

fn vline(pixels: &mut [u8], w: u32, h: u32, x: u32, y0: u32, y1: u32, thickness: u32) {
    for t in 0..thickness {
        for y in y0.min(h)..y1.min(h) {
            set_px(pixels, w, h, x.saturating_add(t), y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyphs_satisfy_length_invariant() {
        let mut font = DebugFont::new();
        for ch in "Hello, glyphpack 0123!".chars() {
            let bitmap = font.rasterize(ch as u64).expect("printable char");
            assert_eq!(bitmap.pixels.len(), bitmap.expected_len(), "char {ch:?}");
            assert_eq!(bitmap.mode, PixelMode::A8);
        }
    }

    #[test]
    fn monospace_advance() {
        let mut font = DebugFont::new();
        let a = font.rasterize('a' as u64).unwrap();
        let w = font.rasterize('W' as u64).unwrap();
        assert_eq!(a.advance_px, w.advance_px);
        assert_eq!(a.width, w.width);
    }

    #[test]
    fn space_is_empty_but_advances() {
        let mut font = DebugFont::new();
        let space = font.rasterize(' ' as u64).unwrap();
        assert!(space.is_empty());
        assert!(space.pixels.is_empty());
        assert_eq!(space.advance_px, font.advance_px());
    }

    #[test]
    fn control_chars_are_unsupported() {
        let mut font = DebugFont::new();
        assert!(font.rasterize('\n' as u64).is_none());
        assert!(font.rasterize('\t' as u64).is_none());
        assert!(font.rasterize(0x7f).is_none());
    }

    #[test]
    fn unknown_chars_get_a_placeholder() {
        let mut font = DebugFont::new();
        let bitmap = font.rasterize('€' as u64).unwrap();
        assert!(!bitmap.is_empty());
        assert!(bitmap.pixels.iter().any(|&p| p != 0));
    }

    #[test]
    fn scale_multiplies_the_cell() {
        let mut base = DebugFont::new();
        let mut scaled = DebugFont::with_scale(3);
        let a = base.rasterize('A' as u64).unwrap();
        let b = scaled.rasterize('A' as u64).unwrap();
        assert_eq!(b.width, a.width * 3);
        assert_eq!(b.height, a.height * 3);
        assert_eq!(b.advance_px, a.advance_px * 3);
    }
}
