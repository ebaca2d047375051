//! Rasterizer-facing types and the rasterizer interface for `glyphpack`.
//!
//! # Design goals
//! - **Backend-agnostic**: no atlas types, no renderer types. The atlas crate
//!   consumes [`GlyphBitmap`]s; where they come from is this crate's business.
//! - **Closed pixel-format set**: the atlas needs to know exactly how many
//!   bytes a pixel occupies, so [`PixelMode`] is a small fixed enum rather
//!   than an open-ended format descriptor.
//!
//! # Current implementations
//! - [`DebugFont`]: a built-in procedural monospace font. No font files, no
//!   shaping. Used by tests and the demo driver.
//! - `cosmic` feature: [`cosmic::CosmicRasterizer`], backed by `cosmic-text`.

#![deny(warnings)]

mod debug_font;

pub use debug_font::*;

#[cfg(feature = "cosmic")]
pub mod cosmic;

/// Pixel storage format of a glyph bitmap and of the atlas pages that hold it.
///
/// The set is closed on purpose; [`PixelMode::bytes_per_pixel`] is the only
/// property the packer ever consults.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelMode {
    /// 1 byte per pixel: coverage/alpha mask.
    A8,
    /// 2 bytes per pixel: alpha + intensity.
    Ai88,
    /// 3 bytes per pixel: RGB.
    Rgb888,
    /// 4 bytes per pixel: BGRA (matches common texture upload formats).
    Bgra8888,
}

impl PixelMode {
    /// Bytes occupied by one pixel in this mode.
    #[inline]
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::A8 => 1,
            Self::Ai88 => 2,
            Self::Rgb888 => 3,
            Self::Bgra8888 => 4,
        }
    }
}

/// Glyph bounding box relative to the text baseline, in pixels.
///
/// This is rasterizer-reported metadata and is independent of where the glyph
/// lands in an atlas. Coordinate convention: x grows right, y grows up from
/// the baseline (`top` is the distance from baseline to the top edge).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GlyphBounds {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl GlyphBounds {
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// A rasterized glyph: pixels plus the metrics a text layer needs.
///
/// Invariant: `pixels.len() == width * height * mode.bytes_per_pixel()`.
/// Rows are contiguous (no padding), row-major, top-left origin.
#[derive(Clone, Debug)]
pub struct GlyphBitmap {
    /// Row-major pixel bytes; stride is `width * mode.bytes_per_pixel()`.
    pub pixels: Vec<u8>,
    /// Bitmap width in pixels.
    pub width: u32,
    /// Bitmap height in pixels.
    pub height: u32,
    /// Storage format of `pixels`.
    pub mode: PixelMode,
    /// Horizontal advance in pixels to apply to the pen after this glyph.
    pub advance_px: i32,
    /// Baseline-relative bounding box.
    pub bounds: GlyphBounds,
}

impl GlyphBitmap {
    /// Expected byte length of `pixels` given the dimensions and mode.
    #[inline]
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * self.mode.bytes_per_pixel()
    }

    /// True for whitespace-style glyphs that carry an advance but no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Turns a character code into a pixel bitmap plus metrics.
///
/// Implementations must return `None` for codepoints the underlying font does
/// not cover, never an error: an unsupported character is a normal outcome
/// that the caller resolves with its own fallback policy.
///
/// `&mut self` because real backends (FreeType, swash) keep mutable raster
/// state; pure implementations simply ignore it.
pub trait GlyphRasterizer {
    fn rasterize(&mut self, code: u64) -> Option<GlyphBitmap>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_mode_widths() {
        assert_eq!(PixelMode::A8.bytes_per_pixel(), 1);
        assert_eq!(PixelMode::Ai88.bytes_per_pixel(), 2);
        assert_eq!(PixelMode::Rgb888.bytes_per_pixel(), 3);
        assert_eq!(PixelMode::Bgra8888.bytes_per_pixel(), 4);
    }

    #[test]
    fn bitmap_expected_len_tracks_mode() {
        let bitmap = GlyphBitmap {
            pixels: vec![0; 4 * 3 * 4],
            width: 4,
            height: 3,
            mode: PixelMode::Bgra8888,
            advance_px: 5,
            bounds: GlyphBounds::default(),
        };
        assert_eq!(bitmap.expected_len(), 48);
        assert_eq!(bitmap.pixels.len(), bitmap.expected_len());
        assert!(!bitmap.is_empty());
    }

    #[test]
    fn zero_area_bitmap_is_empty() {
        let bitmap = GlyphBitmap {
            pixels: Vec::new(),
            width: 0,
            height: 0,
            mode: PixelMode::A8,
            advance_px: 8,
            bounds: GlyphBounds::default(),
        };
        assert!(bitmap.is_empty());
        assert_eq!(bitmap.expected_len(), 0);
    }
}
