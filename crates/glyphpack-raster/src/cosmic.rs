//! `cosmic-text` implementation of [`GlyphRasterizer`].
//!
//! This is intentionally conservative: one codepoint in, one coverage bitmap
//! out. Shaping context (ligatures, kerning pairs, bidi) is a text-layout
//! concern and stays outside this crate; we shape a single-character buffer
//! purely to resolve codepoint -> glyph id -> raster through the same path a
//! real renderer would use.
//!
//! The [`cosmic_text::FontSystem`] is the long-lived shared handle to the
//! font backend. The composition root creates one rasterizer and keeps it
//! alive for as long as glyphs are being produced; cloning font data per
//! lookup is exactly what this avoids.

use cosmic_text::{Attrs, Buffer, FontSystem, Metrics, Shaping, SwashCache, SwashContent};

use crate::{GlyphBitmap, GlyphBounds, GlyphRasterizer, PixelMode};

/// Rasterizer backed by `cosmic-text` + swash.
pub struct CosmicRasterizer {
    font_system: FontSystem,
    swash_cache: SwashCache,
    font_px: f32,
}

impl CosmicRasterizer {
    /// Create a rasterizer at a fixed pixel size, using system fonts.
    pub fn new(font_px: f32) -> Self {
        Self {
            font_system: FontSystem::new(),
            swash_cache: SwashCache::new(),
            font_px: font_px.max(1.0),
        }
    }

    /// Register raw font bytes (e.g. a bundled TTF) with the font database.
    pub fn load_font_data(&mut self, data: Vec<u8>) {
        self.font_system.db_mut().load_font_data(data);
    }

    /// Access the underlying `FontSystem` for further customization.
    pub fn font_system_mut(&mut self) -> &mut FontSystem {
        &mut self.font_system
    }
}

impl GlyphRasterizer for CosmicRasterizer {
    fn rasterize(&mut self, code: u64) -> Option<GlyphBitmap> {
        let ch = u32::try_from(code).ok().and_then(char::from_u32)?;
        if ch.is_control() {
            return None;
        }

        let metrics = Metrics::new(self.font_px, self.font_px * 1.2);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        buffer.set_size(
            &mut self.font_system,
            Some(f32::MAX),
            Some(metrics.line_height),
        );

        let mut text = [0u8; 4];
        buffer.set_text(
            &mut self.font_system,
            ch.encode_utf8(&mut text),
            &Attrs::new(),
            Shaping::Advanced,
            None,
        );
        buffer.shape_until_scroll(&mut self.font_system, false);

        let run = buffer.layout_runs().next()?;
        let glyph = run.glyphs.first()?;
        let advance_px = glyph.w.round() as i32;

        // `physical()` bakes subpixel binning and hinting into the cache key;
        // rasterizing with anything else misaligns the bitmap.
        let physical = glyph.physical((0.0, 0.0), 1.0);
        let image = self
            .swash_cache
            .get_image(&mut self.font_system, physical.cache_key)
            .clone()?;

        let width = image.placement.width;
        let height = image.placement.height;
        if width == 0 || height == 0 {
            // Whitespace and other blank glyphs: advance only.
            return Some(GlyphBitmap {
                pixels: Vec::new(),
                width: 0,
                height: 0,
                mode: PixelMode::A8,
                advance_px,
                bounds: GlyphBounds::default(),
            });
        }

        let (mode, pixels) = match image.content {
            SwashContent::Mask => (PixelMode::A8, image.data),
            SwashContent::Color => {
                // Swash emits RGBA; atlas pages store BGRA.
                let mut pixels = image.data;
                for px in bytemuck::cast_slice_mut::<u8, [u8; 4]>(&mut pixels) {
                    px.swap(0, 2);
                }
                (PixelMode::Bgra8888, pixels)
            }
            SwashContent::SubpixelMask => {
                log::debug!("subpixel mask unsupported for glyph {code:#x}");
                return None;
            }
        };

        Some(GlyphBitmap {
            pixels,
            width,
            height,
            mode,
            advance_px,
            bounds: GlyphBounds::new(
                image.placement.left,
                image.placement.top,
                width as i32,
                height as i32,
            ),
        })
    }
}
