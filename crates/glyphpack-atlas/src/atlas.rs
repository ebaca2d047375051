//! Page lifecycle and the codepoint -> slot cache.

use std::collections::HashMap;

use glyphpack_raster::{GlyphBounds, GlyphRasterizer, PixelMode};

use crate::page::{AtlasPage, PlaceResult};

/// Cached placement + metrics for one character code.
///
/// Texture coordinates are normalized against the *owning* page's dimensions,
/// not a shared space across pages. Once returned for a code, the same value
/// is returned forever: the cache never evicts and pages never move.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GlyphSlot {
    /// Index of the page holding the bitmap; resolve with
    /// [`FontAtlas::page_at`].
    pub page_index: usize,
    /// Normalized top-left of the placed rectangle, in `[0, 1]`.
    pub uv_origin: [f32; 2],
    /// Normalized size of the placed rectangle, in `[0, 1]`.
    pub uv_size: [f32; 2],
    /// Horizontal advance in pixels for pen movement.
    pub advance_px: i32,
    /// Baseline-relative bounding box as reported by the rasterizer.
    pub bounds: GlyphBounds,
}

/// Failures surfaced by [`FontAtlas::get_or_insert`].
///
/// Page-full is not in this list: rollover to a fresh page is handled
/// internally and is invisible to callers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AtlasError {
    /// The rasterized bitmap exceeds the page dimensions in some axis. The
    /// request is rejected before any page or slot is touched; choosing an
    /// adequate page size is the caller's responsibility.
    #[error("glyph bitmap {width}x{height} exceeds page size {page_width}x{page_height}")]
    OversizedGlyph {
        width: u32,
        height: u32,
        page_width: u32,
        page_height: u32,
    },
    /// The rasterizer has no glyph for this codepoint. A normal outcome, not
    /// a fault; callers apply their own fallback policy. Negative results are
    /// not cached.
    #[error("no glyph for codepoint {0:#x}")]
    GlyphNotFound(u64),
    /// The rasterizer produced pixels in a different format than the atlas
    /// stores.
    #[error("pixel mode mismatch: bitmap is {bitmap:?}, atlas stores {atlas:?}")]
    PixelModeMismatch { bitmap: PixelMode, atlas: PixelMode },
    /// Placement failed on a freshly opened page. Only reachable if an
    /// oversize bitmap slipped past the boundary check, i.e. an internal
    /// invariant was broken.
    #[error("placement failed on a fresh page; packer invariant broken")]
    RolloverExhausted,
}

/// A growing stack of shelf-packed pages with a lazy glyph cache in front.
///
/// One page at a time is *active* (accepting placements). When it fills, it
/// is archived as-is and a fresh page of the same dimensions opens; archived
/// pages are read-only for the rest of the atlas's life. The cache is
/// append-only: no invalidation, no eviction, so a returned [`GlyphSlot`] is
/// valid forever.
///
/// All mutation goes through `&mut self`, so concurrent insertion is ruled
/// out at compile time; wrap the atlas in a lock if multiple threads miss on
/// glyphs concurrently.
pub struct FontAtlas {
    archived: Vec<AtlasPage>,
    active: AtlasPage,
    slots: HashMap<u64, GlyphSlot>,
    mode: PixelMode,
    page_width: u32,
    page_height: u32,
}

impl FontAtlas {
    /// Create an atlas whose pages all share `mode` and the given dimensions.
    ///
    /// # Panics
    /// Panics if either dimension is zero.
    pub fn new(mode: PixelMode, page_width: u32, page_height: u32) -> Self {
        assert!(
            page_width > 0 && page_height > 0,
            "atlas pages must have nonzero dimensions"
        );
        Self {
            archived: Vec::new(),
            active: AtlasPage::new(mode, page_width, page_height),
            slots: HashMap::new(),
            mode,
            page_width,
            page_height,
        }
    }

    #[inline]
    pub const fn mode(&self) -> PixelMode {
        self.mode
    }

    #[inline]
    pub const fn page_width(&self) -> u32 {
        self.page_width
    }

    #[inline]
    pub const fn page_height(&self) -> u32 {
        self.page_height
    }

    /// Index of the page currently accepting placements.
    #[inline]
    pub fn active_index(&self) -> usize {
        self.archived.len()
    }

    /// Total number of pages, archived plus active.
    #[inline]
    pub fn page_count(&self) -> usize {
        self.archived.len() + 1
    }

    /// Read-only access to a page. Valid indices are `0..page_count()`; the
    /// last one is the active page.
    pub fn page_at(&self, index: usize) -> Option<&AtlasPage> {
        if index == self.archived.len() {
            Some(&self.active)
        } else {
            self.archived.get(index)
        }
    }

    /// Cache lookup without rasterization.
    #[inline]
    pub fn get(&self, code: u64) -> Option<GlyphSlot> {
        self.slots.get(&code).copied()
    }

    /// Number of cached glyph slots.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Return the cached slot for `code`, rasterizing and packing it first if
    /// this is the first request.
    ///
    /// The hot path is a pure map read: hits never invoke `rasterizer` and
    /// never mutate the atlas. On a miss the bitmap is placed into the active
    /// page; if that page is full it is archived and placement retries exactly
    /// once against a fresh page.
    pub fn get_or_insert(
        &mut self,
        code: u64,
        rasterizer: &mut dyn GlyphRasterizer,
    ) -> Result<GlyphSlot, AtlasError> {
        if let Some(slot) = self.slots.get(&code) {
            return Ok(*slot);
        }

        let bitmap = rasterizer
            .rasterize(code)
            .ok_or(AtlasError::GlyphNotFound(code))?;

        // Whitespace-style glyphs carry an advance but no pixels; cache them
        // with a zero-area rect on the active page instead of packing.
        if bitmap.is_empty() {
            let slot = GlyphSlot {
                page_index: self.active_index(),
                uv_origin: [0.0, 0.0],
                uv_size: [0.0, 0.0],
                advance_px: bitmap.advance_px,
                bounds: bitmap.bounds,
            };
            self.slots.insert(code, slot);
            return Ok(slot);
        }

        if bitmap.mode != self.mode {
            return Err(AtlasError::PixelModeMismatch {
                bitmap: bitmap.mode,
                atlas: self.mode,
            });
        }
        if bitmap.width > self.page_width || bitmap.height > self.page_height {
            return Err(AtlasError::OversizedGlyph {
                width: bitmap.width,
                height: bitmap.height,
                page_width: self.page_width,
                page_height: self.page_height,
            });
        }
        debug_assert_eq!(bitmap.pixels.len(), bitmap.expected_len());

        let (x, y) = match self
            .active
            .try_place(bitmap.width, bitmap.height, &bitmap.pixels)
        {
            PlaceResult::Placed { x, y } => (x, y),
            PlaceResult::Full => {
                // Retire the active page and retry once on a fresh one. A
                // second failure means the oversize check above is broken.
                log::debug!(
                    "atlas page {} full, opening page {}",
                    self.active_index(),
                    self.active_index() + 1
                );
                let fresh = AtlasPage::new(self.mode, self.page_width, self.page_height);
                let retired = std::mem::replace(&mut self.active, fresh);
                self.archived.push(retired);

                match self
                    .active
                    .try_place(bitmap.width, bitmap.height, &bitmap.pixels)
                {
                    PlaceResult::Placed { x, y } => (x, y),
                    PlaceResult::Full => {
                        log::error!(
                            "glyph {code:#x} ({}x{}) rejected by an empty {}x{} page",
                            bitmap.width,
                            bitmap.height,
                            self.page_width,
                            self.page_height
                        );
                        return Err(AtlasError::RolloverExhausted);
                    }
                }
            }
        };

        let slot = GlyphSlot {
            page_index: self.active_index(),
            uv_origin: [
                x as f32 / self.page_width as f32,
                y as f32 / self.page_height as f32,
            ],
            uv_size: [
                bitmap.width as f32 / self.page_width as f32,
                bitmap.height as f32 / self.page_height as f32,
            ],
            advance_px: bitmap.advance_px,
            bounds: bitmap.bounds,
        };
        self.slots.insert(code, slot);
        Ok(slot)
    }
}
