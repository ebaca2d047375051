//! One fixed-size pixel page and its shelf packer.

use glyphpack_raster::PixelMode;

/// Result of trying to place a rectangle into a page.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaceResult {
    /// Top-left pixel coordinates of the placed rectangle.
    Placed { x: u32, y: u32 },
    /// The page has no room under the shelf rule. No state was mutated.
    Full,
}

/// A fixed-size pixel buffer filled left-to-right, top-to-bottom in shelves.
///
/// A shelf is a horizontal strip sharing a common top edge; rectangles go
/// left-to-right within the current shelf, and the shelf closes when a
/// rectangle no longer fits, advancing the packer downward by the tallest
/// rectangle the shelf received.
///
/// Pages are move-only: there is deliberately no `Clone`, so a page has
/// exactly one owner for its lifetime. Once a [`FontAtlas`](crate::FontAtlas)
/// archives a page it is never written again.
#[derive(Debug)]
pub struct AtlasPage {
    buffer: Vec<u8>,
    width: u32,
    height: u32,
    mode: PixelMode,
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
}

impl AtlasPage {
    /// Create an empty, zeroed page. Dimensions are fixed for its lifetime.
    pub fn new(mode: PixelMode, width: u32, height: u32) -> Self {
        let len = mode.bytes_per_pixel() * width as usize * height as usize;
        Self {
            buffer: vec![0; len],
            width,
            height,
            mode,
            cursor_x: 0,
            cursor_y: 0,
            row_height: 0,
        }
    }

    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub const fn mode(&self) -> PixelMode {
        self.mode
    }

    /// Raw page pixels, row-major with stride `width * bytes_per_pixel`.
    ///
    /// Read-only by design; exposed for texture upload and debug dumps.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.buffer
    }

    /// Try to place a `w` x `h` rectangle of `pixels` into the page.
    ///
    /// `pixels` must hold contiguous rows of `w * bytes_per_pixel` bytes in
    /// the page's own pixel mode. Callers must have rejected rectangles
    /// larger than the page in either axis already; that is a caller error,
    /// not a packing failure, and is only debug-asserted here.
    ///
    /// On [`PlaceResult::Full`] the cursor state is left untouched, so a
    /// failed attempt can be retried verbatim against another page.
    pub fn try_place(&mut self, w: u32, h: u32, pixels: &[u8]) -> PlaceResult {
        debug_assert!(w <= self.width && h <= self.height, "oversize rect reaches packer");
        debug_assert_eq!(
            pixels.len(),
            w as usize * h as usize * self.mode.bytes_per_pixel()
        );

        let (x, y) = if self.cursor_x + w <= self.width && self.cursor_y + h <= self.height {
            // Fits in the current shelf.
            (self.cursor_x, self.cursor_y)
        } else if w <= self.width && self.cursor_y + self.row_height + h <= self.height {
            // Close the shelf and start the next one.
            self.cursor_y += self.row_height;
            self.cursor_x = 0;
            self.row_height = 0;
            (0, self.cursor_y)
        } else {
            return PlaceResult::Full;
        };

        self.blit(x, y, w, h, pixels);
        self.cursor_x += w;
        self.row_height = self.row_height.max(h);

        PlaceResult::Placed { x, y }
    }

    /// Copy `pixels` row-by-row to `(x, y)`, honoring the page stride.
    fn blit(&mut self, x: u32, y: u32, w: u32, h: u32, pixels: &[u8]) {
        let bpp = self.mode.bytes_per_pixel();
        let dst_stride = self.width as usize * bpp;
        let src_stride = w as usize * bpp;
        for row in 0..h as usize {
            let dst = (y as usize + row) * dst_stride + x as usize * bpp;
            let src = row * src_stride;
            self.buffer[dst..dst + src_stride].copy_from_slice(&pixels[src..src + src_stride]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u32, h: u32, byte: u8) -> Vec<u8> {
        vec![byte; (w * h) as usize]
    }

    #[test]
    fn packs_left_to_right_in_a_shelf() {
        let mut page = AtlasPage::new(PixelMode::A8, 8, 8);
        assert_eq!(
            page.try_place(4, 4, &solid(4, 4, 1)),
            PlaceResult::Placed { x: 0, y: 0 }
        );
        assert_eq!(
            page.try_place(4, 4, &solid(4, 4, 2)),
            PlaceResult::Placed { x: 4, y: 0 }
        );
    }

    #[test]
    fn opens_a_new_shelf_when_the_row_is_exhausted() {
        let mut page = AtlasPage::new(PixelMode::A8, 8, 8);
        page.try_place(5, 3, &solid(5, 3, 1));
        // 4 wide no longer fits at x=5; a new shelf starts at y=3.
        assert_eq!(
            page.try_place(4, 4, &solid(4, 4, 2)),
            PlaceResult::Placed { x: 0, y: 3 }
        );
    }

    #[test]
    fn conservative_shelf_close_reports_full() {
        // After two 4x4 glyphs the shelf is 4 tall; a 4x5 rect needs 5 rows
        // below the closed shelf but only 4 remain.
        let mut page = AtlasPage::new(PixelMode::A8, 8, 8);
        page.try_place(4, 4, &solid(4, 4, 1));
        page.try_place(4, 4, &solid(4, 4, 2));
        assert_eq!(page.try_place(4, 5, &solid(4, 5, 3)), PlaceResult::Full);
    }

    #[test]
    fn full_leaves_cursor_state_untouched() {
        let mut page = AtlasPage::new(PixelMode::A8, 8, 8);
        page.try_place(6, 4, &solid(6, 4, 1));
        let before = (page.cursor_x, page.cursor_y, page.row_height);
        assert_eq!(page.try_place(8, 5, &solid(8, 5, 2)), PlaceResult::Full);
        assert_eq!((page.cursor_x, page.cursor_y, page.row_height), before);
        // A rect that does fit still lands where it would have.
        assert_eq!(
            page.try_place(2, 4, &solid(2, 4, 3)),
            PlaceResult::Placed { x: 6, y: 0 }
        );
    }

    #[test]
    fn placements_never_overlap_and_stay_in_bounds() {
        let mut page = AtlasPage::new(PixelMode::A8, 32, 32);
        let sizes = [
            (5, 7),
            (9, 4),
            (3, 3),
            (12, 6),
            (7, 7),
            (4, 2),
            (10, 10),
            (6, 5),
            (8, 3),
        ];
        let mut placed: Vec<(u32, u32, u32, u32)> = Vec::new();
        for &(w, h) in &sizes {
            if let PlaceResult::Placed { x, y } = page.try_place(w, h, &solid(w, h, 1)) {
                assert!(x + w <= 32 && y + h <= 32);
                for &(px, py, pw, ph) in &placed {
                    let disjoint = x + w <= px || px + pw <= x || y + h <= py || py + ph <= y;
                    assert!(disjoint, "({x},{y},{w},{h}) overlaps ({px},{py},{pw},{ph})");
                }
                placed.push((x, y, w, h));
            }
        }
        assert!(placed.len() >= 6, "expected most rects to fit");
    }

    #[test]
    fn blit_respects_the_destination_stride() {
        let mut page = AtlasPage::new(PixelMode::A8, 4, 4);
        let src = [1, 2, 3, 4];
        page.try_place(2, 2, &src);
        #[rustfmt::skip]
        let expected = [
            1, 2, 0, 0,
            3, 4, 0, 0,
            0, 0, 0, 0,
            0, 0, 0, 0,
        ];
        assert_eq!(page.pixels(), &expected);
    }

    #[test]
    fn blit_handles_multi_byte_pixels() {
        let mut page = AtlasPage::new(PixelMode::Bgra8888, 3, 2);
        let src = [10, 20, 30, 40]; // one BGRA pixel
        page.try_place(1, 1, &src);
        assert_eq!(&page.pixels()[..4], &src);
        assert!(page.pixels()[4..].iter().all(|&b| b == 0));
    }

    #[test]
    fn tall_rect_can_extend_the_current_shelf() {
        let mut page = AtlasPage::new(PixelMode::A8, 8, 8);
        page.try_place(3, 2, &solid(3, 2, 1));
        // Taller than the shelf so far, but still within the page.
        assert_eq!(
            page.try_place(3, 6, &solid(3, 6, 2)),
            PlaceResult::Placed { x: 3, y: 0 }
        );
        // The shelf height grew to 6, so the next shelf starts at y=6.
        assert_eq!(
            page.try_place(8, 2, &solid(8, 2, 3)),
            PlaceResult::Placed { x: 0, y: 6 }
        );
    }
}
