//! Demo driver: rasterize a sample string with the built-in debug font, pack
//! it into a small atlas (small enough to force page rollover), and dump each
//! page as a binary PGM next to the working directory for visual inspection.

use std::fs::File;
use std::io::{BufWriter, Write};

use glyphpack_atlas::{AtlasError, FontAtlas};
use glyphpack_raster::{DebugFont, PixelMode};

const SAMPLE: &str = "The quick brown fox jumps over the lazy dog 0123456789";

fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut font = DebugFont::with_scale(2);
    // Deliberately small pages so the sample text spans several of them.
    let mut atlas = FontAtlas::new(PixelMode::A8, 64, 64);

    let mut missing = 0usize;
    for ch in SAMPLE.chars() {
        match atlas.get_or_insert(ch as u64, &mut font) {
            Ok(slot) => log::info!(
                "{ch:?} -> page {} uv ({:.3}, {:.3}) size ({:.3}, {:.3}) advance {}",
                slot.page_index,
                slot.uv_origin[0],
                slot.uv_origin[1],
                slot.uv_size[0],
                slot.uv_size[1],
                slot.advance_px,
            ),
            Err(AtlasError::GlyphNotFound(code)) => {
                log::warn!("no glyph for {code:#x}");
                missing += 1;
            }
            Err(err) => {
                log::error!("atlas insert failed for {ch:?}: {err}");
                return Err(std::io::Error::other(err.to_string()));
            }
        }
    }

    log::info!(
        "cached {} glyphs across {} page(s), {} missing",
        atlas.slot_count(),
        atlas.page_count(),
        missing
    );

    for index in 0..atlas.page_count() {
        let page = atlas.page_at(index).expect("index < page_count");
        let path = format!("glyphpack-page-{index}.pgm");
        write_pgm(&path, page.width(), page.height(), page.pixels())?;
        log::info!("wrote {path}");
    }

    Ok(())
}

/// Binary PGM (P5) writer for A8 page dumps.
fn write_pgm(path: &str, width: u32, height: u32, pixels: &[u8]) -> std::io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write!(out, "P5\n{width} {height}\n255\n")?;
    out.write_all(pixels)?;
    out.flush()
}
