mod ascii;
pub mod config;
pub mod site;

pub use ascii::{
    color::{invert_hex, Rgb},
    grid::{GlyphGrid, BLANK},
    markup::{to_html, wrap_pre, GLYPH_CLASS},
    palette::{normalize_index, Palette},
    segments::{ColumnRuns, SegmentId},
    tint::{TintedGlyph, TintedGrid},
};
pub use config::SiteConfig;

#[derive(Debug, thiserror::Error)]
pub enum TintError {
    #[error("palette must contain at least one color")]
    EmptyPalette,
    #[error("invalid hex color {0:?}")]
    InvalidColor(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode state: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

/// Segments monospace text into column runs and tints them from a palette.
#[derive(Clone, Debug, Default)]
pub struct Colorizer {
    palette: Palette,
}

impl Colorizer {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Segment `text` and resolve a color for every ink cell at `offset`.
    pub fn render(&self, text: &str, offset: i64) -> TintedGrid {
        let grid = GlyphGrid::from_text(text);
        TintedGrid::new(&grid, &self.palette, offset)
    }

    /// Recolor an already segmented grid; segment ids are left untouched.
    pub fn recolor(&self, grid: &mut TintedGrid, offset: i64) {
        grid.recolor(&self.palette, offset);
    }

    pub fn render_html(&self, text: &str, offset: i64) -> String {
        to_html(&self.render(text, offset))
    }
}
