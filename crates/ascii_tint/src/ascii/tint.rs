use super::{
    color::Rgb,
    grid::{GlyphGrid, BLANK},
    palette::Palette,
    segments::{ColumnRuns, SegmentId},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TintedGlyph {
    pub ch: char,
    /// Owning column run; `None` for blank cells.
    pub segment: Option<SegmentId>,
    /// Resolved palette color; `None` for blank cells.
    pub color: Option<Rgb>,
}

/// A segmented grid with a color resolved for every ink cell.
///
/// Segment ids are assigned once at construction. Recoloring only visits the
/// ink cells recorded in `ink` and rewrites their colors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TintedGrid {
    width: usize,
    height: usize,
    cells: Vec<TintedGlyph>,
    ink: Vec<usize>,
    segments: usize,
    offset: i64,
}

impl TintedGrid {
    pub fn new(grid: &GlyphGrid, palette: &Palette, offset: i64) -> Self {
        let runs = ColumnRuns::scan(grid);
        let width = grid.width();

        let mut cells = Vec::with_capacity(grid.cells().len());
        let mut ink = Vec::new();

        for (index, &ch) in grid.cells().iter().enumerate() {
            if ch == BLANK {
                cells.push(TintedGlyph { ch, segment: None, color: None });
                continue;
            }

            // A non-blank cell always sits in an ink column.
            let segment = runs.segment_at(index % width);
            let color = segment.map(|segment| palette.color_for(segment, offset));
            ink.push(index);
            cells.push(TintedGlyph { ch, segment, color });
        }

        log::debug!(
            "tinted {}x{} grid: {} runs, {} ink cells, offset {}",
            width,
            grid.height(),
            runs.count(),
            ink.len(),
            offset
        );

        Self { width, height: grid.height(), cells, ink, segments: runs.count(), offset }
    }

    /// Reassign colors for a new offset without re-scanning columns.
    pub fn recolor(&mut self, palette: &Palette, offset: i64) {
        for &index in &self.ink {
            let cell = &mut self.cells[index];
            cell.color = cell.segment.map(|segment| palette.color_for(segment, offset));
        }
        self.offset = offset;
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub fn segment_count(&self) -> usize {
        self.segments
    }

    pub fn ink_count(&self) -> usize {
        self.ink.len()
    }

    pub fn cells(&self) -> &[TintedGlyph] {
        &self.cells
    }

    pub fn get(&self, column: usize, row: usize) -> Option<&TintedGlyph> {
        if column >= self.width || row >= self.height {
            return None;
        }
        self.cells.get(row * self.width + column)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[TintedGlyph]> + '_ {
        let width = self.width;
        (0..self.height).map(move |row| &self.cells[row * width..(row + 1) * width])
    }

    /// `(cell index, segment)` for every ink cell, in reading order.
    pub fn ink_segments(&self) -> impl Iterator<Item = (usize, SegmentId)> + '_ {
        self.ink.iter().filter_map(|&index| Some((index, self.cells[index].segment?)))
    }
}
