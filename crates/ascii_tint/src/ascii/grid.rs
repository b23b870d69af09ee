/// Character treated as background by segmentation and rendering.
pub const BLANK: char = ' ';

/// Rectangular monospace text block. Every row has exactly `width` cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphGrid {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl GlyphGrid {
    pub fn new(width: usize, height: usize, cells: Vec<char>) -> Self {
        assert_eq!(width * height, cells.len());
        Self { width, height, cells }
    }

    /// Build a grid from preformatted text.
    ///
    /// `\r\n` separators become `\n`, a trailing empty line left by a final
    /// separator is dropped, and shorter rows are right-padded with blanks.
    pub fn from_text(text: &str) -> Self {
        let normalized = text.replace("\r\n", "\n");
        let mut lines: Vec<&str> = normalized.split('\n').collect();
        if lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }

        let width = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
        let height = lines.len();

        let mut cells = Vec::with_capacity(width * height);
        for line in &lines {
            let start = cells.len();
            cells.extend(line.chars());
            cells.resize(start + width, BLANK);
        }

        Self { width, height, cells }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[char] {
        &self.cells
    }

    pub fn get(&self, column: usize, row: usize) -> Option<char> {
        if column >= self.width || row >= self.height {
            return None;
        }
        self.cells.get(row * self.width + column).copied()
    }

    /// Whether any row holds a non-blank character in `column`.
    pub fn column_has_ink(&self, column: usize) -> bool {
        if column >= self.width {
            return false;
        }
        (0..self.height).any(|row| self.cells[row * self.width + column] != BLANK)
    }

    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        let width = self.width;
        (0..self.height).map(move |row| self.cells[row * width..(row + 1) * width].iter().collect())
    }
}
