use std::ops::Range;

use super::grid::GlyphGrid;

/// Index of a column run, numbered left to right from zero.
pub type SegmentId = usize;

/// Partition of a grid's columns into maximal runs of ink columns.
///
/// Blank columns belong to no run. Adjacent ink columns always share a run,
/// even when they visually belong to different letters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnRuns {
    columns: Vec<Option<SegmentId>>,
    count: usize,
}

impl ColumnRuns {
    pub fn scan(grid: &GlyphGrid) -> Self {
        let mut columns = Vec::with_capacity(grid.width());
        let mut count = 0;
        let mut previous_ink = false;

        for column in 0..grid.width() {
            let ink = grid.column_has_ink(column);
            if ink && !previous_ink {
                count += 1;
            }
            columns.push(ink.then(|| count - 1));
            previous_ink = ink;
        }

        Self { columns, count }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn segment_at(&self, column: usize) -> Option<SegmentId> {
        self.columns.get(column).copied().flatten()
    }

    pub fn columns(&self) -> &[Option<SegmentId>] {
        &self.columns
    }

    /// Column range covered by each run, in id order.
    pub fn spans(&self) -> Vec<(SegmentId, Range<usize>)> {
        let mut spans: Vec<(SegmentId, Range<usize>)> = Vec::with_capacity(self.count);
        for (column, segment) in self.columns.iter().enumerate() {
            let Some(segment) = *segment else {
                continue;
            };
            if let Some((id, range)) = spans.last_mut() {
                if *id == segment {
                    range.end = column + 1;
                    continue;
                }
            }
            spans.push((segment, column..column + 1));
        }
        spans
    }
}
