//! Truecolor terminal rendering of tinted grids.

use std::io::{self, Write};

use ascii_tint::TintedGrid;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

/// Write every row of `grid`, coloring ink cells with their resolved color.
pub fn write_grid<W: Write>(out: &mut W, grid: &TintedGrid) -> io::Result<()> {
    for row in grid.rows() {
        let mut current = None;
        for cell in row {
            if cell.color != current {
                match cell.color {
                    Some(rgb) => queue!(
                        out,
                        SetForegroundColor(Color::Rgb { r: rgb.r, g: rgb.g, b: rgb.b })
                    )?,
                    None => queue!(out, ResetColor)?,
                }
                current = cell.color;
            }
            queue!(out, Print(cell.ch))?;
        }
        if current.is_some() {
            queue!(out, ResetColor)?;
        }
        queue!(out, Print('\n'))?;
    }
    out.flush()
}
