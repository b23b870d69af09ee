pub mod color;
pub mod grid;
pub mod markup;
pub mod palette;
pub mod segments;
pub mod tint;
