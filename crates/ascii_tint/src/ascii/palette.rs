use super::color::Rgb;
use super::segments::SegmentId;
use crate::TintError;

/// Ordered, non-empty list of colors indexed with wraparound.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    pub fn new(colors: Vec<Rgb>) -> Result<Self, TintError> {
        if colors.is_empty() {
            return Err(TintError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    pub fn from_hex<S: AsRef<str>>(colors: &[S]) -> Result<Self, TintError> {
        let colors =
            colors.iter().map(|hex| hex.as_ref().parse()).collect::<Result<Vec<Rgb>, _>>()?;
        Self::new(colors)
    }

    /// The seven-color palette used for both logo glyphs and the link accent.
    pub fn site() -> Self {
        Self {
            colors: vec![
                Rgb::new(0xff, 0x4d, 0x4d),
                Rgb::new(0xff, 0x9f, 0x1c),
                Rgb::new(0xff, 0xd6, 0x0a),
                Rgb::new(0x2e, 0xc4, 0xb6),
                Rgb::new(0x3a, 0x86, 0xff),
                Rgb::new(0x83, 0x38, 0xec),
                Rgb::new(0xff, 0x00, 0x6e),
            ],
        }
    }

    pub fn monochrome(color: Rgb) -> Self {
        Self { colors: vec![color] }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn normalize(&self, index: i64) -> usize {
        normalize_index(index, self.colors.len())
    }

    pub fn color_at(&self, index: i64) -> Rgb {
        self.colors[self.normalize(index)]
    }

    /// Color of a segment under a cycling offset: `(segment + offset) mod len`.
    pub fn color_for(&self, segment: SegmentId, offset: i64) -> Rgb {
        let len = self.colors.len();
        let index = (segment % len + self.normalize(offset)) % len;
        self.colors[index]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::site()
    }
}

/// Floor-modulo of `index` into `[0, len)`.
///
/// `len` must be non-zero; a [`Palette`] can never be empty.
pub fn normalize_index(index: i64, len: usize) -> usize {
    debug_assert!(len > 0, "normalizing against an empty palette");
    let len = i64::try_from(len).unwrap_or(i64::MAX);
    index.rem_euclid(len) as usize
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{normalize_index, Palette};
    use crate::ascii::color::Rgb;
    use crate::TintError;

    #[rstest]
    #[case(0, 7, 0)]
    #[case(6, 7, 6)]
    #[case(7, 7, 0)]
    #[case(-1, 7, 6)]
    #[case(-7, 7, 0)]
    #[case(-15, 7, 6)]
    #[case(i64::MIN, 7, 6)]
    #[case(i64::MAX, 1, 0)]
    fn normalize_index_is_floor_modulo(
        #[case] index: i64,
        #[case] len: usize,
        #[case] expected: usize,
    ) {
        assert_eq!(normalize_index(index, len), expected);
    }

    #[test]
    fn normalize_index_stays_in_range() {
        for len in 1..=9usize {
            for index in -40..40i64 {
                assert!(normalize_index(index, len) < len);
            }
        }
    }

    #[test]
    fn empty_palette_is_rejected() {
        assert!(matches!(Palette::new(Vec::new()), Err(TintError::EmptyPalette)));
        assert!(matches!(Palette::from_hex::<&str>(&[]), Err(TintError::EmptyPalette)));
    }

    #[test]
    fn color_for_cycles_with_offset() {
        let palette = Palette::site();
        assert_eq!(palette.len(), 7);
        assert_eq!(palette.color_for(0, 0), palette.colors()[0]);
        assert_eq!(palette.color_for(1, 0), palette.colors()[1]);
        assert_eq!(palette.color_for(0, 1), palette.colors()[1]);
        assert_eq!(palette.color_for(1, 1), palette.colors()[2]);
        assert_eq!(palette.color_for(0, -1), palette.colors()[6]);
    }

    #[test]
    fn color_for_handles_extreme_offsets() {
        let palette = Palette::site();
        let colors = palette.colors();
        // (1 + i64::MAX) mod 7 == 1 and (1 + i64::MIN) mod 7 == 0.
        assert_eq!(palette.color_for(1, i64::MAX), colors[1]);
        assert_eq!(palette.color_for(0, i64::MAX), colors[0]);
        assert_eq!(palette.color_for(1, i64::MIN), colors[0]);
        assert_eq!(palette.color_for(6, i64::MIN), colors[5]);
        assert_eq!(palette.color_for(usize::MAX, 0), colors[usize::MAX % 7]);
    }

    #[test]
    fn from_hex_parses_each_entry() {
        let palette = Palette::from_hex(&["#010203", "a0b0c0"]).unwrap();
        assert_eq!(palette.colors(), &[Rgb::new(1, 2, 3), Rgb::new(0xa0, 0xb0, 0xc0)]);
        assert!(Palette::from_hex(&["#010203", "nope"]).is_err());
    }
}
