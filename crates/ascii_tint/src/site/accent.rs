use log::{debug, warn};

use super::document::Document;
use super::store::{KeyValueStore, ACCENT_KEY};
use crate::ascii::{color::Rgb, palette::Palette};

pub const ACCENT_PROPERTY: &str = "--accent";
pub const ACCENT_OPPOSITE_PROPERTY: &str = "--accentOpp";

/// Accent color and its channel-wise inverse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccentVars {
    pub accent: Rgb,
    pub accent_opp: Rgb,
}

impl AccentVars {
    pub fn for_index(palette: &Palette, index: i64) -> Self {
        let accent = palette.color_at(index);
        Self { accent, accent_opp: accent.inverted() }
    }
}

/// Read the stored accent index. Missing or non-integer values fall back to 0.
pub fn load_accent_index<S: KeyValueStore + ?Sized>(store: &S) -> i64 {
    let Some(raw) = store.get(ACCENT_KEY) else {
        debug!("no stored accent index, defaulting to 0");
        return 0;
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0;
    }

    match trimmed.parse::<i64>() {
        Ok(index) => index,
        Err(_) => {
            warn!("ignoring non-numeric stored accent index {raw:?}");
            0
        },
    }
}

/// Normalize `index`, publish the accent properties and persist the result.
///
/// Returns the normalized index. Storage failures are logged, not propagated.
pub fn apply_accent<S, D>(index: i64, palette: &Palette, store: &mut S, document: &mut D) -> usize
where
    S: KeyValueStore + ?Sized,
    D: Document + ?Sized,
{
    let normalized = palette.normalize(index);
    let vars = AccentVars::for_index(palette, normalized as i64);

    document.set_style_property(ACCENT_PROPERTY, &vars.accent.to_string());
    document.set_style_property(ACCENT_OPPOSITE_PROPERTY, &vars.accent_opp.to_string());

    if let Err(err) = store.set(ACCENT_KEY, &normalized.to_string()) {
        warn!("failed to persist accent index {normalized}: {err}");
    }

    normalized
}
