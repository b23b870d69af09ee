use log::warn;
use serde::Serialize;

use super::store::{KeyValueStore, THEME_KEY};

/// Body class applied while the dark theme is active.
pub const DARK_CLASS: &str = "dark-mode";

const ENABLED: &str = "enabled";
const DISABLED: &str = "disabled";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Anything other than a stored `"enabled"` means the light theme.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        match store.get(THEME_KEY).as_deref() {
            Some(ENABLED) => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn store<S: KeyValueStore + ?Sized>(self, store: &mut S) {
        let value = if self.is_dark() { ENABLED } else { DISABLED };
        if let Err(err) = store.set(THEME_KEY, value) {
            warn!("failed to persist theme {value}: {err}");
        }
    }

    /// Label of the toggle control; it names the theme a click switches to.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Light => "Toggle Dark Theme",
            Theme::Dark => "Toggle Light Theme",
        }
    }
}
