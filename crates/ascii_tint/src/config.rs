use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ascii::{color::Rgb, palette::Palette};
use crate::site::cycle::{CycleTimer, DEFAULT_CYCLE_INTERVAL};
use crate::TintError;

/// Site settings loaded from a TOML file. Every field has a default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub palette: Vec<Rgb>,
    pub cycle: CycleConfig,
    pub theme: ThemeConfig,
    pub storage: StorageConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleConfig {
    pub enabled: bool,
    pub interval_ms: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub dark_image: String,
    pub light_image: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// State file location; `None` leaves the choice to the caller.
    pub path: Option<PathBuf>,
}

impl SiteConfig {
    pub fn load(path: &Path) -> Result<Self, TintError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, TintError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn palette(&self) -> Result<Palette, TintError> {
        Palette::new(self.palette.clone())
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            palette: Palette::site().colors().to_vec(),
            cycle: CycleConfig::default(),
            theme: ThemeConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl CycleConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn timer(&self) -> CycleTimer {
        CycleTimer::new(self.interval(), self.enabled)
    }
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self { enabled: true, interval_ms: DEFAULT_CYCLE_INTERVAL.as_millis() as u64 }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self { dark_image: "wordcloud_Dark.png".into(), light_image: "wordcloud_light.png".into() }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::SiteConfig;
    use crate::ascii::{color::Rgb, palette::Palette};
    use crate::TintError;

    #[test]
    fn empty_file_uses_defaults() {
        let config = SiteConfig::from_toml("").unwrap();
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.palette().unwrap(), Palette::site());
        assert_eq!(config.cycle.interval(), Duration::from_millis(7500));
        assert!(config.cycle.enabled);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = SiteConfig::from_toml(
            r##"
            palette = ["#000000", "#FFFFFF"]

            [cycle]
            interval_ms = 250

            [storage]
            path = "state/site.json"
            "##,
        )
        .unwrap();

        assert_eq!(config.palette, [Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]);
        assert_eq!(config.cycle.interval_ms, 250);
        assert!(config.cycle.enabled);
        assert_eq!(config.theme.dark_image, "wordcloud_Dark.png");
        assert_eq!(config.storage.path.as_deref(), Some(std::path::Path::new("state/site.json")));
    }

    #[test]
    fn invalid_colors_and_empty_palettes_are_errors() {
        assert!(matches!(SiteConfig::from_toml("palette = [\"#12\"]"), Err(TintError::Config(_))));

        let config = SiteConfig::from_toml("palette = []").unwrap();
        assert!(matches!(config.palette(), Err(TintError::EmptyPalette)));
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.toml");
        std::fs::write(&path, "[cycle]\nenabled = false\n").unwrap();
        let config = SiteConfig::load(&path).unwrap();
        assert!(!config.cycle.enabled);
        assert!(!config.cycle.timer().is_running());

        let missing = SiteConfig::load(&dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(TintError::Io(_))));
    }
}
