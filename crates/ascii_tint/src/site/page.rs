use std::time::Instant;

use chrono::{Datelike, Local, NaiveDate};
use log::debug;

use super::accent::load_accent_index;
use super::cycle::LogoController;
use super::document::Document;
use super::nav;
use super::store::KeyValueStore;
use super::theme::{Theme, DARK_CLASS};
use crate::config::SiteConfig;
use crate::TintError;

/// Elements present on the hosting page. Absent elements turn the behaviors
/// that need them into no-ops.
#[derive(Clone, Debug, Default)]
pub struct PageLayout {
    /// Path of the current document, e.g. `/research.html`.
    pub path: String,
    pub nav_hrefs: Vec<String>,
    /// Preformatted logo art; `None` when the page has no logo.
    pub logo_text: Option<String>,
    pub has_theme_toggle: bool,
    pub has_research_image: bool,
    /// The footer carries a year placeholder.
    pub has_footer_year: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageEvent {
    LogoClicked,
    ThemeToggled,
    VisibilityChanged { hidden: bool },
}

/// Event-driven controller for one loaded page.
pub struct Page<S, D> {
    layout: PageLayout,
    config: SiteConfig,
    store: S,
    document: D,
    logo: LogoController,
    theme: Theme,
}

impl<S: KeyValueStore, D: Document> Page<S, D> {
    /// Load the page against the local calendar date.
    pub fn load(
        layout: PageLayout,
        config: SiteConfig,
        store: S,
        document: D,
        now: Instant,
    ) -> Result<Self, TintError> {
        Self::load_at(layout, config, store, document, now, Local::now().date_naive())
    }

    /// Run the load sequence: footer year, nav marking, accent restore, logo
    /// render, cycle start and theme restore.
    pub fn load_at(
        layout: PageLayout,
        config: SiteConfig,
        mut store: S,
        mut document: D,
        now: Instant,
        today: NaiveDate,
    ) -> Result<Self, TintError> {
        let palette = config.palette()?;

        if layout.has_footer_year {
            document.set_footer_year(today.year());
        }

        let active = nav::mark_active(&layout.nav_hrefs, &layout.path);
        for (index, current) in active.into_iter().enumerate() {
            document.set_nav_current(index, current);
        }

        let mut logo = LogoController::new(palette, config.cycle.timer());
        let stored = load_accent_index(&store);
        logo.set_offset(stored, &mut store, &mut document);

        if let Some(text) = layout.logo_text.as_deref() {
            logo.attach_logo(text, &mut document);
        }
        logo.start(now);

        let theme = Theme::load(&store);
        debug!("page {} loaded with accent {} and {:?} theme", layout.path, logo.offset(), theme);

        let mut page = Self { layout, config, store, document, logo, theme };
        page.sync_theme();
        Ok(page)
    }

    pub fn handle(&mut self, event: PageEvent, now: Instant) {
        match event {
            PageEvent::LogoClicked => {
                if self.layout.logo_text.is_some() {
                    self.logo.tick(&mut self.store, &mut self.document);
                }
            },
            PageEvent::ThemeToggled => {
                if self.layout.has_theme_toggle {
                    self.theme = self.theme.toggled();
                    self.theme.store(&mut self.store);
                    self.sync_theme();
                }
            },
            PageEvent::VisibilityChanged { hidden } => self.logo.set_visibility(hidden, now),
        }
    }

    /// Drive the cycle timer. Returns whether a tick happened.
    pub fn update(&mut self, now: Instant) -> bool {
        self.logo.update(now, &mut self.store, &mut self.document)
    }

    pub fn accent_offset(&self) -> usize {
        self.logo.offset()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn logo(&self) -> &LogoController {
        &self.logo
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn sync_theme(&mut self) {
        self.document.set_body_class(DARK_CLASS, self.theme.is_dark());

        if self.layout.has_research_image {
            let images = &self.config.theme;
            let src = if self.theme.is_dark() { &images.dark_image } else { &images.light_image };
            self.document.set_image_source(src);
        }

        if self.layout.has_theme_toggle {
            self.document.set_toggle_label(self.theme.toggle_label());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use chrono::NaiveDate;

    use super::{Page, PageEvent, PageLayout};
    use crate::config::SiteConfig;
    use crate::site::document::StaticDocument;
    use crate::site::store::{KeyValueStore, MemoryStore, ACCENT_KEY, THEME_KEY};

    fn layout() -> PageLayout {
        PageLayout {
            path: "/research.html".into(),
            nav_hrefs: vec!["index.html".into(), "research.html".into()],
            logo_text: Some("AB CD\n".into()),
            has_theme_toggle: true,
            has_research_image: true,
            has_footer_year: true,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    fn load(
        layout: PageLayout,
        store: MemoryStore,
        now: Instant,
    ) -> Page<MemoryStore, StaticDocument> {
        let document = StaticDocument::new();
        Page::load_at(layout, SiteConfig::default(), store, document, now, today()).unwrap()
    }

    #[test]
    fn load_applies_stored_state() {
        let store =
            MemoryStore::new().with_entry(ACCENT_KEY, "-1").with_entry(THEME_KEY, "enabled");
        let page = load(layout(), store, Instant::now());

        let doc = page.document();
        assert_eq!(page.accent_offset(), 6);
        assert_eq!(doc.nav_current, [false, true]);
        assert!(doc.has_body_class("dark-mode"));
        assert_eq!(doc.toggle_label.as_deref(), Some("Toggle Light Theme"));
        assert_eq!(doc.image_source.as_deref(), Some("wordcloud_Dark.png"));
        let markup = doc.logo_markup.as_deref().unwrap();
        assert!(markup.contains("data-seg=\"0\" style=\"color:#ff006e\""));
        assert!(markup.contains("data-seg=\"1\" style=\"color:#ff4d4d\""));
        assert_eq!(doc.logo_writes, 1);
        assert_eq!(doc.footer_year, Some(2024));
        assert!(page.logo().is_running());
    }

    #[test]
    fn footer_year_follows_the_load_date() {
        let date = NaiveDate::from_ymd_opt(1999, 12, 31).unwrap();
        let page = Page::load_at(
            layout(),
            SiteConfig::default(),
            MemoryStore::new(),
            StaticDocument::new(),
            Instant::now(),
            date,
        )
        .unwrap();
        assert_eq!(page.document().footer_year, Some(1999));
    }

    #[test]
    fn click_advances_exactly_one_step() {
        let mut page = load(layout(), MemoryStore::new(), Instant::now());

        page.handle(PageEvent::LogoClicked, Instant::now());
        assert_eq!(page.accent_offset(), 1);
        assert_eq!(page.store().get(ACCENT_KEY).as_deref(), Some("1"));
    }

    #[test]
    fn missing_elements_make_events_no_ops() {
        let layout = PageLayout { path: "/".into(), ..PageLayout::default() };
        let mut page = load(layout, MemoryStore::new(), Instant::now());

        page.handle(PageEvent::LogoClicked, Instant::now());
        page.handle(PageEvent::ThemeToggled, Instant::now());

        assert_eq!(page.accent_offset(), 0);
        assert_eq!(page.store().get(THEME_KEY), None);
        let doc = page.document();
        assert_eq!(doc.logo_markup, None);
        assert_eq!(doc.toggle_label, None);
        assert_eq!(doc.image_source, None);
        assert_eq!(doc.footer_year, None);
        assert_eq!(doc.style_property("--accent"), Some("#ff4d4d"));
    }

    #[test]
    fn theme_toggle_persists_and_resyncs() {
        let mut page = load(layout(), MemoryStore::new(), Instant::now());
        assert_eq!(page.document().image_source.as_deref(), Some("wordcloud_light.png"));

        page.handle(PageEvent::ThemeToggled, Instant::now());
        assert_eq!(page.store().get(THEME_KEY).as_deref(), Some("enabled"));
        assert!(page.document().has_body_class("dark-mode"));
        assert_eq!(page.document().image_source.as_deref(), Some("wordcloud_Dark.png"));

        page.handle(PageEvent::ThemeToggled, Instant::now());
        assert_eq!(page.store().get(THEME_KEY).as_deref(), Some("disabled"));
        assert_eq!(page.document().toggle_label.as_deref(), Some("Toggle Dark Theme"));
    }

    #[test]
    fn hidden_page_does_not_cycle() {
        let start = Instant::now();
        let mut page = load(layout(), MemoryStore::new(), start);
        let interval = Duration::from_millis(7500);

        page.handle(PageEvent::VisibilityChanged { hidden: true }, start);
        assert!(!page.update(start + interval * 3));
        assert_eq!(page.accent_offset(), 0);

        page.handle(PageEvent::VisibilityChanged { hidden: false }, start + interval * 3);
        assert!(page.update(start + interval * 4));
        assert_eq!(page.accent_offset(), 1);
    }
}
