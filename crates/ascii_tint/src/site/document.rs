use std::collections::BTreeMap;

use serde::Serialize;

/// Presentation surface the page controller writes into.
pub trait Document {
    /// Set a custom property on the document root, e.g. `--accent`.
    fn set_style_property(&mut self, name: &str, value: &str);
    /// Replace the contents of the logo `<pre>` with tinted markup.
    fn set_logo_markup(&mut self, markup: &str);
    fn set_body_class(&mut self, class: &str, enabled: bool);
    fn set_toggle_label(&mut self, label: &str);
    fn set_image_source(&mut self, src: &str);
    /// Mark or unmark the navigation link at `index` as the current page.
    fn set_nav_current(&mut self, index: usize, current: bool);
    /// Stamp the footer copyright line with the current calendar year.
    fn set_footer_year(&mut self, year: i32);
}

/// In-memory document snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StaticDocument {
    pub style: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_markup: Option<String>,
    pub body_classes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toggle_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_source: Option<String>,
    pub nav_current: Vec<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_year: Option<i32>,
    /// Number of logo markup replacements, useful to tell renders from recolors.
    pub logo_writes: usize,
}

impl StaticDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style_property(&self, name: &str) -> Option<&str> {
        self.style.get(name).map(String::as_str)
    }

    pub fn has_body_class(&self, class: &str) -> bool {
        self.body_classes.iter().any(|existing| existing == class)
    }

    pub fn current_nav(&self) -> Option<usize> {
        self.nav_current.iter().position(|current| *current)
    }
}

impl Document for StaticDocument {
    fn set_style_property(&mut self, name: &str, value: &str) {
        self.style.insert(name.to_owned(), value.to_owned());
    }

    fn set_logo_markup(&mut self, markup: &str) {
        self.logo_markup = Some(markup.to_owned());
        self.logo_writes += 1;
    }

    fn set_body_class(&mut self, class: &str, enabled: bool) {
        let present = self.has_body_class(class);
        if enabled && !present {
            self.body_classes.push(class.to_owned());
        } else if !enabled && present {
            self.body_classes.retain(|existing| existing != class);
        }
    }

    fn set_toggle_label(&mut self, label: &str) {
        self.toggle_label = Some(label.to_owned());
    }

    fn set_image_source(&mut self, src: &str) {
        self.image_source = Some(src.to_owned());
    }

    fn set_nav_current(&mut self, index: usize, current: bool) {
        if self.nav_current.len() <= index {
            self.nav_current.resize(index + 1, false);
        }
        self.nav_current[index] = current;
    }

    fn set_footer_year(&mut self, year: i32) {
        self.footer_year = Some(year);
    }
}
