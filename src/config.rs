use serde::Deserialize;

use crate::color;

pub const DEFAULT_SELECTOR: &str = "img";

/// Raw options as passed from JS. Every field is optional.
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    pub selector: Option<String>,
    pub attribute: Option<String>,
    pub lock_scroll: bool,
    pub pointer_cursor: bool,
    pub close_on_outside_click: bool,
    pub background_color: Option<String>,
    pub opacity: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    Css(String),
    /// Images carrying the named attribute.
    Attribute(String),
}

impl Selector {
    pub fn to_query(&self) -> String {
        match self {
            Selector::Css(css) => css.clone(),
            Selector::Attribute(name) => format!("img[{}]", name),
        }
    }

    /// How the criterion is named in diagnostics.
    pub fn describe(&self) -> String {
        match self {
            Selector::Css(css) => css.clone(),
            Selector::Attribute(name) => format!("[{}]", name),
        }
    }
}

impl Default for Selector {
    fn default() -> Self {
        Selector::Css(DEFAULT_SELECTOR.to_string())
    }
}

/// Resolved, immutable widget configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub selector: Selector,
    pub lock_scroll: bool,
    pub pointer_cursor: bool,
    pub close_on_outside_click: bool,
    /// `rgba(...)` for the overlay, only when a background option was given.
    pub background: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Options::default().resolve()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Options {
    pub fn resolve(self) -> Config {
        let selector = match (non_blank(self.selector), non_blank(self.attribute)) {
            (Some(css), Some(attr)) => {
                log::warn!(
                    "lightzoom: both selector `{}` and attribute `{}` given, using the selector",
                    css,
                    attr
                );
                Selector::Css(css)
            }
            (Some(css), None) => Selector::Css(css),
            (None, Some(attr)) => Selector::Attribute(attr),
            (None, None) => Selector::default(),
        };

        let background = if self.background_color.is_some() || self.opacity.is_some() {
            Some(color::background(self.background_color.as_deref(), self.opacity))
        } else {
            None
        };

        Config {
            selector,
            lock_scroll: self.lock_scroll,
            pointer_cursor: self.pointer_cursor,
            close_on_outside_click: self.close_on_outside_click,
            background,
        }
    }
}
