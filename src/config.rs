//! Rendering configuration: the link table and the platform label table.
//!
//! Both ship with built-in defaults. A JSON config file may extend or override
//! them:
//!
//! ```json
//! {
//!   "links": { "PressEvent": { "text": "PressEvent", "url": "pressevent" } },
//!   "platforms": [ { "id": "web", "label": "Web" } ]
//! }
//! ```

use crate::error::{DocError, DocResult};
use indexmap::IndexMap;
use serde::Deserialize;

/// Where a known type alias should link to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LinkTarget {
    pub text: String,
    pub url: String,
}

/// Alias name → link target. Absence of an entry is not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkTable {
    entries: IndexMap<String, LinkTarget>,
}

impl LinkTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, alias: impl Into<String>, text: impl Into<String>, url: impl Into<String>) {
        self.entries.insert(
            alias.into(),
            LinkTarget {
                text: text.into(),
                url: url.into(),
            },
        );
    }

    pub fn get(&self, alias: &str) -> Option<&LinkTarget> {
        self.entries.get(alias)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Shared types documented on their own pages.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for (alias, text, url) in BUILTIN_LINKS {
            table.insert(*alias, *text, *url);
        }
        table
    }
}

const BUILTIN_LINKS: &[(&str, &str, &str)] = &[
    ("ColorValue", "color", "colors"),
    ("ViewProps", "View Props", "view#props"),
    ("ViewStyleProp", "View Style", "view-style-props"),
    ("TextStyleProp", "Text Style", "text-style-props"),
    ("ImageStyleProp", "Image Style", "image-style-props"),
    ("ImageSource", "ImageSource", "image#imagesource"),
    ("EdgeInsetsProp", "Rect", "rect"),
    ("EdgeInsetsOrSizeProp", "Rect", "rect"),
    ("PressEvent", "PressEvent", "pressevent"),
    ("LayoutEvent", "LayoutEvent", "layoutevent"),
    ("ScrollEvent", "ScrollEvent", "scrollevent"),
    ("SyntheticEvent", "SyntheticEvent", "syntheticevent"),
];

/// Badge label for one platform id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PlatformLabel {
    /// Matched case-insensitively.
    pub id: String,
    pub label: String,
    /// CSS class; defaults to the lower-cased id.
    #[serde(default)]
    pub class: Option<String>,
}

impl PlatformLabel {
    pub fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            class: None,
        }
    }

    pub fn css_class(&self) -> String {
        self.class
            .clone()
            .unwrap_or_else(|| self.id.to_ascii_lowercase())
    }

    pub fn builtin() -> Vec<PlatformLabel> {
        vec![
            PlatformLabel::new("ios", "iOS"),
            PlatformLabel::new("android", "Android"),
            PlatformLabel::new("tv", "TV"),
        ]
    }
}

/// Everything a renderer needs besides the page itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub links: LinkTable,
    pub platforms: Vec<PlatformLabel>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            links: LinkTable::builtin(),
            platforms: PlatformLabel::builtin(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    links: IndexMap<String, LinkTarget>,
    platforms: Vec<PlatformLabel>,
    /// Drop the built-in tables instead of extending them.
    replace_builtin: bool,
}

impl Config {
    /// Parse a JSON config file on top of the built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::Config`] when the JSON does not decode.
    pub fn from_json(json: &str) -> DocResult<Self> {
        let file: ConfigFile = serde_json::from_str(json).map_err(DocError::Config)?;
        let mut config = if file.replace_builtin {
            Config {
                links: LinkTable::new(),
                platforms: Vec::new(),
            }
        } else {
            Config::default()
        };

        for (alias, target) in file.links {
            config.links.entries.insert(alias, target);
        }
        for label in file.platforms {
            match config
                .platforms
                .iter_mut()
                .find(|p| p.id.eq_ignore_ascii_case(&label.id))
            {
                Some(existing) => *existing = label,
                None => config.platforms.push(label),
            }
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_links_present() {
        let table = LinkTable::builtin();
        let color = table.get("ColorValue").unwrap();
        assert_eq!(color.text, "color");
        assert!(table.get("Unknown").is_none());
    }

    #[test]
    fn config_extends_builtin() {
        let config = Config::from_json(
            r#"{"links": {"PointProp": {"text": "Point", "url": "point"}},
                "platforms": [{"id": "web", "label": "Web"}]}"#,
        )
        .unwrap();
        assert!(config.links.get("ColorValue").is_some());
        assert_eq!(config.links.get("PointProp").unwrap().url, "point");
        assert_eq!(config.platforms.len(), 4);
        assert_eq!(config.platforms[3].css_class(), "web");
    }

    #[test]
    fn config_overrides_platform_label() {
        let config =
            Config::from_json(r#"{"platforms": [{"id": "TV", "label": "Apple TV", "class": "appletv"}]}"#)
                .unwrap();
        assert_eq!(config.platforms.len(), 3);
        assert_eq!(config.platforms[2].label, "Apple TV");
        assert_eq!(config.platforms[2].css_class(), "appletv");
    }

    #[test]
    fn config_replace_builtin() {
        let config = Config::from_json(r#"{"replace_builtin": true}"#).unwrap();
        assert!(config.links.is_empty());
        assert!(config.platforms.is_empty());
    }

    #[test]
    fn config_rejects_bad_json() {
        assert!(Config::from_json("{links: 3").is_err());
    }
}
