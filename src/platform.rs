//! Platform badges.

use crate::config::PlatformLabel;

/// Maps platform ids to inline badge markup.
#[derive(Debug, Clone)]
pub struct PlatformFormatter {
    labels: Vec<PlatformLabel>,
}

impl Default for PlatformFormatter {
    fn default() -> Self {
        Self::new(PlatformLabel::builtin())
    }
}

impl PlatformFormatter {
    pub fn new(labels: Vec<PlatformLabel>) -> Self {
        Self { labels }
    }

    /// Badge for one id, e.g. `<div class="label ios">iOS</div>`.
    ///
    /// Ids are matched trimmed and case-insensitively. Unknown ids pass
    /// through unmodified, blank ids produce nothing.
    pub fn badge(&self, id: &str) -> String {
        let key = id.trim();
        if key.is_empty() {
            return String::new();
        }
        match self.labels.iter().find(|l| l.id.eq_ignore_ascii_case(key)) {
            Some(label) => format!(
                "<div class=\"label {}\">{}</div>",
                label.css_class(),
                label.label
            ),
            None => id.to_string(),
        }
    }

    /// Whether `id` has a configured label.
    pub fn is_known(&self, id: &str) -> bool {
        let key = id.trim();
        self.labels.iter().any(|l| l.id.eq_ignore_ascii_case(key))
    }

    /// Badges for all ids, in order, separated by a space.
    pub fn badges<S: AsRef<str>>(&self, ids: &[S]) -> String {
        ids.iter()
            .map(|id| self.badge(id.as_ref()))
            .filter(|b| !b.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
