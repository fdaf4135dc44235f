//! Type descriptor resolution: descriptor tree to display text and links.
//!
//! One rule per [`TypeDescriptor`] variant. Resolution never fails: anything
//! without a specific rule degrades to the raw source text, then to the bare
//! variant name.

use crate::config::{LinkTable, LinkTarget};
use crate::error::Recovered;
use crate::model::{ObjectProperty, TypeDescriptor};
use crate::render::table::code_cell;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// First `: Token` in a function signature, e.g. the event type in
/// `(event: PressEvent) => mixed`.
static RE_SIGNATURE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":\s*([A-Za-z_$][\w$]*)").unwrap());

/// Display text plus an optional link target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub text: String,
    pub url: Option<String>,
}

impl Resolved {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: None,
        }
    }

    fn link(target: &LinkTarget) -> Self {
        Self {
            text: target.text.clone(),
            url: Some(target.url.clone()),
        }
    }

    pub fn is_link(&self) -> bool {
        self.url.is_some()
    }
}

/// Renders as `[text](url)` when linked, bare text otherwise.
impl fmt::Display for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.url {
            Some(ref url) => write!(f, "[{}]({})", self.text, url),
            None => f.write_str(&self.text),
        }
    }
}

/// Resolves type descriptors against a link table.
#[derive(Debug, Clone, Default)]
pub struct TypeResolver {
    links: LinkTable,
}

impl TypeResolver {
    pub fn new(links: LinkTable) -> Self {
        Self { links }
    }

    pub fn links(&self) -> &LinkTable {
        &self.links
    }

    /// Resolve a descriptor. The returned text is never empty.
    pub fn resolve(&self, descriptor: &TypeDescriptor) -> Resolved {
        let resolved = match descriptor {
            TypeDescriptor::Primitive { name, raw } => self
                .lookup(name)
                .unwrap_or_else(|| Resolved::plain(raw.clone().unwrap_or_else(|| format_type(name)))),
            TypeDescriptor::Alias { name, raw } => self.lookup(name).unwrap_or_else(|| {
                tracing::debug!(kind = %Recovered::MissingAlias, alias = %name, "no link for alias");
                Resolved::plain(raw.clone().unwrap_or_else(|| format_type(name)))
            }),
            TypeDescriptor::Union { elements, raw } => self
                .resolve_union(elements, raw.as_deref())
                .unwrap_or_else(|| unresolved(descriptor)),
            TypeDescriptor::ReadOnlyArray { element, .. } => self.resolve_array(element.as_deref()),
            TypeDescriptor::ReadOnlyObject { element, .. } => element
                .as_deref()
                .and_then(|e| self.resolve_readonly_object(e))
                .unwrap_or_else(|| unresolved(descriptor)),
            TypeDescriptor::Signature { kind, raw, .. } => {
                if kind == "function" {
                    self.resolve_function(kind, raw.as_deref())
                } else {
                    unresolved(descriptor)
                }
            }
            TypeDescriptor::Literal { value, .. } => self
                .lookup(strip_quotes(value))
                .unwrap_or_else(|| Resolved::plain(value.clone())),
        };

        if resolved.text.trim().is_empty() {
            return unresolved(descriptor);
        }
        resolved
    }

    /// Resolve and render as Markdown in one step.
    pub fn render(&self, descriptor: &TypeDescriptor) -> String {
        self.resolve(descriptor).to_string()
    }

    /// Linkify a bare type name, or render it as table-safe inline code.
    pub fn render_name(&self, name: &str) -> String {
        match self.lookup(name) {
            Some(resolved) => resolved.to_string(),
            None => code_cell(name),
        }
    }

    fn lookup(&self, name: &str) -> Option<Resolved> {
        self.links.get(name.trim()).map(Resolved::link)
    }

    /// The link an element contributes to its union, if any.
    fn element_link(&self, element: &TypeDescriptor) -> Option<Resolved> {
        match element {
            TypeDescriptor::Literal { value, .. } => self.lookup(strip_quotes(value)),
            other => Some(self.resolve(other)).filter(Resolved::is_link),
        }
    }

    fn resolve_union(&self, elements: &[TypeDescriptor], raw: Option<&str>) -> Option<Resolved> {
        if let Some(link) = elements.iter().find_map(|e| self.element_link(e)) {
            return Some(link);
        }
        enum_text(elements, raw).map(Resolved::plain)
    }

    fn resolve_array(&self, element: Option<&TypeDescriptor>) -> Resolved {
        match element {
            Some(TypeDescriptor::Union { elements, raw }) => match enum_text(elements, raw.as_deref()) {
                Some(members) => Resolved::plain(format!("array of {}", members)),
                None => Resolved::plain("array"),
            },
            Some(inner) => {
                let resolved = self.resolve(inner);
                if resolved.is_link() {
                    Resolved::plain(format!("array of {}", resolved))
                } else {
                    Resolved::plain("array")
                }
            }
            None => Resolved::plain("array"),
        }
    }

    /// `$ReadOnly<{|key: Type|}>` wrappers render as `object: {key: [text](url), ...}`.
    ///
    /// Properties whose type has no link are left out. This mirrors the
    /// shape used by known components (e.g. a switch's `trackColor`) rather
    /// than a general object renderer. Returns `None` when nothing links.
    fn resolve_readonly_object(&self, element: &TypeDescriptor) -> Option<Resolved> {
        let TypeDescriptor::Signature {
            kind, properties, ..
        } = element
        else {
            return None;
        };
        if kind != "object" {
            return None;
        }

        let linked: Vec<String> = properties
            .iter()
            .filter_map(|ObjectProperty { key, value }| {
                let resolved = self.resolve(value);
                resolved.is_link().then(|| format!("{}: {}", key, resolved))
            })
            .collect();

        if linked.is_empty() {
            return None;
        }
        Some(Resolved::plain(format!("{}: {{{}}}", kind, linked.join(", "))))
    }

    fn resolve_function(&self, kind: &str, raw: Option<&str>) -> Resolved {
        let token = raw
            .and_then(|raw| RE_SIGNATURE_TOKEN.captures(raw))
            .map(|caps| caps[1].to_string());

        match token.as_deref().and_then(|t| self.lookup(t)) {
            Some(link) => Resolved::plain(format!("{}({})", kind, link)),
            None => Resolved::plain(kind),
        }
    }
}

fn unresolved(descriptor: &TypeDescriptor) -> Resolved {
    let text = descriptor.fallback_text();
    tracing::debug!(kind = %Recovered::UnresolvedType, text = %text, "falling back to raw type text");
    Resolved::plain(text)
}

/// `enum(a, b, c)` from the `|`-separated raw source, or from the elements
/// when no source exists. `None` when there are no members at all.
fn enum_text(elements: &[TypeDescriptor], raw: Option<&str>) -> Option<String> {
    let members: Vec<String> = match raw {
        Some(raw) => raw
            .split('|')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        None => elements
            .iter()
            .map(|e| e.fallback_text().to_string())
            .collect(),
    };
    if members.is_empty() {
        return None;
    }
    Some(format!("enum({})", members.join(", ")))
}

/// Display names for a few primitive spellings.
pub fn format_type(name: &str) -> String {
    match name.to_ascii_lowercase().as_str() {
        "boolean" => "bool".to_string(),
        "stringish" => "string".to_string(),
        _ if name == "$ReadOnlyArray" => "array".to_string(),
        _ => name.to_string(),
    }
}

fn strip_quotes(value: &str) -> &str {
    value.trim().trim_matches(|c| c == '\'' || c == '"')
}
