//! Normalized documentation model: format-agnostic.
//!
//! Built from the extractor output by [`crate::normalize`]; renderers only
//! ever see these types.

use crate::docgen::FlowType;
use indexmap::IndexMap;
use serde::Serialize;

/// A page ready to render.
#[derive(Debug, Clone, Serialize)]
pub struct PageDoc {
    pub id: String,
    pub title: String,
    pub component: ComponentDoc,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ComponentDoc {
    pub display_name: String,
    pub description: Description,
    /// Component-level tags. Collected for completeness; pages don't render them.
    pub tags: TagSet,
    pub props: IndexMap<String, PropDoc>,
    pub methods: Vec<MethodDoc>,
    pub composes: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PropDoc {
    pub name: String,
    pub required: bool,
    /// `None` only when a `@type` override supplies the type instead.
    pub type_descriptor: Option<TypeDescriptor>,
    /// Structural default as written in source (e.g. `'white'`, `Platform.OS === 'ios' ? 0 : 1`).
    pub default_value: Option<String>,
    pub description: String,
    pub tags: TagSet,
}

#[derive(Debug, Clone, Serialize)]
pub struct MethodDoc {
    pub name: String,
    pub params: Vec<ParamDoc>,
    pub modifiers: Vec<String>,
    pub description: String,
    pub tags: TagSet,
}

impl MethodDoc {
    pub fn is_static(&self) -> bool {
        self.modifiers.iter().any(|m| m == "static")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ParamDoc {
    pub name: String,
    pub type_descriptor: Option<TypeDescriptor>,
    pub optional: bool,
    pub description: Option<String>,
}

/// A description split into prose, fenced examples and trailing footer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Description {
    pub text: String,
    pub examples: Vec<Example>,
    pub footer: String,
}

impl Description {
    /// Rejoin all parts, separated by blank lines.
    pub fn joined(&self) -> String {
        let mut sections: Vec<&str> = Vec::new();
        if !self.text.is_empty() {
            sections.push(&self.text);
        }
        for example in &self.examples {
            if !example.intro.is_empty() {
                sections.push(&example.intro);
            }
            sections.push(&example.raw);
        }
        if !self.footer.is_empty() {
            sections.push(&self.footer);
        }
        sections.join("\n\n")
    }
}

/// A fenced code block found in a description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Example {
    /// Info string after the opening fence, e.g. `SnackPlayer name=Hello`.
    pub language: String,
    /// Prose between the previous example and this one.
    pub intro: String,
    /// The block including its fences.
    pub raw: String,
    /// The block content without fences.
    pub code: String,
}

/// Tags pulled out of a description.
///
/// Parallel per-platform variants are kept in encounter order; nothing here is
/// guaranteed to be present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagSet {
    /// `@platform` ids plus ids from inline directives in prose.
    pub platform: Vec<String>,
    /// `@default` values.
    pub default: Vec<PlatformValue>,
    /// `@type` overrides.
    pub type_overrides: Vec<PlatformValue>,
}

impl TagSet {
    pub fn is_empty(&self) -> bool {
        self.platform.is_empty() && self.default.is_empty() && self.type_overrides.is_empty()
    }

    /// Record a platform id once.
    pub fn add_platform(&mut self, id: &str) {
        let id = id.trim();
        if !id.is_empty() && !self.platform.iter().any(|p| p.eq_ignore_ascii_case(id)) {
            self.platform.push(id.to_string());
        }
    }
}

/// A tag value with the platforms its inline directive restricted it to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlatformValue {
    pub value: String,
    pub platforms: Vec<String>,
}

// -- Type descriptors ---------------------------------------------------------

/// Structured type of a prop or parameter, prior to rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TypeDescriptor {
    Primitive {
        name: String,
        raw: Option<String>,
    },
    Alias {
        name: String,
        raw: Option<String>,
    },
    Union {
        elements: Vec<TypeDescriptor>,
        raw: Option<String>,
    },
    ReadOnlyArray {
        element: Option<Box<TypeDescriptor>>,
        raw: Option<String>,
    },
    ReadOnlyObject {
        element: Option<Box<TypeDescriptor>>,
        raw: Option<String>,
    },
    Signature {
        kind: String,
        raw: Option<String>,
        properties: Vec<ObjectProperty>,
    },
    Literal {
        value: String,
        raw: Option<String>,
    },
}

/// One `key: type` entry of an object signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectProperty {
    pub key: String,
    pub value: TypeDescriptor,
}

const PRIMITIVES: &[&str] = &[
    "any", "bool", "boolean", "Function", "mixed", "null", "number", "Object", "string",
    "Stringish", "symbol", "void",
];

impl TypeDescriptor {
    /// Classify an extractor type node.
    ///
    /// Returns `None` when the node has nothing to display: no name, no raw
    /// source and (for literals) no value.
    pub fn classify(flow: &FlowType) -> Option<TypeDescriptor> {
        let raw = non_empty(flow.raw.as_deref());
        let Some(name) = non_empty(flow.name.as_deref()) else {
            // Unnamed nodes still render from their source text.
            return raw.map(|raw| TypeDescriptor::Alias {
                name: raw.clone(),
                raw: Some(raw),
            });
        };

        let first_element = || {
            flow.elements
                .first()
                .and_then(TypeDescriptor::classify)
                .map(Box::new)
        };

        let descriptor = match name.as_str() {
            "union" => TypeDescriptor::Union {
                elements: flow.elements.iter().filter_map(TypeDescriptor::classify).collect(),
                raw,
            },
            "$ReadOnlyArray" | "Array" => TypeDescriptor::ReadOnlyArray {
                element: first_element(),
                raw,
            },
            "$ReadOnly" => TypeDescriptor::ReadOnlyObject {
                element: first_element(),
                raw,
            },
            "signature" => TypeDescriptor::Signature {
                kind: non_empty(flow.kind.as_deref()).unwrap_or_else(|| "signature".to_string()),
                properties: flow
                    .signature
                    .iter()
                    .flat_map(|s| &s.properties)
                    .filter_map(|p| {
                        Some(ObjectProperty {
                            key: p.key.clone(),
                            value: TypeDescriptor::classify(&p.value)?,
                        })
                    })
                    .collect(),
                raw,
            },
            "literal" => TypeDescriptor::Literal {
                value: non_empty(flow.value.as_deref()).or_else(|| raw.clone())?,
                raw,
            },
            _ if PRIMITIVES.iter().any(|p| p.eq_ignore_ascii_case(&name)) => {
                TypeDescriptor::Primitive { name, raw }
            }
            _ => TypeDescriptor::Alias { name, raw },
        };
        Some(descriptor)
    }

    pub fn raw(&self) -> Option<&str> {
        match self {
            TypeDescriptor::Primitive { raw, .. }
            | TypeDescriptor::Alias { raw, .. }
            | TypeDescriptor::Union { raw, .. }
            | TypeDescriptor::ReadOnlyArray { raw, .. }
            | TypeDescriptor::ReadOnlyObject { raw, .. }
            | TypeDescriptor::Signature { raw, .. }
            | TypeDescriptor::Literal { raw, .. } => raw.as_deref(),
        }
    }

    /// Bare name of the variant, used when no raw source exists.
    pub fn bare_name(&self) -> &str {
        match self {
            TypeDescriptor::Primitive { name, .. } | TypeDescriptor::Alias { name, .. } => name,
            TypeDescriptor::Union { .. } => "union",
            TypeDescriptor::ReadOnlyArray { .. } => "array",
            TypeDescriptor::ReadOnlyObject { .. } => "object",
            TypeDescriptor::Signature { kind, .. } => kind,
            TypeDescriptor::Literal { value, .. } => value,
        }
    }

    /// Raw source if present, otherwise the bare name. Never empty.
    pub fn fallback_text(&self) -> &str {
        self.raw().unwrap_or_else(|| self.bare_name())
    }
}

fn non_empty(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}
