//! Error types and the taxonomy of locally recovered conditions.

use thiserror::Error;

/// Result type for compdoc operations.
pub type DocResult<T> = Result<T, DocError>;

/// Conditions that abort rendering of a page.
///
/// Everything else is recovered in place and only logged (see [`Recovered`]).
#[derive(Debug, Error)]
pub enum DocError {
    /// A type descriptor carries neither a name, a value nor raw source text.
    #[error("malformed type descriptor on `{entity}`: no name, value or raw source")]
    MalformedType { entity: String },

    /// A prop has no type descriptor and no `@type` override to fall back on.
    #[error("missing type descriptor on `{entity}`")]
    MissingType { entity: String },

    /// Configuration file could not be decoded.
    #[error("invalid configuration: {0}")]
    Config(#[source] serde_json::Error),

    /// A normalized page could not be serialized.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure modes that are recovered locally and never reach the caller.
///
/// Used as the `kind` field of `tracing` events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovered {
    /// Directive or block tag that does not parse; left verbatim.
    MalformedDirective,
    /// Type descriptor without a specific rendering rule; raw text used.
    UnresolvedType,
    /// Alias without a link table entry; rendered as plain text.
    MissingAlias,
    /// Nothing to render in a section; section omitted.
    EmptySection,
}

impl Recovered {
    pub fn as_str(self) -> &'static str {
        match self {
            Recovered::MalformedDirective => "malformed_directive",
            Recovered::UnresolvedType => "unresolved_type",
            Recovered::MissingAlias => "missing_alias",
            Recovered::EmptySection => "empty_section",
        }
    }
}

impl std::fmt::Display for Recovered {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_type_names_entity() {
        let err = DocError::MalformedType {
            entity: "onPress".to_string(),
        };
        assert!(err.to_string().contains("`onPress`"));
    }

    #[test]
    fn recovered_kind_labels() {
        assert_eq!(Recovered::MissingAlias.to_string(), "missing_alias");
        assert_eq!(Recovered::EmptySection.as_str(), "empty_section");
    }
}
