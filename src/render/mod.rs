//! Renderer module: trait-based format dispatch.

pub mod json;
pub mod markdown;
pub mod method;
pub mod prop;
pub mod table;

use crate::config::Config;
use crate::error::DocResult;
use crate::model::PageDoc;
use crate::platform::PlatformFormatter;
use crate::types::TypeResolver;
use anyhow::{anyhow, Result};

/// Trait for rendering a normalized page into a specific output format.
pub trait Renderer {
    /// # Errors
    ///
    /// Only serialization failures; Markdown rendering itself cannot fail.
    fn render(&self, page: &PageDoc) -> DocResult<String>;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str, config: &Config) -> Result<Box<dyn Renderer>> {
    match format {
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer::new(config))),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(anyhow!("unknown format: {}. Use markdown or json", format)),
    }
}

/// Configuration-derived helpers shared by the entity renderers.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub resolver: TypeResolver,
    pub platforms: PlatformFormatter,
}

impl RenderContext {
    pub fn new(config: &Config) -> Self {
        Self {
            resolver: TypeResolver::new(config.links.clone()),
            platforms: PlatformFormatter::new(config.platforms.clone()),
        }
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_formats() {
        let config = Config::default();
        assert_eq!(create_renderer("md", &config).unwrap().file_extension(), "md");
        assert_eq!(create_renderer("json", &config).unwrap().file_extension(), "json");
    }

    #[test]
    fn unknown_format() {
        let err = create_renderer("html", &Config::default()).err().unwrap();
        assert!(err.to_string().contains("unknown format: html"));
    }
}
