//! compdoc: render component documentation metadata into Markdown pages.
//!
//! Input is the JSON tree produced by a component-introspection tool
//! (react-docgen). Each page goes through the same pipeline:
//!
//! 1. [`docgen`] decodes the extractor output.
//! 2. [`normalize`] extracts description tags ([`tags`]) and classifies
//!    type nodes into [`model::TypeDescriptor`]s.
//! 3. [`render`] turns the normalized page into Markdown (or JSON), using
//!    [`types::TypeResolver`] for linkified types and
//!    [`platform::PlatformFormatter`] for badges.
//!
//! The library never touches the filesystem; the `compdoc` binary does.

pub mod config;
pub mod docgen;
pub mod error;
pub mod model;
pub mod normalize;
pub mod platform;
pub mod render;
pub mod tags;
pub mod types;

pub use config::Config;
pub use error::{DocError, DocResult};
pub use model::PageDoc;
pub use render::{create_renderer, Renderer};

/// Normalize and render one page as Markdown.
///
/// # Errors
///
/// [`DocError::MalformedType`] or [`DocError::MissingType`] when a prop or
/// parameter carries no usable type.
pub fn generate_markdown(page: &docgen::Page, config: &Config) -> DocResult<String> {
    let doc = normalize::normalize_page(page)?;
    Ok(render::markdown::MarkdownRenderer::new(config).render_page(&doc))
}

/// Normalize and render one page with any renderer.
pub fn render_page(page: &docgen::Page, renderer: &dyn Renderer) -> DocResult<String> {
    let doc = normalize::normalize_page(page)?;
    renderer.render(&doc)
}
