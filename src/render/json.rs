//! JSON renderer: the normalized page as structured output.
//!
//! Useful for inspecting what tag extraction and type classification made of
//! the extractor output, or for feeding a custom rendering pipeline.

use crate::error::DocResult;
use crate::model::PageDoc;
use crate::render::Renderer;

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, page: &PageDoc) -> DocResult<String> {
        let mut out = serde_json::to_string_pretty(page)?;
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
