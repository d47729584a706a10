//! Renderer module — trait-based format dispatch.

pub mod html;
pub mod json;
pub mod markdown;

use crate::error::{Error, Result};
use crate::view::{FeatureDetailView, FeatureIndexView};

/// Trait for rendering the view-models into a specific output format.
pub trait Renderer {
    /// Listing page. `title` is the configured site heading.
    fn render_index(&self, index: &FeatureIndexView, title: &str) -> String;
    fn render_detail(&self, detail: &FeatureDetailView) -> String;
    fn file_extension(&self) -> &str;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "html" => Ok(Box::new(html::HtmlRenderer)),
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(Error::UnknownFormat(format.to_string())),
    }
}

/// "1 scenario", "3 scenarios".
pub fn pluralize(count: usize, singular: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}s", count, singular)
    }
}

/// One-line implementation summary shared by the text formats.
pub fn scenario_summary(total: usize, not_implemented: usize) -> String {
    if not_implemented == 0 {
        pluralize(total, "scenario")
    } else {
        format!("{}, {} not implemented", pluralize(total, "scenario"), not_implemented)
    }
}
