//! JSON renderer — structured output for tooling integration.
//!
//! Serializes the view-models directly, so a front-end build can render the
//! pages with its own components.

use crate::render::Renderer;
use crate::view::{FeatureDetailView, FeatureIndexView};
use serde::Serialize;

pub struct JsonRenderer;

#[derive(Serialize)]
struct IndexPage<'a> {
    title: &'a str,
    #[serde(flatten)]
    index: &'a FeatureIndexView,
}

impl Renderer for JsonRenderer {
    fn render_index(&self, index: &FeatureIndexView, title: &str) -> String {
        to_json(&IndexPage { title, index })
    }

    fn render_detail(&self, detail: &FeatureDetailView) -> String {
        to_json(detail)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    // View-models hold only strings, numbers, bools, sequences and unit enums,
    // none of which serde_json can reject
    let mut out = serde_json::to_string_pretty(value).expect("view-models always serialize to JSON");
    out.push('\n');
    out
}
