//! Site builder — drives load → parse → view → render → write.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::loader::{self, LoadOptions, SkippedFile};
use crate::model::FeatureDocument;
use crate::parser;
use crate::render::{self, Renderer};
use crate::view;
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of a build, for the summary shown to content authors.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub pages_written: Vec<PathBuf>,
    /// Slugs of the features that made it into the index
    pub features: Vec<String>,
    pub skipped: Vec<SkippedFile>,
}

/// Load and parse every feature file without writing anything.
pub fn collect(config: &Config) -> Result<(Vec<FeatureDocument>, Vec<SkippedFile>)> {
    let options = LoadOptions::with_exclude(&config.exclude).map_err(|e| Error::Config {
        path: PathBuf::from("exclude"),
        message: e.to_string(),
    })?;
    let loaded = loader::load_all(&config.input, &options)?;
    let parsed = parser::parse_all(&loaded.files);

    let mut skipped = loaded.skipped;
    skipped.extend(parsed.skipped);
    skipped.sort_by(|a, b| a.path.cmp(&b.path));
    Ok((parsed.documents, skipped))
}

/// Generate the listing page and one detail page per feature.
///
/// Layout mirrors the routes: `{output}/{route}/index.{ext}` and
/// `{output}/{route}/{slug}/index.{ext}`.
pub fn build(config: &Config) -> Result<BuildReport> {
    let renderer = render::create_renderer(&config.format)?;
    let (documents, skipped) = collect(config)?;
    let root = config.output.join(config.route_dir());

    let mut report = BuildReport {
        skipped,
        ..BuildReport::default()
    };

    let index = view::build_index(&documents);
    let index_path = page_path(&root, None, renderer.as_ref());
    write_page(&index_path, &renderer.render_index(&index, &config.title))?;
    report.pages_written.push(index_path);

    for doc in &documents {
        let detail = view::build_detail(doc);
        let path = page_path(&root, Some(&doc.slug), renderer.as_ref());
        write_page(&path, &renderer.render_detail(&detail))?;
        tracing::debug!(slug = %doc.slug, path = %path.display(), "wrote detail page");
        report.pages_written.push(path);
        report.features.push(doc.slug.clone());
    }

    tracing::info!(
        features = report.features.len(),
        pages = report.pages_written.len(),
        skipped = report.skipped.len(),
        output = %root.display(),
        "documentation built"
    );
    Ok(report)
}

fn page_path(root: &Path, slug: Option<&str>, renderer: &dyn Renderer) -> PathBuf {
    let dir = match slug {
        Some(slug) => root.join(slug),
        None => root.to_path_buf(),
    };
    dir.join(format!("index.{}", renderer.file_extension()))
}

fn write_page(path: &Path, contents: &str) -> Result<()> {
    let write_err = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, contents).map_err(write_err)
}
