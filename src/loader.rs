//! Feature file discovery — non-recursive scan of one directory.

use crate::error::{Error, Result};
use crate::{slug, FEATURE_EXTENSION};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A feature file read from disk, not yet parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFeatureFile {
    pub slug: String,
    pub raw_text: String,
    pub source_path: PathBuf,
}

/// A file left out of the build, with the reason shown to content authors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct LoadOptions {
    pub exclude: Vec<glob::Pattern>,
}

impl LoadOptions {
    pub fn with_exclude(patterns: &[String]) -> std::result::Result<Self, glob::PatternError> {
        let exclude = patterns
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { exclude })
    }

    fn is_excluded(&self, file_name: &str) -> bool {
        self.exclude.iter().any(|p| p.matches(file_name))
    }
}

#[derive(Debug, Default)]
pub struct LoadReport {
    /// Sorted lexicographically by file name
    pub files: Vec<RawFeatureFile>,
    pub skipped: Vec<SkippedFile>,
}

/// Read every `.feature` file directly inside `dir`.
///
/// A missing or unreadable directory is fatal. A single unreadable (or
/// non-UTF-8) file is skipped with a warning, as is one whose name yields an
/// empty slug. Two files resolving to the same slug is fatal, since either
/// page would silently shadow the other.
pub fn load_all(dir: &Path, options: &LoadOptions) -> Result<LoadReport> {
    let fs_err = |source| Error::FileSystem {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir).map_err(fs_err)? {
        let path = entry.map_err(fs_err)?.path();
        if !path.is_file() || !has_feature_extension(&path) {
            continue;
        }
        let file_name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        if options.is_excluded(&file_name) {
            tracing::debug!(path = %path.display(), "excluded by pattern");
            continue;
        }
        paths.push(path);
    }
    // Sort for deterministic output
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let mut report = LoadReport::default();
    let mut seen: HashMap<String, PathBuf> = HashMap::new();

    for path in paths {
        let slug = slug::from_path(&path);
        // An empty slug would route the detail page onto the listing page
        if slug.is_empty() {
            tracing::warn!(path = %path.display(), "skipping feature file with no usable slug");
            report.skipped.push(SkippedFile {
                path,
                reason: "file name has no ASCII letters or digits to build a page slug from".to_string(),
            });
            continue;
        }
        if let Some(first) = seen.get(&slug) {
            return Err(Error::DuplicateSlug {
                slug,
                first: first.clone(),
                second: path,
            });
        }
        seen.insert(slug.clone(), path.clone());

        match fs::read_to_string(&path) {
            Ok(raw_text) => {
                tracing::debug!(path = %path.display(), %slug, "loaded feature file");
                report.files.push(RawFeatureFile {
                    slug,
                    raw_text,
                    source_path: path,
                });
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable feature file");
                report.skipped.push(SkippedFile {
                    path,
                    reason: format!("unreadable: {e}"),
                });
            }
        }
    }

    Ok(report)
}

fn has_feature_extension(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(FEATURE_EXTENSION)
}
