//! Parser module — Gherkin text to [`FeatureDocument`].
//!
//! Grammar work is delegated to a [`GherkinSyntax`] backend; this module only
//! validates the resulting tree and maps it onto the document model:
//!
//! - scenario tags are the union of feature, rule and scenario tags
//! - background steps are prepended to every scenario, flagged `background`
//! - scenarios without steps and ragged data tables are rejected

pub mod ast;
pub mod gherkin;

use crate::error::ParseError;
use crate::loader::{RawFeatureFile, SkippedFile};
use crate::model::{DataTable, FeatureDocument, Scenario, Step, StepKeyword};
use crate::slug;
use ast::{FeatureNode, ScenarioNode, StepKind, StepNode, SyntaxError};
use std::collections::BTreeSet;
use std::path::Path;

/// Narrow seam over the third-party grammar library.
pub trait GherkinSyntax {
    fn parse_syntax(&self, text: &str) -> Result<FeatureNode, SyntaxError>;
}

/// Parse one feature file with the default backend. The slug is derived
/// from `source_path` the same way the loader derives it.
pub fn parse(raw_text: &str, source_path: &Path) -> Result<FeatureDocument, ParseError> {
    parse_with(&gherkin::GherkinCrate, raw_text, source_path)
}

pub fn parse_with(
    backend: &dyn GherkinSyntax,
    raw_text: &str,
    source_path: &Path,
) -> Result<FeatureDocument, ParseError> {
    let node = backend
        .parse_syntax(raw_text)
        .map_err(|e| ParseError::new(source_path, e.line, e.message))?;
    build_document(node, &slug::from_path(source_path), source_path)
}

/// Documents that parsed, plus files dropped from the build.
#[derive(Debug, Default)]
pub struct ParsedSet {
    pub documents: Vec<FeatureDocument>,
    pub skipped: Vec<SkippedFile>,
}

/// Parse every loaded file. A file that fails is logged and skipped so the
/// rest of the build can continue.
pub fn parse_all(files: &[RawFeatureFile]) -> ParsedSet {
    parse_all_with(&gherkin::GherkinCrate, files)
}

pub fn parse_all_with(backend: &dyn GherkinSyntax, files: &[RawFeatureFile]) -> ParsedSet {
    let mut set = ParsedSet::default();
    for file in files {
        match parse_with(backend, &file.raw_text, &file.source_path) {
            Ok(doc) => set.documents.push(doc),
            Err(e) => {
                tracing::warn!(path = %file.source_path.display(), line = ?e.line, error = %e.message, "skipping malformed feature file");
                set.skipped.push(SkippedFile {
                    path: file.source_path.clone(),
                    reason: match e.line {
                        Some(line) => format!("line {}: {}", line, e.message),
                        None => e.message,
                    },
                });
            }
        }
    }
    set
}

fn build_document(node: FeatureNode, slug: &str, source_path: &Path) -> Result<FeatureDocument, ParseError> {
    let feature_tags: BTreeSet<String> = node.tags.iter().cloned().collect();
    let background = convert_steps(&node.background, true, source_path)?;

    let mut scenarios = Vec::new();
    for sc in &node.scenarios {
        scenarios.push(build_scenario(sc, &feature_tags, &background, None, source_path)?);
    }
    for rule in &node.rules {
        let rule_tags: BTreeSet<String> = feature_tags.iter().chain(&rule.tags).cloned().collect();
        let mut rule_background = background.clone();
        rule_background.extend(convert_steps(&rule.background, true, source_path)?);
        for sc in &rule.scenarios {
            scenarios.push(build_scenario(
                sc,
                &rule_tags,
                &rule_background,
                Some(rule.name.as_str()),
                source_path,
            )?);
        }
    }
    // Rules may interleave with top-level scenarios in the file
    scenarios.sort_by_key(|s| s.line);

    if scenarios.is_empty() {
        tracing::warn!(path = %source_path.display(), "feature has no scenarios");
    }

    Ok(FeatureDocument {
        slug: slug.to_string(),
        title: node.name,
        description: node.description,
        tags: feature_tags,
        scenarios,
        source_path: source_path.to_path_buf(),
    })
}

fn build_scenario(
    node: &ScenarioNode,
    inherited_tags: &BTreeSet<String>,
    background: &[Step],
    rule: Option<&str>,
    source_path: &Path,
) -> Result<Scenario, ParseError> {
    if node.steps.is_empty() {
        return Err(ParseError::new(
            source_path,
            Some(node.line),
            format!("scenario '{}' has no steps", node.name),
        ));
    }

    let mut steps = background.to_vec();
    steps.extend(convert_steps(&node.steps, false, source_path)?);

    let mut tags = inherited_tags.clone();
    tags.extend(node.tags.iter().cloned());

    Ok(Scenario {
        name: node.name.clone(),
        steps,
        tags,
        rule: rule.map(str::to_string),
        outline: node.keyword.contains("Outline") || node.keyword.contains("Template"),
        line: node.line,
    })
}

fn convert_steps(nodes: &[StepNode], background: bool, source_path: &Path) -> Result<Vec<Step>, ParseError> {
    nodes
        .iter()
        .map(|node| -> Result<Step, ParseError> {
            let table = match &node.table {
                Some(rows) => Some(validate_table(rows, node.line, source_path)?),
                None => None,
            };
            Ok(Step {
                keyword: resolve_keyword(node),
                text: node.text.clone(),
                table,
                docstring: node.docstring.clone(),
                background,
            })
        })
        .collect()
}

/// Literal English keyword when it is one, else the grammar's resolved kind
/// (covers `*` and localized keywords).
fn resolve_keyword(node: &StepNode) -> StepKeyword {
    StepKeyword::from_literal(&node.keyword).unwrap_or(match node.kind {
        StepKind::Given => StepKeyword::Given,
        StepKind::When => StepKeyword::When,
        StepKind::Then => StepKeyword::Then,
    })
}

fn validate_table(rows: &[Vec<String>], step_line: usize, source_path: &Path) -> Result<DataTable, ParseError> {
    let width = rows.first().map_or(0, Vec::len);
    if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
        return Err(ParseError::new(
            source_path,
            Some(step_line + 1 + i),
            format!(
                "data table row has {} cells, expected {}",
                row.len(),
                width
            ),
        ));
    }
    Ok(DataTable { rows: rows.to_vec() })
}
