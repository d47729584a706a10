//! Data model for parsed feature files — format-agnostic.

use crate::NOT_IMPLEMENTED_TAG;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

/// One parsed `.feature` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureDocument {
    /// Derived from the file name, unique across a build
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    /// Feature-level tags, without the `@` prefix
    pub tags: BTreeSet<String>,
    pub scenarios: Vec<Scenario>,
    pub source_path: PathBuf,
}

impl FeatureDocument {
    pub fn is_tagged(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn not_implemented_scenarios(&self) -> usize {
        self.scenarios.iter().filter(|s| s.is_not_implemented()).count()
    }
}

/// One `Scenario:` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scenario {
    pub name: String,
    /// Background steps first (flagged), then the scenario's own steps
    pub steps: Vec<Step>,
    /// Effective tags: feature ∪ rule ∪ scenario
    pub tags: BTreeSet<String>,
    /// Enclosing `Rule:` name
    pub rule: Option<String>,
    /// `Scenario Outline` / `Scenario Template`
    pub outline: bool,
    pub line: usize,
}

impl Scenario {
    pub fn is_not_implemented(&self) -> bool {
        self.tags.contains(NOT_IMPLEMENTED_TAG)
    }

    /// Steps written in the scenario itself, excluding background steps.
    pub fn own_steps(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter().filter(|s| !s.background)
    }
}

/// One `Given/When/Then/And/But` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    pub keyword: StepKeyword,
    pub text: String,
    pub table: Option<DataTable>,
    pub docstring: Option<String>,
    /// Prepended from a `Background:` block
    pub background: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StepKeyword {
    Given,
    When,
    Then,
    And,
    But,
}

impl StepKeyword {
    /// Match an English keyword as written in the file ("Given ", "And").
    pub fn from_literal(keyword: &str) -> Option<Self> {
        match keyword.trim() {
            "Given" => Some(Self::Given),
            "When" => Some(Self::When),
            "Then" => Some(Self::Then),
            "And" => Some(Self::And),
            "But" => Some(Self::But),
            _ => None,
        }
    }

    pub fn is_conjunction(self) -> bool {
        matches!(self, Self::And | Self::But)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
            Self::And => "And",
            Self::But => "But",
        }
    }
}

impl fmt::Display for StepKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `|`-delimited table attached to a step. Column counts are validated
/// at parse time, so every row has `width()` cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataTable {
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn header(&self) -> &[String] {
        self.rows.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Body rows as header → value pairs, in column order.
    pub fn records(&self) -> Vec<Vec<(&str, &str)>> {
        let header = self.header();
        self.rows
            .iter()
            .skip(1)
            .map(|row| {
                header
                    .iter()
                    .zip(row)
                    .map(|(h, v)| (h.as_str(), v.as_str()))
                    .collect()
            })
            .collect()
    }
}
