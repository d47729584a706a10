//! Library-neutral Gherkin syntax tree.
//!
//! Grammar backends produce this shape; validation and mapping to the
//! document model only ever see these types.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureNode {
    pub name: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub background: Vec<StepNode>,
    pub scenarios: Vec<ScenarioNode>,
    pub rules: Vec<RuleNode>,
    pub line: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleNode {
    pub name: String,
    pub tags: Vec<String>,
    pub background: Vec<StepNode>,
    pub scenarios: Vec<ScenarioNode>,
    pub line: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenarioNode {
    /// As written: "Scenario", "Scenario Outline", ...
    pub keyword: String,
    pub name: String,
    pub tags: Vec<String>,
    pub steps: Vec<StepNode>,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepNode {
    /// As written, e.g. "And" or "*"
    pub keyword: String,
    /// Resolved kind; conjunctions take the kind of the step they continue
    pub kind: StepKind,
    pub text: String,
    pub table: Option<Vec<Vec<String>>>,
    pub docstring: Option<String>,
    pub line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Given,
    When,
    Then,
}

/// Grammar-level failure reported by a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub line: Option<usize>,
    pub message: String,
}
