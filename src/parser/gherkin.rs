//! Backend over the `gherkin` crate (the cucumber-rs grammar).

use super::ast::{FeatureNode, RuleNode, ScenarioNode, StepKind, StepNode, SyntaxError};
use super::GherkinSyntax;
use ::gherkin::{GherkinEnv, StepType};
use regex::Regex;
use std::sync::LazyLock;

// peg-style locations in error messages: "error at 4:7: expected ..."
static RE_LINE_COL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d+):(\d+)\b").unwrap());

#[derive(Debug, Default, Clone, Copy)]
pub struct GherkinCrate;

impl GherkinSyntax for GherkinCrate {
    fn parse_syntax(&self, text: &str) -> Result<FeatureNode, SyntaxError> {
        // The grammar expects every line, including the last, to be terminated.
        let owned;
        let input = if text.ends_with('\n') {
            text
        } else {
            owned = format!("{text}\n");
            owned.as_str()
        };

        let feature = ::gherkin::Feature::parse(input, GherkinEnv::default()).map_err(|e| {
            let message = e.to_string();
            SyntaxError {
                line: line_from_message(&message),
                message,
            }
        })?;

        Ok(FeatureNode {
            name: feature.name.trim().to_string(),
            description: clean_description(feature.description),
            tags: clean_tags(feature.tags),
            background: feature
                .background
                .map(|bg| convert_steps(bg.steps))
                .unwrap_or_default(),
            scenarios: feature.scenarios.into_iter().map(convert_scenario).collect(),
            rules: feature.rules.into_iter().map(convert_rule).collect(),
            line: feature.position.line,
        })
    }
}

fn convert_rule(rule: ::gherkin::Rule) -> RuleNode {
    RuleNode {
        name: rule.name.trim().to_string(),
        tags: clean_tags(rule.tags),
        background: rule
            .background
            .map(|bg| convert_steps(bg.steps))
            .unwrap_or_default(),
        scenarios: rule.scenarios.into_iter().map(convert_scenario).collect(),
        line: rule.position.line,
    }
}

fn convert_scenario(scenario: ::gherkin::Scenario) -> ScenarioNode {
    ScenarioNode {
        keyword: scenario.keyword.trim().to_string(),
        name: scenario.name.trim().to_string(),
        tags: clean_tags(scenario.tags),
        steps: convert_steps(scenario.steps),
        line: scenario.position.line,
    }
}

fn convert_steps(steps: Vec<::gherkin::Step>) -> Vec<StepNode> {
    steps
        .into_iter()
        .map(|step| StepNode {
            keyword: step.keyword.trim().to_string(),
            kind: match step.ty {
                StepType::Given => StepKind::Given,
                StepType::When => StepKind::When,
                StepType::Then => StepKind::Then,
            },
            text: step.value.trim().to_string(),
            table: step.table.map(|t| {
                t.rows
                    .into_iter()
                    .map(|row| row.into_iter().map(|c| c.trim().to_string()).collect())
                    .collect()
            }),
            docstring: step.docstring,
            line: step.position.line,
        })
        .collect()
}

fn clean_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|t| t.trim().trim_start_matches('@').to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

fn clean_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| {
            d.lines()
                .map(str::trim)
                .collect::<Vec<_>>()
                .join("\n")
                .trim()
                .to_string()
        })
        .filter(|d| !d.is_empty())
}

fn line_from_message(message: &str) -> Option<usize> {
    RE_LINE_COL
        .captures(message)
        .and_then(|c| c[1].parse().ok())
}
