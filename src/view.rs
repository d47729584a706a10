//! View-models for the listing and detail pages.
//!
//! Both are pure functions of already-validated documents. Counting happens
//! at scenario granularity: a scenario is the unit of "implemented".

use crate::model::{DataTable, FeatureDocument, Scenario, StepKeyword};
use crate::NOT_IMPLEMENTED_TAG;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureIndexView {
    pub total_count: usize,
    pub scenario_count: usize,
    pub implemented_count: usize,
    pub not_implemented_count: usize,
    /// Discovery order
    pub features: Vec<FeatureCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureCard {
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub scenario_count: usize,
    pub not_implemented_count: usize,
    pub status: ImplementationStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImplementationStatus {
    Implemented,
    Partial,
    NotImplemented,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureDetailView {
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub source_path: String,
    pub badges: Vec<TagBadge>,
    pub status: ImplementationStatus,
    pub scenario_count: usize,
    pub not_implemented_count: usize,
    pub scenarios: Vec<ScenarioView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioView {
    pub name: String,
    pub rule: Option<String>,
    pub outline: bool,
    pub not_implemented: bool,
    pub badges: Vec<TagBadge>,
    pub steps: Vec<StepView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepView {
    pub keyword: StepKeyword,
    pub text: String,
    pub category: StepCategory,
    /// And/But continuing the previous primary keyword
    pub conjunction: bool,
    pub background: bool,
    pub table: Option<DataTable>,
    pub docstring: Option<String>,
}

/// Visual grouping of steps. And/But take the category of the Given/When/Then
/// they continue; a leading conjunction has nothing to inherit and is neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepCategory {
    Context,
    Action,
    Outcome,
    Neutral,
}

impl StepCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Context => "context",
            Self::Action => "action",
            Self::Outcome => "outcome",
            Self::Neutral => "neutral",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagBadge {
    pub label: String,
    pub kind: BadgeKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BadgeKind {
    /// Muted treatment
    NotImplemented,
    Generic,
}

impl BadgeKind {
    pub fn for_tag(tag: &str) -> Self {
        if tag == NOT_IMPLEMENTED_TAG {
            Self::NotImplemented
        } else {
            Self::Generic
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotImplemented => "not-implemented",
            Self::Generic => "generic",
        }
    }
}

pub fn build_index(features: &[FeatureDocument]) -> FeatureIndexView {
    let cards: Vec<FeatureCard> = features.iter().map(feature_card).collect();
    let scenario_count = cards.iter().map(|c| c.scenario_count).sum();
    let not_implemented_count = cards.iter().map(|c| c.not_implemented_count).sum();
    FeatureIndexView {
        total_count: features.len(),
        scenario_count,
        implemented_count: scenario_count - not_implemented_count,
        not_implemented_count,
        features: cards,
    }
}

fn feature_card(feature: &FeatureDocument) -> FeatureCard {
    let scenario_count = feature.scenarios.len();
    let not_implemented_count = feature.not_implemented_scenarios();
    FeatureCard {
        slug: feature.slug.clone(),
        title: feature.title.clone(),
        description: feature.description.clone(),
        scenario_count,
        not_implemented_count,
        status: status_of(feature, scenario_count, not_implemented_count),
    }
}

fn status_of(feature: &FeatureDocument, total: usize, not_implemented: usize) -> ImplementationStatus {
    if feature.is_tagged(NOT_IMPLEMENTED_TAG) || (total > 0 && not_implemented == total) {
        ImplementationStatus::NotImplemented
    } else if not_implemented > 0 {
        ImplementationStatus::Partial
    } else {
        ImplementationStatus::Implemented
    }
}

pub fn build_detail(feature: &FeatureDocument) -> FeatureDetailView {
    let scenario_count = feature.scenarios.len();
    let not_implemented_count = feature.not_implemented_scenarios();
    FeatureDetailView {
        slug: feature.slug.clone(),
        title: feature.title.clone(),
        description: feature.description.clone(),
        source_path: feature.source_path.display().to_string(),
        badges: badges(feature.tags.iter()),
        status: status_of(feature, scenario_count, not_implemented_count),
        scenario_count,
        not_implemented_count,
        scenarios: feature
            .scenarios
            .iter()
            .map(|sc| scenario_view(feature, sc))
            .collect(),
    }
}

fn scenario_view(feature: &FeatureDocument, scenario: &Scenario) -> ScenarioView {
    // Feature tags already show on the page header
    let own = scenario.tags.iter().filter(|t| !feature.tags.contains(*t));
    ScenarioView {
        name: scenario.name.clone(),
        rule: scenario.rule.clone(),
        outline: scenario.outline,
        not_implemented: scenario.is_not_implemented(),
        badges: badges(own),
        steps: step_views(scenario),
    }
}

fn step_views(scenario: &Scenario) -> Vec<StepView> {
    let mut current = StepCategory::Neutral;
    scenario
        .steps
        .iter()
        .map(|step| {
            let category = match step.keyword {
                StepKeyword::Given => StepCategory::Context,
                StepKeyword::When => StepCategory::Action,
                StepKeyword::Then => StepCategory::Outcome,
                StepKeyword::And | StepKeyword::But => current,
            };
            current = category;
            StepView {
                keyword: step.keyword,
                text: step.text.clone(),
                category,
                conjunction: step.keyword.is_conjunction(),
                background: step.background,
                table: step.table.clone(),
                docstring: step.docstring.clone(),
            }
        })
        .collect()
}

fn badges<'a>(tags: impl Iterator<Item = &'a String>) -> Vec<TagBadge> {
    tags.map(|t| TagBadge {
        label: t.clone(),
        kind: BadgeKind::for_tag(t),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Step;
    use std::collections::BTreeSet;
    use std::path::PathBuf;

    fn tags(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    fn step(keyword: StepKeyword, text: &str) -> Step {
        Step {
            keyword,
            text: text.to_string(),
            table: None,
            docstring: None,
            background: false,
        }
    }

    fn scenario(name: &str, tag_list: &[&str], steps: Vec<Step>) -> Scenario {
        Scenario {
            name: name.to_string(),
            steps,
            tags: tags(tag_list),
            rule: None,
            outline: false,
            line: 1,
        }
    }

    fn feature(slug: &str, tag_list: &[&str], scenarios: Vec<Scenario>) -> FeatureDocument {
        FeatureDocument {
            slug: slug.to_string(),
            title: slug.to_uppercase(),
            description: None,
            tags: tags(tag_list),
            scenarios,
            source_path: PathBuf::from(format!("{slug}.feature")),
        }
    }

    fn simple(name: &str, tag_list: &[&str]) -> Scenario {
        scenario(name, tag_list, vec![step(StepKeyword::Given, "x")])
    }

    #[test]
    fn index_counts_at_scenario_granularity() {
        let features = vec![
            feature("a", &[], vec![simple("1", &[]), simple("2", &[NOT_IMPLEMENTED_TAG])]),
            feature("b", &[], vec![simple("3", &[])]),
        ];
        let index = build_index(&features);
        assert_eq!(index.total_count, 2);
        assert_eq!(index.scenario_count, 3);
        assert_eq!(index.not_implemented_count, 1);
        assert_eq!(index.implemented_count, 2);
        assert_eq!(index.features[0].status, ImplementationStatus::Partial);
        assert_eq!(index.features[1].status, ImplementationStatus::Implemented);
    }

    #[test]
    fn index_counts_match_fold_over_tags() {
        let features = vec![
            feature("a", &["ui"], vec![simple("1", &["ui", NOT_IMPLEMENTED_TAG])]),
            feature("b", &[], vec![simple("2", &[NOT_IMPLEMENTED_TAG]), simple("3", &[NOT_IMPLEMENTED_TAG])]),
            feature("c", &[], vec![]),
        ];
        let index = build_index(&features);
        let tagged = features
            .iter()
            .flat_map(|f| &f.scenarios)
            .filter(|s| s.tags.contains(NOT_IMPLEMENTED_TAG))
            .count();
        assert_eq!(index.total_count, features.len());
        assert_eq!(index.not_implemented_count, tagged);
        assert_eq!(index.features[1].status, ImplementationStatus::NotImplemented);
        assert_eq!(index.features[2].scenario_count, 0);
        assert_eq!(index.features[2].status, ImplementationStatus::Implemented);
    }

    #[test]
    fn feature_level_tag_marks_card() {
        let f = feature("a", &[NOT_IMPLEMENTED_TAG], vec![simple("1", &[NOT_IMPLEMENTED_TAG])]);
        let index = build_index(&[f]);
        assert_eq!(index.features[0].status, ImplementationStatus::NotImplemented);
        assert_eq!(index.not_implemented_count, 1);
    }

    #[test]
    fn empty_index() {
        let index = build_index(&[]);
        assert_eq!(index.total_count, 0);
        assert_eq!(index.implemented_count, 0);
        assert!(index.features.is_empty());
    }

    #[test]
    fn conjunctions_inherit_category() {
        let sc = scenario(
            "s",
            &[],
            vec![
                step(StepKeyword::And, "leading"),
                step(StepKeyword::Given, "a"),
                step(StepKeyword::And, "b"),
                step(StepKeyword::When, "c"),
                step(StepKeyword::Then, "d"),
                step(StepKeyword::But, "e"),
            ],
        );
        let detail = build_detail(&feature("f", &[], vec![sc]));
        let cats: Vec<_> = detail.scenarios[0].steps.iter().map(|s| s.category).collect();
        assert_eq!(
            cats,
            [
                StepCategory::Neutral,
                StepCategory::Context,
                StepCategory::Context,
                StepCategory::Action,
                StepCategory::Outcome,
                StepCategory::Outcome,
            ]
        );
        assert!(detail.scenarios[0].steps[2].conjunction);
        assert!(!detail.scenarios[0].steps[3].conjunction);
    }

    #[test]
    fn detail_marks_exactly_one_not_implemented() {
        let f = feature("f", &[], vec![simple("done", &[]), simple("todo", &[NOT_IMPLEMENTED_TAG, "api"])]);
        let detail = build_detail(&f);
        let flagged: Vec<_> = detail.scenarios.iter().filter(|s| s.not_implemented).collect();
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].name, "todo");
        assert_eq!(
            flagged[0].badges,
            vec![
                TagBadge { label: "api".to_string(), kind: BadgeKind::Generic },
                TagBadge { label: NOT_IMPLEMENTED_TAG.to_string(), kind: BadgeKind::NotImplemented },
            ]
        );
        assert_eq!(detail.status, ImplementationStatus::Partial);
    }

    #[test]
    fn scenario_badges_omit_feature_tags() {
        let f = feature("f", &["ui"], vec![simple("s", &["ui", "slow"])]);
        let detail = build_detail(&f);
        assert_eq!(detail.badges.len(), 1);
        let labels: Vec<_> = detail.scenarios[0].badges.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, ["slow"]);
    }

    #[test]
    fn view_serializes_with_kebab_case_enums() {
        let f = feature("f", &[], vec![simple("s", &[NOT_IMPLEMENTED_TAG])]);
        let json = serde_json::to_value(build_detail(&f)).unwrap();
        assert_eq!(json["status"], "not-implemented");
        assert_eq!(json["scenarios"][0]["steps"][0]["category"], "context");
        assert_eq!(json["scenarios"][0]["badges"][0]["kind"], "not-implemented");
    }
}
