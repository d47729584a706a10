//! GitHub-flavored markdown renderer.

use crate::model::DataTable;
use crate::render::{pluralize, scenario_summary, Renderer};
use crate::view::*;

pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn render_index(&self, index: &FeatureIndexView, title: &str) -> String {
        let mut lines: Vec<String> = Vec::new();

        lines.push(format!("# {}\n", md_escape(title)));
        lines.push(format!(
            "{} · {} · {} implemented, {} not implemented\n",
            pluralize(index.total_count, "feature"),
            pluralize(index.scenario_count, "scenario"),
            index.implemented_count,
            index.not_implemented_count
        ));

        if index.features.is_empty() {
            lines.push("_No features documented yet._\n".to_string());
        }

        for card in &index.features {
            lines.push(format!(
                "## [{}](./{}/index.md)\n",
                md_escape(&card.title),
                card.slug
            ));
            lines.push(format!("{}\n", status_label(card.status)));
            if let Some(ref desc) = card.description {
                lines.push(desc.clone());
                lines.push(String::new());
            }
            lines.push(format!(
                "{}\n",
                scenario_summary(card.scenario_count, card.not_implemented_count)
            ));
        }

        lines.join("\n")
    }

    fn render_detail(&self, detail: &FeatureDetailView) -> String {
        let mut lines: Vec<String> = Vec::new();

        lines.push("[← All features](../index.md)\n".to_string());
        lines.push(format!("# {}\n", md_escape(&detail.title)));

        let mut header = status_label(detail.status).to_string();
        for badge in &detail.badges {
            header.push(' ');
            header.push_str(&render_badge(badge));
        }
        lines.push(format!("{}\n", header));

        if let Some(ref desc) = detail.description {
            lines.push(desc.clone());
            lines.push(String::new());
        }
        lines.push(format!(
            "{} · {}\n",
            scenario_summary(detail.scenario_count, detail.not_implemented_count),
            code_span(&detail.source_path)
        ));

        for scenario in &detail.scenarios {
            lines.push(render_scenario(scenario));
        }

        lines.join("\n")
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

fn render_scenario(scenario: &ScenarioView) -> String {
    let mut lines: Vec<String> = Vec::new();

    let prefix = if scenario.outline { "Scenario Outline: " } else { "" };
    let name = format!("{}{}", prefix, md_escape(&scenario.name));
    // Not-implemented scenarios are struck through rather than hidden
    if scenario.not_implemented {
        lines.push(format!("### ~~{}~~\n", name));
    } else {
        lines.push(format!("### {}\n", name));
    }

    if let Some(ref rule) = scenario.rule {
        lines.push(format!("_Rule: {}_\n", md_escape(rule)));
    }

    if !scenario.badges.is_empty() {
        let badges: Vec<String> = scenario.badges.iter().map(render_badge).collect();
        lines.push(format!("{}\n", badges.join(" ")));
    }

    for step in &scenario.steps {
        let indent = if step.conjunction { "  " } else { "" };
        let text = if step.background {
            format!("_{}_", md_escape(&step.text))
        } else {
            md_escape(&step.text)
        };
        lines.push(format!("- {}**{}** {}", indent, step.keyword, text));
        if let Some(ref table) = step.table {
            lines.push(String::new());
            lines.push(render_table(table));
        }
        if let Some(ref doc) = step.docstring {
            lines.push(String::new());
            lines.push("  ```".to_string());
            for line in doc.lines() {
                lines.push(format!("  {}", line));
            }
            lines.push("  ```".to_string());
        }
    }
    lines.push(String::new());

    lines.join("\n")
}

fn render_table(table: &DataTable) -> String {
    let mut lines: Vec<String> = Vec::new();
    for (i, row) in table.rows.iter().enumerate() {
        let cells: Vec<String> = row.iter().map(|c| c.replace('|', "\\|")).collect();
        lines.push(format!("  | {} |", cells.join(" | ")));
        if i == 0 {
            lines.push(format!("  |{}", " --- |".repeat(row.len())));
        }
    }
    lines.push(String::new());
    lines.join("\n")
}

fn status_label(status: ImplementationStatus) -> &'static str {
    match status {
        ImplementationStatus::Implemented => "**Status:** implemented",
        ImplementationStatus::Partial => "**Status:** partially implemented",
        ImplementationStatus::NotImplemented => "**Status:** _not implemented_",
    }
}

fn render_badge(badge: &TagBadge) -> String {
    match badge.kind {
        BadgeKind::NotImplemented => format!("~~{}~~", code_span(&format!("@{}", badge.label))),
        BadgeKind::Generic => code_span(&format!("@{}", badge.label)),
    }
}

/// Wrap `s` in a code span whose fence is longer than any backtick run inside it.
fn code_span(s: &str) -> String {
    let longest = s
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest + 1);
    // A content edge touching the fence needs a space, which the span strips again
    if s.starts_with('`') || s.ends_with('`') {
        format!("{fence} {s} {fence}")
    } else {
        format!("{fence}{s}{fence}")
    }
}

/// Escape characters that would otherwise start inline markup.
fn md_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '*' | '_' | '`' | '[' | ']' | '<' | '>') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StepKeyword;

    fn scenario(not_implemented: bool) -> ScenarioView {
        ScenarioView {
            name: "Pay by card".to_string(),
            rule: None,
            outline: false,
            not_implemented,
            badges: vec![],
            steps: vec![
                StepView {
                    keyword: StepKeyword::Given,
                    text: "a cart with <3> items".to_string(),
                    category: StepCategory::Context,
                    conjunction: false,
                    background: false,
                    table: Some(DataTable {
                        rows: vec![
                            vec!["sku".to_string(), "qty".to_string()],
                            vec!["A|1".to_string(), "2".to_string()],
                        ],
                    }),
                    docstring: None,
                },
                StepView {
                    keyword: StepKeyword::And,
                    text: "a saved card".to_string(),
                    category: StepCategory::Context,
                    conjunction: true,
                    background: false,
                    table: None,
                    docstring: None,
                },
            ],
        }
    }

    #[test]
    fn scenario_steps_and_table() {
        let md = render_scenario(&scenario(false));
        assert!(md.starts_with("### Pay by card\n"));
        assert!(md.contains("- **Given** a cart with \\<3\\> items"));
        assert!(md.contains("-   **And** a saved card"));
        assert!(md.contains("  | sku | qty |\n  | --- | --- |\n  | A\\|1 | 2 |"));
    }

    #[test]
    fn not_implemented_scenario_is_struck() {
        let md = render_scenario(&scenario(true));
        assert!(md.starts_with("### ~~Pay by card~~\n"));
    }

    #[test]
    fn index_links_to_detail_pages() {
        let index = FeatureIndexView {
            total_count: 1,
            scenario_count: 2,
            implemented_count: 1,
            not_implemented_count: 1,
            features: vec![FeatureCard {
                slug: "checkout".to_string(),
                title: "Checkout".to_string(),
                description: None,
                scenario_count: 2,
                not_implemented_count: 1,
                status: ImplementationStatus::Partial,
            }],
        };
        let md = MarkdownRenderer.render_index(&index, "Features");
        assert!(md.starts_with("# Features\n"));
        assert!(md.contains("## [Checkout](./checkout/index.md)"));
        assert!(md.contains("2 scenarios, 1 not implemented"));
        assert!(md.contains("partially implemented"));
    }

    #[test]
    fn badges() {
        let known = TagBadge { label: "not-implemented".to_string(), kind: BadgeKind::NotImplemented };
        let other = TagBadge { label: "api".to_string(), kind: BadgeKind::Generic };
        assert_eq!(render_badge(&known), "~~`@not-implemented`~~");
        assert_eq!(render_badge(&other), "`@api`");
    }

    #[test]
    fn escape_inline_markup() {
        assert_eq!(md_escape("a_b *c*"), "a\\_b \\*c\\*");
    }

    #[test]
    fn index_title_is_escaped() {
        let index = FeatureIndexView {
            total_count: 0,
            scenario_count: 0,
            implemented_count: 0,
            not_implemented_count: 0,
            features: vec![],
        };
        let md = MarkdownRenderer.render_index(&index, "*My* [docs]");
        assert!(md.starts_with("# \\*My\\* \\[docs\\]\n"));
    }

    #[test]
    fn code_span_fence_outgrows_backticks() {
        assert_eq!(code_span("features/a.feature"), "`features/a.feature`");
        assert_eq!(code_span("odd`name.feature"), "``odd`name.feature``");
        assert_eq!(code_span("a``b"), "```a``b```");
        assert_eq!(code_span("`edge.feature"), "`` `edge.feature ``");
    }

    #[test]
    fn detail_source_path_with_backtick_stays_in_one_span() {
        let detail = FeatureDetailView {
            slug: "odd-name".to_string(),
            title: "Odd".to_string(),
            description: None,
            source_path: "features/odd`name.feature".to_string(),
            badges: vec![],
            status: ImplementationStatus::Implemented,
            scenario_count: 1,
            not_implemented_count: 0,
            scenarios: vec![scenario(false)],
        };
        let md = MarkdownRenderer.render_detail(&detail);
        assert!(md.contains("1 scenario · ``features/odd`name.feature``\n"));
    }
}
