//! HTML renderer — standalone pages with embedded styling.

use crate::model::DataTable;
use crate::render::{pluralize, scenario_summary, Renderer};
use crate::view::*;

pub struct HtmlRenderer;

const STYLE: &str = "\
body { font-family: system-ui, sans-serif; max-width: 52em; margin: 2em auto; padding: 0 1em; }
a { color: #0b5cad; }
.summary { color: #555; }
.card { border: 1px solid #ddd; border-radius: 6px; padding: 0.75em 1em; margin: 0.75em 0; }
.card.not-implemented, .scenario.not-implemented { opacity: 0.55; }
.status { font-size: 0.8em; text-transform: uppercase; letter-spacing: 0.05em; }
.status-implemented { color: #2e7d32; }
.status-partial { color: #b26a00; }
.status-not-implemented { color: #777; }
.badge { display: inline-block; font-size: 0.75em; padding: 0.1em 0.45em; border-radius: 3px; margin-right: 0.35em; background: #e8eef6; color: #23415f; }
.badge-not-implemented { background: #eee; color: #777; text-decoration: line-through; }
.scenario { border-left: 3px solid #ddd; padding-left: 1em; margin: 1.5em 0; }
ol.steps { list-style: none; padding-left: 0; }
.step { margin: 0.2em 0; }
.step .keyword { font-weight: bold; display: inline-block; min-width: 3.5em; }
.step.conjunction .keyword { padding-left: 1em; font-weight: normal; }
.step.background { color: #888; }
.step-context .keyword { color: #1565c0; }
.step-action .keyword { color: #6a1b9a; }
.step-outcome .keyword { color: #2e7d32; }
.step-neutral .keyword { color: #555; }
table { border-collapse: collapse; margin: 0.4em 0 0.4em 4.5em; }
td, th { border: 1px solid #ccc; padding: 0.15em 0.5em; }
pre { background: #f4f4f4; padding: 0.75em; border-radius: 5px; margin-left: 4.5em; overflow-x: auto; }
";

impl Renderer for HtmlRenderer {
    fn render_index(&self, index: &FeatureIndexView, title: &str) -> String {
        let mut out = page_head(title);

        out.push_str(&format!("<h1>{}</h1>\n", html_escape(title)));
        out.push_str(&format!(
            "<p class=\"summary\">{} &middot; {} &middot; {} implemented, {} not implemented</p>\n",
            pluralize(index.total_count, "feature"),
            pluralize(index.scenario_count, "scenario"),
            index.implemented_count,
            index.not_implemented_count
        ));

        if index.features.is_empty() {
            out.push_str("<p><em>No features documented yet.</em></p>\n");
        }

        for card in &index.features {
            let class = if card.status == ImplementationStatus::NotImplemented {
                "card not-implemented"
            } else {
                "card"
            };
            out.push_str(&format!("<div class=\"{}\">\n", class));
            out.push_str(&format!(
                "  <h2><a href=\"./{}/\">{}</a></h2>\n",
                html_escape(&card.slug),
                html_escape(&card.title)
            ));
            out.push_str(&format!("  {}\n", status_span(card.status)));
            if let Some(ref desc) = card.description {
                out.push_str(&format!("  <p>{}</p>\n", html_escape(desc)));
            }
            out.push_str(&format!(
                "  <p class=\"summary\">{}</p>\n",
                scenario_summary(card.scenario_count, card.not_implemented_count)
            ));
            out.push_str("</div>\n");
        }

        out.push_str("</body>\n</html>\n");
        out
    }

    fn render_detail(&self, detail: &FeatureDetailView) -> String {
        let mut out = page_head(&detail.title);

        out.push_str("<p><a href=\"../\">&larr; All features</a></p>\n");
        out.push_str(&format!("<h1>{}</h1>\n", html_escape(&detail.title)));
        out.push_str(&format!("<p>{}", status_span(detail.status)));
        for badge in &detail.badges {
            out.push(' ');
            out.push_str(&badge_span(badge));
        }
        out.push_str("</p>\n");

        if let Some(ref desc) = detail.description {
            for para in desc.split("\n\n") {
                out.push_str(&format!("<p>{}</p>\n", html_escape(para)));
            }
        }
        out.push_str(&format!(
            "<p class=\"summary\">{} &middot; <code>{}</code></p>\n",
            scenario_summary(detail.scenario_count, detail.not_implemented_count),
            html_escape(&detail.source_path)
        ));

        for scenario in &detail.scenarios {
            out.push_str(&render_scenario_html(scenario));
        }

        out.push_str("</body>\n</html>\n");
        out
    }

    fn file_extension(&self) -> &str {
        "html"
    }
}

fn page_head(title: &str) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", html_escape(title)));
    out.push_str("<style>\n");
    out.push_str(STYLE);
    out.push_str("</style>\n");
    out.push_str("</head>\n<body>\n");
    out
}

fn render_scenario_html(scenario: &ScenarioView) -> String {
    let mut out = String::new();
    let class = if scenario.not_implemented {
        "scenario not-implemented"
    } else {
        "scenario"
    };
    out.push_str(&format!("<section class=\"{}\">\n", class));

    if let Some(ref rule) = scenario.rule {
        out.push_str(&format!("<p class=\"summary\">Rule: {}</p>\n", html_escape(rule)));
    }
    let prefix = if scenario.outline { "Scenario Outline: " } else { "" };
    out.push_str(&format!("<h3>{}{}</h3>\n", prefix, html_escape(&scenario.name)));

    if !scenario.badges.is_empty() {
        out.push_str("<p>");
        let spans: Vec<String> = scenario.badges.iter().map(badge_span).collect();
        out.push_str(&spans.join(" "));
        out.push_str("</p>\n");
    }

    out.push_str("<ol class=\"steps\">\n");
    for step in &scenario.steps {
        let mut classes = vec!["step".to_string(), format!("step-{}", step.category.as_str())];
        if step.conjunction {
            classes.push("conjunction".to_string());
        }
        if step.background {
            classes.push("background".to_string());
        }
        out.push_str(&format!(
            "  <li class=\"{}\"><span class=\"keyword\">{}</span> {}",
            classes.join(" "),
            step.keyword,
            html_escape(&step.text)
        ));
        if let Some(ref table) = step.table {
            out.push('\n');
            out.push_str(&render_table_html(table));
        }
        if let Some(ref doc) = step.docstring {
            out.push_str(&format!("\n<pre>{}</pre>", html_escape(doc)));
        }
        out.push_str("</li>\n");
    }
    out.push_str("</ol>\n</section>\n");
    out
}

fn render_table_html(table: &DataTable) -> String {
    let mut out = String::from("<table>\n");
    for (i, row) in table.rows.iter().enumerate() {
        let cell = if i == 0 { "th" } else { "td" };
        out.push_str("  <tr>");
        for value in row {
            out.push_str(&format!("<{0}>{1}</{0}>", cell, html_escape(value)));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</table>");
    out
}

fn status_span(status: ImplementationStatus) -> String {
    let (class, label) = match status {
        ImplementationStatus::Implemented => ("status-implemented", "Implemented"),
        ImplementationStatus::Partial => ("status-partial", "Partially implemented"),
        ImplementationStatus::NotImplemented => ("status-not-implemented", "Not implemented"),
    };
    format!("<span class=\"status {}\">{}</span>", class, label)
}

fn badge_span(badge: &TagBadge) -> String {
    format!(
        "<span class=\"badge badge-{}\">@{}</span>",
        badge.kind.as_str(),
        html_escape(&badge.label)
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
