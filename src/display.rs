use crate::filter::{Filter, FilterTerm, is_extra_keyword};
use colored::Colorize;
use comfy_table::Table;
use serde_json::json;
use similar::{ChangeTag, TextDiff};
use std::fmt::Write;

fn term_kind(term: &FilterTerm) -> &'static str {
    if term.is_connector() {
        "connector"
    } else if is_extra_keyword(term.keyword()) {
        "extra"
    } else {
        "criteria"
    }
}

/// Render a filter and its terms as a table
pub fn format_filter_text(filter: &Filter) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", filter.to_filter_string().bold());
    if let Some(id) = filter.id() {
        let _ = writeln!(out, "id: {id}");
    }
    if let Some(name) = filter.name() {
        let _ = writeln!(out, "name: {name}");
    }
    if let Some(filter_type) = filter.filter_type() {
        let _ = writeln!(out, "type: {filter_type}");
    }

    if filter.is_empty() {
        let _ = writeln!(out, "{}", "(no terms)".dimmed());
        return out;
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Keyword", "Relation", "Value", "Kind"]);
    for (idx, term) in filter.iter().enumerate() {
        table.add_row(vec![
            (idx + 1).to_string(),
            term.keyword().unwrap_or("").to_string(),
            term.relation().map(|r| r.to_string()).unwrap_or_default(),
            term.value().to_string(),
            term_kind(term).to_string(),
        ]);
    }
    let _ = writeln!(out, "{table}");
    out
}

pub fn format_filter_json(filter: &Filter) -> serde_json::Value {
    json!({
        "filter": filter.to_filter_string(),
        "criteria": filter.to_filter_criteria_string(),
        "extra": filter.to_filter_extra_string(),
        "sort_order": filter.get_sort_order().keyword(),
        "sort_by": filter.get_sort_by(),
        "details": filter,
    })
}

/// Term-by-term diff of two filters, one term per line
pub fn format_term_diff(first: &Filter, second: &Filter) -> String {
    let left = terms_as_lines(first);
    let right = terms_as_lines(second);
    let diff = TextDiff::from_lines(left.as_str(), right.as_str());
    let mut out = String::new();

    for change in diff.iter_all_changes() {
        let line = change.to_string();
        let _ = match change.tag() {
            ChangeTag::Delete => write!(out, "{}", format!("- {line}").red()),
            ChangeTag::Insert => write!(out, "{}", format!("+ {line}").green()),
            ChangeTag::Equal => write!(out, "  {line}"),
        };
    }
    out
}

fn terms_as_lines(filter: &Filter) -> String {
    filter.iter().map(|t| format!("{t}\n")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_lists_every_term() {
        colored::control::set_override(false);
        let filter = Filter::from_string("name=foo and rows=10");
        let text = format_filter_text(&filter);
        assert!(text.starts_with("name=foo and rows=10"));
        assert!(text.contains("criteria"));
        assert!(text.contains("connector"));
        assert!(text.contains("extra"));
    }

    #[test]
    fn test_json_splits_criteria_and_extra() {
        let filter = Filter::from_string("name=foo rows=10");
        let value = format_filter_json(&filter);
        assert_eq!(value["criteria"], "name=foo");
        assert_eq!(value["extra"], "rows=10");
        assert_eq!(value["details"]["terms"][1]["value"], 10.0);
    }

    #[test]
    fn test_diff_marks_changed_terms() {
        colored::control::set_override(false);
        let diff = format_term_diff(
            &Filter::from_string("name=foo rows=10"),
            &Filter::from_string("name=foo rows=20"),
        );
        assert!(diff.contains("  name=foo"));
        assert!(diff.contains("- rows=10"));
        assert!(diff.contains("+ rows=20"));
    }
}
