use super::term::FilterTerm;
use regex::Regex;
use std::sync::LazyLock;

// A quoted span ends at the first quote not escaped with a backslash
static QUOTED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""(?:\\.|[^"\\])+""#).expect("valid quoted string regex")
});
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s").expect("valid whitespace regex"));

/// Stands in for whitespace inside quotes while the string is split
const SPACE_PLACEHOLDER: &str = "\u{e000}";

/// Split a filter string into terms, in encounter order
///
/// Spaces inside double quotes do not separate tokens. Empty tokens and
/// tokens starting with `_` (reserved markers) are dropped.
pub fn parse_filter_terms_from_string(filter: Option<&str>) -> Vec<FilterTerm> {
    let Some(filter) = filter else {
        return Vec::new();
    };

    let protected = QUOTED_RE.replace_all(filter, |caps: &regex::Captures| {
        WHITESPACE_RE
            .replace_all(&caps[0], SPACE_PLACEHOLDER)
            .into_owned()
    });

    let mut terms = Vec::new();
    for raw in protected.split(' ') {
        let token = raw.trim().replace(SPACE_PLACEHOLDER, " ");
        if token.is_empty() {
            continue;
        }
        if token.starts_with('_') {
            tracing::debug!(token = %token, "dropping reserved filter token");
            continue;
        }
        terms.push(FilterTerm::from_token(&token));
    }
    terms
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::term::{Relation, Value};

    #[test]
    fn test_missing_or_empty_input() {
        assert!(parse_filter_terms_from_string(None).is_empty());
        assert!(parse_filter_terms_from_string(Some("")).is_empty());
        assert!(parse_filter_terms_from_string(Some("   ")).is_empty());
    }

    #[test]
    fn test_parse_expression() {
        let terms = parse_filter_terms_from_string(Some("name=foo and severity>5 rows=10"));
        assert_eq!(terms.len(), 4);
        assert_eq!(terms[0].keyword(), Some("name"));
        assert!(terms[1].is_connector());
        assert_eq!(terms[2].relation(), Some(Relation::Greater));
        assert_eq!(terms[3].value(), &Value::Num(10.0));
    }

    #[test]
    fn test_quoted_spaces_do_not_split() {
        let terms = parse_filter_terms_from_string(Some("name=\"my  host\" ip=1.2.3.4"));
        assert_eq!(terms.len(), 2);
        assert_eq!(terms[0].value(), &Value::Str("my  host".to_string()));
        assert_eq!(terms[1].value(), &Value::Str("1.2.3.4".to_string()));
    }

    #[test]
    fn test_escaped_quotes_stay_in_one_token() {
        let terms = parse_filter_terms_from_string(Some(r#"name="a \"b c\" d" rows=10"#));
        assert_eq!(terms.len(), 2);
        assert_eq!(terms[0].value(), &Value::Str("a \"b c\" d".to_string()));
        assert_eq!(terms[0].to_string(), r#"name="a \"b c\" d""#);
    }

    #[test]
    fn test_double_spaces_are_ignored() {
        let terms = parse_filter_terms_from_string(Some("  name=foo   rows=5 "));
        assert_eq!(terms.len(), 2);
    }

    #[test]
    fn test_reserved_tokens_are_dropped() {
        let terms = parse_filter_terms_from_string(Some("_internal=x name=foo _marker"));
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].keyword(), Some("name"));
    }
}
