use super::keywords::{DEFAULT_ROWS, SortOrder, UNLIMITED_ROWS, is_extra_keyword};
use super::parser::parse_filter_terms_from_string;
use super::term::{FilterTerm, Relation, Value};
use serde::Serialize;
use std::fmt;

/// An ordered list of filter terms plus the identity of the saved filter it
/// came from, if any
///
/// Every derivation (`copy`, `next`, `previous`, `first`, `all`, `simple`,
/// `merge_extra_keywords`) owns a fresh term vector. Operations that change
/// the term set drop `id`, since the content no longer matches the saved
/// filter.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Filter {
    terms: Vec<FilterTerm>,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw_term_string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a filter string. Malformed or empty input yields an empty filter.
    pub fn from_string(filter: &str) -> Self {
        Self::from_optional_string(Some(filter))
    }

    pub fn from_optional_string(filter: Option<&str>) -> Self {
        Self::from_terms(parse_filter_terms_from_string(filter))
    }

    pub fn from_term(term: FilterTerm) -> Self {
        Self::from_terms([term])
    }

    pub fn from_terms(terms: impl IntoIterator<Item = FilterTerm>) -> Self {
        Filter {
            terms: terms.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_filter_type(mut self, filter_type: impl Into<String>) -> Self {
        self.filter_type = Some(filter_type.into());
        self
    }

    pub fn with_raw_term_string(mut self, raw: impl Into<String>) -> Self {
        self.raw_term_string = Some(raw.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn filter_type(&self) -> Option<&str> {
        self.filter_type.as_deref()
    }

    /// The unparsed term text of a filter loaded from a saved record
    pub fn raw_term_string(&self) -> Option<&str> {
        self.raw_term_string.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FilterTerm> {
        self.terms.iter()
    }

    pub fn get_all_terms(&self) -> &[FilterTerm] {
        &self.terms
    }

    pub fn has(&self, keyword: &str) -> bool {
        self.index_of(keyword).is_some()
    }

    pub fn get_term(&self, keyword: &str) -> Option<&FilterTerm> {
        let keyword = keyword.to_lowercase();
        self.terms.iter().find(|t| t.has_keyword_named(&keyword))
    }

    /// All terms for a keyword, for keywords that may repeat
    pub fn get_terms(&self, keyword: &str) -> Vec<&FilterTerm> {
        let keyword = keyword.to_lowercase();
        self.terms
            .iter()
            .filter(|t| t.has_keyword_named(&keyword))
            .collect()
    }

    /// Value of the first term with this keyword
    pub fn get(&self, keyword: &str) -> Option<&Value> {
        self.get_term(keyword).map(FilterTerm::value)
    }

    pub fn get_or(&self, keyword: &str, default: impl Into<Value>) -> Value {
        self.get(keyword).cloned().unwrap_or_else(|| default.into())
    }

    /// Set `keyword=value`, replacing an existing term for the keyword in place
    pub fn set(&mut self, keyword: &str, value: impl Into<Value>) -> &mut Self {
        self.set_with_relation(keyword, value, Relation::Equal)
    }

    pub fn set_with_relation(
        &mut self,
        keyword: &str,
        value: impl Into<Value>,
        relation: Relation,
    ) -> &mut Self {
        self.set_term(FilterTerm::new(Some(keyword), value, Some(relation)))
    }

    /// Store a term, replacing the first term with the same keyword
    ///
    /// Setting one sort direction removes the other. Keyword-less terms are
    /// appended.
    pub fn set_term(&mut self, term: FilterTerm) -> &mut Self {
        let Some(keyword) = term.keyword().map(str::to_string) else {
            self.add_term(term);
            return self;
        };

        if let Some(order) = SortOrder::from_keyword(&keyword) {
            let opposite = order.opposite().keyword();
            if self.has(opposite) {
                tracing::trace!(removed = opposite, set = %keyword, "sort directions are exclusive");
                self.delete(opposite);
            }
        }

        match self.index_of(&keyword) {
            Some(index) => {
                self.terms[index] = term;
                self.clear_id();
            }
            None => self.add_term(term),
        }
        self
    }

    /// Remove the first term with this keyword
    pub fn delete(&mut self, keyword: &str) -> &mut Self {
        if let Some(index) = self.index_of(keyword) {
            self.terms.remove(index);
            self.clear_id();
        }
        self
    }

    /// A copy of the same saved filter, keeping `id` and type
    pub fn copy(&self) -> Filter {
        self.clone()
    }

    /// Append all terms of `other`
    pub fn merge(&mut self, other: &Filter) -> &mut Self {
        for term in &other.terms {
            self.add_term(term.clone());
        }
        self.clear_id();
        self
    }

    /// Append the keyword terms of `other` whose keyword is not set here yet
    pub fn merge_keywords(&mut self, other: &Filter) -> &mut Self {
        for term in &other.terms {
            let missing = term.keyword().is_some_and(|k| !self.has(k));
            if missing {
                self.add_term(term.clone());
            }
        }
        self.clear_id();
        self
    }

    /// A copy with the paging and sorting terms of `other` that are missing here
    ///
    /// A sort term is skipped when the opposite direction is already set.
    pub fn merge_extra_keywords(&self, other: &Filter) -> Filter {
        let mut filter = self.copy();
        for term in &other.terms {
            let Some(keyword) = term.keyword() else {
                continue;
            };
            if !is_extra_keyword(Some(keyword)) || filter.has(keyword) {
                continue;
            }
            let blocked = SortOrder::from_keyword(keyword)
                .is_some_and(|order| filter.has(order.opposite().keyword()));
            if blocked {
                continue;
            }
            filter.add_term(term.clone());
        }
        filter
    }

    /// Combine with `other`, joining the criteria with an explicit `and`
    pub fn and(&mut self, other: &Filter) -> &mut Self {
        if self.terms.iter().any(|t| !is_extra_keyword(t.keyword())) {
            self.add_term(FilterTerm::connector(Relation::And));
        }
        self.clear_id();
        self.merge(other)
    }

    /// Number of rows per page, 10 when unset
    pub fn rows_or_default(&self) -> i64 {
        self.get("rows")
            .and_then(Value::as_i64)
            .unwrap_or(DEFAULT_ROWS)
    }

    pub fn first_or_default(&self) -> i64 {
        self.get("first").and_then(Value::as_i64).unwrap_or(1)
    }

    /// The following page
    pub fn next(&self) -> Filter {
        let rows = self.rows_or_default();
        let first = self.first_or_default().saturating_add(rows.max(0));
        self.paged(first.max(1), rows)
    }

    /// The preceding page, never before the first row
    pub fn previous(&self) -> Filter {
        let rows = self.rows_or_default();
        let first = self.first_or_default().saturating_sub(rows.max(0));
        self.paged(first.max(1), rows)
    }

    /// The page starting at row `first`
    pub fn first(&self, first: i64) -> Filter {
        let mut filter = self.copy();
        filter.set("first", first);
        filter
    }

    /// All rows on a single page
    pub fn all(&self) -> Filter {
        let mut filter = self.copy();
        filter.set("first", 1).set("rows", UNLIMITED_ROWS);
        filter
    }

    /// The criteria only, without paging and the active sort term
    pub fn simple(&self) -> Filter {
        let mut filter = self.copy();
        let order = filter.get_sort_order();
        filter
            .delete("first")
            .delete("rows")
            .delete(order.keyword());
        filter
    }

    pub fn get_sort_order(&self) -> SortOrder {
        if self.has(SortOrder::Descending.keyword()) {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        }
    }

    /// The field sorted by, in either direction
    pub fn get_sort_by(&self) -> Option<String> {
        self.get(self.get_sort_order().keyword())
            .map(Value::to_string)
    }

    pub fn set_sort_by(&mut self, field: &str) -> &mut Self {
        let order = self.get_sort_order();
        self.set(order.keyword(), field)
    }

    /// Change the sort direction, keeping the sort field (`name` if none is set)
    pub fn set_sort_order(&mut self, order: SortOrder) -> &mut Self {
        let field = self.get_sort_by().unwrap_or_else(|| "name".to_string());
        self.set(order.keyword(), field)
    }

    pub fn to_filter_string(&self) -> String {
        join_terms(self.terms.iter())
    }

    /// Only the search criteria, without paging and sorting
    pub fn to_filter_criteria_string(&self) -> String {
        join_terms(self.terms.iter().filter(|t| !is_extra_keyword(t.keyword())))
    }

    /// Only the paging and sorting terms
    pub fn to_filter_extra_string(&self) -> String {
        join_terms(self.terms.iter().filter(|t| is_extra_keyword(t.keyword())))
    }

    /// Compare term content
    ///
    /// Keyword terms match if `other` has as many terms for that keyword and
    /// one of them is equal, regardless of position. Keyword-less terms must
    /// be equal at the same position.
    pub fn equals(&self, other: &Filter) -> bool {
        if self.len() != other.len() {
            return false;
        }

        self.terms.iter().enumerate().all(|(i, term)| match term.keyword() {
            Some(keyword) => {
                let others = other.get_terms(keyword);
                others.len() == self.get_terms(keyword).len()
                    && others.iter().any(|o| *o == term)
            }
            None => other.terms.get(i) == Some(term),
        })
    }

    fn paged(&self, first: i64, rows: i64) -> Filter {
        let mut filter = self.copy();
        filter.set("first", first).set("rows", rows);
        filter
    }

    /// Keywords are stored lower-cased, so lookups ignore case
    fn index_of(&self, keyword: &str) -> Option<usize> {
        let keyword = keyword.to_lowercase();
        self.terms.iter().position(|t| t.has_keyword_named(&keyword))
    }

    fn add_term(&mut self, term: FilterTerm) {
        self.terms.push(term);
        self.clear_id();
    }

    fn clear_id(&mut self) {
        if let Some(id) = self.id.take() {
            tracing::trace!(id = %id, "filter modified, dropping saved filter id");
        }
    }
}

fn join_terms<'a>(terms: impl Iterator<Item = &'a FilterTerm>) -> String {
    terms
        .map(FilterTerm::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_filter_string())
    }
}

impl From<&str> for Filter {
    fn from(filter: &str) -> Self {
        Filter::from_string(filter)
    }
}

impl<'a> IntoIterator for &'a Filter {
    type Item = &'a FilterTerm;
    type IntoIter = std::slice::Iter<'a, FilterTerm>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_in_place() {
        let mut filter = Filter::from_string("rows=10 name=foo");
        filter.set("rows", "20");
        assert_eq!(filter.to_filter_string(), "rows=20 name=foo");
        assert_eq!(filter.get_terms("rows").len(), 1);
        assert_eq!(filter.get("rows"), Some(&Value::Num(20.0)));
    }

    #[test]
    fn test_sort_directions_are_exclusive() {
        let mut filter = Filter::new();
        filter.set("sort", "name");
        filter.set("sort-reverse", "name");
        assert!(!filter.has("sort"));
        assert!(filter.has("sort-reverse"));

        filter.set("sort", "severity");
        assert!(filter.has("sort"));
        assert!(!filter.has("sort-reverse"));
    }

    #[test]
    fn test_mutations_clear_id() {
        let mut filter = Filter::from_string("name=foo").with_id("f1");
        assert_eq!(filter.copy().id(), Some("f1"));

        filter.delete("missing");
        assert_eq!(filter.id(), Some("f1"));

        filter.delete("name");
        assert_eq!(filter.id(), None);

        let mut filter = Filter::from_string("name=foo").with_id("f1");
        filter.set("rows", 5);
        assert_eq!(filter.id(), None);
    }

    #[test]
    fn test_copy_keeps_identity_and_owns_terms() {
        let original = Filter::from_string("name=foo")
            .with_id("f1")
            .with_filter_type("task");
        let mut copy = original.copy();
        assert_eq!(copy.filter_type(), Some("task"));

        copy.set("name", "bar");
        assert_eq!(original.get("name"), Some(&Value::Str("foo".to_string())));
        assert_eq!(original.id(), Some("f1"));
    }

    #[test]
    fn test_get_or_default() {
        let filter = Filter::from_string("name=foo");
        assert_eq!(filter.get_or("rows", 10), Value::Num(10.0));
        assert_eq!(filter.get_or("name", "x"), Value::Str("foo".to_string()));
    }

    #[test]
    fn test_criteria_and_extra_strings() {
        let filter = Filter::from_string("name=foo first=1 rows=10 and severity>5 sort=name");
        assert_eq!(filter.to_filter_criteria_string(), "name=foo and severity>5");
        assert_eq!(filter.to_filter_extra_string(), "first=1 rows=10 sort=name");
    }

    #[test]
    fn test_and_inserts_connector_only_after_criteria() {
        let mut filter = Filter::from_string("rows=10");
        filter.and(&Filter::from_string("name=foo"));
        assert_eq!(filter.to_filter_string(), "rows=10 name=foo");

        let mut filter = Filter::from_string("name=foo").with_id("f1");
        filter.and(&Filter::from_string("owner=admin"));
        assert_eq!(filter.to_filter_string(), "name=foo and owner=admin");
        assert_eq!(filter.id(), None);
    }

    #[test]
    fn test_paging() {
        let filter = Filter::from_string("first=1 rows=10");
        assert_eq!(filter.next().get("first"), Some(&Value::Num(11.0)));
        assert_eq!(filter.previous().get("first"), Some(&Value::Num(1.0)));
        assert_eq!(filter.next().next().previous().get("first"), Some(&Value::Num(11.0)));

        let unset = Filter::from_string("name=foo");
        assert_eq!(unset.next().to_filter_string(), "name=foo first=11 rows=10");
    }

    #[test]
    fn test_paging_saturates_on_huge_rows() {
        let filter = Filter::from_string("first=1e19 rows=10");
        assert_eq!(filter.next().get("first").and_then(Value::as_i64), Some(i64::MAX));

        let filter = Filter::from_string("first=-1e19 rows=10");
        assert_eq!(filter.previous().get("first"), Some(&Value::Num(1.0)));

        let filter = Filter::from_string("first=1 rows=1e19");
        assert_eq!(filter.previous().get("first"), Some(&Value::Num(1.0)));
    }

    #[test]
    fn test_merges_clear_id_even_when_nothing_is_added() {
        let mut filter = Filter::from_string("rows=10").with_id("f1");
        filter.merge_keywords(&Filter::from_string("rows=20"));
        assert_eq!(filter.id(), None);
        assert_eq!(filter.to_filter_string(), "rows=10");

        let mut filter = Filter::from_string("name=foo").with_id("f1");
        filter.and(&Filter::new());
        assert_eq!(filter.id(), None);

        let mut filter = Filter::from_string("name=foo").with_id("f1");
        filter.merge(&Filter::new());
        assert_eq!(filter.id(), None);
    }

    #[test]
    fn test_lookups_ignore_keyword_case() {
        let mut filter = Filter::new();
        filter.set("ROWS", 5);
        assert!(filter.has("ROWS"));
        assert!(filter.has("rows"));
        assert_eq!(filter.get("Rows"), Some(&Value::Num(5.0)));
        assert_eq!(filter.get_terms("ROWS").len(), 1);

        filter.delete("ROWS");
        assert!(filter.is_empty());
    }

    #[test]
    fn test_simple_drops_paging_and_sort() {
        let filter = Filter::from_string("name=foo first=21 rows=10 sort-reverse=severity");
        assert_eq!(filter.simple().to_filter_string(), "name=foo");
    }

    #[test]
    fn test_sort_accessors() {
        let mut filter = Filter::from_string("sort-reverse=severity");
        assert_eq!(filter.get_sort_order(), SortOrder::Descending);
        assert_eq!(filter.get_sort_by().as_deref(), Some("severity"));

        filter.set_sort_order(SortOrder::Ascending);
        assert_eq!(filter.to_filter_string(), "sort=severity");

        filter.set_sort_by("name");
        assert_eq!(filter.to_filter_string(), "sort=name");

        let mut empty = Filter::new();
        assert_eq!(empty.get_sort_order(), SortOrder::Ascending);
        assert_eq!(empty.get_sort_by(), None);
        empty.set_sort_order(SortOrder::Descending);
        assert_eq!(empty.to_filter_string(), "sort-reverse=name");
    }

    #[test]
    fn test_equals_tolerates_keyword_reordering() {
        let a = Filter::from_string("name=foo rows=10");
        let b = Filter::from_string("rows=10 name=foo");
        assert!(a.equals(&b));
        assert!(!a.equals(&Filter::from_string("rows=10 name=bar")));
        assert!(!a.equals(&Filter::from_string("rows=10")));
    }

    #[test]
    fn test_equals_connectors_are_positional() {
        let a = Filter::from_string("name=foo and owner=admin");
        let b = Filter::from_string("and name=foo owner=admin");
        assert!(!a.equals(&b));
        assert!(a.equals(&Filter::from_string("name=foo and owner=admin")));
    }
}
