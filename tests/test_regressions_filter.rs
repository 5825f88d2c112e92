use scan_filter::filter::{Filter, Value};

#[test]
fn test_equals_requires_same_term_count() {
    let a = Filter::from_string("name=foo");
    let b = Filter::from_string("name=foo rows=10");
    assert!(!a.equals(&b), "extra terms make filters different");
    assert!(!b.equals(&a));
}

#[test]
fn test_equals_compares_repeated_keyword_groups() {
    let a = Filter::from_string("tag=a tag=b name=x");
    let b = Filter::from_string("tag=b name=x tag=a");
    assert!(a.equals(&b), "order inside a keyword group is irrelevant");

    let c = Filter::from_string("tag=a name=x name=y");
    assert!(!a.equals(&c), "group sizes must match");
}

#[test]
fn test_numeric_values_compare_by_value() {
    let a = Filter::from_string("rows=10");
    let mut b = Filter::new();
    b.set("rows", 10);
    assert!(a.equals(&b));
}

#[test]
fn test_unlimited_rows_do_not_page() {
    let filter = Filter::from_string("first=1 rows=-1");
    assert_eq!(filter.next().get("first"), Some(&Value::Num(1.0)));
    assert_eq!(filter.previous().get("first"), Some(&Value::Num(1.0)));
}

#[test]
fn test_delete_removes_only_first_occurrence() {
    let mut filter = Filter::from_string("tag=a tag=b");
    filter.delete("tag");
    assert_eq!(filter.to_filter_string(), "tag=b");
}

#[test]
fn test_unparsable_numeric_value_is_kept() {
    let filter = Filter::from_string("rows=all");
    assert_eq!(filter.get("rows"), Some(&Value::Str("all".to_string())));
    assert_eq!(filter.rows_or_default(), 10);
}

#[test]
fn test_unbalanced_quote_does_not_swallow_terms() {
    let filter = Filter::from_string("name=\"my host rows=10");
    assert_eq!(filter.len(), 3);
}
