use scan_filter::FilterParam;
use scan_filter::filter::{EntityType, Filter, canonical_filter};

#[test]
fn test_exactly_one_parameter_is_sent() {
    let saved = Filter::from_string("severity>5").with_id("abc");
    assert_eq!(
        FilterParam::from_filter(&saved),
        FilterParam::FilterId("abc".to_string())
    );

    let inline = Filter::from_string("severity>5");
    assert_eq!(
        FilterParam::from_filter(&inline).query_pair(),
        ("filter", "severity>5")
    );
}

#[test]
fn test_empty_id_is_sent_inline() {
    let filter = Filter::from_string("name=foo").with_id("");
    assert_eq!(FilterParam::from_filter(&filter).name(), "filter");
}

#[test]
fn test_paged_saved_filter_is_sent_inline() {
    let saved = Filter::from_string("name=foo first=1 rows=10").with_id("abc");
    let param = FilterParam::from_filter(&saved.next());
    assert_eq!(param.query_pair(), ("filter", "name=foo first=11 rows=10"));
}

#[test]
fn test_canonical_filter_param() {
    let param = FilterParam::from_filter(canonical_filter(EntityType::PortList));
    assert_eq!(param.query_pair(), ("filter", "type=port_list"));
}
