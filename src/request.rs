use crate::filter::Filter;

/// How a filter is sent to the server: by saved filter id, or inline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterParam {
    FilterId(String),
    Filter(String),
}

impl FilterParam {
    /// A filter with a non-empty `id` is sent by reference, any other inline
    pub fn from_filter(filter: &Filter) -> Self {
        match filter.id().filter(|id| !id.is_empty()) {
            Some(id) => FilterParam::FilterId(id.to_string()),
            None => FilterParam::Filter(filter.to_filter_string()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FilterParam::FilterId(_) => "filter_id",
            FilterParam::Filter(_) => "filter",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            FilterParam::FilterId(v) | FilterParam::Filter(v) => v,
        }
    }

    pub fn query_pair(&self) -> (&'static str, &str) {
        (self.name(), self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saved_filter_is_sent_by_id() {
        let filter = Filter::from_string("name=foo").with_id("f1");
        assert_eq!(
            FilterParam::from_filter(&filter).query_pair(),
            ("filter_id", "f1")
        );
    }

    #[test]
    fn test_modified_filter_is_sent_inline() {
        let mut filter = Filter::from_string("name=foo").with_id("f1");
        filter.set("rows", 10);
        assert_eq!(
            FilterParam::from_filter(&filter),
            FilterParam::Filter("name=foo rows=10".to_string())
        );
    }
}
