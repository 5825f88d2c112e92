use super::error::FilterError;
use super::model::Filter;
use serde::Deserialize;

/// A saved filter as the server describes it
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FilterRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub comment: Option<String>,
    #[serde(rename = "type")]
    pub filter_type: Option<String>,
    pub term: Option<String>,
    pub in_use: bool,
    pub writable: bool,
}

impl FilterRecord {
    /// Parse a record from JSON (JSON5 syntax is accepted)
    pub fn parse(raw: &str) -> Result<Self, FilterError> {
        Ok(json5::from_str::<FilterRecord>(raw)?)
    }
}

impl Filter {
    /// Build a filter from a saved record, keeping its identity
    pub fn from_record(record: &FilterRecord) -> Filter {
        let mut filter = Filter::from_optional_string(record.term.as_deref());
        if let Some(term) = &record.term {
            filter = filter.with_raw_term_string(term.clone());
        }
        if let Some(id) = record.id.as_deref().filter(|id| !id.is_empty()) {
            filter = filter.with_id(id);
        }
        if let Some(filter_type) = &record.filter_type {
            filter = filter.with_filter_type(filter_type.clone());
        }
        if let Some(name) = &record.name {
            filter = filter.with_name(name.clone());
        }
        if let Some(comment) = &record.comment {
            filter = filter.with_comment(comment.clone());
        }
        tracing::debug!(
            id = record.id.as_deref().unwrap_or(""),
            terms = filter.len(),
            "loaded saved filter"
        );
        filter
    }
}
