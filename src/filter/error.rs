use thiserror::Error;

/// Errors raised at the fallible edges of the filter model
///
/// Parsing a filter string never fails; these cover lookups by name and
/// loading saved filter records.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Unknown entity type: '{0}'")]
    UnknownEntityType(String),

    #[error("Invalid sort order: '{0}'. Valid values are: sort, sort-reverse")]
    InvalidSortOrder(String),

    #[error("Unknown relation: '{0}'. Valid relations are: =, !=, ~, <, >, and, or, not")]
    UnknownRelation(String),

    #[error("Invalid filter record: {0}")]
    InvalidRecord(#[from] json5::Error),
}
