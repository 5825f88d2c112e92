use super::error::FilterError;
use std::fmt;
use std::str::FromStr;

/// Keywords controlling paging, sorting and result presentation rather than
/// what is searched for
pub const EXTRA_KEYWORDS: &[&str] = &[
    "apply_overrides",
    "autofp",
    "delta_states",
    "first",
    "levels",
    "min_qod",
    "notes",
    "overrides",
    "result_hosts_only",
    "rows",
    "sort",
    "sort-reverse",
    "timezone",
];

/// Keywords whose values are coerced to numbers
pub const NUMERIC_KEYWORDS: &[&str] = &[
    "apply_overrides",
    "autofp",
    "cvss_base",
    "first",
    "min_qod",
    "notes",
    "overrides",
    "qod",
    "result_hosts_only",
    "rows",
    "severity",
];

pub const DEFAULT_ROWS: i64 = 10;

/// `rows` value meaning "no limit"
pub const UNLIMITED_ROWS: i64 = -1;

pub fn is_extra_keyword(keyword: Option<&str>) -> bool {
    keyword.is_some_and(|k| EXTRA_KEYWORDS.contains(&k))
}

pub fn is_numeric_keyword(keyword: &str) -> bool {
    NUMERIC_KEYWORDS.contains(&keyword)
}

/// Sort direction, stored as the keyword of the sort term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// The keyword carrying the sort field for this direction
    pub fn keyword(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "sort",
            SortOrder::Descending => "sort-reverse",
        }
    }

    /// The keyword that has to be removed when this direction is set
    pub fn opposite(&self) -> SortOrder {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<SortOrder> {
        match keyword {
            "sort" => Some(SortOrder::Ascending),
            "sort-reverse" => Some(SortOrder::Descending),
            _ => None,
        }
    }
}

impl FromStr for SortOrder {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sort" | "asc" | "ascending" => Ok(SortOrder::Ascending),
            "sort-reverse" | "desc" | "descending" => Ok(SortOrder::Descending),
            _ => Err(FilterError::InvalidSortOrder(s.to_string())),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
