//! Filter strings: parsing, editing and serialization
//!
//! A filter selects, sorts and pages a collection of server-side resources
//! (tasks, targets, results, ...). It is written as a space separated list
//! of terms.
//!
//! # Syntax
//!
//! ```text
//! keyword=value        Equal
//! keyword!=value       Not equal
//! keyword~value        Contains
//! keyword>value        Greater than
//! keyword<value        Less than
//! ~value               Any column contains
//! value                Bare search word
//! and / or / not       Connectors
//! name="my host"       Quoted values may contain spaces
//! _token               Reserved, dropped when parsing
//! ```
//!
//! Paging and sorting use the keywords `first`, `rows`, `sort` and
//! `sort-reverse`. Only one of the two sort keywords is kept at a time.
//!
//! # Examples
//!
//! ```text
//! severity>7 sort-reverse=severity first=1 rows=25
//! name~web and status=Done
//! type=task first=1 rows=-1              # every task on one page
//! ```

pub mod convert;
pub mod error;
pub mod keywords;
pub mod model;
pub mod parser;
pub mod record;
pub mod registry;
pub mod term;

pub use convert::{Normalized, convert};
pub use error::FilterError;
pub use keywords::{EXTRA_KEYWORDS, SortOrder, is_extra_keyword};
pub use model::Filter;
pub use parser::parse_filter_terms_from_string;
pub use record::FilterRecord;
pub use registry::{
    ALL_FILTER, DEFAULT_FALLBACK_FILTER, EntityType, RESET_FILTER, canonical_filter,
};
pub use term::{FilterTerm, Relation, Value};
