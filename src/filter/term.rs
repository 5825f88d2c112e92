use super::convert::{Normalized, convert};
use super::error::FilterError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Comparison operator or boolean connector of a filter term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Relation {
    #[serde(rename = "=")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = "~")]
    Approx,
    #[serde(rename = "and")]
    And,
    #[serde(rename = "or")]
    Or,
    #[serde(rename = "not")]
    Not,
}

impl Relation {
    pub fn symbol(&self) -> &'static str {
        match self {
            Relation::Equal => "=",
            Relation::NotEqual => "!=",
            Relation::Greater => ">",
            Relation::Less => "<",
            Relation::Approx => "~",
            Relation::And => "and",
            Relation::Or => "or",
            Relation::Not => "not",
        }
    }

    /// Connectors stand alone as a token and never carry a keyword or value
    pub fn is_connector(&self) -> bool {
        matches!(self, Relation::And | Relation::Or | Relation::Not)
    }

    pub(super) fn connector_from_word(word: &str) -> Option<Relation> {
        match word.to_lowercase().as_str() {
            "and" => Some(Relation::And),
            "or" => Some(Relation::Or),
            "not" => Some(Relation::Not),
            _ => None,
        }
    }
}

impl FromStr for Relation {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "=" => Ok(Relation::Equal),
            "!=" => Ok(Relation::NotEqual),
            ">" => Ok(Relation::Greater),
            "<" => Ok(Relation::Less),
            "~" => Ok(Relation::Approx),
            other => Relation::connector_from_word(other)
                .ok_or_else(|| FilterError::UnknownRelation(s.to_string())),
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Value of a filter term after normalization
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Str(String),
    Num(f64),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            Value::Num(_) => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Num(n) => Some(*n),
            Value::Str(_) => None,
        }
    }

    /// Integral view of a numeric value; fractions are truncated
    pub fn as_i64(&self) -> Option<i64> {
        self.as_f64().map(|n| n as i64)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Str(s) if s.is_empty())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Num(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Value::Num(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Num(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Num(value as f64)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Num(f64::from(value))
    }
}

/// A single filter term (e.g. `name=foo`, `severity>6.5`, `~web` or `and`)
///
/// Terms are only built from the output of [`convert`], so every value has
/// already gone through keyword-based type coercion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterTerm {
    #[serde(skip_serializing_if = "Option::is_none")]
    keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    relation: Option<Relation>,
    value: Value,
}

impl From<Normalized> for FilterTerm {
    fn from(normalized: Normalized) -> Self {
        FilterTerm {
            keyword: normalized.keyword,
            relation: normalized.relation,
            value: normalized.value,
        }
    }
}

impl FilterTerm {
    pub fn new(keyword: Option<&str>, value: impl Into<Value>, relation: Option<Relation>) -> Self {
        convert(keyword, value, relation).into()
    }

    pub fn connector(relation: Relation) -> Self {
        FilterTerm::new(None, "", Some(relation))
    }

    /// Parse a single whitespace-free token (quoted values may contain spaces)
    ///
    /// The first relation symbol splits keyword from value. A token without a
    /// relation symbol is a bare search word, or a connector for `and`/`or`/`not`.
    pub fn from_token(token: &str) -> Self {
        match find_relation(token) {
            Some((idx, relation)) => {
                let keyword = &token[..idx];
                let value = unquote(&token[idx + relation.symbol().len()..]);
                let keyword = (!keyword.is_empty()).then_some(keyword);
                FilterTerm::new(keyword, value, Some(relation))
            }
            None => FilterTerm::new(None, unquote(token), None),
        }
    }

    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }

    pub fn relation(&self) -> Option<Relation> {
        self.relation
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn has_keyword_named(&self, keyword: &str) -> bool {
        self.keyword.as_deref() == Some(keyword)
    }

    pub fn is_connector(&self) -> bool {
        self.relation.is_some_and(|r| r.is_connector())
    }
}

impl fmt::Display for FilterTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(relation) = self.relation.filter(Relation::is_connector) {
            return f.write_str(relation.symbol());
        }
        if let Some(keyword) = &self.keyword {
            f.write_str(keyword)?;
        }
        if let Some(relation) = self.relation {
            f.write_str(relation.symbol())?;
        }
        let value = self.value.to_string();
        if value.chars().any(|c| c.is_whitespace() || c == '"') {
            write!(f, "\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
        } else {
            f.write_str(&value)
        }
    }
}

fn find_relation(token: &str) -> Option<(usize, Relation)> {
    let bytes = token.as_bytes();
    for (idx, &byte) in bytes.iter().enumerate() {
        let relation = match byte {
            b'"' => return None,
            b'=' => Relation::Equal,
            b'~' => Relation::Approx,
            b'<' => Relation::Less,
            b'>' => Relation::Greater,
            b'!' if bytes.get(idx + 1) == Some(&b'=') => Relation::NotEqual,
            _ => continue,
        };
        return Some((idx, relation));
    }
    None
}

/// Strip surrounding quotes and resolve `\"` and `\\` inside them
fn unquote(value: &str) -> String {
    let Some(inner) = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
    else {
        return value.to_string();
    };

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.extend(chars.next()),
            c => out.push(c),
        }
    }
    out
}
