use super::keywords::is_numeric_keyword;
use super::term::{Relation, Value};

/// A keyword/relation/value triple whose value type has been decided
///
/// Only [`convert`] produces this type, and a [`super::FilterTerm`] can only be
/// built from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub(super) keyword: Option<String>,
    pub(super) relation: Option<Relation>,
    pub(super) value: Value,
}

impl Normalized {
    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }

    pub fn relation(&self) -> Option<Relation> {
        self.relation
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// Normalize a raw term
///
/// Keywords are lower-cased. Paging counters and score thresholds become
/// numbers when they parse as such, everything else stays a string. A bare
/// `and`/`or`/`not` becomes the matching connector.
pub fn convert(
    keyword: Option<&str>,
    value: impl Into<Value>,
    relation: Option<Relation>,
) -> Normalized {
    let value = value.into();
    let keyword = keyword
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_lowercase);

    if let Some(connector) = relation.filter(Relation::is_connector) {
        return connector_term(connector);
    }

    let Some(keyword) = keyword else {
        let connector = value.as_str().and_then(Relation::connector_from_word);
        if let (None, Some(connector)) = (relation, connector) {
            return connector_term(connector);
        }
        return Normalized {
            keyword: None,
            relation,
            value: stringify(value),
        };
    };

    let value = if is_numeric_keyword(&keyword) {
        numeric(value)
    } else {
        stringify(value)
    };

    Normalized {
        keyword: Some(keyword),
        relation,
        value,
    }
}

fn connector_term(connector: Relation) -> Normalized {
    Normalized {
        keyword: None,
        relation: Some(connector),
        value: Value::Str(String::new()),
    }
}

fn numeric(value: Value) -> Value {
    match value {
        Value::Str(s) => match s.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Value::Num(n),
            _ => Value::Str(s),
        },
        num => num,
    }
}

fn stringify(value: Value) -> Value {
    match value {
        Value::Num(_) => Value::Str(value.to_string()),
        s => s,
    }
}
