use serde_json::{Map, Value};

use crate::error::ReportError;

/// Read-only view over a raw project document.
///
/// Every lookup is total: a missing key, a non-object intermediate or a
/// `null` leaf all read as "absent" instead of failing.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectRecord {
    document: Map<String, Value>,
}

impl ProjectRecord {
    pub fn from_value(name: &str, value: Value) -> Result<Self, ReportError> {
        match value {
            Value::Object(document) => Ok(Self { document }),
            other => Err(ReportError::InvalidRecord {
                name: name.to_string(),
                message: format!("expected a JSON object, found {}", value_kind(&other)),
            }),
        }
    }

    pub fn get(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut current = self.document.get(*first)?;
        for key in rest {
            current = current.as_object()?.get(*key)?;
        }
        if current.is_null() { None } else { Some(current) }
    }

    pub fn get_dotted(&self, path: &str) -> Option<&Value> {
        let segments = path.split('.').collect::<Vec<_>>();
        self.get(&segments)
    }

    pub fn get_or<'a>(&'a self, path: &[&str], default: &'a Value) -> &'a Value {
        self.get(path).unwrap_or(default)
    }

    /// Scalar at `path` rendered verbatim; strings lose their quotes.
    pub fn text(&self, path: &[&str]) -> Option<String> {
        self.get(path).and_then(scalar_text)
    }

    /// Like [`ProjectRecord::text`] but only for truthy values.
    pub fn present_text(&self, path: &[&str]) -> Option<String> {
        self.get(path).filter(|value| is_truthy(value)).and_then(scalar_text)
    }

    pub fn is_present(&self, path: &[&str]) -> bool {
        self.get(path).is_some_and(is_truthy)
    }

    pub fn samples(&self) -> impl Iterator<Item = SampleRecord<'_>> {
        self.document
            .get("samples")
            .and_then(Value::as_object)
            .into_iter()
            .flat_map(|samples| samples.iter())
            .map(|(id, value)| SampleRecord {
                id: id.as_str(),
                value,
            })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SampleRecord<'a> {
    id: &'a str,
    value: &'a Value,
}

impl<'a> SampleRecord<'a> {
    pub fn id(&self) -> &'a str {
        self.id
    }

    pub fn reads_min(&self) -> Option<String> {
        self.value
            .get("details")
            .and_then(|details| details.get("reads_min"))
            .and_then(scalar_text)
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
