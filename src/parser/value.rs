use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{ParserError, ParserResult};

/// Decoded value of a path or query parameter.
///
/// Every parser produces and consumes this type, which lets a single
/// parameter record hold values of different shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    DateTime(DateTime<Utc>),
    Date(NaiveDate),
    List(Vec<ParamValue>),
    Json(serde_json::Value),
}

impl ParamValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            ParamValue::Int(_) => "int",
            ParamValue::Float(_) => "float",
            ParamValue::Str(_) => "string",
            ParamValue::Bool(_) => "bool",
            ParamValue::DateTime(_) => "datetime",
            ParamValue::Date(_) => "date",
            ParamValue::List(_) => "list",
            ParamValue::Json(_) => "json",
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ParamValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Float(v) => Some(*v),
            ParamValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_date_time(&self) -> Option<&DateTime<Utc>> {
        match self {
            ParamValue::DateTime(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            ParamValue::Date(v) => Some(*v),
            ParamValue::DateTime(v) => Some(v.date_naive()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ParamValue]> {
        match self {
            ParamValue::List(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    /// JSON view of the value; dates use their canonical string forms.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            ParamValue::Int(v) => serde_json::Value::from(*v),
            ParamValue::Float(v) => serde_json::Value::from(*v),
            ParamValue::Str(v) => serde_json::Value::from(v.as_str()),
            ParamValue::Bool(v) => serde_json::Value::from(*v),
            ParamValue::DateTime(v) => serde_json::Value::from(
                v.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            ),
            ParamValue::Date(v) => serde_json::Value::from(v.format("%Y-%m-%d").to_string()),
            ParamValue::List(items) => {
                serde_json::Value::Array(items.iter().map(ParamValue::to_json).collect())
            }
            ParamValue::Json(v) => v.clone(),
        }
    }

    pub(crate) fn mismatch(&self, expected: &'static str) -> ParserError {
        ParserError::TypeMismatch {
            expected,
            found: self.type_name(),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<DateTime<Utc>> for ParamValue {
    fn from(value: DateTime<Utc>) -> Self {
        ParamValue::DateTime(value)
    }
}

impl From<NaiveDate> for ParamValue {
    fn from(value: NaiveDate) -> Self {
        ParamValue::Date(value)
    }
}

impl From<serde_json::Value> for ParamValue {
    fn from(value: serde_json::Value) -> Self {
        ParamValue::Json(value)
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(values: Vec<T>) -> Self {
        ParamValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl TryFrom<ParamValue> for i64 {
    type Error = ParserError;

    fn try_from(value: ParamValue) -> ParserResult<Self> {
        value.as_i64().ok_or_else(|| value.mismatch("int"))
    }
}

impl TryFrom<ParamValue> for f64 {
    type Error = ParserError;

    fn try_from(value: ParamValue) -> ParserResult<Self> {
        value.as_f64().ok_or_else(|| value.mismatch("float"))
    }
}

impl TryFrom<ParamValue> for bool {
    type Error = ParserError;

    fn try_from(value: ParamValue) -> ParserResult<Self> {
        value.as_bool().ok_or_else(|| value.mismatch("bool"))
    }
}

impl TryFrom<ParamValue> for String {
    type Error = ParserError;

    fn try_from(value: ParamValue) -> ParserResult<Self> {
        match value {
            ParamValue::Str(v) => Ok(v),
            other => Err(other.mismatch("string")),
        }
    }
}

impl TryFrom<ParamValue> for NaiveDate {
    type Error = ParserError;

    fn try_from(value: ParamValue) -> ParserResult<Self> {
        value.as_date().ok_or_else(|| value.mismatch("date"))
    }
}

impl TryFrom<ParamValue> for DateTime<Utc> {
    type Error = ParserError;

    fn try_from(value: ParamValue) -> ParserResult<Self> {
        match value {
            ParamValue::DateTime(v) => Ok(v),
            other => Err(other.mismatch("datetime")),
        }
    }
}
