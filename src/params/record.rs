use hashbrown::HashMap as FastHashMap;
use serde::{Deserialize, Serialize};

use crate::parser::ParamValue;

/// Parameter name to its string form, as found in a location.
pub type RawParams = FastHashMap<String, String>;

/// Parameter name to its decoded value.
pub type ParamMap = FastHashMap<String, ParamValue>;

/// Typed values for the path and query parts of a route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    pub path: ParamMap,
    pub query: ParamMap,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.path.insert(name.into(), value.into());
        self
    }

    pub fn query(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty() && self.query.is_empty()
    }

    /// Copy of `self` overlaid with `other`; `other` wins on key collisions.
    pub fn merged(&self, other: &Params) -> Params {
        let mut merged = self.clone();
        merged
            .path
            .extend(other.path.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
            .query
            .extend(other.query.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
    }
}

/// Query input accepted by `parse_query`: a pre-split record or a raw string.
#[derive(Debug, Clone, Copy)]
pub enum QuerySource<'a> {
    Record(&'a RawParams),
    String(&'a str),
}

impl<'a> From<&'a RawParams> for QuerySource<'a> {
    fn from(value: &'a RawParams) -> Self {
        QuerySource::Record(value)
    }
}

impl<'a> From<&'a str> for QuerySource<'a> {
    fn from(value: &'a str) -> Self {
        QuerySource::String(value)
    }
}

impl<'a> From<&'a String> for QuerySource<'a> {
    fn from(value: &'a String) -> Self {
        QuerySource::String(value.as_str())
    }
}
