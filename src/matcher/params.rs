use crate::params::RawParams;
use crate::route::Param;

/// Pieces of a location left over after matching.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tail {
    /// Unmatched path segments, kept exactly as they appeared.
    pub path_segments: Vec<String>,
    /// One optional string parameter per undeclared query key.
    pub query_params: Vec<Param>,
    /// Every undeclared query entry in location order, repeated keys included.
    pub query_pairs: Vec<(String, String)>,
}

impl Tail {
    pub fn is_empty(&self) -> bool {
        self.path_segments.is_empty() && self.query_params.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchedLocation {
    /// Raw path values keyed by parameter name.
    pub path: RawParams,
    /// Every query entry of the location, declared or not; first key wins.
    pub query: RawParams,
    pub tail: Tail,
}
