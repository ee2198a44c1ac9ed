use serde::{Deserialize, Serialize};

use crate::parser::{ParamParser, Parser};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Requiredness {
    #[default]
    Required,
    Optional,
}

/// Named, typed placeholder in a route's path or query.
#[derive(Debug, Clone)]
pub struct Param {
    name: String,
    requiredness: Requiredness,
    parser: Parser,
}

impl Param {
    pub fn new<P: ParamParser + 'static>(name: impl Into<String>, parser: P) -> Self {
        Self::with_parser(name, Parser::new(parser))
    }

    pub fn with_parser(name: impl Into<String>, parser: Parser) -> Self {
        Self {
            name: name.into(),
            requiredness: Requiredness::Required,
            parser,
        }
    }

    /// Optional counterpart sharing the same name and capability.
    pub fn optional(mut self) -> Self {
        self.requiredness = Requiredness::Optional;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn requiredness(&self) -> Requiredness {
        self.requiredness
    }

    pub fn is_optional(&self) -> bool {
        self.requiredness == Requiredness::Optional
    }

    pub fn parser(&self) -> &Parser {
        &self.parser
    }

    pub fn template_token(&self) -> String {
        match self.requiredness {
            Requiredness::Required => format!(":{}", self.name),
            Requiredness::Optional => format!(":{}?", self.name),
        }
    }
}

// Parsers compare by identity, so params built separately are never equal
// even with the same name and parser kind.
impl PartialEq for Param {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.requiredness == other.requiredness
            && self.parser.same_capability(&other.parser)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Literal(String),
    Param(Param),
}

impl Segment {
    pub fn as_param(&self) -> Option<&Param> {
        match self {
            Segment::Param(param) => Some(param),
            Segment::Literal(_) => None,
        }
    }

    pub fn template_token(&self) -> String {
        match self {
            Segment::Literal(literal) => literal.clone(),
            Segment::Param(param) => param.template_token(),
        }
    }
}

impl From<&str> for Segment {
    fn from(value: &str) -> Self {
        Segment::Literal(value.to_string())
    }
}

impl From<String> for Segment {
    fn from(value: String) -> Self {
        Segment::Literal(value)
    }
}

impl From<Param> for Segment {
    fn from(value: Param) -> Self {
        Segment::Param(value)
    }
}

/// Builds a path segment list from literals and parameters.
///
/// ```
/// use bunner_routes_rs::path;
/// use bunner_routes_rs::parser::{int, string};
///
/// let segments = path!["blog", string("lang"), int("page").optional()];
/// assert_eq!(segments.len(), 3);
/// ```
#[macro_export]
macro_rules! path {
    ($($segment:expr),* $(,)?) => {
        vec![$($crate::route::Segment::from($segment)),*]
    };
}

#[cfg(test)]
mod tests {
    use crate::parser::{one_of, string_matching};

    #[test]
    fn params_with_differently_configured_parsers_differ() {
        assert_ne!(one_of("s", ["a"]), one_of("s", ["b"]));
        assert_ne!(
            string_matching("code", "[a-z]+").unwrap(),
            string_matching("code", "[0-9]+").unwrap()
        );
    }

    #[test]
    fn cloned_param_equals_original_until_requiredness_changes() {
        let param = one_of("s", ["a", "b"]);
        assert_eq!(param.clone(), param);
        assert_ne!(param.clone().optional(), param);
    }
}
