use std::fmt;
use std::sync::Arc;

use super::{ParamValue, ParserResult};

/// A parse/serialize capability pair for one parameter type.
///
/// Implementations must be pure: `parse(serialize(v))` yields `v` for every
/// well-formed value.
pub trait ParamParser: Send + Sync + fmt::Debug {
    fn kind_name(&self) -> &'static str;

    fn parse(&self, raw: &str) -> ParserResult<ParamValue>;

    fn serialize(&self, value: &ParamValue) -> ParserResult<String>;
}

/// Shared handle to a parser capability.
#[derive(Clone)]
pub struct Parser(Arc<dyn ParamParser>);

impl Parser {
    pub fn new<P: ParamParser + 'static>(parser: P) -> Self {
        Self(Arc::new(parser))
    }

    pub fn kind_name(&self) -> &'static str {
        self.0.kind_name()
    }

    pub fn parse(&self, raw: &str) -> ParserResult<ParamValue> {
        self.0.parse(raw)
    }

    pub fn serialize(&self, value: &ParamValue) -> ParserResult<String> {
        self.0.serialize(value)
    }

    /// True when both handles point at the same parser instance. Clones of
    /// one handle share it; two separately built parsers never do.
    pub fn same_capability(&self, other: &Parser) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Parser built from a pair of closures.
pub struct FnParser<P, S> {
    name: &'static str,
    parse: P,
    serialize: S,
}

impl<P, S> FnParser<P, S>
where
    P: Fn(&str) -> ParserResult<ParamValue> + Send + Sync,
    S: Fn(&ParamValue) -> ParserResult<String> + Send + Sync,
{
    pub fn new(name: &'static str, parse: P, serialize: S) -> Self {
        Self {
            name,
            parse,
            serialize,
        }
    }
}

impl<P, S> fmt::Debug for FnParser<P, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnParser").field("name", &self.name).finish()
    }
}

impl<P, S> ParamParser for FnParser<P, S>
where
    P: Fn(&str) -> ParserResult<ParamValue> + Send + Sync,
    S: Fn(&ParamValue) -> ParserResult<String> + Send + Sync,
{
    fn kind_name(&self) -> &'static str {
        self.name
    }

    fn parse(&self, raw: &str) -> ParserResult<ParamValue> {
        (self.parse)(raw)
    }

    fn serialize(&self, value: &ParamValue) -> ParserResult<String> {
        (self.serialize)(value)
    }
}
