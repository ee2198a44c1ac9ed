use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use regex::Regex;

use super::{ParamParser, ParamValue, Parser, ParserError, ParserResult};
use crate::route::Param;

#[derive(Debug, Clone, Copy, Default)]
pub struct IntParser;

impl ParamParser for IntParser {
    fn kind_name(&self) -> &'static str {
        "int"
    }

    fn parse(&self, raw: &str) -> ParserResult<ParamValue> {
        raw.parse::<i64>()
            .map(ParamValue::Int)
            .map_err(|err| ParserError::validation("int", raw, err.to_string()))
    }

    fn serialize(&self, value: &ParamValue) -> ParserResult<String> {
        value
            .as_i64()
            .map(|v| v.to_string())
            .ok_or_else(|| value.mismatch("int"))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FloatParser {
    fraction_digits: Option<usize>,
}

impl FloatParser {
    pub fn new(fraction_digits: Option<usize>) -> Self {
        Self { fraction_digits }
    }
}

impl ParamParser for FloatParser {
    fn kind_name(&self) -> &'static str {
        "float"
    }

    fn parse(&self, raw: &str) -> ParserResult<ParamValue> {
        let value = raw
            .parse::<f64>()
            .map_err(|err| ParserError::validation("float", raw, err.to_string()))?;
        if !value.is_finite() {
            return Err(ParserError::validation("float", raw, "value is not finite"));
        }
        Ok(ParamValue::Float(value))
    }

    fn serialize(&self, value: &ParamValue) -> ParserResult<String> {
        let v = value.as_f64().ok_or_else(|| value.mismatch("float"))?;
        Ok(match self.fraction_digits {
            Some(digits) => format!("{v:.digits$}"),
            None => v.to_string(),
        })
    }
}

/// Plain string parser, optionally constrained by an anchored regex.
#[derive(Debug, Clone, Default)]
pub struct StringParser {
    constraint: Option<Regex>,
}

impl StringParser {
    pub fn new() -> Self {
        Self { constraint: None }
    }

    pub fn matching(pattern: &str) -> ParserResult<Self> {
        let source = format!("^(?:{pattern})$");
        let regex = Regex::new(&source).map_err(|err| ParserError::InvalidPattern {
            pattern: pattern.to_string(),
            error: err.to_string(),
        })?;
        Ok(Self {
            constraint: Some(regex),
        })
    }

    fn check(&self, raw: &str) -> ParserResult<()> {
        match &self.constraint {
            Some(regex) if !regex.is_match(raw) => Err(ParserError::validation(
                "string",
                raw,
                format!("does not match {}", regex.as_str()),
            )),
            _ => Ok(()),
        }
    }
}

impl ParamParser for StringParser {
    fn kind_name(&self) -> &'static str {
        "string"
    }

    fn parse(&self, raw: &str) -> ParserResult<ParamValue> {
        self.check(raw)?;
        Ok(ParamValue::Str(raw.to_string()))
    }

    fn serialize(&self, value: &ParamValue) -> ParserResult<String> {
        let s = value.as_str().ok_or_else(|| value.mismatch("string"))?;
        self.check(s)?;
        Ok(s.to_string())
    }
}

/// RFC 3339 timestamps, serialized in UTC with millisecond precision.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimeParser;

impl ParamParser for DateTimeParser {
    fn kind_name(&self) -> &'static str {
        "iso_date"
    }

    fn parse(&self, raw: &str) -> ParserResult<ParamValue> {
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| ParamValue::DateTime(dt.with_timezone(&Utc)))
            .map_err(|err| ParserError::validation("iso_date", raw, err.to_string()))
    }

    fn serialize(&self, value: &ParamValue) -> ParserResult<String> {
        value
            .as_date_time()
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
            .ok_or_else(|| value.mismatch("datetime"))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DateParser;

impl ParamParser for DateParser {
    fn kind_name(&self) -> &'static str {
        "date"
    }

    fn parse(&self, raw: &str) -> ParserResult<ParamValue> {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(ParamValue::Date)
            .map_err(|err| ParserError::validation("date", raw, err.to_string()))
    }

    fn serialize(&self, value: &ParamValue) -> ParserResult<String> {
        value
            .as_date()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .ok_or_else(|| value.mismatch("date"))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BoolParser;

impl ParamParser for BoolParser {
    fn kind_name(&self) -> &'static str {
        "boolean"
    }

    fn parse(&self, raw: &str) -> ParserResult<ParamValue> {
        match raw {
            "true" => Ok(ParamValue::Bool(true)),
            "false" => Ok(ParamValue::Bool(false)),
            _ => Err(ParserError::validation(
                "boolean",
                raw,
                "expected 'true' or 'false'",
            )),
        }
    }

    fn serialize(&self, value: &ParamValue) -> ParserResult<String> {
        value
            .as_bool()
            .map(|b| b.to_string())
            .ok_or_else(|| value.mismatch("bool"))
    }
}

/// Enum parser over a fixed set of string values.
#[derive(Debug, Clone, Default)]
pub struct OneOfParser {
    values: Vec<String>,
}

impl OneOfParser {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    fn check(&self, raw: &str) -> ParserResult<()> {
        if self.values.iter().any(|v| v == raw) {
            return Ok(());
        }
        Err(ParserError::validation(
            "one_of",
            raw,
            format!("expected one of [{}]", self.values.join(", ")),
        ))
    }
}

impl ParamParser for OneOfParser {
    fn kind_name(&self) -> &'static str {
        "one_of"
    }

    fn parse(&self, raw: &str) -> ParserResult<ParamValue> {
        self.check(raw)?;
        Ok(ParamValue::Str(raw.to_string()))
    }

    fn serialize(&self, value: &ParamValue) -> ParserResult<String> {
        let s = value.as_str().ok_or_else(|| value.mismatch("string"))?;
        self.check(s)?;
        Ok(s.to_string())
    }
}

/// Delimiter-joined list whose items go through an inner parser.
#[derive(Debug, Clone)]
pub struct ListParser {
    inner: Parser,
    separator: String,
}

impl ListParser {
    pub fn new(inner: Parser, separator: impl Into<String>) -> Self {
        Self {
            inner,
            separator: separator.into(),
        }
    }
}

impl ParamParser for ListParser {
    fn kind_name(&self) -> &'static str {
        "list"
    }

    fn parse(&self, raw: &str) -> ParserResult<ParamValue> {
        if raw.is_empty() {
            return Ok(ParamValue::List(Vec::new()));
        }
        raw.split(self.separator.as_str())
            .map(|item| self.inner.parse(item))
            .collect::<ParserResult<Vec<_>>>()
            .map(ParamValue::List)
    }

    fn serialize(&self, value: &ParamValue) -> ParserResult<String> {
        let items = value.as_list().ok_or_else(|| value.mismatch("list"))?;
        let parts = items
            .iter()
            .map(|item| self.inner.serialize(item))
            .collect::<ParserResult<Vec<_>>>()?;
        Ok(parts.join(&self.separator))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParser;

impl ParamParser for JsonParser {
    fn kind_name(&self) -> &'static str {
        "json"
    }

    fn parse(&self, raw: &str) -> ParserResult<ParamValue> {
        serde_json::from_str(raw)
            .map(ParamValue::Json)
            .map_err(|err| ParserError::validation("json", raw, err.to_string()))
    }

    fn serialize(&self, value: &ParamValue) -> ParserResult<String> {
        Ok(value.to_json().to_string())
    }
}

/// JSON carried as URL-safe, unpadded base64.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64JsonParser;

impl ParamParser for Base64JsonParser {
    fn kind_name(&self) -> &'static str {
        "base64_json"
    }

    fn parse(&self, raw: &str) -> ParserResult<ParamValue> {
        let bytes = URL_SAFE_NO_PAD
            .decode(raw.trim_end_matches('='))
            .map_err(|err| ParserError::validation("base64_json", raw, err.to_string()))?;
        serde_json::from_slice(&bytes)
            .map(ParamValue::Json)
            .map_err(|err| ParserError::validation("base64_json", raw, err.to_string()))
    }

    fn serialize(&self, value: &ParamValue) -> ParserResult<String> {
        Ok(URL_SAFE_NO_PAD.encode(value.to_json().to_string()))
    }
}

pub fn int(name: impl Into<String>) -> Param {
    Param::new(name, IntParser)
}

pub fn float(name: impl Into<String>, fraction_digits: Option<usize>) -> Param {
    Param::new(name, FloatParser::new(fraction_digits))
}

pub fn string(name: impl Into<String>) -> Param {
    Param::new(name, StringParser::new())
}

pub fn string_matching(name: impl Into<String>, pattern: &str) -> ParserResult<Param> {
    Ok(Param::new(name, StringParser::matching(pattern)?))
}

pub fn iso_date(name: impl Into<String>) -> Param {
    Param::new(name, DateTimeParser)
}

pub fn date(name: impl Into<String>) -> Param {
    Param::new(name, DateParser)
}

pub fn boolean(name: impl Into<String>) -> Param {
    Param::new(name, BoolParser)
}

pub fn one_of<I, S>(name: impl Into<String>, values: I) -> Param
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Param::new(name, OneOfParser::new(values))
}

pub fn list(name: impl Into<String>, inner: Parser, separator: &str) -> Param {
    Param::new(name, ListParser::new(inner, separator))
}

pub fn json(name: impl Into<String>) -> Param {
    Param::new(name, JsonParser)
}

pub fn base64_json(name: impl Into<String>) -> Param {
    Param::new(name, Base64JsonParser)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Parser::new(IntParser), "42", ParamValue::Int(42))]
    #[case(Parser::new(IntParser), "-7", ParamValue::Int(-7))]
    #[case(Parser::new(FloatParser::default()), "1.5", ParamValue::Float(1.5))]
    #[case(Parser::new(StringParser::new()), "movies", ParamValue::Str("movies".into()))]
    #[case(Parser::new(BoolParser), "false", ParamValue::Bool(false))]
    #[case(
        Parser::new(DateParser),
        "2024-02-29",
        ParamValue::Date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
    )]
    #[case(
        Parser::new(OneOfParser::new(["asc", "desc"])),
        "desc",
        ParamValue::Str("desc".into())
    )]
    fn parse_accepts_well_formed_input(
        #[case] parser: Parser,
        #[case] raw: &str,
        #[case] expected: ParamValue,
    ) {
        assert_eq!(parser.parse(raw).unwrap(), expected);
        assert_eq!(parser.serialize(&expected).unwrap(), raw);
    }

    #[rstest]
    #[case(Parser::new(IntParser), "4x2")]
    #[case(Parser::new(FloatParser::default()), "NaN")]
    #[case(Parser::new(BoolParser), "yes")]
    #[case(Parser::new(DateParser), "2024-13-01")]
    #[case(Parser::new(DateTimeParser), "yesterday")]
    #[case(Parser::new(OneOfParser::new(["asc", "desc"])), "sideways")]
    #[case(Parser::new(JsonParser), "{broken")]
    #[case(Parser::new(Base64JsonParser), "***")]
    fn parse_rejects_malformed_input(#[case] parser: Parser, #[case] raw: &str) {
        match parser.parse(raw) {
            Err(ParserError::Validation { raw: rejected, .. }) => assert_eq!(rejected, raw),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn float_serialize_respects_fraction_digits() {
        let parser = FloatParser::new(Some(2));
        assert_eq!(parser.serialize(&ParamValue::Float(3.14159)).unwrap(), "3.14");
        assert_eq!(parser.serialize(&ParamValue::Int(2)).unwrap(), "2.00");
    }

    #[test]
    fn iso_date_serializes_in_utc_with_millis() {
        let parser = DateTimeParser;
        let value = parser.parse("2024-05-01T10:30:00+02:00").unwrap();
        assert_eq!(parser.serialize(&value).unwrap(), "2024-05-01T08:30:00.000Z");
    }

    #[test]
    fn list_uses_inner_parser_per_item() {
        let parser = ListParser::new(Parser::new(IntParser), "-");
        let value = parser.parse("1-2-3").unwrap();
        assert_eq!(value, ParamValue::from(vec![1i64, 2, 3]));
        assert_eq!(parser.serialize(&value).unwrap(), "1-2-3");
        assert_eq!(parser.parse("").unwrap(), ParamValue::List(Vec::new()));
    }

    #[test]
    fn base64_json_round_trips_objects() {
        let parser = Base64JsonParser;
        let value = ParamValue::Json(serde_json::json!({"sort": "name", "page": 2}));
        let encoded = parser.serialize(&value).unwrap();
        assert!(!encoded.contains('='));
        assert_eq!(parser.parse(&encoded).unwrap(), value);
    }

    #[test]
    fn string_matching_enforces_constraint_both_ways() {
        let parser = StringParser::matching("[a-z]{2}").unwrap();
        assert!(parser.parse("en").is_ok());
        assert!(parser.parse("english").is_err());
        assert!(parser.serialize(&ParamValue::from("EN")).is_err());
    }

    #[test]
    fn string_matching_reports_invalid_pattern() {
        match StringParser::matching("([") {
            Err(ParserError::InvalidPattern { pattern, .. }) => assert_eq!(pattern, "(["),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn serialize_rejects_wrong_value_type() {
        let err = IntParser.serialize(&ParamValue::from("seven")).unwrap_err();
        assert_eq!(
            err,
            ParserError::TypeMismatch {
                expected: "int",
                found: "string"
            }
        );
    }
}
