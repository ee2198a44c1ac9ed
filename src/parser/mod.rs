mod builtin;
mod capability;
mod error;
mod value;

pub use builtin::{
    Base64JsonParser, BoolParser, DateParser, DateTimeParser, FloatParser, IntParser, JsonParser,
    ListParser, OneOfParser, StringParser, base64_json, boolean, date, float, int, iso_date, json,
    list, one_of, string, string_matching,
};
pub use capability::{FnParser, ParamParser, Parser};
pub use error::{ParserError, ParserResult};
pub use value::ParamValue;
