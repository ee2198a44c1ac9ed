mod error;
mod parse;
mod record;

pub use error::{ParamsError, ParamsResult};
pub use parse::{parse_path_values, parse_query_values};
pub(crate) use parse::parse_present_query_values;
pub use record::{ParamMap, Params, QuerySource, RawParams};
