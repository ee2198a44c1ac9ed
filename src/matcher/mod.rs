mod error;
mod location;
mod params;
mod resolver;

pub use error::{MatchError, MatchResult};
pub use location::{decode_component, parse_query_string, split_location, split_pathname};
pub use params::{MatchedLocation, Tail};
pub use resolver::match_location;
