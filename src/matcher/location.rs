use memchr::memchr;
use std::borrow::Cow;
use std::collections::VecDeque;

use super::{MatchError, MatchResult};

/// Splits `location` into pathname and query string at the first `?`.
pub fn split_location(location: &str) -> (&str, &str) {
    match memchr(b'?', location.as_bytes()) {
        Some(pos) => (&location[..pos], &location[pos + 1..]),
        None => (location, ""),
    }
}

/// Queue of raw pathname segments. One leading empty segment (from a leading
/// `/`) is dropped, and one trailing one unless `strict_trailing_slash`.
pub fn split_pathname(pathname: &str, strict_trailing_slash: bool) -> VecDeque<&str> {
    let mut segments: VecDeque<&str> = pathname.split('/').collect();
    if segments.front() == Some(&"") {
        segments.pop_front();
    }
    if !strict_trailing_slash && segments.back() == Some(&"") {
        segments.pop_back();
    }
    segments
}

pub fn decode_component(raw: &str) -> MatchResult<Cow<'_, str>> {
    urlencoding::decode(raw).map_err(|_| MatchError::InvalidEncoding {
        input: raw.to_string(),
    })
}

/// Parses `k=v&k2=v2` (leading `?` tolerated) into decoded pairs in order.
/// `+` decodes to a space and a key without `=` gets an empty value.
pub fn parse_query_string(search: &str) -> MatchResult<Vec<(String, String)>> {
    let search = search.strip_prefix('?').unwrap_or(search);
    let mut pairs = Vec::new();

    for pair in search.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = match memchr(b'=', pair.as_bytes()) {
            Some(pos) => (&pair[..pos], &pair[pos + 1..]),
            None => (pair, ""),
        };
        pairs.push((decode_form(key)?, decode_form(value)?));
    }

    Ok(pairs)
}

fn decode_form(raw: &str) -> MatchResult<String> {
    if raw.contains('+') {
        let spaced = raw.replace('+', " ");
        return decode_component(&spaced).map(Cow::into_owned);
    }
    decode_component(raw).map(Cow::into_owned)
}
