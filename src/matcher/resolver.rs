use hashbrown::HashSet as FastHashSet;
use smallvec::SmallVec;
use std::borrow::Cow;
use std::collections::VecDeque;

use super::{
    MatchError, MatchResult, MatchedLocation, Tail, decode_component, parse_query_string,
    split_location, split_pathname,
};
use crate::compiler::RenderContext;
use crate::params::RawParams;
use crate::parser::StringParser;
use crate::render::template_string;
use crate::route::{Param, Segment};
use crate::routes::RoutesOptions;

/// Optional params assigned since the last anchor, with the raw segment each consumed.
type RecentOptional<'c, 'l> = SmallVec<[(&'c str, Option<&'l str>); 4]>;

/// Recovers raw parameter values from `location` by walking `context.path`.
///
/// Optional parameters consume a segment greedily. When a later literal does
/// not match, the most recent optional assignments are revisited right to
/// left: one whose value equals the literal is undone, and the segments taken
/// by optionals after it are pushed back with the current one, in order.
#[tracing::instrument(level = "trace", skip(context, options))]
pub fn match_location(
    context: &RenderContext,
    location: &str,
    options: &RoutesOptions,
) -> MatchResult<MatchedLocation> {
    let (pathname, search) = split_location(location);
    let mut queue = split_pathname(pathname, options.strict_trailing_slash);
    let mut path = RawParams::new();
    let mut recent_optional = RecentOptional::new();

    for segment in context.path() {
        match segment {
            Segment::Literal(literal) => {
                for piece in literal.split('/').filter(|piece| !piece.is_empty()) {
                    let raw = queue.pop_front();
                    let value = raw.map(|r| decode(r, options)).transpose()?;

                    if value.as_deref() == Some(piece) {
                        recent_optional.clear();
                        continue;
                    }

                    if !release_optional(&mut path, &mut recent_optional, piece, raw, &mut queue) {
                        return Err(MatchError::LocationMismatch {
                            literal: piece.to_string(),
                            pathname: pathname.to_string(),
                            template: template_string(context),
                        });
                    }
                }
            }
            Segment::Param(param) => {
                let raw = queue.pop_front();
                let value = raw
                    .map(|r| decode(r, options))
                    .transpose()?
                    .filter(|v| !v.is_empty());

                if param.is_optional() {
                    if let Some(value) = value {
                        path.insert(param.name().to_string(), value.into_owned());
                    }
                    recent_optional.push((param.name(), raw));
                    continue;
                }

                let Some(value) = value else {
                    return Err(MatchError::MissingParameter {
                        name: param.name().to_string(),
                        template: template_string(context),
                    });
                };
                path.insert(param.name().to_string(), value.into_owned());
                recent_optional.clear();
            }
        }
    }

    let entries = parse_query_string(search)?;
    let declared: FastHashSet<&str> = context.query().iter().map(Param::name).collect();
    let mut query = RawParams::new();
    let mut tail = Tail {
        path_segments: queue.into_iter().map(str::to_string).collect(),
        query_params: Vec::new(),
        query_pairs: Vec::new(),
    };

    for (key, value) in entries {
        let first = !query.contains_key(&key);
        if !declared.contains(key.as_str()) {
            if first {
                tail.query_params
                    .push(Param::new(key.clone(), StringParser::new()).optional());
            }
            tail.query_pairs.push((key.clone(), value.clone()));
        }
        if first {
            query.insert(key, value);
        }
    }

    if !tail.is_empty() {
        tracing::trace!(
            path_segments = tail.path_segments.len() as u64,
            query_params = tail.query_params.len() as u64,
            "location has unmatched tail"
        );
    }

    Ok(MatchedLocation { path, query, tail })
}

fn decode<'a>(raw: &'a str, options: &RoutesOptions) -> MatchResult<Cow<'a, str>> {
    if options.decode_uri {
        decode_component(raw)
    } else {
        Ok(Cow::Borrowed(raw))
    }
}

fn release_optional<'l>(
    path: &mut RawParams,
    recent: &mut RecentOptional<'_, 'l>,
    literal: &str,
    current: Option<&'l str>,
    queue: &mut VecDeque<&'l str>,
) -> bool {
    let mut displaced = RecentOptional::new();
    while let Some((name, raw)) = recent.pop() {
        if !path.get(name).is_some_and(|value| value == literal) {
            displaced.push((name, raw));
            continue;
        }

        path.remove(name);
        tracing::debug!(
            param = name,
            literal,
            displaced = displaced.len() as u64,
            "optional parameter released its segment"
        );
        // displaced is latest-first, so pushing each to the front restores location order
        if let Some(raw) = current {
            queue.push_front(raw);
        }
        for (later, raw) in &displaced {
            path.remove(*later);
            if let Some(raw) = *raw {
                queue.push_front(raw);
            }
        }
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::compile;
    use crate::parser::{int, string};
    use crate::path;
    use crate::route::{RouteNode, RouteTree};

    fn context_for(segments: Vec<Segment>) -> RenderContext {
        let tree = RouteTree::new().route("r", RouteNode::new().path(segments));
        compile(&tree, "r", None, '_').unwrap()
    }

    fn run(context: &RenderContext, location: &str) -> MatchResult<MatchedLocation> {
        match_location(context, location, &RoutesOptions::default())
    }

    #[test]
    fn skipped_optional_is_released_for_following_literal() {
        let context = context_for(path!["blog", string("cid").optional(), "category"]);
        let matched = run(&context, "/blog/category").unwrap();
        assert!(matched.path.get("cid").is_none());
        assert!(matched.tail.is_empty());
    }

    #[test]
    fn present_optional_is_kept() {
        let context = context_for(path!["blog", string("cid").optional(), "category"]);
        let matched = run(&context, "/blog/42/category").unwrap();
        assert_eq!(matched.path.get("cid").map(String::as_str), Some("42"));
    }

    #[test]
    fn two_skipped_optionals_release_right_to_left() {
        let context = context_for(path![
            "a",
            string("x").optional(),
            string("y").optional(),
            "b"
        ]);
        let matched = run(&context, "/a/b").unwrap();
        assert!(matched.path.is_empty());
    }

    #[test]
    fn leftmost_optional_wins_when_only_one_present() {
        let context = context_for(path![
            "a",
            string("x").optional(),
            string("y").optional(),
            "b"
        ]);
        let matched = run(&context, "/a/1/b").unwrap();
        assert_eq!(matched.path.get("x").map(String::as_str), Some("1"));
        assert!(matched.path.get("y").is_none());
    }

    #[test]
    fn releasing_an_optional_returns_later_segments_to_the_queue() {
        let context = context_for(path![
            "a",
            string("x").optional(),
            string("y").optional(),
            "b"
        ]);
        let matched = run(&context, "/a/b/2").unwrap();
        assert!(matched.path.is_empty());
        assert_eq!(matched.tail.path_segments, ["2"]);
    }

    #[test]
    fn both_optionals_present() {
        let context = context_for(path![
            "a",
            string("x").optional(),
            string("y").optional(),
            "b"
        ]);
        let matched = run(&context, "/a/1/2/b").unwrap();
        assert_eq!(matched.path.get("x").map(String::as_str), Some("1"));
        assert_eq!(matched.path.get("y").map(String::as_str), Some("2"));
    }

    #[test]
    fn mismatch_without_candidates_reports_literal_and_template() {
        let context = context_for(path!["a", string("x").optional(), "b"]);
        let err = run(&context, "/a/1/c").unwrap_err();
        assert_eq!(
            err,
            MatchError::LocationMismatch {
                literal: "b".to_string(),
                pathname: "/a/1/c".to_string(),
                template: "/a/:x?/b".to_string(),
            }
        );
    }

    #[test]
    fn required_param_anchors_earlier_optionals() {
        let context = context_for(path!["a", string("x").optional(), int("id"), "b"]);
        let err = run(&context, "/a/1/b").unwrap_err();
        match err {
            MatchError::LocationMismatch { literal, .. } => assert_eq!(literal, "b"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_required_param_fails() {
        let context = context_for(path!["user", int("id")]);
        match run(&context, "/user").unwrap_err() {
            MatchError::MissingParameter { name, template } => {
                assert_eq!(name, "id");
                assert_eq!(template, "/user/:id");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unmatched_segments_and_query_form_the_tail() {
        let tree = RouteTree::new().route(
            "r",
            RouteNode::new()
                .path(path!["search"])
                .query([string("q").optional()]),
        );
        let context = compile(&tree, "r", None, '_').unwrap();
        let matched = run(&context, "/search/more/here?q=rust&sort=asc&q=ignored").unwrap();
        assert_eq!(matched.tail.path_segments, ["more", "here"]);
        assert_eq!(matched.tail.query_params.len(), 1);
        assert_eq!(matched.tail.query_params[0].name(), "sort");
        assert!(matched.tail.query_params[0].is_optional());
        assert_eq!(matched.query.get("q").map(String::as_str), Some("rust"));
        assert_eq!(matched.query.get("sort").map(String::as_str), Some("asc"));
        assert_eq!(
            matched.tail.query_pairs,
            [("sort".to_string(), "asc".to_string())]
        );
    }

    #[test]
    fn repeated_undeclared_keys_keep_every_entry() {
        let context = context_for(path!["search"]);
        let matched = run(&context, "/search?tag=a&x=1&tag=b").unwrap();
        assert_eq!(matched.tail.query_params.len(), 2);
        assert_eq!(
            matched.tail.query_pairs,
            [
                ("tag".to_string(), "a".to_string()),
                ("x".to_string(), "1".to_string()),
                ("tag".to_string(), "b".to_string()),
            ]
        );
        assert_eq!(matched.query.get("tag").map(String::as_str), Some("a"));
    }

    #[test]
    fn path_segments_are_percent_decoded() {
        let context = context_for(path!["tag", string("name")]);
        let matched = run(&context, "/tag/hello%20world").unwrap();
        assert_eq!(
            matched.path.get("name").map(String::as_str),
            Some("hello world")
        );
    }

    #[test]
    fn decoding_can_be_disabled() {
        let context = context_for(path!["tag", string("name")]);
        let options = RoutesOptions {
            decode_uri: false,
            ..RoutesOptions::default()
        };
        let matched = match_location(&context, "/tag/hello%20world", &options).unwrap();
        assert_eq!(
            matched.path.get("name").map(String::as_str),
            Some("hello%20world")
        );
    }

    #[test]
    fn multi_piece_literal_is_compared_per_segment() {
        let context = context_for(path!["api/v1", string("res")]);
        let matched = run(&context, "/api/v1/users").unwrap();
        assert_eq!(matched.path.get("res").map(String::as_str), Some("users"));
    }
}
