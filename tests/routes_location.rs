use bunner_routes_rs::matcher::MatchError;
use bunner_routes_rs::parser::{int, string};
use bunner_routes_rs::{
    ParamValue, Params, RouteNode, RouteTree, RoutesError, create_routes, path,
};
use pretty_assertions::assert_eq;

fn blog_tree() -> RouteTree {
    RouteTree::new()
        .route(
            "blog",
            RouteNode::new()
                .path(path!["blog", string("lang")])
                .query([int("page").optional()])
                .child(
                    "category",
                    RouteNode::new().path(path!["category", string("cid")]),
                ),
        )
        .route(
            "archive",
            RouteNode::new().path(path!["archive", string("cid").optional(), "category"]),
        )
        .route(
            "span",
            RouteNode::new().path(path![
                "a",
                string("x").optional(),
                string("y").optional(),
                "b"
            ]),
        )
        .route("menu", RouteNode::new().path(path!["menu"]).recursive("submenu"))
        .route(
            "search",
            RouteNode::new()
                .path(path!["search"])
                .query([string("q").optional()]),
        )
}

fn text(value: &str) -> ParamValue {
    ParamValue::from(value)
}

#[test]
fn routes_when_rendered_location_resumed_then_path_params_round_trip() {
    let routes = create_routes(blog_tree()).unwrap();
    let params = Params::new().path("lang", "en us").path("cid", "rock & roll");

    let location = routes.render("blog/category", &params).unwrap();
    let resumed = routes
        .from("blog/category", &location, &Params::new())
        .unwrap();

    assert_eq!(resumed.params().path, params.path);
}

#[test]
fn routes_when_optional_skipped_then_literal_still_matches() {
    let routes = create_routes(blog_tree()).unwrap();

    let skipped = routes
        .from("archive", "/archive/category", &Params::new())
        .unwrap();
    assert!(skipped.params().path.get("cid").is_none());

    let present = routes
        .from("archive", "/archive/42/category", &Params::new())
        .unwrap();
    assert_eq!(present.params().path.get("cid"), Some(&text("42")));
}

#[test]
fn routes_when_consecutive_optionals_then_leftmost_assigned_first() {
    let routes = create_routes(blog_tree()).unwrap();

    let none = routes.from("span", "/a/b", &Params::new()).unwrap();
    assert!(none.params().path.is_empty());

    let one = routes.from("span", "/a/1/b", &Params::new()).unwrap();
    assert_eq!(one.params().path.get("x"), Some(&text("1")));
    assert!(one.params().path.get("y").is_none());

    let both = routes.from("span", "/a/1/2/b", &Params::new()).unwrap();
    assert_eq!(both.params().path.get("x"), Some(&text("1")));
    assert_eq!(both.params().path.get("y"), Some(&text("2")));
}

#[test]
fn routes_when_later_optional_follows_released_one_then_its_segment_stays_in_tail() {
    let routes = create_routes(blog_tree()).unwrap();

    let resumed = routes.from("span", "/a/b/2", &Params::new()).unwrap();
    assert!(resumed.params().path.is_empty());

    assert_eq!(
        routes.replace("span", "/a/b/2", &Params::new()).unwrap(),
        "/a/b/2"
    );
}

#[test]
fn routes_when_undeclared_query_key_repeats_then_replace_keeps_every_entry() {
    let routes = create_routes(blog_tree()).unwrap();

    assert_eq!(
        routes
            .replace("search", "/search?tag=a&tag=b", &Params::new())
            .unwrap(),
        "/search?tag=a&tag=b"
    );
    assert_eq!(
        routes
            .replace("search", "/search?tag=a&q=rust&tag=b", &Params::new())
            .unwrap(),
        "/search?q=rust&tag=a&tag=b"
    );
}

#[test]
fn routes_when_repeated_query_key_overwritten_then_single_value_rendered() {
    let routes = create_routes(blog_tree()).unwrap();

    assert_eq!(
        routes
            .replace(
                "search",
                "/search?tag=a&tag=b",
                &Params::new().query("tag", "c"),
            )
            .unwrap(),
        "/search?tag=c"
    );
}

#[test]
fn routes_when_resumed_from_location_then_renders_with_overrides() {
    let routes = create_routes(blog_tree()).unwrap();

    let resumed = routes
        .from(
            "blog/category",
            "/blog/en/category/movies?page=2",
            &Params::new().path("cid", "music"),
        )
        .unwrap();

    assert_eq!(resumed.params().query.get("page"), Some(&ParamValue::Int(2)));
    assert_eq!(
        resumed.render("", &Params::new()).unwrap(),
        "/blog/en/category/music?page=2"
    );
}

#[test]
fn routes_when_replacing_then_unmatched_tail_is_preserved() {
    let routes = create_routes(blog_tree()).unwrap();

    let replaced = routes
        .replace(
            "blog",
            "/blog/en/category/movies?page=2&utm=mail",
            &Params::new().path("lang", "de"),
        )
        .unwrap();

    assert_eq!(replaced, "/blog/de/category/movies?page=2&utm=mail");
}

#[test]
fn routes_when_replacing_relative_context_then_location_kind_decides_anchor() {
    let routes = create_routes(blog_tree()).unwrap();
    let overwrite = Params::new().path("cid", "music");

    assert_eq!(
        routes
            .replace("blog/_category", "category/movies", &overwrite)
            .unwrap(),
        "category/music"
    );
    assert_eq!(
        routes
            .replace("blog/_category", "/blog/en/category/movies", &overwrite)
            .unwrap(),
        "/blog/en/category/music"
    );
}

#[test]
fn routes_when_literal_missing_then_location_mismatch() {
    let routes = create_routes(blog_tree()).unwrap();

    match routes.from("blog/category", "/blog/en/tags/x", &Params::new()) {
        Err(RoutesError::Match(MatchError::LocationMismatch {
            literal,
            pathname,
            template,
        })) => {
            assert_eq!(literal, "category");
            assert_eq!(pathname, "/blog/en/tags/x");
            assert_eq!(template, "/blog/:lang/category/:cid");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn routes_when_required_segment_absent_then_missing_parameter() {
    let routes = create_routes(blog_tree()).unwrap();

    match routes.from("blog", "/blog", &Params::new()) {
        Err(RoutesError::Match(MatchError::MissingParameter { name, .. })) => {
            assert_eq!(name, "lang");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn routes_when_location_badly_encoded_then_invalid_encoding() {
    let routes = create_routes(blog_tree()).unwrap();

    match routes.from("blog", "/blog/%FF", &Params::new()) {
        Err(RoutesError::Match(MatchError::InvalidEncoding { input })) => {
            assert_eq!(input, "%FF");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn routes_when_node_recursive_then_resolves_itself_at_any_depth() {
    let routes = create_routes(blog_tree()).unwrap();

    assert_eq!(
        routes.template("menu/submenu/submenu").unwrap(),
        "/menu/menu/menu"
    );

    let menu = routes.at("menu").unwrap();
    assert_eq!(menu.children(), vec!["submenu"]);

    let replaced = routes
        .replace("menu/submenu", "/menu/menu/extra", &Params::new())
        .unwrap();
    assert_eq!(replaced, "/menu/menu/extra");
}
