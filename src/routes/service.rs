use std::sync::Arc;

use super::RoutesOptions;
use crate::compiler::{RenderContext, compile};
use crate::errors::RoutesResult;
use crate::matcher::{MatchedLocation, match_location, parse_query_string};
use crate::params::{
    ParamMap, Params, QuerySource, RawParams, parse_path_values, parse_present_query_values,
    parse_query_values,
};
use crate::render::{DefaultRenderer, Renderer};
use crate::route::RouteTree;

/// Builds a [`Routes`] over `tree` with default options and the string renderer.
pub fn create_routes(tree: RouteTree) -> RoutesResult<Routes> {
    create_routes_with(tree, RoutesOptions::default(), DefaultRenderer::default())
}

/// Builds a [`Routes`] with explicit options and renderer. Both the options
/// and the tree are validated up front.
pub fn create_routes_with<R: Renderer>(
    tree: RouteTree,
    options: RoutesOptions,
    renderer: R,
) -> RoutesResult<Routes<R>> {
    options.validate()?;
    tree.validate(options.relative_marker)?;
    tracing::debug!(routes = tree.routes().len() as u64, "route tree validated");

    Ok(Routes {
        tree: Arc::new(tree),
        renderer: Arc::new(renderer),
        options: Arc::new(options),
        context: None,
        params: Params::default(),
    })
}

/// Entry point bound to a route tree and a renderer.
///
/// A `Routes` value is immutable. `bind`, `at` and `from` return a new value
/// scoped to the selected node that carries the accumulated params forward;
/// selectors passed to it resolve against that node's children.
#[derive(Debug)]
pub struct Routes<R: Renderer = DefaultRenderer> {
    tree: Arc<RouteTree>,
    renderer: Arc<R>,
    options: Arc<RoutesOptions>,
    context: Option<RenderContext>,
    params: Params,
}

impl<R: Renderer> Clone for Routes<R> {
    fn clone(&self) -> Self {
        Self {
            tree: Arc::clone(&self.tree),
            renderer: Arc::clone(&self.renderer),
            options: Arc::clone(&self.options),
            context: self.context.clone(),
            params: self.params.clone(),
        }
    }
}

impl<R: Renderer> Routes<R> {
    pub fn tree(&self) -> &RouteTree {
        &self.tree
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn options(&self) -> &RoutesOptions {
        &self.options
    }

    /// Context this value is scoped to; `None` at the root.
    pub fn context(&self) -> Option<&RenderContext> {
        self.context.as_ref()
    }

    /// Params accumulated through `bind` and `from`.
    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn compile(&self, selector: &str) -> RoutesResult<RenderContext> {
        Ok(compile(
            &self.tree,
            selector,
            self.context.as_ref(),
            self.options.relative_marker,
        )?)
    }

    pub fn template(&self, selector: &str) -> RoutesResult<String> {
        let context = self.compile(selector)?;
        Ok(self.renderer.render_template(&context))
    }

    /// Renders `selector` with the carried params overlaid by `params`.
    pub fn render(&self, selector: &str, params: &Params) -> RoutesResult<R::Output> {
        let context = self.compile(selector)?;
        self.render_context(&context, params)
    }

    pub fn render_context(&self, context: &RenderContext, params: &Params) -> RoutesResult<R::Output> {
        let merged = self.params.merged(params);
        Ok(self.renderer.render_path(context, &merged)?)
    }

    pub fn parse_params(&self, selector: &str, raw: &RawParams) -> RoutesResult<ParamMap> {
        let context = self.compile(selector)?;
        Ok(parse_path_values(&context, raw)?)
    }

    pub fn parse_query<'a>(
        &self,
        selector: &str,
        source: impl Into<QuerySource<'a>>,
    ) -> RoutesResult<ParamMap> {
        let context = self.compile(selector)?;
        match source.into() {
            QuerySource::Record(raw) => Ok(parse_query_values(&context, raw)?),
            QuerySource::String(search) => {
                let mut raw = RawParams::new();
                for (key, value) in parse_query_string(search)? {
                    raw.entry(key).or_insert(value);
                }
                Ok(parse_query_values(&context, &raw)?)
            }
        }
    }

    /// Scopes to `selector` with `params` added to the carried ones.
    pub fn bind(&self, selector: &str, params: Params) -> RoutesResult<Routes<R>> {
        let context = self.compile(selector)?;
        Ok(self.scoped(context, self.params.merged(&params)))
    }

    pub fn at(&self, selector: &str) -> RoutesResult<Routes<R>> {
        self.bind(selector, Params::default())
    }

    /// Names a selector can continue with from this scope, sorted.
    pub fn children(&self) -> Vec<String> {
        let mut names: Vec<String> = match self.context.as_ref().and_then(RenderContext::cursor) {
            Some(cursor) => cursor
                .children()
                .keys()
                .cloned()
                .chain(cursor.recursive_name().map(str::to_string))
                .collect(),
            None => self.tree.routes().keys().cloned().collect(),
        };
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Resumes from an observed location. Matched values are parsed and
    /// merged into the carried params, then `overwrite` is applied on top.
    #[tracing::instrument(level = "trace", skip(self, overwrite))]
    pub fn from(&self, selector: &str, location: &str, overwrite: &Params) -> RoutesResult<Routes<R>> {
        let (context, matched) = self.resolve_location(selector, location)?;
        let typed = Params {
            path: parse_path_values(&context, &matched.path)?,
            query: parse_present_query_values(&context, &matched.query)?,
        };
        let params = self.params.merged(&typed).merged(overwrite);
        Ok(self.scoped(context, params))
    }

    /// Re-renders an observed location with `overwrite` applied. Path
    /// segments and query pairs the route does not declare are kept.
    #[tracing::instrument(level = "trace", skip(self, overwrite))]
    pub fn replace(&self, selector: &str, location: &str, overwrite: &Params) -> RoutesResult<R::Output> {
        let (context, matched) = self.resolve_location(selector, location)?;
        let extended = context.with_tail(&matched.tail);
        let typed = Params {
            path: parse_path_values(&context, &matched.path)?,
            query: parse_present_query_values(&context, &matched.query)?,
        };
        let params = self.params.merged(&typed).merged(overwrite);
        Ok(self.renderer.render_path(&extended, &params)?)
    }

    // An absolute location can only line up with the anchored context.
    fn resolve_location(
        &self,
        selector: &str,
        location: &str,
    ) -> RoutesResult<(RenderContext, MatchedLocation)> {
        let compiled = self.compile(selector)?;
        let context = if compiled.is_relative() && location.starts_with('/') {
            compiled.anchored()
        } else {
            compiled
        };
        let matched = match_location(&context, location, &self.options)?;
        Ok((context, matched))
    }

    fn scoped(&self, context: RenderContext, params: Params) -> Routes<R> {
        Routes {
            tree: Arc::clone(&self.tree),
            renderer: Arc::clone(&self.renderer),
            options: Arc::clone(&self.options),
            context: Some(context),
            params,
        }
    }
}
