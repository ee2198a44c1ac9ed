use hashbrown::HashMap as FastHashMap;
use std::borrow::Cow;
use std::sync::Arc;

use super::{Param, Segment};

pub type RouteMap = FastHashMap<String, Arc<RouteNode>>;

/// One path/query segment of a route tree together with its children.
#[derive(Debug, Clone, Default)]
pub struct RouteNode {
    path: Option<Vec<Segment>>,
    template: Option<String>,
    query: Vec<Param>,
    children: RouteMap,
    recursive: Option<String>,
}

impl RouteNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(mut self, segments: Vec<Segment>) -> Self {
        self.path = Some(segments);
        self
    }

    /// Pre-rendered path pattern, e.g. `*` for catch-all routes.
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn query<I>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = Param>,
    {
        self.query.extend(params);
        self
    }

    pub fn child(mut self, name: impl Into<String>, node: RouteNode) -> Self {
        self.children.insert(name.into(), Arc::new(node));
        self
    }

    /// Makes this node reachable as its own child under `name`.
    pub fn recursive(mut self, name: impl Into<String>) -> Self {
        self.recursive = Some(name.into());
        self
    }

    pub fn path_segments(&self) -> Option<&[Segment]> {
        self.path.as_deref()
    }

    pub fn template_str(&self) -> Option<&str> {
        self.template.as_deref()
    }

    pub fn query_params(&self) -> &[Param] {
        &self.query
    }

    pub fn children(&self) -> &RouteMap {
        &self.children
    }

    pub fn recursive_name(&self) -> Option<&str> {
        self.recursive.as_deref()
    }

    /// Segments this node appends to a compiled path.
    pub fn contribution(&self) -> Cow<'_, [Segment]> {
        if let Some(path) = &self.path {
            return Cow::Borrowed(path.as_slice());
        }
        match &self.template {
            Some(template) => Cow::Owned(vec![Segment::Literal(template.clone())]),
            None => Cow::Borrowed(&[]),
        }
    }

    pub(crate) fn resolve(self: &Arc<Self>, name: &str) -> Option<Arc<RouteNode>> {
        if let Some(child) = self.children.get(name) {
            return Some(Arc::clone(child));
        }
        if self.recursive.as_deref() == Some(name) {
            return Some(Arc::clone(self));
        }
        None
    }
}
