use std::sync::Arc;

use crate::matcher::Tail;
use crate::route::{Param, RouteNode, Segment};

/// Result of resolving a selector against a route tree.
///
/// `skipped` holds ancestors walked past for a relative selector; they do not
/// contribute to `path`/`query` but can be restored with [`RenderContext::anchored`].
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    skipped: Vec<Arc<RouteNode>>,
    nodes: Vec<Arc<RouteNode>>,
    path: Vec<Segment>,
    query: Vec<Param>,
    is_relative: bool,
    cursor: Option<Arc<RouteNode>>,
    passthrough_query: Vec<(String, String)>,
}

impl RenderContext {
    pub fn skipped(&self) -> &[Arc<RouteNode>] {
        &self.skipped
    }

    pub fn nodes(&self) -> &[Arc<RouteNode>] {
        &self.nodes
    }

    pub fn path(&self) -> &[Segment] {
        &self.path
    }

    pub fn query(&self) -> &[Param] {
        &self.query
    }

    pub fn is_relative(&self) -> bool {
        self.is_relative
    }

    /// Last node walked; the next selector resolves against its children.
    pub fn cursor(&self) -> Option<&Arc<RouteNode>> {
        self.cursor.as_ref()
    }

    /// Raw query entries carried over from a matched location. The renderer
    /// emits them for a query param that has no value of its own.
    pub fn passthrough_query(&self) -> &[(String, String)] {
        &self.passthrough_query
    }

    pub fn path_params(&self) -> impl Iterator<Item = &Param> {
        self.path.iter().filter_map(Segment::as_param)
    }

    /// Absolute context with the contributions of skipped ancestors restored
    /// in front of the selected nodes.
    pub fn anchored(&self) -> RenderContext {
        let mut anchored = RenderContext::default();
        for node in self.skipped.iter().chain(self.nodes.iter()) {
            anchored.select(Arc::clone(node));
        }
        anchored.cursor = self.cursor.clone();
        anchored
    }

    /// Copy extended with unmatched location pieces so they render verbatim.
    pub fn with_tail(&self, tail: &Tail) -> RenderContext {
        let mut extended = self.clone();
        extended.path.extend(
            tail.path_segments
                .iter()
                .map(|segment| Segment::Literal(segment.clone())),
        );
        extended.query.extend(tail.query_params.iter().cloned());
        extended
            .passthrough_query
            .extend(tail.query_pairs.iter().cloned());
        extended
    }

    pub(crate) fn select(&mut self, node: Arc<RouteNode>) {
        self.path.extend(node.contribution().iter().cloned());
        self.query.extend(node.query_params().iter().cloned());
        self.cursor = Some(Arc::clone(&node));
        self.nodes.push(node);
    }

    pub(crate) fn skip(&mut self, node: Arc<RouteNode>) {
        self.cursor = Some(Arc::clone(&node));
        self.skipped.push(node);
    }

    pub(crate) fn make_relative(&mut self) {
        self.skipped.append(&mut self.nodes);
        self.path.clear();
        self.query.clear();
        self.passthrough_query.clear();
        self.is_relative = true;
    }
}
