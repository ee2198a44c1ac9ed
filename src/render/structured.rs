use serde::Serialize;

use super::{RenderResult, Renderer, serialize_path, serialize_query};
use crate::compiler::RenderContext;
use crate::params::Params;

/// Location split into an encoded path and raw query pairs, for routers that
/// take the two separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedLocation {
    pub path: String,
    pub query: Vec<(String, String)>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredRenderer;

impl Renderer for StructuredRenderer {
    type Output = RenderedLocation;

    fn render_path(
        &self,
        context: &RenderContext,
        params: &Params,
    ) -> RenderResult<RenderedLocation> {
        let segments = serialize_path(context, params, true)?;
        let joined = segments.join("/");
        let path = if context.is_relative() {
            joined
        } else {
            format!("/{joined}")
        };
        Ok(RenderedLocation {
            path,
            query: serialize_query(context, params)?,
        })
    }
}
