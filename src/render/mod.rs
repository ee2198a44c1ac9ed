mod default;
mod error;
mod structured;

pub use default::DefaultRenderer;
pub use error::{RenderError, RenderResult};
pub use structured::{RenderedLocation, StructuredRenderer};

use std::fmt;

use crate::compiler::RenderContext;
use crate::params::{ParamMap, Params};
use crate::route::{Param, Segment};

/// Turns a compiled context into a template or a concrete location.
///
/// Implementations must fail with [`RenderError::MissingRequiredParameter`]
/// when a required path or query parameter has no value, and must skip
/// optional parameters without one.
pub trait Renderer: Send + Sync + fmt::Debug {
    type Output;

    fn render_template(&self, context: &RenderContext) -> String {
        template_string(context)
    }

    fn render_path(&self, context: &RenderContext, params: &Params) -> RenderResult<Self::Output>;
}

/// `/`-joined template tokens, with a leading `/` unless the context is relative.
pub fn template_string(context: &RenderContext) -> String {
    let tokens: Vec<String> = context
        .path()
        .iter()
        .map(Segment::template_token)
        .filter(|token| !token.is_empty())
        .collect();
    let joined = tokens.join("/");
    if context.is_relative() {
        joined
    } else {
        format!("/{joined}")
    }
}

/// Serialized path segments in order; optional parameters without a value are dropped.
pub(crate) fn serialize_path(
    context: &RenderContext,
    params: &Params,
    encode: bool,
) -> RenderResult<Vec<String>> {
    let mut segments = Vec::with_capacity(context.path().len());
    for segment in context.path() {
        match segment {
            Segment::Literal(literal) if literal.is_empty() => {}
            Segment::Literal(literal) => segments.push(literal.clone()),
            Segment::Param(param) => {
                if let Some(value) = serialize_param(context, param, &params.path)? {
                    segments.push(if encode {
                        urlencoding::encode(&value).into_owned()
                    } else {
                        value
                    });
                }
            }
        }
    }
    Ok(segments)
}

/// Serialized `(key, value)` query pairs in declaration order, not yet encoded.
///
/// A param without a value falls back to every passthrough entry with its
/// name, so repeated keys from a matched location survive.
pub(crate) fn serialize_query(
    context: &RenderContext,
    params: &Params,
) -> RenderResult<Vec<(String, String)>> {
    let mut pairs = Vec::with_capacity(context.query().len());
    for param in context.query() {
        if !params.query.contains_key(param.name()) {
            let before = pairs.len();
            pairs.extend(
                context
                    .passthrough_query()
                    .iter()
                    .filter(|(key, _)| key == param.name())
                    .cloned(),
            );
            if pairs.len() > before {
                continue;
            }
        }
        if let Some(value) = serialize_param(context, param, &params.query)? {
            pairs.push((param.name().to_string(), value));
        }
    }
    Ok(pairs)
}

fn serialize_param(
    context: &RenderContext,
    param: &Param,
    values: &ParamMap,
) -> RenderResult<Option<String>> {
    match values.get(param.name()) {
        Some(value) => param
            .parser()
            .serialize(value)
            .map(Some)
            .map_err(|source| RenderError::Serialize {
                name: param.name().to_string(),
                source,
            }),
        None if param.is_optional() => Ok(None),
        None => Err(RenderError::MissingRequiredParameter {
            name: param.name().to_string(),
            template: template_string(context),
        }),
    }
}
