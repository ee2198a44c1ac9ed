use super::{RenderResult, Renderer, serialize_path, serialize_query};
use crate::compiler::RenderContext;
use crate::params::Params;

/// Renders a context to a single location string such as `/blog/en?page=2`.
#[derive(Debug, Clone, Copy)]
pub struct DefaultRenderer {
    encode_uri: bool,
}

impl DefaultRenderer {
    pub fn new(encode_uri: bool) -> Self {
        Self { encode_uri }
    }
}

impl Default for DefaultRenderer {
    fn default() -> Self {
        Self { encode_uri: true }
    }
}

impl Renderer for DefaultRenderer {
    type Output = String;

    #[tracing::instrument(level = "trace", skip_all, fields(segments = context.path().len() as u64))]
    fn render_path(&self, context: &RenderContext, params: &Params) -> RenderResult<String> {
        let segments = serialize_path(context, params, self.encode_uri)?;
        let query = serialize_query(context, params)?;

        let mut out = String::new();
        if !context.is_relative() {
            out.push('/');
        }
        out.push_str(&segments.join("/"));

        if !query.is_empty() {
            out.push('?');
            let joined: Vec<String> = query
                .iter()
                .map(|(key, value)| {
                    if self.encode_uri {
                        format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
                    } else {
                        format!("{key}={value}")
                    }
                })
                .collect();
            out.push_str(&joined.join("&"));
        }

        Ok(out)
    }
}
