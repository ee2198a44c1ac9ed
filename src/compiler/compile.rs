use std::sync::Arc;

use super::{CompileError, CompileResult, RenderContext, split_selector};
use crate::route::{RouteNode, RouteTree};

/// Resolves `selector` against `tree`, continuing from `parent` when given.
///
/// Names before the first relative marker only move the cursor (their nodes
/// are recorded as skipped); names from the marker on contribute path and
/// query segments. The tree is never modified.
#[tracing::instrument(level = "trace", skip(tree, parent))]
pub fn compile(
    tree: &RouteTree,
    selector: &str,
    parent: Option<&RenderContext>,
    relative_marker: char,
) -> CompileResult<RenderContext> {
    let mut context = parent.cloned().unwrap_or_default();
    let split = split_selector(selector, relative_marker);

    if split.is_empty() {
        return Ok(context);
    }

    let selected = match &split.relative {
        Some(relative) => {
            context.make_relative();
            for name in &split.absolute {
                let node = resolve(tree, &context, name, selector)?;
                context.skip(node);
            }
            relative
        }
        None => &split.absolute,
    };

    for name in selected {
        let node = resolve(tree, &context, name, selector)?;
        warn_on_shadowed_params(&context, &node, name);
        context.select(node);
    }

    Ok(context)
}

fn resolve(
    tree: &RouteTree,
    context: &RenderContext,
    name: &str,
    selector: &str,
) -> CompileResult<Arc<RouteNode>> {
    let found = match context.cursor() {
        Some(cursor) => cursor.resolve(name),
        None => tree.get(name).cloned(),
    };
    found.ok_or_else(|| CompileError::NameNotFound {
        name: name.to_string(),
        selector: selector.to_string(),
    })
}

// Only reachable through recursive nodes; the tree validator rejects static collisions.
fn warn_on_shadowed_params(context: &RenderContext, node: &RouteNode, name: &str) {
    for segment in node.contribution().iter() {
        if let Some(param) = segment.as_param()
            && context.path_params().any(|p| p.name() == param.name())
        {
            tracing::warn!(
                route = name,
                param = param.name(),
                "parameter name repeats along the selected chain; occurrences share one value"
            );
        }
    }
}
