use std::sync::Arc;

use super::{Param, RouteMap, RouteNode, Segment, TreeError, TreeResult};

/// Named top-level routes. Immutable once handed to the routes facade.
#[derive(Debug, Clone, Default)]
pub struct RouteTree {
    routes: RouteMap,
}

impl RouteTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, name: impl Into<String>, node: RouteNode) -> Self {
        self.routes.insert(name.into(), Arc::new(node));
        self
    }

    pub fn routes(&self) -> &RouteMap {
        &self.routes
    }

    pub fn get(&self, name: &str) -> Option<&Arc<RouteNode>> {
        self.routes.get(name)
    }

    /// Checks names, path/template exclusivity and parameter uniqueness along
    /// every root-to-node chain. Recursive self references are not followed.
    #[tracing::instrument(level = "trace", skip(self), fields(routes = self.routes.len() as u64))]
    pub fn validate(&self, relative_marker: char) -> TreeResult<()> {
        let mut path_names = Vec::new();
        let mut query_names = Vec::new();
        for (name, node) in &self.routes {
            validate_node(
                name,
                name,
                node,
                relative_marker,
                &mut path_names,
                &mut query_names,
            )?;
        }
        Ok(())
    }
}

fn validate_node<'a>(
    name: &str,
    chain: &str,
    node: &'a RouteNode,
    relative_marker: char,
    path_names: &mut Vec<&'a str>,
    query_names: &mut Vec<&'a str>,
) -> TreeResult<()> {
    validate_node_name(name, relative_marker)?;
    if let Some(recursive) = node.recursive_name() {
        validate_node_name(recursive, relative_marker)?;
    }

    if node.path_segments().is_some() && node.template_str().is_some() {
        return Err(TreeError::PathAndTemplate {
            node: chain.to_string(),
        });
    }

    let path_checkpoint = path_names.len();
    let query_checkpoint = query_names.len();

    for segment in node.path_segments().unwrap_or_default() {
        match segment {
            Segment::Literal(literal) if literal.is_empty() => {
                return Err(TreeError::EmptyLiteral {
                    node: chain.to_string(),
                });
            }
            Segment::Literal(_) => {}
            Segment::Param(param) => register_param(param, chain, path_names)?,
        }
    }

    for param in node.query_params() {
        register_param(param, chain, query_names)?;
    }

    for (child_name, child) in node.children() {
        let child_chain = format!("{chain}/{child_name}");
        validate_node(
            child_name,
            &child_chain,
            child,
            relative_marker,
            path_names,
            query_names,
        )?;
    }

    path_names.truncate(path_checkpoint);
    query_names.truncate(query_checkpoint);

    Ok(())
}

fn register_param<'a>(param: &'a Param, chain: &str, seen: &mut Vec<&'a str>) -> TreeResult<()> {
    validate_param_name(param.name(), chain)?;
    if seen.contains(&param.name()) {
        return Err(TreeError::DuplicateParamName {
            name: param.name().to_string(),
            node: chain.to_string(),
        });
    }
    seen.push(param.name());
    Ok(())
}

fn validate_node_name(name: &str, relative_marker: char) -> TreeResult<()> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if name.contains('/') {
        "name contains '/'"
    } else if name.starts_with(relative_marker) {
        "name starts with the relative marker"
    } else {
        return Ok(());
    };
    Err(TreeError::InvalidNodeName {
        name: name.to_string(),
        reason,
    })
}

fn validate_param_name(name: &str, chain: &str) -> TreeResult<()> {
    let mut chars = name.chars();

    let Some(first) = chars.next() else {
        return Err(TreeError::ParameterNameEmpty {
            node: chain.to_string(),
        });
    };

    if !(first.is_ascii_alphabetic() || first == '_') {
        return Err(TreeError::ParameterInvalidStart {
            node: chain.to_string(),
            name: name.to_string(),
            found: first,
        });
    }

    if let Some(invalid) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
        return Err(TreeError::ParameterInvalidCharacter {
            node: chain.to_string(),
            name: name.to_string(),
            invalid,
        });
    }

    Ok(())
}
