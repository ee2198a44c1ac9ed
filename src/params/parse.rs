use super::{ParamMap, ParamsError, ParamsResult, RawParams};
use crate::compiler::RenderContext;
use crate::render::template_string;
use crate::route::Param;

/// Parses the raw values of every path parameter in `context`.
pub fn parse_path_values(context: &RenderContext, raw: &RawParams) -> ParamsResult<ParamMap> {
    parse_values(context, context.path_params(), raw, true)
}

/// Parses the raw values of every query parameter in `context`; undeclared
/// keys in `raw` are ignored.
pub fn parse_query_values(context: &RenderContext, raw: &RawParams) -> ParamsResult<ParamMap> {
    parse_values(context, context.query().iter(), raw, true)
}

/// Like [`parse_query_values`] but a missing required value is left for the
/// renderer to report, so carried or overwrite params can still supply it.
pub(crate) fn parse_present_query_values(
    context: &RenderContext,
    raw: &RawParams,
) -> ParamsResult<ParamMap> {
    parse_values(context, context.query().iter(), raw, false)
}

fn parse_values<'a>(
    context: &RenderContext,
    params: impl Iterator<Item = &'a Param>,
    raw: &RawParams,
    strict: bool,
) -> ParamsResult<ParamMap> {
    let mut parsed = ParamMap::new();
    for param in params {
        match raw.get(param.name()) {
            Some(value) => {
                let typed = param
                    .parser()
                    .parse(value)
                    .map_err(|source| ParamsError::Parse {
                        name: param.name().to_string(),
                        source,
                    })?;
                parsed.insert(param.name().to_string(), typed);
            }
            None if param.is_optional() || !strict => {}
            None => {
                return Err(ParamsError::MissingRequiredParameter {
                    name: param.name().to_string(),
                    template: template_string(context),
                });
            }
        }
    }
    Ok(parsed)
}
