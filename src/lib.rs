pub mod compiler;
pub mod errors;
pub mod matcher;
pub mod params;
pub mod parser;
pub mod render;
pub mod route;
pub mod routes;

pub use compiler::RenderContext;
pub use errors::{RoutesError, RoutesResult, SafeOutcome, safe_call};
pub use params::{ParamMap, Params, QuerySource, RawParams};
pub use parser::ParamValue;
pub use render::{DefaultRenderer, RenderedLocation, Renderer, StructuredRenderer};
pub use route::{Param, RouteNode, RouteTree, Segment};
pub use routes::{Routes, RoutesOptions, create_routes, create_routes_with};
