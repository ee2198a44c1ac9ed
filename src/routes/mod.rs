mod options;
mod service;

pub use options::{DEFAULT_RELATIVE_MARKER, OptionsError, RoutesOptions, RoutesOptionsBuilder};
pub use service::{Routes, create_routes, create_routes_with};
