mod error;
mod node;
mod segment;
mod tree;

pub use error::{TreeError, TreeResult};
pub use node::{RouteMap, RouteNode};
pub use segment::{Param, Requiredness, Segment};
pub use tree::RouteTree;
