mod compile;
mod context;
mod error;
mod selector;

pub use compile::compile;
pub use context::RenderContext;
pub use error::{CompileError, CompileResult};
pub use selector::{Selector, split_selector};
