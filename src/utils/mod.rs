// Gateway module for utils
// Callers go through these re-exports, never the private submodules

mod errors;
mod logger;

pub use errors::NoirError;
pub use logger::{init_logger, LogTarget};
