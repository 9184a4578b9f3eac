// Gateway module for content - the static portfolio document
// Callers go through these re-exports, never the private submodules

mod loader;
mod types;

pub use loader::{load, source_from_spec, ContentSource, FileSource, HttpSource, LoadError};
pub use types::{AppConfig, Profile, Project};
