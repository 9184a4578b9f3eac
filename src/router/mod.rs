// Gateway module for router - location matching, history and the post-render hook
// Callers go through these re-exports, never the private submodules

mod dispatcher;
mod history;
mod routes;

pub use dispatcher::{MenuEntry, RenderedPage, Router};
pub use history::History;
pub use routes::{resolve, Route, ROUTES};
