use tracing::debug;

use crate::content::AppConfig;
use crate::gate::MountToken;

use super::history::History;
use super::routes::{resolve, Route, ROUTES};

/// One menu entry as drawn in the shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub path: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Result of processing the current location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// Location as requested, possibly undeclared
    pub location: String,
    /// Path of the route that actually rendered
    pub path: &'static str,
    pub markup: String,
    pub menu: Vec<MenuEntry>,
    /// Set when this render mounts a fresh contact gate
    pub gate: Option<MountToken>,
}

/// Matches locations to views and keeps navigation history
#[derive(Debug)]
pub struct Router {
    routes: &'static [Route],
    history: History,
    next_mount: u64,
}

impl Router {
    pub fn new(initial_location: impl Into<String>) -> Self {
        Self {
            routes: &ROUTES,
            history: History::new(initial_location),
            next_mount: 0,
        }
    }

    pub fn routes(&self) -> &'static [Route] {
        self.routes
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Follow an in-app link: push the location, then render it
    pub fn navigate(&mut self, location: &str, config: &AppConfig) -> RenderedPage {
        self.history.push(location);
        self.process_route(config)
    }

    /// Step back in history; `None` when already at the oldest entry
    pub fn back(&mut self, config: &AppConfig) -> Option<RenderedPage> {
        self.history.back()?;
        Some(self.process_route(config))
    }

    /// Step forward in history; `None` when already at the newest entry
    pub fn forward(&mut self, config: &AppConfig) -> Option<RenderedPage> {
        self.history.forward()?;
        Some(self.process_route(config))
    }

    /// Render whatever the current location resolves to
    pub fn process_route(&mut self, config: &AppConfig) -> RenderedPage {
        let location = self.history.current().to_string();
        let route = *resolve(self.routes, &location);

        if route.path != location {
            debug!("No route for {:?}, falling back to {}", location, route.path);
        }

        let markup = (route.render)(config);
        let menu = self.menu(route.path);
        let gate = route.mounts_gate.then(|| self.issue_mount());

        debug!("Rendered {} ({} bytes)", route.path, markup.len());

        RenderedPage {
            location,
            path: route.path,
            markup,
            menu,
            gate,
        }
    }

    /// Menu with exactly one active entry
    pub fn menu(&self, active_path: &str) -> Vec<MenuEntry> {
        self.routes
            .iter()
            .map(|route| MenuEntry {
                path: route.path,
                label: route.label,
                active: route.path == active_path,
            })
            .collect()
    }

    fn issue_mount(&mut self) -> MountToken {
        self.next_mount += 1;
        MountToken::new(self.next_mount)
    }
}
