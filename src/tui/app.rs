use std::sync::Arc;

use tracing::{debug, info};

use crate::app::AppState;
use crate::constants::UI_SCROLL_LINES;
use crate::gate::{GateController, GateEffect, GatePhase, GateTimings};
use crate::router::{History, RenderedPage, Router};
use crate::views;

use super::event::UiEvent;
use super::input::{Action, Focus};
use super::theme::Theme;

/// Shell state: the page on screen, the mounted gate and the prompt
pub struct App {
    /// Immutable application state
    pub state: Arc<AppState>,
    router: Router,
    page: RenderedPage,
    gate: Option<GateController>,
    timings: GateTimings,
    /// Where typed keys go
    pub focus: Focus,
    /// Highlighted menu row
    pub menu_cursor: usize,
    /// `:` prompt buffer
    pub command_input: String,
    /// Status message
    pub status_message: Option<String>,
    /// Scroll offset for the content region
    pub scroll_offset: u16,
    pub theme: Theme,
    /// Is the app running?
    pub running: bool,
}

impl App {
    /// Create the shell and render the initial location
    pub fn new(state: Arc<AppState>, initial_location: &str) -> Self {
        let mut router = Router::new(initial_location);
        let page = router.process_route(&state.config);
        let timings = GateTimings::from(&state.settings.gate);
        let theme = Theme::by_name(&state.settings.ui.theme).unwrap_or_default();

        let mut app = Self {
            state,
            router,
            page: page.clone(),
            gate: None,
            timings,
            focus: Focus::Menu,
            menu_cursor: 0,
            command_input: String::new(),
            status_message: None,
            scroll_offset: 0,
            theme,
            running: true,
        };
        app.apply_page(page);
        app
    }

    pub fn page(&self) -> &RenderedPage {
        &self.page
    }

    pub fn gate(&self) -> Option<&GateController> {
        self.gate.as_ref()
    }

    /// Swap in a freshly rendered page; any previous gate goes with the old page
    fn apply_page(&mut self, page: RenderedPage) {
        if let Some(old) = self.gate.take() {
            debug!("Discarding {}", old.token());
        }
        self.gate = page
            .gate
            .map(|token| GateController::mount(token, self.timings));

        self.menu_cursor = page.menu.iter().position(|m| m.active).unwrap_or(0);
        self.scroll_offset = 0;
        if self.focus == Focus::GateInput {
            self.focus = Focus::Menu;
        }
        info!("Location {} -> {}", page.location, page.path);
        self.page = page;
    }

    pub fn history(&self) -> &History {
        self.router.history()
    }

    /// Follow an in-app link
    pub fn navigate(&mut self, location: &str) {
        let page = self.router.navigate(location, &self.state.config);
        self.apply_page(page);
    }

    pub fn go_back(&mut self) {
        match self.router.back(&self.state.config) {
            Some(page) => self.apply_page(page),
            None => self.set_status("Already at the oldest entry"),
        }
    }

    pub fn go_forward(&mut self) {
        match self.router.forward(&self.state.config) {
            Some(page) => self.apply_page(page),
            None => self.set_status("Already at the newest entry"),
        }
    }

    /// Markup for the content region, with the live contact zone on the profile page
    pub fn content_markup(&self) -> String {
        match &self.gate {
            Some(gate) => format!(
                "{}{}",
                views::profile_fields(&self.state.config),
                views::contact_zone(gate.zone())
            ),
            None => self.page.markup.clone(),
        }
    }

    /// Set status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.running = false;
    }

    fn open_index(&mut self, index: usize) {
        if let Some(route) = self.router.routes().get(index) {
            self.navigate(route.path);
        }
    }

    fn reveal(&mut self) -> Option<GateEffect> {
        let Some(gate) = self.gate.as_mut() else {
            self.set_status("Nothing to decrypt here");
            return None;
        };
        gate.activate()
    }

    /// Submit whatever the key field holds, as the `[ENTER]` control does
    fn submit_gate(&mut self) -> Option<GateEffect> {
        let Some(gate) = self.gate.as_mut() else {
            self.set_status("Nothing to submit here");
            return None;
        };
        let effect = gate.submit();
        if effect.is_none() {
            self.set_status("Key field is not open (press d)");
        }
        effect
    }

    fn focus_gate(&mut self) {
        if let Some(gate) = self.gate.as_mut() {
            let token = gate.token();
            if gate.focus(token) {
                self.focus = Focus::GateInput;
            }
        }
    }

    /// Apply a user action; returns effects the loop must schedule
    pub fn dispatch(&mut self, action: Action) -> Vec<GateEffect> {
        let mut effects = Vec::new();

        match (self.focus, action) {
            (_, Action::Quit) => self.quit(),
            (_, Action::None) => {}

            (Focus::Command, Action::Insert(c)) => self.command_input.push(c),
            (Focus::Command, Action::Delete) => {
                if self.command_input.pop().is_none() {
                    self.focus = Focus::Menu;
                }
            }
            (Focus::Command, Action::Submit) => {
                let command = std::mem::take(&mut self.command_input);
                self.focus = Focus::Menu;
                effects.extend(self.run_command(&command));
            }
            (Focus::Command, Action::Blur) => {
                self.command_input.clear();
                self.focus = Focus::Menu;
            }

            (Focus::GateInput, Action::Insert(c)) => {
                if let Some(gate) = self.gate.as_mut() {
                    gate.push_char(c);
                }
            }
            (Focus::GateInput, Action::Delete) => {
                if let Some(gate) = self.gate.as_mut() {
                    gate.pop_char();
                }
            }
            (Focus::GateInput, Action::Submit) => {
                if let Some(gate) = self.gate.as_mut() {
                    effects.extend(gate.submit());
                }
            }
            (Focus::GateInput, Action::Blur) => {
                if let Some(gate) = self.gate.as_mut() {
                    gate.blur();
                }
                self.focus = Focus::Menu;
            }

            (Focus::Menu, Action::MenuUp) => {
                self.menu_cursor = self.menu_cursor.saturating_sub(1);
            }
            (Focus::Menu, Action::MenuDown) => {
                let last = self.router.routes().len().saturating_sub(1);
                self.menu_cursor = (self.menu_cursor + 1).min(last);
            }
            (Focus::Menu, Action::OpenSelected) => self.open_index(self.menu_cursor),
            (Focus::Menu, Action::OpenIndex(index)) => self.open_index(index),
            (Focus::Menu, Action::Back) => self.go_back(),
            (Focus::Menu, Action::Forward) => self.go_forward(),
            (Focus::Menu, Action::Reveal) => effects.extend(self.reveal()),
            (Focus::Menu, Action::FocusGate) => self.focus_gate(),
            (Focus::Menu, Action::EnterCommand) => {
                self.command_input.clear();
                self.focus = Focus::Command;
            }
            (Focus::Menu, Action::ScrollUp) => {
                self.scroll_offset = self.scroll_offset.saturating_sub(UI_SCROLL_LINES);
            }
            (Focus::Menu, Action::ScrollDown) => {
                self.scroll_offset = self.scroll_offset.saturating_add(UI_SCROLL_LINES);
            }

            _ => {}
        }

        effects
    }

    /// Apply an event from scheduled work. Events for an unmounted gate are dropped.
    pub fn handle_event(&mut self, event: UiEvent) -> Vec<GateEffect> {
        let Some(gate) = self.gate.as_mut() else {
            debug!("No gate mounted, dropping {:?}", event_kind(&event));
            return Vec::new();
        };

        let mut effects = Vec::new();
        match event {
            UiEvent::FocusGate { token } => {
                if gate.focus(token) && self.focus == Focus::Menu {
                    self.focus = Focus::GateInput;
                }
            }
            UiEvent::AttemptFinished { token, outcome } => {
                effects.extend(gate.complete(token, outcome));
                match gate.phase() {
                    GatePhase::Revealed if self.focus == Focus::GateInput => {
                        self.focus = Focus::Menu;
                    }
                    GatePhase::Denied(_) if gate.is_focused() && self.focus == Focus::Menu => {
                        self.focus = Focus::GateInput;
                    }
                    _ => {}
                }
            }
            UiEvent::ClearShake { token } => gate.clear_shake(token),
        }
        effects
    }

    /// Run a `:` command
    pub fn run_command(&mut self, command: &str) -> Vec<GateEffect> {
        let parts: Vec<&str> = command.split_whitespace().collect();
        let mut effects = Vec::new();

        match parts.first().copied() {
            Some("quit") | Some("q") => self.quit(),
            Some("open") | Some("cd") | Some("goto") => match parts.get(1) {
                Some(path) => self.navigate(path),
                None => self.set_status("Usage: :open <path>"),
            },
            Some("back") => self.go_back(),
            Some("forward") => self.go_forward(),
            Some("reveal") | Some("decrypt") => {
                effects.extend(self.reveal());
            }
            Some("enter") | Some("submit") => {
                effects.extend(self.submit_gate());
            }
            Some("theme") => match parts.get(1).and_then(|name| Theme::by_name(name)) {
                Some(theme) => {
                    self.set_status(format!("Theme: {}", theme.name));
                    self.theme = theme;
                }
                None => self.set_status(format!(
                    "Themes: {}",
                    Theme::available().join(", ")
                )),
            },
            Some("routes") => {
                let paths: Vec<&str> = self.router.routes().iter().map(|r| r.path).collect();
                self.set_status(format!("Routes: {}", paths.join("  ")));
            }
            Some("help") | Some("h") => self.set_status(
                "1-4 open · ←/→ back/forward · d decrypt · Tab key field · :enter submit key · :open <path> · :theme <name> · q quit",
            ),
            Some(_) => self.set_status(format!("Unknown command: {}", command)),
            None => self.clear_status(),
        }

        effects
    }
}

fn event_kind(event: &UiEvent) -> &'static str {
    match event {
        UiEvent::FocusGate { .. } => "focus",
        UiEvent::AttemptFinished { .. } => "attempt result",
        UiEvent::ClearShake { .. } => "shake reset",
    }
}
