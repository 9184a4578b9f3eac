use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::constants::UI_MENU_WIDTH;
use crate::tui::app::App;
use crate::tui::input::Focus;
use crate::tui::markdown::parse_markdown;
use crate::tui::theme::Theme;

/// Render the page shell
pub fn render_ui(frame: &mut Frame, app: &App) {
    frame.render_widget(Block::default().style(app.theme.base()), frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(8),    // Menu + content
            Constraint::Length(1), // Gate status
            Constraint::Length(3), // Prompt
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(UI_MENU_WIDTH), Constraint::Min(20)])
        .split(chunks[1]);

    render_menu(frame, body[0], app);
    render_content(frame, body[1], app);
    render_gate_status(frame, chunks[2], app);
    render_prompt(frame, chunks[3], app);
    render_status_bar(frame, chunks[4], app);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let colors = &app.theme.colors;
    let mut spans = vec![
        Span::styled(
            "NOIR_NET",
            Style::default()
                .fg(colors.header.to_color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" // TERMINAL", app.theme.dim()),
        Span::raw(" | "),
        Span::styled(
            app.state.alias().to_string(),
            Style::default().fg(colors.text_primary.to_color()),
        ),
        Span::raw(" | "),
        Span::styled(
            app.page().location.clone(),
            Style::default().fg(colors.accent.to_color()),
        ),
    ];

    if app.state.settings.ui.show_clock {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            chrono::Local::now().format("%H:%M:%S").to_string(),
            app.theme.dim(),
        ));
    }

    let header = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(colors.border.to_color())),
        )
        .alignment(Alignment::Center);

    frame.render_widget(header, area);
}

fn render_menu(frame: &mut Frame, area: Rect, app: &App) {
    let colors = &app.theme.colors;

    let items: Vec<ListItem> = app
        .page()
        .menu
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let marker = if entry.active { "▶ " } else { "  " };
            let mut style = if entry.active {
                Style::default()
                    .fg(colors.menu_active.to_color())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.text_secondary.to_color())
            };
            if idx == app.menu_cursor && app.focus == Focus::Menu {
                style = style.add_modifier(Modifier::REVERSED);
            }

            ListItem::new(Line::from(vec![
                Span::styled(format!("{}{} ", marker, idx + 1), app.theme.dim()),
                Span::styled(entry.label, style),
            ]))
        })
        .collect();

    let border = if app.focus == Focus::Menu {
        colors.border_focused.to_color()
    } else {
        colors.border.to_color()
    };

    let menu = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(" MENU ")
            .title_bottom(history_hint(app)),
    );

    frame.render_widget(menu, area);
}

/// `◀ ▶` markers, greyed out at either end of history
fn history_hint(app: &App) -> Line<'static> {
    let colors = &app.theme.colors;
    let marker = |label: &'static str, enabled: bool| {
        let color = if enabled {
            colors.accent.to_color()
        } else {
            colors.text_disabled.to_color()
        };
        Span::styled(label, Style::default().fg(color))
    };

    Line::from(vec![
        marker(" ◀ back ", app.history().can_go_back()),
        marker(" fwd ▶ ", app.history().can_go_forward()),
    ])
}

fn render_content(frame: &mut Frame, area: Rect, app: &App) {
    let lines = parse_markdown(&app.content_markup(), &app.theme);

    // Keep the last line reachable but no further
    let visible = area.height.saturating_sub(2);
    let max_scroll = (lines.len() as u16).saturating_sub(visible);
    let scroll = app.scroll_offset.min(max_scroll);

    let title = format!(" {} ", app.page().path);
    let content = Paragraph::new(lines)
        .style(Style::default().fg(app.theme.colors.text_primary.to_color()))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.colors.border.to_color()))
                .title(title),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));

    frame.render_widget(content, area);
}

/// The gate's status line; reversed while the denial shake runs
fn render_gate_status(frame: &mut Frame, area: Rect, app: &App) {
    let Some(gate) = app.gate() else {
        return;
    };
    let Some(status) = gate.status() else {
        return;
    };

    let mut style = app.theme.error().add_modifier(Modifier::BOLD);
    if gate.is_shaking() {
        style = style.add_modifier(Modifier::REVERSED);
    }
    let indent = if gate.is_shaking() { "   " } else { " " };

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(format!("{}{}", indent, status), style))),
        area,
    );
}

fn render_prompt(frame: &mut Frame, area: Rect, app: &App) {
    let colors = &app.theme.colors;

    let (title, text, border) = match app.focus {
        Focus::Command => (
            " Enter Command ",
            format!(":{}", app.command_input),
            colors.border_focused.to_color(),
        ),
        Focus::GateInput => (
            " Decryption Key (Enter to submit • Esc to leave) ",
            "●".repeat(app.gate().map(|g| g.input_len()).unwrap_or(0)),
            colors.border_focused.to_color(),
        ),
        Focus::Menu => (
            " 1-4 open • ←/→ history • d decrypt • : command • q quit ",
            String::new(),
            colors.border.to_color(),
        ),
    };

    let prompt = Paragraph::new(text.clone())
        .style(Style::default().fg(colors.text_primary.to_color()))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(title),
        );

    frame.render_widget(prompt, area);

    if app.focus != Focus::Menu {
        let cursor_x = area.x + 1 + text.chars().count() as u16;
        let cursor_x = cursor_x.min(area.x + area.width.saturating_sub(2));
        frame.set_cursor_position((cursor_x, area.y + 1));
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let colors = &app.theme.colors;

    let (mode, mode_color) = match app.focus {
        Focus::Menu => ("BROWSE", colors.success.to_color()),
        Focus::GateInput => ("KEY", colors.accent.to_color()),
        Focus::Command => ("COMMAND", colors.accent.to_color()),
    };

    let status_text = app.status_message.clone().unwrap_or_else(|| "Ready".to_string());

    let mut spans = vec![
        Span::styled(
            format!(" {} ", mode),
            Style::default()
                .bg(mode_color)
                .fg(colors.background.to_color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::raw(status_text),
        Span::raw(" | "),
        Span::styled(
            format!(
                "src: {} @ {}",
                app.state.source,
                app.state.loaded_at.format("%H:%M:%S")
            ),
            app.theme.dim(),
        ),
        Span::raw(" | "),
    ];
    if !app.state.cipher.is_available() {
        spans.push(Span::styled(
            "CIPHER OFFLINE",
            app.theme.error().add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" | "));
    }
    spans.push(Span::styled("Ctrl+C: quit", app.theme.dim()));

    let status_bar = Paragraph::new(vec![Line::from(spans)])
        .style(Style::default().bg(colors.background.to_color()))
        .block(Block::default());

    frame.render_widget(status_bar, area);
}

/// Full-screen error shown when the content document cannot be loaded
pub fn render_critical(frame: &mut Frame, reason: &str, theme: &Theme) {
    let area = frame.area();
    frame.render_widget(Block::default().style(theme.base()), area);

    let lines = vec![
        Line::from(Span::styled(
            "CRITICAL ERROR",
            theme.error().add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(format!("ERROR CODE: {}", reason), theme.error())),
        Line::from(Span::styled("CONTACT ADMINISTRATOR.", theme.dim())),
        Line::default(),
        Line::from(Span::styled("press any key to exit", theme.dim())),
    ];

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Length(lines.len() as u16 + 2),
            Constraint::Min(0),
        ])
        .split(area);

    let panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.error()),
        );

    frame.render_widget(panel, vertical[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{AppState, Settings};
    use crate::cipher::CipherAdapter;
    use crate::content::AppConfig;
    use crate::tui::input::Action;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn app(location: &str) -> App {
        let state = AppState::new(
            AppConfig::sample(),
            Settings::default(),
            CipherAdapter::unavailable(),
            "assets/config.json",
        );
        App::new(Arc::new(state), location)
    }

    #[test]
    fn test_shell_renders_menu_and_page() {
        let app = app("/skills");
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render_ui(f, &app)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("NOIR_NET"));
        assert!(text.contains("CASE_FILES"));
        assert!(text.contains("ALL SYSTEMS OPERATIONAL"));
        assert!(text.contains("BROWSE"));
    }

    #[test]
    fn test_status_bar_flags_missing_cipher() {
        let app = app("/");
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| render_ui(f, &app)).unwrap();
        assert!(screen_text(&terminal).contains("CIPHER OFFLINE"));

        let state = AppState::new(
            AppConfig::sample(),
            Settings::default(),
            CipherAdapter::new(Arc::new(crate::cipher::CryptoJsAes)),
            "assets/config.json",
        );
        let app = App::new(Arc::new(state), "/");
        terminal.draw(|f| render_ui(f, &app)).unwrap();
        assert!(!screen_text(&terminal).contains("CIPHER OFFLINE"));
    }

    #[test]
    fn test_history_hint_colors() {
        let mut app = app("/");
        let disabled = app.theme.colors.text_disabled.to_color();
        let accent = app.theme.colors.accent.to_color();

        let hint = history_hint(&app);
        assert_eq!(hint.spans[0].style.fg, Some(disabled));
        assert_eq!(hint.spans[1].style.fg, Some(disabled));

        app.dispatch(Action::OpenIndex(1));
        let hint = history_hint(&app);
        assert_eq!(hint.spans[0].style.fg, Some(accent));
        assert_eq!(hint.spans[1].style.fg, Some(disabled));
    }

    #[test]
    fn test_command_prompt_is_drawn() {
        let mut app = app("/");
        app.dispatch(Action::EnterCommand);
        app.dispatch(Action::Insert('o'));

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render_ui(f, &app)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Enter Command"));
        assert!(text.contains(":o"));
    }

    #[test]
    fn test_critical_view() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|f| render_critical(f, "Config load failed (HTTP 404)", &Theme::noir()))
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("CRITICAL ERROR"));
        assert!(text.contains("ERROR CODE: Config load failed (HTTP 404)"));
        assert!(text.contains("CONTACT ADMINISTRATOR."));
    }
}
