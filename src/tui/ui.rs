use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::gate::GateEffect;
use crate::tui::app::App;
use crate::tui::event::{schedule, UiEvent};
use crate::tui::input::map_key;
use crate::tui::render::{render_critical, render_ui};
use crate::tui::theme::Theme;

type Term = Terminal<CrosstermBackend<io::Stdout>>;

fn require_tty() -> Result<()> {
    if !crossterm::tty::IsTty::is_tty(&io::stdout()) {
        eprintln!("❌ noir requires an interactive terminal.");
        eprintln!("   Cannot run in non-interactive mode (pipes, redirects, etc.)");
        eprintln!("   Operator commands still work: noir check, noir routes");
        return Err(anyhow::anyhow!("No interactive terminal available"));
    }
    Ok(())
}

fn setup_terminal() -> Result<Term> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the terminal shell until the user quits
pub async fn run_ui(mut app: App) -> Result<()> {
    require_tty()?;

    let mut terminal = setup_terminal()?;
    let (tx, mut rx) = mpsc::unbounded_channel::<UiEvent>();

    let res = run_app(&mut terminal, &mut app, tx, &mut rx).await;

    restore_terminal(&mut terminal)?;
    res
}

fn spawn_all(app: &App, effects: Vec<GateEffect>, tx: &mpsc::UnboundedSender<UiEvent>) {
    for effect in effects {
        debug!("Scheduling {:?}", effect);
        schedule(
            effect,
            app.state.cipher.clone(),
            app.state.config.clone(),
            tx.clone(),
        );
    }
}

async fn run_app(
    terminal: &mut Term,
    app: &mut App,
    tx: mpsc::UnboundedSender<UiEvent>,
    rx: &mut mpsc::UnboundedReceiver<UiEvent>,
) -> Result<()> {
    let tick = Duration::from_millis(app.state.settings.ui.tick_rate_ms.max(1));

    while app.running {
        terminal.draw(|f| render_ui(f, app))?;

        if event::poll(tick)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let action = map_key(app.focus, key);
                    let effects = app.dispatch(action);
                    spawn_all(app, effects, &tx);
                }
                _ => {}
            }
        }

        // Completed effects, applied in arrival order
        while let Ok(event) = rx.try_recv() {
            let effects = app.handle_event(event);
            spawn_all(app, effects, &tx);
        }

        // Keep the runtime moving between polls
        tokio::task::yield_now().await;
    }

    Ok(())
}

/// Show the critical-error view until a key is pressed
pub async fn run_critical_error(reason: &str, theme: &Theme) -> Result<()> {
    if !crossterm::tty::IsTty::is_tty(&io::stdout()) {
        warn!("No terminal for the critical view");
        eprintln!("CRITICAL ERROR\nERROR CODE: {}\nCONTACT ADMINISTRATOR.", reason);
        return Ok(());
    }

    let mut terminal = setup_terminal()?;
    let res = wait_on_critical(&mut terminal, reason, theme);
    restore_terminal(&mut terminal)?;
    res
}

fn wait_on_critical(terminal: &mut Term, reason: &str, theme: &Theme) -> Result<()> {
    loop {
        terminal.draw(|f| render_critical(f, reason, theme))?;
        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(());
                }
            }
        }
    }
}
