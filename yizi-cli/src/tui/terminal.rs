//! Terminal management and main run loop

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use yizi_core::{CharacterRecord, CharacterStore, PendingQuery, QueryError};

use super::app::App;
use super::event::{handle_key, poll_event, HandleResult};
use super::ui;

/// Outcome of a background query, tagged with its sequence number
struct Completion {
    seq: u64,
    outcome: Result<Vec<CharacterRecord>, QueryError>,
}

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Run the TUI application against `store`
pub async fn run<S>(store: Arc<S>) -> Result<()>
where
    S: CharacterStore + 'static,
{
    let mut terminal = init_terminal()?;

    let mut app = App::new(store);
    let (tx, rx) = mpsc::unbounded_channel();

    let result = run_loop(&mut terminal, &mut app, tx, rx);

    // Restore terminal (even if loop failed)
    restore_terminal(&mut terminal)?;

    result
}

/// Main event loop
fn run_loop<S>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<Arc<S>>,
    tx: UnboundedSender<Completion>,
    mut rx: UnboundedReceiver<Completion>,
) -> Result<()>
where
    S: CharacterStore + 'static,
{
    loop {
        while let Ok(done) = rx.try_recv() {
            app.complete(done.seq, done.outcome);
        }

        terminal.draw(|frame| ui::render(frame, app))?;

        // Poll for events (with 80ms timeout so the spinner keeps moving)
        let event = tokio::task::block_in_place(|| poll_event(Duration::from_millis(80)))?;
        match event {
            Some(Event::Key(key)) => match handle_key(app, key) {
                HandleResult::Quit => break,
                HandleResult::Continue => {}
                HandleResult::Dispatch(pending) => spawn_query(app, pending, &tx),
            },
            Some(Event::Resize(_, _)) => {
                // Terminal resized, will be handled on next draw
            }
            _ => {}
        }

        app.on_tick();
    }

    Ok(())
}

/// Run `pending` on a tokio task; the outcome comes back over `tx`
fn spawn_query<S>(app: &App<Arc<S>>, pending: PendingQuery, tx: &UnboundedSender<Completion>)
where
    S: CharacterStore + 'static,
{
    let store = Arc::clone(app.controller.store());
    let tx = tx.clone();
    debug!(seq = pending.seq, query = %pending.query, "spawning query");
    tokio::spawn(async move {
        let outcome = store.fetch(&pending.query).await;
        // The loop may already have exited
        let _ = tx.send(Completion {
            seq: pending.seq,
            outcome,
        });
    });
}
