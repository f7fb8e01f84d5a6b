//! Main TUI runner - entry point and event loop

use std::path::Path;

use tokio::sync::mpsc;
use tracelens_app::{config, handler, signals, AppState, Message};
use tracelens_core::prelude::*;
use tracelens_core::TraceFile;

use super::{event, render, terminal};

/// Run the TUI on the trace at `trace_path`
pub async fn run(trace_path: &Path) -> Result<()> {
    color_eyre::install().map_err(|e| Error::terminal(e.to_string()))?;

    let base_dir = trace_path.parent().unwrap_or_else(|| Path::new("."));
    let settings = config::load_settings(base_dir);
    info!(
        "Loaded settings: label_width={}, show_timeline={}",
        settings.ui.label_width, settings.ui.show_timeline
    );

    let trace = TraceFile::load(trace_path)
        .with_context(|| format!("Failed to load trace {}", trace_path.display()))?;
    if trace.task_count() == 0 {
        return Err(Error::NoTasks);
    }

    let mut state = AppState::new(trace, settings);

    // Signal handler sends Message::Quit on SIGINT/SIGTERM
    let (msg_tx, msg_rx) = mpsc::channel::<Message>(16);
    signals::spawn_signal_handler(msg_tx);

    let result = {
        let mut session = terminal::TerminalSession::enter()?;
        run_loop(session.terminal(), &mut state, msg_rx)
    };

    if let Err(ref e) = result {
        error!("TUI error: {:?}", e);
    }
    result
}

/// Main event loop
fn run_loop(
    terminal: &mut ratatui::DefaultTerminal,
    state: &mut AppState,
    mut msg_rx: mpsc::Receiver<Message>,
) -> Result<()> {
    while !state.should_quit() {
        // External messages (signal handler)
        while let Ok(msg) = msg_rx.try_recv() {
            handler::update(state, msg);
        }

        terminal.draw(|frame| render::view(frame, state))?;

        if let Some(message) = event::poll()? {
            handler::update(state, message);
        }
    }
    Ok(())
}
