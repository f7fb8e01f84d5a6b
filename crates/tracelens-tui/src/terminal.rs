//! Terminal setup and restoration

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;
use tracelens_core::prelude::*;

/// Install a panic hook that restores the terminal before the report prints
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = execute!(std::io::stdout(), DisableMouseCapture);
        ratatui::restore();
        original_hook(panic_info);
    }));
}

/// Raw-mode alternate screen with mouse capture for the lifetime of the value.
///
/// Dropping it restores the terminal, so early returns from the main loop
/// leave the shell usable.
pub struct TerminalSession {
    terminal: DefaultTerminal,
}

impl TerminalSession {
    pub fn enter() -> Result<Self> {
        install_panic_hook();
        let terminal = ratatui::try_init().map_err(|e| Error::TerminalInit(e.to_string()))?;
        if let Err(e) = execute!(std::io::stdout(), EnableMouseCapture) {
            warn!("Mouse capture unavailable: {}", e);
        }
        debug!("Entered alternate screen");
        Ok(Self { terminal })
    }

    pub fn terminal(&mut self) -> &mut DefaultTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(e) = execute!(std::io::stdout(), DisableMouseCapture) {
            warn!("Failed to disable mouse capture: {}", e);
        }
        ratatui::restore();
        debug!("Terminal restored");
    }
}
