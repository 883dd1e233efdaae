//! Tui command implementation
//!
//! This module runs the interactive comparison screen until the user quits.

use anyhow::Result;
use crossterm::{
    cursor::Show,
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, time::Duration};
use tracing::{info, warn};

use unit_price_compare::{config::Config, ui::CompareApp};

/// Execute the tui command
pub fn execute(cfg: &Config) -> Result<()> {
    info!("Opening comparison screen");
    let app = CompareApp::new(cfg.display.clone());
    run_screen(app)?;
    info!("Comparison screen closed");
    Ok(())
}

/// Runs `restore` when dropped, including on early `?` returns
struct RestoreGuard<F: FnMut()> {
    restore: F,
}

impl<F: FnMut()> Drop for RestoreGuard<F> {
    fn drop(&mut self) {
        (self.restore)()
    }
}

/// Leave raw mode and the alternate screen and show the cursor
fn restore_terminal() {
    if let Err(e) = disable_raw_mode() {
        warn!(error = %e, "Failed to disable raw mode");
    }
    if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, Show) {
        warn!(error = %e, "Failed to leave alternate screen");
    }
}

/// Run the comparison screen
fn run_screen(mut app: CompareApp) -> Result<()> {
    // Setup terminal; restored on every exit path from here on
    enable_raw_mode()?;
    let _restore = RestoreGuard {
        restore: restore_terminal,
    };
    execute!(io::stdout(), EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    terminal.clear()?;

    // Main loop
    loop {
        terminal.draw(|f| app.render(f))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if app.handle_key(key) {
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn fail_after_guard(restored: &Cell<u32>) -> Result<()> {
        let _restore = RestoreGuard {
            restore: || restored.set(restored.get() + 1),
        };
        let setup: io::Result<()> =
            Err(io::Error::new(io::ErrorKind::Other, "terminal unavailable"));
        setup?;
        Ok(())
    }

    #[test]
    fn test_restore_guard_runs_on_early_error() {
        let restored = Cell::new(0);
        assert!(fail_after_guard(&restored).is_err());
        assert_eq!(restored.get(), 1);
    }

    #[test]
    fn test_restore_guard_runs_once_on_normal_exit() {
        let restored = Cell::new(0);
        {
            let _restore = RestoreGuard {
                restore: || restored.set(restored.get() + 1),
            };
        }
        assert_eq!(restored.get(), 1);
    }
}
