//! Raw mode and alternate screen, restored on drop and on panic

use crossterm::cursor::Show;
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use std::io::stdout;

/// Terminal modes enabled for the editor session
pub struct TerminalModes {
    raw_mode: bool,
    alternate_screen: bool,
}

impl TerminalModes {
    /// Switch the terminal into raw mode on the alternate screen
    pub fn enable() -> anyhow::Result<Self> {
        let mut modes = Self {
            raw_mode: false,
            alternate_screen: false,
        };

        enable_raw_mode()?;
        modes.raw_mode = true;

        execute!(stdout(), EnterAlternateScreen)?;
        modes.alternate_screen = true;

        tracing::debug!("terminal modes enabled");
        Ok(modes)
    }

    /// Undo whatever `enable` managed to switch on
    pub fn restore(&mut self) {
        if self.alternate_screen {
            if let Err(e) = execute!(stdout(), LeaveAlternateScreen, Show) {
                tracing::warn!("failed to leave alternate screen: {}", e);
            }
            self.alternate_screen = false;
        }
        if self.raw_mode {
            if let Err(e) = disable_raw_mode() {
                tracing::warn!("failed to disable raw mode: {}", e);
            }
            self.raw_mode = false;
        }
    }
}

impl Drop for TerminalModes {
    fn drop(&mut self) {
        self.restore();
    }
}

/// Best-effort restore from a panic hook, where no `TerminalModes` is reachable
pub fn emergency_cleanup() {
    let _ = execute!(stdout(), LeaveAlternateScreen, Show);
    let _ = disable_raw_mode();
}
