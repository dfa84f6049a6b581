use std::io;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    supports_keyboard_enhancement,
};
use log::{info, warn};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// Concrete terminal type used by the driver.
pub type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Owns terminal lifecycle (raw mode, alternate screen and key release
/// reporting) for one session. Restores the terminal best-effort on drop.
pub struct TerminalSession {
    terminal: AppTerminal,
    reports_key_release: bool,
}

impl TerminalSession {
    /// Enters raw mode, switches to the alternate screen and asks the
    /// terminal to report key releases when it can.
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error);
        }

        let reports_key_release = matches!(supports_keyboard_enhancement(), Ok(true))
            && execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )
            .map_err(|error| warn!(target: "snake", "key release reporting unavailable: {error}"))
            .is_ok();
        info!(target: "snake", "key release reporting: {reports_key_release}");

        let backend = CrosstermBackend::new(stdout);
        match Terminal::new(backend) {
            Ok(terminal) => Ok(Self {
                terminal,
                reports_key_release,
            }),
            Err(error) => {
                let _ = cleanup_terminal_best_effort(reports_key_release);
                Err(error)
            }
        }
    }

    /// Returns mutable access to the inner ratatui terminal.
    pub fn terminal_mut(&mut self) -> &mut AppTerminal {
        &mut self.terminal
    }

    /// Returns whether boost can end on key release rather than on timeout.
    #[must_use]
    pub fn reports_key_release(&self) -> bool {
        self.reports_key_release
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = cleanup_terminal_best_effort(self.reports_key_release);
    }
}

/// Restores cooked mode and the main screen, for use from panic hooks.
pub fn restore_terminal_after_panic() {
    let _ = cleanup_terminal_best_effort(true);
}

fn cleanup_terminal_best_effort(pop_enhancement: bool) -> io::Result<()> {
    let mut stdout = io::stdout();
    if pop_enhancement {
        let _ = execute!(stdout, PopKeyboardEnhancementFlags);
    }
    let _ = disable_raw_mode();
    execute!(stdout, Show, LeaveAlternateScreen)
}
