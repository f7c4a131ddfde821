use std::fmt;
use std::io::{self, Stdout};

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    self as term, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use stage_clock_core::{ClockError, Presenter};
use tracing::{debug, warn};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Raw mode plus the alternate screen for as long as the guard lives.
pub struct TerminalGuard {
    pub terminal: Tui,
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(e) => {
                let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
                let _ = disable_raw_mode();
                Err(e)
            }
        }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            warn!("failed to leave raw mode: {e}");
        }
        if let Err(e) = execute!(self.terminal.backend_mut(), LeaveAlternateScreen, Show) {
            warn!("failed to restore terminal: {e}");
        }
    }
}

/// xterm window operation 10: put the terminal window into (1) or take it
/// out of (0) full-screen mode. Terminals without window operations ignore
/// it.
struct SetWindowFullscreen(bool);

impl crossterm::Command for SetWindowFullscreen {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(f, "\x1b[10;{}t", u8::from(self.0))
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "window fullscreen needs an ANSI terminal",
        ))
    }
}

/// Fullscreen through the terminal emulator's window operations.
///
/// Terminals never report whether their window is fullscreen, so the state
/// is inferred from geometry: `peak` is the largest size seen since
/// entering, and shrinking below it means the window left fullscreen.
#[derive(Debug, Default)]
pub struct TerminalPresenter {
    fullscreen: bool,
    peak: Option<(u16, u16)>,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    fn request(&mut self, fullscreen: bool) -> Result<(), ClockError> {
        execute!(io::stdout(), SetWindowFullscreen(fullscreen))
            .map_err(|e| ClockError::Presentation(e.to_string()))?;
        self.fullscreen = fullscreen;
        Ok(())
    }
}

impl Presenter for TerminalPresenter {
    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn enter_fullscreen(&mut self) -> Result<(), ClockError> {
        self.request(true)?;
        // The window grows after the request; resizes raise the peak.
        self.peak = term::size().ok();
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> Result<(), ClockError> {
        self.request(false)?;
        self.peak = None;
        Ok(())
    }

    fn surface_resized(&mut self, width: u16, height: u16) {
        if !self.fullscreen {
            return;
        }
        match self.peak {
            Some((peak_width, peak_height)) if width < peak_width || height < peak_height => {
                debug!(width, height, "terminal shrank, treating as fullscreen exit");
                self.fullscreen = false;
                self.peak = None;
            }
            Some((peak_width, peak_height)) => {
                self.peak = Some((width.max(peak_width), height.max(peak_height)));
            }
            None => self.peak = Some((width, height)),
        }
    }
}
