//! Crossterm terminal backend
//!
//! Raw-mode session guard, a non-blocking key source and a renderer that
//! draws `TextFrame`s in place.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{
        self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};

use super::InputSource;
use crate::input::KeyCode;
use crate::renderer::{RenderAdapter, Snapshot, TextFrame};

/// Raw mode plus alternate screen for as long as the guard lives
pub struct TerminalSession {
    stdout: Stdout,
}

impl TerminalSession {
    pub fn enter() -> Result<Self> {
        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enable raw mode")?;
        if let Err(err) = execute!(stdout, EnterAlternateScreen, Hide) {
            if let Err(raw_err) = disable_raw_mode() {
                log::error!("failed to disable raw mode: {raw_err}");
            }
            return Err(err).context("failed to enter alternate screen");
        }
        Ok(Self { stdout })
    }

    /// Warn when the terminal is smaller than the frame we are about to draw
    pub fn check_fits(&self, columns: usize, rows: usize) -> Result<()> {
        let (width, height) = terminal::size().context("failed to read terminal size")?;
        if usize::from(width) < columns || usize::from(height) < rows {
            log::warn!(
                "Terminal is {}x{}, game needs {}x{}; output will be clipped",
                width,
                height,
                columns,
                rows
            );
        }
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(err) = execute!(self.stdout, Show, LeaveAlternateScreen) {
            log::error!("failed to leave alternate screen: {err}");
        }
        if let Err(err) = disable_raw_mode() {
            log::error!("failed to disable raw mode: {err}");
        }
    }
}

/// Key source backed by crossterm's event queue
#[derive(Debug, Default)]
pub struct CrosstermInput;

impl InputSource for CrosstermInput {
    fn poll_key(&mut self) -> Result<Option<KeyCode>> {
        while event::poll(Duration::ZERO).context("failed to poll terminal events")? {
            if let Event::Key(key) = event::read().context("failed to read terminal event")?
                && key.kind != KeyEventKind::Release
            {
                return Ok(Some(translate_key(key)));
            }
        }
        Ok(None)
    }
}

/// Crossterm key event to backend-independent key code. Ctrl-C quits.
pub fn translate_key(key: KeyEvent) -> KeyCode {
    use crossterm::event::KeyCode as Ct;

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == Ct::Char('c') {
        return KeyCode::Esc;
    }
    match key.code {
        Ct::Left => KeyCode::Left,
        Ct::Right => KeyCode::Right,
        Ct::Up => KeyCode::Up,
        Ct::Down => KeyCode::Down,
        Ct::Enter => KeyCode::Enter,
        Ct::Esc => KeyCode::Esc,
        Ct::Char(' ') => KeyCode::Space,
        Ct::Char(c) => KeyCode::Char(c),
        _ => KeyCode::Other,
    }
}

/// Draws each snapshot as text at the top-left of the screen
pub struct TerminalRenderer<W: Write> {
    out: W,
}

impl TerminalRenderer<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderAdapter for TerminalRenderer<W> {
    fn render(&mut self, snapshot: &Snapshot) -> Result<()> {
        let frame = TextFrame::from_snapshot(snapshot);
        for (row, line) in frame.lines().iter().enumerate() {
            let row = u16::try_from(row).unwrap_or(u16::MAX);
            queue!(
                self.out,
                MoveTo(0, row),
                Print(line),
                Clear(ClearType::UntilNewLine)
            )
            .context("failed to queue frame")?;
        }
        queue!(self.out, Clear(ClearType::FromCursorDown)).context("failed to queue frame")?;
        self.out.flush().context("failed to flush frame")?;
        Ok(())
    }
}
