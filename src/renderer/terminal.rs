//! crossterm frontend
//!
//! Owns the terminal while alive: raw mode, alternate screen, hidden cursor.
//! Everything is restored on drop, including after a panic unwinds through
//! the game loop.

use std::io::{self, Write};

use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute, queue,
    style::{self, Color},
    terminal::{self, BeginSynchronizedUpdate, EndSynchronizedUpdate},
};

use super::canvas::{Canvas, Hud, Rgb};
use super::{RenderError, Renderer};
use crate::sim::RenderSnapshot;

fn color(c: Rgb) -> Color {
    Color::Rgb {
        r: c.0,
        g: c.1,
        b: c.2,
    }
}

pub struct TerminalRenderer<W: Write> {
    out: W,
    canvas: Canvas,
    enhanced_keys: bool,
}

impl<W: Write> TerminalRenderer<W> {
    /// Take over the terminal
    pub fn new(out: W) -> Result<Self, RenderError> {
        terminal::enable_raw_mode()?;
        Self::attach(out)
    }

    /// Finish setup on a terminal already in raw mode. Once `Self` exists,
    /// a failed step still restores the terminal through `Drop`.
    fn attach(out: W) -> Result<Self, RenderError> {
        let mut renderer = Self {
            out,
            canvas: Canvas::new(0, 0),
            enhanced_keys: false,
        };
        execute!(
            renderer.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
        )?;

        // Release events make "hold Up to climb" exact; without them the
        // input tracker falls back to a hold window.
        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                renderer.out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            renderer.enhanced_keys = true;
        }
        log::info!("Terminal ready (key release events: {})", renderer.enhanced_keys);

        let (cols, rows) = terminal::size()?;
        renderer.resize(cols, rows);
        Ok(renderer)
    }

    /// Whether the terminal reports key releases
    pub fn reports_key_releases(&self) -> bool {
        self.enhanced_keys
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        log::debug!("Resized to {cols}x{rows}");
        self.canvas.resize(cols as usize, rows as usize);
    }

    fn flush_canvas(&mut self) -> io::Result<()> {
        queue!(self.out, BeginSynchronizedUpdate, cursor::MoveTo(0, 0))?;

        let mut prev: Option<(Rgb, Rgb)> = None;
        for (row, cells) in self.canvas.rows_iter().enumerate() {
            queue!(self.out, cursor::MoveTo(0, row as u16))?;
            for cell in cells {
                if prev != Some((cell.fg, cell.bg)) {
                    queue!(
                        self.out,
                        style::SetForegroundColor(color(cell.fg)),
                        style::SetBackgroundColor(color(cell.bg))
                    )?;
                    prev = Some((cell.fg, cell.bg));
                }
                queue!(self.out, style::Print(cell.ch))?;
            }
        }

        queue!(self.out, style::ResetColor, EndSynchronizedUpdate)?;
        self.out.flush()
    }

    fn restore(&mut self) -> io::Result<()> {
        if self.enhanced_keys {
            execute!(self.out, PopKeyboardEnhancementFlags)?;
        }
        execute!(
            self.out,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        )?;
        terminal::disable_raw_mode()
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn draw(&mut self, snapshot: &RenderSnapshot, hud: &Hud) -> Result<(), RenderError> {
        self.canvas.draw_scene(snapshot, hud);
        self.flush_canvas()?;
        Ok(())
    }
}

impl<W: Write> Drop for TerminalRenderer<W> {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            log::warn!("Failed to restore terminal: {err}");
        }
    }
}
