//! Drawing
//!
//! The simulation hands over a `RenderSnapshot` once per tick. `Canvas`
//! rasterizes it into character cells; `TerminalRenderer` pushes those cells
//! to a crossterm terminal.

pub mod canvas;
pub mod terminal;

pub use canvas::{Canvas, Cell, Hud, Rgb};
pub use terminal::TerminalRenderer;

use crate::sim::RenderSnapshot;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("terminal output failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Anything that can show a snapshot
pub trait Renderer {
    fn draw(&mut self, snapshot: &RenderSnapshot, hud: &Hud) -> Result<(), RenderError>;
}

/// Palette from the original artwork placeholders
pub mod palette {
    use super::Rgb;

    pub const SKY: Rgb = Rgb(0, 0, 255);
    pub const POLE: Rgb = Rgb(139, 69, 19);
    pub const CLIMBER: Rgb = Rgb(0, 128, 0);
    pub const COCONUT: Rgb = Rgb(139, 69, 19);
    pub const TEXT: Rgb = Rgb(255, 255, 255);
    pub const WARNING: Rgb = Rgb(255, 0, 0);
    pub const WIN: Rgb = Rgb(0, 128, 0);
}
