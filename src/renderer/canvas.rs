//! Character-cell canvas
//!
//! World coordinates (800x600) are scaled onto whatever grid the terminal
//! offers. Shapes always cover at least one cell so nothing vanishes on a
//! small window.

use glam::Vec2;

use super::palette;
use crate::consts::{COCONUT_SIZE, POLE_TOP, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::{GamePhase, Rect, RenderSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Half brightness, for the end-of-game overlay
    pub fn dimmed(self) -> Self {
        Rgb(self.0 / 2, self.1 / 2, self.2 / 2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Cell {
    fn blank(bg: Rgb) -> Self {
        Self {
            ch: ' ',
            fg: palette::TEXT,
            bg,
        }
    }
}

/// Extra text around the playfield
#[derive(Debug, Clone, Default)]
pub struct Hud {
    pub show_score: bool,
    /// Right-aligned status line (tick counter, seed)
    pub status: Option<String>,
}

pub struct Canvas {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![Cell::blank(palette::SKY); cols * rows],
        }
    }

    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.cols = cols;
        self.rows = rows;
        self.cells.resize(cols * rows, Cell::blank(palette::SKY));
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn get(&self, col: usize, row: usize) -> Option<&Cell> {
        if col < self.cols && row < self.rows {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }

    fn get_mut(&mut self, col: i32, row: i32) -> Option<&mut Cell> {
        if col < 0 || row < 0 || col as usize >= self.cols || row as usize >= self.rows {
            return None;
        }
        self.cells.get_mut(row as usize * self.cols + col as usize)
    }

    /// The characters of one row, for tests and headless dumps
    pub fn row_text(&self, row: usize) -> String {
        (0..self.cols)
            .filter_map(|col| self.get(col, row).map(|c| c.ch))
            .collect()
    }

    pub fn clear(&mut self, bg: Rgb) {
        self.cells.fill(Cell::blank(bg));
    }

    #[inline]
    fn grid(&self) -> Vec2 {
        Vec2::new(self.cols as f32, self.rows as f32)
    }

    /// World point to fractional grid position
    #[inline]
    fn to_grid(&self, p: Vec2) -> Vec2 {
        p * self.grid() / Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }

    /// Fractional grid position to world point
    #[inline]
    fn to_world(&self, g: Vec2) -> Vec2 {
        g * Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT) / self.grid()
    }

    /// Cell containing a world point
    pub fn cell_at(&self, p: Vec2) -> (i32, i32) {
        let c = self.to_grid(p);
        (c.x.floor() as i32, c.y.floor() as i32)
    }

    /// Fill every cell a world rectangle touches
    pub fn fill_rect(&mut self, rect: &Rect, bg: Rgb) {
        let min = self.to_grid(rect.pos);
        let max = self.to_grid(rect.pos + rect.size);
        let x0 = min.x.floor() as i32;
        let x1 = (max.x.ceil() as i32).max(x0 + 1);
        let y0 = min.y.floor() as i32;
        let y1 = (max.y.ceil() as i32).max(y0 + 1);

        for row in y0..y1 {
            for col in x0..x1 {
                if let Some(cell) = self.get_mut(col, row) {
                    *cell = Cell::blank(bg);
                }
            }
        }
    }

    /// Fill cells whose centers fall inside a world-space disc
    pub fn fill_disc(&mut self, center: Vec2, radius: f32, bg: Rgb) {
        let (cx, cy) = self.cell_at(center);
        let reach = self.to_grid(Vec2::splat(radius));
        let reach_x = reach.x.ceil() as i32 + 1;
        let reach_y = reach.y.ceil() as i32 + 1;

        for row in cy - reach_y..=cy + reach_y {
            for col in cx - reach_x..=cx + reach_x {
                let cell_center = self.to_world(Vec2::new(col as f32 + 0.5, row as f32 + 0.5));
                let inside = cell_center.distance(center) <= radius;
                if inside || (col, row) == (cx, cy) {
                    if let Some(cell) = self.get_mut(col, row) {
                        *cell = Cell::blank(bg);
                    }
                }
            }
        }
    }

    /// Write text over whatever background is there
    pub fn text(&mut self, col: i32, row: i32, text: &str, fg: Rgb) {
        for (i, ch) in text.chars().enumerate() {
            if let Some(cell) = self.get_mut(col + i as i32, row) {
                cell.ch = ch;
                cell.fg = fg;
            }
        }
    }

    pub fn text_centered(&mut self, row: i32, text: &str, fg: Rgb) {
        let width = text.chars().count() as i32;
        let col = (self.cols as i32 - width) / 2;
        self.text(col.max(0), row, text, fg);
    }

    fn dim_all(&mut self) {
        for cell in &mut self.cells {
            cell.bg = cell.bg.dimmed();
            cell.fg = cell.fg.dimmed();
        }
    }

    /// Rasterize a full frame
    pub fn draw_scene(&mut self, snap: &RenderSnapshot, hud: &Hud) {
        self.clear(palette::SKY);
        self.fill_rect(&snap.pole, palette::POLE);
        self.fill_rect(&snap.climber, palette::CLIMBER);
        for &coconut in &snap.coconuts {
            self.fill_disc(coconut, COCONUT_SIZE / 2.0, palette::COCONUT);
        }

        if hud.show_score {
            self.text(1, 0, &snap.score_text(), palette::TEXT);
        }
        if let Some(status) = &hud.status {
            let col = self.cols as i32 - status.chars().count() as i32 - 1;
            self.text(col, 0, status, palette::TEXT);
        }
        if let Some(prompt) = snap.prompt_text() {
            let (_, row) = self.cell_at(Vec2::new(0.0, POLE_TOP));
            self.text_centered(row, &prompt, palette::WARNING);
        }

        if let Some(banner) = snap.banner_text() {
            self.dim_all();
            let color = match snap.phase {
                GamePhase::Win => palette::WIN,
                _ => palette::WARNING,
            };
            self.text_centered(self.rows as i32 / 2, banner, color);
        }
    }

    /// Rows of cells, top to bottom
    pub fn rows_iter(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.cols.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{BalanceKey, Coconut, GameState};

    fn scene(state: &GameState) -> Canvas {
        let mut canvas = Canvas::new(80, 24);
        let hud = Hud {
            show_score: true,
            status: None,
        };
        canvas.draw_scene(&RenderSnapshot::capture(state), &hud);
        canvas
    }

    #[test]
    fn test_playfield_layout() {
        let canvas = scene(&GameState::new());
        assert_eq!(canvas.get(5, 5).unwrap().bg, palette::SKY);
        assert_eq!(canvas.get(40, 5).unwrap().bg, palette::POLE);
        assert_eq!(canvas.get(40, 20).unwrap().bg, palette::CLIMBER);
        assert_eq!(canvas.get(37, 20).unwrap().bg, palette::CLIMBER);
        assert_eq!(canvas.get(36, 20).unwrap().bg, palette::SKY);
        assert!(canvas.row_text(0).starts_with(" Height: 0%"));
    }

    #[test]
    fn test_coconut_drawn() {
        let mut state = GameState::new();
        state.coconuts.push(Coconut::new(100.0, 300.0));
        let canvas = scene(&state);
        assert_eq!(canvas.get(10, 12).unwrap().bg, palette::COCONUT);
    }

    #[test]
    fn test_offscreen_shapes_are_clipped() {
        let mut canvas = Canvas::new(10, 10);
        canvas.fill_rect(&Rect::new(-500.0, -500.0, 2000.0, 2000.0), palette::POLE);
        canvas.fill_disc(Vec2::new(900.0, 900.0), 15.0, palette::COCONUT);
        assert!(canvas.rows_iter().flatten().all(|c| c.bg == palette::POLE));
    }

    #[test]
    fn test_tiny_rect_covers_a_cell() {
        let mut canvas = Canvas::new(8, 6);
        canvas.fill_rect(&Rect::new(400.0, 300.0, 1.0, 1.0), palette::CLIMBER);
        assert_eq!(canvas.get(4, 3).unwrap().bg, palette::CLIMBER);
    }

    #[test]
    fn test_slip_prompt_shown() {
        let mut state = GameState::new();
        state.begin_slip(BalanceKey::Left);
        let canvas = scene(&state);
        assert!(canvas.row_text(2).contains("Press 'A' to balance!"));
    }

    #[test]
    fn test_banner_dims_scene() {
        let mut state = GameState::new();
        state.phase = GamePhase::GameOver;
        let canvas = scene(&state);
        assert!(canvas.row_text(12).contains("Game Over! Press 'R' to restart"));
        assert_eq!(canvas.get(5, 5).unwrap().bg, palette::SKY.dimmed());
    }

    #[test]
    fn test_status_right_aligned() {
        let mut canvas = Canvas::new(40, 10);
        let hud = Hud {
            show_score: false,
            status: Some("t=5".into()),
        };
        canvas.draw_scene(&RenderSnapshot::capture(&GameState::new()), &hud);
        assert!(canvas.row_text(0).ends_with("t=5 "));
        assert!(!canvas.row_text(0).contains("Height"));
    }
}
