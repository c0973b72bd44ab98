/// Rendering layer — all terminal I/O lives here.
///
/// The simulation runs in a logical pixel space; this module owns the
/// mapping onto terminal cells and translates state into terminal commands.
/// No game logic is performed here.
///
/// Trails: instead of clearing, each frame first decays a persistent
/// intensity buffer and then stamps the live entities at full intensity,
/// which is the terminal stand-in for painting the canvas with a
/// translucent black rectangle.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};

use crate::entities::{GameState, GameStatus, Rgb};
use crate::geometry::{distance, Vec2};

// ── Cell geometry ─────────────────────────────────────────────────────────────

/// Logical pixels per terminal column / row.  The 1:2 ratio matches the
/// typical glyph aspect so circles come out round.
pub const PX_PER_COL: f64 = 10.0;
pub const PX_PER_ROW: f64 = 20.0;

/// Intensity multiplier applied to every cell each frame (the trail decay).
const TRAIL_DECAY: f64 = 0.9;
/// Below this a cell is fully dark and rendered as a blank.
const DARK_THRESHOLD: f64 = 0.04;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;
const C_GAME_OVER: Color = Color::Red;

// ── Frame buffer ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy)]
struct Cell {
    color: Rgb,
    intensity: f64,
}

const DARK: Cell = Cell { color: Rgb::WHITE, intensity: 0.0 };

/// Persistent frame buffer: one cell per playfield character.  Terminal row
/// 0 is the HUD, the last terminal row holds the controls hint and the
/// parked cursor; playfield row `r` maps to terminal row `r + 1`.
pub struct Screen {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl Screen {
    /// `cols`/`rows` are the full terminal dimensions; one row is reserved
    /// for the HUD and one below the playfield for the hint and cursor.
    pub fn new(cols: u16, rows: u16) -> Screen {
        let rows = rows.saturating_sub(2).max(1);
        let cols = cols.max(1);
        Screen {
            cols,
            rows,
            cells: vec![DARK; cols as usize * rows as usize],
        }
    }

    /// Canvas size in logical pixels.
    pub fn canvas_size(&self) -> (f64, f64) {
        (self.cols as f64 * PX_PER_COL, self.rows as f64 * PX_PER_ROW)
    }

    /// Canvas coordinates of a terminal cell's centre, or `None` for the
    /// HUD row or anything outside the playfield.
    pub fn cell_to_canvas(&self, col: u16, row: u16) -> Option<Vec2> {
        if row == 0 || row > self.rows || col >= self.cols {
            return None;
        }
        Some(Vec2::new(
            (col as f64 + 0.5) * PX_PER_COL,
            (row as f64 - 1.0 + 0.5) * PX_PER_ROW,
        ))
    }

    fn fade(&mut self) {
        for cell in &mut self.cells {
            cell.intensity *= TRAIL_DECAY;
            if cell.intensity < DARK_THRESHOLD {
                *cell = DARK;
            }
        }
    }

    fn set(&mut self, col: i32, row: i32, color: Rgb, intensity: f64) {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return;
        }
        self.cells[row as usize * self.cols as usize + col as usize] =
            Cell { color, intensity };
    }

    /// Rasterize a circle: every cell whose centre lies inside it, plus the
    /// cell containing the circle's centre so small entities stay visible.
    fn stamp_circle(&mut self, pos: Vec2, radius: f64, color: Rgb, intensity: f64) {
        let min_col = ((pos.x - radius) / PX_PER_COL).floor() as i32;
        let max_col = ((pos.x + radius) / PX_PER_COL).ceil() as i32;
        let min_row = ((pos.y - radius) / PX_PER_ROW).floor() as i32;
        let max_row = ((pos.y + radius) / PX_PER_ROW).ceil() as i32;

        for row in min_row..=max_row {
            for col in min_col..=max_col {
                let centre = Vec2::new(
                    (col as f64 + 0.5) * PX_PER_COL,
                    (row as f64 + 0.5) * PX_PER_ROW,
                );
                if distance(centre, pos) <= radius {
                    self.set(col, row, color, intensity);
                }
            }
        }

        self.set(
            (pos.x / PX_PER_COL).floor() as i32,
            (pos.y / PX_PER_ROW).floor() as i32,
            color,
            intensity,
        );
    }

    /// Render one complete frame: decay the buffer, stamp every entity,
    /// repaint the playfield, then the HUD and any overlay.
    pub fn render<W: Write>(&mut self, out: &mut W, state: &GameState) -> std::io::Result<()> {
        self.fade();

        for enemy in &state.enemies {
            self.stamp_circle(enemy.pos, enemy.radius, enemy.color, 1.0);
        }
        // Particles carry their own alpha; the override is scoped to the
        // single stamp and never leaks onto other entities.
        for particle in &state.particles {
            self.stamp_circle(particle.pos, particle.radius, particle.color, particle.alpha);
        }
        for projectile in &state.projectiles {
            self.stamp_circle(projectile.pos, projectile.radius, projectile.color, 1.0);
        }
        self.stamp_circle(state.player.pos, state.player.radius, state.player.color, 1.0);

        self.paint(out)?;
        draw_hud(out, state)?;
        draw_controls_hint(out, self.rows + 1)?;

        if state.status == GameStatus::GameOver {
            draw_game_over(out, state, self.cols, self.rows)?;
        }

        // Park the cursor on the hint row, below the playfield
        out.queue(style::ResetColor)?;
        out.queue(cursor::MoveTo(0, self.rows + 1))?;
        out.flush()?;
        Ok(())
    }

    fn paint<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let mut last: Option<Rgb> = None;
        for row in 0..self.rows {
            out.queue(cursor::MoveTo(0, row + 1))?;
            for col in 0..self.cols {
                let cell = self.cells[row as usize * self.cols as usize + col as usize];
                if cell.intensity < DARK_THRESHOLD {
                    out.queue(Print(" "))?;
                    continue;
                }
                let shade = cell.color.scaled(cell.intensity);
                if last != Some(shade) {
                    out.queue(style::SetForegroundColor(Color::Rgb {
                        r: shade.r,
                        g: shade.g,
                        b: shade.b,
                    }))?;
                    last = Some(shade);
                }
                out.queue(Print("█"))?;
            }
        }
        Ok(())
    }
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:>8}", state.score)))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, row: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, row))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("WASD/arrows : Move   Click : Shoot   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    state: &GameState,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let score_line = format!("Final Score: {:>6}", state.score);
    let hint = "R - Play Again  Q - Quit";

    let box_lines = [
        "╔════════════════════╗",
        "║    GAME  OVER      ║",
        "╚════════════════════╝",
    ];

    let cx = cols / 2;
    let total_rows = box_lines.len() as u16 + 2;
    let start_row = 1 + (rows / 2).saturating_sub(total_rows / 2);

    out.queue(style::SetForegroundColor(C_GAME_OVER))?;
    for (i, msg) in box_lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(Print(*msg))?;
    }

    let score_row = start_row + box_lines.len() as u16;
    let col = cx.saturating_sub(score_line.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(&score_line))?;

    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, score_row + 1))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hint))?;

    Ok(())
}
