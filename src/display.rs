/// Rendering layer: all terminal I/O lives here.
///
/// The game core draws into a [`TerminalCanvas`], which turns pixel-space
/// sprites into glyphs on a character grid. [`render`] then writes that grid,
/// the scoreboard and a controls hint to the terminal.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use lane_crosser::entities::{TILE_HEIGHT, TILE_WIDTH};
use lane_crosser::platform::{Canvas, ScoreDisplay, Sprite};

// ── Board geometry (terminal cells) ───────────────────────────────────────────

/// Terminal columns per board tile.
const TILE_COLS: i32 = 8;
/// Terminal lines per board tile.
const TILE_LINES: i32 = 2;

const BOARD_TILES_X: i32 = 5;
const BOARD_TILES_Y: i32 = 7;

pub const BOARD_COLS: usize = (BOARD_TILES_X * TILE_COLS) as usize;
pub const BOARD_LINES: usize = (BOARD_TILES_Y * TILE_LINES) as usize;

/// Sprites are drawn this many pixels above their tile's top edge.
const SPRITE_Y_OFFSET: i32 = 23;

/// Board origin on screen: below the HUD and inside the left border.
const BOARD_TOP: u16 = 2;
const BOARD_LEFT: u16 = 1;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;
const C_WATER: Color = Color::Blue;
const C_STONE: Color = Color::DarkGrey;
const C_GRASS: Color = Color::DarkGreen;

// ── Score sink ────────────────────────────────────────────────────────────────

/// Scoreboard text, refreshed by the core after every score change.
#[derive(Debug, Default)]
pub struct HudScore {
    text: String,
}

impl HudScore {
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl ScoreDisplay for HudScore {
    fn show(&mut self, value: i64) {
        self.text = format!("Score: {value}");
    }
}

// ── Canvas ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
struct Cell {
    ch: char,
    color: Color,
}

/// Character-grid canvas. Later sprites overwrite earlier ones, and anything
/// outside the board is clipped.
pub struct TerminalCanvas {
    cells: Vec<Cell>,
}

impl Default for TerminalCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalCanvas {
    /// A blank board: water on top, stone where the bugs run, grass below.
    pub fn new() -> Self {
        let mut cells = Vec::with_capacity(BOARD_COLS * BOARD_LINES);
        for line in 0..BOARD_LINES {
            let tile_row = line as i32 / TILE_LINES;
            let cell = match tile_row {
                0 => Cell { ch: '~', color: C_WATER },
                1..=4 => Cell { ch: '.', color: C_STONE },
                _ => Cell { ch: '"', color: C_GRASS },
            };
            cells.extend(std::iter::repeat(cell).take(BOARD_COLS));
        }
        TerminalCanvas { cells }
    }

    fn put(&mut self, col: i32, line: i32, ch: char, color: Color) {
        if col < 0 || line < 0 || col >= BOARD_COLS as i32 || line >= BOARD_LINES as i32 {
            return;
        }
        self.cells[line as usize * BOARD_COLS + col as usize] = Cell { ch, color };
    }

    /// The glyphs of one board line, without colour.
    #[cfg(test)]
    fn line_text(&self, line: usize) -> String {
        self.cells[line * BOARD_COLS..(line + 1) * BOARD_COLS]
            .iter()
            .map(|c| c.ch)
            .collect()
    }
}

/// Top-left terminal cell (column, line) on the board for a sprite at pixel
/// `(x, y)`, before centring the glyph within its tile.
fn cell_for(x: i32, y: i32) -> (i32, i32) {
    let col = (x * TILE_COLS) as f32 / TILE_WIDTH as f32;
    let row = (y + SPRITE_Y_OFFSET) as f32 / TILE_HEIGHT as f32;
    (col.round() as i32, row.round() as i32 * TILE_LINES + TILE_LINES - 1)
}

fn glyph(sprite: Sprite) -> (&'static str, Color) {
    match sprite {
        Sprite::EnemyBug => ("=(oo)>", Color::Red),
        Sprite::CharBoy => ("(B)", Color::White),
        Sprite::CharCatGirl => ("(C)", Color::Magenta),
        Sprite::CharHornGirl => ("(H)", Color::Cyan),
        Sprite::CharPinkGirl => ("(P)", Color::Red),
        Sprite::CharPrincessGirl => ("(Q)", Color::Yellow),
        Sprite::GemBlue => ("<>", Color::Blue),
        Sprite::GemGreen => ("<>", Color::Green),
        Sprite::GemOrange => ("<>", Color::DarkYellow),
    }
}

impl Canvas for TerminalCanvas {
    fn draw_sprite(&mut self, sprite: Sprite, x: i32, y: i32) {
        let (text, color) = glyph(sprite);
        let (col, line) = cell_for(x, y);
        let start = col + (TILE_COLS - text.chars().count() as i32) / 2;
        for (i, ch) in text.chars().enumerate() {
            self.put(start + i as i32, line, ch, color);
        }
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    canvas: &TerminalCanvas,
    score: &HudScore,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_hud(out, score)?;
    draw_border(out)?;
    draw_board(out, canvas)?;
    draw_controls_hint(out)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, BOARD_TOP + BOARD_LINES as u16 + 2))?;
    out.flush()?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, score: &HudScore) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(score.text()))?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W) -> std::io::Result<()> {
    let bottom = BOARD_TOP + BOARD_LINES as u16;
    let right = BOARD_LEFT + BOARD_COLS as u16;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, BOARD_TOP - 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(BOARD_COLS))))?;

    out.queue(cursor::MoveTo(0, bottom))?;
    out.queue(Print(format!("└{}┘", "─".repeat(BOARD_COLS))))?;

    for row in BOARD_TOP..bottom {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(right, row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── Board ─────────────────────────────────────────────────────────────────────

fn draw_board<W: Write>(out: &mut W, canvas: &TerminalCanvas) -> std::io::Result<()> {
    for (line, row) in canvas.cells.chunks(BOARD_COLS).enumerate() {
        out.queue(cursor::MoveTo(BOARD_LEFT, BOARD_TOP + line as u16))?;
        let mut current = None;
        for cell in row {
            if current != Some(cell.color) {
                out.queue(style::SetForegroundColor(cell.color))?;
                current = Some(cell.color);
            }
            out.queue(Print(cell.ch))?;
        }
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, BOARD_TOP + BOARD_LINES as u16 + 1))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("←↑→↓ / WASD : Move   Q : Quit"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_square_maps_to_middle_tile() {
        // (202, 400) is lane 2, tile row 5
        assert_eq!(cell_for(202, 400), (16, 11));
    }

    #[test]
    fn enemy_rows_map_to_stone_tiles() {
        assert_eq!(cell_for(0, 60).1, 3);
        assert_eq!(cell_for(0, 143).1, 5);
        assert_eq!(cell_for(0, 226).1, 7);
        assert_eq!(cell_for(0, 309).1, 9);
    }

    #[test]
    fn blank_canvas_has_water_on_top() {
        let canvas = TerminalCanvas::new();
        assert_eq!(canvas.line_text(0), "~".repeat(BOARD_COLS));
        assert_eq!(canvas.line_text(BOARD_LINES - 1), "\"".repeat(BOARD_COLS));
    }

    #[test]
    fn sprite_is_centred_in_its_tile() {
        let mut canvas = TerminalCanvas::new();
        canvas.draw_sprite(Sprite::CharBoy, 0, 500);
        // 3-wide glyph in an 8-wide tile starts at column 2
        assert_eq!(&canvas.line_text(13)[..8], "\"\"(B)\"\"\"");
    }

    #[test]
    fn offscreen_enemy_is_clipped() {
        let mut canvas = TerminalCanvas::new();
        canvas.draw_sprite(Sprite::EnemyBug, -101, 60);
        assert_eq!(canvas.line_text(3), ".".repeat(BOARD_COLS));
    }

    #[test]
    fn partially_visible_enemy_keeps_its_nose() {
        let mut canvas = TerminalCanvas::new();
        canvas.draw_sprite(Sprite::EnemyBug, -50, 60);
        // col = round(-50 * 8 / 101) = -4, start = -4 + 1 = -3
        assert!(canvas.line_text(3).starts_with("o)>"));
    }

    #[test]
    fn hud_score_formats_negative_values() {
        let mut hud = HudScore::default();
        hud.show(-10);
        assert_eq!(hud.text(), "Score: -10");
    }
}
