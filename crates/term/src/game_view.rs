//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, PieceSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Color, BOARD_HEIGHT, BOARD_WIDTH};

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

/// Controls legend shown under the NEXT preview.
const KEY_LEGEND: [&str; 6] = ["←/→ move", "↑ rotate", "↓ soft", "spc drop", "r restart", "q quit"];

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Layout of the board frame inside a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// A lightweight terminal renderer for the falling-block board.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse one framebuffer across frames; it is resized to the
    /// viewport when the terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let frame = self.frame(viewport);
        let well = CellStyle::plain(Rgb::new(80, 80, 90), WELL_BG);
        let border = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);

        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            frame.w - 2,
            frame.h - 2,
            ' ',
            well,
        );
        draw_border(fb, frame, border);

        for (y, row) in snap.board.iter().enumerate() {
            for (x, &code) in row.iter().enumerate() {
                match Color::from_code(code) {
                    Some(color) => self.draw_block(fb, frame, x as u16, y as u16, color),
                    None => self.draw_empty(fb, frame, x as u16, y as u16),
                }
            }
        }

        // The blocked piece is not drawn once the game is over.
        if !snap.game_over() {
            // Cells above the visible board (negative rows) are skipped.
            let color = snap.current.kind.color();
            for (x, y) in snap.current.cells() {
                if (0..BOARD_WIDTH as i8).contains(&x) && (0..BOARD_HEIGHT as i8).contains(&y) {
                    self.draw_block(fb, frame, x as u16, y as u16, color);
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        if snap.game_over() {
            draw_overlay(fb, frame, "GAME OVER", "r: restart");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn frame(&self, viewport: Viewport) -> Frame {
        let w = BOARD_WIDTH as u16 * self.cell_w + 2;
        let h = BOARD_HEIGHT as u16 * self.cell_h + 2;
        Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: viewport.height.saturating_sub(h) / 2,
            w,
            h,
        }
    }

    fn draw_empty(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16) {
        let style = CellStyle::plain(Rgb::new(90, 90, 100), WELL_BG).dim();
        self.fill_cell(fb, frame, x, y, '·', style);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, color: Color) {
        let style = CellStyle::plain(palette(color), WELL_BG).bold();
        self.fill_cell(fb, frame, x, y, '█', style);
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, ch: char, style: CellStyle) {
        let px = frame.x + 1 + x * self.cell_w;
        let py = frame.y + 1 + y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, frame: Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 10 {
            return;
        }

        let label = CellStyle::plain(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = frame.y;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(panel_x, y + 1, snap.score, value);
        y += 3;

        fb.put_str(panel_x, y, "LINES", label);
        fb.put_u32(panel_x, y + 1, snap.lines, value);
        y += 3;

        fb.put_str(panel_x, y, "NEXT", label);
        draw_preview(fb, panel_x, y + 1, &snap.next);
        y += 4;

        let hint = value.dim();
        fb.put_str(panel_x, y, "KEYS", label);
        for (i, line) in KEY_LEGEND.iter().enumerate() {
            fb.put_str(panel_x, y + 1 + i as u16, line, hint);
        }
    }
}

/// Draw the next piece's shape at one column per cell.
fn draw_preview(fb: &mut FrameBuffer, x: u16, y: u16, piece: &PieceSnapshot) {
    let style = CellStyle::plain(palette(piece.kind.color()), PANEL_BG).bold();
    for (r, c) in piece.shape.cells() {
        let px = x + c as u16 * 2;
        fb.put_char(px, y + r as u16, '█', style);
        fb.put_char(px + 1, y + r as u16, '█', style);
    }
}

fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
    let Frame { x, y, w, h } = frame;
    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_overlay(fb: &mut FrameBuffer, frame: Frame, title: &str, hint: &str) {
    let style = CellStyle::plain(Rgb::new(255, 255, 255), PANEL_BG).bold();
    let mid_y = frame.y.saturating_add(frame.h / 2);
    for (dy, text) in [(0u16, title), (1, hint)] {
        let text_w = text.chars().count() as u16;
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        fb.put_str(x, mid_y + dy, text, style);
    }
}

/// Terminal color for a palette entry.
pub fn palette(color: Color) -> Rgb {
    match color {
        Color::Cyan => Rgb::new(80, 220, 220),
        Color::Yellow => Rgb::new(240, 220, 80),
        Color::Magenta => Rgb::new(200, 120, 220),
        Color::Green => Rgb::new(100, 220, 120),
        Color::Red => Rgb::new(220, 80, 80),
        Color::Blue => Rgb::new(80, 120, 220),
        Color::Orange => Rgb::new(255, 165, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameEngine;
    use crate::types::Phase;

    fn find_text(fb: &FrameBuffer, needle: &str) -> bool {
        (0..fb.height()).any(|y| fb.row_text(y).contains(needle))
    }

    #[test]
    fn test_frame_is_centered() {
        let view = GameView::default();
        let frame = view.frame(Viewport::new(80, 30));
        assert_eq!((frame.w, frame.h), (22, 22));
        assert_eq!((frame.x, frame.y), (29, 4));
    }

    #[test]
    fn test_renders_border_and_panel() {
        let snap = GameEngine::new(7).snapshot();
        let fb = GameView::default().render(&snap, Viewport::new(80, 30));
        assert_eq!(fb.get(29, 4).map(|c| c.ch), Some('┌'));
        assert_eq!(fb.get(50, 25).map(|c| c.ch), Some('┘'));
        assert!(find_text(&fb, "SCORE"));
        assert!(find_text(&fb, "LINES"));
        assert!(find_text(&fb, "NEXT"));
        assert!(!find_text(&fb, "GAME OVER"));
    }

    #[test]
    fn test_current_piece_is_drawn_in_its_color() {
        let snap = GameEngine::new(7).snapshot();
        let view = GameView::default();
        let fb = view.render(&snap, Viewport::new(80, 30));
        let frame = view.frame(Viewport::new(80, 30));
        let expected = palette(snap.current.kind.color());

        for (x, y) in snap.current.cells() {
            let px = frame.x + 1 + x as u16 * 2;
            let py = frame.y + 1 + y as u16;
            let cell = fb.get(px, py).unwrap();
            assert_eq!(cell.ch, '█');
            assert_eq!(cell.style.fg, expected);
        }
    }

    #[test]
    fn test_negative_rows_are_skipped() {
        let mut snap = GameEngine::new(7).snapshot();
        snap.current.y = -5;
        let view = GameView::default();
        let fb = view.render(&snap, Viewport::new(80, 30));
        let frame = view.frame(Viewport::new(80, 30));
        // Top border stays intact.
        for dx in 1..frame.w - 1 {
            assert_eq!(fb.get(frame.x + dx, frame.y).map(|c| c.ch), Some('─'));
        }
    }

    #[test]
    fn test_game_over_overlay() {
        let mut snap = GameSnapshot::default();
        snap.phase = Phase::GameOver;
        let fb = GameView::default().render(&snap, Viewport::new(80, 30));
        assert!(find_text(&fb, "GAME OVER"));
        assert!(find_text(&fb, "r: restart"));
    }

    #[test]
    fn test_current_piece_hidden_after_game_over() {
        let mut snap = GameEngine::new(7).snapshot();
        snap.phase = Phase::GameOver;
        let view = GameView::default();
        let fb = view.render(&snap, Viewport::new(80, 30));
        let frame = view.frame(Viewport::new(80, 30));

        // The board is empty, so every well cell shows the empty marker.
        for (x, y) in snap.current.cells() {
            let px = frame.x + 1 + x as u16 * 2;
            let py = frame.y + 1 + y as u16;
            assert_eq!(fb.get(px, py).unwrap().ch, '·');
        }
    }

    #[test]
    fn test_side_panel_lists_controls() {
        let snap = GameEngine::new(7).snapshot();
        let fb = GameView::default().render(&snap, Viewport::new(80, 30));
        assert!(find_text(&fb, "KEYS"));
        for line in KEY_LEGEND {
            assert!(find_text(&fb, line), "missing legend line {:?}", line);
        }
    }

    #[test]
    fn test_tiny_viewport_does_not_panic() {
        let snap = GameSnapshot::default();
        let fb = GameView::default().render(&snap, Viewport::new(5, 3));
        assert_eq!((fb.width(), fb.height()), (5, 3));
    }
}
