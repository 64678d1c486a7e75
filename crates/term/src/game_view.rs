//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, Phase};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::ColorFrame;

/// Half-period of the blink shown on rows waiting to be cleared.
pub const BLINK_MS: u64 = 100;

const BG: Rgb = Rgb::new(30, 30, 40);

/// Block colors indexed by color frame.
const PALETTE: [Rgb; 8] = [
    Rgb::new(220, 80, 80),
    Rgb::new(255, 165, 0),
    Rgb::new(80, 220, 220),
    Rgb::new(240, 220, 80),
    Rgb::new(100, 220, 120),
    Rgb::new(80, 120, 220),
    Rgb::new(200, 120, 220),
    Rgb::new(200, 200, 200),
];

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

/// Board origin on screen (top-left of the border).
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
    rows: u16,
}

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    ///
    /// `status` is an optional line shown under the side panel, e.g. the
    /// latest session event.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        status: Option<&str>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear();

        let w = snap.width.saturating_mul(self.cell_w).saturating_add(2);
        let h = snap.height.saturating_add(2);
        let frame = Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: viewport.height.saturating_sub(h) / 2,
            w,
            h,
            rows: snap.height,
        };

        fb.fill_rect(frame.x + 1, frame.y + 1, w - 2, h - 2, ' ', CellStyle::new(BG, BG));
        draw_border(fb, frame, CellStyle::default());

        let blink_on = (snap.now_ms / BLINK_MS) % 2 == 0;
        for row in 0..snap.height as i32 {
            let blinking = snap.is_blinking(row as usize);
            for col in 0..snap.width as i32 {
                match snap.cell(row, col) {
                    Some(color) if blinking => {
                        let ch = if blink_on { '█' } else { '░' };
                        self.draw_block(fb, frame, row, col, color, ch);
                    }
                    Some(color) => self.draw_block(fb, frame, row, col, color, '█'),
                    None => {
                        let dot = CellStyle::new(Rgb::new(90, 90, 100), BG).dim();
                        self.fill_cell(fb, frame, row, col, '·', dot);
                    }
                }
            }
        }

        if let Some(active) = &snap.active {
            for pos in active.cells {
                if pos.row >= 0 && pos.row < snap.height as i32 {
                    self.draw_block(fb, frame, pos.row, pos.col, active.color, '█');
                }
            }
        }

        self.draw_side_panel(fb, snap, status, viewport, frame);

        if snap.lost {
            draw_overlay_text(fb, frame, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, status: Option<&str>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, status, viewport, &mut fb);
        fb
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, row: i32, col: i32, color: ColorFrame, ch: char) {
        let fg = PALETTE[color.0 as usize % PALETTE.len()];
        self.fill_cell(fb, frame, row, col, ch, CellStyle::new(fg, BG).bold());
    }

    /// Board row 0 is the bottom line inside the border.
    fn fill_cell(&self, fb: &mut FrameBuffer, frame: Frame, row: i32, col: i32, ch: char, style: CellStyle) {
        if row < 0 || col < 0 || row >= frame.rows as i32 {
            return;
        }
        let px = frame.x + 1 + col as u16 * self.cell_w;
        let py = frame.y + 1 + (frame.rows - 1 - row as u16);
        fb.fill_rect(px, py, self.cell_w, 1, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        status: Option<&str>,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x.saturating_add(12) > viewport.width {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let rows: [(&str, String); 3] = [
            ("PIECES", snap.piece_id.to_string()),
            ("PHASE", phase_label(snap.phase).to_string()),
            ("DROP", format!("{}ms", snap.fall_interval_ms)),
        ];

        let mut y = frame.y;
        for (name, text) in rows.iter() {
            fb.put_str(panel_x, y, name, label);
            fb.put_str(panel_x, y.saturating_add(1), text, value);
            y = y.saturating_add(3);
        }

        if let Some(status) = status {
            fb.put_str(panel_x, y, "EVENT", label);
            fb.put_str(panel_x, y.saturating_add(1), status, value);
            y = y.saturating_add(3);
        }

        let hint = value.dim();
        for line in ["←/→ move", "↑ rotate", "↓ drop", "r restart", "q quit"] {
            fb.put_str(panel_x, y, line, hint);
            y = y.saturating_add(1);
        }
    }
}

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "idle",
        Phase::Falling => "falling",
        Phase::Clearing => "clearing",
        Phase::Spawning => "spawning",
        Phase::Lost => "lost",
    }
}

fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
    let Frame { x, y, w, h, .. } = frame;
    if w < 2 || h < 2 {
        return;
    }

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

fn draw_overlay_text(fb: &mut FrameBuffer, frame: Frame, text: &str) {
    let mid_y = frame.y.saturating_add(frame.h / 2);
    let text_w = text.chars().count() as u16;
    let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
    let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
    fb.put_str(x, mid_y, text, style);
}
