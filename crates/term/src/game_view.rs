//! GameView: maps a `GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Gate positions are percentages: `x` spans the field width and `y` spans the
//! field height, so the gameplay floor (`GAME_HEIGHT`, 80%) sits four fifths of
//! the way down and is drawn as a dashed line.

use crate::core::{GameSnapshot, GateSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::toast::{ToastKind, Toasts};
use crate::types::{GamePhase, GateType, GAME_HEIGHT};

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

/// Host-side state drawn on top of the game: things the engine does not own.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overlay<'a> {
    pub last_key: Option<GateType>,
    pub toasts: Option<&'a Toasts>,
}

/// Side panel width, including its left gap.
const PANEL_W: u16 = 24;
const PANEL_GAP: u16 = 2;

const FIELD_BG: Rgb = Rgb::new(24, 26, 36);
const BLACK: Rgb = Rgb::new(0, 0, 0);
/// Drawn after the label of NOT, NAND, NOR and XNOR gates.
const INVERSION_BUBBLE: char = '○';

/// A lightweight terminal renderer for the falling-gate game.
pub struct GameView {
    /// Maximum play field width in terminal columns (inside the border).
    field_w: u16,
    /// Maximum play field height in terminal rows (inside the border).
    field_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            field_w: 48,
            field_h: 30,
        }
    }
}

/// Resolved geometry for one frame.
#[derive(Debug, Clone, Copy)]
struct Layout {
    x: u16,
    y: u16,
    inner_w: u16,
    inner_h: u16,
}

impl Layout {
    fn frame_w(&self) -> u16 {
        self.inner_w + 2
    }

    fn frame_h(&self) -> u16 {
        self.inner_h + 2
    }

    /// Field row for a vertical percentage.
    fn row(&self, y_pct: f32) -> u16 {
        let r = (y_pct.max(0.0) / 100.0 * self.inner_h as f32) as u16;
        r.min(self.inner_h.saturating_sub(1))
    }

    /// Field column for a horizontal percentage.
    fn col(&self, x_pct: f32) -> u16 {
        let c = (x_pct.clamp(0.0, 100.0) / 100.0 * self.inner_w as f32) as u16;
        c.min(self.inner_w.saturating_sub(1))
    }
}

impl GameView {
    pub fn new(field_w: u16, field_h: u16) -> Self {
        Self { field_w, field_h }
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// Allocation-free once `fb` has reached the viewport size.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        overlay: &Overlay<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let Some(layout) = self.layout(viewport) else {
            return;
        };

        let field = CellStyle::new(Rgb::new(80, 80, 90), FIELD_BG);
        fb.fill_rect(
            layout.x + 1,
            layout.y + 1,
            layout.inner_w,
            layout.inner_h,
            ' ',
            field,
        );
        self.draw_border(fb, layout, CellStyle::new(Rgb::new(200, 200, 200), BLACK));
        self.draw_hud(fb, snap, layout);

        match snap.phase {
            GamePhase::NotStarted => self.draw_start_screen(fb, layout),
            GamePhase::Playing => {
                self.draw_floor(fb, layout);
                if let Some(kind) = overlay.last_key {
                    self.draw_last_key(fb, layout, kind);
                }
                for gate in &snap.entities {
                    self.draw_gate(fb, layout, gate);
                }
            }
            GamePhase::GameOver => self.draw_game_over(fb, snap, layout),
        }

        self.draw_side_panel(fb, overlay, viewport, layout);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &GameSnapshot,
        overlay: &Overlay<'_>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, overlay, viewport, &mut fb);
        fb
    }

    fn layout(&self, viewport: Viewport) -> Option<Layout> {
        let inner_w = self.field_w.min(viewport.width.saturating_sub(2));
        let inner_h = self.field_h.min(viewport.height.saturating_sub(2));
        if inner_w < 4 || inner_h < 2 {
            return None;
        }
        let frame_w = inner_w + 2;
        let with_panel = frame_w + PANEL_GAP + PANEL_W;
        let x = if viewport.width >= with_panel {
            (viewport.width - with_panel) / 2
        } else {
            viewport.width.saturating_sub(frame_w) / 2
        };
        let y = viewport.height.saturating_sub(inner_h + 2) / 2;
        Some(Layout {
            x,
            y,
            inner_w,
            inner_h,
        })
    }

    fn draw_border(&self, fb: &mut FrameBuffer, l: Layout, style: CellStyle) {
        let (x, y, w, h) = (l.x, l.y, l.frame_w(), l.frame_h());

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

    /// Score and level, written into the top border.
    fn draw_hud(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, l: Layout) {
        let label = CellStyle::new(Rgb::new(160, 160, 170), BLACK);
        let value = CellStyle::new(Rgb::new(255, 255, 255), BLACK).bold();
        let limit = l.x + l.frame_w() - 1;

        let mut x = l.x + 2;
        for (name, n) in [(" SCORE ", snap.score), (" LEVEL ", snap.level)] {
            let needed = name.len() as u16 + digit_count(n) + 1;
            if x + needed > limit {
                break;
            }
            x = fb.put_str(x, l.y, name, label);
            x = fb.put_u32(x, l.y, n, value);
            x = fb.put_str(x, l.y, " ", label);
        }
    }

    fn draw_floor(&self, fb: &mut FrameBuffer, l: Layout) {
        let row = l.row(GAME_HEIGHT);
        let style = CellStyle::new(Rgb::new(120, 60, 60), FIELD_BG).dim();
        for dx in 0..l.inner_w {
            fb.put_char(l.x + 1 + dx, l.y + 1 + row, '╌', style);
        }
    }

    fn draw_gate(&self, fb: &mut FrameBuffer, l: Layout, gate: &GateSnapshot) {
        let label = gate.kind.label();
        let bubble = gate.kind.inverted().then_some(INVERSION_BUBBLE);
        let w = label.len() as u16 + 2 + bubble.is_some() as u16;
        let center = l.col(gate.x);
        let left = center
            .saturating_sub(w / 2)
            .min(l.inner_w.saturating_sub(w));
        let row = l.row(gate.y);

        let style = if gate.hit {
            CellStyle::new(BLACK, Rgb::new(90, 220, 120)).bold()
        } else {
            CellStyle::new(gate_color(gate.kind), FIELD_BG).bold()
        };

        let mut x = l.x + 1 + left;
        let end = l.x + 1 + l.inner_w;
        let glyphs = std::iter::once('[')
            .chain(label.chars())
            .chain(std::iter::once(']'))
            .chain(bubble);
        for ch in glyphs {
            if x >= end {
                break;
            }
            fb.put_char(x, l.y + 1 + row, ch, style);
            x += 1;
        }
    }

    fn draw_last_key(&self, fb: &mut FrameBuffer, l: Layout, kind: GateType) {
        let style = CellStyle::new(Rgb::new(110, 110, 130), FIELD_BG).bold();
        let row = l.y + 1 + l.inner_h / 2;
        fb.put_str_centered(l.x + 1, l.inner_w, row, kind.label(), style);
        let sym = CellStyle { bold: false, ..style }.dim();
        fb.put_str_centered(l.x + 1, l.inner_w, row + 1, kind.symbol(), sym);
    }

    fn draw_start_screen(&self, fb: &mut FrameBuffer, l: Layout) {
        let title = CellStyle::new(Rgb::new(255, 255, 255), FIELD_BG).bold();
        let text = CellStyle::new(Rgb::new(200, 200, 210), FIELD_BG);
        let hint = CellStyle::new(Rgb::new(240, 220, 80), FIELD_BG).bold();

        // Title, blank, seven key rows, blank, hint.
        let rows = 2 + GateType::ALL.len() as u16 + 2;
        let mut y = l.y + 1 + l.inner_h.saturating_sub(rows) / 2;
        let bottom = l.y + 1 + l.inner_h;
        let fx = l.x + 1;

        fb.put_str_centered(fx, l.inner_w, y, "LOGIC GATE CHALLENGE", title);
        y += 2;
        // "a  AND   &"
        let row_w = 10;
        let rx = fx + l.inner_w.saturating_sub(row_w) / 2;
        for kind in GateType::ALL {
            if y + 2 >= bottom {
                break;
            }
            fb.put_char(rx, y, kind.key(), CellStyle::new(gate_color(kind), FIELD_BG).bold());
            fb.put_str(rx + 3, y, kind.label(), text);
            fb.put_str(rx + 8, y, kind.symbol(), text.dim());
            y += 1;
        }
        y += 1;
        if y < bottom {
            fb.put_str_centered(fx, l.inner_w, y, "press ENTER to start", hint);
        }
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, l: Layout) {
        let title = CellStyle::new(Rgb::new(255, 90, 90), FIELD_BG).bold();
        let text = CellStyle::new(Rgb::new(220, 220, 220), FIELD_BG);
        let hint = CellStyle::new(Rgb::new(240, 220, 80), FIELD_BG).bold();
        let fx = l.x + 1;
        let mid = l.y + 1 + l.inner_h / 2;

        fb.put_str_centered(fx, l.inner_w, mid.saturating_sub(2), "GAME OVER", title);

        let label = "FINAL SCORE ";
        let w = label.len() as u16 + digit_count(snap.score);
        let x = fx + l.inner_w.saturating_sub(w) / 2;
        let x = fb.put_str(x, mid, label, text);
        fb.put_u32(x, mid, snap.score, text.bold());

        let stats = &snap.stats;
        let dim = text.dim();
        let mut x = fx + 1;
        for (name, n) in [
            ("hits ", stats.hits),
            (" missed ", stats.misses),
            (" wrong ", stats.wrong_keys),
        ] {
            x = fb.put_str(x, mid + 1, name, dim);
            x = fb.put_u32(x, mid + 1, n, dim);
        }

        if mid + 3 < l.y + 1 + l.inner_h {
            fb.put_str_centered(fx, l.inner_w, mid + 3, "press ENTER to play again", hint);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        overlay: &Overlay<'_>,
        viewport: Viewport,
        l: Layout,
    ) {
        let panel_x = l.x + l.frame_w() + PANEL_GAP;
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), BLACK).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), BLACK);

        let mut y = l.y;
        fb.put_str(panel_x, y, "KEYS", label);
        y += 1;
        for kind in GateType::ALL {
            fb.put_char(panel_x, y, kind.key(), CellStyle::new(gate_color(kind), BLACK).bold());
            fb.put_str(panel_x + 2, y, kind.label(), value);
            y += 1;
        }
        y += 1;
        fb.put_str(panel_x, y, "q quit", value.dim());
        y += 2;

        let Some(toasts) = overlay.toasts else {
            return;
        };
        for toast in toasts.iter() {
            if y >= viewport.height {
                break;
            }
            let fg = match toast.kind {
                ToastKind::Info => Rgb::new(220, 220, 220),
                ToastKind::Success => Rgb::new(90, 220, 120),
                ToastKind::Error => Rgb::new(255, 90, 90),
            };
            fb.put_str(panel_x, y, &toast.message, CellStyle::new(fg, BLACK));
            y += 1;
        }
    }
}

fn gate_color(kind: GateType) -> Rgb {
    match kind {
        GateType::And => Rgb::new(80, 160, 255),
        GateType::Or => Rgb::new(100, 220, 120),
        GateType::Not => Rgb::new(255, 90, 90),
        GateType::Xor => Rgb::new(200, 120, 220),
        GateType::Nand => Rgb::new(240, 220, 80),
        GateType::Nor => Rgb::new(255, 165, 0),
        GateType::Xnor => Rgb::new(80, 220, 220),
    }
}

fn digit_count(mut n: u32) -> u16 {
    let mut d = 1;
    while n >= 10 {
        n /= 10;
        d += 1;
    }
    d
}
