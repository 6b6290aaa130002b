//! GameView: encodes a `GameSnapshot` into terminal drawing commands.
//!
//! Pure encoding (no terminal I/O): commands are queued into a byte buffer
//! the renderer flushes. Board cells are drawn two columns wide to
//! compensate for terminal glyph aspect ratio.

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
    QueueableCommand,
};

use crate::core::pieces;
use crate::core::snapshot::GameSnapshot;
use crate::types::{Phase, PieceKind};

/// Terminal columns per board cell
const CELL_W: u16 = 2;

/// Ghost piece color (dark gray, per the reference palette)
const GHOST: Color = Color::Rgb {
    r: 0x1a,
    g: 0x1a,
    b: 0x1a,
};

const EMPTY: Color = Color::Rgb {
    r: 0x10,
    g: 0x10,
    b: 0x18,
};

const BORDER: Color = Color::Rgb {
    r: 0xc8,
    g: 0xc8,
    b: 0xc8,
};

fn kind_color(kind: PieceKind) -> Color {
    let (r, g, b) = pieces::color(kind);
    Color::Rgb { r, g, b }
}

/// Stateless snapshot-to-commands encoder
#[derive(Debug, Default)]
pub struct GameView;

impl GameView {
    /// Encode a full frame for the snapshot into `out`.
    pub fn encode(&self, snap: &GameSnapshot, out: &mut Vec<u8>) -> Result<()> {
        out.queue(Clear(ClearType::All))?;
        out.queue(ResetColor)?;

        let origin_x: u16 = 2;
        let origin_y: u16 = 1;
        let board_w = snap.cols as u16 * CELL_W;
        let board_h = snap.visible_rows as u16;

        self.draw_frame_border(out, origin_x, origin_y, board_w, board_h)?;
        self.draw_cells(snap, out, origin_x + 1, origin_y + 1)?;
        self.draw_side_panel(snap, out, origin_x + board_w + 4, origin_y + 1)?;
        self.draw_banner(snap, out, origin_x + 1, origin_y + 1 + board_h / 2, board_w)?;

        out.queue(ResetColor)?;
        Ok(())
    }

    fn draw_frame_border(
        &self,
        out: &mut Vec<u8>,
        x: u16,
        y: u16,
        inner_w: u16,
        inner_h: u16,
    ) -> Result<()> {
        out.queue(SetForegroundColor(BORDER))?;

        out.queue(MoveTo(x, y))?;
        out.queue(Print(format!("+{}+", "-".repeat(inner_w as usize))))?;
        for row in 0..inner_h {
            out.queue(MoveTo(x, y + 1 + row))?;
            out.queue(Print("|"))?;
            out.queue(MoveTo(x + 1 + inner_w, y + 1 + row))?;
            out.queue(Print("|"))?;
        }
        out.queue(MoveTo(x, y + 1 + inner_h))?;
        out.queue(Print(format!("+{}+", "-".repeat(inner_w as usize))))?;
        Ok(())
    }

    fn draw_cells(&self, snap: &GameSnapshot, out: &mut Vec<u8>, x0: u16, y0: u16) -> Result<()> {
        for vy in 0..snap.visible_rows {
            for vx in 0..snap.cols {
                let color = self
                    .cell_color(snap, vx, vy)
                    .unwrap_or(EMPTY);
                out.queue(MoveTo(x0 + vx as u16 * CELL_W, y0 + vy as u16))?;
                out.queue(SetBackgroundColor(color))?;
                out.queue(Print("  "))?;
            }
        }
        out.queue(ResetColor)?;
        Ok(())
    }

    /// Color for a visible-window cell: active piece over ghost over locked.
    fn cell_color(&self, snap: &GameSnapshot, vx: i8, vy: i8) -> Option<Color> {
        if let Some(active) = &snap.active {
            let covers = |anchor_y: i8| {
                active.cells.iter().any(|&(dx, dy)| {
                    active.x + dx == vx && anchor_y + dy - snap.hidden_rows == vy
                })
            };

            if covers(active.y) {
                return Some(kind_color(active.kind));
            }
            if let Some(ghost_row) = snap.ghost_row {
                if covers(ghost_row) {
                    return Some(GHOST);
                }
            }
        }
        snap.visible_cell(vx, vy).map(kind_color)
    }

    fn draw_side_panel(
        &self,
        snap: &GameSnapshot,
        out: &mut Vec<u8>,
        x: u16,
        y: u16,
    ) -> Result<()> {
        out.queue(SetForegroundColor(BORDER))?;

        let hold = snap
            .hold
            .map(|k| k.as_str())
            .unwrap_or("-");
        let lines = [
            format!("HOLD  {hold}"),
            format!("NEXT  {}", snap.next.as_str()),
            String::new(),
            format!("Score {}", snap.score),
            format!("Level {}", snap.level),
            format!("Lines {}", snap.lines),
            String::new(),
            "arrows move/rotate".to_string(),
            "z/x rotate  c hold".to_string(),
            "space drop  esc pause".to_string(),
            "enter restart  q quit".to_string(),
        ];

        for (i, line) in lines.iter().enumerate() {
            out.queue(MoveTo(x, y + i as u16))?;
            out.queue(Print(line))?;
        }
        Ok(())
    }

    fn draw_banner(
        &self,
        snap: &GameSnapshot,
        out: &mut Vec<u8>,
        x0: u16,
        y: u16,
        board_w: u16,
    ) -> Result<()> {
        let text = match snap.phase {
            Phase::Paused => "PAUSED",
            Phase::GameOver => "GAME OVER",
            Phase::NotStarted => "PRESS ENTER",
            Phase::Running => return Ok(()),
        };

        let x = x0 + board_w.saturating_sub(text.len() as u16) / 2;
        out.queue(MoveTo(x, y))?;
        out.queue(SetBackgroundColor(Color::Black))?;
        out.queue(SetForegroundColor(Color::White))?;
        out.queue(Print(text))?;
        out.queue(ResetColor)?;
        Ok(())
    }
}
