use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::keyboard::geometry::KeyPlacement;

/// Horizontal pixels per terminal column at full size.
const PX_PER_COL: f64 = 10.0;
/// Terminal rows used by one keyboard row (key plus gap).
const ROWS_PER_KEY_ROW: f64 = 3.0;

/// Screen regions of the practice view.
pub struct PracticeLayout {
    pub title: Rect,
    pub instructions: Rect,
    pub score: Rect,
    pub prompt: Rect,
    pub keyboard: Rect,
    pub footer: Rect,
}

impl PracticeLayout {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(8),
                Constraint::Length(1),
            ])
            .split(area);

        Self {
            title: rows[1],
            instructions: rows[2],
            score: rows[4],
            prompt: rows[6],
            keyboard: rows[8],
            footer: rows[9],
        }
    }
}

/// Maps pixel-space key placements onto terminal cells, shrinking
/// horizontally when the keyboard would not fit.
#[derive(Clone, Debug, PartialEq)]
pub struct Projection {
    origin_x: f64,
    origin_y: f64,
    px_per_col: f64,
    px_per_row: f64,
    area: Rect,
    pad_x: u16,
}

impl Projection {
    pub fn fit<'a>(
        placements: impl IntoIterator<Item = &'a KeyPlacement>,
        row_pitch: f64,
        area: Rect,
    ) -> Option<Self> {
        let mut bounds: Option<(f64, f64, f64, f64)> = None;
        for p in placements {
            let (l, r, t, b) = bounds.unwrap_or((p.left(), p.right(), p.top(), p.bottom()));
            bounds = Some((l.min(p.left()), r.max(p.right()), t.min(p.top()), b.max(p.bottom())));
        }
        let (left, right, top, bottom) = bounds?;
        if area.width == 0 || area.height == 0 {
            return None;
        }

        let span_x = right - left;
        let span_y = bottom - top;
        let px_per_col = PX_PER_COL.max(span_x / area.width as f64);
        let px_per_row = (row_pitch / ROWS_PER_KEY_ROW).max(span_y / area.height as f64);

        let used_cols = (span_x / px_per_col).round() as u16;
        let pad_x = area.width.saturating_sub(used_cols) / 2;

        Some(Self {
            origin_x: left,
            origin_y: top,
            px_per_col,
            px_per_row,
            area,
            pad_x,
        })
    }

    /// Cell rectangle for `placement` grown around its center by `scale`,
    /// clipped to the fitted area.
    pub fn project(&self, placement: &KeyPlacement, scale: f64) -> Rect {
        let width_px = placement.width * scale;
        let height_px = placement.height * scale;
        let left_px = placement.x - width_px / 2.0 - self.origin_x;
        let top_px = placement.y - height_px / 2.0 - self.origin_y;

        let col = (left_px / self.px_per_col).round().max(0.0) as u16;
        let row = (top_px / self.px_per_row).round().max(0.0) as u16;
        let width = ((width_px / self.px_per_col).round() as u16).max(1);
        let height = ((height_px / self.px_per_row).floor() as u16).max(1);

        let rect = Rect::new(
            self.area.x.saturating_add(self.pad_x).saturating_add(col),
            self.area.y.saturating_add(row),
            width,
            height,
        );
        rect.intersection(self.area)
    }
}
