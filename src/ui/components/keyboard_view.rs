use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Widget};

use crate::ui::animation::blend;
use crate::ui::layout::Projection;
use crate::ui::stage::Stage;
use crate::ui::theme::Theme;

pub struct KeyboardView<'a> {
    stage: &'a Stage,
    row_pitch: f64,
    theme: &'a Theme,
}

impl<'a> KeyboardView<'a> {
    pub fn new(stage: &'a Stage, row_pitch: f64, theme: &'a Theme) -> Self {
        Self {
            stage,
            row_pitch,
            theme,
        }
    }
}

impl Widget for KeyboardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let placements = self.stage.keys().iter().map(|cell| &cell.placement);
        let Some(projection) = Projection::fit(placements, self.row_pitch, inner) else {
            return;
        };

        // Growing keys are drawn last so they overlap their neighbours.
        let mut samples: Vec<_> = self
            .stage
            .keys()
            .iter()
            .filter_map(|cell| Some((cell, self.stage.sample(&cell.placement.label)?)))
            .collect();
        samples.sort_by(|a, b| a.1.scale.total_cmp(&b.1.scale));

        for (cell, sample) in samples {
            let rect = projection.project(&cell.placement, sample.scale);
            if rect.is_empty() {
                continue;
            }

            let fill = blend(colors.key_fill(sample.fill), colors.bg(), sample.alpha);
            let mut style = Style::default().fg(colors.key_label()).bg(fill);
            if sample.scale > 1.0 {
                style = style.add_modifier(Modifier::BOLD);
            }
            buf.set_style(rect, style);

            let label = cell.placement.label.as_str();
            let label_width = label.chars().count() as u16;
            let (text, text_width) = if label_width <= rect.width {
                (label, label_width)
            } else {
                // Compressed keys only have room for the first character
                let end = label.char_indices().nth(1).map_or(label.len(), |(i, _)| i);
                (&label[..end], 1)
            };
            let x = rect.x + (rect.width - text_width) / 2;
            let y = rect.y + rect.height.saturating_sub(1) / 2;
            buf.set_string(x, y, text, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use ratatui::style::Color;

    use super::*;
    use crate::keyboard::geometry::{KeyGeometry, place_keys};
    use crate::keyboard::layout::KeyboardLayout;
    use crate::practice::surface::{KeyFill, KeyVisual, Surface};
    use crate::ui::animation::AnimationTiming;
    use crate::ui::theme::ThemeColors;

    fn stage() -> Stage {
        let mut stage = Stage::new(AnimationTiming::default(), Instant::now());
        for placement in place_keys(&KeyboardLayout::qwerty(), &KeyGeometry::default()) {
            stage.create_key(&KeyVisual::new(placement));
        }
        stage
    }

    fn theme() -> Theme {
        Theme {
            name: "test".to_string(),
            colors: ThemeColors::default(),
        }
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (buf.area.x..buf.area.right())
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_renders_labels() {
        let stage = stage();
        let theme = theme();
        let area = Rect::new(0, 0, 120, 18);
        let mut buf = Buffer::empty(area);
        KeyboardView::new(&stage, 70.0, &theme).render(area, &mut buf);

        let all: String = (0..area.height).map(|y| row_text(&buf, y)).collect();
        assert!(all.contains('Q'));
        assert!(all.contains("SPACE"));
    }

    #[test]
    fn test_highlight_fill_is_drawn() {
        let mut stage = stage();
        stage.fill_key("A", KeyFill::Highlight);
        let theme = theme();
        let area = Rect::new(0, 0, 120, 18);
        let mut buf = Buffer::empty(area);
        KeyboardView::new(&stage, 70.0, &theme).render(area, &mut buf);

        let highlight = theme.colors.key_fill(KeyFill::Highlight);
        let painted = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .filter(|&(x, y)| buf[(x, y)].bg == highlight)
            .count();
        // One 6x2 key.
        assert_eq!(painted, 12);
        assert_ne!(highlight, Color::White);
    }

    #[test]
    fn test_tiny_area_does_not_panic() {
        let stage = stage();
        let theme = theme();
        let area = Rect::new(0, 0, 4, 3);
        let mut buf = Buffer::empty(area);
        KeyboardView::new(&stage, 70.0, &theme).render(area, &mut buf);
    }
}
