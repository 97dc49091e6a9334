use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::plan::RowDescriptor;

/// Columns between the left edge and the selection marker.
const INDENT: usize = 4;

/// Paints planned listing rows top to bottom.
pub struct ListingWidget<'a> {
    rows: &'a [RowDescriptor],
}

impl<'a> ListingWidget<'a> {
    pub fn new(rows: &'a [RowDescriptor]) -> Self {
        Self { rows }
    }
}

impl<'a> Widget for ListingWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let width = area.width as usize;

        for (i, row) in self.rows.iter().take(area.height as usize).enumerate() {
            let y = area.y + i as u16;
            let text = format!("{:indent$}{}", "", row.label(), indent = INDENT);

            let line = if row.is_highlighted() {
                // Inverse video across the full row, like a menu bar.
                let padded = format!("{:<width$}", text, width = width);
                Line::from(Span::styled(
                    padded,
                    Style::default().add_modifier(Modifier::REVERSED),
                ))
            } else {
                Line::from(Span::raw(text))
            };
            buf.set_line(area.x, y, &line, area.width);
        }
    }
}
