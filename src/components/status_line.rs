use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// A single line of text, optionally in inverse video.
///
/// Used for the warning line and the footer.
pub struct StatusLineWidget<'a> {
    text: &'a str,
    reversed: bool,
}

impl<'a> StatusLineWidget<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            reversed: false,
        }
    }

    pub fn reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }
}

impl<'a> Widget for StatusLineWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 || self.text.is_empty() {
            return;
        }

        let style = if self.reversed {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        let line = Line::from(Span::styled(format!("    {}", self.text), style));
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
