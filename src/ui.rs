use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use crate::components::listing::ListingWidget;
use crate::components::status_line::StatusLineWidget;
use crate::plan::{FramePlan, FOOTER_ROWS, HEADER_ROWS, KEY_HELP, TITLE};

/// Split the screen into header, warning line, listing and footer areas.
fn layout(area: Rect) -> (Rect, Rect, Rect, Rect) {
    let [header, listing, footer] = Layout::vertical([
        Constraint::Length(HEADER_ROWS),
        Constraint::Min(0),
        Constraint::Length(FOOTER_ROWS),
    ])
    .areas(area);
    // Warning line is the seventh header row.
    let warning = Rect::new(header.x, header.y + 6, header.width, 1).intersection(header);
    (header, warning, listing, footer)
}

/// Paint a planned frame.
pub fn render(plan: &FramePlan, frame: &mut Frame) {
    let (header, warning, listing, footer) = layout(frame.area());

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let indent = |text: &str| Line::styled(format!("    {text}"), bold);
    let header_lines = vec![
        Line::default(),
        indent(TITLE),
        indent(KEY_HELP),
        Line::default(),
        indent(plan.header.as_str()),
    ];
    frame.render_widget(Paragraph::new(header_lines), header);

    if let Some(text) = &plan.warning {
        frame.render_widget(StatusLineWidget::new(text).reversed(true), warning);
    }
    frame.render_widget(ListingWidget::new(&plan.rows), listing);
    frame.render_widget(StatusLineWidget::new(&plan.footer), footer);
}
