// src/ui/widgets/footer.rs

use crate::app::{App, Page};
use ratatui::{
    prelude::*,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

pub const LICENSE_NOTICE: &str = "Code licensed under BSD-2-Clause.";

/// Renders the footer: the keys that work on this page, then the license line.
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let key = |label: &'static str| Span::styled(label, Style::new().bold().fg(Color::Yellow));
    let keys = match &app.page {
        Page::Home => Line::from(vec![
            key("Enter"),
            Span::raw(" to scan, "),
            key("Tab"),
            Span::raw(" to switch page, "),
            key("Esc"),
            Span::raw(" to quit."),
        ]),
        Page::Scan(vm) if vm.loading() => Line::from(vec![
            Span::raw("Scanning... "),
            key("Tab"),
            Span::raw(" to leave, "),
            key("Esc"),
            Span::raw(" to quit."),
        ]),
        Page::Scan(_) => Line::from(vec![
            key("Enter"),
            Span::raw(" to scan, "),
            key("↑ ↓ PgUp PgDn"),
            Span::raw(" to scroll, "),
            key("Tab"),
            Span::raw(" to switch page, "),
            key("Esc"),
            Span::raw(" to quit."),
        ]),
    };

    let footer = Paragraph::new(vec![
        keys,
        Line::from(Span::styled(LICENSE_NOTICE, Style::default().fg(Color::DarkGray))),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
