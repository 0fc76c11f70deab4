// src/ui/widgets/home.rs

use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};

pub const HOME_HEADING: &str = "CFSSL: CloudFlare's PKI toolkit";

pub const HOME_LINKS: [(&str, &str); 2] = [
    ("blog post", "https://blog.cloudflare.com/introducing-cfssl"),
    ("contribute on GitHub", "https://github.com/cloudflare/cfssl"),
];

pub fn render_home(frame: &mut Frame, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(HOME_HEADING, Style::default().bold().underlined())),
        Line::from(""),
        Line::from("See:"),
    ];
    lines.extend(HOME_LINKS.iter().map(|(label, href)| {
        Line::from(vec![
            Span::raw("  • "),
            Span::raw(*label),
            Span::raw(": "),
            Span::styled(*href, Style::default().fg(Color::Cyan).underlined()),
        ])
    }));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("Open the "),
        Span::styled("Scan", Style::default().bold().fg(Color::Yellow)),
        Span::raw(" tab to check a host's TLS configuration."),
    ]));

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area.inner(Margin::new(1, 1)));
}
