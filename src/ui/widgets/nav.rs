// src/ui/widgets/nav.rs

use crate::router::Route;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Tabs},
};

/// Nav entries as (label, route prefix).
pub const NAV_ENTRIES: [(&str, &str); 2] = [("Home", "/"), ("Scan", "/scan")];

/// Index of the nav entry matching `route`.
pub fn active_entry(route: &Route) -> usize {
    match route {
        Route::Home => 0,
        Route::Scan { .. } => NAV_ENTRIES
            .iter()
            .position(|(_, prefix)| *prefix != "/" && route.is_under(prefix))
            .unwrap_or(0),
    }
}

/// Renders the brand and the page tabs.
pub fn render_nav(frame: &mut Frame, route: &Route, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(" CFSSL ", Style::default().bold().fg(Color::Cyan)));
    let tabs = Tabs::new(NAV_ENTRIES.iter().map(|(label, _)| *label))
        .block(block)
        .select(active_entry(route))
        .highlight_style(Style::default().bold().fg(Color::Yellow));
    frame.render_widget(tabs, area);
}
