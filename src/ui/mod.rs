// src/ui/mod.rs

use crate::app::{App, Page};
use ratatui::prelude::*;

pub mod components;
mod layout;
pub mod plain;
pub mod widgets;

pub fn render(app: &mut App, frame: &mut Frame) {
    let layout = layout::create_layout(frame.area());

    widgets::nav::render_nav(frame, &app.route, layout.nav);

    if matches!(app.page, Page::Home) {
        widgets::home::render_home(frame, layout.content);
    } else {
        widgets::scan_page::render_scan_page(frame, app, layout.content);
    }

    widgets::footer::render_footer(frame, app, layout.footer);
}
