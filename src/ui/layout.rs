// src/ui/layout.rs

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen areas shared by every page.
pub struct AppLayout {
    pub nav: Rect,
    pub content: Rect,
    pub footer: Rect,
}

/// Nav bar on top, footer at the bottom, the page in between.
pub fn create_layout(frame_size: Rect) -> AppLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(frame_size);

    AppLayout {
        nav: chunks[0],
        content: chunks[1],
        footer: chunks[2],
    }
}

/// Areas of the Scan page.
pub struct ScanLayout {
    pub input: Rect,
    pub button: Rect,
    pub status: Rect,
    pub results: Rect,
}

pub fn create_scan_layout(content: Rect) -> ScanLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(content);

    ScanLayout {
        input: chunks[0],
        button: chunks[1],
        status: chunks[2],
        results: chunks[3],
    }
}
