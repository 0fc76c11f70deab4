// src/ui/widgets/input.rs
use ratatui::{prelude::*, widgets::{Block, Borders, Paragraph}};
use crate::core::view_model::ScanViewModel;

const PLACEHOLDER: &str = "cfssl.org";

/// Renders the host input box of the scan form.
pub fn render_input(frame: &mut Frame, vm: &ScanViewModel, area: Rect) {
    let input_block = Block::default().borders(Borders::ALL).title("Host");
    let input_paragraph = if vm.domain.is_empty() {
        Paragraph::new(PLACEHOLDER).style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(vm.domain.as_str()).style(Style::default().fg(Color::Yellow))
    };
    frame.render_widget(input_paragraph.block(input_block), area);

    // The cursor only shows while the form accepts a new scan.
    if !vm.loading() {
        frame.set_cursor_position(Position::new(
            area.x + vm.domain.chars().count() as u16 + 1,
            area.y + 1,
        ));
    }
}

/// Renders the submit button, greyed out while a scan is running.
pub fn render_button(frame: &mut Frame, vm: &ScanViewModel, area: Rect) {
    let style = if vm.loading() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().bold().fg(Color::Black).bg(Color::Yellow)
    };
    let button = Line::from(vec![Span::raw(" "), Span::styled(" Scan ", style)]);
    frame.render_widget(Paragraph::new(button), area);
}
