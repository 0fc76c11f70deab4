// src/ui/widgets/scan_page.rs

use crate::app::{App, Page, SPINNER_CHARS};
use crate::ui::components::results_view;
use crate::ui::layout::create_scan_layout;
use crate::ui::widgets::{input, results::ResultsWidget};
use ratatui::{
    prelude::*,
    widgets::{Paragraph, Scrollbar, ScrollbarOrientation, Wrap},
};

/// Renders the scan form, its status line and, once available, the results.
pub fn render_scan_page(frame: &mut Frame, app: &mut App, area: Rect) {
    let Page::Scan(vm) = &app.page else {
        return;
    };
    let layout = create_scan_layout(area);

    input::render_input(frame, vm, layout.input);
    input::render_button(frame, vm, layout.button);

    let status = if vm.loading() {
        Some(Line::from(vec![
            Span::styled(
                format!("{} ", SPINNER_CHARS[app.spinner_frame]),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw(format!("Scanning {}", vm.domain)),
        ]))
    } else {
        vm.error().map(|message| {
            Line::from(Span::styled(message.to_string(), Style::default().fg(Color::Red)))
        })
    };
    if let Some(status) = status {
        let paragraph = Paragraph::new(status).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, layout.status.inner(Margin::new(1, 0)));
    }

    let Some(view) = vm.result().map(results_view) else {
        return;
    };

    let results_area = layout.results.inner(Margin::new(1, 0));
    let content_height = ResultsWidget::content_height(&view, results_area.width);
    let max_offset = content_height.saturating_sub(results_area.height);
    app.clamp_scroll(max_offset as usize + 1, max_offset as usize);

    frame.render_widget(
        ResultsWidget::new(&view, app.scroll_offset as u16),
        results_area,
    );

    if max_offset > 0 {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight);
        frame.render_stateful_widget(scrollbar, layout.results, &mut app.report_scroll_state);
    }
}
