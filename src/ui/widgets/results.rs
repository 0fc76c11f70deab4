// src/ui/widgets/results.rs

use crate::ui::components::ResultsView;
use crate::ui::widgets::panel::PanelWidget;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// The scrollable stack of section headings and panels.
pub struct ResultsWidget<'a> {
    view: &'a ResultsView,
    scroll: u16,
}

impl<'a> ResultsWidget<'a> {
    pub fn new(view: &'a ResultsView, scroll: u16) -> Self {
        Self { view, scroll }
    }

    /// Total rows of the unscrolled content laid out `width` columns wide.
    pub fn content_height(view: &ResultsView, width: u16) -> u16 {
        let sections: u16 = view
            .sections
            .iter()
            .map(|section| {
                2 + section
                    .panels
                    .iter()
                    .map(|panel| PanelWidget::new(panel).height(width))
                    .sum::<u16>()
            })
            .sum();
        2 + sections
    }
}

impl Widget for ResultsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = Self::content_height(self.view, area.width);
        let mut canvas = Buffer::empty(Rect::new(0, 0, area.width, height));

        let mut y = 0;
        Paragraph::new(Line::from(Span::styled(
            self.view.heading.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .render(Rect::new(0, y, area.width, 1), &mut canvas);
        y += 2;

        for section in &self.view.sections {
            Paragraph::new(Line::from(Span::styled(
                section.heading.as_str(),
                Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )))
            .render(Rect::new(0, y, area.width, 1), &mut canvas);
            y += 2;

            for panel in &section.panels {
                let widget = PanelWidget::new(panel);
                let panel_height = widget.height(area.width);
                widget.render(Rect::new(0, y, area.width, panel_height), &mut canvas);
                y += panel_height;
            }
        }

        // Copy the visible window of the canvas into the frame.
        let scroll = self.scroll.min(height.saturating_sub(area.height));
        for row in 0..area.height {
            let source_y = row + scroll;
            if source_y >= height {
                break;
            }
            for x in 0..area.width {
                if let (Some(source), Some(target)) = (
                    canvas.cell((x, source_y)),
                    buf.cell_mut((area.x + x, area.y + row)),
                ) {
                    *target = source.clone();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Check, Grade, ScanResult};
    use crate::ui::components::results_view;
    use ratatui::{backend::TestBackend, Terminal};

    fn sample_view() -> ResultsView {
        let scan = ScanResult {
            domain: "cfssl.org".to_string(),
            tcp_dial: Check { grade: Some(Grade::Good), output: None },
            chain_expiration: Check {
                grade: Some(Grade::Warning),
                output: Some("2030-01-02T03:04:05Z".to_string()),
            },
            ..ScanResult::default()
        };
        results_view(&scan)
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
            .collect()
    }

    #[test]
    fn content_height_sums_headings_and_panels() {
        let view = sample_view();
        // heading 2, Connectivity 2 + 3 panels of 3, PKI 2 + expiration 7 + validation 4
        // (both PKI bodies wrap inside 58 columns)
        assert_eq!(ResultsWidget::content_height(&view, 60), 2 + 2 + 9 + 2 + 7 + 4);
        assert!(ResultsWidget::content_height(&view, 200) < ResultsWidget::content_height(&view, 60));
    }

    #[test]
    fn scrolling_moves_the_window() {
        let view = sample_view();
        let mut terminal = Terminal::new(TestBackend::new(60, 4)).unwrap();

        terminal
            .draw(|frame| frame.render_widget(ResultsWidget::new(&view, 0), frame.area()))
            .unwrap();
        assert!(row_text(terminal.backend().buffer(), 0).starts_with("Results for cfssl.org"));
        assert!(row_text(terminal.backend().buffer(), 2).starts_with("Connectivity"));

        terminal
            .draw(|frame| frame.render_widget(ResultsWidget::new(&view, 2), frame.area()))
            .unwrap();
        assert!(row_text(terminal.backend().buffer(), 0).starts_with("Connectivity"));
    }

    #[test]
    fn scroll_is_clamped_to_content() {
        let view = sample_view();
        let height = ResultsWidget::content_height(&view, 60);
        let mut terminal = Terminal::new(TestBackend::new(60, 3)).unwrap();
        terminal
            .draw(|frame| frame.render_widget(ResultsWidget::new(&view, u16::MAX), frame.area()))
            .unwrap();
        // The last row of content is the bottom border of the final panel.
        let last = row_text(terminal.backend().buffer(), 2);
        assert!(last.starts_with('└'), "unexpected last row {last:?} of {height}");
    }
}
