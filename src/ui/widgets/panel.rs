// src/ui/widgets/panel.rs

use crate::ui::components::{Cell, ListGroup, Panel, PanelContent, Table};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Cell as TableCell, List, ListItem, Paragraph, Row, Table as TableWidget,
        Widget, Wrap,
    },
};

pub struct PanelWidget<'a> {
    panel: &'a Panel,
}

impl<'a> PanelWidget<'a> {
    pub fn new(panel: &'a Panel) -> Self {
        Self { panel }
    }

    /// Rows needed to draw the panel `width` columns wide, borders included.
    pub fn height(&self, width: u16) -> u16 {
        let body = self.body_height(width.saturating_sub(2));
        let content = match &self.panel.content {
            Some(content) => content_height(content) + 1,
            None => 0,
        };
        body + content + 2
    }

    fn body(&self) -> Paragraph<'a> {
        let lines: Vec<Line> = self.panel.body.iter().map(|line| Line::from(line.as_str())).collect();
        Paragraph::new(lines).wrap(Wrap { trim: true })
    }

    // Wrapped line count of the body text inside `inner_width` columns.
    fn body_height(&self, inner_width: u16) -> u16 {
        if self.panel.body.is_empty() || inner_width == 0 {
            return self.panel.body.len() as u16;
        }
        u16::try_from(self.body().line_count(inner_width)).unwrap_or(u16::MAX)
    }
}

fn content_height(content: &PanelContent) -> u16 {
    match content {
        PanelContent::Table(table) => table.rows.len() as u16 + 1,
        PanelContent::List(list) => list.items.len() as u16,
    }
}

impl Widget for PanelWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = self.panel.style();
        let title = Line::from(vec![
            Span::styled(
                format!(" {} ", style.icon.glyph()),
                Style::default().fg(style.icon.color()).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{} ", self.panel.title),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(style.border_color()))
            .title(title);

        let inner = block.inner(area);
        block.render(area, buf);

        let body_height = self.body_height(inner.width);
        let chunks = Layout::vertical([
            Constraint::Length(body_height),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

        self.body().render(chunks[0], buf);

        match &self.panel.content {
            Some(PanelContent::Table(table)) => render_table(table, chunks[2], buf),
            Some(PanelContent::List(list)) => render_list(list, chunks[2], buf),
            None => {}
        }
    }
}

fn cell_style(cell: &Cell) -> Style {
    match cell {
        Cell::Check => Style::default().fg(Color::Green),
        Cell::Cross => Style::default().fg(Color::Red),
        Cell::Dash => Style::default().fg(Color::DarkGray),
        Cell::Text(_) => Style::default(),
    }
}

fn render_table(table: &Table, area: Rect, buf: &mut Buffer) {
    let header = Row::new(table.headers.iter().map(|h| h.as_str()))
        .style(Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED));

    let rows = table.rows.iter().map(|row| {
        Row::new(
            row.iter()
                .map(|cell| TableCell::from(Span::styled(cell.text().to_string(), cell_style(cell)))),
        )
    });

    // The first column holds names, the rest hold short marks.
    let widths = std::iter::once(Constraint::Fill(2))
        .chain(std::iter::repeat(Constraint::Fill(1)).take(table.headers.len().saturating_sub(1)));

    TableWidget::new(rows, widths).header(header).render(area, buf);
}

fn render_list(list: &ListGroup, area: Rect, buf: &mut Buffer) {
    let items: Vec<ListItem> = list
        .items
        .iter()
        .map(|item| ListItem::new(Line::from(vec![Span::raw("• "), Span::raw(item.as_str())])))
        .collect();
    List::new(items).render(area, buf);
}
