// src/ui/plain.rs

use crate::app::{App, Page};
use crate::ui::components::{results_view, Cell, Panel, PanelContent, ResultsView, Table};
use crate::ui::widgets::{
    footer::LICENSE_NOTICE,
    home::{HOME_HEADING, HOME_LINKS},
};
use comfy_table::{
    presets::UTF8_FULL_CONDENSED, Attribute, Cell as TableCell, Color, ContentArrangement,
    Table as TextTable,
};

/// Renders the page as plain text, for `--print`.
pub fn render_page(app: &App) -> String {
    let mut out = String::new();
    match &app.page {
        Page::Home => {
            out.push_str(&format!("{HOME_HEADING}\n\n"));
            for (label, href) in HOME_LINKS {
                out.push_str(&format!("  {label}: {href}\n"));
            }
        }
        Page::Scan(vm) => {
            out.push_str("Scan\n\n");
            out.push_str(&format!("Host: {}\n", vm.domain));
            if vm.loading() {
                out.push_str(&format!("Scanning {}\n", vm.domain));
            }
            if let Some(error) = vm.error() {
                out.push_str(&format!("{error}\n"));
            }
            if let Some(scan) = vm.result() {
                out.push('\n');
                out.push_str(&render_results(&results_view(scan)));
            }
        }
    }
    out.push_str(&format!("\n{LICENSE_NOTICE}\n"));
    out
}

pub fn render_results(view: &ResultsView) -> String {
    let mut out = format!("{}\n", view.heading);
    for section in &view.sections {
        out.push_str(&format!("\n== {} ==\n", section.heading));
        for panel in &section.panels {
            out.push_str(&render_panel(panel));
        }
    }
    out
}

fn render_panel(panel: &Panel) -> String {
    let grade = panel.grade.map_or_else(|| "Ungraded".to_string(), |g| g.to_string());
    let mut out = format!("\n[{}] {} ({})\n", panel.style().icon.glyph(), panel.title, grade);
    for line in &panel.body {
        out.push_str(&format!("    {line}\n"));
    }
    match &panel.content {
        Some(PanelContent::List(list)) => {
            for item in &list.items {
                out.push_str(&format!("    - {item}\n"));
            }
        }
        Some(PanelContent::Table(table)) => {
            for line in format_table(table).lines() {
                out.push_str(&format!("    {line}\n"));
            }
        }
        None => {}
    }
    out
}

/// Lays a display table out as text, sized to the terminal when there is one.
fn format_table(table: &Table) -> String {
    let width = crossterm::terminal::size()
        .map(|(cols, _)| cols)
        .unwrap_or(120)
        .saturating_sub(4);

    let mut text = TextTable::new();
    text.load_preset(UTF8_FULL_CONDENSED)
        .set_width(width)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            table
                .headers
                .iter()
                .map(|header| TableCell::new(header).add_attribute(Attribute::Bold)),
        );

    for row in &table.rows {
        text.add_row(row.iter().map(|cell| {
            let styled = TableCell::new(cell.text());
            match cell {
                Cell::Check => styled.fg(Color::Green),
                Cell::Cross => styled.fg(Color::Red),
                Cell::Dash => styled.fg(Color::DarkGrey),
                Cell::Text(_) => styled,
            }
        }));
    }
    text.to_string()
}
