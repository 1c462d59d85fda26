use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};
use rust_decimal::Decimal;

use crate::ui::app::App;
use crate::ui::util::truncate;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette();
    let store = app.store();
    let active = store.selected_category();

    let totals = store.category_totals();
    let all_count: usize = totals.iter().map(|(_, count, _)| count).sum();
    let all_total = totals
        .iter()
        .fold(Decimal::ZERO, |sum, (_, _, total)| sum.saturating_add(*total));

    let mut entries: Vec<(String, usize, Decimal, bool)> =
        vec![("All categories".to_string(), all_count, all_total, active.is_none())];
    entries.extend(totals.into_iter().map(|(name, count, total)| {
        let is_active = active == Some(name.as_str());
        (name, count, total, is_active)
    }));

    let header_cells = ["Category", "Bills", "Total"]
        .iter()
        .map(|h| Cell::from(*h).style(palette.header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = entries
        .iter()
        .enumerate()
        .skip(app.category_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, (name, count, total, is_active))| {
            let marker = if *is_active { "\u{2022} " } else { "  " };
            let style = if i == app.category_index {
                palette.cursor_style()
            } else if *is_active {
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                palette.normal_style()
            };

            Row::new(vec![
                Cell::from(format!("{marker}{}", truncate(name, 30))),
                Cell::from(count.to_string()),
                Cell::from(app.money(*total)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Min(20),
        Constraint::Length(8),
        Constraint::Length(18),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.accent))
            .title(Span::styled(
                format!(" Categories ({}) ", entries.len() - 1),
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(table, area);
}
