use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::ui::app::App;
use crate::ui::util::{format_bill_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette();
    let bills = app.visible_bills();
    let filter = app.store().selected_category();

    if bills.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled(
                match filter {
                    Some(cat) => format!("No bills in '{cat}'"),
                    None => "No bills yet".to_string(),
                },
                palette.dim_style(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Add one with :add <description> | <category> | <amount> | <date>",
                palette.dim_style(),
            )),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(palette.border_style())
            .title(Span::styled(" Bills (0) ", palette.title_style()));
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["Description", "Category", "Amount", "Date"]
        .iter()
        .map(|h| Cell::from(*h).style(palette.header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = bills
        .iter()
        .enumerate()
        .skip(app.bill_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, bill)| {
            let is_selected = app.is_selected(bill.id);
            let is_cursor = i == app.bill_index;

            let description = if is_selected {
                format!("\u{2022} {}", truncate(&bill.description, 38))
            } else {
                format!("  {}", truncate(&bill.description, 38))
            };

            let amount = format_bill_amount(bill, &app.currency_symbol);
            let amount_style = if bill.parsed_amount().is_some() {
                palette.normal_style()
            } else {
                Style::default().fg(palette.red)
            };

            let style = if is_cursor && is_selected {
                Style::default().fg(palette.header_bg).bg(palette.green)
            } else if is_cursor {
                palette.cursor_style()
            } else if is_selected {
                palette.highlight_style()
            } else if i % 2 == 1 {
                palette.alt_row_style()
            } else {
                palette.normal_style()
            };

            Row::new(vec![
                Cell::from(description),
                Cell::from(truncate(&bill.category, 18)),
                Cell::from(Span::styled(amount, amount_style)),
                Cell::from(bill.date.as_str()),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Min(20),
        Constraint::Length(18),
        Constraint::Length(18),
        Constraint::Length(12),
    ];

    let selected_info = app
        .selection()
        .map(|sel| format!("[{} selected, {}] ", sel.len(), app.money(sel.total)))
        .unwrap_or_default();
    let filter_info = filter
        .map(|cat| format!("category: '{cat}'"))
        .unwrap_or_default();

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(palette.border_style())
            .title(Span::styled(
                format!(" Bills ({}) {selected_info}{filter_info} ", bills.len()),
                Style::default()
                    .fg(palette.text_dim)
                    .add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(table, area);
}
