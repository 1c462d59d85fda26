use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme::Palette;
use crate::ui::util::spending_series;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Summary cards
            Constraint::Min(10),   // Spending chart
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);
    render_spending_chart(f, chunks[1], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette();
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    let store = app.store();
    let visible = app.visible_bills().len();
    let filter = store.selected_category().unwrap_or("all categories");

    render_card(
        f,
        cards[0],
        palette,
        "Total Amount",
        app.money(store.total_amount()),
        palette.accent,
        format!("{visible} bills in {filter}"),
    );

    let budget = store.monthly_budget();
    render_card(
        f,
        cards[1],
        palette,
        "Monthly Budget",
        app.money(budget),
        palette.yellow,
        "o to pick bills within budget".to_string(),
    );

    match app.selection() {
        Some(sel) => render_card(
            f,
            cards[2],
            palette,
            "Selected",
            app.money(sel.total),
            palette.green,
            format!(
                "{} bills, {} left",
                sel.len(),
                app.money(sel.remaining(budget))
            ),
        ),
        None => render_card(
            f,
            cards[2],
            palette,
            "Selected",
            "-".to_string(),
            palette.text_dim,
            "no selection".to_string(),
        ),
    }
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    palette: &Palette,
    title: &str,
    display: String,
    color: Color,
    subtitle: String,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border_style())
        .title(Span::styled(format!(" {title} "), palette.title_style()));

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            display,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle, palette.dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_spending_chart(f: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border_style())
        .title(Span::styled(" Spending Over Time ", palette.title_style()));

    let (points, labels) = spending_series(&app.visible_bills());
    if points.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No bills to chart. Add one with :add",
            palette.dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let max_x = (points.len().saturating_sub(1) as f64).max(1.0);
    let max_y = points
        .iter()
        .map(|(_, y)| *y)
        .fold(0.0_f64, f64::max)
        .max(1.0)
        * 1.1;

    // First, middle and last dates keep the axis readable
    let x_labels: Vec<Span> = match labels.len() {
        0 => Vec::new(),
        1 => vec![Span::raw(labels[0].clone())],
        n => vec![
            Span::raw(labels[0].clone()),
            Span::raw(labels[n / 2].clone()),
            Span::raw(labels[n - 1].clone()),
        ],
    };
    let y_labels = vec![
        Span::raw(app.money(rust_decimal::Decimal::ZERO)),
        Span::raw(format!("{}{:.0}", app.currency_symbol, max_y / 2.0)),
        Span::raw(format!("{}{:.0}", app.currency_symbol, max_y)),
    ];

    let datasets = vec![Dataset::default()
        .name("Amount")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(palette.accent))
        .data(&points)];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title(Span::styled("Date", palette.dim_style()))
                .style(palette.dim_style())
                .bounds([0.0, max_x])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("Amount", palette.dim_style()))
                .style(palette.dim_style())
                .bounds([0.0, max_y])
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}
