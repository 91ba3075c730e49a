use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::Decimal;

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::format_amount;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Summary cards
            Constraint::Min(6),    // Archived months
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);
    render_closed_periods(f, chunks[1], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let balance = app.income - app.expenses;

    render_card(
        f,
        cards[0],
        "Ingresos",
        app.income,
        theme::GREEN,
        Some(format!(
            "{} entradas",
            app.entries.iter().filter(|e| e.is_income()).count()
        )),
    );
    render_card(
        f,
        cards[1],
        "Egresos",
        app.expenses,
        theme::RED,
        Some(format!(
            "{} entradas",
            app.entries.iter().filter(|e| !e.is_income()).count()
        )),
    );
    render_card(
        f,
        cards[2],
        "Balance",
        balance,
        if balance >= Decimal::ZERO {
            theme::GREEN
        } else {
            theme::RED
        },
        None,
    );
    render_card(
        f,
        cards[3],
        "Diezmos",
        app.tithe_total,
        theme::TEAL,
        Some(format!("{} recibos", app.tithes.len())),
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    amount: Decimal,
    color: ratatui::style::Color,
    subtitle: Option<String>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {title} "), theme::title_style()));

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format_amount(amount),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            subtitle.unwrap_or_default(),
            theme::dim_style(),
        )),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_closed_periods(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" Meses archivados ({}) ", app.closed.len()),
            theme::title_style(),
        ));

    if app.closed.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No hay meses archivados todavía",
                theme::dim_style(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Use :start-month YYYY-MM para archivar el mes activo y abrir otro",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let header_cells = ["Mes", "Inicio", "Cierre"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .closed
        .iter()
        .take(area.height.saturating_sub(3) as usize)
        .enumerate()
        .map(|(i, p)| {
            let style = if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            Row::new(vec![
                Cell::from(p.name.clone()),
                Cell::from(short_date(&p.start_date)),
                Cell::from(p.end_date.as_deref().map(short_date).unwrap_or_default()),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Min(20),
        Constraint::Length(12),
        Constraint::Length(12),
    ];

    f.render_widget(Table::new(rows, widths).header(header).block(block), area);
}

fn short_date(s: &str) -> String {
    s.chars().take(10).collect()
}
