use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::models::EntryState;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" Finanzas — {} ({}) ", app.period.name, app.entries.len()),
            theme::title_style(),
        ));

    if app.entries.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled(
                "No hay movimientos este mes",
                theme::dim_style(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Registre uno con :ingreso o :egreso",
                theme::dim_style(),
            )),
        ];
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["Fecha", "Tipo", "Ministerio", "Categoría", "Detalle", "Monto", "Estado"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .entries
        .iter()
        .enumerate()
        .skip(app.entry_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, entry)| {
            let amount_style = if entry.is_income() {
                theme::income_style()
            } else {
                theme::expense_style()
            };
            let sign = if entry.is_income() { "+" } else { "-" };
            let estado_style = match entry.estado {
                EntryState::Procesado => theme::income_style(),
                EntryState::Pendiente => Style::default().fg(theme::YELLOW),
            };

            let style = if i == app.entry_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(entry.fecha.clone()),
                Cell::from(entry.kind.as_str()),
                Cell::from(truncate(&entry.ministerio, 14)),
                Cell::from(truncate(&entry.categoria, 14)),
                Cell::from(truncate(&entry.detalle, 28)),
                Cell::from(Span::styled(
                    format!("{sign}{}", format_amount(entry.monto)),
                    amount_style,
                )),
                Cell::from(Span::styled(entry.estado.as_str(), estado_style)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(10),
        Constraint::Length(8),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Min(20),
        Constraint::Length(13),
        Constraint::Length(10),
    ];

    f.render_widget(Table::new(rows, widths).header(header).block(block), area);
}
