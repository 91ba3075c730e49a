use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::models::MarkStatus;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::truncate;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(
                " Discipulado — {} ({} participantes, {} reuniones) ",
                app.period.name,
                app.participants.len(),
                app.meeting_dates.len()
            ),
            theme::title_style(),
        ));

    if app.participants.is_empty() || app.meeting_dates.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled(
                "La cuadrícula necesita participantes y fechas de reunión",
                theme::dim_style(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Use :participante <nombre> y :reunion YYYY-MM-DD",
                theme::dim_style(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "A = asistió, J = justificado, F = falta, AT = atraso",
                theme::dim_style(),
            )),
        ];
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let mut header_cells = vec![Cell::from("").style(theme::header_style())];
    for (di, date) in app.meeting_dates.iter().enumerate() {
        let style = if di == app.date_index {
            Style::default().fg(theme::ACCENT).bg(theme::HEADER_BG)
        } else {
            theme::header_style()
        };
        // Dates render as DD/MM to keep columns narrow
        header_cells.push(Cell::from(compact_date(&date.fecha)).style(style));
    }
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .participants
        .iter()
        .enumerate()
        .take(area.height.saturating_sub(3) as usize)
        .map(|(pi, participant)| {
            let label_style = if pi == app.participant_index {
                Style::default().fg(theme::ACCENT)
            } else {
                theme::normal_style()
            };
            let mut cells = vec![Cell::from(Span::styled(
                truncate(&participant.nombre, 26),
                label_style,
            ))];

            for (di, date) in app.meeting_dates.iter().enumerate() {
                let status = match (participant.id, date.id) {
                    (Some(p), Some(d)) => app.mark_status(p, d),
                    _ => MarkStatus::None,
                };
                let text = if status.is_none() {
                    "·".to_string()
                } else {
                    status.as_str().to_string()
                };

                let is_cursor = pi == app.participant_index && di == app.date_index;
                let style = if is_cursor {
                    theme::selected_style()
                } else {
                    mark_style(status)
                };
                cells.push(Cell::from(Span::styled(format!("{text:>4}"), style)));
            }

            let base = if pi % 2 == 1 {
                theme::alt_row_style()
            } else {
                Style::default()
            };
            Row::new(cells).style(base)
        })
        .collect();

    let mut widths = vec![Constraint::Length(28)];
    widths.extend(vec![Constraint::Length(6); app.meeting_dates.len()]);

    f.render_widget(Table::new(rows, widths).header(header).block(block), area);
}

fn mark_style(status: MarkStatus) -> Style {
    match status {
        MarkStatus::Asistio => theme::income_style(),
        MarkStatus::Justificado => Style::default().fg(theme::TEAL),
        MarkStatus::Falta => theme::expense_style(),
        MarkStatus::Atraso => Style::default().fg(theme::YELLOW),
        MarkStatus::None => theme::dim_style(),
    }
}

fn compact_date(fecha: &str) -> String {
    // "2025-01-08" → "08/01"
    let parts: Vec<&str> = fecha.split('-').collect();
    match parts.as_slice() {
        [_, m, d] => format!("{d}/{m}"),
        _ => fecha.to_string(),
    }
}
