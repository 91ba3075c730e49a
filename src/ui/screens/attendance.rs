use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::truncate;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(
                " Asistencia — {} ({} filas × {} fechas) ",
                app.period.name,
                app.att_rows.len(),
                app.att_columns.len()
            ),
            theme::title_style(),
        ));

    if app.att_columns.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled(
                "No hay fechas de servicio todavía",
                theme::dim_style(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Agregue una columna con :columna <nombre> (p. ej. :columna 05/01)",
                theme::dim_style(),
            )),
        ];
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let mut header_cells = vec![Cell::from("").style(theme::header_style())];
    for (ci, col) in app.att_columns.iter().enumerate() {
        let style = if ci == app.att_col_index {
            Style::default().fg(theme::ACCENT).bg(theme::HEADER_BG)
        } else {
            theme::header_style()
        };
        header_cells.push(Cell::from(truncate(&col.nombre, 7)).style(style));
    }
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .att_rows
        .iter()
        .enumerate()
        .take(area.height.saturating_sub(3) as usize)
        .map(|(ri, row)| {
            let label_style = if ri == app.att_row_index {
                Style::default().fg(theme::ACCENT)
            } else {
                theme::normal_style()
            };
            let mut cells = vec![Cell::from(Span::styled(
                truncate(&row.nombre, 28),
                label_style,
            ))];

            for (ci, col) in app.att_columns.iter().enumerate() {
                let count = match (row.id, col.id) {
                    (Some(r), Some(c)) => app.attendance_count(r, c),
                    _ => None,
                };
                let text = count.map(|n| n.to_string()).unwrap_or_else(|| "·".into());

                let is_cursor = ri == app.att_row_index && ci == app.att_col_index;
                let style = if is_cursor {
                    theme::selected_style()
                } else if count.is_some() {
                    theme::normal_style()
                } else {
                    theme::dim_style()
                };
                cells.push(Cell::from(Span::styled(format!("{text:>5}"), style)));
            }

            let base = if ri % 2 == 1 {
                theme::alt_row_style()
            } else {
                Style::default()
            };
            Row::new(cells).style(base)
        })
        .collect();

    let mut widths = vec![Constraint::Length(30)];
    widths.extend(vec![Constraint::Length(7); app.att_columns.len()]);

    f.render_widget(Table::new(rows, widths).header(header).block(block), area);
}
