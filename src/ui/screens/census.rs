use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.census_view_church {
        render_church(f, area, app);
    } else {
        render_personal(f, area, app);
    }
}

fn render_personal(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" Censo — datos personales ({}) ", app.personal_records.len()),
            theme::title_style(),
        ));

    if app.personal_records.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No hay registros en el censo", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Agregue uno con :persona <cedula> <apellidos y nombres>",
                theme::dim_style(),
            )),
        ];
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["Cédula", "Apellidos y nombres", "Cristiano", "Bautizo", "Celular", "Ciudad"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .personal_records
        .iter()
        .enumerate()
        .skip(app.census_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, rec)| {
            let style = if i == app.census_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            Row::new(vec![
                Cell::from(rec.cedula.clone()),
                Cell::from(truncate(&rec.apellidos_nombres, 32)),
                Cell::from(yes_no(rec.es_cristiano)),
                Cell::from(yes_no(rec.bautizo)),
                Cell::from(rec.celular.clone().unwrap_or_default()),
                Cell::from(rec.ciudad.clone().unwrap_or_default()),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Min(24),
        Constraint::Length(10),
        Constraint::Length(8),
        Constraint::Length(12),
        Constraint::Length(16),
    ];
    f.render_widget(Table::new(rows, widths).header(header).block(block), area);
}

fn render_church(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" Censo — datos de iglesia ({}) ", app.church_records.len()),
            theme::title_style(),
        ));

    if app.church_records.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled(
                "No hay fichas de iglesia",
                theme::dim_style(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Agregue una con :ficha <cedula>",
                theme::dim_style(),
            )),
        ];
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["Cédula", "Cargo", "Local", "Ingreso", "Sueldo", "Redil"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .church_records
        .iter()
        .enumerate()
        .skip(app.census_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, rec)| {
            let style = if i == app.census_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            Row::new(vec![
                Cell::from(rec.cedula.clone()),
                Cell::from(rec.cargo.clone().unwrap_or_default()),
                Cell::from(rec.local.clone().unwrap_or_default()),
                Cell::from(rec.fecha_ingreso.clone().unwrap_or_default()),
                Cell::from(rec.sueldo.map(format_amount).unwrap_or_default()),
                Cell::from(rec.redil.clone().unwrap_or_default()),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Min(16),
        Constraint::Length(14),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Length(12),
    ];
    f.render_widget(Table::new(rows, widths).header(header).block(block), area);
}

fn yes_no(b: bool) -> &'static str {
    if b {
        "Sí"
    } else {
        "No"
    }
}
