use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::Decimal;

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.payments_view_rows {
        render_rows(f, area, app);
    } else {
        render_tables(f, area, app);
    }
}

fn render_tables(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" Tablas de pago ({}) ", app.payment_tables.len()),
            theme::title_style(),
        ));

    if app.payment_tables.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No hay tablas de pago", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Cree una con :tabla <nombre>",
                theme::dim_style(),
            )),
        ];
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["Nombre", "Creada"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .payment_tables
        .iter()
        .enumerate()
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, table)| {
            let style = if i == app.payment_table_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            Row::new(vec![
                Cell::from(truncate(&table.nombre, 40)),
                Cell::from(table.fecha_creacion.clone()),
            ])
            .style(style)
        })
        .collect();

    let widths = [Constraint::Min(24), Constraint::Length(12)];
    f.render_widget(Table::new(rows, widths).header(header).block(block), area);
}

fn render_rows(f: &mut Frame, area: Rect, app: &App) {
    let table_name = app
        .selected_payment_table()
        .map(|t| t.nombre.clone())
        .unwrap_or_default();
    let total: Decimal = app.payment_rows.iter().map(|r| r.valor).sum();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(
                " {} — {} pagos (total {}) ",
                table_name,
                app.payment_rows.len(),
                format_amount(total)
            ),
            theme::title_style(),
        ));

    if app.payment_rows.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("La tabla está vacía", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Agregue un pago con :pago <fecha> <valor> <beneficiarios>",
                theme::dim_style(),
            )),
        ];
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["Fecha", "Beneficiarios", "Detalle", "Valor"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .payment_rows
        .iter()
        .enumerate()
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, row)| {
            let style = if i == app.payment_row_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            Row::new(vec![
                Cell::from(row.fecha.clone()),
                Cell::from(truncate(&row.beneficiarios, 28)),
                Cell::from(truncate(&row.detalle, 24)),
                Cell::from(Span::styled(
                    format_amount(row.valor),
                    theme::expense_style(),
                )),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Min(20),
        Constraint::Length(24),
        Constraint::Length(13),
    ];
    f.render_widget(Table::new(rows, widths).header(header).block(block), area);
}
