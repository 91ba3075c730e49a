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
            format!(" Inventario ({}) ", app.items.len()),
            theme::title_style(),
        ));

    if app.items.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("El inventario está vacío", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Agregue un bien con :item <codigo> <cantidad> <detalle>",
                theme::dim_style(),
            )),
        ];
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["Código", "Detalle", "Cant.", "Ubicación", "Ministerio", "Estado"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .items
        .iter()
        .enumerate()
        .skip(app.item_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, item)| {
            let style = if i == app.item_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            let estado_style = match item.estado.as_str() {
                "Bueno" => theme::income_style(),
                "Dañado" | "Perdido" => theme::expense_style(),
                _ => Style::default().fg(theme::YELLOW),
            };
            Row::new(vec![
                Cell::from(truncate(&item.codigo, 12)),
                Cell::from(truncate(&item.detalle, 32)),
                Cell::from(format!("{:>5}", item.cantidad)),
                Cell::from(truncate(&item.ubicacion, 18)),
                Cell::from(truncate(&item.ministerio, 18)),
                Cell::from(Span::styled(item.estado.clone(), estado_style)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Min(20),
        Constraint::Length(6),
        Constraint::Length(18),
        Constraint::Length(18),
        Constraint::Length(14),
    ];

    f.render_widget(Table::new(rows, widths).header(header).block(block), area);
}
