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
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(
                " Diezmos — {} (total {}, próximo #{}) ",
                app.period.name,
                format_amount(app.tithe_total),
                app.next_numero
            ),
            theme::title_style(),
        ));

    if app.tithes.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled(
                "No hay diezmos registrados este mes",
                theme::dim_style(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Registre uno con :diezmo <fecha> <valor> <donador>",
                theme::dim_style(),
            )),
        ];
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["No.", "Fecha", "Donador", "Valor"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .tithes
        .iter()
        .enumerate()
        .skip(app.tithe_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, tithe)| {
            let style = if i == app.tithe_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            Row::new(vec![
                Cell::from(format!("{:>4}", tithe.numero)),
                Cell::from(tithe.fecha.clone()),
                Cell::from(truncate(&tithe.donador, 36)),
                Cell::from(Span::styled(
                    format_amount(tithe.valor),
                    theme::income_style(),
                )),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Length(12),
        Constraint::Min(24),
        Constraint::Length(13),
    ];

    f.render_widget(Table::new(rows, widths).header(header).block(block), area);
}
