//! Payment-table export. Renders a table and its rows as a standalone HTML
//! document suitable for printing.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::models::{PaymentRow, PaymentTable};

pub(crate) fn write_payment_table(
    path: &Path,
    table: &PaymentTable,
    rows: &[PaymentRow],
) -> Result<()> {
    let html = render_payment_table(table, rows);
    fs::write(path, html)
        .with_context(|| format!("Failed to write export file: {}", path.display()))?;
    Ok(())
}

pub(crate) fn render_payment_table(table: &PaymentTable, rows: &[PaymentRow]) -> String {
    let total: Decimal = rows.iter().map(|r| r.valor).sum();
    let mut body = String::new();
    for row in rows {
        let _ = write!(
            body,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td class=\"num\">${}</td></tr>",
            escape(&row.fecha),
            escape(&row.beneficiarios),
            escape(&row.detalle),
            row.valor.round_dp(2),
        );
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"es\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         <style>\n\
         body {{ font-family: sans-serif; margin: 2em; }}\n\
         h1 {{ font-size: 1.4em; }}\n\
         table {{ border-collapse: collapse; width: 100%; }}\n\
         th, td {{ border: 1px solid #444; padding: 6px 10px; text-align: left; }}\n\
         .num {{ text-align: right; }}\n\
         tfoot td {{ font-weight: bold; }}\n\
         </style>\n</head>\n<body>\n\
         <h1>{title}</h1>\n\
         <p>Fecha de creación: {created}</p>\n\
         <table>\n\
         <thead><tr><th>Fecha</th><th>Beneficiarios</th><th>Detalle</th><th class=\"num\">Valor</th></tr></thead>\n\
         <tbody>{body}</tbody>\n\
         <tfoot><tr><td colspan=\"3\">Total</td><td class=\"num\">${total}</td></tr></tfoot>\n\
         </table>\n</body>\n</html>\n",
        title = escape(&table.nombre),
        created = escape(&table.fecha_creacion),
        body = body,
        total = total.round_dp(2),
    )
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use rust_decimal_macros::dec;

    fn sample() -> (PaymentTable, Vec<PaymentRow>) {
        let table = PaymentTable {
            id: Some(1),
            nombre: "Pagos Enero".to_string(),
            fecha_creacion: "2025-01-31".to_string(),
        };
        let rows = vec![
            PaymentRow::new(
                1,
                "2025-01-10".to_string(),
                "Proveedor A".to_string(),
                dec!(100.00),
            ),
            PaymentRow::new(
                1,
                "2025-01-20".to_string(),
                "Proveedor <B>".to_string(),
                dec!(200.50),
            ),
        ];
        (table, rows)
    }

    #[test]
    fn renders_rows_and_total() {
        let (table, rows) = sample();
        let html = render_payment_table(&table, &rows);
        assert!(html.contains("Pagos Enero"));
        assert!(html.contains("Proveedor A"));
        assert!(html.contains("$300.50"));
    }

    #[test]
    fn escapes_markup_in_fields() {
        let (table, rows) = sample();
        let html = render_payment_table(&table, &rows);
        assert!(html.contains("Proveedor &lt;B&gt;"));
        assert!(!html.contains("Proveedor <B>"));
    }

    #[test]
    fn empty_table_still_renders() {
        let (table, _) = sample();
        let html = render_payment_table(&table, &[]);
        assert!(html.contains("$0"));
    }

    #[test]
    fn writes_file_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pagos.html");
        let (table, rows) = sample();
        write_payment_table(&path, &table, &rows).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<!DOCTYPE html>"));
    }
}
