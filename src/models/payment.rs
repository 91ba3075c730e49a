use rust_decimal::Decimal;

/// A named payment-flow table. Tables are period-independent.
#[derive(Debug, Clone)]
pub struct PaymentTable {
    pub id: Option<i64>,
    pub nombre: String,
    pub fecha_creacion: String,
}

impl PaymentTable {
    pub fn new(nombre: String) -> Self {
        Self {
            id: None,
            nombre,
            fecha_creacion: chrono::Utc::now().format("%Y-%m-%d").to_string(),
        }
    }
}

/// One line of a payment table. Rows cascade when the table is deleted.
#[derive(Debug, Clone)]
pub struct PaymentRow {
    pub id: Option<i64>,
    pub table_id: i64,
    pub fecha: String,
    pub beneficiarios: String,
    pub detalle: String,
    pub valor: Decimal,
}

impl PaymentRow {
    pub fn new(table_id: i64, fecha: String, beneficiarios: String, valor: Decimal) -> Self {
        Self {
            id: None,
            table_id,
            fecha,
            beneficiarios,
            detalle: String::new(),
            valor,
        }
    }
}
