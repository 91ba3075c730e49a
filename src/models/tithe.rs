use rust_decimal::Decimal;

/// One tithe receipt. `numero` is assigned per period, starting at 1.
#[derive(Debug, Clone)]
pub struct Tithe {
    pub id: Option<i64>,
    pub period_id: String,
    pub numero: i64,
    pub fecha: String,
    pub donador: String,
    pub valor: Decimal,
}

impl Tithe {
    pub fn new(period_id: String, fecha: String, donador: String, valor: Decimal) -> Self {
        Self {
            id: None,
            period_id,
            numero: 0, // assigned by the store on insert
            fecha,
            donador,
            valor,
        }
    }
}
