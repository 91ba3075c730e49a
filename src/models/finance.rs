use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Ingreso,
    Egreso,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ingreso => "Ingreso",
            Self::Egreso => "Egreso",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "ingreso" | "income" => Self::Ingreso,
            _ => Self::Egreso,
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    Procesado,
    Pendiente,
}

impl EntryState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Procesado => "Procesado",
            Self::Pendiente => "Pendiente",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "pendiente" => Self::Pendiente,
            _ => Self::Procesado,
        }
    }
}

impl std::fmt::Display for EntryState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One income or expense line in the monthly ledger.
#[derive(Debug, Clone)]
pub struct FinanceEntry {
    pub id: Option<i64>,
    pub period_id: String,
    pub kind: EntryKind,
    pub fecha: String,
    pub ministerio: String,
    pub categoria: String,
    pub detalle: String,
    pub observacion: String,
    pub monto: Decimal,
    pub estado: EntryState,
    pub created_at: String,
}

impl FinanceEntry {
    pub fn new(
        period_id: String,
        kind: EntryKind,
        fecha: String,
        ministerio: String,
        categoria: String,
        monto: Decimal,
    ) -> Self {
        Self {
            id: None,
            period_id,
            kind,
            fecha,
            ministerio,
            categoria,
            detalle: String::new(),
            observacion: String::new(),
            monto,
            estado: EntryState::Procesado,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == EntryKind::Ingreso
    }
}
