#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodStatus {
    Active,
    Closed,
}

impl PeriodStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Closed => "closed",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "active" => Self::Active,
            _ => Self::Closed,
        }
    }
}

impl std::fmt::Display for PeriodStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One accounting month. Identifier format: "YYYY-MM".
#[derive(Debug, Clone)]
pub struct Period {
    pub id: String,
    pub name: String,
    pub year: i32,
    pub month: u32,
    pub start_date: String,
    /// None while the period is active.
    pub end_date: Option<String>,
    pub status: PeriodStatus,
}

const MONTH_NAMES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

impl Period {
    /// Build an active period for the given calendar month, starting now.
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            id: Self::id_for(year, month),
            name: Self::display_name(year, month),
            year,
            month,
            start_date: chrono::Utc::now().to_rfc3339(),
            end_date: None,
            status: PeriodStatus::Active,
        }
    }

    pub fn id_for(year: i32, month: u32) -> String {
        format!("{year}-{month:02}")
    }

    pub fn display_name(year: i32, month: u32) -> String {
        let name = MONTH_NAMES
            .get(month.saturating_sub(1) as usize)
            .unwrap_or(&"?");
        format!("{name} {year}")
    }

    /// Parse a "YYYY-MM" (or "YYYY-M") identifier into year and month.
    pub fn parse_id(id: &str) -> Option<(i32, u32)> {
        let (y, m) = id.split_once('-')?;
        let year: i32 = y.parse().ok()?;
        let month: u32 = m.parse().ok()?;
        if (1..=12).contains(&month) {
            Some((year, month))
        } else {
            None
        }
    }

    /// Like `parse_id`, but an empty argument means the current calendar
    /// month.
    pub fn parse_id_or_current(id: &str) -> Option<(i32, u32)> {
        if id.is_empty() {
            use chrono::Datelike;
            let now = chrono::Utc::now();
            return Some((now.year(), now.month()));
        }
        Self::parse_id(id)
    }

    pub fn is_active(&self) -> bool {
        self.status == PeriodStatus::Active
    }
}

/// Option lists carried forward when a new period starts.
///
/// Each new period gets a value copy of its predecessor's lists; closed
/// periods keep their snapshot untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodConfig {
    pub ministerios: Vec<String>,
    pub categorias: Vec<String>,
    pub detalles: Vec<String>,
}

impl Default for PeriodConfig {
    fn default() -> Self {
        Self {
            ministerios: vec![
                "Pastoral".into(),
                "Música".into(),
                "Jóvenes".into(),
                "Niños".into(),
                "Evangelismo".into(),
            ],
            categorias: vec![
                "Ofrenda".into(),
                "Diezmo".into(),
                "Donación".into(),
                "Gastos Operativos".into(),
                "Mantenimiento".into(),
            ],
            detalles: vec![
                "Servicio Dominical".into(),
                "Servicio Miércoles".into(),
                "Evento Especial".into(),
                "Gastos Generales".into(),
            ],
        }
    }
}

/// Period-independent option lists shared by the inventory and census
/// modules. Stored as a single row, not snapshotted per period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalConfig {
    pub ministerios: Vec<String>,
    pub ubicaciones: Vec<String>,
    pub estados: Vec<String>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            ministerios: vec![
                "Alabanza y Adoración".into(),
                "Evangelismo".into(),
                "Discipulado".into(),
                "Niños".into(),
                "Jóvenes".into(),
                "Damas".into(),
                "Caballeros".into(),
                "Administración".into(),
            ],
            ubicaciones: vec![
                "Santuario Principal".into(),
                "Salón de Niños".into(),
                "Salón de Jóvenes".into(),
                "Oficina Pastoral".into(),
                "Bodega".into(),
                "Cocina".into(),
            ],
            estados: vec![
                "Bueno".into(),
                "Dañado".into(),
                "En Reparación".into(),
                "Perdido".into(),
                "Prestado".into(),
            ],
        }
    }
}
