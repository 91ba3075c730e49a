/// A row label of the attendance grid (e.g. "HOMBRES ASIST. GRAL").
#[derive(Debug, Clone)]
pub struct AttendanceRow {
    pub id: Option<i64>,
    pub period_id: String,
    pub nombre: String,
    pub orden: i64,
}

/// A column label of the attendance grid (a service date).
#[derive(Debug, Clone)]
pub struct AttendanceColumn {
    pub id: Option<i64>,
    pub period_id: String,
    pub nombre: String,
    pub orden: i64,
}

/// One cell of the grid, keyed by (row_id, column_id). A count of zero is
/// never stored; the cell row is deleted instead.
#[derive(Debug, Clone)]
pub struct AttendanceCell {
    pub id: Option<i64>,
    pub period_id: String,
    pub row_id: i64,
    pub column_id: i64,
    pub cantidad: i64,
}

/// Row labels seeded into a fresh month's grid.
pub const DEFAULT_ATTENDANCE_ROWS: [&str; 9] = [
    "HOMBRES ASIST. GRAL",
    "MUJERES ASIST. GRAL.",
    "NIÑOS EN AUDITORIO",
    "HER. BABYS 0-3",
    "HER. EXPLORADORES 3-5",
    "HER. KIDS 6-11",
    "HOMBRES NUEVOS ACEPT. CRISTO",
    "MUJERES NUEVOS ACEPT. CRISTO",
    "JOVENES NUEVOS ACEPT. CRISTO (13-18 AÑOS)",
];
