pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS periods (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    year        INTEGER NOT NULL,
    month       INTEGER NOT NULL,
    start_date  TEXT NOT NULL,
    end_date    TEXT,
    status      TEXT NOT NULL DEFAULT 'active'
);

CREATE TABLE IF NOT EXISTS period_config (
    period_id   TEXT PRIMARY KEY REFERENCES periods(id) ON DELETE CASCADE,
    ministerios TEXT NOT NULL DEFAULT '[]',
    categorias  TEXT NOT NULL DEFAULT '[]',
    detalles    TEXT NOT NULL DEFAULT '[]'
);

CREATE TABLE IF NOT EXISTS global_config (
    id          INTEGER PRIMARY KEY CHECK (id = 1),
    ministerios TEXT NOT NULL DEFAULT '[]',
    ubicaciones TEXT NOT NULL DEFAULT '[]',
    estados     TEXT NOT NULL DEFAULT '[]'
);

CREATE TABLE IF NOT EXISTS finance_entries (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    period_id   TEXT NOT NULL REFERENCES periods(id) ON DELETE CASCADE,
    kind        TEXT NOT NULL,
    fecha       TEXT NOT NULL,
    ministerio  TEXT NOT NULL DEFAULT '',
    categoria   TEXT NOT NULL DEFAULT '',
    detalle     TEXT NOT NULL DEFAULT '',
    observacion TEXT NOT NULL DEFAULT '',
    monto       TEXT NOT NULL,
    estado      TEXT NOT NULL DEFAULT 'Procesado',
    created_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_finance_period ON finance_entries(period_id);
CREATE INDEX IF NOT EXISTS idx_finance_fecha ON finance_entries(fecha);

CREATE TABLE IF NOT EXISTS tithes (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    period_id TEXT NOT NULL REFERENCES periods(id) ON DELETE CASCADE,
    numero    INTEGER NOT NULL,
    fecha     TEXT NOT NULL,
    donador   TEXT NOT NULL,
    valor     TEXT NOT NULL,
    UNIQUE(period_id, numero)
);

CREATE TABLE IF NOT EXISTS attendance_rows (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    period_id TEXT NOT NULL REFERENCES periods(id) ON DELETE CASCADE,
    nombre    TEXT NOT NULL,
    orden     INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS attendance_columns (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    period_id TEXT NOT NULL REFERENCES periods(id) ON DELETE CASCADE,
    nombre    TEXT NOT NULL,
    orden     INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS attendance_cells (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    period_id TEXT NOT NULL REFERENCES periods(id) ON DELETE CASCADE,
    row_id    INTEGER NOT NULL REFERENCES attendance_rows(id) ON DELETE CASCADE,
    column_id INTEGER NOT NULL REFERENCES attendance_columns(id) ON DELETE CASCADE,
    cantidad  INTEGER NOT NULL,
    UNIQUE(row_id, column_id)
);

CREATE TABLE IF NOT EXISTS discipleship_participants (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    period_id TEXT NOT NULL REFERENCES periods(id) ON DELETE CASCADE,
    nombre    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS discipleship_dates (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    period_id TEXT NOT NULL REFERENCES periods(id) ON DELETE CASCADE,
    fecha     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS discipleship_marks (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    period_id      TEXT NOT NULL REFERENCES periods(id) ON DELETE CASCADE,
    participant_id INTEGER NOT NULL REFERENCES discipleship_participants(id) ON DELETE CASCADE,
    date_id        INTEGER NOT NULL REFERENCES discipleship_dates(id) ON DELETE CASCADE,
    status         TEXT NOT NULL,
    UNIQUE(participant_id, date_id)
);

CREATE TABLE IF NOT EXISTS inventory_items (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    cantidad       INTEGER NOT NULL DEFAULT 1,
    codigo         TEXT NOT NULL,
    detalle        TEXT NOT NULL,
    numero_serie   TEXT NOT NULL DEFAULT '',
    ubicacion      TEXT NOT NULL DEFAULT '',
    ministerio     TEXT NOT NULL DEFAULT '',
    estado         TEXT NOT NULL DEFAULT '',
    fecha_registro TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS payment_tables (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    nombre         TEXT NOT NULL,
    fecha_creacion TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS payment_rows (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    table_id      INTEGER NOT NULL REFERENCES payment_tables(id) ON DELETE CASCADE,
    fecha         TEXT NOT NULL,
    beneficiarios TEXT NOT NULL DEFAULT '',
    detalle       TEXT NOT NULL DEFAULT '',
    valor         TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_payment_rows_table ON payment_rows(table_id);

CREATE TABLE IF NOT EXISTS census_personal (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    cedula           TEXT NOT NULL,
    apellidos_nombres TEXT NOT NULL,
    fecha_nacimiento TEXT,
    edad             INTEGER,
    es_cristiano     BOOLEAN NOT NULL DEFAULT 0,
    bautizo          BOOLEAN NOT NULL DEFAULT 0,
    tipo_sangre      TEXT,
    estado_civil     TEXT,
    sexo             TEXT,
    capacidad_especial TEXT,
    celular          TEXT,
    telefono_convencional TEXT,
    conyuge          TEXT,
    correo           TEXT,
    nivel_estudio    TEXT,
    direccion        TEXT,
    ciudad           TEXT,
    created_at       TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS census_church (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    cedula          TEXT NOT NULL,
    cargo           TEXT,
    local           TEXT,
    jornada_trabajo TEXT,
    fecha_ingreso   TEXT,
    fecha_salida    TEXT,
    dias_por_mes    INTEGER,
    horas_semanales INTEGER,
    sueldo          TEXT,
    tipo_pago       TEXT,
    banco           TEXT,
    numero_cuenta   TEXT,
    redil           TEXT,
    otros           TEXT,
    created_at      TEXT NOT NULL
);

"#;

pub(crate) const CURRENT_VERSION: i32 = 1;

/// Migrations from version N to N+1.
/// Each entry is (from_version, sql).
pub(crate) const MIGRATIONS: &[(i32, &str)] = &[
    // Future migrations go here:
    // (1, "ALTER TABLE inventory_items ADD COLUMN proveedor TEXT NOT NULL DEFAULT '';"),
];
