mod schema;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::models::*;

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        db.seed_global_config()?;
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        db.seed_global_config()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            // Fresh database - apply full schema
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    fn seed_global_config(&mut self) -> Result<()> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM global_config", [], |row| row.get(0))?;
        if count > 0 {
            return Ok(());
        }
        let defaults = GlobalConfig::default();
        self.conn.execute(
            "INSERT INTO global_config (id, ministerios, ubicaciones, estados)
             VALUES (1, ?1, ?2, ?3)",
            params![
                json_list(&defaults.ministerios)?,
                json_list(&defaults.ubicaciones)?,
                json_list(&defaults.estados)?,
            ],
        )?;
        Ok(())
    }

    // ── Periods ───────────────────────────────────────────────

    pub(crate) fn insert_period(&self, period: &Period) -> Result<()> {
        self.conn.execute(
            "INSERT INTO periods (id, name, year, month, start_date, end_date, status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                period.id,
                period.name,
                period.year,
                period.month,
                period.start_date,
                period.end_date,
                period.status.as_str(),
            ],
        )?;
        Ok(())
    }

    pub(crate) fn get_period_by_id(&self, id: &str) -> Result<Option<Period>> {
        let result = self.conn.query_row(
            "SELECT id, name, year, month, start_date, end_date, status
             FROM periods WHERE id = ?1",
            params![id],
            period_from_row,
        );
        match result {
            Ok(p) => Ok(Some(p)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) fn get_active_period(&self) -> Result<Option<Period>> {
        let result = self.conn.query_row(
            "SELECT id, name, year, month, start_date, end_date, status
             FROM periods WHERE status = 'active' LIMIT 1",
            [],
            period_from_row,
        );
        match result {
            Ok(p) => Ok(Some(p)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) fn get_closed_periods(&self) -> Result<Vec<Period>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, year, month, start_date, end_date, status
             FROM periods WHERE status = 'closed'
             ORDER BY start_date DESC",
        )?;
        let rows = stmt.query_map([], period_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn close_period(&self, id: &str, end_date: &str) -> Result<()> {
        self.conn.execute(
            "UPDATE periods SET status = 'closed', end_date = ?1 WHERE id = ?2",
            params![end_date, id],
        )?;
        Ok(())
    }

    /// Insert a period row for the given "YYYY-MM" id spanning that calendar
    /// month, if and only if no row with that id exists. Never alters an
    /// existing row; repeated calls leave exactly one row.
    pub(crate) fn ensure_period_exists(&self, period_id: &str) -> Result<bool> {
        let (year, month) = Period::parse_id(period_id)
            .with_context(|| format!("Invalid period id: {period_id}"))?;

        // RFC 3339 like every other period row, so start_date sorts uniformly
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .with_context(|| format!("Invalid month in period id: {period_id}"))?;

        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO periods (id, name, year, month, start_date, end_date, status)
             VALUES (?1, ?2, ?3, ?4, ?5, NULL, 'active')",
            params![
                period_id,
                Period::display_name(year, month),
                year,
                month,
                start.and_utc().to_rfc3339(),
            ],
        )?;
        Ok(inserted > 0)
    }

    /// Archive the active period (if any) and create the replacement in a
    /// single transaction, so the sequence cannot partially apply.
    pub(crate) fn archive_and_create(
        &mut self,
        old: Option<(&str, &str)>,
        new_period: &Period,
        config: &PeriodConfig,
    ) -> Result<()> {
        let tx = self.conn.transaction()?;
        if let Some((old_id, end_date)) = old {
            tx.execute(
                "UPDATE periods SET status = 'closed', end_date = ?1 WHERE id = ?2",
                params![end_date, old_id],
            )?;
        }
        tx.execute(
            "INSERT INTO periods (id, name, year, month, start_date, end_date, status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                new_period.id,
                new_period.name,
                new_period.year,
                new_period.month,
                new_period.start_date,
                new_period.end_date,
                new_period.status.as_str(),
            ],
        )?;
        tx.execute(
            "INSERT INTO period_config (period_id, ministerios, categorias, detalles)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(period_id) DO UPDATE SET
               ministerios = ?2, categorias = ?3, detalles = ?4",
            params![
                new_period.id,
                json_list(&config.ministerios)?,
                json_list(&config.categorias)?,
                json_list(&config.detalles)?,
            ],
        )?;
        tx.commit()?;
        Ok(())
    }

    // ── Period configuration ──────────────────────────────────

    pub(crate) fn get_period_config(&self, period_id: &str) -> Result<Option<PeriodConfig>> {
        let result = self.conn.query_row(
            "SELECT ministerios, categorias, detalles FROM period_config WHERE period_id = ?1",
            params![period_id],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            },
        );
        match result {
            Ok((m, c, d)) => Ok(Some(PeriodConfig {
                ministerios: parse_json_list(&m),
                categorias: parse_json_list(&c),
                detalles: parse_json_list(&d),
            })),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) fn upsert_period_config(
        &self,
        period_id: &str,
        config: &PeriodConfig,
    ) -> Result<()> {
        self.conn.execute(
            "INSERT INTO period_config (period_id, ministerios, categorias, detalles)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(period_id) DO UPDATE SET
               ministerios = ?2, categorias = ?3, detalles = ?4",
            params![
                period_id,
                json_list(&config.ministerios)?,
                json_list(&config.categorias)?,
                json_list(&config.detalles)?,
            ],
        )?;
        Ok(())
    }

    pub(crate) fn get_global_config(&self) -> Result<GlobalConfig> {
        let result = self.conn.query_row(
            "SELECT ministerios, ubicaciones, estados FROM global_config WHERE id = 1",
            [],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            },
        );
        match result {
            Ok((m, u, e)) => Ok(GlobalConfig {
                ministerios: parse_json_list(&m),
                ubicaciones: parse_json_list(&u),
                estados: parse_json_list(&e),
            }),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(GlobalConfig::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) fn update_global_config(&self, config: &GlobalConfig) -> Result<()> {
        self.conn.execute(
            "INSERT INTO global_config (id, ministerios, ubicaciones, estados)
             VALUES (1, ?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
               ministerios = ?1, ubicaciones = ?2, estados = ?3",
            params![
                json_list(&config.ministerios)?,
                json_list(&config.ubicaciones)?,
                json_list(&config.estados)?,
            ],
        )?;
        Ok(())
    }

    // ── Finance entries ───────────────────────────────────────

    pub(crate) fn insert_finance_entry(&self, entry: &FinanceEntry) -> Result<i64> {
        self.ensure_period_exists(&entry.period_id)?;
        self.conn.execute(
            "INSERT INTO finance_entries
               (period_id, kind, fecha, ministerio, categoria, detalle, observacion, monto, estado, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                entry.period_id,
                entry.kind.as_str(),
                entry.fecha,
                entry.ministerio,
                entry.categoria,
                entry.detalle,
                entry.observacion,
                entry.monto.to_string(),
                entry.estado.as_str(),
                entry.created_at,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub(crate) fn get_finance_entries(&self, period_id: &str) -> Result<Vec<FinanceEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, period_id, kind, fecha, ministerio, categoria, detalle, observacion, monto, estado, created_at
             FROM finance_entries WHERE period_id = ?1
             ORDER BY fecha, id",
        )?;
        let rows = stmt.query_map(params![period_id], |row| {
            let monto_str: String = row.get(8)?;
            Ok(FinanceEntry {
                id: Some(row.get(0)?),
                period_id: row.get(1)?,
                kind: EntryKind::parse(&row.get::<_, String>(2)?),
                fecha: row.get(3)?,
                ministerio: row.get(4)?,
                categoria: row.get(5)?,
                detalle: row.get(6)?,
                observacion: row.get(7)?,
                monto: Decimal::from_str(&monto_str).unwrap_or_default(),
                estado: EntryState::parse(&row.get::<_, String>(9)?),
                created_at: row.get(10)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn update_finance_entry(&self, id: i64, entry: &FinanceEntry) -> Result<()> {
        self.conn.execute(
            "UPDATE finance_entries SET
               kind = ?1, fecha = ?2, ministerio = ?3, categoria = ?4,
               detalle = ?5, observacion = ?6, monto = ?7, estado = ?8
             WHERE id = ?9",
            params![
                entry.kind.as_str(),
                entry.fecha,
                entry.ministerio,
                entry.categoria,
                entry.detalle,
                entry.observacion,
                entry.monto.to_string(),
                entry.estado.as_str(),
                id,
            ],
        )?;
        Ok(())
    }

    pub(crate) fn delete_finance_entry(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM finance_entries WHERE id = ?1", params![id])?;
        Ok(())
    }

    /// Income and expense totals for a period.
    pub(crate) fn get_finance_totals(&self, period_id: &str) -> Result<(Decimal, Decimal)> {
        let income: String = self.conn.query_row(
            "SELECT CAST(COALESCE(SUM(monto), 0) AS TEXT) FROM finance_entries
             WHERE period_id = ?1 AND kind = 'Ingreso'",
            params![period_id],
            |row| row.get(0),
        )?;
        let expenses: String = self.conn.query_row(
            "SELECT CAST(COALESCE(SUM(monto), 0) AS TEXT) FROM finance_entries
             WHERE period_id = ?1 AND kind = 'Egreso'",
            params![period_id],
            |row| row.get(0),
        )?;
        Ok((
            Decimal::from_str(&income).unwrap_or_default(),
            Decimal::from_str(&expenses).unwrap_or_default(),
        ))
    }

    // ── Tithes ────────────────────────────────────────────────

    pub(crate) fn get_tithes(&self, period_id: &str) -> Result<Vec<Tithe>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, period_id, numero, fecha, donador, valor
             FROM tithes WHERE period_id = ?1 ORDER BY numero",
        )?;
        let rows = stmt.query_map(params![period_id], tithe_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Next receipt number for display. The insert recomputes it inside the
    /// statement, so this value is advisory only.
    pub(crate) fn next_tithe_numero(&self, period_id: &str) -> Result<i64> {
        Ok(self.conn.query_row(
            "SELECT COALESCE(MAX(numero), 0) + 1 FROM tithes WHERE period_id = ?1",
            params![period_id],
            |row| row.get(0),
        )?)
    }

    /// Insert a tithe; `numero` is assigned by the statement itself
    /// (max + 1 within the period, starting at 1).
    pub(crate) fn insert_tithe(&self, tithe: &Tithe) -> Result<Tithe> {
        self.ensure_period_exists(&tithe.period_id)?;
        self.conn.execute(
            "INSERT INTO tithes (period_id, numero, fecha, donador, valor)
             VALUES (?1,
                     (SELECT COALESCE(MAX(numero), 0) + 1 FROM tithes WHERE period_id = ?1),
                     ?2, ?3, ?4)",
            params![
                tithe.period_id,
                tithe.fecha,
                tithe.donador,
                tithe.valor.to_string(),
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        Ok(self.conn.query_row(
            "SELECT id, period_id, numero, fecha, donador, valor FROM tithes WHERE id = ?1",
            params![id],
            tithe_from_row,
        )?)
    }

    pub(crate) fn update_tithe(&self, id: i64, tithe: &Tithe) -> Result<()> {
        self.conn.execute(
            "UPDATE tithes SET fecha = ?1, donador = ?2, valor = ?3 WHERE id = ?4",
            params![tithe.fecha, tithe.donador, tithe.valor.to_string(), id],
        )?;
        Ok(())
    }

    pub(crate) fn delete_tithe(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM tithes WHERE id = ?1", params![id])?;
        Ok(())
    }

    pub(crate) fn get_tithe_total(&self, period_id: &str) -> Result<Decimal> {
        let total: String = self.conn.query_row(
            "SELECT CAST(COALESCE(SUM(valor), 0) AS TEXT) FROM tithes WHERE period_id = ?1",
            params![period_id],
            |row| row.get(0),
        )?;
        Ok(Decimal::from_str(&total).unwrap_or_default())
    }

    // ── Attendance grid ───────────────────────────────────────

    pub(crate) fn get_attendance_rows(&self, period_id: &str) -> Result<Vec<AttendanceRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, period_id, nombre, orden FROM attendance_rows
             WHERE period_id = ?1 ORDER BY orden",
        )?;
        let rows = stmt.query_map(params![period_id], |row| {
            Ok(AttendanceRow {
                id: Some(row.get(0)?),
                period_id: row.get(1)?,
                nombre: row.get(2)?,
                orden: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_attendance_columns(&self, period_id: &str) -> Result<Vec<AttendanceColumn>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, period_id, nombre, orden FROM attendance_columns
             WHERE period_id = ?1 ORDER BY orden",
        )?;
        let rows = stmt.query_map(params![period_id], |row| {
            Ok(AttendanceColumn {
                id: Some(row.get(0)?),
                period_id: row.get(1)?,
                nombre: row.get(2)?,
                orden: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn insert_attendance_row(&self, period_id: &str, nombre: &str) -> Result<i64> {
        self.ensure_period_exists(period_id)?;
        self.conn.execute(
            "INSERT INTO attendance_rows (period_id, nombre, orden)
             VALUES (?1, ?2,
                     (SELECT COALESCE(MAX(orden), -1) + 1 FROM attendance_rows WHERE period_id = ?1))",
            params![period_id, nombre],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub(crate) fn insert_attendance_column(&self, period_id: &str, nombre: &str) -> Result<i64> {
        self.ensure_period_exists(period_id)?;
        self.conn.execute(
            "INSERT INTO attendance_columns (period_id, nombre, orden)
             VALUES (?1, ?2,
                     (SELECT COALESCE(MAX(orden), -1) + 1 FROM attendance_columns WHERE period_id = ?1))",
            params![period_id, nombre],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub(crate) fn rename_attendance_row(&self, id: i64, nombre: &str) -> Result<()> {
        self.conn.execute(
            "UPDATE attendance_rows SET nombre = ?1 WHERE id = ?2",
            params![nombre, id],
        )?;
        Ok(())
    }

    pub(crate) fn delete_attendance_row(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM attendance_rows WHERE id = ?1", params![id])?;
        Ok(())
    }

    pub(crate) fn delete_attendance_column(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM attendance_columns WHERE id = ?1", params![id])?;
        Ok(())
    }

    pub(crate) fn get_attendance_cells(&self, period_id: &str) -> Result<Vec<AttendanceCell>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, period_id, row_id, column_id, cantidad
             FROM attendance_cells WHERE period_id = ?1",
        )?;
        let rows = stmt.query_map(params![period_id], |row| {
            Ok(AttendanceCell {
                id: Some(row.get(0)?),
                period_id: row.get(1)?,
                row_id: row.get(2)?,
                column_id: row.get(3)?,
                cantidad: row.get(4)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Sparse composite-key upsert: a count of zero deletes the cell (no-op
    /// when no cell exists), anything else inserts or overwrites it.
    pub(crate) fn upsert_attendance_cell(
        &self,
        period_id: &str,
        row_id: i64,
        column_id: i64,
        cantidad: i64,
    ) -> Result<()> {
        if cantidad == 0 {
            self.conn.execute(
                "DELETE FROM attendance_cells WHERE row_id = ?1 AND column_id = ?2",
                params![row_id, column_id],
            )?;
            return Ok(());
        }
        self.conn.execute(
            "INSERT INTO attendance_cells (period_id, row_id, column_id, cantidad)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(row_id, column_id) DO UPDATE SET cantidad = ?4",
            params![period_id, row_id, column_id, cantidad],
        )?;
        Ok(())
    }

    /// Seed the standard row labels into a month that has none yet.
    pub(crate) fn seed_attendance_rows(&self, period_id: &str) -> Result<()> {
        let existing = self.get_attendance_rows(period_id)?;
        if !existing.is_empty() {
            return Ok(());
        }
        for nombre in DEFAULT_ATTENDANCE_ROWS {
            self.insert_attendance_row(period_id, nombre)?;
        }
        Ok(())
    }

    // ── Discipleship ──────────────────────────────────────────

    pub(crate) fn get_participants(&self, period_id: &str) -> Result<Vec<Participant>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, period_id, nombre FROM discipleship_participants
             WHERE period_id = ?1 ORDER BY nombre",
        )?;
        let rows = stmt.query_map(params![period_id], |row| {
            Ok(Participant {
                id: Some(row.get(0)?),
                period_id: row.get(1)?,
                nombre: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn insert_participant(&self, period_id: &str, nombre: &str) -> Result<i64> {
        self.ensure_period_exists(period_id)?;
        self.conn.execute(
            "INSERT INTO discipleship_participants (period_id, nombre) VALUES (?1, ?2)",
            params![period_id, nombre.trim()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub(crate) fn rename_participant(&self, id: i64, nombre: &str) -> Result<()> {
        self.conn.execute(
            "UPDATE discipleship_participants SET nombre = ?1 WHERE id = ?2",
            params![nombre.trim(), id],
        )?;
        Ok(())
    }

    pub(crate) fn delete_participant(&self, id: i64) -> Result<()> {
        self.conn.execute(
            "DELETE FROM discipleship_participants WHERE id = ?1",
            params![id],
        )?;
        Ok(())
    }

    pub(crate) fn get_meeting_dates(&self, period_id: &str) -> Result<Vec<MeetingDate>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, period_id, fecha FROM discipleship_dates
             WHERE period_id = ?1 ORDER BY fecha",
        )?;
        let rows = stmt.query_map(params![period_id], |row| {
            Ok(MeetingDate {
                id: Some(row.get(0)?),
                period_id: row.get(1)?,
                fecha: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn insert_meeting_date(&self, period_id: &str, fecha: &str) -> Result<i64> {
        self.ensure_period_exists(period_id)?;
        self.conn.execute(
            "INSERT INTO discipleship_dates (period_id, fecha) VALUES (?1, ?2)",
            params![period_id, fecha],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub(crate) fn delete_meeting_date(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM discipleship_dates WHERE id = ?1", params![id])?;
        Ok(())
    }

    pub(crate) fn get_marks(&self, period_id: &str) -> Result<Vec<Mark>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, period_id, participant_id, date_id, status
             FROM discipleship_marks WHERE period_id = ?1",
        )?;
        let rows = stmt.query_map(params![period_id], |row| {
            Ok(Mark {
                id: Some(row.get(0)?),
                period_id: row.get(1)?,
                participant_id: row.get(2)?,
                date_id: row.get(3)?,
                status: MarkStatus::parse(&row.get::<_, String>(4)?),
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Sparse composite-key upsert: the `none` sentinel deletes the mark
    /// instead of storing it.
    pub(crate) fn upsert_mark(
        &self,
        period_id: &str,
        participant_id: i64,
        date_id: i64,
        status: MarkStatus,
    ) -> Result<()> {
        if status.is_none() {
            self.conn.execute(
                "DELETE FROM discipleship_marks WHERE participant_id = ?1 AND date_id = ?2",
                params![participant_id, date_id],
            )?;
            return Ok(());
        }
        self.conn.execute(
            "INSERT INTO discipleship_marks (period_id, participant_id, date_id, status)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(participant_id, date_id) DO UPDATE SET status = ?4",
            params![period_id, participant_id, date_id, status.as_str()],
        )?;
        Ok(())
    }

    /// Replace a period's entire discipleship dataset from an in-memory grid
    /// keyed by (participant name, date). Runs in one transaction so the
    /// delete-then-insert sequence cannot partially apply.
    pub(crate) fn replace_discipleship(
        &mut self,
        period_id: &str,
        participants: &[String],
        dates: &[String],
        marks: &[(String, String, MarkStatus)],
    ) -> Result<()> {
        self.ensure_period_exists(period_id)?;
        let tx = self.conn.transaction()?;

        tx.execute(
            "DELETE FROM discipleship_marks WHERE period_id = ?1",
            params![period_id],
        )?;
        tx.execute(
            "DELETE FROM discipleship_dates WHERE period_id = ?1",
            params![period_id],
        )?;
        tx.execute(
            "DELETE FROM discipleship_participants WHERE period_id = ?1",
            params![period_id],
        )?;

        let mut participant_ids = std::collections::HashMap::new();
        for nombre in participants {
            tx.execute(
                "INSERT INTO discipleship_participants (period_id, nombre) VALUES (?1, ?2)",
                params![period_id, nombre.trim()],
            )?;
            participant_ids.insert(nombre.clone(), tx.last_insert_rowid());
        }

        let mut date_ids = std::collections::HashMap::new();
        for fecha in dates {
            tx.execute(
                "INSERT INTO discipleship_dates (period_id, fecha) VALUES (?1, ?2)",
                params![period_id, fecha],
            )?;
            date_ids.insert(fecha.clone(), tx.last_insert_rowid());
        }

        for (nombre, fecha, status) in marks {
            if status.is_none() {
                continue;
            }
            let (Some(&pid), Some(&did)) = (participant_ids.get(nombre), date_ids.get(fecha))
            else {
                continue;
            };
            tx.execute(
                "INSERT INTO discipleship_marks (period_id, participant_id, date_id, status)
                 VALUES (?1, ?2, ?3, ?4)",
                params![period_id, pid, did, status.as_str()],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    // ── Inventory ─────────────────────────────────────────────

    pub(crate) fn get_inventory_items(&self) -> Result<Vec<InventoryItem>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, cantidad, codigo, detalle, numero_serie, ubicacion, ministerio, estado, fecha_registro
             FROM inventory_items ORDER BY fecha_registro DESC, id DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(InventoryItem {
                id: Some(row.get(0)?),
                cantidad: row.get(1)?,
                codigo: row.get(2)?,
                detalle: row.get(3)?,
                numero_serie: row.get(4)?,
                ubicacion: row.get(5)?,
                ministerio: row.get(6)?,
                estado: row.get(7)?,
                fecha_registro: row.get(8)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn insert_inventory_item(&self, item: &InventoryItem) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO inventory_items
               (cantidad, codigo, detalle, numero_serie, ubicacion, ministerio, estado, fecha_registro)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                item.cantidad,
                item.codigo,
                item.detalle,
                item.numero_serie,
                item.ubicacion,
                item.ministerio,
                item.estado,
                item.fecha_registro,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub(crate) fn update_inventory_item(&self, id: i64, item: &InventoryItem) -> Result<()> {
        self.conn.execute(
            "UPDATE inventory_items SET
               cantidad = ?1, codigo = ?2, detalle = ?3, numero_serie = ?4,
               ubicacion = ?5, ministerio = ?6, estado = ?7
             WHERE id = ?8",
            params![
                item.cantidad,
                item.codigo,
                item.detalle,
                item.numero_serie,
                item.ubicacion,
                item.ministerio,
                item.estado,
                id,
            ],
        )?;
        Ok(())
    }

    pub(crate) fn delete_inventory_item(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM inventory_items WHERE id = ?1", params![id])?;
        Ok(())
    }

    // ── Payment flow ──────────────────────────────────────────

    pub(crate) fn get_payment_tables(&self) -> Result<Vec<PaymentTable>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, nombre, fecha_creacion FROM payment_tables
             ORDER BY fecha_creacion DESC, id DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(PaymentTable {
                id: Some(row.get(0)?),
                nombre: row.get(1)?,
                fecha_creacion: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn insert_payment_table(&self, table: &PaymentTable) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO payment_tables (nombre, fecha_creacion) VALUES (?1, ?2)",
            params![table.nombre.trim(), table.fecha_creacion],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub(crate) fn rename_payment_table(&self, id: i64, nombre: &str) -> Result<()> {
        self.conn.execute(
            "UPDATE payment_tables SET nombre = ?1 WHERE id = ?2",
            params![nombre.trim(), id],
        )?;
        Ok(())
    }

    pub(crate) fn delete_payment_table(&self, id: i64) -> Result<()> {
        // Rows cascade via the foreign key
        self.conn
            .execute("DELETE FROM payment_tables WHERE id = ?1", params![id])?;
        Ok(())
    }

    pub(crate) fn get_payment_rows(&self, table_id: i64) -> Result<Vec<PaymentRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, table_id, fecha, beneficiarios, detalle, valor
             FROM payment_rows WHERE table_id = ?1 ORDER BY fecha, id",
        )?;
        let rows = stmt.query_map(params![table_id], |row| {
            let valor_str: String = row.get(5)?;
            Ok(PaymentRow {
                id: Some(row.get(0)?),
                table_id: row.get(1)?,
                fecha: row.get(2)?,
                beneficiarios: row.get(3)?,
                detalle: row.get(4)?,
                valor: Decimal::from_str(&valor_str).unwrap_or_default(),
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn insert_payment_row(&self, row: &PaymentRow) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO payment_rows (table_id, fecha, beneficiarios, detalle, valor)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                row.table_id,
                row.fecha,
                row.beneficiarios,
                row.detalle,
                row.valor.to_string(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub(crate) fn update_payment_row(&self, id: i64, row: &PaymentRow) -> Result<()> {
        self.conn.execute(
            "UPDATE payment_rows SET fecha = ?1, beneficiarios = ?2, detalle = ?3, valor = ?4
             WHERE id = ?5",
            params![
                row.fecha,
                row.beneficiarios,
                row.detalle,
                row.valor.to_string(),
                id,
            ],
        )?;
        Ok(())
    }

    pub(crate) fn delete_payment_row(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM payment_rows WHERE id = ?1", params![id])?;
        Ok(())
    }

    // ── Census ────────────────────────────────────────────────

    pub(crate) fn get_personal_records(&self) -> Result<Vec<PersonalRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, cedula, apellidos_nombres, fecha_nacimiento, edad, es_cristiano, bautizo,
                    tipo_sangre, estado_civil, sexo, capacidad_especial, celular,
                    telefono_convencional, conyuge, correo, nivel_estudio, direccion, ciudad, created_at
             FROM census_personal ORDER BY created_at DESC, id DESC",
        )?;
        let rows = stmt.query_map([], personal_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn insert_personal_record(&self, rec: &PersonalRecord) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO census_personal
               (cedula, apellidos_nombres, fecha_nacimiento, edad, es_cristiano, bautizo,
                tipo_sangre, estado_civil, sexo, capacidad_especial, celular,
                telefono_convencional, conyuge, correo, nivel_estudio, direccion, ciudad, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
            params![
                rec.cedula,
                rec.apellidos_nombres,
                rec.fecha_nacimiento,
                rec.edad,
                rec.es_cristiano,
                rec.bautizo,
                rec.tipo_sangre,
                rec.estado_civil,
                rec.sexo,
                rec.capacidad_especial,
                rec.celular,
                rec.telefono_convencional,
                rec.conyuge,
                rec.correo,
                rec.nivel_estudio,
                rec.direccion,
                rec.ciudad,
                rec.created_at,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub(crate) fn update_personal_record(&self, id: i64, rec: &PersonalRecord) -> Result<()> {
        self.conn.execute(
            "UPDATE census_personal SET
               cedula = ?1, apellidos_nombres = ?2, fecha_nacimiento = ?3, edad = ?4,
               es_cristiano = ?5, bautizo = ?6, tipo_sangre = ?7, estado_civil = ?8,
               sexo = ?9, capacidad_especial = ?10, celular = ?11, telefono_convencional = ?12,
               conyuge = ?13, correo = ?14, nivel_estudio = ?15, direccion = ?16, ciudad = ?17
             WHERE id = ?18",
            params![
                rec.cedula,
                rec.apellidos_nombres,
                rec.fecha_nacimiento,
                rec.edad,
                rec.es_cristiano,
                rec.bautizo,
                rec.tipo_sangre,
                rec.estado_civil,
                rec.sexo,
                rec.capacidad_especial,
                rec.celular,
                rec.telefono_convencional,
                rec.conyuge,
                rec.correo,
                rec.nivel_estudio,
                rec.direccion,
                rec.ciudad,
                id,
            ],
        )?;
        Ok(())
    }

    pub(crate) fn delete_personal_record(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM census_personal WHERE id = ?1", params![id])?;
        Ok(())
    }

    pub(crate) fn get_church_records(&self) -> Result<Vec<ChurchRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, cedula, cargo, local, jornada_trabajo, fecha_ingreso, fecha_salida,
                    dias_por_mes, horas_semanales, sueldo, tipo_pago, banco, numero_cuenta,
                    redil, otros, created_at
             FROM census_church ORDER BY created_at DESC, id DESC",
        )?;
        let rows = stmt.query_map([], church_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn insert_church_record(&self, rec: &ChurchRecord) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO census_church
               (cedula, cargo, local, jornada_trabajo, fecha_ingreso, fecha_salida,
                dias_por_mes, horas_semanales, sueldo, tipo_pago, banco, numero_cuenta,
                redil, otros, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
            params![
                rec.cedula,
                rec.cargo,
                rec.local,
                rec.jornada_trabajo,
                rec.fecha_ingreso,
                rec.fecha_salida,
                rec.dias_por_mes,
                rec.horas_semanales,
                rec.sueldo.map(|d| d.to_string()),
                rec.tipo_pago,
                rec.banco,
                rec.numero_cuenta,
                rec.redil,
                rec.otros,
                rec.created_at,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub(crate) fn update_church_record(&self, id: i64, rec: &ChurchRecord) -> Result<()> {
        self.conn.execute(
            "UPDATE census_church SET
               cedula = ?1, cargo = ?2, local = ?3, jornada_trabajo = ?4, fecha_ingreso = ?5,
               fecha_salida = ?6, dias_por_mes = ?7, horas_semanales = ?8, sueldo = ?9,
               tipo_pago = ?10, banco = ?11, numero_cuenta = ?12, redil = ?13, otros = ?14
             WHERE id = ?15",
            params![
                rec.cedula,
                rec.cargo,
                rec.local,
                rec.jornada_trabajo,
                rec.fecha_ingreso,
                rec.fecha_salida,
                rec.dias_por_mes,
                rec.horas_semanales,
                rec.sueldo.map(|d| d.to_string()),
                rec.tipo_pago,
                rec.banco,
                rec.numero_cuenta,
                rec.redil,
                rec.otros,
                id,
            ],
        )?;
        Ok(())
    }

    pub(crate) fn delete_church_record(&self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM census_church WHERE id = ?1", params![id])?;
        Ok(())
    }
}

// ── Row mappers ───────────────────────────────────────────────

fn period_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Period> {
    Ok(Period {
        id: row.get(0)?,
        name: row.get(1)?,
        year: row.get(2)?,
        month: row.get(3)?,
        start_date: row.get(4)?,
        end_date: row.get(5)?,
        status: PeriodStatus::parse(&row.get::<_, String>(6)?),
    })
}

fn tithe_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Tithe> {
    let valor_str: String = row.get(5)?;
    Ok(Tithe {
        id: Some(row.get(0)?),
        period_id: row.get(1)?,
        numero: row.get(2)?,
        fecha: row.get(3)?,
        donador: row.get(4)?,
        valor: Decimal::from_str(&valor_str).unwrap_or_default(),
    })
}

fn personal_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PersonalRecord> {
    Ok(PersonalRecord {
        id: Some(row.get(0)?),
        cedula: row.get(1)?,
        apellidos_nombres: row.get(2)?,
        fecha_nacimiento: row.get(3)?,
        edad: row.get(4)?,
        es_cristiano: row.get(5)?,
        bautizo: row.get(6)?,
        tipo_sangre: row.get(7)?,
        estado_civil: row.get(8)?,
        sexo: row.get(9)?,
        capacidad_especial: row.get(10)?,
        celular: row.get(11)?,
        telefono_convencional: row.get(12)?,
        conyuge: row.get(13)?,
        correo: row.get(14)?,
        nivel_estudio: row.get(15)?,
        direccion: row.get(16)?,
        ciudad: row.get(17)?,
        created_at: row.get(18)?,
    })
}

fn church_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ChurchRecord> {
    let sueldo_str: Option<String> = row.get(9)?;
    Ok(ChurchRecord {
        id: Some(row.get(0)?),
        cedula: row.get(1)?,
        cargo: row.get(2)?,
        local: row.get(3)?,
        jornada_trabajo: row.get(4)?,
        fecha_ingreso: row.get(5)?,
        fecha_salida: row.get(6)?,
        dias_por_mes: row.get(7)?,
        horas_semanales: row.get(8)?,
        sueldo: sueldo_str.and_then(|s| Decimal::from_str(&s).ok()),
        tipo_pago: row.get(10)?,
        banco: row.get(11)?,
        numero_cuenta: row.get(12)?,
        redil: row.get(13)?,
        otros: row.get(14)?,
        created_at: row.get(15)?,
    })
}

// ── Helpers ───────────────────────────────────────────────────

fn json_list(items: &[String]) -> Result<String> {
    serde_json::to_string(items).context("Failed to serialize option list")
}

fn parse_json_list(s: &str) -> Vec<String> {
    serde_json::from_str(s).unwrap_or_default()
}

#[cfg(test)]
mod tests;
