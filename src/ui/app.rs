use anyhow::Result;
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::db::Database;
use crate::models::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Finance,
    Tithes,
    Attendance,
    Discipleship,
    Inventory,
    Payments,
    Census,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[
            Self::Dashboard,
            Self::Finance,
            Self::Tithes,
            Self::Attendance,
            Self::Discipleship,
            Self::Inventory,
            Self::Payments,
            Self::Census,
        ]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Resumen"),
            Self::Finance => write!(f, "Finanzas"),
            Self::Tithes => write!(f, "Diezmos"),
            Self::Attendance => write!(f, "Asistencia"),
            Self::Discipleship => write!(f, "Discipulado"),
            Self::Inventory => write!(f, "Inventario"),
            Self::Payments => write!(f, "Pagos"),
            Self::Census => write!(f, "Censo"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Editing => write!(f, "EDIT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    StartMonth { year: i32, month: u32 },
    CloseMonth,
    DeleteEntry { id: i64, detalle: String },
    DeleteTithe { id: i64, numero: i64 },
    DeleteAttendanceRow { id: i64, nombre: String },
    DeleteAttendanceColumn { id: i64, nombre: String },
    DeleteParticipant { id: i64, nombre: String },
    DeleteMeetingDate { id: i64, fecha: String },
    DeleteItem { id: i64, codigo: String },
    DeletePaymentTable { id: i64, nombre: String },
    DeletePaymentRow { id: i64, beneficiarios: String },
    DeletePersonalRecord { id: i64, nombre: String },
    DeleteChurchRecord { id: i64, cedula: String },
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) user: User,
    pub(crate) data_dir: PathBuf,

    // Active month and its option lists
    pub(crate) period: Period,
    pub(crate) config: PeriodConfig,
    pub(crate) global_config: GlobalConfig,

    // Dashboard
    pub(crate) income: Decimal,
    pub(crate) expenses: Decimal,
    pub(crate) tithe_total: Decimal,
    pub(crate) closed: Vec<Period>,

    // Finance ledger
    pub(crate) entries: Vec<FinanceEntry>,
    pub(crate) entry_index: usize,
    pub(crate) entry_scroll: usize,

    // Tithes
    pub(crate) tithes: Vec<Tithe>,
    pub(crate) tithe_index: usize,
    pub(crate) tithe_scroll: usize,
    pub(crate) next_numero: i64,

    // Attendance grid (2D cursor)
    pub(crate) att_rows: Vec<AttendanceRow>,
    pub(crate) att_columns: Vec<AttendanceColumn>,
    pub(crate) att_cells: Vec<AttendanceCell>,
    pub(crate) att_row_index: usize,
    pub(crate) att_col_index: usize,
    pub(crate) editing_cell: Option<(i64, i64)>,

    // Discipleship grid (2D cursor)
    pub(crate) participants: Vec<Participant>,
    pub(crate) meeting_dates: Vec<MeetingDate>,
    pub(crate) marks: Vec<Mark>,
    pub(crate) participant_index: usize,
    pub(crate) date_index: usize,

    // Inventory
    pub(crate) items: Vec<InventoryItem>,
    pub(crate) item_index: usize,
    pub(crate) item_scroll: usize,

    // Payment flow
    pub(crate) payment_tables: Vec<PaymentTable>,
    pub(crate) payment_table_index: usize,
    pub(crate) payment_rows: Vec<PaymentRow>,
    pub(crate) payment_row_index: usize,
    pub(crate) payments_view_rows: bool,

    // Census
    pub(crate) personal_records: Vec<PersonalRecord>,
    pub(crate) church_records: Vec<ChurchRecord>,
    pub(crate) census_index: usize,
    pub(crate) census_scroll: usize,
    pub(crate) census_view_church: bool,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(user: User, period: Period, data_dir: PathBuf) -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            user,
            data_dir,

            period,
            config: PeriodConfig::default(),
            global_config: GlobalConfig::default(),

            income: Decimal::ZERO,
            expenses: Decimal::ZERO,
            tithe_total: Decimal::ZERO,
            closed: Vec::new(),

            entries: Vec::new(),
            entry_index: 0,
            entry_scroll: 0,

            tithes: Vec::new(),
            tithe_index: 0,
            tithe_scroll: 0,
            next_numero: 1,

            att_rows: Vec::new(),
            att_columns: Vec::new(),
            att_cells: Vec::new(),
            att_row_index: 0,
            att_col_index: 0,
            editing_cell: None,

            participants: Vec::new(),
            meeting_dates: Vec::new(),
            marks: Vec::new(),
            participant_index: 0,
            date_index: 0,

            items: Vec::new(),
            item_index: 0,
            item_scroll: 0,

            payment_tables: Vec::new(),
            payment_table_index: 0,
            payment_rows: Vec::new(),
            payment_row_index: 0,
            payments_view_rows: false,

            personal_records: Vec::new(),
            church_records: Vec::new(),
            census_index: 0,
            census_scroll: 0,
            census_view_church: false,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    pub(crate) fn refresh_dashboard(&mut self, db: &Database) -> Result<()> {
        let (income, expenses) = db.get_finance_totals(&self.period.id)?;
        self.income = income;
        self.expenses = expenses;
        self.tithe_total = db.get_tithe_total(&self.period.id)?;
        self.closed = db.get_closed_periods()?;
        Ok(())
    }

    pub(crate) fn refresh_finance(&mut self, db: &Database) -> Result<()> {
        self.entries = db.get_finance_entries(&self.period.id)?;
        if self.entry_index >= self.entries.len() && !self.entries.is_empty() {
            self.entry_index = self.entries.len() - 1;
        }
        Ok(())
    }

    pub(crate) fn refresh_tithes(&mut self, db: &Database) -> Result<()> {
        self.tithes = db.get_tithes(&self.period.id)?;
        self.next_numero = db.next_tithe_numero(&self.period.id)?;
        if self.tithe_index >= self.tithes.len() && !self.tithes.is_empty() {
            self.tithe_index = self.tithes.len() - 1;
        }
        Ok(())
    }

    pub(crate) fn refresh_attendance(&mut self, db: &Database) -> Result<()> {
        self.att_rows = db.get_attendance_rows(&self.period.id)?;
        self.att_columns = db.get_attendance_columns(&self.period.id)?;
        self.att_cells = db.get_attendance_cells(&self.period.id)?;
        if self.att_row_index >= self.att_rows.len() && !self.att_rows.is_empty() {
            self.att_row_index = self.att_rows.len() - 1;
        }
        if self.att_col_index >= self.att_columns.len() && !self.att_columns.is_empty() {
            self.att_col_index = self.att_columns.len() - 1;
        }
        Ok(())
    }

    pub(crate) fn refresh_discipleship(&mut self, db: &Database) -> Result<()> {
        self.participants = db.get_participants(&self.period.id)?;
        self.meeting_dates = db.get_meeting_dates(&self.period.id)?;
        self.marks = db.get_marks(&self.period.id)?;
        if self.participant_index >= self.participants.len() && !self.participants.is_empty() {
            self.participant_index = self.participants.len() - 1;
        }
        if self.date_index >= self.meeting_dates.len() && !self.meeting_dates.is_empty() {
            self.date_index = self.meeting_dates.len() - 1;
        }
        Ok(())
    }

    pub(crate) fn refresh_inventory(&mut self, db: &Database) -> Result<()> {
        self.items = db.get_inventory_items()?;
        self.global_config = db.get_global_config()?;
        if self.item_index >= self.items.len() && !self.items.is_empty() {
            self.item_index = self.items.len() - 1;
        }
        Ok(())
    }

    pub(crate) fn refresh_payments(&mut self, db: &Database) -> Result<()> {
        self.payment_tables = db.get_payment_tables()?;
        if self.payment_table_index >= self.payment_tables.len()
            && !self.payment_tables.is_empty()
        {
            self.payment_table_index = self.payment_tables.len() - 1;
        }
        self.payment_rows = match self.selected_payment_table().and_then(|t| t.id) {
            Some(table_id) => db.get_payment_rows(table_id)?,
            None => Vec::new(),
        };
        if self.payment_row_index >= self.payment_rows.len() && !self.payment_rows.is_empty() {
            self.payment_row_index = self.payment_rows.len() - 1;
        }
        Ok(())
    }

    pub(crate) fn refresh_census(&mut self, db: &Database) -> Result<()> {
        self.personal_records = db.get_personal_records()?;
        self.church_records = db.get_church_records()?;
        let len = if self.census_view_church {
            self.church_records.len()
        } else {
            self.personal_records.len()
        };
        if self.census_index >= len && len > 0 {
            self.census_index = len - 1;
        }
        Ok(())
    }

    pub(crate) fn refresh_config(&mut self, db: &Database) -> Result<()> {
        self.config = db.get_period_config(&self.period.id)?.unwrap_or_default();
        self.global_config = db.get_global_config()?;
        Ok(())
    }

    pub(crate) fn refresh_all(&mut self, db: &Database) -> Result<()> {
        self.refresh_config(db)?;
        self.refresh_dashboard(db)?;
        self.refresh_finance(db)?;
        self.refresh_tithes(db)?;
        self.refresh_attendance(db)?;
        self.refresh_discipleship(db)?;
        self.refresh_inventory(db)?;
        self.refresh_payments(db)?;
        self.refresh_census(db)?;
        Ok(())
    }

    // ── Selection helpers ─────────────────────────────────────

    pub(crate) fn selected_payment_table(&self) -> Option<&PaymentTable> {
        self.payment_tables.get(self.payment_table_index)
    }

    pub(crate) fn selected_att_cell_ids(&self) -> Option<(i64, i64)> {
        let row = self.att_rows.get(self.att_row_index)?.id?;
        let col = self.att_columns.get(self.att_col_index)?.id?;
        Some((row, col))
    }

    /// The stored count for a grid cell, or None when the cell is absent.
    pub(crate) fn attendance_count(&self, row_id: i64, column_id: i64) -> Option<i64> {
        self.att_cells
            .iter()
            .find(|c| c.row_id == row_id && c.column_id == column_id)
            .map(|c| c.cantidad)
    }

    pub(crate) fn selected_mark_ids(&self) -> Option<(i64, i64)> {
        let p = self.participants.get(self.participant_index)?.id?;
        let d = self.meeting_dates.get(self.date_index)?.id?;
        Some((p, d))
    }

    /// The stored mark for a participant/date pair; absent reads as None.
    pub(crate) fn mark_status(&self, participant_id: i64, date_id: i64) -> MarkStatus {
        self.marks
            .iter()
            .find(|m| m.participant_id == participant_id && m.date_id == date_id)
            .map(|m| m.status)
            .unwrap_or(MarkStatus::None)
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
