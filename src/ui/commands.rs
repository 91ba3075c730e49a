use std::collections::HashMap;
use std::sync::LazyLock;

use rust_decimal::Decimal;
use std::str::FromStr;

use super::app::{App, InputMode, PendingAction, Screen};
use crate::db::Database;
use crate::models::{FinanceEntry, InventoryItem, PaymentRow, PaymentTable, PersonalRecord, Tithe};
use crate::models::{ChurchRecord, EntryKind, EntryState, Period};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Database) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit ChurchTUI", cmd_quit, r);
    register_command!("quit", "Quit ChurchTUI", cmd_quit, r);
    register_command!("logout", "Log out and quit", cmd_logout, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);

    register_command!("resumen", "Go to the monthly summary", cmd_dashboard, r);
    register_command!("finanzas", "Go to the income/expense ledger", cmd_finance, r);
    register_command!("diezmos", "Go to the tithe register", cmd_tithes, r);
    register_command!("asistencia", "Go to the attendance grid", cmd_attendance, r);
    register_command!("discipulado", "Go to the discipleship grid", cmd_discipleship, r);
    register_command!("inventario", "Go to the inventory", cmd_inventory, r);
    register_command!("pagos", "Go to the payment tables", cmd_payments, r);
    register_command!("censo", "Go to the census", cmd_census, r);

    register_command!(
        "start-month",
        "Archive the active month and open a new one (current month when no argument)",
        cmd_start_month,
        r
    );
    register_command!(
        "close-month",
        "Close the active month without opening another",
        cmd_close_month,
        r
    );

    register_command!(
        "ingreso",
        "Record income (e.g. :ingreso 2025-01-15 150.00 Servicio Dominical)",
        cmd_ingreso,
        r
    );
    register_command!(
        "egreso",
        "Record an expense (e.g. :egreso 2025-01-20 30.50 Limpieza)",
        cmd_egreso,
        r
    );
    register_command!(
        "estado",
        "Toggle the selected ledger entry between Procesado and Pendiente",
        cmd_estado,
        r
    );
    register_command!("delete-entry", "Delete the selected ledger entry", cmd_delete_entry, r);

    register_command!(
        "diezmo",
        "Record a tithe (e.g. :diezmo 2025-01-05 50.00 Juan Pérez)",
        cmd_diezmo,
        r
    );
    register_command!("delete-diezmo", "Delete the selected tithe", cmd_delete_diezmo, r);

    register_command!("fila", "Add an attendance row (e.g. :fila VISITAS)", cmd_fila, r);
    register_command!(
        "columna",
        "Add an attendance column (e.g. :columna 05/01)",
        cmd_columna,
        r
    );
    register_command!(
        "rename-fila",
        "Rename the selected attendance row (e.g. :rename-fila JÓVENES)",
        cmd_rename_fila,
        r
    );
    register_command!("delete-fila", "Delete the selected attendance row", cmd_delete_fila, r);
    register_command!(
        "delete-columna",
        "Delete the selected attendance column",
        cmd_delete_columna,
        r
    );

    register_command!(
        "participante",
        "Add a discipleship participant (e.g. :participante Ana Torres)",
        cmd_participante,
        r
    );
    register_command!(
        "rename-participante",
        "Rename the selected participant",
        cmd_rename_participante,
        r
    );
    register_command!(
        "delete-participante",
        "Delete the selected participant",
        cmd_delete_participante,
        r
    );
    register_command!(
        "reunion",
        "Add a meeting date (e.g. :reunion 2025-01-08)",
        cmd_reunion,
        r
    );
    register_command!("delete-reunion", "Delete the selected meeting date", cmd_delete_reunion, r);

    register_command!(
        "item",
        "Add an inventory item (e.g. :item INV-001 2 Micrófono inalámbrico)",
        cmd_item,
        r
    );
    register_command!("delete-item", "Delete the selected inventory item", cmd_delete_item, r);

    register_command!("tabla", "Create a payment table (e.g. :tabla Pagos Enero)", cmd_tabla, r);
    register_command!("delete-tabla", "Delete the selected payment table", cmd_delete_tabla, r);
    register_command!(
        "pago",
        "Add a payment row (e.g. :pago 2025-01-10 100.00 Proveedor A)",
        cmd_pago,
        r
    );
    register_command!("delete-pago", "Delete the selected payment row", cmd_delete_pago, r);
    register_command!(
        "export",
        "Export the selected payment table to HTML (e.g. :export ~/pagos.html)",
        cmd_export,
        r
    );

    register_command!(
        "persona",
        "Add a census record (e.g. :persona 0912345678 Torres, Ana)",
        cmd_persona,
        r
    );
    register_command!("delete-persona", "Delete the selected census record", cmd_delete_persona, r);
    register_command!(
        "ficha",
        "Add a church-data record for a cedula (e.g. :ficha 0912345678)",
        cmd_ficha,
        r
    );
    register_command!("delete-ficha", "Delete the selected church-data record", cmd_delete_ficha, r);

    register_command!(
        "ministerio",
        "Add a ministry to this month's option list",
        cmd_ministerio,
        r
    );
    register_command!(
        "categoria",
        "Add a category to this month's option list",
        cmd_categoria,
        r
    );
    register_command!(
        "detalle",
        "Add a detail to this month's option list",
        cmd_detalle,
        r
    );
    register_command!(
        "ubicacion",
        "Add a location to the shared inventory lists",
        cmd_ubicacion,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, db)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

fn valid_date(s: &str) -> bool {
    chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

// ── Navigation and lifecycle ─────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_logout(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    crate::auth::clear_session(&app.data_dir)?;
    app.running = false;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    app.refresh_dashboard(db)?;
    Ok(())
}

fn cmd_finance(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Finance;
    app.refresh_finance(db)?;
    Ok(())
}

fn cmd_tithes(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Tithes;
    app.refresh_tithes(db)?;
    Ok(())
}

fn cmd_attendance(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Attendance;
    app.refresh_attendance(db)?;
    Ok(())
}

fn cmd_discipleship(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Discipleship;
    app.refresh_discipleship(db)?;
    Ok(())
}

fn cmd_inventory(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Inventory;
    app.refresh_inventory(db)?;
    Ok(())
}

fn cmd_payments(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Payments;
    app.payments_view_rows = false;
    app.refresh_payments(db)?;
    Ok(())
}

fn cmd_census(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Census;
    app.refresh_census(db)?;
    Ok(())
}

fn cmd_start_month(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    // No argument means the current calendar month
    let Some((year, month)) = Period::parse_id_or_current(args) else {
        app.set_status("Usage: :start-month [YYYY-MM] (e.g. :start-month 2025-02)");
        return Ok(());
    };
    let new_id = Period::id_for(year, month);
    if db.get_period_by_id(&new_id)?.is_some() {
        app.set_status(format!("{new_id} already exists"));
        return Ok(());
    }

    app.confirm_message = format!(
        "Archive {} and start {}?",
        app.period.name,
        Period::display_name(year, month)
    );
    app.pending_action = Some(PendingAction::StartMonth { year, month });
    app.input_mode = InputMode::Confirm;
    Ok(())
}

fn cmd_close_month(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.confirm_message = format!("Close {} without opening another month?", app.period.name);
    app.pending_action = Some(PendingAction::CloseMonth);
    app.input_mode = InputMode::Confirm;
    Ok(())
}

// ── Finance ledger ───────────────────────────────────────────

fn cmd_ingreso(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    add_entry(args, app, db, EntryKind::Ingreso)
}

fn cmd_egreso(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    add_entry(args, app, db, EntryKind::Egreso)
}

fn add_entry(args: &str, app: &mut App, db: &mut Database, kind: EntryKind) -> anyhow::Result<()> {
    let usage = match kind {
        EntryKind::Ingreso => "Usage: :ingreso <fecha> <monto> <detalle>",
        EntryKind::Egreso => "Usage: :egreso <fecha> <monto> <detalle>",
    };
    let parts: Vec<&str> = args.splitn(3, ' ').collect();
    if parts.len() < 3 {
        app.set_status(usage);
        return Ok(());
    }

    let (fecha, monto_str, detalle) = (parts[0], parts[1], parts[2]);
    if !valid_date(fecha) {
        app.set_status(format!("Invalid date: {fecha} (use YYYY-MM-DD)"));
        return Ok(());
    }
    let monto = match Decimal::from_str(monto_str) {
        Ok(m) => m,
        Err(_) => {
            app.set_status(format!("Invalid amount: {monto_str}"));
            return Ok(());
        }
    };

    let ministerio = app.config.ministerios.first().cloned().unwrap_or_default();
    let categoria = app.config.categorias.first().cloned().unwrap_or_default();
    let mut entry = FinanceEntry::new(
        app.period.id.clone(),
        kind,
        fecha.to_string(),
        ministerio,
        categoria,
        monto,
    );
    entry.detalle = detalle.to_string();
    db.insert_finance_entry(&entry)?;
    app.screen = Screen::Finance;
    app.refresh_finance(db)?;
    app.refresh_dashboard(db)?;
    app.set_status(format!("Recorded {kind}: {detalle} ({monto})"));
    Ok(())
}

fn cmd_estado(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if app.screen != Screen::Finance || app.entries.is_empty() {
        app.set_status("Navigate to Finanzas and select an entry first");
        return Ok(());
    }
    if let Some(entry) = app.entries.get(app.entry_index) {
        if let Some(id) = entry.id {
            let mut updated = entry.clone();
            updated.estado = match entry.estado {
                EntryState::Procesado => EntryState::Pendiente,
                EntryState::Pendiente => EntryState::Procesado,
            };
            db.update_finance_entry(id, &updated)?;
            app.refresh_finance(db)?;
            app.set_status(format!("Marked as {}", updated.estado));
        }
    }
    Ok(())
}

fn cmd_delete_entry(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if app.screen != Screen::Finance || app.entries.is_empty() {
        app.set_status("Navigate to Finanzas and select an entry first");
        return Ok(());
    }
    if let Some(entry) = app.entries.get(app.entry_index) {
        if let Some(id) = entry.id {
            let detalle = entry.detalle.clone();
            app.confirm_message = format!("Delete entry '{detalle}'?");
            app.pending_action = Some(PendingAction::DeleteEntry { id, detalle });
            app.input_mode = InputMode::Confirm;
        }
    }
    Ok(())
}

// ── Tithes ───────────────────────────────────────────────────

fn cmd_diezmo(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let parts: Vec<&str> = args.splitn(3, ' ').collect();
    if parts.len() < 3 {
        app.set_status("Usage: :diezmo <fecha> <valor> <donador>");
        return Ok(());
    }

    let (fecha, valor_str, donador) = (parts[0], parts[1], parts[2]);
    if !valid_date(fecha) {
        app.set_status(format!("Invalid date: {fecha} (use YYYY-MM-DD)"));
        return Ok(());
    }
    let valor = match Decimal::from_str(valor_str) {
        Ok(v) => v,
        Err(_) => {
            app.set_status(format!("Invalid amount: {valor_str}"));
            return Ok(());
        }
    };

    let tithe = db.insert_tithe(&Tithe::new(
        app.period.id.clone(),
        fecha.to_string(),
        donador.to_string(),
        valor,
    ))?;
    app.screen = Screen::Tithes;
    app.refresh_tithes(db)?;
    app.refresh_dashboard(db)?;
    app.set_status(format!("Tithe #{} recorded for {donador}", tithe.numero));
    Ok(())
}

fn cmd_delete_diezmo(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if app.screen != Screen::Tithes || app.tithes.is_empty() {
        app.set_status("Navigate to Diezmos and select a tithe first");
        return Ok(());
    }
    if let Some(tithe) = app.tithes.get(app.tithe_index) {
        if let Some(id) = tithe.id {
            app.confirm_message = format!("Delete tithe #{} ({})?", tithe.numero, tithe.donador);
            app.pending_action = Some(PendingAction::DeleteTithe {
                id,
                numero: tithe.numero,
            });
            app.input_mode = InputMode::Confirm;
        }
    }
    Ok(())
}

// ── Attendance grid ──────────────────────────────────────────

fn cmd_fila(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :fila <nombre>");
        return Ok(());
    }
    db.insert_attendance_row(&app.period.id, args)?;
    app.screen = Screen::Attendance;
    app.refresh_attendance(db)?;
    app.set_status(format!("Added row: {args}"));
    Ok(())
}

fn cmd_columna(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :columna <nombre> (e.g. :columna 05/01)");
        return Ok(());
    }
    db.insert_attendance_column(&app.period.id, args)?;
    app.screen = Screen::Attendance;
    app.refresh_attendance(db)?;
    app.set_status(format!("Added column: {args}"));
    Ok(())
}

fn cmd_rename_fila(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if app.screen != Screen::Attendance || app.att_rows.is_empty() {
        app.set_status("Navigate to Asistencia and select a row first");
        return Ok(());
    }
    if args.is_empty() {
        app.set_status("Usage: :rename-fila <nombre>");
        return Ok(());
    }
    if let Some(id) = app.att_rows.get(app.att_row_index).and_then(|r| r.id) {
        db.rename_attendance_row(id, args)?;
        app.refresh_attendance(db)?;
        app.set_status(format!("Renamed row to {args}"));
    }
    Ok(())
}

fn cmd_delete_fila(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if app.screen != Screen::Attendance || app.att_rows.is_empty() {
        app.set_status("Navigate to Asistencia and select a row first");
        return Ok(());
    }
    if let Some(row) = app.att_rows.get(app.att_row_index) {
        if let Some(id) = row.id {
            let nombre = row.nombre.clone();
            app.confirm_message = format!("Delete row '{nombre}' and its counts?");
            app.pending_action = Some(PendingAction::DeleteAttendanceRow { id, nombre });
            app.input_mode = InputMode::Confirm;
        }
    }
    Ok(())
}

fn cmd_delete_columna(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if app.screen != Screen::Attendance || app.att_columns.is_empty() {
        app.set_status("Navigate to Asistencia and select a column first");
        return Ok(());
    }
    if let Some(col) = app.att_columns.get(app.att_col_index) {
        if let Some(id) = col.id {
            let nombre = col.nombre.clone();
            app.confirm_message = format!("Delete column '{nombre}' and its counts?");
            app.pending_action = Some(PendingAction::DeleteAttendanceColumn { id, nombre });
            app.input_mode = InputMode::Confirm;
        }
    }
    Ok(())
}

// ── Discipleship ─────────────────────────────────────────────

fn cmd_participante(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :participante <nombre>");
        return Ok(());
    }
    db.insert_participant(&app.period.id, args)?;
    app.screen = Screen::Discipleship;
    app.refresh_discipleship(db)?;
    app.set_status(format!("Added participant: {args}"));
    Ok(())
}

fn cmd_rename_participante(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if app.screen != Screen::Discipleship || app.participants.is_empty() {
        app.set_status("Navigate to Discipulado and select a participant first");
        return Ok(());
    }
    if args.is_empty() {
        app.set_status("Usage: :rename-participante <nombre>");
        return Ok(());
    }
    if let Some(id) = app.participants.get(app.participant_index).and_then(|p| p.id) {
        db.rename_participant(id, args)?;
        app.refresh_discipleship(db)?;
        app.set_status(format!("Renamed participant to {args}"));
    }
    Ok(())
}

fn cmd_delete_participante(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if app.screen != Screen::Discipleship || app.participants.is_empty() {
        app.set_status("Navigate to Discipulado and select a participant first");
        return Ok(());
    }
    if let Some(p) = app.participants.get(app.participant_index) {
        if let Some(id) = p.id {
            let nombre = p.nombre.clone();
            app.confirm_message = format!("Delete participant '{nombre}' and their marks?");
            app.pending_action = Some(PendingAction::DeleteParticipant { id, nombre });
            app.input_mode = InputMode::Confirm;
        }
    }
    Ok(())
}

fn cmd_reunion(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if !valid_date(args) {
        app.set_status("Usage: :reunion YYYY-MM-DD");
        return Ok(());
    }
    db.insert_meeting_date(&app.period.id, args)?;
    app.screen = Screen::Discipleship;
    app.refresh_discipleship(db)?;
    app.set_status(format!("Added meeting date: {args}"));
    Ok(())
}

fn cmd_delete_reunion(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if app.screen != Screen::Discipleship || app.meeting_dates.is_empty() {
        app.set_status("Navigate to Discipulado and select a date first");
        return Ok(());
    }
    if let Some(d) = app.meeting_dates.get(app.date_index) {
        if let Some(id) = d.id {
            let fecha = d.fecha.clone();
            app.confirm_message = format!("Delete meeting date {fecha} and its marks?");
            app.pending_action = Some(PendingAction::DeleteMeetingDate { id, fecha });
            app.input_mode = InputMode::Confirm;
        }
    }
    Ok(())
}

// ── Inventory ────────────────────────────────────────────────

fn cmd_item(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let parts: Vec<&str> = args.splitn(3, ' ').collect();
    if parts.len() < 3 {
        app.set_status("Usage: :item <codigo> <cantidad> <detalle>");
        return Ok(());
    }
    let cantidad: i64 = match parts[1].parse() {
        Ok(n) => n,
        Err(_) => {
            app.set_status(format!("Invalid quantity: {}", parts[1]));
            return Ok(());
        }
    };

    let mut item = InventoryItem::new(parts[0].to_string(), parts[2].to_string(), cantidad);
    item.ubicacion = app
        .global_config
        .ubicaciones
        .first()
        .cloned()
        .unwrap_or_default();
    item.estado = app
        .global_config
        .estados
        .first()
        .cloned()
        .unwrap_or_default();
    db.insert_inventory_item(&item)?;
    app.screen = Screen::Inventory;
    app.refresh_inventory(db)?;
    app.set_status(format!("Added item: {}", parts[0]));
    Ok(())
}

fn cmd_delete_item(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if app.screen != Screen::Inventory || app.items.is_empty() {
        app.set_status("Navigate to Inventario and select an item first");
        return Ok(());
    }
    if let Some(item) = app.items.get(app.item_index) {
        if let Some(id) = item.id {
            let codigo = item.codigo.clone();
            app.confirm_message = format!("Delete item '{codigo}'?");
            app.pending_action = Some(PendingAction::DeleteItem { id, codigo });
            app.input_mode = InputMode::Confirm;
        }
    }
    Ok(())
}

// ── Payment flow ─────────────────────────────────────────────

fn cmd_tabla(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :tabla <nombre>");
        return Ok(());
    }
    db.insert_payment_table(&PaymentTable::new(args.to_string()))?;
    app.screen = Screen::Payments;
    app.payments_view_rows = false;
    app.refresh_payments(db)?;
    app.set_status(format!("Created payment table: {args}"));
    Ok(())
}

fn cmd_delete_tabla(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if app.screen != Screen::Payments || app.payment_tables.is_empty() {
        app.set_status("Navigate to Pagos and select a table first");
        return Ok(());
    }
    if let Some(table) = app.selected_payment_table() {
        if let Some(id) = table.id {
            let nombre = table.nombre.clone();
            app.confirm_message = format!("Delete table '{nombre}' and all its rows?");
            app.pending_action = Some(PendingAction::DeletePaymentTable { id, nombre });
            app.input_mode = InputMode::Confirm;
        }
    }
    Ok(())
}

fn cmd_pago(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let Some(table_id) = app.selected_payment_table().and_then(|t| t.id) else {
        app.set_status("Create a payment table first with :tabla <nombre>");
        return Ok(());
    };

    let parts: Vec<&str> = args.splitn(3, ' ').collect();
    if parts.len() < 3 {
        app.set_status("Usage: :pago <fecha> <valor> <beneficiarios>");
        return Ok(());
    }
    let (fecha, valor_str, beneficiarios) = (parts[0], parts[1], parts[2]);
    if !valid_date(fecha) {
        app.set_status(format!("Invalid date: {fecha} (use YYYY-MM-DD)"));
        return Ok(());
    }
    let valor = match Decimal::from_str(valor_str) {
        Ok(v) => v,
        Err(_) => {
            app.set_status(format!("Invalid amount: {valor_str}"));
            return Ok(());
        }
    };

    db.insert_payment_row(&PaymentRow::new(
        table_id,
        fecha.to_string(),
        beneficiarios.to_string(),
        valor,
    ))?;
    app.screen = Screen::Payments;
    app.payments_view_rows = true;
    app.refresh_payments(db)?;
    app.set_status(format!("Added payment to {beneficiarios}"));
    Ok(())
}

fn cmd_delete_pago(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if app.screen != Screen::Payments || !app.payments_view_rows || app.payment_rows.is_empty() {
        app.set_status("Open a table's rows first (Enter on a table)");
        return Ok(());
    }
    if let Some(row) = app.payment_rows.get(app.payment_row_index) {
        if let Some(id) = row.id {
            let beneficiarios = row.beneficiarios.clone();
            app.confirm_message = format!("Delete payment to '{beneficiarios}'?");
            app.pending_action = Some(PendingAction::DeletePaymentRow { id, beneficiarios });
            app.input_mode = InputMode::Confirm;
        }
    }
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let Some(table) = app.selected_payment_table().cloned() else {
        app.set_status("Navigate to Pagos and select a table first");
        return Ok(());
    };
    let Some(table_id) = table.id else {
        return Ok(());
    };

    let path = if args.is_empty() {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        let slug = table.nombre.to_lowercase().replace(' ', "-");
        format!("{home}/churchtui-{slug}.html")
    } else {
        crate::run::shellexpand(args)
    };

    let rows = db.get_payment_rows(table_id)?;
    crate::export::write_payment_table(std::path::Path::new(&path), &table, &rows)?;
    app.set_status(format!("Exported {} rows to {path}", rows.len()));
    Ok(())
}

// ── Census ───────────────────────────────────────────────────

fn cmd_persona(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let parts: Vec<&str> = args.splitn(2, ' ').collect();
    if parts.len() < 2 {
        app.set_status("Usage: :persona <cedula> <apellidos y nombres>");
        return Ok(());
    }
    let rec = PersonalRecord::new(parts[0].to_string(), parts[1].to_string());
    db.insert_personal_record(&rec)?;
    app.screen = Screen::Census;
    app.census_view_church = false;
    app.refresh_census(db)?;
    app.set_status(format!("Added census record: {}", parts[1]));
    Ok(())
}

fn cmd_delete_persona(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if app.screen != Screen::Census || app.census_view_church || app.personal_records.is_empty() {
        app.set_status("Navigate to Censo (personal view) and select a record first");
        return Ok(());
    }
    if let Some(rec) = app.personal_records.get(app.census_index) {
        if let Some(id) = rec.id {
            let nombre = rec.apellidos_nombres.clone();
            app.confirm_message = format!("Delete census record '{nombre}'?");
            app.pending_action = Some(PendingAction::DeletePersonalRecord { id, nombre });
            app.input_mode = InputMode::Confirm;
        }
    }
    Ok(())
}

fn cmd_ficha(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :ficha <cedula>");
        return Ok(());
    }
    db.insert_church_record(&ChurchRecord::new(args.to_string()))?;
    app.screen = Screen::Census;
    app.census_view_church = true;
    app.refresh_census(db)?;
    app.set_status(format!("Added church record for {args}"));
    Ok(())
}

fn cmd_delete_ficha(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if app.screen != Screen::Census || !app.census_view_church || app.church_records.is_empty() {
        app.set_status("Navigate to Censo (church view) and select a record first");
        return Ok(());
    }
    if let Some(rec) = app.church_records.get(app.census_index) {
        if let Some(id) = rec.id {
            let cedula = rec.cedula.clone();
            app.confirm_message = format!("Delete church record for {cedula}?");
            app.pending_action = Some(PendingAction::DeleteChurchRecord { id, cedula });
            app.input_mode = InputMode::Confirm;
        }
    }
    Ok(())
}

// ── Option lists ─────────────────────────────────────────────

fn cmd_ministerio(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    add_period_option(args, app, db, "ministerio", |c| &mut c.ministerios)
}

fn cmd_categoria(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    add_period_option(args, app, db, "categoria", |c| &mut c.categorias)
}

fn cmd_detalle(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    add_period_option(args, app, db, "detalle", |c| &mut c.detalles)
}

fn add_period_option(
    args: &str,
    app: &mut App,
    db: &mut Database,
    label: &str,
    list: fn(&mut crate::models::PeriodConfig) -> &mut Vec<String>,
) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status(format!("Usage: :{label} <nombre>"));
        return Ok(());
    }
    let target = list(&mut app.config);
    if target.iter().any(|v| v == args) {
        app.set_status(format!("'{args}' is already in the {label} list"));
        return Ok(());
    }
    target.push(args.to_string());
    db.upsert_period_config(&app.period.id, &app.config)?;
    app.set_status(format!("Added {label}: {args}"));
    Ok(())
}

fn cmd_ubicacion(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :ubicacion <nombre>");
        return Ok(());
    }
    if app.global_config.ubicaciones.iter().any(|v| v == args) {
        app.set_status(format!("'{args}' is already in the location list"));
        return Ok(());
    }
    app.global_config.ubicaciones.push(args.to_string());
    db.update_global_config(&app.global_config)?;
    app.set_status(format!("Added location: {args}"));
    Ok(())
}
