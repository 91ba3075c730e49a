#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal_macros::dec;

fn test_db() -> Database {
    Database::open_in_memory().unwrap()
}

fn entry(period_id: &str, kind: EntryKind, monto: Decimal) -> FinanceEntry {
    FinanceEntry::new(
        period_id.to_string(),
        kind,
        "2025-01-15".to_string(),
        "Pastoral".to_string(),
        "Ofrenda".to_string(),
        monto,
    )
}

#[test]
fn ensure_period_creates_once() {
    let db = test_db();
    assert!(db.ensure_period_exists("2025-01").unwrap());
    assert!(!db.ensure_period_exists("2025-01").unwrap());

    let period = db.get_period_by_id("2025-01").unwrap().unwrap();
    assert_eq!(period.name, "Enero 2025");
    assert_eq!(period.year, 2025);
    assert_eq!(period.month, 1);
    assert_eq!(period.start_date, "2025-01-01T00:00:00+00:00");
    assert!(period.end_date.is_none());
}

// Backfilled and lifecycle-created rows share the start_date format, so
// the closed-period ordering never compares heterogeneous strings.
#[test]
fn period_start_dates_share_one_format() {
    let db = test_db();
    db.ensure_period_exists("2025-01").unwrap();
    db.insert_period(&Period::new(2025, 2)).unwrap();

    for id in ["2025-01", "2025-02"] {
        let period = db.get_period_by_id(id).unwrap().unwrap();
        assert!(
            chrono::DateTime::parse_from_rfc3339(&period.start_date).is_ok(),
            "start_date not RFC 3339: {}",
            period.start_date
        );
    }
}

#[test]
fn ensure_period_rejects_garbage_ids() {
    let db = test_db();
    assert!(db.ensure_period_exists("not-a-month").is_err());
    assert!(db.ensure_period_exists("2025-13").is_err());
    assert!(db.ensure_period_exists("2025").is_err());
}

#[test]
fn ensure_period_never_alters_existing_row() {
    let db = test_db();
    db.ensure_period_exists("2025-01").unwrap();
    db.close_period("2025-01", "2025-02-01").unwrap();

    db.ensure_period_exists("2025-01").unwrap();
    let period = db.get_period_by_id("2025-01").unwrap().unwrap();
    assert_eq!(period.status, PeriodStatus::Closed);
    assert_eq!(period.end_date.as_deref(), Some("2025-02-01"));
}

#[test]
fn closed_periods_newest_first() {
    let db = test_db();
    for id in ["2024-11", "2025-01", "2024-12"] {
        db.ensure_period_exists(id).unwrap();
        db.close_period(id, "2025-06-01").unwrap();
    }
    let closed = db.get_closed_periods().unwrap();
    let ids: Vec<&str> = closed.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["2025-01", "2024-12", "2024-11"]);
}

#[test]
fn active_period_lookup() {
    let db = test_db();
    assert!(db.get_active_period().unwrap().is_none());

    db.insert_period(&Period::new(2025, 3)).unwrap();
    let active = db.get_active_period().unwrap().unwrap();
    assert_eq!(active.id, "2025-03");
    assert!(active.is_active());

    db.close_period("2025-03", "2025-04-01").unwrap();
    assert!(db.get_active_period().unwrap().is_none());
}

#[test]
fn period_config_round_trip() {
    let db = test_db();
    db.ensure_period_exists("2025-01").unwrap();
    assert!(db.get_period_config("2025-01").unwrap().is_none());

    let mut config = PeriodConfig::default();
    db.upsert_period_config("2025-01", &config).unwrap();
    assert_eq!(db.get_period_config("2025-01").unwrap().unwrap(), config);

    config.ministerios.push("Misiones".to_string());
    db.upsert_period_config("2025-01", &config).unwrap();
    let stored = db.get_period_config("2025-01").unwrap().unwrap();
    assert!(stored.ministerios.contains(&"Misiones".to_string()));
}

#[test]
fn global_config_is_seeded_and_editable() {
    let db = test_db();
    let config = db.get_global_config().unwrap();
    assert!(config.estados.contains(&"Bueno".to_string()));

    let mut edited = config.clone();
    edited.ubicaciones.push("Patio".to_string());
    db.update_global_config(&edited).unwrap();
    assert_eq!(db.get_global_config().unwrap(), edited);
}

#[test]
fn finance_crud_and_totals() {
    let db = test_db();
    let id = db
        .insert_finance_entry(&entry("2025-01", EntryKind::Ingreso, dec!(150.00)))
        .unwrap();
    db.insert_finance_entry(&entry("2025-01", EntryKind::Ingreso, dec!(50.00)))
        .unwrap();
    db.insert_finance_entry(&entry("2025-01", EntryKind::Egreso, dec!(30.50)))
        .unwrap();

    let entries = db.get_finance_entries("2025-01").unwrap();
    assert_eq!(entries.len(), 3);

    let (income, expenses) = db.get_finance_totals("2025-01").unwrap();
    assert_eq!(income, dec!(200.00));
    assert_eq!(expenses, dec!(30.50));

    let mut updated = entries[0].clone();
    updated.monto = dec!(100.00);
    updated.estado = EntryState::Pendiente;
    db.update_finance_entry(id, &updated).unwrap();
    let reread = db.get_finance_entries("2025-01").unwrap();
    let changed = reread.iter().find(|e| e.id == Some(id)).unwrap();
    assert_eq!(changed.monto, dec!(100.00));
    assert_eq!(changed.estado, EntryState::Pendiente);

    db.delete_finance_entry(id).unwrap();
    assert_eq!(db.get_finance_entries("2025-01").unwrap().len(), 2);
}

#[test]
fn finance_insert_backfills_period() {
    let db = test_db();
    db.insert_finance_entry(&entry("2025-02", EntryKind::Egreso, dec!(10)))
        .unwrap();
    assert!(db.get_period_by_id("2025-02").unwrap().is_some());
}

#[test]
fn finance_entries_scoped_to_period() {
    let db = test_db();
    db.insert_finance_entry(&entry("2025-01", EntryKind::Ingreso, dec!(10)))
        .unwrap();
    db.insert_finance_entry(&entry("2025-02", EntryKind::Ingreso, dec!(20)))
        .unwrap();
    assert_eq!(db.get_finance_entries("2025-01").unwrap().len(), 1);
    assert_eq!(db.get_finance_entries("2025-02").unwrap().len(), 1);
}

#[test]
fn tithe_numbers_start_at_one_per_period() {
    let db = test_db();
    let t1 = db
        .insert_tithe(&Tithe::new(
            "2025-01".to_string(),
            "2025-01-05".to_string(),
            "Juan Pérez".to_string(),
            dec!(50.00),
        ))
        .unwrap();
    let t2 = db
        .insert_tithe(&Tithe::new(
            "2025-01".to_string(),
            "2025-01-12".to_string(),
            "María García".to_string(),
            dec!(75.00),
        ))
        .unwrap();
    assert_eq!(t1.numero, 1);
    assert_eq!(t2.numero, 2);

    // Numbering restarts in a different period
    let other = db
        .insert_tithe(&Tithe::new(
            "2025-02".to_string(),
            "2025-02-02".to_string(),
            "Juan Pérez".to_string(),
            dec!(60.00),
        ))
        .unwrap();
    assert_eq!(other.numero, 1);
}

#[test]
fn tithe_numbers_never_reused_after_delete() {
    let db = test_db();
    let mk = |fecha: &str| {
        Tithe::new(
            "2025-01".to_string(),
            fecha.to_string(),
            "Donador".to_string(),
            dec!(10),
        )
    };
    db.insert_tithe(&mk("2025-01-01")).unwrap();
    let t2 = db.insert_tithe(&mk("2025-01-02")).unwrap();
    db.insert_tithe(&mk("2025-01-03")).unwrap();

    // Deleting a middle receipt leaves a gap; the next number still grows
    db.delete_tithe(t2.id.unwrap()).unwrap();
    assert_eq!(db.next_tithe_numero("2025-01").unwrap(), 4);
    let t4 = db.insert_tithe(&mk("2025-01-04")).unwrap();
    assert_eq!(t4.numero, 4);

    let numeros: Vec<i64> = db
        .get_tithes("2025-01")
        .unwrap()
        .iter()
        .map(|t| t.numero)
        .collect();
    assert_eq!(numeros, vec![1, 3, 4]);
}

#[test]
fn tithe_update_keeps_numero() {
    let db = test_db();
    let t = db
        .insert_tithe(&Tithe::new(
            "2025-01".to_string(),
            "2025-01-05".to_string(),
            "Juan".to_string(),
            dec!(50),
        ))
        .unwrap();
    let mut edited = t.clone();
    edited.donador = "Juan Pérez".to_string();
    edited.valor = dec!(55);
    db.update_tithe(t.id.unwrap(), &edited).unwrap();

    let stored = &db.get_tithes("2025-01").unwrap()[0];
    assert_eq!(stored.numero, 1);
    assert_eq!(stored.donador, "Juan Pérez");
    assert_eq!(stored.valor, dec!(55));
}

#[test]
fn tithe_total() {
    let db = test_db();
    for valor in [dec!(50.00), dec!(75.50)] {
        db.insert_tithe(&Tithe::new(
            "2025-01".to_string(),
            "2025-01-05".to_string(),
            "Donador".to_string(),
            valor,
        ))
        .unwrap();
    }
    assert_eq!(db.get_tithe_total("2025-01").unwrap(), dec!(125.50));
    assert_eq!(db.get_tithe_total("2025-02").unwrap(), Decimal::ZERO);
}

#[test]
fn attendance_rows_and_columns_keep_order() {
    let db = test_db();
    db.seed_attendance_rows("2025-01").unwrap();
    let rows = db.get_attendance_rows("2025-01").unwrap();
    assert_eq!(rows.len(), DEFAULT_ATTENDANCE_ROWS.len());
    assert_eq!(rows[0].nombre, "HOMBRES ASIST. GRAL");
    assert_eq!(rows[0].orden, 0);

    // Seeding is a no-op once rows exist
    db.seed_attendance_rows("2025-01").unwrap();
    assert_eq!(
        db.get_attendance_rows("2025-01").unwrap().len(),
        DEFAULT_ATTENDANCE_ROWS.len()
    );

    db.insert_attendance_column("2025-01", "05/01").unwrap();
    db.insert_attendance_column("2025-01", "12/01").unwrap();
    let cols = db.get_attendance_columns("2025-01").unwrap();
    assert_eq!(cols[0].orden, 0);
    assert_eq!(cols[1].orden, 1);
}

#[test]
fn attendance_row_rename_keeps_order_and_cells() {
    let db = test_db();
    let row = db.insert_attendance_row("2025-01", "HOMBRES").unwrap();
    db.insert_attendance_row("2025-01", "MUJERES").unwrap();
    let col = db.insert_attendance_column("2025-01", "05/01").unwrap();
    db.upsert_attendance_cell("2025-01", row, col, 12).unwrap();

    db.rename_attendance_row(row, "HOMBRES ASIST. GRAL").unwrap();

    let rows = db.get_attendance_rows("2025-01").unwrap();
    assert_eq!(rows[0].nombre, "HOMBRES ASIST. GRAL");
    assert_eq!(rows[0].orden, 0);
    assert_eq!(db.get_attendance_cells("2025-01").unwrap()[0].cantidad, 12);
}

#[test]
fn attendance_cell_zero_deletes() {
    let db = test_db();
    let row = db.insert_attendance_row("2025-01", "HOMBRES").unwrap();
    let col = db.insert_attendance_column("2025-01", "05/01").unwrap();

    db.upsert_attendance_cell("2025-01", row, col, 25).unwrap();
    assert_eq!(db.get_attendance_cells("2025-01").unwrap().len(), 1);

    db.upsert_attendance_cell("2025-01", row, col, 30).unwrap();
    let cells = db.get_attendance_cells("2025-01").unwrap();
    assert_eq!(cells.len(), 1);
    assert_eq!(cells[0].cantidad, 30);

    db.upsert_attendance_cell("2025-01", row, col, 0).unwrap();
    assert!(db.get_attendance_cells("2025-01").unwrap().is_empty());

    // Zero against a missing cell is a no-op, not an error
    db.upsert_attendance_cell("2025-01", row, col, 0).unwrap();
}

#[test]
fn deleting_attendance_row_cascades_cells() {
    let db = test_db();
    let row = db.insert_attendance_row("2025-01", "HOMBRES").unwrap();
    let col = db.insert_attendance_column("2025-01", "05/01").unwrap();
    db.upsert_attendance_cell("2025-01", row, col, 12).unwrap();

    db.delete_attendance_row(row).unwrap();
    assert!(db.get_attendance_cells("2025-01").unwrap().is_empty());

    let row2 = db.insert_attendance_row("2025-01", "MUJERES").unwrap();
    db.upsert_attendance_cell("2025-01", row2, col, 8).unwrap();
    db.delete_attendance_column(col).unwrap();
    assert!(db.get_attendance_cells("2025-01").unwrap().is_empty());
}

#[test]
fn mark_none_deletes() {
    let db = test_db();
    let p = db.insert_participant("2025-01", "Ana Torres").unwrap();
    let d = db.insert_meeting_date("2025-01", "2025-01-08").unwrap();

    db.upsert_mark("2025-01", p, d, MarkStatus::Asistio).unwrap();
    assert_eq!(db.get_marks("2025-01").unwrap().len(), 1);

    db.upsert_mark("2025-01", p, d, MarkStatus::Atraso).unwrap();
    let marks = db.get_marks("2025-01").unwrap();
    assert_eq!(marks.len(), 1);
    assert_eq!(marks[0].status, MarkStatus::Atraso);

    db.upsert_mark("2025-01", p, d, MarkStatus::None).unwrap();
    assert!(db.get_marks("2025-01").unwrap().is_empty());

    db.upsert_mark("2025-01", p, d, MarkStatus::None).unwrap();
}

#[test]
fn participant_rename_keeps_marks() {
    let db = test_db();
    let p = db.insert_participant("2025-01", "Ana").unwrap();
    let d = db.insert_meeting_date("2025-01", "2025-01-08").unwrap();
    db.upsert_mark("2025-01", p, d, MarkStatus::Asistio).unwrap();

    db.rename_participant(p, "Ana Torres").unwrap();

    let stored = db.get_participants("2025-01").unwrap();
    assert_eq!(stored[0].nombre, "Ana Torres");
    assert_eq!(db.get_marks("2025-01").unwrap().len(), 1);
}

#[test]
fn deleting_participant_cascades_marks() {
    let db = test_db();
    let p = db.insert_participant("2025-01", "Ana").unwrap();
    let d = db.insert_meeting_date("2025-01", "2025-01-08").unwrap();
    db.upsert_mark("2025-01", p, d, MarkStatus::Falta).unwrap();

    db.delete_participant(p).unwrap();
    assert!(db.get_marks("2025-01").unwrap().is_empty());
    assert!(db.get_participants("2025-01").unwrap().is_empty());
}

#[test]
fn replace_discipleship_rebuilds_dataset() {
    let mut db = test_db();
    let old = db.insert_participant("2025-01", "Viejo").unwrap();
    let od = db.insert_meeting_date("2025-01", "2025-01-01").unwrap();
    db.upsert_mark("2025-01", old, od, MarkStatus::Asistio)
        .unwrap();

    let participants = vec!["Ana Torres".to_string(), "Luis Mora".to_string()];
    let dates = vec!["2025-01-08".to_string(), "2025-01-15".to_string()];
    let marks = vec![
        (
            "Ana Torres".to_string(),
            "2025-01-08".to_string(),
            MarkStatus::Asistio,
        ),
        (
            "Luis Mora".to_string(),
            "2025-01-08".to_string(),
            MarkStatus::Justificado,
        ),
        // none entries are dropped, not stored
        (
            "Luis Mora".to_string(),
            "2025-01-15".to_string(),
            MarkStatus::None,
        ),
    ];
    db.replace_discipleship("2025-01", &participants, &dates, &marks)
        .unwrap();

    let stored_participants = db.get_participants("2025-01").unwrap();
    assert_eq!(stored_participants.len(), 2);
    assert!(stored_participants.iter().all(|p| p.nombre != "Viejo"));
    assert_eq!(db.get_meeting_dates("2025-01").unwrap().len(), 2);
    assert_eq!(db.get_marks("2025-01").unwrap().len(), 2);
}

#[test]
fn inventory_crud() {
    let db = test_db();
    let mut item = InventoryItem::new(
        "INV-001".to_string(),
        "Micrófono inalámbrico".to_string(),
        2,
    );
    item.ubicacion = "Santuario Principal".to_string();
    item.estado = "Bueno".to_string();
    let id = db.insert_inventory_item(&item).unwrap();

    let items = db.get_inventory_items().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].codigo, "INV-001");

    let mut edited = items[0].clone();
    edited.estado = "En Reparación".to_string();
    db.update_inventory_item(id, &edited).unwrap();
    assert_eq!(db.get_inventory_items().unwrap()[0].estado, "En Reparación");

    db.delete_inventory_item(id).unwrap();
    assert!(db.get_inventory_items().unwrap().is_empty());
}

#[test]
fn payment_tables_and_rows() {
    let db = test_db();
    let table_id = db
        .insert_payment_table(&PaymentTable::new("Pagos Enero".to_string()))
        .unwrap();

    db.insert_payment_row(&PaymentRow::new(
        table_id,
        "2025-01-20".to_string(),
        "Proveedor B".to_string(),
        dec!(200.00),
    ))
    .unwrap();
    db.insert_payment_row(&PaymentRow::new(
        table_id,
        "2025-01-10".to_string(),
        "Proveedor A".to_string(),
        dec!(100.00),
    ))
    .unwrap();

    // Rows come back in date order regardless of insertion order
    let rows = db.get_payment_rows(table_id).unwrap();
    assert_eq!(rows[0].beneficiarios, "Proveedor A");
    assert_eq!(rows[1].beneficiarios, "Proveedor B");

    db.rename_payment_table(table_id, "Pagos Enero 2025").unwrap();
    assert_eq!(db.get_payment_tables().unwrap()[0].nombre, "Pagos Enero 2025");

    let mut edited = rows[0].clone();
    edited.valor = dec!(150.00);
    edited.detalle = "Ajuste de factura".to_string();
    db.update_payment_row(edited.id.unwrap(), &edited).unwrap();
    let reread = db.get_payment_rows(table_id).unwrap();
    assert_eq!(reread[0].valor, dec!(150.00));
    assert_eq!(reread[0].detalle, "Ajuste de factura");

    db.delete_payment_table(table_id).unwrap();
    assert!(db.get_payment_tables().unwrap().is_empty());
    assert!(db.get_payment_rows(table_id).unwrap().is_empty());
}

#[test]
fn census_personal_crud() {
    let db = test_db();
    let mut rec = PersonalRecord::new("0912345678".to_string(), "Torres, Ana".to_string());
    rec.es_cristiano = true;
    rec.ciudad = Some("Guayaquil".to_string());
    let id = db.insert_personal_record(&rec).unwrap();

    let stored = db.get_personal_records().unwrap();
    assert_eq!(stored.len(), 1);
    assert!(stored[0].es_cristiano);
    assert_eq!(stored[0].ciudad.as_deref(), Some("Guayaquil"));

    let mut edited = stored[0].clone();
    edited.bautizo = true;
    db.update_personal_record(id, &edited).unwrap();
    assert!(db.get_personal_records().unwrap()[0].bautizo);

    db.delete_personal_record(id).unwrap();
    assert!(db.get_personal_records().unwrap().is_empty());
}

#[test]
fn census_church_crud() {
    let db = test_db();
    let mut rec = ChurchRecord::new("0912345678".to_string());
    rec.cargo = Some("Diácono".to_string());
    rec.sueldo = Some(dec!(450.00));
    let id = db.insert_church_record(&rec).unwrap();

    let stored = db.get_church_records().unwrap();
    assert_eq!(stored[0].cargo.as_deref(), Some("Diácono"));
    assert_eq!(stored[0].sueldo, Some(dec!(450.00)));

    let mut edited = stored[0].clone();
    edited.cargo = Some("Anciano".to_string());
    edited.sueldo = Some(dec!(500.00));
    db.update_church_record(id, &edited).unwrap();
    let reread = db.get_church_records().unwrap();
    assert_eq!(reread[0].cargo.as_deref(), Some("Anciano"));
    assert_eq!(reread[0].sueldo, Some(dec!(500.00)));

    db.delete_church_record(id).unwrap();
    assert!(db.get_church_records().unwrap().is_empty());
}

#[test]
fn migrate_is_idempotent_on_existing_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("church.db");
    {
        let db = Database::open(&path).unwrap();
        db.ensure_period_exists("2025-01").unwrap();
    }
    let db = Database::open(&path).unwrap();
    assert!(db.get_period_by_id("2025-01").unwrap().is_some());
}
