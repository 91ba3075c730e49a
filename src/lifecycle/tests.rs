#![allow(clippy::unwrap_used)]

use super::*;
use crate::models::{EntryKind, FinanceEntry, PeriodStatus, Tithe};
use rust_decimal_macros::dec;

fn test_db() -> Database {
    Database::open_in_memory().unwrap()
}

#[test]
fn initial_period_created_on_demand() {
    let db = test_db();
    assert!(active_period(&db).unwrap().is_none());

    let period = active_or_initial_period(&db).unwrap();
    assert!(period.is_active());
    assert!(db.get_period_config(&period.id).unwrap().is_some());
    assert!(!db.get_attendance_rows(&period.id).unwrap().is_empty());

    // Second call returns the same period, it does not create another
    let again = active_or_initial_period(&db).unwrap();
    assert_eq!(again.id, period.id);
}

#[test]
fn at_most_one_active_period() {
    let mut db = test_db();
    start_new_period(&mut db, 2025, 1).unwrap();
    start_new_period(&mut db, 2025, 2).unwrap();
    start_new_period(&mut db, 2025, 3).unwrap();

    let active = active_period(&db).unwrap().unwrap();
    assert_eq!(active.id, "2025-03");
    assert_eq!(closed_periods(&db).unwrap().len(), 2);
}

#[test]
fn archived_period_keeps_its_records() {
    let mut db = test_db();
    start_new_period(&mut db, 2025, 1).unwrap();
    db.insert_finance_entry(&FinanceEntry::new(
        "2025-01".to_string(),
        EntryKind::Ingreso,
        "2025-01-15".to_string(),
        "Pastoral".to_string(),
        "Ofrenda".to_string(),
        dec!(150.00),
    ))
    .unwrap();

    start_new_period(&mut db, 2025, 2).unwrap();

    let archived = db.get_period_by_id("2025-01").unwrap().unwrap();
    assert_eq!(archived.status, PeriodStatus::Closed);
    assert!(archived.end_date.is_some());
    assert_eq!(db.get_finance_entries("2025-01").unwrap().len(), 1);
    assert!(db.get_finance_entries("2025-02").unwrap().is_empty());
}

#[test]
fn config_copied_by_value_not_shared() {
    let mut db = test_db();
    start_new_period(&mut db, 2025, 1).unwrap();

    let mut config = db.get_period_config("2025-01").unwrap().unwrap();
    config.ministerios.push("Misiones".to_string());
    db.upsert_period_config("2025-01", &config).unwrap();

    start_new_period(&mut db, 2025, 2).unwrap();
    let inherited = db.get_period_config("2025-02").unwrap().unwrap();
    assert!(inherited.ministerios.contains(&"Misiones".to_string()));

    // Editing the new month's lists must not reach back into the archive
    let mut edited = inherited.clone();
    edited.categorias.push("Construcción".to_string());
    db.upsert_period_config("2025-02", &edited).unwrap();

    let archived = db.get_period_config("2025-01").unwrap().unwrap();
    assert!(!archived.categorias.contains(&"Construcción".to_string()));
}

#[test]
fn start_new_period_rejects_duplicates() {
    let mut db = test_db();
    start_new_period(&mut db, 2025, 1).unwrap();
    assert!(start_new_period(&mut db, 2025, 1).is_err());
    assert!(start_new_period(&mut db, 2025, 13).is_err());

    // The failed attempts changed nothing
    assert_eq!(active_period(&db).unwrap().unwrap().id, "2025-01");
    assert!(closed_periods(&db).unwrap().is_empty());
}

#[test]
fn close_without_replacement() {
    let mut db = test_db();
    start_new_period(&mut db, 2025, 1).unwrap();

    let closed = close_current_period(&db).unwrap().unwrap();
    assert_eq!(closed.status, PeriodStatus::Closed);
    assert!(closed.end_date.is_some());
    assert!(active_period(&db).unwrap().is_none());

    // Idempotent: closing again is a quiet no-op
    assert!(close_current_period(&db).unwrap().is_none());
}

// Closing the only month leaves the current calendar month's row closed;
// the fallback must hand that row back rather than try to recreate it.
#[test]
fn closing_current_calendar_month_keeps_it_reachable() {
    let db = test_db();
    let period = active_or_initial_period(&db).unwrap();
    close_current_period(&db).unwrap().unwrap();

    let after = active_or_initial_period(&db).unwrap();
    assert_eq!(after.id, period.id);
    assert_eq!(after.status, PeriodStatus::Closed);
    assert!(active_period(&db).unwrap().is_none());
}

#[test]
fn ensure_period_exists_is_idempotent() {
    let db = test_db();
    assert!(ensure_period_exists(&db, "2025-05").unwrap());
    assert!(!ensure_period_exists(&db, "2025-05").unwrap());
    assert!(ensure_period_exists(&db, "bogus").is_err());
}

// The full month cycle: open January, record tithes numbered from 1,
// archive it by starting February, and verify the archive is intact.
#[test]
fn full_month_cycle() {
    let mut db = test_db();
    let enero = start_new_period(&mut db, 2025, 1).unwrap();
    assert_eq!(enero.name, "Enero 2025");

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
    assert_eq!((t1.numero, t2.numero), (1, 2));

    let febrero = start_new_period(&mut db, 2025, 2).unwrap();
    assert_eq!(febrero.name, "Febrero 2025");
    assert!(db.get_tithes("2025-02").unwrap().is_empty());
    assert_eq!(db.next_tithe_numero("2025-02").unwrap(), 1);

    let archived = db.get_tithes("2025-01").unwrap();
    assert_eq!(archived.len(), 2);
    assert_eq!(db.get_tithe_total("2025-01").unwrap(), dec!(125.00));
}
