#![allow(clippy::unwrap_used)]

use super::*;

// ── Period ────────────────────────────────────────────────────

#[test]
fn test_period_id_format() {
    assert_eq!(Period::id_for(2025, 1), "2025-01");
    assert_eq!(Period::id_for(2025, 12), "2025-12");
}

#[test]
fn test_period_display_name() {
    assert_eq!(Period::display_name(2025, 1), "Enero 2025");
    assert_eq!(Period::display_name(2024, 12), "Diciembre 2024");
}

#[test]
fn test_period_parse_id() {
    assert_eq!(Period::parse_id("2025-01"), Some((2025, 1)));
    assert_eq!(Period::parse_id("2025-1"), Some((2025, 1)));
    assert_eq!(Period::parse_id("2025-13"), None);
    assert_eq!(Period::parse_id("2025-00"), None);
    assert_eq!(Period::parse_id("garbage"), None);
}

#[test]
fn test_period_parse_id_or_current_defaults_to_today() {
    use chrono::Datelike;
    let now = chrono::Utc::now();
    assert_eq!(
        Period::parse_id_or_current(""),
        Some((now.year(), now.month()))
    );
    assert_eq!(Period::parse_id_or_current("2025-02"), Some((2025, 2)));
    assert_eq!(Period::parse_id_or_current("garbage"), None);
}

#[test]
fn test_new_period_is_active() {
    let p = Period::new(2025, 3);
    assert_eq!(p.id, "2025-03");
    assert_eq!(p.name, "Marzo 2025");
    assert!(p.is_active());
    assert!(p.end_date.is_none());
}

#[test]
fn test_period_status_round_trip() {
    assert_eq!(PeriodStatus::parse("active"), PeriodStatus::Active);
    assert_eq!(PeriodStatus::parse("closed"), PeriodStatus::Closed);
    // Unknown strings fall back to Closed so a bad row never looks active
    assert_eq!(PeriodStatus::parse("whatever"), PeriodStatus::Closed);
}

#[test]
fn test_default_period_config_lists_nonempty() {
    let cfg = PeriodConfig::default();
    assert!(cfg.ministerios.contains(&"Pastoral".to_string()));
    assert!(cfg.categorias.contains(&"Diezmo".to_string()));
    assert!(!cfg.detalles.is_empty());
}

#[test]
fn test_default_global_config_lists_nonempty() {
    let cfg = GlobalConfig::default();
    assert!(cfg.estados.contains(&"Bueno".to_string()));
    assert!(!cfg.ubicaciones.is_empty());
}

// ── Finance enums ─────────────────────────────────────────────

#[test]
fn test_entry_kind_parse() {
    assert_eq!(EntryKind::parse("Ingreso"), EntryKind::Ingreso);
    assert_eq!(EntryKind::parse("ingreso"), EntryKind::Ingreso);
    assert_eq!(EntryKind::parse("Egreso"), EntryKind::Egreso);
    assert_eq!(EntryKind::parse("anything"), EntryKind::Egreso);
}

#[test]
fn test_entry_state_parse() {
    assert_eq!(EntryState::parse("Pendiente"), EntryState::Pendiente);
    assert_eq!(EntryState::parse("Procesado"), EntryState::Procesado);
}

// ── Discipleship marks ────────────────────────────────────────

#[test]
fn test_mark_status_round_trip() {
    for status in [
        MarkStatus::Asistio,
        MarkStatus::Justificado,
        MarkStatus::Falta,
        MarkStatus::Atraso,
    ] {
        assert_eq!(MarkStatus::parse(status.as_str()), status);
        assert!(!status.is_none());
    }
}

#[test]
fn test_mark_status_none_sentinel() {
    assert!(MarkStatus::parse("none").is_none());
    assert!(MarkStatus::parse("").is_none());
    assert!(MarkStatus::parse("X").is_none());
}

#[test]
fn test_mark_status_case_insensitive() {
    assert_eq!(MarkStatus::parse("a"), MarkStatus::Asistio);
    assert_eq!(MarkStatus::parse("at"), MarkStatus::Atraso);
}

// ── Census ────────────────────────────────────────────────────

#[test]
fn test_personal_record_new_defaults() {
    let r = PersonalRecord::new("1712345678".into(), "Pérez Juan".into());
    assert_eq!(r.cedula, "1712345678");
    assert!(!r.es_cristiano);
    assert!(r.edad.is_none());
    assert!(!r.created_at.is_empty());
}

// ── User session record ───────────────────────────────────────

#[test]
fn test_user_serde_round_trip() {
    let user = User {
        cedula: "12345678".into(),
        name: "Pastor Principal".into(),
    };
    let json = serde_json::to_string(&user).unwrap();
    let back: User = serde_json::from_str(&json).unwrap();
    assert_eq!(back, user);
}
