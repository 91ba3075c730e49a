//! Period lifecycle: one active month at a time, archived months immutable,
//! option lists carried forward by value when a new month starts.

use anyhow::{bail, Result};
use chrono::{Datelike, Utc};

use crate::db::Database;
use crate::models::{Period, PeriodConfig};

pub(crate) fn active_period(db: &Database) -> Result<Option<Period>> {
    db.get_active_period()
}

/// Archived months, newest first.
pub(crate) fn closed_periods(db: &Database) -> Result<Vec<Period>> {
    db.get_closed_periods()
}

/// Fetch the active period, falling back to the current calendar month when
/// nothing is active: a row for that month is returned as-is if one exists
/// (it may be closed, e.g. right after `close_current_period`), otherwise a
/// fresh month is created with the default option lists and the standard
/// attendance row labels.
pub(crate) fn active_or_initial_period(db: &Database) -> Result<Period> {
    if let Some(period) = db.get_active_period()? {
        return Ok(period);
    }
    let now = Utc::now();
    if let Some(existing) = db.get_period_by_id(&Period::id_for(now.year(), now.month()))? {
        return Ok(existing);
    }
    let period = Period::new(now.year(), now.month());
    db.insert_period(&period)?;
    db.upsert_period_config(&period.id, &PeriodConfig::default())?;
    db.seed_attendance_rows(&period.id)?;
    Ok(period)
}

/// Archive the active month and open the given one in its place. The new
/// month inherits a value copy of the predecessor's option lists; the
/// archived month keeps its own snapshot untouched.
pub(crate) fn start_new_period(db: &mut Database, year: i32, month: u32) -> Result<Period> {
    if !(1..=12).contains(&month) {
        bail!("Invalid month: {month}");
    }
    let new_id = Period::id_for(year, month);
    if db.get_period_by_id(&new_id)?.is_some() {
        bail!("Period {new_id} already exists");
    }

    let current = db.get_active_period()?;
    let config = match &current {
        Some(p) => db.get_period_config(&p.id)?.unwrap_or_default(),
        None => PeriodConfig::default(),
    };

    let period = Period::new(year, month);
    let end_date = Utc::now().to_rfc3339();
    db.archive_and_create(
        current.as_ref().map(|p| (p.id.as_str(), end_date.as_str())),
        &period,
        &config,
    )?;
    db.seed_attendance_rows(&period.id)?;
    Ok(period)
}

/// Close the active month without opening a replacement. Idempotent: with
/// no active month this is a no-op.
pub(crate) fn close_current_period(db: &Database) -> Result<Option<Period>> {
    let Some(current) = db.get_active_period()? else {
        return Ok(None);
    };
    db.close_period(&current.id, &Utc::now().to_rfc3339())?;
    db.get_period_by_id(&current.id)
}

/// Guarantee a period row exists for the given "YYYY-MM" id before a module
/// writes records under it. Returns true when the row was created.
pub(crate) fn ensure_period_exists(db: &Database, period_id: &str) -> Result<bool> {
    db.ensure_period_exists(period_id)
}

#[cfg(test)]
mod tests;
