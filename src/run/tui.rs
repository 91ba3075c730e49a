use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::Path;

use crate::db::Database;
use crate::lifecycle;
use crate::models::{MarkStatus, User};
use crate::ui::app::{App, InputMode, PendingAction, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(db: &mut Database, user: User, data_dir: &Path) -> Result<()> {
    let period = lifecycle::active_or_initial_period(db)?;
    let mut app = App::new(user, period, data_dir.to_path_buf());
    app.refresh_all(db)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, db);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    db: &mut Database,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // 1 tab + 1 status + 1 cmd + 2 borders + 1 header
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, db)?,
                InputMode::Command => handle_command_input(key, app, db)?,
                InputMode::Editing => handle_editing_input(key, app, db)?,
                InputMode::Confirm => handle_confirm_input(key, app, db)?,
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('h') | KeyCode::Left => handle_move_left(app),
        KeyCode::Char('l') | KeyCode::Right => handle_move_right(app),
        KeyCode::Char('1') => switch_screen(app, db, Screen::Dashboard)?,
        KeyCode::Char('2') => switch_screen(app, db, Screen::Finance)?,
        KeyCode::Char('3') => switch_screen(app, db, Screen::Tithes)?,
        KeyCode::Char('4') => switch_screen(app, db, Screen::Attendance)?,
        KeyCode::Char('5') => switch_screen(app, db, Screen::Discipleship)?,
        KeyCode::Char('6') => switch_screen(app, db, Screen::Inventory)?,
        KeyCode::Char('7') => switch_screen(app, db, Screen::Payments)?,
        KeyCode::Char('8') => switch_screen(app, db, Screen::Census)?,
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            switch_screen(app, db, screens[(idx + 1) % screens.len()])?;
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            switch_screen(app, db, screens[prev])?;
        }
        KeyCode::Enter => handle_enter(app, db)?,
        KeyCode::Esc => handle_escape(app),
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app),
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Char('r') if app.screen == Screen::Census => {
            app.census_view_church = !app.census_view_church;
            app.census_index = 0;
            app.census_scroll = 0;
        }
        KeyCode::Char('D') => {
            let cmd = match app.screen {
                Screen::Finance => Some("delete-entry"),
                Screen::Tithes => Some("delete-diezmo"),
                Screen::Attendance => Some("delete-fila"),
                Screen::Discipleship => Some("delete-participante"),
                Screen::Inventory => Some("delete-item"),
                Screen::Payments => {
                    if app.payments_view_rows {
                        Some("delete-pago")
                    } else {
                        Some("delete-tabla")
                    }
                }
                Screen::Census => {
                    if app.census_view_church {
                        Some("delete-ficha")
                    } else {
                        Some("delete-persona")
                    }
                }
                Screen::Dashboard => None,
            };
            if let Some(cmd) = cmd {
                commands::handle_command(cmd, app, db)?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, db)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

/// Editing mode is only entered from the attendance grid; the buffer holds
/// the new cell count.
fn handle_editing_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.command_input.clear();
            app.input_mode = InputMode::Normal;

            if let Some((row_id, column_id)) = app.editing_cell.take() {
                // Empty input clears the cell, same as zero
                let cantidad: i64 = if input.is_empty() {
                    0
                } else {
                    match input.parse() {
                        Ok(n) => n,
                        Err(_) => {
                            app.set_status(format!("Invalid count: {input}"));
                            return Ok(());
                        }
                    }
                };
                db.upsert_attendance_cell(&app.period.id, row_id, column_id, cantidad)?;
                app.refresh_attendance(db)?;
                if cantidad == 0 {
                    app.set_status("Cell cleared");
                } else {
                    app.set_status(format!("Count set to {cantidad}"));
                }
            }
        }
        KeyCode::Esc => {
            app.command_input.clear();
            app.editing_cell = None;
            app.input_mode = InputMode::Normal;
            app.set_status("Edit cancelled");
        }
        KeyCode::Backspace => {
            app.command_input.pop();
        }
        KeyCode::Char(c) if c.is_ascii_digit() => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(action) = app.pending_action.take() {
                run_pending_action(action, app, db)?;
            }
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
        }
        _ => {
            // Any other key = cancel
            app.pending_action = None;
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            app.set_status("Cancelled");
        }
    }
    Ok(())
}

fn run_pending_action(action: PendingAction, app: &mut App, db: &mut Database) -> Result<()> {
    match action {
        PendingAction::StartMonth { year, month } => {
            let old_name = app.period.name.clone();
            app.period = lifecycle::start_new_period(db, year, month)?;
            app.refresh_all(db)?;
            app.screen = Screen::Dashboard;
            app.set_status(format!("Archived {old_name}; started {}", app.period.name));
        }
        PendingAction::CloseMonth => {
            let closed = lifecycle::close_current_period(db)?;
            // With nothing active, fall back to the current calendar month;
            // it may itself be the month just closed.
            app.period = lifecycle::active_or_initial_period(db)?;
            app.refresh_all(db)?;
            app.screen = Screen::Dashboard;
            match closed {
                Some(p) if app.period.is_active() => {
                    app.set_status(format!("Closed {}; now in {}", p.name, app.period.name));
                }
                Some(p) => app.set_status(format!(
                    "Closed {}; open a new month with :start-month",
                    p.name
                )),
                None => app.set_status("No active month to close"),
            }
        }
        PendingAction::DeleteEntry { id, detalle } => {
            db.delete_finance_entry(id)?;
            app.refresh_finance(db)?;
            app.refresh_dashboard(db)?;
            app.set_status(format!("Deleted entry: {detalle}"));
        }
        PendingAction::DeleteTithe { id, numero } => {
            db.delete_tithe(id)?;
            app.refresh_tithes(db)?;
            app.refresh_dashboard(db)?;
            app.set_status(format!("Deleted tithe #{numero}"));
        }
        PendingAction::DeleteAttendanceRow { id, nombre } => {
            db.delete_attendance_row(id)?;
            app.refresh_attendance(db)?;
            app.set_status(format!("Deleted row: {nombre}"));
        }
        PendingAction::DeleteAttendanceColumn { id, nombre } => {
            db.delete_attendance_column(id)?;
            app.refresh_attendance(db)?;
            app.set_status(format!("Deleted column: {nombre}"));
        }
        PendingAction::DeleteParticipant { id, nombre } => {
            db.delete_participant(id)?;
            app.refresh_discipleship(db)?;
            app.set_status(format!("Deleted participant: {nombre}"));
        }
        PendingAction::DeleteMeetingDate { id, fecha } => {
            db.delete_meeting_date(id)?;
            app.refresh_discipleship(db)?;
            app.set_status(format!("Deleted meeting date: {fecha}"));
        }
        PendingAction::DeleteItem { id, codigo } => {
            db.delete_inventory_item(id)?;
            app.refresh_inventory(db)?;
            app.set_status(format!("Deleted item: {codigo}"));
        }
        PendingAction::DeletePaymentTable { id, nombre } => {
            db.delete_payment_table(id)?;
            app.payments_view_rows = false;
            app.refresh_payments(db)?;
            app.set_status(format!("Deleted table: {nombre}"));
        }
        PendingAction::DeletePaymentRow { id, beneficiarios } => {
            db.delete_payment_row(id)?;
            app.refresh_payments(db)?;
            app.set_status(format!("Deleted payment to {beneficiarios}"));
        }
        PendingAction::DeletePersonalRecord { id, nombre } => {
            db.delete_personal_record(id)?;
            app.refresh_census(db)?;
            app.set_status(format!("Deleted census record: {nombre}"));
        }
        PendingAction::DeleteChurchRecord { id, cedula } => {
            db.delete_church_record(id)?;
            app.refresh_census(db)?;
            app.set_status(format!("Deleted church record for {cedula}"));
        }
    }
    Ok(())
}

// ── Navigation helpers ───────────────────────────────────────

fn switch_screen(app: &mut App, db: &mut Database, screen: Screen) -> Result<()> {
    app.screen = screen;
    match screen {
        Screen::Dashboard => app.refresh_dashboard(db)?,
        Screen::Finance => app.refresh_finance(db)?,
        Screen::Tithes => app.refresh_tithes(db)?,
        Screen::Attendance => app.refresh_attendance(db)?,
        Screen::Discipleship => app.refresh_discipleship(db)?,
        Screen::Inventory => app.refresh_inventory(db)?,
        Screen::Payments => {
            app.payments_view_rows = false;
            app.refresh_payments(db)?;
        }
        Screen::Census => app.refresh_census(db)?,
    }
    Ok(())
}

fn handle_move_down(app: &mut App) {
    let page = app.visible_rows.max(1);
    match app.screen {
        Screen::Finance => scroll_down(
            &mut app.entry_index,
            &mut app.entry_scroll,
            app.entries.len(),
            page,
        ),
        Screen::Tithes => scroll_down(
            &mut app.tithe_index,
            &mut app.tithe_scroll,
            app.tithes.len(),
            page,
        ),
        Screen::Attendance => {
            if app.att_row_index + 1 < app.att_rows.len() {
                app.att_row_index += 1;
            }
        }
        Screen::Discipleship => {
            if app.participant_index + 1 < app.participants.len() {
                app.participant_index += 1;
            }
        }
        Screen::Inventory => scroll_down(
            &mut app.item_index,
            &mut app.item_scroll,
            app.items.len(),
            page,
        ),
        Screen::Payments => {
            if app.payments_view_rows {
                if app.payment_row_index + 1 < app.payment_rows.len() {
                    app.payment_row_index += 1;
                }
            } else if app.payment_table_index + 1 < app.payment_tables.len() {
                app.payment_table_index += 1;
            }
        }
        Screen::Census => {
            let len = if app.census_view_church {
                app.church_records.len()
            } else {
                app.personal_records.len()
            };
            scroll_down(&mut app.census_index, &mut app.census_scroll, len, page);
        }
        Screen::Dashboard => {}
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Finance => scroll_up(&mut app.entry_index, &mut app.entry_scroll),
        Screen::Tithes => scroll_up(&mut app.tithe_index, &mut app.tithe_scroll),
        Screen::Attendance => app.att_row_index = app.att_row_index.saturating_sub(1),
        Screen::Discipleship => app.participant_index = app.participant_index.saturating_sub(1),
        Screen::Inventory => scroll_up(&mut app.item_index, &mut app.item_scroll),
        Screen::Payments => {
            if app.payments_view_rows {
                app.payment_row_index = app.payment_row_index.saturating_sub(1);
            } else {
                app.payment_table_index = app.payment_table_index.saturating_sub(1);
            }
        }
        Screen::Census => scroll_up(&mut app.census_index, &mut app.census_scroll),
        Screen::Dashboard => {}
    }
}

fn handle_move_left(app: &mut App) {
    match app.screen {
        Screen::Attendance => app.att_col_index = app.att_col_index.saturating_sub(1),
        Screen::Discipleship => app.date_index = app.date_index.saturating_sub(1),
        _ => {}
    }
}

fn handle_move_right(app: &mut App) {
    match app.screen {
        Screen::Attendance => {
            if app.att_col_index + 1 < app.att_columns.len() {
                app.att_col_index += 1;
            }
        }
        Screen::Discipleship => {
            if app.date_index + 1 < app.meeting_dates.len() {
                app.date_index += 1;
            }
        }
        _ => {}
    }
}

fn handle_enter(app: &mut App, db: &mut Database) -> Result<()> {
    match app.screen {
        Screen::Attendance => {
            if let Some((row_id, column_id)) = app.selected_att_cell_ids() {
                app.editing_cell = Some((row_id, column_id));
                app.command_input = app
                    .attendance_count(row_id, column_id)
                    .map(|n| n.to_string())
                    .unwrap_or_default();
                app.input_mode = InputMode::Editing;
            }
        }
        Screen::Discipleship => {
            if let Some((participant_id, date_id)) = app.selected_mark_ids() {
                let next = cycle_mark(app.mark_status(participant_id, date_id));
                db.upsert_mark(&app.period.id, participant_id, date_id, next)?;
                app.refresh_discipleship(db)?;
            }
        }
        Screen::Payments => {
            if !app.payments_view_rows && !app.payment_tables.is_empty() {
                app.payments_view_rows = true;
                app.payment_row_index = 0;
                app.refresh_payments(db)?;
            }
        }
        _ => {}
    }
    Ok(())
}

/// Mark cycle: blank → A → J → F → AT → blank.
fn cycle_mark(status: MarkStatus) -> MarkStatus {
    match status {
        MarkStatus::None => MarkStatus::Asistio,
        MarkStatus::Asistio => MarkStatus::Justificado,
        MarkStatus::Justificado => MarkStatus::Falta,
        MarkStatus::Falta => MarkStatus::Atraso,
        MarkStatus::Atraso => MarkStatus::None,
    }
}

fn handle_escape(app: &mut App) {
    if app.screen == Screen::Payments && app.payments_view_rows {
        app.payments_view_rows = false;
    } else {
        app.status_message.clear();
    }
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::Finance => scroll_to_top(&mut app.entry_index, &mut app.entry_scroll),
        Screen::Tithes => scroll_to_top(&mut app.tithe_index, &mut app.tithe_scroll),
        Screen::Attendance => app.att_row_index = 0,
        Screen::Discipleship => app.participant_index = 0,
        Screen::Inventory => scroll_to_top(&mut app.item_index, &mut app.item_scroll),
        Screen::Payments => {
            if app.payments_view_rows {
                app.payment_row_index = 0;
            } else {
                app.payment_table_index = 0;
            }
        }
        Screen::Census => scroll_to_top(&mut app.census_index, &mut app.census_scroll),
        Screen::Dashboard => {}
    }
}

fn handle_goto_bottom(app: &mut App) {
    let page = app.visible_rows.max(1);
    match app.screen {
        Screen::Finance => scroll_to_bottom(
            &mut app.entry_index,
            &mut app.entry_scroll,
            app.entries.len(),
            page,
        ),
        Screen::Tithes => scroll_to_bottom(
            &mut app.tithe_index,
            &mut app.tithe_scroll,
            app.tithes.len(),
            page,
        ),
        Screen::Attendance => {
            if !app.att_rows.is_empty() {
                app.att_row_index = app.att_rows.len() - 1;
            }
        }
        Screen::Discipleship => {
            if !app.participants.is_empty() {
                app.participant_index = app.participants.len() - 1;
            }
        }
        Screen::Inventory => scroll_to_bottom(
            &mut app.item_index,
            &mut app.item_scroll,
            app.items.len(),
            page,
        ),
        Screen::Payments => {
            if app.payments_view_rows {
                if !app.payment_rows.is_empty() {
                    app.payment_row_index = app.payment_rows.len() - 1;
                }
            } else if !app.payment_tables.is_empty() {
                app.payment_table_index = app.payment_tables.len() - 1;
            }
        }
        Screen::Census => {
            let len = if app.census_view_church {
                app.church_records.len()
            } else {
                app.personal_records.len()
            };
            scroll_to_bottom(&mut app.census_index, &mut app.census_scroll, len, page);
        }
        Screen::Dashboard => {}
    }
}
