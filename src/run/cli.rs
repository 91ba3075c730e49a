use anyhow::Result;
use std::path::Path;

use crate::db::Database;
use crate::lifecycle;
use crate::models::Period;
use crate::ui::util::format_amount;

pub(crate) fn as_cli(args: &[String], db: &mut Database, data_dir: &Path) -> Result<()> {
    match args[1].as_str() {
        "login" => cli_login(&args[2..], data_dir),
        "logout" => cli_logout(data_dir),
        "summary" | "s" => with_session(data_dir, || cli_summary(&args[2..], db)),
        "periods" => with_session(data_dir, || cli_periods(db)),
        "start-month" => with_session(data_dir, || cli_start_month(&args[2..], db)),
        "close-month" => with_session(data_dir, || cli_close_month(db)),
        "export" => with_session(data_dir, || cli_export(&args[2..], db)),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("churchtui {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn with_session(data_dir: &Path, run: impl FnOnce() -> Result<()>) -> Result<()> {
    if crate::auth::load_session(data_dir).is_none() {
        anyhow::bail!("Not logged in. Run: churchtui login <cedula> <password>");
    }
    run()
}

fn print_usage() {
    println!("ChurchTUI — local-only church back-office");
    println!();
    println!("Usage: churchtui [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI (requires login)");
    println!("  login <cedula> <password>     Start a session");
    println!("  logout                        End the session");
    println!("  summary [YYYY-MM]             Print a month's financial summary");
    println!("  periods                       List the active and archived months");
    println!("  start-month [YYYY-MM]         Archive the active month and open a new one");
    println!("  close-month                   Close the active month without opening another");
    println!("  export <tabla> [path]         Export a payment table to HTML");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

fn cli_login(args: &[String], data_dir: &Path) -> Result<()> {
    if args.len() < 2 {
        anyhow::bail!("Usage: churchtui login <cedula> <password>");
    }
    match crate::auth::authenticate(&args[0], &args[1]) {
        Some(user) => {
            crate::auth::save_session(data_dir, &user)?;
            println!("Logged in as {}", user.name);
            Ok(())
        }
        None => anyhow::bail!("Invalid cedula or password"),
    }
}

fn cli_logout(data_dir: &Path) -> Result<()> {
    crate::auth::clear_session(data_dir)?;
    println!("Logged out");
    Ok(())
}

fn cli_summary(args: &[String], db: &mut Database) -> Result<()> {
    let period = match args.first().filter(|a| !a.starts_with('-')) {
        Some(id) => db
            .get_period_by_id(id)?
            .ok_or_else(|| anyhow::anyhow!("No period {id}"))?,
        None => lifecycle::active_or_initial_period(db)?,
    };

    let (income, expenses) = db.get_finance_totals(&period.id)?;
    let tithes = db.get_tithe_total(&period.id)?;
    let tithe_count = db.get_tithes(&period.id)?.len();

    println!("ChurchTUI — {} [{}]", period.name, period.status);
    println!("{}", "─".repeat(40));
    println!("  Ingresos:   {}", format_amount(income));
    println!("  Egresos:    {}", format_amount(expenses));
    println!("  Balance:    {}", format_amount(income - expenses));
    println!("  Diezmos:    {} ({tithe_count} recibos)", format_amount(tithes));

    Ok(())
}

fn cli_periods(db: &mut Database) -> Result<()> {
    match lifecycle::active_period(db)? {
        Some(p) => println!("Active: {} ({})", p.name, p.id),
        None => println!("Active: (none)"),
    }

    let closed = lifecycle::closed_periods(db)?;
    if closed.is_empty() {
        println!("No archived months");
        return Ok(());
    }

    println!();
    println!("{:<10} {:<20} {:<12} Cierre", "ID", "Mes", "Inicio");
    println!("{}", "─".repeat(55));
    for p in &closed {
        println!(
            "{:<10} {:<20} {:<12} {}",
            p.id,
            p.name,
            p.start_date.chars().take(10).collect::<String>(),
            p.end_date
                .as_deref()
                .map(|d| d.chars().take(10).collect::<String>())
                .unwrap_or_default(),
        );
    }
    Ok(())
}

fn cli_start_month(args: &[String], db: &mut Database) -> Result<()> {
    // No argument means the current calendar month
    let id = args.first().map(String::as_str).unwrap_or("");
    let (year, month) = Period::parse_id_or_current(id)
        .ok_or_else(|| anyhow::anyhow!("Invalid month: {id} (use YYYY-MM)"))?;

    let previous = lifecycle::active_period(db)?;
    let period = lifecycle::start_new_period(db, year, month)?;
    if let Some(prev) = previous {
        println!("Archived {}", prev.name);
    }
    println!("Started {}", period.name);
    Ok(())
}

fn cli_close_month(db: &mut Database) -> Result<()> {
    match lifecycle::close_current_period(db)? {
        Some(p) => println!("Closed {}", p.name),
        None => println!("No active month to close"),
    }
    Ok(())
}

fn cli_export(args: &[String], db: &mut Database) -> Result<()> {
    let name = args
        .first()
        .ok_or_else(|| anyhow::anyhow!("Usage: churchtui export <tabla> [path]"))?;

    let tables = db.get_payment_tables()?;
    let table = tables
        .iter()
        .find(|t| t.nombre.to_lowercase() == name.to_lowercase())
        .ok_or_else(|| {
            let names: Vec<&str> = tables.iter().map(|t| t.nombre.as_str()).collect();
            anyhow::anyhow!("Table '{name}' not found. Available: {}", names.join(", "))
        })?;
    let table_id = table
        .id
        .ok_or_else(|| anyhow::anyhow!("Table has no ID"))?;

    let path = args
        .get(1)
        .map(|a| shellexpand(a))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            let slug = table.nombre.to_lowercase().replace(' ', "-");
            format!("{home}/churchtui-{slug}.html")
        });

    let rows = db.get_payment_rows(table_id)?;
    crate::export::write_payment_table(Path::new(&path), table, &rows)?;
    println!("Exported {} rows to {path}", rows.len());
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
