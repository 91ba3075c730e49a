mod auth;
mod db;
mod export;
mod lifecycle;
mod models;
mod run;
mod ui;

use anyhow::{Context, Result};
use std::path::PathBuf;

use db::Database;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let data_dir = get_data_dir()?;
    let mut db = Database::open(&data_dir.join("church.db"))?;

    match args.len() {
        1 => match auth::load_session(&data_dir) {
            Some(user) => run::as_tui(&mut db, user, &data_dir),
            None => {
                println!("Not logged in. Run: churchtui login <cedula> <password>");
                Ok(())
            }
        },
        _ => run::as_cli(&args, &mut db, &data_dir),
    }
}

fn get_data_dir() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("com", "churchtui", "ChurchTUI")
        .context("could not determine a data directory")?;
    let dir = dirs.data_dir().to_path_buf();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("could not create data directory {}", dir.display()))?;
    Ok(dir)
}
