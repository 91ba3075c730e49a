//! Credential check and session file. The operator roster is fixed at
//! build time; no account management surface exists.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::User;

struct Credential {
    cedula: &'static str,
    password: &'static str,
    name: &'static str,
}

const OPERATORS: [Credential; 2] = [
    Credential {
        cedula: "12345678",
        password: "pastor123",
        name: "Pastor Principal",
    },
    Credential {
        cedula: "87654321",
        password: "admin123",
        name: "Administrador",
    },
];

/// Check a cedula/password pair against the roster. Both must match the
/// same operator exactly.
pub(crate) fn authenticate(cedula: &str, password: &str) -> Option<User> {
    OPERATORS
        .iter()
        .find(|c| c.cedula == cedula && c.password == password)
        .map(|c| User {
            cedula: c.cedula.to_string(),
            name: c.name.to_string(),
        })
}

fn session_file(data_dir: &Path) -> PathBuf {
    data_dir.join("session.json")
}

pub(crate) fn save_session(data_dir: &Path, user: &User) -> Result<()> {
    fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    let json = serde_json::to_string(user).context("Failed to serialize session")?;
    fs::write(session_file(data_dir), json).context("Failed to write session file")?;
    Ok(())
}

/// The saved session, if a valid one exists. A malformed file reads as no
/// session rather than an error.
pub(crate) fn load_session(data_dir: &Path) -> Option<User> {
    let json = fs::read_to_string(session_file(data_dir)).ok()?;
    serde_json::from_str(&json).ok()
}

pub(crate) fn clear_session(data_dir: &Path) -> Result<()> {
    let path = session_file(data_dir);
    if path.exists() {
        fs::remove_file(&path)
            .with_context(|| format!("Failed to remove session file: {}", path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn known_operators_authenticate() {
        let user = authenticate("12345678", "pastor123").unwrap();
        assert_eq!(user.name, "Pastor Principal");
        let user = authenticate("87654321", "admin123").unwrap();
        assert_eq!(user.name, "Administrador");
    }

    #[test]
    fn wrong_credentials_rejected() {
        assert!(authenticate("12345678", "admin123").is_none());
        assert!(authenticate("12345678", "").is_none());
        assert!(authenticate("", "").is_none());
        assert!(authenticate("00000000", "pastor123").is_none());
    }

    #[test]
    fn session_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_session(dir.path()).is_none());

        let user = authenticate("12345678", "pastor123").unwrap();
        save_session(dir.path(), &user).unwrap();
        assert_eq!(load_session(dir.path()), Some(user));

        clear_session(dir.path()).unwrap();
        assert!(load_session(dir.path()).is_none());

        // Clearing with no session present is fine
        clear_session(dir.path()).unwrap();
    }

    #[test]
    fn malformed_session_reads_as_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("session.json"), "{not json").unwrap();
        assert!(load_session(dir.path()).is_none());
    }
}
