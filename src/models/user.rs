use serde::{Deserialize, Serialize};

/// The operator stored in the session file after a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub cedula: String,
    pub name: String,
}
