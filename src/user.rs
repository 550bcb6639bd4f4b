//! User record and request payload types.

use serde::{Deserialize, Serialize};

/// Role assigned when a create request omits one
pub const DEFAULT_ROLE: &str = "user";

/// A stored user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl User {
    pub fn new(id: u64, name: &str, email: &str, role: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            email: email.to_string(),
            role: role.to_string(),
        }
    }
}

/// Body of a create or update request.
///
/// Every field is optional here so that a missing `name` surfaces as a
/// validation error instead of a parse error. Empty strings count as absent.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UserPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl UserPayload {
    pub fn new(name: &str, email: &str, role: Option<&str>) -> Self {
        Self {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            role: role.map(str::to_string),
        }
    }

    pub fn name(&self) -> Option<&str> {
        present(&self.name)
    }

    pub fn email(&self) -> Option<&str> {
        present(&self.email)
    }

    pub fn role(&self) -> Option<&str> {
        present(&self.role)
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// The four records every seeded directory starts with
pub fn seed_users() -> Vec<User> {
    vec![
        User::new(1, "Jan Kowalski", "jan@example.com", "admin"),
        User::new(2, "Anna Nowak", "anna@example.com", "user"),
        User::new(3, "Piotr Wiśniewski", "piotr@example.com", "user"),
        User::new(4, "Marta Lis", "marta@example.com", "moderator"),
    ]
}
