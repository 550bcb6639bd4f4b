//! User directory: the CRUD operations served over HTTP.

use crate::error::DirectoryError;
use crate::store::UserRepository;
use crate::user::{User, UserPayload, DEFAULT_ROLE};
use std::sync::Arc;
use tracing::debug;

pub type Result<T> = std::result::Result<T, DirectoryError>;

/// CRUD operations over a [`UserRepository`]
#[derive(Clone)]
pub struct UserDirectory {
    store: Arc<dyn UserRepository>,
}

impl UserDirectory {
    pub fn new(store: Arc<dyn UserRepository>) -> Self {
        Self { store }
    }

    /// All users, insertion order
    pub fn list(&self) -> Vec<User> {
        debug!("listing all users");
        self.store.all()
    }

    pub fn get(&self, id: u64) -> Result<User> {
        debug!(id, "fetching user");
        self.store.find(id).ok_or(DirectoryError::NotFound(id))
    }

    /// Create a user. Role falls back to `"user"`.
    pub fn create(&self, payload: &UserPayload) -> Result<User> {
        let (name, email) = required_fields(payload)?;
        let role = payload.role().unwrap_or(DEFAULT_ROLE);

        let user = self.store.insert(name, email, role);
        debug!(id = user.id, "user created");
        Ok(user)
    }

    /// Replace name and email of an existing user.
    ///
    /// Existence is checked before the body, so a missing id reports
    /// `NotFound` even when the payload is invalid. An absent role keeps
    /// the stored one.
    pub fn update(&self, id: u64, payload: &UserPayload) -> Result<User> {
        let existing = self.get(id)?;
        let (name, email) = required_fields(payload)?;

        let updated = User {
            id,
            name: name.to_string(),
            email: email.to_string(),
            role: payload.role().unwrap_or(existing.role.as_str()).to_string(),
        };

        // A concurrent delete between the lookup and the write lands here
        let user = self
            .store
            .replace(updated)
            .ok_or(DirectoryError::NotFound(id))?;
        debug!(id, "user updated");
        Ok(user)
    }

    pub fn delete(&self, id: u64) -> Result<User> {
        let user = self.store.remove(id).ok_or(DirectoryError::NotFound(id))?;
        debug!(id, "user deleted");
        Ok(user)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

fn required_fields(payload: &UserPayload) -> Result<(&str, &str)> {
    match (payload.name(), payload.email()) {
        (Some(name), Some(email)) => Ok((name, email)),
        _ => {
            debug!("validation failed: name or email missing");
            Err(DirectoryError::required_fields())
        }
    }
}
