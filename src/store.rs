//! User storage behind a repository trait.
//!
//! The directory only talks to [`UserRepository`]; [`InMemoryUserStore`] is
//! the process-local implementation. Ids come from a monotonic counter so a
//! deleted id is never handed out again.

use crate::user::{seed_users, User};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Storage operations the directory needs
pub trait UserRepository: Send + Sync {
    /// All users in insertion order
    fn all(&self) -> Vec<User>;

    /// Look up a user by id
    fn find(&self, id: u64) -> Option<User>;

    /// Store a new user, assigning the next id
    fn insert(&self, name: &str, email: &str, role: &str) -> User;

    /// Overwrite the stored record with the same id.
    /// Returns `None` without writing if the id is not present.
    fn replace(&self, user: User) -> Option<User>;

    /// Remove a user, returning the removed record
    fn remove(&self, id: u64) -> Option<User>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory user store
#[derive(Debug)]
pub struct InMemoryUserStore {
    users: DashMap<u64, User>,
    next_id: AtomicU64,
}

impl InMemoryUserStore {
    /// Create an empty store
    pub fn new() -> Arc<Self> {
        Self::with_users(Vec::new())
    }

    /// Create a store holding the seed records
    pub fn seeded() -> Arc<Self> {
        Self::with_users(seed_users())
    }

    /// Create a store holding `users`; the next id follows the largest one given
    pub fn with_users(users: Vec<User>) -> Arc<Self> {
        let next_id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        let map = DashMap::new();
        for user in users {
            map.insert(user.id, user);
        }
        Arc::new(Self {
            users: map,
            next_id: AtomicU64::new(next_id),
        })
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self {
            users: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }
}

impl UserRepository for InMemoryUserStore {
    fn all(&self) -> Vec<User> {
        let mut users: Vec<User> = self.users.iter().map(|r| r.value().clone()).collect();
        // Ids are monotonic, so id order is insertion order
        users.sort_by_key(|u| u.id);
        users
    }

    fn find(&self, id: u64) -> Option<User> {
        self.users.get(&id).map(|r| r.clone())
    }

    fn insert(&self, name: &str, email: &str, role: &str) -> User {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let user = User::new(id, name, email, role);
        self.users.insert(id, user.clone());
        user
    }

    fn replace(&self, user: User) -> Option<User> {
        let mut entry = self.users.get_mut(&user.id)?;
        *entry = user.clone();
        Some(user)
    }

    fn remove(&self, id: u64) -> Option<User> {
        self.users.remove(&id).map(|(_, user)| user)
    }

    fn len(&self) -> usize {
        self.users.len()
    }
}
