//! In-memory user store for tests.

use anyhow::Result;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use super::{User, UserStore};

#[derive(Default)]
pub(crate) struct MemoryStore {
    users: Mutex<HashMap<Uuid, User>>,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&self, user: User) {
        self.users.lock().unwrap().insert(user.id, user);
    }
}

impl UserStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.values().find(|user| user.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn save(&self, user: &User) -> Result<User> {
        let mut users = self.users.lock().unwrap();
        let mut stored = user.clone();
        // Same guarantee as the Postgres store: a committed secret is final.
        if let Some(existing) = users.get(&user.id) {
            if existing.otp_secret.is_some() {
                stored.otp_secret.clone_from(&existing.otp_secret);
            }
        }
        users.insert(stored.id, stored.clone());
        Ok(stored)
    }
}
