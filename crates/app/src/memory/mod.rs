//! In-memory store
//!
//! Implements every repository trait over a single lock, for tests and local
//! development. Each operation holds the lock for its whole duration, so stock
//! reservation is atomic here just as it is in `PostgreSQL`.

mod auth;
mod orders;
mod products;
mod users;

use std::collections::{BTreeMap, HashMap};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{
    orders::records::{OrderRecord, OrderUuid},
    products::records::{ProductRecord, ProductUuid},
    users::records::{UserRecord, UserUuid},
};

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

#[derive(Debug, Default)]
struct State {
    products: BTreeMap<ProductUuid, ProductRecord>,
    users: HashMap<UserUuid, UserRecord>,
    orders: BTreeMap<OrderUuid, OrderRecord>,
    api_tokens: HashMap<Uuid, auth::StoredApiToken>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl MemoryStore {
    /// Insert a user without going through the async lock. Setup only: panics
    /// if the store is already in use.
    pub(crate) fn insert_user(&self, user: UserRecord) {
        self.state
            .try_write()
            .expect("store should not be shared during setup")
            .users
            .insert(user.uuid, user);
    }
}
