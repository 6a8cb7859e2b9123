use async_trait::async_trait;
use jiff::Timestamp;

use crate::{
    domain::{
        carts::Cart,
        users::{
            data::NewUser,
            records::{UserRecord, UserUuid},
            repository::UsersRepository,
        },
    },
    memory::MemoryStore,
    store::StoreError,
};

#[async_trait]
impl UsersRepository for MemoryStore {
    async fn find_user(&self, user: UserUuid) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.state.read().await.users.get(&user).cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        let mut state = self.state.write().await;

        if state.users.contains_key(&user.uuid)
            || state.users.values().any(|existing| existing.email == user.email)
        {
            return Err(StoreError::AlreadyExists);
        }

        let now = Timestamp::now();

        let record = UserRecord {
            uuid: user.uuid,
            name: user.name,
            email: user.email,
            role: user.role,
            saved_addresses: Vec::new(),
            cart: Cart::default(),
            created_at: now,
            updated_at: now,
        };

        state.users.insert(record.uuid, record.clone());

        Ok(record)
    }

    async fn save_cart(&self, user: UserUuid, cart: &Cart) -> Result<(), StoreError> {
        let mut state = self.state.write().await;

        let record = state.users.get_mut(&user).ok_or(StoreError::NotFound)?;

        record.cart = cart.clone();
        record.updated_at = Timestamp::now();

        Ok(())
    }
}
