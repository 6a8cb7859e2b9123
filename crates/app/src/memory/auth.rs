use async_trait::async_trait;
use jiff::Timestamp;
use uuid::Uuid;

use crate::{
    auth::{ActiveApiToken, ApiTokenMetadata, NewApiToken, repository::AuthRepository},
    memory::MemoryStore,
    store::StoreError,
};

#[derive(Debug, Clone)]
pub(super) struct StoredApiToken {
    metadata: ApiTokenMetadata,
    token_hash: String,
}

impl StoredApiToken {
    fn is_active(&self, now: Timestamp) -> bool {
        self.metadata.revoked_at.is_none()
            && self.metadata.expires_at.is_none_or(|expires_at| expires_at > now)
    }
}

#[async_trait]
impl AuthRepository for MemoryStore {
    async fn create_api_token(&self, token: NewApiToken) -> Result<ApiTokenMetadata, StoreError> {
        let mut state = self.state.write().await;

        if !state.users.contains_key(&token.user_uuid) {
            return Err(StoreError::InvalidReference);
        }

        if state.api_tokens.contains_key(&token.uuid) {
            return Err(StoreError::AlreadyExists);
        }

        let metadata = ApiTokenMetadata {
            uuid: token.uuid,
            user_uuid: token.user_uuid,
            version: token.version,
            created_at: Timestamp::now(),
            last_used_at: None,
            expires_at: token.expires_at,
            revoked_at: None,
        };

        state.api_tokens.insert(
            token.uuid,
            StoredApiToken {
                metadata: metadata.clone(),
                token_hash: token.token_hash,
            },
        );

        Ok(metadata)
    }

    async fn find_active_api_token(
        &self,
        token_uuid: Uuid,
        now: Timestamp,
    ) -> Result<Option<ActiveApiToken>, StoreError> {
        let state = self.state.read().await;

        let Some(token) = state
            .api_tokens
            .get(&token_uuid)
            .filter(|token| token.is_active(now))
        else {
            return Ok(None);
        };

        Ok(state
            .users
            .get(&token.metadata.user_uuid)
            .map(|user| ActiveApiToken {
                user_uuid: user.uuid,
                role: user.role,
                version: token.metadata.version,
                token_hash: token.token_hash.clone(),
            }))
    }

    async fn touch_api_token(&self, token_uuid: Uuid, now: Timestamp) -> Result<(), StoreError> {
        if let Some(token) = self.state.write().await.api_tokens.get_mut(&token_uuid) {
            token.metadata.last_used_at = Some(now);
        }

        Ok(())
    }

    async fn revoke_api_token(&self, token_uuid: Uuid, now: Timestamp) -> Result<bool, StoreError> {
        let mut state = self.state.write().await;

        match state.api_tokens.get_mut(&token_uuid) {
            Some(token) if token.metadata.revoked_at.is_none() => {
                token.metadata.revoked_at = Some(now);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
