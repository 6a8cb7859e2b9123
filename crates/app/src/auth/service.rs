//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    auth::{
        ApiTokenVersion, AuthServiceError, IssuedApiToken, NewApiToken, Principal,
        compute_verifier, format_api_token, generate_api_token_secret, parse_api_token,
        repository::AuthRepository, verifiers_match,
    },
    domain::users::{records::UserUuid, repository::UsersRepository},
};

#[derive(Clone)]
pub struct StoreAuthService {
    repository: Arc<dyn AuthRepository>,
    users: Arc<dyn UsersRepository>,
}

impl StoreAuthService {
    #[must_use]
    pub fn new(repository: Arc<dyn AuthRepository>, users: Arc<dyn UsersRepository>) -> Self {
        Self { repository, users }
    }

    /// Issue a new API token for the given user.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist or the token cannot be
    /// stored.
    pub async fn issue_api_token(
        &self,
        user: UserUuid,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        if self.users.find_user(user).await?.is_none() {
            return Err(AuthServiceError::UnknownUser);
        }

        let token_uuid = Uuid::now_v7();
        let version = ApiTokenVersion::V1;
        let secret = generate_api_token_secret();
        let token = format_api_token(token_uuid, version, &secret);

        let metadata = self
            .repository
            .create_api_token(NewApiToken {
                uuid: token_uuid,
                user_uuid: user,
                version,
                token_hash: compute_verifier(token_uuid, version, user, &secret),
                expires_at,
            })
            .await?;

        info!(token_uuid = %token_uuid, user_uuid = %user, "issued api token");

        Ok(IssuedApiToken { token, metadata })
    }

    /// Revoke a token by UUID. Returns `true` if the token was active.
    ///
    /// # Errors
    ///
    /// Returns an error if the store update fails.
    pub async fn revoke_api_token(&self, token_uuid: Uuid) -> Result<bool, AuthServiceError> {
        Ok(self
            .repository
            .revoke_api_token(token_uuid, Timestamp::now())
            .await?)
    }
}

#[async_trait]
impl AuthService for StoreAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Principal, AuthServiceError> {
        let parsed_token = parse_api_token(bearer_token).map_err(|_| AuthServiceError::NotFound)?;
        let now = Timestamp::now();

        let token = self
            .repository
            .find_active_api_token(parsed_token.token_uuid, now)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        if token.version != parsed_token.version {
            return Err(AuthServiceError::NotFound);
        }

        let verifier = compute_verifier(
            parsed_token.token_uuid,
            parsed_token.version,
            token.user_uuid,
            &parsed_token.secret,
        );

        if !verifiers_match(&verifier, &token.token_hash) {
            return Err(AuthServiceError::NotFound);
        }

        if let Err(error) = self
            .repository
            .touch_api_token(parsed_token.token_uuid, now)
            .await
        {
            debug!(%error, "failed to record api token use");
        }

        Ok(Principal::new(token.user_uuid, token.role))
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a bearer token to the principal it acts as.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Principal, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use jiff::{SignedDuration, Timestamp};
    use testresult::TestResult;

    use crate::{domain::users::records::Role, memory::MemoryStore, test::TestContext};

    use super::*;

    fn service(store: &Arc<MemoryStore>) -> StoreAuthService {
        StoreAuthService::new(store.clone(), store.clone())
    }

    #[tokio::test]
    async fn issued_token_authenticates_as_its_user() -> TestResult {
        let store = Arc::new(MemoryStore::new());
        let ctx = TestContext::with_store(Arc::clone(&store));
        let auth = service(&store);

        let issued = auth.issue_api_token(ctx.customer.user, None).await?;
        let principal = auth.authenticate_bearer(&issued.token).await?;

        assert_eq!(principal, ctx.customer);
        assert_eq!(principal.role, Role::User);

        Ok(())
    }

    #[tokio::test]
    async fn tampered_secret_is_rejected() -> TestResult {
        let store = Arc::new(MemoryStore::new());
        let ctx = TestContext::with_store(Arc::clone(&store));
        let auth = service(&store);

        let issued = auth.issue_api_token(ctx.customer.user, None).await?;
        let (id, _secret) = issued.token.split_once('.').ok_or("token has no secret")?;
        let forged = format!("{id}.{}", "0".repeat(64));

        let result = auth.authenticate_bearer(&forged).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn revoked_token_is_rejected() -> TestResult {
        let store = Arc::new(MemoryStore::new());
        let ctx = TestContext::with_store(Arc::clone(&store));
        let auth = service(&store);

        let issued = auth.issue_api_token(ctx.admin.user, None).await?;

        assert!(auth.revoke_api_token(issued.metadata.uuid).await?);
        assert!(!auth.revoke_api_token(issued.metadata.uuid).await?);

        let result = auth.authenticate_bearer(&issued.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn expired_token_is_rejected() -> TestResult {
        let store = Arc::new(MemoryStore::new());
        let ctx = TestContext::with_store(Arc::clone(&store));
        let auth = service(&store);

        let expired_at = Timestamp::now().checked_sub(SignedDuration::from_secs(60))?;
        let issued = auth
            .issue_api_token(ctx.customer.user, Some(expired_at))
            .await?;

        let result = auth.authenticate_bearer(&issued.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn issuing_for_unknown_user_fails() {
        let store = Arc::new(MemoryStore::new());
        let auth = service(&store);

        let result = auth.issue_api_token(UserUuid::new(), None).await;

        assert!(
            matches!(result, Err(AuthServiceError::UnknownUser)),
            "expected UnknownUser, got {result:?}"
        );
    }

    #[tokio::test]
    async fn malformed_bearer_is_not_found() {
        let store = Arc::new(MemoryStore::new());
        let auth = service(&store);

        let result = auth.authenticate_bearer("not-a-token").await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
