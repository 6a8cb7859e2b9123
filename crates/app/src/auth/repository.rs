//! Auth repository.

use async_trait::async_trait;
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    auth::{
        ApiTokenVersion,
        models::{ActiveApiToken, ApiTokenMetadata, NewApiToken},
    },
    domain::users::records::{Role, UserUuid},
    store::StoreError,
};

const CREATE_API_TOKEN_SQL: &str = include_str!("sql/create_api_token.sql");
const FIND_ACTIVE_API_TOKEN_SQL: &str = include_str!("sql/find_active_api_token.sql");
const TOUCH_API_TOKEN_SQL: &str = include_str!("sql/touch_api_token.sql");
const REVOKE_API_TOKEN_SQL: &str = include_str!("sql/revoke_api_token.sql");

#[derive(Debug, Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn try_get_version(row: &PgRow) -> Result<ApiTokenVersion, sqlx::Error> {
    let version: i16 = row.try_get("version")?;

    ApiTokenVersion::try_from(version).map_err(|e| sqlx::Error::ColumnDecode {
        index: "version".to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for ActiveApiToken {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let role: String = row.try_get("role")?;

        Ok(Self {
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            role: role.parse::<Role>().map_err(|e| sqlx::Error::ColumnDecode {
                index: "role".to_string(),
                source: Box::new(e),
            })?,
            version: try_get_version(row)?,
            token_hash: row.try_get("token_hash")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ApiTokenMetadata {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            version: try_get_version(row)?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            last_used_at: row
                .try_get::<Option<SqlxTimestamp>, _>("last_used_at")?
                .map(SqlxTimestamp::to_jiff),
            expires_at: row
                .try_get::<Option<SqlxTimestamp>, _>("expires_at")?
                .map(SqlxTimestamp::to_jiff),
            revoked_at: row
                .try_get::<Option<SqlxTimestamp>, _>("revoked_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}

#[async_trait]
impl AuthRepository for PgAuthRepository {
    async fn create_api_token(&self, token: NewApiToken) -> Result<ApiTokenMetadata, StoreError> {
        Ok(query_as::<Postgres, ApiTokenMetadata>(CREATE_API_TOKEN_SQL)
            .bind(token.uuid)
            .bind(token.user_uuid.into_uuid())
            .bind(token.version.as_i16())
            .bind(token.token_hash)
            .bind(token.expires_at.map(SqlxTimestamp::from))
            .fetch_one(&self.pool)
            .await?)
    }

    async fn find_active_api_token(
        &self,
        token_uuid: Uuid,
        now: Timestamp,
    ) -> Result<Option<ActiveApiToken>, StoreError> {
        Ok(query_as::<Postgres, ActiveApiToken>(FIND_ACTIVE_API_TOKEN_SQL)
            .bind(token_uuid)
            .bind(SqlxTimestamp::from(now))
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn touch_api_token(&self, token_uuid: Uuid, now: Timestamp) -> Result<(), StoreError> {
        query(TOUCH_API_TOKEN_SQL)
            .bind(token_uuid)
            .bind(SqlxTimestamp::from(now))
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn revoke_api_token(&self, token_uuid: Uuid, now: Timestamp) -> Result<bool, StoreError> {
        let rows_affected = query(REVOKE_API_TOKEN_SQL)
            .bind(token_uuid)
            .bind(SqlxTimestamp::from(now))
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }
}

/// API token store. Only verifiers are stored, never raw tokens.
#[automock]
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn create_api_token(&self, token: NewApiToken) -> Result<ApiTokenMetadata, StoreError>;

    /// A token that is neither revoked nor expired at `now`, with its user's role.
    async fn find_active_api_token(
        &self,
        token_uuid: Uuid,
        now: Timestamp,
    ) -> Result<Option<ActiveApiToken>, StoreError>;

    async fn touch_api_token(&self, token_uuid: Uuid, now: Timestamp) -> Result<(), StoreError>;

    /// Returns `false` when the token was unknown or already revoked.
    async fn revoke_api_token(&self, token_uuid: Uuid, now: Timestamp) -> Result<bool, StoreError>;
}
