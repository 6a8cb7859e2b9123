//! Users Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as, types::Json};

use crate::{
    domain::{
        carts::Cart,
        users::{
            data::NewUser,
            records::{Role, UserRecord, UserUuid},
        },
    },
    store::StoreError,
};

const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const SAVE_CART_SQL: &str = include_str!("sql/save_cart.sql");

#[derive(Debug, Clone)]
pub struct PgUsersRepository {
    pool: PgPool,
}

impl PgUsersRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let role: String = row.try_get("role")?;

        Ok(Self {
            uuid: UserUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            role: role.parse::<Role>().map_err(|e| sqlx::Error::ColumnDecode {
                index: "role".to_string(),
                source: Box::new(e),
            })?,
            saved_addresses: row.try_get::<Json<_>, _>("saved_addresses")?.0,
            cart: row.try_get::<Json<Cart>, _>("cart")?.0,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

#[async_trait]
impl UsersRepository for PgUsersRepository {
    async fn find_user(&self, user: UserUuid) -> Result<Option<UserRecord>, StoreError> {
        Ok(query_as::<Postgres, UserRecord>(GET_USER_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn create_user(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        Ok(query_as::<Postgres, UserRecord>(CREATE_USER_SQL)
            .bind(user.uuid.into_uuid())
            .bind(user.name)
            .bind(user.email)
            .bind(user.role.as_str())
            .fetch_one(&self.pool)
            .await?)
    }

    async fn save_cart(&self, user: UserUuid, cart: &Cart) -> Result<(), StoreError> {
        let rows_affected = query(SAVE_CART_SQL)
            .bind(user.into_uuid())
            .bind(Json(cart))
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows_affected == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}

/// User store. Carts are embedded in the user record.
#[automock]
#[async_trait]
pub trait UsersRepository: Send + Sync {
    async fn find_user(&self, user: UserUuid) -> Result<Option<UserRecord>, StoreError>;

    async fn create_user(&self, user: NewUser) -> Result<UserRecord, StoreError>;

    /// Replace the user's cart. Fails with [`StoreError::NotFound`] for an
    /// unknown user.
    async fn save_cart(&self, user: UserUuid, cart: &Cart) -> Result<(), StoreError>;
}
