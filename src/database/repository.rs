use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use sqlx::{self, postgres::PgRow, FromRow, PgPool};

use crate::database::manager::DatabaseError;
use crate::database::validate::ValidationErrors;

/// A table-backed resource row
pub trait Resource: for<'r> FromRow<'r, PgRow> + Send + Sync + Unpin + Serialize + 'static {
    const TABLE: &'static str;
    /// Human-readable name used in not-found messages
    const LABEL: &'static str;
    const ORDER_BY: &'static str;
}

/// Client-supplied body for creating or replacing a resource row
#[async_trait]
pub trait ResourceInput: DeserializeOwned + Send + Sync + 'static {
    type Output: Resource;

    fn validate(&self) -> Result<(), ValidationErrors>;

    async fn insert(&self, pool: &PgPool) -> Result<Self::Output, DatabaseError>;

    async fn update(&self, id: i32, pool: &PgPool) -> Result<Option<Self::Output>, DatabaseError>;
}

pub struct Repository<T> {
    pool: PgPool,
    _phantom: std::marker::PhantomData<T>,
}

impl<T: Resource> Repository<T> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _phantom: std::marker::PhantomData,
        }
    }

    pub async fn select_all(&self) -> Result<Vec<T>, DatabaseError> {
        let sql = format!("SELECT * FROM {} ORDER BY {}", T::TABLE, T::ORDER_BY);
        Ok(sqlx::query_as::<_, T>(&sql).fetch_all(&self.pool).await?)
    }

    pub async fn select_one(&self, id: i32) -> Result<Option<T>, DatabaseError> {
        let sql = format!("SELECT * FROM {} WHERE id = $1", T::TABLE);
        Ok(sqlx::query_as::<_, T>(&sql).bind(id).fetch_optional(&self.pool).await?)
    }

    pub async fn select_404(&self, id: i32) -> Result<T, DatabaseError> {
        self.select_one(id).await?.ok_or_else(|| not_found::<T>(id))
    }

    pub async fn count(&self) -> Result<i64, DatabaseError> {
        let sql = format!("SELECT COUNT(*) FROM {}", T::TABLE);
        let (count,): (i64,) = sqlx::query_as(&sql).fetch_one(&self.pool).await?;
        Ok(count)
    }

    pub async fn delete_404(&self, id: i32) -> Result<(), DatabaseError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", T::TABLE);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(not_found::<T>(id));
        }
        Ok(())
    }

    pub async fn insert<I: ResourceInput<Output = T>>(&self, input: &I) -> Result<T, DatabaseError> {
        input.insert(&self.pool).await
    }

    pub async fn update_404<I: ResourceInput<Output = T>>(&self, id: i32, input: &I) -> Result<T, DatabaseError> {
        input
            .update(id, &self.pool)
            .await?
            .ok_or_else(|| not_found::<T>(id))
    }
}

pub fn not_found<T: Resource>(id: i32) -> DatabaseError {
    DatabaseError::NotFound(format!("{} {} not found", T::LABEL, id))
}
