use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{types::Json, FromRow, PgConnection, PgPool};

use crate::database::manager::DatabaseError;
use crate::types::CartItem;

/// A fulfilled checkout, keyed by its Stripe session id
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Order {
    pub session_id: String,
    pub items: Json<Vec<CartItem>>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Record the order unless this session was already fulfilled.
    /// Returns None when a row for the session already exists.
    pub async fn insert_if_new(
        conn: &mut PgConnection,
        session_id: &str,
        items: &[CartItem],
        email: Option<&str>,
    ) -> Result<Option<Order>, DatabaseError> {
        let row = sqlx::query_as::<_, Order>(
            "INSERT INTO orders (session_id, items, email) VALUES ($1, $2, $3) \
             ON CONFLICT (session_id) DO NOTHING RETURNING *",
        )
        .bind(session_id)
        .bind(Json(items))
        .bind(email)
        .fetch_optional(conn)
        .await?;
        Ok(row)
    }

    pub async fn find(pool: &PgPool, session_id: &str) -> Result<Option<Order>, DatabaseError> {
        let row = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE session_id = $1")
            .bind(session_id)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Order>, DatabaseError> {
        let rows = sqlx::query_as::<_, Order>("SELECT * FROM orders ORDER BY created_at DESC")
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }
}
