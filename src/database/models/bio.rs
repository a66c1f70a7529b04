use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::database::manager::DatabaseError;
use crate::database::repository::{Resource, ResourceInput};
use crate::database::validate::ValidationErrors;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Bio {
    pub id: i32,
    pub content: String,
}

impl Resource for Bio {
    const TABLE: &'static str = "bio";
    const LABEL: &'static str = "Bio";
    const ORDER_BY: &'static str = "id";
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewBio {
    pub content: String,
}

#[async_trait]
impl ResourceInput for NewBio {
    type Output = Bio;

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.non_empty("content", &self.content);
        errors.into_result()
    }

    async fn insert(&self, pool: &PgPool) -> Result<Bio, DatabaseError> {
        let row = sqlx::query_as::<_, Bio>("INSERT INTO bio (content) VALUES ($1) RETURNING *")
            .bind(&self.content)
            .fetch_one(pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, id: i32, pool: &PgPool) -> Result<Option<Bio>, DatabaseError> {
        let row = sqlx::query_as::<_, Bio>("UPDATE bio SET content = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(&self.content)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }
}
