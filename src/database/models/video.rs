use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::database::manager::DatabaseError;
use crate::database::repository::{Resource, ResourceInput};
use crate::database::validate::ValidationErrors;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Video {
    pub id: i32,
    pub title: String,
    pub url: String,
    pub position: i32,
}

impl Resource for Video {
    const TABLE: &'static str = "videos";
    const LABEL: &'static str = "Video";
    const ORDER_BY: &'static str = "position, id";
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewVideo {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub position: i32,
}

#[async_trait]
impl ResourceInput for NewVideo {
    type Output = Video;

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.non_empty("title", &self.title);
        errors.http_url("url", self.url.trim());
        errors.into_result()
    }

    async fn insert(&self, pool: &PgPool) -> Result<Video, DatabaseError> {
        let row = sqlx::query_as::<_, Video>(
            "INSERT INTO videos (title, url, position) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(self.title.trim())
        .bind(self.url.trim())
        .bind(self.position)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: i32, pool: &PgPool) -> Result<Option<Video>, DatabaseError> {
        let row = sqlx::query_as::<_, Video>(
            "UPDATE videos SET title = $2, url = $3, position = $4 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(self.title.trim())
        .bind(self.url.trim())
        .bind(self.position)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }
}
