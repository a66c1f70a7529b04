use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::database::manager::DatabaseError;
use crate::database::repository::{Resource, ResourceInput};
use crate::database::validate::ValidationErrors;

/// A song and its lyrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Song {
    pub id: i32,
    pub title: String,
    pub album: Option<String>,
    pub lyrics: String,
    pub position: i32,
}

impl Resource for Song {
    const TABLE: &'static str = "songs";
    const LABEL: &'static str = "Song";
    const ORDER_BY: &'static str = "position, id";
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewSong {
    pub title: String,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub lyrics: String,
    #[serde(default)]
    pub position: i32,
}

impl NewSong {
    fn album(&self) -> Option<&str> {
        self.album.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

#[async_trait]
impl ResourceInput for NewSong {
    type Output = Song;

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.non_empty("title", &self.title);
        errors.into_result()
    }

    async fn insert(&self, pool: &PgPool) -> Result<Song, DatabaseError> {
        let row = sqlx::query_as::<_, Song>(
            "INSERT INTO songs (title, album, lyrics, position) VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(self.title.trim())
        .bind(self.album())
        .bind(&self.lyrics)
        .bind(self.position)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: i32, pool: &PgPool) -> Result<Option<Song>, DatabaseError> {
        let row = sqlx::query_as::<_, Song>(
            "UPDATE songs SET title = $2, album = $3, lyrics = $4, position = $5 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(self.title.trim())
        .bind(self.album())
        .bind(&self.lyrics)
        .bind(self.position)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lyrics_and_album_are_optional() {
        let input: NewSong = serde_json::from_str(r#"{"title": "Instrumental"}"#).unwrap();
        assert!(input.validate().is_ok());
        assert_eq!(input.lyrics, "");
        assert_eq!(input.album(), None);
    }

    #[test]
    fn title_is_required() {
        let input: NewSong = serde_json::from_str(r#"{"title": "", "lyrics": "la la la"}"#).unwrap();
        assert!(input.validate().is_err());
    }
}
