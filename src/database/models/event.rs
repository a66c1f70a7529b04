use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::database::manager::DatabaseError;
use crate::database::repository::{Resource, ResourceInput};
use crate::database::validate::ValidationErrors;

/// A tour date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i32,
    pub date: NaiveDate,
    pub venue: String,
    pub city: String,
    pub ticket_url: Option<String>,
}

impl Resource for Event {
    const TABLE: &'static str = "events";
    const LABEL: &'static str = "Event";
    const ORDER_BY: &'static str = "date, id";
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewEvent {
    pub date: NaiveDate,
    pub venue: String,
    pub city: String,
    #[serde(default)]
    pub ticket_url: Option<String>,
}

impl NewEvent {
    fn ticket_url(&self) -> Option<&str> {
        self.ticket_url.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

#[async_trait]
impl ResourceInput for NewEvent {
    type Output = Event;

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.non_empty("venue", &self.venue);
        errors.non_empty("city", &self.city);
        if let Some(url) = self.ticket_url() {
            errors.http_url("ticket_url", url);
        }
        errors.into_result()
    }

    async fn insert(&self, pool: &PgPool) -> Result<Event, DatabaseError> {
        let row = sqlx::query_as::<_, Event>(
            "INSERT INTO events (date, venue, city, ticket_url) VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(self.date)
        .bind(self.venue.trim())
        .bind(self.city.trim())
        .bind(self.ticket_url())
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: i32, pool: &PgPool) -> Result<Option<Event>, DatabaseError> {
        let row = sqlx::query_as::<_, Event>(
            "UPDATE events SET date = $2, venue = $3, city = $4, ticket_url = $5 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(self.date)
        .bind(self.venue.trim())
        .bind(self.city.trim())
        .bind(self.ticket_url())
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }
}

impl Event {
    /// Events on or after the given date, soonest first
    pub async fn upcoming(pool: &PgPool, from: NaiveDate) -> Result<Vec<Event>, DatabaseError> {
        let rows = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE date >= $1 ORDER BY date, id")
            .bind(from)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }
}
