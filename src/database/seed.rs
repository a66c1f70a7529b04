use chrono::{Duration, Utc};
use sqlx::PgPool;
use tracing::info;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewBio, NewEvent, NewInventoryItem, NewSong, NewVideo};
use crate::database::repository::{Repository, Resource, ResourceInput};
use crate::services::catalog::PRODUCTS;

const DEFAULT_STOCK: i32 = 20;

/// Summary of which tables received default rows
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SeedReport {
    pub seeded: Vec<&'static str>,
    pub skipped: Vec<&'static str>,
}

/// Fill each empty table with default content. Tables that already hold rows are left alone.
pub async fn seed_defaults(pool: &PgPool) -> Result<SeedReport, DatabaseError> {
    let mut report = SeedReport::default();

    seed_table::<NewInventoryItem>(pool, default_inventory(), &mut report).await?;
    seed_table::<NewEvent>(pool, default_events(), &mut report).await?;
    seed_table::<NewVideo>(pool, default_videos(), &mut report).await?;
    seed_table::<NewBio>(pool, default_bio(), &mut report).await?;
    seed_table::<NewSong>(pool, default_songs(), &mut report).await?;

    Ok(report)
}

async fn seed_table<I: ResourceInput>(
    pool: &PgPool,
    rows: Vec<I>,
    report: &mut SeedReport,
) -> Result<(), DatabaseError> {
    let table = <I::Output as Resource>::TABLE;
    let repo = Repository::<I::Output>::new(pool.clone());

    if repo.count().await? > 0 {
        report.skipped.push(table);
        return Ok(());
    }

    for row in &rows {
        repo.insert(row).await?;
    }
    info!("Seeded {} default rows into {}", rows.len(), table);
    report.seeded.push(table);
    Ok(())
}

pub fn default_inventory() -> Vec<NewInventoryItem> {
    let mut rows = Vec::new();
    for product in PRODUCTS {
        if product.is_sized() {
            for size in product.sizes {
                rows.push(NewInventoryItem {
                    product: product.key.to_string(),
                    size: Some(size.to_string()),
                    quantity: DEFAULT_STOCK,
                });
            }
        } else {
            rows.push(NewInventoryItem {
                product: product.key.to_string(),
                size: None,
                quantity: DEFAULT_STOCK,
            });
        }
    }
    rows
}

pub fn default_events() -> Vec<NewEvent> {
    let today = Utc::now().date_naive();
    let date = |weeks: i64| today + Duration::weeks(weeks);
    vec![
        NewEvent {
            date: date(4),
            venue: "The Bottom Lounge".to_string(),
            city: "Chicago, IL".to_string(),
            ticket_url: None,
        },
        NewEvent {
            date: date(5),
            venue: "Mercury Lounge".to_string(),
            city: "New York, NY".to_string(),
            ticket_url: None,
        },
    ]
}

pub fn default_videos() -> Vec<NewVideo> {
    vec![NewVideo {
        title: "Official Music Video".to_string(),
        url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
        position: 0,
    }]
}

pub fn default_bio() -> Vec<NewBio> {
    vec![NewBio {
        content: "We are a four-piece rock band. Edit this bio from the admin panel.".to_string(),
    }]
}

pub fn default_songs() -> Vec<NewSong> {
    vec![NewSong {
        title: "First Single".to_string(),
        album: None,
        lyrics: "Lyrics coming soon.".to_string(),
        position: 0,
    }]
}
