// Public read endpoints backing the site pages

use axum::extract::State;
use chrono::Utc;
use serde::Deserialize;

use crate::database::models::{Bio, Event, InventoryItem, Song, Video};
use crate::database::repository::{Repository, Resource};
use crate::middleware::{ApiPath, ApiQuery, ApiResponse, ApiResult};
use crate::services::catalog::{Product, PRODUCTS};
use crate::state::AppState;

async fn list_all<T: Resource>(state: &AppState) -> ApiResult<Vec<T>> {
    let rows = Repository::<T>::new(state.pool.clone()).select_all().await?;
    Ok(ApiResponse::success(rows))
}

/// GET /api/inventory
pub async fn inventory_list(State(state): State<AppState>) -> ApiResult<Vec<InventoryItem>> {
    list_all(&state).await
}

#[derive(Debug, Default, Deserialize)]
pub struct EventsQuery {
    #[serde(default)]
    pub upcoming: bool,
}

/// GET /api/events[?upcoming=true]
pub async fn events_list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<EventsQuery>,
) -> ApiResult<Vec<Event>> {
    if query.upcoming {
        let today = Utc::now().date_naive();
        return Ok(ApiResponse::success(Event::upcoming(&state.pool, today).await?));
    }
    list_all(&state).await
}

/// GET /api/videos
pub async fn videos_list(State(state): State<AppState>) -> ApiResult<Vec<Video>> {
    list_all(&state).await
}

/// GET /api/bio
pub async fn bio_list(State(state): State<AppState>) -> ApiResult<Vec<Bio>> {
    list_all(&state).await
}

/// GET /api/lyrics
pub async fn lyrics_list(State(state): State<AppState>) -> ApiResult<Vec<Song>> {
    list_all(&state).await
}

/// GET /api/lyrics/:id
pub async fn lyrics_get(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> ApiResult<Song> {
    let song = Repository::<Song>::new(state.pool.clone()).select_404(id).await?;
    Ok(ApiResponse::success(song))
}

/// GET /api/products
pub async fn products_list() -> ApiResult<&'static [Product]> {
    Ok(ApiResponse::success(PRODUCTS))
}
