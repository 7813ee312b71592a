use axum::{extract::State, Json};
use chrono::Utc;

use crate::{
    api::{extract::ValidatedJson, handlers::CreatedResponse, state::AppState},
    domain::Announcement,
    error::Result,
};

/// Most announcements returned by a single list call.
pub const LIST_LIMIT: i64 = 50;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Announcement>>> {
    let announcements = state.service_context.announcement_repo()?.list(LIST_LIMIT).await?;
    Ok(Json(announcements))
}

pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(announcement): ValidatedJson<Announcement>,
) -> Result<Json<CreatedResponse>> {
    let id = state
        .service_context
        .announcement_repo()?
        .create(announcement, Utc::now())
        .await?;

    Ok(Json(CreatedResponse { id }))
}
