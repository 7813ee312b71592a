use axum::{extract::State, Json};

use crate::{
    api::{extract::ValidatedJson, handlers::CreatedResponse, state::AppState},
    domain::Event,
    error::Result,
};

pub const LIST_LIMIT: i64 = 100;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Event>>> {
    let events = state.service_context.event_repo()?.list(LIST_LIMIT).await?;
    Ok(Json(events))
}

pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(event): ValidatedJson<Event>,
) -> Result<Json<CreatedResponse>> {
    let id = state.service_context.event_repo()?.create(event).await?;
    Ok(Json(CreatedResponse { id }))
}
