use axum::{extract::State, Json};
use serde::Serialize;

use crate::{
    api::{extract::ValidatedJson, state::AppState},
    domain::ContactMessage,
    error::Result,
};

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub ok: bool,
}

pub async fn submit(
    State(state): State<AppState>,
    ValidatedJson(message): ValidatedJson<ContactMessage>,
) -> Result<Json<ContactResponse>> {
    state.service_context.contact_repo()?.create(message).await?;
    Ok(Json(ContactResponse { ok: true }))
}
