use axum::{extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse, Json};

use crate::{
    error::AppError,
    middleware::auth::AuthGuard,
    model::api::{CreateGuildEventDto, GuildEventDto},
    service::guild_event::GuildEventService,
    state::AppState,
};

/// Create a claim event and post its claim button.
///
/// # Returns
/// - `201 Created` - Event stored and announced
/// - `400 Bad Request` - Non-positive points or claim limit, or duration out of range
/// - `401 Unauthorized` - Missing or wrong admin token
pub async fn create_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateGuildEventDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.admin_token, &headers).require()?;

    let event = GuildEventService::new(&state)
        .create(payload.try_into()?)
        .await?;

    Ok((StatusCode::CREATED, Json(GuildEventDto::from(event))))
}
