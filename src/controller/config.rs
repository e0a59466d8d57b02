use axum::{extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse, Json};

use crate::{
    error::AppError, middleware::auth::AuthGuard, model::settings::BotSettings,
    service::config::ConfigService, state::AppState,
};

/// Get the stored bot settings document.
///
/// # Returns
/// - `200 OK` - Current settings
/// - `401 Unauthorized` - Missing or wrong admin token
/// - `404 Not Found` - No settings stored yet
pub async fn get_config(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.admin_token, &headers).require()?;

    let settings = ConfigService::new(&state.db, &state.feed).get().await?;

    Ok((StatusCode::OK, Json(settings)))
}

/// Replace the bot settings document.
///
/// The new settings are validated, stored and published to the change feed, so
/// every live collector sees them on its next event.
///
/// # Returns
/// - `200 OK` - Settings stored
/// - `400 Bad Request` - Settings failed validation
/// - `401 Unauthorized` - Missing or wrong admin token
pub async fn update_config(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<BotSettings>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.admin_token, &headers).require()?;

    ConfigService::new(&state.db, &state.feed)
        .update(&payload)
        .await?;

    Ok((StatusCode::OK, Json(payload)))
}
