use axum::{extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse, Json};

use crate::{
    error::AppError,
    middleware::auth::AuthGuard,
    model::api::{IssuePunishmentDto, PunishmentDto},
    service::punishment::PunishmentService,
    state::AppState,
};

/// Issue a warn, mute, kick or ban.
///
/// # Returns
/// - `201 Created` - Sentence applied and recorded
/// - `400 Bad Request` - Duration out of range or not allowed, or no mute role configured
/// - `401 Unauthorized` - Missing or wrong admin token
pub async fn issue_punishment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<IssuePunishmentDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.admin_token, &headers).require()?;

    let punishment = PunishmentService::new(&state)
        .issue(payload.try_into()?)
        .await?;

    Ok((StatusCode::CREATED, Json(PunishmentDto::from(punishment))))
}
