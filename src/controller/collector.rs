use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    data::reaction_collector::ReactionCollectorRepository, error::AppError,
    middleware::auth::AuthGuard, model::api::CollectorDto, state::AppState,
};

/// Inspect a collector record and the users it has rewarded.
///
/// # Returns
/// - `200 OK` - Record with reacted users
/// - `401 Unauthorized` - Missing or wrong admin token
/// - `404 Not Found` - No collector on that message
pub async fn get_collector(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(message_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.admin_token, &headers).require()?;

    let repo = ReactionCollectorRepository::new(&state.db);
    let record = repo
        .find_by_message_id(message_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No collector on message {}", message_id)))?;
    let reacted = repo.get_reacted_users(message_id).await?;

    Ok((StatusCode::OK, Json(CollectorDto::new(record, reacted))))
}
