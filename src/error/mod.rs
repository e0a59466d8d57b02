//! Error types and HTTP response handling.
//!
//! `AppError` is the top-level error type returned by repositories, services and
//! controllers. Discord event handlers and scheduler jobs never propagate it; they
//! log it at their boundary so a single bad event cannot take the bot down.

pub mod config;
pub mod internal;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    error::{config::ConfigError, internal::InternalError},
    model::api::ErrorDto,
};

/// Top-level application error type.
///
/// Most variants use `#[from]` for automatic conversion with `?`. The message-carrying
/// variants map to specific HTTP status codes for the admin API; everything else is a
/// 500 with the details logged server-side.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or while reading the settings document.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Unexpected internal state, e.g. a stored snowflake that fails to parse.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// HTTP client request error from reqwest (mint queue publishing).
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// JSON (de)serialization of a stored document failed.
    #[error(transparent)]
    SerdeErr(#[from] serde_json::Error),

    /// Binding or serving the admin API listener failed.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Resource not found error.
    ///
    /// Results in 404 Not Found with the provided error message.
    #[error("{0}")]
    NotFound(String),

    /// Invalid request error.
    ///
    /// Results in 400 Bad Request with the provided error message.
    #[error("{0}")]
    BadRequest(String),

    /// Missing or invalid admin token.
    #[error("Unauthorized")]
    Unauthorized,
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

/// Converts application errors into HTTP responses for the admin API.
///
/// # Returns
/// - 400 Bad Request - For `BadRequest`
/// - 401 Unauthorized - For `Unauthorized`
/// - 404 Not Found - For `NotFound`
/// - 500 Internal Server Error - For all other error types
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(ErrorDto { error: msg })).into_response()
            }
            Self::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorDto { error: msg })).into_response()
            }
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorDto {
                    error: "Unauthorized".to_string(),
                }),
            )
                .into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error message and returns a generic message to the client.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
