//! Admin API access control.

use axum::http::{header::AUTHORIZATION, HeaderMap};

use crate::error::AppError;

/// Checks the bearer token on an admin request.
pub struct AuthGuard<'a> {
    admin_token: &'a str,
    headers: &'a HeaderMap,
}

impl<'a> AuthGuard<'a> {
    pub fn new(admin_token: &'a str, headers: &'a HeaderMap) -> Self {
        Self {
            admin_token,
            headers,
        }
    }

    /// Requires `Authorization: Bearer <ADMIN_TOKEN>`.
    ///
    /// # Returns
    /// - `Ok(())` - Token matches
    /// - `Err(AppError::Unauthorized)` - Header missing, malformed or wrong
    pub fn require(&self) -> Result<(), AppError> {
        let token = self
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(AppError::Unauthorized)?;

        if self.admin_token.is_empty() || token != self.admin_token {
            return Err(AppError::Unauthorized);
        }

        Ok(())
    }
}
