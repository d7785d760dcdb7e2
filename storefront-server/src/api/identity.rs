//! Viewer identity
//!
//! Identity is an opaque user id carried in `x-user-id`. A missing or blank
//! header is an anonymous viewer; anything that is not a UUID is refused.

use axum::extract::FromRequestParts;
use http::request::Parts;
use shared::error::{AppError, ErrorCode};
use uuid::Uuid;

pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewer(pub Option<Uuid>);

impl Viewer {
    pub fn user_id(&self) -> Option<Uuid> {
        self.0
    }
}

fn parse_viewer(raw: Option<&str>) -> Result<Viewer, AppError> {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(Viewer(None));
    };
    Uuid::parse_str(raw)
        .map(|id| Viewer(Some(id)))
        .map_err(|_| AppError::new(ErrorCode::InvalidIdentity).with_detail("header", USER_ID_HEADER))
}

impl<S: Send + Sync> FromRequestParts<S> for Viewer {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = match parts.headers.get(USER_ID_HEADER) {
            Some(value) => Some(
                value
                    .to_str()
                    .map_err(|_| AppError::new(ErrorCode::InvalidIdentity))?,
            ),
            None => None,
        };
        parse_viewer(raw)
    }
}
