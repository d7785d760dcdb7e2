//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::ThemeNotFound
            | Self::PresetNotFound
            | Self::SettingNotFound
            | Self::OrderNotFound
            | Self::ProductNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict (state machine refusals and uniqueness)
            Self::AlreadyExists
            | Self::ThemeSlugExists
            | Self::InvalidOrderTransition
            | Self::OrderAlreadyApproved
            | Self::OrderNotApproved
            | Self::OrderAlreadyVerified
            | Self::OrderNotVerified
            | Self::OrderAlreadyRejected => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated | Self::InvalidIdentity => StatusCode::UNAUTHORIZED,

            // 503 Service Unavailable (transient errors, client can retry)
            Self::NetworkError
            | Self::TimeoutError
            | Self::StorageUnavailable
            | Self::SignedUrlFailed => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::Unknown
            | Self::InternalError
            | Self::DatabaseError
            | Self::PersistenceFailed
            | Self::ConfigError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (validation and business errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
