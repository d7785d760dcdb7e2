//! Unified service-layer error type
//!
//! `ServiceError` bridges store errors (`StoreError`) and the API-layer error
//! (`AppError`) so services can use `?` on both.

use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};

use crate::db::StoreError;

#[derive(Debug)]
pub enum ServiceError {
    /// Data store error (auto-logged, mapped by kind)
    Store(StoreError),
    /// Business-rule error (already an AppError with the correct ErrorCode)
    App(AppError),
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        ServiceError::Store(e)
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Store(StoreError::NotFound(what)) => {
                AppError::with_message(ErrorCode::NotFound, format!("{what} not found"))
            }
            ServiceError::Store(StoreError::Conflict(what)) => {
                AppError::with_message(ErrorCode::AlreadyExists, what)
            }
            ServiceError::Store(store_err) => {
                tracing::error!(error = %store_err, "Service store error");
                AppError::new(ErrorCode::DatabaseError)
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Convenience type alias for service-layer results
pub type ServiceResult<T> = Result<T, ServiceError>;

/// A write the store refused: logged, surfaced as `PersistenceFailed`
pub fn persistence(e: StoreError) -> ServiceError {
    tracing::error!(error = %e, "Store write failed");
    ServiceError::App(AppError::persistence(e.to_string()))
}

/// A read that has a fallback: logged at warn, treated as "no result"
pub fn degrade<T>(context: &str, result: Result<T, StoreError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(error = %e, context, "Store read failed, falling back");
            None
        }
    }
}
