//! Unified error codes for the storefront
//!
//! This module defines all error codes used by the server and its clients.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Identity errors
//! - 2xxx: Theme errors
//! - 3xxx: Settings errors
//! - 4xxx: Order errors
//! - 6xxx: Product and storage errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,
    /// Destructive operation dispatched without the matching confirmation
    ConfirmationRequired = 9,

    // ==================== 1xxx: Identity ====================
    /// Caller has no identity
    NotAuthenticated = 1001,
    /// Identity header is malformed
    InvalidIdentity = 1002,

    // ==================== 2xxx: Theme ====================
    /// Theme not found
    ThemeNotFound = 2001,
    /// Theme slug already taken
    ThemeSlugExists = 2002,
    /// Theme preset key unknown
    PresetNotFound = 2003,
    /// Theme is hidden from end users
    ThemeInactive = 2004,

    // ==================== 3xxx: Settings ====================
    /// Setting key unknown
    SettingNotFound = 3001,
    /// Setting value rejected
    SettingValueInvalid = 3002,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Transition not allowed from the current status
    InvalidOrderTransition = 4002,
    /// Order has already been approved
    OrderAlreadyApproved = 4003,
    /// Order is not approved
    OrderNotApproved = 4004,
    /// Order has already been verified
    OrderAlreadyVerified = 4005,
    /// Order is not verified
    OrderNotVerified = 4006,
    /// Order has no items
    OrderEmpty = 4007,
    /// Order has already been rejected
    OrderAlreadyRejected = 4008,
    /// Item quantity must be positive
    InvalidQuantity = 4009,

    // ==================== 6xxx: Product ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Product is not for sale
    ProductInactive = 6002,

    // ==================== 65xx: Object storage ====================
    /// Object storage unreachable
    StorageUnavailable = 6501,
    /// Signed URL request failed
    SignedUrlFailed = 6502,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Write rejected by the data store
    PersistenceFailed = 9003,
    /// Configuration error
    ConfigError = 9004,
    /// Network error
    NetworkError = 9005,
    /// Timeout error
    TimeoutError = 9006,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",
            ErrorCode::ConfirmationRequired => "Explicit confirmation is required",

            // Identity
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidIdentity => "User identity is malformed",

            // Theme
            ErrorCode::ThemeNotFound => "Theme not found",
            ErrorCode::ThemeSlugExists => "Theme slug already exists",
            ErrorCode::PresetNotFound => "Theme preset not found",
            ErrorCode::ThemeInactive => "Theme is not active",

            // Settings
            ErrorCode::SettingNotFound => "Setting not found",
            ErrorCode::SettingValueInvalid => "Setting value is invalid",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::InvalidOrderTransition => "Order status transition is not allowed",
            ErrorCode::OrderAlreadyApproved => "Order has already been approved",
            ErrorCode::OrderNotApproved => "Order is not approved",
            ErrorCode::OrderAlreadyVerified => "Order has already been verified",
            ErrorCode::OrderNotVerified => "Order is not verified",
            ErrorCode::OrderEmpty => "Order is empty",
            ErrorCode::OrderAlreadyRejected => "Order has already been rejected",
            ErrorCode::InvalidQuantity => "Quantity must be greater than zero",

            // Product
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ProductInactive => "Product is not available",

            // Object storage
            ErrorCode::StorageUnavailable => "Object storage is unavailable",
            ErrorCode::SignedUrlFailed => "Failed to create signed URL",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::PersistenceFailed => "The change could not be saved",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),
            9 => Ok(ErrorCode::ConfirmationRequired),

            // Identity
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidIdentity),

            // Theme
            2001 => Ok(ErrorCode::ThemeNotFound),
            2002 => Ok(ErrorCode::ThemeSlugExists),
            2003 => Ok(ErrorCode::PresetNotFound),
            2004 => Ok(ErrorCode::ThemeInactive),

            // Settings
            3001 => Ok(ErrorCode::SettingNotFound),
            3002 => Ok(ErrorCode::SettingValueInvalid),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::InvalidOrderTransition),
            4003 => Ok(ErrorCode::OrderAlreadyApproved),
            4004 => Ok(ErrorCode::OrderNotApproved),
            4005 => Ok(ErrorCode::OrderAlreadyVerified),
            4006 => Ok(ErrorCode::OrderNotVerified),
            4007 => Ok(ErrorCode::OrderEmpty),
            4008 => Ok(ErrorCode::OrderAlreadyRejected),
            4009 => Ok(ErrorCode::InvalidQuantity),

            // Product
            6001 => Ok(ErrorCode::ProductNotFound),
            6002 => Ok(ErrorCode::ProductInactive),

            // Object storage
            6501 => Ok(ErrorCode::StorageUnavailable),
            6502 => Ok(ErrorCode::SignedUrlFailed),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::PersistenceFailed),
            9004 => Ok(ErrorCode::ConfigError),
            9005 => Ok(ErrorCode::NetworkError),
            9006 => Ok(ErrorCode::TimeoutError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::ConfirmationRequired.code(), 9);

        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::ThemeNotFound.code(), 2001);
        assert_eq!(ErrorCode::ThemeSlugExists.code(), 2002);
        assert_eq!(ErrorCode::SettingNotFound.code(), 3001);
        assert_eq!(ErrorCode::OrderNotFound.code(), 4001);
        assert_eq!(ErrorCode::InvalidOrderTransition.code(), 4002);
        assert_eq!(ErrorCode::ProductNotFound.code(), 6001);
        assert_eq!(ErrorCode::StorageUnavailable.code(), 6501);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
        assert_eq!(ErrorCode::PersistenceFailed.code(), 9003);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::Unknown.is_success());
        assert!(!ErrorCode::PersistenceFailed.is_success());
    }

    #[test]
    fn test_try_from_every_declared_code() {
        let codes = [
            ErrorCode::Success,
            ErrorCode::ConfirmationRequired,
            ErrorCode::InvalidIdentity,
            ErrorCode::ThemeInactive,
            ErrorCode::SettingValueInvalid,
            ErrorCode::InvalidQuantity,
            ErrorCode::ProductInactive,
            ErrorCode::SignedUrlFailed,
            ErrorCode::TimeoutError,
        ];
        for code in codes {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(5001), Err(InvalidErrorCode(5001)));
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::OrderNotVerified).unwrap();
        assert_eq!(json, "4006");
        let code: ErrorCode = serde_json::from_str("2003").unwrap();
        assert_eq!(code, ErrorCode::PresetNotFound);
        assert!(serde_json::from_str::<ErrorCode>("12345").is_err());
    }

    #[test]
    fn test_display_and_message() {
        assert_eq!(format!("{}", ErrorCode::ThemeNotFound), "2001");
        assert_eq!(ErrorCode::PersistenceFailed.message(), "The change could not be saved");
        assert_eq!(ErrorCode::OrderEmpty.message(), "Order is empty");
    }
}
