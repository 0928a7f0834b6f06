//! Error codes for the dashboard backend API.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that
//! appear in HTTP responses. Add new codes here; never pass ad-hoc strings
//! as error codes.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    Unauthorized,
    UnauthorizedMissingBearer,
    UnauthorizedInvalidJwt,
    UnauthorizedExpiredJwt,
    WrongTokenType,
    InvalidCredentials,
    AccountDeactivated,
    Forbidden,
    InsufficientRole,

    // Request validation
    ValidationError,
    InvalidId,
    InvalidDate,
    InvalidTime,
    InvalidStatus,
    InvalidRole,
    InvalidQuantity,
    InvalidPrice,

    // Conflicts
    EmailTaken,
    PhoneTaken,

    // Lookups
    UserNotFound,
    CustomerNotFound,
    TechnicianNotFound,
    ServiceNotFound,
    ScheduleNotFound,
    InvoiceNotFound,
    InvoiceDetailNotFound,

    // Infrastructure
    DbError,
    DbUnavailable,
    ConfigError,
    Internal,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            ErrorCode::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            ErrorCode::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            ErrorCode::WrongTokenType => "WRONG_TOKEN_TYPE",
            ErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorCode::AccountDeactivated => "ACCOUNT_DEACTIVATED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::InsufficientRole => "INSUFFICIENT_ROLE",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::InvalidId => "INVALID_ID",
            ErrorCode::InvalidDate => "INVALID_DATE",
            ErrorCode::InvalidTime => "INVALID_TIME",
            ErrorCode::InvalidStatus => "INVALID_STATUS",
            ErrorCode::InvalidRole => "INVALID_ROLE",
            ErrorCode::InvalidQuantity => "INVALID_QUANTITY",
            ErrorCode::InvalidPrice => "INVALID_PRICE",
            ErrorCode::EmailTaken => "EMAIL_TAKEN",
            ErrorCode::PhoneTaken => "PHONE_TAKEN",
            ErrorCode::UserNotFound => "USER_NOT_FOUND",
            ErrorCode::CustomerNotFound => "CUSTOMER_NOT_FOUND",
            ErrorCode::TechnicianNotFound => "TECHNICIAN_NOT_FOUND",
            ErrorCode::ServiceNotFound => "SERVICE_NOT_FOUND",
            ErrorCode::ScheduleNotFound => "SCHEDULE_NOT_FOUND",
            ErrorCode::InvoiceNotFound => "INVOICE_NOT_FOUND",
            ErrorCode::InvoiceDetailNotFound => "INVOICE_DETAIL_NOT_FOUND",
            ErrorCode::DbError => "DB_ERROR",
            ErrorCode::DbUnavailable => "DB_UNAVAILABLE",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::ErrorCode;

    #[test]
    fn codes_are_screaming_snake_case() {
        let codes = [
            ErrorCode::Unauthorized,
            ErrorCode::InvalidId,
            ErrorCode::EmailTaken,
            ErrorCode::ScheduleNotFound,
            ErrorCode::DbUnavailable,
        ];
        for code in codes {
            let s = code.as_str();
            assert!(s
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_'));
        }
    }
}
