//! Business rules on top of the repos layer. Routes stay thin; everything
//! that can fail for a domain reason fails here with a typed AppError.

pub mod auth;
pub mod catalog;
pub mod customers;
pub mod invoice_details;
pub mod invoices;
pub mod schedules;
pub mod technicians;
pub mod users;

use uuid::Uuid;

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Parse a path/body id, naming the entity in the error detail.
pub(crate) fn parse_uuid(raw: &str, what: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| {
        AppError::bad_request(ErrorCode::InvalidId, format!("invalid {what} ID format"))
    })
}

#[cfg(test)]
mod tests {
    use super::parse_uuid;

    #[test]
    fn parse_uuid_accepts_canonical_form() {
        assert!(parse_uuid("8c0f33c6-4dd6-4f3b-90f6-28f371df0f95", "customer").is_ok());
    }

    #[test]
    fn parse_uuid_rejects_garbage() {
        let err = parse_uuid("not-a-uuid", "customer").unwrap_err();
        assert!(err.to_string().contains("customer"));
    }
}
