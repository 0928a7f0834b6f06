use sea_orm::{ActiveModelTrait, ConnectionTrait, Set};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::entities::customers;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::http::pagination::PageParams;
use crate::repos::{self, customers::CustomerFilter};
use crate::services::parse_uuid;

#[derive(Debug)]
pub struct CustomerCreateInput {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub email: String,
}

#[derive(Debug, Default)]
pub struct CustomerUpdateInput {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
}

pub async fn create(
    conn: &impl ConnectionTrait,
    input: CustomerCreateInput,
) -> Result<customers::Model, AppError> {
    validate_fields(&input.name, &input.phone, &input.address, &input.email)?;

    if repos::customers::find_by_phone(conn, &input.phone).await?.is_some() {
        return Err(AppError::conflict(
            ErrorCode::PhoneTaken,
            "customer with this phone already exists",
        ));
    }
    if repos::customers::find_by_email(conn, &input.email).await?.is_some() {
        return Err(AppError::conflict(
            ErrorCode::EmailTaken,
            "customer with this email already exists",
        ));
    }

    let now = OffsetDateTime::now_utc();
    let customer = customers::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name),
        phone: Set(input.phone),
        address: Set(input.address),
        email: Set(input.email),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
    }
    .insert(conn)
    .await?;

    Ok(customer)
}

pub async fn get(conn: &impl ConnectionTrait, id: &str) -> Result<customers::Model, AppError> {
    let id = parse_uuid(id, "customer")?;
    repos::customers::find_by_id(conn, id)
        .await?
        .ok_or_else(|| AppError::not_found(ErrorCode::CustomerNotFound, "customer not found"))
}

pub async fn update(
    conn: &impl ConnectionTrait,
    id: &str,
    input: CustomerUpdateInput,
) -> Result<customers::Model, AppError> {
    let customer = get(conn, id).await?;

    if let Some(phone) = &input.phone {
        if let Some(existing) = repos::customers::find_by_phone(conn, phone).await? {
            if existing.id != customer.id {
                return Err(AppError::conflict(
                    ErrorCode::PhoneTaken,
                    "customer with this phone already exists",
                ));
            }
        }
    }
    if let Some(email) = &input.email {
        if !email.contains('@') {
            return Err(AppError::validation(
                ErrorCode::ValidationError,
                "invalid email format",
            ));
        }
        if let Some(existing) = repos::customers::find_by_email(conn, email).await? {
            if existing.id != customer.id {
                return Err(AppError::conflict(
                    ErrorCode::EmailTaken,
                    "customer with this email already exists",
                ));
            }
        }
    }

    let mut active: customers::ActiveModel = customer.into();
    if let Some(name) = input.name {
        active.name = Set(name);
    }
    if let Some(phone) = input.phone {
        active.phone = Set(phone);
    }
    if let Some(address) = input.address {
        active.address = Set(address);
    }
    if let Some(email) = input.email {
        active.email = Set(email);
    }
    active.updated_at = Set(OffsetDateTime::now_utc());

    Ok(active.update(conn).await?)
}

pub async fn delete(conn: &impl ConnectionTrait, id: &str) -> Result<(), AppError> {
    let customer = get(conn, id).await?;

    let mut active: customers::ActiveModel = customer.into();
    active.deleted_at = Set(Some(OffsetDateTime::now_utc()));
    active.update(conn).await?;
    Ok(())
}

pub async fn list(
    conn: &impl ConnectionTrait,
    page: PageParams,
) -> Result<(Vec<customers::Model>, u64), AppError> {
    Ok(repos::customers::list(conn, page).await?)
}

pub async fn search(
    conn: &impl ConnectionTrait,
    filter: &CustomerFilter,
    page: PageParams,
) -> Result<(Vec<customers::Model>, u64), AppError> {
    Ok(repos::customers::search(conn, filter, page).await?)
}

fn validate_fields(name: &str, phone: &str, address: &str, email: &str) -> Result<(), AppError> {
    if name.trim().len() < 2 {
        return Err(AppError::validation(
            ErrorCode::ValidationError,
            "name must be at least 2 characters",
        ));
    }
    let digits = phone.trim();
    if digits.len() < 10 || digits.len() > 15 {
        return Err(AppError::validation(
            ErrorCode::ValidationError,
            "phone must be between 10 and 15 characters",
        ));
    }
    if address.trim().len() < 10 {
        return Err(AppError::validation(
            ErrorCode::ValidationError,
            "address must be at least 10 characters",
        ));
    }
    if !email.contains('@') {
        return Err(AppError::validation(
            ErrorCode::ValidationError,
            "invalid email format",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::validate_fields;

    #[test]
    fn accepts_complete_customer() {
        assert!(validate_fields(
            "Budi Santoso",
            "081234567890",
            "Jl. Merdeka No. 10, Jakarta",
            "budi@example.com"
        )
        .is_ok());
    }

    #[test]
    fn rejects_short_phone() {
        assert!(validate_fields(
            "Budi Santoso",
            "0812",
            "Jl. Merdeka No. 10, Jakarta",
            "budi@example.com"
        )
        .is_err());
    }

    #[test]
    fn rejects_short_address() {
        assert!(validate_fields(
            "Budi Santoso",
            "081234567890",
            "Jl. M",
            "budi@example.com"
        )
        .is_err());
    }
}
