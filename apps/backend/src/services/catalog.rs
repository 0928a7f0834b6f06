//! The catalog of offered AC services (cleaning, refrigerant refill, ...).
//! "Service" here is a product of the business, not a software service.

use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::entities::services;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::http::pagination::PageParams;
use crate::repos::{self, services::ServiceFilter};
use crate::services::parse_uuid;

#[derive(Debug)]
pub struct ServiceCreateInput {
    pub name: String,
    pub price: Decimal,
    pub duration_minutes: i32,
}

#[derive(Debug, Default)]
pub struct ServiceUpdateInput {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub duration_minutes: Option<i32>,
}

pub async fn create(
    conn: &impl ConnectionTrait,
    input: ServiceCreateInput,
) -> Result<services::Model, AppError> {
    if input.name.trim().len() < 2 {
        return Err(AppError::validation(
            ErrorCode::ValidationError,
            "name must be at least 2 characters",
        ));
    }
    validate_price(input.price)?;
    validate_duration(input.duration_minutes)?;

    let now = OffsetDateTime::now_utc();
    let service = services::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name),
        price: Set(input.price),
        duration_minutes: Set(input.duration_minutes),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
    }
    .insert(conn)
    .await?;

    Ok(service)
}

pub async fn get(conn: &impl ConnectionTrait, id: &str) -> Result<services::Model, AppError> {
    let id = parse_uuid(id, "service")?;
    repos::services::find_by_id(conn, id)
        .await?
        .ok_or_else(|| AppError::not_found(ErrorCode::ServiceNotFound, "service not found"))
}

pub async fn update(
    conn: &impl ConnectionTrait,
    id: &str,
    input: ServiceUpdateInput,
) -> Result<services::Model, AppError> {
    let service = get(conn, id).await?;

    let mut active: services::ActiveModel = service.into();
    if let Some(name) = input.name {
        active.name = Set(name);
    }
    if let Some(price) = input.price {
        validate_price(price)?;
        active.price = Set(price);
    }
    if let Some(duration_minutes) = input.duration_minutes {
        validate_duration(duration_minutes)?;
        active.duration_minutes = Set(duration_minutes);
    }
    active.updated_at = Set(OffsetDateTime::now_utc());

    Ok(active.update(conn).await?)
}

pub async fn delete(conn: &impl ConnectionTrait, id: &str) -> Result<(), AppError> {
    let service = get(conn, id).await?;

    let mut active: services::ActiveModel = service.into();
    active.deleted_at = Set(Some(OffsetDateTime::now_utc()));
    active.update(conn).await?;
    Ok(())
}

pub async fn list(
    conn: &impl ConnectionTrait,
    page: PageParams,
) -> Result<(Vec<services::Model>, u64), AppError> {
    Ok(repos::services::list(conn, page).await?)
}

pub async fn search(
    conn: &impl ConnectionTrait,
    filter: &ServiceFilter,
    page: PageParams,
) -> Result<(Vec<services::Model>, u64), AppError> {
    Ok(repos::services::search(conn, filter, page).await?)
}

fn validate_price(price: Decimal) -> Result<(), AppError> {
    if price < Decimal::ZERO {
        return Err(AppError::validation(
            ErrorCode::InvalidPrice,
            "price must not be negative",
        ));
    }
    Ok(())
}

fn validate_duration(duration_minutes: i32) -> Result<(), AppError> {
    if duration_minutes < 1 {
        return Err(AppError::validation(
            ErrorCode::ValidationError,
            "duration must be at least 1 minute",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{validate_duration, validate_price};

    #[test]
    fn zero_price_is_allowed() {
        assert!(validate_price(Decimal::ZERO).is_ok());
        assert!(validate_price(Decimal::from(150_000)).is_ok());
    }

    #[test]
    fn negative_price_is_rejected() {
        assert!(validate_price(Decimal::from(-1)).is_err());
    }

    #[test]
    fn duration_must_be_positive() {
        assert!(validate_duration(0).is_err());
        assert!(validate_duration(30).is_ok());
    }
}
