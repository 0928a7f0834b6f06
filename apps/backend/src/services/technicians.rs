use sea_orm::{ActiveModelTrait, ConnectionTrait, Set};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::entities::technicians;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::http::pagination::PageParams;
use crate::repos::{self, technicians::TechnicianFilter};
use crate::services::parse_uuid;

#[derive(Debug)]
pub struct TechnicianCreateInput {
    pub name: String,
    pub phone: String,
    pub specialization: String,
}

#[derive(Debug, Default)]
pub struct TechnicianUpdateInput {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub specialization: Option<String>,
}

pub async fn create(
    conn: &impl ConnectionTrait,
    input: TechnicianCreateInput,
) -> Result<technicians::Model, AppError> {
    if input.name.trim().len() < 2 {
        return Err(AppError::validation(
            ErrorCode::ValidationError,
            "name must be at least 2 characters",
        ));
    }
    if input.phone.trim().len() < 10 || input.phone.trim().len() > 15 {
        return Err(AppError::validation(
            ErrorCode::ValidationError,
            "phone must be between 10 and 15 characters",
        ));
    }
    if input.specialization.trim().len() < 2 {
        return Err(AppError::validation(
            ErrorCode::ValidationError,
            "specialization must be at least 2 characters",
        ));
    }

    if repos::technicians::find_by_phone(conn, &input.phone).await?.is_some() {
        return Err(AppError::conflict(
            ErrorCode::PhoneTaken,
            "technician with this phone already exists",
        ));
    }

    let now = OffsetDateTime::now_utc();
    let technician = technicians::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name),
        phone: Set(input.phone),
        specialization: Set(input.specialization),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
    }
    .insert(conn)
    .await?;

    Ok(technician)
}

pub async fn get(conn: &impl ConnectionTrait, id: &str) -> Result<technicians::Model, AppError> {
    let id = parse_uuid(id, "technician")?;
    repos::technicians::find_by_id(conn, id)
        .await?
        .ok_or_else(|| AppError::not_found(ErrorCode::TechnicianNotFound, "technician not found"))
}

pub async fn update(
    conn: &impl ConnectionTrait,
    id: &str,
    input: TechnicianUpdateInput,
) -> Result<technicians::Model, AppError> {
    let technician = get(conn, id).await?;

    if let Some(phone) = &input.phone {
        if let Some(existing) = repos::technicians::find_by_phone(conn, phone).await? {
            if existing.id != technician.id {
                return Err(AppError::conflict(
                    ErrorCode::PhoneTaken,
                    "technician with this phone already exists",
                ));
            }
        }
    }

    let mut active: technicians::ActiveModel = technician.into();
    if let Some(name) = input.name {
        active.name = Set(name);
    }
    if let Some(phone) = input.phone {
        active.phone = Set(phone);
    }
    if let Some(specialization) = input.specialization {
        active.specialization = Set(specialization);
    }
    active.updated_at = Set(OffsetDateTime::now_utc());

    Ok(active.update(conn).await?)
}

pub async fn delete(conn: &impl ConnectionTrait, id: &str) -> Result<(), AppError> {
    let technician = get(conn, id).await?;

    let mut active: technicians::ActiveModel = technician.into();
    active.deleted_at = Set(Some(OffsetDateTime::now_utc()));
    active.update(conn).await?;
    Ok(())
}

pub async fn list(
    conn: &impl ConnectionTrait,
    page: PageParams,
) -> Result<(Vec<technicians::Model>, u64), AppError> {
    Ok(repos::technicians::list(conn, page).await?)
}

pub async fn search(
    conn: &impl ConnectionTrait,
    filter: &TechnicianFilter,
    page: PageParams,
) -> Result<(Vec<technicians::Model>, u64), AppError> {
    Ok(repos::technicians::search(conn, filter, page).await?)
}
