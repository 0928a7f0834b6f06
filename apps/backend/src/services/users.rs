//! Admin-side user management.

use sea_orm::{ActiveModelTrait, ConnectionTrait, NotSet, Set};
use time::OffsetDateTime;
use tracing::info;

use crate::auth::password::hash_password;
use crate::entities::{users, UserRole};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::http::pagination::PageParams;
use crate::logging::pii::Redacted;
use crate::repos;

#[derive(Debug)]
pub struct UserCreateInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

#[derive(Debug, Default)]
pub struct UserUpdateInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

pub async fn create(
    conn: &impl ConnectionTrait,
    input: UserCreateInput,
) -> Result<users::Model, AppError> {
    if input.name.trim().len() < 2 {
        return Err(AppError::validation(
            ErrorCode::ValidationError,
            "name must be at least 2 characters",
        ));
    }
    if !input.email.contains('@') {
        return Err(AppError::validation(
            ErrorCode::ValidationError,
            "invalid email format",
        ));
    }
    if input.password.len() < 6 {
        return Err(AppError::validation(
            ErrorCode::ValidationError,
            "password must be at least 6 characters",
        ));
    }

    if repos::users::find_by_email(conn, &input.email).await?.is_some() {
        return Err(AppError::conflict(
            ErrorCode::EmailTaken,
            "user with this email already exists",
        ));
    }

    let now = OffsetDateTime::now_utc();
    let user = users::ActiveModel {
        id: NotSet,
        name: Set(input.name),
        email: Set(input.email),
        password_hash: Set(hash_password(&input.password)?),
        role: Set(input.role),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
    }
    .insert(conn)
    .await?;

    info!(user_id = user.id, email = %Redacted(&user.email), "user created");
    Ok(user)
}

pub async fn get(conn: &impl ConnectionTrait, id: i64) -> Result<users::Model, AppError> {
    repos::users::find_by_id(conn, id)
        .await?
        .ok_or_else(|| AppError::not_found(ErrorCode::UserNotFound, "user not found"))
}

pub async fn update(
    conn: &impl ConnectionTrait,
    id: i64,
    input: UserUpdateInput,
) -> Result<users::Model, AppError> {
    let user = get(conn, id).await?;

    if let Some(email) = &input.email {
        if !email.contains('@') {
            return Err(AppError::validation(
                ErrorCode::ValidationError,
                "invalid email format",
            ));
        }
        if let Some(existing) = repos::users::find_by_email(conn, email).await? {
            if existing.id != user.id {
                return Err(AppError::conflict(
                    ErrorCode::EmailTaken,
                    "user with this email already exists",
                ));
            }
        }
    }

    let mut active: users::ActiveModel = user.into();
    if let Some(name) = input.name {
        if name.trim().len() < 2 {
            return Err(AppError::validation(
                ErrorCode::ValidationError,
                "name must be at least 2 characters",
            ));
        }
        active.name = Set(name);
    }
    if let Some(email) = input.email {
        active.email = Set(email);
    }
    if let Some(role) = input.role {
        active.role = Set(role);
    }
    if let Some(is_active) = input.is_active {
        active.is_active = Set(is_active);
    }
    active.updated_at = Set(OffsetDateTime::now_utc());

    Ok(active.update(conn).await?)
}

pub async fn delete(conn: &impl ConnectionTrait, id: i64) -> Result<(), AppError> {
    let user = get(conn, id).await?;

    let mut active: users::ActiveModel = user.into();
    active.deleted_at = Set(Some(OffsetDateTime::now_utc()));
    active.update(conn).await?;
    Ok(())
}

pub async fn list(
    conn: &impl ConnectionTrait,
    page: PageParams,
) -> Result<(Vec<users::Model>, u64), AppError> {
    Ok(repos::users::list(conn, page).await?)
}

pub async fn list_by_role(
    conn: &impl ConnectionTrait,
    role: UserRole,
    page: PageParams,
) -> Result<(Vec<users::Model>, u64), AppError> {
    Ok(repos::users::list_by_role(conn, role, page).await?)
}
