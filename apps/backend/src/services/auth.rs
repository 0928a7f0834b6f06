use std::time::SystemTime;

use sea_orm::{ActiveModelTrait, ConnectionTrait, DatabaseConnection, NotSet, Set,
    TransactionTrait};
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::auth::jwt::{mint_token_pair, verify_refresh_token, TokenPair};
use crate::auth::password::{hash_password, verify_password};
use crate::entities::{customers, users, UserRole};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::repos;
use crate::state::security_config::SecurityConfig;

#[derive(Debug)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<UserRole>,
    /// Required when registering a customer
    pub phone: Option<String>,
    /// Required when registering a customer
    pub address: Option<String>,
}

/// Register a new account. Customer registrations atomically create the
/// matching customer record, so dispatching can reference it immediately.
pub async fn register(
    db: &DatabaseConnection,
    input: RegisterInput,
) -> Result<users::Model, AppError> {
    validate_register(&input)?;

    if repos::users::find_by_email(db, &input.email).await?.is_some() {
        return Err(AppError::conflict(
            ErrorCode::EmailTaken,
            "user with this email already exists",
        ));
    }

    let role = input.role.unwrap_or_default();
    if role == UserRole::Customer {
        if input.phone.as_deref().unwrap_or("").trim().is_empty() {
            return Err(AppError::validation(
                ErrorCode::ValidationError,
                "phone is required for customer registration",
            ));
        }
        if input.address.as_deref().unwrap_or("").trim().is_empty() {
            return Err(AppError::validation(
                ErrorCode::ValidationError,
                "address is required for customer registration",
            ));
        }
    }

    let password_hash = hash_password(&input.password)?;
    let now = OffsetDateTime::now_utc();

    let txn = db.begin().await?;

    let user = users::ActiveModel {
        id: NotSet,
        name: Set(input.name.clone()),
        email: Set(input.email.clone()),
        password_hash: Set(password_hash),
        role: Set(role),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
    }
    .insert(&txn)
    .await?;

    if role == UserRole::Customer {
        customers::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name.clone()),
            phone: Set(input.phone.clone().unwrap_or_default()),
            address: Set(input.address.clone().unwrap_or_default()),
            email: Set(input.email.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    info!(
        user_id = user.id,
        email = %Redacted(&user.email),
        role = role.as_str(),
        "user registered"
    );

    Ok(user)
}

/// Authenticate by email + password and mint a token pair.
pub async fn login(
    conn: &impl ConnectionTrait,
    email: &str,
    password: &str,
    security: &SecurityConfig,
) -> Result<(TokenPair, users::Model), AppError> {
    let user = repos::users::find_by_email(conn, email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !user.is_active {
        return Err(AppError::AccountDeactivated);
    }

    if !verify_password(password, &user.password_hash)? {
        return Err(AppError::InvalidCredentials);
    }

    let pair = mint_token_pair(
        user.id,
        &user.email,
        user.role,
        SystemTime::now(),
        security,
    )?;

    info!(user_id = user.id, email = %Redacted(&user.email), "login");

    Ok((pair, user))
}

/// Exchange a refresh token for a fresh pair. The user must still exist and
/// be active.
pub async fn refresh(
    conn: &impl ConnectionTrait,
    refresh_token: &str,
    security: &SecurityConfig,
) -> Result<TokenPair, AppError> {
    let claims = verify_refresh_token(refresh_token, security)?;

    let user = repos::users::find_by_id(conn, claims.user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !user.is_active {
        return Err(AppError::AccountDeactivated);
    }

    mint_token_pair(
        user.id,
        &user.email,
        user.role,
        SystemTime::now(),
        security,
    )
}

/// Load the user behind a set of verified access-token claims.
pub async fn current_user(
    conn: &impl ConnectionTrait,
    user_id: i64,
) -> Result<users::Model, AppError> {
    repos::users::find_by_id(conn, user_id)
        .await?
        .ok_or_else(|| AppError::not_found(ErrorCode::UserNotFound, "user not found"))
}

fn validate_register(input: &RegisterInput) -> Result<(), AppError> {
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
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{validate_register, RegisterInput};

    fn input() -> RegisterInput {
        RegisterInput {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            password: "secret123".to_string(),
            role: None,
            phone: None,
            address: None,
        }
    }

    #[test]
    fn valid_input_passes() {
        assert!(validate_register(&input()).is_ok());
    }

    #[test]
    fn short_name_fails() {
        let mut bad = input();
        bad.name = "J".to_string();
        assert!(validate_register(&bad).is_err());
    }

    #[test]
    fn mail_without_at_fails() {
        let mut bad = input();
        bad.email = "janeexample.com".to_string();
        assert!(validate_register(&bad).is_err());
    }

    #[test]
    fn short_password_fails() {
        let mut bad = input();
        bad.password = "12345".to_string();
        assert!(validate_register(&bad).is_err());
    }
}
