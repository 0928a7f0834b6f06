//! Initial data for a fresh database: one user per role and the standard
//! service catalog. Idempotent; existing rows are left untouched.

use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectionTrait, NotSet, Set};
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use crate::auth::password::hash_password;
use crate::entities::{services, users, UserRole};
use crate::error::AppError;
use crate::repos;

pub async fn seed_initial_data(conn: &impl ConnectionTrait) -> Result<(), AppError> {
    seed_user(conn, "System Administrator", "admin@example.com", "admin123", UserRole::Admin)
        .await?;
    seed_user(
        conn,
        "Default Technician",
        "technician@example.com",
        "tech123",
        UserRole::Technician,
    )
    .await?;
    seed_user(
        conn,
        "Default Customer",
        "customer@example.com",
        "customer123",
        UserRole::Customer,
    )
    .await?;

    seed_service(conn, "Cuci AC", Decimal::from(150_000), 60).await?;
    seed_service(conn, "Isi Freon", Decimal::from(200_000), 45).await?;
    seed_service(conn, "Bongkar Pasang AC", Decimal::from(500_000), 180).await?;
    seed_service(conn, "Service Rutin AC", Decimal::from(100_000), 30).await?;

    Ok(())
}

async fn seed_user(
    conn: &impl ConnectionTrait,
    name: &str,
    email: &str,
    password: &str,
    role: UserRole,
) -> Result<(), AppError> {
    if repos::users::find_by_email(conn, email).await?.is_some() {
        return Ok(());
    }

    let now = OffsetDateTime::now_utc();
    users::ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        password_hash: Set(hash_password(password)?),
        role: Set(role),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
    }
    .insert(conn)
    .await?;

    info!(email, role = role.as_str(), "seeded user");
    Ok(())
}

async fn seed_service(
    conn: &impl ConnectionTrait,
    name: &str,
    price: Decimal,
    duration_minutes: i32,
) -> Result<(), AppError> {
    if repos::services::find_by_name(conn, name).await?.is_some() {
        return Ok(());
    }

    let now = OffsetDateTime::now_utc();
    services::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        price: Set(price),
        duration_minutes: Set(duration_minutes),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
    }
    .insert(conn)
    .await?;

    info!(name, "seeded service");
    Ok(())
}
