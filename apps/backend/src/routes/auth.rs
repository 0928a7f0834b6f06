use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::TokenPair;
use crate::db::require_db;
use crate::entities::{users, UserRole};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::CurrentUser;
use crate::services;
use crate::services::auth::RegisterInput;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub role: Option<String>,
    // Customer specific fields (required when role is customer)
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: TokenPair,
    pub user: users::Model,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh_token: String,
}

async fn register(
    req: web::Json<RegisterRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let req = req.into_inner();

    let role = match req.role.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(UserRole::parse(raw).ok_or_else(|| {
            AppError::bad_request(
                ErrorCode::InvalidRole,
                format!("invalid role '{raw}', expected admin | technician | customer"),
            )
        })?),
    };

    let db = require_db(&app_state)?;
    let user = services::auth::register(
        db,
        RegisterInput {
            name: req.name,
            email: req.email,
            password: req.password,
            role,
            phone: req.phone,
            address: req.address,
        },
    )
    .await?;

    Ok(HttpResponse::Created().json(user))
}

async fn login(
    req: web::Json<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    if req.email.trim().is_empty() {
        return Err(AppError::validation(
            ErrorCode::ValidationError,
            "email cannot be empty",
        ));
    }
    if req.password.is_empty() {
        return Err(AppError::validation(
            ErrorCode::ValidationError,
            "password cannot be empty",
        ));
    }

    let db = require_db(&app_state)?;
    let (token, user) =
        services::auth::login(db, &req.email, &req.password, &app_state.security).await?;

    Ok(HttpResponse::Ok().json(LoginResponse { token, user }))
}

async fn refresh(
    req: web::Json<RefreshRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    if req.refresh_token.is_empty() {
        return Err(AppError::validation(
            ErrorCode::ValidationError,
            "refresh_token cannot be empty",
        ));
    }

    let db = require_db(&app_state)?;
    let pair = services::auth::refresh(db, &req.refresh_token, &app_state.security).await?;

    Ok(HttpResponse::Ok().json(pair))
}

/// Profile of the authenticated caller.
pub async fn me(
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let record = services::auth::current_user(db, user.user_id).await?;
    Ok(HttpResponse::Ok().json(record))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register));
    cfg.route("/login", web::post().to(login));
    cfg.route("/refresh", web::post().to(refresh));
}
