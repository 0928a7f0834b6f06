//! User management routes. Admin only.

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::db::require_db;
use crate::entities::UserRole;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::CurrentUser;
use crate::http::pagination::{PageParams, PageQuery, Paginated};
use crate::services;
use crate::services::users::{UserCreateInput, UserUpdateInput};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserCreateRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct UserUpdateRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

fn parse_role(raw: &str) -> Result<UserRole, AppError> {
    UserRole::parse(raw).ok_or_else(|| {
        AppError::bad_request(
            ErrorCode::InvalidRole,
            format!("invalid role '{raw}', expected admin | technician | customer"),
        )
    })
}

fn parse_user_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::bad_request(ErrorCode::InvalidId, "invalid user ID format"))
}

async fn create(
    user: CurrentUser,
    req: web::Json<UserCreateRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_admin()?;
    let req = req.into_inner();

    let db = require_db(&app_state)?;
    let created = services::users::create(
        db,
        UserCreateInput {
            name: req.name,
            email: req.email,
            password: req.password,
            role: parse_role(&req.role)?,
        },
    )
    .await?;

    Ok(HttpResponse::Created().json(created))
}

async fn list(
    user: CurrentUser,
    query: web::Query<PageQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_admin()?;

    let page: PageParams = query.into_inner().into();
    let db = require_db(&app_state)?;
    let (users, total) = services::users::list(db, page).await?;

    Ok(HttpResponse::Ok().json(Paginated::new(users, page, total)))
}

async fn get_by_id(
    user: CurrentUser,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_admin()?;

    let id = parse_user_id(&path.into_inner())?;
    let db = require_db(&app_state)?;
    let found = services::users::get(db, id).await?;

    Ok(HttpResponse::Ok().json(found))
}

async fn update(
    user: CurrentUser,
    path: web::Path<String>,
    req: web::Json<UserUpdateRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_admin()?;

    let id = parse_user_id(&path.into_inner())?;
    let req = req.into_inner();
    let role = match req.role.as_deref() {
        None | Some("") => None,
        Some(raw) => Some(parse_role(raw)?),
    };

    let db = require_db(&app_state)?;
    let updated = services::users::update(
        db,
        id,
        UserUpdateInput {
            name: req.name,
            email: req.email,
            role,
            is_active: req.is_active,
        },
    )
    .await?;

    Ok(HttpResponse::Ok().json(updated))
}

async fn delete(
    user: CurrentUser,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_admin()?;

    let id = parse_user_id(&path.into_inner())?;
    let db = require_db(&app_state)?;
    services::users::delete(db, id).await?;

    Ok(HttpResponse::NoContent().finish())
}

async fn list_by_role(
    user: CurrentUser,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_admin()?;

    let role = parse_role(&path.into_inner())?;
    let page: PageParams = query.into_inner().into();
    let db = require_db(&app_state)?;
    let (users, total) = services::users::list_by_role(db, role, page).await?;

    Ok(HttpResponse::Ok().json(Paginated::new(users, page, total)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create));
    cfg.route("", web::get().to(list));
    cfg.route("/role/{role}", web::get().to(list_by_role));
    cfg.route("/{id}", web::get().to(get_by_id));
    cfg.route("/{id}", web::put().to(update));
    cfg.route("/{id}", web::delete().to(delete));
}
