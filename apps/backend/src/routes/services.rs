//! Routes for the service catalog.

use actix_web::{web, HttpResponse};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::http::pagination::{PageParams, PageQuery, Paginated};
use crate::repos::services::ServiceFilter;
use crate::services;
use crate::services::catalog::{ServiceCreateInput, ServiceUpdateInput};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct ServiceCreateRequest {
    #[serde(default)]
    pub name: String,
    pub price: Decimal,
    /// in minutes
    pub duration: i32,
}

#[derive(Debug, Deserialize)]
pub struct ServiceUpdateRequest {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub duration: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct ServiceSearchQuery {
    pub name: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

async fn create(
    user: CurrentUser,
    req: web::Json<ServiceCreateRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_staff()?;
    let req = req.into_inner();

    let db = require_db(&app_state)?;
    let service = services::catalog::create(
        db,
        ServiceCreateInput {
            name: req.name,
            price: req.price,
            duration_minutes: req.duration,
        },
    )
    .await?;

    Ok(HttpResponse::Created().json(service))
}

async fn list(
    user: CurrentUser,
    query: web::Query<PageQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_staff()?;

    let page: PageParams = query.into_inner().into();
    let db = require_db(&app_state)?;
    let (items, total) = services::catalog::list(db, page).await?;

    Ok(HttpResponse::Ok().json(Paginated::new(items, page, total)))
}

async fn search(
    user: CurrentUser,
    query: web::Query<ServiceSearchQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_staff()?;
    let query = query.into_inner();

    let page = PageParams::new(query.page.unwrap_or(1), query.limit.unwrap_or(10));
    let filter = ServiceFilter {
        name: query.name.filter(|s| !s.is_empty()),
        min_price: query.min_price,
        max_price: query.max_price,
    };

    let db = require_db(&app_state)?;
    let (items, total) = services::catalog::search(db, &filter, page).await?;

    Ok(HttpResponse::Ok().json(Paginated::new(items, page, total)))
}

async fn get_by_id(
    user: CurrentUser,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_staff()?;

    let db = require_db(&app_state)?;
    let service = services::catalog::get(db, &path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(service))
}

async fn update(
    user: CurrentUser,
    path: web::Path<String>,
    req: web::Json<ServiceUpdateRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_staff()?;
    let req = req.into_inner();

    let db = require_db(&app_state)?;
    let service = services::catalog::update(
        db,
        &path.into_inner(),
        ServiceUpdateInput {
            name: req.name,
            price: req.price,
            duration_minutes: req.duration,
        },
    )
    .await?;

    Ok(HttpResponse::Ok().json(service))
}

async fn delete(
    user: CurrentUser,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_staff()?;

    let db = require_db(&app_state)?;
    services::catalog::delete(db, &path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create));
    cfg.route("", web::get().to(list));
    cfg.route("/search", web::get().to(search));
    cfg.route("/{id}", web::get().to(get_by_id));
    cfg.route("/{id}", web::put().to(update));
    cfg.route("/{id}", web::delete().to(delete));
}
