use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::http::pagination::{PageParams, PageQuery, Paginated};
use crate::repos::technicians::TechnicianFilter;
use crate::services;
use crate::services::technicians::{TechnicianCreateInput, TechnicianUpdateInput};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct TechnicianCreateRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub specialization: String,
}

#[derive(Debug, Deserialize)]
pub struct TechnicianUpdateRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub specialization: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TechnicianSearchQuery {
    pub name: Option<String>,
    pub specialization: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

async fn create(
    user: CurrentUser,
    req: web::Json<TechnicianCreateRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_staff()?;
    let req = req.into_inner();

    let db = require_db(&app_state)?;
    let technician = services::technicians::create(
        db,
        TechnicianCreateInput {
            name: req.name,
            phone: req.phone,
            specialization: req.specialization,
        },
    )
    .await?;

    Ok(HttpResponse::Created().json(technician))
}

async fn list(
    user: CurrentUser,
    query: web::Query<PageQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_staff()?;

    let page: PageParams = query.into_inner().into();
    let db = require_db(&app_state)?;
    let (technicians, total) = services::technicians::list(db, page).await?;

    Ok(HttpResponse::Ok().json(Paginated::new(technicians, page, total)))
}

async fn search(
    user: CurrentUser,
    query: web::Query<TechnicianSearchQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_staff()?;
    let query = query.into_inner();

    let page = PageParams::new(query.page.unwrap_or(1), query.limit.unwrap_or(10));
    let filter = TechnicianFilter {
        name: query.name.filter(|s| !s.is_empty()),
        specialization: query.specialization.filter(|s| !s.is_empty()),
    };

    let db = require_db(&app_state)?;
    let (technicians, total) = services::technicians::search(db, &filter, page).await?;

    Ok(HttpResponse::Ok().json(Paginated::new(technicians, page, total)))
}

async fn get_by_id(
    user: CurrentUser,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_staff()?;

    let db = require_db(&app_state)?;
    let technician = services::technicians::get(db, &path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(technician))
}

async fn update(
    user: CurrentUser,
    path: web::Path<String>,
    req: web::Json<TechnicianUpdateRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_staff()?;
    let req = req.into_inner();

    let db = require_db(&app_state)?;
    let technician = services::technicians::update(
        db,
        &path.into_inner(),
        TechnicianUpdateInput {
            name: req.name,
            phone: req.phone,
            specialization: req.specialization,
        },
    )
    .await?;

    Ok(HttpResponse::Ok().json(technician))
}

async fn delete(
    user: CurrentUser,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_staff()?;

    let db = require_db(&app_state)?;
    services::technicians::delete(db, &path.into_inner()).await?;

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
