use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::http::pagination::{PageParams, PageQuery, Paginated};
use crate::services;
use crate::services::schedules::{
    ScheduleCreateInput, ScheduleSearchInput, ScheduleUpdateInput,
};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScheduleCreateRequest {
    #[serde(default)]
    pub customer_id: String,
    #[serde(default)]
    pub technician_id: String,
    #[serde(default)]
    pub service_id: String,
    /// YYYY-MM-DD
    #[serde(default)]
    pub date: String,
    /// HH:MM:SS
    #[serde(default)]
    pub time: String,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleUpdateRequest {
    pub technician_id: Option<String>,
    pub service_id: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleSearchQuery {
    pub customer_id: Option<String>,
    pub technician_id: Option<String>,
    pub service_id: Option<String>,
    pub status: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

async fn create(
    user: CurrentUser,
    req: web::Json<ScheduleCreateRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_staff()?;
    let req = req.into_inner();

    let db = require_db(&app_state)?;
    let schedule = services::schedules::create(
        db,
        ScheduleCreateInput {
            customer_id: req.customer_id,
            technician_id: req.technician_id,
            service_id: req.service_id,
            date: req.date,
            time: req.time,
        },
    )
    .await?;

    Ok(HttpResponse::Created().json(schedule))
}

async fn list(
    user: CurrentUser,
    query: web::Query<PageQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_staff()?;

    let page: PageParams = query.into_inner().into();
    let db = require_db(&app_state)?;
    let (schedules, total) = services::schedules::list(db, page).await?;

    Ok(HttpResponse::Ok().json(Paginated::new(schedules, page, total)))
}

async fn search(
    user: CurrentUser,
    query: web::Query<ScheduleSearchQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_staff()?;
    let query = query.into_inner();

    let page = PageParams::new(query.page.unwrap_or(1), query.limit.unwrap_or(10));
    let input = ScheduleSearchInput {
        customer_id: query.customer_id,
        technician_id: query.technician_id,
        service_id: query.service_id,
        status: query.status,
        date_from: query.date_from,
        date_to: query.date_to,
    };

    let db = require_db(&app_state)?;
    let (schedules, total) = services::schedules::search(db, input, page).await?;

    Ok(HttpResponse::Ok().json(Paginated::new(schedules, page, total)))
}

async fn get_by_id(
    user: CurrentUser,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_staff()?;

    let db = require_db(&app_state)?;
    let schedule = services::schedules::get(db, &path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(schedule))
}

async fn update(
    user: CurrentUser,
    path: web::Path<String>,
    req: web::Json<ScheduleUpdateRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_staff()?;
    let req = req.into_inner();

    let db = require_db(&app_state)?;
    let schedule = services::schedules::update(
        db,
        &path.into_inner(),
        ScheduleUpdateInput {
            technician_id: req.technician_id,
            service_id: req.service_id,
            date: req.date,
            time: req.time,
            status: req.status,
        },
    )
    .await?;

    Ok(HttpResponse::Ok().json(schedule))
}

async fn delete(
    user: CurrentUser,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_staff()?;

    let db = require_db(&app_state)?;
    services::schedules::delete(db, &path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

async fn list_by_customer(
    user: CurrentUser,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_staff()?;

    let page: PageParams = query.into_inner().into();
    let db = require_db(&app_state)?;
    let (schedules, total) =
        services::schedules::list_by_customer(db, &path.into_inner(), page).await?;

    Ok(HttpResponse::Ok().json(Paginated::new(schedules, page, total)))
}

async fn list_by_technician(
    user: CurrentUser,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_staff()?;

    let page: PageParams = query.into_inner().into();
    let db = require_db(&app_state)?;
    let (schedules, total) =
        services::schedules::list_by_technician(db, &path.into_inner(), page).await?;

    Ok(HttpResponse::Ok().json(Paginated::new(schedules, page, total)))
}

async fn list_by_status(
    user: CurrentUser,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_staff()?;

    let page: PageParams = query.into_inner().into();
    let db = require_db(&app_state)?;
    let (schedules, total) =
        services::schedules::list_by_status(db, &path.into_inner(), page).await?;

    Ok(HttpResponse::Ok().json(Paginated::new(schedules, page, total)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create));
    cfg.route("", web::get().to(list));
    cfg.route("/search", web::get().to(search));
    cfg.route("/customer/{customer_id}", web::get().to(list_by_customer));
    cfg.route("/technician/{technician_id}", web::get().to(list_by_technician));
    cfg.route("/status/{status}", web::get().to(list_by_status));
    cfg.route("/{id}", web::get().to(get_by_id));
    cfg.route("/{id}", web::put().to(update));
    cfg.route("/{id}", web::delete().to(delete));
}
