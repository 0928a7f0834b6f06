use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::http::pagination::{PageParams, PageQuery, Paginated};
use crate::repos::customers::CustomerFilter;
use crate::services;
use crate::services::customers::{CustomerCreateInput, CustomerUpdateInput};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CustomerCreateRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct CustomerUpdateRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CustomerSearchQuery {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

async fn create(
    user: CurrentUser,
    req: web::Json<CustomerCreateRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_staff()?;
    let req = req.into_inner();

    let db = require_db(&app_state)?;
    let customer = services::customers::create(
        db,
        CustomerCreateInput {
            name: req.name,
            phone: req.phone,
            address: req.address,
            email: req.email,
        },
    )
    .await?;

    Ok(HttpResponse::Created().json(customer))
}

async fn list(
    user: CurrentUser,
    query: web::Query<PageQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_staff()?;

    let page: PageParams = query.into_inner().into();
    let db = require_db(&app_state)?;
    let (customers, total) = services::customers::list(db, page).await?;

    Ok(HttpResponse::Ok().json(Paginated::new(customers, page, total)))
}

async fn search(
    user: CurrentUser,
    query: web::Query<CustomerSearchQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_staff()?;
    let query = query.into_inner();

    let page = PageParams::new(query.page.unwrap_or(1), query.limit.unwrap_or(10));
    let filter = CustomerFilter {
        name: query.name.filter(|s| !s.is_empty()),
        phone: query.phone.filter(|s| !s.is_empty()),
        email: query.email.filter(|s| !s.is_empty()),
    };

    let db = require_db(&app_state)?;
    let (customers, total) = services::customers::search(db, &filter, page).await?;

    Ok(HttpResponse::Ok().json(Paginated::new(customers, page, total)))
}

async fn get_by_id(
    user: CurrentUser,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_staff()?;

    let db = require_db(&app_state)?;
    let customer = services::customers::get(db, &path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(customer))
}

async fn update(
    user: CurrentUser,
    path: web::Path<String>,
    req: web::Json<CustomerUpdateRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_staff()?;
    let req = req.into_inner();

    let db = require_db(&app_state)?;
    let customer = services::customers::update(
        db,
        &path.into_inner(),
        CustomerUpdateInput {
            name: req.name,
            phone: req.phone,
            address: req.address,
            email: req.email,
        },
    )
    .await?;

    Ok(HttpResponse::Ok().json(customer))
}

async fn delete(
    user: CurrentUser,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_staff()?;

    let db = require_db(&app_state)?;
    services::customers::delete(db, &path.into_inner()).await?;

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
