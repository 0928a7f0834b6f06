use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::http::pagination::{PageParams, PageQuery, Paginated};
use crate::services;
use crate::services::invoices::{InvoiceCreateInput, InvoiceSearchInput, InvoiceUpdateInput};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct InvoiceCreateRequest {
    #[serde(default)]
    pub schedule_id: String,
    #[serde(default)]
    pub customer_id: String,
    /// YYYY-MM-DD
    #[serde(default)]
    pub invoice_date: String,
    /// YYYY-MM-DD
    #[serde(default)]
    pub due_date: String,
}

#[derive(Debug, Deserialize)]
pub struct InvoiceUpdateRequest {
    pub invoice_date: Option<String>,
    pub due_date: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InvoiceSearchQuery {
    pub customer_id: Option<String>,
    pub schedule_id: Option<String>,
    pub status: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

async fn create(
    user: CurrentUser,
    req: web::Json<InvoiceCreateRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_staff()?;
    let req = req.into_inner();

    let db = require_db(&app_state)?;
    let invoice = services::invoices::create(
        db,
        InvoiceCreateInput {
            schedule_id: req.schedule_id,
            customer_id: req.customer_id,
            invoice_date: req.invoice_date,
            due_date: req.due_date,
        },
    )
    .await?;

    Ok(HttpResponse::Created().json(invoice))
}

async fn list(
    user: CurrentUser,
    query: web::Query<PageQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_staff()?;

    let page: PageParams = query.into_inner().into();
    let db = require_db(&app_state)?;
    let (invoices, total) = services::invoices::list(db, page).await?;

    Ok(HttpResponse::Ok().json(Paginated::new(invoices, page, total)))
}

async fn search(
    user: CurrentUser,
    query: web::Query<InvoiceSearchQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_staff()?;
    let query = query.into_inner();

    let page = PageParams::new(query.page.unwrap_or(1), query.limit.unwrap_or(10));
    let input = InvoiceSearchInput {
        customer_id: query.customer_id,
        schedule_id: query.schedule_id,
        status: query.status,
        date_from: query.date_from,
        date_to: query.date_to,
    };

    let db = require_db(&app_state)?;
    let (invoices, total) = services::invoices::search(db, input, page).await?;

    Ok(HttpResponse::Ok().json(Paginated::new(invoices, page, total)))
}

async fn get_by_id(
    user: CurrentUser,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_staff()?;

    let db = require_db(&app_state)?;
    let invoice = services::invoices::get(db, &path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(invoice))
}

async fn update(
    user: CurrentUser,
    path: web::Path<String>,
    req: web::Json<InvoiceUpdateRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_staff()?;
    let req = req.into_inner();

    let db = require_db(&app_state)?;
    let invoice = services::invoices::update(
        db,
        &path.into_inner(),
        InvoiceUpdateInput {
            invoice_date: req.invoice_date,
            due_date: req.due_date,
            status: req.status,
        },
    )
    .await?;

    Ok(HttpResponse::Ok().json(invoice))
}

async fn delete(
    user: CurrentUser,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_staff()?;

    let db = require_db(&app_state)?;
    services::invoices::delete(db, &path.into_inner()).await?;

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
    let (invoices, total) =
        services::invoices::list_by_customer(db, &path.into_inner(), page).await?;

    Ok(HttpResponse::Ok().json(Paginated::new(invoices, page, total)))
}

async fn get_by_schedule(
    user: CurrentUser,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_staff()?;

    let db = require_db(&app_state)?;
    let invoice = services::invoices::get_by_schedule(db, &path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(invoice))
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
    let (invoices, total) =
        services::invoices::list_by_status(db, &path.into_inner(), page).await?;

    Ok(HttpResponse::Ok().json(Paginated::new(invoices, page, total)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create));
    cfg.route("", web::get().to(list));
    cfg.route("/search", web::get().to(search));
    cfg.route("/customer/{customer_id}", web::get().to(list_by_customer));
    cfg.route("/schedule/{schedule_id}", web::get().to(get_by_schedule));
    cfg.route("/status/{status}", web::get().to(list_by_status));
    cfg.route("/{id}", web::get().to(get_by_id));
    cfg.route("/{id}", web::put().to(update));
    cfg.route("/{id}", web::delete().to(delete));
}
