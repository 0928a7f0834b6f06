use actix_web::{web, HttpResponse};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::services;
use crate::services::invoice_details::{InvoiceDetailCreateInput, InvoiceDetailUpdateInput};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct InvoiceDetailCreateRequest {
    #[serde(default)]
    pub invoice_id: String,
    #[serde(default)]
    pub service_id: String,
    #[serde(default)]
    pub quantity: i32,
}

#[derive(Debug, Deserialize)]
pub struct InvoiceDetailUpdateRequest {
    pub quantity: Option<i32>,
    pub unit_price: Option<Decimal>,
}

async fn create(
    user: CurrentUser,
    req: web::Json<InvoiceDetailCreateRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_staff()?;
    let req = req.into_inner();

    let db = require_db(&app_state)?;
    let detail = services::invoice_details::create(
        db,
        InvoiceDetailCreateInput {
            invoice_id: req.invoice_id,
            service_id: req.service_id,
            quantity: req.quantity,
        },
    )
    .await?;

    Ok(HttpResponse::Created().json(detail))
}

async fn get_by_id(
    user: CurrentUser,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_staff()?;

    let db = require_db(&app_state)?;
    let detail = services::invoice_details::get(db, &path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(detail))
}

async fn update(
    user: CurrentUser,
    path: web::Path<String>,
    req: web::Json<InvoiceDetailUpdateRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_staff()?;
    let req = req.into_inner();

    let db = require_db(&app_state)?;
    let detail = services::invoice_details::update(
        db,
        &path.into_inner(),
        InvoiceDetailUpdateInput {
            quantity: req.quantity,
            unit_price: req.unit_price,
        },
    )
    .await?;

    Ok(HttpResponse::Ok().json(detail))
}

async fn delete(
    user: CurrentUser,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_staff()?;

    let db = require_db(&app_state)?;
    services::invoice_details::delete(db, &path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

async fn list_by_invoice(
    user: CurrentUser,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_staff()?;

    let db = require_db(&app_state)?;
    let details = services::invoice_details::list_by_invoice(db, &path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(details))
}

async fn delete_by_invoice(
    user: CurrentUser,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    user.require_staff()?;

    let db = require_db(&app_state)?;
    services::invoice_details::delete_by_invoice(db, &path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create));
    cfg.route("/invoice/{invoice_id}", web::get().to(list_by_invoice));
    cfg.route("/invoice/{invoice_id}", web::delete().to(delete_by_invoice));
    cfg.route("/{id}", web::get().to(get_by_id));
    cfg.route("/{id}", web::put().to(update));
    cfg.route("/{id}", web::delete().to(delete));
}
