use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::entities::invoices::{self, InvoiceStatus};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::http::pagination::PageParams;
use crate::repos::{self, invoices::InvoiceFilter};
use crate::services::parse_uuid;
use crate::utils::dates::parse_date;

#[derive(Debug)]
pub struct InvoiceCreateInput {
    pub schedule_id: String,
    pub customer_id: String,
    /// YYYY-MM-DD
    pub invoice_date: String,
    /// YYYY-MM-DD
    pub due_date: String,
}

#[derive(Debug, Default)]
pub struct InvoiceUpdateInput {
    pub invoice_date: Option<String>,
    pub due_date: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Default)]
pub struct InvoiceSearchInput {
    pub customer_id: Option<String>,
    pub schedule_id: Option<String>,
    pub status: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

/// Create an invoice for a schedule. The total starts at zero and is
/// recomputed as line items are added.
pub async fn create(
    conn: &impl ConnectionTrait,
    input: InvoiceCreateInput,
) -> Result<invoices::Model, AppError> {
    let schedule_id = parse_uuid(&input.schedule_id, "schedule")?;
    let customer_id = parse_uuid(&input.customer_id, "customer")?;
    let invoice_date = parse_date(&input.invoice_date)?;
    let due_date = parse_date(&input.due_date)?;

    repos::customers::find_by_id(conn, customer_id)
        .await?
        .ok_or_else(|| AppError::not_found(ErrorCode::CustomerNotFound, "customer not found"))?;
    repos::schedules::find_by_id(conn, schedule_id)
        .await?
        .ok_or_else(|| AppError::not_found(ErrorCode::ScheduleNotFound, "schedule not found"))?;

    let now = OffsetDateTime::now_utc();
    let invoice = invoices::ActiveModel {
        id: Set(Uuid::new_v4()),
        schedule_id: Set(schedule_id),
        customer_id: Set(customer_id),
        invoice_date: Set(invoice_date),
        due_date: Set(due_date),
        total_amount: Set(Decimal::ZERO),
        status: Set(InvoiceStatus::Unpaid),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
    }
    .insert(conn)
    .await?;

    Ok(invoice)
}

pub async fn get(conn: &impl ConnectionTrait, id: &str) -> Result<invoices::Model, AppError> {
    let id = parse_uuid(id, "invoice")?;
    repos::invoices::find_by_id(conn, id)
        .await?
        .ok_or_else(|| AppError::not_found(ErrorCode::InvoiceNotFound, "invoice not found"))
}

pub async fn update(
    conn: &impl ConnectionTrait,
    id: &str,
    input: InvoiceUpdateInput,
) -> Result<invoices::Model, AppError> {
    let invoice = get(conn, id).await?;
    let mut active: invoices::ActiveModel = invoice.into();

    if let Some(raw) = input.invoice_date {
        active.invoice_date = Set(parse_date(&raw)?);
    }
    if let Some(raw) = input.due_date {
        active.due_date = Set(parse_date(&raw)?);
    }
    if let Some(raw) = input.status {
        active.status = Set(parse_status(&raw)?);
    }
    active.updated_at = Set(OffsetDateTime::now_utc());

    Ok(active.update(conn).await?)
}

pub async fn delete(conn: &impl ConnectionTrait, id: &str) -> Result<(), AppError> {
    let invoice = get(conn, id).await?;

    let mut active: invoices::ActiveModel = invoice.into();
    active.deleted_at = Set(Some(OffsetDateTime::now_utc()));
    active.update(conn).await?;
    Ok(())
}

pub async fn list(
    conn: &impl ConnectionTrait,
    page: PageParams,
) -> Result<(Vec<invoices::Model>, u64), AppError> {
    Ok(repos::invoices::list(conn, page).await?)
}

pub async fn search(
    conn: &impl ConnectionTrait,
    input: InvoiceSearchInput,
    page: PageParams,
) -> Result<(Vec<invoices::Model>, u64), AppError> {
    let filter = build_filter(input)?;
    Ok(repos::invoices::search(conn, &filter, page).await?)
}

pub async fn list_by_customer(
    conn: &impl ConnectionTrait,
    customer_id: &str,
    page: PageParams,
) -> Result<(Vec<invoices::Model>, u64), AppError> {
    let customer_id = parse_uuid(customer_id, "customer")?;
    Ok(repos::invoices::list_by_customer(conn, customer_id, page).await?)
}

pub async fn get_by_schedule(
    conn: &impl ConnectionTrait,
    schedule_id: &str,
) -> Result<invoices::Model, AppError> {
    let schedule_id = parse_uuid(schedule_id, "schedule")?;
    repos::invoices::find_by_schedule(conn, schedule_id)
        .await?
        .ok_or_else(|| {
            AppError::not_found(ErrorCode::InvoiceNotFound, "no invoice for this schedule")
        })
}

pub async fn list_by_status(
    conn: &impl ConnectionTrait,
    status: &str,
    page: PageParams,
) -> Result<(Vec<invoices::Model>, u64), AppError> {
    let status = parse_status(status)?;
    Ok(repos::invoices::list_by_status(conn, status, page).await?)
}

fn build_filter(input: InvoiceSearchInput) -> Result<InvoiceFilter, AppError> {
    let mut filter = InvoiceFilter::default();

    if let Some(raw) = input.customer_id.filter(|s| !s.is_empty()) {
        filter.customer_id = Some(parse_uuid(&raw, "customer")?);
    }
    if let Some(raw) = input.schedule_id.filter(|s| !s.is_empty()) {
        filter.schedule_id = Some(parse_uuid(&raw, "schedule")?);
    }
    if let Some(raw) = input.status.filter(|s| !s.is_empty()) {
        filter.status = Some(parse_status(&raw)?);
    }
    if let Some(raw) = input.date_from.filter(|s| !s.is_empty()) {
        filter.date_from = Some(parse_date(&raw)?);
    }
    if let Some(raw) = input.date_to.filter(|s| !s.is_empty()) {
        filter.date_to = Some(parse_date(&raw)?);
    }

    Ok(filter)
}

fn parse_status(raw: &str) -> Result<InvoiceStatus, AppError> {
    InvoiceStatus::parse(raw).ok_or_else(|| {
        AppError::bad_request(
            ErrorCode::InvalidStatus,
            format!("invalid status '{raw}', expected Unpaid | Paid | Overdue"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::{build_filter, parse_status, InvoiceSearchInput};
    use crate::entities::invoices::InvoiceStatus;

    #[test]
    fn parse_status_accepts_wire_values() {
        assert_eq!(parse_status("Unpaid").unwrap(), InvoiceStatus::Unpaid);
        assert_eq!(parse_status("Overdue").unwrap(), InvoiceStatus::Overdue);
        assert!(parse_status("unpaid").is_err());
    }

    #[test]
    fn filter_parses_ids_and_dates() {
        let filter = build_filter(InvoiceSearchInput {
            customer_id: Some("8c0f33c6-4dd6-4f3b-90f6-28f371df0f95".to_string()),
            status: Some("Paid".to_string()),
            date_from: Some("2026-01-01".to_string()),
            ..InvoiceSearchInput::default()
        })
        .unwrap();
        assert!(filter.customer_id.is_some());
        assert_eq!(filter.status, Some(InvoiceStatus::Paid));
        assert!(filter.date_from.is_some());
    }
}
