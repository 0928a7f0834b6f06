use sea_orm::{ActiveModelTrait, ConnectionTrait, Set};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::entities::schedules::{self, ScheduleStatus};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::http::pagination::PageParams;
use crate::repos::{self, schedules::ScheduleFilter};
use crate::services::parse_uuid;
use crate::utils::dates::{parse_date, parse_time};

#[derive(Debug)]
pub struct ScheduleCreateInput {
    pub customer_id: String,
    pub technician_id: String,
    pub service_id: String,
    /// YYYY-MM-DD
    pub date: String,
    /// HH:MM:SS
    pub time: String,
}

#[derive(Debug, Default)]
pub struct ScheduleUpdateInput {
    pub technician_id: Option<String>,
    pub service_id: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Default)]
pub struct ScheduleSearchInput {
    pub customer_id: Option<String>,
    pub technician_id: Option<String>,
    pub service_id: Option<String>,
    pub status: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

/// Create a schedule. Customer, technician and service must all exist;
/// new schedules always start out Pending.
pub async fn create(
    conn: &impl ConnectionTrait,
    input: ScheduleCreateInput,
) -> Result<schedules::Model, AppError> {
    let customer_id = parse_uuid(&input.customer_id, "customer")?;
    let technician_id = parse_uuid(&input.technician_id, "technician")?;
    let service_id = parse_uuid(&input.service_id, "service")?;
    let date = parse_date(&input.date)?;
    let time = parse_time(&input.time)?;

    ensure_customer(conn, customer_id).await?;
    ensure_technician(conn, technician_id).await?;
    ensure_service(conn, service_id).await?;

    let now = OffsetDateTime::now_utc();
    let schedule = schedules::ActiveModel {
        id: Set(Uuid::new_v4()),
        customer_id: Set(customer_id),
        technician_id: Set(technician_id),
        service_id: Set(service_id),
        date: Set(date),
        time: Set(time),
        status: Set(ScheduleStatus::Pending),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
    }
    .insert(conn)
    .await?;

    Ok(schedule)
}

pub async fn get(conn: &impl ConnectionTrait, id: &str) -> Result<schedules::Model, AppError> {
    let id = parse_uuid(id, "schedule")?;
    repos::schedules::find_by_id(conn, id)
        .await?
        .ok_or_else(|| AppError::not_found(ErrorCode::ScheduleNotFound, "schedule not found"))
}

pub async fn update(
    conn: &impl ConnectionTrait,
    id: &str,
    input: ScheduleUpdateInput,
) -> Result<schedules::Model, AppError> {
    let schedule = get(conn, id).await?;
    let mut active: schedules::ActiveModel = schedule.into();

    if let Some(raw) = input.technician_id {
        let technician_id = parse_uuid(&raw, "technician")?;
        ensure_technician(conn, technician_id).await?;
        active.technician_id = Set(technician_id);
    }
    if let Some(raw) = input.service_id {
        let service_id = parse_uuid(&raw, "service")?;
        ensure_service(conn, service_id).await?;
        active.service_id = Set(service_id);
    }
    if let Some(raw) = input.date {
        active.date = Set(parse_date(&raw)?);
    }
    if let Some(raw) = input.time {
        active.time = Set(parse_time(&raw)?);
    }
    if let Some(raw) = input.status {
        let status = parse_status(&raw)?;
        active.status = Set(status);
    }
    active.updated_at = Set(OffsetDateTime::now_utc());

    Ok(active.update(conn).await?)
}

pub async fn delete(conn: &impl ConnectionTrait, id: &str) -> Result<(), AppError> {
    let schedule = get(conn, id).await?;

    let mut active: schedules::ActiveModel = schedule.into();
    active.deleted_at = Set(Some(OffsetDateTime::now_utc()));
    active.update(conn).await?;
    Ok(())
}

pub async fn list(
    conn: &impl ConnectionTrait,
    page: PageParams,
) -> Result<(Vec<schedules::Model>, u64), AppError> {
    Ok(repos::schedules::list(conn, page).await?)
}

pub async fn search(
    conn: &impl ConnectionTrait,
    input: ScheduleSearchInput,
    page: PageParams,
) -> Result<(Vec<schedules::Model>, u64), AppError> {
    let filter = build_filter(input)?;
    Ok(repos::schedules::search(conn, &filter, page).await?)
}

pub async fn list_by_customer(
    conn: &impl ConnectionTrait,
    customer_id: &str,
    page: PageParams,
) -> Result<(Vec<schedules::Model>, u64), AppError> {
    let customer_id = parse_uuid(customer_id, "customer")?;
    Ok(repos::schedules::list_by_customer(conn, customer_id, page).await?)
}

pub async fn list_by_technician(
    conn: &impl ConnectionTrait,
    technician_id: &str,
    page: PageParams,
) -> Result<(Vec<schedules::Model>, u64), AppError> {
    let technician_id = parse_uuid(technician_id, "technician")?;
    Ok(repos::schedules::list_by_technician(conn, technician_id, page).await?)
}

pub async fn list_by_status(
    conn: &impl ConnectionTrait,
    status: &str,
    page: PageParams,
) -> Result<(Vec<schedules::Model>, u64), AppError> {
    let status = parse_status(status)?;
    Ok(repos::schedules::list_by_status(conn, status, page).await?)
}

fn build_filter(input: ScheduleSearchInput) -> Result<ScheduleFilter, AppError> {
    let mut filter = ScheduleFilter::default();

    if let Some(raw) = input.customer_id.filter(|s| !s.is_empty()) {
        filter.customer_id = Some(parse_uuid(&raw, "customer")?);
    }
    if let Some(raw) = input.technician_id.filter(|s| !s.is_empty()) {
        filter.technician_id = Some(parse_uuid(&raw, "technician")?);
    }
    if let Some(raw) = input.service_id.filter(|s| !s.is_empty()) {
        filter.service_id = Some(parse_uuid(&raw, "service")?);
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

fn parse_status(raw: &str) -> Result<ScheduleStatus, AppError> {
    ScheduleStatus::parse(raw).ok_or_else(|| {
        AppError::bad_request(
            ErrorCode::InvalidStatus,
            format!("invalid status '{raw}', expected Pending | On-Progress | Completed | Canceled"),
        )
    })
}

async fn ensure_customer(conn: &impl ConnectionTrait, id: Uuid) -> Result<(), AppError> {
    repos::customers::find_by_id(conn, id)
        .await?
        .ok_or_else(|| AppError::not_found(ErrorCode::CustomerNotFound, "customer not found"))?;
    Ok(())
}

async fn ensure_technician(conn: &impl ConnectionTrait, id: Uuid) -> Result<(), AppError> {
    repos::technicians::find_by_id(conn, id)
        .await?
        .ok_or_else(|| {
            AppError::not_found(ErrorCode::TechnicianNotFound, "technician not found")
        })?;
    Ok(())
}

async fn ensure_service(conn: &impl ConnectionTrait, id: Uuid) -> Result<(), AppError> {
    repos::services::find_by_id(conn, id)
        .await?
        .ok_or_else(|| AppError::not_found(ErrorCode::ServiceNotFound, "service not found"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{build_filter, parse_status, ScheduleSearchInput};
    use crate::entities::schedules::ScheduleStatus;

    #[test]
    fn parse_status_accepts_wire_values() {
        assert_eq!(parse_status("Pending").unwrap(), ScheduleStatus::Pending);
        assert_eq!(
            parse_status("On-Progress").unwrap(),
            ScheduleStatus::OnProgress
        );
        assert!(parse_status("InProgress").is_err());
    }

    #[test]
    fn empty_search_fields_are_ignored() {
        let filter = build_filter(ScheduleSearchInput {
            customer_id: Some(String::new()),
            status: Some(String::new()),
            ..ScheduleSearchInput::default()
        })
        .unwrap();
        assert!(filter.customer_id.is_none());
        assert!(filter.status.is_none());
    }

    #[test]
    fn bad_search_date_is_an_error() {
        let result = build_filter(ScheduleSearchInput {
            date_from: Some("08/07/2026".to_string()),
            ..ScheduleSearchInput::default()
        });
        assert!(result.is_err());
    }
}
