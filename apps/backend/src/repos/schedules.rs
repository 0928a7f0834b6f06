use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use time::Date;
use uuid::Uuid;

use crate::entities::schedules::{self, ScheduleStatus};
use crate::http::pagination::PageParams;

#[derive(Debug, Default, Clone)]
pub struct ScheduleFilter {
    pub customer_id: Option<Uuid>,
    pub technician_id: Option<Uuid>,
    pub service_id: Option<Uuid>,
    pub status: Option<ScheduleStatus>,
    pub date_from: Option<Date>,
    pub date_to: Option<Date>,
}

pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> Result<Option<schedules::Model>, DbErr> {
    schedules::Entity::find()
        .filter(schedules::Column::Id.eq(id))
        .filter(schedules::Column::DeletedAt.is_null())
        .one(conn)
        .await
}

pub async fn list<C: ConnectionTrait>(
    conn: &C,
    page: PageParams,
) -> Result<(Vec<schedules::Model>, u64), DbErr> {
    search(conn, &ScheduleFilter::default(), page).await
}

/// Filtered, paginated listing ordered by date desc, time desc.
pub async fn search<C: ConnectionTrait>(
    conn: &C,
    filter: &ScheduleFilter,
    page: PageParams,
) -> Result<(Vec<schedules::Model>, u64), DbErr> {
    let mut query = schedules::Entity::find().filter(schedules::Column::DeletedAt.is_null());

    if let Some(customer_id) = filter.customer_id {
        query = query.filter(schedules::Column::CustomerId.eq(customer_id));
    }
    if let Some(technician_id) = filter.technician_id {
        query = query.filter(schedules::Column::TechnicianId.eq(technician_id));
    }
    if let Some(service_id) = filter.service_id {
        query = query.filter(schedules::Column::ServiceId.eq(service_id));
    }
    if let Some(status) = filter.status {
        query = query.filter(schedules::Column::Status.eq(status));
    }
    if let Some(date_from) = filter.date_from {
        query = query.filter(schedules::Column::Date.gte(date_from));
    }
    if let Some(date_to) = filter.date_to {
        query = query.filter(schedules::Column::Date.lte(date_to));
    }

    let total = query.clone().count(conn).await?;
    let rows = query
        .order_by_desc(schedules::Column::Date)
        .order_by_desc(schedules::Column::Time)
        .offset(page.offset())
        .limit(page.limit())
        .all(conn)
        .await?;

    Ok((rows, total))
}

pub async fn list_by_customer<C: ConnectionTrait>(
    conn: &C,
    customer_id: Uuid,
    page: PageParams,
) -> Result<(Vec<schedules::Model>, u64), DbErr> {
    let filter = ScheduleFilter {
        customer_id: Some(customer_id),
        ..ScheduleFilter::default()
    };
    search(conn, &filter, page).await
}

pub async fn list_by_technician<C: ConnectionTrait>(
    conn: &C,
    technician_id: Uuid,
    page: PageParams,
) -> Result<(Vec<schedules::Model>, u64), DbErr> {
    let filter = ScheduleFilter {
        technician_id: Some(technician_id),
        ..ScheduleFilter::default()
    };
    search(conn, &filter, page).await
}

pub async fn list_by_status<C: ConnectionTrait>(
    conn: &C,
    status: ScheduleStatus,
    page: PageParams,
) -> Result<(Vec<schedules::Model>, u64), DbErr> {
    let filter = ScheduleFilter {
        status: Some(status),
        ..ScheduleFilter::default()
    };
    search(conn, &filter, page).await
}
