use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use time::Date;
use uuid::Uuid;

use crate::entities::invoices::{self, InvoiceStatus};
use crate::http::pagination::PageParams;

#[derive(Debug, Default, Clone)]
pub struct InvoiceFilter {
    pub customer_id: Option<Uuid>,
    pub schedule_id: Option<Uuid>,
    pub status: Option<InvoiceStatus>,
    pub date_from: Option<Date>,
    pub date_to: Option<Date>,
}

pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> Result<Option<invoices::Model>, DbErr> {
    invoices::Entity::find()
        .filter(invoices::Column::Id.eq(id))
        .filter(invoices::Column::DeletedAt.is_null())
        .one(conn)
        .await
}

/// A schedule has at most one live invoice.
pub async fn find_by_schedule<C: ConnectionTrait>(
    conn: &C,
    schedule_id: Uuid,
) -> Result<Option<invoices::Model>, DbErr> {
    invoices::Entity::find()
        .filter(invoices::Column::ScheduleId.eq(schedule_id))
        .filter(invoices::Column::DeletedAt.is_null())
        .one(conn)
        .await
}

pub async fn list<C: ConnectionTrait>(
    conn: &C,
    page: PageParams,
) -> Result<(Vec<invoices::Model>, u64), DbErr> {
    search(conn, &InvoiceFilter::default(), page).await
}

/// Filtered, paginated listing ordered by invoice date desc.
pub async fn search<C: ConnectionTrait>(
    conn: &C,
    filter: &InvoiceFilter,
    page: PageParams,
) -> Result<(Vec<invoices::Model>, u64), DbErr> {
    let mut query = invoices::Entity::find().filter(invoices::Column::DeletedAt.is_null());

    if let Some(customer_id) = filter.customer_id {
        query = query.filter(invoices::Column::CustomerId.eq(customer_id));
    }
    if let Some(schedule_id) = filter.schedule_id {
        query = query.filter(invoices::Column::ScheduleId.eq(schedule_id));
    }
    if let Some(status) = filter.status {
        query = query.filter(invoices::Column::Status.eq(status));
    }
    if let Some(date_from) = filter.date_from {
        query = query.filter(invoices::Column::InvoiceDate.gte(date_from));
    }
    if let Some(date_to) = filter.date_to {
        query = query.filter(invoices::Column::InvoiceDate.lte(date_to));
    }

    let total = query.clone().count(conn).await?;
    let rows = query
        .order_by_desc(invoices::Column::InvoiceDate)
        .order_by_desc(invoices::Column::CreatedAt)
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
) -> Result<(Vec<invoices::Model>, u64), DbErr> {
    let filter = InvoiceFilter {
        customer_id: Some(customer_id),
        ..InvoiceFilter::default()
    };
    search(conn, &filter, page).await
}

pub async fn list_by_status<C: ConnectionTrait>(
    conn: &C,
    status: InvoiceStatus,
    page: PageParams,
) -> Result<(Vec<invoices::Model>, u64), DbErr> {
    let filter = InvoiceFilter {
        status: Some(status),
        ..InvoiceFilter::default()
    };
    search(conn, &filter, page).await
}
