use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

use crate::entities::technicians;
use crate::http::pagination::PageParams;

#[derive(Debug, Default, Clone)]
pub struct TechnicianFilter {
    pub name: Option<String>,
    pub specialization: Option<String>,
}

pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> Result<Option<technicians::Model>, DbErr> {
    technicians::Entity::find()
        .filter(technicians::Column::Id.eq(id))
        .filter(technicians::Column::DeletedAt.is_null())
        .one(conn)
        .await
}

pub async fn find_by_phone<C: ConnectionTrait>(
    conn: &C,
    phone: &str,
) -> Result<Option<technicians::Model>, DbErr> {
    technicians::Entity::find()
        .filter(technicians::Column::Phone.eq(phone))
        .filter(technicians::Column::DeletedAt.is_null())
        .one(conn)
        .await
}

pub async fn list<C: ConnectionTrait>(
    conn: &C,
    page: PageParams,
) -> Result<(Vec<technicians::Model>, u64), DbErr> {
    let query = technicians::Entity::find().filter(technicians::Column::DeletedAt.is_null());

    let total = query.clone().count(conn).await?;
    let rows = query
        .order_by_desc(technicians::Column::CreatedAt)
        .offset(page.offset())
        .limit(page.limit())
        .all(conn)
        .await?;

    Ok((rows, total))
}

pub async fn search<C: ConnectionTrait>(
    conn: &C,
    filter: &TechnicianFilter,
    page: PageParams,
) -> Result<(Vec<technicians::Model>, u64), DbErr> {
    let mut query = technicians::Entity::find().filter(technicians::Column::DeletedAt.is_null());

    if let Some(name) = &filter.name {
        query = query.filter(technicians::Column::Name.contains(name));
    }
    if let Some(specialization) = &filter.specialization {
        query = query.filter(technicians::Column::Specialization.contains(specialization));
    }

    let total = query.clone().count(conn).await?;
    let rows = query
        .order_by_desc(technicians::Column::CreatedAt)
        .offset(page.offset())
        .limit(page.limit())
        .all(conn)
        .await?;

    Ok((rows, total))
}
