use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

use crate::entities::services;
use crate::http::pagination::PageParams;

#[derive(Debug, Default, Clone)]
pub struct ServiceFilter {
    pub name: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> Result<Option<services::Model>, DbErr> {
    services::Entity::find()
        .filter(services::Column::Id.eq(id))
        .filter(services::Column::DeletedAt.is_null())
        .one(conn)
        .await
}

pub async fn find_by_name<C: ConnectionTrait>(
    conn: &C,
    name: &str,
) -> Result<Option<services::Model>, DbErr> {
    services::Entity::find()
        .filter(services::Column::Name.eq(name))
        .filter(services::Column::DeletedAt.is_null())
        .one(conn)
        .await
}

pub async fn list<C: ConnectionTrait>(
    conn: &C,
    page: PageParams,
) -> Result<(Vec<services::Model>, u64), DbErr> {
    let query = services::Entity::find().filter(services::Column::DeletedAt.is_null());

    let total = query.clone().count(conn).await?;
    let rows = query
        .order_by_desc(services::Column::CreatedAt)
        .offset(page.offset())
        .limit(page.limit())
        .all(conn)
        .await?;

    Ok((rows, total))
}

pub async fn search<C: ConnectionTrait>(
    conn: &C,
    filter: &ServiceFilter,
    page: PageParams,
) -> Result<(Vec<services::Model>, u64), DbErr> {
    let mut query = services::Entity::find().filter(services::Column::DeletedAt.is_null());

    if let Some(name) = &filter.name {
        query = query.filter(services::Column::Name.contains(name));
    }
    if let Some(min_price) = filter.min_price {
        query = query.filter(services::Column::Price.gte(min_price));
    }
    if let Some(max_price) = filter.max_price {
        query = query.filter(services::Column::Price.lte(max_price));
    }

    let total = query.clone().count(conn).await?;
    let rows = query
        .order_by_desc(services::Column::CreatedAt)
        .offset(page.offset())
        .limit(page.limit())
        .all(conn)
        .await?;

    Ok((rows, total))
}
