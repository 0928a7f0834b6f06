use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

use crate::entities::customers;
use crate::http::pagination::PageParams;

#[derive(Debug, Default, Clone)]
pub struct CustomerFilter {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> Result<Option<customers::Model>, DbErr> {
    customers::Entity::find()
        .filter(customers::Column::Id.eq(id))
        .filter(customers::Column::DeletedAt.is_null())
        .one(conn)
        .await
}

pub async fn find_by_phone<C: ConnectionTrait>(
    conn: &C,
    phone: &str,
) -> Result<Option<customers::Model>, DbErr> {
    customers::Entity::find()
        .filter(customers::Column::Phone.eq(phone))
        .filter(customers::Column::DeletedAt.is_null())
        .one(conn)
        .await
}

pub async fn find_by_email<C: ConnectionTrait>(
    conn: &C,
    email: &str,
) -> Result<Option<customers::Model>, DbErr> {
    customers::Entity::find()
        .filter(customers::Column::Email.eq(email))
        .filter(customers::Column::DeletedAt.is_null())
        .one(conn)
        .await
}

pub async fn list<C: ConnectionTrait>(
    conn: &C,
    page: PageParams,
) -> Result<(Vec<customers::Model>, u64), DbErr> {
    let query = customers::Entity::find().filter(customers::Column::DeletedAt.is_null());

    let total = query.clone().count(conn).await?;
    let rows = query
        .order_by_desc(customers::Column::CreatedAt)
        .offset(page.offset())
        .limit(page.limit())
        .all(conn)
        .await?;

    Ok((rows, total))
}

pub async fn search<C: ConnectionTrait>(
    conn: &C,
    filter: &CustomerFilter,
    page: PageParams,
) -> Result<(Vec<customers::Model>, u64), DbErr> {
    let mut query = customers::Entity::find().filter(customers::Column::DeletedAt.is_null());

    if let Some(name) = &filter.name {
        query = query.filter(customers::Column::Name.contains(name));
    }
    if let Some(phone) = &filter.phone {
        query = query.filter(customers::Column::Phone.contains(phone));
    }
    if let Some(email) = &filter.email {
        query = query.filter(customers::Column::Email.contains(email));
    }

    let total = query.clone().count(conn).await?;
    let rows = query
        .order_by_desc(customers::Column::CreatedAt)
        .offset(page.offset())
        .limit(page.limit())
        .all(conn)
        .await?;

    Ok((rows, total))
}
