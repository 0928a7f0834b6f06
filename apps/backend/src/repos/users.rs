use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use crate::entities::users::{self, UserRole};
use crate::http::pagination::PageParams;

pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: i64,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find()
        .filter(users::Column::Id.eq(id))
        .filter(users::Column::DeletedAt.is_null())
        .one(conn)
        .await
}

pub async fn find_by_email<C: ConnectionTrait>(
    conn: &C,
    email: &str,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .filter(users::Column::DeletedAt.is_null())
        .one(conn)
        .await
}

pub async fn list<C: ConnectionTrait>(
    conn: &C,
    page: PageParams,
) -> Result<(Vec<users::Model>, u64), DbErr> {
    let query = users::Entity::find().filter(users::Column::DeletedAt.is_null());

    let total = query.clone().count(conn).await?;
    let rows = query
        .order_by_desc(users::Column::CreatedAt)
        .offset(page.offset())
        .limit(page.limit())
        .all(conn)
        .await?;

    Ok((rows, total))
}

pub async fn list_by_role<C: ConnectionTrait>(
    conn: &C,
    role: UserRole,
    page: PageParams,
) -> Result<(Vec<users::Model>, u64), DbErr> {
    let query = users::Entity::find()
        .filter(users::Column::Role.eq(role))
        .filter(users::Column::DeletedAt.is_null());

    let total = query.clone().count(conn).await?;
    let rows = query
        .order_by_desc(users::Column::CreatedAt)
        .offset(page.offset())
        .limit(page.limit())
        .all(conn)
        .await?;

    Ok((rows, total))
}
