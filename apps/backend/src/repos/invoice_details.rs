use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::entities::invoice_details;

pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> Result<Option<invoice_details::Model>, DbErr> {
    invoice_details::Entity::find()
        .filter(invoice_details::Column::Id.eq(id))
        .filter(invoice_details::Column::DeletedAt.is_null())
        .one(conn)
        .await
}

/// All live line items of an invoice, oldest first.
pub async fn list_by_invoice<C: ConnectionTrait>(
    conn: &C,
    invoice_id: Uuid,
) -> Result<Vec<invoice_details::Model>, DbErr> {
    invoice_details::Entity::find()
        .filter(invoice_details::Column::InvoiceId.eq(invoice_id))
        .filter(invoice_details::Column::DeletedAt.is_null())
        .order_by_asc(invoice_details::Column::CreatedAt)
        .all(conn)
        .await
}
