//! Invoice line items. Every mutation here recomputes the parent invoice's
//! total so the stored amount never drifts from its line items.

use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::entities::{invoice_details, invoices};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos;
use crate::services::parse_uuid;

#[derive(Debug)]
pub struct InvoiceDetailCreateInput {
    pub invoice_id: String,
    pub service_id: String,
    pub quantity: i32,
}

#[derive(Debug, Default)]
pub struct InvoiceDetailUpdateInput {
    pub quantity: Option<i32>,
    pub unit_price: Option<Decimal>,
}

/// Add a line item. The unit price is taken from the service catalog at
/// creation time so later price changes don't rewrite old invoices.
pub async fn create(
    conn: &impl ConnectionTrait,
    input: InvoiceDetailCreateInput,
) -> Result<invoice_details::Model, AppError> {
    let invoice_id = parse_uuid(&input.invoice_id, "invoice")?;
    let service_id = parse_uuid(&input.service_id, "service")?;
    validate_quantity(input.quantity)?;

    repos::invoices::find_by_id(conn, invoice_id)
        .await?
        .ok_or_else(|| AppError::not_found(ErrorCode::InvoiceNotFound, "invoice not found"))?;
    let service = repos::services::find_by_id(conn, service_id)
        .await?
        .ok_or_else(|| AppError::not_found(ErrorCode::ServiceNotFound, "service not found"))?;

    let unit_price = service.price;
    let subtotal = unit_price * Decimal::from(input.quantity);

    let now = OffsetDateTime::now_utc();
    let detail = invoice_details::ActiveModel {
        id: Set(Uuid::new_v4()),
        invoice_id: Set(invoice_id),
        service_id: Set(service_id),
        quantity: Set(input.quantity),
        unit_price: Set(unit_price),
        subtotal: Set(subtotal),
        created_at: Set(now),
        updated_at: Set(now),
        deleted_at: Set(None),
    }
    .insert(conn)
    .await?;

    update_invoice_total(conn, invoice_id).await?;

    Ok(detail)
}

pub async fn get(
    conn: &impl ConnectionTrait,
    id: &str,
) -> Result<invoice_details::Model, AppError> {
    let id = parse_uuid(id, "invoice detail")?;
    repos::invoice_details::find_by_id(conn, id)
        .await?
        .ok_or_else(|| {
            AppError::not_found(ErrorCode::InvoiceDetailNotFound, "invoice detail not found")
        })
}

pub async fn update(
    conn: &impl ConnectionTrait,
    id: &str,
    input: InvoiceDetailUpdateInput,
) -> Result<invoice_details::Model, AppError> {
    let detail = get(conn, id).await?;
    let invoice_id = detail.invoice_id;

    let mut quantity = detail.quantity;
    let mut unit_price = detail.unit_price;

    if let Some(new_quantity) = input.quantity {
        validate_quantity(new_quantity)?;
        quantity = new_quantity;
    }
    if let Some(new_unit_price) = input.unit_price {
        if new_unit_price < Decimal::ZERO {
            return Err(AppError::validation(
                ErrorCode::InvalidPrice,
                "unit price must not be negative",
            ));
        }
        unit_price = new_unit_price;
    }

    let mut active: invoice_details::ActiveModel = detail.into();
    active.quantity = Set(quantity);
    active.unit_price = Set(unit_price);
    active.subtotal = Set(unit_price * Decimal::from(quantity));
    active.updated_at = Set(OffsetDateTime::now_utc());

    let updated = active.update(conn).await?;

    update_invoice_total(conn, invoice_id).await?;

    Ok(updated)
}

pub async fn delete(conn: &impl ConnectionTrait, id: &str) -> Result<(), AppError> {
    let detail = get(conn, id).await?;
    let invoice_id = detail.invoice_id;

    let mut active: invoice_details::ActiveModel = detail.into();
    active.deleted_at = Set(Some(OffsetDateTime::now_utc()));
    active.update(conn).await?;

    update_invoice_total(conn, invoice_id).await?;
    Ok(())
}

pub async fn list_by_invoice(
    conn: &impl ConnectionTrait,
    invoice_id: &str,
) -> Result<Vec<invoice_details::Model>, AppError> {
    let invoice_id = parse_uuid(invoice_id, "invoice")?;
    Ok(repos::invoice_details::list_by_invoice(conn, invoice_id).await?)
}

/// Remove every line item of an invoice and zero its total.
pub async fn delete_by_invoice(
    conn: &impl ConnectionTrait,
    invoice_id: &str,
) -> Result<(), AppError> {
    let invoice_id = parse_uuid(invoice_id, "invoice")?;

    let now = OffsetDateTime::now_utc();
    invoice_details::Entity::update_many()
        .col_expr(invoice_details::Column::DeletedAt, Expr::value(Some(now)))
        .filter(invoice_details::Column::InvoiceId.eq(invoice_id))
        .filter(invoice_details::Column::DeletedAt.is_null())
        .exec(conn)
        .await?;

    update_invoice_total(conn, invoice_id).await?;
    Ok(())
}

/// Recompute an invoice's total from its live line items.
async fn update_invoice_total(
    conn: &impl ConnectionTrait,
    invoice_id: Uuid,
) -> Result<(), AppError> {
    let details = repos::invoice_details::list_by_invoice(conn, invoice_id).await?;
    let total: Decimal = details.iter().map(|d| d.subtotal).sum();

    let invoice = repos::invoices::find_by_id(conn, invoice_id)
        .await?
        .ok_or_else(|| AppError::not_found(ErrorCode::InvoiceNotFound, "invoice not found"))?;

    let mut active: invoices::ActiveModel = invoice.into();
    active.total_amount = Set(total);
    active.updated_at = Set(OffsetDateTime::now_utc());
    active.update(conn).await?;

    Ok(())
}

fn validate_quantity(quantity: i32) -> Result<(), AppError> {
    if quantity < 1 {
        return Err(AppError::validation(
            ErrorCode::InvalidQuantity,
            "quantity must be at least 1",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::validate_quantity;

    #[test]
    fn quantity_must_be_positive() {
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
        assert!(validate_quantity(1).is_ok());
    }

    #[test]
    fn subtotal_is_price_times_quantity() {
        let price = Decimal::new(15_000_000, 2); // 150000.00
        let subtotal = price * Decimal::from(3);
        assert_eq!(subtotal, Decimal::new(45_000_000, 2));
    }
}
