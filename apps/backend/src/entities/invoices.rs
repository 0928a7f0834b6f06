use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::utils::dates::serde_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "invoice_status")]
pub enum InvoiceStatus {
    #[sea_orm(string_value = "Unpaid")]
    Unpaid,
    #[sea_orm(string_value = "Paid")]
    Paid,
    #[sea_orm(string_value = "Overdue")]
    Overdue,
}

impl InvoiceStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Unpaid" => Some(InvoiceStatus::Unpaid),
            "Paid" => Some(InvoiceStatus::Paid),
            "Overdue" => Some(InvoiceStatus::Overdue),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "invoices")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_name = "schedule_id")]
    pub schedule_id: Uuid,
    #[sea_orm(column_name = "customer_id")]
    pub customer_id: Uuid,
    #[sea_orm(column_name = "invoice_date")]
    #[serde(with = "serde_date")]
    pub invoice_date: Date,
    #[sea_orm(column_name = "due_date")]
    #[serde(with = "serde_date")]
    pub due_date: Date,
    #[sea_orm(column_name = "total_amount", column_type = "Decimal(Some((10, 2)))")]
    pub total_amount: Decimal,
    pub status: InvoiceStatus,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
    #[sea_orm(column_name = "deleted_at")]
    #[serde(skip_serializing, default)]
    pub deleted_at: Option<OffsetDateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::schedules::Entity",
        from = "Column::ScheduleId",
        to = "super::schedules::Column::Id"
    )]
    Schedule,
    #[sea_orm(
        belongs_to = "super::customers::Entity",
        from = "Column::CustomerId",
        to = "super::customers::Column::Id"
    )]
    Customer,
    #[sea_orm(has_many = "super::invoice_details::Entity")]
    InvoiceDetails,
}

impl Related<super::schedules::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Schedule.def()
    }
}

impl Related<super::customers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::invoice_details::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InvoiceDetails.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::InvoiceStatus;

    #[test]
    fn status_parsing_matches_wire_values() {
        assert_eq!(InvoiceStatus::parse("Unpaid"), Some(InvoiceStatus::Unpaid));
        assert_eq!(InvoiceStatus::parse("Paid"), Some(InvoiceStatus::Paid));
        assert_eq!(InvoiceStatus::parse("Overdue"), Some(InvoiceStatus::Overdue));
        assert_eq!(InvoiceStatus::parse("paid"), None);
    }
}
