use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime, Time};

use crate::utils::dates::{serde_date, serde_time};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "schedule_status")]
pub enum ScheduleStatus {
    #[sea_orm(string_value = "Pending")]
    Pending,
    #[sea_orm(string_value = "On-Progress")]
    #[serde(rename = "On-Progress")]
    OnProgress,
    #[sea_orm(string_value = "Completed")]
    Completed,
    #[sea_orm(string_value = "Canceled")]
    Canceled,
}

impl ScheduleStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Pending" => Some(ScheduleStatus::Pending),
            "On-Progress" => Some(ScheduleStatus::OnProgress),
            "Completed" => Some(ScheduleStatus::Completed),
            "Canceled" => Some(ScheduleStatus::Canceled),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "schedules")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_name = "customer_id")]
    pub customer_id: Uuid,
    #[sea_orm(column_name = "technician_id")]
    pub technician_id: Uuid,
    #[sea_orm(column_name = "service_id")]
    pub service_id: Uuid,
    #[serde(with = "serde_date")]
    pub date: Date,
    #[serde(with = "serde_time")]
    pub time: Time,
    pub status: ScheduleStatus,
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
        belongs_to = "super::customers::Entity",
        from = "Column::CustomerId",
        to = "super::customers::Column::Id"
    )]
    Customer,
    #[sea_orm(
        belongs_to = "super::technicians::Entity",
        from = "Column::TechnicianId",
        to = "super::technicians::Column::Id"
    )]
    Technician,
    #[sea_orm(
        belongs_to = "super::services::Entity",
        from = "Column::ServiceId",
        to = "super::services::Column::Id"
    )]
    Service,
    #[sea_orm(has_many = "super::invoices::Entity")]
    Invoices,
}

impl Related<super::customers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::technicians::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Technician.def()
    }
}

impl Related<super::services::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Service.def()
    }
}

impl Related<super::invoices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Invoices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::ScheduleStatus;

    #[test]
    fn status_parsing_matches_wire_values() {
        assert_eq!(ScheduleStatus::parse("Pending"), Some(ScheduleStatus::Pending));
        assert_eq!(
            ScheduleStatus::parse("On-Progress"),
            Some(ScheduleStatus::OnProgress)
        );
        assert_eq!(
            ScheduleStatus::parse("Completed"),
            Some(ScheduleStatus::Completed)
        );
        assert_eq!(ScheduleStatus::parse("Canceled"), Some(ScheduleStatus::Canceled));
        assert_eq!(ScheduleStatus::parse("Done"), None);
        assert_eq!(ScheduleStatus::parse("pending"), None);
    }
}
