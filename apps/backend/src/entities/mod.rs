pub mod customers;
pub mod invoice_details;
pub mod invoices;
pub mod schedules;
pub mod services;
pub mod technicians;
pub mod users;

pub use customers::Entity as Customers;
pub use customers::Model as Customer;
pub use invoice_details::Entity as InvoiceDetails;
pub use invoice_details::Model as InvoiceDetail;
pub use invoices::Entity as Invoices;
pub use invoices::InvoiceStatus;
pub use invoices::Model as Invoice;
pub use schedules::Entity as Schedules;
pub use schedules::Model as Schedule;
pub use schedules::ScheduleStatus;
pub use services::Entity as Services;
pub use services::Model as Service;
pub use technicians::Entity as Technicians;
pub use technicians::Model as Technician;
pub use users::Entity as Users;
pub use users::Model as User;
pub use users::UserRole;
