//! Query functions for the domain tables, generic over ConnectionTrait.
//!
//! Soft-deleted rows (deleted_at set) are invisible to every query here.

pub mod customers;
pub mod invoice_details;
pub mod invoices;
pub mod schedules;
pub mod services;
pub mod technicians;
pub mod users;
