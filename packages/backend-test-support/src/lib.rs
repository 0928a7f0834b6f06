//! Test-only helpers shared across the workspace. Deliberately free of
//! backend types so unit and integration tests can assert on the wire
//! contract alone.

pub mod logging;
pub mod problem_details;
