//! REST route handlers.

pub mod admin;
pub mod lookup;
pub mod patients;
