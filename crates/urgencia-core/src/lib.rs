//! Urgencia Core Library
//!
//! Domain models and synchronization logic for the emergency-department
//! live tracker: the authoritative patient store, the waiting-room queue
//! ordering rule and the display rotation controller.

pub mod error;
pub mod patient;
pub mod queue;
pub mod rotation;
pub mod store;

pub use error::{UrgenciaError, UrgenciaResult};
