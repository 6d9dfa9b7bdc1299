//! Patient domain: records, workflow stages and triage categories.

pub mod model;

pub use model::{Category, NewPatient, Patient, PatientUpdate, Stage};
