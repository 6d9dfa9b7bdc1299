//! Wire protocol for the synchronization hub.
//!
//! Every frame is JSON shaped `{"event": <name>, "data": <payload>}`.

use serde::{Deserialize, Serialize};
use urgencia_core::patient::model::{NewPatient, Patient, PatientUpdate};

/// Mutation requests a client may send to the hub.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    AddPatient(NewPatient),
    UpdatePatient { id: u64, updates: PatientUpdate },
    DeletePatient(u64),
    ToggleAlert(bool),
}

/// Frames the hub pushes to observer sessions. `InitData` goes to a newly
/// connected session only; the other two fan out to every session.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    InitData(Vec<Patient>),
    UpdateAlertMode(bool),
    UpdatePatients(Vec<Patient>),
}

/// Frames pushed to a waiting-room display surface.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum DisplayEvent {
    UpdateDisplay(DisplayPage),
    UpdateAlertMode(bool),
}

/// One rotation window of the ordered waiting queue.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayPage {
    pub page: usize,
    pub page_count: usize,
    pub patients: Vec<Patient>,
}
