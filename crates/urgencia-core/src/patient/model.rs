//! Patient domain models.

use serde::{Deserialize, Serialize};

/// A patient record tracked through the emergency-department workflow.
///
/// Owned exclusively by the [`PatientStore`](crate::store::PatientStore);
/// every mutation passes through the store, which restamps `last_update`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Unique, monotonically assigned, never reused.
    pub id: u64,
    /// Short human-facing token (e.g. `AX-381`), unique among active records.
    pub code: String,
    /// National id, compared against patient-entered input on self-lookup.
    pub rut: String,
    pub name: String,
    pub stage: Stage,
    /// Free-text label shown to the patient; independent of `stage`.
    pub status: String,
    /// Missing means not yet triaged; sorts after every known category.
    pub category: Option<Category>,
    pub admission_reason: String,
    pub comment: String,
    /// Display-only `HH:MM` stamp of the most recent mutation.
    pub last_update: String,
}

/// Workflow stage (tracker step).
///
/// The declaration order defines forward progress through the tracker:
/// `admission < triage < waiting < box < exams < discharge`. The store does
/// not enforce monotonic transitions; staff may set any stage from any stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Admission,
    Triage,
    Waiting,
    Box,
    Exams,
    Discharge,
}

/// Triage category, `C1` (most urgent) through `C5` (least urgent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    C1,
    C2,
    C3,
    C4,
    C5,
}

impl Category {
    /// Queue priority rank, 1 (first) through 5 (last).
    pub fn priority(&self) -> u8 {
        match self {
            Self::C1 => 1,
            Self::C2 => 2,
            Self::C3 => 3,
            Self::C4 => 4,
            Self::C5 => 5,
        }
    }

    /// Fixed display label shown on staff and patient views.
    pub fn label(&self) -> &'static str {
        match self {
            Self::C1 => "C1 - Emergencia Vital",
            Self::C2 => "C2 - Emergencia",
            Self::C3 => "C3 - Urgencia",
            Self::C4 => "C4 - Leve",
            Self::C5 => "C5 - Consulta General",
        }
    }
}

/// Fields accepted when admitting a new patient. The store assigns the id,
/// generates a code when none is supplied and fills workflow defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    #[serde(default)]
    pub code: Option<String>,
    pub rut: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub admission_reason: Option<String>,
    #[serde(default)]
    pub stage: Option<Stage>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Partial update merged onto an existing record. Absent fields are left
/// unchanged; `last_update` is never settable and is restamped by the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientUpdate {
    pub code: Option<String>,
    pub rut: Option<String>,
    pub name: Option<String>,
    pub stage: Option<Stage>,
    pub status: Option<String>,
    pub category: Option<Category>,
    pub admission_reason: Option<String>,
    pub comment: Option<String>,
}
