//! Authoritative in-memory patient store.
//!
//! The store is the single owner of all patient records. It is constructed
//! once at process start and handed to the synchronization hub; it is not
//! safe for concurrent mutation on its own — the hub serializes access.

use chrono::Local;
use rand::Rng;

use crate::error::{UrgenciaError, UrgenciaResult};
use crate::patient::model::{NewPatient, Patient, PatientUpdate, Stage};

/// Workflow defaults applied on admission.
const DEFAULT_STATUS: &str = "EN ADMISIÓN";
const DEFAULT_COMMENT: &str = "Ingreso reciente.";
const DEFAULT_REASON: &str = "Consulta General";

/// In-memory mapping of patient records, kept in creation order.
#[derive(Debug, Default)]
pub struct PatientStore {
    patients: Vec<Patient>,
    next_id: u64,
}

impl PatientStore {
    pub fn new() -> Self {
        Self {
            patients: Vec::new(),
            next_id: 1,
        }
    }

    /// Admit a new patient: assigns a fresh id, resolves the code and stamps
    /// `last_update`. Rejects missing identity fields and duplicate codes.
    pub fn create(&mut self, new: NewPatient) -> UrgenciaResult<Patient> {
        if new.rut.trim().is_empty() {
            return Err(UrgenciaError::validation("rut is required"));
        }
        if new.name.trim().is_empty() {
            return Err(UrgenciaError::validation("name is required"));
        }

        let code = match new.code {
            Some(code) => {
                if self.code_taken(&code) {
                    return Err(UrgenciaError::validation(format!(
                        "code already in use: {code}"
                    )));
                }
                code
            }
            None => self.generate_code(),
        };

        let patient = Patient {
            id: self.next_id,
            code,
            rut: new.rut,
            name: new.name,
            stage: new.stage.unwrap_or(Stage::Admission),
            status: new.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            category: new.category,
            admission_reason: new
                .admission_reason
                .filter(|r| !r.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_REASON.to_string()),
            comment: new.comment.unwrap_or_else(|| DEFAULT_COMMENT.to_string()),
            last_update: now_stamp(),
        };
        self.next_id += 1;
        self.patients.push(patient.clone());
        Ok(patient)
    }

    /// Merge a partial update onto an existing record and restamp
    /// `last_update`. Returns `None` when the id is unknown — a no-op,
    /// never a panic, so one stale client cannot take down the hub.
    pub fn update(&mut self, id: u64, updates: PatientUpdate) -> Option<Patient> {
        let patient = self.patients.iter_mut().find(|p| p.id == id)?;

        if let Some(code) = updates.code {
            patient.code = code;
        }
        if let Some(rut) = updates.rut {
            patient.rut = rut;
        }
        if let Some(name) = updates.name {
            patient.name = name;
        }
        if let Some(stage) = updates.stage {
            patient.stage = stage;
        }
        if let Some(status) = updates.status {
            patient.status = status;
        }
        if let Some(category) = updates.category {
            patient.category = Some(category);
        }
        if let Some(reason) = updates.admission_reason {
            patient.admission_reason = reason;
        }
        if let Some(comment) = updates.comment {
            patient.comment = comment;
        }
        patient.last_update = now_stamp();

        Some(patient.clone())
    }

    /// Remove a record if present. Idempotent: deleting an unknown id is
    /// not an error.
    pub fn delete(&mut self, id: u64) -> bool {
        let before = self.patients.len();
        self.patients.retain(|p| p.id != id);
        self.patients.len() != before
    }

    /// Every current record in creation order. This is the canonical
    /// ordering consumed by the broadcast hub; display ordering is derived
    /// separately by the queue engine.
    pub fn snapshot(&self) -> Vec<Patient> {
        self.patients.clone()
    }

    /// Patient self-lookup by code and national id. Code comparison is
    /// case-insensitive, the rut must match exactly.
    pub fn find_by_code(&self, code: &str, rut: &str) -> Option<Patient> {
        let code = code.trim();
        let rut = rut.trim();
        self.patients
            .iter()
            .find(|p| p.code.eq_ignore_ascii_case(code) && p.rut == rut)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    fn code_taken(&self, code: &str) -> bool {
        self.patients.iter().any(|p| p.code.eq_ignore_ascii_case(code))
    }

    /// Generate a fresh `LX-NNN` code, redrawing on collision so codes stay
    /// unique among active records.
    fn generate_code(&self) -> String {
        let mut rng = rand::thread_rng();
        loop {
            let letter = (b'A' + rng.gen_range(0..26)) as char;
            let number: u16 = rng.gen_range(100..1000);
            let code = format!("{letter}X-{number}");
            if !self.code_taken(&code) {
                return code;
            }
        }
    }
}

/// Display-only `HH:MM` stamp in local time.
fn now_stamp() -> String {
    Local::now().format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patient::model::Category;

    fn admission(name: &str, rut: &str) -> NewPatient {
        NewPatient {
            code: None,
            rut: rut.into(),
            name: name.into(),
            category: Some(Category::C5),
            admission_reason: None,
            stage: None,
            status: None,
            comment: None,
        }
    }

    #[test]
    fn create_assigns_monotonic_ids_and_defaults() {
        let mut store = PatientStore::new();
        let first = store.create(admission("Juan Parra", "12.345.678-9")).unwrap();
        let second = store.create(admission("María González", "9.876.543-2")).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.stage, Stage::Admission);
        assert_eq!(first.status, "EN ADMISIÓN");
        assert_eq!(first.comment, "Ingreso reciente.");
        assert_eq!(first.admission_reason, "Consulta General");
        assert!(!first.last_update.is_empty());
    }

    #[test]
    fn create_requires_identity_fields() {
        let mut store = PatientStore::new();
        assert!(store.create(admission("", "12.345.678-9")).is_err());
        assert!(store.create(admission("Juan Parra", "  ")).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn create_rejects_duplicate_explicit_code() {
        let mut store = PatientStore::new();
        let mut first = admission("Juan Parra", "12.345.678-9");
        first.code = Some("AX-381".into());
        store.create(first).unwrap();

        let mut dup = admission("María González", "9.876.543-2");
        dup.code = Some("ax-381".into());
        assert!(matches!(
            store.create(dup),
            Err(UrgenciaError::Validation(_))
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn generated_codes_are_unique() {
        let mut store = PatientStore::new();
        for i in 0..50 {
            store
                .create(admission(&format!("Paciente {i}"), &format!("{i}.000.000-0")))
                .unwrap();
        }
        let mut codes: Vec<String> = store.snapshot().iter().map(|p| p.code.clone()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), 50);
    }

    #[test]
    fn ids_are_never_reused_after_delete() {
        let mut store = PatientStore::new();
        let first = store.create(admission("Juan Parra", "12.345.678-9")).unwrap();
        assert!(store.delete(first.id));
        let second = store.create(admission("María González", "9.876.543-2")).unwrap();
        assert!(second.id > first.id);
    }

    #[test]
    fn update_merges_only_named_fields() {
        let mut store = PatientStore::new();
        let created = store.create(admission("Juan Parra", "12.345.678-9")).unwrap();

        let after = store
            .update(
                created.id,
                PatientUpdate {
                    status: Some("EN BOX 3".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(after.status, "EN BOX 3");
        assert_eq!(after.id, created.id);
        assert_eq!(after.code, created.code);
        assert_eq!(after.rut, created.rut);
        assert_eq!(after.name, created.name);
        assert_eq!(after.stage, created.stage);
        assert_eq!(after.category, created.category);
        assert_eq!(after.admission_reason, created.admission_reason);
        assert_eq!(after.comment, created.comment);
    }

    #[test]
    fn update_unknown_id_is_a_noop() {
        let mut store = PatientStore::new();
        store.create(admission("Juan Parra", "12.345.678-9")).unwrap();
        let before = store.snapshot();

        let result = store.update(
            99,
            PatientUpdate {
                status: Some("EN BOX 3".into()),
                ..Default::default()
            },
        );

        assert!(result.is_none());
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn delete_is_idempotent() {
        let mut store = PatientStore::new();
        let patient = store.create(admission("Juan Parra", "12.345.678-9")).unwrap();

        assert!(store.delete(patient.id));
        let after_first = store.snapshot();
        assert!(!store.delete(patient.id));
        assert_eq!(store.snapshot(), after_first);
        assert!(store.is_empty());
    }

    #[test]
    fn snapshot_preserves_creation_order() {
        let mut store = PatientStore::new();
        for name in ["Juan Parra", "María González", "Carlos Ruiz"] {
            store.create(admission(name, "1.111.111-1")).unwrap();
        }
        let ids: Vec<u64> = store.snapshot().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn find_by_code_is_case_insensitive_on_code_only() {
        let mut store = PatientStore::new();
        let mut new = admission("Juan Parra", "12.345.678-9");
        new.code = Some("AX-381".into());
        store.create(new).unwrap();

        assert!(store.find_by_code("ax-381", "12.345.678-9").is_some());
        assert!(store.find_by_code(" AX-381 ", "12.345.678-9").is_some());
        assert!(store.find_by_code("AX-381", "12.345.678-0").is_none());
        assert!(store.find_by_code("BX-202", "12.345.678-9").is_none());
    }
}
