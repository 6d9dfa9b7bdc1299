//! Application state: the synchronization hub.
//!
//! The store and the alert flag live behind one mutex, and every mutation
//! holds it across apply-then-broadcast. That single-writer path is what
//! guarantees all sessions observe the same snapshot sequence in the same
//! order.

use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;
use tracing::debug;
use urgencia_core::patient::model::{NewPatient, Patient, PatientUpdate};
use urgencia_core::store::PatientStore;
use urgencia_core::UrgenciaResult;

use crate::protocol::ServerEvent;

/// The shared mutable resources: patient store plus the facility-wide
/// alert flag.
struct Hub {
    store: PatientStore,
    alert_mode: bool,
}

/// Hub handle shared across sessions and route handlers.
#[derive(Clone)]
pub struct AppState {
    hub: Arc<Mutex<Hub>>,
    tx: broadcast::Sender<ServerEvent>,
}

impl AppState {
    /// Wrap a store constructed at process start. Tests hand in isolated
    /// stores the same way.
    pub fn new(store: PatientStore) -> Self {
        let (tx, _rx) = broadcast::channel(100);
        Self {
            hub: Arc::new(Mutex::new(Hub {
                store,
                alert_mode: false,
            })),
            tx,
        }
    }

    /// Subscribe an observer session to the broadcast stream.
    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.tx.subscribe()
    }

    /// Number of live broadcast subscribers.
    pub fn subscribe_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// State a freshly connected session must be sent before anything else.
    pub fn connect_state(&self) -> (Vec<Patient>, bool) {
        let hub = self.lock();
        (hub.store.snapshot(), hub.alert_mode)
    }

    /// Admit a new patient and fan out the new snapshot. A validation
    /// failure mutates nothing and broadcasts nothing.
    pub fn add_patient(&self, new: NewPatient) -> UrgenciaResult<Patient> {
        let mut hub = self.lock();
        let patient = hub.store.create(new)?;
        self.send(ServerEvent::UpdatePatients(hub.store.snapshot()));
        Ok(patient)
    }

    /// Merge a partial update and fan out. An unknown id is a silent no-op:
    /// nothing changes, nothing is broadcast.
    pub fn update_patient(&self, id: u64, updates: PatientUpdate) {
        let mut hub = self.lock();
        match hub.store.update(id, updates) {
            Some(_) => self.send(ServerEvent::UpdatePatients(hub.store.snapshot())),
            None => debug!(id, "update for unknown patient ignored"),
        }
    }

    /// Delete a patient and fan out the remaining snapshot. Idempotent.
    pub fn delete_patient(&self, id: u64) -> bool {
        let mut hub = self.lock();
        let removed = hub.store.delete(id);
        self.send(ServerEvent::UpdatePatients(hub.store.snapshot()));
        removed
    }

    /// Set the facility-wide alert flag and fan it out.
    pub fn toggle_alert(&self, mode: bool) {
        let mut hub = self.lock();
        hub.alert_mode = mode;
        self.send(ServerEvent::UpdateAlertMode(mode));
    }

    /// Current snapshot, creation order.
    pub fn patients(&self) -> Vec<Patient> {
        self.lock().store.snapshot()
    }

    /// Patient self-lookup by code and national id.
    pub fn lookup(&self, code: &str, rut: &str) -> Option<Patient> {
        self.lock().store.find_by_code(code, rut)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Hub> {
        // A poisoned hub means a panic mid-mutation; the state is still
        // consistent for full-snapshot broadcasts, so keep serving.
        self.hub.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn send(&self, event: ServerEvent) {
        // No receivers connected is fine.
        let _ = self.tx.send(event);
    }
}
