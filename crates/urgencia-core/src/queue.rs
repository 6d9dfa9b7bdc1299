//! Waiting-room queue ordering.
//!
//! Pure functions of a snapshot: recomputed from scratch on every broadcast,
//! no memoized state, no incremental re-sort.

use crate::patient::model::{Patient, Stage};

/// Rank used for patients without a known category: after every known one.
const UNRANKED: u8 = u8::MAX;

/// The ordered list shown on the public waiting-room display.
///
/// Filters to `stage == waiting`, sorts by category priority ascending
/// (`C1` first) and breaks ties by id ascending, i.e. arrival order.
pub fn waiting_queue(snapshot: &[Patient]) -> Vec<Patient> {
    let mut queue: Vec<Patient> = snapshot
        .iter()
        .filter(|p| p.stage == Stage::Waiting)
        .cloned()
        .collect();
    queue.sort_by_key(|p| (priority_rank(p), p.id));
    queue
}

/// Unordered grouping for a stage column (box, exams), in snapshot order.
pub fn in_stage(snapshot: &[Patient], stage: Stage) -> Vec<Patient> {
    snapshot
        .iter()
        .filter(|p| p.stage == stage)
        .cloned()
        .collect()
}

fn priority_rank(patient: &Patient) -> u8 {
    patient.category.map(|c| c.priority()).unwrap_or(UNRANKED)
}
