//! Per-stage item counts collected while a provider streams data.
//!
//! A stage only gets an entry once something has been recorded for it, so
//! "not started" (no entry) stays distinguishable from "started, zero items".

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize, Serializer};

use crate::stage::TransferStage;

/// Item count for a single transfer stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageResult {
    pub items: u64,
}

/// Shared accumulator mapping each transfer stage to its [`StageResult`].
///
/// Cloning yields another handle onto the same counts; stage counters hold
/// clones while the owning provider exposes it read-only to callers.
#[derive(Debug, Clone, Default)]
pub struct TransferResults {
    inner: Arc<Mutex<BTreeMap<TransferStage, StageResult>>>,
}

impl TransferResults {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<TransferStage, StageResult>> {
        // Counts stay meaningful even if a holder panicked mid-update.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Count one more item for `stage`, creating the entry on first use.
    pub fn increment(&self, stage: TransferStage) -> u64 {
        let mut guard = self.lock();
        let entry = guard.entry(stage).or_default();
        entry.items += 1;
        entry.items
    }

    /// Overwrite the count for `stage`.
    pub fn set(&self, stage: TransferStage, items: u64) {
        self.lock().insert(stage, StageResult { items });
    }

    /// Get the result recorded for `stage`, if any.
    pub fn get(&self, stage: TransferStage) -> Option<StageResult> {
        self.lock().get(&stage).copied()
    }

    /// Number of items counted for `stage`, treating a missing entry as zero.
    pub fn items(&self, stage: TransferStage) -> u64 {
        self.get(stage).map(|r| r.items).unwrap_or(0)
    }

    pub fn contains(&self, stage: TransferStage) -> bool {
        self.lock().contains_key(&stage)
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Sum of items across every recorded stage.
    pub fn total_items(&self) -> u64 {
        self.lock().values().map(|r| r.items).sum()
    }

    /// Copy of the current counts.
    pub fn snapshot(&self) -> BTreeMap<TransferStage, StageResult> {
        self.lock().clone()
    }
}

impl Serialize for TransferResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.snapshot().serialize(serializer)
    }
}
