use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Which completion wins when fetches of one task resolve out of order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionOrder {
    /// Drop a completion when a later-issued fetch has already been applied
    #[default]
    LastIssued,
    /// Apply every completion; whatever resolves last is shown
    LastResolved,
}

/// Per-task sequence numbers for issued and applied fetches.
///
/// Sequence numbers start at 1; 0 means nothing applied yet.
#[derive(Debug, Default)]
pub struct SequenceGuard {
    issued: AtomicU64,
    applied: Mutex<u64>,
}

impl SequenceGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number for a fetch that is about to start
    pub fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Run `apply` for completion `seq` if the ordering policy accepts it.
    ///
    /// `apply` runs while the guard is held, so two completions of the same
    /// task never interleave their writes.
    pub fn complete<F: FnOnce()>(&self, seq: u64, order: CompletionOrder, apply: F) -> bool {
        let mut applied = self.applied.lock();
        let accepted = match order {
            CompletionOrder::LastIssued => seq > *applied,
            CompletionOrder::LastResolved => true,
        };
        if accepted {
            *applied = (*applied).max(seq);
            apply();
        }
        accepted
    }

    pub fn issued(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }

    pub fn latest_applied(&self) -> u64 {
        *self.applied.lock()
    }
}
