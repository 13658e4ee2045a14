//! Progress Snapshot
//!
//! Server-reported counts for one user's quota. Constructors clamp so that
//! `submitted + pending <= total` holds for every value of this type.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::record::ProgressCounts;

/// Counts of confirmed, filled-but-unconfirmed and total quota items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawSnapshot")]
pub struct ProgressSnapshot {
    submitted: u32,
    pending: u32,
    total: u32,
}

/// Wire shape; only reachable through `ProgressSnapshot::new`
#[derive(Deserialize)]
struct RawSnapshot {
    submitted: u32,
    pending: u32,
    total: u32,
}

impl From<RawSnapshot> for ProgressSnapshot {
    fn from(raw: RawSnapshot) -> Self {
        Self::new(raw.submitted, raw.pending, raw.total)
    }
}

impl ProgressSnapshot {
    /// Builds a snapshot, clamping counts that would overflow `total`
    pub fn new(submitted: u32, pending: u32, total: u32) -> Self {
        let clamped_submitted = submitted.min(total);
        let clamped_pending = pending.min(total - clamped_submitted);
        if clamped_submitted != submitted || clamped_pending != pending {
            warn!(submitted, pending, total, "progress counts exceed quota, clamping");
        }
        Self {
            submitted: clamped_submitted,
            pending: clamped_pending,
            total,
        }
    }

    /// Initial value before the first fetch
    pub fn empty(total: u32) -> Self {
        Self { submitted: 0, pending: 0, total }
    }

    pub fn from_counts(counts: ProgressCounts, total: u32) -> Self {
        Self::new(counts.submitted, counts.pending, total)
    }

    pub fn submitted(&self) -> u32 {
        self.submitted
    }

    pub fn pending(&self) -> u32 {
        self.pending
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Items created on the server, confirmed or not
    pub fn filled(&self) -> u32 {
        self.submitted + self.pending
    }

    /// Items not started yet
    pub fn remaining(&self) -> u32 {
        self.total.saturating_sub(self.filled())
    }

    pub fn is_complete(&self) -> bool {
        self.filled() >= self.total
    }

    /// One more item counted as pending; `None` once the quota is full
    pub fn with_one_more_pending(&self) -> Option<Self> {
        (!self.is_complete()).then(|| Self {
            pending: self.pending + 1,
            ..*self
        })
    }

    pub fn submitted_percent(&self) -> f64 {
        percent(self.submitted, self.total)
    }

    pub fn pending_percent(&self) -> f64 {
        percent(self.pending, self.total)
    }

    pub fn filled_percent(&self) -> f64 {
        percent(self.filled(), self.total)
    }
}

fn percent(part: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        f64::from(part) * 100.0 / f64::from(total)
    }
}

/// Where the current snapshot came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provenance {
    /// Straight from the server
    Authoritative,
    /// Locally advanced after a successful POST, awaiting reconciliation
    Provisional,
}

/// Everything a progress view renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    pub snapshot: ProgressSnapshot,
    pub provenance: Provenance,
    /// Whether at least one refresh has succeeded
    pub loaded: bool,
    /// Last refresh failure, cleared by the next success
    pub last_error: Option<String>,
}

impl ProgressState {
    pub fn initial(total: u32) -> Self {
        Self {
            snapshot: ProgressSnapshot::empty(total),
            provenance: Provenance::Authoritative,
            loaded: false,
            last_error: None,
        }
    }

    pub fn is_provisional(&self) -> bool {
        self.provenance == Provenance::Provisional
    }

    pub fn is_stale(&self) -> bool {
        self.last_error.is_some()
    }
}
