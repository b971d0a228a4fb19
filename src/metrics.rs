//! In-process game counters.
//! Counters are process-wide and monotonic; the host logs a snapshot at shutdown.
use std::sync::atomic::{AtomicU64, Ordering};

static COMMANDS_PROCESSED: AtomicU64 = AtomicU64::new(0);
static UNKNOWN_COMMANDS: AtomicU64 = AtomicU64::new(0);
static UNREGISTERED_REJECTIONS: AtomicU64 = AtomicU64::new(0);
static DUELS_STARTED: AtomicU64 = AtomicU64::new(0);
static DUELS_RESOLVED: AtomicU64 = AtomicU64::new(0);
static LEVEL_UPS: AtomicU64 = AtomicU64::new(0);
static INTERNAL_FAILURES: AtomicU64 = AtomicU64::new(0);

pub fn inc_commands_processed() {
    COMMANDS_PROCESSED.fetch_add(1, Ordering::Relaxed);
}
pub fn inc_unknown_commands() {
    UNKNOWN_COMMANDS.fetch_add(1, Ordering::Relaxed);
}
pub fn inc_unregistered_rejections() {
    UNREGISTERED_REJECTIONS.fetch_add(1, Ordering::Relaxed);
}
pub fn inc_duels_started() {
    DUELS_STARTED.fetch_add(1, Ordering::Relaxed);
}
pub fn inc_duels_resolved() {
    DUELS_RESOLVED.fetch_add(1, Ordering::Relaxed);
}
pub fn inc_level_ups() {
    LEVEL_UPS.fetch_add(1, Ordering::Relaxed);
}
pub fn inc_internal_failures() {
    INTERNAL_FAILURES.fetch_add(1, Ordering::Relaxed);
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub commands_processed: u64,
    pub unknown_commands: u64,
    pub unregistered_rejections: u64,
    pub duels_started: u64,
    pub duels_resolved: u64,
    pub level_ups: u64,
    pub internal_failures: u64,
}

impl Snapshot {
    /// Duels started but not yet resolved (includes abandoned ones).
    pub fn duels_open(&self) -> u64 {
        self.duels_started.saturating_sub(self.duels_resolved)
    }
}

pub fn snapshot() -> Snapshot {
    Snapshot {
        commands_processed: COMMANDS_PROCESSED.load(Ordering::Relaxed),
        unknown_commands: UNKNOWN_COMMANDS.load(Ordering::Relaxed),
        unregistered_rejections: UNREGISTERED_REJECTIONS.load(Ordering::Relaxed),
        duels_started: DUELS_STARTED.load(Ordering::Relaxed),
        duels_resolved: DUELS_RESOLVED.load(Ordering::Relaxed),
        level_ups: LEVEL_UPS.load(Ordering::Relaxed),
        internal_failures: INTERNAL_FAILURES.load(Ordering::Relaxed),
    }
}
