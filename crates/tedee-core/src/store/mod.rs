// ── Lock state store ──
//
// Single-writer registry of tracked locks with push-based snapshots.

mod registry;

pub use registry::{LockRegistry, LockSnapshot};
