// ── Domain model ──
//
// Canonical types shared by the dispatcher, the reconciler and consumers.

pub mod bridge;
pub mod lock;

pub use bridge::Bridge;
pub use lock::{DEFAULT_PULL_SPRING_DURATION, DoorState, Lock, LockId, LockState, LockType};
