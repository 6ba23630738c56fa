// ── Lock domain types ──

use serde::{Deserialize, Serialize};
use strum::{Display, FromRepr};

/// Numeric lock identifier assigned by the vendor.
pub type LockId = i64;

/// Pull-spring duration used until the lock reports its own setting.
pub const DEFAULT_PULL_SPRING_DURATION: u64 = 5;

/// Lock state, encoded by its vendor ordinal.
///
/// Values outside the known set decode as [`LockState::Unknown`] (9).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, FromRepr, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
#[strum(serialize_all = "kebab-case")]
#[repr(u8)]
pub enum LockState {
    Uncalibrated = 0,
    Calibrating = 1,
    Unlocked = 2,
    HalfOpen = 3,
    Unlocking = 4,
    Locking = 5,
    Locked = 6,
    Pulled = 7,
    Pulling = 8,
    #[default]
    Unknown = 9,
    Updating = 18,
}

impl LockState {
    /// Decode any integer the APIs send; unrecognized values become `Unknown`.
    pub fn from_code(code: i64) -> Self {
        u8::try_from(code)
            .ok()
            .and_then(Self::from_repr)
            .unwrap_or_default()
    }

    pub fn code(self) -> u8 {
        self.into()
    }
}

impl From<u8> for LockState {
    fn from(code: u8) -> Self {
        Self::from_repr(code).unwrap_or_default()
    }
}

impl From<LockState> for u8 {
    #[allow(clippy::as_conversions)]
    fn from(state: LockState) -> Self {
        state as u8
    }
}

/// Door sensor state reported alongside the lock properties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, FromRepr, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
#[strum(serialize_all = "kebab-case")]
#[repr(u8)]
pub enum DoorState {
    #[default]
    NotPaired = 0,
    Disconnected = 1,
    Opened = 2,
    Closed = 3,
    Uncalibrated = 4,
    Unknown = 255,
}

impl DoorState {
    pub fn from_code(code: i64) -> Self {
        u8::try_from(code)
            .ok()
            .and_then(Self::from_repr)
            .unwrap_or(Self::Unknown)
    }
}

impl From<u8> for DoorState {
    fn from(code: u8) -> Self {
        Self::from_repr(code).unwrap_or(Self::Unknown)
    }
}

impl From<DoorState> for u8 {
    #[allow(clippy::as_conversions)]
    fn from(state: DoorState) -> Self {
        state as u8
    }
}

/// Hardware model, from the vendor `type` code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum LockType {
    #[strum(to_string = "Tedee PRO")]
    Pro,
    #[strum(to_string = "Tedee GO")]
    Go,
    #[default]
    #[strum(to_string = "Unknown Model")]
    Unknown,
}

impl LockType {
    pub fn from_code(code: i64) -> Self {
        match code {
            2 => Self::Pro,
            4 => Self::Go,
            _ => Self::Unknown,
        }
    }

    pub fn code(self) -> u8 {
        self.into()
    }
}

impl From<u8> for LockType {
    fn from(code: u8) -> Self {
        Self::from_code(i64::from(code))
    }
}

impl From<LockType> for u8 {
    fn from(lock_type: LockType) -> Self {
        match lock_type {
            LockType::Pro => 2,
            LockType::Go => 4,
            LockType::Unknown => 0,
        }
    }
}

/// The canonical in-memory state of one lock.
///
/// Identity fields never change after discovery. Status fields are only
/// written by the reconciler (discovery, sync and webhook events); callers
/// see locks through read-only views. Serializes to a flat record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Lock {
    pub id: LockId,
    pub name: String,
    pub lock_type: LockType,
    pub state: LockState,
    /// 0 = normal, 1 = jammed.
    pub state_change_result: u8,
    /// 0–100; `None` until the first discovery or sync.
    pub battery_level: Option<u8>,
    pub is_connected: bool,
    pub is_charging: bool,
    pub door_state: DoorState,
    pub pull_spring_enabled: bool,
    pub auto_pull_spring_enabled: bool,
    /// Seconds the latch stays pulled.
    pub pull_spring_duration: u64,
}

impl Lock {
    /// A freshly discovered lock with no status information yet.
    pub fn new(id: LockId, name: impl Into<String>, lock_type: LockType) -> Self {
        Self {
            id,
            name: name.into(),
            lock_type,
            state: LockState::Unknown,
            state_change_result: 0,
            battery_level: None,
            is_connected: false,
            is_charging: false,
            door_state: DoorState::default(),
            pull_spring_enabled: false,
            auto_pull_spring_enabled: false,
            pull_spring_duration: DEFAULT_PULL_SPRING_DURATION,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.state == LockState::Locked
    }

    pub fn is_unlocked(&self) -> bool {
        self.state == LockState::Unlocked
    }

    pub fn is_jammed(&self) -> bool {
        self.state_change_result == 1
    }
}
