// ── Lock payload normalization ──
//
// The cloud and local APIs describe the same lock differently. The shape is
// resolved once into `LockShape`; everything downstream reads canonical
// `LockProperties`. Missing or mistyped fields fall back to fixed defaults
// rather than failing the whole payload.

use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::model::{DEFAULT_PULL_SPRING_DURATION, DoorState, Lock, LockId, LockState, LockType};

/// Battery level assumed when a payload carries none.
pub const DEFAULT_BATTERY_LEVEL: u8 = 50;

// ── Lenient field readers ──────────────────────────────────────────

fn read_i64(map: &Map<String, Value>, key: &str) -> Option<i64> {
    match map.get(key)? {
        Value::Number(n) => n.as_i64(),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

fn read_bool(map: &Map<String, Value>, key: &str) -> Option<bool> {
    match map.get(key)? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|v| v != 0),
        _ => None,
    }
}

fn battery_from(raw: Option<i64>) -> u8 {
    raw.and_then(|v| u8::try_from(v.clamp(0, 100)).ok())
        .unwrap_or(DEFAULT_BATTERY_LEVEL)
}

fn flag_from(raw: Option<i64>) -> u8 {
    u8::from(raw.unwrap_or(0) == 1)
}

// ── Shape resolution ───────────────────────────────────────────────

/// The two layouts a lock payload arrives in.
#[derive(Debug, Clone, Copy)]
pub enum LockShape<'a> {
    /// Cloud: status nested under `lockProperties`, jam status in
    /// `stateChangeResult`.
    Cloud {
        root: &'a Map<String, Value>,
        properties: &'a Map<String, Value>,
    },
    /// Local: status at the top level, jam status in `jammed`.
    Local(&'a Map<String, Value>),
}

impl<'a> LockShape<'a> {
    /// Classify a payload. Returns `None` if it is not a JSON object.
    pub fn detect(json: &'a Value) -> Option<Self> {
        let root = json.as_object()?;
        Some(
            match root.get("lockProperties").and_then(Value::as_object) {
                Some(properties) => Self::Cloud { root, properties },
                None => Self::Local(root),
            },
        )
    }

    fn root(&self) -> &'a Map<String, Value> {
        match *self {
            Self::Cloud { root, .. } | Self::Local(root) => root,
        }
    }
}

/// Canonical status fields of one lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockProperties {
    pub is_connected: bool,
    pub state: LockState,
    pub battery_level: u8,
    pub is_charging: bool,
    pub state_change_result: u8,
    pub door_state: DoorState,
}

impl Default for LockProperties {
    fn default() -> Self {
        Self {
            is_connected: false,
            state: LockState::Unknown,
            battery_level: DEFAULT_BATTERY_LEVEL,
            is_charging: false,
            state_change_result: 0,
            door_state: DoorState::NotPaired,
        }
    }
}

impl From<LockShape<'_>> for LockProperties {
    fn from(shape: LockShape<'_>) -> Self {
        let is_connected = read_bool(shape.root(), "isConnected").unwrap_or(false);
        let (fields, jam_key) = match shape {
            LockShape::Cloud { properties, .. } => (properties, "stateChangeResult"),
            LockShape::Local(root) => (root, "jammed"),
        };

        Self {
            is_connected,
            state: read_i64(fields, "state").map_or(LockState::Unknown, LockState::from_code),
            battery_level: battery_from(read_i64(fields, "batteryLevel")),
            is_charging: read_bool(fields, "isCharging").unwrap_or(false),
            state_change_result: flag_from(read_i64(fields, jam_key)),
            door_state: read_i64(fields, "doorState").map_or(DoorState::NotPaired, DoorState::from_code),
        }
    }
}

impl LockProperties {
    /// Overwrite the status fields of `lock`.
    pub fn apply_to(self, lock: &mut Lock) {
        lock.is_connected = self.is_connected;
        lock.state = self.state;
        lock.battery_level = Some(self.battery_level);
        lock.is_charging = self.is_charging;
        lock.state_change_result = self.state_change_result;
        lock.door_state = self.door_state;
    }
}

/// Normalize the status fields of a lock payload in either shape.
pub fn parse_lock_properties(json: &Value) -> LockProperties {
    LockShape::detect(json).map(LockProperties::from).unwrap_or_default()
}

// ── Pull spring ────────────────────────────────────────────────────

/// Pull-spring configuration from `deviceSettings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullSpringSettings {
    pub enabled: bool,
    pub auto_enabled: bool,
    pub duration_secs: u64,
}

impl Default for PullSpringSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            auto_enabled: false,
            duration_secs: DEFAULT_PULL_SPRING_DURATION,
        }
    }
}

impl PullSpringSettings {
    pub fn apply_to(self, lock: &mut Lock) {
        lock.pull_spring_enabled = self.enabled;
        lock.auto_pull_spring_enabled = self.auto_enabled;
        lock.pull_spring_duration = self.duration_secs;
    }
}

pub fn parse_pull_spring_settings(json: &Value) -> PullSpringSettings {
    let Some(settings) = json.get("deviceSettings").and_then(Value::as_object) else {
        return PullSpringSettings::default();
    };
    PullSpringSettings {
        enabled: read_bool(settings, "pullSpringEnabled").unwrap_or(false),
        auto_enabled: read_bool(settings, "autoPullSpringEnabled").unwrap_or(false),
        duration_secs: read_i64(settings, "pullSpringDuration")
            .and_then(|d| u64::try_from(d).ok())
            .unwrap_or(DEFAULT_PULL_SPRING_DURATION),
    }
}

// ── Identity & filtering ───────────────────────────────────────────

/// The `id` of a lock payload; required in both shapes.
pub fn lock_id(json: &Value) -> Result<LockId, CoreError> {
    json.get("id")
        .and_then(Value::as_i64)
        .ok_or_else(|| CoreError::Request {
            message: format!("lock entry without a numeric id: {json}"),
            status: None,
        })
}

/// Whether a payload passes the optional bridge filter.
///
/// Locks that report no parent bridge are always kept.
pub fn belongs_to_bridge(json: &Value, bridge_id: Option<i64>) -> bool {
    let Some(bridge_id) = bridge_id else {
        return true;
    };
    json.get("connectedToId")
        .and_then(Value::as_i64)
        .is_none_or(|parent| parent == bridge_id)
}

/// Build a fully populated lock from a discovery payload.
pub fn lock_from_json(json: &Value) -> Result<Lock, CoreError> {
    let id = lock_id(json)?;
    let name = json
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let lock_type = json
        .get("type")
        .and_then(Value::as_i64)
        .map_or(LockType::Unknown, LockType::from_code);

    let mut lock = Lock::new(id, name, lock_type);
    parse_lock_properties(json).apply_to(&mut lock);
    parse_pull_spring_settings(json).apply_to(&mut lock);
    Ok(lock)
}
