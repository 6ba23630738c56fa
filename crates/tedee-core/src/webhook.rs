// ── Bridge webhook events ──
//
// The bridge pushes JSON events to registered callback URLs. Each event is
// parsed once into a typed `WebhookEvent`; the reconciler then applies it
// to the registry without touching raw JSON again.

use serde_json::{Map, Value};

use crate::convert::DEFAULT_BATTERY_LEVEL;
use crate::error::CoreError;
use crate::model::{LockId, LockState};

/// What a webhook event changes on one lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookChange {
    Connection { is_connected: bool },
    Status { state: LockState, state_change_result: u8 },
    BatteryLevel(u8),
    ChargingStarted,
    ChargingStopped,
    FullyCharged,
    /// Recognized but carries nothing the lock model tracks.
    SettingsChanged,
}

/// A parsed webhook event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookEvent {
    /// `backend-connection-changed`: the bridge's own cloud link. No lock state.
    BackendConnection,
    /// A change to one lock.
    Device { lock_id: LockId, change: WebhookChange },
    /// An event kind this client does not know.
    Unrecognized { kind: String },
}

impl WebhookEvent {
    /// Parse a webhook body. Fails only when the `data` object is missing.
    pub fn parse(message: &Value) -> Result<Self, CoreError> {
        let kind = message
            .get("event")
            .and_then(Value::as_str)
            .or_else(|| message.get("type").and_then(Value::as_str))
            .unwrap_or_default();
        let data = message
            .get("data")
            .and_then(Value::as_object)
            .ok_or_else(|| CoreError::webhook("No data in webhook message."))?;

        if kind == "backend-connection-changed" {
            return Ok(Self::BackendConnection);
        }

        let change = match kind {
            "device-connection-changed" => WebhookChange::Connection {
                is_connected: int(data, "isConnected") == Some(1),
            },
            "device-settings-changed" => WebhookChange::SettingsChanged,
            "lock-status-changed" => WebhookChange::Status {
                state: int(data, "state").map_or(LockState::Unknown, LockState::from_code),
                state_change_result: u8::from(int(data, "jammed") == Some(1)),
            },
            "device-battery-level-changed" => WebhookChange::BatteryLevel(
                int(data, "batteryLevel")
                    .and_then(|v| u8::try_from(v.clamp(0, 100)).ok())
                    .unwrap_or(DEFAULT_BATTERY_LEVEL),
            ),
            "device-battery-start-charging" => WebhookChange::ChargingStarted,
            "device-battery-stop-charging" => WebhookChange::ChargingStopped,
            "device-battery-fully-charged" => WebhookChange::FullyCharged,
            other => {
                return Ok(Self::Unrecognized {
                    kind: other.to_owned(),
                });
            }
        };

        Ok(Self::Device {
            lock_id: int(data, "deviceId").unwrap_or(0),
            change,
        })
    }

    pub fn lock_id(&self) -> Option<LockId> {
        match self {
            Self::Device { lock_id, .. } => Some(*lock_id),
            _ => None,
        }
    }
}

fn int(data: &Map<String, Value>, key: &str) -> Option<i64> {
    match data.get(key)? {
        Value::Number(n) => n.as_i64(),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}
