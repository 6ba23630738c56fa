// Typed wire shapes that are stable across both APIs.
//
// Lock payloads are not typed here. The local and cloud APIs disagree on
// their layout; `tedee-core` normalizes them from raw JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A bridge as reported by the cloud listing or the local `/bridge` call.
///
/// The local API omits `id`; it defaults to 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeEntry {
    #[serde(default)]
    pub id: i64,
    pub serial_number: String,
    pub name: String,
}

/// A webhook registered on the bridge (`/callback`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Callback {
    pub id: i64,
    pub url: String,
    #[serde(default)]
    pub headers: Vec<BTreeMap<String, String>>,
}

/// Body for creating or replacing webhooks.
///
/// `headers` are sent by the bridge with every event, e.g.
/// `[{"Authorization": "Basic ..."}]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackRequest {
    pub url: String,
    #[serde(default)]
    pub headers: Vec<BTreeMap<String, String>>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn local_bridge_has_no_id() {
        let bridge: BridgeEntry =
            serde_json::from_value(json!({"serialNumber": "SN-1", "name": "Hall"})).unwrap();
        assert_eq!(bridge.id, 0);
        assert_eq!(bridge.serial_number, "SN-1");
    }

    #[test]
    fn callback_headers_default_to_empty() {
        let cb: Callback =
            serde_json::from_value(json!({"id": 3, "url": "http://ha.local/hook"})).unwrap();
        assert!(cb.headers.is_empty());
    }
}
