// ── Bridge domain type ──

use serde::{Deserialize, Serialize};

use tedee_api::BridgeEntry;

/// A Tedee bridge. Value object returned by discovery calls, not stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bridge {
    /// Cloud id; 0 when discovered through the local API.
    pub id: i64,
    pub serial: String,
    pub name: String,
}

impl From<BridgeEntry> for Bridge {
    fn from(entry: BridgeEntry) -> Self {
        Self {
            id: entry.id,
            serial: entry.serial_number,
            name: entry.name,
        }
    }
}
