// ── State reconciler ──
//
// The only code that mutates the lock registry. Discovery creates entries,
// sync overwrites status fields of existing entries, webhook events update a
// single field. Payloads are fully parsed before the registry is touched, so
// a failing call leaves the previous state intact.

use std::collections::HashSet;

use serde_json::Value;

use crate::convert::{
    LockProperties, PullSpringSettings, belongs_to_bridge, lock_from_json, lock_id,
    parse_lock_properties, parse_pull_spring_settings,
};
use crate::dispatch::ApiSource;
use crate::error::CoreError;
use crate::model::{Lock, LockId};
use crate::store::LockRegistry;
use crate::webhook::{WebhookChange, WebhookEvent};

/// Summary of one discovery or sync pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Locks written in this pass.
    pub updated: Vec<LockId>,
    /// Tracked locks the response no longer mentioned. They keep their last state.
    pub not_reported: Vec<LockId>,
}

/// What happened to a webhook event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// A tracked lock was updated.
    Applied(LockId),
    /// The event carries no lock state (bridge backend link, settings change).
    Informational,
    /// The event refers to a lock this client does not track.
    UnknownLock(LockId),
    /// The event kind is not recognized.
    Ignored,
}

fn lock_entries(body: &Value) -> Result<&Vec<Value>, CoreError> {
    body.as_array().ok_or_else(|| CoreError::Request {
        message: format!("expected a list of locks, got: {body}"),
        status: None,
    })
}

fn missing_from(registry: &LockRegistry, seen: &HashSet<LockId>) -> Vec<LockId> {
    let mut ids: Vec<LockId> = registry.ids().filter(|id| !seen.contains(id)).collect();
    ids.sort_unstable();
    ids
}

/// Create (or fully replace) registry entries from a discovery response.
///
/// Fails with `Client` when no lock survives the bridge filter.
pub fn apply_discovery(
    registry: &mut LockRegistry,
    body: &Value,
    bridge_id: Option<i64>,
) -> Result<ReconcileReport, CoreError> {
    let locks: Vec<Lock> = lock_entries(body)?
        .iter()
        .filter(|entry| belongs_to_bridge(entry, bridge_id))
        .map(lock_from_json)
        .collect::<Result<_, _>>()?;

    if locks.is_empty() {
        return Err(CoreError::client("No lock found"));
    }

    let seen: HashSet<LockId> = locks.iter().map(|lock| lock.id).collect();
    let not_reported = missing_from(registry, &seen);
    let updated = registry.batch(|entries| {
        locks
            .into_iter()
            .map(|lock| {
                let id = lock.id;
                entries.insert(id, lock);
                id
            })
            .collect()
    });

    Ok(ReconcileReport {
        updated,
        not_reported,
    })
}

/// Overwrite status fields of tracked locks from a sync response.
///
/// Pull-spring settings are only refreshed from local responses; the cloud
/// sync endpoint does not report them. Every reported id must already be
/// tracked, otherwise nothing is written and `Client` is returned.
pub fn apply_sync(
    registry: &mut LockRegistry,
    body: &Value,
    bridge_id: Option<i64>,
    source: ApiSource,
) -> Result<ReconcileReport, CoreError> {
    let updates: Vec<(LockId, LockProperties, Option<PullSpringSettings>)> = lock_entries(body)?
        .iter()
        .filter(|entry| belongs_to_bridge(entry, bridge_id))
        .map(|entry| {
            let id = lock_id(entry)?;
            if !registry.contains(id) {
                return Err(CoreError::client(format!(
                    "Lock {id} has not been discovered; call get_locks first"
                )));
            }
            let pull_spring =
                (source == ApiSource::Local).then(|| parse_pull_spring_settings(entry));
            Ok((id, parse_lock_properties(entry), pull_spring))
        })
        .collect::<Result<_, _>>()?;

    let seen: HashSet<LockId> = updates.iter().map(|(id, ..)| *id).collect();
    let not_reported = missing_from(registry, &seen);
    let updated = registry.batch(|entries| {
        updates
            .into_iter()
            .filter_map(|(id, properties, pull_spring)| {
                let lock = entries.get_mut(&id)?;
                properties.apply_to(lock);
                if let Some(settings) = pull_spring {
                    settings.apply_to(lock);
                }
                Some(id)
            })
            .collect()
    });

    Ok(ReconcileReport {
        updated,
        not_reported,
    })
}

/// Apply one parsed webhook event.
pub fn apply_webhook(registry: &mut LockRegistry, event: &WebhookEvent) -> WebhookOutcome {
    let WebhookEvent::Device { lock_id, change } = event else {
        return match event {
            WebhookEvent::BackendConnection => WebhookOutcome::Informational,
            _ => WebhookOutcome::Ignored,
        };
    };

    if !registry.contains(*lock_id) {
        return WebhookOutcome::UnknownLock(*lock_id);
    }
    if *change == WebhookChange::SettingsChanged {
        return WebhookOutcome::Informational;
    }

    registry.update(*lock_id, |lock| match *change {
        WebhookChange::Connection { is_connected } => lock.is_connected = is_connected,
        WebhookChange::Status {
            state,
            state_change_result,
        } => {
            lock.state = state;
            lock.state_change_result = state_change_result;
        }
        WebhookChange::BatteryLevel(level) => lock.battery_level = Some(level),
        WebhookChange::ChargingStarted => lock.is_charging = true,
        WebhookChange::ChargingStopped => lock.is_charging = false,
        WebhookChange::FullyCharged => {
            lock.is_charging = false;
            lock.battery_level = Some(100);
        }
        WebhookChange::SettingsChanged => {}
    });
    WebhookOutcome::Applied(*lock_id)
}
