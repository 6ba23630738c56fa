// Cloud API endpoint builders.

use crate::request::{ApiRequest, UnlockMode};

pub fn list_locks() -> ApiRequest {
    ApiRequest::get("my/lock")
}

pub fn sync_locks() -> ApiRequest {
    ApiRequest::get("my/lock/sync")
}

pub fn lock(lock_id: i64) -> ApiRequest {
    ApiRequest::post(format!("my/lock/{lock_id}/operation/lock"))
}

pub fn unlock(lock_id: i64, mode: UnlockMode) -> ApiRequest {
    ApiRequest::post(format!("my/lock/{lock_id}/operation/unlock")).with_query("mode", mode.code())
}

pub fn pull(lock_id: i64) -> ApiRequest {
    ApiRequest::post(format!("my/lock/{lock_id}/operation/pull"))
}

pub fn list_bridges() -> ApiRequest {
    ApiRequest::get("my/bridge")
}

pub fn list_devices() -> ApiRequest {
    ApiRequest::get("my/device")
}
