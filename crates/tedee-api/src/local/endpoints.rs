// Local API endpoint builders.

use serde_json::Value;

use crate::request::{ApiRequest, UnlockMode};

pub fn list_locks() -> ApiRequest {
    ApiRequest::get("lock")
}

pub fn lock(lock_id: i64) -> ApiRequest {
    ApiRequest::post(format!("lock/{lock_id}/lock"))
}

pub fn unlock(lock_id: i64, mode: UnlockMode) -> ApiRequest {
    ApiRequest::post(format!("lock/{lock_id}/unlock")).with_query("mode", mode.code())
}

pub fn pull(lock_id: i64) -> ApiRequest {
    ApiRequest::post(format!("lock/{lock_id}/pull"))
}

pub fn bridge() -> ApiRequest {
    ApiRequest::get("bridge")
}

pub fn list_callbacks() -> ApiRequest {
    ApiRequest::get("callback")
}

/// `POST /callback` with a single [`CallbackRequest`](crate::CallbackRequest).
pub fn create_callback(body: Value) -> ApiRequest {
    ApiRequest::post("callback").with_body(body)
}

/// `PUT /callback` replaces every registered webhook with the given array.
pub fn replace_callbacks(body: Value) -> ApiRequest {
    ApiRequest::put("callback").with_body(body)
}

pub fn delete_callback(callback_id: i64) -> ApiRequest {
    ApiRequest::delete(format!("callback/{callback_id}"))
}
