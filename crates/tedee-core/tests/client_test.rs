#![allow(clippy::unwrap_used)]
// Integration tests for `TedeeClient` against wiremock bridges and clouds.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tedee_core::{
    ApiSource, ClientConfig, ClientEvent, ClientObserver, CoreError, LocalConfig, LockState,
    SettleDelays, TedeeClient, TokenMode, WebhookOutcome,
};

// ── Helpers ─────────────────────────────────────────────────────────

const SHORT_SETTLE: SettleDelays = SettleDelays {
    lock: Duration::from_millis(20),
    unlock: Duration::from_millis(20),
    pull_margin: Duration::from_millis(10),
};

#[derive(Default)]
struct RecordingObserver {
    events: Mutex<Vec<String>>,
}

impl RecordingObserver {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl ClientObserver for RecordingObserver {
    fn on_event(&self, event: &ClientEvent<'_>) {
        let line = match event {
            ClientEvent::LocalThrottled { .. } => "throttled".to_owned(),
            ClientEvent::LocalFallback { path, .. } => format!("fallback:{path}"),
            ClientEvent::Completed { operation, source } => format!("completed:{operation}:{source}"),
            ClientEvent::LockNotReported { lock_id } => format!("not_reported:{lock_id}"),
            ClientEvent::WebhookForUnknownLock { lock_id } => format!("unknown_lock:{lock_id}"),
            _ => "other".to_owned(),
        };
        self.events.lock().unwrap().push(line);
    }
}

fn local_config(server: &MockServer) -> LocalConfig {
    let addr = server.address();
    LocalConfig {
        host: addr.ip().to_string(),
        port: addr.port(),
        token: SecretString::from("bridge-secret"),
        token_mode: TokenMode::Secure,
    }
}

fn cloud_url(server: &MockServer) -> Url {
    Url::parse(&format!("{}/api/v1.32/", server.uri())).unwrap()
}

fn base_config() -> ClientConfig {
    ClientConfig {
        settle: SHORT_SETTLE,
        local_min_interval: Duration::ZERO,
        ..ClientConfig::default()
    }
}

fn cloud_only(cloud: &MockServer) -> ClientConfig {
    ClientConfig {
        personal_token: Some(SecretString::from("pk-123")),
        cloud_url: cloud_url(cloud),
        ..base_config()
    }
}

fn local_only(bridge: &MockServer) -> ClientConfig {
    ClientConfig {
        local: Some(local_config(bridge)),
        ..base_config()
    }
}

fn local_with_cloud(bridge: &MockServer, cloud: &MockServer) -> ClientConfig {
    ClientConfig {
        local: Some(local_config(bridge)),
        ..cloud_only(cloud)
    }
}

fn observed(config: ClientConfig) -> (TedeeClient, Arc<RecordingObserver>) {
    let observer = Arc::new(RecordingObserver::default());
    let client = TedeeClient::new(config)
        .unwrap()
        .with_observer(observer.clone());
    (client, observer)
}

fn envelope(result: Value) -> Value {
    json!({"result": result, "success": true, "errorMessages": [], "statusCode": 200})
}

fn cloud_lock(id: i64, state: i64, bridge: Option<i64>) -> Value {
    json!({
        "id": id,
        "name": format!("Lock {id}"),
        "type": 2,
        "isConnected": true,
        "connectedToId": bridge,
        "lockProperties": {"state": state, "batteryLevel": 90, "isCharging": false, "stateChangeResult": 0},
        "deviceSettings": {"pullSpringEnabled": true, "pullSpringDuration": 2}
    })
}

fn local_lock(id: i64, state: i64) -> Value {
    json!({
        "id": id,
        "name": format!("Lock {id}"),
        "type": 4,
        "isConnected": 1,
        "state": state,
        "batteryLevel": 55,
        "isCharging": 0,
        "jammed": 0,
        "deviceSettings": {"pullSpringEnabled": 1, "pullSpringDuration": 1}
    })
}

async fn mount_cloud_locks(cloud: &MockServer, locks: Value) {
    Mock::given(method("GET"))
        .and(path("/api/v1.32/my/lock"))
        .and(header("authorization", "PersonalKey pk-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(locks)))
        .mount(cloud)
        .await;
}

async fn mount_local_locks(bridge: &MockServer, locks: Value) {
    Mock::given(method("GET"))
        .and(path("/v1.0/lock"))
        .respond_with(ResponseTemplate::new(200).set_body_json(locks))
        .mount(bridge)
        .await;
}

// ── Dispatcher paths ────────────────────────────────────────────────

#[tokio::test]
async fn test_local_auth_failure_falls_back_to_cloud() {
    let bridge = MockServer::start().await;
    let cloud = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1.0/lock"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&bridge)
        .await;
    mount_cloud_locks(&cloud, json!([cloud_lock(1, 6, None)])).await;

    let (mut client, observer) = observed(local_with_cloud(&bridge, &cloud));
    let report = client.get_locks().await.unwrap();

    assert_eq!(report.updated, vec![1]);
    assert!(client.is_locked(1));
    assert_eq!(
        observer.events(),
        vec!["fallback:lock".to_owned(), "completed:list_locks:cloud".to_owned()]
    );
}

#[tokio::test]
async fn test_local_server_error_falls_back_to_cloud() {
    let bridge = MockServer::start().await;
    let cloud = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1.0/lock"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&bridge)
        .await;
    mount_cloud_locks(&cloud, json!([cloud_lock(1, 2, None)])).await;

    let mut client = TedeeClient::new(local_with_cloud(&bridge, &cloud)).unwrap();
    client.get_locks().await.unwrap();
    assert!(client.is_unlocked(1));
}

#[tokio::test]
async fn test_local_auth_failure_without_token_is_fatal() {
    let bridge = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1.0/lock"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&bridge)
        .await;

    let mut client = TedeeClient::new(local_only(&bridge)).unwrap();
    let err = client.get_locks().await.unwrap_err();

    assert!(matches!(err, CoreError::LocalAuth { .. }), "got {err:?}");
    assert!(err.is_auth());
    assert!(client.locks().is_empty());
}

#[tokio::test]
async fn test_local_failure_without_token_is_data_update() {
    let bridge = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1.0/lock/3/lock"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&bridge)
        .await;

    let client = TedeeClient::new(local_only(&bridge)).unwrap();
    let err = client.lock(3).await.unwrap_err();

    match err {
        CoreError::DataUpdate { path, .. } => assert_eq!(path, "lock/3/lock"),
        other => panic!("expected DataUpdate, got {other:?}"),
    }
}

#[tokio::test]
async fn test_cloud_errors_propagate_unchanged() {
    let cloud = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1.32/my/lock"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&cloud)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1.32/my/lock/1/operation/lock"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&cloud)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1.32/my/lock/1/operation/pull"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&cloud)
        .await;

    let mut client = TedeeClient::new(cloud_only(&cloud)).unwrap();
    assert!(matches!(
        client.get_locks().await,
        Err(CoreError::Auth { .. })
    ));
    assert!(matches!(
        client.lock(1).await,
        Err(CoreError::RateLimit { .. })
    ));
    assert!(matches!(
        client.pull(1).await,
        Err(CoreError::Request {
            status: Some(500),
            ..
        })
    ));
}

#[tokio::test]
async fn test_local_calls_are_spaced() {
    let bridge = MockServer::start().await;
    mount_local_locks(&bridge, json!([local_lock(1, 2)])).await;

    let (mut client, observer) = observed(ClientConfig {
        local_min_interval: Duration::from_millis(300),
        ..local_only(&bridge)
    });

    let start = Instant::now();
    client.get_locks().await.unwrap();
    client.sync().await.unwrap();

    assert!(start.elapsed() >= Duration::from_millis(300));
    assert!(observer.events().contains(&"throttled".to_owned()));
}

// ── Discovery & sync ────────────────────────────────────────────────

#[tokio::test]
async fn test_discovery_applies_bridge_filter() {
    let cloud = MockServer::start().await;
    mount_cloud_locks(
        &cloud,
        json!([
            cloud_lock(1, 6, Some(10)),
            cloud_lock(2, 6, Some(11)),
            cloud_lock(3, 2, None)
        ]),
    )
    .await;

    let mut client = TedeeClient::new(ClientConfig {
        bridge_id: Some(10),
        ..cloud_only(&cloud)
    })
    .unwrap();
    client.get_locks().await.unwrap();

    let ids: Vec<i64> = client.locks_snapshot().iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[tokio::test]
async fn test_discovery_without_locks_fails() {
    let cloud = MockServer::start().await;
    mount_cloud_locks(&cloud, json!([])).await;

    let mut client = TedeeClient::new(cloud_only(&cloud)).unwrap();
    let err = client.get_locks().await.unwrap_err();
    assert!(matches!(err, CoreError::Client { .. }));
    assert_eq!(err.to_string(), "No lock found");
}

#[tokio::test]
async fn test_discovery_with_null_result_fails() {
    let cloud = MockServer::start().await;
    mount_cloud_locks(&cloud, Value::Null).await;

    let mut client = TedeeClient::new(cloud_only(&cloud)).unwrap();
    assert!(matches!(
        client.get_locks().await,
        Err(CoreError::Request { .. })
    ));
}

#[tokio::test]
async fn test_sync_before_discovery_fails() {
    let cloud = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1.32/my/lock/sync"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            {"id": 1, "isConnected": true, "lockProperties": {"state": 6}}
        ]))))
        .mount(&cloud)
        .await;

    let mut client = TedeeClient::new(cloud_only(&cloud)).unwrap();
    assert!(matches!(
        client.sync().await,
        Err(CoreError::Client { .. })
    ));
}

#[tokio::test]
async fn test_sync_reports_missing_locks() {
    let cloud = MockServer::start().await;
    mount_cloud_locks(&cloud, json!([cloud_lock(1, 6, None), cloud_lock(2, 6, None)])).await;
    Mock::given(method("GET"))
        .and(path("/api/v1.32/my/lock/sync"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            {"id": 1, "isConnected": true, "lockProperties": {"state": 2}}
        ]))))
        .mount(&cloud)
        .await;

    let (mut client, observer) = observed(cloud_only(&cloud));
    client.get_locks().await.unwrap();
    let report = client.sync().await.unwrap();

    assert_eq!(report.not_reported, vec![2]);
    assert!(client.is_unlocked(1));
    assert!(client.is_locked(2));
    assert!(observer.events().contains(&"not_reported:2".to_owned()));
}

#[tokio::test]
async fn test_local_sync_refreshes_pull_spring() {
    let bridge = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1.0/lock"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([local_lock(1, 2)])))
        .up_to_n_times(1)
        .mount(&bridge)
        .await;

    let mut client = TedeeClient::new(local_only(&bridge)).unwrap();
    client.get_locks().await.unwrap();
    assert_eq!(client.lock_by_id(1).unwrap().pull_spring_duration, 1);
    assert_eq!(client.lock_by_id(1).unwrap().battery_level, Some(55));

    let mut updated = local_lock(1, 6);
    updated["deviceSettings"]["pullSpringDuration"] = json!(4);
    mount_local_locks(&bridge, json!([updated])).await;

    client.sync().await.unwrap();
    let lock = client.lock_by_id(1).unwrap();
    assert!(lock.is_locked());
    assert_eq!(lock.pull_spring_duration, 4);
}

// ── Commands ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_unlock_then_sync_scenario() {
    let cloud = MockServer::start().await;
    mount_cloud_locks(&cloud, json!([cloud_lock(1, 2, None)])).await;
    Mock::given(method("POST"))
        .and(path("/api/v1.32/my/lock/1/operation/unlock"))
        .and(query_param("mode", "3"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&cloud)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1.32/my/lock/sync"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            {"id": 1, "isConnected": true, "lockProperties": {"state": 2, "batteryLevel": 80}}
        ]))))
        .mount(&cloud)
        .await;

    let mut client = TedeeClient::new(cloud_only(&cloud)).unwrap();
    client.get_locks().await.unwrap();
    let before = client.lock_by_id(1).unwrap().clone();

    let start = Instant::now();
    let ack = client.unlock(1).await.unwrap();
    assert!(start.elapsed() >= SHORT_SETTLE.unlock);
    assert_eq!(ack.lock_id, 1);
    assert_eq!(ack.command, "unlock");
    assert_eq!(ack.source, ApiSource::Cloud);
    assert_eq!(ack.settled_for, SHORT_SETTLE.unlock);

    // Commands never write the registry.
    assert_eq!(client.lock_by_id(1).unwrap(), &before);

    client.sync().await.unwrap();
    let lock = client.lock_by_id(1).unwrap();
    assert_eq!(lock.state, LockState::Unlocked);
    assert_eq!(lock.battery_level, Some(80));
}

#[tokio::test]
async fn test_unlock_waits_default_settle_delay() {
    let cloud = MockServer::start().await;
    mount_cloud_locks(&cloud, json!([cloud_lock(1, 6, None)])).await;
    Mock::given(method("POST"))
        .and(path("/api/v1.32/my/lock/1/operation/unlock"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&cloud)
        .await;

    let mut client = TedeeClient::new(ClientConfig {
        settle: SettleDelays::default(),
        ..cloud_only(&cloud)
    })
    .unwrap();
    client.get_locks().await.unwrap();

    let start = Instant::now();
    let ack = client.unlock(1).await.unwrap();
    assert_eq!(ack.settled_for, Duration::from_secs(5));
    assert!(start.elapsed() >= Duration::from_secs(5));
}

#[tokio::test]
async fn test_open_uses_unlock_and_pull_mode_locally() {
    let bridge = MockServer::start().await;
    mount_local_locks(&bridge, json!([local_lock(1, 6)])).await;
    Mock::given(method("POST"))
        .and(path("/v1.0/lock/1/unlock"))
        .and(query_param("mode", "4"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&bridge)
        .await;

    let mut client = TedeeClient::new(ClientConfig {
        settle: SettleDelays::none(),
        ..local_only(&bridge)
    })
    .unwrap();
    client.get_locks().await.unwrap();

    let ack = client.open(1).await.unwrap();
    assert_eq!(ack.source, ApiSource::Local);
    // One-second spring from the lock settings, no margin.
    assert_eq!(ack.settled_for, Duration::from_secs(1));
}

#[tokio::test]
async fn test_lock_and_pull_commands_hit_local_endpoints() {
    let bridge = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1.0/lock/5/lock"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&bridge)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1.0/lock/5/pull"))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&bridge)
        .await;

    let client = TedeeClient::new(local_only(&bridge)).unwrap();
    let locked = client.lock(5).await.unwrap();
    assert_eq!(locked.settled_for, SHORT_SETTLE.lock);

    // Unknown lock: default five-second spring plus margin.
    let pulled = client.pull(5).await.unwrap();
    assert_eq!(
        pulled.settled_for,
        Duration::from_secs(5) + SHORT_SETTLE.pull_margin
    );
}

// ── Bridges & personal key ──────────────────────────────────────────

#[tokio::test]
async fn test_local_bridge_reports_id_zero() {
    let bridge = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1.0/bridge"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"name": "Hallway", "serialNumber": "SN-42"})),
        )
        .mount(&bridge)
        .await;

    let client = TedeeClient::new(local_only(&bridge)).unwrap();
    let found = client.get_local_bridge().await.unwrap();
    assert_eq!(found.id, 0);
    assert_eq!(found.serial, "SN-42");
    assert_eq!(found.name, "Hallway");
}

#[tokio::test]
async fn test_local_bridge_failure_is_client_error() {
    let bridge = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1.0/bridge"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&bridge)
        .await;

    let client = TedeeClient::new(local_only(&bridge)).unwrap();
    let err = client.get_local_bridge().await.unwrap_err();
    assert_eq!(err.to_string(), "Unable to get local bridge");
}

#[tokio::test]
async fn test_cloud_bridges_are_listed() {
    let cloud = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1.32/my/bridge"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            {"id": 10, "serialNumber": "A", "name": "Up"},
            {"id": 11, "serialNumber": "B", "name": "Down"}
        ]))))
        .mount(&cloud)
        .await;

    let client = TedeeClient::new(cloud_only(&cloud)).unwrap();
    let bridges = client.get_bridges().await.unwrap();
    assert_eq!(bridges.len(), 2);
    assert_eq!(bridges[1].id, 11);
    assert_eq!(bridges[1].serial, "B");
}

#[tokio::test]
async fn test_validate_personal_key() {
    let cloud = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1.32/my/device"))
        .and(header("authorization", "PersonalKey good"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([]))))
        .mount(&cloud)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1.32/my/device"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&cloud)
        .await;

    let client = TedeeClient::new(cloud_only(&cloud)).unwrap();
    assert!(client.validate_personal_key(&SecretString::from("good")).await);
    assert!(!client.validate_personal_key(&SecretString::from("bad")).await);
}

// ── Webhooks ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_webhook_event_updates_tracked_lock() {
    let cloud = MockServer::start().await;
    mount_cloud_locks(&cloud, json!([cloud_lock(1, 2, None)])).await;

    let (mut client, observer) = observed(cloud_only(&cloud));
    client.get_locks().await.unwrap();
    let mut updates = client.subscribe();

    let outcome = client
        .apply_webhook_event(&json!({
            "event": "lock-status-changed",
            "data": {"deviceId": 1, "state": 6, "jammed": 0}
        }))
        .unwrap();
    assert_eq!(outcome, WebhookOutcome::Applied(1));
    assert!(client.is_locked(1));
    assert!(updates.has_changed().unwrap());

    let outcome = client
        .apply_webhook_event(&json!({
            "event": "lock-status-changed",
            "data": {"deviceId": 9, "state": 2}
        }))
        .unwrap();
    assert_eq!(outcome, WebhookOutcome::UnknownLock(9));
    assert!(observer.events().contains(&"unknown_lock:9".to_owned()));
}

#[tokio::test]
async fn test_register_webhook_returns_created_id() {
    let bridge = MockServer::start().await;
    let headers = vec![BTreeMap::from([(
        "Authorization".to_owned(),
        "Basic abc".to_owned(),
    )])];
    Mock::given(method("POST"))
        .and(path("/v1.0/callback"))
        .and(body_json(json!({
            "url": "http://ha.local/hook",
            "headers": [{"Authorization": "Basic abc"}]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 7})))
        .expect(1)
        .mount(&bridge)
        .await;

    let client = TedeeClient::new(local_only(&bridge)).unwrap();
    let id = client
        .register_webhook("http://ha.local/hook", headers)
        .await
        .unwrap();
    assert_eq!(id, 7);
}

#[tokio::test]
async fn test_register_webhook_looks_up_id_when_not_returned() {
    let bridge = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1.0/callback"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&bridge)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1.0/callback"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "url": "http://other/hook", "headers": []},
            {"id": 2, "url": "http://ha.local/hook", "headers": []}
        ])))
        .mount(&bridge)
        .await;

    let client = TedeeClient::new(local_only(&bridge)).unwrap();
    assert_eq!(
        client
            .register_webhook("http://ha.local/hook", Vec::new())
            .await
            .unwrap(),
        2
    );

    let err = client
        .register_webhook("http://missing/hook", Vec::new())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Webhook error: Webhook id not found");
}

#[tokio::test]
async fn test_webhook_listing_failure_is_webhook_error() {
    let bridge = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1.0/callback"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&bridge)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1.0/callback"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&bridge)
        .await;

    let client = TedeeClient::new(local_only(&bridge)).unwrap();
    assert_eq!(
        client.get_webhooks().await.unwrap_err().to_string(),
        "Webhook error: Unable to get webhooks"
    );
    assert_eq!(
        client
            .register_webhook("http://ha.local/hook", Vec::new())
            .await
            .unwrap_err()
            .to_string(),
        "Webhook error: Unable to register webhook"
    );
}

#[tokio::test]
async fn test_update_and_delete_webhooks() {
    let bridge = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1.0/callback"))
        .and(body_json(json!([{"url": "http://ha.local/hook", "headers": []}])))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&bridge)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1.0/callback"))
        .and(body_json(json!([])))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&bridge)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1.0/callback/3"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&bridge)
        .await;

    let client = TedeeClient::new(local_only(&bridge)).unwrap();
    client
        .update_webhooks("http://ha.local/hook", Vec::new())
        .await
        .unwrap();
    client.delete_webhooks().await;
    // Failure is swallowed.
    client.delete_webhook(3).await;
}

#[tokio::test]
async fn test_cleanup_webhooks_by_host() {
    let bridge = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1.0/callback"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "url": "http://192.168.1.9:8123/api/webhook/a", "headers": []},
            {"id": 2, "url": "http://10.0.0.5/hook", "headers": []},
            {"id": 3, "url": "http://192.168.1.9:8123/api/webhook/b", "headers": []}
        ])))
        .mount(&bridge)
        .await;
    for id in [1, 3] {
        Mock::given(method("DELETE"))
            .and(path(format!("/v1.0/callback/{id}")))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&bridge)
            .await;
    }
    Mock::given(method("DELETE"))
        .and(path("/v1.0/callback/2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&bridge)
        .await;

    let client = TedeeClient::new(local_only(&bridge)).unwrap();
    client.cleanup_webhooks_by_host("192.168.1.9").await;
}

#[tokio::test]
async fn test_connect_discovers_locks() {
    let cloud = MockServer::start().await;
    mount_cloud_locks(&cloud, json!([cloud_lock(4, 6, None)])).await;

    let client = TedeeClient::connect(cloud_only(&cloud)).await.unwrap();
    assert_eq!(client.locks().len(), 1);
    assert!(client.is_locked(4));
    client.shutdown();
}
