// Drives the full setup workflow against a mock broker admin API, a
// recording compose runtime, and temp credential directories. No real
// timers: the retry policy is shrunk to milliseconds.
use async_trait::async_trait;
use axum::Json;
use axum::Router;
use axum::extract::{Path as AxumPath, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{get, post, put};
use plume_admin::AdminClient;
use plume_provision::{
    ComposeRuntime, ProvisionConfig, ProvisionError, ProvisionResult, RetryPolicy, Verifier,
    run_setup,
};
use plume_authz::{NamespaceName, Subject, TenantName, TopicName};
use std::collections::{BTreeMap, BTreeSet};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct Counters {
    health_calls: u32,
    tenant_creates: u32,
    namespace_creates: u32,
    topic_creates: u32,
    tenants: BTreeSet<String>,
    namespaces: BTreeSet<String>,
    topics: BTreeSet<String>,
    namespace_permissions: BTreeMap<String, BTreeSet<String>>,
    topic_permissions: BTreeMap<String, BTreeSet<String>>,
}

#[derive(Clone)]
struct MockState {
    healthy: bool,
    counters: Arc<Mutex<Counters>>,
}

fn authed(headers: &HeaderMap) -> bool {
    headers.contains_key(header::AUTHORIZATION)
}

async fn health(State(state): State<MockState>, headers: HeaderMap) -> StatusCode {
    let mut counters = state.counters.lock().expect("lock");
    counters.health_calls += 1;
    if !authed(&headers) {
        StatusCode::UNAUTHORIZED
    } else if state.healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

async fn create_tenant(
    State(state): State<MockState>,
    AxumPath(tenant): AxumPath<String>,
    headers: HeaderMap,
    Json(_body): Json<serde_json::Value>,
) -> StatusCode {
    if !authed(&headers) {
        return StatusCode::UNAUTHORIZED;
    }
    let mut counters = state.counters.lock().expect("lock");
    counters.tenant_creates += 1;
    if counters.tenants.insert(tenant) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::CONFLICT
    }
}

async fn create_namespace(
    State(state): State<MockState>,
    AxumPath((tenant, namespace)): AxumPath<(String, String)>,
    headers: HeaderMap,
) -> StatusCode {
    if !authed(&headers) {
        return StatusCode::UNAUTHORIZED;
    }
    let mut counters = state.counters.lock().expect("lock");
    counters.namespace_creates += 1;
    if counters.namespaces.insert(format!("{tenant}/{namespace}")) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::CONFLICT
    }
}

async fn grant_namespace_permission(
    State(state): State<MockState>,
    AxumPath((_tenant, _namespace, role)): AxumPath<(String, String, String)>,
    Json(actions): Json<BTreeSet<String>>,
) -> StatusCode {
    let mut counters = state.counters.lock().expect("lock");
    counters.namespace_permissions.insert(role, actions);
    StatusCode::NO_CONTENT
}

async fn namespace_permissions(
    State(state): State<MockState>,
) -> Json<BTreeMap<String, BTreeSet<String>>> {
    let counters = state.counters.lock().expect("lock");
    Json(counters.namespace_permissions.clone())
}

async fn create_topic(
    State(state): State<MockState>,
    AxumPath((tenant, namespace, topic)): AxumPath<(String, String, String)>,
    headers: HeaderMap,
) -> StatusCode {
    if !authed(&headers) {
        return StatusCode::UNAUTHORIZED;
    }
    let mut counters = state.counters.lock().expect("lock");
    counters.topic_creates += 1;
    if counters.topics.insert(format!("{tenant}/{namespace}/{topic}")) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::CONFLICT
    }
}

async fn grant_topic_permission(
    State(state): State<MockState>,
    AxumPath((_tenant, _namespace, _topic, role)): AxumPath<(String, String, String, String)>,
    Json(actions): Json<BTreeSet<String>>,
) -> StatusCode {
    let mut counters = state.counters.lock().expect("lock");
    counters.topic_permissions.insert(role, actions);
    StatusCode::NO_CONTENT
}

async fn topic_permissions(
    State(state): State<MockState>,
) -> Json<BTreeMap<String, BTreeSet<String>>> {
    let counters = state.counters.lock().expect("lock");
    Json(counters.topic_permissions.clone())
}

async fn spawn_mock_admin(healthy: bool) -> (SocketAddr, Arc<Mutex<Counters>>) {
    let counters = Arc::new(Mutex::new(Counters::default()));
    let state = MockState {
        healthy,
        counters: Arc::clone(&counters),
    };
    let app = Router::new()
        .route("/admin/v2/brokers/health", get(health))
        .route("/admin/v2/tenants/{tenant}", put(create_tenant))
        .route(
            "/admin/v2/namespaces/{tenant}/{namespace}",
            put(create_namespace),
        )
        .route(
            "/admin/v2/namespaces/{tenant}/{namespace}/permissions",
            get(namespace_permissions),
        )
        .route(
            "/admin/v2/namespaces/{tenant}/{namespace}/permissions/{role}",
            post(grant_namespace_permission),
        )
        .route(
            "/admin/v2/persistent/{tenant}/{namespace}/{topic}",
            put(create_topic),
        )
        .route(
            "/admin/v2/persistent/{tenant}/{namespace}/{topic}/permissions",
            get(topic_permissions),
        )
        .route(
            "/admin/v2/persistent/{tenant}/{namespace}/{topic}/permissions/{role}",
            post(grant_topic_permission),
        )
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock admin");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, app.into_make_service()).await {
            eprintln!("mock admin server error: {err}");
        }
    });
    (addr, counters)
}

struct RecordingCompose {
    calls: AtomicU32,
}

impl RecordingCompose {
    fn new() -> Self {
        Self {
            calls: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl ComposeRuntime for RecordingCompose {
    async fn up(&self) -> ProvisionResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn test_config(dir: &Path, admin_addr: SocketAddr, policy: RetryPolicy) -> ProvisionConfig {
    ProvisionConfig {
        admin_url: format!("http://{admin_addr}"),
        service_url: "pulsar://localhost:6650".to_string(),
        compose_file: dir.join("docker-compose.yml"),
        keys_dir: dir.join("keys"),
        tokens_dir: dir.join("tokens"),
        tenant: TenantName::new("public"),
        namespace: NamespaceName::new("default"),
        topic: TopicName::new("test-topic"),
        ready: policy,
    }
}

fn fast_policy(attempts: u32) -> RetryPolicy {
    RetryPolicy::new(attempts, Duration::from_millis(10))
}

#[tokio::test]
async fn fresh_environment_provisions_everything_then_idempotently_repeats() {
    let (addr, counters) = spawn_mock_admin(true).await;
    let dir = tempfile::tempdir().expect("tempdir");
    let config = test_config(dir.path(), addr, fast_policy(3));
    let compose = RecordingCompose::new();

    // Scenario 1: nothing exists yet.
    let summary = run_setup(&config, &compose).await.expect("first setup");
    assert_eq!(summary.credentials.generated_count(), 5);
    assert_eq!(summary.ready_after_attempts, 1);
    assert!(config.keys_dir.join("private.key").exists());
    assert!(config.keys_dir.join("public.key").exists());
    for subject in ProvisionConfig::subjects() {
        assert!(config.token_path(&subject).exists());
    }

    {
        let counters = counters.lock().expect("lock");
        assert_eq!(counters.tenant_creates, 1);
        assert_eq!(counters.namespace_creates, 1);
        assert_eq!(counters.topic_creates, 1);
        assert_eq!(
            counters.namespace_permissions["client1"],
            BTreeSet::from(["produce".to_string(), "consume".to_string()])
        );
        assert_eq!(
            counters.topic_permissions["client2"],
            BTreeSet::from(["consume".to_string()])
        );
    }

    // Scenario 2: everything already present. No regeneration, conflicts
    // swallowed, permission state unchanged.
    let ns_before = counters.lock().expect("lock").namespace_permissions.clone();
    let summary = run_setup(&config, &compose).await.expect("second setup");
    assert_eq!(summary.credentials.generated_count(), 0);

    {
        let counters = counters.lock().expect("lock");
        assert_eq!(counters.tenant_creates, 2);
        assert_eq!(counters.tenants.len(), 1);
        assert_eq!(counters.namespace_permissions, ns_before);
    }
    assert_eq!(compose.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn unhealthy_broker_exhausts_the_budget_without_touching_permissions() {
    let (addr, counters) = spawn_mock_admin(false).await;
    let dir = tempfile::tempdir().expect("tempdir");
    let config = test_config(dir.path(), addr, fast_policy(4));
    let compose = RecordingCompose::new();

    let err = run_setup(&config, &compose)
        .await
        .expect_err("broker never healthy");
    match &err {
        ProvisionError::BrokerUnavailable { attempts } => assert_eq!(*attempts, 4),
        other => panic!("unexpected error: {other}"),
    }
    let rendered = err.to_string();
    assert!(rendered.contains("docker compose ps"));
    assert!(rendered.contains("docker compose logs broker"));

    let counters = counters.lock().expect("lock");
    // Exactly max_attempts probes, and provisioning never started.
    assert_eq!(counters.health_calls, 4);
    assert_eq!(counters.tenant_creates, 0);
}

#[tokio::test]
async fn verifier_reports_topic_override_precedence() {
    let (addr, _counters) = spawn_mock_admin(true).await;
    let dir = tempfile::tempdir().expect("tempdir");
    let config = test_config(dir.path(), addr, fast_policy(3));
    let compose = RecordingCompose::new();
    run_setup(&config, &compose).await.expect("setup");

    let admin_token =
        plume_authz::load_token(&config.token_path(&Subject::new("admin"))).expect("token");
    let admin = AdminClient::new(&config.admin_url, admin_token).expect("client");

    let report = Verifier::new(Some(&admin), &config)
        .run()
        .await
        .expect("verify");
    assert!(report.all_passed(), "report:\n{}", report.render());

    let rendered = report.render();
    // Namespace scope carries both actions; the topic override narrows
    // client2 to consume only.
    let ns_line = rendered
        .lines()
        .find(|line| line.starts_with("namespace permissions"))
        .expect("namespace line");
    assert!(ns_line.contains("produce"));
    assert!(ns_line.contains("consume"));

    let topic_line = rendered
        .lines()
        .find(|line| line.starts_with("topic permissions"))
        .expect("topic line");
    assert!(topic_line.contains("\"client2\":[\"consume\"]"));
    assert!(!topic_line.contains("\"client2\":[\"produce\""));
}

#[tokio::test]
async fn verifier_without_credentials_fails_with_remediation() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = test_config(
        dir.path(),
        "127.0.0.1:1".parse().expect("addr"),
        fast_policy(1),
    );

    let report = Verifier::new(None, &config).run().await.expect("verify");
    assert!(!report.all_passed());
    let rendered = report.render();
    assert!(rendered.contains("plume setup"));
    // All five credential files plus the health check are reported.
    assert_eq!(report.checks.len(), 6);
}
