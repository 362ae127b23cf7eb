// ABOUTME: Test support utilities.
// ABOUTME: Provides a recording fake cloud, a scripted health probe and run fixtures.

// Each test binary only uses some of these helpers, so allow dead_code.
#![allow(dead_code)]

use async_trait::async_trait;
use launchpad::cloud::{
    BuildRequest, CloudClient, CloudError, DeployAction, DeployRequest, ResourceKind,
    ResourceTarget,
};
use launchpad::config::{Settings, keys};
use launchpad::types::AppName;
use launchpad::verify::{HealthProbe, ProbeError, ProbeRequest};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Once;
use std::time::Duration;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env().add_directive("launchpad=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

// =============================================================================
// Fixtures
// =============================================================================

pub const FQDN: &str = "mcp-sql.nicebeach-1234.westeurope.azurecontainerapps.io";

/// A complete, valid set of configuration values.
pub fn vars() -> HashMap<String, String> {
    [
        (keys::RESOURCE_GROUP, "rg-mcp"),
        (keys::APP_NAME, "mcp-sql"),
        (keys::ENVIRONMENT, "mcp-env"),
        (keys::LOCATION, "westeurope"),
        (keys::REGISTRY, "mcpregistry"),
        (keys::API_KEYS, "key-one,key-two"),
        (keys::CONNECTION_STRING, "Server=tcp:sql.example.net;Database=app"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Valid values with one key removed.
pub fn vars_without(key: &str) -> HashMap<String, String> {
    let mut vars = vars();
    vars.remove(key);
    vars
}

/// Project directory containing a Dockerfile.
pub fn project_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("Dockerfile"),
        "FROM python:3.11-slim\nEXPOSE 8000\n",
    )
    .unwrap();
    dir
}

/// Default settings with short timeouts.
pub fn settings() -> Settings {
    let mut settings = Settings::default();
    settings.build_timeout = Duration::from_secs(5);
    settings.health.timeout = Duration::from_secs(1);
    settings
}

// =============================================================================
// FakeCloud
// =============================================================================

/// Scripted answer to an existence check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    Exists,
    Absent,
    Error,
}

/// One recorded control-plane call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Exists(ResourceKind),
    Create(ResourceKind),
    AppExists,
    Build(BuildRequest),
    Deploy(DeployRequest),
    AppFqdn,
}

struct State {
    checks: HashMap<ResourceKind, Check>,
    app: Check,
    failing_creates: HashSet<ResourceKind>,
    build_fails: bool,
    build_delay: Option<Duration>,
    deploy_fails: bool,
    fqdn: Result<Option<String>, ()>,
    calls: Vec<Call>,
}

/// In-memory cloud that records every call.
///
/// Successful creates and deploys flip the corresponding existence to
/// `Exists`, so a second run against the same fake sees the first run's
/// effects.
pub struct FakeCloud {
    state: Mutex<State>,
}

impl FakeCloud {
    /// Nothing exists yet; every call succeeds; ingress has a hostname.
    pub fn empty() -> Self {
        Self {
            state: Mutex::new(State {
                checks: [
                    (ResourceKind::ResourceGroup, Check::Absent),
                    (ResourceKind::Environment, Check::Absent),
                    (ResourceKind::Registry, Check::Absent),
                ]
                .into_iter()
                .collect(),
                app: Check::Absent,
                failing_creates: HashSet::new(),
                build_fails: false,
                build_delay: None,
                deploy_fails: false,
                fqdn: Ok(Some(FQDN.to_string())),
                calls: Vec::new(),
            }),
        }
    }

    /// Every resource and the app already exist.
    pub fn provisioned() -> Self {
        Self::empty()
            .with_check(ResourceKind::ResourceGroup, Check::Exists)
            .with_check(ResourceKind::Environment, Check::Exists)
            .with_check(ResourceKind::Registry, Check::Exists)
            .with_app(Check::Exists)
    }

    pub fn with_check(self, kind: ResourceKind, check: Check) -> Self {
        self.state.lock().checks.insert(kind, check);
        self
    }

    pub fn with_app(self, check: Check) -> Self {
        self.state.lock().app = check;
        self
    }

    pub fn failing_create(self, kind: ResourceKind) -> Self {
        self.state.lock().failing_creates.insert(kind);
        self
    }

    pub fn failing_build(self) -> Self {
        self.state.lock().build_fails = true;
        self
    }

    pub fn slow_build(self, delay: Duration) -> Self {
        self.state.lock().build_delay = Some(delay);
        self
    }

    pub fn failing_deploy(self) -> Self {
        self.state.lock().deploy_fails = true;
        self
    }

    pub fn without_fqdn(self) -> Self {
        self.state.lock().fqdn = Ok(None);
        self
    }

    pub fn failing_fqdn(self) -> Self {
        self.state.lock().fqdn = Err(());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().calls.clone()
    }

    pub fn creates(&self) -> Vec<ResourceKind> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Create(kind) => Some(kind),
                _ => None,
            })
            .collect()
    }

    pub fn builds(&self) -> Vec<BuildRequest> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Build(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    pub fn deploys(&self) -> Vec<DeployRequest> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Deploy(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    pub fn fqdn_lookups(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::AppFqdn))
            .count()
    }

    fn record(&self, call: Call) {
        self.state.lock().calls.push(call);
    }
}

fn failure(command: &str, stderr: &str) -> CloudError {
    CloudError::CommandFailed {
        command: command.to_string(),
        code: Some(1),
        stderr: stderr.to_string(),
    }
}

fn answer(check: Check, command: &str) -> Result<bool, CloudError> {
    match check {
        Check::Exists => Ok(true),
        Check::Absent => Ok(false),
        Check::Error => Err(failure(command, "AuthorizationFailed: token expired")),
    }
}

#[async_trait]
impl CloudClient for FakeCloud {
    async fn exists(&self, target: &ResourceTarget) -> Result<bool, CloudError> {
        self.record(Call::Exists(target.kind()));
        let check = self.state.lock().checks[&target.kind()];
        answer(check, "show")
    }

    async fn create(&self, target: &ResourceTarget) -> Result<(), CloudError> {
        self.record(Call::Create(target.kind()));
        let mut state = self.state.lock();
        if state.failing_creates.contains(&target.kind()) {
            return Err(failure("create", "QuotaExceeded"));
        }
        state.checks.insert(target.kind(), Check::Exists);
        Ok(())
    }

    async fn app_exists(&self, _app: &AppName, _resource_group: &str) -> Result<bool, CloudError> {
        self.record(Call::AppExists);
        let check = self.state.lock().app;
        answer(check, "containerapp show")
    }

    async fn build_image(&self, request: &BuildRequest) -> Result<(), CloudError> {
        self.record(Call::Build(request.clone()));
        let (fails, delay) = {
            let state = self.state.lock();
            (state.build_fails, state.build_delay)
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if fails {
            return Err(failure("acr build", "TasksOperationsNotAllowed"));
        }
        Ok(())
    }

    async fn deploy_app(&self, request: &DeployRequest) -> Result<(), CloudError> {
        self.record(Call::Deploy(request.clone()));
        let mut state = self.state.lock();
        if state.deploy_fails {
            return Err(failure("containerapp", "ContainerAppOperationError"));
        }
        if request.action == DeployAction::Create {
            state.app = Check::Exists;
        }
        Ok(())
    }

    async fn app_fqdn(
        &self,
        _app: &AppName,
        _resource_group: &str,
    ) -> Result<Option<String>, CloudError> {
        self.record(Call::AppFqdn);
        self.state
            .lock()
            .fqdn
            .clone()
            .map_err(|_| failure("containerapp show", "connection reset"))
    }
}

// =============================================================================
// FakeProbe
// =============================================================================

/// Scripted probe response.
#[derive(Debug, Clone, Copy)]
pub enum Response {
    Status(u16),
    Timeout,
    Refused,
}

/// Health probe that returns a fixed response and records requests.
pub struct FakeProbe {
    response: Response,
    requests: Mutex<Vec<ProbeRequest>>,
}

impl FakeProbe {
    pub fn new(response: Response) -> Self {
        Self {
            response,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn healthy() -> Self {
        Self::new(Response::Status(200))
    }

    pub fn requests(&self) -> Vec<ProbeRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl HealthProbe for FakeProbe {
    async fn get(&self, request: &ProbeRequest) -> Result<u16, ProbeError> {
        self.requests.lock().push(request.clone());
        match self.response {
            Response::Status(code) => Ok(code),
            Response::Timeout => Err(ProbeError::Timeout(request.timeout)),
            Response::Refused => Err(ProbeError::Connection("connection refused".to_string())),
        }
    }
}
