// ABOUTME: End-to-end orchestration tests against the recording fake cloud.
// ABOUTME: Covers first deploys, redeploys, build fallback, fatal stages and best-effort verification.

mod support;

use launchpad::build::{BuildStrategy, PreflightError};
use launchpad::cloud::{DeployAction, DeploySource, ResourceKind};
use launchpad::config::{ConfigError, Settings, keys};
use launchpad::diagnostics::WarningKind;
use launchpad::error::Error;
use launchpad::output::{Output, OutputMode};
use launchpad::pipeline::{Orchestrator, RunReport, Stage};
use launchpad::provision::Existence;
use launchpad::types::ImageRef;
use launchpad::verify::HealthReport;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use support::{Call, Check, FakeCloud, FakeProbe, Response};

async fn run_with(
    cloud: &FakeCloud,
    probe: &FakeProbe,
    vars: &HashMap<String, String>,
    settings: Settings,
    dir: &Path,
) -> Result<RunReport, Error> {
    support::init_tracing();
    let output = Output::new(OutputMode::Quiet);
    Orchestrator::new(cloud, probe, &output)
        .run(vars, dir, move |_| Ok(settings))
        .await
}

async fn run(cloud: &FakeCloud, probe: &FakeProbe) -> Result<RunReport, Error> {
    let dir = support::project_dir();
    run_with(cloud, probe, &support::vars(), support::settings(), dir.path()).await
}

fn has_warning(report: &RunReport, kind: WarningKind) -> bool {
    report.warnings.iter().any(|w| w.kind == kind)
}

// =============================================================================
// Redeploy and first deploy
// =============================================================================

#[tokio::test]
async fn existing_infrastructure_is_updated_from_pushed_image() {
    let cloud = FakeCloud::provisioned();
    let probe = FakeProbe::healthy();

    let report = run(&cloud, &probe).await.unwrap();

    assert!(cloud.creates().is_empty(), "nothing should be created");
    assert_eq!(report.action, DeployAction::Update);
    assert_eq!(report.strategy, BuildStrategy::RemoteBuild);
    assert_eq!(report.created_count(), 0);

    let deploys = cloud.deploys();
    assert_eq!(deploys.len(), 1);
    assert_eq!(deploys[0].action, DeployAction::Update);
    assert_eq!(
        deploys[0].source,
        DeploySource::Image(ImageRef::new(
            "mcpregistry.azurecr.io",
            "mcp-sql",
            "latest"
        ))
    );
    assert_eq!(report.health, Some(HealthReport::Healthy { code: 200 }));
    assert!(report.warnings.is_empty());
}

#[tokio::test]
async fn first_deploy_creates_everything_in_order() {
    let cloud = FakeCloud::empty();
    let probe = FakeProbe::healthy();

    let report = run(&cloud, &probe).await.unwrap();

    assert_eq!(
        cloud.creates(),
        vec![
            ResourceKind::ResourceGroup,
            ResourceKind::Environment,
            ResourceKind::Registry
        ]
    );
    assert_eq!(report.action, DeployAction::Create);
    assert_eq!(report.created_count(), 3);
    assert!(
        report
            .resources
            .iter()
            .all(|r| r.observed == Existence::Absent && r.created)
    );
}

#[tokio::test]
async fn stages_run_in_order() {
    let cloud = FakeCloud::provisioned();
    let probe = FakeProbe::healthy();

    run(&cloud, &probe).await.unwrap();

    let calls = cloud.calls();
    let position = |pred: fn(&Call) -> bool| calls.iter().position(pred).unwrap();
    let group = position(|c| *c == Call::Exists(ResourceKind::ResourceGroup));
    let env = position(|c| *c == Call::Exists(ResourceKind::Environment));
    let registry = position(|c| *c == Call::Exists(ResourceKind::Registry));
    let app = position(|c| *c == Call::AppExists);
    let build = position(|c| matches!(c, Call::Build(_)));
    let deploy = position(|c| matches!(c, Call::Deploy(_)));
    let fqdn = position(|c| *c == Call::AppFqdn);

    assert!(group < env && env < registry && registry < app);
    assert!(app < build && build < deploy && deploy < fqdn);
}

#[tokio::test]
async fn second_run_creates_nothing_and_updates() {
    let cloud = FakeCloud::empty();
    let probe = FakeProbe::healthy();
    let dir = support::project_dir();

    let first = run_with(&cloud, &probe, &support::vars(), support::settings(), dir.path())
        .await
        .unwrap();
    assert_eq!(first.created_count(), 3);

    let creates_after_first = cloud.creates().len();
    let second = run_with(&cloud, &probe, &support::vars(), support::settings(), dir.path())
        .await
        .unwrap();

    assert_eq!(cloud.creates().len(), creates_after_first);
    assert_eq!(second.created_count(), 0);
    assert_eq!(second.action, DeployAction::Update);
}

// =============================================================================
// Configuration and preflight
// =============================================================================

#[tokio::test]
async fn missing_registry_name_fails_before_any_cloud_call() {
    let cloud = FakeCloud::provisioned();
    let probe = FakeProbe::healthy();
    let dir = support::project_dir();

    let err = run_with(
        &cloud,
        &probe,
        &support::vars_without(keys::REGISTRY),
        support::settings(),
        dir.path(),
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        Error::Config(ConfigError::MissingKey(keys::REGISTRY))
    ));
    assert_eq!(err.stage(), Stage::ConfigValidated);
    assert_eq!(err.exit_code(), 1);
    assert!(cloud.calls().is_empty());
    assert!(probe.requests().is_empty());
}

#[tokio::test]
async fn any_missing_required_key_issues_no_cloud_call() {
    for key in keys::REQUIRED {
        let cloud = FakeCloud::empty();
        let probe = FakeProbe::healthy();
        let dir = support::project_dir();

        let err = run_with(
            &cloud,
            &probe,
            &support::vars_without(key),
            support::settings(),
            dir.path(),
        )
        .await
        .unwrap_err();

        match err {
            Error::Config(e) => assert_eq!(e.key(), Some(key)),
            other => panic!("expected config error for {key}, got {other}"),
        }
        assert!(cloud.calls().is_empty(), "{key}: cloud was called");
    }
}

#[tokio::test]
async fn environment_is_checked_before_settings_are_loaded() {
    let cloud = FakeCloud::empty();
    let probe = FakeProbe::healthy();
    let dir = support::project_dir();
    let output = Output::new(OutputMode::Quiet);
    let mut loaded = false;

    let err = Orchestrator::new(&cloud, &probe, &output)
        .run(&support::vars_without(keys::ENVIRONMENT), dir.path(), |_| {
            loaded = true;
            Ok(support::settings())
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Config(ConfigError::MissingKey(keys::ENVIRONMENT))
    ));
    assert!(!loaded, "settings loaded before the environment was checked");
    assert!(cloud.calls().is_empty());
}

#[tokio::test]
async fn broken_settings_file_fails_before_any_cloud_call() {
    let cloud = FakeCloud::empty();
    let probe = FakeProbe::healthy();
    let dir = support::project_dir();
    std::fs::write(dir.path().join("launchpad.yml"), "image_tag: \"\"\n").unwrap();
    let output = Output::new(OutputMode::Quiet);

    let err = Orchestrator::new(&cloud, &probe, &output)
        .run(&support::vars(), dir.path(), Settings::discover)
        .await
        .unwrap_err();

    match &err {
        Error::Config(e) => assert_eq!(e.key(), Some("image_tag")),
        other => panic!("expected config error, got {other}"),
    }
    assert_eq!(err.stage(), Stage::ConfigValidated);
    assert!(cloud.calls().is_empty());
}

#[tokio::test]
async fn missing_dockerfile_fails_before_any_cloud_call() {
    let cloud = FakeCloud::empty();
    let probe = FakeProbe::healthy();
    let dir = tempfile::tempdir().unwrap();

    let err = run_with(&cloud, &probe, &support::vars(), support::settings(), dir.path())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Preflight(PreflightError::DockerfileNotFound(_))
    ));
    assert_eq!(err.exit_code(), 1);
    assert!(cloud.calls().is_empty());
}

// =============================================================================
// Provisioning
// =============================================================================

#[tokio::test]
async fn failed_group_creation_stops_the_run() {
    let cloud = FakeCloud::empty().failing_create(ResourceKind::ResourceGroup);
    let probe = FakeProbe::healthy();

    let err = run(&cloud, &probe).await.unwrap_err();

    assert!(matches!(err, Error::Provisioning(_)));
    assert_eq!(err.stage(), Stage::ResourcesEnsured);
    assert_eq!(
        cloud.calls(),
        vec![
            Call::Exists(ResourceKind::ResourceGroup),
            Call::Create(ResourceKind::ResourceGroup)
        ]
    );
    assert!(probe.requests().is_empty());
}

#[tokio::test]
async fn failed_registry_creation_skips_build_and_deploy() {
    let cloud = FakeCloud::provisioned()
        .with_check(ResourceKind::Registry, Check::Absent)
        .failing_create(ResourceKind::Registry);
    let probe = FakeProbe::healthy();

    let err = run(&cloud, &probe).await.unwrap_err();

    assert!(matches!(err, Error::Provisioning(_)));
    assert!(cloud.builds().is_empty());
    assert!(cloud.deploys().is_empty());
}

#[tokio::test]
async fn inconclusive_resource_check_still_creates_and_warns() {
    let cloud = FakeCloud::provisioned().with_check(ResourceKind::Environment, Check::Error);
    let probe = FakeProbe::healthy();

    let report = run(&cloud, &probe).await.unwrap();

    assert_eq!(cloud.creates(), vec![ResourceKind::Environment]);
    let env = &report.resources[1];
    assert_eq!(env.kind, ResourceKind::Environment);
    assert!(env.observed.is_check_failed());
    assert!(env.created);
    assert!(has_warning(&report, WarningKind::ExistenceCheckFailed));
}

#[tokio::test]
async fn inconclusive_app_check_deploys_as_create() {
    let cloud = FakeCloud::provisioned().with_app(Check::Error);
    let probe = FakeProbe::healthy();

    let report = run(&cloud, &probe).await.unwrap();

    assert_eq!(report.action, DeployAction::Create);
    assert_eq!(cloud.deploys()[0].action, DeployAction::Create);
    assert!(has_warning(&report, WarningKind::ExistenceCheckFailed));
}

// =============================================================================
// Build fallback
// =============================================================================

#[tokio::test]
async fn failed_remote_build_deploys_from_source() {
    let cloud = FakeCloud::provisioned().failing_build();
    let probe = FakeProbe::healthy();
    let dir = support::project_dir();

    let report = run_with(&cloud, &probe, &support::vars(), support::settings(), dir.path())
        .await
        .unwrap();

    assert_eq!(cloud.builds().len(), 1, "remote build is not retried");
    let deploys = cloud.deploys();
    assert_eq!(deploys.len(), 1);
    assert_eq!(
        deploys[0].source,
        DeploySource::SourceDir(std::path::absolute(dir.path()).unwrap())
    );
    assert_eq!(report.strategy, BuildStrategy::DeferredSourceBuild);
    assert!(report.image.is_none());
    assert!(has_warning(&report, WarningKind::RemoteBuildFailed));
}

#[tokio::test]
async fn remote_build_timeout_falls_back_to_source() {
    let cloud = FakeCloud::provisioned().slow_build(Duration::from_secs(5));
    let probe = FakeProbe::healthy();
    let dir = support::project_dir();
    let mut settings = support::settings();
    settings.build_timeout = Duration::from_millis(50);

    let report = run_with(&cloud, &probe, &support::vars(), settings, dir.path())
        .await
        .unwrap();

    assert_eq!(report.strategy, BuildStrategy::DeferredSourceBuild);
    assert!(matches!(
        cloud.deploys()[0].source,
        DeploySource::SourceDir(_)
    ));
}

#[tokio::test]
async fn deploy_failure_after_fallback_is_fatal() {
    let cloud = FakeCloud::provisioned().failing_build().failing_deploy();
    let probe = FakeProbe::healthy();

    let err = run(&cloud, &probe).await.unwrap_err();

    assert!(matches!(err, Error::Deploy(_)));
    assert_eq!(err.stage(), Stage::Deployed);
    assert_eq!(cloud.fqdn_lookups(), 0);
    assert!(probe.requests().is_empty());
}

#[tokio::test]
async fn action_follows_existence_not_build_outcome() {
    let cases = [
        (Check::Exists, false, DeployAction::Update),
        (Check::Exists, true, DeployAction::Update),
        (Check::Absent, false, DeployAction::Create),
        (Check::Absent, true, DeployAction::Create),
    ];

    for (app, build_fails, expected) in cases {
        let mut cloud = FakeCloud::provisioned().with_app(app);
        if build_fails {
            cloud = cloud.failing_build();
        }
        let probe = FakeProbe::healthy();

        let report = run(&cloud, &probe).await.unwrap();
        assert_eq!(report.action, expected, "app {app:?}, build fails {build_fails}");
    }
}

#[tokio::test]
async fn workload_receives_api_keys_and_connection_string() {
    let cloud = FakeCloud::provisioned();
    let probe = FakeProbe::healthy();

    run(&cloud, &probe).await.unwrap();

    let env = &cloud.deploys()[0].env;
    assert!(env.contains(&("API_KEYS".to_string(), "key-one,key-two".to_string())));
    assert!(env.contains(&(
        "SQL_SERVER_CONNECTION_STRING".to_string(),
        "Server=tcp:sql.example.net;Database=app".to_string()
    )));
}

// =============================================================================
// Verification
// =============================================================================

#[tokio::test]
async fn missing_endpoint_warns_and_skips_probe() {
    let cloud = FakeCloud::provisioned().without_fqdn();
    let probe = FakeProbe::healthy();

    let report = run(&cloud, &probe).await.unwrap();

    assert!(probe.requests().is_empty());
    assert!(report.endpoint.is_none());
    assert!(report.links.is_none());
    assert!(matches!(
        report.health,
        Some(HealthReport::NotVerified { .. })
    ));
    let warning = report
        .warnings
        .iter()
        .find(|w| w.kind == WarningKind::EndpointUnavailable)
        .unwrap();
    assert!(warning.message.contains("could not verify"));
}

#[tokio::test]
async fn endpoint_lookup_error_is_not_fatal() {
    let cloud = FakeCloud::provisioned().failing_fqdn();
    let probe = FakeProbe::healthy();

    let report = run(&cloud, &probe).await.unwrap();

    assert!(probe.requests().is_empty());
    assert!(has_warning(&report, WarningKind::EndpointUnavailable));
}

#[tokio::test]
async fn probe_timeout_keeps_success() {
    let cloud = FakeCloud::provisioned();
    let probe = FakeProbe::new(Response::Timeout);

    let report = run(&cloud, &probe).await.unwrap();

    assert!(matches!(
        report.health,
        Some(HealthReport::Unreachable { .. })
    ));
    assert!(has_warning(&report, WarningKind::HealthCheckFailed));
}

#[tokio::test]
async fn unhealthy_and_refused_probes_keep_success() {
    for response in [Response::Status(503), Response::Refused] {
        let cloud = FakeCloud::provisioned();
        let probe = FakeProbe::new(response);

        let report = run(&cloud, &probe).await.unwrap();

        assert!(!report.health.as_ref().unwrap().is_healthy());
        assert!(has_warning(&report, WarningKind::HealthCheckFailed));
    }
}

#[tokio::test]
async fn probe_hits_health_path_with_primary_api_key() {
    let cloud = FakeCloud::provisioned();
    let probe = FakeProbe::healthy();

    let report = run(&cloud, &probe).await.unwrap();

    let requests = probe.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url, format!("https://{}/health", support::FQDN));
    assert_eq!(
        requests[0].headers,
        vec![("x-api-key".to_string(), "key-one".to_string())]
    );
    assert_eq!(requests[0].timeout, Duration::from_secs(1));

    let links = report.links.unwrap();
    assert_eq!(links.url, format!("https://{}", support::FQDN));
    assert_eq!(links.tools, format!("https://{}/mcp/tools/list", support::FQDN));
    assert_eq!(report.api_key.as_deref(), Some("key-one"));
}

#[tokio::test]
async fn probe_without_api_key_sends_no_header() {
    let cloud = FakeCloud::provisioned();
    let probe = FakeProbe::healthy();
    let dir = support::project_dir();

    run_with(
        &cloud,
        &probe,
        &support::vars_without(keys::API_KEYS),
        support::settings(),
        dir.path(),
    )
    .await
    .unwrap();

    assert!(probe.requests()[0].headers.is_empty());
}

#[tokio::test]
async fn disabled_verification_still_resolves_endpoint() {
    let cloud = FakeCloud::provisioned();
    let probe = FakeProbe::healthy();
    let dir = support::project_dir();
    let mut settings = support::settings();
    settings.health.enabled = false;

    let report = run_with(&cloud, &probe, &support::vars(), settings, dir.path())
        .await
        .unwrap();

    assert_eq!(cloud.fqdn_lookups(), 1);
    assert!(probe.requests().is_empty());
    assert!(report.health.is_none());
    assert!(report.warnings.is_empty());

    let links = report.links.expect("endpoint should be resolved");
    assert_eq!(links.url, format!("https://{}", support::FQDN));
}

#[tokio::test]
async fn disabled_verification_without_hostname_warns_and_succeeds() {
    let cloud = FakeCloud::provisioned().without_fqdn();
    let probe = FakeProbe::healthy();
    let dir = support::project_dir();
    let mut settings = support::settings();
    settings.health.enabled = false;

    let report = run_with(&cloud, &probe, &support::vars(), settings, dir.path())
        .await
        .unwrap();

    assert!(report.success);
    assert!(report.links.is_none());
    assert!(has_warning(&report, WarningKind::EndpointUnavailable));
    assert!(probe.requests().is_empty());
}
