// ABOUTME: Endpoint resolution and the single health probe.
// ABOUTME: Failures are recorded as warnings and never surface as errors.

use super::probe::{HealthProbe, ProbeRequest};
use super::report::{HealthReport, Verification};
use crate::cloud::CloudClient;
use crate::config::{DeploymentConfig, HealthSettings};
use crate::diagnostics::{Diagnostics, Warning};
use crate::types::Endpoint;

/// Look up the public endpoint of the deployed app.
///
/// The error is a human-readable reason: no hostname assigned, or the lookup
/// itself failed.
pub async fn resolve_endpoint<C: CloudClient>(
    client: &C,
    config: &DeploymentConfig,
) -> Result<Endpoint, String> {
    match client
        .app_fqdn(&config.app_name, &config.resource_group)
        .await
    {
        Ok(fqdn) => fqdn
            .as_deref()
            .and_then(Endpoint::from_fqdn)
            .ok_or_else(|| "no public ingress hostname assigned".to_string()),
        Err(e) => Err(format!("endpoint lookup failed: {e}")),
    }
}

pub struct HealthVerifier<'a, C, P> {
    client: &'a C,
    probe: &'a P,
    settings: &'a HealthSettings,
}

impl<'a, C: CloudClient, P: HealthProbe> HealthVerifier<'a, C, P> {
    pub fn new(client: &'a C, probe: &'a P, settings: &'a HealthSettings) -> Self {
        Self {
            client,
            probe,
            settings,
        }
    }

    pub async fn verify(&self, config: &DeploymentConfig, diag: &mut Diagnostics) -> Verification {
        let endpoint = match resolve_endpoint(self.client, config).await {
            Ok(endpoint) => endpoint,
            Err(reason) => {
                diag.warn(Warning::endpoint_unavailable(format!(
                    "could not verify deployment of '{}': {}",
                    config.app_name, reason
                )));
                return Verification {
                    endpoint: None,
                    health: HealthReport::NotVerified { reason },
                };
            }
        };

        let health = self.probe(&endpoint, config, diag).await;
        Verification {
            endpoint: Some(endpoint),
            health,
        }
    }

    async fn probe(
        &self,
        endpoint: &Endpoint,
        config: &DeploymentConfig,
        diag: &mut Diagnostics,
    ) -> HealthReport {
        let request = ProbeRequest {
            url: endpoint.join(&self.settings.path),
            headers: config
                .primary_api_key()
                .map(|key| vec![(self.settings.api_key_header.clone(), key.to_string())])
                .unwrap_or_default(),
            timeout: self.settings.timeout,
        };

        tracing::info!("Probing {}", request.url);

        match self.probe.get(&request).await {
            Ok(code) if (200..300).contains(&code) => {
                tracing::info!("Health check passed ({})", code);
                HealthReport::Healthy { code }
            }
            Ok(code) => {
                diag.warn(Warning::health_check_failed(format!(
                    "health check at {} returned HTTP {}",
                    request.url, code
                )));
                HealthReport::Unhealthy { code }
            }
            Err(e) => {
                diag.warn(Warning::health_check_failed(format!(
                    "health check at {} failed: {}",
                    request.url, e
                )));
                HealthReport::Unreachable {
                    reason: e.to_string(),
                }
            }
        }
    }
}
