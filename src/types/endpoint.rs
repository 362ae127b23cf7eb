// ABOUTME: Public endpoint of a deployed container app.
// ABOUTME: Wraps the ingress FQDN and builds the URLs shown in the deploy summary.

use serde::Serialize;
use std::fmt;

/// Publicly reachable ingress hostname of a deployed app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    fqdn: String,
}

impl Endpoint {
    /// Build an endpoint from a raw FQDN as reported by the control plane.
    ///
    /// Returns `None` for blank values, which the CLI emits when ingress is
    /// not (yet) configured.
    pub fn from_fqdn(raw: &str) -> Option<Self> {
        let fqdn = raw
            .trim()
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_end_matches('/');

        if fqdn.is_empty() {
            return None;
        }

        Some(Self {
            fqdn: fqdn.to_string(),
        })
    }

    pub fn fqdn(&self) -> &str {
        &self.fqdn
    }

    /// Base HTTPS URL of the app.
    pub fn url(&self) -> String {
        format!("https://{}", self.fqdn)
    }

    /// URL for a path on this endpoint. Missing leading slashes are added.
    pub fn join(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.url(), path)
        } else {
            format!("{}/{}", self.url(), path)
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url())
    }
}
