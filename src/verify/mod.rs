// ABOUTME: Best-effort post-deploy health verification.
// ABOUTME: Resolves the public endpoint and probes it once; outcomes are annotations, not failures.

mod probe;
mod report;
mod verifier;

pub use probe::{HealthProbe, HttpProbe, ProbeError, ProbeRequest};
pub use report::{HealthReport, Verification};
pub use verifier::{HealthVerifier, resolve_endpoint};
