use serde_json::json;

use crate::checks::CheckContext;
use crate::core::AuditResult;
use crate::probe::{HttpProber, Method, ProbeError};
use crate::profile;

pub fn run(ctx: &CheckContext) -> Vec<AuditResult> {
    tracing::info!(server = %ctx.server_url, "probing webhook endpoints");
    match HttpProber::new(&ctx.server_url, ctx.timeout) {
        Ok(prober) => check_endpoints(&prober, profile::ENDPOINTS),
        Err(err) => profile::ENDPOINTS
            .iter()
            .map(|(path, method)| unexpected(path, *method, &err))
            .collect(),
    }
}

/// One request per endpoint, in table order. A failing endpoint never stops
/// the ones after it.
pub fn check_endpoints(prober: &HttpProber, endpoints: &[(&str, Method)]) -> Vec<AuditResult> {
    endpoints
        .iter()
        .map(|(path, method)| check_endpoint(prober, path, *method))
        .collect()
}

fn check_endpoint(prober: &HttpProber, path: &str, method: Method) -> AuditResult {
    let id = format!("endpoint_{path}");
    match prober.probe(method, path) {
        Ok(status) => {
            tracing::debug!(%method, path, status, "endpoint responded");
            let message = format!("{method} {path} - HTTP {status}");
            let details = json!({"method": method.as_str(), "status": status});
            if status == 200 {
                AuditResult::pass(id, message).with_details(details)
            } else {
                AuditResult::warn(id, message).with_details(details)
            }
        }
        Err(ProbeError::Network(error)) => {
            tracing::warn!(%method, path, %error, "endpoint unreachable");
            AuditResult::fail(id, format!("{method} {path} - Connection failed"))
                .with_details(json!({"error": error}))
        }
        Err(err @ ProbeError::Unexpected(_)) => unexpected(path, method, &err),
    }
}

fn unexpected(path: &str, method: Method, err: &ProbeError) -> AuditResult {
    tracing::warn!(%method, path, error = %err, "endpoint probe error");
    AuditResult::fail(
        format!("endpoint_{path}"),
        format!("{method} {path} - Error: {err}"),
    )
    .with_details(json!({"error": err.to_string()}))
}
