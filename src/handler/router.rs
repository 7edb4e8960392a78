//! Request dispatch module
//!
//! Entry point for HTTP request processing: evaluate the header policy,
//! forward the (possibly mutated) request to the static file server and
//! stamp the policy headers onto whatever it returns.

use crate::config::AppState;
use crate::http::ResponseBody;
use crate::logger::{self, AccessLogEntry};
use crate::policy;
use hyper::http::uri::PathAndQuery;
use hyper::{Request, Response, Uri};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: Option<SocketAddr>,
) -> Result<Response<ResponseBody>, Infallible>
where
    B: Send + 'static,
{
    let started = Instant::now();
    let target = request_target(req.uri()).to_string();

    let decision = policy::evaluate(&target, req.headers(), &state.config.policy);

    let access_entry = state.config.logging.access_log.then(|| {
        AccessLogEntry::new(peer_addr, req.method(), &target)
            .with_request(req.version(), req.headers())
    });

    let (mut parts, body) = req.into_parts();
    decision.apply_to_request(&mut parts.headers);

    let mut response = state
        .static_files
        .serve(Request::from_parts(parts, body))
        .await;

    if is_error_response(&response) {
        decision.apply_to_error_response(&mut response);
    } else {
        decision.apply_to_response(&mut response);
    }

    if let Some(mut entry) = access_entry {
        entry.record_response(&response);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Raw request target (path plus query) that the policy matches against
pub fn request_target(uri: &Uri) -> &str {
    uri.path_and_query()
        .map_or_else(|| uri.path(), PathAndQuery::as_str)
}

fn is_error_response<B>(response: &Response<B>) -> bool {
    let status = response.status();
    status.is_client_error() || status.is_server_error()
}
