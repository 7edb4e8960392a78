//! Header policy engine
//!
//! Decides, from the raw request target, the request headers and the
//! [`PolicyConfig`], which headers the bundle needs on its response and
//! whether the request's `Cache-Control` must be dropped before the file is
//! served. Evaluation is pure: the same inputs always give the same decision.

use crate::config::PolicyConfig;
use crate::http::{cache, mime};
use hyper::header::{
    HeaderName, HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL, CONTENT_ENCODING,
    CONTENT_TYPE,
};
use hyper::{HeaderMap, Response};

pub const CROSS_ORIGIN_OPENER_POLICY: HeaderName =
    HeaderName::from_static("cross-origin-opener-policy");
pub const CROSS_ORIGIN_EMBEDDER_POLICY: HeaderName =
    HeaderName::from_static("cross-origin-embedder-policy");
pub const CROSS_ORIGIN_RESOURCE_POLICY: HeaderName =
    HeaderName::from_static("cross-origin-resource-policy");

/// Outcome of evaluating the policy for one request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyDecision {
    /// Headers set on the response, replacing any value the file server chose
    pub response_headers: HeaderMap,
    /// Remove `Cache-Control` from the request before serving
    pub strip_request_cache_control: bool,
}

impl PolicyDecision {
    /// Apply the request-side mutation
    pub fn apply_to_request(&self, headers: &mut HeaderMap) {
        if self.strip_request_cache_control {
            headers.remove(CACHE_CONTROL);
        }
    }

    /// Apply the response headers, overwriting same-named headers
    pub fn apply_to_response<B>(&self, response: &mut Response<B>) {
        let headers = response.headers_mut();
        for (name, value) in &self.response_headers {
            headers.insert(name.clone(), value.clone());
        }
    }

    /// Apply the response headers to an error response
    ///
    /// Content-Type and Content-Encoding describe the requested asset, not
    /// the error body, so they are left to the error response.
    pub fn apply_to_error_response<B>(&self, response: &mut Response<B>) {
        let headers = response.headers_mut();
        for (name, value) in &self.response_headers {
            if *name != CONTENT_TYPE && *name != CONTENT_ENCODING {
                headers.insert(name.clone(), value.clone());
            }
        }
    }
}

/// Evaluate the header policy for a request
///
/// `target` is the request target exactly as received (path plus query).
pub fn evaluate(target: &str, request_headers: &HeaderMap, config: &PolicyConfig) -> PolicyDecision {
    let mut response_headers = HeaderMap::new();

    if config.enable_wasm_multithreading && mime::is_isolated_document(target) {
        response_headers.insert(CROSS_ORIGIN_OPENER_POLICY, HeaderValue::from_static("same-origin"));
        response_headers.insert(
            CROSS_ORIGIN_EMBEDDER_POLICY,
            HeaderValue::from_static("require-corp"),
        );
        response_headers.insert(
            CROSS_ORIGIN_RESOURCE_POLICY,
            HeaderValue::from_static("cross-origin"),
        );
    }

    if config.enable_cors {
        response_headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    }

    if let Some(encoding) = mime::content_encoding_for(target) {
        response_headers.insert(CONTENT_ENCODING, HeaderValue::from_static(encoding));
    }

    if let Some(content_type) = mime::content_type_for(target) {
        response_headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    }

    PolicyDecision {
        response_headers,
        strip_request_cache_control: cache::should_strip_no_cache(request_headers),
    }
}
