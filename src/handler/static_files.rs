//! Static file serving module
//!
//! Serves the bundle directory through `tower-http`'s `ServeDir`, which owns
//! path resolution, index files, Last-Modified, conditional and Range requests.
//! This layer only adds the Cache-Control policy and a readable 404 body.

use crate::http::{self, cache::CachePolicy, ResponseBody};
use http_body_util::BodyExt;
use hyper::header::{HeaderValue, CACHE_CONTROL};
use hyper::{Request, Response, StatusCode};
use std::path::Path;
use tower::ServiceExt;
use tower_http::services::ServeDir;

/// Static file server rooted at one directory
#[derive(Debug, Clone)]
pub struct StaticFileServer {
    serve_dir: ServeDir,
    cache_control: HeaderValue,
}

impl StaticFileServer {
    pub fn new(root: &Path, cache_policy: CachePolicy) -> Self {
        // Non-GET/HEAD requests fall through to the 404 path instead of a 405
        let serve_dir = ServeDir::new(root)
            .append_index_html_on_directories(true)
            .call_fallback_on_method_not_allowed(true);
        let cache_control = HeaderValue::from_str(&cache_policy.to_header_value())
            .unwrap_or_else(|_| HeaderValue::from_static("public, max-age=0"));

        Self {
            serve_dir,
            cache_control,
        }
    }

    /// Serve the file named by the request path
    pub async fn serve<B>(&self, req: Request<B>) -> Response<ResponseBody>
    where
        B: Send + 'static,
    {
        let response = match self.serve_dir.clone().oneshot(req).await {
            Ok(response) => response,
            Err(never) => match never {},
        };

        if response.status() == StatusCode::NOT_FOUND {
            return http::build_404_response();
        }

        let mut response = response.map(BodyExt::boxed_unsync);
        self.apply_cache_control(&mut response);
        response
    }

    /// Add the Cache-Control policy to served content that has none
    fn apply_cache_control(&self, response: &mut Response<ResponseBody>) {
        let status = response.status();
        let cacheable = status.is_success() || status == StatusCode::NOT_MODIFIED;
        if cacheable && !response.headers().contains_key(CACHE_CONTROL) {
            response
                .headers_mut()
                .insert(CACHE_CONTROL, self.cache_control.clone());
        }
    }
}
