//! HTTP cache control module
//!
//! Cache-Control policy for served files and the request-side
//! `no-cache` suppression used with conditional requests.

use hyper::header::{CACHE_CONTROL, IF_MODIFIED_SINCE, IF_NONE_MATCH};
use hyper::HeaderMap;

/// Cache-Control policy applied to served files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Revalidate every time, but the content at a URL never changes
    #[default]
    Immutable,
    /// Public cache with specified max-age (seconds)
    Public(u32),
}

impl CachePolicy {
    /// Policy for the `static_files.immutable` switch
    pub const fn from_immutable(immutable: bool) -> Self {
        if immutable {
            Self::Immutable
        } else {
            Self::Public(0)
        }
    }

    /// Convert to Cache-Control header value
    pub fn to_header_value(self) -> String {
        match self {
            Self::Immutable => "public, max-age=0, immutable".to_string(),
            Self::Public(max_age) => format!("public, max-age={max_age}"),
        }
    }
}

/// Whether the request carries `If-Modified-Since` or `If-None-Match`
pub fn has_revalidation_headers(headers: &HeaderMap) -> bool {
    headers.contains_key(IF_MODIFIED_SINCE) || headers.contains_key(IF_NONE_MATCH)
}

/// Whether the request's `Cache-Control` must be dropped before serving
///
/// True only for an exact `no-cache` value sent together with a
/// revalidation header, so the conditional request can still produce a 304.
pub fn should_strip_no_cache(headers: &HeaderMap) -> bool {
    let no_cache = headers
        .get(CACHE_CONTROL)
        .is_some_and(|v| v.as_bytes() == b"no-cache");
    no_cache && has_revalidation_headers(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::header::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(*name, HeaderValue::from_static(*value));
        }
        map
    }

    #[test]
    fn test_cache_policy() {
        assert_eq!(
            CachePolicy::Immutable.to_header_value(),
            "public, max-age=0, immutable"
        );
        assert_eq!(CachePolicy::Public(600).to_header_value(), "public, max-age=600");
        assert_eq!(CachePolicy::from_immutable(true), CachePolicy::Immutable);
        assert_eq!(CachePolicy::from_immutable(false), CachePolicy::Public(0));
    }

    #[test]
    fn test_strip_with_if_none_match() {
        let h = headers(&[("cache-control", "no-cache"), ("if-none-match", "\"abc\"")]);
        assert!(should_strip_no_cache(&h));
    }

    #[test]
    fn test_strip_with_if_modified_since() {
        let h = headers(&[
            ("cache-control", "no-cache"),
            ("if-modified-since", "Wed, 21 Oct 2015 07:28:00 GMT"),
        ]);
        assert!(should_strip_no_cache(&h));
    }

    #[test]
    fn test_keep_without_revalidation() {
        let h = headers(&[("cache-control", "no-cache")]);
        assert!(!should_strip_no_cache(&h));
    }

    #[test]
    fn test_keep_other_directives() {
        let h = headers(&[("cache-control", "max-age=0"), ("if-none-match", "\"abc\"")]);
        assert!(!should_strip_no_cache(&h));
        let h = headers(&[
            ("cache-control", "no-cache, no-store"),
            ("if-none-match", "\"abc\""),
        ]);
        assert!(!should_strip_no_cache(&h));
        let h = headers(&[("cache-control", "No-Cache"), ("if-none-match", "\"abc\"")]);
        assert!(!should_strip_no_cache(&h));
    }

    #[test]
    fn test_revalidation_headers() {
        assert!(!has_revalidation_headers(&HeaderMap::new()));
        assert!(has_revalidation_headers(&headers(&[("if-none-match", "*")])));
    }
}
