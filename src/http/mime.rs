//! Content-Type and Content-Encoding overrides for bundle assets
//!
//! Matching is done on the raw request target with substring checks, not on
//! the file extension: `/Build/game.wasm.br` is wasm, and so is
//! `/x?file=a.wasm`. Deployed bundles may depend on this looseness.

pub const APPLICATION_WASM: &str = "application/wasm";
pub const APPLICATION_JAVASCRIPT: &str = "application/javascript";
pub const APPLICATION_JSON: &str = "application/json";
pub const APPLICATION_OCTET_STREAM: &str = "application/octet-stream";

/// `Content-Encoding` for a pre-compressed asset
///
/// # Examples
/// ```
/// use wasm_bundle_server::http::mime::content_encoding_for;
/// assert_eq!(content_encoding_for("/Build/game.wasm.br"), Some("br"));
/// assert_eq!(content_encoding_for("/Build/game.data.gz"), Some("gzip"));
/// assert_eq!(content_encoding_for("/index.html"), None);
/// ```
pub fn content_encoding_for(target: &str) -> Option<&'static str> {
    if target.ends_with(".br") {
        Some("br")
    } else if target.ends_with(".gz") {
        Some("gzip")
    } else {
        None
    }
}

/// Explicit `Content-Type` for bundle file types
///
/// First match wins, in the order wasm, js, json, binary data.
///
/// # Examples
/// ```
/// use wasm_bundle_server::http::mime::content_type_for;
/// assert_eq!(content_type_for("/Build/game.wasm.br"), Some("application/wasm"));
/// assert_eq!(content_type_for("/favicon.ico"), None);
/// ```
pub fn content_type_for(target: &str) -> Option<&'static str> {
    if target.contains(".wasm") {
        Some(APPLICATION_WASM)
    } else if target.contains(".js") {
        Some(APPLICATION_JAVASCRIPT)
    } else if target.contains(".json") {
        Some(APPLICATION_JSON)
    } else if target.contains(".data")
        || target.contains(".bundle")
        || target.ends_with(".unityweb")
    {
        Some(APPLICATION_OCTET_STREAM)
    } else {
        None
    }
}

/// Whether the target is a document or script that needs cross-origin isolation
pub fn is_isolated_document(target: &str) -> bool {
    target == "/" || target.contains(".js") || target.contains(".html") || target.contains(".htm")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_encoding() {
        assert_eq!(content_encoding_for("/Build/game.framework.js.br"), Some("br"));
        assert_eq!(content_encoding_for("/Build/game.data.gz"), Some("gzip"));
        assert_eq!(content_encoding_for("/Build/game.br.gz"), Some("gzip"));
        assert_eq!(content_encoding_for("/Build/game.gz.br"), Some("br"));
        assert_eq!(content_encoding_for("/Build/game.brotli"), None);
        assert_eq!(content_encoding_for("/Build/game.wasm"), None);
    }

    #[test]
    fn test_content_type_precedence() {
        // wasm beats js even when both appear
        assert_eq!(content_type_for("/game.wasm.js"), Some(APPLICATION_WASM));
        // .json contains .js, so js wins
        assert_eq!(content_type_for("/settings.json"), Some(APPLICATION_JAVASCRIPT));
        assert_eq!(content_type_for("/Build/game.loader.js"), Some(APPLICATION_JAVASCRIPT));
    }

    #[test]
    fn test_binary_types() {
        assert_eq!(content_type_for("/Build/game.data"), Some(APPLICATION_OCTET_STREAM));
        assert_eq!(content_type_for("/Build/game.data.gz"), Some(APPLICATION_OCTET_STREAM));
        assert_eq!(
            content_type_for("/StreamingAssets/level1.bundle"),
            Some(APPLICATION_OCTET_STREAM)
        );
        assert_eq!(content_type_for("/Build/game.unityweb"), Some(APPLICATION_OCTET_STREAM));
        assert_eq!(content_type_for("/Build/game.unityweb.bak"), None);
    }

    #[test]
    fn test_substring_matching_is_loose() {
        assert_eq!(content_type_for("/data.jsonp"), Some(APPLICATION_JAVASCRIPT));
        assert_eq!(content_type_for("/load?file=a.wasm"), Some(APPLICATION_WASM));
        assert!(is_isolated_document("/page.htmlx"));
    }

    #[test]
    fn test_isolated_documents() {
        assert!(is_isolated_document("/"));
        assert!(is_isolated_document("/index.html"));
        assert!(is_isolated_document("/index.htm"));
        assert!(is_isolated_document("/Build/game.loader.js"));
        assert!(!is_isolated_document("/Build/game.wasm"));
        assert!(!is_isolated_document("/favicon.ico"));
        assert!(!is_isolated_document("/?debug=1"));
        assert!(!is_isolated_document(""));
    }

    #[test]
    fn test_unknown_targets() {
        assert_eq!(content_type_for("/favicon.ico"), None);
        assert_eq!(content_type_for("/style.css"), None);
        assert_eq!(content_encoding_for("/favicon.ico"), None);
    }
}
