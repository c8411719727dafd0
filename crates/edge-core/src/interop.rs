//! Adapters for `http` crate types.

use http::header::{HeaderMap, HeaderName, HeaderValue};

use crate::context::{HeaderSource, Method, RequestContext};
use crate::response::{HeaderError, HeaderSink, RawHeader};

/// Candidate wire names for a CGI-style header name: `X_VARNISH` may
/// arrive as `x_varnish` or `x-varnish`.
fn wire_names(name: &str) -> [String; 2] {
    let lower = name.to_ascii_lowercase();
    let dashed = lower.replace('_', "-");
    [lower, dashed]
}

impl HeaderSource for HeaderMap {
    fn header(&self, name: &str) -> Option<&str> {
        wire_names(name)
            .iter()
            .find_map(|n| self.get(n.as_str()))
            .and_then(|v| v.to_str().ok())
    }

    fn contains_header(&self, name: &str) -> bool {
        wire_names(name)
            .iter()
            .any(|n| self.contains_key(n.as_str()))
    }
}

impl HeaderSink for HeaderMap {
    fn set_raw_header(&mut self, raw: &str) -> Result<(), HeaderError> {
        let header = RawHeader::parse(raw)?;

        let name = HeaderName::from_bytes(header.name.as_bytes())
            .map_err(|_| HeaderError::InvalidName(header.name.clone()))?;
        let value = HeaderValue::from_str(&header.value).map_err(|_| HeaderError::InvalidValue {
            name: header.name.clone(),
            value: header.value.clone(),
        })?;

        self.insert(name, value);
        Ok(())
    }
}

impl From<&http::Method> for Method {
    fn from(method: &http::Method) -> Self {
        Method::parse(method.as_str())
            .unwrap_or_else(|| Method::Other(method.as_str().to_string()))
    }
}

impl RequestContext {
    /// Build a request context from an `http` request.
    ///
    /// Header values that are not valid UTF-8 are kept as empty strings,
    /// so the header still counts as present.
    pub fn from_http<B>(request: &http::Request<B>) -> Self {
        let mut ctx = RequestContext::new(request.method().into(), request.uri().path());

        for (name, value) in request.headers() {
            let value = value.to_str().unwrap_or_default().to_string();
            ctx.headers.insert(name.as_str().to_string(), value);
        }

        ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_map_source_matches_dashed_names() {
        let mut headers = HeaderMap::new();
        headers.insert("x-varnish", HeaderValue::from_static("1234"));

        assert_eq!(HeaderSource::header(&headers, "X_VARNISH"), Some("1234"));
        assert!(headers.contains_header("X-Varnish"));
        assert!(!headers.contains_header("X_CACHE"));
    }

    #[test]
    fn test_header_map_presence_ignores_non_utf8_values() {
        let mut headers = HeaderMap::new();
        headers.insert("x-varnish", HeaderValue::from_bytes(&[0xff]).unwrap());

        assert!(headers.contains_header("X_VARNISH"));
        assert_eq!(HeaderSource::header(&headers, "X_VARNISH"), None);
    }

    #[test]
    fn test_header_map_sink() {
        let mut headers = HeaderMap::new();
        headers.set_raw_header("esi-enabled: 1").unwrap();
        headers.set_raw_header("ESI-Enabled: 1").unwrap();

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("esi-enabled").unwrap(), "1");
    }

    #[test]
    fn test_header_map_sink_rejects_bad_value() {
        let mut headers = HeaderMap::new();
        let err = headers.set_raw_header("x-test: a\u{7f}b").unwrap_err();

        assert!(matches!(err, HeaderError::InvalidValue { .. }));
    }

    #[test]
    fn test_request_context_from_http() {
        let request = http::Request::builder()
            .method("POST")
            .uri("https://shop.example/pages/show?id=1")
            .header("X-Varnish", "99")
            .header("Accept", "text/html")
            .body(())
            .unwrap();

        let ctx = RequestContext::from_http(&request);
        assert_eq!(ctx.method, Method::Post);
        assert_eq!(ctx.path, "/pages/show");
        assert_eq!(ctx.header("X_VARNISH"), Some("99"));
        assert!(ctx.contains_header("accept"));
    }

    #[test]
    fn test_method_from_http_keeps_unknown_methods() {
        assert_eq!(Method::from(&http::Method::CONNECT), Method::Connect);
        assert_eq!(Method::from(&http::Method::TRACE), Method::Trace);

        let purge = http::Method::from_bytes(b"PURGE").unwrap();
        assert_eq!(Method::from(&purge), Method::Other("PURGE".to_string()));
    }
}
