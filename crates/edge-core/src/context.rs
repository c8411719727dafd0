//! Inbound request context and header lookup.

use std::collections::HashMap;

/// Route parameters handed to dispatched actions.
pub type RouteParams = HashMap<String, String>;

/// HTTP headers.
pub type Headers = HashMap<String, String>;

/// HTTP method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
    Connect,
    Trace,
    /// Extension method, kept as received.
    Other(String),
}

impl Method {
    /// Parse a standard HTTP method name. Unknown methods are `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "GET" => Some(Self::Get),
            "POST" => Some(Self::Post),
            "PUT" => Some(Self::Put),
            "DELETE" => Some(Self::Delete),
            "PATCH" => Some(Self::Patch),
            "HEAD" => Some(Self::Head),
            "OPTIONS" => Some(Self::Options),
            "CONNECT" => Some(Self::Connect),
            "TRACE" => Some(Self::Trace),
            _ => None,
        }
    }

    /// Method name as sent on the wire.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
            Self::Connect => "CONNECT",
            Self::Trace => "TRACE",
            Self::Other(name) => name,
        }
    }
}

/// Read access to the headers of the current inbound request.
///
/// `None` means the header is absent. Any value, including an empty
/// string, means it is present.
pub trait HeaderSource {
    /// Get a header value by name.
    fn header(&self, name: &str) -> Option<&str>;

    /// Check whether a header is present, whatever its value.
    fn contains_header(&self, name: &str) -> bool {
        self.header(name).is_some()
    }
}

impl<T: HeaderSource + ?Sized> HeaderSource for &T {
    fn header(&self, name: &str) -> Option<&str> {
        (**self).header(name)
    }

    fn contains_header(&self, name: &str) -> bool {
        (**self).contains_header(name)
    }
}

/// Normalize a header name CGI-style: upper case, `-` folded to `_`.
///
/// `X-Varnish`, `x_varnish` and `X_VARNISH` all normalize to `X_VARNISH`.
pub fn normalize_header_name(name: &str) -> String {
    name.chars()
        .map(|c| if c == '-' { '_' } else { c.to_ascii_uppercase() })
        .collect()
}

/// The current inbound request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// HTTP method.
    pub method: Method,
    /// Request path.
    pub path: String,
    /// HTTP headers.
    pub headers: Headers,
}

impl RequestContext {
    /// Create a new request context.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HashMap::new(),
        }
    }

    /// Add a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Get a header value by name.
    ///
    /// Names match case-insensitively and treat `-` and `_` alike.
    pub fn header(&self, name: &str) -> Option<&str> {
        let wanted = normalize_header_name(name);
        self.headers
            .iter()
            .find(|(k, _)| normalize_header_name(k) == wanted)
            .map(|(_, v)| v.as_str())
    }
}

impl HeaderSource for RequestContext {
    fn header(&self, name: &str) -> Option<&str> {
        RequestContext::header(self, name)
    }
}
