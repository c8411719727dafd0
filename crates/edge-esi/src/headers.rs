//! Surrogate detection headers.

use edge_core::{non_empty_header, HeaderSource};
use serde::{Deserialize, Serialize};

/// How a fragment is rendered for the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurrogateMode {
    /// A surrogate cache is present; emit an ESI include.
    Esi,
    /// No surrogate; dispatch and render inline.
    Inline,
}

impl SurrogateMode {
    /// Whether ESI output is selected.
    pub fn is_esi(&self) -> bool {
        matches!(self, Self::Esi)
    }
}

impl std::fmt::Display for SurrogateMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Esi => write!(f, "esi"),
            Self::Inline => write!(f, "inline"),
        }
    }
}

/// Decide the surrogate mode from the request headers.
///
/// A missing or blank trigger never selects ESI. Otherwise the trigger
/// header's presence decides, whatever its value.
pub fn detect_surrogate<S: HeaderSource + ?Sized>(
    request: &S,
    trigger_header: Option<&str>,
) -> SurrogateMode {
    match trigger_header.and_then(non_empty_header) {
        Some(name) if request.contains_header(name) => SurrogateMode::Esi,
        _ => SurrogateMode::Inline,
    }
}

#[cfg(test)]
mod tests {
    use edge_core::{Method, RequestContext, DEFAULT_TRIGGER_HEADER};

    use super::*;

    fn varnish_request(value: &str) -> RequestContext {
        RequestContext::new(Method::Get, "/").with_header("X-Varnish", value)
    }

    #[test]
    fn test_detect_present_header() {
        let request = varnish_request("1");
        assert_eq!(detect_surrogate(&request, Some(DEFAULT_TRIGGER_HEADER)), SurrogateMode::Esi);
    }

    #[test]
    fn test_detect_false_looking_values_still_present() {
        for value in ["", "0", "false"] {
            let request = varnish_request(value);
            assert!(detect_surrogate(&request, Some("X_VARNISH")).is_esi(), "value {:?}", value);
        }
    }

    #[test]
    fn test_detect_absent_header() {
        let request = RequestContext::new(Method::Get, "/");
        assert_eq!(detect_surrogate(&request, Some("X_VARNISH")), SurrogateMode::Inline);
    }

    #[test]
    fn test_detect_without_trigger() {
        let request = varnish_request("1");

        assert_eq!(detect_surrogate(&request, None), SurrogateMode::Inline);
        assert_eq!(detect_surrogate(&request, Some("")), SurrogateMode::Inline);
        assert_eq!(detect_surrogate(&request, Some("   ")), SurrogateMode::Inline);
    }

    #[test]
    fn test_mode_display_and_serde() {
        assert_eq!(SurrogateMode::Esi.to_string(), "esi");
        assert_eq!(SurrogateMode::Inline.to_string(), "inline");
        assert_eq!(serde_json::to_string(&SurrogateMode::Inline).unwrap(), "\"inline\"");
    }
}
