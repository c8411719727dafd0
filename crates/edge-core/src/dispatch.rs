//! Controller/action dispatch and URL assembly seams.

use std::collections::HashMap;

use crate::context::RouteParams;

/// Internal request synthesized for a dispatched controller/action pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    /// Controller name.
    pub controller: String,
    /// Action name.
    pub action: String,
    /// Parameters passed to the action.
    pub params: RouteParams,
}

impl ActionRequest {
    /// Create a new action request with no parameters.
    pub fn new(controller: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            controller: controller.into(),
            action: action.into(),
            params: HashMap::new(),
        }
    }

    /// Add a parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Get a parameter by name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(|s| s.as_str())
    }
}

/// Response produced by a dispatched action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionResponse {
    /// Rendered body.
    pub body: String,
}

impl ActionResponse {
    /// Create a response with the given body.
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    /// Consume the response, returning its body.
    pub fn into_body(self) -> String {
        self.body
    }
}

/// Error type for dispatch operations.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("controller not found: {0}")]
    ControllerNotFound(String),

    #[error("action not found: {controller}/{action}")]
    ActionNotFound { controller: String, action: String },

    #[error("action {controller}/{action} failed: {source}")]
    Handler {
        controller: String,
        action: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Error type for URL assembly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("no route for {controller}/{action}")]
    Unroutable { controller: String, action: String },

    #[error("invalid route segment: {0:?}")]
    InvalidSegment(String),
}

/// Executes a controller/action pair against a synthesized request.
pub trait ActionDispatcher {
    /// Dispatch the request and return the produced response.
    fn dispatch(&self, request: &ActionRequest) -> Result<ActionResponse, DispatchError>;
}

impl<T: ActionDispatcher + ?Sized> ActionDispatcher for &T {
    fn dispatch(&self, request: &ActionRequest) -> Result<ActionResponse, DispatchError> {
        (**self).dispatch(request)
    }
}

/// Resolves a controller/action pair to a routable URL.
pub trait UrlBuilder {
    /// Assemble the URL for the pair.
    fn assemble(&self, controller: &str, action: &str) -> Result<String, RouteError>;
}

impl<T: UrlBuilder + ?Sized> UrlBuilder for &T {
    fn assemble(&self, controller: &str, action: &str) -> Result<String, RouteError> {
        (**self).assemble(controller, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_request_params() {
        let request = ActionRequest::new("pages", "show").with_param("id", "42");

        assert_eq!(request.controller, "pages");
        assert_eq!(request.action, "show");
        assert_eq!(request.param("id"), Some("42"));
        assert_eq!(request.param("missing"), None);
    }

    #[test]
    fn test_action_response_body() {
        let response = ActionResponse::new("<p>hi</p>");

        assert_eq!(response.into_body(), "<p>hi</p>");
    }

    #[test]
    fn test_error_messages() {
        let err = DispatchError::ActionNotFound {
            controller: "pages".to_string(),
            action: "show".to_string(),
        };
        assert_eq!(err.to_string(), "action not found: pages/show");

        let err = DispatchError::Handler {
            controller: "pages".to_string(),
            action: "show".to_string(),
            source: anyhow::anyhow!("database unavailable"),
        };
        assert_eq!(err.to_string(), "action pages/show failed: database unavailable");

        let err = RouteError::InvalidSegment("a b".to_string());
        assert_eq!(err.to_string(), "invalid route segment: \"a b\"");
    }
}
