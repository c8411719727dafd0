//! In-memory route table implementing both dispatch and URL assembly.

use std::collections::HashMap;

use crate::dispatch::{
    ActionDispatcher, ActionRequest, ActionResponse, DispatchError, RouteError, UrlBuilder,
};

/// Name of the default controller and action.
pub const DEFAULT_SEGMENT: &str = "index";

type Handler = Box<dyn Fn(&ActionRequest) -> anyhow::Result<String> + Send + Sync>;

/// Controller/action handlers with default-route URL assembly.
///
/// URLs are assembled as `<base>/<controller>/<action>`, omitting trailing
/// `index` segments: `index/index` maps to `<base>/` and `pages/index`
/// to `<base>/pages`.
pub struct RouteTable {
    base_path: String,
    handlers: HashMap<(String, String), Handler>,
}

impl std::fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut routes: Vec<String> = self
            .handlers
            .keys()
            .map(|(c, a)| format!("{}/{}", c, a))
            .collect();
        routes.sort();

        f.debug_struct("RouteTable")
            .field("base_path", &self.base_path)
            .field("routes", &routes)
            .finish()
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteTable {
    /// Create an empty route table mounted at `/`.
    pub fn new() -> Self {
        Self {
            base_path: String::new(),
            handlers: HashMap::new(),
        }
    }

    /// Mount the table under a base path (e.g. `/shop`).
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into().trim_end_matches('/').to_string();
        self
    }

    /// Register a handler for a controller/action pair.
    pub fn route<F>(
        mut self,
        controller: impl Into<String>,
        action: impl Into<String>,
        handler: F,
    ) -> Self
    where
        F: Fn(&ActionRequest) -> anyhow::Result<String> + Send + Sync + 'static,
    {
        self.handlers
            .insert((controller.into(), action.into()), Box::new(handler));
        self
    }

    /// Whether a handler is registered for the pair.
    pub fn contains(&self, controller: &str, action: &str) -> bool {
        self.handlers
            .contains_key(&(controller.to_string(), action.to_string()))
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether the table has no routes.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    fn has_controller(&self, controller: &str) -> bool {
        self.handlers.keys().any(|(c, _)| c == controller)
    }
}

fn validate_segment(segment: &str) -> Result<(), RouteError> {
    let valid = !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(RouteError::InvalidSegment(segment.to_string()))
    }
}

impl UrlBuilder for RouteTable {
    fn assemble(&self, controller: &str, action: &str) -> Result<String, RouteError> {
        validate_segment(controller)?;
        validate_segment(action)?;

        if !self.contains(controller, action) {
            return Err(RouteError::Unroutable {
                controller: controller.to_string(),
                action: action.to_string(),
            });
        }

        let path = match (controller, action) {
            (DEFAULT_SEGMENT, DEFAULT_SEGMENT) => String::from("/"),
            (c, DEFAULT_SEGMENT) => format!("/{}", c),
            (c, a) => format!("/{}/{}", c, a),
        };

        Ok(format!("{}{}", self.base_path, path))
    }
}

impl ActionDispatcher for RouteTable {
    fn dispatch(&self, request: &ActionRequest) -> Result<ActionResponse, DispatchError> {
        let key = (request.controller.clone(), request.action.clone());

        let handler = match self.handlers.get(&key) {
            Some(handler) => handler,
            None if self.has_controller(&request.controller) => {
                return Err(DispatchError::ActionNotFound {
                    controller: request.controller.clone(),
                    action: request.action.clone(),
                })
            }
            None => return Err(DispatchError::ControllerNotFound(request.controller.clone())),
        };

        let body = handler(request).map_err(|source| DispatchError::Handler {
            controller: request.controller.clone(),
            action: request.action.clone(),
            source,
        })?;

        Ok(ActionResponse::new(body))
    }
}
