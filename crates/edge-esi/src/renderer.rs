//! Fragment rendering: ESI include behind a surrogate, inline dispatch otherwise.

use edge_core::{
    non_empty_header, ActionDispatcher, ActionRequest, DispatchError, EsiConfig, HeaderError,
    HeaderSink, HeaderSource, RouteError, UrlBuilder, DEFAULT_ANNOUNCE_HEADER, DEFAULT_SEGMENT,
    DEFAULT_TRIGGER_HEADER,
};

use crate::headers::{detect_surrogate, SurrogateMode};
use crate::tag::EsiInclude;

/// Result type for fragment rendering.
pub type RenderResult<T> = Result<T, RenderError>;

/// Fragment rendering errors. Collaborator failures pass through unchanged.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error(transparent)]
    Header(#[from] HeaderError),
}

/// Parameters for rendering one fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentRequest {
    controller: String,
    action: String,
    trigger_header: Option<String>,
    announce_header: Option<String>,
}

impl FragmentRequest {
    /// Create a fragment request with the stock Varnish headers.
    pub fn new(controller: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            controller: controller.into(),
            action: action.into(),
            trigger_header: Some(DEFAULT_TRIGGER_HEADER.to_string()),
            announce_header: Some(DEFAULT_ANNOUNCE_HEADER.to_string()),
        }
    }

    /// Create a fragment request using the headers from `config`.
    pub fn from_config(
        config: &EsiConfig,
        controller: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            controller: controller.into(),
            action: action.into(),
            trigger_header: config.trigger_header().map(String::from),
            announce_header: config.announce_header().map(String::from),
        }
    }

    /// Set the trigger header. A blank name disables ESI.
    pub fn with_trigger_header(mut self, name: impl AsRef<str>) -> Self {
        self.trigger_header = non_empty_header(name.as_ref()).map(String::from);
        self
    }

    /// Never emit ESI for this fragment.
    pub fn without_trigger_header(mut self) -> Self {
        self.trigger_header = None;
        self
    }

    /// Set the raw announce header. A blank line suppresses it.
    pub fn with_announce_header(mut self, raw: impl AsRef<str>) -> Self {
        self.announce_header = non_empty_header(raw.as_ref()).map(String::from);
        self
    }

    /// Do not announce ESI support on the response.
    pub fn without_announce_header(mut self) -> Self {
        self.announce_header = None;
        self
    }

    /// Controller to include or dispatch.
    pub fn controller(&self) -> &str {
        &self.controller
    }

    /// Action to include or dispatch.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Request header whose presence selects ESI, if any.
    pub fn trigger_header(&self) -> Option<&str> {
        self.trigger_header.as_deref()
    }

    /// Raw response header announcing ESI support, if any.
    pub fn announce_header(&self) -> Option<&str> {
        self.announce_header.as_deref()
    }
}

impl Default for FragmentRequest {
    fn default() -> Self {
        Self::new(DEFAULT_SEGMENT, DEFAULT_SEGMENT)
    }
}

/// Renders page fragments as ESI includes when a surrogate cache fronts
/// the request, and inline through the dispatcher otherwise.
///
/// The decision is recomputed from the request headers on every call.
#[derive(Debug)]
pub struct FragmentRenderer<R, D, U> {
    request: R,
    dispatcher: D,
    urls: U,
    config: EsiConfig,
}

impl<R, D, U> FragmentRenderer<R, D, U>
where
    R: HeaderSource,
    D: ActionDispatcher,
    U: UrlBuilder,
{
    /// Create a renderer with the default configuration.
    pub fn new(request: R, dispatcher: D, urls: U) -> Self {
        Self {
            request,
            dispatcher,
            urls,
            config: EsiConfig::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: EsiConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the configuration.
    pub fn config(&self) -> &EsiConfig {
        &self.config
    }

    /// Decide how `fragment` would be rendered, without side effects.
    pub fn surrogate_mode(&self, fragment: &FragmentRequest) -> SurrogateMode {
        detect_surrogate(&self.request, fragment.trigger_header())
    }

    /// Render a fragment.
    ///
    /// With a surrogate present this sets the announce header on `response`
    /// and returns `<esi:include src="..."/>`. Otherwise the controller/action
    /// is dispatched and its body returned; `response` is left untouched.
    pub fn render_fragment<S: HeaderSink + ?Sized>(
        &self,
        fragment: &FragmentRequest,
        response: &mut S,
    ) -> RenderResult<String> {
        let mode = self.surrogate_mode(fragment);

        tracing::debug!(
            controller = %fragment.controller(),
            action = %fragment.action(),
            mode = %mode,
            "Rendering fragment"
        );

        match mode {
            SurrogateMode::Esi => self.render_esi(fragment, response),
            SurrogateMode::Inline => self.render_inline(fragment),
        }
    }

    /// Render a fragment with the configured trigger and announce headers.
    pub fn render<S: HeaderSink + ?Sized>(
        &self,
        controller: &str,
        action: &str,
        response: &mut S,
    ) -> RenderResult<String> {
        let fragment = FragmentRequest::from_config(&self.config, controller, action);
        self.render_fragment(&fragment, response)
    }

    /// Render the configured default controller and action.
    pub fn render_default<S: HeaderSink + ?Sized>(&self, response: &mut S) -> RenderResult<String> {
        let fragment = FragmentRequest::from_config(
            &self.config,
            self.config.default_controller.as_str(),
            self.config.default_action.as_str(),
        );
        self.render_fragment(&fragment, response)
    }

    fn render_esi<S: HeaderSink + ?Sized>(
        &self,
        fragment: &FragmentRequest,
        response: &mut S,
    ) -> RenderResult<String> {
        if let Some(raw) = fragment.announce_header() {
            response.set_raw_header(raw).map_err(|e| {
                tracing::warn!(header = %raw, error = %e, "Failed to announce ESI support");
                e
            })?;
        }

        let src = self
            .urls
            .assemble(fragment.controller(), fragment.action())
            .map_err(|e| {
                tracing::warn!(
                    controller = %fragment.controller(),
                    action = %fragment.action(),
                    error = %e,
                    "Failed to assemble fragment URL"
                );
                e
            })?;

        Ok(EsiInclude::new(src).to_string())
    }

    fn render_inline(&self, fragment: &FragmentRequest) -> RenderResult<String> {
        let request = ActionRequest::new(fragment.controller(), fragment.action());

        let response = self.dispatcher.dispatch(&request).map_err(|e| {
            tracing::warn!(
                controller = %fragment.controller(),
                action = %fragment.action(),
                error = %e,
                "Fragment dispatch failed"
            );
            e
        })?;

        Ok(response.into_body())
    }
}
