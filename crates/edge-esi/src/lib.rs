//! Edge Side Include fragment rendering.
//!
//! This crate provides:
//! - `FragmentRenderer` - Emits an ESI include when a surrogate cache is present,
//!   otherwise dispatches the fragment's controller/action inline
//! - `FragmentRequest` - Per-call fragment parameters
//! - `EsiInclude` - The `<esi:include/>` tag itself
//!
//! # Example
//!
//! ```ignore
//! use edge_core::{Method, RequestContext, ResponseContext, RouteTable};
//! use edge_esi::FragmentRenderer;
//!
//! let routes = RouteTable::new().route("pages", "show", |_| Ok("<p>hi</p>".to_string()));
//! let request = RequestContext::new(Method::Get, "/").with_header("X-Varnish", "1");
//! let renderer = FragmentRenderer::new(&request, &routes, &routes);
//!
//! let mut response = ResponseContext::new();
//! let html = renderer.render("pages", "show", &mut response)?;
//! assert_eq!(html, r#"<esi:include src="/pages/show"/>"#);
//! ```

mod headers;
mod renderer;
mod tag;

pub use headers::*;
pub use renderer::*;
pub use tag::*;
