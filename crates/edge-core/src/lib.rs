//! Core abstractions for ESI-aware fragment rendering.
//!
//! This crate provides the collaborators a fragment renderer works with:
//! - `RequestContext` / `HeaderSource` - Inbound request header lookup
//! - `ResponseContext` / `HeaderSink` - Outbound response headers
//! - `ActionDispatcher` / `UrlBuilder` - Controller/action dispatch and URL assembly
//! - `RouteTable` - In-memory implementation of both
//! - `EsiConfig` - Renderer defaults loaded from TOML or JSON

mod config;
mod context;
mod dispatch;
mod interop;
mod response;
mod routing;

pub use config::*;
pub use context::*;
pub use dispatch::*;
pub use response::*;
pub use routing::*;
