//! # simple-router
//!
//! A minimal HTTP request router: an ordered table of path templates with
//! typed placeholders, resolved first-match-wins against a normalized request.
//!
//! ## Overview
//!
//! Routes are registered with a template such as `/news/[s:slug]`, an
//! optional HTTP method and a handler. Each template is compiled once into an
//! anchored regex. A request is matched by walking the table in registration
//! order; the first route whose pattern matches the entire path wins, its
//! named captures are written into the request's parameters, and its handler
//! is invoked.
//!
//! ## Architecture
//!
//! - **[`router`]** - template compiler, [`Route`], [`RouteTable`] and [`Router`]
//! - **[`request`]** - [`IncomingRequest`] and the [`RequestSource`] seam
//! - **[`server`]** - [`server::RawRequest`], a request source over raw transport parts
//! - **[`dispatcher`]** - the [`dispatcher::Handler`] contract, responses and the named registry
//! - **[`breadcrumbs`]** - breadcrumb trail derivation from a path
//! - **[`runtime_config`]** - environment-driven matching settings
//! - **[`logging`]** - `tracing-subscriber` setup
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Transport
//!     participant Source as RequestSource
//!     participant Router
//!     participant Table as RouteTable
//!     participant Route
//!     participant Handler
//!
//!     Transport->>Source: raw method, target, body
//!     Source-->>Router: IncomingRequest
//!     Router->>Table: first_match(path)
//!     Table->>Table: test compiled patterns<br/>in registration order
//!     alt No Route Match
//!         Table-->>Router: None
//!         Router-->>Transport: Ok(None)
//!     end
//!     Table-->>Router: route + named captures
//!     Router->>Router: add_param(key, value, force)
//!     Router->>Route: dispatch(&request)
//!     Route->>Handler: invoke(&request)
//!     Handler-->>Router: HandlerResponse
//!     Router-->>Transport: Ok(Some(RouteMatch))
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use simple_router::{dispatcher::HandlerResponse, server::RawRequest, IncomingRequest, Router};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), simple_router::RouterError> {
//! let mut router = Router::new();
//! router
//!     .add_route("/", |_: &IncomingRequest| HandlerResponse::ok_json(json!("home")), None, None)?
//!     .add_route(
//!         "/news/[s:slug]/[i:page]?",
//!         |req: &IncomingRequest| {
//!             HandlerResponse::ok_json(json!({ "slug": req.param("slug"), "page": req.param("page") }))
//!         },
//!         Some("get"),
//!         Some("article"),
//!     )?;
//!
//! let matched = router
//!     .run(&RawRequest::new("GET", "/news/hello-world/2?ref=feed"))?
//!     .expect("article route");
//! assert_eq!(matched.route.name(), Some("article"));
//! assert_eq!(matched.response.body, json!({ "slug": "hello-world", "page": "2" }));
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency
//!
//! Matching is synchronous and request-scoped. Routes are registered during
//! setup; afterwards the [`Router`] is only read, so it can be shared across
//! threads while every request value stays owned by the call handling it.

pub mod breadcrumbs;
pub mod dispatcher;
pub mod error;
pub mod logging;
pub mod request;
pub mod router;
pub mod runtime_config;
pub mod server;

pub use breadcrumbs::{breadcrumbs, Breadcrumb};
pub use error::{Result, RouterError};
pub use request::{IncomingRequest, ParamVec, RequestSource};
pub use router::{CompiledPattern, Route, RouteMatch, RouteTable, Router};
