//! # Dispatcher Module
//!
//! Handler invocation for matched routes.
//!
//! ## Overview
//!
//! A handler is any value implementing [`Handler`]: a single
//! `invoke(&IncomingRequest) -> HandlerResponse` method. Closures and free
//! functions with that signature implement it through a blanket impl, and
//! bound methods are expressed as closures capturing their receiver. The
//! concrete variant is fixed when the route is built, so dispatch is a plain
//! trait-object call.
//!
//! ## Handler Registration
//!
//! Handlers can also be registered by name in a [`HandlerRegistry`] and
//! resolved when a route is added:
//!
//! ```rust
//! use simple_router::dispatcher::{HandlerRegistry, HandlerResponse};
//! use simple_router::Router;
//!
//! let mut registry = HandlerRegistry::new();
//! registry.register("page", |req: &simple_router::IncomingRequest| {
//!     HandlerResponse::ok_json(serde_json::json!({ "slug": req.param("slug") }))
//! });
//!
//! let mut router = Router::new();
//! router
//!     .add_named_route("/news/[s:slug]", "page", None, None, &registry)
//!     .unwrap();
//! ```
//!
//! A name with no registered handler fails with
//! [`crate::RouterError::InvalidHandler`] at registration, never at match time.
//!
//! ## Error Handling
//!
//! Handler panics are caught by [`crate::Route::dispatch`] and reported as
//! [`crate::RouterError::NotInvocable`].

mod core;

pub use core::{Handler, HandlerRegistry, HandlerResponse, HeaderVec, SharedHandler, MAX_INLINE_HEADERS};
