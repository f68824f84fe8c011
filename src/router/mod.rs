//! # Router Module
//!
//! Path template compilation and first-match-wins route resolution.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Compiling route templates such as `/news/[s:slug]` into anchored regexes
//! - Keeping routes in registration order
//! - Matching an [`IncomingRequest`](crate::IncomingRequest) against that order
//! - Writing named path parameters into the request and dispatching the handler
//!
//! ## Architecture
//!
//! 1. **Compilation**: when a route is registered its template is compiled
//!    once by [`compile_template`] into a [`CompiledPattern`].
//!
//! 2. **Matching**: for each request the router tests the request path
//!    against every compiled pattern in registration order and stops at the
//!    first match.
//!
//! ## Template Syntax
//!
//! | Placeholder | Matches |
//! |---|---|
//! | `[i:id]` | digits |
//! | `[a:code]` | ASCII alphanumerics |
//! | `[h:hash]` | hex digits |
//! | `[s:slug]` | `A-Z a-z 0-9 _ -` |
//! | `[*:rest]` | anything, non-greedy |
//! | `[**:rest]` | anything, greedy |
//! | `[:name]` | anything except `/` and `.` |
//!
//! `[type]` and `[]` capture without storing a parameter. A trailing `?`
//! makes the placeholder and the `/` or `.` in front of it optional. Any
//! other type code is used verbatim as a regex fragment.
//!
//! ## Example
//!
//! ```rust
//! use simple_router::{dispatcher::HandlerResponse, IncomingRequest, Router};
//!
//! # fn main() -> Result<(), simple_router::RouterError> {
//! let mut router = Router::new();
//! router.add_route(
//!     "/news/[s:slug]",
//!     |req: &IncomingRequest| HandlerResponse::ok_json(serde_json::json!(req.param("slug"))),
//!     None,
//!     Some("article"),
//! )?;
//!
//! let mut req = IncomingRequest::new("GET", "/news/my-article/")?;
//! let matched = router.match_request(&mut req)?.expect("route should match");
//! assert_eq!(matched.route.url(), "/news/[s:slug]");
//! assert_eq!(req.param("slug"), Some("my-article"));
//! # Ok(())
//! # }
//! ```

mod core;
pub mod pattern;
mod route;
mod table;

pub use core::{RouteMatch, Router};
pub use pattern::{compile_template, CompiledPattern, Placeholder, PlaceholderType};
pub use route::{parse_method, Route, ALLOWED_METHODS, DEFAULT_URL};
pub use table::RouteTable;
