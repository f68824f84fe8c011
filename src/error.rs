//! Error taxonomy for route registration, request construction and dispatch.
//!
//! Registration errors (`InvalidMethod`, `InvalidHandler`, `MalformedTemplate`)
//! are returned from the call that builds the route and never reach match time.
//! A request that matches no route is not an error: [`crate::Router::match_request`]
//! returns `Ok(None)`.

use thiserror::Error;

/// Errors produced by the router and its collaborators.
#[derive(Error, Debug)]
pub enum RouterError {
    /// Method string outside the fixed HTTP method set.
    #[error("HTTP method '{method}' is not allowed")]
    InvalidMethod { method: String },

    /// Handler name that does not resolve to a registered handler.
    #[error("no invocable handler registered as '{handler}'")]
    InvalidHandler { handler: String },

    /// Route template whose placeholder syntax cannot be compiled.
    #[error("malformed route template '{template}': {reason}")]
    MalformedTemplate { template: String, reason: String },

    /// Parameter key already present and no override was requested.
    #[error("parameter '{key}' is already defined")]
    DuplicateParam { key: String },

    /// The handler could not run to completion.
    #[error("handler for route '{url}' could not be invoked: {reason}")]
    NotInvocable { url: String, reason: String },

    /// The request source produced data that cannot form a request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RouterError>;
