use super::pattern::{compile_template, CompiledPattern};
use crate::dispatcher::{Handler, HandlerResponse, SharedHandler};
use crate::error::{Result, RouterError};
use crate::request::IncomingRequest;
use http::Method;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, error};

/// Template used when a route is built without one.
pub const DEFAULT_URL: &str = "/";

/// Methods a route may be bound to.
pub const ALLOWED_METHODS: [Method; 9] = [
    Method::GET,
    Method::HEAD,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::CONNECT,
    Method::OPTIONS,
    Method::TRACE,
    Method::PATCH,
];

/// Parse a method name case-insensitively against [`ALLOWED_METHODS`].
///
/// `None` selects `GET`.
///
/// # Errors
///
/// [`RouterError::InvalidMethod`] for anything outside the allowed set.
pub fn parse_method(method: Option<&str>) -> Result<Method> {
    let Some(raw) = method else {
        return Ok(Method::GET);
    };
    let upper = raw.trim().to_ascii_uppercase();
    ALLOWED_METHODS
        .iter()
        .find(|m| m.as_str() == upper)
        .cloned()
        .ok_or_else(|| RouterError::InvalidMethod {
            method: raw.to_string(),
        })
}

/// A path template bound to a method and a handler.
///
/// The compiled pattern is derived whenever the template is set and never
/// recompiled otherwise. Once a route is in a [`super::RouteTable`] it is
/// shared behind an `Arc` and no longer mutable.
#[derive(Clone)]
pub struct Route {
    url: String,
    pattern: CompiledPattern,
    method: Method,
    handler: SharedHandler,
    name: Option<String>,
}

impl Route {
    /// Build a route. `url` defaults to `/` and `method` to `GET`.
    ///
    /// # Errors
    ///
    /// [`RouterError::MalformedTemplate`] or [`RouterError::InvalidMethod`].
    pub fn new<H>(url: Option<&str>, handler: H, method: Option<&str>) -> Result<Self>
    where
        H: Handler + 'static,
    {
        Self::with_shared_handler(url, Arc::new(handler), method)
    }

    /// Build a route around an already shared handler.
    pub fn with_shared_handler(
        url: Option<&str>,
        handler: SharedHandler,
        method: Option<&str>,
    ) -> Result<Self> {
        let url = url.unwrap_or(DEFAULT_URL).to_string();
        let pattern = compile_template(&url)?;
        let method = parse_method(method)?;
        Ok(Self {
            url,
            pattern,
            method,
            handler,
            name: None,
        })
    }

    /// Attach a name to the route.
    #[must_use]
    pub fn named(mut self, name: Option<&str>) -> Self {
        self.name = name.map(str::to_string);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Replace the template and recompile. `None` resets to `/`.
    ///
    /// On error the route is left unchanged.
    pub fn set_url(&mut self, url: Option<&str>) -> Result<&mut Self> {
        let url = url.unwrap_or(DEFAULT_URL);
        self.pattern = compile_template(url)?;
        self.url = url.to_string();
        Ok(self)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Replace the method. `None` resets to `GET`.
    pub fn set_method(&mut self, method: Option<&str>) -> Result<&mut Self> {
        self.method = parse_method(method)?;
        Ok(self)
    }

    pub fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    /// Source of the compiled regex.
    pub fn regex(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn handler(&self) -> &SharedHandler {
        &self.handler
    }

    /// Replace the handler; the template and method are kept.
    pub fn set_handler<H>(&mut self, handler: H) -> &mut Self
    where
        H: Handler + 'static,
    {
        self.handler = Arc::new(handler);
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Invoke the handler with `req`.
    ///
    /// # Errors
    ///
    /// [`RouterError::NotInvocable`] if the handler panics.
    pub fn dispatch(&self, req: &IncomingRequest) -> Result<HandlerResponse> {
        debug!(route = %self.url, method = %self.method, "Dispatching handler");
        catch_unwind(AssertUnwindSafe(|| self.handler.invoke(req))).map_err(|panic| {
            let reason = panic_message(panic.as_ref());
            error!(
                route = %self.url,
                path = %req.path(),
                panic_message = %reason,
                "Handler panicked"
            );
            RouterError::NotInvocable {
                url: self.url.clone(),
                reason,
            }
        })
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("url", &self.url)
            .field("method", &self.method)
            .field("regex", &self.pattern.as_str())
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
