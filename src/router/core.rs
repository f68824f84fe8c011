//! Router core module - first-match-wins resolution over the route table.

use super::route::Route;
use super::table::RouteTable;
use crate::dispatcher::{Handler, HandlerRegistry, HandlerResponse, SharedHandler};
use crate::error::{Result, RouterError};
use crate::request::{IncomingRequest, ParamVec, RequestSource};
use crate::runtime_config::RouterConfig;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Result of matching a request to a route and dispatching its handler.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// The matched route
    pub route: Arc<Route>,
    /// Named path parameters in template order (e.g., `[slug]` → `[("slug", "my-article")]`)
    pub path_params: ParamVec,
    /// What the handler returned
    pub response: HandlerResponse,
}

impl RouteMatch {
    /// Get a path parameter by name
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Ordered route table plus the matching policy.
///
/// Routes are registered during setup and only read while matching, so a
/// built router can be shared across threads (e.g. behind an `Arc`) and each
/// request is matched against the same immutable table.
///
/// # Matching
///
/// Routes are tried in registration order and the first whose template
/// matches the whole request path wins. Overlapping templates are resolved
/// by that order alone, never by specificity. By default the request method
/// is not considered; with [`RouterConfig::enforce_method`] a route must also
/// be bound to the request's method.
#[derive(Debug, Clone, Default)]
pub struct Router {
    table: RouteTable,
    config: RouterConfig,
}

impl Router {
    /// Create an empty router with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty router with an explicit configuration.
    #[must_use]
    pub fn with_config(config: RouterConfig) -> Self {
        Self {
            table: RouteTable::new(),
            config,
        }
    }

    /// Create a router over pre-built routes, keeping their order.
    #[must_use]
    pub fn from_routes(routes: Vec<Route>) -> Self {
        let table: RouteTable = routes.into_iter().collect();
        info!(routes_count = table.len(), "Routing table loaded");
        Self {
            table,
            config: RouterConfig::default(),
        }
    }

    /// Build a router from a declarative route file.
    ///
    /// Route files are not read yet; the result is always an empty router.
    #[must_use]
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        warn!(
            path = %path.as_ref().display(),
            "Declarative route loading is not supported; starting with an empty routing table"
        );
        Self::new()
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Append a route. `method` defaults to `GET`.
    ///
    /// # Errors
    ///
    /// [`RouterError::MalformedTemplate`] or [`RouterError::InvalidMethod`];
    /// the table is left unchanged.
    pub fn add_route<H>(
        &mut self,
        url: &str,
        handler: H,
        method: Option<&str>,
        name: Option<&str>,
    ) -> Result<&mut Self>
    where
        H: Handler + 'static,
    {
        self.add_shared_route(url, Arc::new(handler), method, name)
    }

    /// Append a route around an already shared handler.
    pub fn add_shared_route(
        &mut self,
        url: &str,
        handler: SharedHandler,
        method: Option<&str>,
        name: Option<&str>,
    ) -> Result<&mut Self> {
        let route = Route::with_shared_handler(Some(url), handler, method)?.named(name);
        self.push(route);
        Ok(self)
    }

    /// Append a route whose handler is looked up in `registry` by name.
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidHandler`] if `handler_name` is not registered,
    /// plus the errors of [`Router::add_route`].
    pub fn add_named_route(
        &mut self,
        url: &str,
        handler_name: &str,
        method: Option<&str>,
        name: Option<&str>,
        registry: &HandlerRegistry,
    ) -> Result<&mut Self> {
        let handler = registry
            .get(handler_name)
            .ok_or_else(|| RouterError::InvalidHandler {
                handler: handler_name.to_string(),
            })?;
        self.add_shared_route(url, handler, method, name)
    }

    fn push(&mut self, route: Route) {
        let priority = self.table.len();
        let route = self.table.push(route);
        debug!(
            method = %route.method(),
            url = %route.url(),
            regex = %route.regex(),
            name = ?route.name(),
            priority,
            "Route registered"
        );
    }

    /// All routes in priority order.
    pub fn routes(&self) -> &[Arc<Route>] {
        self.table.as_slice()
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// First route registered under `name`.
    #[must_use]
    pub fn route_by_name(&self, name: &str) -> Option<Arc<Route>> {
        self.table.by_name(name).map(Arc::clone)
    }

    /// Match `req` against the table and dispatch the first matching route.
    ///
    /// Named captures of the matched template are written into `req` with
    /// override, so path parameters replace query or body parameters of the
    /// same name. Unnamed captures are not stored.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(RouteMatch))` - a route matched and its handler ran
    /// * `Ok(None)` - no route matched; no handler ran
    ///
    /// # Errors
    ///
    /// [`RouterError::NotInvocable`] if the matched handler panics.
    pub fn match_request(&self, req: &mut IncomingRequest) -> Result<Option<RouteMatch>> {
        debug!(
            method = %req.method(),
            path = %req.path(),
            routes_count = self.table.len(),
            enforce_method = self.config.enforce_method,
            "Route match attempt"
        );
        let match_start = Instant::now();

        let enforce_method = self.config.enforce_method;
        let request_method = req.method();
        let found = self.table.first_match(req.path(), |route| {
            !enforce_method || route.method().as_str() == request_method
        });
        let Some((route, captures)) = found else {
            debug!(
                method = %req.method(),
                path = %req.path(),
                duration_us = match_start.elapsed().as_micros(),
                "No route matched"
            );
            return Ok(None);
        };

        let mut path_params = ParamVec::new();
        for (key, value) in captures {
            match path_params.iter_mut().find(|(k, _)| k == key) {
                Some((_, existing)) => *existing = value.to_string(),
                None => path_params.push((key.to_string(), value.to_string())),
            }
        }
        let route = Arc::clone(route);

        for (key, value) in &path_params {
            req.add_param(key, value, true)?;
        }

        let match_duration = match_start.elapsed();
        if match_duration > self.config.slow_match_threshold {
            warn!(
                method = %req.method(),
                path = %req.path(),
                route_pattern = %route.url(),
                path_params = ?path_params,
                duration_us = match_duration.as_micros(),
                "Slow route matching detected"
            );
        } else {
            info!(
                method = %req.method(),
                path = %req.path(),
                route_pattern = %route.url(),
                path_params = ?path_params,
                duration_us = match_duration.as_micros(),
                "Route matched"
            );
        }

        let response = route.dispatch(req)?;
        Ok(Some(RouteMatch {
            route,
            path_params,
            response,
        }))
    }

    /// Pull one request from `source` and match it.
    ///
    /// # Errors
    ///
    /// Whatever `source` fails with, plus the errors of [`Router::match_request`].
    pub fn run<S>(&self, source: &S) -> Result<Option<RouteMatch>>
    where
        S: RequestSource + ?Sized,
    {
        let mut req = source.incoming()?;
        self.match_request(&mut req)
    }
}
