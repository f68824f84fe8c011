use crate::error::{Result, RouterError};
use crate::request::{IncomingRequest, RequestSource};
use tracing::debug;

/// Body field that overrides the transport method (HTML forms can only
/// send GET and POST).
pub const METHOD_OVERRIDE_FIELD: &str = "_method";

/// Raw request parts as delivered by a transport.
///
/// Implements [`RequestSource`]: the path is taken from the request target,
/// parameters are the query pairs followed by the form body pairs, and a
/// later pair overrides an earlier one with the same key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRequest {
    /// Transport method, e.g. `GET`
    pub method: String,
    /// Request target, origin-form (`/news/x?a=1`) or absolute-form
    pub uri: String,
    /// `application/x-www-form-urlencoded` body, if any
    pub form_body: Option<String>,
}

impl RawRequest {
    pub fn new(method: &str, uri: &str) -> Self {
        Self {
            method: method.to_string(),
            uri: uri.to_string(),
            form_body: None,
        }
    }

    /// Attach a form-encoded body.
    #[must_use]
    pub fn with_form_body(mut self, body: &str) -> Self {
        self.form_body = Some(body.to_string());
        self
    }
}

/// Base that origin-form targets are resolved against.
const ORIGIN_BASE: &str = "http://localhost";

/// Split a request target into its path and raw query string.
///
/// Origin-form (`/path?q`) and absolute-form (`http://host/path?q`) targets
/// both go through [`url::Url`], so dot-segments are removed the same way and
/// the scheme is matched case-insensitively. A fragment is dropped.
///
/// # Errors
///
/// [`RouterError::InvalidRequest`] if the target does not parse or has no
/// `/`-rooted path.
pub fn split_target(uri: &str) -> Result<(String, Option<String>)> {
    let invalid = |reason: String| {
        RouterError::InvalidRequest(format!("invalid request target '{uri}': {reason}"))
    };
    let parsed = if uri.starts_with('/') {
        // Concatenated so a leading `//` stays part of the path.
        url::Url::parse(&format!("{ORIGIN_BASE}{uri}"))
    } else {
        url::Url::parse(ORIGIN_BASE).and_then(|base| base.join(uri))
    }
    .map_err(|e| invalid(e.to_string()))?;

    let path = parsed.path();
    if !path.starts_with('/') {
        return Err(invalid("path must start with '/'".to_string()));
    }
    Ok((path.to_string(), parsed.query().map(str::to_string)))
}

/// Decode `application/x-www-form-urlencoded` pairs in order.
///
/// A key without `=` decodes to an empty value.
pub fn parse_form_pairs(encoded: &str) -> Vec<(String, String)> {
    url::form_urlencoded::parse(encoded.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

impl RequestSource for RawRequest {
    fn incoming(&self) -> Result<IncomingRequest> {
        let (path, query) = split_target(&self.uri)?;
        let query_pairs = query.as_deref().map(parse_form_pairs).unwrap_or_default();
        let body_pairs = self
            .form_body
            .as_deref()
            .map(parse_form_pairs)
            .unwrap_or_default();

        let method = body_pairs
            .iter()
            .rfind(|(k, _)| k == METHOD_OVERRIDE_FIELD)
            .map(|(_, v)| v.as_str())
            .unwrap_or(&self.method);

        let mut req = IncomingRequest::new(method, &path)?;
        for (key, value) in query_pairs.iter().chain(body_pairs.iter()) {
            req.add_param(key, value, true)?;
        }

        debug!(
            method = %req.method(),
            path = %req.path(),
            query_param_count = query_pairs.len(),
            body_param_count = body_pairs.len(),
            "Request parsed"
        );
        Ok(req)
    }
}
