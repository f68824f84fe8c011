//! # Request Module
//!
//! [`IncomingRequest`] is the normalized request value the router consumes:
//! an uppercased method, a normalized path and an ordered parameter list.
//! It is built once per inbound request by a [`RequestSource`], enriched with
//! path parameters while matching, and read-only afterwards.
//!
//! The router never reads ambient transport state itself. Whatever owns the
//! connection implements [`RequestSource`] and hands over one request value
//! per call (see [`crate::server::RawRequest`] for the form-encoded variant).

use crate::error::{Result, RouterError};
use smallvec::SmallVec;

/// Maximum number of parameters stored inline before spilling to the heap.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Ordered `(key, value)` parameter storage; keys are unique.
pub type ParamVec = SmallVec<[(String, String); MAX_INLINE_PARAMS]>;

/// Normalized request handed to the router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingRequest {
    method: String,
    path: String,
    params: ParamVec,
}

impl IncomingRequest {
    /// Build a request from a method and a path.
    ///
    /// The method is uppercased. Trailing slashes are stripped from the path
    /// except for the root `/`, and an empty path becomes `/`.
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidRequest`] if the method is empty.
    pub fn new(method: &str, path: &str) -> Result<Self> {
        let method = method.trim();
        if method.is_empty() {
            return Err(RouterError::InvalidRequest(
                "request method must not be empty".to_string(),
            ));
        }
        Ok(Self {
            method: method.to_ascii_uppercase(),
            path: normalize_path(path),
            params: ParamVec::new(),
        })
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// All parameters in insertion order.
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Look up a parameter by key.
    #[inline]
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Add a parameter.
    ///
    /// With `force` an existing key keeps its position and takes the new
    /// value. Without it an existing key is rejected.
    ///
    /// # Errors
    ///
    /// [`RouterError::DuplicateParam`] if `key` exists and `force` is false.
    pub fn add_param(&mut self, key: &str, value: &str, force: bool) -> Result<&mut Self> {
        if !force && self.param(key).is_some() {
            return Err(RouterError::DuplicateParam {
                key: key.to_string(),
            });
        }
        self.set_param(key, value);
        Ok(self)
    }

    /// Builder-style variant of [`IncomingRequest::add_param`] with override.
    #[must_use]
    pub fn with_param(mut self, key: &str, value: &str) -> Self {
        self.set_param(key, value);
        self
    }

    fn set_param(&mut self, key: &str, value: &str) {
        match self.params.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => {
                existing.clear();
                existing.push_str(value);
            }
            None => self.params.push((key.to_string(), value.to_string())),
        }
    }
}

fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Produces one [`IncomingRequest`] per call.
pub trait RequestSource {
    /// Build the request for the current inbound call.
    fn incoming(&self) -> Result<IncomingRequest>;
}

impl RequestSource for IncomingRequest {
    fn incoming(&self) -> Result<IncomingRequest> {
        Ok(self.clone())
    }
}
