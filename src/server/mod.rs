//! Transport-facing request construction.
//!
//! [`RawRequest`] turns the raw parts a transport delivers (method, request
//! target, form body) into an [`IncomingRequest`](crate::IncomingRequest).

pub mod request;

pub use request::{parse_form_pairs, split_target, RawRequest, METHOD_OVERRIDE_FIELD};
