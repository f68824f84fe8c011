//! Breadcrumb trail for a request path.
//!
//! `/blog/rust-routing` yields `/` (home), `/blog/` and `/blog/rust-routing/`,
//! with display text derived from each segment.

use serde::Serialize;

/// One step of a breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub url: String,
    pub text: String,
}

/// Build the breadcrumb trail for `path`, starting with the home entry.
///
/// Empty segments are ignored. Every URL after the home entry ends in `/`.
pub fn breadcrumbs(path: &str, home_text: &str) -> Vec<Breadcrumb> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let mut trail = vec![Breadcrumb {
        url: "/".to_string(),
        text: home_text.to_string(),
    }];
    let mut url = String::from("/");
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        url.push_str(segment);
        url.push('/');
        trail.push(Breadcrumb {
            url: url.clone(),
            text: segment_text(segment),
        });
    }
    trail
}

fn segment_text(segment: &str) -> String {
    let spaced = segment.replace('-', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
