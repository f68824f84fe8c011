//! Route template compiler.
//!
//! Turns templates such as `/news/[s:slug]/[i:id]?` into an anchored [`Regex`].
//! Literal text is escaped, each `[type:name]` placeholder becomes a capture
//! group, and a `/` or `.` directly in front of a placeholder is consumed
//! outside the capture so the captured value never carries the separator.
//!
//! Capture groups are emitted under generated group names (`p0`, `p1`, ...)
//! and the author-facing names are kept in a parallel list. Author names are
//! therefore free of the `regex` crate's group-name rules, and a custom class
//! that contains its own groups cannot shift the index mapping.

use crate::error::{Result, RouterError};
use regex::Regex;
use std::fmt;

/// Short type codes accepted inside a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaceholderType {
    /// `i`: one or more digits
    Integer,
    /// `a`: one or more ASCII alphanumerics
    Alphanumeric,
    /// `h`: one or more hex digits
    Hex,
    /// `s`: slug characters `[A-Za-z0-9_-]`
    Slug,
    /// `*`: anything, non-greedy
    Lazy,
    /// `**`: anything, greedy
    Greedy,
    /// empty code: anything except `/` and `.`
    Segment,
    /// unknown code, inserted verbatim as a pattern fragment
    Custom(String),
}

impl PlaceholderType {
    /// Resolve a type code. Unknown codes become [`PlaceholderType::Custom`].
    pub fn from_code(code: &str) -> Self {
        match code {
            "i" => PlaceholderType::Integer,
            "a" => PlaceholderType::Alphanumeric,
            "h" => PlaceholderType::Hex,
            "s" => PlaceholderType::Slug,
            "*" => PlaceholderType::Lazy,
            "**" => PlaceholderType::Greedy,
            "" => PlaceholderType::Segment,
            other => PlaceholderType::Custom(other.to_string()),
        }
    }

    /// Regex fragment matched by this type.
    pub fn pattern(&self) -> &str {
        match self {
            PlaceholderType::Integer => "[0-9]+",
            PlaceholderType::Alphanumeric => "[0-9A-Za-z]+",
            PlaceholderType::Hex => "[0-9A-Fa-f]+",
            PlaceholderType::Slug => "[0-9A-Za-z_-]+",
            PlaceholderType::Lazy => ".+?",
            PlaceholderType::Greedy => ".+",
            PlaceholderType::Segment => "[^/.]+",
            PlaceholderType::Custom(raw) => raw,
        }
    }
}

/// One placeholder of a template, in order of appearance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Separator consumed in front of the capture (`/` or `.`), if any.
    pub separator: Option<char>,
    pub kind: PlaceholderType,
    /// Parameter name, `None` for positional placeholders.
    pub name: Option<String>,
    pub optional: bool,
}

/// Anchored matcher compiled from a route template.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    regex: Regex,
    /// Author names per capture slot; empty for unnamed placeholders.
    names: Vec<String>,
    /// Regex group name per capture slot (`p0`, `p1`, ...).
    group_names: Vec<String>,
    placeholders: Vec<Placeholder>,
}

impl CompiledPattern {
    /// The anchored regex.
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Regex source, e.g. `^/news(?:/(?P<p0>[0-9A-Za-z_-]+))$`.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Capture names in definition order, `""` for unnamed captures.
    pub fn capture_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn placeholders(&self) -> &[Placeholder] {
        &self.placeholders
    }

    /// Structural test against an entire path.
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Match `path` and return the named captures in definition order.
    ///
    /// Unnamed captures are skipped. Optional placeholders that did not
    /// participate in the match produce no entry.
    pub fn captures<'p>(&self, path: &'p str) -> Option<Vec<(&str, &'p str)>> {
        let caps = self.regex.captures(path)?;
        let mut out = Vec::with_capacity(self.names.len());
        for (name, group) in self.names.iter().zip(&self.group_names) {
            if name.is_empty() {
                continue;
            }
            if let Some(value) = caps.name(group) {
                out.push((name.as_str(), value.as_str()));
            }
        }
        Some(out)
    }
}

impl fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.regex.as_str())
    }
}

fn group_name(slot: usize) -> String {
    format!("p{slot}")
}

fn malformed(template: &str, reason: impl Into<String>) -> RouterError {
    RouterError::MalformedTemplate {
        template: template.to_string(),
        reason: reason.into(),
    }
}

/// Compile a route template into an anchored matcher.
///
/// # Errors
///
/// [`RouterError::MalformedTemplate`] for an unclosed `[`, a stray `]`, a
/// nested `[`, a placeholder with more than one `:`, or a custom class that
/// is not a valid regex fragment.
pub fn compile_template(template: &str) -> Result<CompiledPattern> {
    let mut pattern = String::with_capacity(template.len() * 2 + 2);
    pattern.push('^');
    let mut literal = String::new();
    let mut names = Vec::new();
    let mut group_names = Vec::new();
    let mut placeholders = Vec::new();

    let mut chars = template.char_indices().peekable();
    while let Some((pos, ch)) = chars.next() {
        match ch {
            '[' => {
                let rest = &template[pos + 1..];
                let Some(close) = rest.find(']') else {
                    return Err(malformed(template, format!("unclosed '[' at offset {pos}")));
                };
                let body = &rest[..close];
                if body.contains('[') {
                    return Err(malformed(template, format!("nested '[' at offset {pos}")));
                }
                // Skip over the placeholder body and its closing bracket.
                for _ in 0..body.chars().count() + 1 {
                    chars.next();
                }
                let optional = chars.next_if(|&(_, c)| c == '?').is_some();
                let placeholder = parse_placeholder(template, body, &mut literal, optional)?;

                pattern.push_str(&regex::escape(&literal));
                literal.clear();
                let group = group_name(names.len());
                push_group(&mut pattern, &placeholder, &group);
                group_names.push(group);
                names.push(placeholder.name.clone().unwrap_or_default());
                placeholders.push(placeholder);
            }
            ']' => {
                return Err(malformed(template, format!("unbalanced ']' at offset {pos}")));
            }
            other => literal.push(other),
        }
    }
    pattern.push_str(&regex::escape(&literal));
    pattern.push('$');

    let regex = Regex::new(&pattern).map_err(|e| malformed(template, e.to_string()))?;
    Ok(CompiledPattern {
        regex,
        names,
        group_names,
        placeholders,
    })
}

/// Split `type:name`, and take a trailing `/` or `.` off the pending literal
/// as the placeholder's separator.
fn parse_placeholder(
    template: &str,
    body: &str,
    literal: &mut String,
    optional: bool,
) -> Result<Placeholder> {
    let (code, name) = match body.split_once(':') {
        Some((code, name)) => {
            if name.contains(':') {
                return Err(malformed(template, format!("placeholder '[{body}]' has more than one ':'")));
            }
            (code, name)
        }
        None => (body, ""),
    };
    let separator = match literal.chars().last() {
        Some(c @ ('/' | '.')) => {
            literal.pop();
            Some(c)
        }
        _ => None,
    };
    Ok(Placeholder {
        separator,
        kind: PlaceholderType::from_code(code),
        name: (!name.is_empty()).then(|| name.to_string()),
        optional,
    })
}

fn push_group(pattern: &mut String, placeholder: &Placeholder, group: &str) {
    pattern.push_str("(?:");
    match placeholder.separator {
        Some('.') => pattern.push_str(r"\."),
        Some(sep) => pattern.push(sep),
        None => {}
    }
    pattern.push_str("(?P<");
    pattern.push_str(group);
    pattern.push('>');
    pattern.push_str(placeholder.kind.pattern());
    pattern.push_str("))");
    if placeholder.optional {
        pattern.push('?');
    }
}
