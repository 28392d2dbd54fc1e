//! Namespace wrapping of a single file.
//!
//! Both entry points are pure: they take the lines of one file (each line
//! keeping its own terminator) and return the output lines with namespace
//! markers inserted. No state survives between calls.
//!
//! - [`wrap_header`] - include-guard aware wrapping for headers
//! - [`wrap_source`] - unconditional wrapping for sources
//!
//! Running either function on its own output is not a no-op: the inserted
//! markers are plain lines and are treated as ordinary content.

mod directive;
mod header;
mod source;

pub use directive::{Directive, classify};
pub use header::wrap_header;
pub use source::wrap_source;

use regex::Regex;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

pub const DEFAULT_NAMESPACE: &str = "clips";

static IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(::[A-Za-z_][A-Za-z0-9_]*)*$")
        .expect("identifier pattern is valid")
});

/// Name of the namespace written into the markers, used verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace(String);

impl Namespace {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the name is usable as a (possibly nested) C++ namespace name.
    /// Invalid names are still written as given.
    pub fn is_valid_identifier(&self) -> bool {
        IDENTIFIER_RE.is_match(&self.0)
    }

    fn open_marker(&self, leading_blank: bool) -> String {
        if leading_blank {
            format!("\nnamespace {} {{\n", self.0)
        } else {
            format!("namespace {} {{\n", self.0)
        }
    }

    fn close_marker(&self) -> String {
        format!("}} // namespace {}\n", self.0)
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which wrapping rules to apply to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapStyle {
    Header,
    Source,
}

/// Something the wrapper noticed but could not resolve on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The file ended while an include guard was still open.
    UnterminatedGuard { open: Vec<String> },
    /// The file ended with `#if`/`#ifdef`/`#ifndef` blocks lacking an `#endif`,
    /// outside of any include guard.
    UnclosedConditional { depth: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnterminatedGuard { open } => write!(
                f,
                "include guard never closed ({} unmatched: {})",
                open.len(),
                open.join(", ")
            ),
            Diagnostic::UnclosedConditional { depth } => {
                write!(f, "conditional block never closed ({} missing #endif)", depth)
            }
        }
    }
}

/// Output of one wrapping pass.
#[derive(Debug, Default)]
pub struct Wrapped<'a> {
    pub lines: Vec<Cow<'a, str>>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> Wrapped<'a> {
    fn with_capacity(lines: usize) -> Self {
        Self {
            lines: Vec::with_capacity(lines + 4),
            diagnostics: Vec::new(),
        }
    }

    fn push_line(&mut self, line: &'a str) {
        self.lines.push(Cow::Borrowed(line));
    }

    fn open(&mut self, namespace: &Namespace, leading_blank: bool) {
        self.lines.push(Cow::Owned(namespace.open_marker(leading_blank)));
    }

    fn close(&mut self, namespace: &Namespace) {
        self.lines.push(Cow::Owned(namespace.close_marker()));
    }

    pub fn render(&self) -> String {
        self.lines.concat()
    }
}

/// Split file content into lines, each keeping its terminator.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

pub fn wrap_lines<'a>(lines: &[&'a str], style: WrapStyle, namespace: &Namespace) -> Wrapped<'a> {
    match style {
        WrapStyle::Header => wrap_header(lines, namespace),
        WrapStyle::Source => wrap_source(lines, namespace),
    }
}

/// Convenience over [`split_lines`] + [`wrap_lines`] + [`Wrapped::render`].
pub fn wrap_text(
    text: &str,
    style: WrapStyle,
    namespace: &Namespace,
) -> (String, Vec<Diagnostic>) {
    let lines = split_lines(text);
    let wrapped = wrap_lines(&lines, style, namespace);
    (wrapped.render(), wrapped.diagnostics)
}
