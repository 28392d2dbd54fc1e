//! Line classification by leading preprocessor keyword.
//!
//! This is a prefix match on the trimmed line and nothing more. Directive-like
//! text inside comments or string literals is classified like a real
//! directive, `#elif`/`#else` count as ordinary lines, and anything starting
//! with `#if` (including `#iffy`) opens a conditional.

/// What a single line means to the namespace wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// `#ifndef`, the only conditional that can start an include guard.
    IfNotDefined,
    /// `#ifdef`, `#if` and anything else beginning with `#if`.
    Conditional,
    EndIf,
    PragmaOnce,
    Include,
    Other,
}

impl Directive {
    pub fn opens_conditional(self) -> bool {
        matches!(self, Directive::IfNotDefined | Directive::Conditional)
    }
}

pub fn classify(line: &str) -> Directive {
    let trimmed = line.trim();

    // Order matters: "#ifndef" and "#ifdef" both start with "#if".
    if trimmed.starts_with("#ifndef") {
        Directive::IfNotDefined
    } else if trimmed.starts_with("#if") {
        Directive::Conditional
    } else if trimmed.starts_with("#endif") {
        Directive::EndIf
    } else if trimmed.starts_with("#pragma once") {
        Directive::PragmaOnce
    } else if trimmed.starts_with("#include") {
        Directive::Include
    } else {
        Directive::Other
    }
}
