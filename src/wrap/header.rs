use super::directive::{Directive, classify};
use super::{Diagnostic, Namespace, Wrapped};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GuardState {
    /// No `#ifndef` guard is active; nothing gets wrapped.
    NoGuard,
    /// Inside a guard with the namespace currently closed.
    GuardClosed,
    /// Inside a guard with the namespace open.
    GuardOpen,
}

/// Wrap the body of a header's include guard in `namespace`.
///
/// The namespace opens on the first ordinary line (or nested conditional)
/// after an `#ifndef`, closes around every `#include`, and closes for good
/// right before the `#endif` that unwinds the guard. Headers without an
/// `#ifndef` guard come back unchanged.
///
/// If the input ends with the guard still active, the output is left as-is
/// and a [`Diagnostic::UnterminatedGuard`] is attached. Conditionals left
/// open outside a guard yield [`Diagnostic::UnclosedConditional`].
pub fn wrap_header<'a>(lines: &[&'a str], namespace: &Namespace) -> Wrapped<'a> {
    let mut out = Wrapped::with_capacity(lines.len());
    let mut state = GuardState::NoGuard;
    let mut conditionals: Vec<&'a str> = Vec::new();
    // Real #if/#endif nesting, independent of the guard-only stack above.
    let mut depth = 0usize;

    for &line in lines {
        let directive = classify(line);
        match directive {
            Directive::IfNotDefined | Directive::Conditional => {
                depth += 1;
                if state == GuardState::GuardClosed {
                    out.open(namespace, true);
                    state = GuardState::GuardOpen;
                }
                conditionals.push(line.trim());
                if directive == Directive::IfNotDefined && state == GuardState::NoGuard {
                    state = GuardState::GuardClosed;
                }
            }
            Directive::EndIf => {
                depth = depth.saturating_sub(1);
                // Only conditionals seen while a guard is active are unwound.
                if state != GuardState::NoGuard {
                    conditionals.pop();
                    if conditionals.is_empty() {
                        if state == GuardState::GuardOpen {
                            out.close(namespace);
                        }
                        state = GuardState::NoGuard;
                    }
                }
            }
            Directive::PragmaOnce if state == GuardState::NoGuard => {}
            Directive::Include => {
                if state == GuardState::GuardOpen {
                    out.close(namespace);
                    state = GuardState::GuardClosed;
                }
            }
            _ => {
                if state == GuardState::GuardClosed {
                    out.open(namespace, true);
                    state = GuardState::GuardOpen;
                }
            }
        }
        out.push_line(line);
    }

    if state == GuardState::GuardOpen {
        out.close(namespace);
    }
    if state != GuardState::NoGuard {
        out.diagnostics.push(Diagnostic::UnterminatedGuard {
            open: conditionals.iter().map(|c| c.to_string()).collect(),
        });
    } else if depth > 0 {
        out.diagnostics.push(Diagnostic::UnclosedConditional { depth });
    }

    out
}
