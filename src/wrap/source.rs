use super::directive::{Directive, classify};
use super::{Namespace, Wrapped};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Namespace,
    IncludeRun,
}

/// Wrap a whole source file in `namespace`, stepping out of it around every
/// run of consecutive `#include` lines.
///
/// A file that ends inside an include run still gets a reopening marker
/// before the final close, leaving an empty namespace block at the end.
pub fn wrap_source<'a>(lines: &[&'a str], namespace: &Namespace) -> Wrapped<'a> {
    let mut out = Wrapped::with_capacity(lines.len());
    let mut region = Region::Namespace;

    out.open(namespace, false);

    for &line in lines {
        let is_include = classify(line) == Directive::Include;
        match (region, is_include) {
            (Region::Namespace, true) => {
                out.close(namespace);
                region = Region::IncludeRun;
            }
            (Region::IncludeRun, false) => {
                out.open(namespace, false);
                region = Region::Namespace;
            }
            _ => {}
        }
        out.push_line(line);
    }

    if region == Region::IncludeRun {
        out.open(namespace, true);
    }
    out.close(namespace);

    out
}
