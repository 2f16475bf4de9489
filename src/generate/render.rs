//! Path rendering: turn a resolved route into an encoded path string.

use super::resolver::Resolved;
use super::GenerateOptions;
use crate::route::Segment;

/// Render the kept segments of a resolved route.
///
/// Literal runs are copied verbatim. Placeholder values are split on `/`,
/// each component is encoded with [`encode_component`], and the components
/// are rejoined with `/`. Empty components are skipped, so a missing or
/// empty glob collapses together with its separator. The result always
/// starts with `/`; an empty path renders as `/`.
#[must_use]
pub fn render(resolved: &Resolved<'_>, options: GenerateOptions) -> String {
    let mut path = String::with_capacity(64);

    for (segment, value) in resolved.iter() {
        match segment {
            Segment::Literal(text) => {
                path.push('/');
                path.push_str(text);
            }
            Segment::Dynamic(_) | Segment::Glob(_) => {
                if let Some(value) = value {
                    encode_components(&mut path, value);
                }
            }
        }
    }

    // Root stays a single `/` with or without append_slash
    if path.is_empty() || options.append_slash {
        path.push('/');
    }
    path
}

/// Encode a slash-delimited value component by component, each behind a `/`.
///
/// Empty components are skipped, so `/books//a.pdf/` in a glob renders as
/// `/books/a.pdf`. The resolver never keeps a dynamic value with empty
/// components.
fn encode_components(out: &mut String, value: &str) {
    for component in value.split('/').filter(|c| !c.is_empty()) {
        out.push('/');
        encode_component(out, component);
    }
}

/// Encode one path component.
///
/// Spaces become `+`; every byte outside `A-Z a-z 0-9 - _ . ~` becomes an
/// uppercase `%XX` escape, so `a&b` renders as `a%26b`.
pub fn encode_component(out: &mut String, component: &str) {
    for (i, word) in component.split(' ').enumerate() {
        if i > 0 {
            out.push('+');
        }
        out.push_str(&urlencoding::encode(word));
    }
}
