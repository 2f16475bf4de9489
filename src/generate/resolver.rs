//! Per-route resolution: compute segment values, check filter keys and
//! requirements, and find the minimization cut point.

use smallvec::SmallVec;
use std::borrow::Cow;
use std::fmt;

use super::GenerateOptions;
use crate::route::{Route, Segment};
use crate::value::{same_param, Params, Value};

/// Maximum number of segments resolved before heap allocation.
/// Templates rarely exceed a handful of segments (`:controller/:action/:id`).
pub const MAX_INLINE_SEGMENTS: usize = 8;

/// String forms of resolved values, aligned with the route's segments.
/// `None` for literals and for missing glob values.
pub type ValueVec<'r> = SmallVec<[Option<Cow<'r, str>>; MAX_INLINE_SEGMENTS]>;

/// Why a route could not produce a path for a parameter set
///
/// Rejection is an ordinary outcome: the mapper moves on to the next route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// A filter key was supplied with a value other than its declared default
    FilterMismatch {
        /// Filter key name
        name: String,
    },
    /// A segment value does not fully match the segment's requirement
    RequirementFailed {
        /// Segment name
        name: String,
        /// String form of the rejected value
        value: String,
    },
    /// A required segment that survived minimization has no value
    MissingValue {
        /// Segment name
        name: String,
    },
    /// A kept dynamic value with an empty `/`-delimited component, e.g. `a/` or `/a`
    EmptyComponent {
        /// Segment name
        name: String,
        /// String form of the rejected value
        value: String,
    },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::FilterMismatch { name } => {
                write!(f, "filter key '{}' does not match its default", name)
            }
            Rejection::RequirementFailed { name, value } => {
                write!(f, "value '{}' for '{}' fails its requirement", value, name)
            }
            Rejection::MissingValue { name } => {
                write!(f, "no value for required segment '{}'", name)
            }
            Rejection::EmptyComponent { name, value } => {
                write!(f, "value '{}' for '{}' has an empty path component", value, name)
            }
        }
    }
}

/// A route accepted for a parameter set
///
/// Holds the kept prefix of the route's segments and the string form of each
/// kept segment's value.
#[derive(Debug)]
pub struct Resolved<'r> {
    route: &'r Route,
    values: ValueVec<'r>,
}

impl<'r> Resolved<'r> {
    /// The route that was resolved
    #[must_use]
    pub fn route(&self) -> &'r Route {
        self.route
    }

    /// Segments that survived minimization
    #[must_use]
    pub fn segments(&self) -> &'r [Segment] {
        &self.route.segments()[..self.values.len()]
    }

    /// Kept segments paired with their resolved string values
    pub fn iter(&self) -> impl Iterator<Item = (&'r Segment, Option<&str>)> + '_ {
        self.segments()
            .iter()
            .zip(self.values.iter().map(|v| v.as_deref()))
    }

    /// Resolved string value of a kept segment
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(segment, _)| segment.name() == Some(name))
            .and_then(|(_, value)| value)
    }
}

/// Resolve one route against caller parameters.
///
/// 1. Filter keys supplied by the caller must equal their defaults.
/// 2. Segment values come from the caller, then the segment default.
/// 3. Every present value must fully match its requirement.
/// 4. Optional trailing segments whose value is missing or equal to the
///    default are dropped, right to left (minimization).
/// 5. A kept dynamic segment without a value rejects the route. An empty
///    value counts as missing; a value with an empty component between `/`s
///    is rejected too, since it could not be rendered in its own position.
///
/// # Errors
///
/// Returns the first [`Rejection`] encountered.
pub fn resolve<'r>(
    route: &'r Route,
    given: &'r Params,
    options: GenerateOptions,
) -> Result<Resolved<'r>, Rejection> {
    for (name, default) in route.filter_keys() {
        if let Some(value) = given.get(name) {
            if !same_param(Some(value), default.as_ref()) {
                return Err(Rejection::FilterMismatch { name: name.clone() });
            }
        }
    }

    let segments = route.segments();
    let mut resolved: SmallVec<[Option<&'r Value>; MAX_INLINE_SEGMENTS]> =
        SmallVec::with_capacity(segments.len());
    let mut values: ValueVec<'r> = SmallVec::with_capacity(segments.len());

    for segment in segments {
        let Some(placeholder) = segment.placeholder() else {
            resolved.push(None);
            values.push(None);
            continue;
        };
        let value = given
            .get(&placeholder.name)
            .or(placeholder.default.as_ref());
        let text = value.map(Value::as_str);
        if let Some(text) = &text {
            if !placeholder.requirement.is_match(text) {
                return Err(Rejection::RequirementFailed {
                    name: placeholder.name.to_string(),
                    value: text.to_string(),
                });
            }
        }
        resolved.push(value);
        values.push(text);
    }

    let kept = minimization_cut(segments, &resolved, options.minimization);
    values.truncate(kept);

    for (segment, value) in segments[..kept].iter().zip(&values) {
        let Segment::Dynamic(placeholder) = segment else {
            continue;
        };
        match value.as_deref() {
            None | Some("") => {
                return Err(Rejection::MissingValue {
                    name: placeholder.name.to_string(),
                });
            }
            Some(text) if text.split('/').any(str::is_empty) => {
                return Err(Rejection::EmptyComponent {
                    name: placeholder.name.to_string(),
                    value: text.to_string(),
                });
            }
            Some(_) => {}
        }
    }

    Ok(Resolved { route, values })
}

/// Number of leading segments kept after trimming trailing optionals.
fn minimization_cut(segments: &[Segment], resolved: &[Option<&Value>], minimize: bool) -> usize {
    let mut kept = segments.len();
    while kept > 0 {
        let Some(placeholder) = segments[kept - 1].placeholder() else {
            break;
        };
        let value = resolved[kept - 1];
        let droppable = if minimize {
            placeholder.is_droppable(value)
        } else {
            placeholder.optional && value.is_none()
        };
        if !droppable {
            break;
        }
        kept -= 1;
    }
    kept
}
