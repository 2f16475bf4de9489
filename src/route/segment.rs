use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::sync::Arc;

use crate::error::CompileError;
use crate::value::{same_param, Value};

/// Derived requirement for a dynamic segment: one path component.
static DYNAMIC_REQUIREMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^/]+$").expect("dynamic requirement regex should be valid")
});

/// Derived requirement for `controller`: slash-delimited components, e.g. `admin/user`.
static CONTROLLER_REQUIREMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^/]+(?:/[^/]+)*$").expect("controller requirement regex should be valid")
});

/// Derived requirement for a glob segment: anything.
static GLOB_REQUIREMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?s:.*)$").expect("glob requirement regex should be valid")
});

/// Name whose derived requirement admits `/` inside the value.
pub(crate) const CONTROLLER: &str = "controller";

/// A fully anchored constraint on a placeholder's string value
#[derive(Debug, Clone)]
pub struct Requirement {
    regex: Regex,
    explicit: bool,
}

impl Requirement {
    /// Compile an explicit requirement, anchoring it at both ends.
    ///
    /// `[a-z]+` becomes `^(?:[a-z]+)$`, so `fox5` is rejected rather than
    /// matched on its `fox` prefix.
    pub fn explicit(name: &str, pattern: &str) -> Result<Self, CompileError> {
        let anchored = format!("^(?:{})$", pattern);
        Regex::new(&anchored)
            .map(|regex| Self {
                regex,
                explicit: true,
            })
            .map_err(|e| CompileError::InvalidRequirement {
                name: name.to_string(),
                pattern: pattern.to_string(),
                message: e.to_string(),
            })
    }

    /// Derived requirement for a dynamic segment of the given name
    #[must_use]
    pub fn derived_dynamic(name: &str) -> Self {
        let regex = if name == CONTROLLER {
            CONTROLLER_REQUIREMENT.clone()
        } else {
            DYNAMIC_REQUIREMENT.clone()
        };
        Self {
            regex,
            explicit: false,
        }
    }

    /// Derived requirement for a glob segment
    #[must_use]
    pub fn derived_glob() -> Self {
        Self {
            regex: GLOB_REQUIREMENT.clone(),
            explicit: false,
        }
    }

    /// Whether the whole value satisfies the requirement
    #[inline]
    #[must_use]
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }

    /// Whether the registrar supplied this requirement
    #[must_use]
    pub fn is_explicit(&self) -> bool {
        self.explicit
    }

    /// Anchored regex source
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// A named placeholder: the payload of dynamic and glob segments
#[derive(Debug, Clone)]
pub struct Placeholder {
    /// Parameter name (without the `:` or `*` sigil)
    pub name: Arc<str>,
    /// Explicit or derived constraint on the value
    pub requirement: Requirement,
    /// Default value; `None` is the absent default
    pub default: Option<Value>,
    /// Whether the segment may be dropped by minimization
    pub optional: bool,
}

impl Placeholder {
    /// Whether minimization may drop this segment given its resolved value.
    ///
    /// Optional segments are droppable when the value is missing or equal (by
    /// string form) to the default.
    #[inline]
    #[must_use]
    pub fn is_droppable(&self, value: Option<&Value>) -> bool {
        self.optional && (value.is_none() || same_param(value, self.default.as_ref()))
    }
}

/// One piece of a compiled template
#[derive(Debug, Clone)]
pub enum Segment {
    /// Fixed text; adjacent literal tokens are merged into one run such as `hello/world`
    Literal(String),
    /// A single path component filled by a scalar value (`:name`)
    Dynamic(Placeholder),
    /// The rest of the path (`*name`), rendered with its internal separators
    Glob(Placeholder),
}

impl Segment {
    /// Placeholder payload for dynamic and glob segments
    #[must_use]
    pub fn placeholder(&self) -> Option<&Placeholder> {
        match self {
            Segment::Literal(_) => None,
            Segment::Dynamic(p) | Segment::Glob(p) => Some(p),
        }
    }

    /// Placeholder name, if any
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.placeholder().map(|p| p.name.as_ref())
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(text) => f.write_str(text),
            Segment::Dynamic(p) => write!(f, ":{}", p.name),
            Segment::Glob(p) => write!(f, "*{}", p.name),
        }
    }
}
