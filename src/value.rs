//! # Parameter Values
//!
//! Scalar values supplied to route registration (as defaults) and to path
//! generation (as parameters).
//!
//! Values are always compared and rendered through their string form, so an
//! integer and its decimal string are interchangeable:
//!
//! ```rust
//! use routegen::Value;
//!
//! assert!(Value::from(1).same_as(&Value::from("1")));
//! assert_eq!(Value::from(2004).to_string(), "2004");
//! ```
//!
//! A parameter map is `name → Option<Value>`. Supplying a name with an absent
//! value is the same signal as not supplying it at all: "let the route decide".

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

/// A scalar parameter value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Integer value, rendered in decimal
    Int(i64),
    /// String value
    Str(String),
}

impl Value {
    /// String form used for comparison, requirement checks and rendering.
    #[must_use]
    pub fn as_str(&self) -> Cow<'_, str> {
        match self {
            Value::Int(i) => Cow::Owned(i.to_string()),
            Value::Str(s) => Cow::Borrowed(s.as_str()),
        }
    }

    /// Compare two values by string form.
    #[must_use]
    pub fn same_as(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            _ => self.as_str() == other.as_str(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{}", i),
            Value::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Str(s.clone())
    }
}

macro_rules! value_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(i: $t) -> Self {
                    Value::Int(i64::from(i))
                }
            }
        )*
    };
}

value_from_int!(i8, i16, i32, i64, u8, u16, u32);

/// Compare two optional values by string form; absent equals only absent.
pub(crate) fn same_param(a: Option<&Value>, b: Option<&Value>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.same_as(b),
        (None, None) => true,
        _ => false,
    }
}

/// Conversion into an optional parameter value.
///
/// Implemented for the scalar types accepted by [`Value`] and for `Option`s of
/// them, so both `params.insert("id", 10)` and `params.insert("id", maybe_id)`
/// work.
pub trait IntoParam {
    /// Convert into a parameter slot; `None` means "absent".
    fn into_param(self) -> Option<Value>;
}

impl IntoParam for Value {
    fn into_param(self) -> Option<Value> {
        Some(self)
    }
}

impl IntoParam for Option<Value> {
    fn into_param(self) -> Option<Value> {
        self
    }
}

macro_rules! into_param {
    ($($t:ty),*) => {
        $(
            impl IntoParam for $t {
                fn into_param(self) -> Option<Value> {
                    Some(Value::from(self))
                }
            }

            impl IntoParam for Option<$t> {
                fn into_param(self) -> Option<Value> {
                    self.map(Value::from)
                }
            }
        )*
    };
}

into_param!(&str, String, &String, i8, i16, i32, i64, u8, u16, u32);

/// Named parameter map: `name → Option<Value>`
///
/// Used both for route defaults at registration time and for the parameters
/// passed to generation.
///
/// # Example
///
/// ```rust
/// use routegen::Params;
///
/// let params = Params::new()
///     .with("controller", "blog")
///     .with("year", 2004)
///     .with_absent("month");
///
/// assert_eq!(params.get("year").map(|v| v.to_string()), Some("2004".to_string()));
/// assert!(params.get("month").is_none());
/// assert!(params.declares("month"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params {
    values: HashMap<String, Option<Value>>,
}

impl Params {
    /// Create an empty parameter map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Params::insert`]
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl IntoParam) -> Self {
        self.insert(name, value);
        self
    }

    /// Builder form of [`Params::insert_absent`]
    #[must_use]
    pub fn with_absent(mut self, name: impl Into<String>) -> Self {
        self.insert_absent(name);
        self
    }

    /// Set a parameter, replacing any previous value
    pub fn insert(&mut self, name: impl Into<String>, value: impl IntoParam) {
        self.values.insert(name.into(), value.into_param());
    }

    /// Declare a parameter with an absent value
    pub fn insert_absent(&mut self, name: impl Into<String>) {
        self.values.insert(name.into(), None);
    }

    /// Get a parameter value; declared-absent and missing both return `None`
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name).and_then(Option::as_ref)
    }

    /// Whether the name is present at all, even with an absent value
    #[must_use]
    pub fn declares(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Iterate over every declared name and its optional value
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    /// Number of declared names
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no names are declared
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Canonical form of the present values, sorted by name.
    ///
    /// Two parameter maps that generate the same path against any table share
    /// the same key: absent values are skipped and values are compared by
    /// string form.
    pub(crate) fn cache_key(&self) -> Vec<(String, String)> {
        let mut key: Vec<(String, String)> = self
            .values
            .iter()
            .filter_map(|(k, v)| v.as_ref().map(|v| (k.clone(), v.to_string())))
            .collect();
        key.sort_unstable();
        key
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: IntoParam,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

/// Explicit requirement patterns, keyed by segment name
///
/// Patterns are regular expression sources. They are anchored when the route
/// is compiled, so `[a-z]+` must match the whole value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Requirements {
    patterns: HashMap<String, String>,
}

impl Requirements {
    /// Create an empty requirement set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Requirements::insert`]
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.insert(name, pattern);
        self
    }

    /// Set the pattern for a name
    pub fn insert(&mut self, name: impl Into<String>, pattern: impl Into<String>) {
        self.patterns.insert(name.into(), pattern.into());
    }

    /// Pattern source for a name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.patterns.get(name).map(String::as_str)
    }

    /// Iterate over `(name, pattern)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.patterns.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Whether no requirements are declared
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Requirements
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut requirements = Requirements::new();
        for (k, v) in iter {
            requirements.insert(k, v);
        }
        requirements
    }
}

/// Build a [`Params`] map inline.
///
/// A literal `None` value declares the name with an absent value.
///
/// ```rust
/// use routegen::params;
///
/// let params = params! {
///     "controller" => "blog",
///     "year" => 2004,
///     "month" => None,
/// };
/// assert_eq!(params.len(), 3);
/// assert!(params.get("month").is_none());
/// ```
#[macro_export]
macro_rules! params {
    (@insert $params:ident;) => {};
    (@insert $params:ident; $name:expr => None $(, $($rest:tt)*)?) => {
        $params.insert_absent($name);
        $( $crate::params!(@insert $params; $($rest)*); )?
    };
    (@insert $params:ident; $name:expr => $value:expr $(, $($rest:tt)*)?) => {
        $params.insert($name, $value);
        $( $crate::params!(@insert $params; $($rest)*); )?
    };
    () => {
        $crate::Params::new()
    };
    ($($body:tt)+) => {{
        let mut params = $crate::Params::new();
        $crate::params!(@insert params; $($body)+);
        params
    }};
}
