//! # Route Module
//!
//! Template compilation: turns a raw path template into an immutable [`Route`].
//!
//! ## Template Syntax
//!
//! A template is split on `/`. Each non-empty token is classified:
//!
//! - `:name` - a **dynamic** segment filled by one path component
//! - `*name` - a **glob** segment consuming the rest of the path (`a/b/c`)
//! - anything else - **literal** text, copied verbatim
//!
//! Consecutive literal tokens are merged into a single literal run, so
//! `hello/world/:name` compiles to `[Literal("hello/world"), Dynamic(name)]`.
//!
//! ## Defaults and Requirements
//!
//! Declared defaults mark the matching segment optional. Defaults whose name is
//! not a segment become **filter keys**: they never render, but a caller value
//! that differs from them rejects the route during generation.
//!
//! Unless compiled with [`CompileOptions::explicit`], two names carry implicit
//! defaults: `action` defaults to `"index"` and `id` defaults to absent.
//!
//! Requirements are anchored regexes. Segments without one get a derived
//! requirement: one path component for dynamic segments, slash-delimited
//! components for `controller`, anything for globs.
//!
//! ## Example
//!
//! ```rust
//! use routegen::route::{CompileOptions, Route, Segment};
//! use routegen::{Params, Requirements};
//!
//! let route = Route::compile(
//!     "archive/:year/:month/:day",
//!     Params::new().with("controller", "blog").with_absent("month").with_absent("day"),
//!     Requirements::new().with("month", r"\d{1,2}").with("day", r"\d{1,2}"),
//!     0,
//!     CompileOptions::default(),
//! )?;
//!
//! assert_eq!(route.segments().len(), 4);
//! assert!(matches!(route.segments()[0], Segment::Literal(ref t) if t == "archive"));
//! assert_eq!(route.filter_keys().len(), 1);
//! # Ok::<(), routegen::CompileError>(())
//! ```

mod compile;
mod segment;

pub use compile::{CompileOptions, Route};
pub use segment::{Placeholder, Requirement, Segment};
