//! # routegen
//!
//! **routegen** builds URL paths from named parameters using an ordered table
//! of route templates. It is the reverse of a router: instead of matching a
//! path to find parameters, it takes parameters and finds the first route that
//! can express them.
//!
//! ## Overview
//!
//! Routes are registered in order as templates such as `archive/:year/:month/:day`,
//! together with default values and per-segment regex requirements. Generation
//! walks the table and returns the path produced by the first route that accepts
//! the parameters.
//!
//! ## Architecture
//!
//! - **[`route`]** - Template compilation into literal, dynamic and glob segments
//! - **[`generate`]** - Per-route resolution (filters, requirements, minimization) and rendering
//! - **[`mapper`]** - The ordered route table, named routes and the generation cache
//! - **[`value`]** - Parameter values, parameter maps and requirement sets
//! - **[`runtime_config`]** - Environment-driven [`MapperConfig`]
//! - **[`error`]** - Route registration errors
//!
//! ### Generation Flow
//!
//! ```text
//! generate(params)
//!   │
//!   ├── cache hit? ──► cached path (or cached "no route")
//!   │
//!   └── for route in table (registration order)
//!         ├── filter keys match their defaults?
//!         ├── every segment value satisfies its requirement?
//!         ├── trim trailing optional segments (minimization)
//!         ├── every kept dynamic segment has a value?
//!         └── render ──► "/archive/2004"
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use routegen::{params, Mapper, Params, Requirements};
//!
//! let mapper = Mapper::new();
//! mapper.connect(
//!     "archive/:year/:month/:day",
//!     params! { "controller" => "blog", "action" => "view", "month" => None, "day" => None },
//!     Requirements::new().with("month", r"\d{1,2}").with("day", r"\d{1,2}"),
//! )?;
//! mapper.connect(":controller/:action/:id", Params::new(), Requirements::new())?;
//!
//! // Trailing segments equal to their defaults are dropped
//! assert_eq!(
//!     mapper.generate(&params! { "controller" => "blog", "action" => "view", "year" => 2004 }),
//!     Some("/archive/2004".to_string())
//! );
//!
//! // The implicit `action` default ("index") is dropped too
//! assert_eq!(
//!     mapper.generate(&params! { "controller" => "content" }),
//!     Some("/content".to_string())
//! );
//!
//! // Values are URL-encoded, with spaces as `+`
//! assert_eq!(
//!     mapper.generate(&params! { "controller" => "content", "action" => "list people" }),
//!     Some("/content/list+people".to_string())
//! );
//! # Ok::<(), routegen::CompileError>(())
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events and never installs a subscriber. Route
//! registration logs at `info`, per-route rejections at `debug`, cache hits at
//! `trace` and slow generations at `warn`.

pub mod error;
pub mod generate;
pub mod mapper;
pub mod route;
pub mod runtime_config;
pub mod value;

pub use error::CompileError;
pub use generate::Rejection;
pub use mapper::{CacheStats, Mapper};
pub use route::Route;
pub use runtime_config::MapperConfig;
pub use value::{IntoParam, Params, Requirements, Value};
