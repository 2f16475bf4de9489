//! # Generate Module
//!
//! Path generation for a single route: the [`resolver`] decides whether the
//! route accepts a parameter set and which segments survive minimization, and
//! the [`render`] step encodes the result into a path.
//!
//! ## Flow
//!
//! ```text
//! Params ──► resolve(route) ──► Resolved ──► render() ──► "/archive/2004"
//!                 │
//!                 └──► Rejection (filter mismatch, requirement, missing value)
//! ```
//!
//! ## Minimization
//!
//! Trailing optional segments whose value is missing or equal to their default
//! are dropped, right to left, until a segment that must render is found. A
//! three-level `archive/:year/:month/:day` route with absent month/day
//! defaults therefore renders `/archive/2004` when only the year is given.
//!
//! ## Example
//!
//! ```rust
//! use routegen::generate::{generate_path, GenerateOptions};
//! use routegen::route::{CompileOptions, Route};
//! use routegen::{params, Params, Requirements};
//!
//! let route = Route::compile(
//!     "hi/:action",
//!     Params::new(),
//!     Requirements::new(),
//!     0,
//!     CompileOptions::default(),
//! )?;
//!
//! let opts = GenerateOptions::default();
//! assert_eq!(generate_path(&route, &params! {}, opts).ok(), Some("/hi".to_string()));
//! assert_eq!(
//!     generate_path(&route, &params! { "action" => "list people" }, opts).ok(),
//!     Some("/hi/list+people".to_string())
//! );
//! # Ok::<(), routegen::CompileError>(())
//! ```

pub mod render;
pub mod resolver;

pub use render::render;
pub use resolver::{resolve, Rejection, Resolved};

use crate::route::Route;
use crate::value::Params;

/// Options that affect resolution and rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Drop trailing optional segments whose value equals their default.
    /// When disabled, only trailing optional segments with no value are dropped.
    pub minimization: bool,
    /// Append `/` to every non-root path
    pub append_slash: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            minimization: true,
            append_slash: false,
        }
    }
}

/// Resolve and render one route.
///
/// # Errors
///
/// Returns the [`Rejection`] if the route does not accept the parameters.
pub fn generate_path(
    route: &Route,
    params: &Params,
    options: GenerateOptions,
) -> Result<String, Rejection> {
    resolve(route, params, options).map(|resolved| render(&resolved, options))
}
