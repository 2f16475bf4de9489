//! # Runtime Configuration Module
//!
//! Environment variable-based configuration for the [`Mapper`](crate::Mapper).
//!
//! ## Environment Variables
//!
//! ### `ROUTEGEN_MINIMIZATION`
//!
//! Drop trailing optional segments whose value equals their default.
//! Accepts `true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off`. Default: `true`.
//!
//! ### `ROUTEGEN_EXPLICIT`
//!
//! Disable the implicit defaults for `action` (`"index"`) and `id` (absent).
//! Default: `false`.
//!
//! ### `ROUTEGEN_APPEND_SLASH`
//!
//! Append `/` to every generated path except the root. Default: `false`.
//!
//! ### `ROUTEGEN_CACHE_SIZE`
//!
//! Capacity of the per-table generation cache. Accepts decimal (`1000`) or
//! hexadecimal (`0x400`). `0` disables caching. Default: `1000`.
//!
//! Unparseable values fall back to the default.
//!
//! ## Usage
//!
//! ```rust
//! use routegen::runtime_config::MapperConfig;
//! use routegen::Mapper;
//!
//! let mapper = Mapper::with_config(MapperConfig::from_env());
//! assert!(mapper.is_empty());
//! ```
//!
//! `MapperConfig` also implements `Deserialize` with per-field defaults, so it
//! can be embedded in an application's own configuration file.

use serde::Deserialize;
use std::env;

use crate::generate::GenerateOptions;
use crate::route::CompileOptions;

/// Default generation cache capacity
pub const DEFAULT_CACHE_SIZE: usize = 1000;

/// Mapper configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Drop trailing optional segments whose value equals their default (default: true)
    pub minimization: bool,
    /// Disable implicit `action`/`id` defaults (default: false)
    pub explicit: bool,
    /// Append `/` to non-root paths (default: false)
    pub append_slash: bool,
    /// Generation cache capacity; 0 disables the cache (default: 1000)
    pub cache_size: usize,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            minimization: true,
            explicit: false,
            append_slash: false,
            cache_size: DEFAULT_CACHE_SIZE,
        }
    }
}

impl MapperConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        MapperConfig {
            minimization: env_flag("ROUTEGEN_MINIMIZATION").unwrap_or(defaults.minimization),
            explicit: env_flag("ROUTEGEN_EXPLICIT").unwrap_or(defaults.explicit),
            append_slash: env_flag("ROUTEGEN_APPEND_SLASH").unwrap_or(defaults.append_slash),
            cache_size: env_size("ROUTEGEN_CACHE_SIZE").unwrap_or(defaults.cache_size),
        }
    }

    pub(crate) fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            explicit: self.explicit,
        }
    }

    pub(crate) fn generate_options(&self) -> GenerateOptions {
        GenerateOptions {
            minimization: self.minimization,
            append_slash: self.append_slash,
        }
    }
}

fn env_flag(key: &str) -> Option<bool> {
    let val = env::var(key).ok()?;
    match val.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn env_size(key: &str) -> Option<usize> {
    let val = env::var(key).ok()?;
    let val = val.trim();
    if let Some(hex) = val.strip_prefix("0x") {
        usize::from_str_radix(hex, 16).ok()
    } else {
        val.parse().ok()
    }
}
