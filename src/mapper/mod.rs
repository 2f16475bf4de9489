//! # Mapper Module
//!
//! The mapper owns the ordered route table and answers the question "which
//! path does this parameter set produce?".
//!
//! ## Overview
//!
//! - Routes are appended with [`Mapper::connect`] and tried in registration order
//! - [`Mapper::generate`] returns the path of the first route that accepts the
//!   parameters, or `None`
//! - Named routes can be targeted directly with [`Mapper::generate_named`]
//!
//! ## Architecture
//!
//! The table is an immutable snapshot behind an `ArcSwap`. Generation loads the
//! snapshot without locking; registration builds a new snapshot and swaps it in.
//! Each snapshot carries its own LRU generation cache, keyed on the canonical
//! form of the parameters, so a cached path is always one the current table
//! would produce.
//!
//! ## Performance
//!
//! - Lock-free snapshot loads on the generation path
//! - Segment values resolved into a stack-allocated `SmallVec`
//! - Repeated parameter sets served from the cache

mod cache;
mod core;
#[cfg(test)]
mod performance_tests;

pub use self::cache::CacheStats;
pub use self::core::Mapper;
