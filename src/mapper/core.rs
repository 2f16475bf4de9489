//! Mapper core module - route registration and the generation hot path.

use arc_swap::ArcSwap;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tracing::{debug, info, trace, warn};

use super::cache::{CacheStats, GenerationCache};
use crate::error::CompileError;
use crate::generate::generate_path;
use crate::route::Route;
use crate::runtime_config::MapperConfig;
use crate::value::{Params, Requirements};

/// Generation slower than this is logged at warn level.
const SLOW_GENERATION: Duration = Duration::from_millis(1);

/// Immutable snapshot of the registered routes
///
/// Published through an [`ArcSwap`]; never modified after construction.
struct RouteTable {
    routes: Vec<Arc<Route>>,
    /// Route name → index into `routes`
    names: HashMap<String, usize>,
    cache: Option<GenerationCache>,
}

impl RouteTable {
    fn new(routes: Vec<Arc<Route>>, names: HashMap<String, usize>, cache_size: usize) -> Self {
        Self {
            routes,
            names,
            cache: GenerationCache::new(cache_size),
        }
    }
}

/// Ordered route table that generates paths from named parameters
///
/// Routes are tried in registration order; the first one that accepts the
/// parameters wins, even if a later route would produce a more specific path.
///
/// # Concurrency
///
/// `generate` loads the current table snapshot lock-free and may be called
/// from any number of threads. `connect` serializes writers, builds a new
/// snapshot with the route appended, and swaps it in, so readers never
/// observe a partially registered route.
///
/// # Example
///
/// ```rust
/// use routegen::{params, Mapper, Params, Requirements};
///
/// let mapper = Mapper::new();
/// mapper.connect(
///     "archive/:year/:month/:day",
///     params! { "controller" => "blog", "action" => "view", "month" => None, "day" => None },
///     Requirements::new().with("month", r"\d{1,2}").with("day", r"\d{1,2}"),
/// )?;
/// mapper.connect(":controller/:action/:id", Params::new(), Requirements::new())?;
///
/// assert_eq!(
///     mapper.generate(&params! { "controller" => "blog", "action" => "view", "year" => 2004 }),
///     Some("/archive/2004".to_string())
/// );
/// assert_eq!(
///     mapper.generate(&params! { "controller" => "blog", "action" => "view", "year" => 2004, "month" => "blah" }),
///     Some("/blog/view".to_string())
/// );
/// # Ok::<(), routegen::CompileError>(())
/// ```
pub struct Mapper {
    table: ArcSwap<RouteTable>,
    /// Serializes `connect` calls; readers never take it
    writer: Mutex<()>,
    config: MapperConfig,
}

impl Mapper {
    /// Create an empty mapper with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MapperConfig::default())
    }

    /// Create an empty mapper with the given configuration
    #[must_use]
    pub fn with_config(config: MapperConfig) -> Self {
        Self {
            table: ArcSwap::from_pointee(RouteTable::new(
                Vec::new(),
                HashMap::new(),
                config.cache_size,
            )),
            writer: Mutex::new(()),
            config,
        }
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Compile a template and append it to the table.
    ///
    /// # Arguments
    ///
    /// * `template` - Path template, e.g. `hi/:action` or `*file/hi`
    /// * `defaults` - Declared defaults; names that are not segments become filter keys
    /// * `requirements` - Explicit regex constraints per segment name
    ///
    /// # Errors
    ///
    /// Returns a [`CompileError`] if the template or its requirements are
    /// malformed. The table is left unchanged.
    pub fn connect(
        &self,
        template: &str,
        defaults: Params,
        requirements: Requirements,
    ) -> Result<Arc<Route>, CompileError> {
        self.register(None, template, defaults, requirements)
    }

    /// Like [`Mapper::connect`], also registering the route under a unique name
    /// for [`Mapper::generate_named`].
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::DuplicateRouteName`] if the name is taken, or
    /// any compile error from the template.
    pub fn connect_named(
        &self,
        name: &str,
        template: &str,
        defaults: Params,
        requirements: Requirements,
    ) -> Result<Arc<Route>, CompileError> {
        self.register(Some(name), template, defaults, requirements)
    }

    fn register(
        &self,
        name: Option<&str>,
        template: &str,
        defaults: Params,
        requirements: Requirements,
    ) -> Result<Arc<Route>, CompileError> {
        // The swap is the last step, so a poisoned lock still guards a consistent table
        let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let current = self.table.load_full();

        if let Some(name) = name {
            if current.names.contains_key(name) {
                return Err(CompileError::DuplicateRouteName {
                    name: name.to_string(),
                });
            }
        }

        let order = current.routes.len();
        let mut route = Route::compile(
            template,
            defaults,
            requirements,
            order,
            self.config.compile_options(),
        )
        .map_err(|e| {
            warn!(template = %template, error = %e, "Route registration rejected");
            e
        })?;
        if let Some(name) = name {
            route = route.with_name(name);
        }
        let route = Arc::new(route);

        let mut routes = Vec::with_capacity(order + 1);
        routes.extend(current.routes.iter().cloned());
        routes.push(Arc::clone(&route));
        let mut names = current.names.clone();
        if let Some(name) = name {
            names.insert(name.to_string(), order);
        }

        self.table
            .store(Arc::new(RouteTable::new(routes, names, self.config.cache_size)));

        info!(
            route_order = order,
            route_name = ?name,
            template = %template,
            routes_count = order + 1,
            "Route registered"
        );

        Ok(route)
    }

    /// Generate the path for the first route that accepts the parameters.
    ///
    /// # Returns
    ///
    /// * `Some(path)` - Rendered path of the first accepting route
    /// * `None` - No registered route accepts the parameters
    #[must_use]
    pub fn generate(&self, params: &Params) -> Option<String> {
        let table = self.table.load();
        let start = Instant::now();

        debug!(
            routes_count = table.routes.len(),
            params_count = params.len(),
            "Path generation attempt"
        );

        let key = table.cache.as_ref().map(|_| params.cache_key());
        if let (Some(cache), Some(key)) = (&table.cache, &key) {
            if let Some(hit) = cache.get(key) {
                trace!(path = ?hit, "Generation cache hit");
                return hit;
            }
        }

        let result = table
            .routes
            .iter()
            .find_map(|route| self.try_route(route, params));

        if let (Some(cache), Some(key)) = (&table.cache, key) {
            cache.insert(key, result.clone());
        }

        log_outcome(result.as_deref(), start.elapsed());
        result
    }

    /// Generate a path using only the route registered under `name`.
    ///
    /// Returns `None` if no route has that name or the route rejects the
    /// parameters.
    #[must_use]
    pub fn generate_named(&self, name: &str, params: &Params) -> Option<String> {
        let table = self.table.load();
        let start = Instant::now();

        let Some(route) = table.names.get(name).and_then(|&i| table.routes.get(i)) else {
            warn!(route_name = %name, "No route registered under this name");
            return None;
        };

        let result = self.try_route(route, params);
        log_outcome(result.as_deref(), start.elapsed());
        result
    }

    fn try_route(&self, route: &Route, params: &Params) -> Option<String> {
        match generate_path(route, params, self.config.generate_options()) {
            Ok(path) => {
                debug!(
                    route_order = route.order(),
                    template = %route.template(),
                    path = %path,
                    "Route accepted parameters"
                );
                Some(path)
            }
            Err(rejection) => {
                debug!(
                    route_order = route.order(),
                    template = %route.template(),
                    reason = %rejection,
                    "Route rejected parameters"
                );
                None
            }
        }
    }

    /// Snapshot of the registered routes in registration order
    #[must_use]
    pub fn routes(&self) -> Vec<Arc<Route>> {
        self.table.load().routes.clone()
    }

    /// Route registered under `name`
    #[must_use]
    pub fn route(&self, name: &str) -> Option<Arc<Route>> {
        let table = self.table.load();
        table
            .names
            .get(name)
            .and_then(|&i| table.routes.get(i))
            .cloned()
    }

    /// Number of registered routes
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.load().routes.len()
    }

    /// Whether no routes are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.load().routes.is_empty()
    }

    /// Statistics for the current snapshot's generation cache, if enabled
    #[must_use]
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.table.load().cache.as_ref().map(GenerationCache::stats)
    }

    /// Print all registered routes to stdout
    ///
    /// Useful for debugging and verifying registration order.
    pub fn dump_routes(&self) {
        let table = self.table.load();
        println!("[routes] count={}", table.routes.len());
        for route in &table.routes {
            println!(
                "[route] #{} {} name={} defaults={} requirements={}",
                route.order(),
                route.template(),
                route.name().unwrap_or("-"),
                route.defaults().len(),
                route.requirements().iter().count()
            );
        }
    }
}

impl Default for Mapper {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Mapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.table.load();
        f.debug_struct("Mapper")
            .field("routes", &table.routes)
            .field("config", &self.config)
            .finish()
    }
}

fn log_outcome(path: Option<&str>, elapsed: Duration) {
    if elapsed > SLOW_GENERATION {
        warn!(
            path = ?path,
            duration_us = elapsed.as_micros(),
            "Slow path generation detected"
        );
    } else if path.is_none() {
        debug!(duration_us = elapsed.as_micros(), "No route generated a path");
    }
}
