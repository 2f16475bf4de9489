// Performance-focused tests for generation over large route tables
//
// Generation is a linear scan in registration order, so these bounds are
// loose; they catch accidental quadratic behavior, not micro-regressions.

use super::Mapper;
use crate::params;
use crate::runtime_config::MapperConfig;
use crate::value::{Params, Requirements};
use std::time::Instant;

fn mapper_with_routes(count: usize, config: MapperConfig) -> Mapper {
    let m = Mapper::with_config(config);
    for i in 0..count {
        m.connect(
            &format!("api/v1/resource{}/:id", i),
            params! { "controller" => format!("resource{}", i), "action" => "show" },
            Requirements::new().with("id", r"\d+"),
        )
        .unwrap();
    }
    m.connect(":controller/:action/:id", Params::new(), Requirements::new())
        .unwrap();
    m
}

#[test]
fn test_generation_performance_with_many_routes() {
    let m = mapper_with_routes(
        500,
        MapperConfig {
            cache_size: 0,
            ..MapperConfig::default()
        },
    );
    let p = params! { "controller" => "resource250", "action" => "show", "id" => 123 };

    let start = Instant::now();
    for _ in 0..100 {
        assert_eq!(m.generate(&p).as_deref(), Some("/api/v1/resource250/123"));
    }
    let duration = start.elapsed();

    // Filter keys reject most routes before any regex runs
    assert!(
        duration.as_millis() < 500,
        "Generation performance degraded: {}ms for 100 generations with 500 routes",
        duration.as_millis()
    );
}

#[test]
fn test_cached_generation_performance() {
    let m = mapper_with_routes(500, MapperConfig::default());
    let p = params! { "controller" => "resource499", "action" => "show", "id" => 7 };
    assert_eq!(m.generate(&p).as_deref(), Some("/api/v1/resource499/7"));

    let start = Instant::now();
    for _ in 0..10_000 {
        assert!(m.generate(&p).is_some());
    }
    let duration = start.elapsed();

    let stats = m.cache_stats().unwrap();
    assert_eq!(stats.hits, 10_000);
    assert!(
        duration.as_millis() < 1000,
        "Cached generation degraded: {}ms for 10000 generations",
        duration.as_millis()
    );
}

#[test]
fn test_fallthrough_to_last_route() {
    let m = mapper_with_routes(200, MapperConfig::default());
    assert_eq!(
        m.generate(&params! { "controller" => "admin/user", "action" => "edit", "id" => 10 })
            .as_deref(),
        Some("/admin/user/edit/10")
    );
}

#[test]
fn test_registration_scales() {
    let start = Instant::now();
    let m = mapper_with_routes(1000, MapperConfig::default());
    let duration = start.elapsed();

    assert_eq!(m.len(), 1001);
    assert!(
        duration.as_secs() < 5,
        "Registering 1000 routes took {}ms",
        duration.as_millis()
    );
}
