#![allow(clippy::unwrap_used, clippy::expect_used)]

use routegen::{params, CompileError, Mapper, MapperConfig, Params, Requirements};
use std::sync::Arc;
use std::thread;

mod common;

fn standard_mapper() -> Mapper {
    common::logging::init();
    let m = Mapper::new();
    m.connect(
        "archive/:year/:month/:day",
        params! { "controller" => "blog", "action" => "view", "month" => None, "day" => None },
        Requirements::new()
            .with("month", r"\d{1,2}")
            .with("day", r"\d{1,2}"),
    )
    .unwrap();
    m.connect(":controller/:action/:id", Params::new(), Requirements::new())
        .unwrap();
    m
}

#[test]
fn test_generation_is_deterministic() {
    let m = standard_mapper();
    let p = params! { "controller" => "blog", "action" => "view", "year" => 2004, "month" => 6 };
    let first = m.generate(&p);
    for _ in 0..10 {
        assert_eq!(m.generate(&p), first);
    }
    assert_eq!(first.as_deref(), Some("/archive/2004/6"));
}

#[test]
fn test_literal_route_ignores_parameters() {
    let m = Mapper::new();
    m.connect("hello/world", Params::new(), Requirements::new())
        .unwrap();
    let inputs = [
        params! {},
        params! { "controller" => "content" },
        params! { "a" => 1, "b" => "two words", "c" => None },
    ];
    for p in &inputs {
        assert_eq!(m.generate(p).as_deref(), Some("/hello/world"));
    }
}

#[test]
fn test_generated_paths_are_rooted() {
    let m = standard_mapper();
    let inputs = [
        params! { "controller" => "blog", "action" => "view", "year" => 1999 },
        params! { "controller" => "content" },
        params! { "controller" => "admin/user", "action" => "edit", "id" => 10 },
        params! { "controller" => "a b", "action" => "c&d" },
    ];
    for p in &inputs {
        let path = m.generate(p).unwrap();
        assert!(path.starts_with('/'), "path {:?} is not rooted", path);
        assert!(!path.contains("//"), "path {:?} has an empty component", path);
        assert!(!path.contains(' '), "path {:?} contains a raw space", path);
    }
}

#[test]
fn test_later_route_never_shadows_earlier() {
    let m = Mapper::new();
    m.connect(":controller/:action/:id", Params::new(), Requirements::new())
        .unwrap();
    // More specific, but registered later
    m.connect(
        "archive/:year",
        params! { "controller" => "blog", "action" => "view" },
        Requirements::new(),
    )
    .unwrap();

    assert_eq!(
        m.generate(&params! { "controller" => "blog", "action" => "view", "id" => 2004 })
            .as_deref(),
        Some("/blog/view/2004")
    );
    assert_eq!(
        m.generate(&params! { "controller" => "blog", "action" => "view", "year" => 2004 })
            .as_deref(),
        Some("/blog/view")
    );
}

#[test]
fn test_explicit_absent_equals_omitted() {
    let m = standard_mapper();
    let omitted = params! { "controller" => "blog", "action" => "view", "year" => 2004 };
    let absent = params! {
        "controller" => "blog",
        "action" => "view",
        "year" => 2004,
        "month" => None,
        "day" => None,
    };
    assert_eq!(m.generate(&omitted), m.generate(&absent));
}

#[test]
fn test_int_and_string_values_equivalent() {
    let m = standard_mapper();
    assert_eq!(
        m.generate(&params! { "controller" => "blog", "action" => "view", "year" => 2004 }),
        m.generate(&params! { "controller" => "blog", "action" => "view", "year" => "2004" }),
    );
}

#[test]
fn test_compile_errors() {
    let m = Mapper::new();
    let cases: Vec<(&str, Requirements)> = vec![
        ("hi/:", Requirements::new()),
        ("hi/:a-b", Requirements::new()),
        (":x/:x", Requirements::new()),
        ("*a/*b", Requirements::new()),
        ("*a/:b", Requirements::new()),
        ("hi/:x", Requirements::new().with("y", "[a-z]+")),
        ("hi/:x", Requirements::new().with("x", "[")),
    ];
    for (template, requirements) in cases {
        let result = m.connect(template, Params::new(), requirements);
        assert!(result.is_err(), "template {:?} should not compile", template);
    }
    assert!(m.is_empty());

    assert!(matches!(
        m.connect("*a/:b", Params::new(), Requirements::new()),
        Err(CompileError::GlobBeforeDynamic { .. })
    ));
}

#[test]
fn test_params_from_json() {
    let m = standard_mapper();
    let p: Params =
        serde_json::from_str(r#"{"controller":"blog","action":"view","year":2004,"month":null}"#)
            .unwrap();
    assert_eq!(m.generate(&p).as_deref(), Some("/archive/2004"));
}

#[test]
fn test_config_from_json() {
    let config: MapperConfig =
        serde_json::from_str(r#"{"append_slash": true, "cache_size": 16}"#).unwrap();
    let m = Mapper::with_config(config);
    m.connect("hi/:fred", Params::new(), Requirements::new())
        .unwrap();
    assert_eq!(m.generate(&params! { "fred" => "x" }).as_deref(), Some("/hi/x/"));
    assert_eq!(m.cache_stats().unwrap().capacity, 16);
}

#[test]
fn test_concurrent_generation() {
    let m = Arc::new(standard_mapper());
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let m = Arc::clone(&m);
            thread::spawn(move || {
                for i in 0..500 {
                    let year = 2000 + (t * 500 + i) % 20;
                    let p = params! { "controller" => "blog", "action" => "view", "year" => year };
                    assert_eq!(m.generate(&p), Some(format!("/archive/{}", year)));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_connect_during_generation() {
    let m = Arc::new(Mapper::new());
    m.connect(":controller/:action/:id", Params::new(), Requirements::new())
        .unwrap();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let m = Arc::clone(&m);
            thread::spawn(move || {
                for _ in 0..1000 {
                    // Later routes never change the answer for an earlier one
                    assert_eq!(
                        m.generate(&params! { "controller" => "content", "action" => "show", "id" => 1 })
                            .as_deref(),
                        Some("/content/show/1")
                    );
                }
            })
        })
        .collect();

    let writer = {
        let m = Arc::clone(&m);
        thread::spawn(move || {
            for i in 0..100 {
                m.connect(
                    &format!("static{}", i),
                    params! { "controller" => format!("static{}", i) },
                    Requirements::new(),
                )
                .unwrap();
            }
        })
    };

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }

    assert_eq!(m.len(), 101);
    let orders: Vec<usize> = m.routes().iter().map(|r| r.order()).collect();
    assert_eq!(orders, (0..101).collect::<Vec<_>>());
}

#[test]
fn test_concurrent_named_registration() {
    let m = Arc::new(Mapper::new());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let m = Arc::clone(&m);
            thread::spawn(move || {
                m.connect_named("home", "", Params::new(), Requirements::new())
                    .is_ok()
            })
        })
        .collect();
    let successes = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();
    assert_eq!(successes, 1);
    assert_eq!(m.len(), 1);
}
