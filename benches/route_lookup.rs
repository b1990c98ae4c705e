use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use http::Method;
use routecore::{Router, RouterConfig};
use std::sync::Arc;

/// Build a router with `n` static routes plus a handful of param/wildcard
/// routes, roughly the shape of a mid-sized REST API.
fn build_router(n: usize, config: RouterConfig) -> Router<&'static str> {
    let mut router = Router::with_config(config);
    for i in 0..n {
        let pattern = format!("/api/resource{i}/items");
        router
            .register(Method::GET, &pattern, vec![], Arc::new("static_handler"))
            .unwrap();
    }
    router
        .register(Method::GET, "/users/:id", vec![], Arc::new("get_user"))
        .unwrap();
    router
        .register(
            Method::GET,
            "/users/:id/posts/:post_id",
            vec![],
            Arc::new("get_post"),
        )
        .unwrap();
    router
        .register(Method::GET, "/static/*", vec![], Arc::new("serve_static"))
        .unwrap();
    router
}

fn bench_static_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("static_lookup");
    for n in [10usize, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("indexed", n), &n, |b, &n| {
            let router = build_router(n, RouterConfig::default());
            let path = format!("/api/resource{}/items", n / 2);
            b.iter(|| black_box(router.match_route(Method::GET, black_box(&path)).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("trie_only", n), &n, |b, &n| {
            let router = build_router(
                n,
                RouterConfig {
                    static_index_enabled: false,
                    cache_enabled: false,
                    ..RouterConfig::default()
                },
            );
            let path = format!("/api/resource{}/items", n / 2);
            b.iter(|| black_box(router.match_route(Method::GET, black_box(&path)).unwrap()));
        });
    }
    group.finish();
}

fn bench_param_lookup(c: &mut Criterion) {
    let router = build_router(100, RouterConfig::default());
    c.bench_function("param_lookup", |b| {
        b.iter(|| {
            black_box(
                router
                    .match_route(Method::GET, black_box("/users/123/posts/456"))
                    .unwrap(),
            )
        });
    });
}

fn bench_wildcard_lookup(c: &mut Criterion) {
    let router = build_router(100, RouterConfig::default());
    c.bench_function("wildcard_lookup", |b| {
        b.iter(|| {
            black_box(
                router
                    .match_route(Method::GET, black_box("/static/css/site/main.css"))
                    .unwrap(),
            )
        });
    });
}

fn bench_miss(c: &mut Criterion) {
    let router = build_router(100, RouterConfig::default());
    c.bench_function("not_found", |b| {
        b.iter(|| {
            black_box(
                router
                    .match_route(Method::GET, black_box("/nope/nothing/here"))
                    .unwrap(),
            )
        });
    });
}

criterion_group!(
    benches,
    bench_static_lookup,
    bench_param_lookup,
    bench_wildcard_lookup,
    bench_miss
);
criterion_main!(benches);
