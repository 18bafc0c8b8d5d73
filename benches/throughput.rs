use criterion::{criterion_group, criterion_main, Criterion};
use http::Request;
use nestrouter::handler::{Body, EchoHandler};
use nestrouter::{Route, Router};
use std::collections::HashMap;
use std::hint::black_box;

fn route(name: &str, pattern: &str) -> Route {
    Route::new(name, pattern, EchoHandler::new(name)).expect("valid route")
}

fn zoo_tree() -> Router {
    let health = Router::new("/health", "health")
        .expect("valid router")
        .with_resolver(route("status", "/"));
    let zoo = Router::new("/zoo", "zoo")
        .expect("valid router")
        .with_resolver(route("animals", "/animals"))
        .with_resolver(route("animal", "/animals/{id}"))
        .with_resolver(route("animal_toy", "/animals/{id}/toys/{toy_id}"))
        .with_resolver(route(
            "habitat_section",
            "/{category}/animals/{id}/habitats/{habitat_id}/sections/{section_id}",
        ))
        .with_resolver(health);
    let inventory = Router::new("/inventory", "inventory")
        .expect("valid router")
        .with_resolver(route(
            "item_batch",
            "/{warehouse_id}/feeds/{feed_id}/items/{item_id}/batches/{batch_id}",
        ));
    let complex = Router::new("/complex", "complex")
        .expect("valid router")
        .with_resolver(route("many", "/{a}/{b}/{c}/{d}/{e}/{f}/{g}/{h}/{i}"));

    Router::new("/", "root")
        .expect("valid router")
        .with_resolver(route("home", "/"))
        .with_resolver(zoo)
        .with_resolver(inventory)
        .with_resolver(complex)
}

fn bench_resolve(c: &mut Criterion) {
    let router = zoo_tree();
    let test_paths = [
        "/zoo/animals/123",
        "/zoo/animals/123/toys/456",
        "/zoo/cats/animals/123/habitats/88/sections/5",
        "/inventory/1/feeds/2/items/3/batches/4",
        "/complex/1/2/3/4/5/6/7/8/9",
        "/zoo/health",
        "/nowhere",
    ];
    c.bench_function("resolve", |b| {
        b.iter(|| {
            for path in &test_paths {
                black_box(router.resolve(black_box(path)));
            }
        })
    });
}

fn bench_reverse(c: &mut Criterion) {
    let router = zoo_tree();
    let params: HashMap<String, String> = [("id", "123"), ("toy_id", "456")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    c.bench_function("reverse", |b| {
        b.iter(|| {
            black_box(router.reverse(black_box("zoo:animal_toy"), &params));
            black_box(router.reverse(black_box("zoo:health:status"), &params));
        })
    });
}

fn bench_handle(c: &mut Criterion) {
    let router = zoo_tree();
    c.bench_function("handle", |b| {
        b.iter(|| {
            let request = Request::builder()
                .uri("/zoo/animals/123/toys/456")
                .body(Body::new())
                .expect("valid request");
            black_box(router.handle(request));
        })
    });
}

criterion_group!(benches, bench_resolve, bench_reverse, bench_handle);
criterion_main!(benches);
