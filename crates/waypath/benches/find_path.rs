use criterion::{black_box, criterion_group, criterion_main, Criterion};
use waypath::{
    Contour, GreedyPathBuilder, NavConfig, NavigationEngine, PathQuery, PolygonRegion, Vec2,
};

// Square room with a grid of pillars punched out as holes.
fn pillar_room(pillars: usize, size: f32) -> PolygonRegion {
    let mut region = PolygonRegion::new(Contour::rect(Vec2::new(0.0, 0.0), Vec2::new(size, size)))
        .expect("outer");
    let step = size / (pillars as f32 + 1.0);
    for y in 1..=pillars {
        for x in 1..=pillars {
            let c = Vec2::new(x as f32 * step, y as f32 * step);
            let h = step * 0.2;
            region = region
                .with_hole(Contour::rect(c - Vec2::new(h, h), c + Vec2::new(h, h)))
                .expect("pillar");
        }
    }
    region
}

fn bench_find_path(c: &mut Criterion) {
    let region = pillar_room(3, 40.0);
    let nav = NavigationEngine::new(&region, NavConfig::default()).expect("engine");
    let start = Vec2::new(1.0, 1.0);
    let goal = Vec2::new(39.0, 39.0);

    let mut group = c.benchmark_group("waypath/find_path");

    group.bench_function("pillar_room_diagonal", |b| {
        b.iter(|| {
            let path = nav.find_path(black_box(start), black_box(goal));
            black_box(path.points.len());
        })
    });

    group.bench_function("pillar_room_direct", |b| {
        b.iter(|| {
            let path = nav.find_path(black_box(start), black_box(Vec2::new(1.0, 39.0)));
            black_box(path.points.len());
        })
    });

    let builder = GreedyPathBuilder::new(&region, nav.config());
    group.bench_function("greedy_only", |b| {
        b.iter(|| {
            let outcome = builder.build(PathQuery::new(black_box(start), black_box(goal)));
            black_box(outcome.rounds);
        })
    });

    group.finish();
}

criterion_group!(benches, bench_find_path);
criterion_main!(benches);
