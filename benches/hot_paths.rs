use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dot_map::map::{project, sample, GridSpec, PreparedGeometry};
use dot_map::{Atlas, BoundaryFeature, DotMap, GridLayout, LngLat, MapOptions, ProjectionWindow, DEFAULT_WORLD_REGION};

fn bench_projection(c: &mut Criterion) {
    c.bench_function("project", |b| {
        b.iter(|| project(black_box(LngLat::new(-0.1, 51.5))))
    });
}

fn bench_prepare(c: &mut Criterion) {
    let atlas = Atlas::world().unwrap();
    let features: Vec<&BoundaryFeature> = atlas.features().iter().collect();
    c.bench_function("prepare world", |b| {
        b.iter(|| PreparedGeometry::prepare(black_box(&features)))
    });
}

fn bench_containment(c: &mut Criterion) {
    let atlas = Atlas::world().unwrap();
    let features: Vec<&BoundaryFeature> = atlas.features().iter().collect();
    let geometry = PreparedGeometry::prepare(&features);
    let inside = project(LngLat::new(-100.0, 40.0));
    let outside = project(LngLat::new(-40.0, 30.0));

    c.bench_function("contains land", |b| b.iter(|| geometry.contains(black_box(inside))));
    c.bench_function("contains ocean", |b| b.iter(|| geometry.contains(black_box(outside))));
}

fn bench_sampling(c: &mut Criterion) {
    let atlas = Atlas::world().unwrap();
    let features: Vec<&BoundaryFeature> = atlas.features().iter().collect();
    let geometry = PreparedGeometry::prepare(&features);
    let window = ProjectionWindow::from_region(&DEFAULT_WORLD_REGION);
    let spec = GridSpec {
        width: 200.0,
        height: 100.0,
        rows: 55,
        columns: 110,
        radius: 0.3,
        layout: GridLayout::Vertical,
    };

    c.bench_function("sample world 55x110", |b| {
        b.iter(|| sample(black_box(&spec), &window, &geometry).unwrap())
    });
}

fn bench_create_map(c: &mut Criterion) {
    let options = MapOptions::new(200.0, 100.0);

    let cached = DotMap::world().unwrap();
    c.bench_function("create_map cached", |b| {
        b.iter(|| cached.create_map(black_box(&options)).unwrap())
    });

    let uncached = DotMap::world().unwrap().without_result_cache();
    c.bench_function("create_map uncached", |b| {
        b.iter(|| uncached.create_map(black_box(&options)).unwrap())
    });
}

criterion_group!(
    benches,
    bench_projection,
    bench_prepare,
    bench_containment,
    bench_sampling,
    bench_create_map
);
criterion_main!(benches);
