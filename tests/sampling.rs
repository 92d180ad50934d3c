use dot_map::map::{contains, project, PreparedGeometry};
use dot_map::{DotMap, GridLayout, LngLat, MapError, MapOptions, Marker, Point, Region, DEFAULT_WORLD_REGION};

fn world() -> DotMap {
    DotMap::world().unwrap()
}

fn count(engine: &DotMap, options: &MapOptions) -> usize {
    engine.create_map(options).unwrap().points().len()
}

#[test]
fn test_world_small_nation_and_unknown_code() {
    let engine = world();
    let base = MapOptions::new(200.0, 100.0);

    let world_count = count(&engine, &base);
    let fiji = count(&engine, &base.clone().countries(["FJI"]));
    let unknown = count(&engine, &base.clone().countries(["ZZZZZ"]));

    assert!(world_count > 0);
    assert!(fiji > 0);
    assert!(fiji < world_count);
    assert_eq!(unknown, 0);
}

#[test]
fn test_superset_never_loses_points() {
    let engine = world();
    let base = MapOptions::new(200.0, 100.0).region(DEFAULT_WORLD_REGION);

    let usa = engine.create_map(&base.clone().countries(["USA"])).unwrap();
    let both = engine.create_map(&base.clone().countries(["USA", "CAN"])).unwrap();

    assert!(both.points().len() > usa.points().len());
    for p in usa.points() {
        assert!(both.points().contains(p), "{p:?} missing from USA+CAN");
    }
}

#[test]
fn test_selection_order_does_not_matter() {
    let engine = world();
    let a = engine
        .create_map(&MapOptions::new(200.0, 100.0).countries(["USA", "CAN"]))
        .unwrap();
    let b = engine
        .create_map(&MapOptions::new(200.0, 100.0).countries(["CAN", "USA"]))
        .unwrap();
    assert_eq!(a.points(), b.points());
    assert_eq!(engine.cache_stats().results.hits, 1);
}

#[test]
fn test_points_stay_inside_margins() {
    let engine = world();
    for options in [
        MapOptions::new(200.0, 100.0),
        MapOptions::new(200.0, 100.0).radius(1.0).grid(GridLayout::Diagonal),
        MapOptions::new(150.0, 75.0).countries(["JPN"]),
    ] {
        let map = engine.create_map(&options).unwrap();
        let margin = options.radius * 1.25;
        assert!(!map.points().is_empty());
        for p in map.points() {
            assert!(p.x >= margin - 1e-9 && p.x <= map.width() - margin + 1e-9, "{p:?}");
            assert!(p.y >= margin - 1e-9 && p.y <= map.height() - margin + 1e-9, "{p:?}");
        }
    }
}

#[test]
fn test_density_scaling() {
    let engine = world();
    let mut last = 0;
    for samples in [500, 1000, 2000, 3000, 6000, 10000] {
        let n = count(&engine, &MapOptions::new(200.0, 100.0).samples(samples));
        assert!(n >= last, "{samples} samples gave {n} < {last}");
        last = n;
    }
}

#[test]
fn test_cache_never_changes_results() {
    let cached = world();
    let uncached = world().without_result_cache();

    for options in [
        MapOptions::new(200.0, 100.0),
        MapOptions::new(200.0, 100.0).countries(["USA", "CAN"]),
        MapOptions::new(200.0, 100.0).grid(GridLayout::Diagonal),
    ] {
        let first = cached.create_map(&options).unwrap();
        let second = cached.create_map(&options).unwrap();
        let fresh = uncached.create_map(&options).unwrap();
        assert_eq!(first.points(), second.points());
        assert_eq!(first.points(), fresh.points());
        assert_eq!(first.window(), fresh.window());
    }
}

#[test]
fn test_every_key_field_changes_the_result() {
    let engine = world().with_result_capacity(8);
    let base = MapOptions::new(200.0, 100.0);
    let baseline = engine.create_map(&base).unwrap().points().to_vec();

    let variants = [
        MapOptions::new(100.0, 50.0),
        base.clone().samples(3000),
        base.clone().radius(1.0),
        base.clone().grid(GridLayout::Diagonal),
        base.clone().countries(["USA"]),
        base.clone().region(Region::new(25.0, 50.0, -130.0, -60.0)),
    ];
    for options in &variants {
        let points = engine.create_map(options).unwrap().points().to_vec();
        assert_ne!(points, baseline, "{options:?}");
    }
    // the baseline is still cached
    let again = engine.create_map(&base).unwrap();
    assert_eq!(again.points(), &baseline[..]);
}

#[test]
fn test_derived_width() {
    let engine = world();
    let map = engine.create_map(&MapOptions::new(0.0, 100.0)).unwrap();
    let expected = (100.0 * map.window().aspect()).round();
    assert_eq!(map.width(), expected);
    assert!(!map.points().is_empty());

    let map = engine.create_map(&MapOptions::new(200.0, 0.0)).unwrap();
    assert_eq!(map.height(), (200.0 / map.window().aspect()).round());
}

#[test]
fn test_polar_region_is_clamped() {
    let engine = world();
    let map = engine
        .create_map(&MapOptions::new(200.0, 100.0).region(Region::new(-90.0, 90.0, -180.0, 180.0)))
        .unwrap();
    assert!(map.window().y_range.is_finite());
    assert!(!map.points().is_empty());
}

#[test]
fn test_degenerate_requests_fail() {
    let engine = world();
    assert!(matches!(
        engine.create_map(&MapOptions::new(0.0, 0.0)),
        Err(MapError::DegenerateCanvas { .. })
    ));
    // a single sample cannot make two rows
    assert!(matches!(
        engine.create_map(&MapOptions::new(200.0, 100.0).samples(1)),
        Err(MapError::DegenerateGrid { .. })
    ));
}

#[test]
fn test_markers_follow_geography() {
    let engine = world();
    let map = engine.create_map(&MapOptions::new(200.0, 100.0)).unwrap();
    let placed = map.place_markers(&[
        Marker::with_data(40.7, -74.0, "New York"),
        Marker::with_data(51.5, -0.1, "London"),
        Marker::with_data(-33.9, 18.4, "Cape Town").size(2.0),
    ]);

    let [ny, london, cape] = &placed[..] else {
        panic!("expected three markers");
    };
    assert!(ny.x < london.x);
    assert!(london.y < cape.y);
    assert_eq!(cape.data, "Cape Town");
    assert_eq!(cape.size, Some(2.0));

    // snapping moves a marker by at most half a grid step on each axis
    let raw = map.project(51.5, -0.1);
    let grid = map.grid();
    let step_x = (grid.width - 2.0 * grid.radius * 1.25) / (grid.columns - 1) as f64;
    let step_y = (grid.height - 2.0 * grid.radius * 1.25) / (grid.rows - 1) as f64;
    assert!((raw.x - london.x).abs() <= step_x / 2.0 + 1e-9);
    assert!((raw.y - london.y).abs() <= step_y / 2.0 + 1e-9);
}

#[test]
fn test_marker_off_canvas_is_clamped() {
    let engine = world();
    let map = engine
        .create_map(&MapOptions::new(200.0, 100.0).region(Region::new(25.0, 50.0, -130.0, -60.0)))
        .unwrap();
    let placed = map.place_markers(&[Marker::new(-33.9, 151.2)]);
    let p = Point::new(placed[0].x, placed[0].y);
    assert!(p.x >= 0.0 && p.x <= map.width());
    assert!(p.y >= 0.0 && p.y <= map.height());
}

#[test]
fn test_lesotho_is_a_hole_in_south_africa() {
    let engine = world();
    let maseru = project(LngLat::new(28.2, -29.6));
    let durban = project(LngLat::new(30.5, -29.0));

    let zaf = engine.prepared_geometry(&["ZAF"]).unwrap();
    assert!(!contains(maseru, &zaf));
    assert!(contains(durban, &zaf));

    let lso = PreparedGeometry::prepare(&engine.atlas().select(&["LSO"]));
    assert!(contains(maseru, &lso));

    let both = engine.prepared_geometry(&["LSO", "ZAF"]).unwrap();
    assert!(contains(maseru, &both));
    assert!(contains(durban, &both));
}

#[test]
fn test_prepared_geometry_reused() {
    let engine = world();
    engine.create_map(&MapOptions::new(200.0, 100.0)).unwrap();
    engine.create_map(&MapOptions::new(201.0, 100.0)).unwrap();
    let stats = engine.cache_stats();
    assert_eq!(stats.prepared.misses, 1);
    assert_eq!(stats.prepared.hits, 1);
    assert_eq!(stats.results.misses, 2);
}

#[test]
fn test_shared_between_threads() {
    let engine = world().with_result_capacity(4);
    let options = MapOptions::new(120.0, 60.0).countries(["BRA"]);
    let expected = world().create_map(&options).unwrap().points().to_vec();

    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                let map = engine.create_map(&options).unwrap();
                assert_eq!(map.points(), &expected[..]);
            });
        }
    });
    let stats = engine.cache_stats();
    assert_eq!(stats.results.misses, 1);
    assert_eq!(stats.results.hits, 3);
}
