use log::{debug, trace};
use std::sync::Arc;

use crate::cache::{BoundedCache, CacheStats, FeatureSetKey, MapKey};
use crate::data::{Atlas, BoundaryFeature};
use crate::error::{MapError, Result};
use crate::geo::{LngLat, Region, DEFAULT_WORLD_REGION};
use crate::hash::fingerprint;
use crate::map::{project, sample, GridLayout, GridSpec, Point, PreparedGeometry, ProjectionWindow};
use crate::marker::{Marker, PlacedMarker};
use crate::options::MapOptions;

/// Grid request with an explicit row and column count
#[derive(Clone, Debug, PartialEq)]
pub struct GridRequest {
    /// Zero derives the width from `height` and the projection aspect
    pub width: f64,
    /// Zero derives the height from `width` and the projection aspect
    pub height: f64,
    pub countries: Vec<String>,
    pub region: Option<Region>,
    pub rows: usize,
    pub columns: usize,
    pub radius: f64,
    pub layout: GridLayout,
}

/// Sampled points plus everything needed to place other coordinates on the same canvas
#[derive(Clone, Debug, PartialEq)]
pub struct MapPoints {
    pub points: Vec<Point>,
    pub window: ProjectionWindow,
    /// Resolved canvas size, grid resolution, radius and layout
    pub grid: GridSpec,
}

/// Hit/miss counters of both engine caches
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DotMapStats {
    pub prepared: CacheStats,
    pub results: CacheStats,
}

/// The sampling engine: an atlas plus the prepared-geometry slot and the result cache.
///
/// Both caches are behind their own lock, so a `DotMap` can be shared across
/// threads by reference.
pub struct DotMap {
    atlas: Atlas,
    prepared: BoundedCache<FeatureSetKey, PreparedGeometry>,
    results: Option<BoundedCache<MapKey, MapPoints>>,
}

impl DotMap {
    pub fn new(atlas: Atlas) -> Self {
        Self {
            atlas,
            prepared: BoundedCache::new(1),
            results: Some(BoundedCache::new(1)),
        }
    }

    /// Engine over the bundled world outlines
    pub fn world() -> Result<Self> {
        Ok(Self::new(Atlas::world()?))
    }

    /// Keep up to `capacity` results, most recent first
    pub fn with_result_capacity(mut self, capacity: usize) -> Self {
        self.results = Some(BoundedCache::new(capacity));
        self
    }

    /// Recompute every request from scratch. Prepared geometry is still reused.
    pub fn without_result_cache(mut self) -> Self {
        self.results = None;
        self
    }

    pub fn atlas(&self) -> &Atlas {
        &self.atlas
    }

    pub fn cache_stats(&self) -> DotMapStats {
        DotMapStats {
            prepared: self.prepared.stats(),
            results: self.results.as_ref().map(BoundedCache::stats).unwrap_or_default(),
        }
    }

    pub fn clear_caches(&self) {
        self.prepared.clear();
        if let Some(results) = &self.results {
            results.clear();
        }
    }

    /// Projection region for a request.
    ///
    /// An explicit region wins. Otherwise the union of the selected features'
    /// bounds, or the world default when nothing is selected or nothing resolves.
    pub fn resolve_region<S: AsRef<str>>(&self, countries: &[S], region: Option<&Region>) -> Region {
        if let Some(region) = region {
            return *region;
        }

        countries
            .iter()
            .filter_map(|id| self.atlas.get(id.as_ref()))
            .map(BoundaryFeature::bounds)
            .fold(None, |acc: Option<Region>, b| Some(acc.map_or(*b, |a| a.union(b))))
            .unwrap_or(DEFAULT_WORLD_REGION)
    }

    /// Prepared geometry for a selection, from the single-slot cache when the
    /// resolved feature set is unchanged. An empty list selects the whole atlas.
    pub fn prepared_geometry<S: AsRef<str>>(&self, countries: &[S]) -> Result<Arc<PreparedGeometry>> {
        if countries.is_empty() {
            return self.prepared.get_or_try_insert_with(FeatureSetKey::World, || {
                let features: Vec<&BoundaryFeature> = self.atlas.features().iter().collect();
                Ok(PreparedGeometry::prepare(&features))
            });
        }

        let features = self.atlas.select(countries);
        let ids: Arc<[String]> = features.iter().map(|f| f.id.clone()).collect();
        let key = FeatureSetKey::Subset {
            fingerprint: fingerprint(ids.iter().map(String::as_str)),
            ids,
        };
        self.prepared
            .get_or_try_insert_with(key, || Ok(PreparedGeometry::prepare(&features)))
    }

    /// Sample a grid of explicit resolution, going through the result cache when enabled
    pub fn map_points(&self, request: &GridRequest) -> Result<Arc<MapPoints>> {
        let region = self.resolve_region(&request.countries[..], request.region.as_ref());
        self.map_points_in(request, &ProjectionWindow::from_region(&region))
    }

    fn map_points_in(&self, request: &GridRequest, window: &ProjectionWindow) -> Result<Arc<MapPoints>> {
        let Some(results) = &self.results else {
            return self.compute(request, window).map(Arc::new);
        };

        let key = MapKey::new(
            request.height,
            request.width,
            &request.countries[..],
            request.region.as_ref(),
            request.rows,
            request.columns,
            request.radius,
            request.layout,
        );

        let mut computed = false;
        let points = results.get_or_try_insert_with(key, || {
            computed = true;
            self.compute(request, window)
        })?;
        if !computed {
            trace!("result cache hit: {} points", points.points.len());
        }
        Ok(points)
    }

    fn compute(&self, request: &GridRequest, window: &ProjectionWindow) -> Result<MapPoints> {
        let (width, height) = resolve_canvas(request.width, request.height, window)?;

        let grid = GridSpec {
            width,
            height,
            rows: request.rows,
            columns: request.columns,
            radius: request.radius,
            layout: request.layout,
        };
        grid.validate()?;

        let geometry = self.prepared_geometry(&request.countries[..])?;
        let points = sample(&grid, window, &geometry)?;
        debug!(
            "{} points on {width}x{height} for {} countries",
            points.len(),
            request.countries.len()
        );

        Ok(MapPoints {
            points,
            window: *window,
            grid,
        })
    }

    /// Build a dot map from public options, deriving the grid resolution from `samples`.
    ///
    /// The request is keyed by the resolved canvas size, so a derived width
    /// and the same width given explicitly share one cache entry.
    pub fn create_map(&self, options: &MapOptions) -> Result<DotMapView> {
        options.validate()?;

        let region = self.resolve_region(&options.countries[..], options.region.as_ref());
        let window = ProjectionWindow::from_region(&region);
        let (width, height) = resolve_canvas(options.width, options.height, &window)?;
        let (rows, columns) = options.grid_size(width, height);

        let request = GridRequest {
            width,
            height,
            countries: options.countries.clone(),
            region: options.region,
            rows,
            columns,
            radius: options.radius,
            layout: options.grid,
        };
        let map = self.map_points_in(&request, &window)?;

        Ok(DotMapView { map })
    }
}

/// Fill in a missing canvas dimension from the window's aspect ratio.
/// Anything not strictly positive counts as missing.
pub fn resolve_canvas(width: f64, height: f64, window: &ProjectionWindow) -> Result<(f64, f64)> {
    match (width > 0.0, height > 0.0) {
        (true, true) => Ok((width, height)),
        (false, true) => Ok(((height * window.aspect()).round(), height)),
        (true, false) => Ok((width, (width / window.aspect()).round())),
        (false, false) => Err(MapError::DegenerateCanvas { width, height }),
    }
}

/// A sampled map, shared with the result cache
#[derive(Clone, Debug)]
pub struct DotMapView {
    map: Arc<MapPoints>,
}

impl DotMapView {
    pub fn points(&self) -> &[Point] {
        &self.map.points
    }

    pub fn window(&self) -> &ProjectionWindow {
        &self.map.window
    }

    pub fn grid(&self) -> &GridSpec {
        &self.map.grid
    }

    pub fn width(&self) -> f64 {
        self.map.grid.width
    }

    pub fn height(&self) -> f64 {
        self.map.grid.height
    }

    /// Pixel position of a lat/lng on this canvas, not snapped to the grid
    pub fn project(&self, lat: f64, lng: f64) -> Point {
        let m = project(LngLat::new(lng, lat).clamped());
        self.map.window.to_pixel(m, self.width(), self.height())
    }

    /// Place markers on the canvas, each snapped to its nearest grid cell
    pub fn place_markers<T: Clone>(&self, markers: &[Marker<T>]) -> Vec<PlacedMarker<T>> {
        markers
            .iter()
            .map(|marker| {
                let cell = self.map.grid.nearest_cell(self.project(marker.lat, marker.lng));
                PlacedMarker {
                    x: cell.x,
                    y: cell.y,
                    size: marker.size,
                    data: marker.data.clone(),
                }
            })
            .collect()
    }
}
