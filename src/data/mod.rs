use geojson::{feature::Id, Feature, GeoJson, Value};
use log::{debug, warn};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{MapError, Result};
use crate::geo::{LngLat, Region};

/// Natural Earth 1:110m country outlines bundled with the crate, keyed by ISO 3166-1 alpha-3 codes
const WORLD_GEOJSON: &[u8] = include_bytes!("../../data/world.geo.json");

/// A closed ring of lng/lat positions. A trailing duplicate of the first position is allowed.
pub type Ring = Vec<LngLat>;

/// One outer ring and the holes cut out of it
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    pub outer: Ring,
    pub holes: Vec<Ring>,
}

/// Boundary geometry as found in the dataset
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Polygon(Polygon),
    MultiPolygon(Vec<Polygon>),
}

impl Geometry {
    /// Both variants viewed as a list of polygons
    pub fn polygons(&self) -> &[Polygon] {
        match self {
            Geometry::Polygon(p) => std::slice::from_ref(p),
            Geometry::MultiPolygon(ps) => ps,
        }
    }
}

/// A named area, typically one country
#[derive(Clone, Debug)]
pub struct BoundaryFeature {
    pub id: String,
    pub name: Option<String>,
    pub geometry: Geometry,
    bounds: Region,
}

impl BoundaryFeature {
    pub fn new(id: impl Into<String>, name: Option<String>, geometry: Geometry) -> Self {
        let mut bounds = Region::empty();
        for polygon in geometry.polygons() {
            for ring in std::iter::once(&polygon.outer).chain(&polygon.holes) {
                for &p in ring {
                    bounds.include(p);
                }
            }
        }
        Self {
            id: id.into(),
            name,
            geometry,
            bounds,
        }
    }

    /// Lng/lat bounds over every ring, holes included
    pub fn bounds(&self) -> &Region {
        &self.bounds
    }

    pub fn vertex_count(&self) -> usize {
        self.geometry
            .polygons()
            .iter()
            .map(|p| p.outer.len() + p.holes.iter().map(Vec::len).sum::<usize>())
            .sum()
    }

    /// Convert a GeoJSON feature. Anything other than Polygon or MultiPolygon is rejected.
    pub fn from_geojson(feature: &Feature, index: usize) -> Result<Self> {
        let id = feature_id(feature).ok_or(MapError::MissingId { index })?;
        let name = feature
            .property("name")
            .and_then(|v| v.as_str())
            .map(str::to_string);

        let geometry = feature
            .geometry
            .as_ref()
            .ok_or_else(|| MapError::MissingGeometry { id: id.clone() })?;

        let geometry = match &geometry.value {
            Value::Polygon(rings) => Geometry::Polygon(convert_polygon(&id, rings)?),
            Value::MultiPolygon(polygons) => Geometry::MultiPolygon(
                polygons
                    .iter()
                    .map(|rings| convert_polygon(&id, rings))
                    .collect::<Result<_>>()?,
            ),
            other => {
                return Err(MapError::UnsupportedGeometry {
                    id,
                    kind: value_kind(other),
                })
            }
        };

        Ok(Self::new(id, name, geometry))
    }
}

/// Feature id from the GeoJSON `id` member, falling back to `id` / `iso_a3` properties
fn feature_id(feature: &Feature) -> Option<String> {
    match &feature.id {
        Some(Id::String(s)) => return Some(s.clone()),
        Some(Id::Number(n)) => return Some(n.to_string()),
        None => {}
    }
    ["id", "iso_a3", "ISO_A3"].iter().find_map(|key| {
        feature
            .property(*key)
            .and_then(|v| v.as_str())
            .map(str::to_string)
    })
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

fn convert_polygon(id: &str, rings: &[Vec<Vec<f64>>]) -> Result<Polygon> {
    let mut rings = rings.iter().map(|ring| convert_ring(id, ring));
    let outer = rings.next().ok_or_else(|| MapError::InvalidRing {
        id: id.to_string(),
        points: 0,
    })??;
    let holes = rings.collect::<Result<Vec<_>>>()?;
    Ok(Polygon { outer, holes })
}

fn convert_ring(id: &str, ring: &[Vec<f64>]) -> Result<Ring> {
    if ring.len() < 3 || ring.iter().any(|c| c.len() < 2) {
        return Err(MapError::InvalidRing {
            id: id.to_string(),
            points: ring.len(),
        });
    }
    Ok(ring.iter().map(|c| LngLat::new(c[0], c[1])).collect())
}

/// A parsed boundary dataset with an id index.
pub struct Atlas {
    features: Vec<BoundaryFeature>,
    by_id: HashMap<String, usize>,
}

impl Atlas {
    /// Index features by id. A repeated id replaces the earlier feature in place,
    /// so every feature stays reachable through `get`.
    pub fn new(features: Vec<BoundaryFeature>) -> Self {
        let mut kept: Vec<BoundaryFeature> = Vec::with_capacity(features.len());
        let mut by_id = HashMap::with_capacity(features.len());
        for feature in features {
            if let Some(&idx) = by_id.get(&feature.id) {
                warn!("duplicate feature id `{}`, keeping the last one", feature.id);
                kept[idx] = feature;
            } else {
                by_id.insert(feature.id.clone(), kept.len());
                kept.push(feature);
            }
        }
        Self {
            features: kept,
            by_id,
        }
    }

    /// The bundled low-resolution world outlines
    pub fn world() -> Result<Self> {
        Self::from_geojson_bytes(WORLD_GEOJSON.to_vec())
    }

    /// Load a GeoJSON FeatureCollection from disk
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)?;
        let atlas = Self::from_geojson_bytes(bytes)?;
        debug!("loaded {} features from {}", atlas.len(), path.display());
        Ok(atlas)
    }

    /// Parse a GeoJSON FeatureCollection. The buffer is parsed in place.
    pub fn from_geojson_bytes(mut bytes: Vec<u8>) -> Result<Self> {
        let geojson: GeoJson = simd_json::serde::from_slice(&mut bytes)?;
        let GeoJson::FeatureCollection(fc) = geojson else {
            return Err(MapError::NotFeatureCollection);
        };

        let features = fc
            .features
            .iter()
            .enumerate()
            .map(|(idx, f)| BoundaryFeature::from_geojson(f, idx))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(features))
    }

    pub fn features(&self) -> &[BoundaryFeature] {
        &self.features
    }

    pub fn get(&self, id: &str) -> Option<&BoundaryFeature> {
        self.by_id.get(id).map(|&idx| &self.features[idx])
    }

    /// Resolve identifiers to features, skipping unknown ones.
    /// The result is sorted by id with duplicates removed.
    pub fn select<S: AsRef<str>>(&self, ids: &[S]) -> Vec<&BoundaryFeature> {
        let mut selected: Vec<&BoundaryFeature> = ids
            .iter()
            .filter_map(|id| {
                let id = id.as_ref();
                let found = self.get(id);
                if found.is_none() {
                    warn!("no boundary feature with id `{id}`");
                }
                found
            })
            .collect();
        selected.sort_by(|a, b| a.id.cmp(&b.id));
        selected.dedup_by(|a, b| a.id == b.id);
        selected
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
