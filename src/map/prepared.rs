use glam::DVec2;
use log::debug;
use rayon::prelude::*;

use crate::data::BoundaryFeature;
use crate::map::geometry::{BoundingBox, PreparedPolygon, PreparedRing};

/// Boundary geometry projected once into Mercator meters, ready for
/// repeated containment queries.
///
/// Built from any number of features; order of features and polygons only
/// affects internal storage, never the answers.
#[derive(Clone, Debug)]
pub struct PreparedGeometry {
    polygons: Vec<PreparedPolygon>,
    /// Union of the outer rings' boxes; holes never widen it
    bbox: BoundingBox,
}

impl PreparedGeometry {
    /// Project every ring of every polygon of `features`.
    ///
    /// Cost is linear in the total vertex count; features are projected in parallel.
    pub fn prepare(features: &[&BoundaryFeature]) -> Self {
        let polygons: Vec<PreparedPolygon> = features
            .par_iter()
            .flat_map_iter(|feature| {
                feature.geometry.polygons().iter().map(|polygon| PreparedPolygon {
                    outer: PreparedRing::project(&polygon.outer),
                    holes: polygon.holes.iter().map(|h| PreparedRing::project(h)).collect(),
                })
            })
            .collect();

        Self::from_polygons(polygons)
    }

    pub fn from_polygons(polygons: Vec<PreparedPolygon>) -> Self {
        let bbox = polygons
            .iter()
            .fold(BoundingBox::EMPTY, |acc, p| acc.union(p.outer.bbox()));

        debug!(
            "prepared {} polygons, {} vertices",
            polygons.len(),
            polygons.iter().map(PreparedPolygon::vertex_count).sum::<usize>()
        );

        Self { polygons, bbox }
    }

    pub fn empty() -> Self {
        Self {
            polygons: Vec::new(),
            bbox: BoundingBox::EMPTY,
        }
    }

    /// Inside the global box, then inside at least one polygon (first match wins)
    #[inline]
    pub fn contains(&self, point: DVec2) -> bool {
        self.bbox.contains(point) && self.polygons.iter().any(|p| p.contains(point))
    }

    pub fn polygons(&self) -> &[PreparedPolygon] {
        &self.polygons
    }

    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }
}

/// Free-function form of [`PreparedGeometry::contains`]
#[inline]
pub fn contains(point: DVec2, geometry: &PreparedGeometry) -> bool {
    geometry.contains(point)
}
