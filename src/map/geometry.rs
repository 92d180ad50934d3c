use glam::DVec2;

use crate::geo::LngLat;
use crate::map::projection::project;

/// Axis-aligned box in Mercator meters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: DVec2,
    pub max: DVec2,
}

impl BoundingBox {
    /// Inverted box: contains nothing, absorbs anything it is extended with
    pub const EMPTY: BoundingBox = BoundingBox {
        min: DVec2::splat(f64::INFINITY),
        max: DVec2::splat(f64::NEG_INFINITY),
    };

    #[inline(always)]
    pub fn extend(&mut self, p: DVec2) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    #[inline(always)]
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Inclusive on all four edges
    #[inline(always)]
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }
}

/// A ring projected once into Mercator meters, with its bounding box
#[derive(Clone, Debug)]
pub struct PreparedRing {
    coords: Vec<DVec2>,
    bbox: BoundingBox,
}

impl PreparedRing {
    /// Project every vertex of a lng/lat ring. Latitudes are clamped to the Mercator band.
    pub fn project(ring: &[LngLat]) -> Self {
        let mut bbox = BoundingBox::EMPTY;
        let coords = ring
            .iter()
            .map(|&p| {
                let m = project(p.clamped());
                bbox.extend(m);
                m
            })
            .collect();
        Self { coords, bbox }
    }

    /// Build from coordinates that are already planar
    pub fn from_planar(coords: Vec<DVec2>) -> Self {
        let mut bbox = BoundingBox::EMPTY;
        for &c in &coords {
            bbox.extend(c);
        }
        Self { coords, bbox }
    }

    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }
}

/// Even-odd crossing test of a planar point against one ring.
///
/// An edge counts when exactly one endpoint lies strictly above the point
/// and the point is left of the edge's x-intercept at that height. Points
/// on edges or vertices get a fixed but unspecified answer.
#[inline]
pub fn ring_contains(point: DVec2, ring: &PreparedRing) -> bool {
    if !ring.bbox.contains(point) {
        return false;
    }

    let coords = &ring.coords;
    let mut inside = false;
    let mut j = coords.len().wrapping_sub(1);

    for (i, a) in coords.iter().enumerate() {
        let b = coords[j];
        if (a.y > point.y) != (b.y > point.y)
            && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
        {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Outer ring plus holes, all planar
#[derive(Clone, Debug)]
pub struct PreparedPolygon {
    pub outer: PreparedRing,
    pub holes: Vec<PreparedRing>,
}

impl PreparedPolygon {
    /// Inside the outer ring and outside every hole
    #[inline]
    pub fn contains(&self, point: DVec2) -> bool {
        ring_contains(point, &self.outer) && !self.holes.iter().any(|h| ring_contains(point, h))
    }

    pub fn vertex_count(&self) -> usize {
        self.outer.len() + self.holes.iter().map(PreparedRing::len).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(min: f64, max: f64) -> PreparedRing {
        PreparedRing::from_planar(vec![
            DVec2::new(min, min),
            DVec2::new(max, min),
            DVec2::new(max, max),
            DVec2::new(min, max),
        ])
    }

    #[test]
    fn test_ring_contains_square() {
        let ring = square(0.0, 10.0);
        assert!(ring_contains(DVec2::new(5.0, 5.0), &ring));
        assert!(ring_contains(DVec2::new(0.5, 9.5), &ring));
        assert!(!ring_contains(DVec2::new(-1.0, 5.0), &ring));
        assert!(!ring_contains(DVec2::new(5.0, 11.0), &ring));
    }

    #[test]
    fn test_ring_contains_concave() {
        // U shape opening upward
        let ring = PreparedRing::from_planar(vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(9.0, 0.0),
            DVec2::new(9.0, 9.0),
            DVec2::new(6.0, 9.0),
            DVec2::new(6.0, 3.0),
            DVec2::new(3.0, 3.0),
            DVec2::new(3.0, 9.0),
            DVec2::new(0.0, 9.0),
        ]);
        assert!(ring_contains(DVec2::new(1.5, 6.0), &ring));
        assert!(ring_contains(DVec2::new(7.5, 6.0), &ring));
        assert!(ring_contains(DVec2::new(4.5, 1.5), &ring));
        assert!(!ring_contains(DVec2::new(4.5, 6.0), &ring));
    }

    #[test]
    fn test_closing_vertex_is_harmless() {
        let mut coords = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(4.0, 0.0),
            DVec2::new(4.0, 4.0),
            DVec2::new(0.0, 4.0),
        ];
        coords.push(coords[0]);
        let ring = PreparedRing::from_planar(coords);
        assert!(ring_contains(DVec2::new(2.0, 2.0), &ring));
        assert!(!ring_contains(DVec2::new(5.0, 2.0), &ring));
    }

    #[test]
    fn test_polygon_hole() {
        let polygon = PreparedPolygon {
            outer: square(0.0, 10.0),
            holes: vec![square(4.0, 6.0)],
        };
        assert!(polygon.contains(DVec2::new(2.0, 2.0)));
        assert!(!polygon.contains(DVec2::new(5.0, 5.0)));
        assert!(!polygon.contains(DVec2::new(12.0, 5.0)));
        assert_eq!(polygon.vertex_count(), 8);
    }

    #[test]
    fn test_on_edge_is_deterministic() {
        let ring = square(0.0, 10.0);
        let p = DVec2::new(10.0, 5.0);
        let first = ring_contains(p, &ring);
        for _ in 0..10 {
            assert_eq!(ring_contains(p, &ring), first);
        }
    }

    #[test]
    fn test_project_ring_bbox() {
        let ring = PreparedRing::project(&[
            LngLat::new(-10.0, -10.0),
            LngLat::new(10.0, -10.0),
            LngLat::new(10.0, 10.0),
            LngLat::new(-10.0, 10.0),
        ]);
        let bbox = ring.bbox();
        assert!(bbox.min.x < 0.0 && bbox.max.x > 0.0);
        assert!((bbox.min.y + bbox.max.y).abs() < 1e-6);
        assert!(ring_contains(DVec2::ZERO, &ring));
    }

    #[test]
    fn test_empty_box() {
        let mut bbox = BoundingBox::EMPTY;
        assert!(bbox.is_empty());
        assert!(!bbox.contains(DVec2::ZERO));
        bbox.extend(DVec2::new(1.0, 2.0));
        assert!(!bbox.is_empty());
        assert!(bbox.contains(DVec2::new(1.0, 2.0)));
    }
}
