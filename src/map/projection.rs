use glam::DVec2;
use std::f64::consts::PI;

use crate::geo::{LngLat, Region};

/// Half the equatorial circumference of the spherical Mercator earth, in meters.
/// `project(±180, 0).x` lands exactly on ±this value.
pub const HALF_CIRCUMFERENCE: f64 = 20037508.34;

/// A position on the canvas in pixel units (y grows downward)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Project a geographic coordinate to spherical Web Mercator meters.
///
/// Latitude must already be inside (-90, 90); callers clamp to ±85 first.
#[inline(always)]
pub fn project(p: LngLat) -> DVec2 {
    let x = p.lng * HALF_CIRCUMFERENCE / 180.0;
    let y = ((90.0 + p.lat) * PI / 360.0).tan().ln() / (PI / 180.0);
    DVec2::new(x, y * HALF_CIRCUMFERENCE / 180.0)
}

/// Inverse of [`project`]
#[inline(always)]
pub fn unproject(m: DVec2) -> LngLat {
    let lng = m.x * 180.0 / HALF_CIRCUMFERENCE;
    let y_deg = m.y * 180.0 / HALF_CIRCUMFERENCE;
    let lat = (y_deg * PI / 180.0).exp().atan() * 360.0 / PI - 90.0;
    LngLat { lng, lat }
}

/// The Mercator rectangle that is stretched over the canvas.
///
/// These four scalars are all that is needed to place any other
/// coordinate on the same canvas later on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectionWindow {
    pub x_min: f64,
    pub y_max: f64,
    pub x_range: f64,
    pub y_range: f64,
}

impl ProjectionWindow {
    /// Window for a lng/lat region. Latitudes are clamped before projecting.
    pub fn from_region(region: &Region) -> Self {
        let region = region.clamped();
        let min = project(region.min_corner());
        let max = project(region.max_corner());
        Self {
            x_min: min.x,
            y_max: max.y,
            x_range: max.x - min.x,
            y_range: max.y - min.y,
        }
    }

    /// Width over height of the window
    pub fn aspect(&self) -> f64 {
        self.x_range / self.y_range
    }

    /// Map a canvas pixel to Mercator meters for a canvas of `width` x `height`
    #[inline(always)]
    pub fn to_mercator(&self, px: Point, width: f64, height: f64) -> DVec2 {
        DVec2::new(
            px.x / width * self.x_range + self.x_min,
            self.y_max - px.y / height * self.y_range,
        )
    }

    /// Map Mercator meters to a canvas pixel; exact inverse of [`Self::to_mercator`]
    #[inline(always)]
    pub fn to_pixel(&self, m: DVec2, width: f64, height: f64) -> Point {
        Point {
            x: (m.x - self.x_min) / self.x_range * width,
            y: (self.y_max - m.y) / self.y_range * height,
        }
    }
}
