use crate::error::{MapError, Result};
use crate::geo::Region;
use crate::map::GridLayout;

/// Public request for one dot map.
///
/// A width or height of zero is derived from the other dimension using the
/// aspect ratio of the projection window.
#[derive(Clone, Debug, PartialEq)]
pub struct MapOptions {
    pub width: f64,
    pub height: f64,
    /// Dot radius in pixels; the grid keeps `1.25 * radius` clear of every edge
    pub radius: f64,
    /// Feature ids to keep. Empty means the whole world.
    pub countries: Vec<String>,
    /// Explicit projection region, overriding the one derived from `countries`
    pub region: Option<Region>,
    /// Approximate number of grid cells
    pub samples: usize,
    pub grid: GridLayout,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            radius: 0.3,
            countries: Vec::new(),
            region: None,
            samples: 6000,
            grid: GridLayout::Vertical,
        }
    }
}

impl MapOptions {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.countries = countries.into_iter().map(Into::into).collect();
        self
    }

    pub fn region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }

    pub fn samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    pub fn grid(mut self, grid: GridLayout) -> Self {
        self.grid = grid;
        self
    }

    /// Reject values no grid can be built from
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if !value.is_finite() || value < 0.0 {
                return Err(MapError::InvalidOption(format!("{name} {value} must be finite and >= 0")));
            }
        }
        if self.width == 0.0 && self.height == 0.0 {
            return Err(MapError::DegenerateCanvas {
                width: self.width,
                height: self.height,
            });
        }
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(MapError::InvalidOption(format!(
                "radius {} must be finite and >= 0",
                self.radius
            )));
        }
        if self.samples == 0 {
            return Err(MapError::InvalidOption("samples must be at least 1".to_string()));
        }
        if let Some(region) = &self.region {
            let values = [region.lat_min, region.lat_max, region.lng_min, region.lng_max];
            if values.iter().any(|v| !v.is_finite()) || region.lat_min >= region.lat_max || region.lng_min >= region.lng_max {
                return Err(MapError::InvalidOption(format!("region {region:?} is empty or not finite")));
            }
        }
        Ok(())
    }

    /// Rows and columns for a canvas of `width` x `height`, keeping cells roughly square:
    /// `rows = round(sqrt(samples / aspect))`, `columns = round(rows * aspect)`
    pub fn grid_size(&self, width: f64, height: f64) -> (usize, usize) {
        let aspect = width / height;
        let rows = (self.samples as f64 / aspect).sqrt().round();
        let columns = (rows * aspect).round();
        (rows as usize, columns as usize)
    }
}
