use std::str::FromStr;

use crate::error::MapError;

/// Web Mercator diverges at the poles; every latitude is clamped to this before projecting.
pub const MAX_MERCATOR_LAT: f64 = 85.0;

/// Projection window used when neither a region nor a country selection is given.
pub const DEFAULT_WORLD_REGION: Region = Region {
    lat_min: -56.0,
    lat_max: 71.0,
    lng_min: -179.0,
    lng_max: 179.0,
};

/// A geographic position in degrees
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Same position with latitude clamped into the Mercator-safe band
    #[inline(always)]
    pub fn clamped(self) -> Self {
        Self {
            lng: self.lng,
            lat: clamp_lat(self.lat),
        }
    }
}

impl From<[f64; 2]> for LngLat {
    fn from([lng, lat]: [f64; 2]) -> Self {
        Self { lng, lat }
    }
}

#[inline(always)]
pub fn clamp_lat(lat: f64) -> f64 {
    lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT)
}

/// A lng/lat rectangle with independent bounds per axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lng_min: f64,
    pub lng_max: f64,
}

impl Region {
    pub fn new(lat_min: f64, lat_max: f64, lng_min: f64, lng_max: f64) -> Self {
        Self {
            lat_min,
            lat_max,
            lng_min,
            lng_max,
        }
    }

    /// An inverted region that any `include` call will replace
    pub(crate) fn empty() -> Self {
        Self::new(f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY)
    }

    pub fn is_empty(&self) -> bool {
        self.lat_min > self.lat_max || self.lng_min > self.lng_max
    }

    pub(crate) fn include(&mut self, p: LngLat) {
        self.lat_min = self.lat_min.min(p.lat);
        self.lat_max = self.lat_max.max(p.lat);
        self.lng_min = self.lng_min.min(p.lng);
        self.lng_max = self.lng_max.max(p.lng);
    }

    pub fn union(&self, other: &Region) -> Region {
        Region {
            lat_min: self.lat_min.min(other.lat_min),
            lat_max: self.lat_max.max(other.lat_max),
            lng_min: self.lng_min.min(other.lng_min),
            lng_max: self.lng_max.max(other.lng_max),
        }
    }

    /// Latitude bounds clamped to [-85, 85]; longitudes untouched
    pub fn clamped(&self) -> Region {
        Region {
            lat_min: clamp_lat(self.lat_min),
            lat_max: clamp_lat(self.lat_max),
            ..*self
        }
    }

    /// South-west corner
    pub fn min_corner(&self) -> LngLat {
        LngLat::new(self.lng_min, self.lat_min)
    }

    /// North-east corner
    pub fn max_corner(&self) -> LngLat {
        LngLat::new(self.lng_max, self.lat_max)
    }
}

impl FromStr for Region {
    type Err = MapError;

    /// Parses `lat_min,lat_max,lng_min,lng_max`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| MapError::InvalidOption(format!("region `{s}`: {e}")))?;

        let [lat_min, lat_max, lng_min, lng_max] = values[..] else {
            return Err(MapError::InvalidOption(format!(
                "region `{s}` needs 4 values: lat_min,lat_max,lng_min,lng_max"
            )));
        };

        if values.iter().any(|v| !v.is_finite()) || lat_min >= lat_max || lng_min >= lng_max {
            return Err(MapError::InvalidOption(format!("region `{s}` is empty or not finite")));
        }

        Ok(Region::new(lat_min, lat_max, lng_min, lng_max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_region() {
        let r = Region::new(-90.0, 90.0, -180.0, 180.0).clamped();
        assert_eq!(r.lat_min, -85.0);
        assert_eq!(r.lat_max, 85.0);
        assert_eq!(r.lng_min, -180.0);
        assert_eq!(r.lng_max, 180.0);
    }

    #[test]
    fn test_default_world_region_is_valid() {
        let r = DEFAULT_WORLD_REGION;
        assert!(r.lat_min < r.lat_max);
        assert!(r.lng_min < r.lng_max);
        assert!(r.lat_min >= -90.0 && r.lat_max <= 90.0);
        assert!(r.lng_min >= -180.0 && r.lng_max <= 180.0);
    }

    #[test]
    fn test_include_and_union() {
        let mut r = Region::empty();
        assert!(r.is_empty());
        r.include(LngLat::new(10.0, 20.0));
        r.include(LngLat::new(-5.0, 30.0));
        assert_eq!(r, Region::new(20.0, 30.0, -5.0, 10.0));

        let u = r.union(&Region::new(-10.0, 0.0, 0.0, 50.0));
        assert_eq!(u, Region::new(-10.0, 30.0, -5.0, 50.0));
    }

    #[test]
    fn test_parse_region() {
        let r: Region = "25, 50, -130, -60".parse().unwrap();
        assert_eq!(r, Region::new(25.0, 50.0, -130.0, -60.0));

        assert!("25,50,-130".parse::<Region>().is_err());
        assert!("50,25,-130,-60".parse::<Region>().is_err());
        assert!("a,b,c,d".parse::<Region>().is_err());
    }
}
