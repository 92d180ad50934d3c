use crate::geo::LngLat;

/// A geographic marker with caller metadata carried through untouched
#[derive(Clone, Debug, PartialEq)]
pub struct Marker<T = ()> {
    pub lat: f64,
    pub lng: f64,
    pub size: Option<f64>,
    pub data: T,
}

impl Marker<()> {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            size: None,
            data: (),
        }
    }
}

impl<T> Marker<T> {
    pub fn with_data(lat: f64, lng: f64, data: T) -> Self {
        Self {
            lat,
            lng,
            size: None,
            data,
        }
    }

    pub fn size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn position(&self) -> LngLat {
        LngLat::new(self.lng, self.lat)
    }
}

/// A marker placed on the canvas, snapped to its nearest grid cell
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedMarker<T = ()> {
    pub x: f64,
    pub y: f64,
    pub size: Option<f64>,
    pub data: T,
}
