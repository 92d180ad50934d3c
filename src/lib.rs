//! Dot maps: sample a regular grid over a Web Mercator projection and keep
//! the cells that fall inside the selected country outlines.
//!
//! ```no_run
//! use dot_map::{DotMap, MapOptions, Marker};
//!
//! let engine = DotMap::world()?;
//! let map = engine.create_map(&MapOptions::new(200.0, 100.0).countries(["USA", "CAN"]))?;
//! let placed = map.place_markers(&[Marker::with_data(40.7, -74.0, "New York")]);
//! println!("{} dots, first marker at {:?}", map.points().len(), (placed[0].x, placed[0].y));
//! # Ok::<(), dot_map::MapError>(())
//! ```

pub mod braille;
pub mod cache;
pub mod data;
pub mod engine;
pub mod error;
pub mod geo;
pub mod hash;
pub mod map;
pub mod marker;
pub mod options;

pub use data::{Atlas, BoundaryFeature, Geometry, Polygon};
pub use engine::{DotMap, DotMapStats, DotMapView, GridRequest, MapPoints};
pub use error::{MapError, Result};
pub use geo::{LngLat, Region, DEFAULT_WORLD_REGION};
pub use map::{GridLayout, Point, ProjectionWindow};
pub use marker::{Marker, PlacedMarker};
pub use options::MapOptions;
