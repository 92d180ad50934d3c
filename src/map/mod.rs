mod geometry;
mod prepared;
mod projection;
mod sampler;

pub use geometry::{ring_contains, BoundingBox, PreparedPolygon, PreparedRing};
pub use prepared::{contains, PreparedGeometry};
pub use projection::{project, unproject, Point, ProjectionWindow, HALF_CIRCUMFERENCE};
pub use sampler::{sample, GridLayout, GridSpec};
