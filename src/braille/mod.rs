mod canvas;

pub use canvas::{BrailleCanvas, BLANK};

use crate::engine::DotMapView;
use crate::map::Point;
use crate::marker::PlacedMarker;

/// Dot layers of a rasterised map, back to front
pub struct MapLayers {
    pub land: BrailleCanvas,
    pub markers: BrailleCanvas,
}

/// Rasterise a map onto a `cols` x `rows` character canvas.
///
/// The map is expected to be sampled on a canvas of `cols * 2` by `rows * 4`
/// pixels; anything outside is clipped. Markers are drawn as discs of their
/// own size, or one dot when they have none.
pub fn rasterize<T>(view: &DotMapView, markers: &[PlacedMarker<T>], cols: usize, rows: usize) -> MapLayers {
    let mut land = BrailleCanvas::new(cols, rows);
    let radius = view.grid().radius;
    for &p in view.points() {
        land.fill_disc(p, radius);
    }

    let mut layer = BrailleCanvas::new(cols, rows);
    for marker in markers {
        layer.fill_disc(Point::new(marker.x, marker.y), marker.size.unwrap_or(0.0));
    }

    MapLayers {
        land,
        markers: layer,
    }
}

/// Plain-text rendering: marker cells win over land cells
pub fn to_text(layers: &MapLayers) -> String {
    let (cols, rows) = (layers.land.width(), layers.land.height());
    let mut out = String::with_capacity((cols * 3 + 1) * rows);
    for row in 0..rows {
        let land = layers.land.row(row);
        let markers = layers.markers.row(row);
        for (col, (l, m)) in land.zip(markers).enumerate() {
            out.push(if layers.markers.is_set(col, row) { m } else { l });
        }
        out.push('\n');
    }
    out
}
