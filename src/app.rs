use dot_map::braille::{self, MapLayers};
use dot_map::{DotMap, DotMapStats, DotMapView, GridLayout, MapOptions, Marker, PlacedMarker};
use log::warn;

/// Lowest density reachable with `-`
const MIN_SAMPLES: usize = 16;
/// Highest density reachable with `+`
const MAX_SAMPLES: usize = 1 << 20;

pub struct App {
    engine: DotMap,
    /// Options given on the command line, restored by reset
    initial: MapOptions,
    pub options: MapOptions,
    markers: Vec<Marker<String>>,
    pub view: Option<DotMapView>,
    pub placed: Vec<PlacedMarker<String>>,
    /// Last sampling error, shown instead of the map
    pub error: Option<String>,
    /// Map area in characters
    cols: usize,
    rows: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(engine: DotMap, options: MapOptions, markers: Vec<Marker<String>>, width: usize, height: usize) -> Self {
        let mut app = Self {
            engine,
            initial: options.clone(),
            options,
            markers,
            view: None,
            placed: Vec::new(),
            error: None,
            cols: 0,
            rows: 0,
            should_quit: false,
        };
        app.resize(width, height);
        app
    }

    /// Follow the terminal size and re-request the map
    pub fn resize(&mut self, width: usize, height: usize) {
        // Account for border (2 chars horizontal, 2 chars vertical plus the status bar)
        let cols = width.saturating_sub(2);
        let rows = height.saturating_sub(3);
        if (cols, rows) == (self.cols, self.rows) && self.view.is_some() {
            return;
        }
        self.cols = cols;
        self.rows = rows;
        self.refresh();
    }

    fn refresh(&mut self) {
        // Braille gives 2x4 dots per character
        self.options.width = (self.cols * 2) as f64;
        self.options.height = (self.rows * 4) as f64;

        match self.engine.create_map(&self.options) {
            Ok(view) => {
                self.placed = view.place_markers(&self.markers);
                self.view = Some(view);
                self.error = None;
            }
            Err(e) => {
                warn!("cannot draw map: {e}");
                self.view = None;
                self.placed.clear();
                self.error = Some(e.to_string());
            }
        }
    }

    pub fn more_dots(&mut self) {
        self.options.samples = (self.options.samples * 2).min(MAX_SAMPLES);
        self.refresh();
    }

    pub fn fewer_dots(&mut self) {
        self.options.samples = (self.options.samples / 2).max(MIN_SAMPLES);
        self.refresh();
    }

    pub fn toggle_grid(&mut self) {
        self.options.grid = match self.options.grid {
            GridLayout::Vertical => GridLayout::Diagonal,
            GridLayout::Diagonal => GridLayout::Vertical,
        };
        self.refresh();
    }

    pub fn reset(&mut self) {
        self.options = self.initial.clone();
        self.refresh();
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn stats(&self) -> DotMapStats {
        self.engine.cache_stats()
    }

    /// Braille layers sized to the current map area
    pub fn layers(&self) -> Option<MapLayers> {
        self.view
            .as_ref()
            .map(|view| braille::rasterize(view, &self.placed, self.cols, self.rows))
    }

    /// Selected countries for the title bar
    pub fn selection(&self) -> String {
        if self.options.countries.is_empty() {
            "World".to_string()
        } else {
            self.options.countries.join(", ")
        }
    }
}
