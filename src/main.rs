mod app;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::{Parser, ValueEnum};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use dot_map::{braille, Atlas, DotMap, GridLayout, MapOptions, Marker, Region};
use log::info;
use ratatui::DefaultTerminal;
use std::path::PathBuf;
use std::time::Duration;

/// Results kept for the interactive view, enough to flip back and forth between layouts and densities
const RESULT_CACHE_CAPACITY: usize = 4;

#[derive(Parser, Debug)]
#[command(version, about = "Dot maps of country outlines in the terminal")]
struct Args {
    /// Comma separated feature ids, e.g. USA,CAN (default: whole world)
    #[arg(long, value_delimiter = ',')]
    countries: Vec<String>,

    /// Approximate number of grid cells
    #[arg(long, default_value_t = 6000)]
    samples: usize,

    /// Dot radius in braille dots
    #[arg(long, default_value_t = 0.3)]
    radius: f64,

    #[arg(long, value_enum, default_value_t = GridArg::Vertical)]
    grid: GridArg,

    /// Projection region as lat_min,lat_max,lng_min,lng_max
    #[arg(long, allow_hyphen_values = true)]
    region: Option<Region>,

    /// Marker as lat,lng[,label]; may be repeated
    #[arg(long = "marker", value_parser = parse_marker, allow_hyphen_values = true)]
    markers: Vec<Marker<String>>,

    /// GeoJSON FeatureCollection to use instead of the bundled world outlines
    #[arg(long)]
    data: Option<PathBuf>,

    /// Write the map to stdout instead of opening the interactive view
    #[arg(long)]
    print: bool,

    /// Width in characters for --print
    #[arg(long, default_value_t = 80)]
    columns: usize,

    /// Height in characters for --print
    #[arg(long, default_value_t = 24)]
    lines: usize,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum GridArg {
    Vertical,
    Diagonal,
}

impl From<GridArg> for GridLayout {
    fn from(arg: GridArg) -> Self {
        match arg {
            GridArg::Vertical => GridLayout::Vertical,
            GridArg::Diagonal => GridLayout::Diagonal,
        }
    }
}

/// Parse `lat,lng[,label]`
fn parse_marker(s: &str) -> std::result::Result<Marker<String>, String> {
    let mut parts = s.splitn(3, ',');
    let mut coord = |name: &str| -> std::result::Result<f64, String> {
        let part = parts.next().ok_or("expected lat,lng[,label]")?;
        part.trim()
            .parse::<f64>()
            .map_err(|e| format!("{name} `{part}`: {e}"))
    };
    let lat = coord("latitude")?;
    let lng = coord("longitude")?;
    let label = parts.next().map(str::trim).unwrap_or_default().to_string();
    Ok(Marker::with_data(lat, lng, label))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let atlas = match &args.data {
        Some(path) => Atlas::from_path(path).with_context(|| format!("loading {}", path.display()))?,
        None => Atlas::world().context("loading bundled world outlines")?,
    };
    info!("{} boundary features", atlas.len());
    let engine = DotMap::new(atlas).with_result_capacity(RESULT_CACHE_CAPACITY);

    let mut options = MapOptions::default()
        .countries(args.countries.clone())
        .samples(args.samples)
        .radius(args.radius)
        .grid(args.grid.into());
    options.region = args.region;

    if args.print {
        return print_map(&engine, options, &args.markers, args.columns, args.lines);
    }

    let mut terminal = ratatui::init();
    terminal.clear()?;

    let result = run(&mut terminal, engine, options, args.markers);

    ratatui::restore();
    result
}

fn print_map(engine: &DotMap, mut options: MapOptions, markers: &[Marker<String>], cols: usize, rows: usize) -> Result<()> {
    options.width = (cols * 2) as f64;
    options.height = (rows * 4) as f64;

    let view = engine.create_map(&options)?;
    let placed = view.place_markers(markers);
    let layers = braille::rasterize(&view, &placed, cols, rows);

    print!("{}", braille::to_text(&layers));
    for marker in &placed {
        println!("{} at ({:.1}, {:.1})", marker.data, marker.x, marker.y);
    }
    info!(
        "{} points on a {}x{} grid",
        view.points().len(),
        view.grid().rows,
        view.grid().columns
    );
    Ok(())
}

fn run(terminal: &mut DefaultTerminal, engine: DotMap, options: MapOptions, markers: Vec<Marker<String>>) -> Result<()> {
    let size = terminal.size()?;
    let mut app = App::new(engine, options, markers, size.width as usize, size.height as usize);

    // Main loop
    loop {
        terminal.draw(|frame| ui::render(frame, &app))?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                // Only handle key press events (not release)
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => app.quit(),
                    KeyCode::Char('+') | KeyCode::Char('=') => app.more_dots(),
                    KeyCode::Char('-') | KeyCode::Char('_') => app.fewer_dots(),
                    KeyCode::Char('g') | KeyCode::Char('G') => app.toggle_grid(),
                    KeyCode::Char('r') | KeyCode::Char('0') => app.reset(),
                    _ => {}
                },
                Event::Resize(width, height) => {
                    app.resize(width as usize, height as usize);
                }
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
