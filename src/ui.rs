use crate::app::App;
use dot_map::braille::{BrailleCanvas, MapLayers, BLANK};
use dot_map::{GridLayout, PlacedMarker};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};

/// Render the UI
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Split into map area and status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Map
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_map(frame, app, chunks[0]);
    render_status_bar(frame, app, chunks[1]);
}

fn render_map(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" {} ", app.selection()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(error) = &app.error {
        let message = Paragraph::new(Span::styled(error.as_str(), Style::default().fg(Color::Red)));
        frame.render_widget(message, inner);
        return;
    }

    if let Some(layers) = app.layers() {
        frame.render_widget(
            MapWidget {
                layers,
                markers: &app.placed,
            },
            inner,
        );
    }
}

/// Braille map with marker labels overlaid
struct MapWidget<'a> {
    layers: MapLayers,
    markers: &'a [PlacedMarker<String>],
}

impl MapWidget<'_> {
    /// Render a braille canvas layer with a specific color
    fn render_layer(canvas: &BrailleCanvas, color: Color, area: Rect, buf: &mut Buffer) {
        for (row_idx, row) in canvas.rows().enumerate() {
            if row_idx >= area.height as usize {
                break;
            }
            let y = area.y + row_idx as u16;

            for (col_idx, ch) in row.chars().enumerate() {
                if col_idx >= area.width as usize {
                    break;
                }
                if ch == BLANK {
                    continue;
                }
                let x = area.x + col_idx as u16;
                buf[(x, y)].set_char(ch).set_fg(color);
            }
        }
    }
}

impl Widget for MapWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Self::render_layer(&self.layers.land, Color::Cyan, area, buf);
        Self::render_layer(&self.layers.markers, Color::Red, area, buf);

        let label_style = Style::default().fg(Color::White);
        for marker in self.markers {
            if marker.data.is_empty() {
                continue;
            }
            // Convert braille dots to character cells, label two cells to the right
            let lx = (marker.x / 2.0) as u16 + 2;
            let ly = (marker.y / 4.0) as u16;
            if ly >= area.height || lx >= area.width {
                continue;
            }

            let max_len = (area.width - lx) as usize;
            for (i, ch) in marker.data.chars().take(max_len.min(24)).enumerate() {
                buf[(area.x + lx + i as u16, area.y + ly)]
                    .set_char(ch)
                    .set_style(label_style);
            }
        }
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let stats = app.stats();
    let (points, grid) = match &app.view {
        Some(view) => (
            view.points().len().to_string(),
            format!("{}x{}", view.grid().rows, view.grid().columns),
        ),
        None => ("-".to_string(), "-".to_string()),
    };
    let layout = match app.options.grid {
        GridLayout::Vertical => "vertical",
        GridLayout::Diagonal => "diagonal",
    };

    let status = Line::from(vec![
        Span::styled(" Dots: ", Style::default().fg(Color::DarkGray)),
        Span::styled(points, Style::default().fg(Color::Yellow)),
        Span::styled(" Grid: ", Style::default().fg(Color::DarkGray)),
        Span::styled(grid, Style::default().fg(Color::Yellow)),
        Span::styled(" (", Style::default().fg(Color::DarkGray)),
        Span::styled(layout, Style::default().fg(Color::Magenta)),
        Span::styled(") ", Style::default().fg(Color::DarkGray)),
        Span::styled("| cache ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{}/{}", stats.results.hits, stats.results.misses),
            Style::default().fg(Color::Green),
        ),
        Span::styled(
            " | +/-:density g:grid r:reset q:quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let paragraph = Paragraph::new(status);
    frame.render_widget(paragraph, area);
}
