//! The terminal as seen by the particle field.

use std::io;

use crossterm::terminal;
use plexus_core::{DisplaySettings, Size};
use plexus_field::Environment;

/// Rows reserved below the hero for the help line.
pub const FOOTER_ROWS: u16 = 1;

/// Braille dots per cell horizontally.
const DOTS_PER_CELL: f64 = 2.0;

/// Terminal geometry expressed in logical pixels.
#[derive(Debug, Clone)]
pub struct TerminalEnvironment {
    columns: u16,
    rows: u16,
    cell_width: f64,
    cell_height: f64,
    fallback_cell: (f64, f64),
    reduced_motion: bool,
}

impl TerminalEnvironment {
    pub fn new(columns: u16, rows: u16, cell: (f64, f64), reduced_motion: bool) -> Self {
        Self {
            columns,
            rows,
            cell_width: cell.0,
            cell_height: cell.1,
            fallback_cell: cell,
            reduced_motion,
        }
    }

    /// Query the current terminal. Cell pixel size comes from the terminal
    /// when it reports one, otherwise from the display settings.
    pub fn probe(display: &DisplaySettings) -> io::Result<Self> {
        let (columns, rows) = terminal::size()?;
        let fallback = (
            f64::from(display.cell_width_px),
            f64::from(display.cell_height_px),
        );
        let mut env = Self::new(columns, rows, fallback, display.reduced_motion);
        env.resize(columns, rows, cell_size());
        Ok(env)
    }

    /// Record a new terminal size. Without a reported cell size the
    /// configured fallback is used.
    pub fn resize(&mut self, columns: u16, rows: u16, cell: Option<(f64, f64)>) {
        self.columns = columns;
        self.rows = rows;
        (self.cell_width, self.cell_height) = cell.unwrap_or(self.fallback_cell);
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    pub fn set_reduced_motion(&mut self, reduce: bool) {
        self.reduced_motion = reduce;
    }

    pub fn hero_rows(&self) -> u16 {
        self.rows.saturating_sub(FOOTER_ROWS)
    }
}

impl Environment for TerminalEnvironment {
    fn viewport_width(&self) -> f64 {
        f64::from(self.columns) * self.cell_width
    }

    fn device_pixel_ratio(&self) -> f64 {
        DOTS_PER_CELL / self.cell_width
    }

    fn hero_size(&self) -> Size {
        Size::new(
            f64::from(self.columns) * self.cell_width,
            f64::from(self.hero_rows()) * self.cell_height,
        )
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }
}

/// Cell size in pixels as reported by the terminal, if it reports one.
pub fn cell_size() -> Option<(f64, f64)> {
    let ws = terminal::window_size().ok()?;
    if ws.width == 0 || ws.height == 0 || ws.columns == 0 || ws.rows == 0 {
        return None;
    }
    Some((
        f64::from(ws.width) / f64::from(ws.columns),
        f64::from(ws.height) / f64::from(ws.rows),
    ))
}

#[cfg(test)]
mod tests {
    use plexus_core::FieldSettings;

    use super::*;

    #[test]
    fn test_geometry() {
        let env = TerminalEnvironment::new(80, 25, (8.0, 16.0), false);
        assert_eq!(env.viewport_width(), 640.0);
        assert_eq!(env.hero_size(), Size::new(640.0, 384.0));
        assert_eq!(env.device_pixel_ratio(), 0.25);

        // one cell is 2x4 braille dots
        let backing = env.hero_size().scale(env.device_pixel_ratio());
        assert_eq!(backing, Size::new(160.0, 96.0));
    }

    #[test]
    fn test_particle_count_follows_columns() {
        let settings = FieldSettings::default();
        let narrow = TerminalEnvironment::new(80, 24, (8.0, 16.0), false);
        let wide = TerminalEnvironment::new(120, 40, (8.0, 16.0), false);
        assert_eq!(settings.particle_count(narrow.viewport_width()), 30);
        assert_eq!(settings.particle_count(wide.viewport_width()), 60);
    }

    #[test]
    fn test_tiny_terminal() {
        let env = TerminalEnvironment::new(10, 1, (8.0, 16.0), false);
        assert_eq!(env.hero_rows(), 0);
        assert!(env.hero_size().is_empty());
    }

    #[test]
    fn test_resize_uses_reported_cell() {
        let mut env = TerminalEnvironment::new(80, 24, (8.0, 16.0), false);
        env.resize(100, 30, Some((10.0, 20.0)));
        assert_eq!(env.viewport_width(), 1000.0);
        assert_eq!(env.device_pixel_ratio(), 0.2);
        env.resize(100, 30, None);
        assert_eq!(env.viewport_width(), 800.0);
    }

    #[test]
    fn test_reduced_motion_toggle() {
        let mut env = TerminalEnvironment::new(80, 24, (8.0, 16.0), true);
        assert!(env.prefers_reduced_motion());
        env.set_reduced_motion(false);
        assert!(!env.reduced_motion());
    }
}
