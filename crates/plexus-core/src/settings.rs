//! Tunable settings for the particle field and its display.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::Rgba;

/// Simulation and drawing constants of the particle field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldSettings {
    /// Pairs closer than this (CSS px) are joined by a line.
    pub connection_distance: f64,
    /// Viewports narrower than this use [`Self::compact_count`].
    pub compact_breakpoint: f64,
    /// Particle count for narrow viewports.
    pub compact_count: usize,
    /// Particle count for everything else.
    pub full_count: usize,
    /// Per-axis speed bound in px/frame.
    pub max_speed: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    /// Quiet window before a resize is acted upon.
    pub resize_debounce_ms: u64,
    /// Accent color for dots and lines.
    pub accent: [u8; 3],
    /// Alpha of the particle dots.
    pub particle_alpha: f32,
    /// Alpha of a connection at distance zero.
    pub max_line_alpha: f32,
    pub line_width: f64,
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self {
            connection_distance: 120.0,
            compact_breakpoint: 768.0,
            compact_count: 30,
            full_count: 60,
            max_speed: 0.2,
            min_radius: 1.0,
            max_radius: 3.0,
            resize_debounce_ms: 200,
            accent: [0, 180, 216],
            particle_alpha: 0.6,
            max_line_alpha: 0.3,
            line_width: 0.5,
        }
    }
}

impl FieldSettings {
    /// Number of particles to spawn for a viewport of the given width.
    pub fn particle_count(&self, viewport_width: f64) -> usize {
        if viewport_width < self.compact_breakpoint {
            self.compact_count
        } else {
            self.full_count
        }
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    /// Fill color for particle dots.
    pub fn particle_color(&self) -> Rgba {
        Rgba::opaque(self.accent).with_alpha(self.particle_alpha)
    }

    /// Stroke color for a connection of the given alpha.
    pub fn line_color(&self, alpha: f32) -> Rgba {
        Rgba::opaque(self.accent).with_alpha(alpha)
    }
}

/// Settings of the terminal host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplaySettings {
    /// Target frame rate of the animation loop.
    pub fps: u32,
    /// Text centered over the hero.
    pub title: String,
    /// Draw the particle canvas at all.
    pub canvas: bool,
    /// Terminal background the alpha channel is composited over.
    pub background: [u8; 3],
    /// Cell size in pixels when the terminal does not report one.
    pub cell_width_px: u16,
    pub cell_height_px: u16,
    /// Start with motion reduced.
    pub reduced_motion: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            fps: 60,
            title: "plexus".to_string(),
            canvas: true,
            background: [0, 0, 0],
            cell_width_px: 8,
            cell_height_px: 16,
            reduced_motion: false,
        }
    }
}

impl DisplaySettings {
    /// Time between two animation frames.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_micros(1_000_000 / u64::from(self.fps.max(1)))
    }
}
