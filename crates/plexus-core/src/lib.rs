//! Core types for the plexus particle network.
//!
//! Plain geometry and color values shared by the field simulation, the
//! configuration loader and the terminal host, plus the tunable
//! [`FieldSettings`].

mod color;
mod geometry;
mod settings;

pub use color::Rgba;
pub use geometry::{Point, Rect, Size, Transform};
pub use settings::{DisplaySettings, FieldSettings};
