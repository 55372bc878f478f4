//! Seams between the animator and the host it runs in.

use plexus_core::{Point, Rect, Rgba, Size, Transform};

/// An immediate-mode 2D drawing target.
///
/// Coordinates passed to the drawing calls are logical (CSS pixel) units;
/// the current transform maps them onto the backing store.
pub trait Surface {
    /// Resize the backing store in device pixels. Discards its contents.
    fn set_backing_size(&mut self, width: u32, height: u32);

    /// Size the surface occupies on screen, in logical units.
    fn set_display_size(&mut self, size: Size);

    fn set_transform(&mut self, transform: Transform);

    fn clear_rect(&mut self, rect: Rect);

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba);

    fn stroke_line(&mut self, from: Point, to: Point, color: Rgba, width: f64);
}

/// Opaque handle to a frame callback requested from a [`FrameScheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Runs a callback before the next display refresh.
///
/// The host invokes the animator's frame step with the handle returned
/// here once the frame is due.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;

    /// Drop a pending request. Unknown or already fired handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Read-only view of the host the field is embedded in.
pub trait Environment {
    /// Width of the whole viewport in logical pixels.
    fn viewport_width(&self) -> f64;

    /// Device pixels per logical pixel.
    fn device_pixel_ratio(&self) -> f64;

    /// On-screen size of the hero region the field fills.
    fn hero_size(&self) -> Size;

    /// Whether the user asked for reduced motion.
    fn prefers_reduced_motion(&self) -> bool;
}
