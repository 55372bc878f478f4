//! Recording doubles for the host seams.

use plexus_core::{Point, Rect, Rgba, Size, Transform};

use crate::surface::{Environment, FrameHandle, FrameScheduler, Surface};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    BackingSize(u32, u32),
    DisplaySize(Size),
    Transform(Transform),
    Clear(Rect),
    Circle(Point, f64, Rgba),
    Line(Point, Point, Rgba, f64),
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<Call>,
}

impl RecordingSurface {
    pub fn circles(&self) -> impl Iterator<Item = (Point, f64, Rgba)> + '_ {
        self.calls.iter().filter_map(|c| match *c {
            Call::Circle(p, r, color) => Some((p, r, color)),
            _ => None,
        })
    }

    pub fn lines(&self) -> impl Iterator<Item = (Point, Point, Rgba, f64)> + '_ {
        self.calls.iter().filter_map(|c| match *c {
            Call::Line(a, b, color, w) => Some((a, b, color, w)),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn set_backing_size(&mut self, width: u32, height: u32) {
        self.calls.push(Call::BackingSize(width, height));
    }

    fn set_display_size(&mut self, size: Size) {
        self.calls.push(Call::DisplaySize(size));
    }

    fn set_transform(&mut self, transform: Transform) {
        self.calls.push(Call::Transform(transform));
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.calls.push(Call::Clear(rect));
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        self.calls.push(Call::Circle(center, radius, color));
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Rgba, width: f64) {
        self.calls.push(Call::Line(from, to, color, width));
    }
}

/// Scheduler that only remembers what was asked of it.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pub pending: Vec<FrameHandle>,
    pub requested: usize,
    pub cancelled: usize,
}

impl ManualScheduler {
    /// Remove and return the single pending frame.
    pub fn take_one(&mut self) -> FrameHandle {
        assert_eq!(self.pending.len(), 1, "expected exactly one pending frame");
        self.pending.remove(0)
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle::new(self.next_id);
        self.pending.push(handle);
        self.requested += 1;
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|h| *h != handle);
        self.cancelled += 1;
    }
}

#[derive(Debug, Clone)]
pub struct FakeEnvironment {
    pub viewport_width: f64,
    pub device_pixel_ratio: f64,
    pub hero: Size,
    pub reduced_motion: bool,
}

impl Default for FakeEnvironment {
    fn default() -> Self {
        Self {
            viewport_width: 500.0,
            device_pixel_ratio: 2.0,
            hero: Size::new(500.0, 400.0),
            reduced_motion: false,
        }
    }
}

impl Environment for FakeEnvironment {
    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    fn hero_size(&self) -> Size {
        self.hero
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }
}
