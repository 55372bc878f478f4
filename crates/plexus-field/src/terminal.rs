//! A [`Surface`] that renders into a ratatui buffer as a braille canvas.

use plexus_core::{DisplaySettings, Point, Rect, Rgba, Size, Transform};
use ratatui::{
    buffer::Buffer,
    layout::Rect as Area,
    style::Color,
    symbols::Marker,
    widgets::{
        Widget,
        canvas::{Canvas, Circle, Line as CanvasLine, Points},
    },
};

use crate::surface::Surface;

/// A recorded shape in backing-store coordinates (y grows downwards).
#[derive(Debug, Clone, PartialEq)]
enum Shape {
    Dot {
        center: Point,
        radius: f64,
        color: Color,
    },
    Segment {
        from: Point,
        to: Point,
        color: Color,
    },
}

impl Shape {
    fn bounds(&self) -> Rect {
        match *self {
            Shape::Dot { center, radius, .. } => Rect::new(
                center.x - radius,
                center.y - radius,
                radius * 2.0,
                radius * 2.0,
            ),
            Shape::Segment { from, to, .. } => Rect::new(
                from.x.min(to.x),
                from.y.min(to.y),
                (from.x - to.x).abs(),
                (from.y - to.y).abs(),
            ),
        }
    }
}

/// Display list replayed onto a ratatui [`Canvas`] on every draw.
///
/// Alpha is composited over the configured background when a shape is
/// recorded, since terminal cells have no transparency.
#[derive(Debug, Clone)]
pub struct TerminalSurface {
    backing_width: u32,
    backing_height: u32,
    display: Size,
    transform: Transform,
    background: [u8; 3],
    shapes: Vec<Shape>,
}

impl TerminalSurface {
    pub fn new(background: [u8; 3]) -> Self {
        Self {
            backing_width: 0,
            backing_height: 0,
            display: Size::default(),
            transform: Transform::IDENTITY,
            background,
            shapes: Vec::new(),
        }
    }

    /// Create a surface if this terminal session can show one.
    ///
    /// Returns `None` when the canvas is disabled or `NO_COLOR` is set.
    pub fn detect(display: &DisplaySettings) -> Option<Self> {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self::detect_with(display, no_color)
    }

    fn detect_with(display: &DisplaySettings, no_color: bool) -> Option<Self> {
        (display.canvas && !no_color).then(|| Self::new(display.background))
    }

    pub fn backing_size(&self) -> (u32, u32) {
        (self.backing_width, self.backing_height)
    }

    pub fn display_size(&self) -> Size {
        self.display
    }

    /// Number of recorded shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    fn color(&self, color: Rgba) -> Color {
        let [r, g, b] = color.over(self.background);
        Color::Rgb(r, g, b)
    }
}

impl Surface for TerminalSurface {
    fn set_backing_size(&mut self, width: u32, height: u32) {
        self.backing_width = width;
        self.backing_height = height;
        self.shapes.clear();
    }

    fn set_display_size(&mut self, size: Size) {
        self.display = size;
    }

    fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    fn clear_rect(&mut self, rect: Rect) {
        let origin = self.transform.apply(Point::new(rect.x, rect.y));
        let scale = self.transform.length_scale();
        let cleared = Rect::new(origin.x, origin.y, rect.width * scale, rect.height * scale);
        let whole = Rect::new(
            0.0,
            0.0,
            f64::from(self.backing_width),
            f64::from(self.backing_height),
        );
        if cleared.covers(&whole) {
            self.shapes.clear();
        } else {
            self.shapes.retain(|shape| !cleared.covers(&shape.bounds()));
        }
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        let shape = Shape::Dot {
            center: self.transform.apply(center),
            radius: radius * self.transform.length_scale(),
            color: self.color(color),
        };
        self.shapes.push(shape);
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Rgba, _width: f64) {
        let shape = Shape::Segment {
            from: self.transform.apply(from),
            to: self.transform.apply(to),
            color: self.color(color),
        };
        self.shapes.push(shape);
    }
}

impl Widget for &TerminalSurface {
    fn render(self, area: Area, buf: &mut Buffer) {
        if self.backing_width == 0 || self.backing_height == 0 {
            return;
        }
        let width = f64::from(self.backing_width);
        let height = f64::from(self.backing_height);
        let [r, g, b] = self.background;

        Canvas::default()
            .marker(Marker::Braille)
            .background_color(Color::Rgb(r, g, b))
            .x_bounds([0.0, width])
            .y_bounds([0.0, height])
            .paint(|ctx| {
                // Canvas y grows upwards
                for shape in &self.shapes {
                    if let Shape::Segment { from, to, color } = *shape {
                        ctx.draw(&CanvasLine {
                            x1: from.x,
                            y1: height - from.y,
                            x2: to.x,
                            y2: height - to.y,
                            color,
                        });
                    }
                }
                ctx.layer();
                for shape in &self.shapes {
                    if let Shape::Dot {
                        center,
                        radius,
                        color,
                    } = *shape
                    {
                        let (x, y) = (center.x, height - center.y);
                        if radius >= 1.0 {
                            ctx.draw(&Circle {
                                x,
                                y,
                                radius,
                                color,
                            });
                        } else {
                            ctx.draw(&Points {
                                coords: &[(x, y)],
                                color,
                            });
                        }
                    }
                }
            })
            .render(area, buf);
    }
}
