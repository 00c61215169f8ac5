//! Immediate-mode 2D drawing surface.
//!
//! Mirrors the usual canvas model: a transform and style state that can be
//! saved and restored, a current path built from `move_to`/`line_to`/`arc`,
//! and `fill`/`stroke` calls that consume the current state.

use bevy::math::Affine2;
use bevy::prelude::*;

/// How a draw blends with what is already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompositeOp {
    #[default]
    SourceOver,
    Screen,
    /// Additive.
    Lighter,
}

/// A color position along a gradient, `offset` in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Color,
}

/// Gradient between two points.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Vec2,
    pub end: Vec2,
    pub stops: Vec<ColorStop>,
}

impl LinearGradient {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            start: Vec2::new(x0, y0),
            end: Vec2::new(x1, y1),
            stops: Vec::new(),
        }
    }

    pub fn with_stop(mut self, offset: f32, color: Color) -> Self {
        self.stops.push(ColorStop {
            offset: offset.clamp(0.0, 1.0),
            color,
        });
        self
    }

    /// The stop closest to the middle of the gradient.
    pub fn dominant_color(&self) -> Color {
        self.stops
            .iter()
            .min_by(|a, b| {
                let da = (a.offset - 0.5).abs();
                let db = (b.offset - 0.5).abs();
                da.total_cmp(&db)
            })
            .map_or(Color::NONE, |stop| stop.color)
    }
}

/// What a fill or stroke is painted with.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    Linear(LinearGradient),
}

impl Paint {
    /// Representative single color, for backends without gradient support.
    pub fn flat_color(&self) -> Color {
        match self {
            Paint::Solid(color) => *color,
            Paint::Linear(gradient) => gradient.dominant_color(),
        }
    }

    /// Map gradient endpoints through `transform`.
    pub fn transformed(&self, transform: &Affine2) -> Paint {
        match self {
            Paint::Solid(color) => Paint::Solid(*color),
            Paint::Linear(gradient) => Paint::Linear(LinearGradient {
                start: transform.transform_point2(gradient.start),
                end: transform.transform_point2(gradient.end),
                stops: gradient.stops.clone(),
            }),
        }
    }
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}

impl From<LinearGradient> for Paint {
    fn from(gradient: LinearGradient) -> Self {
        Paint::Linear(gradient)
    }
}

/// Blurred halo drawn behind shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub color: Color,
    pub blur: f32,
}

/// An immediate-mode 2D drawing surface.
pub trait Canvas {
    /// Push the current transform and style.
    fn save(&mut self);
    /// Pop back to the last saved transform and style. No-op when nothing is saved.
    fn restore(&mut self);

    fn translate(&mut self, x: f32, y: f32);
    fn rotate(&mut self, angle: f32);
    fn scale(&mut self, sx: f32, sy: f32);
    /// Current local-to-surface transform.
    fn transform(&self) -> Affine2;

    fn set_fill(&mut self, paint: Paint);
    fn set_stroke(&mut self, paint: Paint);
    fn set_line_width(&mut self, width: f32);
    /// Alternating on/off lengths for strokes. Empty means solid.
    fn set_line_dash(&mut self, segments: &[f32]);
    fn set_global_alpha(&mut self, alpha: f32);
    fn set_composite(&mut self, op: CompositeOp);
    /// Glow around subsequent draws. A blur of zero turns it off.
    fn set_glow(&mut self, color: Color, blur: f32);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    /// Circular arc around (cx, cy) from `start` to `end` radians, clockwise in
    /// screen space.
    fn arc(&mut self, cx: f32, cy: f32, radius: f32, start: f32, end: f32);
    fn close_path(&mut self);

    fn fill(&mut self);
    fn stroke(&mut self);

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.begin_path();
        self.move_to(x, y);
        self.line_to(x + w, y);
        self.line_to(x + w, y + h);
        self.line_to(x, y + h);
        self.close_path();
        self.fill();
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.begin_path();
        self.move_to(x, y);
        self.line_to(x + w, y);
        self.line_to(x + w, y + h);
        self.line_to(x, y + h);
        self.close_path();
        self.stroke();
    }

    /// Full circle as a fresh path.
    fn circle_path(&mut self, cx: f32, cy: f32, radius: f32) {
        self.begin_path();
        self.arc(cx, cy, radius, 0.0, std::f32::consts::TAU);
    }
}

/// Build a color from a packed `0xRRGGBB` literal.
pub const fn hex(rgb: u32) -> Color {
    let r = ((rgb >> 16) & 0xff) as f32 / 255.0;
    let g = ((rgb >> 8) & 0xff) as f32 / 255.0;
    let b = (rgb & 0xff) as f32 / 255.0;
    Color::srgb(r, g, b)
}
