//! Recording canvas.
//!
//! `DisplayList` implements [`Canvas`] by resolving every fill and stroke into
//! a [`DrawCommand`] in surface space: points already transformed, arcs
//! flattened, style captured. A backend replays the list once per frame.

use bevy::math::Affine2;
use bevy::prelude::*;
use std::f32::consts::TAU;

use super::canvas::{Canvas, CompositeOp, Glow, Paint};

/// Line segments used for a full circle.
const ARC_SEGMENTS: f32 = 32.0;

/// Style applied on top of the paint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Effects {
    pub alpha: f32,
    pub composite: CompositeOp,
    pub glow: Option<Glow>,
}

impl Default for Effects {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            composite: CompositeOp::SourceOver,
            glow: None,
        }
    }
}

/// A run of connected points in surface space.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubPath {
    pub points: Vec<Vec2>,
    pub closed: bool,
}

/// One resolved draw.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill {
        path: Vec<SubPath>,
        paint: Paint,
        effects: Effects,
    },
    Stroke {
        path: Vec<SubPath>,
        paint: Paint,
        width: f32,
        dash: Vec<f32>,
        effects: Effects,
    },
}

impl DrawCommand {
    pub fn path(&self) -> &[SubPath] {
        match self {
            DrawCommand::Fill { path, .. } | DrawCommand::Stroke { path, .. } => path,
        }
    }

    pub fn paint(&self) -> &Paint {
        match self {
            DrawCommand::Fill { paint, .. } | DrawCommand::Stroke { paint, .. } => paint,
        }
    }

    pub fn effects(&self) -> &Effects {
        match self {
            DrawCommand::Fill { effects, .. } | DrawCommand::Stroke { effects, .. } => effects,
        }
    }

    pub fn is_fill(&self) -> bool {
        matches!(self, DrawCommand::Fill { .. })
    }

    /// Every point of every subpath.
    pub fn points(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.path().iter().flat_map(|sub| sub.points.iter().copied())
    }
}

#[derive(Debug, Clone)]
struct DrawState {
    transform: Affine2,
    fill: Paint,
    stroke: Paint,
    line_width: f32,
    dash: Vec<f32>,
    effects: Effects,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Affine2::IDENTITY,
            fill: Paint::Solid(Color::BLACK),
            stroke: Paint::Solid(Color::BLACK),
            line_width: 1.0,
            dash: Vec::new(),
            effects: Effects::default(),
        }
    }
}

impl DrawState {
    /// Uniform scale factor of the transform, for widths and dash lengths.
    fn length_scale(&self) -> f32 {
        self.transform.matrix2.determinant().abs().sqrt()
    }
}

/// A [`Canvas`] that records resolved draw commands.
#[derive(Debug, Default)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
    state: DrawState,
    stack: Vec<DrawState>,
    path: Vec<SubPath>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of unmatched `save` calls.
    pub fn save_depth(&self) -> usize {
        self.stack.len()
    }

    fn to_surface(&self, x: f32, y: f32) -> Vec2 {
        self.state.transform.transform_point2(Vec2::new(x, y))
    }

    fn current_open(&mut self) -> Option<&mut SubPath> {
        self.path.last_mut().filter(|sub| !sub.closed)
    }

    fn push_point(&mut self, point: Vec2) {
        match self.current_open() {
            Some(sub) => sub.points.push(point),
            None => self.path.push(SubPath {
                points: vec![point],
                closed: false,
            }),
        }
    }

    /// Subpaths that can actually be drawn.
    fn drawable_path(&self) -> Vec<SubPath> {
        self.path
            .iter()
            .filter(|sub| sub.points.len() >= 2)
            .cloned()
            .collect()
    }
}

impl Canvas for DisplayList {
    fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.state.transform = self.state.transform * Affine2::from_translation(Vec2::new(x, y));
    }

    fn rotate(&mut self, angle: f32) {
        self.state.transform = self.state.transform * Affine2::from_angle(angle);
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.state.transform = self.state.transform * Affine2::from_scale(Vec2::new(sx, sy));
    }

    fn transform(&self) -> Affine2 {
        self.state.transform
    }

    fn set_fill(&mut self, paint: Paint) {
        self.state.fill = paint;
    }

    fn set_stroke(&mut self, paint: Paint) {
        self.state.stroke = paint;
    }

    fn set_line_width(&mut self, width: f32) {
        if width.is_finite() && width > 0.0 {
            self.state.line_width = width;
        }
    }

    fn set_line_dash(&mut self, segments: &[f32]) {
        let valid = segments.iter().all(|s| s.is_finite() && *s >= 0.0);
        if valid {
            self.state.dash = segments.to_vec();
        }
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        if alpha.is_finite() {
            self.state.effects.alpha = alpha.clamp(0.0, 1.0);
        }
    }

    fn set_composite(&mut self, op: CompositeOp) {
        self.state.effects.composite = op;
    }

    fn set_glow(&mut self, color: Color, blur: f32) {
        self.state.effects.glow = (blur > 0.0).then_some(Glow { color, blur });
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        let point = self.to_surface(x, y);
        self.path.push(SubPath {
            points: vec![point],
            closed: false,
        });
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let point = self.to_surface(x, y);
        self.push_point(point);
    }

    fn arc(&mut self, cx: f32, cy: f32, radius: f32, start: f32, end: f32) {
        let sweep = end - start;
        let steps = ((sweep.abs() / TAU) * ARC_SEGMENTS).ceil().max(1.0) as usize;

        for i in 0..=steps {
            let angle = start + sweep * (i as f32 / steps as f32);
            let point = self.to_surface(cx + radius * angle.cos(), cy + radius * angle.sin());
            self.push_point(point);
        }
    }

    fn close_path(&mut self) {
        let Some(sub) = self.current_open() else {
            return;
        };
        sub.closed = true;
        let first = sub.points.first().copied();

        // Drawing continues from the start of the closed subpath
        if let Some(first) = first {
            self.path.push(SubPath {
                points: vec![first],
                closed: false,
            });
        }
    }

    fn fill(&mut self) {
        let path = self.drawable_path();
        if path.is_empty() {
            return;
        }
        self.commands.push(DrawCommand::Fill {
            path,
            paint: self.state.fill.transformed(&self.state.transform),
            effects: self.state.effects,
        });
    }

    fn stroke(&mut self) {
        let path = self.drawable_path();
        if path.is_empty() {
            return;
        }
        let scale = self.state.length_scale();
        self.commands.push(DrawCommand::Stroke {
            path,
            paint: self.state.stroke.transformed(&self.state.transform),
            width: self.state.line_width * scale,
            dash: self.state.dash.iter().map(|d| d * scale).collect(),
            effects: self.state.effects,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn points_are_recorded_in_surface_space() {
        let mut list = DisplayList::new();
        list.translate(10.0, 20.0);
        list.scale(2.0, 2.0);
        list.begin_path();
        list.move_to(0.0, 0.0);
        list.line_to(5.0, 0.0);
        list.line_to(5.0, 5.0);
        list.close_path();
        list.fill();

        let points: Vec<Vec2> = list.commands()[0].points().collect();
        assert_eq!(
            points,
            vec![Vec2::new(10.0, 20.0), Vec2::new(20.0, 20.0), Vec2::new(20.0, 30.0)]
        );
        assert!(list.commands()[0].path()[0].closed);
    }

    #[test]
    fn rotation_turns_x_into_y() {
        let mut list = DisplayList::new();
        list.rotate(FRAC_PI_2);
        let p = list.transform().transform_point2(Vec2::new(1.0, 0.0));
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn restore_rewinds_transform_and_style() {
        let mut list = DisplayList::new();
        list.save();
        list.translate(5.0, 5.0);
        list.set_global_alpha(0.3);
        list.set_composite(CompositeOp::Screen);
        list.restore();

        list.fill_rect(0.0, 0.0, 1.0, 1.0);
        let command = &list.commands()[0];
        assert_eq!(command.effects(), &Effects::default());
        assert_eq!(command.points().next(), Some(Vec2::ZERO));
        assert_eq!(list.save_depth(), 0);
    }

    #[test]
    fn unbalanced_restore_is_ignored() {
        let mut list = DisplayList::new();
        list.translate(1.0, 0.0);
        list.restore();
        assert_eq!(list.transform().translation, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn path_survives_fill_for_a_following_stroke() {
        let mut list = DisplayList::new();
        list.begin_path();
        list.move_to(0.0, 0.0);
        list.line_to(1.0, 0.0);
        list.line_to(1.0, 1.0);
        list.fill();
        list.stroke();
        assert_eq!(list.len(), 2);
        assert_eq!(list.commands()[0].path(), list.commands()[1].path());
    }

    #[test]
    fn full_arc_is_flattened_on_the_circle() {
        let mut list = DisplayList::new();
        list.circle_path(3.0, 4.0, 2.0);
        list.stroke();

        let points: Vec<Vec2> = list.commands()[0].points().collect();
        assert_eq!(points.len(), ARC_SEGMENTS as usize + 1);
        for p in points {
            assert_relative_eq!(p.distance(Vec2::new(3.0, 4.0)), 2.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn stroke_width_and_dash_follow_scale() {
        let mut list = DisplayList::new();
        list.scale(2.0, 2.0);
        list.set_line_width(3.0);
        list.set_line_dash(&[5.0, 5.0]);
        list.stroke_rect(0.0, 0.0, 1.0, 1.0);

        match &list.commands()[0] {
            DrawCommand::Stroke { width, dash, .. } => {
                assert_relative_eq!(*width, 6.0);
                assert_eq!(dash, &vec![10.0, 10.0]);
            }
            DrawCommand::Fill { .. } => panic!("expected a stroke"),
        }
    }

    #[test]
    fn empty_paths_record_nothing() {
        let mut list = DisplayList::new();
        list.begin_path();
        list.fill();
        list.move_to(1.0, 1.0);
        list.stroke();
        assert!(list.is_empty());
    }

    #[test]
    fn zero_blur_turns_glow_off() {
        let mut list = DisplayList::new();
        list.set_glow(Color::WHITE, 10.0);
        list.set_glow(Color::WHITE, 0.0);
        list.fill_rect(0.0, 0.0, 1.0, 1.0);
        assert_eq!(list.commands()[0].effects().glow, None);
    }
}
