//! Shared drawing primitives: engine glow, ground shadow and the pseudo-3D
//! compositor every entity is drawn through.

use bevy::prelude::*;

use super::canvas::{Canvas, CompositeOp, LinearGradient, Paint};

/// Ground shadow color.
const SHADOW_COLOR: Color = Color::srgba(0.0, 0.0, 0.0, 0.35);

/// Animated engine plume pointing along -x from (x, y).
///
/// `w` is the plume's width at the nozzle, `h` its nominal length. The length
/// pulses over `time`; `phase` staggers engines that share a hull.
#[allow(clippy::too_many_arguments)]
pub fn draw_volumetric_thruster<C: Canvas + ?Sized>(
    canvas: &mut C,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    color: Color,
    time: f32,
    phase: f32,
) {
    let pulse = 0.85 + 0.15 * ((time + phase) / 40.0).sin();
    let length = h * pulse;
    let half = w * 0.5;

    canvas.save();
    canvas.set_composite(CompositeOp::Lighter);
    canvas.set_glow(color, w * 1.5);

    // Outer plume fades out toward the tail
    let plume = LinearGradient::new(x, y, x - length, y)
        .with_stop(0.0, color)
        .with_stop(1.0, color.with_alpha(0.0));
    canvas.set_fill(plume.into());
    canvas.begin_path();
    canvas.move_to(x, y - half);
    canvas.line_to(x - length, y);
    canvas.line_to(x, y + half);
    canvas.close_path();
    canvas.fill();

    // Hot core
    let core_length = length * 0.45;
    let core_half = half * 0.4;
    canvas.set_glow(color, 0.0);
    canvas.set_global_alpha(0.8);
    canvas.set_fill(Paint::Solid(Color::WHITE));
    canvas.begin_path();
    canvas.move_to(x, y - core_half);
    canvas.line_to(x - core_length, y);
    canvas.line_to(x, y + core_half);
    canvas.close_path();
    canvas.fill();

    canvas.restore();
}

/// Flattened translucent disc on the ground plane.
pub fn draw_shadow<C: Canvas + ?Sized>(canvas: &mut C, x: f32, y: f32, radius: f32, blur: f32) {
    canvas.save();
    canvas.set_fill(Paint::Solid(SHADOW_COLOR));
    canvas.set_glow(SHADOW_COLOR, blur);
    canvas.translate(x, y);
    canvas.scale(1.0, 0.5);
    canvas.circle_path(0.0, 0.0, radius.max(0.0));
    canvas.fill();
    canvas.restore();
}

/// The three layers of a pseudo-3D entity, drawn back to front.
pub trait DrawPlan {
    /// Ground layer. Origin at the entity's base, unrotated.
    fn shadow<C: Canvas + ?Sized>(&mut self, canvas: &mut C);
    /// Side layer between ground and top. Origin at the base; `offset` is the
    /// vertical screen offset of the top face (negative = up).
    fn body<C: Canvas + ?Sized>(&mut self, canvas: &mut C, offset: f32);
    /// Top face. Origin at the top face, rotated to the entity's facing.
    fn top<C: Canvas + ?Sized>(&mut self, canvas: &mut C, offset: f32);
}

/// Screen-local points of interest returned by [`draw_entity_25d`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchors {
    /// Where the entity meets its hover height.
    pub base: Vec2,
    /// Center of the top face.
    pub top: Vec2,
}

/// Draw an entity as a lifted top face over a ground shadow.
///
/// The top face is raised by `height * tilt` screen units, so a camera tilt of
/// zero collapses all layers onto the base point.
pub fn draw_entity_25d<C, P>(
    canvas: &mut C,
    x: f32,
    y: f32,
    height: f32,
    tilt: f32,
    angle: f32,
    plan: &mut P,
) -> Anchors
where
    C: Canvas + ?Sized,
    P: DrawPlan,
{
    let offset = -height * tilt;

    canvas.save();
    canvas.translate(x, y);
    plan.shadow(canvas);
    canvas.restore();

    canvas.save();
    canvas.translate(x, y);
    plan.body(canvas, offset);
    canvas.restore();

    canvas.save();
    canvas.translate(x, y + offset);
    canvas.rotate(angle);
    plan.top(canvas, offset);
    canvas.restore();

    Anchors {
        base: Vec2::new(x, y),
        top: Vec2::new(x, y + offset),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::display_list::{DisplayList, DrawCommand};
    use approx::assert_relative_eq;

    /// Records the origin each layer sees.
    #[derive(Default)]
    struct OriginRecorder {
        shadow: Option<Vec2>,
        body: Option<(Vec2, f32)>,
        top: Option<(Vec2, f32)>,
        top_x_axis: Option<Vec2>,
    }

    impl DrawPlan for OriginRecorder {
        fn shadow<C: Canvas + ?Sized>(&mut self, canvas: &mut C) {
            self.shadow = Some(canvas.transform().translation);
        }

        fn body<C: Canvas + ?Sized>(&mut self, canvas: &mut C, offset: f32) {
            self.body = Some((canvas.transform().translation, offset));
        }

        fn top<C: Canvas + ?Sized>(&mut self, canvas: &mut C, offset: f32) {
            let transform = canvas.transform();
            self.top = Some((transform.translation, offset));
            self.top_x_axis = Some(transform.transform_vector2(Vec2::X));
        }
    }

    #[test]
    fn layers_are_positioned_and_rotated() {
        let mut list = DisplayList::new();
        let mut recorder = OriginRecorder::default();

        let anchors = draw_entity_25d(
            &mut list,
            2.0,
            3.0,
            20.0,
            0.5,
            std::f32::consts::FRAC_PI_2,
            &mut recorder,
        );

        assert_eq!(recorder.shadow, Some(Vec2::new(2.0, 3.0)));
        assert_eq!(recorder.body, Some((Vec2::new(2.0, 3.0), -10.0)));
        assert_eq!(recorder.top, Some((Vec2::new(2.0, -7.0), -10.0)));
        let x_axis = recorder.top_x_axis.unwrap();
        assert_relative_eq!(x_axis.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(x_axis.y, 1.0, epsilon = 1e-6);

        assert_eq!(anchors.base, Vec2::new(2.0, 3.0));
        assert_eq!(anchors.top, Vec2::new(2.0, -7.0));
        assert_eq!(list.save_depth(), 0);
    }

    #[test]
    fn zero_tilt_collapses_layers() {
        let mut list = DisplayList::new();
        let mut recorder = OriginRecorder::default();
        let anchors = draw_entity_25d(&mut list, 0.0, 4.0, 30.0, 0.0, 0.0, &mut recorder);
        assert_eq!(anchors.top, anchors.base);
    }

    #[test]
    fn shadow_is_flattened() {
        let mut list = DisplayList::new();
        draw_shadow(&mut list, 0.0, 0.0, 10.0, 8.0);

        let command = &list.commands()[0];
        assert!(command.is_fill());
        let max_y = command.points().map(|p| p.y.abs()).fold(0.0, f32::max);
        let max_x = command.points().map(|p| p.x.abs()).fold(0.0, f32::max);
        assert_relative_eq!(max_x, 10.0, epsilon = 1e-3);
        assert_relative_eq!(max_y, 5.0, epsilon = 1e-3);
        assert_eq!(command.effects().glow.map(|g| g.blur), Some(8.0));
    }

    #[test]
    fn thruster_plume_trails_behind_nozzle() {
        let mut list = DisplayList::new();
        draw_volumetric_thruster(&mut list, -10.0, 0.0, 6.0, 18.0, Color::WHITE, 0.0, 0.0);

        assert_eq!(list.len(), 2);
        for command in list.commands() {
            assert!(command.points().all(|p| p.x <= -10.0 + f32::EPSILON));
            assert_eq!(command.effects().composite, CompositeOp::Lighter);
        }
        assert!(matches!(list.commands()[0], DrawCommand::Fill { paint: Paint::Linear(_), .. }));
        assert_eq!(list.save_depth(), 0);
    }

    #[test]
    fn thruster_length_depends_on_phase() {
        let tail = |phase: f32| {
            let mut list = DisplayList::new();
            draw_volumetric_thruster(&mut list, 0.0, 0.0, 4.0, 30.0, Color::WHITE, 0.0, phase);
            list.commands()[0].points().map(|p| p.x).fold(0.0, f32::min)
        };
        assert!((tail(100.0) - tail(200.0)).abs() > 0.1);
    }
}
