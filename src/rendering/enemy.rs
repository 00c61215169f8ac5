//! Enemy visuals.
//!
//! Each kind has a recipe that draws its top face (engine, hull and
//! ornamentation) in a local frame facing +x. [`render_enemy`] picks colors,
//! facing and hover, then sends the recipe through the pseudo-3D compositor.

use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

use super::camera::local_to_screen;
use super::canvas::{hex, Canvas, CompositeOp, LinearGradient, Paint};
use super::primitives::{draw_entity_25d, draw_shadow, draw_volumetric_thruster, DrawPlan};
use crate::core::UiRequest;
use crate::enemies::{DashState, Enemy, EnemyKind};

/// Shooters start charging once their attack timer passes this many ms.
pub const CHARGE_THRESHOLD: f32 = 2000.0;
/// Time from charge start to a full charge, in ms.
pub const CHARGE_DURATION: f32 = 1000.0;

const HEALTH_BAR_COLOR: Color = hex(0x00ff00);
const STUN_COLOR: Color = hex(0x00ffff);
/// Distance the health bar floats above the top face.
const HEALTH_BAR_LIFT: f32 = 20.0;

/// Per-frame context shared by every enemy draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderContext {
    /// Size of one arena cell in pixels.
    pub grid_size: f32,
    /// Snake head position, when there is a snake to face.
    pub snake_head: Option<Vec2>,
    /// Animation clock in ms.
    pub now: f32,
    /// Suppress hit flashes.
    pub reduce_flashing: bool,
    /// Camera tilt for the pseudo-3D lift.
    pub tilt: f32,
}

/// Colors and proportions of one enemy kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStyle {
    pub accent: Color,
    pub hull: Color,
    pub scale: f32,
    /// Visual height above ground, used for the pseudo-3D lift.
    pub height: f32,
}

impl EnemyStyle {
    pub const fn for_kind(kind: EnemyKind) -> Self {
        match kind {
            EnemyKind::Hunter => Self {
                accent: hex(0xef4444),
                hull: hex(0x1a0505),
                scale: 1.0,
                height: 20.0,
            },
            EnemyKind::Interceptor => Self {
                accent: hex(0xd946ef),
                hull: hex(0x1a051a),
                scale: 0.9,
                // Flyers sit higher
                height: 30.0,
            },
            EnemyKind::Shooter => Self {
                accent: hex(0x22c55e),
                hull: hex(0x051a05),
                scale: 1.2,
                height: 25.0,
            },
            EnemyKind::Dasher => Self {
                accent: hex(0xf97316),
                hull: hex(0x1a1005),
                scale: 1.0,
                // Low profile
                height: 15.0,
            },
        }
    }

    /// Solid white, for hit feedback.
    pub const fn flashed(self) -> Self {
        Self {
            accent: Color::WHITE,
            hull: Color::WHITE,
            ..self
        }
    }
}

/// Heading in radians: toward the snake head if there is one, else along the
/// velocity, else 0.
pub fn facing_angle(enemy: &Enemy, snake_head: Option<Vec2>) -> f32 {
    if let Some(head) = snake_head {
        let delta = head - enemy.position;
        delta.y.atan2(delta.x)
    } else if enemy.velocity != Vec2::ZERO {
        enemy.velocity.y.atan2(enemy.velocity.x)
    } else {
        0.0
    }
}

/// Vertical bob. The x coordinate offsets the phase so enemies don't bob in
/// sync.
pub fn hover_offset(now: f32, x: f32) -> f32 {
    (now / 250.0 + x).sin() * 4.0
}

/// Shooter charge progress in [0, 1], or `None` while not charging.
pub fn charge_fraction(attack_timer: f32) -> Option<f32> {
    (attack_timer > CHARGE_THRESHOLD)
        .then(|| ((attack_timer - CHARGE_THRESHOLD) / CHARGE_DURATION).clamp(0.0, 1.0))
}

/// Engine size multiplier for a dasher.
pub const fn dash_boost(state: DashState) -> f32 {
    match state {
        DashState::Dash => 2.5,
        DashState::Idle | DashState::Charge => 1.0,
    }
}

fn fill_polygon<C: Canvas + ?Sized>(canvas: &mut C, points: &[(f32, f32)]) {
    let Some((&(x0, y0), rest)) = points.split_first() else {
        return;
    };
    canvas.begin_path();
    canvas.move_to(x0, y0);
    for &(x, y) in rest {
        canvas.line_to(x, y);
    }
    canvas.close_path();
    canvas.fill();
}

fn fill_circle<C: Canvas + ?Sized>(canvas: &mut C, cx: f32, cy: f32, radius: f32) {
    canvas.circle_path(cx, cy, radius);
    canvas.fill();
}

fn draw_hunter<C: Canvas + ?Sized>(canvas: &mut C, hull: Color, accent: Color, now: f32) {
    draw_volumetric_thruster(canvas, -10.0, 0.0, 6.0, 18.0, accent, now, 0.0);

    let body = LinearGradient::new(-10.0, 0.0, 10.0, 0.0)
        .with_stop(0.0, hex(0x111111))
        .with_stop(0.5, hull)
        .with_stop(1.0, hex(0x222222));
    canvas.set_fill(body.into());
    fill_polygon(canvas, &[(14.0, 0.0), (-8.0, 10.0), (-4.0, 0.0), (-8.0, -10.0)]);

    canvas.set_stroke(Paint::Solid(Color::srgba(1.0, 1.0, 1.0, 0.1)));
    canvas.set_line_width(1.0);
    canvas.stroke();

    // Eye
    canvas.set_fill(Paint::Solid(accent));
    canvas.set_glow(accent, 10.0);
    fill_circle(canvas, 2.0, 0.0, 3.0);
    canvas.set_fill(Paint::Solid(Color::WHITE));
    canvas.set_glow(accent, 0.0);
    fill_circle(canvas, 3.0, -1.0, 1.0);
}

fn draw_interceptor<C: Canvas + ?Sized>(canvas: &mut C, hull: Color, accent: Color, now: f32) {
    draw_volumetric_thruster(canvas, -8.0, -5.0, 4.0, 30.0, accent, now, 100.0);
    draw_volumetric_thruster(canvas, -8.0, 5.0, 4.0, 30.0, accent, now, 200.0);

    let body = LinearGradient::new(-10.0, 0.0, 20.0, 0.0)
        .with_stop(0.0, hex(0x000000))
        .with_stop(0.4, hull)
        .with_stop(1.0, hex(0xeeeeee));
    canvas.set_fill(body.into());
    fill_polygon(canvas, &[(22.0, 0.0), (-10.0, 6.0), (-6.0, 0.0), (-10.0, -6.0)]);

    // Wings
    canvas.set_fill(Paint::Solid(hex(0x1a1a1a)));
    fill_polygon(
        canvas,
        &[(-4.0, 0.0), (-12.0, 14.0), (-6.0, 4.0), (-6.0, -4.0), (-12.0, -14.0)],
    );

    // Lights
    canvas.set_fill(Paint::Solid(accent));
    canvas.fill_rect(-10.0, -5.0, 4.0, 2.0);
    canvas.fill_rect(-10.0, 3.0, 4.0, 2.0);
}

fn draw_shooter<C, R>(
    canvas: &mut C,
    hull: Color,
    accent: Color,
    now: f32,
    enemy: &Enemy,
    rng: &mut R,
)
where
    C: Canvas + ?Sized,
    R: Rng + ?Sized,
{
    draw_volumetric_thruster(canvas, -12.0, 0.0, 10.0, 12.0, accent, now, 0.0);

    canvas.set_fill(Paint::Solid(hull));
    fill_polygon(
        canvas,
        &[(8.0, -8.0), (8.0, 8.0), (-8.0, 12.0), (-14.0, 0.0), (-8.0, -12.0)],
    );

    canvas.set_fill(Paint::Solid(hex(0x222222)));
    canvas.fill_rect(-6.0, -6.0, 12.0, 12.0);

    // Cannon
    canvas.save();
    let charge = charge_fraction(enemy.attack_timer);
    let recoil = if charge.is_some() { (now * 0.5).sin() * 2.0 } else { 0.0 };
    canvas.set_fill(Paint::Solid(hex(0x111111)));
    canvas.fill_rect(-recoil, -3.0, 16.0, 6.0);
    canvas.set_fill(Paint::Solid(hex(0x444444)));
    fill_circle(canvas, 0.0, 0.0, 5.0);

    if let Some(charge) = charge {
        let flicker = rng.gen::<f32>() * 0.5 + 0.5;
        canvas.set_fill(Paint::Solid(accent));
        canvas.set_glow(accent, 10.0 * charge * flicker);
        fill_circle(canvas, 16.0 - recoil, 0.0, 2.0 + charge * 2.0);
        canvas.set_global_alpha(charge * 0.5);
        canvas.fill_rect(-4.0, -4.0, 8.0, 8.0);
    }
    canvas.restore();

    canvas.set_stroke(Paint::Solid(accent));
    canvas.set_line_width(1.0);
    canvas.stroke_rect(-5.0, -5.0, 10.0, 10.0);
}

fn draw_dasher<C, R>(
    canvas: &mut C,
    hull: Color,
    accent: Color,
    now: f32,
    enemy: &Enemy,
    rng: &mut R,
)
where
    C: Canvas + ?Sized,
    R: Rng + ?Sized,
{
    let dashing = enemy.dash_state == DashState::Dash;
    let boost = dash_boost(enemy.dash_state);
    draw_volumetric_thruster(canvas, -5.0, 0.0, 8.0 * boost, 15.0 * boost, accent, now, 0.0);

    canvas.set_fill(Paint::Solid(hull));
    fill_polygon(
        canvas,
        &[
            (16.0, 0.0),
            (4.0, 6.0),
            (-4.0, 10.0),
            (0.0, 4.0),
            (-8.0, 0.0),
            (0.0, -4.0),
            (-4.0, -10.0),
            (4.0, -6.0),
        ],
    );

    if enemy.dash_state != DashState::Idle {
        canvas.set_glow(accent, if dashing { 20.0 } else { 10.0 });
        canvas.set_stroke(Paint::Solid(accent));
        canvas.set_line_width(2.0);
        // Roughly one frame in ten drops the trail
        if rng.gen::<f32>() > 0.1 {
            for side in [1.0, -1.0] {
                canvas.begin_path();
                canvas.move_to(4.0, 6.0 * side);
                canvas.line_to(18.0, 10.0 * side);
                canvas.stroke();
            }
        }
        canvas.set_glow(accent, 0.0);
    }

    canvas.set_fill(Paint::Solid(Color::WHITE));
    canvas.begin_path();
    canvas.move_to(10.0, 0.0);
    canvas.line_to(2.0, 2.0);
    canvas.line_to(2.0, -2.0);
    canvas.fill();
}

/// Draw plan for one enemy.
struct EnemyPlan<'a, R: ?Sized> {
    enemy: &'a Enemy,
    ctx: &'a RenderContext,
    style: EnemyStyle,
    hover_y: f32,
    angle: f32,
    rng: &'a mut R,
}

impl<R: Rng + ?Sized> DrawPlan for EnemyPlan<'_, R> {
    fn shadow<C: Canvas + ?Sized>(&mut self, canvas: &mut C) {
        let shadow_scale = 1.0 - self.hover_y / 40.0;
        // The compositor leaves shadows unrotated; turn it with the hull,
        // pivoting on the ground point below the entity.
        canvas.save();
        canvas.translate(0.0, -self.hover_y);
        canvas.rotate(self.angle);
        let radius = self.ctx.grid_size * 0.9 * self.style.scale * shadow_scale;
        draw_shadow(canvas, 0.0, 0.0, radius, 8.0);
        canvas.restore();
    }

    fn body<C: Canvas + ?Sized>(&mut self, canvas: &mut C, offset: f32) {
        if self.ctx.tilt <= 0.1 {
            return;
        }
        canvas.save();
        canvas.set_fill(Paint::Solid(hex(0x0a0a0a)));
        canvas.set_stroke(Paint::Solid(self.style.accent));
        canvas.set_global_alpha(0.3);
        canvas.set_line_width(1.0);
        canvas.begin_path();
        canvas.move_to(0.0, 0.0);
        canvas.line_to(0.0, offset);
        canvas.stroke();
        canvas.restore();
    }

    fn top<C: Canvas + ?Sized>(&mut self, canvas: &mut C, _offset: f32) {
        let EnemyStyle { hull, accent, scale, .. } = self.style;
        let now = self.ctx.now;

        canvas.save();
        canvas.scale(scale, scale);

        match self.enemy.kind {
            EnemyKind::Hunter => draw_hunter(canvas, hull, accent, now),
            EnemyKind::Interceptor => draw_interceptor(canvas, hull, accent, now),
            EnemyKind::Shooter => {
                draw_shooter(canvas, hull, accent, now, self.enemy, &mut *self.rng)
            }
            EnemyKind::Dasher => {
                draw_dasher(canvas, hull, accent, now, self.enemy, &mut *self.rng)
            }
        }

        if self.enemy.stun_timer > 0.0 {
            canvas.save();
            canvas.set_composite(CompositeOp::Screen);
            canvas.set_stroke(Paint::Solid(STUN_COLOR));
            canvas.set_line_width(2.0);
            canvas.set_glow(STUN_COLOR, 10.0);
            canvas.rotate(now * 0.01);
            canvas.set_line_dash(&[5.0, 5.0]);
            canvas.begin_path();
            canvas.arc(0.0, 0.0, self.ctx.grid_size * 0.9, 0.0, TAU);
            canvas.stroke();
            canvas.restore();
        }

        canvas.restore();
    }
}

/// Draw `enemy` at the canvas origin.
///
/// The caller translates the canvas to the enemy's position first. Returns a
/// health bar request for damaged enemies, positioned in absolute screen
/// coordinates above the enemy.
pub fn render_enemy<C, R>(
    canvas: &mut C,
    enemy: &Enemy,
    ctx: &RenderContext,
    rng: &mut R,
) -> Option<UiRequest>
where
    C: Canvas + ?Sized,
    R: Rng + ?Sized,
{
    let mut style = EnemyStyle::for_kind(enemy.kind);
    if enemy.flash > 0.0 && !ctx.reduce_flashing {
        style = style.flashed();
    }

    let angle = facing_angle(enemy, ctx.snake_head);
    let hover_y = hover_offset(ctx.now, enemy.position.x);

    let mut plan = EnemyPlan {
        enemy,
        ctx,
        style,
        hover_y,
        angle,
        rng,
    };
    let anchors = draw_entity_25d(canvas, 0.0, hover_y, style.height, ctx.tilt, angle, &mut plan);

    if !enemy.is_damaged() {
        return None;
    }

    let screen = local_to_screen(&*canvas, anchors.top.x, anchors.top.y - HEALTH_BAR_LIFT);
    Some(UiRequest::HealthBar {
        x: screen.x,
        y: screen.y,
        value: enemy.hp,
        max: enemy.max_hp,
        color: HEALTH_BAR_COLOR,
        width: ctx.grid_size * 1.5,
        height: 4.0,
    })
}
