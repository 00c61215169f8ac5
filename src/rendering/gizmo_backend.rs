//! Replays a [`DisplayList`] through Bevy gizmos.
//!
//! Gizmos only draw lines, so fills become outlines in the paint's dominant
//! color, glow and blend modes are dropped, and dashes are cut on the CPU.

use bevy::prelude::*;

use super::camera::screen_to_world;
use super::display_list::{DisplayList, DrawCommand, Effects};

/// Paint color with the command's global alpha applied.
fn effective_color(color: Color, effects: &Effects) -> Color {
    color.with_alpha(color.alpha() * effects.alpha)
}

/// Shortest dash period worth cutting; anything finer draws solid.
const MIN_DASH_PERIOD: f32 = 1e-3;

/// Split a polyline into the "on" segments of a dash pattern.
///
/// `pattern` alternates on and off lengths; an empty pattern, or one whose
/// period is too short to advance along an edge, yields the polyline's own
/// segments.
pub fn dash_segments(points: &[Vec2], closed: bool, pattern: &[f32]) -> Vec<(Vec2, Vec2)> {
    let mut edges: Vec<(Vec2, Vec2)> = points.windows(2).map(|w| (w[0], w[1])).collect();
    if closed {
        if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
            if first != last {
                edges.push((last, first));
            }
        }
    }

    let period: f32 = pattern.iter().sum();
    if pattern.is_empty() || period < MIN_DASH_PERIOD {
        return edges;
    }

    let mut segments = Vec::new();
    let mut index = 0;
    let mut remaining = pattern[0];
    let mut on = true;

    for (start, end) in edges {
        let length = start.distance(end);
        if length <= f32::EPSILON {
            continue;
        }
        // A full period must move `travelled` by at least one float step
        if period <= length * f32::EPSILON * 4.0 {
            segments.push((start, end));
            continue;
        }
        let direction = (end - start) / length;
        let mut travelled = 0.0;

        while travelled < length {
            let step = remaining.min(length - travelled);
            if on && step > 0.0 {
                let from = start + direction * travelled;
                segments.push((from, from + direction * step));
            }
            travelled += step;
            remaining -= step;

            if remaining <= f32::EPSILON {
                index = (index + 1) % pattern.len();
                remaining = pattern[index];
                on = !on;
            }
        }
    }

    segments
}

/// Draw every command of `list`, mapping screen space into a world centered on
/// an arena of size `arena`.
pub fn replay_with_gizmos(list: &DisplayList, gizmos: &mut Gizmos, arena: Vec2) {
    for command in list.commands() {
        let color = effective_color(command.paint().flat_color(), command.effects());

        for sub in command.path() {
            let points: Vec<Vec2> = sub.points.iter().map(|p| screen_to_world(*p, arena)).collect();

            match command {
                DrawCommand::Fill { .. } => {
                    let outline = points.iter().copied().chain(points.first().copied());
                    gizmos.linestrip_2d(outline, color);
                }
                DrawCommand::Stroke { dash, .. } if dash.is_empty() => {
                    let closing = if sub.closed { points.first().copied() } else { None };
                    gizmos.linestrip_2d(points.iter().copied().chain(closing), color);
                }
                DrawCommand::Stroke { dash, .. } => {
                    for (start, end) in dash_segments(&points, sub.closed, dash) {
                        gizmos.line_2d(start, end, color);
                    }
                }
            }
        }
    }
}
