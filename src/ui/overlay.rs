//! Screen-space overlay - draws the UI requests produced by world renderers.

use bevy::prelude::*;

use crate::core::{GameSettings, UiRequest};
use crate::rendering::canvas::{hex, Canvas, Paint};
use crate::rendering::{replay_with_gizmos, DisplayList};

/// Health bar backing color.
const BAR_BACKGROUND: Color = hex(0x111111);

/// Fraction of a bar to fill. Bars with no maximum show empty.
pub fn fill_ratio(value: f32, max: f32) -> f32 {
    if max > 0.0 {
        (value / max).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Draw one request into `canvas`. Bars are centered on the request's point.
pub fn draw_request<C: Canvas + ?Sized>(canvas: &mut C, request: &UiRequest) {
    match *request {
        UiRequest::HealthBar { x, y, value, max, color, width, height } => {
            let left = x - width * 0.5;
            let top = y - height * 0.5;

            canvas.save();
            canvas.set_global_alpha(0.8);
            canvas.set_fill(Paint::Solid(BAR_BACKGROUND));
            canvas.fill_rect(left, top, width, height);
            canvas.restore();

            let filled = width * fill_ratio(value, max);
            if filled > 0.0 {
                canvas.set_fill(Paint::Solid(color));
                canvas.fill_rect(left, top, filled, height);
            }
        }
    }
}

/// Draw this frame's UI requests.
pub fn draw_ui_requests(
    mut gizmos: Gizmos,
    settings: Res<GameSettings>,
    mut requests: EventReader<UiRequest>,
) {
    let mut list = DisplayList::new();
    for request in requests.read() {
        draw_request(&mut list, request);
    }
    replay_with_gizmos(&list, &mut gizmos, settings.arena_size());
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bar(value: f32, max: f32) -> UiRequest {
        UiRequest::HealthBar {
            x: 100.0,
            y: 50.0,
            value,
            max,
            color: hex(0x00ff00),
            width: 30.0,
            height: 4.0,
        }
    }

    fn extent_x(list: &DisplayList, index: usize) -> (f32, f32) {
        let xs: Vec<f32> = list.commands()[index].points().map(|p| p.x).collect();
        (
            xs.iter().cloned().fold(f32::MAX, f32::min),
            xs.iter().cloned().fold(f32::MIN, f32::max),
        )
    }

    #[test]
    fn fill_is_proportional_to_health() {
        let mut list = DisplayList::new();
        draw_request(&mut list, &bar(5.0, 10.0));

        assert_eq!(list.len(), 2);
        assert_eq!(extent_x(&list, 0), (85.0, 115.0));
        let (left, right) = extent_x(&list, 1);
        assert_relative_eq!(left, 85.0);
        assert_relative_eq!(right, 100.0);
        assert_eq!(list.commands()[1].paint(), &Paint::Solid(hex(0x00ff00)));
    }

    #[test]
    fn empty_bar_draws_only_the_background() {
        let mut list = DisplayList::new();
        draw_request(&mut list, &bar(0.0, 10.0));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn ratios_are_clamped() {
        assert_eq!(fill_ratio(15.0, 10.0), 1.0);
        assert_eq!(fill_ratio(-2.0, 10.0), 0.0);
        assert_eq!(fill_ratio(3.0, 0.0), 0.0);
    }
}
