//! Rendering module - procedural 2D drawing of arena entities.

pub mod camera;
pub mod canvas;
pub mod display_list;
pub mod enemy;
mod gizmo_backend;
mod plugin;
pub mod primitives;

pub use camera::{local_to_screen, ArenaCamera};
pub use canvas::{Canvas, CompositeOp, LinearGradient, Paint};
pub use display_list::{DisplayList, DrawCommand};
pub use enemy::{render_enemy, EnemyStyle, RenderContext};
pub use gizmo_backend::{dash_segments, replay_with_gizmos};
pub use plugin::{build_enemy_frame, draw_enemies, RenderingPlugin};
pub use primitives::{draw_entity_25d, draw_shadow, draw_volumetric_thruster, Anchors, DrawPlan};
