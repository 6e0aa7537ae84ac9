use glam::Vec3;

// Shared choreography tuning used by the web frontend.

// Reference frame rate that the per-frame blend factors were tuned at.
pub const REFERENCE_FPS: f32 = 60.0;

// Camera
pub const BASE_FOV_DEG: f32 = 45.0;
pub const INSPECTION_FOV_DEG: f32 = 38.0;
pub const INSPECTION_POSITION: Vec3 = Vec3::new(0.0, 1.1, 7.6);
pub const SECTION_TWEEN_SEC: f32 = 1.2;
pub const INSPECTION_TWEEN_SEC: f32 = 0.9;
pub const CAMERA_EASE_POWER: i32 = 3; // power3.out
pub const PARALLAX_X: f32 = 0.25;
pub const PARALLAX_Y: f32 = 0.18;
pub const PARALLAX_BLEND_PER_FRAME: f32 = 0.06;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;

// Mood blending
pub const MOOD_BLEND_PER_FRAME: f32 = 0.05;
pub const HOVER_PULL_BLEND_PER_FRAME: f32 = 0.08;
pub const HOVER_PULL_ACTIVE: f32 = 1.0;
pub const HOVER_PULL_PREVIEW: f32 = 0.35; // card hovered, nothing open yet
pub const PULL_DISPLACEMENT: f32 = 0.18;
pub const PULL_ROUGHNESS: f32 = 0.08;

// Hero geometry
pub const HERO_RADIUS: f32 = 1.15;
pub const HERO_SUBDIVISIONS: u32 = 4;

// Exploded diagram connectors
pub const CONNECTOR_SEGMENTS: usize = 24;
pub const CONNECTOR_BOW_BASE: f32 = 0.35;
pub const CONNECTOR_BOW_AMP: f32 = 0.18;
pub const CONNECTOR_BOW_SPEED: f32 = 1.4;

// Modal
pub const MODAL_OPEN_SEC: f32 = 0.42;
pub const MODAL_CLOSE_SEC: f32 = 0.28;
pub const MODAL_OPEN_START_OPACITY: f32 = 0.98;
pub const MODAL_OPEN_BEZIER: [f32; 4] = [0.2, 0.8, 0.2, 1.0];
pub const MODAL_CLOSE_EASE_POWER: i32 = 2; // power2.in

/// Convert a blend factor tuned per 60 Hz frame into one for an arbitrary `dt`.
#[inline]
pub fn frame_blend(per_frame: f32, dt_sec: f32) -> f32 {
    let frames = (dt_sec.max(0.0)) * REFERENCE_FPS;
    1.0 - (1.0 - per_frame.clamp(0.0, 1.0)).powf(frames)
}
