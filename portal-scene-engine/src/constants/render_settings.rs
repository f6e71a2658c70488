use bevy::color::Srgba;
use bevy::math::Vec3;

use super::scene::srgb_hex;

/// Upper bound applied to the device pixel ratio everywhere it is consumed.
pub const PIXEL_RATIO_CAP: f32 = 2.0;

pub const CAMERA_FOV_DEGREES: f32 = 45.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;
pub const CAMERA_START_POSITION: Vec3 = Vec3::new(4.0, 2.0, 4.0);

pub const CLEAR_COLOR: Srgba = srgb_hex(0x17192d);

/// Fraction of the pending orbit delta applied per frame.
pub const ORBIT_DAMPING: f32 = 0.05;
pub const ORBIT_ROTATE_SPEED: f32 = 0.005;
pub const ORBIT_PAN_SPEED: f32 = 0.0015;
pub const ORBIT_ZOOM_SPEED: f32 = 0.1;
pub const ORBIT_MIN_RADIUS: f32 = 0.5;
pub const ORBIT_MAX_RADIUS: f32 = 50.0;
