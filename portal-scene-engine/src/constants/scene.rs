use bevy::color::Srgba;

pub const BAKED_NODE: &str = "baked";
pub const POLE_LIGHT_A_NODE: &str = "poleLightA";
pub const POLE_LIGHT_B_NODE: &str = "poleLightB";
pub const PORTAL_LIGHT_NODE: &str = "portalLight";

pub const POLE_LIGHT_COLOR: Srgba = srgb_hex(0xffffe5);
pub const PORTAL_COLOR_START: Srgba = srgb_hex(0x9868eb);
pub const PORTAL_COLOR_END: Srgba = srgb_hex(0xede4f5);

pub const FIREFLIES_COUNT: usize = 30;
pub const FIREFLIES_DEFAULT_POINT_SIZE: f32 = 100.0;
pub const FIREFLIES_MIN_POINT_SIZE: f32 = 0.0;
pub const FIREFLIES_MAX_POINT_SIZE: f32 = 500.0;

/// Horizontal half extent of the firefly volume.
pub const FIREFLIES_HALF_EXTENT: f32 = 2.0;
pub const FIREFLIES_MAX_HEIGHT: f32 = 2.0;

/// Opaque sRGB colour from a `0xRRGGBB` literal.
pub const fn srgb_hex(rgb: u32) -> Srgba {
    Srgba::new(
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
        1.0,
    )
}
