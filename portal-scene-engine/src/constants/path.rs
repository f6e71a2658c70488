pub const MODEL_PATH: &str = "portal.glb";
pub const BAKED_TEXTURE_PATH: &str = "baked.jpg";
pub const PORTAL_SHADER_PATH: &str = "shaders/portal.wgsl";
pub const FIREFLIES_SHADER_PATH: &str = "shaders/fireflies.wgsl";

/// Selector of the canvas the wasm build renders into.
pub const CANVAS_SELECTOR: &str = "canvas.webgl";
