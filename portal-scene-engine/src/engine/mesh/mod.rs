//! Mesh generation for shader-expanded sprite primitives.
//!
//! Provides vertex buffers for materials that expand repeated centre vertices
//! into screen-aligned quads in the vertex shader.

/// Firefly sprite mesh generation.
pub mod firefly_mesh;
