//! Procedurally generated scene content.

/// Firefly point cloud generation.
pub mod fireflies;
