//! Per-frame and event-driven runtime systems.

/// Frame clock and time uniform updates.
pub mod frame_loop;

/// Window resize handling: viewport size, camera aspect and pixel ratio.
pub mod viewport;
