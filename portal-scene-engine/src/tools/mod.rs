//! Interactive tuning surfaces layered over the scene.
//!
//! The debug panel edits portal colours, the fireflies size and the
//! background colour at runtime through the same setters the host bridge
//! uses.

/// egui debug panel and the parameter setters behind it.
pub mod debug_panel;
