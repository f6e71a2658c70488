/// Parameter values and the setters that push them into uniforms.
pub mod parameters;

/// The egui window.
pub mod ui;
