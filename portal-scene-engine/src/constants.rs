/// Asset paths relative to the asset root.
pub mod path;

/// Camera, pixel ratio and clear colour settings.
pub mod render_settings;

/// Scene node names, material colours and firefly parameters.
pub mod scene;
