pub mod assets;
pub mod camera;
pub mod core;
pub mod error;
pub mod loading;
pub mod materials;
pub mod mesh;
pub mod scene;
pub mod systems;
