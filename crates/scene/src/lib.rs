//! Scene state for the globe viewer: camera, globe orientation and input
//! handling, plus the CPU-side content (globe mesh, point markers, starfield,
//! lights) handed to the renderer.

pub mod camera;
pub mod config;
pub mod content;
pub mod controller;
pub mod globe;
pub mod lighting;
pub mod markers;
pub mod mesh;
pub mod starfield;

pub use camera::*;
pub use config::*;
pub use content::*;
pub use controller::*;
pub use globe::*;
pub use lighting::*;
pub use markers::*;
pub use mesh::*;
pub use starfield::*;
