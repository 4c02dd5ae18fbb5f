//! Core modules for the glyphlight viewer.
//!
//! The crate renders a small retained scene: an emissive cube that doubles
//! as the light source and two extruded glyphs on custom shading programs.
//! Scene state, shading math, and glyph geometry live behind a library
//! surface that stays testable without a window or GPU; the binary wires
//! everything to winit and wgpu.

pub mod app;
pub mod config;
pub mod font;
pub mod geometry;
pub mod input;
pub mod provider;
pub mod render;
pub mod scene;
pub mod shading;

pub use config::{GlyphSpec, SceneConfig, Shading};
pub use font::{FontError, OutlineFont};
pub use geometry::{extrude_outline, Geometry, GlyphOutline};
pub use input::{apply_command, KeyCommand};
pub use provider::{
    build_glyph, requests_for, spawn_glyph_loader, GlyphDelivery, GlyphRequest, GlyphStyle,
};
pub use render::Renderer;
pub use scene::{Camera, LightProxy, Material, Mesh, Scene, SurfaceUniforms};
pub use shading::{shade_emissive, shade_metallic, shade_plastic};
