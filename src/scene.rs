use glam::{Mat4, Vec3};

use crate::config::{GlyphSpec, SceneConfig, Shading};
use crate::geometry::Geometry;

/// Perspective camera. Input translates it along X; it always looks down -Z.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub fov_y_degrees: f32,
    /// Derived once from the initial surface size; resizes never update it.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    fn from_config(config: &SceneConfig) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, config.camera_depth),
            fov_y_degrees: config.fov_y_degrees,
            aspect: 1.0,
            near: config.near,
            far: config.far,
        }
    }

    /// Fixes the projection aspect from the surface dimensions.
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Combined view-projection matrix for the current position.
    pub fn view_proj(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.position, self.position - Vec3::Z, Vec3::Y);
        let projection = Mat4::perspective_rh(
            self.fov_y_degrees.to_radians(),
            self.aspect.max(0.01),
            self.near,
            self.far,
        );
        projection * view
    }
}

/// Mutable uniform set shared by the plastic and metallic shading programs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceUniforms {
    pub base_color: Vec3,
    pub light_position: Vec3,
    pub ambient_intensity: f32,
    pub view_position: Vec3,
}

/// Shading program selection plus the per-mesh uniform values feeding it.
///
/// Uniform sets are owned by exactly one mesh; two meshes on the same
/// program still carry independent values.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    Emissive { color: Vec3, time: f32 },
    Plastic(SurfaceUniforms),
    Metallic(SurfaceUniforms),
}

impl Material {
    /// Builds the surface material a glyph spec asks for, with light and
    /// view positions left for the first uniform sync.
    pub fn for_glyph(spec: &GlyphSpec, ambient_intensity: f32) -> Self {
        let surface = SurfaceUniforms {
            base_color: spec.base_color,
            light_position: Vec3::ZERO,
            ambient_intensity,
            view_position: Vec3::ZERO,
        };
        match spec.shading {
            Shading::Plastic => Self::Plastic(surface),
            Shading::Metallic => Self::Metallic(surface),
        }
    }

    pub fn surface(&self) -> Option<&SurfaceUniforms> {
        match self {
            Self::Emissive { .. } => None,
            Self::Plastic(surface) | Self::Metallic(surface) => Some(surface),
        }
    }

    pub fn surface_mut(&mut self) -> Option<&mut SurfaceUniforms> {
        match self {
            Self::Emissive { .. } => None,
            Self::Plastic(surface) | Self::Metallic(surface) => Some(surface),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Emissive { .. } => "emissive",
            Self::Plastic(_) => "plastic",
            Self::Metallic(_) => "metallic",
        }
    }
}

/// Renderable unit: geometry, its exclusive material, and a world offset.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub label: String,
    pub geometry: Geometry,
    pub material: Material,
    pub position: Vec3,
}

impl Mesh {
    /// Assembles the mesh for a delivered glyph.
    pub fn glyph(spec: &GlyphSpec, ambient_intensity: f32, geometry: Geometry) -> Self {
        Self {
            label: format!("glyph-{}", spec.symbol),
            geometry,
            material: Material::for_glyph(spec, ambient_intensity),
            position: spec.offset,
        }
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
    }
}

/// The emissive cube whose world transform doubles as the light position.
#[derive(Debug, Clone, PartialEq)]
pub struct LightProxy {
    pub mesh: Mesh,
}

impl LightProxy {
    fn from_config(config: &SceneConfig) -> Self {
        Self {
            mesh: Mesh {
                label: "light-cube".to_string(),
                geometry: Geometry::cube(config.cube_extent),
                material: Material::Emissive {
                    color: config.cube_color,
                    time: 0.0,
                },
                position: Vec3::ZERO,
            },
        }
    }

    pub fn position(&self) -> Vec3 {
        self.mesh.position
    }

    pub fn translate_y(&mut self, delta: f32) {
        self.mesh.position.y += delta;
    }
}

/// Ownership tree for everything the renderer draws.
///
/// Built incrementally: the camera and light proxy exist from construction,
/// glyph meshes attach later as their asynchronous builds resolve. Nothing
/// is ever removed.
#[derive(Debug)]
pub struct Scene {
    pub camera: Camera,
    pub light: LightProxy,
    glyphs: Vec<Mesh>,
    expected_glyphs: usize,
}

impl Scene {
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            camera: Camera::from_config(config),
            light: LightProxy::from_config(config),
            glyphs: Vec::new(),
            expected_glyphs: config.glyphs.len(),
        }
    }

    /// Inserts a glyph mesh delivered by the geometry provider.
    pub fn attach(&mut self, mesh: Mesh) {
        debug_assert!(self.glyphs.len() < self.expected_glyphs);
        self.glyphs.push(mesh);
    }

    pub fn glyphs(&self) -> &[Mesh] {
        &self.glyphs
    }

    /// Light proxy first, then glyphs in insertion order. Draw order does
    /// not affect the rendered output.
    pub fn renderables(&self) -> impl Iterator<Item = &Mesh> {
        std::iter::once(&self.light.mesh).chain(self.glyphs.iter())
    }

    pub fn renderable_count(&self) -> usize {
        1 + self.glyphs.len()
    }

    /// Per-tick uniform synchronization.
    ///
    /// Advances the emissive clock, then refreshes every surface material's
    /// light and view positions -- but only once the full set of glyphs is
    /// resident. A partially loaded scene skips the surface sync silently.
    pub fn sync_uniforms(&mut self, time: f32) {
        if let Material::Emissive { time: clock, .. } = &mut self.light.mesh.material {
            *clock = time;
        }

        if self.glyphs.len() != self.expected_glyphs {
            return;
        }
        let light_position = self.light.mesh.position;
        let view_position = self.camera.position;
        for mesh in &mut self.glyphs {
            if let Some(surface) = mesh.material.surface_mut() {
                surface.light_position = light_position;
                surface.view_position = view_position;
            }
        }
    }
}
