use glam::Vec3;

/// Specular exponent used by the plastic shading model.
pub const PLASTIC_EXPONENT: f32 = 32.0;

/// Specular exponent used by the metallic shading model.
pub const METALLIC_EXPONENT: f32 = 64.0;

/// Constant white specular tint of the plastic model, independent of the
/// base color. The metallic model tints by the base color instead.
pub const PLASTIC_SPECULAR_TINT: Vec3 = Vec3::splat(0.5);

/// Emissive glow follows `PULSE_BASE + PULSE_AMPLITUDE * sin(time * PULSE_RATE)`.
pub const PULSE_BASE: f32 = 0.8;
pub const PULSE_AMPLITUDE: f32 = 0.2;
pub const PULSE_RATE: f32 = 2.0;

/// Which of the two surface shading programs a glyph uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shading {
    Plastic,
    Metallic,
}

impl Shading {
    pub fn name(self) -> &'static str {
        match self {
            Self::Plastic => "plastic",
            Self::Metallic => "metallic",
        }
    }
}

/// One glyph the scene wants on screen: symbol, shading program, color and
/// world placement.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphSpec {
    pub symbol: char,
    pub shading: Shading,
    pub base_color: Vec3,
    pub offset: Vec3,
}

/// Central set of scene tunables. All values are fixed at construction;
/// nothing here is runtime-configurable.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// Ambient term shared by every surface material.
    pub ambient_intensity: f32,
    /// Color of the emissive light cube.
    pub cube_color: Vec3,
    /// Edge length of the light cube.
    pub cube_extent: f32,
    /// Initial camera offset along +Z.
    pub camera_depth: f32,
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Em-square scale applied to glyph outlines.
    pub glyph_size: f32,
    /// Extrusion depth of glyph outlines.
    pub glyph_depth: f32,
    /// Displacement applied per recognized key press.
    pub key_step: f32,
    pub glyphs: Vec<GlyphSpec>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            ambient_intensity: 0.656,
            cube_color: Vec3::ONE,
            cube_extent: 0.5,
            camera_depth: 5.0,
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            glyph_size: 1.0,
            glyph_depth: 0.2,
            key_step: 0.1,
            glyphs: vec![
                GlyphSpec {
                    symbol: 'T',
                    shading: Shading::Plastic,
                    base_color: Vec3::new(0.0, 1.0, 1.0),
                    offset: Vec3::new(-2.0, 0.0, 0.0),
                },
                GlyphSpec {
                    symbol: '9',
                    shading: Shading::Metallic,
                    base_color: Vec3::new(0.992, 0.984, 0.831),
                    offset: Vec3::new(2.0, 0.0, 0.0),
                },
            ],
        }
    }
}

impl SceneConfig {
    /// Looks up the spec for a delivered glyph symbol.
    pub fn glyph_spec(&self, symbol: char) -> Option<&GlyphSpec> {
        self.glyphs.iter().find(|spec| spec.symbol == symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scene_places_two_glyphs() {
        let config = SceneConfig::default();
        assert_eq!(config.glyphs.len(), 2);
        let letter = config.glyph_spec('T').unwrap();
        assert_eq!(letter.shading, Shading::Plastic);
        assert_eq!(letter.offset.x, -2.0);
        let digit = config.glyph_spec('9').unwrap();
        assert_eq!(digit.shading, Shading::Metallic);
        assert_eq!(digit.offset.x, 2.0);
        assert!(config.glyph_spec('X').is_none());
    }

    #[test]
    fn step_and_ambient_defaults() {
        let config = SceneConfig::default();
        assert_eq!(config.key_step, 0.1);
        assert!((config.ambient_intensity - 0.656).abs() < f32::EPSILON);
    }
}
