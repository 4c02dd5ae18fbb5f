//! CPU evaluation of the three shading models.
//!
//! The WGSL in `render::shader` implements the same formulas per pixel;
//! these functions are the reference form the test suite exercises. All
//! three are pure: identical inputs always produce identical colors.

use glam::Vec3;

use crate::config::{
    METALLIC_EXPONENT, PLASTIC_EXPONENT, PLASTIC_SPECULAR_TINT, PULSE_AMPLITUDE, PULSE_BASE,
    PULSE_RATE,
};
use crate::scene::SurfaceUniforms;

/// Blinn-Phong dielectric: white specular tint at a low exponent, so the
/// highlight reads as a glossy coating over the base color.
pub fn shade_plastic(surface: &SurfaceUniforms, world_position: Vec3, normal: Vec3) -> Vec3 {
    let normal = normal.normalize_or_zero();
    let light_dir = (surface.light_position - world_position).normalize_or_zero();
    let view_dir = (surface.view_position - world_position).normalize_or_zero();

    let ambient = surface.base_color * surface.ambient_intensity;
    let diffuse = normal.dot(light_dir).max(0.0) * surface.base_color;
    let half_dir = (light_dir + view_dir).normalize_or_zero();
    let specular = PLASTIC_SPECULAR_TINT * normal.dot(half_dir).max(0.0).powf(PLASTIC_EXPONENT);
    ambient + diffuse + specular
}

/// Mirror-reflection metal: specular tinted by the base color at a tight
/// exponent, the defining difference from the plastic model.
pub fn shade_metallic(surface: &SurfaceUniforms, world_position: Vec3, normal: Vec3) -> Vec3 {
    let normal = normal.normalize_or_zero();
    let light_dir = (surface.light_position - world_position).normalize_or_zero();
    let view_dir = (surface.view_position - world_position).normalize_or_zero();

    let ambient = surface.base_color * surface.ambient_intensity;
    let diffuse = normal.dot(light_dir).max(0.0) * surface.base_color;
    let reflect_dir = reflect(-light_dir, normal);
    let specular =
        surface.base_color * view_dir.dot(reflect_dir).max(0.0).powf(METALLIC_EXPONENT);
    ambient + diffuse + specular
}

/// Self-luminous pulsing glow; takes no lighting inputs at all.
pub fn shade_emissive(color: Vec3, time: f32) -> Vec3 {
    color * (PULSE_BASE + PULSE_AMPLITUDE * (time * PULSE_RATE).sin())
}

/// Mirror reflection of `incident` about `normal`, GLSL semantics.
fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    incident - 2.0 * normal.dot(incident) * normal
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface(base_color: Vec3, ambient_intensity: f32) -> SurfaceUniforms {
        SurfaceUniforms {
            base_color,
            light_position: Vec3::new(0.0, 0.0, 4.0),
            ambient_intensity,
            view_position: Vec3::new(0.0, 0.0, 6.0),
        }
    }

    #[test]
    fn models_are_pure() {
        let uniforms = surface(Vec3::new(0.0, 1.0, 1.0), 0.656);
        let position = Vec3::new(0.2, -0.1, 0.0);
        let normal = Vec3::new(0.3, 0.2, 0.9);
        for _ in 0..4 {
            assert_eq!(
                shade_plastic(&uniforms, position, normal),
                shade_plastic(&uniforms, position, normal)
            );
            assert_eq!(
                shade_metallic(&uniforms, position, normal),
                shade_metallic(&uniforms, position, normal)
            );
        }
        assert_eq!(
            shade_emissive(Vec3::ONE, 1.25),
            shade_emissive(Vec3::ONE, 1.25)
        );
    }

    #[test]
    fn degenerate_normal_leaves_only_ambient() {
        let uniforms = surface(Vec3::new(1.0, 0.5, 0.25), 0.5);
        let color = shade_plastic(&uniforms, Vec3::ZERO, Vec3::ZERO);
        assert_eq!(color, uniforms.base_color * 0.5);
        let color = shade_metallic(&uniforms, Vec3::ZERO, Vec3::ZERO);
        assert_eq!(color, uniforms.base_color * 0.5);
    }

    #[test]
    fn no_nan_when_light_sits_on_the_surface() {
        let mut uniforms = surface(Vec3::ONE, 0.3);
        uniforms.light_position = Vec3::new(0.5, 0.5, 0.5);
        let color = shade_plastic(&uniforms, uniforms.light_position, Vec3::Z);
        assert!(color.is_finite());
        let color = shade_metallic(&uniforms, uniforms.light_position, Vec3::Z);
        assert!(color.is_finite());
    }

    #[test]
    fn metallic_specular_peaks_on_the_reflection_ray() {
        // light straight above, flat normal: the reflection ray goes back up
        let uniforms = SurfaceUniforms {
            base_color: Vec3::new(0.992, 0.984, 0.831),
            light_position: Vec3::new(0.0, 0.0, 5.0),
            ambient_intensity: 0.0,
            view_position: Vec3::new(0.0, 0.0, 7.0),
        };
        let color = shade_metallic(&uniforms, Vec3::ZERO, Vec3::Z);
        // diffuse contributes base_color, specular peaks at base_color * 1.0
        let expected = uniforms.base_color + uniforms.base_color;
        assert!((color - expected).length() < 1e-5);
    }

    #[test]
    fn plastic_specular_ignores_base_color() {
        // diffuse vanishes when the light grazes the surface, leaving only
        // the white specular lobe, which must match across base colors
        let grazing = |base_color| {
            let uniforms = SurfaceUniforms {
                base_color,
                light_position: Vec3::new(5.0, 0.0, 0.0),
                ambient_intensity: 0.0,
                view_position: Vec3::new(0.0, 0.0, 5.0),
            };
            shade_plastic(&uniforms, Vec3::ZERO, Vec3::Z)
        };
        let cyan = grazing(Vec3::new(0.0, 1.0, 1.0));
        let red = grazing(Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(cyan, red);
        assert!(cyan.max_element() > 0.0);
        assert_eq!(cyan.x, cyan.y);
        assert_eq!(cyan.y, cyan.z);
    }

    #[test]
    fn emissive_pulse_stays_within_band() {
        for tick in 0..200 {
            let time = tick as f32 * 0.05;
            let color = shade_emissive(Vec3::ONE, time);
            assert!(color.x >= PULSE_BASE - PULSE_AMPLITUDE - 1e-6);
            assert!(color.x <= PULSE_BASE + PULSE_AMPLITUDE + 1e-6);
        }
    }
}
