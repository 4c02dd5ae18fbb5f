use crate::scene::Scene;

/// Effect of one recognized key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    LightUp,
    LightDown,
    CameraLeft,
    CameraRight,
}

impl KeyCommand {
    /// Maps a key identity to its effect, case-insensitively. Anything
    /// outside the four bindings is ignored.
    pub fn from_char(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'w' => Some(Self::LightUp),
            's' => Some(Self::LightDown),
            'a' => Some(Self::CameraLeft),
            'd' => Some(Self::CameraRight),
            _ => None,
        }
    }
}

/// Applies a key effect to the scene immediately. The change is visible on
/// the next frame tick; there is no batching or smoothing, and held-key
/// repeats arrive as further presses.
pub fn apply_command(scene: &mut Scene, command: KeyCommand, step: f32) {
    match command {
        KeyCommand::LightUp => scene.light.translate_y(step),
        KeyCommand::LightDown => scene.light.translate_y(-step),
        KeyCommand::CameraLeft => scene.camera.position.x -= step,
        KeyCommand::CameraRight => scene.camera.position.x += step,
    }
}
