use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use valentine_platform::Rgba;

/// One simulated confetti piece. Owned exclusively by the engine's live
/// set; `size` and `rotation_speed` never change after spawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
    pub color: Rgba,
    pub shape: Shape,
    pub alpha: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    Circle,
    Square,
    Triangle,
    Heart,
}

impl Shape {
    pub const ALL: [Shape; 4] = [Shape::Circle, Shape::Square, Shape::Triangle, Shape::Heart];
}

/// Packed per-particle snapshot suitable for a GPU instance buffer.
/// 48 bytes, three vec4 rows.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    /// x, y, rotation, size
    pub pos_rot_size: [f32; 4],
    /// r, g, b, a * particle alpha
    pub color: [f32; 4],
    /// shape index in x, rest unused padding
    pub shape: [f32; 4],
}

impl ParticleInstance {
    pub fn from_particle(p: &Particle) -> Self {
        let shape_index = p.shape as u32 as f32;
        Self {
            pos_rot_size: [p.pos.x, p.pos.y, p.rotation, p.size],
            color: [p.color.r, p.color.g, p.color.b, p.color.a * p.alpha],
            shape: [shape_index, 0.0, 0.0, 0.0],
        }
    }
}
