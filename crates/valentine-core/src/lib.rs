//! Valentine core engine: platform-agnostic confetti particles, physics,
//! and burst presets.
//!
//! The engine is constructed over the collaborator traits in
//! `valentine-platform` and exposes `resize` / `start` / `stop` plus the
//! `on_frame` entry point the host calls when a scheduled frame fires.

mod config;
mod engine;
mod particle;

pub use config::{BurstPreset, ConfigError, EngineConfig};
pub use engine::ParticleEngine;
pub use particle::{Particle, ParticleInstance, Shape};

use valentine_platform::Rgba;

/// The six confetti colors: gold, pinks, orange, and hot pinks.
pub const PALETTE: [Rgba; 6] = [
    Rgba::new(1.0, 215.0 / 255.0, 0.0, 1.0),           // #FFD700
    Rgba::new(1.0, 107.0 / 255.0, 157.0 / 255.0, 1.0), // #FF6B9D
    Rgba::new(1.0, 182.0 / 255.0, 217.0 / 255.0, 1.0), // #FFB6D9
    Rgba::new(1.0, 165.0 / 255.0, 0.0, 1.0),           // #FFA500
    Rgba::new(1.0, 105.0 / 255.0, 180.0 / 255.0, 1.0), // #FF69B4
    Rgba::new(1.0, 20.0 / 255.0, 147.0 / 255.0, 1.0),  // #FF1493
];
