use std::f32::consts::TAU;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};
use valentine_platform::{
    DrawSurface, DrawTransform, FrameHandle, FrameScheduler, PaintStyle, Path, Viewport,
    ViewportProvider,
};

use crate::config::{BurstPreset, ConfigError, EngineConfig};
use crate::particle::{Particle, ParticleInstance, Shape};

// Spawn band sits off-screen above the canvas so pieces rain in staggered.
const SPAWN_BAND_TOP: f32 = -110.0;
const SPAWN_BAND_BOTTOM: f32 = -10.0;
const SPAWN_VX_SPREAD: f32 = 5.0;
const SPAWN_VY_MIN: f32 = 2.0;
const SPAWN_VY_MAX: f32 = 8.0;
const SPAWN_SPIN_SPREAD: f32 = 0.075;

/// Canvas confetti engine: spawns a burst, steps physics and alpha decay
/// once per scheduled frame, renders each piece, and stops itself once no
/// particles remain.
pub struct ParticleEngine {
    surface: Box<dyn DrawSurface>,
    scheduler: Box<dyn FrameScheduler>,
    viewport_source: Box<dyn ViewportProvider>,
    config: EngineConfig,
    viewport: Viewport,
    particles: Vec<Particle>,
    pending: Option<FrameHandle>,
    rng: StdRng,
}

impl ParticleEngine {
    pub fn new(
        surface: Box<dyn DrawSurface>,
        scheduler: Box<dyn FrameScheduler>,
        viewport_source: Box<dyn ViewportProvider>,
        config: EngineConfig,
    ) -> Result<Self, ConfigError> {
        Self::with_rng(surface, scheduler, viewport_source, config, StdRng::from_entropy())
    }

    /// Engine with a caller-supplied rng, used for deterministic tests.
    pub fn with_rng(
        surface: Box<dyn DrawSurface>,
        scheduler: Box<dyn FrameScheduler>,
        viewport_source: Box<dyn ViewportProvider>,
        config: EngineConfig,
        rng: StdRng,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut engine = Self {
            surface,
            scheduler,
            viewport_source,
            config,
            viewport: Viewport::new(0.0, 0.0),
            particles: Vec::new(),
            pending: None,
            rng,
        };
        engine.resize();
        Ok(engine)
    }

    /// Re-read the viewport and resize the surface to match. Resizing
    /// wipes any drawn content. Called once at construction and on every
    /// viewport-change signal from the host.
    pub fn resize(&mut self) {
        self.viewport = self.viewport_source.viewport();
        self.surface.resize(self.viewport);
    }

    /// Replace the live set with a fresh burst and run the first frame.
    /// A burst already in flight is cancelled, never stacked: at most one
    /// scheduled frame callback exists at any time.
    pub fn start(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
        self.particles = spawn_burst(&mut self.rng, &self.config.preset, self.viewport.width);
        debug!(count = self.particles.len(), "confetti burst started");
        self.step();
    }

    /// Cancel the pending frame, drop all particles, and clear the
    /// surface. Safe to call when already stopped.
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
        self.particles.clear();
        self.surface.clear();
        debug!("confetti stopped");
    }

    /// Host entry point for a fired frame callback. Handles from a
    /// cancelled loop are ignored so a stale callback cannot resurrect a
    /// stopped engine.
    pub fn on_frame(&mut self, handle: FrameHandle) {
        if self.pending != Some(handle) {
            trace!(?handle, "ignoring stale frame callback");
            return;
        }
        self.pending = None;
        self.step();
    }

    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    /// Packed snapshot of the live set, in render order.
    pub fn instances(&self) -> Vec<ParticleInstance> {
        self.particles.iter().map(ParticleInstance::from_particle).collect()
    }

    // One frame: clear, drop pieces that left the canvas or faded out
    // (judged on pre-update state), then update and draw the survivors in
    // the same pass, and reschedule only while pieces remain.
    fn step(&mut self) {
        self.surface.clear();

        let height = self.viewport.height;
        self.particles
            .retain(|particle| particle.pos.y < height && particle.alpha > 0.0);

        let gravity = self.config.preset.gravity;
        let drag = self.config.preset.drag;
        let fade = self.config.preset.fade;
        let surface = &mut *self.surface;
        for particle in &mut self.particles {
            particle.pos += particle.vel;
            particle.vel.y += gravity;
            particle.vel.x *= drag;
            particle.rotation += particle.rotation_speed;
            particle.alpha -= fade;
            draw_particle(surface, particle);
        }

        if self.particles.is_empty() {
            debug!("confetti burst finished");
        } else {
            self.pending = Some(self.scheduler.schedule_next_frame());
        }
    }
}

fn spawn_burst(rng: &mut StdRng, preset: &BurstPreset, width: f32) -> Vec<Particle> {
    (0..preset.particle_count)
        .map(|_| {
            let x = if width > 0.0 { rng.gen_range(0.0..width) } else { 0.0 };
            Particle {
                pos: Vec2::new(x, rng.gen_range(SPAWN_BAND_TOP..SPAWN_BAND_BOTTOM)),
                vel: Vec2::new(
                    rng.gen_range(-SPAWN_VX_SPREAD..SPAWN_VX_SPREAD),
                    rng.gen_range(SPAWN_VY_MIN..SPAWN_VY_MAX),
                ),
                size: rng.gen_range(preset.size_min..preset.size_max),
                rotation: rng.gen_range(0.0..TAU),
                rotation_speed: rng.gen_range(-SPAWN_SPIN_SPREAD..SPAWN_SPIN_SPREAD),
                color: preset
                    .palette
                    .choose(rng)
                    .copied()
                    .unwrap_or(crate::PALETTE[0]),
                shape: *Shape::ALL.choose(rng).unwrap_or(&Shape::Circle),
                alpha: 1.0,
            }
        })
        .collect()
}

fn draw_particle(surface: &mut dyn DrawSurface, particle: &Particle) {
    let transform = DrawTransform::at(particle.pos, particle.rotation);
    let style = PaintStyle {
        color: particle.color,
        alpha: particle.alpha,
    };
    let size = particle.size;
    match particle.shape {
        Shape::Circle => surface.fill_circle(transform, style, size / 2.0),
        Shape::Square => surface.fill_rect(transform, style, Vec2::splat(size / 2.0)),
        Shape::Triangle => surface.fill_polygon(
            transform,
            style,
            &[
                Vec2::new(0.0, -size / 2.0),
                Vec2::new(-size / 2.0, size / 2.0),
                Vec2::new(size / 2.0, size / 2.0),
            ],
        ),
        Shape::Heart => surface.fill_path(transform, style, &heart_path(size)),
    }
}

// Heart silhouette from four cubic segments, symmetric about x = 0. The
// top reference sits at -size/2 so the lobes span the upper half and the
// bottom point lands at +size/2.
fn heart_path(size: f32) -> Path {
    let s = size;
    let top = -s / 2.0;
    Path::new()
        .move_to(0.0, top + s / 4.0)
        .cubic_to(0.0, top, -s / 2.0, top, -s / 2.0, top + s / 4.0)
        .cubic_to(-s / 2.0, top + s / 2.0, 0.0, top + s * 0.75, 0.0, top + s)
        .cubic_to(0.0, top + s * 0.75, s / 2.0, top + s / 2.0, s / 2.0, top + s / 4.0)
        .cubic_to(s / 2.0, top, 0.0, top, 0.0, top + s / 4.0)
}
