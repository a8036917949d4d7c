//! Ambient decorative effects as pure spawn plans. Each plan describes
//! what to place where and for how long; the adapter owns timers and DOM
//! nodes.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

const BACKGROUND_HEART_EMOJI: [&str; 6] = ["💕", "💖", "💗", "💝", "💘", "❤️"];
const FLOATING_HEART_EMOJI: [&str; 8] = ["💕", "💖", "💗", "💝", "💘", "❤️", "💓", "💞"];
const CELEBRATION_EMOJI: [&str; 9] = ["🎉", "💕", "🎊", "💖", "✨", "🌟", "💫", "🎆", "🎇"];

/// One background heart drifts up every `BACKGROUND_CADENCE_MS`. Hearts
/// outlive the cadence, so consecutive ones overlap on screen.
pub const BACKGROUND_CADENCE_MS: u32 = 3_000;

const BACKGROUND_LIFETIME_MS: u32 = 4_000;
const ROSE_PETAL_LIFETIME_MS: u32 = 7_000;
const FLOATING_HEART_LIFETIME_MS: u32 = 4_000;
const CELEBRATION_HOLD_MS: u32 = 1_000;
const CELEBRATION_FADE_MS: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BackgroundHeart {
    pub emoji: &'static str,
    pub left_px: f32,
    pub size_em: f32,
    pub opacity: f32,
    /// Remove the node this long after it appears.
    pub lifetime_ms: u32,
}

/// The subtle heart that floats up from the bottom edge.
pub fn background_heart(rng: &mut impl Rng, viewport_width: f32) -> BackgroundHeart {
    BackgroundHeart {
        emoji: pick(rng, &BACKGROUND_HEART_EMOJI),
        left_px: scatter(rng, viewport_width),
        size_em: rng.gen_range(1.0..2.5),
        opacity: rng.gen_range(0.2..0.5),
        lifetime_ms: BACKGROUND_LIFETIME_MS,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RosePetal {
    pub left_percent: f32,
    pub size_em: f32,
    pub opacity: f32,
    pub fall_secs: f32,
    pub delay_secs: f32,
    /// Creation stagger relative to the start of the shower.
    pub stagger_ms: u32,
    pub lifetime_ms: u32,
}

/// Twenty rose petals raining over the reveal transition.
pub fn rose_petals(rng: &mut impl Rng) -> Vec<RosePetal> {
    (0..20)
        .map(|i| RosePetal {
            left_percent: rng.gen_range(0.0..100.0),
            size_em: rng.gen_range(1.0..2.5),
            opacity: rng.gen_range(0.3..0.8),
            fall_secs: rng.gen_range(4.0..7.0),
            delay_secs: rng.gen_range(0.0..2.0),
            stagger_ms: i * 100,
            lifetime_ms: ROSE_PETAL_LIFETIME_MS,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FloatingHeart {
    pub emoji: &'static str,
    pub left_px: f32,
    pub size_em: f32,
    pub hue_rotate_deg: f32,
    pub stagger_ms: u32,
    pub lifetime_ms: u32,
}

/// The big heart wave when "Yes" is finally clicked.
pub fn floating_hearts(rng: &mut impl Rng, viewport_width: f32) -> Vec<FloatingHeart> {
    (0..25)
        .map(|i| FloatingHeart {
            emoji: pick(rng, &FLOATING_HEART_EMOJI),
            left_px: scatter(rng, viewport_width),
            size_em: rng.gen_range(1.5..3.5),
            hue_rotate_deg: rng.gen_range(0.0..60.0),
            stagger_ms: i * 80,
            lifetime_ms: FLOATING_HEART_LIFETIME_MS,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CelebrationEmoji {
    pub emoji: &'static str,
    pub left_px: f32,
    pub top_px: f32,
    pub size_em: f32,
    pub stagger_ms: u32,
    /// Hold at full size before the fade-out starts.
    pub hold_ms: u32,
    pub fade_ms: u32,
}

/// Zoom-in emoji scattered across the whole viewport.
pub fn celebration(rng: &mut impl Rng, viewport_width: f32, viewport_height: f32) -> Vec<CelebrationEmoji> {
    (0..20)
        .map(|i| CelebrationEmoji {
            emoji: pick(rng, &CELEBRATION_EMOJI),
            left_px: scatter(rng, viewport_width),
            top_px: scatter(rng, viewport_height),
            size_em: rng.gen_range(2.0..4.0),
            stagger_ms: i * 120,
            hold_ms: CELEBRATION_HOLD_MS,
            fade_ms: CELEBRATION_FADE_MS,
        })
        .collect()
}

fn pick(rng: &mut impl Rng, set: &'static [&'static str]) -> &'static str {
    set.choose(rng).copied().unwrap_or("💕")
}

fn scatter(rng: &mut impl Rng, extent: f32) -> f32 {
    if extent > 0.0 {
        rng.gen_range(0.0..extent)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn background_heart_stays_subtle() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            let heart = background_heart(&mut rng, 1280.0);
            assert!(BACKGROUND_HEART_EMOJI.contains(&heart.emoji));
            assert!((0.0..1280.0).contains(&heart.left_px));
            assert!((1.0..2.5).contains(&heart.size_em));
            assert!((0.2..0.5).contains(&heart.opacity));
        }
    }

    #[test]
    fn background_hearts_overlap_the_spawn_cadence() {
        let mut rng = StdRng::seed_from_u64(5);
        let heart = background_heart(&mut rng, 1280.0);
        assert_eq!(heart.lifetime_ms, 4_000);
        assert!(heart.lifetime_ms > BACKGROUND_CADENCE_MS);
    }

    #[test]
    fn rose_petals_shower_in_a_staggered_batch() {
        let mut rng = StdRng::seed_from_u64(5);
        let petals = rose_petals(&mut rng);
        assert_eq!(petals.len(), 20);
        assert_eq!(petals[0].stagger_ms, 0);
        assert_eq!(petals[19].stagger_ms, 1900);
        for petal in &petals {
            assert!((0.0..100.0).contains(&petal.left_percent));
            assert!((4.0..7.0).contains(&petal.fall_secs));
            assert!((0.0..2.0).contains(&petal.delay_secs));
            assert_eq!(petal.lifetime_ms, 7_000);
        }
    }

    #[test]
    fn floating_hearts_fill_the_yes_wave() {
        let mut rng = StdRng::seed_from_u64(5);
        let hearts = floating_hearts(&mut rng, 800.0);
        assert_eq!(hearts.len(), 25);
        assert_eq!(hearts[1].stagger_ms, 80);
        for heart in &hearts {
            assert!((0.0..60.0).contains(&heart.hue_rotate_deg));
            assert!((1.5..3.5).contains(&heart.size_em));
            assert_eq!(heart.lifetime_ms, 4_000);
        }
    }

    #[test]
    fn celebration_scatters_across_the_viewport() {
        let mut rng = StdRng::seed_from_u64(5);
        let burst = celebration(&mut rng, 800.0, 600.0);
        assert_eq!(burst.len(), 20);
        for emoji in &burst {
            assert!((0.0..800.0).contains(&emoji.left_px));
            assert!((0.0..600.0).contains(&emoji.top_px));
            assert!((2.0..4.0).contains(&emoji.size_em));
            assert_eq!(emoji.hold_ms, 1_000);
            assert_eq!(emoji.fade_ms, 500);
        }
    }

    #[test]
    fn zero_width_viewport_pins_spawns_to_the_edge() {
        let mut rng = StdRng::seed_from_u64(5);
        let heart = background_heart(&mut rng, 0.0);
        assert_eq!(heart.left_px, 0.0);
    }
}
