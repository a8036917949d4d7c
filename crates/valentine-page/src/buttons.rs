//! The button-interaction game as a pure function of the attempt count:
//! the "No" button shrinks, spins, fades, and finally hides while the
//! "Yes" button grows. The adapter applies the returned view verbatim.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

struct Prompt {
    no: &'static str,
    hint: &'static str,
    yes: &'static str,
}

const PROMPTS: [Prompt; 10] = [
    Prompt { no: "No", hint: "", yes: "YES! 💕" },
    Prompt { no: "No?", hint: "🤔 Really though?", yes: "YES! 💕💕" },
    Prompt {
        no: "Are you sure?",
        hint: "😢 The button is running away!",
        yes: "YES PLEASE! 💕💕",
    },
    Prompt {
        no: "Really??",
        hint: "😭 Come on, you know you want to!",
        yes: "YES! I NEED THIS! 💕💕💕",
    },
    Prompt {
        no: "Think again!",
        hint: "🥺 Please? The Yes button is getting lonely...",
        yes: "ABSOLUTELY YES! 💕💕💕💕",
    },
    Prompt {
        no: "Nope!",
        hint: "😱 Don't make me beg! (I will)...",
        yes: "YES YES YES! 💕💕💕💕💕",
    },
    Prompt {
        no: "Not happening",
        hint: "🙏 I'm literally begging you!",
        yes: "OF COURSE YES! 💕💕💕💕💕💕",
    },
    Prompt {
        no: "???",
        hint: "😍 You know the answer is yes!",
        yes: "YESSSS! 💕💕💕💕💕💕💕",
    },
    Prompt {
        no: "🏃💨",
        hint: "💖 Just click the big button already!",
        yes: "YES! ALWAYS YES! 💕💕💕💕💕💕💕💕",
    },
    Prompt {
        no: "Bye!",
        hint: "✨ The universe wants you to say yes!",
        yes: "YES TO EVERYTHING! 💕💕💕💕💕💕💕💕💕",
    },
];

const GIVE_UP_HINT: &str = "🎉 Fine! I guess you HAVE to say yes now! 😄💕";

const NO_CLICK_RESPONSES: [&str; 5] = [
    "Nope! That button is too fast for you! 😄",
    "Nice try! But the YES button is waiting... 💕",
    "Oops! It ran away again! 🏃💨",
    "So close! Maybe try YES instead? 😉",
    "The button said \"not today!\" 😂",
];

// Escalation thresholds.
const SPIN_AFTER: u32 = 5;
const FADE_AFTER: u32 = 8;
const HIDE_AFTER: u32 = 10;

/// How far the "No" button may dodge, derived from the window size and
/// the button container's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DodgeBounds {
    pub max_x: f32,
    pub max_y: f32,
}

impl DodgeBounds {
    pub fn from_layout(window_width: f32, window_height: f32, container_left: f32, container_top: f32) -> Self {
        Self {
            max_x: (window_width - container_left - 150.0).min(400.0),
            max_y: (window_height - container_top - 100.0).min(300.0),
        }
    }
}

/// Everything the adapter needs to restyle both buttons and the hint line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ButtonsView {
    pub no_label: &'static str,
    pub hint: &'static str,
    pub yes_label: &'static str,
    pub yes_scale: f32,
    pub no_scale: f32,
    pub no_rotation_deg: f32,
    pub no_offset_x: f32,
    pub no_offset_y: f32,
    pub no_opacity: f32,
    pub no_visible: bool,
}

/// Presentation after `attempts` tries at the "No" button. The rng only
/// feeds the dodge offset; everything else is deterministic.
pub fn button_prompt(attempts: u32, bounds: DodgeBounds, rng: &mut impl Rng) -> ButtonsView {
    let prompt = &PROMPTS[(attempts as usize).min(PROMPTS.len() - 1)];
    let gave_up = attempts >= HIDE_AFTER;

    let mut yes_scale = 1.0 + 0.08 * attempts as f32;
    if gave_up {
        yes_scale += 0.5;
    }

    ButtonsView {
        no_label: prompt.no,
        hint: if gave_up { GIVE_UP_HINT } else { prompt.hint },
        yes_label: prompt.yes,
        yes_scale,
        no_scale: (1.0 - 0.12 * attempts as f32).max(0.2),
        no_rotation_deg: if attempts >= SPIN_AFTER {
            attempts as f32 * 45.0
        } else {
            0.0
        },
        no_offset_x: (rng.gen_range(0.0..1.0_f32) - 0.5) * bounds.max_x * 1.5,
        no_offset_y: (rng.gen_range(0.0..1.0_f32) - 0.5) * bounds.max_y * 1.5,
        no_opacity: if attempts >= FADE_AFTER {
            (1.0 - 0.15 * (attempts - FADE_AFTER) as f32).max(0.1)
        } else {
            1.0
        },
        no_visible: !gave_up,
    }
}

/// Taunt shown if the "No" button somehow gets clicked anyway.
pub fn no_click_response(rng: &mut impl Rng) -> &'static str {
    NO_CLICK_RESPONSES
        .choose(rng)
        .copied()
        .unwrap_or(NO_CLICK_RESPONSES[0])
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn bounds() -> DodgeBounds {
        DodgeBounds::from_layout(1280.0, 720.0, 400.0, 300.0)
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(11)
    }

    #[test]
    fn bounds_clamp_to_the_source_maxima() {
        let b = DodgeBounds::from_layout(2000.0, 2000.0, 100.0, 100.0);
        assert_eq!(b, DodgeBounds { max_x: 400.0, max_y: 300.0 });
        let tight = DodgeBounds::from_layout(600.0, 500.0, 300.0, 250.0);
        assert_eq!(tight, DodgeBounds { max_x: 150.0, max_y: 150.0 });
    }

    #[test]
    fn first_attempt_starts_the_escalation() {
        let view = button_prompt(1, bounds(), &mut rng());
        assert_eq!(view.no_label, "No?");
        assert_eq!(view.hint, "🤔 Really though?");
        assert!((view.yes_scale - 1.08).abs() < 1e-6);
        assert!((view.no_scale - 0.88).abs() < 1e-6);
        assert_eq!(view.no_rotation_deg, 0.0);
        assert_eq!(view.no_opacity, 1.0);
        assert!(view.no_visible);
    }

    #[test]
    fn spinning_kicks_in_at_five_attempts() {
        let mut rng = rng();
        assert_eq!(button_prompt(4, bounds(), &mut rng).no_rotation_deg, 0.0);
        assert_eq!(button_prompt(5, bounds(), &mut rng).no_rotation_deg, 225.0);
        assert_eq!(button_prompt(7, bounds(), &mut rng).no_rotation_deg, 315.0);
    }

    #[test]
    fn fading_kicks_in_past_eight_attempts() {
        let mut rng = rng();
        assert_eq!(button_prompt(8, bounds(), &mut rng).no_opacity, 1.0);
        let nine = button_prompt(9, bounds(), &mut rng);
        assert!((nine.no_opacity - 0.85).abs() < 1e-6);
    }

    #[test]
    fn the_no_button_gives_up_at_ten() {
        let view = button_prompt(10, bounds(), &mut rng());
        assert!(!view.no_visible);
        assert_eq!(view.hint, GIVE_UP_HINT);
        assert_eq!(view.no_label, "Bye!");
        // 1 + 0.08 * 10, plus the give-up bonus.
        assert!((view.yes_scale - 2.3).abs() < 1e-6);
    }

    #[test]
    fn no_scale_never_drops_below_the_floor() {
        let view = button_prompt(30, bounds(), &mut rng());
        assert_eq!(view.no_scale, 0.2);
        assert!((view.no_opacity - 0.1).abs() < 1e-6);
    }

    #[test]
    fn dodge_offsets_stay_inside_the_bounds() {
        let b = bounds();
        let mut rng = rng();
        for attempts in 1..50 {
            let view = button_prompt(attempts, b, &mut rng);
            assert!(view.no_offset_x.abs() <= b.max_x * 0.75);
            assert!(view.no_offset_y.abs() <= b.max_y * 0.75);
        }
    }

    #[test]
    fn no_click_response_comes_from_the_fixed_set() {
        let mut rng = rng();
        for _ in 0..20 {
            assert!(NO_CLICK_RESPONSES.contains(&no_click_response(&mut rng)));
        }
    }
}
