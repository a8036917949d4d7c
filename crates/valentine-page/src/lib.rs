//! Pure decision logic for the Valentine greeting page.
//!
//! Everything the surrounding page glue decides lives here as plain data:
//! the session context that replaces the old module-level flags, the
//! button-dodge view model, and the ambient-effect spawn plans. A thin
//! rendering adapter on the host side applies the results to the page.

use tracing::debug;

pub mod buttons;
pub mod effects;

pub use buttons::{ButtonsView, DodgeBounds};

/// Per-visit page state. Holds what used to be process-wide globals
/// (music toggle, yes latch, dodge attempt counter) so handlers can be
/// tested without a page.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageSession {
    music_playing: bool,
    yes_clicked: bool,
    no_attempts: u32,
}

/// What the music control should show after a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct MusicView {
    pub playing: bool,
    pub icon: &'static str,
}

impl PageSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_music(&mut self) -> MusicView {
        self.music_playing = !self.music_playing;
        MusicView {
            playing: self.music_playing,
            icon: if self.music_playing { "🎵" } else { "🔇" },
        }
    }

    /// Autoplay path: the reveal transition starts the music outright.
    pub fn music_started(&mut self) {
        self.music_playing = true;
    }

    /// Latch the yes click. Returns `true` only the first time, when the
    /// caller should start the confetti engine and the celebration plans.
    pub fn press_yes(&mut self) -> bool {
        if self.yes_clicked {
            return false;
        }
        self.yes_clicked = true;
        debug!(attempts = self.no_attempts, "yes clicked");
        true
    }

    pub fn yes_clicked(&self) -> bool {
        self.yes_clicked
    }

    /// One hover/click on the "No" button: bump the attempt counter and
    /// compute the new button presentation.
    pub fn dodge(&mut self, bounds: DodgeBounds, rng: &mut impl rand::Rng) -> ButtonsView {
        self.no_attempts += 1;
        buttons::button_prompt(self.no_attempts, bounds, rng)
    }

    pub fn no_attempts(&self) -> u32 {
        self.no_attempts
    }
}
