//! Score HUD
//!
//! The HUD is a 1024x256 panel: an optional headline ("GOAL!", "MISS!", ...)
//! above the score and a "Streak | Best" line. Layout is computed here; the
//! platform layer paints it.

use crate::sim::Scoreboard;

/// Panel size in pixels
pub const HUD_WIDTH: u32 = 1024;
pub const HUD_HEIGHT: u32 = 256;

/// Display time when a message doesn't specify one (seconds)
pub const DEFAULT_MESSAGE_SECS: f32 = 1.2;

/// Built-in messages and how long they stay up
pub mod messages {
    pub const GOAL: (&str, f32) = ("GOAL!", 1.2);
    pub const MISS: (&str, f32) = ("MISS!", 0.8);
    pub const RESET: (&str, f32) = ("Reset!", 0.6);
    pub const CONTROLS: (&str, f32) = ("Tilt: Arrows / Right Stick \u{2022} Hit: WASD / Left Stick", 2.6);
}

/// One line of centered text
#[derive(Debug, Clone, PartialEq)]
pub struct HudLine {
    pub text: String,
    /// Bold sans-serif size in pixels
    pub font_px: u32,
    /// Baseline offset from the panel's vertical center
    pub dy: f32,
}

/// Everything needed to paint the panel once
#[derive(Debug, Clone, PartialEq)]
pub struct HudLayout {
    pub lines: Vec<HudLine>,
}

impl HudLayout {
    pub fn compose(board: &Scoreboard, headline: Option<&str>) -> Self {
        let score = format!("Score: {}", board.score);
        let details = format!("Streak: {} | Best: {}", board.streak, board.best_score);

        let line = |text: String, font_px: u32, dy: f32| HudLine { text, font_px, dy };
        let lines = match headline.filter(|t| !t.is_empty()) {
            Some(text) => vec![
                line(text.to_string(), 96, -60.0),
                line(score, 70, 10.0),
                line(details, 60, 80.0),
            ],
            None => vec![line(score, 90, -30.0), line(details, 70, 50.0)],
        };
        Self { lines }
    }
}

/// A headline that disappears on its own
///
/// Showing a new message replaces the current one and restarts the timer.
#[derive(Debug, Clone, Default)]
pub struct MessageBoard {
    text: Option<String>,
    remaining: f32,
}

impl MessageBoard {
    /// Show `text` for `secs` seconds (default when None); empty text clears
    pub fn show(&mut self, text: &str, secs: Option<f32>) {
        if text.is_empty() {
            self.clear();
            return;
        }
        self.text = Some(text.to_string());
        self.remaining = secs.unwrap_or(DEFAULT_MESSAGE_SECS);
    }

    pub fn clear(&mut self) {
        self.text = None;
        self.remaining = 0.0;
    }

    /// Count down; returns true when the message just expired
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.text.is_none() {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.clear();
            return true;
        }
        false
    }

    pub fn current(&self) -> Option<&str> {
        self.text.as_deref()
    }
}
