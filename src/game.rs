//! A playing session: simulation plus everything around it
//!
//! Owns the game state, held input, settings and the HUD message board, and
//! turns simulation events into messages and log lines. Platform-free so
//! the web loop and the native demo drive it the same way.

use crate::hud::{HudLayout, MessageBoard, messages};
use crate::input::{StickSample, classify_sticks};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, Outcome, Scoreboard, TickInput, tick};

pub struct Game {
    pub state: GameState,
    pub settings: Settings,
    pub input: TickInput,
    pub messages: MessageBoard,
    /// What the HUD last showed, to skip repainting an unchanged panel
    painted: Option<(Scoreboard, Option<String>)>,
}

impl Game {
    pub fn new(seed: u64, settings: Settings) -> Self {
        let mut message_board = MessageBoard::default();
        if settings.show_hints {
            let (text, secs) = messages::CONTROLS;
            message_board.show(text, Some(secs));
        }
        Self {
            state: GameState::new(seed),
            settings,
            input: TickInput::default(),
            messages: message_board,
            painted: None,
        }
    }

    /// Keyboard transition by `KeyboardEvent.code`; true if the game uses the key
    pub fn key(&mut self, code: &str, pressed: bool) -> bool {
        self.input.keys.apply_key(code, pressed)
    }

    /// Latest XR thumbstick readings (empty outside an XR session)
    pub fn set_stick_samples(&mut self, samples: &[StickSample]) {
        self.input.sticks = classify_sticks(samples, self.settings.deadzone());
    }

    /// Run one display frame of `dt` seconds
    pub fn frame(&mut self, dt: f32) {
        self.messages.tick(dt);
        tick(&mut self.state, &self.input, dt);

        for event in self.state.drain_events() {
            self.handle_event(event);
        }

        if !self.settings.confetti {
            self.state.confetti.clear();
        }
    }

    fn handle_event(&mut self, event: GameEvent) {
        let board = self.state.scoreboard;
        let (text, secs) = match event {
            GameEvent::Outcome(Outcome::Goal) => {
                log::info!(
                    "Goal! score {} streak {} best {}",
                    board.score,
                    board.streak,
                    board.best_score
                );
                messages::GOAL
            }
            GameEvent::Outcome(Outcome::Miss) => {
                log::info!("Miss, streak reset (score {})", board.score);
                messages::MISS
            }
            GameEvent::Outcome(Outcome::IdleReset) => {
                log::debug!("Ball idle, resetting round");
                messages::RESET
            }
            GameEvent::StrikerHit { speed } => {
                log::trace!("Striker hit, ball speed {:.2}", speed);
                return;
            }
        };
        self.messages.show(text, Some(secs));
    }

    /// HUD layout if it changed since the last call
    pub fn hud_update(&mut self) -> Option<HudLayout> {
        let current = (
            self.state.scoreboard,
            self.messages.current().map(str::to_string),
        );
        if self.painted.as_ref() == Some(&current) {
            return None;
        }
        let layout = HudLayout::compose(&current.0, current.1.as_deref());
        self.painted = Some(current);
        Some(layout)
    }
}
