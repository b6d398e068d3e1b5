//! Player preferences
//!
//! Persisted in LocalStorage. Game progress never is.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_CONFETTI, STICK_DEADZONE};

/// Largest dead zone that still leaves a usable stick range
const MAX_DEADZONE: f32 = 0.9;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum confetti pieces drawn at once
    pub fn max_confetti(&self) -> usize {
        match self {
            QualityPreset::Low => 40,
            QualityPreset::Medium => 100,
            QualityPreset::High => MAX_CONFETTI,
        }
    }

    /// Sphere tessellation (rings, segments) for the ball
    pub fn sphere_detail(&self) -> (u32, u32) {
        match self {
            QualityPreset::Low => (8, 12),
            QualityPreset::Medium => (16, 24),
            QualityPreset::High => (32, 32),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Confetti burst on goals
    pub confetti: bool,
    /// Controls hint at startup
    pub show_hints: bool,
    /// Keep the board visually still (the ball still feels the tilt)
    pub reduced_motion: bool,
    /// Thumbstick dead zone (0.0 - 1.0)
    pub stick_deadzone: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            confetti: true,
            show_hints: true,
            reduced_motion: false,
            stick_deadzone: STICK_DEADZONE,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Effective confetti cap
    pub fn max_confetti(&self) -> usize {
        if !self.confetti {
            0
        } else {
            self.quality.max_confetti()
        }
    }

    /// Scale applied to the visible extra tilt
    pub fn visual_tilt(&self) -> f32 {
        if self.reduced_motion { 0.0 } else { 1.0 }
    }

    /// Dead zone clamped to a usable range
    pub fn deadzone(&self) -> f32 {
        if self.stick_deadzone.is_finite() {
            self.stick_deadzone.clamp(0.0, MAX_DEADZONE)
        } else {
            STICK_DEADZONE
        }
    }

    /// Parse stored JSON, falling back to defaults for anything unreadable
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                Self::default()
            }
        }
    }

    /// Apply overrides from a URL query such as `?quality=low&confetti=0`
    ///
    /// Unknown keys and unparsable values are ignored. Returns whether
    /// anything changed.
    pub fn apply_query(&mut self, query: &str) -> bool {
        let before = self.clone();
        let flag = |v: &str| match v {
            "1" | "true" | "on" => Some(true),
            "0" | "false" | "off" => Some(false),
            _ => None,
        };

        for pair in query.trim_start_matches('?').split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            match key {
                "quality" => {
                    if let Some(preset) = QualityPreset::from_str(value) {
                        self.quality = preset;
                    }
                }
                "confetti" => self.confetti = flag(value).unwrap_or(self.confetti),
                "hints" => self.show_hints = flag(value).unwrap_or(self.show_hints),
                "reduced_motion" => {
                    self.reduced_motion = flag(value).unwrap_or(self.reduced_motion)
                }
                "deadzone" => match value.parse::<f32>() {
                    Ok(dz) if (0.0..=MAX_DEADZONE).contains(&dz) => self.stick_deadzone = dz,
                    _ => log::debug!("Ignoring dead zone override: {}", value),
                },
                _ => log::debug!("Unknown setting in query: {}", key),
            }
        }

        if *self != before {
            log::info!("Settings overridden from URL: {:?}", self);
            true
        } else {
            false
        }
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "tilt_kick_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
