//! Keyboard and XR thumbstick input
//!
//! Arrow keys (or the right stick) tilt the board, WASD (or the left stick)
//! moves the striker. Physical key codes are used so the layout doesn't matter.

use glam::Vec2;

use crate::sim::Tilt;

/// A four-way set of held keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Directions {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// Held keys relevant to the game
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub tilt: Directions,
    pub striker: Directions,
}

impl KeyState {
    /// Record a key transition by `KeyboardEvent.code`; false if the key is not ours
    pub fn apply_key(&mut self, code: &str, pressed: bool) -> bool {
        let slot = match code {
            "ArrowLeft" => &mut self.tilt.left,
            "ArrowRight" => &mut self.tilt.right,
            "ArrowUp" => &mut self.tilt.up,
            "ArrowDown" => &mut self.tilt.down,
            "KeyA" => &mut self.striker.left,
            "KeyD" => &mut self.striker.right,
            "KeyW" => &mut self.striker.up,
            "KeyS" => &mut self.striker.down,
            _ => return false,
        };
        *slot = pressed;
        true
    }

    /// Tilt the arrow keys ask for; up tips the ball toward the player
    pub fn tilt_target(&self) -> Tilt {
        let axis = |pos: bool, neg: bool| (pos as i8 - neg as i8) as f32;
        Tilt {
            x: axis(self.tilt.up, self.tilt.down),
            z: axis(self.tilt.right, self.tilt.left),
        }
    }

    /// Unit direction for the striker on the board plane (zero when idle)
    ///
    /// W moves toward the goal (-Z).
    pub fn striker_dir(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.striker.left {
            dir.x -= 1.0;
        }
        if self.striker.right {
            dir.x += 1.0;
        }
        if self.striker.up {
            dir.y -= 1.0;
        }
        if self.striker.down {
            dir.y += 1.0;
        }
        dir.normalize_or_zero()
    }
}

/// Ease the current tilt toward a target by a fixed fraction per frame
pub fn smooth_tilt(tilt: &mut Tilt, target: Tilt, lerp: f32) {
    tilt.x += (target.x - tilt.x) * lerp;
    tilt.z += (target.z - tilt.z) * lerp;
}

/// Which hand an XR input source belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
    None,
}

impl Handedness {
    /// From the numeric code the XR shim uses (1 = left, 2 = right)
    pub fn from_code(code: f32) -> Self {
        match code as i32 {
            1 => Handedness::Left,
            2 => Handedness::Right,
            _ => Handedness::None,
        }
    }
}

/// Raw gamepad axes of one XR input source
#[derive(Debug, Clone, PartialEq)]
pub struct StickSample {
    pub handedness: Handedness,
    pub axes: Vec<f32>,
}

/// A thumbstick deflection after dead-zone filtering; y is -1 when pushed forward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stick {
    pub x: f32,
    pub y: f32,
}

/// Sticks assigned to their roles for this frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sticks {
    pub tilt: Option<Stick>,
    pub striker: Option<Stick>,
}

/// Filter samples through the dead zone and assign them to roles
///
/// The right hand tilts, the left hand strikes. With only an unhanded source
/// active, it tilts. When several sources share a hand, the last one wins.
pub fn classify_sticks(samples: &[StickSample], deadzone: f32) -> Sticks {
    let mut right = None;
    let mut left = None;
    let mut fallback = None;

    for sample in samples {
        let &[x, y, ..] = sample.axes.as_slice() else {
            continue;
        };

        if x.hypot(y) < deadzone {
            continue;
        }

        let filter = |v: f32| if v.abs() < deadzone { 0.0 } else { v };
        let stick = Stick {
            x: filter(x),
            y: filter(y),
        };

        match sample.handedness {
            Handedness::Right => right = Some(stick),
            Handedness::Left => left = Some(stick),
            Handedness::None => fallback = Some(stick),
        }
    }

    if right.is_none() && left.is_none() {
        right = fallback;
    }

    Sticks {
        tilt: right,
        striker: left,
    }
}

/// Decode the XR shim's flattened `[handedness, x, y]` triples
pub fn samples_from_flat(flat: &[f32]) -> Vec<StickSample> {
    flat.chunks_exact(3)
        .map(|c| StickSample {
            handedness: Handedness::from_code(c[0]),
            axes: vec![c[1], c[2]],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(handedness: Handedness, x: f32, y: f32) -> StickSample {
        StickSample {
            handedness,
            axes: vec![x, y],
        }
    }

    #[test]
    fn keys_map_by_code() {
        let mut keys = KeyState::default();
        assert!(keys.apply_key("ArrowUp", true));
        assert!(keys.apply_key("KeyD", true));
        assert!(!keys.apply_key("Space", true));
        assert_eq!(keys.tilt_target(), Tilt { x: 1.0, z: 0.0 });
        assert_eq!(keys.striker_dir(), Vec2::X);

        keys.apply_key("ArrowUp", false);
        keys.apply_key("ArrowLeft", true);
        assert_eq!(keys.tilt_target(), Tilt { x: 0.0, z: -1.0 });
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut keys = KeyState::default();
        keys.apply_key("KeyA", true);
        keys.apply_key("KeyD", true);
        keys.apply_key("ArrowLeft", true);
        keys.apply_key("ArrowRight", true);
        assert_eq!(keys.striker_dir(), Vec2::ZERO);
        assert_eq!(keys.tilt_target(), Tilt::default());
    }

    #[test]
    fn diagonal_striker_moves_at_unit_speed() {
        let mut keys = KeyState::default();
        keys.apply_key("KeyW", true);
        keys.apply_key("KeyA", true);
        let dir = keys.striker_dir();
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!(dir.x < 0.0 && dir.y < 0.0);
    }

    #[test]
    fn tilt_eases_toward_target() {
        let mut tilt = Tilt::default();
        smooth_tilt(&mut tilt, Tilt { x: 1.0, z: -1.0 }, 0.12);
        assert!((tilt.x - 0.12).abs() < 1e-6);
        assert!((tilt.z + 0.12).abs() < 1e-6);
        for _ in 0..200 {
            smooth_tilt(&mut tilt, Tilt { x: 1.0, z: -1.0 }, 0.12);
        }
        assert!((tilt.x - 1.0).abs() < 1e-4);
    }

    #[test]
    fn hands_get_their_roles() {
        let sticks = classify_sticks(
            &[
                sample(Handedness::Left, 0.5, -0.5),
                sample(Handedness::Right, -0.8, 0.0),
            ],
            0.15,
        );
        assert_eq!(sticks.striker, Some(Stick { x: 0.5, y: -0.5 }));
        assert_eq!(sticks.tilt, Some(Stick { x: -0.8, y: 0.0 }));
    }

    #[test]
    fn dead_zone_filters_small_deflections() {
        let sticks = classify_sticks(&[sample(Handedness::Right, 0.1, 0.1)], 0.15);
        assert_eq!(sticks, Sticks::default());

        // Above the dead zone overall, but one axis is still small
        let sticks = classify_sticks(&[sample(Handedness::Right, 0.1, 0.6)], 0.15);
        assert_eq!(sticks.tilt, Some(Stick { x: 0.0, y: 0.6 }));
    }

    #[test]
    fn lone_unhanded_stick_tilts() {
        let sticks = classify_sticks(&[sample(Handedness::None, 0.4, 0.0)], 0.15);
        assert_eq!(sticks.tilt, Some(Stick { x: 0.4, y: 0.0 }));
        assert_eq!(sticks.striker, None);

        // A handed stick takes precedence over the fallback
        let sticks = classify_sticks(
            &[
                sample(Handedness::None, 0.4, 0.0),
                sample(Handedness::Left, 0.0, 0.9),
            ],
            0.15,
        );
        assert_eq!(sticks.tilt, None);
        assert_eq!(sticks.striker, Some(Stick { x: 0.0, y: 0.9 }));
    }

    #[test]
    fn short_axes_are_skipped() {
        let sticks = classify_sticks(
            &[StickSample {
                handedness: Handedness::Right,
                axes: vec![0.9],
            }],
            0.15,
        );
        assert_eq!(sticks, Sticks::default());
    }

    #[test]
    fn flat_samples_decode() {
        let samples = samples_from_flat(&[2.0, 0.5, -0.5, 1.0, 0.0, 0.3, 9.0]);
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].handedness, Handedness::Right);
        assert_eq!(samples[1].handedness, Handedness::Left);
        assert_eq!(samples[1].axes, vec![0.0, 0.3]);
        assert_eq!(Handedness::from_code(0.0), Handedness::None);
    }
}
