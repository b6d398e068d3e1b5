//! Which loop drives the game
//!
//! The page's animation frames run the game until an immersive session starts
//! delivering its own frames. Headset browsers throttle the window loop while
//! a session is up, so session frames take over and the window loop parks
//! itself until the session ends.

use crate::frame_dt;

/// Origin of an animation-frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameSource {
    Window,
    Xr,
}

#[derive(Debug)]
pub struct FrameClock {
    source: FrameSource,
    last_time: Option<f64>,
    /// A window callback is scheduled
    window_loop: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            source: FrameSource::Window,
            last_time: None,
            window_loop: true,
        }
    }

    pub fn source(&self) -> FrameSource {
        self.source
    }

    fn step(&mut self, time: f64) -> f32 {
        let dt = self.last_time.map_or(0.0, |last| frame_dt(time, last));
        self.last_time = Some(time);
        dt
    }

    /// Window frame at `time` (ms)
    ///
    /// Returns the step to simulate, or None when a session owns the frames;
    /// the window loop must then stop rescheduling itself.
    pub fn window_frame(&mut self, time: f64) -> Option<f32> {
        if self.source == FrameSource::Xr {
            self.window_loop = false;
            return None;
        }
        Some(self.step(time))
    }

    /// Session frame at `time` (ms); the first one takes over from the window
    pub fn xr_frame(&mut self, time: f64) -> f32 {
        if self.source != FrameSource::Xr {
            log::debug!("XR frames now drive the game");
            self.source = FrameSource::Xr;
            self.last_time = None;
        }
        self.step(time)
    }

    /// Hand frames back to the window after a session ends
    ///
    /// Returns true when the window loop has parked and must be restarted.
    pub fn session_ended(&mut self) -> bool {
        self.source = FrameSource::Window;
        self.last_time = None;
        if self.window_loop {
            false
        } else {
            self.window_loop = true;
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_drives_until_session_frames_arrive() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.window_frame(1000.0), Some(0.0));
        assert!((clock.window_frame(1016.0).unwrap() - 0.016).abs() < 1e-6);

        // First session frame starts a fresh step on the session's clock
        assert_eq!(clock.xr_frame(5000.0), 0.0);
        assert_eq!(clock.source(), FrameSource::Xr);
        assert_eq!(clock.window_frame(1032.0), None);
        assert!((clock.xr_frame(5011.0) - 0.011).abs() < 1e-6);

        assert!(clock.session_ended());
        assert_eq!(clock.source(), FrameSource::Window);
        assert_eq!(clock.window_frame(6000.0), Some(0.0));
    }

    #[test]
    fn restart_only_a_parked_window_loop() {
        let mut clock = FrameClock::new();
        // Session ended before the window loop noticed it
        clock.xr_frame(10.0);
        assert!(!clock.session_ended());
        assert_eq!(clock.window_frame(20.0), Some(0.0));

        // A second end event must not start a second loop
        clock.xr_frame(30.0);
        clock.window_frame(31.0);
        assert!(clock.session_ended());
        assert!(!clock.session_ended());
    }
}
