//! Lifecycle of a single audio source (tone oscillator or ambience loop).
//!
//! The web frontend owns the actual audio nodes; this type only decides what
//! should happen to them. A stop request on a source that is already stopping
//! or stopped is a no-op that reports `StopOutcome::AlreadyStopped` instead of
//! relying on the browser to throw.

/// Where a source is in its life.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlaybackState {
    Idle,
    Playing { started_at: f64 },
    Stopping { release_until: f64 },
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StopOutcome {
    /// Begin a fade that ends at `release_until` (audio clock seconds).
    Release { release_until: f64 },
    AlreadyStopped,
}

#[derive(Clone, Debug)]
pub struct Playback {
    state: PlaybackState,
}

impl Default for Playback {
    fn default() -> Self {
        Self {
            state: PlaybackState::Idle,
        }
    }
}

impl Playback {
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.state, PlaybackState::Playing { .. })
    }

    /// True while nodes are still alive, i.e. playing or fading out.
    pub fn is_active(&self) -> bool {
        matches!(
            self.state,
            PlaybackState::Playing { .. } | PlaybackState::Stopping { .. }
        )
    }

    pub fn start(&mut self, now: f64) {
        self.state = PlaybackState::Playing { started_at: now };
    }

    pub fn stop(&mut self, now: f64, fade_sec: f64) -> StopOutcome {
        match self.state {
            PlaybackState::Playing { .. } => {
                let release_until = now + fade_sec.max(0.0);
                self.state = PlaybackState::Stopping { release_until };
                StopOutcome::Release { release_until }
            }
            PlaybackState::Idle | PlaybackState::Stopping { .. } | PlaybackState::Stopped => {
                StopOutcome::AlreadyStopped
            }
        }
    }

    /// Advance the clock; returns true exactly once, when a fade has finished
    /// and the caller should disconnect its nodes.
    pub fn poll(&mut self, now: f64) -> bool {
        if let PlaybackState::Stopping { release_until } = self.state {
            if now >= release_until {
                self.state = PlaybackState::Stopped;
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_is_idempotent() {
        let mut p = Playback::default();
        assert_eq!(p.stop(0.0, 0.5), StopOutcome::AlreadyStopped);
        p.start(1.0);
        assert!(p.is_playing());
        assert_eq!(
            p.stop(2.0, 0.5),
            StopOutcome::Release { release_until: 2.5 }
        );
        assert_eq!(p.stop(2.1, 0.5), StopOutcome::AlreadyStopped);
        assert!(p.is_active());
        assert!(!p.poll(2.4));
        assert!(p.poll(2.5));
        assert!(!p.poll(3.0));
        assert_eq!(p.state(), PlaybackState::Stopped);
        assert_eq!(p.stop(3.0, 0.5), StopOutcome::AlreadyStopped);
    }

    #[test]
    fn restart_after_stop() {
        let mut p = Playback::default();
        p.start(0.0);
        p.stop(0.0, 0.0);
        assert!(p.poll(0.0));
        p.start(1.0);
        assert_eq!(p.state(), PlaybackState::Playing { started_at: 1.0 });
    }
}
