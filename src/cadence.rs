// Frame-driven timers for batched saves and periodic decay.
// No browser types, so host-side tests can `include!` this file.

/// Fires once per `interval_sec` of accumulated frame time.
pub struct Cadence {
    interval_sec: f32,
    elapsed_sec: f32,
}

impl Cadence {
    pub fn new(interval_sec: f32) -> Self {
        Self {
            interval_sec,
            elapsed_sec: 0.0,
        }
    }

    pub fn tick(&mut self, dt_sec: f32) -> bool {
        self.elapsed_sec += dt_sec.max(0.0);
        if self.elapsed_sec >= self.interval_sec {
            self.elapsed_sec = 0.0;
            true
        } else {
            false
        }
    }
}

/// Unsaved-changes flag for state written in batches.
#[derive(Default)]
pub struct Pending {
    dirty: bool,
}

impl Pending {
    pub fn mark(&mut self) {
        self.dirty = true;
    }

    pub fn is_set(&self) -> bool {
        self.dirty
    }

    /// True at most once per batch of marks.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
