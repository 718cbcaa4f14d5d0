// Keyboard and pointer reduction helpers.
//
// Pure functions only, so host-side tests can `include!` this file.

use fnv::FnvHashSet;
use glam::Vec2;

/// Keys currently held, polled once per frame.
#[derive(Default, Clone, Debug)]
pub struct KeySet {
    held: FnvHashSet<String>,
}

impl KeySet {
    pub fn press(&mut self, key: &str) {
        self.held.insert(normalize_key(key));
    }

    pub fn release(&mut self, key: &str) {
        self.held.remove(&normalize_key(key));
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn is_down(&self, key: &str) -> bool {
        self.held.contains(&normalize_key(key))
    }

    fn any(&self, keys: &[&str]) -> bool {
        keys.iter().any(|k| self.is_down(k))
    }

    /// Steering direction from WASD/arrows, x right and y down, length <= 1.
    pub fn movement(&self) -> Vec2 {
        let mut v = Vec2::ZERO;
        if self.any(&["a", "ArrowLeft"]) {
            v.x -= 1.0;
        }
        if self.any(&["d", "ArrowRight"]) {
            v.x += 1.0;
        }
        if self.any(&["w", "ArrowUp"]) {
            v.y -= 1.0;
        }
        if self.any(&["s", "ArrowDown"]) {
            v.y += 1.0;
        }
        v.normalize_or_zero()
    }

    pub fn boost(&self) -> bool {
        self.is_down(" ")
    }
}

#[inline]
fn normalize_key(key: &str) -> String {
    if key.chars().count() == 1 {
        key.to_lowercase()
    } else {
        key.to_string()
    }
}

#[derive(Default, Clone, Copy, Debug)]
pub struct PointerState {
    pub last: Option<Vec2>,
    /// Movement accumulated since the last frame consumed it.
    pub pending: Vec2,
    pub down: bool,
}

impl PointerState {
    pub fn begin(&mut self, pos: Vec2) {
        self.down = true;
        self.last = Some(pos);
    }

    pub fn move_to(&mut self, pos: Vec2) {
        if self.down {
            if let Some(prev) = self.last {
                self.pending += pos - prev;
            }
        }
        self.last = Some(pos);
    }

    pub fn end(&mut self) {
        self.down = false;
        self.last = None;
    }

    pub fn take_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.pending)
    }
}

/// Number row "1".."9" selects a solfeggio tone by index.
#[inline]
pub fn tone_index_for_digit(key: &str) -> Option<usize> {
    match key {
        "1" => Some(0),
        "2" => Some(1),
        "3" => Some(2),
        "4" => Some(3),
        "5" => Some(4),
        "6" => Some(5),
        "7" => Some(6),
        "8" => Some(7),
        "9" => Some(8),
        _ => None,
    }
}

/// Convert a CSS-pixel position into the canvas backing-store space.
#[inline]
pub fn css_to_canvas(css: Vec2, css_size: Vec2, canvas_size: Vec2) -> Vec2 {
    if css_size.x <= 0.0 || css_size.y <= 0.0 {
        return css;
    }
    css / css_size * canvas_size
}
