pub mod achievements;
pub mod breath;
pub mod companion;
pub mod constants;
pub mod journal;
pub mod noise;
pub mod persist;
pub mod playback;
pub mod pool;
pub mod stats;
pub mod tone;
pub mod tunnel;

pub use achievements::*;
pub use breath::*;
pub use companion::*;
pub use journal::*;
pub use noise::*;
pub use persist::*;
pub use playback::*;
pub use pool::*;
pub use stats::*;
pub use tone::*;
pub use tunnel::*;
