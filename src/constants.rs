// Frontend tuning constants.
//
// Audio/motion constants shared with the simulation live in
// `stillpoint_core::constants`; these only concern the browser side.

// Element ids
pub const CANVAS_ID: &str = "app-canvas";
pub const OVERLAY_ID: &str = "start-overlay";
pub const HUD_ID: &str = "hud";
pub const BREATH_LABEL_ID: &str = "breath-label";

// Haptic pulse length per breath phase (ms)
pub const HAPTIC_INHALE_MS: u32 = 60;
pub const HAPTIC_HOLD_MS: u32 = 30;
pub const HAPTIC_EXHALE_MS: u32 = 90;

// Short cue tone played on breath phase changes
pub const CUE_INHALE_HZ: f32 = 396.0;
pub const CUE_HOLD_HZ: f32 = 528.0;
pub const CUE_EXHALE_HZ: f32 = 417.0;
pub const CUE_GAIN: f32 = 0.08;
pub const CUE_SEC: f64 = 0.6;

// Pickup chime
pub const CHIME_BASE_HZ: f32 = 528.0;
pub const CHIME_STEP_RATIO: f32 = 1.059_463; // one semitone per combo step
pub const CHIME_MAX_STEPS: u32 = 12;
pub const CHIME_GAIN: f32 = 0.12;
pub const CHIME_SEC: f64 = 0.35;

// Frame timing
pub const MAX_FRAME_DT_SEC: f32 = 0.1; // clamp after tab switches
pub const STATS_SAVE_INTERVAL_SEC: f32 = 5.0;
pub const COMPANION_DECAY_INTERVAL_SEC: f32 = 30.0;

// Visuals
pub const BACKGROUND_RGB: [u8; 3] = [6, 8, 20];
pub const RING_LINE_WIDTH: f64 = 3.0;
pub const COLLECTIBLE_RADIUS: f32 = 14.0;
pub const PLAYER_RADIUS: f64 = 10.0;
pub const BREATH_ORB_MIN: f32 = 40.0;
pub const BREATH_ORB_SPAN: f32 = 60.0;
pub const ORB_ALPHA: f32 = 0.12;

// Volume keys
pub const VOLUME_STEP: f32 = 0.05;
