// Shared audio/motion tuning constants used by the core engines and the web frontend.

// Tone envelopes (seconds)
pub const TONE_FADE_IN_SEC: f64 = 0.5;
pub const TONE_FADE_OUT_MIN_SEC: f64 = 0.3;
pub const TONE_FADE_OUT_MAX_SEC: f64 = 1.0;
pub const TONE_FADE_OUT_DEFAULT_SEC: f64 = 0.5;
pub const TONE_SWITCH_FADE_SEC: f64 = 0.05; // quick teardown when switching frequency
pub const TONE_PEAK_GAIN: f32 = 0.3;

// Ambience
pub const AMBIENCE_BUFFER_SEC: f32 = 2.0;
pub const AMBIENCE_CHANNELS: usize = 2;
pub const AMBIENCE_VOLUME_RAMP_SEC: f64 = 0.1;
pub const AMBIENCE_CROSSFADE_SEC: f32 = 0.01; // tail->head blend for seamless looping
pub const AMBIENCE_DEFAULT_VOLUME: f32 = 0.5;
pub const OCEAN_LFO_HZ: f32 = 0.1;
pub const CRACKLE_THRESHOLD: f32 = 0.6;

// Breathing (milliseconds)
pub const INHALE_MS: u64 = 4000;
pub const HOLD_MS: u64 = 4000;
pub const EXHALE_MS: u64 = 6000;

// Tunnel flight
pub const RING_COUNT: usize = 24;
pub const RING_MAX_Z: f32 = 2000.0;
pub const RING_RECYCLE_Z: f32 = 5.0;
pub const FOCAL_LENGTH: f32 = 300.0;
pub const BASE_SPEED: f32 = 1.0;
pub const BOOST_SPEED: f32 = 2.5;
pub const Z_UNITS_PER_SEC: f32 = 480.0; // z consumed per second at speed 1.0
pub const RING_RADIUS: f32 = 120.0;
pub const RING_OFFSET_SPAN: f32 = 90.0; // max lateral wander of ring centres
pub const COLLECTIBLE_CHANCE: f64 = 0.3;
pub const PICKUP_RADIUS: f32 = 60.0;
pub const PICKUP_Z_BAND: f32 = 60.0; // rings nearer than this can be collected
pub const COMBO_WINDOW_MS: u64 = 2000;
pub const PICKUP_BASE_SCORE: u32 = 10;
pub const PLAYER_MAX_OFFSET: f32 = 150.0;
pub const PLAYER_MOVE_PER_SEC: f32 = 240.0;

// Particle bursts
pub const PARTICLE_POOL_SIZE: usize = 256;
pub const BURST_PARTICLES: usize = 16;
pub const PARTICLE_LIFE_SEC: f32 = 0.8;
pub const PARTICLE_SPEED: f32 = 160.0;

// Background orbs
pub const ORB_COUNT: usize = 12;
pub const ORB_DRIFT_PER_SEC: f32 = 12.0;

// Journals
pub const JOURNAL_CAP: usize = 50;

// Companion meters
pub const METER_MIN: f32 = 0.0;
pub const METER_MAX: f32 = 100.0;
