pub const SIM_HZ: f32 = 60.0;
pub const RENDER_HZ: f32 = 30.0;
pub const DT: f32 = 1.0 / SIM_HZ;

pub const STAR_COUNT: usize = 1500;

pub const SEED_DISTANCE_FACTOR: f32 = 0.8;
pub const RESPAWN_DISTANCE_FACTOR: f32 = 0.7;
pub const RECYCLE_DISTANCE: f32 = 10.0;

pub const SPEED_MIN: f32 = 0.002;
pub const SPEED_MAX: f32 = 0.010;

pub const SIZE_MIN: f32 = 0.5;
pub const SIZE_MAX: f32 = 2.0;

pub const PULL_NEAR: f32 = 2.7;
pub const PULL_FAR: f32 = 1.2;

pub const SWIRL_GAIN: f32 = 0.01;
pub const SWIRL_SOFTENING: f32 = 10.0;

pub const GLOW_RANGE: f32 = 100.0;

pub const TRAIL_RETAIN: f32 = 0.85;
pub const INTENSITY_BLANK: f32 = 0.05;

pub const FULL_NAME_MIN: usize = 3;
pub const FULL_NAME_MAX: usize = 50;
pub const FORM_NAME_MIN: usize = 2;
pub const STUDENT_ID_MIN: usize = 11;
pub const STUDENT_ID_PREFIX_DIGITS: usize = 4;
pub const PASSWORD_MIN: usize = 8;
pub const PASSWORD_MAX: usize = 50;
pub const SIGNIN_PASSWORD_MIN: usize = 6;

pub const INPUT_MAX: usize = 64;
