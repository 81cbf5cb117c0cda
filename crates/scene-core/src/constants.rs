// Scene tuning constants shared by the core runtime and the web front-end.

// Variant interpolation (per second, used as `1 - e^(-rate * dt)`)
pub const VARIANT_LERP_RATE: f32 = 3.2;
pub const VARIANT_LERP_RATE_HOVERED: f32 = 5.5;
// fraction of the distance covered by the end of an explicit transition
pub const TRANSITION_CONVERGENCE: f32 = 0.98;

// Readiness
pub const READY_WARMUP_SEC: f64 = 0.35;

// Clamp ranges
pub const BRIGHTNESS_MIN: f32 = 0.5;
pub const BRIGHTNESS_MAX: f32 = 2.0;
pub const CURSOR_BOOST_LIMIT: f32 = 1.0;
pub const MIN_SHAPE_SCALE: f32 = 1e-3;

// Orthographic camera (world units; top/bottom stay fixed, left/right follow aspect)
pub const FRUSTUM_HALF_HEIGHT: f32 = 5.0;
pub const CAMERA_Z: f32 = 20.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;

// Responsive layout
pub const DEFAULT_BREAKPOINT_WIDTH: f32 = 1280.0;
pub const DEFAULT_BREAKPOINT_HEIGHT: f32 = 800.0;
pub const RESPONSIVE_MIN_FIT: f32 = 0.45;
pub const RESPONSIVE_SCALE_FLOOR: f32 = 0.4; // scale multiplier at the minimum fit

// Pointer parallax
pub const POINTER_LERP_RATE: f32 = 5.0;
pub const PARALLAX_TILT: f32 = 0.16; // radians at full pointer deflection
pub const PARALLAX_SHIFT: f32 = 0.45; // world units at full pointer deflection
pub const CURSOR_BOOST_GAIN: f32 = 0.6; // extra parallax per unit of cursor boost
pub const GROUP_BOUND_FRACTION: f32 = 0.12; // of the visible half extents

// Idle breathing
pub const BREATHING_SPEED: f32 = 0.9; // rad/s
pub const BREATHING_SCALE: f32 = 0.018;
pub const BREATHING_ROTATION: f32 = 0.025;
pub const HOVER_SCALE_BOOST: f32 = 0.035;

// Geometry resolution
pub const ARC_RADIUS: f32 = 1.0;
pub const TUBE_RADIUS: f32 = 0.32;
pub const TUBULAR_SEGMENTS: usize = 96;
pub const RADIAL_SEGMENTS: usize = 24;
pub const CAP_SEGMENTS: usize = 12;
pub const WAVE_AMPLITUDE: f32 = 0.35;
pub const WAVE_LENGTH: f32 = 3.2;
pub const WAVE_PERIODS: f32 = 1.5;
pub const SPHERE_RADIUS: f32 = 0.85;
pub const SPHERE_WIDTH_SEGMENTS: usize = 48;
pub const SPHERE_HEIGHT_SEGMENTS: usize = 32;
