use glam::Vec3;

// Shared camera, lighting and interaction tuning constants.

// Camera
pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_START: [f32; 3] = [-35.0, 4.0, 36.0];
pub const ORBIT_TARGET_START: [f32; 3] = [0.0, 0.0, 0.0];

// Render surface
pub const MAX_PIXEL_RATIO: f64 = 2.0; // caps GPU fill cost on dense displays
pub const MSAA_SAMPLES: u32 = 4;

// Lighting (colors are sRGB; shading uses the linear_* helpers)
pub const SUN_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
pub const SUN_INTENSITY: f32 = 1.5;
pub const SUN_POSITION: [f32; 3] = [10.0, 20.0, 10.0];
pub const AMBIENT_COLOR: [f32; 3] = [64.0 / 255.0, 64.0 / 255.0, 64.0 / 255.0]; // 0x404040
pub const AMBIENT_INTENSITY: f32 = 3.0;
pub const CLEAR_COLOR: [f64; 4] = [0.0, 0.0, 0.0, 1.0];

// Orbit controls
pub const ORBIT_DAMPING_FACTOR: f32 = 0.05;
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_PAN_SPEED: f32 = 1.0;
pub const ORBIT_ZOOM_STEP: f32 = 0.95; // per wheel notch
pub const ORBIT_POLAR_EPSILON: f32 = 1e-6;

// Interaction
pub const INTERACTIVE_NODE_NAMES: [&str; 4] = ["Project_1", "Project_2", "Project_3", "UFO"];

#[inline]
pub fn camera_start_vec3() -> Vec3 {
    Vec3::from_array(CAMERA_START)
}

#[inline]
pub fn orbit_target_start_vec3() -> Vec3 {
    Vec3::from_array(ORBIT_TARGET_START)
}

#[inline]
pub fn is_interactive_name(name: &str) -> bool {
    INTERACTIVE_NODE_NAMES.contains(&name)
}

/// sRGB transfer function inverse for one channel in [0, 1].
#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
pub fn linear_sun_color() -> Vec3 {
    Vec3::from_array(SUN_COLOR.map(srgb_to_linear))
}

#[inline]
pub fn linear_ambient_color() -> Vec3 {
    Vec3::from_array(AMBIENT_COLOR.map(srgb_to_linear))
}
