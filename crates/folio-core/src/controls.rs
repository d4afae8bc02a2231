//! Orbit camera controls with damping.
//!
//! Input handlers accumulate pending rotation, pan and dolly; `update` is
//! called once per frame and bleeds a fraction of the pending motion into the
//! camera, leaving the rest to decay on later frames.

use crate::constants::{
    ORBIT_DAMPING_FACTOR, ORBIT_PAN_SPEED, ORBIT_POLAR_EPSILON, ORBIT_ROTATE_SPEED,
    ORBIT_ZOOM_STEP,
};
use crate::state::Camera;
use glam::Vec3;
use std::f32::consts::{PI, TAU};

/// Which drag gesture is in progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragMode {
    #[default]
    None,
    Rotate,
    Pan,
}

/// Radius, polar angle from +Y, and azimuth around +Y (measured from +Z).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub phi: f32,
    pub theta: f32,
}

impl Spherical {
    pub fn from_offset(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self::default();
        }
        Self {
            radius,
            theta: v.x.atan2(v.z),
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    pub fn to_offset(self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }

    fn make_safe(&mut self) {
        self.phi = self.phi.clamp(ORBIT_POLAR_EPSILON, PI - ORBIT_POLAR_EPSILON);
    }
}

#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    spherical_delta: Spherical,
    pan_offset: Vec3,
    scale: f32,
    drag: DragMode,
    // pointer that owns the drag; other pointers are ignored until it lifts
    active_pointer: Option<i32>,
    last_pointer: [f32; 2],
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: ORBIT_DAMPING_FACTOR,
            rotate_speed: ORBIT_ROTATE_SPEED,
            pan_speed: ORBIT_PAN_SPEED,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            spherical_delta: Spherical::default(),
            pan_offset: Vec3::ZERO,
            scale: 1.0,
            drag: DragMode::None,
            active_pointer: None,
            last_pointer: [0.0, 0.0],
        }
    }
}

impl OrbitControls {
    #[inline]
    pub fn drag_mode(&self) -> DragMode {
        self.drag
    }

    /// Pointer id of the drag in progress, if any.
    #[inline]
    pub fn active_pointer(&self) -> Option<i32> {
        self.active_pointer
    }

    /// Begin a drag at client pixel `(x, y)`. Button 0 rotates, button 2 pans.
    /// Ignored while another pointer is already dragging.
    pub fn pointer_down(&mut self, pointer_id: i32, button: i16, x: f32, y: f32) {
        if self.active_pointer.is_some() {
            return;
        }
        self.drag = match button {
            0 => DragMode::Rotate,
            2 => DragMode::Pan,
            _ => DragMode::None,
        };
        if self.drag != DragMode::None {
            self.active_pointer = Some(pointer_id);
            self.last_pointer = [x, y];
        }
    }

    pub fn pointer_move(
        &mut self,
        pointer_id: i32,
        x: f32,
        y: f32,
        client_height: f32,
        camera: &Camera,
    ) {
        if self.active_pointer != Some(pointer_id) {
            return;
        }
        let dx = x - self.last_pointer[0];
        let dy = y - self.last_pointer[1];
        self.last_pointer = [x, y];
        let h = client_height.max(1.0);
        match self.drag {
            DragMode::Rotate => {
                self.rotate_left(TAU * dx * self.rotate_speed / h);
                self.rotate_up(TAU * dy * self.rotate_speed / h);
            }
            DragMode::Pan => self.pan(dx * self.pan_speed, dy * self.pan_speed, h, camera),
            DragMode::None => {}
        }
    }

    /// End the drag if `pointer_id` owns it.
    pub fn pointer_up(&mut self, pointer_id: i32) {
        if self.active_pointer == Some(pointer_id) {
            self.drag = DragMode::None;
            self.active_pointer = None;
        }
    }

    /// Wheel input: negative `delta_y` moves closer.
    pub fn wheel(&mut self, delta_y: f32) {
        if delta_y < 0.0 {
            self.scale *= ORBIT_ZOOM_STEP;
        } else if delta_y > 0.0 {
            self.scale /= ORBIT_ZOOM_STEP;
        }
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.spherical_delta.theta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.spherical_delta.phi -= angle;
    }

    /// Screen-space pan by pixel deltas, scaled so the target tracks the pointer.
    pub fn pan(&mut self, dx: f32, dy: f32, client_height: f32, camera: &Camera) {
        let offset = camera.eye - camera.target;
        let target_distance = offset.length() * (camera.fovy_radians * 0.5).tan();
        let view_inv = camera.view_matrix().inverse();
        let right = view_inv.x_axis.truncate();
        let up = view_inv.y_axis.truncate();
        let h = client_height.max(1.0);
        self.pan_offset += right * (-2.0 * dx * target_distance / h);
        self.pan_offset += up * (2.0 * dy * target_distance / h);
    }

    /// Apply one frame of pending motion to `camera`. Returns true when the camera moved.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        let before = camera.eye;
        let offset = camera.eye - camera.target;
        let mut spherical = Spherical::from_offset(offset);

        let step = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };
        spherical.theta += self.spherical_delta.theta * step;
        spherical.phi += self.spherical_delta.phi * step;
        spherical.make_safe();
        camera.target += self.pan_offset * step;

        spherical.radius = (spherical.radius * self.scale).clamp(self.min_distance, self.max_distance);
        camera.eye = camera.target + spherical.to_offset();

        if self.enable_damping {
            let keep = 1.0 - self.damping_factor;
            self.spherical_delta.theta *= keep;
            self.spherical_delta.phi *= keep;
            self.pan_offset *= keep;
        } else {
            self.spherical_delta = Spherical::default();
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        camera.eye.distance_squared(before) > f32::EPSILON
    }
}
