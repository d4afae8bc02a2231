//! Camera and viewport state shared with the web frontend.
//!
//! These types avoid referencing platform-specific APIs. The web frontend
//! feeds them window sizes and reads back matrices for rendering and picking.

use crate::constants::{
    camera_start_vec3, orbit_target_start_vec3, CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR,
    MAX_PIXEL_RATIO,
};
use glam::{Mat4, Vec3};

/// Right-handed perspective camera with a cached projection matrix.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
    projection: Mat4,
}

impl Camera {
    pub fn new(eye: Vec3, target: Vec3, aspect: f32, fovy_radians: f32, znear: f32, zfar: f32) -> Self {
        let mut camera = Self {
            eye,
            target,
            up: Vec3::Y,
            aspect,
            fovy_radians,
            znear,
            zfar,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    /// The portfolio camera: 75° vertical FOV, 0.1..1000 clip range, fixed start position.
    pub fn portfolio(aspect: f32) -> Self {
        Self::new(
            camera_start_vec3(),
            orbit_target_start_vec3(),
            aspect,
            CAMERA_FOV_DEGREES.to_radians(),
            CAMERA_NEAR,
            CAMERA_FAR,
        )
    }

    pub fn update_projection_matrix(&mut self) {
        self.projection = Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar);
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection_matrix();
    }

    /// Clip-space projection matrix as of the last `update_projection_matrix`.
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// World to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }
}

/// Something whose pixel dimensions follow the viewport (the canvas and its swap chain).
pub trait RenderSurface {
    /// `css_*` are layout pixels, `backing_*` are device pixels.
    fn set_size(&mut self, css_width: f64, css_height: f64, backing_width: u32, backing_height: u32);
}

/// Window-sized viewport in CSS pixels plus the capped device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub pixel_ratio: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            pixel_ratio: capped_pixel_ratio(device_pixel_ratio),
        }
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        (self.width / self.height.max(1.0)) as f32
    }

    /// Device-pixel size of the render surface, never smaller than 1x1.
    #[inline]
    pub fn backing_size(&self) -> (u32, u32) {
        let w = (self.width * self.pixel_ratio) as u32;
        let h = (self.height * self.pixel_ratio) as u32;
        (w.max(1), h.max(1))
    }

    /// Push the current size to a render surface.
    pub fn apply(&self, surface: &mut impl RenderSurface) {
        let (bw, bh) = self.backing_size();
        surface.set_size(self.width, self.height, bw, bh);
    }

    /// React to a window resize: new aspect and projection, surface resized.
    /// Camera position and orientation are left alone.
    pub fn resize(
        &mut self,
        width: f64,
        height: f64,
        camera: &mut Camera,
        surface: &mut impl RenderSurface,
    ) {
        self.width = width;
        self.height = height;
        camera.set_aspect(self.aspect());
        self.apply(surface);
    }
}

#[inline]
pub fn capped_pixel_ratio(device_pixel_ratio: f64) -> f64 {
    if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio.min(MAX_PIXEL_RATIO)
    } else {
        1.0
    }
}
