// Host-side tests for the camera, viewport resize and pointer mapping.

use approx::assert_relative_eq;
use folio_core::*;
use glam::{Mat4, Vec3};

#[derive(Default)]
struct FakeSurface {
    sizes: Vec<(f64, f64, u32, u32)>,
}

impl RenderSurface for FakeSurface {
    fn set_size(&mut self, css_width: f64, css_height: f64, backing_width: u32, backing_height: u32) {
        self.sizes.push((css_width, css_height, backing_width, backing_height));
    }
}

#[test]
fn portfolio_camera_starting_pose() {
    let camera = Camera::portfolio(16.0 / 9.0);
    assert_eq!(camera.eye, Vec3::new(-35.0, 4.0, 36.0));
    assert_eq!(camera.target, Vec3::ZERO);
    assert_relative_eq!(camera.fovy_radians, 75f32.to_radians());
    assert_eq!(camera.znear, 0.1);
    assert_eq!(camera.zfar, 1000.0);
}

#[test]
fn resize_updates_aspect_and_surface_only() {
    let mut viewport = Viewport::new(1280.0, 720.0, 1.0);
    let mut camera = Camera::portfolio(viewport.aspect());
    let mut surface = FakeSurface::default();
    let (eye, target) = (camera.eye, camera.target);

    viewport.resize(800.0, 600.0, &mut camera, &mut surface);

    assert_relative_eq!(camera.aspect, 800.0 / 600.0);
    assert_eq!(camera.eye, eye);
    assert_eq!(camera.target, target);
    assert_eq!(surface.sizes, vec![(800.0, 600.0, 800, 600)]);
}

#[test]
fn resize_refreshes_projection_matrix() {
    let mut viewport = Viewport::new(1000.0, 1000.0, 1.0);
    let mut camera = Camera::portfolio(viewport.aspect());
    viewport.resize(1600.0, 400.0, &mut camera, &mut FakeSurface::default());

    let expected = Mat4::perspective_rh(75f32.to_radians(), 4.0, 0.1, 1000.0);
    assert!(camera.projection_matrix().abs_diff_eq(expected, 1e-6));
}

#[test]
fn every_resize_event_is_applied() {
    let mut viewport = Viewport::new(640.0, 480.0, 1.0);
    let mut camera = Camera::portfolio(viewport.aspect());
    let mut surface = FakeSurface::default();
    for _ in 0..3 {
        viewport.resize(640.0, 480.0, &mut camera, &mut surface);
    }
    assert_eq!(surface.sizes.len(), 3);
}

#[test]
fn pixel_ratio_is_capped_at_two() {
    assert_eq!(capped_pixel_ratio(1.0), 1.0);
    assert_eq!(capped_pixel_ratio(1.5), 1.5);
    assert_eq!(capped_pixel_ratio(3.0), MAX_PIXEL_RATIO);
    assert_eq!(capped_pixel_ratio(0.0), 1.0);
    assert_eq!(capped_pixel_ratio(f64::NAN), 1.0);

    let viewport = Viewport::new(800.0, 600.0, 3.0);
    assert_eq!(viewport.pixel_ratio, 2.0);
    assert_eq!(viewport.backing_size(), (1600, 1200));
}

#[test]
fn apply_reports_css_and_device_pixels() {
    let viewport = Viewport::new(500.0, 250.0, 1.5);
    let mut surface = FakeSurface::default();
    viewport.apply(&mut surface);
    assert_eq!(surface.sizes, vec![(500.0, 250.0, 750, 375)]);
}

#[test]
fn zero_sized_window_stays_usable() {
    let viewport = Viewport::new(0.0, 0.0, 1.0);
    assert!(viewport.aspect().is_finite());
    assert_eq!(viewport.backing_size(), (1, 1));
}

#[test]
fn pointer_ndc_corners_and_center() {
    let (w, h) = (800.0, 600.0);
    assert_eq!(pointer_ndc(0.0, 0.0, w, h).to_array(), [-1.0, 1.0]);
    assert_eq!(pointer_ndc(w, h, w, h).to_array(), [1.0, -1.0]);
    assert_eq!(pointer_ndc(w / 2.0, h / 2.0, w, h).to_array(), [0.0, 0.0]);
    assert_eq!(pointer_ndc(200.0, 450.0, w, h).to_array(), [-0.5, -0.5]);
}

#[test]
fn pointer_state_tracks_latest_event() {
    let mut pointer = PointerState::default();
    pointer.set_from_client(100.0, 100.0, 200.0, 200.0);
    assert_eq!((pointer.x, pointer.y), (0.0, 0.0));
    pointer.set_from_client(0.0, 200.0, 200.0, 200.0);
    assert_eq!((pointer.x, pointer.y), (-1.0, -1.0));
}

#[test]
fn pointer_ndc_tolerates_zero_window() {
    let ndc = pointer_ndc(0.0, 0.0, 0.0, 0.0);
    assert!(ndc.x.is_finite() && ndc.y.is_finite());
}
