// Host-side tests for damped orbit controls.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use folio_core::*;
use glam::Vec3;
use std::f32::consts::{FRAC_PI_2, TAU};

fn camera_on_z(distance: f32) -> Camera {
    Camera::new(
        Vec3::new(0.0, 0.0, distance),
        Vec3::ZERO,
        1.0,
        75f32.to_radians(),
        0.1,
        1000.0,
    )
}

fn spherical(camera: &Camera) -> Spherical {
    Spherical::from_offset(camera.eye - camera.target)
}

#[test]
fn idle_controls_leave_camera_in_place() {
    let mut camera = Camera::portfolio(1.0);
    let start = camera.eye;
    let mut controls = OrbitControls::default();
    for _ in 0..10 {
        controls.update(&mut camera);
    }
    assert!(camera.eye.abs_diff_eq(start, 1e-3));
}

#[test]
fn spherical_offset_conversion() {
    let offset = Vec3::new(-35.0, 4.0, 36.0);
    let s = Spherical::from_offset(offset);
    assert!(s.to_offset().abs_diff_eq(offset, 1e-3));

    let s = Spherical::from_offset(Vec3::new(0.0, 0.0, 10.0));
    assert_relative_eq!(s.radius, 10.0);
    assert_relative_eq!(s.phi, FRAC_PI_2);
    assert_abs_diff_eq!(s.theta, 0.0);
}

#[test]
fn damped_rotation_applies_a_fraction_per_frame() {
    let mut camera = camera_on_z(10.0);
    let mut controls = OrbitControls::default();
    controls.rotate_left(0.5);

    controls.update(&mut camera);
    assert_abs_diff_eq!(spherical(&camera).theta, -0.5 * ORBIT_DAMPING_FACTOR, epsilon = 1e-5);

    // the remainder keeps bleeding in after input stops
    controls.update(&mut camera);
    let expected = -0.5 * ORBIT_DAMPING_FACTOR * (2.0 - ORBIT_DAMPING_FACTOR);
    assert_abs_diff_eq!(spherical(&camera).theta, expected, epsilon = 1e-5);
}

#[test]
fn damped_rotation_converges_on_the_full_angle() {
    let mut camera = camera_on_z(10.0);
    let mut controls = OrbitControls::default();
    controls.rotate_left(0.5);
    for _ in 0..500 {
        controls.update(&mut camera);
    }
    let s = spherical(&camera);
    assert_abs_diff_eq!(s.theta, -0.5, epsilon = 1e-3);
    assert_relative_eq!(s.radius, 10.0, max_relative = 1e-4);
    // settled: one more frame barely moves
    assert!(!controls.update(&mut camera));
}

#[test]
fn undamped_rotation_applies_at_once() {
    let mut camera = camera_on_z(10.0);
    let mut controls = OrbitControls::default();
    controls.enable_damping = false;
    controls.rotate_left(0.5);
    assert!(controls.update(&mut camera));
    assert_abs_diff_eq!(spherical(&camera).theta, -0.5, epsilon = 1e-5);
    assert!(!controls.update(&mut camera));
}

#[test]
fn polar_angle_is_clamped() {
    let mut camera = camera_on_z(10.0);
    let mut controls = OrbitControls::default();
    controls.enable_damping = false;
    controls.rotate_up(10.0);
    controls.update(&mut camera);

    let s = spherical(&camera);
    assert!(s.phi < 1e-3);
    assert_relative_eq!(camera.eye.y, 10.0, max_relative = 1e-4);
    assert!(camera.eye.is_finite());
}

#[test]
fn wheel_dollies_in_and_out() {
    let mut camera = camera_on_z(10.0);
    let mut controls = OrbitControls::default();

    controls.wheel(-100.0);
    controls.update(&mut camera);
    assert_relative_eq!(spherical(&camera).radius, 10.0 * ORBIT_ZOOM_STEP, max_relative = 1e-5);

    controls.wheel(100.0);
    controls.update(&mut camera);
    assert_relative_eq!(spherical(&camera).radius, 10.0, max_relative = 1e-5);

    controls.wheel(0.0);
    controls.update(&mut camera);
    assert_relative_eq!(spherical(&camera).radius, 10.0, max_relative = 1e-5);
}

#[test]
fn distance_limits_hold() {
    let mut camera = camera_on_z(10.0);
    let mut controls = OrbitControls::default();
    controls.min_distance = 9.8;
    for _ in 0..5 {
        controls.wheel(-1.0);
        controls.update(&mut camera);
    }
    assert_relative_eq!(spherical(&camera).radius, 9.8, max_relative = 1e-5);
}

#[test]
fn left_drag_rotates_by_screen_fraction() {
    let mut camera = camera_on_z(10.0);
    let mut controls = OrbitControls::default();
    controls.enable_damping = false;
    controls.pointer_down(1, 0, 100.0, 100.0);
    assert_eq!(controls.drag_mode(), DragMode::Rotate);
    controls.pointer_move(1, 200.0, 100.0, 500.0, &camera);
    controls.update(&mut camera);

    assert_abs_diff_eq!(spherical(&camera).theta, -TAU * 100.0 / 500.0, epsilon = 1e-4);

    controls.pointer_up(1);
    assert_eq!(controls.drag_mode(), DragMode::None);
}

#[test]
fn moves_without_a_drag_are_ignored() {
    let mut camera = camera_on_z(10.0);
    let mut controls = OrbitControls::default();
    controls.pointer_move(1, 300.0, 250.0, 500.0, &camera);
    controls.update(&mut camera);
    assert!(camera.eye.abs_diff_eq(Vec3::new(0.0, 0.0, 10.0), 1e-4));

    // middle button starts nothing
    controls.pointer_down(1, 1, 0.0, 0.0);
    assert_eq!(controls.drag_mode(), DragMode::None);
    assert_eq!(controls.active_pointer(), None);
}

#[test]
fn right_drag_pans_target_and_eye_together() {
    let mut camera = camera_on_z(10.0);
    let mut controls = OrbitControls::default();
    controls.enable_damping = false;
    controls.pointer_down(1, 2, 0.0, 0.0);
    assert_eq!(controls.drag_mode(), DragMode::Pan);
    controls.pointer_move(1, 100.0, 0.0, 500.0, &camera);
    controls.update(&mut camera);

    assert!(camera.target.x < 0.0);
    assert_abs_diff_eq!(camera.target.y, 0.0, epsilon = 1e-5);
    assert_abs_diff_eq!(camera.eye.x, camera.target.x, epsilon = 1e-4);
    assert_relative_eq!(spherical(&camera).radius, 10.0, max_relative = 1e-4);
}

#[test]
fn second_pointer_does_not_hijack_the_drag() {
    let mut camera = camera_on_z(10.0);
    let mut controls = OrbitControls::default();
    controls.enable_damping = false;
    controls.pointer_down(1, 0, 100.0, 100.0);
    controls.pointer_down(2, 0, 500.0, 100.0);
    assert_eq!(controls.active_pointer(), Some(1));

    // second finger moving is ignored
    controls.pointer_move(2, 700.0, 100.0, 800.0, &camera);
    controls.update(&mut camera);
    assert_abs_diff_eq!(spherical(&camera).theta, 0.0, epsilon = 1e-5);

    // first finger's 1px move rotates by 1px worth, not by the gap between fingers
    controls.pointer_move(1, 101.0, 100.0, 800.0, &camera);
    controls.update(&mut camera);
    assert_abs_diff_eq!(spherical(&camera).theta, -TAU / 800.0, epsilon = 1e-4);
}

#[test]
fn only_the_owning_pointer_ends_the_drag() {
    let camera = camera_on_z(10.0);
    let mut controls = OrbitControls::default();
    controls.pointer_down(1, 0, 0.0, 0.0);
    controls.pointer_down(2, 0, 50.0, 0.0);

    controls.pointer_up(2);
    assert_eq!(controls.drag_mode(), DragMode::Rotate);
    assert_eq!(controls.active_pointer(), Some(1));

    controls.pointer_up(1);
    assert_eq!(controls.drag_mode(), DragMode::None);
    assert_eq!(controls.active_pointer(), None);

    // a fresh pointer can start the next drag
    controls.pointer_down(3, 2, 10.0, 10.0);
    assert_eq!(controls.drag_mode(), DragMode::Pan);
    controls.pointer_move(1, 60.0, 10.0, 500.0, &camera);
    assert_eq!(controls.active_pointer(), Some(3));
}
