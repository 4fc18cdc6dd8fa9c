// Host-side tests for the pointer-following camera.

use glam::Vec3;
use viz_core::*;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() <= 1e-5 * (1.0 + a.abs().max(b.abs()))
}

#[test]
fn follow_pointer_matches_easing_formula() {
    let samples = [-50.0_f32, -3.2, -0.5, 0.0, 0.25, 1.0, 7.5, 120.0];
    for &cx in &samples {
        for &cy in &samples {
            for &px in &samples {
                for &py in &samples {
                    let mut cam = Camera::new(1.0);
                    cam.eye = Vec3::new(cx, cy, 14.0);
                    cam.follow_pointer(PointerOffset { x: px, y: py });
                    assert!(approx(cam.eye.x, cx + (px - cx) * 0.05), "x for {cx},{px}");
                    assert!(approx(cam.eye.y, cy + (-py - cy) * 0.5), "y for {cy},{py}");
                    assert_eq!(cam.eye.z, 14.0);
                    assert_eq!(cam.target, Vec3::ZERO);
                }
            }
        }
    }
}

#[test]
fn camera_converges_on_still_pointer() {
    let mut cam = Camera::new(1.0);
    let p = PointerOffset { x: 2.0, y: -1.0 };
    for _ in 0..1000 {
        cam.follow_pointer(p);
    }
    assert!((cam.eye.x - 2.0).abs() < 1e-3);
    assert!((cam.eye.y - 1.0).abs() < 1e-3);
}

#[test]
fn view_matrix_looks_at_origin() {
    let cam = Camera::new(16.0 / 9.0);
    let origin_in_view = cam.view_matrix().transform_point3(Vec3::ZERO);
    // Origin sits straight ahead on the -Z axis of view space
    assert!(origin_in_view.x.abs() < 1e-4);
    assert!(origin_in_view.y.abs() < 1e-4);
    assert!(origin_in_view.z < 0.0);
}

#[test]
fn pointer_offset_is_centre_relative_hundredths() {
    let p = PointerOffset::from_client(500.0, 100.0, 800.0, 600.0);
    assert!(approx(p.x, 1.0));
    assert!(approx(p.y, -2.0));
    let centre = PointerOffset::from_client(400.0, 300.0, 800.0, 600.0);
    assert_eq!(centre, PointerOffset::default());
}

#[test]
fn viewport_never_zero() {
    let vp = Viewport::new(0, 0);
    assert_eq!((vp.width, vp.height), (1, 1));
    assert_eq!(vp.aspect(), 1.0);
}
