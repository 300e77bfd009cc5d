use graphcalc::viewport::{to_data, to_screen};
use graphcalc::{PixelBounds, Viewport};

fn assert_close(actual: f64, expected: f64) {
  assert!(
    (actual - expected).abs() < 1e-9,
    "expected {expected}, got {actual}"
  );
}

#[test]
fn test_to_screen_corners_and_center() {
  let vp = Viewport::default(); // -10..10 x -5..5
  let pb = PixelBounds::new(0.0, 0.0, 800.0, 400.0);

  let (px, py) = to_screen((-10.0, -5.0), &vp, &pb);
  assert_close(px, 0.0);
  assert_close(py, 0.0);

  let (px, py) = to_screen((10.0, 5.0), &vp, &pb);
  assert_close(px, 800.0);
  assert_close(py, 400.0);

  let (px, py) = to_screen((0.0, 0.0), &vp, &pb);
  assert_close(px, 400.0);
  assert_close(py, 200.0);
}

#[test]
fn test_offset_surface_origin() {
  let vp = Viewport::default();
  let pb = PixelBounds::new(50.0, 25.0, 800.0, 400.0);
  let (px, py) = to_screen((-10.0, -5.0), &vp, &pb);
  assert_close(px, 50.0);
  assert_close(py, 25.0);
}

#[test]
fn test_round_trip_is_identity() {
  let vp = Viewport {
    x_min: -3.2,
    x_max: 17.8,
    y_min: 0.5,
    y_max: 9.25,
    grid_size: 1.0,
  };
  let pb = PixelBounds::new(12.0, 34.0, 641.0, 479.0);
  for &point in &[
    (0.0, 1.0),
    (-3.2, 0.5),
    (17.8, 9.25),
    (1.234567, 8.7654321),
    (-1.0, 3.0),
  ] {
    let (dx, dy) = to_data(to_screen(point, &vp, &pb), &vp, &pb);
    assert_close(dx, point.0);
    assert_close(dy, point.1);
  }
}

#[test]
fn test_round_trip_from_pixels() {
  let vp = Viewport::default();
  let pb = PixelBounds::new(0.0, 0.0, 800.0, 400.0);
  for &pixel in &[(0.0, 0.0), (400.0, 200.0), (123.0, 77.0), (800.0, 400.0)] {
    let (px, py) = to_screen(to_data(pixel, &vp, &pb), &vp, &pb);
    assert_close(px, pixel.0);
    assert_close(py, pixel.1);
  }
}
