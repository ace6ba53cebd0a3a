use crate::foundation::core::Point;

/// Rotate one point around `origin` by `angle_rad`.
///
/// Positive angles sweep mathematically counterclockwise, which on the
/// y-down canvas is a *visually clockwise* sweep. Direction-to-sign mapping
/// lives in [`crate::scene::model::RotationDirection::signed_angle_deg`].
pub fn rotate_point(p: Point, origin: Point, angle_rad: f64) -> Point {
    let (sin_a, cos_a) = angle_rad.sin_cos();
    let d = p - origin;
    Point::new(
        origin.x + d.x * cos_a - d.y * sin_a,
        origin.y + d.x * sin_a + d.y * cos_a,
    )
}

/// Rigidly rotate a point set around `origin` by `angle_rad`.
///
/// Pure: the only allocation is the output vector.
pub fn rotate_points(points: &[Point], origin: Point, angle_rad: f64) -> Vec<Point> {
    let (sin_a, cos_a) = angle_rad.sin_cos();
    points
        .iter()
        .map(|p| {
            let d = *p - origin;
            Point::new(
                origin.x + d.x * cos_a - d.y * sin_a,
                origin.y + d.x * sin_a + d.y * cos_a,
            )
        })
        .collect()
}
