use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::{RotaskError, RotaskResult};
use crate::scene::model::Shape;

/// Number of perimeter samples for curved shapes (one every 10 degrees).
const PERIMETER_SAMPLES: u32 = 36;

/// Ellipse semi-minor axis as a fraction of `size`.
const ELLIPSE_MINOR_FRAC: f64 = 0.3;

/// Build the unrotated point set of `shape` in a local frame centered on
/// `center`.
///
/// For every shape except the circle (whose symmetry makes it a no-op), the
/// raw point set is translated so its arithmetic centroid lands exactly on
/// `center`. The rotation pivot used later is therefore the true visual
/// center even for asymmetric shapes like the random polygon.
pub fn build_point_set(shape: &Shape, size: u32, center: Point) -> RotaskResult<Vec<Point>> {
    let half = f64::from(size) / 2.0;
    let pts = match shape {
        Shape::Circle => perimeter_points(center, half, half),
        Shape::Ellipse => perimeter_points(center, half, f64::from(size) * ELLIPSE_MINOR_FRAC),
        Shape::Square => vec![
            Point::new(center.x - half, center.y - half),
            Point::new(center.x + half, center.y - half),
            Point::new(center.x + half, center.y + half),
            Point::new(center.x - half, center.y + half),
        ],
        // Isoceles, apex up (y grows downward on the canvas).
        Shape::Triangle => vec![
            Point::new(center.x, center.y - half),
            Point::new(center.x - half, center.y + half),
            Point::new(center.x + half, center.y + half),
        ],
        Shape::Polygon { vertices } => vertices.clone(),
    };

    if matches!(shape, Shape::Circle) {
        return Ok(pts);
    }
    recenter_to(pts, center)
}

fn perimeter_points(center: Point, semi_major: f64, semi_minor: f64) -> Vec<Point> {
    (0..PERIMETER_SAMPLES)
        .map(|i| {
            let rad = (f64::from(i) * 10.0).to_radians();
            Point::new(
                center.x + semi_major * rad.cos(),
                center.y + semi_minor * rad.sin(),
            )
        })
        .collect()
}

/// Arithmetic mean of a point set. Empty input is an invariant violation.
pub fn centroid(points: &[Point]) -> RotaskResult<Point> {
    if points.is_empty() {
        return Err(RotaskError::validation(
            "centroid of an empty point set is undefined",
        ));
    }
    let n = points.len() as f64;
    let sum = points
        .iter()
        .fold(Vec2::ZERO, |acc, p| acc + p.to_vec2());
    Ok((sum / n).to_point())
}

fn recenter_to(points: Vec<Point>, center: Point) -> RotaskResult<Vec<Point>> {
    let c = centroid(&points)?;
    let shift = center - c;
    Ok(points.into_iter().map(|p| p + shift).collect())
}
