use crate::foundation::core::{BezPath, Point};

/// Closed polygon path through `points` in order.
pub(crate) fn polygon_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let Some(first) = points.first() else {
        return path;
    };
    path.move_to(*first);
    for p in &points[1..] {
        path.line_to(*p);
    }
    path.close_path();
    path
}

/// Expand a path into the fill region of its stroke.
///
/// `vello_cpu` is driven fill-only here, so outlines and arcs become filled
/// stroke expansions.
pub(crate) fn stroke_expand(path: BezPath, width: f64) -> BezPath {
    let style = kurbo::Stroke::new(width)
        .with_caps(kurbo::Cap::Butt)
        .with_join(kurbo::Join::Round);
    kurbo::stroke(path, &style, &kurbo::StrokeOpts::default(), 0.25)
}

/// Convert a `kurbo` path into the `kurbo` version vendored by `vello_cpu`.
pub(crate) fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

/// Convert a `kurbo` affine into the `kurbo` version vendored by `vello_cpu`.
pub(crate) fn affine_to_cpu(a: kurbo::Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polygon_path_is_closed() {
        let path = polygon_path(&[
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ]);
        let svg = path.to_svg();
        assert!(svg.ends_with('Z'), "{svg}");
    }

    #[test]
    fn polygon_path_of_nothing_is_empty() {
        assert!(polygon_path(&[]).elements().is_empty());
    }

    #[test]
    fn stroke_expand_produces_area() {
        use kurbo::Shape as _;
        let line = {
            let mut p = BezPath::new();
            p.move_to(Point::new(0.0, 0.0));
            p.line_to(Point::new(10.0, 0.0));
            p
        };
        let expanded = stroke_expand(line, 4.0);
        // A 10px line stroked 4px wide covers roughly 40 square px.
        assert!(expanded.area().abs() > 30.0);
    }
}
