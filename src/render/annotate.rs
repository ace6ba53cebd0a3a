use crate::foundation::core::{Canvas, Point, Vec2};
use crate::foundation::error::RotaskResult;
use crate::render::convert::{affine_to_cpu, bezpath_to_cpu, polygon_path, stroke_expand};
use crate::render::text::{TextBrushRgba8, TextLayoutEngine};
use crate::scene::model::RotationDirection;
use kurbo::Shape as _;
use std::f64::consts::FRAC_PI_2;

/// Canvas angle of the arc start: -90 degrees is 12 o'clock with y down.
pub const ARC_START_DEG: f64 = -90.0;

/// Arrowhead length along the tangent, in pixels.
pub const ARROW_LEN: f64 = 12.0;
/// Arrowhead half-width perpendicular to the tangent, in pixels.
pub const ARROW_HALF_WIDTH: f64 = 8.0;

/// Radial offset of the degree label beyond the arc radius.
pub const LABEL_RADIAL_OFFSET: f64 = 14.0;
/// Padding of the opaque background rectangle behind the degree label.
pub const LABEL_PAD: f64 = 4.0;

const LABEL_FONT_PX: f32 = 14.0;
const TITLE_FONT_PX: f32 = 24.0;

/// Resolved geometry of one rotation annotation (arc + arrowhead + label).
///
/// The drawing primitive sweeps from the normalized `arc_start_deg` to
/// `arc_end_deg` (always `start < end`), but the *visual* rotation endpoint is
/// the un-normalized `end_deg`. The arrowhead and the label midpoint are
/// anchored on the un-normalized angles; collapsing the two would point the
/// arrowhead at the wrong end for one of the two directions.
#[derive(Debug, Clone)]
pub struct ArcAnnotation {
    /// Arc circle center (the object's cell center).
    pub center: Point,
    /// Arc circle radius in pixels.
    pub radius: f64,
    /// Normalized sweep start in canvas degrees.
    pub arc_start_deg: f64,
    /// Normalized sweep end in canvas degrees.
    pub arc_end_deg: f64,
    /// True rotation endpoint in canvas degrees (not normalized).
    pub end_deg: f64,
    /// Arrowhead triangle: tip first, then the two base corners.
    pub arrow: [Point; 3],
    /// Center of the degree label.
    pub label_anchor: Point,
    /// Stroke width of the arc.
    pub stroke_width: f64,
}

impl ArcAnnotation {
    /// Compute the annotation geometry for one object.
    pub fn compute(
        cell_center: Point,
        size: u32,
        direction: RotationDirection,
        degrees: u32,
    ) -> Self {
        let radius = f64::from(size.max(32)) * 0.75 + 12.0;

        let start_deg = ARC_START_DEG;
        let end_deg = match direction {
            RotationDirection::Counterclockwise => start_deg - f64::from(degrees),
            RotationDirection::Clockwise => start_deg + f64::from(degrees),
        };
        let arc_start_deg = start_deg.min(end_deg);
        let arc_end_deg = start_deg.max(end_deg);

        let end_rad = end_deg.to_radians();
        let tip = cell_center + radius * Vec2::new(end_rad.cos(), end_rad.sin());

        // Tangent at the endpoint, signed by travel direction: perpendicular
        // to the radius, minus 90 degrees for counterclockwise travel and plus
        // 90 for clockwise.
        let tangent_rad = match direction {
            RotationDirection::Counterclockwise => end_rad - FRAC_PI_2,
            RotationDirection::Clockwise => end_rad + FRAC_PI_2,
        };
        let tangent = Vec2::new(tangent_rad.cos(), tangent_rad.sin());
        let perp = Vec2::new(-tangent.y, tangent.x);
        let base = tip - ARROW_LEN * tangent;
        let arrow = [
            tip,
            base + ARROW_HALF_WIDTH * perp,
            base - ARROW_HALF_WIDTH * perp,
        ];

        let mid_rad = ((start_deg + end_deg) / 2.0).to_radians();
        let label_r = radius + LABEL_RADIAL_OFFSET;
        let label_anchor = cell_center + label_r * Vec2::new(mid_rad.cos(), mid_rad.sin());

        let stroke_width = (f64::from(size) * 0.08).max(3.0);

        Self {
            center: cell_center,
            radius,
            arc_start_deg,
            arc_end_deg,
            end_deg,
            arrow,
            label_anchor,
            stroke_width,
        }
    }

    /// Arrowhead tip, on the arc circle at the true endpoint.
    pub fn arrow_tip(&self) -> Point {
        self.arrow[0]
    }
}

/// Paint one object's rotation annotation onto the frame context.
pub(crate) fn draw_annotation(
    ctx: &mut vello_cpu::RenderContext,
    text: &mut TextLayoutEngine,
    ann: &ArcAnnotation,
    degrees: u32,
) -> RotaskResult<()> {
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(0, 0, 0, 255));

    // Arc, stroke-expanded to a fill region.
    let arc = kurbo::Arc::new(
        ann.center,
        Vec2::new(ann.radius, ann.radius),
        ann.arc_start_deg.to_radians(),
        (ann.arc_end_deg - ann.arc_start_deg).to_radians(),
        0.0,
    );
    let arc_fill = stroke_expand(arc.to_path(0.1), ann.stroke_width);
    ctx.fill_path(&bezpath_to_cpu(&arc_fill));

    // Arrowhead at the true endpoint.
    ctx.fill_path(&bezpath_to_cpu(&polygon_path(&ann.arrow)));

    // Degree label over an opaque white rectangle.
    draw_label_centered(
        ctx,
        text,
        &format!("{degrees}\u{b0}"),
        LABEL_FONT_PX,
        ann.label_anchor,
        LABEL_PAD,
    )
}

/// Paint the global title banner: direction and degrees over an opaque band
/// centered at the top of the canvas.
pub(crate) fn draw_title_banner(
    ctx: &mut vello_cpu::RenderContext,
    text: &mut TextLayoutEngine,
    canvas: Canvas,
    direction: RotationDirection,
    degrees: u32,
) -> RotaskResult<()> {
    let title = format!("{} Rotation {degrees}\u{b0}", direction.title());
    let laid = text.layout_plain(&title, TITLE_FONT_PX, BLACK_BRUSH)?;

    let w = f64::from(canvas.width);
    let tw = f64::from(laid.width);
    let th = f64::from(laid.height);
    let x0 = w / 2.0 - tw / 2.0;

    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        x0 - 8.0,
        6.0,
        x0 + tw + 8.0,
        6.0 + th + 6.0,
    ));

    draw_glyphs(ctx, &laid, Point::new(x0, 9.0));
    Ok(())
}

const BLACK_BRUSH: TextBrushRgba8 = TextBrushRgba8 {
    r: 0,
    g: 0,
    b: 0,
    a: 255,
};

fn draw_label_centered(
    ctx: &mut vello_cpu::RenderContext,
    text: &mut TextLayoutEngine,
    label: &str,
    size_px: f32,
    anchor: Point,
    pad: f64,
) -> RotaskResult<()> {
    let laid = text.layout_plain(label, size_px, BLACK_BRUSH)?;
    let tw = f64::from(laid.width);
    let th = f64::from(laid.height);

    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        anchor.x - tw / 2.0 - pad,
        anchor.y - th / 2.0 - pad,
        anchor.x + tw / 2.0 + pad,
        anchor.y + th / 2.0 + pad,
    ));

    draw_glyphs(ctx, &laid, Point::new(anchor.x - tw / 2.0, anchor.y - th / 2.0));
    Ok(())
}

/// Paint a laid-out text run with its top-left corner at `origin`.
fn draw_glyphs(
    ctx: &mut vello_cpu::RenderContext,
    laid: &crate::render::text::LaidOutText,
    origin: Point,
) {
    ctx.set_transform(affine_to_cpu(kurbo::Affine::translate((
        origin.x, origin.y,
    ))));
    for line in laid.layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));
            let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(&laid.font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    fn center() -> Point {
        Point::new(200.0, 200.0)
    }

    #[test]
    fn clockwise_quarter_turn_tip_at_canvas_angle_zero() {
        // Clockwise 90: true endpoint is -90 + 90 = 0 degrees, i.e. 3 o'clock.
        let ann = ArcAnnotation::compute(center(), 40, RotationDirection::Clockwise, 90);
        assert!((ann.end_deg - 0.0).abs() < TOL);
        let tip = ann.arrow_tip();
        assert!((tip.x - (200.0 + ann.radius)).abs() < TOL, "{tip:?}");
        assert!((tip.y - 200.0).abs() < TOL, "{tip:?}");
    }

    #[test]
    fn counterclockwise_quarter_turn_tip_at_minus_180() {
        // Counterclockwise 90: true endpoint is -90 - 90 = -180, i.e. 9 o'clock.
        let ann = ArcAnnotation::compute(center(), 40, RotationDirection::Counterclockwise, 90);
        assert!((ann.end_deg - (-180.0)).abs() < TOL);
        let tip = ann.arrow_tip();
        assert!((tip.x - (200.0 - ann.radius)).abs() < TOL, "{tip:?}");
        assert!((tip.y - 200.0).abs() < TOL, "{tip:?}");
    }

    #[test]
    fn arc_bounds_are_normalized_but_endpoint_is_not() {
        let ccw = ArcAnnotation::compute(center(), 40, RotationDirection::Counterclockwise, 45);
        assert!(ccw.arc_start_deg < ccw.arc_end_deg);
        assert!((ccw.arc_start_deg - (-135.0)).abs() < TOL);
        assert!((ccw.arc_end_deg - (-90.0)).abs() < TOL);
        // The true endpoint coincides with the *lower* normalized bound here.
        assert!((ccw.end_deg - (-135.0)).abs() < TOL);

        let cw = ArcAnnotation::compute(center(), 40, RotationDirection::Clockwise, 45);
        assert!((cw.arc_start_deg - (-90.0)).abs() < TOL);
        assert!((cw.arc_end_deg - (-45.0)).abs() < TOL);
        assert!((cw.end_deg - (-45.0)).abs() < TOL);
    }

    #[test]
    fn radius_has_a_floor_for_small_objects() {
        let small = ArcAnnotation::compute(center(), 8, RotationDirection::Clockwise, 30);
        let floor = ArcAnnotation::compute(center(), 32, RotationDirection::Clockwise, 30);
        assert!((small.radius - floor.radius).abs() < TOL);
        assert!((floor.radius - (32.0 * 0.75 + 12.0)).abs() < TOL);
    }

    #[test]
    fn label_sits_on_the_arc_midpoint_beyond_the_radius() {
        let ann = ArcAnnotation::compute(center(), 40, RotationDirection::Clockwise, 90);
        // Midpoint of [-90, 0] is -45 degrees.
        let expected_r = ann.radius + LABEL_RADIAL_OFFSET;
        let d = ann.label_anchor - ann.center;
        assert!((d.hypot() - expected_r).abs() < TOL);
        assert!((d.y.atan2(d.x).to_degrees() - (-45.0)).abs() < TOL);
    }

    #[test]
    fn arrowhead_is_symmetric_about_the_tangent() {
        let ann = ArcAnnotation::compute(center(), 40, RotationDirection::Counterclockwise, 60);
        let tip = ann.arrow[0];
        let d1 = tip.distance(ann.arrow[1]);
        let d2 = tip.distance(ann.arrow[2]);
        assert!((d1 - d2).abs() < TOL);
        let expected = (ARROW_LEN * ARROW_LEN + ARROW_HALF_WIDTH * ARROW_HALF_WIDTH).sqrt();
        assert!((d1 - expected).abs() < TOL);
    }
}
