use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::{RotaskError, RotaskResult};
use crate::geometry::points::build_point_set;
use crate::geometry::rotate::rotate_points;
use crate::render::annotate::{ArcAnnotation, draw_annotation, draw_title_banner};
use crate::render::convert::{bezpath_to_cpu, polygon_path, stroke_expand};
use crate::render::frame::FrameRGBA;
use crate::render::layout::{cell_center, grid_dims};
use crate::render::text::TextLayoutEngine;
use crate::scene::model::Scene;

/// Composes finished frames from a scene and a global rotation angle.
///
/// Holds only the text layout engine (font resolution is done once); the
/// render itself is a pure function of `(scene, angle_rad)` — two calls with
/// the same inputs produce byte-identical frames.
pub struct FrameCompositor {
    canvas: Canvas,
    text: TextLayoutEngine,
}

impl FrameCompositor {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            text: TextLayoutEngine::new(),
        }
    }

    /// The canvas this compositor renders onto.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Render one finished frame at the given global rotation angle.
    ///
    /// Every object receives the *same* angle; per-frame video interpolation
    /// advances the angle, never per-object variation. Each object rotates
    /// about its own cell center, which the point-set builder makes coincide
    /// with the shape's centroid.
    pub fn render_frame(&mut self, scene: &Scene, angle_rad: f64) -> RotaskResult<FrameRGBA> {
        scene.validate()?;

        let width: u16 = self
            .canvas
            .width
            .try_into()
            .map_err(|_| RotaskError::render("canvas width exceeds u16"))?;
        let height: u16 = self
            .canvas
            .height
            .try_into()
            .map_err(|_| RotaskError::render("canvas height exceeds u16"))?;

        let (cols, rows) = grid_dims(scene.objects.len())?;

        let mut ctx = vello_cpu::RenderContext::new(width, height);

        // Opaque white base.
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.canvas.width),
            f64::from(self.canvas.height),
        ));

        for (idx, obj) in scene.objects.iter().enumerate() {
            let pivot = cell_center(idx, cols, rows, self.canvas);
            self.draw_object_silhouette(&mut ctx, obj, pivot, angle_rad)?;
        }

        // Annotations go over the silhouettes, title last.
        for (idx, obj) in scene.objects.iter().enumerate() {
            let pivot = cell_center(idx, cols, rows, self.canvas);
            let ann = ArcAnnotation::compute(pivot, obj.size, scene.direction, scene.degrees);
            draw_annotation(&mut ctx, &mut self.text, &ann, scene.degrees)?;
        }
        draw_title_banner(
            &mut ctx,
            &mut self.text,
            self.canvas,
            scene.direction,
            scene.degrees,
        )?;

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn draw_object_silhouette(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        obj: &crate::scene::model::SceneObject,
        pivot: Point,
        angle_rad: f64,
    ) -> RotaskResult<()> {
        // Local frame centered on the cell: the builder recenters the raw
        // point set so its centroid is exactly the pivot.
        let pts = build_point_set(&obj.shape, obj.size, pivot)?;
        let rotated = rotate_points(&pts, pivot, angle_rad);

        let fill = polygon_path(&rotated);
        let [r, g, b, a] = obj.color.rgba8();

        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        ctx.fill_path(&bezpath_to_cpu(&fill));

        let stroke_w = (f64::from(obj.size) * 0.06).max(2.0);
        let outline = stroke_expand(polygon_path(&rotated), stroke_w);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(0, 0, 0, 255));
        ctx.fill_path(&bezpath_to_cpu(&outline));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::model::{ObjectColor, RotationDirection, SceneObject, Shape};

    fn one_square_scene() -> Scene {
        Scene {
            objects: vec![SceneObject {
                shape: Shape::Square,
                color: ObjectColor::Red,
                size: 40,
                center: Point::new(128.0, 128.0),
            }],
            direction: RotationDirection::Clockwise,
            degrees: 45,
        }
    }

    #[test]
    fn render_rejects_invalid_scene() {
        let mut compositor = FrameCompositor::new(Canvas::new(256, 256).unwrap());
        let mut scene = one_square_scene();
        scene.degrees = 999;
        assert!(compositor.render_frame(&scene, 0.0).is_err());
    }

    #[test]
    fn frame_has_canvas_dimensions() {
        let mut compositor = FrameCompositor::new(Canvas::new(256, 192).unwrap());
        let frame = compositor.render_frame(&one_square_scene(), 0.0).unwrap();
        assert_eq!(frame.width, 256);
        assert_eq!(frame.height, 192);
        assert_eq!(frame.data.len(), 256 * 192 * 4);
        assert!(frame.premultiplied);
    }

    #[test]
    fn title_banner_glyphs_are_always_drawn() {
        // Banner glyphs are black over the white band at the top of the
        // canvas; the embedded fallback font guarantees them on hosts with no
        // font files at all.
        let mut compositor = FrameCompositor::new(Canvas::new(512, 512).unwrap());
        let frame = compositor.render_frame(&one_square_scene(), 0.0).unwrap();
        let dark = (6..40usize)
            .flat_map(|y| (0..512usize).map(move |x| (y * 512 + x) * 4))
            .filter(|&p| frame.data[p] < 128)
            .count();
        assert!(dark > 0, "no title glyph pixels in the banner band");
    }

    #[test]
    fn oversized_canvas_is_rejected() {
        let mut compositor = FrameCompositor::new(Canvas::new(100_000, 64).unwrap());
        assert!(compositor.render_frame(&one_square_scene(), 0.0).is_err());
    }
}
