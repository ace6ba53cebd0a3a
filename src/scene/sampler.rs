use crate::foundation::core::{Canvas, Point};
use crate::scene::model::{
    DEGREES_MAX, DEGREES_MIN, MAX_OBJECTS, PALETTE, RotationDirection, Scene, SceneObject, Shape,
};
use rand::Rng;

/// Fraction bounds of `min(w, h)` used for object sizes.
const SIZE_FRAC_MIN: f64 = 0.06;
const SIZE_FRAC_MAX: f64 = 0.22;

/// Polygon vertex count bounds.
const POLY_VERTS_MIN: u32 = 4;
const POLY_VERTS_MAX: u32 = 8;

/// Jitter applied to each polygon vertex angle, in radians.
const POLY_ANGLE_JITTER: f64 = 0.3;

/// Turns a random source into one fully specified, immutable [`Scene`].
///
/// All randomness flows through the caller-supplied `Rng`; the renderer is a
/// pure function of the returned value, so identical seeds yield identical
/// scenes and identical pixels.
#[derive(Debug, Clone, Copy)]
pub struct SceneSampler {
    canvas: Canvas,
}

impl SceneSampler {
    pub fn new(canvas: Canvas) -> Self {
        Self { canvas }
    }

    /// Sample a scene with 1-5 objects, a direction, and a magnitude.
    pub fn sample(&self, rng: &mut impl Rng) -> Scene {
        let num_objects = rng.random_range(1..=MAX_OBJECTS);
        let objects = (0..num_objects).map(|_| self.sample_object(rng)).collect();

        let direction = if rng.random_bool(0.5) {
            RotationDirection::Clockwise
        } else {
            RotationDirection::Counterclockwise
        };
        let degrees = rng.random_range(DEGREES_MIN..=DEGREES_MAX);

        Scene {
            objects,
            direction,
            degrees,
        }
    }

    fn sample_object(&self, rng: &mut impl Rng) -> SceneObject {
        let w = f64::from(self.canvas.width);
        let h = f64::from(self.canvas.height);
        let min_dim = f64::from(self.canvas.min_dim());

        // Tiny canvases would truncate to 0, which fails scene validation.
        let size_min = ((min_dim * SIZE_FRAC_MIN) as u32).max(1);
        let size_max = (min_dim * SIZE_FRAC_MAX) as u32;
        let size = rng.random_range(size_min..=size_max.max(size_min + 1));

        // Placement anchor biased toward the canvas middle.
        let cx = w * 0.5 + rng.random_range(-(w * 0.25)..=(w * 0.25));
        let cy = h * 0.5 + rng.random_range(-(h * 0.25)..=(h * 0.25));
        let center = Point::new(cx.round(), cy.round());

        let kind = rng.random_range(0..5u8);
        let shape = match kind {
            0 => Shape::Circle,
            1 => Shape::Square,
            2 => Shape::Triangle,
            3 => Shape::Ellipse,
            // Irregular polygon: vertices fixed here, once per scene, so every
            // frame of the task rotates the exact same point set.
            _ => Shape::Polygon {
                vertices: sample_polygon_vertices(rng, center, size),
            },
        };

        let color = PALETTE[rng.random_range(0..PALETTE.len())];

        SceneObject {
            shape,
            color,
            size,
            center,
        }
    }
}

fn sample_polygon_vertices(rng: &mut impl Rng, center: Point, size: u32) -> Vec<Point> {
    let n = rng.random_range(POLY_VERTS_MIN..=POLY_VERTS_MAX);
    let size = f64::from(size);
    (0..n)
        .map(|k| {
            let ang = std::f64::consts::TAU * f64::from(k) / f64::from(n)
                + rng.random_range(-POLY_ANGLE_JITTER..=POLY_ANGLE_JITTER);
            let radius = rng.random_range((size * 0.35)..=(size * 0.95));
            Point::new(center.x + ang.cos() * radius, center.y + ang.sin() * radius)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn canvas() -> Canvas {
        Canvas::new(768, 768).unwrap()
    }

    #[test]
    fn same_seed_same_scene() {
        let sampler = SceneSampler::new(canvas());
        let a = sampler.sample(&mut StdRng::seed_from_u64(7));
        let b = sampler.sample(&mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn sampled_scenes_are_valid() {
        let sampler = SceneSampler::new(canvas());
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..64 {
            let scene = sampler.sample(&mut rng);
            scene.validate().unwrap();
        }
    }

    #[test]
    fn sizes_stay_within_sampler_bounds() {
        let sampler = SceneSampler::new(canvas());
        let mut rng = StdRng::seed_from_u64(3);
        let lo = (768.0 * SIZE_FRAC_MIN) as u32;
        let hi = (768.0 * SIZE_FRAC_MAX) as u32 + 1;
        for _ in 0..64 {
            for obj in sampler.sample(&mut rng).objects {
                assert!(obj.size >= lo && obj.size <= hi, "size {}", obj.size);
            }
        }
    }

    #[test]
    fn tiny_canvas_still_samples_valid_scenes() {
        // min_dim * SIZE_FRAC_MIN truncates to 0 below 17 pixels; sizes must
        // still come out at 1 or more.
        let sampler = SceneSampler::new(Canvas::new(8, 8).unwrap());
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..32 {
            let scene = sampler.sample(&mut rng);
            scene.validate().unwrap();
            for obj in scene.objects {
                assert!(obj.size >= 1);
            }
        }
    }

    #[test]
    fn polygon_vertex_counts_in_range() {
        let sampler = SceneSampler::new(canvas());
        let mut rng = StdRng::seed_from_u64(11);
        let mut saw_polygon = false;
        for _ in 0..128 {
            for obj in sampler.sample(&mut rng).objects {
                if let Shape::Polygon { vertices } = obj.shape {
                    saw_polygon = true;
                    assert!(vertices.len() >= POLY_VERTS_MIN as usize);
                    assert!(vertices.len() <= POLY_VERTS_MAX as usize);
                }
            }
        }
        assert!(saw_polygon);
    }
}
