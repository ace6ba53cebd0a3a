use crate::foundation::core::Point;
use crate::foundation::error::{RotaskError, RotaskResult};
use crate::render::frame::FrameRGBA;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Inclusive bounds of the sampled rotation magnitude in degrees.
pub const DEGREES_MIN: u32 = 10;
/// See [`DEGREES_MIN`].
pub const DEGREES_MAX: u32 = 180;

/// Maximum number of objects a scene may hold (grid layout supports 1-5).
pub const MAX_OBJECTS: usize = 5;

/// One of the five supported shape kinds.
///
/// Irregular polygons carry their vertex list inline: it is generated once per
/// scene and reused verbatim for every rendered angle of one task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Circle,
    Square,
    Triangle,
    Ellipse,
    Polygon {
        /// Fixed ordered vertex set in scene coordinates, never resampled.
        vertices: Vec<Point>,
    },
}

impl Shape {
    /// Short lowercase name used in prompts ("circle", "square", ...).
    pub fn name(&self) -> &'static str {
        match self {
            Shape::Circle => "circle",
            Shape::Square => "square",
            Shape::Triangle => "triangle",
            Shape::Ellipse => "ellipse",
            Shape::Polygon { .. } => "polygon",
        }
    }
}

/// Named fill color from the fixed 8-color palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectColor {
    Red,
    Blue,
    Green,
    Orange,
    Purple,
    Cyan,
    Yellow,
    Magenta,
}

/// Every palette entry, in sampling order.
pub const PALETTE: [ObjectColor; 8] = [
    ObjectColor::Red,
    ObjectColor::Blue,
    ObjectColor::Green,
    ObjectColor::Orange,
    ObjectColor::Purple,
    ObjectColor::Cyan,
    ObjectColor::Yellow,
    ObjectColor::Magenta,
];

impl ObjectColor {
    /// Straight-alpha RGBA8 fill value.
    pub fn rgba8(self) -> [u8; 4] {
        match self {
            ObjectColor::Red => [255, 0, 0, 255],
            ObjectColor::Blue => [0, 0, 255, 255],
            ObjectColor::Green => [0, 128, 0, 255],
            ObjectColor::Orange => [255, 165, 0, 255],
            ObjectColor::Purple => [128, 0, 128, 255],
            ObjectColor::Cyan => [0, 255, 255, 255],
            ObjectColor::Yellow => [255, 255, 0, 255],
            ObjectColor::Magenta => [255, 0, 255, 255],
        }
    }

    /// Lowercase color name used in prompts.
    pub fn name(self) -> &'static str {
        match self {
            ObjectColor::Red => "red",
            ObjectColor::Blue => "blue",
            ObjectColor::Green => "green",
            ObjectColor::Orange => "orange",
            ObjectColor::Purple => "purple",
            ObjectColor::Cyan => "cyan",
            ObjectColor::Yellow => "yellow",
            ObjectColor::Magenta => "magenta",
        }
    }
}

/// Visual rotation direction on the rendered canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationDirection {
    Clockwise,
    Counterclockwise,
}

impl RotationDirection {
    /// Signed rotation angle in degrees for the 2D rotation matrix.
    ///
    /// The canvas y-axis points down, so the mathematical counterclockwise
    /// matrix sweeps *visually clockwise*. A clockwise task therefore maps to
    /// a positive angle and a counterclockwise task to a negative one. This
    /// sign flip is load-bearing; keep it here and nowhere else.
    pub fn signed_angle_deg(self, degrees: u32) -> f64 {
        match self {
            RotationDirection::Clockwise => f64::from(degrees),
            RotationDirection::Counterclockwise => -f64::from(degrees),
        }
    }

    /// Signed rotation angle in radians. See [`Self::signed_angle_deg`].
    pub fn signed_angle_rad(self, degrees: u32) -> f64 {
        self.signed_angle_deg(degrees).to_radians()
    }

    /// Capitalized name used in the title banner.
    pub fn title(self) -> &'static str {
        match self {
            RotationDirection::Clockwise => "Clockwise",
            RotationDirection::Counterclockwise => "Counterclockwise",
        }
    }

    /// Lowercase name used in prompts.
    pub fn name(self) -> &'static str {
        match self {
            RotationDirection::Clockwise => "clockwise",
            RotationDirection::Counterclockwise => "counterclockwise",
        }
    }
}

/// One shape instance within a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub shape: Shape,
    pub color: ObjectColor,
    /// Nominal extent in pixels, scaled to the canvas by the sampler.
    pub size: u32,
    /// Sampling anchor. Polygon vertices are generated around it and the grid
    /// cell assignment replaces it at render time; it is never the rotation
    /// pivot.
    pub center: Point,
}

/// A fully specified render task: 1-5 objects plus one global rotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub objects: Vec<SceneObject>,
    pub direction: RotationDirection,
    /// Rotation magnitude in degrees, within `[DEGREES_MIN, DEGREES_MAX]`.
    pub degrees: u32,
}

impl Scene {
    /// Check the structural invariants the renderer assumes.
    pub fn validate(&self) -> RotaskResult<()> {
        if self.objects.is_empty() || self.objects.len() > MAX_OBJECTS {
            return Err(RotaskError::validation(format!(
                "scene must hold 1-{} objects, got {}",
                MAX_OBJECTS,
                self.objects.len()
            )));
        }
        if self.degrees < DEGREES_MIN || self.degrees > DEGREES_MAX {
            return Err(RotaskError::validation(format!(
                "degrees must be in [{DEGREES_MIN}, {DEGREES_MAX}], got {}",
                self.degrees
            )));
        }
        for (i, obj) in self.objects.iter().enumerate() {
            if obj.size == 0 {
                return Err(RotaskError::validation(format!(
                    "object {i} has zero size"
                )));
            }
            if let Shape::Polygon { vertices } = &obj.shape
                && vertices.is_empty()
            {
                return Err(RotaskError::validation(format!(
                    "object {i} is a polygon with no vertices"
                )));
            }
        }
        Ok(())
    }

    /// Signed target angle of the final frame, in radians.
    pub fn target_angle_rad(&self) -> f64 {
        self.direction.signed_angle_rad(self.degrees)
    }
}

/// Finished output of one task: prompt, boundary frames, optional video.
///
/// Constructed once and immutable thereafter; packaging/export lives outside
/// this crate.
#[derive(Debug, Clone)]
pub struct TaskPair {
    pub task_id: String,
    pub domain: String,
    pub prompt: String,
    pub first_frame: FrameRGBA,
    pub final_frame: FrameRGBA,
    pub video_path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: u32) -> SceneObject {
        SceneObject {
            shape: Shape::Square,
            color: ObjectColor::Red,
            size,
            center: Point::new(100.0, 100.0),
        }
    }

    #[test]
    fn clockwise_maps_to_positive_angle() {
        assert_eq!(RotationDirection::Clockwise.signed_angle_deg(45), 45.0);
        assert_eq!(
            RotationDirection::Counterclockwise.signed_angle_deg(45),
            -45.0
        );
        let rad = RotationDirection::Clockwise.signed_angle_rad(180);
        assert!((rad - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn validate_bounds() {
        let mut scene = Scene {
            objects: vec![square(40)],
            direction: RotationDirection::Clockwise,
            degrees: 45,
        };
        assert!(scene.validate().is_ok());

        scene.degrees = 5;
        assert!(scene.validate().is_err());
        scene.degrees = 181;
        assert!(scene.validate().is_err());
        scene.degrees = 45;

        scene.objects.clear();
        assert!(scene.validate().is_err());
        scene.objects = vec![square(40); 6];
        assert!(scene.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_polygon() {
        let scene = Scene {
            objects: vec![SceneObject {
                shape: Shape::Polygon { vertices: vec![] },
                color: ObjectColor::Blue,
                size: 40,
                center: Point::new(0.0, 0.0),
            }],
            direction: RotationDirection::Counterclockwise,
            degrees: 90,
        };
        assert!(scene.validate().is_err());
    }

    #[test]
    fn scene_json_round_trips() {
        let scene = Scene {
            objects: vec![SceneObject {
                shape: Shape::Polygon {
                    vertices: vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)],
                },
                color: ObjectColor::Cyan,
                size: 32,
                center: Point::new(64.0, 64.0),
            }],
            direction: RotationDirection::Clockwise,
            degrees: 30,
        };
        let json = serde_json::to_string(&scene).unwrap();
        let back: Scene = serde_json::from_str(&json).unwrap();
        assert_eq!(back, scene);
    }
}
