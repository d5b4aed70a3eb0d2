//! Glyph rotation and centre compensation
//!
//! The renderer draws a glyph at its top-left placement point and rotates it
//! about that point (SVG `translate(x, y) rotate(θ)`). Placing the glyph's
//! centre on a target therefore means backing the top-left point off by the
//! rotated half-size vector:
//!
//! ```text
//! top_left = target - R(θ) · (w/2, h/2)
//! ```
//!
//! ## Loose bounds
//!
//! Bounds of a rotated glyph are the axis-aligned box around its four
//! rotated corners. They over-estimate curved glyphs, which is fine for hit
//! testing and overlap checks.
//!
//! Angles use the SVG convention: degrees, clockwise positive, y down.

use crate::config::GlyphSize;

use super::types::{BoundingBox, Point};

/// Rotation about a fixed origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphTransform {
    /// Clockwise degrees
    pub angle_degrees: f64,
    pub origin: Point,
}

impl GlyphTransform {
    pub fn new(angle_degrees: f64, origin: Point) -> Self {
        Self {
            angle_degrees,
            origin,
        }
    }

    /// True for any whole multiple of 360°
    pub fn is_identity(&self) -> bool {
        self.angle_degrees.rem_euclid(360.0).abs() < f64::EPSILON
    }

    /// Rotate a vector, ignoring the origin.
    ///
    /// Quarter turns are exact so axis-aligned results carry no float noise.
    pub fn rotate_vector(&self, x: f64, y: f64) -> (f64, f64) {
        let (sin_a, cos_a) = quarter_exact_sin_cos(self.angle_degrees);
        // [cos  -sin] [x]
        // [sin   cos] [y]
        (x * cos_a - y * sin_a, x * sin_a + y * cos_a)
    }

    pub fn transform_point(&self, point: Point) -> Point {
        if self.is_identity() {
            return point;
        }
        let (dx, dy) = self.rotate_vector(point.x - self.origin.x, point.y - self.origin.y);
        Point::new(self.origin.x + dx, self.origin.y + dy)
    }

    /// Loose bounds of a box after rotation
    pub fn transform_bounds(&self, bounds: &BoundingBox) -> BoundingBox {
        if self.is_identity() {
            return *bounds;
        }
        let corners = [
            Point::new(bounds.x, bounds.y),
            Point::new(bounds.right(), bounds.y),
            Point::new(bounds.x, bounds.bottom()),
            Point::new(bounds.right(), bounds.bottom()),
        ]
        .map(|p| self.transform_point(p));

        let (min_x, max_x, min_y, max_y) = corners.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
            |(min_x, max_x, min_y, max_y), p| {
                (min_x.min(p.x), max_x.max(p.x), min_y.min(p.y), max_y.max(p.y))
            },
        );
        BoundingBox::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }
}

fn quarter_exact_sin_cos(angle_degrees: f64) -> (f64, f64) {
    let normalized = angle_degrees.rem_euclid(360.0);
    if normalized == 0.0 {
        (0.0, 1.0)
    } else if normalized == 90.0 {
        (1.0, 0.0)
    } else if normalized == 180.0 {
        (0.0, -1.0)
    } else if normalized == 270.0 {
        (-1.0, 0.0)
    } else {
        normalized.to_radians().sin_cos()
    }
}

/// Top-left placement point that puts a rotated glyph's centre on `target`,
/// plus the glyph's loose bounds there.
pub fn center_glyph(target: Point, size: GlyphSize, angle_degrees: f64) -> (Point, BoundingBox) {
    let rotation = GlyphTransform::new(angle_degrees, Point::new(0.0, 0.0));
    let (hx, hy) = rotation.rotate_vector(size.width / 2.0, size.height / 2.0);
    let top_left = Point::new(target.x - hx, target.y - hy);

    let glyph = BoundingBox::new(top_left.x, top_left.y, size.width, size.height);
    let bounds = GlyphTransform::new(angle_degrees, top_left).transform_bounds(&glyph);
    (top_left, bounds)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < EPSILON, "{a} != {b}");
    }

    #[test]
    fn test_identity_leaves_points_alone() {
        let t = GlyphTransform::new(360.0, Point::new(5.0, 5.0));
        assert!(t.is_identity());
        assert_eq!(t.transform_point(Point::new(1.0, 2.0)), Point::new(1.0, 2.0));
    }

    #[test]
    fn test_quarter_turn_is_clockwise_in_y_down() {
        let t = GlyphTransform::new(90.0, Point::new(0.0, 0.0));
        // Right becomes down
        assert_eq!(t.transform_point(Point::new(10.0, 0.0)), Point::new(0.0, 10.0));
        assert_eq!(t.rotate_vector(0.0, 10.0), (-10.0, 0.0));
    }

    #[test]
    fn test_bounds_of_rotated_box() {
        let t = GlyphTransform::new(90.0, Point::new(0.0, 0.0));
        let b = t.transform_bounds(&BoundingBox::new(0.0, 0.0, 100.0, 50.0));
        assert_eq!(b, BoundingBox::new(-50.0, 0.0, 50.0, 100.0));
    }

    #[test]
    fn test_diagonal_bounds_grow() {
        let t = GlyphTransform::new(45.0, Point::new(0.0, 0.0));
        let b = t.transform_bounds(&BoundingBox::new(0.0, 0.0, 10.0, 10.0));
        assert_close(b.width, 10.0 * 2f64.sqrt());
        assert_close(b.height, 10.0 * 2f64.sqrt());
    }

    #[test]
    fn test_center_glyph_without_rotation() {
        let size = GlyphSize::new(40.0, 100.0);
        let (top_left, bounds) = center_glyph(Point::new(200.0, 300.0), size, 0.0);
        assert_eq!(top_left, Point::new(180.0, 250.0));
        assert_eq!(bounds.center(), Point::new(200.0, 300.0));
    }

    #[test]
    fn test_center_glyph_keeps_centre_for_every_angle() {
        let size = GlyphSize::new(37.5, 112.0);
        let target = Point::new(331.9, 331.9);
        for step in 0..8 {
            let angle = step as f64 * 45.0;
            let (top_left, bounds) = center_glyph(target, size, angle);
            // The rotated centre of the glyph lands on the target
            let centre = GlyphTransform::new(angle, top_left).transform_point(Point::new(
                top_left.x + size.width / 2.0,
                top_left.y + size.height / 2.0,
            ));
            assert_close(centre.x, target.x);
            assert_close(centre.y, target.y);
            assert_close(bounds.center().x, target.x);
            assert_close(bounds.center().y, target.y);
        }
    }
}
