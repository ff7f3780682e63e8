//! Collision detection and response for circles against rectangles and circles
//!
//! Bodies are circles. Walls are axis-aligned rectangles; the world is the
//! rectangle the arena spans.

use glam::Vec2;

use super::arena::Rect;
use crate::direction_between;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Surface normal at the contact (pointing toward the circle center)
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check a circle against a solid rectangle
pub fn circle_rect_collision(center: Vec2, radius: f32, rect: &Rect) -> CollisionResult {
    let closest = rect.closest_point(center);
    let offset = center - closest;
    let dist_sq = offset.length_squared();

    if dist_sq > 0.0 {
        if dist_sq >= radius * radius {
            return CollisionResult::miss();
        }
        let dist = dist_sq.sqrt();
        return CollisionResult {
            hit: true,
            normal: offset / dist,
            penetration: radius - dist,
        };
    }

    // Center inside the rectangle: exit through the nearest face
    let to_min = center - rect.min;
    let to_max = rect.max - center;
    let faces = [
        (to_min.x, Vec2::NEG_X),
        (to_max.x, Vec2::X),
        (to_min.y, Vec2::NEG_Y),
        (to_max.y, Vec2::Y),
    ];
    let (depth, normal) = faces
        .into_iter()
        .min_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
        .unwrap_or((0.0, Vec2::X));

    CollisionResult {
        hit: true,
        normal,
        penetration: depth + radius,
    }
}

/// Check two circles; the normal points from `b` toward `a`
pub fn circle_circle_collision(a: Vec2, ra: f32, b: Vec2, rb: f32) -> CollisionResult {
    let dist = a.distance(b);
    if dist >= ra + rb {
        return CollisionResult::miss();
    }
    CollisionResult {
        hit: true,
        normal: direction_between(b, a),
        penetration: ra + rb - dist,
    }
}

/// Reflect velocity off a surface, scaling the normal component by `bounce`.
/// Velocity already moving away from the surface is left alone.
pub fn bounce_velocity(velocity: Vec2, normal: Vec2, bounce: f32) -> Vec2 {
    let vn = velocity.dot(normal);
    if vn >= 0.0 {
        return velocity;
    }
    velocity - normal * vn * (1.0 + bounce)
}

/// Keep a circle inside `bounds` on the selected axes.
///
/// Returns the outward normals of the edges that were hit.
pub fn contain_circle(pos: &mut Vec2, radius: f32, bounds: &Rect, clamp_x: bool, clamp_y: bool) -> Vec<Vec2> {
    let mut hits = Vec::new();
    if clamp_x {
        if pos.x - radius < bounds.min.x {
            pos.x = bounds.min.x + radius;
            hits.push(Vec2::X);
        } else if pos.x + radius > bounds.max.x {
            pos.x = bounds.max.x - radius;
            hits.push(Vec2::NEG_X);
        }
    }
    if clamp_y {
        if pos.y - radius < bounds.min.y {
            pos.y = bounds.min.y + radius;
            hits.push(Vec2::Y);
        } else if pos.y + radius > bounds.max.y {
            pos.y = bounds.max.y - radius;
            hits.push(Vec2::NEG_Y);
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall() -> Rect {
        Rect::from_center(Vec2::new(0.0, 0.0), Vec2::new(20.0, 100.0))
    }

    #[test]
    fn test_circle_rect_side_contact() {
        // Circle just right of the wall's right face (x = 10)
        let result = circle_rect_collision(Vec2::new(18.0, 0.0), 12.0, &wall());
        assert!(result.hit);
        assert!((result.normal - Vec2::X).length() < 1e-6);
        assert!((result.penetration - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_circle_rect_miss() {
        let result = circle_rect_collision(Vec2::new(30.0, 0.0), 12.0, &wall());
        assert!(!result.hit);
    }

    #[test]
    fn test_circle_rect_center_inside() {
        // Tunnelled center, nearest face is the right one
        let result = circle_rect_collision(Vec2::new(8.0, 0.0), 5.0, &wall());
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::X);
        assert!((result.penetration - 7.0).abs() < 1e-4);
    }

    #[test]
    fn test_circle_circle() {
        let result = circle_circle_collision(Vec2::new(30.0, 0.0), 25.0, Vec2::ZERO, 12.0);
        assert!(result.hit);
        assert!((result.normal - Vec2::X).length() < 1e-6);
        assert!((result.penetration - 7.0).abs() < 1e-4);

        assert!(!circle_circle_collision(Vec2::new(40.0, 0.0), 25.0, Vec2::ZERO, 12.0).hit);
    }

    #[test]
    fn test_bounce_velocity() {
        // Ball moving left hits a surface facing right
        let v = bounce_velocity(Vec2::new(-100.0, 20.0), Vec2::X, 0.85);
        assert!((v.x - 85.0).abs() < 1e-3);
        assert!((v.y - 20.0).abs() < 1e-3);

        // Already separating
        let v = bounce_velocity(Vec2::new(100.0, 0.0), Vec2::X, 0.85);
        assert_eq!(v, Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_contain_circle_axes() {
        let bounds = Rect {
            min: Vec2::ZERO,
            max: Vec2::new(100.0, 100.0),
        };

        let mut pos = Vec2::new(-20.0, 50.0);
        let hits = contain_circle(&mut pos, 10.0, &bounds, false, true);
        assert!(hits.is_empty());
        assert_eq!(pos.x, -20.0);

        let hits = contain_circle(&mut pos, 10.0, &bounds, true, true);
        assert_eq!(hits, vec![Vec2::X]);
        assert_eq!(pos.x, 10.0);
    }
}
