//! Circle-vs-segment collision
//!
//! The contact normal is radial: it points from the closest point on the
//! segment to the ball center, not along the segment's face normal. Hits near
//! a segment's ends therefore deflect at an angle, which gives paddle edges
//! and hexagon corners their rounded feel.

use glam::Vec2;

use super::arena::Segment;

/// Fallback normal when the ball center lies exactly on the segment
pub const DEGENERATE_NORMAL: Vec2 = Vec2::new(0.0, 1.0);

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Closest point on the segment to the ball center
    pub point: Vec2,
    /// Unit normal from `point` toward the ball center
    pub normal: Vec2,
    /// Distance from the ball center to `point`
    pub distance: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            distance: f32::MAX,
        }
    }
}

/// Closest point on `segment` to `p`, or `None` for a zero-length segment
pub fn closest_point_on_segment(p: Vec2, segment: &Segment) -> Option<Vec2> {
    let line_vec = segment.end - segment.start;
    let len_sq = line_vec.length_squared();
    if len_sq <= 0.0 {
        return None;
    }

    let t = ((p - segment.start).dot(line_vec) / len_sq).clamp(0.0, 1.0);
    Some(segment.start + line_vec * t)
}

/// Check a ball against a segment
///
/// Touching counts: a hit is registered when the distance equals the radius.
pub fn ball_segment_collision(
    ball_pos: Vec2,
    ball_radius: f32,
    segment: &Segment,
) -> CollisionResult {
    let Some(closest) = closest_point_on_segment(ball_pos, segment) else {
        return CollisionResult::miss();
    };

    let offset = ball_pos - closest;
    let distance = offset.length();
    if distance > ball_radius {
        return CollisionResult::miss();
    }

    let normal = if distance > 0.0 {
        offset / distance
    } else {
        DEGENERATE_NORMAL
    };

    CollisionResult {
        hit: true,
        point: closest,
        normal,
        distance,
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn horizontal() -> Segment {
        Segment::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0))
    }

    #[test]
    fn test_hit_on_face_uses_perpendicular_normal() {
        let result = ball_segment_collision(Vec2::new(50.0, 8.0), 10.0, &horizontal());
        assert!(result.hit);
        assert!(result.point.distance(Vec2::new(50.0, 0.0)) < 1e-4);
        assert!(result.normal.distance(Vec2::new(0.0, 1.0)) < 1e-4);
    }

    #[test]
    fn test_hit_past_end_uses_radial_normal() {
        // Ball diagonally beyond the end cap
        let result = ball_segment_collision(Vec2::new(106.0, 6.0), 10.0, &horizontal());
        assert!(result.hit);
        assert!(result.point.distance(Vec2::new(100.0, 0.0)) < 1e-4);
        let expected = Vec2::new(1.0, 1.0).normalize();
        assert!(result.normal.distance(expected) < 1e-4);
    }

    #[test]
    fn test_touching_counts_as_hit() {
        assert!(ball_segment_collision(Vec2::new(50.0, 10.0), 10.0, &horizontal()).hit);
        assert!(!ball_segment_collision(Vec2::new(50.0, 10.5), 10.0, &horizontal()).hit);
    }

    #[test]
    fn test_center_on_segment_falls_back_to_up() {
        let result = ball_segment_collision(Vec2::new(30.0, 0.0), 10.0, &horizontal());
        assert!(result.hit);
        assert_eq!(result.normal, DEGENERATE_NORMAL);
    }

    #[test]
    fn test_zero_length_segment_never_hits() {
        let point = Segment::new(Vec2::new(5.0, 5.0), Vec2::new(5.0, 5.0));
        assert!(!ball_segment_collision(Vec2::new(5.0, 5.0), 10.0, &point).hit);
        assert!(closest_point_on_segment(Vec2::ZERO, &point).is_none());
    }

    #[test]
    fn test_reflect_velocity() {
        // Ball moving right, hits vertical wall (normal pointing left)
        let velocity = Vec2::new(100.0, 0.0);
        let normal = Vec2::new(-1.0, 0.0);

        let reflected = reflect_velocity(velocity, normal);
        assert!((reflected.x - (-100.0)).abs() < 0.001);
        assert!(reflected.y.abs() < 0.001);
    }

    proptest! {
        #[test]
        fn prop_reflection_preserves_speed(
            vx in -20.0f32..20.0,
            vy in -20.0f32..20.0,
            angle in 0.0f32..std::f32::consts::TAU,
        ) {
            let v = Vec2::new(vx, vy);
            let n = Vec2::new(angle.cos(), angle.sin());
            let reflected = reflect_velocity(v, n);
            prop_assert!((reflected.length() - v.length()).abs() < 1e-3);
        }

        #[test]
        fn prop_closest_point_stays_on_segment(
            px in -200.0f32..200.0,
            py in -200.0f32..200.0,
        ) {
            let seg = horizontal();
            let q = closest_point_on_segment(Vec2::new(px, py), &seg).unwrap();
            prop_assert!(q.y.abs() < 1e-4);
            prop_assert!(q.x >= 0.0 && q.x <= 100.0);
        }
    }
}
