//! Hexagon arena geometry
//!
//! Edge `i` runs from the vertex at `60°·i` to the vertex at `60°·(i+1)`,
//! so edges are ordered by increasing angle and the sequence is closed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;
use crate::{EDGE_COUNT, polar_to_cartesian};

/// A straight line segment between two points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn length(&self) -> f32 {
        (self.end - self.start).length()
    }

    #[inline]
    pub fn midpoint(&self) -> Vec2 {
        (self.start + self.end) * 0.5
    }

    /// Point on the segment at parameter `t` (0 = start, 1 = end)
    #[inline]
    pub fn lerp(&self, t: f32) -> Vec2 {
        self.start + (self.end - self.start) * t
    }
}

/// Compute the six hexagon edges around the window center
pub fn compute_edges(window_size: f32, hex_radius: f32) -> [Segment; EDGE_COUNT] {
    let center = Vec2::splat(window_size / 2.0);
    let step = std::f32::consts::FRAC_PI_3;
    std::array::from_fn(|i| {
        let a1 = step * i as f32;
        let a2 = step * (i + 1) as f32;
        Segment::new(
            polar_to_cartesian(center, hex_radius, a1),
            polar_to_cartesian(center, hex_radius, a2),
        )
    })
}

/// Index of the edge a paddle at `angle_rad` defends
///
/// `floor(degrees / 60) mod 6`, wrapping negative angles into range.
pub fn goal_wall_index(angle_rad: f32) -> usize {
    let sector = (angle_rad.to_degrees() / 60.0).floor() as i64;
    sector.rem_euclid(EDGE_COUNT as i64) as usize
}

/// The fixed hexagonal playfield
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena {
    center: Vec2,
    hex_radius: f32,
    edges: [Segment; EDGE_COUNT],
}

impl Arena {
    pub fn new(window_size: f32, hex_radius: f32) -> Self {
        Self {
            center: Vec2::splat(window_size / 2.0),
            hex_radius,
            edges: compute_edges(window_size, hex_radius),
        }
    }

    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self::new(tuning.window_size, tuning.hex_radius)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.center
    }

    #[inline]
    pub fn hex_radius(&self) -> f32 {
        self.hex_radius
    }

    #[inline]
    pub fn edges(&self) -> &[Segment; EDGE_COUNT] {
        &self.edges
    }

    #[inline]
    pub fn edge(&self, index: usize) -> Segment {
        self.edges[index]
    }

    /// Point on the vertex-radius circle at `angle_rad`
    ///
    /// Scoring uses this (not the inset paddle track) to find whose goal
    /// the ball went through.
    pub fn station_point(&self, angle_rad: f32) -> Vec2 {
        polar_to_cartesian(self.center, self.hex_radius, angle_rad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    #[test]
    fn test_edges_form_closed_hexagon() {
        let arena = Arena::new(800.0, 266.0);
        let edges = arena.edges();
        for i in 0..EDGE_COUNT {
            let next = edges[(i + 1) % EDGE_COUNT];
            assert!(edges[i].end.distance(next.start) < EPS, "edge {i} not joined");
            // Adjacent edges share only one endpoint
            assert!(edges[i].start.distance(next.end) > 1.0);
        }
        assert!(edges[5].end.distance(edges[0].start) < EPS);
    }

    #[test]
    fn test_edges_are_regular() {
        let arena = Arena::new(800.0, 266.0);
        for edge in arena.edges() {
            // A regular hexagon's side equals its circumradius
            assert!((edge.length() - 266.0).abs() < EPS);
            assert!((edge.start.distance(arena.center()) - 266.0).abs() < EPS);
        }
    }

    #[test]
    fn test_edge_zero_starts_at_zero_degrees() {
        let arena = Arena::new(800.0, 266.0);
        let e0 = arena.edge(0);
        assert!(e0.start.distance(Vec2::new(666.0, 400.0)) < EPS);
        assert!(e0.end.distance(Vec2::new(533.0, 400.0 + 266.0 * 0.866_025_4)) < EPS);
    }

    #[test]
    fn test_goal_wall_for_default_stations() {
        let walls: Vec<usize> = [270.0_f32, 30.0, 150.0]
            .iter()
            .map(|deg| goal_wall_index(deg.to_radians()))
            .collect();
        assert_eq!(walls, vec![4, 0, 2]);
        // 1, 3, 5 have no owner
        for unowned in [1, 3, 5] {
            assert!(!walls.contains(&unowned));
        }
    }

    #[test]
    fn test_goal_wall_wraps_negative_angles() {
        assert_eq!(goal_wall_index((-30.0_f32).to_radians()), 5);
        assert_eq!(goal_wall_index((390.0_f32).to_radians()), 0);
    }

    #[test]
    fn test_station_point_uses_vertex_radius() {
        let arena = Arena::new(800.0, 266.0);
        let p = arena.station_point(0.0);
        assert!(p.distance(Vec2::new(666.0, 400.0)) < EPS);
    }
}
