use crate::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Closed polygonal contour. The last point connects back to the first.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Contour {
    points: Vec<Vec2>,
}

impl Contour {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    /// Axis-aligned rectangle, counter-clockwise from `min`.
    pub fn rect(min: Vec2, max: Vec2) -> Self {
        Self::new(vec![
            min,
            Vec2::new(max.x, min.y),
            max,
            Vec2::new(min.x, max.y),
        ])
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Fewer than three points enclose no area.
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 3
    }

    pub fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Even-odd crossing test. Points exactly on an edge may land on either side.
    pub fn contains(&self, p: Vec2) -> bool {
        if self.is_degenerate() {
            return false;
        }
        let mut inside = false;
        for (a, b) in self.edges() {
            if (a.y > p.y) != (b.y > p.y) {
                let x = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
                if p.x < x {
                    inside = !inside;
                }
            }
        }
        inside
    }

    pub fn distance_to_boundary(&self, p: Vec2) -> f32 {
        self.edges()
            .map(|(a, b)| closest_point_on_segment(p, a, b).distance(p))
            .fold(f32::INFINITY, f32::min)
    }

    /// Inside, or within `tolerance` of an edge.
    pub fn covers(&self, p: Vec2, tolerance: f32) -> bool {
        !self.is_degenerate() && (self.contains(p) || self.distance_to_boundary(p) <= tolerance)
    }

    /// Inside by more than `tolerance`.
    pub fn encloses(&self, p: Vec2, tolerance: f32) -> bool {
        self.contains(p) && self.distance_to_boundary(p) > tolerance
    }
}

impl From<Vec<Vec2>> for Contour {
    fn from(points: Vec<Vec2>) -> Self {
        Self::new(points)
    }
}

pub(crate) fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let ab = b - a;
    let denom = ab.dot(ab);
    if denom <= f32::EPSILON {
        return a;
    }
    let t = (p - a).dot(ab) / denom;
    let t = t.clamp(0.0, 1.0);
    a + ab * t
}
