use waypath_geom::NavPoint;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which stage of the query produced a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PathOutcome {
    /// No region was active; the target is returned as-is.
    Unconstrained,
    /// The snapped endpoints see each other.
    Direct,
    /// Stitched through boundary vertices.
    Greedy,
    /// The greedy search failed; the path leads to where a foreign obstacle blocks the way.
    Recovered,
    /// Nothing worked; the single point is the (snapped) origin.
    Degraded,
}

/// Waypoints to walk, excluding the caller's current position.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavPath<P> {
    pub points: Vec<P>,
    pub outcome: PathOutcome,
}

impl<P> NavPath<P> {
    pub fn new(points: Vec<P>, outcome: PathOutcome) -> Self {
        Self { points, outcome }
    }

    pub fn is_degraded(&self) -> bool {
        self.outcome == PathOutcome::Degraded
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavRaycastHit<P> {
    /// Last on-region point before the obstruction.
    pub point: P,
}

pub trait Navigator<P: NavPoint> {
    /// Always yields at least one point.
    fn find_path(&self, origin: P, target: P) -> NavPath<P>;

    /// Walk `start -> end` and report where foreign geometry first blocks it.
    ///
    /// Backends that don't support raycasts may return `None`.
    fn raycast(&self, _start: P, _end: P) -> Option<NavRaycastHit<P>> {
        None
    }

    /// Move a point onto the navigable region.
    ///
    /// Backends that don't support projection may return `None`.
    fn nearest_point(&self, _point: P) -> Option<P> {
        None
    }
}

/// Sum of segment lengths along `points`.
pub fn path_length<P: NavPoint>(points: &[P]) -> f32 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}
