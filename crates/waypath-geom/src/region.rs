use crate::NavPoint;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Surface a containment probe resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ProbeHit {
    /// The navigable region itself.
    Region,
    /// Solid geometry that is not part of the region.
    Foreign,
    /// Nothing at all.
    Empty,
}

/// Parameters of a single containment probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Probe {
    /// Half-length of the probe. Points within this distance of a region edge count as on it.
    pub extent: f32,
    /// Mask foreign obstacles out of the probe.
    pub ignore_foreign: bool,
}

impl Probe {
    pub fn new(extent: f32, ignore_foreign: bool) -> Self {
        Self {
            extent,
            ignore_foreign,
        }
    }
}

/// Geometry a navigation query can run against.
///
/// Implementations answer containment by sampling (a short probe against the region's
/// collision data) rather than exact point-in-region math, and expose the boundary vertices
/// the path builder steers by.
pub trait RegionGeometry {
    type Point: NavPoint;

    fn probe(&self, point: Self::Point, probe: Probe) -> ProbeHit;

    /// Boundary vertices in contour order: outer contour first, then holes.
    fn vertices(&self) -> &[Self::Point];
}

impl<R: RegionGeometry + ?Sized> RegionGeometry for &R {
    type Point = R::Point;

    fn probe(&self, point: Self::Point, probe: Probe) -> ProbeHit {
        (**self).probe(point, probe)
    }

    fn vertices(&self) -> &[Self::Point] {
        (**self).vertices()
    }
}
