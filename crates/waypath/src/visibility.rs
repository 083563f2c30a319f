use waypath_geom::{NavPoint, ProbeHit, RegionGeometry};

use crate::{ContainmentTester, NavConfig};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum VisibilityOutcome {
    Clear,
    /// A sample left the navigable region.
    BlockedByRegion,
    /// A sample landed on foreign solid geometry.
    BlockedByForeignObstacle,
}

impl VisibilityOutcome {
    pub fn is_clear(self) -> bool {
        self == VisibilityOutcome::Clear
    }
}

/// Segment visibility by sampling containment at a fixed resolution.
#[derive(Debug)]
pub struct VisibilityTester<'r, R> {
    containment: ContainmentTester<'r, R>,
    resolution: u32,
}

impl<R> Clone for VisibilityTester<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for VisibilityTester<'_, R> {}

impl<'r, R: RegionGeometry> VisibilityTester<'r, R> {
    pub fn new(region: &'r R, config: &NavConfig) -> Self {
        Self {
            containment: ContainmentTester::new(region, config),
            resolution: config.sample_resolution.max(1),
        }
    }

    pub fn containment(&self) -> ContainmentTester<'r, R> {
        self.containment
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn outcome(&self, a: R::Point, b: R::Point, ignore_foreign: bool) -> VisibilityOutcome {
        for p in samples(a, b, self.resolution) {
            match self.containment.probe(p, ignore_foreign) {
                ProbeHit::Region => {}
                ProbeHit::Foreign => return VisibilityOutcome::BlockedByForeignObstacle,
                ProbeHit::Empty => return VisibilityOutcome::BlockedByRegion,
            }
        }
        VisibilityOutcome::Clear
    }

    pub fn is_clear(&self, a: R::Point, b: R::Point, ignore_foreign: bool) -> bool {
        self.outcome(a, b, ignore_foreign).is_clear()
    }
}

/// Evenly spaced points from `a` to `b` inclusive, `resolution + 1` in total.
pub(crate) fn samples<P: NavPoint>(a: P, b: P, resolution: u32) -> impl Iterator<Item = P> {
    let steps = resolution.max(1);
    (0..=steps).map(move |k| a.lerp(b, k as f32 / steps as f32))
}
