use waypath_geom::{ProbeHit, RegionGeometry};

use crate::visibility::samples;
use crate::{ContainmentTester, NavConfig};

/// Finds where a blocked segment first runs into foreign geometry.
#[derive(Debug)]
pub struct ObstructionLocator<'r, R> {
    containment: ContainmentTester<'r, R>,
    resolution: u32,
}

impl<R> Clone for ObstructionLocator<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for ObstructionLocator<'_, R> {}

impl<'r, R: RegionGeometry> ObstructionLocator<'r, R> {
    pub fn new(region: &'r R, config: &NavConfig) -> Self {
        Self {
            containment: ContainmentTester::new(region, config),
            resolution: config.sample_resolution.max(1),
        }
    }

    /// Last on-region sample before the first sample that lands on a foreign obstacle.
    ///
    /// `None` when the walk drops off the region into empty space first, never meets an
    /// obstacle, or starts on one.
    pub fn find_break(&self, a: R::Point, b: R::Point) -> Option<R::Point> {
        let mut last_on_region = None;
        for p in samples(a, b, self.resolution) {
            match self.containment.probe(p, false) {
                ProbeHit::Region => last_on_region = Some(p),
                ProbeHit::Foreign => return last_on_region,
                ProbeHit::Empty => return None,
            }
        }
        None
    }
}
