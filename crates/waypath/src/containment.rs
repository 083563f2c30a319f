use waypath_geom::{Probe, ProbeHit, RegionGeometry};

use crate::NavConfig;

/// Point-in-region test backed by the geometry's fixed-size probe.
#[derive(Debug)]
pub struct ContainmentTester<'r, R> {
    region: &'r R,
    extent: f32,
}

impl<R> Clone for ContainmentTester<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for ContainmentTester<'_, R> {}

impl<'r, R: RegionGeometry> ContainmentTester<'r, R> {
    pub fn new(region: &'r R, config: &NavConfig) -> Self {
        Self {
            region,
            extent: config.probe_extent,
        }
    }

    pub fn region(&self) -> &'r R {
        self.region
    }

    pub fn probe(&self, point: R::Point, ignore_foreign: bool) -> ProbeHit {
        self.region
            .probe(point, Probe::new(self.extent, ignore_foreign))
    }

    /// True only when the probe lands on the region itself. With `ignore_foreign` set,
    /// obstacles are masked out of the probe rather than counted as blocking.
    pub fn is_inside(&self, point: R::Point, ignore_foreign: bool) -> bool {
        self.probe(point, ignore_foreign) == ProbeHit::Region
    }
}
