use waypath_geom::RegionGeometry;

use crate::{BoundaryVertexIndex, ContainmentTester, NavConfig};

/// Moves off-region points onto the nearest boundary vertex.
///
/// This is vertex snapping, not projection onto the boundary: a point just outside a long
/// edge lands on that edge's nearer end.
#[derive(Debug)]
pub struct RegionSnapper<'r, R> {
    containment: ContainmentTester<'r, R>,
    index: BoundaryVertexIndex<'r, R>,
}

impl<R> Clone for RegionSnapper<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for RegionSnapper<'_, R> {}

impl<'r, R: RegionGeometry> RegionSnapper<'r, R> {
    pub fn new(region: &'r R, config: &NavConfig) -> Self {
        Self {
            containment: ContainmentTester::new(region, config),
            index: BoundaryVertexIndex::new(region),
        }
    }

    /// Unchanged when already inside; otherwise the vertex nearest to `point` itself. A
    /// region without vertices leaves the point where it is.
    pub fn snap(&self, point: R::Point) -> R::Point {
        if self.containment.is_inside(point, false) {
            return point;
        }
        self.index
            .nearest(point)
            .map(|ranked| ranked.vertex)
            .unwrap_or(point)
    }
}
