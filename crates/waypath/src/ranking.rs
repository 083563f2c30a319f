use waypath_geom::{NavPoint, RegionGeometry};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Position of a vertex in the region's vertex list.
///
/// Coincident vertices from different contours keep distinct ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VertexId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RankedVertex<P> {
    pub id: VertexId,
    pub vertex: P,
    pub distance: f32,
}

/// Region boundary vertices ordered by distance to a reference point.
#[derive(Debug)]
pub struct BoundaryVertexIndex<'r, R> {
    region: &'r R,
}

impl<R> Clone for BoundaryVertexIndex<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for BoundaryVertexIndex<'_, R> {}

impl<'r, R: RegionGeometry> BoundaryVertexIndex<'r, R> {
    pub fn new(region: &'r R) -> Self {
        Self { region }
    }

    pub fn vertex_count(&self) -> usize {
        self.region.vertices().len()
    }

    /// Every boundary vertex, ascending by Euclidean distance to `reference`. Equal
    /// distances keep contour order.
    pub fn ranked_vertices(&self, reference: R::Point) -> Vec<RankedVertex<R::Point>> {
        let mut ranked: Vec<_> = self
            .region
            .vertices()
            .iter()
            .copied()
            .enumerate()
            .map(|(i, vertex)| RankedVertex {
                id: VertexId(i),
                vertex,
                distance: vertex.distance(reference),
            })
            .collect();
        // `sort_by` is stable.
        ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        ranked
    }

    pub fn nearest(&self, reference: R::Point) -> Option<RankedVertex<R::Point>> {
        self.ranked_vertices(reference).into_iter().next()
    }
}
