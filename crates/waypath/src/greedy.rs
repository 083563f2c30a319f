use waypath_geom::{NavPoint, RegionGeometry};

use crate::{BoundaryVertexIndex, NavConfig, RegionSnapper, VisibilityTester};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PathQuery<P> {
    pub origin: P,
    pub target: P,
    /// Treat foreign obstacles as absent for every visibility check of this query.
    pub ignore_foreign: bool,
}

impl<P> PathQuery<P> {
    pub fn new(origin: P, target: P) -> Self {
        Self {
            origin,
            target,
            ignore_foreign: false,
        }
    }

    pub fn ignoring_foreign(mut self) -> Self {
        self.ignore_foreign = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GreedyOutcome<P> {
    /// Starts at the query origin. On success the last point sees the (snapped) target; the
    /// target itself is not appended.
    pub path: Vec<P>,
    pub failed: bool,
    /// Scan rounds performed, including fruitless ones.
    pub rounds: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CandidateKind {
    /// Sees both the tail and the target.
    Full,
    /// Sees only the tail.
    Partial,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    rank: usize,
    total: f32,
}

/// Nearest-visible-vertex walk from origin toward target.
///
/// Each round scans the target-ranked boundary vertices visible from the current tail. A
/// vertex that also sees the target finishes the walk; otherwise the best vertex that only
/// sees the tail is committed and excluded from later rounds. Committed vertices are never
/// revisited, so the walk can dead-end where the route has to move away from the target
/// first. Rounds that find nothing count toward a failure budget of one per ranked vertex.
#[derive(Debug)]
pub struct GreedyPathBuilder<'r, R> {
    visibility: VisibilityTester<'r, R>,
    snapper: RegionSnapper<'r, R>,
    index: BoundaryVertexIndex<'r, R>,
}

impl<R> Clone for GreedyPathBuilder<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for GreedyPathBuilder<'_, R> {}

impl<'r, R: RegionGeometry> GreedyPathBuilder<'r, R> {
    pub fn new(region: &'r R, config: &NavConfig) -> Self {
        Self {
            visibility: VisibilityTester::new(region, config),
            snapper: RegionSnapper::new(region, config),
            index: BoundaryVertexIndex::new(region),
        }
    }

    pub fn build(&self, query: PathQuery<R::Point>) -> GreedyOutcome<R::Point> {
        let ignore = query.ignore_foreign;
        let target = self.snapper.snap(query.target);
        let ranked = self.index.ranked_vertices(target);

        let mut path = vec![query.origin];
        let mut walked = 0.0f32;
        let mut excluded = vec![false; ranked.len()];
        let mut failures = 0usize;
        let mut rounds = 0usize;

        loop {
            rounds += 1;
            let tail = *path.last().unwrap_or(&query.origin);

            let mut full: Option<Candidate> = None;
            let mut partial: Option<Candidate> = None;

            for (rank, candidate) in ranked.iter().enumerate() {
                if excluded[rank] {
                    continue;
                }
                let v = candidate.vertex;
                if !self.visibility.is_clear(v, tail, ignore) {
                    continue;
                }

                let total = walked + tail.distance(v) + v.distance(target);
                if self.visibility.is_clear(target, v, ignore) {
                    if full.map_or(true, |best| total < best.total) {
                        full = Some(Candidate { rank, total });
                    }
                } else if full.is_none() && partial.map_or(true, |best| total < best.total) {
                    partial = Some(Candidate { rank, total });
                }
            }

            let chosen = full
                .map(|c| (c, CandidateKind::Full))
                .or_else(|| partial.map(|c| (c, CandidateKind::Partial)));

            match chosen {
                Some((c, kind)) => {
                    let v = ranked[c.rank].vertex;
                    tracing::trace!(round = rounds, ?kind, ?tail, vertex = ?v, "Greedy step");
                    walked += tail.distance(v);
                    path.push(v);
                    if kind == CandidateKind::Full {
                        return GreedyOutcome {
                            path,
                            failed: false,
                            rounds,
                        };
                    }
                    excluded[c.rank] = true;
                }
                None => {
                    failures += 1;
                    tracing::trace!(round = rounds, failures, ?tail, "Greedy round found nothing");
                    if failures > ranked.len() {
                        tracing::debug!(
                            rounds,
                            reached = ?tail,
                            ?target,
                            "Greedy search exhausted"
                        );
                        return GreedyOutcome {
                            path,
                            failed: true,
                            rounds,
                        };
                    }
                }
            }
        }
    }
}
