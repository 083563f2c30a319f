use waypath_geom::RegionGeometry;

use crate::{
    GreedyPathBuilder, NavConfig, NavPath, NavRaycastHit, Navigator, ObstructionLocator,
    PathOutcome, PathQuery, PathSimplifier, RegionSnapper, Result, VisibilityTester,
};

/// Query facade over one navigable region.
///
/// The engine only borrows the region, so swapping regions (say on a level transition) is a
/// matter of building a new engine or calling [`NavigationEngine::set_region`]. Queries keep
/// all scratch state local and can run concurrently against a shared region.
#[derive(Debug)]
pub struct NavigationEngine<'r, R> {
    region: Option<&'r R>,
    config: NavConfig,
}

impl<R> Clone for NavigationEngine<'_, R> {
    fn clone(&self) -> Self {
        Self {
            region: self.region,
            config: self.config,
        }
    }
}

impl<'r, R: RegionGeometry> NavigationEngine<'r, R> {
    pub fn new(region: &'r R, config: NavConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            region: Some(region),
            config,
        })
    }

    /// An engine with no active region: every query walks straight to its target.
    pub fn unconstrained(config: NavConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            region: None,
            config,
        })
    }

    pub fn region(&self) -> Option<&'r R> {
        self.region
    }

    pub fn set_region(&mut self, region: Option<&'r R>) {
        self.region = region;
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Waypoints from `origin` to `target`, excluding `origin` itself.
    ///
    /// Both endpoints are snapped onto the region first. When the snapped origin differs
    /// from `origin` it stays in the result as the first waypoint. The result is never
    /// empty; a degraded result is the single snapped origin.
    pub fn find_path(&self, origin: R::Point, target: R::Point) -> NavPath<R::Point> {
        let Some(region) = self.region else {
            tracing::debug!(?origin, ?target, "No active region, walking straight to target");
            return NavPath::new(vec![target], PathOutcome::Unconstrained);
        };

        let snapper = RegionSnapper::new(region, &self.config);
        let start = snapper.snap(origin);
        let goal = snapper.snap(target);

        let (mut points, outcome) = self.route(region, start, goal);
        if outcome == PathOutcome::Degraded {
            tracing::debug!(?origin, ?target, "No path found, staying at origin");
            return NavPath::new(points, outcome);
        }

        PathSimplifier::new(region, &self.config).simplify_in_place(&mut points);
        if points.first() == Some(&origin) {
            points.remove(0);
        }
        if points.is_empty() {
            points.push(target);
        }

        tracing::debug!(
            ?origin,
            ?target,
            ?outcome,
            waypoints = points.len(),
            "Path resolved"
        );
        NavPath::new(points, outcome)
    }

    fn route(
        &self,
        region: &'r R,
        start: R::Point,
        goal: R::Point,
    ) -> (Vec<R::Point>, PathOutcome) {
        let visibility = VisibilityTester::new(region, &self.config);
        if visibility.is_clear(goal, start, false) {
            return (vec![start, goal], PathOutcome::Direct);
        }

        let builder = GreedyPathBuilder::new(region, &self.config);
        let first = builder.build(PathQuery::new(start, goal));
        if !first.failed {
            let mut path = first.path;
            path.push(goal);
            return (path, PathOutcome::Greedy);
        }

        let reached = first.path.last().copied().unwrap_or(start);
        let locator = ObstructionLocator::new(region, &self.config);
        let Some(stop) = locator.find_break(reached, goal) else {
            tracing::debug!(?reached, ?goal, "No foreign obstruction to fall back on");
            return (vec![start], PathOutcome::Degraded);
        };

        if visibility.is_clear(stop, start, true) {
            return (vec![start, stop], PathOutcome::Recovered);
        }

        let retry = builder.build(PathQuery::new(start, stop).ignoring_foreign());
        if retry.failed {
            tracing::debug!(?stop, "Obstacle-ignoring retry exhausted too");
            return (vec![start], PathOutcome::Degraded);
        }

        let mut path = retry.path;
        path.push(stop);
        (path, PathOutcome::Recovered)
    }
}

impl<'r, R: RegionGeometry> Navigator<R::Point> for NavigationEngine<'r, R> {
    fn find_path(&self, origin: R::Point, target: R::Point) -> NavPath<R::Point> {
        NavigationEngine::find_path(self, origin, target)
    }

    fn raycast(&self, start: R::Point, end: R::Point) -> Option<NavRaycastHit<R::Point>> {
        let region = self.region?;
        ObstructionLocator::new(region, &self.config)
            .find_break(start, end)
            .map(|point| NavRaycastHit { point })
    }

    fn nearest_point(&self, point: R::Point) -> Option<R::Point> {
        match self.region {
            Some(region) => Some(RegionSnapper::new(region, &self.config).snap(point)),
            None => Some(point),
        }
    }
}
