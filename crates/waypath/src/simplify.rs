use waypath_geom::RegionGeometry;

use crate::{NavConfig, VisibilityTester};

/// String-pulling by repeated line-of-sight shortcuts.
///
/// Removal order matters: the first shortcut found (lowest `i`, then lowest `j`) is taken and
/// the scan restarts from the beginning, which decides which waypoints survive when several
/// shortcuts overlap.
#[derive(Debug)]
pub struct PathSimplifier<'r, R> {
    visibility: VisibilityTester<'r, R>,
}

impl<R> Clone for PathSimplifier<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for PathSimplifier<'_, R> {}

impl<'r, R: RegionGeometry> PathSimplifier<'r, R> {
    pub fn new(region: &'r R, config: &NavConfig) -> Self {
        Self {
            visibility: VisibilityTester::new(region, config),
        }
    }

    pub fn simplify(&self, path: &[R::Point]) -> Vec<R::Point> {
        let mut out = path.to_vec();
        self.simplify_in_place(&mut out);
        out
    }

    pub fn simplify_in_place(&self, path: &mut Vec<R::Point>) {
        while let Some((i, j)) = self.first_shortcut(path) {
            path.drain(i + 1..j);
        }
    }

    fn first_shortcut(&self, path: &[R::Point]) -> Option<(usize, usize)> {
        for i in 0..path.len() {
            for j in i + 2..path.len() {
                if self.visibility.is_clear(path[i], path[j], false) {
                    return Some((i, j));
                }
            }
        }
        None
    }
}
