use crate::{Contour, GeometryError, Probe, ProbeHit, RegionGeometry, Result, Vec2};

#[cfg(feature = "serde")]
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

/// Planar navigable region: an outer contour with optional holes, plus foreign obstacles
/// that sit on top of it.
///
/// Containment is a point-overlap probe: edges are walkable (within the probe extent), which
/// lets paths hug walls and hole corners.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolygonRegion {
    outer: Contour,
    holes: Vec<Contour>,
    obstacles: Vec<Contour>,
    vertices: Vec<Vec2>,
}

impl PolygonRegion {
    pub fn new(outer: impl Into<Contour>) -> Result<Self> {
        let outer = outer.into();
        check_finite(&outer, "outer contour")?;
        let vertices = outer.points().to_vec();
        Ok(Self {
            outer,
            holes: Vec::new(),
            obstacles: Vec::new(),
            vertices,
        })
    }

    /// A region with no contours at all. Every probe comes back empty.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_hole(mut self, hole: impl Into<Contour>) -> Result<Self> {
        let hole = hole.into();
        check_finite(&hole, "hole contour")?;
        self.vertices.extend_from_slice(hole.points());
        self.holes.push(hole);
        Ok(self)
    }

    /// Add solid geometry that is not part of the region. Obstacle corners are not
    /// steering vertices.
    pub fn with_obstacle(mut self, obstacle: impl Into<Contour>) -> Result<Self> {
        let obstacle = obstacle.into();
        check_finite(&obstacle, "obstacle contour")?;
        self.obstacles.push(obstacle);
        Ok(self)
    }

    pub fn outer(&self) -> &Contour {
        &self.outer
    }

    pub fn holes(&self) -> &[Contour] {
        &self.holes
    }

    pub fn obstacles(&self) -> &[Contour] {
        &self.obstacles
    }
}

impl RegionGeometry for PolygonRegion {
    type Point = Vec2;

    fn probe(&self, point: Vec2, probe: Probe) -> ProbeHit {
        if !probe.ignore_foreign
            && self
                .obstacles
                .iter()
                .any(|o| o.encloses(point, probe.extent))
        {
            return ProbeHit::Foreign;
        }

        let on_region = self.outer.covers(point, probe.extent)
            && !self.holes.iter().any(|h| h.encloses(point, probe.extent));
        if on_region {
            ProbeHit::Region
        } else {
            ProbeHit::Empty
        }
    }

    fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }
}

fn check_finite(contour: &Contour, context: &'static str) -> Result<()> {
    match contour
        .points()
        .iter()
        .position(|p| !(p.x.is_finite() && p.y.is_finite()))
    {
        Some(index) => Err(GeometryError::NonFiniteVertex { context, index }),
        None => Ok(()),
    }
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct PolygonRegionSerde {
    outer: Contour,
    #[serde(default)]
    holes: Vec<Contour>,
    #[serde(default)]
    obstacles: Vec<Contour>,
}

#[cfg(feature = "serde")]
impl Serialize for PolygonRegion {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        PolygonRegionSerde {
            outer: self.outer.clone(),
            holes: self.holes.clone(),
            obstacles: self.obstacles.clone(),
        }
        .serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for PolygonRegion {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let data = PolygonRegionSerde::deserialize(deserializer)?;
        let mut region = PolygonRegion::new(data.outer).map_err(D::Error::custom)?;
        for hole in data.holes {
            region = region.with_hole(hole).map_err(D::Error::custom)?;
        }
        for obstacle in data.obstacles {
            region = region.with_obstacle(obstacle).map_err(D::Error::custom)?;
        }
        Ok(region)
    }
}
