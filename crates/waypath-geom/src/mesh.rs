use std::collections::{BTreeMap, BTreeSet};

use crate::{GeometryError, NavPoint, Probe, ProbeHit, RegionGeometry, Result, Vec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Barycentric slack so rays through shared edges and vertices still register.
const BARY_EPS: f32 = 1e-5;
/// Hits closer together than this are treated as the same depth.
const COINCIDENT_EPS: f32 = 1e-5;

/// Indexed triangle soup.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "TriMeshSerde"))]
pub struct TriMesh {
    vertices: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
}

impl TriMesh {
    pub fn new(vertices: Vec<Vec3>, triangles: Vec<[u32; 3]>) -> Result<Self> {
        if let Some(index) = vertices.iter().position(|v| !v.is_finite()) {
            return Err(GeometryError::NonFiniteVertex {
                context: "mesh vertices",
                index,
            });
        }
        for (triangle, tri) in triangles.iter().enumerate() {
            if let Some(&vertex) = tri.iter().find(|&&i| i as usize >= vertices.len()) {
                return Err(GeometryError::IndexOutOfRange {
                    triangle,
                    vertex,
                    count: vertices.len(),
                });
            }
        }
        Ok(Self {
            vertices,
            triangles,
        })
    }

    /// Two triangles spanning four corners given in winding order.
    pub fn quad(corners: [Vec3; 4]) -> Self {
        Self {
            vertices: corners.to_vec(),
            triangles: vec![[0, 1, 2], [0, 2, 3]],
        }
    }

    /// Closed axis-aligned box.
    pub fn cuboid(min: Vec3, max: Vec3) -> Self {
        let vertices = vec![
            Vec3::new(min.x, min.y, min.z),
            Vec3::new(max.x, min.y, min.z),
            Vec3::new(max.x, min.y, max.z),
            Vec3::new(min.x, min.y, max.z),
            Vec3::new(min.x, max.y, min.z),
            Vec3::new(max.x, max.y, min.z),
            Vec3::new(max.x, max.y, max.z),
            Vec3::new(min.x, max.y, max.z),
        ];
        let triangles = vec![
            // bottom, top
            [0, 2, 1],
            [0, 3, 2],
            [4, 5, 6],
            [4, 6, 7],
            // sides
            [0, 1, 5],
            [0, 5, 4],
            [1, 2, 6],
            [1, 6, 5],
            [2, 3, 7],
            [2, 7, 6],
            [3, 0, 4],
            [3, 4, 7],
        ];
        Self {
            vertices,
            triangles,
        }
    }

    /// Append another mesh's triangles; the result may be disconnected.
    ///
    /// Fails without modifying `self` when the combined vertex count no longer fits a `u32`
    /// index.
    pub fn append(&mut self, other: &TriMesh) -> Result<()> {
        let base = index_base(self.vertices.len(), other.vertices.len())?;
        let shifted = other
            .triangles
            .iter()
            .map(|t| offset_triangle(*t, base))
            .collect::<Result<Vec<_>>>()?;
        self.vertices.extend_from_slice(&other.vertices);
        self.triangles.extend(shifted);
        Ok(())
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    fn corners(&self, tri: [u32; 3]) -> [Vec3; 3] {
        [
            self.vertices[tri[0] as usize],
            self.vertices[tri[1] as usize],
            self.vertices[tri[2] as usize],
        ]
    }

    /// Nearest hit parameter of the segment `origin + dir * t`, `t` in `[0, max_t]`.
    pub fn raycast(&self, origin: Vec3, dir: Vec3, max_t: f32) -> Option<f32> {
        let mut best: Option<f32> = None;
        for tri in self.triangles.iter().copied() {
            let Some(t) = ray_triangle_t(origin, dir, self.corners(tri)) else {
                continue;
            };
            if t < -COINCIDENT_EPS || t > max_t + COINCIDENT_EPS {
                continue;
            }
            match best {
                None => best = Some(t),
                Some(b) if t < b => best = Some(t),
                _ => {}
            }
        }
        best
    }

    /// Vertices on edges used by exactly one triangle, in first-seen triangle/edge order.
    ///
    /// Coincident vertices are merged by exact coordinates so seams between triangles that
    /// do not share indices still count as interior.
    pub fn boundary_vertices(&self) -> Vec<Vec3> {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        struct VertexKey(u32, u32, u32);

        impl VertexKey {
            fn from_vec3(p: Vec3) -> Self {
                Self(p.x.to_bits(), p.y.to_bits(), p.z.to_bits())
            }
        }

        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        struct EdgeKey(VertexKey, VertexKey);

        impl EdgeKey {
            fn new(a: Vec3, b: Vec3) -> Self {
                let ka = VertexKey::from_vec3(a);
                let kb = VertexKey::from_vec3(b);
                if ka <= kb {
                    Self(ka, kb)
                } else {
                    Self(kb, ka)
                }
            }
        }

        let mut uses: BTreeMap<EdgeKey, usize> = BTreeMap::new();
        for tri in self.triangles.iter().copied() {
            for (a, b) in tri_edges(self.corners(tri)) {
                *uses.entry(EdgeKey::new(a, b)).or_insert(0) += 1;
            }
        }

        let mut seen = BTreeSet::new();
        let mut out = Vec::new();
        for tri in self.triangles.iter().copied() {
            for (a, b) in tri_edges(self.corners(tri)) {
                if uses.get(&EdgeKey::new(a, b)).copied() != Some(1) {
                    continue;
                }
                for v in [a, b] {
                    if seen.insert(VertexKey::from_vec3(v)) {
                        out.push(v);
                    }
                }
            }
        }
        out
    }
}

/// Walkable triangle mesh with optional foreign obstacle meshes. `y` is up.
///
/// Containment is a short vertical ray through the point; whichever surface it strikes first
/// decides.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshRegion {
    surface: TriMesh,
    obstacles: Vec<TriMesh>,
    boundary: Vec<Vec3>,
}

impl MeshRegion {
    pub fn new(surface: TriMesh) -> Self {
        let boundary = surface.boundary_vertices();
        Self {
            surface,
            obstacles: Vec::new(),
            boundary,
        }
    }

    pub fn with_obstacle(mut self, obstacle: TriMesh) -> Self {
        self.obstacles.push(obstacle);
        self
    }

    pub fn surface(&self) -> &TriMesh {
        &self.surface
    }

    pub fn obstacles(&self) -> &[TriMesh] {
        &self.obstacles
    }
}

impl RegionGeometry for MeshRegion {
    type Point = Vec3;

    fn probe(&self, point: Vec3, probe: Probe) -> ProbeHit {
        let extent = probe.extent.max(0.0);
        let origin = point + Vec3::UP * extent;
        let dir = -Vec3::UP;
        let max_t = extent * 2.0;

        let region_t = self.surface.raycast(origin, dir, max_t);
        let foreign_t = if probe.ignore_foreign {
            None
        } else {
            self.obstacles
                .iter()
                .filter_map(|o| o.raycast(origin, dir, max_t))
                .reduce(f32::min)
        };

        match (region_t, foreign_t) {
            (Some(r), Some(f)) if f <= r + COINCIDENT_EPS => ProbeHit::Foreign,
            (None, Some(_)) => ProbeHit::Foreign,
            (Some(_), _) => ProbeHit::Region,
            (None, None) => ProbeHit::Empty,
        }
    }

    fn vertices(&self) -> &[Vec3] {
        &self.boundary
    }
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct TriMeshSerde {
    vertices: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
}

#[cfg(feature = "serde")]
impl TryFrom<TriMeshSerde> for TriMesh {
    type Error = GeometryError;

    fn try_from(data: TriMeshSerde) -> Result<Self> {
        TriMesh::new(data.vertices, data.triangles)
    }
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct MeshRegionSerde {
    surface: TriMesh,
    #[serde(default)]
    obstacles: Vec<TriMesh>,
}

#[cfg(feature = "serde")]
impl Serialize for MeshRegion {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        MeshRegionSerde {
            surface: self.surface.clone(),
            obstacles: self.obstacles.clone(),
        }
        .serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for MeshRegion {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Both meshes were validated by `TriMesh`'s own deserializer.
        let data = MeshRegionSerde::deserialize(deserializer)?;
        let mut region = MeshRegion::new(data.surface);
        for obstacle in data.obstacles {
            region = region.with_obstacle(obstacle);
        }
        Ok(region)
    }
}

/// Index of the first appended vertex, if the combined mesh stays addressable by `u32`.
fn index_base(current: usize, added: usize) -> Result<u32> {
    let count = current.saturating_add(added);
    if u32::try_from(count).is_err() {
        return Err(GeometryError::TooManyVertices { count });
    }
    u32::try_from(current).map_err(|_| GeometryError::TooManyVertices { count })
}

fn offset_triangle(tri: [u32; 3], base: u32) -> Result<[u32; 3]> {
    let mut out = tri;
    for index in &mut out {
        *index = index
            .checked_add(base)
            .ok_or(GeometryError::TooManyVertices {
                count: *index as usize + base as usize + 1,
            })?;
    }
    Ok(out)
}

fn tri_edges(tri: [Vec3; 3]) -> [(Vec3, Vec3); 3] {
    [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])]
}

// Möller–Trumbore, two-sided, with edge-inclusive barycentric bounds. Returns the ray
// parameter, which may be slightly negative for hits at the ray origin.
fn ray_triangle_t(origin: Vec3, dir: Vec3, tri: [Vec3; 3]) -> Option<f32> {
    let edge1 = tri[1] - tri[0];
    let edge2 = tri[2] - tri[0];

    let pvec = dir.cross(edge2);
    let det = edge1.dot(pvec);
    if det.abs() < 1e-8 {
        return None;
    }

    let inv_det = 1.0 / det;
    let tvec = origin - tri[0];
    let u = tvec.dot(pvec) * inv_det;
    if !(-BARY_EPS..=1.0 + BARY_EPS).contains(&u) {
        return None;
    }

    let qvec = tvec.cross(edge1);
    let v = dir.dot(qvec) * inv_det;
    if v < -BARY_EPS || u + v > 1.0 + BARY_EPS {
        return None;
    }

    Some(edge2.dot(qvec) * inv_det)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor(min_x: f32, min_z: f32, max_x: f32, max_z: f32) -> TriMesh {
        TriMesh::quad([
            Vec3::new(min_x, 0.0, min_z),
            Vec3::new(max_x, 0.0, min_z),
            Vec3::new(max_x, 0.0, max_z),
            Vec3::new(min_x, 0.0, max_z),
        ])
    }

    #[test]
    fn downward_ray_hits_floor_at_expected_depth() {
        let mesh = floor(0.0, 0.0, 4.0, 4.0);
        let t = mesh
            .raycast(Vec3::new(1.0, 0.5, 1.0), -Vec3::UP, 1.0)
            .expect("hit");
        assert!((t - 0.5).abs() < 1e-6);
        assert!(mesh
            .raycast(Vec3::new(5.0, 0.5, 1.0), -Vec3::UP, 1.0)
            .is_none());
    }

    #[test]
    fn ray_through_shared_diagonal_still_hits() {
        let mesh = floor(0.0, 0.0, 4.0, 4.0);
        assert!(mesh
            .raycast(Vec3::new(2.0, 0.1, 2.0), -Vec3::UP, 0.2)
            .is_some());
    }

    #[test]
    fn quad_boundary_is_its_four_corners() {
        let mesh = floor(0.0, 0.0, 4.0, 4.0);
        let boundary = mesh.boundary_vertices();
        assert_eq!(boundary.len(), 4);
        for corner in mesh.vertices() {
            assert!(boundary.contains(corner));
        }
    }

    #[test]
    fn interior_vertices_are_not_boundary() {
        // 2x2 grid of quads: the centre vertex is shared by all four.
        let mut mesh = floor(0.0, 0.0, 1.0, 1.0);
        for quad in [
            floor(1.0, 0.0, 2.0, 1.0),
            floor(0.0, 1.0, 1.0, 2.0),
            floor(1.0, 1.0, 2.0, 2.0),
        ] {
            mesh.append(&quad).expect("append");
        }

        let boundary = mesh.boundary_vertices();
        assert_eq!(boundary.len(), 8);
        assert!(!boundary.contains(&Vec3::new(1.0, 0.0, 1.0)));
    }

    #[test]
    fn out_of_range_indices_are_rejected() {
        let err = TriMesh::new(vec![Vec3::ZERO; 3], vec![[0, 1, 3]]).unwrap_err();
        assert_eq!(
            err,
            GeometryError::IndexOutOfRange {
                triangle: 0,
                vertex: 3,
                count: 3
            }
        );
    }

    #[test]
    fn append_offsets_indices_past_existing_vertices() {
        let mut mesh = floor(0.0, 0.0, 1.0, 1.0);
        mesh.append(&floor(2.0, 0.0, 3.0, 1.0)).expect("append");
        assert_eq!(mesh.vertices().len(), 8);
        assert_eq!(mesh.triangles()[2], [4, 5, 6]);
        assert_eq!(mesh.triangles()[3], [4, 6, 7]);
    }

    #[test]
    fn index_offsets_past_u32_range_are_rejected() {
        assert_eq!(index_base(4, 4), Ok(4));
        let limit = u32::MAX as usize;
        assert!(matches!(
            index_base(limit, 1),
            Err(GeometryError::TooManyVertices { .. })
        ));
        assert!(matches!(
            offset_triangle([0, 1, u32::MAX - 1], 2),
            Err(GeometryError::TooManyVertices { .. })
        ));
        assert_eq!(offset_triangle([0, 1, 2], 10), Ok([10, 11, 12]));
    }
}
