//! Scene file loading.
//!
//! A scene names the active region (or none) and the sampling config. YAML and JSON are
//! both accepted; the file extension picks the parser.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use waypath::{Contour, MeshRegion, NavConfig, PolygonRegion, TriMesh, Vec2, Vec3};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneFile {
    /// Sampling config; omitted fields take their defaults.
    #[serde(default)]
    pub nav: NavConfig,

    /// Active region. Absent means queries are unconstrained.
    #[serde(default)]
    pub region: Option<RegionSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegionSpec {
    Polygon {
        outer: Vec<[f32; 2]>,
        #[serde(default)]
        holes: Vec<Vec<[f32; 2]>>,
        #[serde(default)]
        obstacles: Vec<Vec<[f32; 2]>>,
    },
    Mesh {
        surface: MeshSpec,
        #[serde(default)]
        obstacles: Vec<ObstacleSpec>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshSpec {
    pub vertices: Vec<[f32; 3]>,
    pub triangles: Vec<[u32; 3]>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ObstacleSpec {
    Mesh {
        vertices: Vec<[f32; 3]>,
        triangles: Vec<[u32; 3]>,
    },
    Cuboid {
        min: [f32; 3],
        max: [f32; 3],
    },
}

/// A loaded, validated scene.
#[derive(Debug, Clone)]
pub enum Scene {
    Open(NavConfig),
    Polygon(PolygonRegion, NavConfig),
    Mesh(MeshRegion, NavConfig),
}

impl Scene {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene file {}", path.display()))?;
        let file = parse(path, &text)?;
        Self::from_file(file).with_context(|| format!("Invalid scene in {}", path.display()))
    }

    pub fn from_file(file: SceneFile) -> Result<Self> {
        file.nav.validate()?;
        let nav = file.nav;
        let scene = match file.region {
            None => Scene::Open(nav),
            Some(RegionSpec::Polygon {
                outer,
                holes,
                obstacles,
            }) => {
                let mut region = PolygonRegion::new(contour(&outer))?;
                for hole in &holes {
                    region = region.with_hole(contour(hole))?;
                }
                for obstacle in &obstacles {
                    region = region.with_obstacle(contour(obstacle))?;
                }
                Scene::Polygon(region, nav)
            }
            Some(RegionSpec::Mesh { surface, obstacles }) => {
                let mut region = MeshRegion::new(tri_mesh(surface.vertices, surface.triangles)?);
                for obstacle in obstacles {
                    let mesh = match obstacle {
                        ObstacleSpec::Mesh {
                            vertices,
                            triangles,
                        } => tri_mesh(vertices, triangles)?,
                        ObstacleSpec::Cuboid { min, max } => {
                            let cuboid = TriMesh::cuboid(Vec3::from(min), Vec3::from(max));
                            tri_mesh(cuboid.vertices().to_vec(), cuboid.triangles().to_vec())?
                        }
                    };
                    region = region.with_obstacle(mesh);
                }
                Scene::Mesh(region, nav)
            }
        };
        Ok(scene)
    }

    pub fn config(&self) -> NavConfig {
        match self {
            Scene::Open(nav) | Scene::Polygon(_, nav) | Scene::Mesh(_, nav) => *nav,
        }
    }
}

fn parse(path: &Path, text: &str) -> Result<SceneFile> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    match ext.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(text).context("Failed to parse YAML scene"),
        "json" => serde_json::from_str(text).context("Failed to parse JSON scene"),
        other => bail!("Unsupported scene extension {other:?} (expected .yaml, .yml or .json)"),
    }
}

fn contour(points: &[[f32; 2]]) -> Contour {
    Contour::new(points.iter().copied().map(Vec2::from).collect())
}

fn tri_mesh(vertices: Vec<impl Into<Vec3>>, triangles: Vec<[u32; 3]>) -> Result<TriMesh> {
    Ok(TriMesh::new(
        vertices.into_iter().map(Into::into).collect(),
        triangles,
    )?)
}
