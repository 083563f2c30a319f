//! Region geometry primitives: points, contours, meshes and containment probes.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod contour;
pub mod error;
pub mod math;
pub mod mesh;
pub mod polygon;
pub mod region;

pub use contour::Contour;
pub use error::{GeometryError, Result};
pub use math::{NavPoint, Vec2, Vec3};
pub use mesh::{MeshRegion, TriMesh};
pub use polygon::PolygonRegion;
pub use region::{Probe, ProbeHit, RegionGeometry};
