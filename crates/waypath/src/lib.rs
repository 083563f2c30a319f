//! Point-to-point pathfinding over a navigable region.
//!
//! The engine snaps both endpoints onto the region, takes the straight segment when it is
//! clear, and otherwise walks greedily between boundary vertices, with a second
//! obstacle-ignoring pass toward the first obstruction when that fails. Containment and
//! visibility are sampled, not exact. Results are always some usable path, possibly a single
//! point.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod config;
pub mod containment;
pub mod engine;
pub mod error;
pub mod greedy;
pub mod navigator;
pub mod obstruction;
pub mod ranking;
pub mod simplify;
pub mod snap;
pub mod visibility;

pub use config::NavConfig;
pub use containment::ContainmentTester;
pub use engine::NavigationEngine;
pub use error::{NavError, Result};
pub use greedy::{GreedyOutcome, GreedyPathBuilder, PathQuery};
pub use navigator::{path_length, NavPath, NavRaycastHit, Navigator, PathOutcome};
pub use obstruction::ObstructionLocator;
pub use ranking::{BoundaryVertexIndex, RankedVertex, VertexId};
pub use simplify::PathSimplifier;
pub use snap::RegionSnapper;
pub use visibility::{VisibilityOutcome, VisibilityTester};

pub use waypath_geom as geom;
pub use waypath_geom::{
    Contour, MeshRegion, NavPoint, PolygonRegion, Probe, ProbeHit, RegionGeometry, TriMesh, Vec2,
    Vec3,
};
