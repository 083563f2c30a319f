//! Query dispatch: turn a parsed command into a JSON result against a loaded scene.

use anyhow::{bail, Result};
use serde::Serialize;
use serde_json::{json, Value};
use waypath::{
    path_length, BoundaryVertexIndex, MeshRegion, NavConfig, NavigationEngine, Navigator,
    PolygonRegion, RegionGeometry, Vec2, Vec3, VisibilityOutcome, VisibilityTester,
};

use crate::scene::Scene;
use crate::Commands;

/// Comma-separated coordinates as given on the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Coords(pub Vec<f32>);

pub fn parse_coords(s: &str) -> Result<Coords, String> {
    let values = s
        .split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<f32>()
                .map_err(|_| format!("'{part}' is not a number"))
                .and_then(|v| {
                    if v.is_finite() {
                        Ok(v)
                    } else {
                        Err(format!("'{part}' is not finite"))
                    }
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    match values.len() {
        2 | 3 => Ok(Coords(values)),
        n => Err(format!("expected 2 or 3 coordinates, got {n}")),
    }
}

trait FromCoords: Sized {
    const DIM: usize;

    fn from_slice(values: &[f32]) -> Self;

    fn from_coords(coords: &Coords) -> Result<Self> {
        if coords.0.len() != Self::DIM {
            bail!(
                "Expected {} coordinates for this scene, got {}",
                Self::DIM,
                coords.0.len()
            );
        }
        Ok(Self::from_slice(&coords.0))
    }
}

impl FromCoords for Vec2 {
    const DIM: usize = 2;

    fn from_slice(values: &[f32]) -> Self {
        Vec2::new(values[0], values[1])
    }
}

impl FromCoords for Vec3 {
    const DIM: usize = 3;

    fn from_slice(values: &[f32]) -> Self {
        Vec3::new(values[0], values[1], values[2])
    }
}

/// Run `command` against `scene`.
///
/// Open scenes have no region to fix the dimension, so the first coordinate decides
/// between planar and world-space points.
pub fn run(scene: &Scene, command: &Commands) -> Result<Value> {
    match scene {
        Scene::Open(nav) => match leading_coords(command).0.len() {
            2 => run_with::<PolygonRegion>(None, *nav, command),
            _ => run_with::<MeshRegion>(None, *nav, command),
        },
        Scene::Polygon(region, nav) => run_with(Some(region), *nav, command),
        Scene::Mesh(region, nav) => run_with(Some(region), *nav, command),
    }
}

fn leading_coords(command: &Commands) -> &Coords {
    match command {
        Commands::Path { from, .. } | Commands::Check { from, .. } => from,
        Commands::Snap { at } => at,
        Commands::Vertices { near, .. } => near,
    }
}

fn run_with<R>(region: Option<&R>, nav: NavConfig, command: &Commands) -> Result<Value>
where
    R: RegionGeometry,
    R::Point: FromCoords + Serialize,
{
    let engine = match region {
        Some(region) => NavigationEngine::new(region, nav)?,
        None => NavigationEngine::unconstrained(nav)?,
    };

    let value = match command {
        Commands::Path { from, to } => {
            let origin = R::Point::from_coords(from)?;
            let target = R::Point::from_coords(to)?;
            let path = engine.find_path(origin, target);
            tracing::info!(outcome = ?path.outcome, waypoints = path.points.len(), "Path query done");

            let mut walked = Vec::with_capacity(path.points.len() + 1);
            walked.push(origin);
            walked.extend_from_slice(&path.points);
            json!({
                "outcome": path.outcome,
                "points": path.points,
                "length": path_length(&walked),
            })
        }
        Commands::Snap { at } => {
            let point = R::Point::from_coords(at)?;
            let snapped = engine.nearest_point(point).unwrap_or(point);
            json!({
                "point": snapped,
                "moved": snapped != point,
            })
        }
        Commands::Vertices { near, limit } => {
            let Some(region) = region else {
                bail!("Scene has no region, so there are no boundary vertices to rank");
            };
            let reference = R::Point::from_coords(near)?;
            let mut ranked = BoundaryVertexIndex::new(region).ranked_vertices(reference);
            if let Some(limit) = limit {
                ranked.truncate(*limit);
            }
            json!({ "vertices": ranked })
        }
        Commands::Check {
            from,
            to,
            ignore_foreign,
        } => {
            let a = R::Point::from_coords(from)?;
            let b = R::Point::from_coords(to)?;
            let outcome = match region {
                Some(region) => VisibilityTester::new(region, &nav).outcome(a, b, *ignore_foreign),
                None => VisibilityOutcome::Clear,
            };
            let hit = engine.raycast(a, b);
            json!({
                "outcome": outcome,
                "clear": outcome.is_clear(),
                "break": hit.map(|hit| hit.point),
            })
        }
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypath::Contour;

    fn room() -> Scene {
        let region = PolygonRegion::new(Contour::rect(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0)))
            .expect("outer");
        Scene::Polygon(region, NavConfig::default())
    }

    fn coords(values: &[f32]) -> Coords {
        Coords(values.to_vec())
    }

    #[test]
    fn parses_planar_and_world_coordinates() {
        assert_eq!(parse_coords("1,2"), Ok(Coords(vec![1.0, 2.0])));
        assert_eq!(parse_coords(" 1.5, 0 ,-2"), Ok(Coords(vec![1.5, 0.0, -2.0])));
    }

    #[test]
    fn rejects_malformed_coordinates() {
        assert!(parse_coords("1").is_err());
        assert!(parse_coords("1,2,3,4").is_err());
        assert!(parse_coords("1,x").is_err());
        assert!(parse_coords("1,inf").is_err());
        assert!(parse_coords("").is_err());
    }

    #[test]
    fn direct_path_in_open_room() {
        let command = Commands::Path {
            from: coords(&[1.0, 1.0]),
            to: coords(&[9.0, 1.0]),
        };
        let value = run(&room(), &command).expect("path query");
        assert_eq!(value["outcome"], "direct");
        assert_eq!(value["points"], json!([{ "x": 9.0, "y": 1.0 }]));
        assert_eq!(value["length"], 8.0);
    }

    #[test]
    fn snap_moves_outside_point_to_nearest_vertex() {
        let command = Commands::Snap {
            at: coords(&[12.0, 3.0]),
        };
        let value = run(&room(), &command).expect("snap query");
        assert_eq!(value["point"], json!({ "x": 10.0, "y": 0.0 }));
        assert_eq!(value["moved"], true);
    }

    #[test]
    fn vertices_respect_limit() {
        let command = Commands::Vertices {
            near: coords(&[1.0, 1.0]),
            limit: Some(2),
        };
        let value = run(&room(), &command).expect("vertices query");
        let vertices = value["vertices"].as_array().expect("array");
        assert_eq!(vertices.len(), 2);
        assert_eq!(vertices[0]["vertex"], json!({ "x": 0.0, "y": 0.0 }));
    }

    #[test]
    fn open_scene_walks_straight_in_either_dimension() {
        let scene = Scene::Open(NavConfig::default());
        let planar = run(
            &scene,
            &Commands::Path {
                from: coords(&[0.0, 0.0]),
                to: coords(&[3.0, 4.0]),
            },
        )
        .expect("planar query");
        assert_eq!(planar["outcome"], "unconstrained");
        assert_eq!(planar["length"], 5.0);

        let world = run(
            &scene,
            &Commands::Path {
                from: coords(&[0.0, 0.0, 0.0]),
                to: coords(&[0.0, 2.0, 0.0]),
            },
        )
        .expect("world query");
        assert_eq!(world["points"], json!([{ "x": 0.0, "y": 2.0, "z": 0.0 }]));

        let err = run(
            &scene,
            &Commands::Vertices {
                near: coords(&[0.0, 0.0]),
                limit: None,
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("no region"));
    }

    #[test]
    fn mismatched_dimension_is_an_error() {
        let command = Commands::Check {
            from: coords(&[1.0, 0.0, 1.0]),
            to: coords(&[2.0, 0.0, 2.0]),
            ignore_foreign: false,
        };
        assert!(run(&room(), &command).is_err());
    }

    #[test]
    fn check_reports_blocked_segment() {
        let region = PolygonRegion::new(Contour::rect(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0)))
            .expect("outer")
            .with_hole(Contour::rect(Vec2::new(4.0, 0.0), Vec2::new(6.0, 8.0)))
            .expect("hole");
        let scene = Scene::Polygon(region, NavConfig::default());
        let command = Commands::Check {
            from: coords(&[1.0, 1.0]),
            to: coords(&[9.0, 1.0]),
            ignore_foreign: false,
        };
        let value = run(&scene, &command).expect("check query");
        assert_eq!(value["outcome"], "blocked_by_region");
        assert_eq!(value["clear"], false);
        assert_eq!(value["break"], Value::Null);
    }
}
