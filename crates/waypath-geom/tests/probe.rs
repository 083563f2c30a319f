use waypath_geom::{
    Contour, MeshRegion, PolygonRegion, Probe, ProbeHit, RegionGeometry, TriMesh, Vec2, Vec3,
};

const EXTENT: f32 = 0.01;

fn respect() -> Probe {
    Probe::new(EXTENT, false)
}

fn ignore() -> Probe {
    Probe::new(EXTENT, true)
}

fn holed_square() -> PolygonRegion {
    PolygonRegion::new(Contour::rect(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0)))
        .expect("outer")
        .with_hole(Contour::rect(Vec2::new(4.0, 4.0), Vec2::new(6.0, 6.0)))
        .expect("hole")
}

#[test]
fn polygon_probe_classifies_interior_hole_and_outside() {
    let region = holed_square();
    assert_eq!(region.probe(Vec2::new(2.0, 2.0), respect()), ProbeHit::Region);
    assert_eq!(region.probe(Vec2::new(5.0, 5.0), respect()), ProbeHit::Empty);
    assert_eq!(region.probe(Vec2::new(11.0, 5.0), respect()), ProbeHit::Empty);
}

#[test]
fn polygon_edges_and_hole_corners_are_walkable() {
    let region = holed_square();
    for p in [
        Vec2::new(0.0, 0.0),
        Vec2::new(10.0, 3.0),
        Vec2::new(4.0, 4.0),
        Vec2::new(6.0, 5.0),
    ] {
        assert_eq!(region.probe(p, respect()), ProbeHit::Region, "{p}");
    }
}

#[test]
fn polygon_obstacles_are_foreign_unless_masked() {
    let region = holed_square()
        .with_obstacle(Contour::rect(Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0)))
        .expect("obstacle");
    let p = Vec2::new(1.5, 1.5);
    assert_eq!(region.probe(p, respect()), ProbeHit::Foreign);
    assert_eq!(region.probe(p, ignore()), ProbeHit::Region);

    // Obstacle corners are not steering vertices.
    assert_eq!(region.vertices().len(), 8);
}

#[test]
fn polygon_vertices_list_outer_then_holes() {
    let region = holed_square();
    let v = region.vertices();
    assert_eq!(v[0], Vec2::new(0.0, 0.0));
    assert_eq!(v[3], Vec2::new(0.0, 10.0));
    assert_eq!(v[4], Vec2::new(4.0, 4.0));
}

#[test]
fn empty_polygon_region_never_contains_anything() {
    let region = PolygonRegion::empty();
    assert!(region.vertices().is_empty());
    assert_eq!(region.probe(Vec2::ZERO, respect()), ProbeHit::Empty);
}

#[test]
fn non_finite_contours_are_rejected() {
    let result = PolygonRegion::new(vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(f32::NAN, 0.0),
        Vec2::new(1.0, 1.0),
    ]);
    assert!(result.is_err());
}

fn floor() -> TriMesh {
    TriMesh::quad([
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(10.0, 0.0, 0.0),
        Vec3::new(10.0, 0.0, 10.0),
        Vec3::new(0.0, 0.0, 10.0),
    ])
}

#[test]
fn mesh_probe_resolves_floor_and_void() {
    let region = MeshRegion::new(floor());
    assert_eq!(
        region.probe(Vec3::new(3.0, 0.0, 3.0), respect()),
        ProbeHit::Region
    );
    assert_eq!(
        region.probe(Vec3::new(0.0, 0.0, 10.0), respect()),
        ProbeHit::Region
    );
    assert_eq!(
        region.probe(Vec3::new(12.0, 0.0, 3.0), respect()),
        ProbeHit::Empty
    );
    // Well above the floor the short probe no longer reaches it.
    assert_eq!(
        region.probe(Vec3::new(3.0, 1.0, 3.0), respect()),
        ProbeHit::Empty
    );
}

#[test]
fn mesh_obstacle_resting_on_floor_wins_the_probe() {
    let region = MeshRegion::new(floor()).with_obstacle(TriMesh::cuboid(
        Vec3::new(4.0, 0.0, 4.0),
        Vec3::new(6.0, 2.0, 6.0),
    ));
    let p = Vec3::new(5.0, 0.0, 5.0);
    assert_eq!(region.probe(p, respect()), ProbeHit::Foreign);
    assert_eq!(region.probe(p, ignore()), ProbeHit::Region);
    assert_eq!(
        region.probe(Vec3::new(7.0, 0.0, 5.0), respect()),
        ProbeHit::Region
    );
}
