use super::*;
use approx::assert_relative_eq;
use glam::DVec3;
use kerf_geom::predicates;

#[test]
fn outline_skips_interior_and_edge_points() {
    let points = [
        DVec2::new(0.0, 0.0),
        DVec2::new(2.0, 0.0),
        DVec2::new(2.0, 2.0),
        DVec2::new(0.0, 2.0),
        // Inside and on an edge; neither is a corner.
        DVec2::new(1.0, 1.0),
        DVec2::new(1.0, 0.0),
    ];
    let outline = convex_outline(&points).unwrap();

    assert_eq!(outline.points().len(), 4);
    assert_relative_eq!(predicates::signed_area(outline.points()), 4.0);
}

#[test]
fn outline_is_counter_clockwise_regardless_of_input_order() {
    let points = [
        DVec2::new(3.0, 3.0),
        DVec2::new(0.0, 0.0),
        DVec2::new(0.0, 3.0),
        DVec2::new(3.0, 0.0),
    ];
    let outline = convex_outline(&points).unwrap();
    assert!(predicates::signed_area(outline.points()) > 0.0);
}

#[test]
fn outline_rejects_collinear_points() {
    let points = [
        DVec2::new(0.0, 0.0),
        DVec2::new(1.0, 1.0),
        DVec2::new(2.0, 2.0),
        DVec2::new(3.0, 3.0),
    ];
    assert_eq!(
        convex_outline(&points),
        Err(GeomError::degenerate("hull points are collinear"))
    );

    assert_eq!(
        convex_outline(&[DVec2::ZERO, DVec2::X]),
        Err(GeomError::degenerate(
            "hull needs at least three distinct points"
        ))
    );
}

#[test]
fn hull_of_a_tetrahedron_is_the_tetrahedron() {
    let points = [
        DVec3::ZERO,
        DVec3::X,
        DVec3::Y,
        DVec3::Z,
    ];
    let mesh = convex_hull(&points).unwrap();

    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.face_count(), 4);
    // Outward winding gives the positive corner-simplex volume.
    assert_relative_eq!(mesh.signed_volume(), 1.0 / 6.0, epsilon = 1e-12);
}

#[test]
fn hull_of_a_cube_ignores_interior_points() {
    let mut points = vec![
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(1.0, 1.0, 0.0),
        DVec3::new(0.0, 1.0, 0.0),
        DVec3::new(0.0, 0.0, 1.0),
        DVec3::new(1.0, 0.0, 1.0),
        DVec3::new(1.0, 1.0, 1.0),
        DVec3::new(0.0, 1.0, 1.0),
    ];
    points.push(DVec3::splat(0.5));
    points.push(DVec3::new(0.25, 0.75, 0.5));

    let mesh = convex_hull(&points).unwrap();
    assert_eq!(mesh.vertex_count(), 8);
    assert_eq!(mesh.face_count(), 12);
    assert_relative_eq!(mesh.signed_volume(), 1.0, epsilon = 1e-12);
}

#[test]
fn spatial_hull_rejects_flat_clouds() {
    let coplanar = [
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(1.0, 1.0, 0.0),
        DVec3::new(0.0, 1.0, 0.0),
    ];
    assert_eq!(
        convex_hull(&coplanar),
        Err(GeomError::degenerate("hull points are coplanar"))
    );

    assert_eq!(
        convex_hull(&[DVec3::ZERO, DVec3::X, DVec3::Y]),
        Err(GeomError::degenerate(
            "hull needs at least four distinct points"
        ))
    );
}
