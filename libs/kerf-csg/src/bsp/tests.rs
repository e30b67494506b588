use super::*;
use approx::assert_relative_eq;
use kerf_geom::primitives;

/// Axis-aligned cube of edge 2 centred on the origin, shifted by `x`.
fn cube_at(x: f64) -> Mesh {
    primitives::cube(DVec3::splat(2.0))
        .unwrap()
        .translated(DVec3::new(x, 0.0, 0.0))
}

#[test]
fn union_of_overlapping_cubes_merges_the_volumes() {
    let backend = BspBackend::new();
    let merged = backend.union(&[cube_at(0.0), cube_at(1.0)]).unwrap();

    // 8 + 8 minus the 1 x 2 x 2 overlap.
    assert_relative_eq!(merged.signed_volume(), 12.0, epsilon = 1e-9);
}

#[test]
fn union_of_disjoint_cubes_keeps_both() {
    let backend = BspBackend::new();
    let merged = backend.union(&[cube_at(0.0), cube_at(5.0)]).unwrap();
    assert_relative_eq!(merged.signed_volume(), 16.0, epsilon = 1e-9);
}

#[test]
fn union_with_an_empty_operand_is_identity() {
    let backend = BspBackend::new();
    let merged = backend.union(&[cube_at(0.0), Mesh::empty()]).unwrap();
    assert_relative_eq!(merged.signed_volume(), 8.0, epsilon = 1e-9);

    let alone = backend.union(&[cube_at(0.0)]).unwrap();
    assert_eq!(alone, cube_at(0.0));
}

#[test]
fn subtract_carves_the_overlap_out_of_the_base() {
    let backend = BspBackend::new();
    let cut = backend.subtract(&cube_at(0.0), &cube_at(1.0)).unwrap();
    assert_relative_eq!(cut.signed_volume(), 4.0, epsilon = 1e-9);

    let untouched = backend.subtract(&cube_at(0.0), &cube_at(5.0)).unwrap();
    assert_relative_eq!(untouched.signed_volume(), 8.0, epsilon = 1e-9);
}

#[test]
fn intersect_keeps_only_the_overlap() {
    let backend = BspBackend::new();
    let overlap = backend.intersect(&[cube_at(0.0), cube_at(1.0)]).unwrap();
    assert_relative_eq!(overlap.signed_volume(), 4.0, epsilon = 1e-9);

    let apart = backend.intersect(&[cube_at(0.0), cube_at(5.0)]).unwrap();
    assert!(apart.is_empty());
}

#[test]
fn empty_operand_lists_are_rejected() {
    let backend = BspBackend::new();
    assert_eq!(
        backend.union(&[]).map(|_| ()),
        Err(CsgError::EmptyOperands { operation: "union" })
    );
    assert_eq!(
        backend.intersect(&[]).map(|_| ()),
        Err(CsgError::EmptyOperands { operation: "intersect" })
    );
    assert_eq!(
        backend.hull(&[]).map(|_| ()),
        Err(CsgError::EmptyOperands { operation: "hull" })
    );
}

#[test]
fn hull_bridges_separate_solids() {
    let backend = BspBackend::new();
    let a = primitives::cube(DVec3::splat(1.0)).unwrap();
    let b = a.translated(DVec3::new(3.0, 0.0, 0.0));

    let hull = backend.hull(&[a, b]).unwrap();

    // The hull of both cubes is the 4 x 1 x 1 box spanning them.
    assert_relative_eq!(hull.signed_volume(), 4.0, epsilon = 1e-9);
    let (min, max) = hull.bounds().unwrap();
    assert_eq!(min, DVec3::new(-0.5, -0.5, -0.5));
    assert_eq!(max, DVec3::new(3.5, 0.5, 0.5));
}
