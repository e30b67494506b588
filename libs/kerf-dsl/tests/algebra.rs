//! Vector-algebra identities through the public macro surface.

use glam::{DVec2, DVec3};
use kerf_dsl::{vecexpr, DslError, SemanticError, VecValue};

#[test]
fn translation_and_scaling_identities() {
    let shifted = vecexpr!("{} + (0, 1, 0)", DVec3::new(1.0, 0.0, 0.0)).unwrap();
    assert_eq!(shifted, VecValue::Vec3(DVec3::new(1.0, 1.0, 0.0)));

    let doubled = vecexpr!("2 * {}", DVec3::ONE).unwrap();
    assert_eq!(doubled, VecValue::Vec3(DVec3::splat(2.0)));
}

#[test]
fn unit_factors_and_zero_offsets_are_exact() {
    let awkward = DVec3::new(0.1, 0.2, 0.3);
    assert_eq!(vecexpr!("1 * {}", awkward).unwrap(), VecValue::Vec3(awkward));
    assert_eq!(
        vecexpr!("{} + (0, 0, 0)", awkward).unwrap(),
        VecValue::Vec3(awkward)
    );
}

#[test]
fn precedence_matches_written_arithmetic() {
    let tight = vecexpr!("(1, 2) + (3, 4) * 2").unwrap();
    assert_eq!(tight, VecValue::Vec2(DVec2::new(7.0, 10.0)));

    let grouped = vecexpr!("((1, 2) + (3, 4)) * 2").unwrap();
    assert_eq!(grouped, VecValue::Vec2(DVec2::new(8.0, 12.0)));
}

#[test]
fn failures_keep_their_class() {
    let mismatch = vecexpr!("{} + {}", DVec2::X, 1.0);
    assert_eq!(
        mismatch,
        Err(DslError::Semantic(SemanticError::Undefined {
            operator: "+",
            left: "vec2",
            right: "number",
        }))
    );

    let dangling = vecexpr!("(1, 2");
    assert!(matches!(dangling, Err(DslError::Parse(_))));
}
