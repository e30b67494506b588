//! Tests for grain validation, derivation, and the scoped override.

use super::*;

/// Validates the constructor rejects unusable chord sizes.
#[test]
fn new_validates_inputs() {
    assert!(Grain::new(0.2).is_ok());
    assert_eq!(
        Grain::new(0.0).unwrap_err(),
        ConfigError::InvalidGrain(0.0)
    );
    assert!(Grain::new(-1.0).is_err());
    assert!(Grain::new(f64::INFINITY).is_err());
}

/// Segment counts shrink with coarser grain and clamp at the floor.
#[test]
fn segments_follow_chord_length() {
    let fine = Grain { size: 0.1 };
    let coarse = Grain { size: 1.0 };
    assert!(fine.segments(1.0) > coarse.segments(1.0));
    // TAU / 0.1 = 62.83..., so 63 chords cover the unit circle
    assert_eq!(fine.segments(1.0), 63);
    assert_eq!(coarse.segments(0.0), MIN_SEGMENTS);
    assert_eq!(Grain { size: 1.0e-9 }.segments(10.0), MAX_SEGMENTS);
}

/// Sample counts cover the path at grain spacing with a floor of two.
#[test]
fn samples_cover_the_path() {
    let grain = Grain { size: 0.5 };
    assert_eq!(grain.samples(0.0), 2);
    assert_eq!(grain.samples(0.1), 2);
    assert_eq!(grain.samples(2.0), 5);
}

/// A scope installs its grain and restores the previous value on drop,
/// including when dropped through sequential scopes.
#[test]
fn scoped_override_restores_previous_value() {
    let entry = ambient();
    let override_a = Grain { size: entry.size * 0.5 };
    let override_b = Grain { size: entry.size * 0.25 };
    {
        let _scope = scoped(override_a);
        assert_eq!(ambient(), override_a);
    }
    assert_eq!(ambient(), entry);
    {
        let _outer = scoped(override_b);
        assert_eq!(ambient(), override_b);
    }
    assert_eq!(ambient(), entry);
}
