// Native tests for the theme rotation state machine.

use dino_dance::THEME_SETS;
use dino_dance::game::rand::Rand;
use dino_dance::game::theme::ThemeRotator;

#[test]
fn rotates_exactly_at_the_threshold() {
    let mut rng = Rand::new(1);
    let mut rotator = ThemeRotator::with_threshold(8);

    for i in 1..=7 {
        assert!(!rotator.record_placement(&mut rng), "rotated early at {}", i);
        assert_eq!(rotator.set_index(), 0);
        assert_eq!(rotator.placements_in_set(), i);
    }

    assert!(rotator.record_placement(&mut rng));
    assert_eq!(rotator.set_index(), 1);
    assert_eq!(rotator.placements_in_set(), 0);
    assert!((6..=12).contains(&rotator.threshold()));

    // Four more placements never re-rotate (fresh threshold is at least 6).
    for _ in 0..4 {
        assert!(!rotator.record_placement(&mut rng));
    }
    assert_eq!(rotator.set_index(), 1);
    assert_eq!(rotator.placements_in_set(), 4);
}

#[test]
fn advance_wraps_around_the_set_list() {
    let mut rng = Rand::new(3);
    let mut rotator = ThemeRotator::new(&mut rng);
    for _ in 0..THEME_SETS.len() {
        rotator.advance(&mut rng);
    }
    assert_eq!(rotator.set_index(), 0);
}

#[test]
fn reset_returns_to_the_first_set_with_a_fresh_threshold() {
    let mut rng = Rand::new(17);
    let mut rotator = ThemeRotator::with_threshold(6);
    for _ in 0..9 {
        rotator.record_placement(&mut rng);
    }
    rotator.reset(&mut rng);
    assert_eq!(rotator.set_index(), 0);
    assert_eq!(rotator.placements_in_set(), 0);
    assert!((6..=12).contains(&rotator.threshold()));
}

#[test]
fn fresh_thresholds_stay_in_range() {
    let mut rng = Rand::new(1234);
    let mut rotator = ThemeRotator::new(&mut rng);
    for _ in 0..200 {
        assert!((6..=12).contains(&rotator.threshold()));
        rotator.advance(&mut rng);
    }
}
