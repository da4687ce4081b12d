// Native tests for the tiny-dancer pile allocator.

use dino_dance::Point;
use dino_dance::Viewport;
use dino_dance::game::pile::next_pile_position;
use dino_dance::game::rand::Rand;

const VP: Viewport = Viewport {
    width: 1280.0,
    height: 800.0,
};
const BASE: f64 = 800.0 - 35.0;

#[test]
fn first_dancer_lands_on_the_ground_near_center() {
    let mut rng = Rand::new(42);
    for _ in 0..16 {
        let p = next_pile_position(&[], VP, &mut rng);
        assert_eq!(p.y, BASE);
        assert!((p.x - 640.0).abs() <= 75.0, "x {} outside initial spread", p.x);
    }
}

#[test]
fn sparse_pile_keeps_spreading_at_ground_level() {
    // Three dancers in one column is below the crowding threshold, so every
    // new arrival stays on the baseline.
    let history = vec![
        Point { x: 640.0, y: BASE },
        Point { x: 645.0, y: BASE },
        Point { x: 650.0, y: BASE },
    ];
    let mut rng = Rand::new(9);
    for _ in 0..32 {
        let p = next_pile_position(&history, VP, &mut rng);
        assert_eq!(p.y, BASE);
    }
}

#[test]
fn dense_carpet_starts_stacking() {
    // A carpet covering the whole spread guarantees every trial column is
    // crowded (7 dancers within 35px) with sub-cluster entries within 18px,
    // so the next dancer stacks exactly one level up.
    let mut history = Vec::new();
    let mut x = 200.0;
    while x <= 1100.0 {
        history.push(Point { x, y: BASE });
        x += 10.0;
    }
    let mut rng = Rand::new(77);
    for _ in 0..32 {
        let p = next_pile_position(&history, VP, &mut rng);
        assert_eq!(p.y, BASE - 18.0);
    }
}

#[test]
fn output_never_sinks_below_the_baseline() {
    let mut history = Vec::new();
    let mut rng = Rand::new(5);
    for _ in 0..200 {
        let p = next_pile_position(&history, VP, &mut rng);
        assert!(p.y <= BASE);
        history.push(p);
    }
}
