// Native tests for the formation layout engine. These avoid wasm entirely:
// layouts are pure math over a viewport, so they run under plain `cargo test`.

use dino_dance::Point;
use dino_dance::Viewport;
use dino_dance::game::formation::{Formation, FormationRequest, clear_floor_target, compute_positions};
use dino_dance::game::rand::Rand;

const VP: Viewport = Viewport {
    width: 1280.0,
    height: 800.0,
};

fn request(formation: Formation, count: usize, intensity: u32, jitter: bool) -> FormationRequest {
    FormationRequest {
        formation,
        count,
        intensity,
        viewport: VP,
        jitter,
    }
}

#[test]
fn every_formation_returns_count_points_within_bounds() {
    let mut rng = Rand::new(7);
    for formation in Formation::ALL {
        for count in 1..=12 {
            for intensity in 1..=5 {
                let points = compute_positions(&request(formation, count, intensity, true), &mut rng);
                assert_eq!(points.len(), count, "{} count {}", formation.as_str(), count);
                for p in &points {
                    assert!(
                        p.x >= 50.0 && p.x <= VP.width - 100.0,
                        "{} x {} out of bounds",
                        formation.as_str(),
                        p.x
                    );
                    assert!(
                        p.y >= 50.0 && p.y <= VP.height - 100.0,
                        "{} y {} out of bounds",
                        formation.as_str(),
                        p.y
                    );
                }
            }
        }
    }
}

#[test]
fn zero_count_yields_empty_layout() {
    let mut rng = Rand::new(1);
    for formation in Formation::ALL {
        assert!(compute_positions(&request(formation, 0, 1, true), &mut rng).is_empty());
    }
}

#[test]
fn circle_star_spiral_are_deterministic_without_jitter() {
    for formation in [Formation::Circle, Formation::Star, Formation::Spiral] {
        let a = compute_positions(&request(formation, 8, 2, false), &mut Rand::new(3));
        let b = compute_positions(&request(formation, 8, 2, false), &mut Rand::new(99));
        assert_eq!(a, b, "{} varied without jitter", formation.as_str());
    }
}

#[test]
fn star_alternates_outer_and_inner_radius() {
    // intensity 1 -> scale 1.2, outer radius 156, inner 93.6; nothing clamps
    // at this viewport so radii are exact.
    let points = compute_positions(&request(Formation::Star, 8, 1, false), &mut Rand::new(0));
    let (cx, cy) = (VP.width / 2.0, VP.height / 2.0);
    for (i, p) in points.iter().enumerate() {
        let r = ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt();
        let expected = if i % 2 == 0 { 156.0 } else { 156.0 * 0.6 };
        assert!(
            (r - expected).abs() < 1e-9,
            "index {} radius {} expected {}",
            i,
            r,
            expected
        );
    }
}

#[test]
fn spanning_formations_with_one_item_sit_at_center() {
    let mut rng = Rand::new(5);
    for formation in [Formation::Arc, Formation::Wave, Formation::Heart] {
        let points = compute_positions(&request(formation, 1, 1, false), &mut rng);
        assert_eq!(points, vec![Point { x: 640.0, y: 400.0 }]);
    }
}

#[test]
fn spiral_starts_at_base_radius() {
    let points = compute_positions(&request(Formation::Spiral, 5, 1, true), &mut Rand::new(11));
    // Index 0: angle 0, radius 40 regardless of intensity or jitter.
    assert_eq!(points[0], Point { x: 680.0, y: 400.0 });
}

#[test]
fn tiny_viewport_clamps_everything_into_the_margin_box() {
    let vp = Viewport {
        width: 200.0,
        height: 150.0,
    };
    let mut rng = Rand::new(21);
    for formation in Formation::ALL {
        let points = compute_positions(
            &FormationRequest {
                formation,
                count: 6,
                intensity: 5,
                viewport: vp,
                jitter: true,
            },
            &mut rng,
        );
        for p in points {
            assert!(p.x >= 50.0 && p.x <= 100.0);
            assert_eq!(p.y, 50.0); // height - 100 < 50, lower clamp wins
        }
    }
}

#[test]
fn clear_floor_moves_center_dancers_only() {
    let mut rng = Rand::new(13);
    // Center radius is min(1280, 800) * 0.3 = 240.
    let center = Point { x: 640.0, y: 400.0 };
    let edge = Point { x: 60.0, y: 60.0 };
    assert!(clear_floor_target(center, VP, &mut rng).is_some());
    assert!(clear_floor_target(edge, VP, &mut rng).is_none());

    for _ in 0..32 {
        let target = clear_floor_target(center, VP, &mut rng).expect("center dancer moves");
        // Every edge band lies outside the cleared circle.
        let dist = ((target.x - 640.0).powi(2) + (target.y - 400.0).powi(2)).sqrt();
        assert!(dist >= 240.0, "target {:?} still inside the floor", target);
        assert!(target.x >= 0.0 && target.x <= VP.width);
        assert!(target.y >= 0.0 && target.y <= VP.height);
    }
}
