// Native tests for the spawn plans: step counts, stagger timing, and the
// musical scaling of size and speed.

use dino_dance::game::rand::Rand;
use dino_dance::game::sequence::{burst_plan, celebration_plan, dance_party_plan, SpawnAction};
use dino_dance::game::theme::THEME_SETS;
use dino_dance::game::Viewport;

const VP: Viewport = Viewport {
    width: 1280.0,
    height: 800.0,
};

const GLYPHS: &[&str] = &["🦕", "🦖", "🦴"];

#[test]
fn base_party_uses_five_dancers_at_default_pace() {
    let mut rng = Rand::new(7);
    let plan = dance_party_plan(THEME_SETS[0].glyphs, 1, VP, &mut rng);

    assert!(plan.formation.is_some());
    assert_eq!(plan.steps.len(), 5);
    for (i, step) in plan.steps.iter().enumerate() {
        assert_eq!(step.delay_ms, i as u32 * 150);
        match step.action {
            SpawnAction::Dancer {
                font_px,
                animation_secs,
                musical_intensity,
                ..
            } => {
                assert_eq!(font_px, 80);
                assert_eq!(animation_secs, 0.8);
                assert_eq!(musical_intensity, None);
            }
            _ => panic!("party plans spawn dancers only"),
        }
    }
}

#[test]
fn musical_party_scales_count_size_and_speed() {
    let mut rng = Rand::new(7);
    let plan = dance_party_plan(THEME_SETS[0].glyphs, 5, VP, &mut rng);

    // 5 + 4*3 = 17, capped at 12.
    assert_eq!(plan.steps.len(), 12);
    for (i, step) in plan.steps.iter().enumerate() {
        // 200 - 12*10 = 80, already at the floor.
        assert_eq!(step.delay_ms, i as u32 * 80);
        match step.action {
            SpawnAction::Dancer {
                font_px,
                animation_secs,
                musical_intensity,
                ..
            } => {
                assert_eq!(font_px, 120);
                assert!((animation_secs - 0.3).abs() < 1e-9);
                assert_eq!(musical_intensity, Some(5));
            }
            _ => panic!("party plans spawn dancers only"),
        }
    }
}

#[test]
fn party_glyphs_cycle_through_the_set() {
    let mut rng = Rand::new(42);
    let plan = dance_party_plan(GLYPHS, 4, VP, &mut rng);

    assert_eq!(plan.steps.len(), (3 + 3 * 3).min(12));
    for (i, step) in plan.steps.iter().enumerate() {
        match step.action {
            SpawnAction::Dancer { glyph, .. } => assert_eq!(glyph, GLYPHS[i % GLYPHS.len()]),
            _ => panic!("party plans spawn dancers only"),
        }
    }
}

#[test]
fn party_positions_stay_on_screen() {
    for seed in 0..20 {
        let mut rng = Rand::new(seed);
        let plan = dance_party_plan(THEME_SETS[1].glyphs, 3, VP, &mut rng);
        for step in &plan.steps {
            if let SpawnAction::Dancer { x, y, .. } = step.action {
                assert!((50.0..=VP.width - 100.0).contains(&x));
                assert!((50.0..=VP.height - 100.0).contains(&y));
            }
        }
    }
}

#[test]
fn celebration_rains_eight_tiny_dancers() {
    let mut rng = Rand::new(11);
    let set = &THEME_SETS[2];
    let plan = celebration_plan(set, VP, &mut rng);

    assert!(plan.formation.is_none());
    assert_eq!(plan.steps.len(), 8);
    for (i, step) in plan.steps.iter().enumerate() {
        assert_eq!(step.delay_ms, i as u32 * 300);
        match step.action {
            SpawnAction::TinyDancer { glyph, start_x } => {
                assert!(set.glyphs.contains(&glyph));
                assert!((0.0..VP.width).contains(&start_x));
            }
            _ => panic!("celebrations spawn tiny dancers only"),
        }
    }
}

#[test]
fn burst_stamps_five_random_placements() {
    let mut rng = Rand::new(3);
    let plan = burst_plan(VP, &mut rng);

    assert_eq!(plan.steps.len(), 5);
    for (i, step) in plan.steps.iter().enumerate() {
        assert_eq!(step.delay_ms, i as u32 * 100);
        match step.action {
            SpawnAction::Plant { x, y } => {
                assert!((30.0..=VP.width - 30.0).contains(&x));
                assert!((30.0..=VP.height - 30.0).contains(&y));
            }
            _ => panic!("bursts plant regular dancers only"),
        }
    }
}
