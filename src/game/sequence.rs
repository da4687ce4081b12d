//! Spawn sequencing: batch operations are described as plain data (a list
//! of (delay, action) steps) and handed to the DOM layer for execution.
//! Keeping the plans pure keeps all counting/placement math testable and
//! leaves timer juggling entirely to the presentation side.

use super::formation::{self, Formation, FormationRequest};
use super::rand::Rand;
use super::theme;
use super::Viewport;

/// One scheduled spawn.
#[derive(Clone, Debug)]
pub struct SpawnStep {
    pub delay_ms: u32,
    pub action: SpawnAction,
}

#[derive(Clone, Debug)]
pub enum SpawnAction {
    /// Stamp a regular placement at a point (right-click bursts).
    Plant { x: f64, y: f64 },
    /// A big dance-party dancer at a formation position.
    Dancer {
        glyph: &'static str,
        x: f64,
        y: f64,
        font_px: u32,
        animation_secs: f64,
        musical_intensity: Option<u32>,
    },
    /// A tiny celebration dancer falling from the top edge; its landing spot
    /// is resolved against the live pile history when the step fires.
    TinyDancer { glyph: &'static str, start_x: f64 },
}

/// An ordered batch of spawns. Steps are independent timer callbacks; once
/// scheduled they are fire-and-forget.
#[derive(Clone, Debug, Default)]
pub struct SpawnPlan {
    /// Formation used, when the plan is a formation party (for logging).
    pub formation: Option<Formation>,
    pub steps: Vec<SpawnStep>,
}

const PARTY_BASE_COUNT: usize = 5;
const PARTY_MAX_COUNT: usize = 12;
const PARTY_STEP_MS: u32 = 150;
const CELEBRATION_COUNT: usize = 8;
const CELEBRATION_STEP_MS: u32 = 300;
const BURST_COUNT: usize = 5;
const BURST_STEP_MS: u32 = 100;

// Higher intensities prefer the most celebratory figures.
const INTENSE_FORMATIONS: [Formation; 4] = [
    Formation::Heart,
    Formation::Star,
    Formation::Spiral,
    Formation::Circle,
];
const LIVELY_FORMATIONS: [Formation; 5] = [
    Formation::Diamond,
    Formation::Heart,
    Formation::Star,
    Formation::Wave,
    Formation::Circle,
];

fn pick_formation(intensity: u32, rng: &mut Rand) -> Formation {
    if intensity >= 4 {
        INTENSE_FORMATIONS[rng.index(INTENSE_FORMATIONS.len())]
    } else if intensity >= 3 {
        LIVELY_FORMATIONS[rng.index(LIVELY_FORMATIONS.len())]
    } else {
        Formation::ALL[rng.index(Formation::ALL.len())]
    }
}

/// Dance-party demonstration: up to five dancers at intensity 1, scaling to
/// twelve for a musical party, arranged in a randomly chosen formation.
pub fn dance_party_plan(
    glyphs: &'static [&'static str],
    intensity: u32,
    viewport: Viewport,
    rng: &mut Rand,
) -> SpawnPlan {
    let base = glyphs.len().min(PARTY_BASE_COUNT);
    let musical = intensity > 1;
    let count = if musical {
        (base + (intensity as usize - 1) * 3).min(PARTY_MAX_COUNT)
    } else {
        base
    };

    let formation = pick_formation(intensity, rng);
    let positions = formation::compute_positions(
        &FormationRequest {
            formation,
            count,
            intensity,
            viewport,
            jitter: true,
        },
        rng,
    );

    let step_ms = if musical {
        (200u32.saturating_sub(count as u32 * 10)).max(80)
    } else {
        PARTY_STEP_MS
    };
    let font_px = if musical {
        (80 + intensity * 10).min(120)
    } else {
        80
    };
    let animation_secs = if musical {
        (0.8 - intensity as f64 * 0.1).max(0.3)
    } else {
        0.8
    };

    let steps = positions
        .iter()
        .enumerate()
        .map(|(i, p)| SpawnStep {
            delay_ms: i as u32 * step_ms,
            action: SpawnAction::Dancer {
                glyph: glyphs[i % glyphs.len()],
                x: p.x,
                y: p.y,
                font_px,
                animation_secs,
                musical_intensity: musical.then_some(intensity),
            },
        })
        .collect();

    SpawnPlan {
        formation: Some(formation),
        steps,
    }
}

/// Set-change celebration: eight tiny dancers raining down from random
/// points along the top of the viewport.
pub fn celebration_plan(set: &theme::ThemeSet, viewport: Viewport, rng: &mut Rand) -> SpawnPlan {
    let steps = (0..CELEBRATION_COUNT)
        .map(|i| SpawnStep {
            delay_ms: i as u32 * CELEBRATION_STEP_MS,
            action: SpawnAction::TinyDancer {
                glyph: theme::random_glyph(set, rng),
                start_x: rng.next_f64() * viewport.width,
            },
        })
        .collect();

    SpawnPlan {
        formation: None,
        steps,
    }
}

/// Right-click party: five staggered placements at random on-screen points.
pub fn burst_plan(viewport: Viewport, rng: &mut Rand) -> SpawnPlan {
    let steps = (0..BURST_COUNT)
        .map(|i| SpawnStep {
            delay_ms: i as u32 * BURST_STEP_MS,
            action: SpawnAction::Plant {
                x: 30.0 + rng.next_f64() * (viewport.width - 60.0),
                y: 30.0 + rng.next_f64() * (viewport.height - 60.0),
            },
        })
        .collect();

    SpawnPlan {
        formation: None,
        steps,
    }
}
