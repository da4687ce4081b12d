//! Formation layout: maps an item index within a group to a 2D point for a
//! named geometric figure (arc, circle, spiral, ...). All figures are
//! centered on the viewport and scaled by the party intensity; everything in
//! here is pure math so it runs under native `cargo test`.

use std::f64::consts::PI;

use super::rand::Rand;
use super::{Point, Viewport};

/// Named layout figure for a batch of dancers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Formation {
    Arc,
    Circle,
    Line,
    Random,
    Spiral,
    Wave,
    Diamond,
    Heart,
    Star,
    Zigzag,
}

impl Formation {
    pub const ALL: [Formation; 10] = [
        Formation::Arc,
        Formation::Circle,
        Formation::Line,
        Formation::Random,
        Formation::Spiral,
        Formation::Wave,
        Formation::Diamond,
        Formation::Heart,
        Formation::Star,
        Formation::Zigzag,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Formation::Arc => "arc",
            Formation::Circle => "circle",
            Formation::Line => "line",
            Formation::Random => "random",
            Formation::Spiral => "spiral",
            Formation::Wave => "wave",
            Formation::Diamond => "diamond",
            Formation::Heart => "heart",
            Formation::Star => "star",
            Formation::Zigzag => "zigzag",
        }
    }
}

/// Ephemeral input for one layout computation.
#[derive(Clone, Copy, Debug)]
pub struct FormationRequest {
    pub formation: Formation,
    pub count: usize,
    /// Party intensity 1..=5; amplifies figure size and jitter.
    pub intensity: u32,
    pub viewport: Viewport,
    /// When false the random jitter term is skipped, making circle / star /
    /// spiral layouts fully reproducible.
    pub jitter: bool,
}

// Figure geometry constants (px at scale 1.0).
const ARC_WIDTH: f64 = 400.0;
const ARC_RISE: f64 = 60.0;
const CIRCLE_RADIUS: f64 = 120.0;
const SPIRAL_BASE_RADIUS: f64 = 40.0;
const SPIRAL_STEP: f64 = 20.0;
const WAVE_WIDTH: f64 = 500.0;
const WAVE_RISE: f64 = 80.0;
const HEART_SCALE: f64 = 70.0;
const STAR_RADIUS: f64 = 130.0;
const STAR_INNER_FACTOR: f64 = 0.6;
const CLUSTER_RADIUS: f64 = 150.0;

fn scale_for(intensity: u32) -> f64 {
    (1.0 + intensity as f64 * 0.2).min(1.8)
}

fn jitter_for(intensity: u32) -> f64 {
    20.0 + intensity as f64 * 10.0
}

fn clamp_to_viewport(p: Point, vp: Viewport) -> Point {
    Point {
        x: p.x.min(vp.width - 100.0).max(50.0),
        y: p.y.min(vp.height - 100.0).max(50.0),
    }
}

/// Compute one position per index `0..count`. Returns an empty vec for a
/// zero count; a single item in a spanning figure (arc / wave / heart) sits
/// at the figure center since those formulas divide by `count - 1`.
pub fn compute_positions(req: &FormationRequest, rng: &mut Rand) -> Vec<Point> {
    let n = req.count;
    if n == 0 {
        return Vec::new();
    }

    let vp = req.viewport;
    let cx = vp.width / 2.0;
    let cy = vp.height / 2.0;
    let scale = scale_for(req.intensity);
    let jitter = jitter_for(req.intensity);

    let mut points = Vec::with_capacity(n);
    for i in 0..n {
        let fi = i as f64;
        let fn_ = n as f64;

        let (mut x, mut y, jitter_mult) = match req.formation {
            Formation::Arc => {
                if n == 1 {
                    (cx, cy, 1.0)
                } else {
                    let width = (ARC_WIDTH * scale).min(vp.width * 0.8);
                    let start_x = (vp.width - width) / 2.0;
                    let t = fi / (fn_ - 1.0);
                    (
                        start_x + width * t,
                        cy + (t * PI).sin() * ARC_RISE * scale,
                        1.0,
                    )
                }
            }
            Formation::Circle => {
                let angle = fi / fn_ * PI * 2.0;
                let r = CIRCLE_RADIUS * scale;
                (cx + angle.cos() * r, cy + angle.sin() * r, 1.0)
            }
            Formation::Spiral => {
                // Outward spiral, radius grows per index; deliberately left
                // un-jittered so the winding stays readable.
                let angle = fi / fn_ * PI * 2.0 * (3.0 + req.intensity as f64);
                let r = SPIRAL_BASE_RADIUS + fi * SPIRAL_STEP * scale;
                (cx + angle.cos() * r, cy + angle.sin() * r, 0.0)
            }
            Formation::Wave => {
                if n == 1 {
                    (cx, cy, 1.0)
                } else {
                    let width = (WAVE_WIDTH * scale).min(vp.width * 0.8);
                    let start_x = (vp.width - width) / 2.0;
                    let t = fi / (fn_ - 1.0);
                    (
                        start_x + width * t,
                        cy + (t * PI * 2.0).sin() * WAVE_RISE * scale,
                        1.0,
                    )
                }
            }
            Formation::Heart => {
                if n == 1 {
                    (cx, cy, 1.0)
                } else {
                    let t = fi / (fn_ - 1.0) * PI * 2.0;
                    let hs = HEART_SCALE * scale;
                    let hx = 16.0 * t.sin().powi(3);
                    let hy = 13.0 * t.cos()
                        - 5.0 * (2.0 * t).cos()
                        - 2.0 * (3.0 * t).cos()
                        - (4.0 * t).cos();
                    (cx + hs * hx / 16.0, cy - hs * hy / 16.0, 1.0)
                }
            }
            Formation::Star => {
                let angle = fi / fn_ * PI * 2.0;
                let outer = STAR_RADIUS * scale;
                let r = if i % 2 == 0 {
                    outer
                } else {
                    outer * STAR_INNER_FACTOR
                };
                (cx + angle.cos() * r, cy + angle.sin() * r, 1.0)
            }
            // Diamond / zigzag / line / random share an organic cluster
            // around the center rather than a rigid grid.
            Formation::Diamond | Formation::Zigzag | Formation::Line | Formation::Random => {
                let angle = fi / fn_ * PI * 2.0 + rng.next_f64() * 0.5;
                let dist = rng.next_f64() * CLUSTER_RADIUS * scale;
                (cx + angle.cos() * dist, cy + angle.sin() * dist, 2.0)
            }
        };

        if req.jitter && jitter_mult > 0.0 {
            x += (rng.next_f64() - 0.5) * jitter * jitter_mult;
            y += (rng.next_f64() - 0.5) * jitter * jitter_mult;
        }

        points.push(clamp_to_viewport(Point { x, y }, vp));
    }
    points
}

// Dance-floor clearing geometry.
const EDGE_MARGIN: f64 = 50.0;
const DANCER_SIZE: f64 = 60.0;
const FLOOR_RADIUS_FACTOR: f64 = 0.3;

/// Relocation target used by "clear dance floor": dancers inside the center
/// circle move to a random edge band; dancers already near the edges stay
/// put (`None`).
pub fn clear_floor_target(current: Point, vp: Viewport, rng: &mut Rand) -> Option<Point> {
    let cx = vp.width / 2.0;
    let cy = vp.height / 2.0;
    let radius = vp.width.min(vp.height) * FLOOR_RADIUS_FACTOR;
    let dist = ((current.x - cx).powi(2) + (current.y - cy).powi(2)).sqrt();
    if dist >= radius {
        return None;
    }

    let target = match rng.index(4) {
        // Top edge
        0 => Point {
            x: EDGE_MARGIN + rng.next_f64() * (vp.width - 2.0 * EDGE_MARGIN - DANCER_SIZE),
            y: rng.next_f64() * EDGE_MARGIN,
        },
        // Right edge
        1 => Point {
            x: vp.width - EDGE_MARGIN - DANCER_SIZE + rng.next_f64() * (EDGE_MARGIN / 2.0),
            y: EDGE_MARGIN + rng.next_f64() * (vp.height - 2.0 * EDGE_MARGIN - DANCER_SIZE),
        },
        // Bottom edge
        2 => Point {
            x: EDGE_MARGIN + rng.next_f64() * (vp.width - 2.0 * EDGE_MARGIN - DANCER_SIZE),
            y: vp.height - EDGE_MARGIN - DANCER_SIZE + rng.next_f64() * (EDGE_MARGIN / 2.0),
        },
        // Left edge
        _ => Point {
            x: rng.next_f64() * EDGE_MARGIN,
            y: EDGE_MARGIN + rng.next_f64() * (vp.height - 2.0 * EDGE_MARGIN - DANCER_SIZE),
        },
    };
    Some(target)
}
