//! Pile allocation for the tiny-dancer heap at the bottom of the viewport.
//! New arrivals prefer spreading into low-density ground spots; only a
//! genuinely crowded column starts stacking upward. The search is a greedy
//! heuristic, not an exact packing.

use super::rand::Rand;
use super::{Point, Viewport};

const MAX_SPREAD: f64 = 800.0;
const INITIAL_SPREAD: f64 = 150.0;
const GROUND_OFFSET: f64 = 35.0;
/// Horizontal zone within which existing dancers count as "nearby".
const NEARBY_DISTANCE: f64 = 35.0;
/// Tighter sub-cluster distance that triggers stacking.
const STACK_DISTANCE: f64 = 18.0;
/// Nearby count at which a column is considered crowded.
const CROWD_THRESHOLD: usize = 4;
const STACK_HEIGHT: f64 = 18.0;
const RELOCATION_TRIALS: usize = 8;

/// Where the next tiny dancer should settle, given every previously landed
/// pile position. The returned y is the ground baseline unless the chosen
/// column is crowded enough to stack.
pub fn next_pile_position(history: &[Point], vp: Viewport, rng: &mut Rand) -> Point {
    let center = vp.width / 2.0;
    let spread = MAX_SPREAD.min(vp.width * 0.9);
    let base = vp.height - GROUND_OFFSET;

    // First dancer lands near the bottom center with a wide initial spread.
    if history.is_empty() {
        return Point {
            x: center + (rng.next_f64() - 0.5) * INITIAL_SPREAD,
            y: base,
        };
    }

    let target_x = center + (rng.next_f64() - 0.5) * spread;
    let mut highest_y = base;
    let mut nearby = 0usize;
    for d in history {
        let dist = (d.x - target_x).abs();
        if dist < NEARBY_DISTANCE {
            nearby += 1;
            // Stack only once the column is crowded AND this entry sits in
            // the tight sub-cluster under the trial x.
            if nearby >= CROWD_THRESHOLD && dist < STACK_DISTANCE {
                let stacked = d.y - STACK_HEIGHT;
                if stacked < highest_y {
                    highest_y = stacked;
                }
            }
        }
    }

    if nearby < CROWD_THRESHOLD {
        // Prefer horizontal carpeting: try a handful of other columns and
        // keep the least dense one, always at ground level.
        let mut best_x = target_x;
        let mut lowest_density = nearby;
        for _ in 0..RELOCATION_TRIALS {
            let test_x = center + (rng.next_f64() - 0.5) * spread;
            let density = history
                .iter()
                .filter(|d| (d.x - test_x).abs() < NEARBY_DISTANCE)
                .count();
            if density < lowest_density {
                best_x = test_x;
                lowest_density = density;
            }
        }
        return Point { x: best_x, y: base };
    }

    Point {
        x: target_x,
        y: highest_y,
    }
}
