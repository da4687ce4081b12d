//! Theme sets and their rotation state machine. Each set is a fixed,
//! non-empty glyph collection; the rotator advances through `THEME_SETS` in
//! order after a randomized number of placements so the artwork evolves
//! organically instead of on a fixed beat.

use super::rand::Rand;

/// A named, fixed glyph collection used for the cursor creature and
/// placements until the rotation advances.
#[derive(Clone, Copy, Debug)]
pub struct ThemeSet {
    pub name: &'static str,
    pub glyphs: &'static [&'static str],
}

pub const THEME_SETS: [ThemeSet; 7] = [
    ThemeSet {
        name: "prehistoric",
        glyphs: &["🦕", "🦴", "🐊", "🐲", "🦖", "🐉"],
    },
    ThemeSet {
        name: "reptiles",
        glyphs: &["🦎", "🐍", "🐢", "🐊", "🐸", "🦕"],
    },
    ThemeSet {
        name: "insects",
        glyphs: &["🦋", "🐝", "🐞", "🦗", "🕷️", "🦂", "🐛", "🐜", "🦟"],
    },
    ThemeSet {
        name: "mammals",
        glyphs: &["🐨", "🐼", "🦘", "🦥", "🦦", "🦨", "🦔", "🐿️", "🐹", "🐭", "🐰", "🦊"],
    },
    ThemeSet {
        name: "predators",
        glyphs: &["🐺", "🐻", "🐯", "🦁", "🦈", "🐉", "🦖"],
    },
    ThemeSet {
        name: "ocean",
        glyphs: &["🐙", "🦑", "🦐", "🦀", "🐡", "🐠", "🐟", "🐬", "🐳", "🐋", "🦈", "🐚"],
    },
    ThemeSet {
        name: "magical",
        glyphs: &["⭐", "🌟", "✨", "💫", "🔥", "❄️", "☄️", "🌈", "🎪"],
    },
];

// Placements before a set change: 6-12 for organic unpredictability.
const MIN_PLACEMENTS_PER_SET: u32 = 6;
const MAX_PLACEMENTS_PER_SET: u32 = 12;

/// Rotation state: current set index, placements since the last rotation and
/// the randomized threshold for the next one.
pub struct ThemeRotator {
    set_index: usize,
    placements_in_set: u32,
    threshold: u32,
}

impl ThemeRotator {
    pub fn new(rng: &mut Rand) -> Self {
        Self {
            set_index: 0,
            placements_in_set: 0,
            threshold: fresh_threshold(rng),
        }
    }

    /// Deterministic constructor for callers that need a fixed first
    /// threshold (host-side tests mostly).
    pub fn with_threshold(threshold: u32) -> Self {
        Self {
            set_index: 0,
            placements_in_set: 0,
            threshold,
        }
    }

    pub fn current_set(&self) -> &'static ThemeSet {
        &THEME_SETS[self.set_index]
    }

    pub fn set_index(&self) -> usize {
        self.set_index
    }

    pub fn placements_in_set(&self) -> u32 {
        self.placements_in_set
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Record one placement. Returns true when the set just rotated (the
    /// caller celebrates with tiny dancers).
    pub fn record_placement(&mut self, rng: &mut Rand) -> bool {
        self.placements_in_set += 1;
        if self.placements_in_set >= self.threshold {
            self.advance(rng);
            true
        } else {
            false
        }
    }

    /// Force-advance to the next set (keyboard shortcut and the rotation
    /// transition share this).
    pub fn advance(&mut self, rng: &mut Rand) {
        self.set_index = (self.set_index + 1) % THEME_SETS.len();
        self.placements_in_set = 0;
        self.threshold = fresh_threshold(rng);
    }

    /// "Restart the party": back to the first set with a fresh threshold.
    pub fn reset(&mut self, rng: &mut Rand) {
        self.set_index = 0;
        self.placements_in_set = 0;
        self.threshold = fresh_threshold(rng);
    }
}

fn fresh_threshold(rng: &mut Rand) -> u32 {
    rng.range_u32(MIN_PLACEMENTS_PER_SET, MAX_PLACEMENTS_PER_SET)
}

/// Random glyph from a set; sets are never empty so this always yields.
pub fn random_glyph(set: &ThemeSet, rng: &mut Rand) -> &'static str {
    set.glyphs[rng.index(set.glyphs.len())]
}
