// Integrity checks over the built-in theme sets.

use dino_dance::THEME_SETS;

#[test]
fn seven_sets_in_rotation_order() {
    let names: Vec<&str> = THEME_SETS.iter().map(|s| s.name).collect();
    assert_eq!(
        names,
        [
            "prehistoric",
            "reptiles",
            "insects",
            "mammals",
            "predators",
            "ocean",
            "magical",
        ]
    );
}

#[test]
fn every_set_has_glyphs() {
    for set in &THEME_SETS {
        assert!(
            !set.glyphs.is_empty(),
            "set {:?} must not be empty",
            set.name
        );
    }
}

#[test]
fn set_names_are_unique() {
    for (i, a) in THEME_SETS.iter().enumerate() {
        for b in &THEME_SETS[i + 1..] {
            assert_ne!(a.name, b.name);
        }
    }
}

#[test]
fn glyphs_within_a_set_are_unique() {
    for set in &THEME_SETS {
        for (i, a) in set.glyphs.iter().enumerate() {
            for b in &set.glyphs[i + 1..] {
                assert_ne!(a, b, "duplicate glyph in {:?}", set.name);
            }
        }
    }
}

#[test]
fn rotation_starts_with_the_prehistoric_set() {
    assert_eq!(THEME_SETS[0].name, "prehistoric");
    assert!(THEME_SETS[0].glyphs.contains(&"🦕"));
}
