//! Voice transcript matching: normalizes a spoken transcript and matches it
//! against the small fixed command vocabulary, with repeat counting so one
//! utterance can trigger several actions and a "musical intensity" rule for
//! repeated dance/party keywords.
//!
//! The repeat counting deliberately preserves the original heuristics
//! (including the min(dance, party) shortcut for "dance party") rather than
//! a stricter phrase count.

/// A recognized spoken command. Repeats are emitted as duplicate entries so
/// the caller can stagger their execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VoiceCommand {
    /// Amplified dance party; intensity 2..=5 from repeated "dance" tokens.
    MusicalDanceParty { intensity: u32 },
    ClearDanceFloor,
    DanceParty,
    RestartParty,
}

const FILLER_WORDS: [&str; 8] = ["the", "a", "an", "please", "can", "you", "could", "would"];

// Longest phrase first so "dance party" never shadows "restart the party".
const PHRASES: [(&str, VoiceCommand); 3] = [
    ("restart the party", VoiceCommand::RestartParty),
    ("clear dance floor", VoiceCommand::ClearDanceFloor),
    ("dance party", VoiceCommand::DanceParty),
];

const MAX_INTENSITY: usize = 5;

/// Lowercase, trim, strip filler words, collapse whitespace.
pub fn normalize(transcript: &str) -> String {
    let lowered = transcript.to_lowercase();
    lowered
        .split_whitespace()
        .filter(|w| !FILLER_WORDS.contains(w))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a final transcript into zero or more commands, in detection order:
/// the musical rule first, then each vocabulary phrase (longest first) once
/// per counted occurrence. Unmatched transcripts yield an empty vec.
pub fn parse(transcript: &str) -> Vec<VoiceCommand> {
    let raw = transcript.to_lowercase();
    let raw = raw.trim();
    let cleaned = normalize(raw);

    let mut commands = Vec::new();

    // Musical intensity: repeated "dance" plus at least one "party" scales
    // up the celebration, independent of any other match below.
    let dance_mentions = raw.matches("dance").count();
    let party_mentions = raw.matches("party").count();
    if dance_mentions >= 2 && party_mentions >= 1 {
        commands.push(VoiceCommand::MusicalDanceParty {
            intensity: dance_mentions.min(MAX_INTENSITY) as u32,
        });
    }

    for (phrase, command) in PHRASES {
        let in_raw = count_phrase(raw, phrase);
        let in_cleaned = count_phrase(&cleaned, phrase);
        // Cleaned-only matches (filler words removed) add to the raw count
        // without double-counting the overlap.
        let mut count = in_raw + in_cleaned.saturating_sub(in_raw);

        if command == VoiceCommand::DanceParty {
            let dances = count_word(raw, "dance");
            let parties = count_word(raw, "party");
            if dances > 1 && parties > 0 {
                count = count.max(dances.min(parties));
            }
        }

        for _ in 0..count {
            commands.push(command);
        }
    }

    commands
}

/// Non-overlapping occurrences of a multi-word phrase, tolerant of extra
/// whitespace between words.
fn count_phrase(text: &str, phrase: &str) -> usize {
    let words: Vec<&str> = text.split_whitespace().collect();
    let needle: Vec<&str> = phrase.split_whitespace().collect();
    if needle.is_empty() || words.len() < needle.len() {
        return 0;
    }
    let mut count = 0;
    let mut i = 0;
    while i + needle.len() <= words.len() {
        if words[i..i + needle.len()] == needle[..] {
            count += 1;
            i += needle.len();
        } else {
            i += 1;
        }
    }
    count
}

/// Word-boundary occurrences of a single token (punctuation trimmed).
fn count_word(text: &str, word: &str) -> usize {
    text.split_whitespace()
        .filter(|w| w.trim_matches(|c: char| !c.is_alphanumeric()) == word)
        .count()
}
