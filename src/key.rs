//! Diatonic key signatures and scale-overlap key estimation.
//!
//! Twenty-four keys (12 major, 12 natural minor) are built once and ranked
//! by how many input pitch classes fall inside each key's seven-note scale.

use lazy_static::lazy_static;

use crate::note::{dedupe, Note, NOTE_NAMES_SHARP};

const SEMITONES: u8 = 12;

/// Flat-preferring spellings, used for major key names.
const NOTE_NAMES_FLAT: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

const MAJOR_PATTERN: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];
const MINOR_PATTERN: [u8; 7] = [0, 2, 3, 5, 7, 8, 10];

/// A named diatonic scale: the seven pitch classes of a major or natural
/// minor key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySignature {
    /// Display name, e.g. "Eb Major" or "D# Minor".
    pub name: String,
    pitch_classes: [u8; 7],
}

impl KeySignature {
    fn new(name: String, root: u8, pattern: &[u8; 7]) -> KeySignature {
        let mut pitch_classes = [0u8; 7];
        for (slot, &interval) in pitch_classes.iter_mut().zip(pattern) {
            *slot = (root + interval) % SEMITONES;
        }
        KeySignature {
            name,
            pitch_classes,
        }
    }

    /// Whether the pitch class belongs to this key's scale.
    pub fn contains(&self, pitch_class: u8) -> bool {
        self.pitch_classes.contains(&(pitch_class % SEMITONES))
    }
}

lazy_static! {
    // Major keys are named with flats, minor keys with sharps. The mixed
    // convention mirrors common notation practice and is pinned by tests;
    // change it deliberately or not at all.
    static ref KEY_SIGNATURES: Vec<KeySignature> = {
        let mut keys = Vec::with_capacity(24);
        for root in 0..SEMITONES {
            keys.push(KeySignature::new(
                format!("{} Major", NOTE_NAMES_FLAT[root as usize]),
                root,
                &MAJOR_PATTERN,
            ));
            keys.push(KeySignature::new(
                format!("{} Minor", NOTE_NAMES_SHARP[root as usize]),
                root,
                &MINOR_PATTERN,
            ));
        }
        keys
    };
}

/// Read-only view of the 24 key signatures.
pub fn key_signatures() -> &'static [KeySignature] {
    &KEY_SIGNATURES
}

/// A key ranked by how many input pitch classes it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMatch {
    /// Name of the key signature.
    pub name: String,
    /// Number of distinct input pitch classes inside the key's scale.
    pub match_count: usize,
}

/// Rank the 24 keys by overlap with the input notes.
///
/// Input notes are deduplicated by pitch class first. Keys containing none
/// of the input are dropped; the rest are sorted by match count descending,
/// ties broken by name ascending. The full ranked list is returned; callers
/// decide how much of it to show.
pub fn estimate(notes: &[Note]) -> Vec<KeyMatch> {
    if notes.is_empty() {
        return Vec::new();
    }

    let unique = dedupe(notes);
    let mut matches: Vec<KeyMatch> = key_signatures()
        .iter()
        .filter_map(|key| {
            let count = unique
                .iter()
                .filter(|n| key.contains(n.pitch_class()))
                .count();
            (count > 0).then(|| KeyMatch {
                name: key.name.clone(),
                match_count: count,
            })
        })
        .collect();

    matches.sort_by(|a, b| {
        b.match_count
            .cmp(&a.match_count)
            .then_with(|| a.name.cmp(&b.name))
    });
    matches
}
