//! Chord dictionary, subset matching, and chord-name parsing.
//!
//! A chord quality is a formula: a set of semitone offsets from a root. An
//! input matches a formula when every required offset is present, so extra
//! color tones are tolerated (subset matching).

use std::fmt::Display;
use thiserror::Error;

use crate::note::{Note, NoteError};

const SEMITONES: u8 = 12;

/// A named chord formula plus the quality suffixes accepted when parsing
/// compact chord names like `F#m7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChordDefinition {
    /// Display name, e.g. "Minor 7th".
    pub name: &'static str,
    /// Quality suffixes recognized by [`parse_chord_name`]. Matching is
    /// case-sensitive; the empty suffix is the bare major triad.
    pub suffixes: &'static [&'static str],
    /// Semitone offsets from the root, ascending, 0 included.
    pub offsets: &'static [u8],
}

/// The fixed chord dictionary, in matching/display order.
const DICTIONARY: [ChordDefinition; 10] = [
    ChordDefinition {
        name: "Major 7th",
        suffixes: &["maj7", "M7"],
        offsets: &[0, 4, 7, 11],
    },
    ChordDefinition {
        name: "Minor-Major 7th",
        suffixes: &["m(maj7)"],
        offsets: &[0, 3, 7, 11],
    },
    ChordDefinition {
        name: "Minor 7th",
        suffixes: &["m7", "min7"],
        offsets: &[0, 3, 7, 10],
    },
    ChordDefinition {
        name: "Dominant 7th",
        suffixes: &["7", "dom7"],
        offsets: &[0, 4, 7, 10],
    },
    ChordDefinition {
        name: "Major Triad",
        suffixes: &["", "M"],
        offsets: &[0, 4, 7],
    },
    ChordDefinition {
        name: "Minor Triad",
        suffixes: &["m", "min"],
        offsets: &[0, 3, 7],
    },
    ChordDefinition {
        name: "Diminished Triad",
        suffixes: &["dim"],
        offsets: &[0, 3, 6],
    },
    ChordDefinition {
        name: "Augmented Triad",
        suffixes: &["aug", "+"],
        offsets: &[0, 4, 8],
    },
    ChordDefinition {
        name: "Sus2",
        suffixes: &["sus2"],
        offsets: &[0, 2, 7],
    },
    ChordDefinition {
        name: "Sus4",
        suffixes: &["sus4"],
        offsets: &[0, 5, 7],
    },
];

/// Read-only view of the chord dictionary, for diagnostic listings.
pub fn dictionary() -> &'static [ChordDefinition] {
    &DICTIONARY
}

/// Errors when parsing compact chord names.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChordNameError {
    /// The token's prefix cannot be parsed as any known pitch spelling.
    #[error("invalid root note in chord name `{token}`")]
    InvalidRoot {
        /// The full chord-name token.
        token: String,
    },

    /// The root parsed but the remaining suffix matches no dictionary entry.
    #[error("unknown chord quality `{quality}`")]
    UnknownQuality {
        /// The unrecognized quality suffix.
        quality: String,
    },
}

/// Why a chord definition failed to match an interval set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckFailure {
    /// The input has fewer distinct intervals than the formula requires.
    TooFewNotes {
        /// Number of offsets in the formula.
        required: usize,
        /// Number of distinct intervals in the input.
        got: usize,
    },
    /// A required offset is absent from the input.
    MissingOffset(u8),
}

impl Display for CheckFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckFailure::TooFewNotes { required, got } => {
                write!(f, "requires {required} intervals, input has {got}")
            }
            CheckFailure::MissingOffset(offset) => write!(f, "missing interval {offset}"),
        }
    }
}

impl ChordDefinition {
    /// Test this formula against a set of input intervals, reporting why it
    /// fails when it does.
    pub fn check(&self, intervals: &[u8]) -> Result<(), CheckFailure> {
        if intervals.len() < self.offsets.len() {
            return Err(CheckFailure::TooFewNotes {
                required: self.offsets.len(),
                got: intervals.len(),
            });
        }
        for &offset in self.offsets {
            if !intervals.contains(&offset) {
                return Err(CheckFailure::MissingOffset(offset));
            }
        }
        Ok(())
    }
}

/// A chord definition that matched an input interval set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// Name of the matched definition.
    pub name: &'static str,
    /// The matched formula's offsets.
    pub offsets: &'static [u8],
}

impl Match {
    /// True when the input had strictly more distinct notes than the
    /// formula, i.e. the chord is a subset of the input.
    pub fn is_subset(&self, input_notes: usize) -> bool {
        input_notes > self.offsets.len()
    }
}

/// Compute each note's interval from the root, reduced modulo 12 and sorted
/// ascending.
pub fn compute_intervals(root: &Note, notes: &[Note]) -> Vec<u8> {
    let mut intervals: Vec<u8> = notes
        .iter()
        .map(|n| (n.pitch_class() + SEMITONES - root.pitch_class()) % SEMITONES)
        .collect();
    intervals.sort_unstable();
    intervals
}

/// Find every dictionary entry whose formula is a subset of the input
/// intervals, in dictionary order.
pub fn find_matches(intervals: &[u8]) -> Vec<Match> {
    DICTIONARY
        .iter()
        .filter(|def| def.check(intervals).is_ok())
        .map(|def| Match {
            name: def.name,
            offsets: def.offsets,
        })
        .collect()
}

/// Split a compact chord name like `F#m7` into its root note and the chord
/// definition named by its quality suffix.
///
/// A two-character root is tried before a one-character one, so `F#` never
/// misparses as root `F` with quality `#`.
pub fn parse_chord_name(token: &str) -> Result<(Note, &'static ChordDefinition), ChordNameError> {
    let (root, quality) = split_root(token).ok_or_else(|| ChordNameError::InvalidRoot {
        token: token.to_string(),
    })?;

    for def in &DICTIONARY {
        if def.suffixes.contains(&quality) {
            return Ok((root, def));
        }
    }
    Err(ChordNameError::UnknownQuality {
        quality: quality.to_string(),
    })
}

/// Longest-prefix root extraction: two characters first, then one.
fn split_root(token: &str) -> Option<(Note, &str)> {
    let mut boundaries = token.char_indices().map(|(i, _)| i).skip(1);
    let first = boundaries.next();
    let second = boundaries.next().unwrap_or(token.len());

    if first.is_some() {
        if let Ok(root) = Note::parse(&token[..second]) {
            return Some((root, &token[second..]));
        }
    }
    let one = first.unwrap_or(token.len());
    match Note::parse(&token[..one]) {
        Ok(root) => Some((root, &token[one..])),
        Err(NoteError::UnrecognizedPitch { .. }) => None,
    }
}

/// Expand a root and a list of offsets into concrete notes.
///
/// Generated notes have no input spelling, so they display with canonical
/// sharp-based names.
pub fn generate_notes(root: &Note, offsets: &[u8]) -> Vec<Note> {
    offsets
        .iter()
        .map(|&offset| Note::from_pitch_class((root.pitch_class() + offset) % SEMITONES))
        .collect()
}
