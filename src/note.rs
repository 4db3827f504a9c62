//! Note parsing and pitch-class utilities.
//!
//! Every note is reduced to one of 12 equal-tempered pitch classes (C = 0)
//! while keeping the spelling the caller typed, so `C#` and `Db` compare
//! equal for matching but display differently.

use std::fmt::Display;
use thiserror::Error;

const SEMITONES: u8 = 12;

/// Canonical sharp-based spelling for each pitch class, used when a note was
/// generated from intervals and carries no input spelling.
pub(crate) const NOTE_NAMES_SHARP: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Normalized spelling to pitch class. Covers naturals, single sharps,
/// single flats, and the theoretical spellings B#, Cb, E#, Fb.
const NOTE_TABLE: [(&str, u8); 21] = [
    ("C", 0),
    ("B#", 0),
    ("C#", 1),
    ("DB", 1),
    ("D", 2),
    ("D#", 3),
    ("EB", 3),
    ("E", 4),
    ("FB", 4),
    ("F", 5),
    ("E#", 5),
    ("F#", 6),
    ("GB", 6),
    ("G", 7),
    ("G#", 8),
    ("AB", 8),
    ("A", 9),
    ("A#", 10),
    ("BB", 10),
    ("B", 11),
    ("CB", 11),
];

/// Errors when parsing note spellings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NoteError {
    /// The token is not a recognized note spelling (empty string, unknown
    /// letter, double accidental, digit, ...).
    #[error("unrecognized pitch `{token}`")]
    UnrecognizedPitch {
        /// The offending input token, unmodified.
        token: String,
    },
}

/// A parsed pitch: its pitch class plus the spelling it arrived with.
///
/// Notes are immutable values; operations that change a note produce a new
/// one instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    /// The spelling as typed by the user. Empty for notes synthesized from
    /// intervals.
    pub original: String,
    // Kept private so every Note holds a reduced class; constructors do the
    // modulo once and the indexing paths need no bounds checks.
    pitch_class: u8,
}

impl Note {
    /// Parse a note spelling: a letter A-G (case-insensitive) optionally
    /// followed by one accidental (`#`, `b`, or `B`).
    ///
    /// The input spelling is kept verbatim in [`Note::original`].
    pub fn parse(token: &str) -> Result<Note, NoteError> {
        let normalized = token.to_uppercase();
        let pitch_class = NOTE_TABLE
            .iter()
            .find(|(name, _)| *name == normalized)
            .map(|&(_, pc)| pc)
            .ok_or_else(|| NoteError::UnrecognizedPitch {
                token: token.to_string(),
            })?;
        Ok(Note {
            original: token.to_string(),
            pitch_class,
        })
    }

    /// Build a note from a bare pitch class, with no input spelling.
    ///
    /// Display falls back to the canonical sharp-based name.
    pub fn from_pitch_class(pitch_class: u8) -> Note {
        Note {
            original: String::new(),
            pitch_class: pitch_class % SEMITONES,
        }
    }

    /// Pitch class 0..=11, C = 0. Always reduced modulo 12.
    pub fn pitch_class(&self) -> u8 {
        self.pitch_class
    }

    /// The spelling used for display: the original input if present,
    /// otherwise the canonical sharp-based name.
    pub fn display_name(&self) -> &str {
        if self.original.is_empty() {
            NOTE_NAMES_SHARP[self.pitch_class as usize]
        } else {
            &self.original
        }
    }
}

impl Display for Note {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Collapse notes to unique pitch classes.
///
/// The first occurrence of each pitch class wins, keeping its spelling and
/// its relative position. Idempotent.
pub fn dedupe(notes: &[Note]) -> Vec<Note> {
    let mut seen = [false; SEMITONES as usize];
    let mut unique = Vec::with_capacity(notes.len());
    for note in notes {
        let idx = note.pitch_class as usize;
        if !seen[idx] {
            seen[idx] = true;
            unique.push(note.clone());
        }
    }
    unique
}

/// Join note spellings with single spaces for display.
pub fn render(notes: &[Note]) -> String {
    notes
        .iter()
        .map(Note::display_name)
        .collect::<Vec<_>>()
        .join(" ")
}
