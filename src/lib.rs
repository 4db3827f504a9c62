//! # chordkit
//!
//! Identify musical chords from note names and estimate likely keys from a
//! collection of notes or chord names.
//!
//! The engine is purely symbolic: note spellings are reduced to 12-tone
//! pitch classes, matched by subset against a fixed chord dictionary, and
//! scored against the 24 diatonic key signatures. There is no I/O and no
//! shared mutable state; every call is a synchronous computation over its
//! inputs, so the tables can be read from multiple threads freely.
//!
//! ## Example
//! ```rust
//! use chordkit::{compute_intervals, find_matches, parse_chord_name, Note};
//!
//! fn run() -> Result<(), Box<dyn std::error::Error>> {
//!     // Identify a chord from its notes
//!     let notes = vec![Note::parse("C")?, Note::parse("E")?, Note::parse("G")?];
//!     let intervals = compute_intervals(&notes[0], &notes);
//!     let matches = find_matches(&intervals);
//!     assert_eq!(matches[0].name, "Major Triad");
//!
//!     // Or go the other way, from a compact chord name
//!     let (root, def) = parse_chord_name("Am7")?;
//!     assert_eq!(def.name, "Minor 7th");
//!     assert_eq!(root.pitch_class(), 9);
//!
//!     Ok(())
//! }
//! # run().unwrap();
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rust_2018_idioms)]
#![deny(clippy::all)]

/// Note parsing and pitch-class helpers.
pub use note::{dedupe, render, Note, NoteError};

/// Chord dictionary, matching, and chord-name parsing.
pub use chord::{
    compute_intervals, dictionary, find_matches, generate_notes, parse_chord_name, CheckFailure,
    ChordDefinition, ChordNameError, Match,
};

/// Key signatures and scale-overlap key estimation.
pub use key::{estimate, key_signatures, KeyMatch, KeySignature};

/// Note model module.
pub mod note;

/// Chord logic module.
pub mod chord;

/// Key estimation module.
pub mod key;
