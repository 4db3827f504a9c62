//! Binary-level tests: flag handling, batch processing, output, and exit
//! codes of the `chordkit` executable.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

fn chordkit(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_chordkit"))
        .args(args)
        .output()
        .expect("failed to run chordkit binary")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

fn write_batch(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("chords.txt");
    fs::write(&path, contents).expect("failed to write batch file");
    path
}

#[test]
fn identifies_a_chord_from_positional_notes() {
    let out = chordkit(&["C", "E", "G"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("Input Notes: C E G"));
    assert!(text.contains("Root: C"));
    assert!(text.contains(" - C Major Triad"));
}

#[test]
fn no_notes_exits_1() {
    let out = chordkit(&[]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("no notes provided"));
}

#[test]
fn keys_mode_without_chord_names_exits_1() {
    let out = chordkit(&["--keys"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("no chord names provided"));
}

#[test]
fn invalid_note_exits_1() {
    let out = chordkit(&["C", "X", "G"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("invalid note 'X' in input"));
}

#[test]
fn notes_flag_wins_over_positional_args_with_a_warning() {
    let out = chordkit(&["--notes", "C,E,G", "A", "B"]);
    assert!(out.status.success());
    assert!(stderr(&out).contains("using --notes"));
    let text = stdout(&out);
    assert!(text.contains("Root: C"));
    assert!(text.contains(" - C Major Triad"));
}

#[test]
fn verbose_lists_every_definition_with_reasons() {
    let out = chordkit(&["--verbose", "C", "E", "G"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("Checking Dictionary..."));
    assert!(text.contains("✅ Match: Major Triad [0, 4, 7]"));
    assert!(text.contains("❌ No Match: Minor Triad [0, 3, 7] (missing interval 3)"));
    assert!(text.contains("❌ No Match: Major 7th [0, 4, 7, 11] (requires 4 intervals, input has 3)"));
}

#[test]
fn key_estimation_from_chord_names() {
    let out = chordkit(&["--keys", "Am", "F", "C", "G"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("Processing Chords: Am F C G"));
    assert!(text.contains("Likely Keys:"));
    assert!(text.contains(" A Minor (7 matches)"));
    assert!(text.contains(" C Major (7 matches)"));
}

#[test]
fn unparseable_chord_name_exits_1() {
    let out = chordkit(&["--keys", "Hm7"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("could not parse chord name 'Hm7'"));
}

#[test]
fn batch_skips_bad_lines_and_exits_2() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_batch(&dir, "C E G\nX Y Z\nA C E\n");

    let out = chordkit(&["--batch", path.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(2));

    // Good lines are still processed around the bad one.
    let text = stdout(&out);
    assert!(text.contains("[1] C E G -> C Major Triad"));
    assert!(text.contains("[3] A C E -> A Minor Triad"));
    assert!(stderr(&out).contains("Error on line 2"));
}

#[test]
fn batch_blank_line_is_reported_and_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_batch(&dir, "C E G\n\nG B D\n");

    let out = chordkit(&["--batch", path.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("Error on line 2: no notes provided"));
    assert!(stdout(&out).contains("[3] G B D -> G Major Triad"));
}

#[test]
fn empty_batch_file_exits_0_silently() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_batch(&dir, "");

    let out = chordkit(&["--batch", path.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(0));
    assert!(stdout(&out).is_empty());
    assert!(stderr(&out).is_empty());
}

#[test]
fn missing_batch_file_exits_1() {
    let out = chordkit(&["--batch", "no-such-file.txt"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("file not found"));
}

#[test]
fn batch_with_keys_aggregates_notes_across_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_batch(&dir, "C E G\nG B D\nA C E\n");

    let out = chordkit(&["--batch", path.to_str().unwrap(), "--keys"]);
    assert_eq!(out.status.code(), Some(0));
    let text = stdout(&out);
    assert!(text.contains("Key Estimation Results"));
    assert!(text.contains("Aggregated Notes: C D E G A B"));
    assert!(text.contains("Likely Keys:"));
}

#[test]
fn inversions_try_each_note_as_root() {
    let out = chordkit(&["--inversions", "E", "G", "C"]);
    assert!(out.status.success());
    let text = stdout(&out);
    // Three roots, three result blocks; the C root finds the triad.
    assert!(text.contains("Root: E"));
    assert!(text.contains("Root: G"));
    assert!(text.contains("Root: C"));
    assert!(text.contains(" - C Major Triad"));
}
