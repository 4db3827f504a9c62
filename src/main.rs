//! Command-line front end for the chordkit engine.
//!
//! The binary only parses flags, reads batch files, and formats results;
//! all matching and estimation lives in the library.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;

use chordkit::{
    compute_intervals, dedupe, dictionary, estimate, find_matches, generate_notes,
    parse_chord_name, render, Match, Note,
};

#[derive(Debug, Parser)]
#[command(name = "chordkit")]
#[command(about = "Identify chords from note names and estimate likely keys.")]
#[command(after_help = "\
Examples:
  Identify a chord from notes: chordkit C E G Bb
  Estimate key from chords:    chordkit --keys Am F C G
  Batch processing from file:  chordkit --batch chords.txt [--keys]")]
struct Cli {
    /// Comma-separated list of notes (e.g. "C,E,G,Bb").
    #[arg(long)]
    notes: Option<String>,

    /// Enable inversion detection by treating each note as a potential root.
    #[arg(long)]
    inversions: bool,

    /// Path to a file containing multiple chords (one chord per line,
    /// whitespace-separated note tokens).
    #[arg(long)]
    batch: Option<PathBuf>,

    /// Enable key estimation.
    #[arg(long)]
    keys: bool,

    /// Show detailed matching logic, including failed checks.
    #[arg(long)]
    verbose: bool,

    /// Note tokens, or chord names when --keys is given.
    args: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    if let Some(path) = &cli.batch {
        return run_batch(path, cli.keys);
    }

    if cli.keys {
        if cli.args.is_empty() {
            bail!("no chord names provided for key estimation");
        }
        run_key_estimation_from_args(&cli.args)?;
        return Ok(ExitCode::SUCCESS);
    }

    let tokens = note_tokens(cli);
    if tokens.is_empty() {
        bail!("no notes provided");
    }
    run_single_chord(&tokens, cli.inversions, cli.verbose)?;
    Ok(ExitCode::SUCCESS)
}

/// The --notes flag takes precedence over positional arguments.
fn note_tokens(cli: &Cli) -> Vec<String> {
    match &cli.notes {
        Some(list) => {
            if !cli.args.is_empty() {
                eprintln!("Warning: both positional arguments and --notes provided; using --notes.");
            }
            list.split(',').map(str::to_string).collect()
        }
        None => cli.args.clone(),
    }
}

fn parse_and_validate_notes(tokens: &[String]) -> Result<Vec<Note>> {
    let mut notes = Vec::with_capacity(tokens.len());
    for token in tokens {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let note =
            Note::parse(token).map_err(|_| anyhow::anyhow!("invalid note '{token}' in input"))?;
        notes.push(note);
    }
    if notes.is_empty() {
        bail!("no valid notes provided");
    }
    Ok(dedupe(&notes))
}

fn run_single_chord(tokens: &[String], inversions: bool, verbose: bool) -> Result<()> {
    let notes = parse_and_validate_notes(tokens)?;

    let roots: Vec<Note> = if inversions {
        notes.clone()
    } else {
        vec![notes[0].clone()]
    };

    for root in &roots {
        let intervals = compute_intervals(root, &notes);
        let matches = find_matches(&intervals);
        if verbose {
            print_verbose_output(root, &notes, &intervals, &matches);
        } else {
            print_standard_output(root, &notes, &intervals, &matches);
        }
    }
    Ok(())
}

fn run_key_estimation_from_args(chord_names: &[String]) -> Result<()> {
    println!("Processing Chords: {}", chord_names.join(" "));

    let mut all_notes = Vec::new();
    for name in chord_names {
        let (root, def) = parse_chord_name(name)
            .with_context(|| format!("could not parse chord name '{name}'"))?;
        all_notes.extend(generate_notes(&root, def.offsets));
    }

    print_key_estimation(&all_notes);
    Ok(())
}

fn run_batch(path: &Path, keys: bool) -> Result<ExitCode> {
    let file =
        File::open(path).with_context(|| format!("file not found: {}", path.display()))?;
    if file.metadata()?.len() == 0 {
        return Ok(ExitCode::SUCCESS);
    }

    println!("Processing {}...", path.display());

    let mut all_notes = Vec::new();
    let mut batch_has_errors = false;

    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line_num = idx + 1;
        let line = line.with_context(|| format!("error reading {}", path.display()))?;
        let line = line.trim();

        if line.is_empty() {
            eprintln!("Error on line {line_num}: no notes provided");
            batch_has_errors = true;
            continue;
        }

        let tokens: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        let notes = match parse_and_validate_notes(&tokens) {
            Ok(notes) => notes,
            Err(err) => {
                eprintln!("Error on line {line_num}: {err}");
                batch_has_errors = true;
                continue;
            }
        };

        if keys {
            all_notes.extend(notes.iter().cloned());
        }

        let root = &notes[0];
        let intervals = compute_intervals(root, &notes);
        let matches = find_matches(&intervals);

        let rendered: Vec<String> = matches
            .iter()
            .map(|m| format_match(root, m, notes.len()))
            .collect();
        if rendered.is_empty() {
            println!("[{line_num}] {line} -> No match found");
        } else {
            println!("[{line_num}] {line} -> {}", rendered.join(", "));
        }
    }

    if keys {
        print_key_estimation(&all_notes);
    }

    if batch_has_errors {
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn format_match(root: &Note, m: &Match, note_count: usize) -> String {
    let mut s = format!("{} {}", root, m.name);
    if m.is_subset(note_count) {
        s.push_str(" (subset)");
    }
    s
}

fn print_matched_chords(root: &Note, notes: &[Note], matches: &[Match]) {
    println!("Matched Chords:");
    if matches.is_empty() {
        println!(" - None");
    } else {
        for m in matches {
            println!(" - {}", format_match(root, m, notes.len()));
        }
    }
    println!();
}

fn print_standard_output(root: &Note, notes: &[Note], intervals: &[u8], matches: &[Match]) {
    println!("Input Notes: {}", render(notes));
    println!("Root: {root}");
    println!("Intervals: {intervals:?}");
    print_matched_chords(root, notes, matches);
}

fn print_verbose_output(root: &Note, notes: &[Note], intervals: &[u8], matches: &[Match]) {
    println!("Input Notes: {}", render(notes));
    println!("Root: {root}");
    println!("Input Intervals: {intervals:?}");
    println!("---");
    println!("Checking Dictionary...");

    for def in dictionary() {
        match def.check(intervals) {
            Ok(()) => println!("✅ Match: {} {:?}", def.name, def.offsets),
            Err(reason) => println!("❌ No Match: {} {:?} ({reason})", def.name, def.offsets),
        }
    }

    println!("---");
    print_matched_chords(root, notes, matches);
}

fn print_key_estimation(all_notes: &[Note]) {
    println!("---");
    println!("Key Estimation Results");

    let mut unique = dedupe(all_notes);
    unique.sort_by_key(Note::pitch_class);
    println!("Aggregated Notes: {}", render(&unique));
    println!();

    let key_matches = estimate(&unique);
    if key_matches.is_empty() {
        println!("Could not determine likely keys.");
    } else {
        println!("Likely Keys:");
        for km in &key_matches {
            println!(" {} ({} matches)", km.name, km.match_count);
        }
    }
}
