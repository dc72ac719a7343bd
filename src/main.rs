mod config;
mod emit;
mod error;
mod midi;
mod types;

use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use config::ConvertConfig;
use error::ConvertError;

/// Convert a MIDI melody into an Arduino tone() sketch
#[derive(Parser, Debug)]
#[command(name = "mid2ino")]
#[command(about = "Convert a Standard MIDI File into an Arduino buzzer sketch", long_about = None)]
struct Args {
    /// Configuration file (YAML)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Folder holding the MIDI file and the generated sketch
    #[arg(long = "base-dir")]
    base_dir: Option<PathBuf>,

    /// Input MIDI file name, relative to the base folder
    #[arg(short = 'i', long = "input")]
    input: Option<String>,

    /// Output sketch file name, relative to the base folder
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    /// Arduino pin wired to the buzzer
    #[arg(long = "pin")]
    pin: Option<u8>,

    /// Open the base folder in the file browser after a successful run
    #[arg(long = "reveal")]
    reveal: bool,
}

/// What a successful run produced, for the final report
struct Summary {
    output_path: PathBuf,
    bytes_written: u64,
    note_count: usize,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Configuration error: {err:#}");
            std::process::exit(1);
        }
    };

    println!("=== MIDI to Arduino converter ===");
    println!("Base folder: {}", config.base_dir.display());

    match run(&config) {
        Ok(summary) => {
            println!("\nSketch generated successfully!");
            println!("Location: {}", summary.output_path.display());
            println!("Size: {} bytes", summary.bytes_written);
            println!("Notes converted: {}", summary.note_count);
            if args.reveal {
                reveal_in_file_browser(&config.base_dir);
            }
        }
        Err(err) => {
            report_failure(&config, &err);
            std::process::exit(1);
        }
    }
}

/// Merge the optional YAML config with CLI overrides and validate the result
fn build_config(args: &Args) -> anyhow::Result<ConvertConfig> {
    let mut config = match &args.config {
        Some(path) => ConvertConfig::load(path)?,
        None => ConvertConfig::default(),
    };

    if let Some(base_dir) = &args.base_dir {
        config.base_dir = base_dir.clone();
    }
    if let Some(input) = &args.input {
        config.input = input.clone();
    }
    if let Some(output) = &args.output {
        config.output = output.clone();
    }
    if let Some(pin) = args.pin {
        config.pin = pin;
    }

    config.validate()?;
    Ok(config)
}

/// One full conversion pass: check preconditions, reduce, emit, verify
fn run(config: &ConvertConfig) -> Result<Summary, ConvertError> {
    if !config.base_dir.is_dir() {
        return Err(ConvertError::BaseDirMissing(config.base_dir.clone()));
    }

    let midi_path = config.midi_path();
    if !midi_path.is_file() {
        return Err(ConvertError::InputNotFound(midi_path));
    }

    println!("Processing MIDI file: {}", config.input);
    let data = midi::read_file(&midi_path)?;
    let smf = midi::parse(&data)?;
    let ticks_per_beat = midi::reduce::ticks_per_beat(&smf.header)?;
    log::debug!(
        "parsed {} tracks, {} ticks per beat",
        smf.tracks.len(),
        ticks_per_beat
    );

    let notes = midi::reduce::reduce(&smf.tracks, ticks_per_beat, &config.reduce_options());
    if notes.is_empty() {
        log::warn!("no playable notes found in {}", config.input);
    }

    let output_path = config.output_path();
    println!("Generating sketch: {}", output_path.display());
    let sketch = emit::render_sketch(&notes, config.pin, config.gap_multiplier);
    emit::write_sketch(&output_path, &sketch)?;

    // Post-write verification: the file must exist and have a measurable size
    let bytes_written = fs::metadata(&output_path)
        .map_err(|source| ConvertError::WriteSketch {
            path: output_path.clone(),
            source,
        })?
        .len();

    Ok(Summary {
        output_path,
        bytes_written,
        note_count: notes.len(),
    })
}

/// Print the terminal error plus variant-specific remediation hints
fn report_failure(config: &ConvertConfig, err: &ConvertError) {
    eprintln!("\nERROR: {err}");

    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }

    match err {
        ConvertError::BaseDirMissing(_) => {
            eprintln!("\nCreate the folder or fix the configured base directory.");
        }
        ConvertError::InputNotFound(_) => {
            let candidates = list_midi_files(&config.base_dir);
            if candidates.is_empty() {
                eprintln!("\nNo .mid or .midi files found in {}", config.base_dir.display());
            } else {
                eprintln!("\nMIDI files available in the folder:");
                for name in candidates {
                    eprintln!("- {name}");
                }
            }
            eprintln!("\nTo fix:");
            eprintln!("1. Place your MIDI file in: {}", config.base_dir.display());
            eprintln!("2. Check the input file name (current: '{}')", config.input);
        }
        ConvertError::WriteSketch { .. } => {
            eprintln!("\nTo fix:");
            eprintln!("1. Close the Arduino IDE if it has the sketch open");
            eprintln!("2. Check write permissions on the base folder");
        }
        _ => {}
    }
}

/// List MIDI files in a folder, matching extensions case-insensitively
fn list_midi_files(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| {
            Path::new(name)
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| {
                    ext.eq_ignore_ascii_case("mid") || ext.eq_ignore_ascii_case("midi")
                })
        })
        .collect();

    names.sort();
    names
}

/// Best-effort: open the base folder in the platform file browser
/// Failure is logged and otherwise ignored
fn reveal_in_file_browser(dir: &Path) {
    let browser = if cfg!(target_os = "windows") {
        "explorer"
    } else if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    };

    if let Err(err) = Command::new(browser).arg(dir).spawn() {
        log::debug!("could not open file browser with {browser}: {err}");
    }
}
