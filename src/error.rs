use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal conditions for a single conversion run
///
/// Everything here aborts the run with no output artifact. Unplayable
/// pitches, velocity-0 note-ons and zero-length durations are not errors;
/// the reducer normalizes them silently.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Configured base folder does not exist
    #[error("base folder does not exist: {}", .0.display())]
    BaseDirMissing(PathBuf),

    /// Input MIDI file does not exist
    #[error("MIDI file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// Input file exists but could not be read
    #[error("could not read MIDI file {}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Malformed MIDI container
    #[error("malformed MIDI data: {0}")]
    Parse(#[from] midly::Error),

    /// SMPTE-timecode files carry no ticks-per-beat value to convert with
    #[error("SMPTE timecode timing is not supported, only metrical (ticks per beat) files")]
    SmpteTiming,

    /// Destination could not be written or verified after writing
    #[error("could not write sketch to {}", path.display())]
    WriteSketch {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
