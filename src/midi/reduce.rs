use midly::{Header, MetaMessage, MidiMessage, Timing, Track, TrackEventKind};

use crate::error::ConvertError;
use crate::types::note::{self, NoteEvent};

/// MIDI default tempo in microseconds per quarter note (120 BPM)
pub const DEFAULT_TEMPO: u32 = 500_000;

/// Default cap on the emitted note sequence
pub const DEFAULT_MAX_NOTES: usize = 100;

/// Substitute for notes whose delta-time converts to 0 ms
pub const DEFAULT_DURATION_MS: u32 = 100;

/// Tunable reduction knobs, all with the reference defaults
#[derive(Debug, Clone, Copy)]
pub struct ReduceOptions {
    pub max_notes: usize,
    pub default_duration_ms: u32,
}

impl Default for ReduceOptions {
    fn default() -> Self {
        Self {
            max_notes: DEFAULT_MAX_NOTES,
            default_duration_ms: DEFAULT_DURATION_MS,
        }
    }
}

/// Extract the file's ticks-per-beat constant from the SMF header
/// SMPTE-timecode files are rejected up front; the reducer itself never fails
pub fn ticks_per_beat(header: &Header) -> Result<u16, ConvertError> {
    match header.timing {
        Timing::Metrical(tpb) => Ok(tpb.as_int()),
        Timing::Timecode(..) => Err(ConvertError::SmpteTiming),
    }
}

/// Reduce parsed MIDI tracks to a flat sequence of playable notes
///
/// Single linear pass in file order. The running tempo starts at 120 BPM,
/// follows every SetTempo meta event, and carries across track boundaries
/// (tracks are scanned one after another, not merged by absolute time, so
/// a tempo change in a later track never reaches back into notes already
/// converted). Each note-on with velocity > 0 and a pitch inside the tone
/// table becomes one note; its duration is the event's own delta-time
/// converted to milliseconds. Deltas of skipped events are discarded, not
/// folded into the next note.
pub fn reduce(tracks: &[Track], ticks_per_beat: u16, options: &ReduceOptions) -> Vec<NoteEvent> {
    let mut tempo = DEFAULT_TEMPO;
    let mut notes = Vec::new();

    for track in tracks {
        for event in track {
            match event.kind {
                TrackEventKind::Meta(MetaMessage::Tempo(t)) => {
                    tempo = t.as_int();
                }
                TrackEventKind::Midi {
                    message: MidiMessage::NoteOn { key, vel },
                    ..
                } if vel.as_int() > 0 => {
                    let Some(frequency_hz) = note::frequency_for(key.as_int()) else {
                        continue;
                    };
                    // ticks * (us / quarter) / (ticks / quarter) = us; / 1000 = ms
                    let micros = u64::from(event.delta.as_int()) * u64::from(tempo);
                    let duration_ms = (micros / (u64::from(ticks_per_beat) * 1000)) as u32;
                    notes.push(NoteEvent {
                        frequency_hz,
                        duration_ms: if duration_ms == 0 {
                            options.default_duration_ms
                        } else {
                            duration_ms
                        },
                    });
                }
                _ => {}
            }
        }
    }

    notes.truncate(options.max_notes);
    notes
}
