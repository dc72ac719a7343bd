pub mod reduce;

use std::fs;
use std::path::Path;

use midly::Smf;

use crate::error::ConvertError;

/// Read a Standard MIDI File from disk into raw bytes
pub fn read_file(path: &Path) -> Result<Vec<u8>, ConvertError> {
    fs::read(path).map_err(|source| ConvertError::ReadInput {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse SMF bytes into a header and track list
/// Any decoding failure surfaces as a single captured parse error
pub fn parse(data: &[u8]) -> Result<Smf<'_>, ConvertError> {
    Smf::parse(data).map_err(ConvertError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::midi::reduce::{self, ReduceOptions};
    use midly::num::{u4, u7, u15, u28};
    use midly::{Format, Header, MidiMessage, Timing, TrackEvent, TrackEventKind};

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse(b"not a midi file"),
            Err(ConvertError::Parse(_))
        ));
    }

    #[test]
    fn test_read_file_missing_path() {
        let err = read_file(Path::new("/nonexistent/melody.mid")).unwrap_err();
        assert!(matches!(err, ConvertError::ReadInput { .. }));
    }

    #[test]
    fn test_built_smf_round_trips_into_reducer() {
        // Serialize a one-note file through midly and reduce the parsed copy
        let mut smf = Smf::new(Header::new(
            Format::SingleTrack,
            Timing::Metrical(u15::new(480)),
        ));
        smf.tracks.push(vec![TrackEvent {
            delta: u28::new(480),
            kind: TrackEventKind::Midi {
                channel: u4::new(0),
                message: MidiMessage::NoteOn {
                    key: u7::new(69),
                    vel: u7::new(80),
                },
            },
        }]);

        let mut bytes = Vec::new();
        smf.write(&mut bytes).unwrap();

        let parsed = parse(&bytes).unwrap();
        let tpb = reduce::ticks_per_beat(&parsed.header).unwrap();
        let notes = reduce::reduce(&parsed.tracks, tpb, &ReduceOptions::default());
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].frequency_hz, 440);
        assert_eq!(notes[0].duration_ms, 500);
    }
}
