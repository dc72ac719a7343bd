//! Render the reduced note sequence into an Arduino sketch.
//!
//! The sketch embeds two parallel `const int` arrays and a fixed playback
//! loop around `tone()`. Everything except the array contents, the pin
//! number and the inter-note gap multiplier is a fixed template.

use std::fs;
use std::path::Path;

use crate::error::ConvertError;
use crate::types::note::NoteEvent;

/// Render the full sketch text for a note sequence
/// An empty sequence still yields a complete sketch with `{}` arrays
pub fn render_sketch(notes: &[NoteEvent], pin: u8, gap_multiplier: f32) -> String {
    let melody = join_values(notes.iter().map(|n| n.frequency_hz.to_string()));
    let durations = join_values(notes.iter().map(|n| n.duration_ms.to_string()));

    let mut sketch = String::new();
    sketch.push_str(&format!("const int melody[] = {{{melody}}};\n"));
    sketch.push_str(&format!("const int durations[] = {{{durations}}};\n\n"));
    sketch.push_str("int melodyLength = sizeof(melody) / sizeof(melody[0]);\n");
    sketch.push_str("void setup() {\n");
    sketch.push_str("  for (int i = 0; i < melodyLength; i++) {\n");
    sketch.push_str(&format!("    tone({pin}, melody[i], durations[i]);\n"));
    sketch.push_str(&format!("    delay(durations[i] * {gap_multiplier});\n"));
    sketch.push_str("  }\n");
    sketch.push_str("}\nvoid loop() {}\n");
    sketch
}

fn join_values(values: impl Iterator<Item = String>) -> String {
    values.collect::<Vec<_>>().join(",")
}

/// Write the rendered sketch, overwriting any existing file at the path
pub fn write_sketch(path: &Path, sketch: &str) -> Result<(), ConvertError> {
    fs::write(path, sketch).map_err(|source| ConvertError::WriteSketch {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(frequency_hz: u16, duration_ms: u32) -> NoteEvent {
        NoteEvent {
            frequency_hz,
            duration_ms,
        }
    }

    #[test]
    fn test_arrays_hold_one_value_per_note() {
        let notes = vec![note(262, 500), note(440, 250), note(1047, 100)];
        let sketch = render_sketch(&notes, 4, 1.1);
        assert!(sketch.contains("const int melody[] = {262,440,1047};"));
        assert!(sketch.contains("const int durations[] = {500,250,100};"));
    }

    #[test]
    fn test_empty_sequence_is_still_a_complete_sketch() {
        let sketch = render_sketch(&[], 4, 1.1);
        assert!(sketch.contains("const int melody[] = {};"));
        assert!(sketch.contains("const int durations[] = {};"));
        assert!(sketch.contains("int melodyLength = sizeof(melody) / sizeof(melody[0]);"));
        assert!(sketch.ends_with("void loop() {}\n"));
    }

    #[test]
    fn test_pin_and_gap_are_configurable() {
        let sketch = render_sketch(&[note(440, 500)], 8, 1.25);
        assert!(sketch.contains("tone(8, melody[i], durations[i]);"));
        assert!(sketch.contains("delay(durations[i] * 1.25);"));
    }

    #[test]
    fn test_reference_gap_multiplier_formatting() {
        let sketch = render_sketch(&[note(440, 500)], 4, 1.1);
        assert!(sketch.contains("delay(durations[i] * 1.1);"));
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let path = std::env::temp_dir().join("mid2ino_emit_overwrite_test.ino");
        write_sketch(&path, "first, longer content\n").unwrap();
        write_sketch(&path, "second\n").unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "second\n");
        let _ = fs::remove_file(&path);
    }
}
