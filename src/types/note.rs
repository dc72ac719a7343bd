/// Pitch table and note event types
/// Fixed chromatic range C4..C6 (MIDI 60-84), frequencies rounded to whole Hz

/// Lowest MIDI note the buzzer table covers (C4, middle C)
pub const LOWEST_PITCH: u8 = 60;

/// Highest MIDI note the buzzer table covers (C6)
pub const HIGHEST_PITCH: u8 = 84;

/// Frequencies in Hz for MIDI notes 60..=84, indexed by `pitch - LOWEST_PITCH`
const FREQUENCIES_HZ: [u16; 25] = [
    262, 277, 294, 311, 330, 349, 370, 392, 415, 440, 466, 494, 523, 554, 587, 622, 659, 698, 740,
    784, 831, 880, 932, 988, 1047,
];

/// Look up the tone frequency for a MIDI note number
/// Returns None for pitches outside the 60-84 table range
pub fn frequency_for(pitch: u8) -> Option<u16> {
    if !(LOWEST_PITCH..=HIGHEST_PITCH).contains(&pitch) {
        return None;
    }
    Some(FREQUENCIES_HZ[(pitch - LOWEST_PITCH) as usize])
}

/// A single playable note ready for emission: frequency plus the time
/// elapsed since the previous MIDI event, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteEvent {
    pub frequency_hz: u16,
    pub duration_ms: u32,
}
