//! # Note Names
//!
//! The 88-key piano table (A0 to C8) used to key per-note tonefield
//! geometries and to label hit point records. Sharps are canonical; flats are
//! accepted on input and mapped to their enharmonic sharp (`Bb2` -> `A#2`).

use once_cell::sync::Lazy;
use std::collections::BTreeMap;

use crate::error::{Result, TonefieldError};

/// A single key of the piano.
#[derive(Debug, Clone)]
pub struct Note {
    /// Canonical name, e.g. "A4" or "C#3".
    pub name: String,
    /// Equal temperament frequency with A4 = 440 Hz.
    pub frequency: f64,
}

const NOTE_NAMES: [&str; 12] = [
    "A", "A#", "B", "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#",
];

/// All 88 keys, index 0 is A0.
static NOTES: Lazy<Vec<Note>> = Lazy::new(|| {
    (0..88)
        .map(|i| {
            // A4 is key index 48.
            let frequency = 440.0 * 2.0_f64.powf((i as f64 - 48.0) / 12.0);
            // The octave number changes at C.
            let octave = (i + 9) / 12;
            Note {
                name: format!("{}{}", NOTE_NAMES[i % 12], octave),
                frequency,
            }
        })
        .collect()
});

static NOTE_MAP: Lazy<BTreeMap<String, u8>> = Lazy::new(|| {
    NOTES
        .iter()
        .enumerate()
        .map(|(i, note)| (note.name.clone(), i as u8))
        .collect()
});

/// Rewrites a flat spelling to its sharp equivalent, leaving everything else
/// untouched. Returns `None` for input that is not a note name at all.
fn sharpen(name: &str) -> Option<String> {
    let name = name.trim();
    let mut chars = name.chars();
    let letter = chars.next()?.to_ascii_uppercase();
    if !('A'..='G').contains(&letter) {
        return None;
    }
    let rest: String = chars.collect();

    let (accidental, octave) = match rest.chars().next() {
        Some('#') => ("#", &rest[1..]),
        Some('b') => ("b", &rest[1..]),
        _ => ("", rest.as_str()),
    };
    let octave: u8 = octave.parse().ok()?;

    if accidental != "b" {
        return Some(format!("{letter}{accidental}{octave}"));
    }

    // Flats: step one semitone down. Cb belongs to the octave below.
    let index = NOTE_NAMES.iter().position(|n| *n == letter.to_string())?;
    let lowered = NOTE_NAMES[(index + 11) % 12];
    let octave = if letter == 'C' { octave.checked_sub(1)? } else { octave };
    Some(format!("{lowered}{octave}"))
}

/// Canonical spelling of a note name, or [`TonefieldError::UnknownNote`] when
/// it is not one of the 88 keys.
pub fn canonical_name(name: &str) -> Result<String> {
    sharpen(name)
        .filter(|canonical| NOTE_MAP.contains_key(canonical))
        .ok_or_else(|| TonefieldError::UnknownNote(name.to_string()))
}

/// Piano key index (0-87) for a note name in any accepted spelling.
pub fn key_index(name: &str) -> Option<u8> {
    let canonical = sharpen(name)?;
    NOTE_MAP.get(&canonical).copied()
}

/// Looks up a key by its index.
pub fn note_by_index(key_index: u8) -> Option<&'static Note> {
    NOTES.get(key_index as usize)
}
