// Built-in demonstration material.
//
// Two small compositions from the species-counterpoint literature, baked
// in so the critique binary has something to analyze without an input
// file and so tests and benches share one well-known ground truth: the
// dorian cantus firmus from Gradus ad Parnassum, alone and with Fux's
// own first-species counterpoint above it.

use gradus_score::{Composition, Meter, Placement, Position, RhythmicValue, Voice};
use gradus_theory::{KeySignature, Pitch};

const CANTUS_FIRMUS: [&str; 11] = [
    "D4", "F4", "E4", "D4", "G4", "F4", "A4", "G4", "F4", "E4", "D4",
];

// Fux's counterpoint above the dorian cantus firmus. The C sharp is his:
// the leading tone at the cadence steps outside the mode.
const COUNTERPOINT: [&str; 11] = [
    "A4", "A4", "G4", "A4", "B4", "C5", "C5", "B4", "D5", "C#5", "D5",
];

fn whole_note_voice(role: &str, names: &[&str]) -> Voice {
    let mut voice = Voice::new(role);
    for (i, name) in names.iter().enumerate() {
        // Compiled-in pitch literals, checked by the tests below.
        let pitch = Pitch::parse(name).unwrap();
        let position = Position::new(i as u32 + 1, 1);
        voice.insert(Placement::note(position, RhythmicValue::Whole, pitch));
    }
    voice
}

/// The dorian cantus firmus from Gradus ad Parnassum, one voice alone.
pub fn fux_dorian_cantus_firmus() -> Composition {
    let mut composition = Composition::new(
        "Gradus ad Parnassum, dorian cantus firmus",
        KeySignature::d_dorian(),
        Meter::common_time(),
    );
    composition.add_voice(whole_note_voice("cantus firmus", &CANTUS_FIRMUS));
    composition
}

/// The same cantus firmus with Fux's first-species counterpoint above it.
pub fn two_voice_first_species() -> Composition {
    let mut composition = Composition::new(
        "Gradus ad Parnassum, first species",
        KeySignature::d_dorian(),
        Meter::common_time(),
    );
    composition.add_voice(whole_note_voice("cantus firmus", &CANTUS_FIRMUS));
    composition.add_voice(whole_note_voice("counterpoint", &COUNTERPOINT));
    composition
}
