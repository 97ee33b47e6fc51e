// Modes and key signatures.
//
// Renaissance-era melody lives in the church modes, not modern major/minor
// tonality. A key signature here is a tonic spelling plus a mode; together
// they determine the diatonic pitch-class set that rules test membership
// against.
//
// Membership is computed from the mode's interval pattern on demand (a
// seven-entry loop), so there is no shared cache to invalidate. Callers that
// test many pitches against one signature hoist `pitch_classes()` into a
// local.

use crate::spelling::{Letter, Spelling};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The church modes, each defined by its interval pattern from the tonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// D Dorian: D E F G A B C D  (natural minor with raised 6th)
    Dorian,
    /// E Phrygian: E F G A B C D E  (half-step from 1 to 2)
    Phrygian,
    /// F Lydian: F G A B C D E F  (raised 4th)
    Lydian,
    /// G Mixolydian: G A B C D E F G  (major with lowered 7th)
    Mixolydian,
    /// A Aeolian: A B C D E F G A  (natural minor)
    Aeolian,
    /// C Ionian: C D E F G A B C  (the major scale)
    Ionian,
}

impl Mode {
    /// Semitone offsets from the tonic to each of the seven scale degrees.
    pub fn intervals(self) -> [u8; 7] {
        match self {
            Mode::Dorian => [0, 2, 3, 5, 7, 9, 10],
            Mode::Phrygian => [0, 1, 3, 5, 7, 8, 10],
            Mode::Lydian => [0, 2, 4, 6, 7, 9, 11],
            Mode::Mixolydian => [0, 2, 4, 5, 7, 9, 10],
            Mode::Aeolian => [0, 2, 3, 5, 7, 8, 10],
            Mode::Ionian => [0, 2, 4, 5, 7, 9, 11],
        }
    }

    /// Lowercase display name.
    pub fn name(self) -> &'static str {
        match self {
            Mode::Dorian => "dorian",
            Mode::Phrygian => "phrygian",
            Mode::Lydian => "lydian",
            Mode::Mixolydian => "mixolydian",
            Mode::Aeolian => "aeolian",
            Mode::Ionian => "ionian",
        }
    }

    /// Parse a mode name, case-insensitively. "major" and "minor" are
    /// accepted as aliases for ionian and aeolian.
    pub fn parse(s: &str) -> Option<Mode> {
        match s.to_ascii_lowercase().as_str() {
            "dorian" => Some(Mode::Dorian),
            "phrygian" => Some(Mode::Phrygian),
            "lydian" => Some(Mode::Lydian),
            "mixolydian" => Some(Mode::Mixolydian),
            "aeolian" | "minor" => Some(Mode::Aeolian),
            "ionian" | "major" => Some(Mode::Ionian),
            _ => None,
        }
    }
}

/// A key signature: a tonic spelling plus a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySignature {
    tonic: Spelling,
    mode: Mode,
}

impl KeySignature {
    pub fn new(tonic: Spelling, mode: Mode) -> Self {
        KeySignature { tonic, mode }
    }

    /// D dorian, the workhorse key of species-counterpoint exercises.
    pub fn d_dorian() -> Self {
        KeySignature::new(Spelling::natural(Letter::D), Mode::Dorian)
    }

    pub fn tonic_spelling(&self) -> Spelling {
        self.tonic
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The diatonic pitch classes of this signature, as a boolean array
    /// indexed by absolute pitch class 0-11 (0 = C).
    pub fn pitch_classes(&self) -> [bool; 12] {
        let tonic_pc = self.tonic.pitch_class();
        let mut pcs = [false; 12];
        for &interval in &self.mode.intervals() {
            pcs[usize::from((tonic_pc + interval) % 12)] = true;
        }
        pcs
    }

    /// Whether an absolute pitch class (0-11) is diatonic to this signature.
    pub fn contains(&self, pitch_class: u8) -> bool {
        self.pitch_classes()[usize::from(pitch_class % 12)]
    }
}

impl fmt::Display for KeySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tonic, self.mode.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pitch::Pitch;

    #[test]
    fn test_d_dorian_membership() {
        let key = KeySignature::d_dorian();
        // D E F G A B C, the white keys from D.
        for name in ["D4", "E4", "F4", "G4", "A4", "B4", "C5"] {
            let p = Pitch::parse(name).unwrap();
            assert!(
                key.contains(p.spelling().pitch_class()),
                "{} should be diatonic in D dorian",
                name
            );
        }
        for name in ["Eb4", "F#4", "Bb4", "C#5"] {
            let p = Pitch::parse(name).unwrap();
            assert!(
                !key.contains(p.spelling().pitch_class()),
                "{} should not be diatonic in D dorian",
                name
            );
        }
    }

    #[test]
    fn test_transposed_mode() {
        // G dorian has Bb instead of B.
        let key = KeySignature::new(Spelling::parse("G").unwrap(), Mode::Dorian);
        assert!(key.contains(10)); // Bb
        assert!(!key.contains(11)); // B
        assert!(key.contains(7)); // G itself
    }

    #[test]
    fn test_phrygian_half_step() {
        let key = KeySignature::new(Spelling::parse("E").unwrap(), Mode::Phrygian);
        assert!(key.contains(4)); // E
        assert!(key.contains(5)); // F, one semitone up
        assert!(!key.contains(6)); // F#
    }

    #[test]
    fn test_mode_aliases() {
        assert_eq!(Mode::parse("major"), Some(Mode::Ionian));
        assert_eq!(Mode::parse("minor"), Some(Mode::Aeolian));
        assert_eq!(Mode::parse("Dorian"), Some(Mode::Dorian));
        assert_eq!(Mode::parse("locrian"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(KeySignature::d_dorian().to_string(), "D dorian");
        let eb = KeySignature::new(Spelling::parse("Eb").unwrap(), Mode::Ionian);
        assert_eq!(eb.to_string(), "Eb ionian");
    }
}
