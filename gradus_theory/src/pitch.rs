// Spelled pitches with an octave register.
//
// A pitch is a spelling anchored to a scientific octave register: D4, F#3,
// Bb5. The register belongs to the letter, not the sounding frequency, so
// Cb4 sounds a semitone below C4 and B#3 sounds at C4. Two views of
// equivalence coexist:
// - enharmonic: same sounding semitone, possibly different spelling
//   (C#4 ~ Db4)
// - octave: same spelling, any register (D3 ~ D4)
//
// Ordering is by sounding frequency first (semitone index), with the
// diatonic letter rank as a tie-break so that `Ord` stays a total order
// consistent with `Eq`: enharmonic spellings are distinct values that sort
// adjacently.

use crate::spelling::Spelling;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A spelled pitch: spelling + octave register (scientific notation, C4 = 60).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pitch {
    pub spelling: Spelling,
    pub register: i32,
}

impl Pitch {
    pub fn new(spelling: Spelling, register: i32) -> Self {
        Pitch { spelling, register }
    }

    pub fn spelling(self) -> Spelling {
        self.spelling
    }

    pub fn register(self) -> i32 {
        self.register
    }

    /// Sounding position in equal-tempered semitones, aligned with MIDI
    /// numbering (C4 = 60). The accidental is applied after the register,
    /// so B#3 lands on 60 and Cb4 on 59.
    pub fn semitone_index(self) -> i32 {
        (self.register + 1) * 12
            + self.spelling.letter.natural_semitones()
            + self.spelling.accidental.semitones()
    }

    /// Position on the diatonic letter staircase (C0 = 0, D0 = 1, ... B0 = 6,
    /// C1 = 7). Interval numbers are differences of this rank plus one.
    pub fn letter_rank(self) -> i32 {
        self.register * 7 + i32::from(self.spelling.letter.index())
    }

    /// Same sounding semitone, regardless of spelling.
    pub fn is_enharmonic(self, other: Pitch) -> bool {
        self.semitone_index() == other.semitone_index()
    }

    /// Same spelling, any register.
    pub fn is_octave_equivalent(self, other: Pitch) -> bool {
        self.spelling == other.spelling
    }

    /// Parse compact scientific notation: "D4", "F#3", "Bb5", "C-1".
    /// Returns None for anything malformed.
    pub fn parse(s: &str) -> Option<Pitch> {
        let split = s
            .char_indices()
            .skip(1)
            .find(|&(_, c)| c.is_ascii_digit() || c == '-')
            .map(|(i, _)| i)?;
        let spelling = Spelling::parse(&s[..split])?;
        let register = s[split..].parse().ok()?;
        Some(Pitch { spelling, register })
    }
}

impl Ord for Pitch {
    fn cmp(&self, other: &Self) -> Ordering {
        self.semitone_index()
            .cmp(&other.semitone_index())
            .then(self.letter_rank().cmp(&other.letter_rank()))
    }
}

impl PartialOrd for Pitch {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.spelling, self.register)
    }
}
