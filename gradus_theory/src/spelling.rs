// Letters, accidentals, and spellings.
//
// A spelling is a letter name plus an accidental ("F#", "Bb", "C") with no
// octave attached. Spellings carry the pitch-class arithmetic that underlies
// interval quality: two spellings a letter step apart may be anywhere from
// zero to four semitones apart, and the interval code needs both distances.
//
// Parsing returns Option rather than panicking: a malformed spelling is an
// absence, not an error condition.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The seven letter names in ascending order within an octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    pub const ALL: [Letter; 7] = [
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
        Letter::A,
        Letter::B,
    ];

    /// Zero-based index in letter order (C = 0 .. B = 6).
    pub fn index(self) -> u8 {
        match self {
            Letter::C => 0,
            Letter::D => 1,
            Letter::E => 2,
            Letter::F => 3,
            Letter::G => 4,
            Letter::A => 5,
            Letter::B => 6,
        }
    }

    /// Semitones above C for the natural (unaltered) letter.
    pub fn natural_semitones(self) -> i32 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    pub fn from_char(c: char) -> Option<Letter> {
        match c.to_ascii_uppercase() {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        }
    }
}

/// Accidental alteration, from double flat to double sharp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accidental {
    DoubleFlat,
    Flat,
    Natural,
    Sharp,
    DoubleSharp,
}

impl Accidental {
    /// Semitone offset applied to the natural letter (-2 .. +2).
    pub fn semitones(self) -> i32 {
        match self {
            Accidental::DoubleFlat => -2,
            Accidental::Flat => -1,
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::DoubleSharp => 2,
        }
    }

    /// The suffix used in compact notation ("" for natural).
    pub fn suffix(self) -> &'static str {
        match self {
            Accidental::DoubleFlat => "bb",
            Accidental::Flat => "b",
            Accidental::Natural => "",
            Accidental::Sharp => "#",
            Accidental::DoubleSharp => "##",
        }
    }

    fn from_suffix(s: &str) -> Option<Accidental> {
        match s {
            "" => Some(Accidental::Natural),
            "#" => Some(Accidental::Sharp),
            "##" | "x" => Some(Accidental::DoubleSharp),
            "b" => Some(Accidental::Flat),
            "bb" => Some(Accidental::DoubleFlat),
            _ => None,
        }
    }
}

/// A letter plus an accidental: a pitch name without an octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Spelling {
    pub letter: Letter,
    pub accidental: Accidental,
}

impl Spelling {
    pub fn new(letter: Letter, accidental: Accidental) -> Self {
        Spelling { letter, accidental }
    }

    /// A natural spelling for the given letter.
    pub fn natural(letter: Letter) -> Self {
        Spelling::new(letter, Accidental::Natural)
    }

    /// Pitch class 0-11, where C = 0.
    pub fn pitch_class(self) -> u8 {
        (self.letter.natural_semitones() + self.accidental.semitones()).rem_euclid(12) as u8
    }

    /// Parse a compact spelling like "C", "F#", "Bb", "E##", "Abb".
    /// Returns None for anything else.
    pub fn parse(s: &str) -> Option<Spelling> {
        let mut chars = s.chars();
        let letter = Letter::from_char(chars.next()?)?;
        let accidental = Accidental::from_suffix(chars.as_str())?;
        Some(Spelling { letter, accidental })
    }
}

impl fmt::Display for Spelling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter.as_char(), self.accidental.suffix())
    }
}
