// Diatonic and melodic intervals.
//
// A diatonic interval is a 1-based letter-step count (the "number") plus a
// quality. The two together determine the semitone width; equality is by
// (number, quality), never by semitones alone: the augmented fourth and the
// diminished fifth are six semitones each and are not the same interval.
//
// Quality derivation: each number has a default width (major for seconds,
// thirds, sixths, sevenths; perfect for unisons, fourths, fifths, octaves).
// The actual width's offset from the default selects the quality:
//
//   perfect class:  -1 diminished | 0 perfect | +1 augmented
//   major class:    -2 diminished | -1 minor | 0 major | +1 augmented
//
// Offsets outside those ranges have no quality in this five-class system,
// so construction from pitches returns None for them (triple-augmented and
// friends are an absence, not a panic).
//
// Compound intervals (number > 8) reduce to a simple form for comparisons
// and consonance classification. The reduction maps multiples of the octave
// to 8, not 1: a fifteenth is two octaves, and octaves stay octaves.
//
// Shorthand notation ("m3", "P8", "d7", "A4") parses and renders losslessly
// for every valid number/quality pair. The diminished unison is rejected;
// an interval cannot be smaller than nothing.

use crate::pitch::Pitch;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Interval quality, ordered narrowest to widest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Diminished,
    Minor,
    Major,
    Perfect,
    Augmented,
}

impl Quality {
    /// The single-letter shorthand code.
    pub fn code(self) -> char {
        match self {
            Quality::Diminished => 'd',
            Quality::Minor => 'm',
            Quality::Major => 'M',
            Quality::Perfect => 'P',
            Quality::Augmented => 'A',
        }
    }

    fn from_code(c: char) -> Option<Quality> {
        match c {
            'd' => Some(Quality::Diminished),
            'm' => Some(Quality::Minor),
            'M' => Some(Quality::Major),
            'P' => Some(Quality::Perfect),
            'A' => Some(Quality::Augmented),
            _ => None,
        }
    }
}

/// Default (major/perfect) semitone widths for simple numbers 1-7,
/// indexed by (number - 1) % 7.
const DEFAULT_SEMITONES: [i32; 7] = [0, 2, 4, 5, 7, 9, 11];

/// A diatonic interval: 1-based number plus quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiatonicInterval {
    number: u8,
    quality: Quality,
}

impl DiatonicInterval {
    /// Construct from a number and quality, validating that the quality is
    /// possible for that number's class. Rejects the diminished unison.
    pub fn new(number: u8, quality: Quality) -> Option<DiatonicInterval> {
        if number == 0 {
            return None;
        }
        if number == 1 && quality == Quality::Diminished {
            return None;
        }
        let valid = if perfect_class(simple_number_of(number)) {
            matches!(
                quality,
                Quality::Diminished | Quality::Perfect | Quality::Augmented
            )
        } else {
            matches!(
                quality,
                Quality::Diminished | Quality::Minor | Quality::Major | Quality::Augmented
            )
        };
        valid.then_some(DiatonicInterval { number, quality })
    }

    /// The interval between two pitches, lower to higher. Order of the
    /// arguments does not matter. Returns None when the spelled distance
    /// falls outside the five quality classes.
    pub fn between(a: Pitch, b: Pitch) -> Option<DiatonicInterval> {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let number = u8::try_from(high.letter_rank() - low.letter_rank() + 1).ok()?;
        let semitones = high.semitone_index() - low.semitone_index();
        let offset = semitones - default_semitones(number);
        let quality = if perfect_class(simple_number_of(number)) {
            match offset {
                -1 => Quality::Diminished,
                0 => Quality::Perfect,
                1 => Quality::Augmented,
                _ => return None,
            }
        } else {
            match offset {
                -2 => Quality::Diminished,
                -1 => Quality::Minor,
                0 => Quality::Major,
                1 => Quality::Augmented,
                _ => return None,
            }
        };
        DiatonicInterval::new(number, quality)
    }

    /// Parse shorthand like "m3", "P8", "d7", "A4", "M10".
    pub fn parse(s: &str) -> Option<DiatonicInterval> {
        let mut chars = s.chars();
        let quality = Quality::from_code(chars.next()?)?;
        let rest = chars.as_str();
        if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let number: u8 = rest.parse().ok()?;
        DiatonicInterval::new(number, quality)
    }

    pub fn number(self) -> u8 {
        self.number
    }

    pub fn quality(self) -> Quality {
        self.quality
    }

    /// Width in equal-tempered semitones, derived from number and quality.
    pub fn semitones(self) -> i32 {
        let offset = if perfect_class(self.simple_number()) {
            match self.quality {
                Quality::Diminished => -1,
                Quality::Perfect => 0,
                Quality::Augmented => 1,
                // new() admits only the three perfect-class qualities here
                Quality::Minor | Quality::Major => {
                    unreachable!("minor/major quality on a perfect-class number")
                }
            }
        } else {
            match self.quality {
                Quality::Diminished => -2,
                Quality::Minor => -1,
                Quality::Major => 0,
                Quality::Augmented => 1,
                Quality::Perfect => {
                    unreachable!("perfect quality on a major-class number")
                }
            }
        };
        default_semitones(self.number) + offset
    }

    /// The simple (within-one-octave) number this interval reduces to.
    /// Exact multiples of the octave reduce to 8, not 1.
    pub fn simple_number(self) -> u8 {
        simple_number_of(self.number)
    }

    /// The simple interval this one reduces to. A P11 reduces to a P4; a
    /// P15 reduces to a P8. Simple intervals reduce to themselves.
    pub fn simple(self) -> DiatonicInterval {
        DiatonicInterval {
            number: self.simple_number(),
            quality: self.quality,
        }
    }

    pub fn is_simple(self) -> bool {
        self.number <= 8
    }

    pub fn is_compound(self) -> bool {
        self.number > 8
    }

    /// True for unisons, fourths, fifths, and octaves (and their compounds).
    pub fn is_perfect_class(self) -> bool {
        perfect_class(self.simple_number())
    }
}

impl fmt::Display for DiatonicInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.quality.code(), self.number)
    }
}

fn perfect_class(simple_number: u8) -> bool {
    matches!(simple_number, 1 | 4 | 5 | 8)
}

fn simple_number_of(number: u8) -> u8 {
    if number > 1 && (number - 1) % 7 == 0 {
        8
    } else {
        (number - 1) % 7 + 1
    }
}

/// Default width for a possibly-compound number: the simple default plus
/// twelve semitones per crossed octave. Uses the raw seven-step reduction,
/// not the octave-preserving one (an octave is 0 + 12, not special).
fn default_semitones(number: u8) -> i32 {
    let octaves = i32::from((number - 1) / 7);
    DEFAULT_SEMITONES[usize::from((number - 1) % 7)] + 12 * octaves
}

/// Which way a melodic interval moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ascending,
    Descending,
    /// Zero sounding distance: the same pitch restated. Distinct from both
    /// ascending and descending; a repetition reverses nothing.
    Repetition,
}

impl Direction {
    /// The opposite direction. A repetition has no opposite and maps to
    /// itself.
    pub fn reversed(self) -> Direction {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
            Direction::Repetition => Direction::Repetition,
        }
    }
}

/// A diatonic interval with a direction: the move from one note to the next
/// in a melody.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MelodicInterval {
    pub interval: DiatonicInterval,
    pub direction: Direction,
}

impl MelodicInterval {
    /// The melodic interval from one pitch to the next. Direction comes from
    /// the sounding comparison, so an enharmonic restatement (C#4 to Db4) is
    /// a repetition.
    pub fn between(from: Pitch, to: Pitch) -> Option<MelodicInterval> {
        let interval = DiatonicInterval::between(from, to)?;
        let direction = match from.semitone_index().cmp(&to.semitone_index()) {
            std::cmp::Ordering::Less => Direction::Ascending,
            std::cmp::Ordering::Greater => Direction::Descending,
            std::cmp::Ordering::Equal => Direction::Repetition,
        };
        Some(MelodicInterval {
            interval,
            direction,
        })
    }

    pub fn is_step(self) -> bool {
        self.interval.number() == 2
    }

    pub fn is_skip(self) -> bool {
        self.interval.number() == 3
    }

    pub fn is_leap(self) -> bool {
        self.interval.number() >= 3
    }

    pub fn is_large_leap(self) -> bool {
        self.interval.number() > 3
    }

    pub fn is_repetition(self) -> bool {
        self.direction == Direction::Repetition
    }
}

impl fmt::Display for MelodicInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = match self.direction {
            Direction::Ascending => "+",
            Direction::Descending => "-",
            Direction::Repetition => "=",
        };
        write!(f, "{}{}", arrow, self.interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pitch(s: &str) -> Pitch {
        Pitch::parse(s).unwrap()
    }

    fn interval(s: &str) -> DiatonicInterval {
        DiatonicInterval::parse(s).unwrap()
    }

    #[test]
    fn test_between_basic_intervals() {
        assert_eq!(
            DiatonicInterval::between(pitch("C4"), pitch("E4")),
            Some(interval("M3"))
        );
        assert_eq!(
            DiatonicInterval::between(pitch("D4"), pitch("F4")),
            Some(interval("m3"))
        );
        assert_eq!(
            DiatonicInterval::between(pitch("C4"), pitch("G4")),
            Some(interval("P5"))
        );
        assert_eq!(
            DiatonicInterval::between(pitch("C4"), pitch("C5")),
            Some(interval("P8"))
        );
        // Argument order is irrelevant
        assert_eq!(
            DiatonicInterval::between(pitch("G4"), pitch("C4")),
            Some(interval("P5"))
        );
    }

    #[test]
    fn test_tritone_spellings_are_distinct() {
        let aug4 = DiatonicInterval::between(pitch("F4"), pitch("B4")).unwrap();
        let dim5 = DiatonicInterval::between(pitch("B3"), pitch("F4")).unwrap();
        assert_eq!(aug4, interval("A4"));
        assert_eq!(dim5, interval("d5"));
        assert_ne!(aug4, dim5);
        assert_eq!(aug4.semitones(), 6);
        assert_eq!(dim5.semitones(), 6);
    }

    #[test]
    fn test_semitones_from_number_and_quality() {
        assert_eq!(interval("P1").semitones(), 0);
        assert_eq!(interval("A1").semitones(), 1);
        assert_eq!(interval("m2").semitones(), 1);
        assert_eq!(interval("M2").semitones(), 2);
        assert_eq!(interval("d3").semitones(), 2);
        assert_eq!(interval("M7").semitones(), 11);
        assert_eq!(interval("P8").semitones(), 12);
        assert_eq!(interval("d8").semitones(), 11);
        assert_eq!(interval("m9").semitones(), 13);
        assert_eq!(interval("P12").semitones(), 19);
    }

    #[test]
    fn test_compound_reduction() {
        // P11 reduces to P4; the octave boundary maps to 8, never 1.
        assert_eq!(interval("P11").simple_number(), 4);
        assert_eq!(interval("P8").simple_number(), 8);
        assert_eq!(interval("P15").simple_number(), 8);
        assert_eq!(interval("M10").simple(), interval("M3"));
        assert_eq!(interval("m9").simple(), interval("m2"));
        assert_eq!(interval("P5").simple(), interval("P5"));
        assert!(interval("M10").is_compound());
        assert!(!interval("P8").is_compound());
    }

    #[test]
    fn test_shorthand_round_trip_through_fifteenth() {
        for number in 1u8..=15 {
            for quality in [
                Quality::Diminished,
                Quality::Minor,
                Quality::Major,
                Quality::Perfect,
                Quality::Augmented,
            ] {
                let Some(iv) = DiatonicInterval::new(number, quality) else {
                    continue;
                };
                let rendered = iv.to_string();
                assert_eq!(
                    DiatonicInterval::parse(&rendered),
                    Some(iv),
                    "round trip failed for {}",
                    rendered
                );
            }
        }
    }

    #[test]
    fn test_invalid_constructions_rejected() {
        // Diminished unison: nothing is narrower than a unison.
        assert!(DiatonicInterval::parse("d1").is_none());
        assert!(DiatonicInterval::new(1, Quality::Diminished).is_none());
        // Quality class mismatches.
        assert!(DiatonicInterval::parse("m4").is_none());
        assert!(DiatonicInterval::parse("M5").is_none());
        assert!(DiatonicInterval::parse("P3").is_none());
        assert!(DiatonicInterval::parse("P9").is_none());
        // Garbage.
        assert!(DiatonicInterval::parse("").is_none());
        assert!(DiatonicInterval::parse("3m").is_none());
        assert!(DiatonicInterval::parse("m").is_none());
        assert!(DiatonicInterval::parse("m0").is_none());
        assert!(DiatonicInterval::parse("m3x").is_none());
    }

    #[test]
    fn test_between_rejects_offscale_spellings() {
        // C4 to F##4 would be a doubly-augmented fourth, outside the five
        // quality classes.
        assert!(DiatonicInterval::between(pitch("C4"), pitch("F##4")).is_none());
    }

    #[test]
    fn test_melodic_direction() {
        let up = MelodicInterval::between(pitch("D4"), pitch("F4")).unwrap();
        assert_eq!(up.direction, Direction::Ascending);
        assert!(up.is_skip() && up.is_leap() && !up.is_large_leap());

        let down = MelodicInterval::between(pitch("F4"), pitch("E4")).unwrap();
        assert_eq!(down.direction, Direction::Descending);
        assert!(down.is_step());

        let same = MelodicInterval::between(pitch("G4"), pitch("G4")).unwrap();
        assert!(same.is_repetition());
        assert_eq!(same.direction.reversed(), Direction::Repetition);

        // Enharmonic restatement counts as a repetition.
        let enharmonic = MelodicInterval::between(pitch("C#4"), pitch("Db4")).unwrap();
        assert!(enharmonic.is_repetition());
    }

    #[test]
    fn test_serde_field_names() {
        let value = serde_json::to_value(interval("m3")).unwrap();
        assert_eq!(value["number"], 3);
        assert_eq!(value["quality"], "minor");
        let back: DiatonicInterval = serde_json::from_value(value).unwrap();
        assert_eq!(back, interval("m3"));

        let melodic = MelodicInterval::between(pitch("D4"), pitch("F4")).unwrap();
        let value = serde_json::to_value(melodic).unwrap();
        assert_eq!(value["direction"], "ascending");
    }

    #[test]
    fn test_melodic_predicates_at_the_leap_boundary() {
        let second = MelodicInterval::between(pitch("C4"), pitch("D4")).unwrap();
        let third = MelodicInterval::between(pitch("C4"), pitch("E4")).unwrap();
        let fourth = MelodicInterval::between(pitch("C4"), pitch("F4")).unwrap();
        assert!(!second.is_leap());
        assert!(third.is_leap() && !third.is_large_leap());
        assert!(fourth.is_large_leap());
    }
}
