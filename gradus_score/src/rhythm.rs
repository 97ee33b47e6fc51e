// Time: ticks, rhythmic values, meters, and bar positions.
//
// Durations are integer ticks at 480 per quarter note, so every value down
// to the sixteenth (and every dotted value) is exact. Positions are
// bar/beat/tick triples, 1-based for bars and beats the way musicians
// count, with tick as a 0-based offset inside the beat. Positions order
// lexicographically, which is time order as long as both sides use the
// same meter map.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Tick resolution: 480 per quarter note.
pub const TICKS_PER_QUARTER: u32 = 480;

/// Note and rest lengths, dotted values included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RhythmicValue {
    DoubleWhole,
    DottedWhole,
    Whole,
    DottedHalf,
    Half,
    DottedQuarter,
    Quarter,
    DottedEighth,
    Eighth,
    Sixteenth,
}

impl RhythmicValue {
    /// Duration in ticks.
    pub fn ticks(self) -> u32 {
        match self {
            RhythmicValue::DoubleWhole => 8 * TICKS_PER_QUARTER,
            RhythmicValue::DottedWhole => 6 * TICKS_PER_QUARTER,
            RhythmicValue::Whole => 4 * TICKS_PER_QUARTER,
            RhythmicValue::DottedHalf => 3 * TICKS_PER_QUARTER,
            RhythmicValue::Half => 2 * TICKS_PER_QUARTER,
            RhythmicValue::DottedQuarter => 3 * TICKS_PER_QUARTER / 2,
            RhythmicValue::Quarter => TICKS_PER_QUARTER,
            RhythmicValue::DottedEighth => 3 * TICKS_PER_QUARTER / 4,
            RhythmicValue::Eighth => TICKS_PER_QUARTER / 2,
            RhythmicValue::Sixteenth => TICKS_PER_QUARTER / 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RhythmicValue::DoubleWhole => "double whole",
            RhythmicValue::DottedWhole => "dotted whole",
            RhythmicValue::Whole => "whole",
            RhythmicValue::DottedHalf => "dotted half",
            RhythmicValue::Half => "half",
            RhythmicValue::DottedQuarter => "dotted quarter",
            RhythmicValue::Quarter => "quarter",
            RhythmicValue::DottedEighth => "dotted eighth",
            RhythmicValue::Eighth => "eighth",
            RhythmicValue::Sixteenth => "sixteenth",
        }
    }
}

impl fmt::Display for RhythmicValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A time signature. Denominators are the usual powers of two (1, 2, 4, 8,
/// 16), so beat lengths divide the tick grid exactly. Both parts must be
/// nonzero; a meter read from JSON is rejected otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Meter {
    pub numerator: u8,
    pub denominator: u8,
}

impl Meter {
    pub fn new(numerator: u8, denominator: u8) -> Self {
        Meter {
            numerator,
            denominator,
        }
    }

    /// 4/4.
    pub fn common_time() -> Self {
        Meter::new(4, 4)
    }

    /// 2/2.
    pub fn cut_time() -> Self {
        Meter::new(2, 2)
    }

    /// Ticks in one beat: a whole note divided by the denominator.
    pub fn ticks_per_beat(self) -> u32 {
        4 * TICKS_PER_QUARTER / u32::from(self.denominator)
    }

    /// Ticks in one full bar.
    pub fn ticks_per_bar(self) -> u32 {
        u32::from(self.numerator) * self.ticks_per_beat()
    }
}

// Custom serde: deserialization rejects zero parts. The beat length
// divides by the denominator, and a bar of zero ticks can never be
// stepped over when walking positions forward.
impl<'de> Deserialize<'de> for Meter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            numerator: u8,
            denominator: u8,
        }
        let raw = Raw::deserialize(deserializer)?;
        if raw.numerator == 0 || raw.denominator == 0 {
            return Err(serde::de::Error::custom(format!(
                "meter {}/{} has a zero part",
                raw.numerator, raw.denominator
            )));
        }
        Ok(Meter::new(raw.numerator, raw.denominator))
    }
}

impl fmt::Display for Meter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// A moment on the score timeline: bar and beat (1-based) plus a tick
/// offset within the beat. Lexicographic ordering is time ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub bar: u32,
    pub beat: u32,
    pub tick: u32,
}

impl Position {
    /// Start of a beat.
    pub fn new(bar: u32, beat: u32) -> Self {
        Position { bar, beat, tick: 0 }
    }

    pub fn with_tick(bar: u32, beat: u32, tick: u32) -> Self {
        Position { bar, beat, tick }
    }

    /// The first downbeat of the piece.
    pub fn start() -> Self {
        Position::new(1, 1)
    }

    /// Whether this position is the first beat of its bar.
    pub fn is_downbeat(self) -> bool {
        self.beat == 1 && self.tick == 0
    }

    /// Tick offset from the start of this position's bar, under a meter.
    pub fn ticks_into_bar(self, meter: Meter) -> u32 {
        (self.beat - 1) * meter.ticks_per_beat() + self.tick
    }

    /// Rebuild a position from a bar number and a tick offset into it.
    pub fn from_bar_offset(bar: u32, offset: u32, meter: Meter) -> Self {
        let per_beat = meter.ticks_per_beat();
        Position {
            bar,
            beat: offset / per_beat + 1,
            tick: offset % per_beat,
        }
    }
}

// Custom serde: bars and beats are 1-based (ticks_into_bar subtracts the
// 1 back off), so deserialization rejects a zero in either field.
impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            bar: u32,
            beat: u32,
            tick: u32,
        }
        let raw = Raw::deserialize(deserializer)?;
        if raw.bar == 0 || raw.beat == 0 {
            return Err(serde::de::Error::custom(format!(
                "position {}:{}:{} is not 1-based",
                raw.bar, raw.beat, raw.tick
            )));
        }
        Ok(Position::with_tick(raw.bar, raw.beat, raw.tick))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tick == 0 {
            write!(f, "{}:{}", self.bar, self.beat)
        } else {
            write!(f, "{}:{}:{}", self.bar, self.beat, self.tick)
        }
    }
}
