// Derived melodic facts for rule evaluation.
//
// Rules never walk raw placements. They read a Melody: the voice's notes
// with resolved end positions, its rests, and the motion between each pair
// of consecutive notes. Building this once per analysis keeps every rule a
// simple scan.
//
// A Motion keeps direction and letter-span even when the fully qualified
// interval does not exist (a doubly-augmented spelling has no quality in
// the five-class system), so contour rules still see what happened while
// interval-whitelist rules can treat the absence as a violation.
//
// A Subject bundles the melody under judgment with its composition context
// and, when one exists, the melody of the cantus firmus it is set against.

use gradus_score::composition::Composition;
use gradus_score::rhythm::{Position, RhythmicValue};
use gradus_score::voice::{Voice, VoiceId};
use gradus_theory::interval::{DiatonicInterval, Direction};
use gradus_theory::pitch::Pitch;

/// A note with its sounding span resolved against the composition's meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MelodyNote {
    pub pitch: Pitch,
    pub duration: RhythmicValue,
    pub start: Position,
    pub end: Position,
}

/// A rest's sounding span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestSpan {
    pub start: Position,
    pub end: Position,
}

/// The move between two consecutive notes. `number` is the diatonic
/// letter-span (1 = same letter), always present; `interval` is the
/// qualified interval when the spelling admits one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub direction: Direction,
    pub number: u8,
    pub interval: Option<DiatonicInterval>,
}

impl Motion {
    pub fn between(from: Pitch, to: Pitch) -> Motion {
        let direction = match from.semitone_index().cmp(&to.semitone_index()) {
            std::cmp::Ordering::Less => Direction::Ascending,
            std::cmp::Ordering::Greater => Direction::Descending,
            std::cmp::Ordering::Equal => Direction::Repetition,
        };
        let span = (from.letter_rank() - to.letter_rank()).unsigned_abs() + 1;
        Motion {
            direction,
            number: u8::try_from(span).unwrap_or(u8::MAX),
            interval: DiatonicInterval::between(from, to),
        }
    }

    pub fn is_repetition(self) -> bool {
        self.direction == Direction::Repetition
    }

    pub fn is_step(self) -> bool {
        self.number == 2
    }

    pub fn is_leap(self) -> bool {
        self.number >= 3
    }

    pub fn is_large_leap(self) -> bool {
        self.number > 3
    }
}

/// A voice's melodic content in time order.
#[derive(Debug, Clone)]
pub struct Melody {
    notes: Vec<MelodyNote>,
    rests: Vec<RestSpan>,
    motions: Vec<Motion>,
}

impl Melody {
    pub fn from_voice(composition: &Composition, voice: &Voice) -> Melody {
        let mut notes = Vec::new();
        let mut rests = Vec::new();
        for placement in voice.placements() {
            let end = composition.placement_end(placement);
            match placement.pitch {
                Some(pitch) => notes.push(MelodyNote {
                    pitch,
                    duration: placement.duration,
                    start: placement.position,
                    end,
                }),
                None => rests.push(RestSpan {
                    start: placement.position,
                    end,
                }),
            }
        }
        let motions = notes
            .windows(2)
            .map(|pair| Motion::between(pair[0].pitch, pair[1].pitch))
            .collect();
        Melody {
            notes,
            rests,
            motions,
        }
    }

    pub fn notes(&self) -> &[MelodyNote] {
        &self.notes
    }

    pub fn rests(&self) -> &[RestSpan] {
        &self.rests
    }

    /// `motions()[i]` is the move from `notes()[i]` to `notes()[i + 1]`.
    pub fn motions(&self) -> &[Motion] {
        &self.motions
    }

    /// The note sounding at a position: the latest note starting at or
    /// before it that has not yet ended.
    pub fn note_sounding_at(&self, position: Position) -> Option<&MelodyNote> {
        let idx = self.notes.partition_point(|n| n.start <= position);
        if idx == 0 {
            return None;
        }
        let note = &self.notes[idx - 1];
        (position < note.end).then_some(note)
    }

    /// The last note starting strictly before a position, sounding or not.
    pub fn note_before(&self, position: Position) -> Option<&MelodyNote> {
        let idx = self.notes.partition_point(|n| n.start < position);
        if idx == 0 {
            return None;
        }
        Some(&self.notes[idx - 1])
    }
}

/// One voice under judgment, with its composition context and the cantus
/// firmus it is set against, if any.
pub struct Subject<'a> {
    composition: &'a Composition,
    voice: &'a Voice,
    melody: Melody,
    reference: Option<Melody>,
}

impl<'a> Subject<'a> {
    /// Build the evaluation context for one voice. The reference is the
    /// first other voice whose role marks it as the cantus firmus; a voice
    /// is never its own reference.
    pub fn new(composition: &'a Composition, id: VoiceId) -> Option<Subject<'a>> {
        let voice = composition.voice(id)?;
        let melody = Melody::from_voice(composition, voice);
        let reference = composition
            .voices()
            .iter()
            .enumerate()
            .find(|(i, other)| VoiceId(*i) != id && other.is_cantus_firmus())
            .map(|(_, other)| Melody::from_voice(composition, other));
        Some(Subject {
            composition,
            voice,
            melody,
            reference,
        })
    }

    pub fn composition(&self) -> &Composition {
        self.composition
    }

    pub fn voice(&self) -> &Voice {
        self.voice
    }

    pub fn melody(&self) -> &Melody {
        &self.melody
    }

    pub fn reference(&self) -> Option<&Melody> {
        self.reference.as_ref()
    }
}
