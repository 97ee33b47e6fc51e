// Gradus music-theory primitives.
//
// The leaf crate of the Gradus workspace: pure value types for spelled
// pitches, diatonic intervals, key signatures, and consonance classification.
// Everything here is immutable data with equality, ordering, and arithmetic:
// no I/O, no randomness, no state.
//
// Module layout:
// - spelling.rs: letters, accidentals, and spellings (letter + accidental)
// - pitch.rs: spelled pitches with an octave register, ordered by frequency
// - interval.rs: diatonic intervals (number + quality), melodic intervals
//   with direction, and the "m3"/"P8" shorthand notation
// - key.rs: the six church modes and key signatures with their diatonic
//   pitch-class sets
// - consonance.rs: historical consonance traditions (medieval, renaissance,
//   modern) classifying intervals into consonance categories
//
// Consumed by `gradus_score` (content model) and `gradus_style` (rule
// evaluation). These types are shared across the workspace and must stay
// free of behavior that is not a pure function of their fields.

pub mod consonance;
pub mod interval;
pub mod key;
pub mod pitch;
pub mod spelling;

pub use consonance::{Consonance, Tradition};
pub use interval::{DiatonicInterval, Direction, MelodicInterval, Quality};
pub use key::{KeySignature, Mode};
pub use pitch::Pitch;
pub use spelling::{Accidental, Letter, Spelling};
