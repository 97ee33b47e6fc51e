// Symbolic score content model.
//
// A Composition owns Voices; a Voice owns time-ordered Placements, each a
// note (with a pitch) or a rest (without). Rhythm is measured in ticks at a
// fixed resolution, grouped into bars by a meter. Key signatures and meters
// have composition-wide defaults plus sparse per-bar overrides.
//
// Module layout:
// - rhythm.rs: tick resolution, rhythmic values, meters, bar positions
// - voice.rs: placements, notes, voices and their ordering invariant
// - composition.rs: the owning aggregate, effective key/meter lookup,
//   JSON loading
//
// Everything here is plain data for the analysis crates to read; nothing in
// this crate scores or judges anything.

pub mod composition;
pub mod rhythm;
pub mod voice;

pub use composition::Composition;
pub use rhythm::{Meter, Position, RhythmicValue, TICKS_PER_QUARTER};
pub use voice::{Note, Placement, Voice, VoiceId};
