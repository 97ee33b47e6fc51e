// gradus_style: style analysis for species counterpoint.
//
// The analysis pipeline, bottom to top:
//
//   melody      derived note/rest/motion views over one voice, plus the
//               Subject that pairs a voice with its cantus firmus
//   rules       the closed catalog of melodic and harmonic rules, each a
//               pure function from Subject to Annotation
//   mark        a flagged span of score with the weight it cost
//   annotation  one rule's verdict: fitness, advice, evidence marks
//   guide       named ordered rule lists per pedagogical context
//   analysis    one guide applied to one voice, fitness multiplied out
//   demo        built-in compositions from Gradus ad Parnassum
//
// Design decisions:
//   - Fitness is multiplicative and rule evaluation is pure, so guides
//     evaluate their rules in parallel and the result is deterministic.
//   - A rule never mutates the score; everything it reports lives in the
//     returned Annotation.
//   - Advice messages appear only when fitness fell below 1.0.
//
// Consumed by the critique binary (src/main.rs) and by anything that
// wants programmatic verdicts over gradus_score compositions.

pub mod analysis;
pub mod annotation;
pub mod demo;
pub mod guide;
pub mod mark;
pub mod melody;
pub mod rules;

pub use analysis::{Analysis, Outcome};
pub use annotation::Annotation;
pub use guide::Guide;
pub use mark::Mark;
pub use melody::{Melody, Subject};
pub use rules::{PENALTY, Rule, SMALL_PENALTY};
