// One rule's verdict on one voice.
//
// An annotation carries a fitness in [0,1], a human-readable message, and
// the marks pointing at the evidence. The message is present only when the
// rule actually found something (fitness below 1), so a clean verdict
// serializes to just its fitness. Annotations are immutable once built.

use serde::{Deserialize, Serialize};

use crate::mark::Mark;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    fitness: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    marks: Vec<Mark>,
}

impl Annotation {
    /// A clean verdict: fitness 1, no message, no marks.
    pub fn perfect() -> Self {
        Annotation {
            fitness: 1.0,
            message: None,
            marks: Vec::new(),
        }
    }

    /// Build a verdict. Fitness is clamped to [0,1]; the message is kept
    /// only when something was actually penalized.
    pub fn new(fitness: f64, message: impl Into<String>, marks: Vec<Mark>) -> Self {
        let fitness = fitness.clamp(0.0, 1.0);
        Annotation {
            fitness,
            message: (fitness < 1.0).then(|| message.into()),
            marks,
        }
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    pub fn is_perfect(&self) -> bool {
        self.fitness == 1.0
    }
}
