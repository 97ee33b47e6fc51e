// Positional evidence for rule verdicts.
//
// A mark is a closed-open range [start, end) on a voice's timeline plus the
// fitness weight the flagged passage cost. Rules attach marks to their
// annotations so a caller can render inline feedback on the exact notes
// that triggered a penalty.

use gradus_score::rhythm::Position;
use serde::{Deserialize, Serialize};

/// A flagged range of the timeline. `end` is exclusive: it is where the
/// last flagged placement stops sounding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    pub start: Position,
    pub end: Position,
    pub weight: f64,
}

impl Mark {
    pub fn new(start: Position, end: Position, weight: f64) -> Self {
        Mark { start, end, weight }
    }

    /// A mark covering several spans at once: earliest start to latest
    /// end. `None` when there is nothing to cover.
    pub fn spanning(
        spans: impl IntoIterator<Item = (Position, Position)>,
        weight: f64,
    ) -> Option<Mark> {
        let mut bounds: Option<(Position, Position)> = None;
        for (start, end) in spans {
            bounds = Some(match bounds {
                None => (start, end),
                Some((lo, hi)) => (lo.min(start), hi.max(end)),
            });
        }
        bounds.map(|(start, end)| Mark::new(start, end, weight))
    }

    /// Whether a position falls inside the marked range.
    pub fn covers(&self, position: Position) -> bool {
        self.start <= position && position < self.end
    }
}
