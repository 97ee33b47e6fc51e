// Voices and the placements they hold.
//
// A placement is one event on a voice's timeline: a position, a duration,
// and an optional pitch. With a pitch it sounds as a note; without one it
// is a rest. A voice keeps its placements sorted by position and allows at
// most one placement to start at any position; inserting at an occupied
// position replaces what was there.
//
// `Note` is a read-only view over a pitched placement. It owns its
// placement and forwards exactly the fields callers need, each declared
// explicitly, so the pitch is guaranteed present by construction.

use gradus_theory::pitch::Pitch;
use serde::{Deserialize, Serialize};

use crate::rhythm::{Position, RhythmicValue};

/// Index of a voice within its composition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VoiceId(pub usize);

/// One timeline event: a note when `pitch` is present, a rest otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub position: Position,
    pub duration: RhythmicValue,
    pub pitch: Option<Pitch>,
}

impl Placement {
    pub fn note(position: Position, duration: RhythmicValue, pitch: Pitch) -> Self {
        Placement {
            position,
            duration,
            pitch: Some(pitch),
        }
    }

    pub fn rest(position: Position, duration: RhythmicValue) -> Self {
        Placement {
            position,
            duration,
            pitch: None,
        }
    }

    pub fn is_note(&self) -> bool {
        self.pitch.is_some()
    }

    pub fn is_rest(&self) -> bool {
        self.pitch.is_none()
    }
}

/// A pitched placement. The pitch is checked once at construction; the
/// remaining fields forward to the owned placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Note {
    pitch: Pitch,
    placement: Placement,
}

impl Note {
    /// View a placement as a note. Rests have no note view.
    pub fn from_placement(placement: Placement) -> Option<Note> {
        placement.pitch.map(|pitch| Note { pitch, placement })
    }

    pub fn pitch(&self) -> Pitch {
        self.pitch
    }

    pub fn position(&self) -> Position {
        self.placement.position
    }

    pub fn duration(&self) -> RhythmicValue {
        self.placement.duration
    }
}

/// An ordered sequence of placements with a free-form role label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Voice {
    role: String,
    placements: Vec<Placement>,
}

impl Voice {
    pub fn new(role: impl Into<String>) -> Self {
        Voice {
            role: role.into(),
            placements: Vec::new(),
        }
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    /// Whether this voice is the foundational line. Matches "cantus firmus"
    /// case-insensitively, ignoring separators, so "Cantus Firmus",
    /// "cantus_firmus", and "CantusFirmus" all qualify.
    pub fn is_cantus_firmus(&self) -> bool {
        let normalized: String = self
            .role
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        normalized == "cantusfirmus"
    }

    /// Insert a placement, keeping placements sorted by position. A
    /// placement already starting at the same position is replaced.
    pub fn insert(&mut self, placement: Placement) {
        match self
            .placements
            .binary_search_by_key(&placement.position, |p| p.position)
        {
            Ok(i) => self.placements[i] = placement,
            Err(i) => self.placements.insert(i, placement),
        }
    }

    /// All placements in time order.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// The pitched placements, in time order.
    pub fn notes(&self) -> Vec<Note> {
        self.placements
            .iter()
            .filter_map(|&p| Note::from_placement(p))
            .collect()
    }

    /// The rests, in time order.
    pub fn rests(&self) -> Vec<Placement> {
        self.placements
            .iter()
            .filter(|p| p.is_rest())
            .copied()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}
