// Melodic rules: one voice judged by itself.
//
// Each function is one rule's complete algorithm: scan the melody, collect
// marks for the evidence, and multiply PENALTY (or SMALL_PENALTY) once per
// violation. Threshold rules apply a single PENALTY when a ratio falls
// short rather than one per offending note; their marks carry the overall
// fitness, while per-violation marks carry the multiplier that violation
// cost.
//
// Voices too short to judge score 0, the worst case, so a guide's product
// reflects that nothing could be verified.

use gradus_score::rhythm::Position;
use gradus_theory::consonance::Tradition;
use gradus_theory::interval::{DiatonicInterval, Direction, Quality};
use gradus_theory::key::KeySignature;
use gradus_theory::pitch::Pitch;

use super::{PENALTY, SMALL_PENALTY};
use crate::annotation::Annotation;
use crate::mark::Mark;
use crate::melody::Subject;

fn unscorable(message: &str) -> Annotation {
    Annotation::new(0.0, message, Vec::new())
}

// ---------------------------------------------------------------------------
// Length and motion
// ---------------------------------------------------------------------------

pub(super) fn always_move(subject: &Subject) -> Annotation {
    let notes = subject.melody().notes();
    let mut marks = Vec::new();
    for (i, motion) in subject.melody().motions().iter().enumerate() {
        if motion.is_repetition() {
            marks.push(Mark::new(notes[i].start, notes[i + 1].end, PENALTY));
        }
    }
    let fitness = PENALTY.powi(marks.len() as i32);
    Annotation::new(fitness, "move to a different note rather than repeating it", marks)
}

pub(super) fn at_least_eight_notes(subject: &Subject) -> Annotation {
    let notes = subject.melody().notes();
    let deficit = 8usize.saturating_sub(notes.len());
    if deficit == 0 {
        return Annotation::perfect();
    }
    let fitness = PENALTY.powi(deficit as i32);
    let spans = subject
        .voice()
        .placements()
        .iter()
        .map(|p| (p.position, subject.composition().placement_end(p)));
    let mark = Mark::spanning(spans, fitness)
        // An empty voice: flag a default one-bar span at the opening.
        .unwrap_or_else(|| Mark::new(Position::start(), Position::new(2, 1), fitness));
    Annotation::new(fitness, "use at least eight notes", vec![mark])
}

pub(super) fn up_to_thirteen_notes(subject: &Subject) -> Annotation {
    let notes = subject.melody().notes();
    if notes.len() <= 13 {
        return Annotation::perfect();
    }
    let excess = notes.len() - 13;
    let fitness = PENALTY.powi(excess as i32);
    let mark = Mark::new(notes[13].start, notes[notes.len() - 1].end, fitness);
    Annotation::new(fitness, "use at most thirteen notes", vec![mark])
}

pub(super) fn no_rests(subject: &Subject) -> Annotation {
    let marks: Vec<Mark> = subject
        .melody()
        .rests()
        .iter()
        .map(|rest| Mark::new(rest.start, rest.end, PENALTY))
        .collect();
    let fitness = PENALTY.powi(marks.len() as i32);
    Annotation::new(fitness, "avoid rests", marks)
}

pub(super) fn notes_same_length(subject: &Subject) -> Annotation {
    let notes = subject.melody().notes();
    // The final note is exempt so the line can close on a long note.
    let Some((_, body)) = notes.split_last() else {
        return Annotation::perfect();
    };
    let Some(first) = body.first() else {
        return Annotation::perfect();
    };
    let mut seen = Vec::new();
    for note in body {
        if !seen.contains(&note.duration) {
            seen.push(note.duration);
        }
    }
    if seen.len() <= 1 {
        return Annotation::perfect();
    }
    let fitness = PENALTY.powi((seen.len() - 1) as i32);
    let marks: Vec<Mark> = body
        .iter()
        .filter(|note| note.duration != first.duration)
        .map(|note| Mark::new(note.start, note.end, PENALTY))
        .collect();
    Annotation::new(fitness, "keep the notes the same length", marks)
}

// ---------------------------------------------------------------------------
// Contour
// ---------------------------------------------------------------------------

pub(super) fn mostly_conjunct(subject: &Subject) -> Annotation {
    let message = "move mostly by step";
    let notes = subject.melody().notes();
    if notes.len() < 2 {
        return unscorable(message);
    }
    let motions = subject.melody().motions();
    let steps = motions.iter().filter(|m| m.is_step()).count();
    let ratio = steps as f64 / motions.len() as f64;
    // Two independent thresholds: a disjunct line is penalized once, an
    // extremely disjunct line twice.
    let mut fitness = 1.0;
    if ratio < 0.5 {
        fitness *= PENALTY;
    }
    if ratio < 0.25 {
        fitness *= PENALTY;
    }
    if fitness == 1.0 {
        return Annotation::perfect();
    }
    let marks: Vec<Mark> = motions
        .iter()
        .enumerate()
        .filter(|(_, m)| !m.is_step())
        .map(|(i, _)| Mark::new(notes[i].start, notes[i + 1].end, fitness))
        .collect();
    Annotation::new(fitness, message, marks)
}

pub(super) fn recover_large_leaps(subject: &Subject) -> Annotation {
    let notes = subject.melody().notes();
    let motions = subject.melody().motions();
    let mut fitness = 1.0;
    let mut marks = Vec::new();
    for i in 0..motions.len().saturating_sub(1) {
        let leap = motions[i];
        if !leap.is_leap() {
            continue;
        }
        let next = motions[i + 1];
        let reversed = !next.is_repetition() && next.direction == leap.direction.reversed();
        let mut local = 1.0;
        if !reversed {
            local *= PENALTY;
        }
        if !next.is_step() {
            local *= SMALL_PENALTY;
        }
        // A leap answered by a step in the opposite direction is fully
        // recovered and leaves no mark.
        if local < 1.0 {
            fitness *= local;
            marks.push(Mark::new(notes[i].start, notes[i + 2].end, local));
        }
    }
    Annotation::new(
        fitness,
        "recover large leaps by changing direction and returning by step",
        marks,
    )
}

pub(super) fn frequent_direction_changes(subject: &Subject) -> Annotation {
    let motions = subject.melody().motions();
    let moving: Vec<Direction> = motions
        .iter()
        .filter(|m| !m.is_repetition())
        .map(|m| m.direction)
        .collect();
    if moving.len() < 2 {
        return Annotation::perfect();
    }
    let required = moving.len() / 3;
    let changes = moving.windows(2).filter(|w| w[0] != w[1]).count();
    if changes >= required {
        return Annotation::perfect();
    }
    let fitness = PENALTY.powi((required - changes) as i32);

    // Flag the longest unbroken run in one direction.
    let notes = subject.melody().notes();
    let mut best_start = 0;
    let mut best_len = 0;
    let mut run_start = 0;
    let mut run_len = 0;
    for (i, motion) in motions.iter().enumerate() {
        if motion.is_repetition() {
            run_len = 0;
        } else if run_len > 0 && motions[i - 1].direction == motion.direction {
            run_len += 1;
        } else {
            run_start = i;
            run_len = 1;
        }
        if run_len > best_len {
            best_len = run_len;
            best_start = run_start;
        }
    }
    let mark = Mark::new(
        notes[best_start].start,
        notes[best_start + best_len].end,
        fitness,
    );
    Annotation::new(fitness, "change direction more often", vec![mark])
}

pub(super) fn single_large_leaps(subject: &Subject) -> Annotation {
    let notes = subject.melody().notes();
    let motions = subject.melody().motions();
    let mut marks = Vec::new();
    for i in 0..motions.len().saturating_sub(1) {
        let (a, b) = (motions[i], motions[i + 1]);
        if a.is_large_leap() && b.is_large_leap() && a.direction == b.direction {
            marks.push(Mark::new(notes[i].start, notes[i + 2].end, PENALTY));
        }
    }
    let fitness = PENALTY.powi(marks.len() as i32);
    Annotation::new(
        fitness,
        "avoid consecutive large leaps in the same direction",
        marks,
    )
}

// ---------------------------------------------------------------------------
// Pitch content
// ---------------------------------------------------------------------------

pub(super) fn diatonic(subject: &Subject) -> Annotation {
    let mut marks = Vec::new();
    for note in subject.melody().notes() {
        let key = subject.composition().key_signature_at(note.start.bar);
        if !key.contains(note.pitch.spelling().pitch_class()) {
            marks.push(Mark::new(note.start, note.end, PENALTY));
        }
    }
    let fitness = PENALTY.powi(marks.len() as i32);
    Annotation::new(fitness, "stay within the notes of the key", marks)
}

pub(super) fn start_on_tonic(subject: &Subject) -> Annotation {
    let message = "start on the tonic";
    let Some(first) = subject.melody().notes().first() else {
        return unscorable(message);
    };
    let key = subject.composition().key_signature_at(first.start.bar);
    if first.pitch.spelling() == key.tonic_spelling() {
        return Annotation::perfect();
    }
    let mark = Mark::new(first.start, first.end, PENALTY);
    Annotation::new(PENALTY, message, vec![mark])
}

pub(super) fn end_on_tonic(subject: &Subject) -> Annotation {
    let message = "end on the tonic";
    let Some(last) = subject.melody().notes().last() else {
        return unscorable(message);
    };
    let key = subject.composition().key_signature_at(last.start.bar);
    if last.pitch.spelling() == key.tonic_spelling() {
        return Annotation::perfect();
    }
    let mark = Mark::new(last.start, last.end, PENALTY);
    Annotation::new(PENALTY, message, vec![mark])
}

pub(super) fn step_down_to_final_note(subject: &Subject) -> Annotation {
    let message = "approach the final note by a descending step";
    let notes = subject.melody().notes();
    if notes.len() < 2 {
        return unscorable(message);
    }
    let last_motion = subject.melody().motions()[notes.len() - 2];
    let mut fitness = 1.0;
    if !last_motion.is_step() {
        fitness *= PENALTY;
    }
    if last_motion.direction != Direction::Descending {
        fitness *= PENALTY;
    }
    if fitness == 1.0 {
        return Annotation::perfect();
    }
    let mark = Mark::new(notes[notes.len() - 2].start, notes[notes.len() - 1].end, fitness);
    Annotation::new(fitness, message, vec![mark])
}

// ---------------------------------------------------------------------------
// Interval vocabulary
// ---------------------------------------------------------------------------

const ASCENDING_INTERVALS: [(u8, Quality); 8] = [
    (2, Quality::Minor),
    (2, Quality::Major),
    (3, Quality::Minor),
    (3, Quality::Major),
    (4, Quality::Perfect),
    (5, Quality::Perfect),
    (6, Quality::Minor),
    (8, Quality::Perfect),
];

// The minor sixth is permitted ascending only.
const DESCENDING_INTERVALS: [(u8, Quality); 7] = [
    (2, Quality::Minor),
    (2, Quality::Major),
    (3, Quality::Minor),
    (3, Quality::Major),
    (4, Quality::Perfect),
    (5, Quality::Perfect),
    (8, Quality::Perfect),
];

pub(super) fn permitted_intervals(subject: &Subject) -> Annotation {
    let notes = subject.melody().notes();
    let mut marks = Vec::new();
    for (i, motion) in subject.melody().motions().iter().enumerate() {
        // A repeated note is not a move; AlwaysMove owns that case.
        if motion.is_repetition() {
            continue;
        }
        let allowed: &[(u8, Quality)] = match motion.direction {
            Direction::Ascending => &ASCENDING_INTERVALS,
            Direction::Descending => &DESCENDING_INTERVALS,
            Direction::Repetition => unreachable!("repetitions were skipped"),
        };
        let permitted = motion
            .interval
            .is_some_and(|iv| allowed.contains(&(iv.number(), iv.quality())));
        if !permitted {
            marks.push(Mark::new(notes[i].start, notes[i + 1].end, PENALTY));
        }
    }
    let fitness = PENALTY.powi(marks.len() as i32);
    Annotation::new(fitness, "use only permitted melodic intervals", marks)
}

pub(super) fn singable_intervals(subject: &Subject) -> Annotation {
    let notes = subject.melody().notes();
    let mut marks = Vec::new();
    for (i, motion) in subject.melody().motions().iter().enumerate() {
        if motion.is_repetition() {
            continue;
        }
        let singable = motion.interval.is_some_and(|iv| {
            !matches!(iv.quality(), Quality::Diminished | Quality::Augmented)
                && iv.number() != 7
                && iv.number() <= 8
        });
        if !singable {
            marks.push(Mark::new(notes[i].start, notes[i + 1].end, PENALTY));
        }
    }
    let fitness = PENALTY.powi(marks.len() as i32);
    Annotation::new(fitness, "use singable melodic intervals", marks)
}

pub(super) fn singable_range(subject: &Subject) -> Annotation {
    let message = "keep the range within a tenth";
    let notes = subject.melody().notes();
    let Some(mark) = Mark::spanning(notes.iter().map(|n| (n.start, n.end)), PENALTY) else {
        return unscorable(message);
    };
    // The span exists, so the voice has notes and min/max are safe.
    let lowest = notes.iter().map(|n| n.pitch).min().unwrap();
    let highest = notes.iter().map(|n| n.pitch).max().unwrap();
    let within = DiatonicInterval::between(lowest, highest).is_some_and(|iv| iv.number() <= 10);
    if within {
        return Annotation::perfect();
    }
    Annotation::new(PENALTY, message, vec![mark])
}

pub(super) fn consonant_climax(subject: &Subject) -> Annotation {
    let message = "make the climax consonant with the tonic";
    let notes = subject.melody().notes();
    if notes.is_empty() {
        return unscorable(message);
    }
    let top = notes.iter().map(|n| n.pitch.semitone_index()).max().unwrap();
    let mut marks = Vec::new();
    for note in notes.iter().filter(|n| n.pitch.semitone_index() == top) {
        let key = subject.composition().key_signature_at(note.start.bar);
        let tonic = tonic_at_or_below(key, note.pitch);
        let consonant = DiatonicInterval::between(tonic, note.pitch)
            .is_some_and(|iv| Tradition::Renaissance.classify(iv).is_consonant());
        if !consonant {
            marks.push(Mark::new(note.start, note.end, PENALTY));
        }
    }
    if marks.is_empty() {
        return Annotation::perfect();
    }
    Annotation::new(PENALTY, message, marks)
}

/// The tonic pitch at or just below the given pitch, for measuring what the
/// climax sounds against.
fn tonic_at_or_below(key: KeySignature, pitch: Pitch) -> Pitch {
    let same_register = Pitch::new(key.tonic_spelling(), pitch.register());
    if same_register <= pitch {
        same_register
    } else {
        Pitch::new(key.tonic_spelling(), pitch.register() - 1)
    }
}
