// Harmonic rules: one voice judged against the cantus firmus.
//
// Every rule here needs a reference line. When the subject's composition
// has no other voice marked as the cantus firmus, the rule passes
// vacuously: there is nothing to be consonant with, cross, or approach.
//
// Simultaneity is resolved by sounding position: the reference note a
// subject note is judged against is whichever reference note is still
// sounding when the subject note starts. Consonance is always classified
// under the Renaissance tradition, the convention these exercises teach.

use std::cmp::Ordering;

use gradus_theory::consonance::{Consonance, Tradition};
use gradus_theory::interval::{DiatonicInterval, Direction};

use super::PENALTY;
use crate::annotation::Annotation;
use crate::mark::Mark;
use crate::melody::{Melody, MelodyNote, Subject};

/// Which side of the reference the subject sits on, from the first
/// sounding pair that is not a unison. None when the voices never sound
/// together or only ever meet in unison.
fn relative_side(subject: &Melody, reference: &Melody) -> Option<Ordering> {
    for note in subject.notes() {
        if let Some(cf) = reference.note_sounding_at(note.start) {
            match note.pitch.semitone_index().cmp(&cf.pitch.semitone_index()) {
                Ordering::Equal => continue,
                other => return Some(other),
            }
        }
    }
    None
}

fn sounding_direction(from: &MelodyNote, to: &MelodyNote) -> Direction {
    match from.pitch.semitone_index().cmp(&to.pitch.semitone_index()) {
        Ordering::Less => Direction::Ascending,
        Ordering::Greater => Direction::Descending,
        Ordering::Equal => Direction::Repetition,
    }
}

pub(super) fn consonant_downbeats(subject: &Subject) -> Annotation {
    let Some(reference) = subject.reference() else {
        return Annotation::perfect();
    };
    let mut marks = Vec::new();
    for note in subject.melody().notes() {
        if !note.start.is_downbeat() {
            continue;
        }
        let Some(cf) = reference.note_sounding_at(note.start) else {
            continue;
        };
        let consonant = DiatonicInterval::between(note.pitch, cf.pitch)
            .is_some_and(|iv| Tradition::Renaissance.classify(iv).is_consonant());
        if !consonant {
            marks.push(Mark::new(note.start, note.end, PENALTY));
        }
    }
    let fitness = PENALTY.powi(marks.len() as i32);
    Annotation::new(
        fitness,
        "make downbeats consonant with the cantus firmus",
        marks,
    )
}

pub(super) fn passing_dissonances_only(subject: &Subject) -> Annotation {
    let Some(reference) = subject.reference() else {
        return Annotation::perfect();
    };
    let notes = subject.melody().notes();
    let motions = subject.melody().motions();
    let mut marks = Vec::new();
    for (i, note) in notes.iter().enumerate() {
        // Downbeat dissonance belongs to ConsonantDownbeats.
        if note.start.is_downbeat() {
            continue;
        }
        let Some(cf) = reference.note_sounding_at(note.start) else {
            continue;
        };
        let consonant = DiatonicInterval::between(note.pitch, cf.pitch)
            .is_some_and(|iv| Tradition::Renaissance.classify(iv).is_consonant());
        if consonant {
            continue;
        }
        let approached_by_step = i > 0 && motions[i - 1].is_step();
        let left_by_step = i < motions.len() && motions[i].is_step();
        if !(approached_by_step && left_by_step) {
            marks.push(Mark::new(note.start, note.end, PENALTY));
        }
    }
    let fitness = PENALTY.powi(marks.len() as i32);
    Annotation::new(
        fitness,
        "treat dissonances as passing tones approached and left by step",
        marks,
    )
}

pub(super) fn approach_perfection_contrarily(subject: &Subject) -> Annotation {
    let Some(reference) = subject.reference() else {
        return Annotation::perfect();
    };
    let notes = subject.melody().notes();
    let motions = subject.melody().motions();
    let mut marks = Vec::new();
    for i in 1..notes.len() {
        let note = &notes[i];
        if !note.start.is_downbeat() {
            continue;
        }
        let Some(cf) = reference.note_sounding_at(note.start) else {
            continue;
        };
        let Some(interval) = DiatonicInterval::between(note.pitch, cf.pitch) else {
            continue;
        };
        if Tradition::Renaissance.classify(interval) != Consonance::PerfectConsonance {
            continue;
        }
        let subject_direction = motions[i - 1].direction;
        if subject_direction == Direction::Repetition {
            continue;
        }
        // The reference only moves into this downbeat if its note starts
        // here; a held note is oblique motion and always acceptable.
        let reference_direction = (cf.start == note.start)
            .then(|| reference.note_before(cf.start))
            .flatten()
            .map(|prev| sounding_direction(prev, cf));
        if reference_direction == Some(subject_direction) {
            marks.push(Mark::new(notes[i - 1].start, note.end, PENALTY));
        }
    }
    let fitness = PENALTY.powi(marks.len() as i32);
    Annotation::new(
        fitness,
        "approach perfect consonances by contrary motion",
        marks,
    )
}

pub(super) fn avoid_crossing_voices(subject: &Subject) -> Annotation {
    let Some(reference) = subject.reference() else {
        return Annotation::perfect();
    };
    let Some(side) = relative_side(subject.melody(), reference) else {
        return Annotation::perfect();
    };
    let mut marks = Vec::new();
    for note in subject.melody().notes() {
        let Some(cf) = reference.note_sounding_at(note.start) else {
            continue;
        };
        let ord = note.pitch.semitone_index().cmp(&cf.pitch.semitone_index());
        if ord != Ordering::Equal && ord != side {
            marks.push(Mark::new(note.start, note.end, PENALTY));
        }
    }
    let fitness = PENALTY.powi(marks.len() as i32);
    Annotation::new(fitness, "avoid crossing the cantus firmus", marks)
}

pub(super) fn avoid_overlapping_voices(subject: &Subject) -> Annotation {
    let Some(reference) = subject.reference() else {
        return Annotation::perfect();
    };
    let Some(side) = relative_side(subject.melody(), reference) else {
        return Annotation::perfect();
    };
    let mut marks = Vec::new();
    for note in subject.melody().notes() {
        // Overlap reaches past where the reference just was, even without
        // a simultaneous crossing.
        let Some(previous) = reference.note_before(note.start) else {
            continue;
        };
        let ord = note.pitch.semitone_index().cmp(&previous.pitch.semitone_index());
        let overlapping = match side {
            Ordering::Greater => ord == Ordering::Less,
            Ordering::Less => ord == Ordering::Greater,
            Ordering::Equal => false,
        };
        if overlapping {
            marks.push(Mark::new(note.start, note.end, PENALTY));
        }
    }
    let fitness = PENALTY.powi(marks.len() as i32);
    Annotation::new(fitness, "avoid overlapping the cantus firmus", marks)
}

pub(super) fn prefer_contrary_motion(subject: &Subject) -> Annotation {
    let Some(reference) = subject.reference() else {
        return Annotation::perfect();
    };
    let notes = subject.melody().notes();
    let motions = subject.melody().motions();
    let mut moving_pairs = 0u32;
    let mut contrary = 0u32;
    for i in 1..notes.len() {
        let note = &notes[i];
        if !note.start.is_downbeat() {
            continue;
        }
        let subject_direction = motions[i - 1].direction;
        if subject_direction == Direction::Repetition {
            continue;
        }
        let (Some(cf_now), Some(cf_prev)) = (
            reference.note_sounding_at(note.start),
            reference.note_sounding_at(notes[i - 1].start),
        ) else {
            continue;
        };
        let reference_direction = sounding_direction(cf_prev, cf_now);
        if reference_direction == Direction::Repetition {
            continue;
        }
        moving_pairs += 1;
        if reference_direction != subject_direction {
            contrary += 1;
        }
    }
    if moving_pairs == 0 {
        return Annotation::perfect();
    }
    let ratio = f64::from(contrary) / f64::from(moving_pairs);
    if ratio >= 0.5 {
        return Annotation::perfect();
    }
    let marks = Mark::spanning(notes.iter().map(|n| (n.start, n.end)), PENALTY)
        .into_iter()
        .collect();
    Annotation::new(
        PENALTY,
        "prefer contrary motion against the cantus firmus",
        marks,
    )
}

pub(super) fn prefer_imperfect(subject: &Subject) -> Annotation {
    let Some(reference) = subject.reference() else {
        return Annotation::perfect();
    };
    let notes = subject.melody().notes();
    let mut perfect_count = 0u32;
    let mut imperfect_count = 0u32;
    for note in notes {
        // Only downbeat sonorities count; off-beat intervals belong to
        // PassingDissonancesOnly.
        if !note.start.is_downbeat() {
            continue;
        }
        let Some(cf) = reference.note_sounding_at(note.start) else {
            continue;
        };
        let Some(interval) = DiatonicInterval::between(note.pitch, cf.pitch) else {
            continue;
        };
        match Tradition::Renaissance.classify(interval) {
            Consonance::PerfectConsonance => perfect_count += 1,
            Consonance::ImperfectConsonance => imperfect_count += 1,
            _ => {}
        }
    }
    let total = perfect_count + imperfect_count;
    if total == 0 {
        return Annotation::perfect();
    }
    let ratio = f64::from(imperfect_count) / f64::from(total);
    if ratio >= 0.5 {
        return Annotation::perfect();
    }
    let marks = Mark::spanning(notes.iter().map(|n| (n.start, n.end)), PENALTY)
        .into_iter()
        .collect();
    Annotation::new(PENALTY, "prefer imperfect consonances", marks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Rule;
    use gradus_score::composition::Composition;
    use gradus_score::rhythm::{Meter, Position, RhythmicValue};
    use gradus_score::voice::{Placement, Voice, VoiceId};
    use gradus_theory::key::KeySignature;
    use gradus_theory::pitch::Pitch;

    fn whole_note_voice(role: &str, names: &[&str]) -> Voice {
        let mut voice = Voice::new(role);
        for (i, name) in names.iter().enumerate() {
            voice.insert(Placement::note(
                Position::new(i as u32 + 1, 1),
                RhythmicValue::Whole,
                Pitch::parse(name).unwrap(),
            ));
        }
        voice
    }

    /// Cantus firmus in voice 0, counterpoint in voice 1; judges voice 1.
    fn duet(cantus: &[&str], counterpoint: &[&str]) -> Composition {
        let mut comp = Composition::new(
            "exercise",
            KeySignature::d_dorian(),
            Meter::common_time(),
        );
        comp.add_voice(whole_note_voice("cantus firmus", cantus));
        comp.add_voice(whole_note_voice("counterpoint", counterpoint));
        comp
    }

    fn judge(rule: Rule, comp: &Composition) -> Annotation {
        let subject = Subject::new(comp, VoiceId(1)).unwrap();
        rule.evaluate(&subject)
    }

    #[test]
    fn test_harmonic_rules_pass_without_reference() {
        let mut comp = Composition::new(
            "solo",
            KeySignature::d_dorian(),
            Meter::common_time(),
        );
        comp.add_voice(whole_note_voice("melody", &["D4", "E4", "F4"]));
        let subject = Subject::new(&comp, VoiceId(0)).unwrap();
        for rule in [
            Rule::ConsonantDownbeats,
            Rule::PassingDissonancesOnly,
            Rule::ApproachPerfectionContrarily,
            Rule::AvoidCrossingVoices,
            Rule::AvoidOverlappingVoices,
            Rule::PreferContraryMotion,
            Rule::PreferImperfect,
        ] {
            assert!(rule.evaluate(&subject).is_perfect(), "{}", rule.name());
        }
    }

    #[test]
    fn test_consonant_downbeats_flags_fourth() {
        // G4 over D4 is a perfect fourth: dissonant against the bass in
        // the Renaissance reckoning.
        let comp = duet(&["D4", "D4", "D4"], &["A4", "G4", "A4"]);
        let verdict = judge(Rule::ConsonantDownbeats, &comp);
        assert!((verdict.fitness() - PENALTY).abs() < 1e-12);
        assert_eq!(verdict.marks().len(), 1);
        assert_eq!(verdict.marks()[0].start, Position::new(2, 1));
    }

    #[test]
    fn test_consonant_downbeats_clean_line() {
        let comp = duet(&["D4", "F4", "E4", "D4"], &["D5", "A4", "G4", "F4"]);
        // P8, M3, m3, m3.
        assert!(judge(Rule::ConsonantDownbeats, &comp).is_perfect());
    }

    #[test]
    fn test_passing_dissonance_by_step_is_allowed() {
        let mut comp = Composition::new(
            "exercise",
            KeySignature::d_dorian(),
            Meter::common_time(),
        );
        comp.add_voice(whole_note_voice("cantus firmus", &["D4", "D4"]));
        let mut counterpoint = Voice::new("counterpoint");
        let halves = [
            (Position::new(1, 1), "D5"),
            (Position::new(1, 3), "C5"),
            (Position::new(2, 1), "B4"),
        ];
        for (position, name) in halves {
            counterpoint.insert(Placement::note(
                position,
                RhythmicValue::Half,
                Pitch::parse(name).unwrap(),
            ));
        }
        comp.add_voice(counterpoint);
        // C5 over D4 is a seventh, but it passes by step from D5 to B4.
        assert!(judge(Rule::PassingDissonancesOnly, &comp).is_perfect());
    }

    #[test]
    fn test_leaped_into_dissonance_is_flagged() {
        let mut comp = Composition::new(
            "exercise",
            KeySignature::d_dorian(),
            Meter::common_time(),
        );
        comp.add_voice(whole_note_voice("cantus firmus", &["D4", "D4"]));
        let mut counterpoint = Voice::new("counterpoint");
        let halves = [
            (Position::new(1, 1), "D5"),
            (Position::new(1, 3), "G4"),
            (Position::new(2, 1), "A4"),
        ];
        for (position, name) in halves {
            counterpoint.insert(Placement::note(
                position,
                RhythmicValue::Half,
                Pitch::parse(name).unwrap(),
            ));
        }
        comp.add_voice(counterpoint);
        // G4 over D4 is dissonant and arrives by leap.
        let verdict = judge(Rule::PassingDissonancesOnly, &comp);
        assert!((verdict.fitness() - PENALTY).abs() < 1e-12);
        assert_eq!(verdict.marks()[0].start, Position::new(1, 3));
    }

    #[test]
    fn test_approach_perfection_contrarily() {
        // Into bar 2 both voices ascend into a fifth: similar motion.
        let comp = duet(&["D4", "E4", "D4"], &["F4", "B4", "G4"]);
        let verdict = judge(Rule::ApproachPerfectionContrarily, &comp);
        assert!((verdict.fitness() - PENALTY).abs() < 1e-12);
        assert_eq!(verdict.marks().len(), 1);
        assert_eq!(verdict.marks()[0].start, Position::new(1, 1));

        // Same fifth approached in contrary motion is fine.
        let comp = duet(&["D4", "C4", "D4"], &["F4", "G4", "F4"]);
        assert!(judge(Rule::ApproachPerfectionContrarily, &comp).is_perfect());

        // Imperfect consonances may be approached any way.
        let comp = duet(&["D4", "E4", "D4"], &["F4", "G4", "F4"]);
        assert!(judge(Rule::ApproachPerfectionContrarily, &comp).is_perfect());
    }

    #[test]
    fn test_avoid_crossing_voices() {
        // The counterpoint starts above, then dips below the cantus.
        let comp = duet(&["D4", "E4", "D4"], &["A4", "C4", "A4"]);
        let verdict = judge(Rule::AvoidCrossingVoices, &comp);
        assert!((verdict.fitness() - PENALTY).abs() < 1e-12);
        assert_eq!(verdict.marks()[0].start, Position::new(2, 1));

        // Meeting in unison is not a crossing.
        let comp = duet(&["D4", "E4", "D4"], &["A4", "E4", "A4"]);
        assert!(judge(Rule::AvoidCrossingVoices, &comp).is_perfect());
    }

    #[test]
    fn test_avoid_overlapping_voices() {
        // Bar 2: A3 is below D4, where the cantus was in bar 1. That is an
        // overlap even though G3 keeps the voices uncrossed in bar 2.
        let comp = duet(&["D4", "G3", "D4"], &["F4", "A3", "F4"]);
        let verdict = judge(Rule::AvoidOverlappingVoices, &comp);
        assert!((verdict.fitness() - PENALTY).abs() < 1e-12);
        assert_eq!(verdict.marks()[0].start, Position::new(2, 1));

        let comp = duet(&["D4", "G3", "D4"], &["F4", "E4", "F4"]);
        assert!(judge(Rule::AvoidOverlappingVoices, &comp).is_perfect());
    }

    #[test]
    fn test_prefer_contrary_motion_ratio() {
        // Both motions similar: ratio 0.
        let comp = duet(&["D4", "E4", "F4"], &["F4", "G4", "A4"]);
        let verdict = judge(Rule::PreferContraryMotion, &comp);
        assert!((verdict.fitness() - PENALTY).abs() < 1e-12);
        assert_eq!(verdict.marks().len(), 1);

        // One contrary of two: ratio 0.5 passes.
        let comp = duet(&["D4", "E4", "F4"], &["F4", "G4", "F4"]);
        assert!(judge(Rule::PreferContraryMotion, &comp).is_perfect());
    }

    #[test]
    fn test_prefer_imperfect_ratio() {
        // All perfect: flagged.
        let comp = duet(&["D4", "E4", "D4"], &["D5", "E5", "D5"]);
        let verdict = judge(Rule::PreferImperfect, &comp);
        assert!((verdict.fitness() - PENALTY).abs() < 1e-12);

        // Thirds and sixths dominate: passes.
        let comp = duet(&["D4", "E4", "D4"], &["F4", "G4", "B4"]);
        assert!(judge(Rule::PreferImperfect, &comp).is_perfect());
    }

    #[test]
    fn test_prefer_imperfect_counts_downbeats_only() {
        // Second species: the off-beat thirds do not redeem downbeats
        // that are all fifths and octaves.
        let mut comp = Composition::new(
            "exercise",
            KeySignature::d_dorian(),
            Meter::common_time(),
        );
        comp.add_voice(whole_note_voice("cantus firmus", &["D4", "D4", "D4"]));
        let mut counterpoint = Voice::new("counterpoint");
        let halves = [
            (Position::new(1, 1), "A4"),
            (Position::new(1, 3), "F4"),
            (Position::new(2, 1), "A4"),
            (Position::new(2, 3), "F4"),
            (Position::new(3, 1), "D5"),
            (Position::new(3, 3), "B4"),
        ];
        for (position, name) in halves {
            counterpoint.insert(Placement::note(
                position,
                RhythmicValue::Half,
                Pitch::parse(name).unwrap(),
            ));
        }
        comp.add_voice(counterpoint);
        let verdict = judge(Rule::PreferImperfect, &comp);
        assert!((verdict.fitness() - PENALTY).abs() < 1e-12);
        assert_eq!(verdict.marks().len(), 1);

        // And a downbeat third passes however perfect the off-beats are.
        let mut comp = Composition::new(
            "exercise",
            KeySignature::d_dorian(),
            Meter::common_time(),
        );
        comp.add_voice(whole_note_voice("cantus firmus", &["D4"]));
        let mut counterpoint = Voice::new("counterpoint");
        let quarters = [
            (Position::new(1, 1), "F4"),
            (Position::new(1, 2), "A4"),
            (Position::new(1, 3), "D5"),
            (Position::new(1, 4), "A4"),
        ];
        for (position, name) in quarters {
            counterpoint.insert(Placement::note(
                position,
                RhythmicValue::Quarter,
                Pitch::parse(name).unwrap(),
            ));
        }
        comp.add_voice(counterpoint);
        assert!(judge(Rule::PreferImperfect, &comp).is_perfect());
    }
}
