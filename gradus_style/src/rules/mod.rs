// The rule catalog.
//
// Every rule is a pure function of a Subject: same input, same verdict, no
// state between invocations. That purity is what lets a guide fan its rules
// out across threads and still assemble a deterministic result.
//
// Rules are enum variants rather than trait objects so the catalog is
// closed and checkable: a guide can only ever name rules that exist, and
// the dispatch match must cover every one. Evaluation logic lives in
// melodic.rs (single-line rules) and harmonic.rs (rules judging the voice
// against the cantus firmus).
//
// Penalties multiply. Each violation scales fitness by PENALTY (the
// inverse golden ratio) or, for the softer half of a leap-recovery
// failure, SMALL_PENALTY (its square root). Documented example scores
// depend on these exact constants.

mod harmonic;
mod melodic;

use serde::{Deserialize, Serialize};

use crate::annotation::Annotation;
use crate::mark::Mark;
use crate::melody::Subject;

/// Fitness multiplier for one violation: 1/φ.
pub const PENALTY: f64 = 0.618_033_988_749_894_9;

/// Softer multiplier for half-recovered leaps: sqrt(1/φ).
pub const SMALL_PENALTY: f64 = 0.786_151_377_757_423_3;

/// Every rule in the catalog. Melodic rules judge one line by itself;
/// harmonic rules judge it against the cantus firmus and pass vacuously
/// when there is none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    // Melodic
    AlwaysMove,
    AtLeastEightNotes,
    UpToThirteenNotes,
    Diatonic,
    MostlyConjunct,
    RecoverLargeLeaps,
    StartOnTonic,
    EndOnTonic,
    StepDownToFinalNote,
    NoRests,
    NotesSameLength,
    PermittedIntervals,
    FrequentDirectionChanges,
    ConsonantClimax,
    SingableRange,
    SingableIntervals,
    SingleLargeLeaps,
    // Harmonic
    ConsonantDownbeats,
    PassingDissonancesOnly,
    ApproachPerfectionContrarily,
    AvoidCrossingVoices,
    AvoidOverlappingVoices,
    PreferContraryMotion,
    PreferImperfect,
}

impl Rule {
    pub const ALL: [Rule; 24] = [
        Rule::AlwaysMove,
        Rule::AtLeastEightNotes,
        Rule::UpToThirteenNotes,
        Rule::Diatonic,
        Rule::MostlyConjunct,
        Rule::RecoverLargeLeaps,
        Rule::StartOnTonic,
        Rule::EndOnTonic,
        Rule::StepDownToFinalNote,
        Rule::NoRests,
        Rule::NotesSameLength,
        Rule::PermittedIntervals,
        Rule::FrequentDirectionChanges,
        Rule::ConsonantClimax,
        Rule::SingableRange,
        Rule::SingableIntervals,
        Rule::SingleLargeLeaps,
        Rule::ConsonantDownbeats,
        Rule::PassingDissonancesOnly,
        Rule::ApproachPerfectionContrarily,
        Rule::AvoidCrossingVoices,
        Rule::AvoidOverlappingVoices,
        Rule::PreferContraryMotion,
        Rule::PreferImperfect,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Rule::AlwaysMove => "always-move",
            Rule::AtLeastEightNotes => "at-least-eight-notes",
            Rule::UpToThirteenNotes => "up-to-thirteen-notes",
            Rule::Diatonic => "diatonic",
            Rule::MostlyConjunct => "mostly-conjunct",
            Rule::RecoverLargeLeaps => "recover-large-leaps",
            Rule::StartOnTonic => "start-on-tonic",
            Rule::EndOnTonic => "end-on-tonic",
            Rule::StepDownToFinalNote => "step-down-to-final-note",
            Rule::NoRests => "no-rests",
            Rule::NotesSameLength => "notes-same-length",
            Rule::PermittedIntervals => "permitted-intervals",
            Rule::FrequentDirectionChanges => "frequent-direction-changes",
            Rule::ConsonantClimax => "consonant-climax",
            Rule::SingableRange => "singable-range",
            Rule::SingableIntervals => "singable-intervals",
            Rule::SingleLargeLeaps => "single-large-leaps",
            Rule::ConsonantDownbeats => "consonant-downbeats",
            Rule::PassingDissonancesOnly => "passing-dissonances-only",
            Rule::ApproachPerfectionContrarily => "approach-perfection-contrarily",
            Rule::AvoidCrossingVoices => "avoid-crossing-voices",
            Rule::AvoidOverlappingVoices => "avoid-overlapping-voices",
            Rule::PreferContraryMotion => "prefer-contrary-motion",
            Rule::PreferImperfect => "prefer-imperfect",
        }
    }

    /// Look a rule up by name. Underscores and hyphens are interchangeable;
    /// case is ignored.
    pub fn parse(s: &str) -> Option<Rule> {
        let normalized = s.to_ascii_lowercase().replace('_', "-");
        Rule::ALL.into_iter().find(|r| r.name() == normalized)
    }

    /// Run this rule against a subject, producing its full verdict.
    pub fn evaluate(self, subject: &Subject) -> Annotation {
        match self {
            Rule::AlwaysMove => melodic::always_move(subject),
            Rule::AtLeastEightNotes => melodic::at_least_eight_notes(subject),
            Rule::UpToThirteenNotes => melodic::up_to_thirteen_notes(subject),
            Rule::Diatonic => melodic::diatonic(subject),
            Rule::MostlyConjunct => melodic::mostly_conjunct(subject),
            Rule::RecoverLargeLeaps => melodic::recover_large_leaps(subject),
            Rule::StartOnTonic => melodic::start_on_tonic(subject),
            Rule::EndOnTonic => melodic::end_on_tonic(subject),
            Rule::StepDownToFinalNote => melodic::step_down_to_final_note(subject),
            Rule::NoRests => melodic::no_rests(subject),
            Rule::NotesSameLength => melodic::notes_same_length(subject),
            Rule::PermittedIntervals => melodic::permitted_intervals(subject),
            Rule::FrequentDirectionChanges => melodic::frequent_direction_changes(subject),
            Rule::ConsonantClimax => melodic::consonant_climax(subject),
            Rule::SingableRange => melodic::singable_range(subject),
            Rule::SingableIntervals => melodic::singable_intervals(subject),
            Rule::SingleLargeLeaps => melodic::single_large_leaps(subject),
            Rule::ConsonantDownbeats => harmonic::consonant_downbeats(subject),
            Rule::PassingDissonancesOnly => harmonic::passing_dissonances_only(subject),
            Rule::ApproachPerfectionContrarily => {
                harmonic::approach_perfection_contrarily(subject)
            }
            Rule::AvoidCrossingVoices => harmonic::avoid_crossing_voices(subject),
            Rule::AvoidOverlappingVoices => harmonic::avoid_overlapping_voices(subject),
            Rule::PreferContraryMotion => harmonic::prefer_contrary_motion(subject),
            Rule::PreferImperfect => harmonic::prefer_imperfect(subject),
        }
    }

    /// The score alone, without the verdict's evidence.
    pub fn fitness(self, subject: &Subject) -> f64 {
        self.evaluate(subject).fitness()
    }

    /// The verdicts as a list. Every rule in this catalog reports exactly
    /// one, so the list is always a singleton.
    pub fn annotations(self, subject: &Subject) -> Vec<Annotation> {
        vec![self.evaluate(subject)]
    }

    /// The evidence marks from this rule's verdict.
    pub fn marks(self, subject: &Subject) -> Vec<Mark> {
        self.evaluate(subject).marks().to_vec()
    }
}
