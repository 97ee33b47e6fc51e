// Named guides: ordered rule lists per pedagogical context.
//
// A guide is nothing but a name and an ordered list of rules. Rules are
// independent of one another, so a guide fans them out across threads and
// collects the verdicts back in declaration order; the order matters for
// matching expected messages, not for correctness.
//
// The catalog follows the species-counterpoint curriculum: cantus firmus
// writing (in the strict Fux interval vocabulary or a modern relaxation),
// melody guides for the first three species plus triple meter, and harmony
// guides for the first three species.

use rayon::prelude::*;

use crate::annotation::Annotation;
use crate::melody::Subject;
use crate::rules::Rule;

#[derive(Debug, Clone)]
pub struct Guide {
    name: &'static str,
    rules: Vec<Rule>,
}

impl Guide {
    fn new(name: &'static str, rules: Vec<Rule>) -> Self {
        Guide { name, rules }
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Run every rule against the subject. Evaluation is parallel; the
    /// returned verdicts are in rule order.
    pub fn analyze(&self, subject: &Subject) -> Vec<Annotation> {
        self.rules
            .par_iter()
            .map(|rule| rule.evaluate(subject))
            .collect()
    }

    /// Every guide in the catalog.
    pub fn all() -> Vec<Guide> {
        vec![
            Guide::fux_cantus_firmus(),
            Guide::modern_cantus_firmus(),
            Guide::first_species_melody(),
            Guide::second_species_melody(),
            Guide::third_species_melody(),
            Guide::triple_meter_melody(),
            Guide::first_species_harmony(),
            Guide::second_species_harmony(),
            Guide::third_species_harmony(),
        ]
    }

    /// Look a guide up by name. Underscores and hyphens are
    /// interchangeable; case is ignored.
    pub fn named(name: &str) -> Option<Guide> {
        let normalized = name.to_ascii_lowercase().replace('_', "-");
        Guide::all().into_iter().find(|g| g.name == normalized)
    }

    /// The strict cantus firmus discipline, interval vocabulary included.
    pub fn fux_cantus_firmus() -> Guide {
        Guide::new(
            "fux-cantus-firmus",
            vec![
                Rule::AtLeastEightNotes,
                Rule::UpToThirteenNotes,
                Rule::AlwaysMove,
                Rule::NoRests,
                Rule::NotesSameLength,
                Rule::Diatonic,
                Rule::StartOnTonic,
                Rule::EndOnTonic,
                Rule::StepDownToFinalNote,
                Rule::MostlyConjunct,
                Rule::FrequentDirectionChanges,
                Rule::RecoverLargeLeaps,
                Rule::SingleLargeLeaps,
                Rule::PermittedIntervals,
                Rule::SingableIntervals,
                Rule::SingableRange,
                Rule::ConsonantClimax,
            ],
        )
    }

    /// The Fux discipline without the fixed interval table.
    pub fn modern_cantus_firmus() -> Guide {
        let rules = Guide::fux_cantus_firmus()
            .rules
            .into_iter()
            .filter(|&rule| rule != Rule::PermittedIntervals)
            .collect();
        Guide::new("modern-cantus-firmus", rules)
    }

    /// Melodic conduct for a first-species counterpoint line. Repeated
    /// notes and free openings are allowed; the rest of the cantus firmus
    /// discipline stands.
    pub fn first_species_melody() -> Guide {
        Guide::new(
            "first-species-melody",
            vec![
                Rule::AtLeastEightNotes,
                Rule::UpToThirteenNotes,
                Rule::NoRests,
                Rule::NotesSameLength,
                Rule::Diatonic,
                Rule::EndOnTonic,
                Rule::MostlyConjunct,
                Rule::FrequentDirectionChanges,
                Rule::RecoverLargeLeaps,
                Rule::SingleLargeLeaps,
                Rule::SingableIntervals,
                Rule::SingableRange,
                Rule::ConsonantClimax,
            ],
        )
    }

    /// Second species: two notes against one. Mixed note lengths, longer
    /// lines, and the customary opening rest are all admitted.
    pub fn second_species_melody() -> Guide {
        Guide::new(
            "second-species-melody",
            vec![
                Rule::AtLeastEightNotes,
                Rule::Diatonic,
                Rule::EndOnTonic,
                Rule::MostlyConjunct,
                Rule::FrequentDirectionChanges,
                Rule::RecoverLargeLeaps,
                Rule::SingleLargeLeaps,
                Rule::SingableIntervals,
                Rule::SingableRange,
                Rule::ConsonantClimax,
            ],
        )
    }

    /// Third species: florid runs make constant direction changes
    /// unreasonable to demand.
    pub fn third_species_melody() -> Guide {
        Guide::new(
            "third-species-melody",
            vec![
                Rule::AtLeastEightNotes,
                Rule::Diatonic,
                Rule::EndOnTonic,
                Rule::MostlyConjunct,
                Rule::RecoverLargeLeaps,
                Rule::SingleLargeLeaps,
                Rule::SingableIntervals,
                Rule::SingableRange,
                Rule::ConsonantClimax,
            ],
        )
    }

    /// Melodic conduct for triple-meter exercises.
    pub fn triple_meter_melody() -> Guide {
        Guide::new(
            "triple-meter-melody",
            vec![
                Rule::AtLeastEightNotes,
                Rule::AlwaysMove,
                Rule::NoRests,
                Rule::Diatonic,
                Rule::EndOnTonic,
                Rule::MostlyConjunct,
                Rule::RecoverLargeLeaps,
                Rule::SingleLargeLeaps,
                Rule::SingableIntervals,
                Rule::SingableRange,
                Rule::ConsonantClimax,
            ],
        )
    }

    /// Note-against-note harmony: every beat a downbeat, every interval
    /// judged.
    pub fn first_species_harmony() -> Guide {
        Guide::new(
            "first-species-harmony",
            vec![
                Rule::ConsonantDownbeats,
                Rule::ApproachPerfectionContrarily,
                Rule::PreferContraryMotion,
                Rule::PreferImperfect,
                Rule::AvoidCrossingVoices,
                Rule::AvoidOverlappingVoices,
            ],
        )
    }

    /// Second species adds off-beat notes, so dissonance handling enters.
    pub fn second_species_harmony() -> Guide {
        Guide::new(
            "second-species-harmony",
            vec![
                Rule::ConsonantDownbeats,
                Rule::PassingDissonancesOnly,
                Rule::ApproachPerfectionContrarily,
                Rule::PreferContraryMotion,
                Rule::PreferImperfect,
                Rule::AvoidCrossingVoices,
                Rule::AvoidOverlappingVoices,
            ],
        )
    }

    /// Third species: four notes against one. With that much motion the
    /// approach into each downbeat is judged by the passing rules alone.
    pub fn third_species_harmony() -> Guide {
        let rules = Guide::second_species_harmony()
            .rules
            .into_iter()
            .filter(|&rule| rule != Rule::ApproachPerfectionContrarily)
            .collect();
        Guide::new("third-species-harmony", rules)
    }
}
