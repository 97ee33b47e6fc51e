// Analysis: one guide applied to one voice, verdicts bundled.
//
// An Analysis pairs each of the guide's rules with the annotation it
// produced and folds the fitnesses into a single figure by
// multiplication. Perfect adherence is exactly 1.0; every violation
// scales the total down, so two small faults weigh the same wherever
// they fall. The struct is plain data once built; serialize it and the
// whole report travels.

use serde::Serialize;

use gradus_score::{Composition, VoiceId};

use crate::annotation::Annotation;
use crate::guide::Guide;
use crate::melody::Subject;
use crate::rules::Rule;

/// One rule's verdict inside an analysis.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    rule: Rule,
    annotation: Annotation,
}

impl Outcome {
    pub fn rule(&self) -> Rule {
        self.rule
    }

    pub fn annotation(&self) -> &Annotation {
        &self.annotation
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    guide: String,
    voice: String,
    outcomes: Vec<Outcome>,
    fitness: f64,
}

impl Analysis {
    /// Analyze one voice of a composition under a guide. Returns `None`
    /// when the voice id does not name a voice.
    pub fn run(guide: &Guide, composition: &Composition, voice: VoiceId) -> Option<Analysis> {
        let subject = Subject::new(composition, voice)?;
        let annotations = guide.analyze(&subject);
        let outcomes: Vec<Outcome> = guide
            .rules()
            .iter()
            .copied()
            .zip(annotations)
            .map(|(rule, annotation)| Outcome { rule, annotation })
            .collect();
        let fitness = outcomes.iter().map(|o| o.annotation.fitness()).product();
        Some(Analysis {
            guide: guide.name().to_string(),
            voice: subject.voice().role().to_string(),
            outcomes,
            fitness,
        })
    }

    pub fn guide(&self) -> &str {
        &self.guide
    }

    pub fn voice(&self) -> &str {
        &self.voice
    }

    /// Product of every rule's fitness.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn is_adherent(&self) -> bool {
        self.fitness == 1.0
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Advice from the violated rules, in rule order.
    pub fn messages(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter_map(|o| o.annotation.message())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradus_score::{Meter, Placement, Position, RhythmicValue, Voice};
    use gradus_theory::{KeySignature, Pitch};

    use crate::rules::PENALTY;

    fn line(names: &[&str]) -> Composition {
        let mut composition =
            Composition::new("exercise", KeySignature::d_dorian(), Meter::common_time());
        let mut voice = Voice::new("cantus firmus");
        for (i, name) in names.iter().enumerate() {
            let position = Position::new(i as u32 + 1, 1);
            let pitch = Pitch::parse(name).unwrap();
            voice.insert(Placement::note(position, RhythmicValue::Whole, pitch));
        }
        composition.add_voice(voice);
        composition
    }

    const FUX_DORIAN: [&str; 11] = [
        "D4", "F4", "E4", "D4", "G4", "F4", "A4", "G4", "F4", "E4", "D4",
    ];

    #[test]
    fn test_adherent_line_scores_one() {
        let composition = line(&FUX_DORIAN);
        let guide = Guide::fux_cantus_firmus();
        let analysis = Analysis::run(&guide, &composition, VoiceId(0)).unwrap();
        assert_eq!(analysis.fitness(), 1.0);
        assert!(analysis.is_adherent());
        assert!(analysis.messages().is_empty());
        assert_eq!(analysis.outcomes().len(), guide.rules().len());
        assert_eq!(analysis.guide(), "fux-cantus-firmus");
        assert_eq!(analysis.voice(), "cantus firmus");
    }

    #[test]
    fn test_one_violation_scales_the_product() {
        // Repeating the F in bar six trips exactly one rule.
        let names = [
            "D4", "F4", "E4", "D4", "G4", "F4", "F4", "A4", "G4", "F4", "E4", "D4",
        ];
        let composition = line(&names);
        let guide = Guide::fux_cantus_firmus();
        let analysis = Analysis::run(&guide, &composition, VoiceId(0)).unwrap();
        assert!((analysis.fitness() - PENALTY).abs() < 1e-12);
        assert!(!analysis.is_adherent());
        assert_eq!(
            analysis.messages(),
            vec!["move to a different note rather than repeating it"]
        );
    }

    #[test]
    fn test_fitness_matches_outcome_product() {
        let composition = line(&["D4", "D4", "B4"]);
        let guide = Guide::fux_cantus_firmus();
        let analysis = Analysis::run(&guide, &composition, VoiceId(0)).unwrap();
        let product: f64 = analysis
            .outcomes()
            .iter()
            .map(|o| o.annotation().fitness())
            .product();
        assert_eq!(analysis.fitness(), product);
    }

    #[test]
    fn test_unknown_voice_yields_none() {
        let composition = line(&FUX_DORIAN);
        let guide = Guide::fux_cantus_firmus();
        assert!(Analysis::run(&guide, &composition, VoiceId(7)).is_none());
    }

    #[test]
    fn test_serializes_with_rule_names() {
        let composition = line(&FUX_DORIAN);
        let guide = Guide::fux_cantus_firmus();
        let analysis = Analysis::run(&guide, &composition, VoiceId(0)).unwrap();
        let value = serde_json::to_value(&analysis).unwrap();
        assert_eq!(value["guide"], "fux-cantus-firmus");
        assert_eq!(value["fitness"], 1.0);
        let rules: Vec<&str> = value["outcomes"]
            .as_array()
            .unwrap()
            .iter()
            .map(|o| o["rule"].as_str().unwrap())
            .collect();
        assert_eq!(rules[0], "at-least-eight-notes");
        assert!(rules.contains(&"permitted-intervals"));
    }
}
