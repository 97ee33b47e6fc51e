// Consonance classification under historical traditions.
//
// What counts as consonant changed over the centuries, and the perfect
// fourth is the fault line: medieval theory ranks it with the perfect
// consonances, Renaissance counterpoint treats it as a dissonance against
// the bass, and modern practice calls it contextual. Harmony rules take a
// tradition as a strategy value, so the same voice pair can be judged under
// any convention.
//
// Compound intervals classify by their simple reduction: a P11 answers
// exactly as a P4 under every tradition.

use crate::interval::{DiatonicInterval, Quality};
use serde::{Deserialize, Serialize};

/// How an interval sounds against another voice, from most stable to least.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Consonance {
    /// Open, stable sonorities: unison, fifth, octave (and the fourth,
    /// under traditions that admit it).
    PerfectConsonance,
    /// Sweet but mobile: thirds and sixths.
    ImperfectConsonance,
    /// Neither by default; resolved by harmonic context elsewhere.
    Contextual,
    /// Gentle dissonances: major second, minor seventh.
    MildDissonance,
    /// Biting dissonances: minor second, major seventh.
    HarshDissonance,
    /// The undifferentiated remainder, including tritones and every
    /// augmented or diminished interval.
    Dissonance,
}

impl Consonance {
    /// Perfect or imperfect consonance.
    pub fn is_consonant(self) -> bool {
        matches!(
            self,
            Consonance::PerfectConsonance | Consonance::ImperfectConsonance
        )
    }

    /// Any flavor of dissonance. Contextual is neither consonant nor
    /// dissonant.
    pub fn is_dissonant(self) -> bool {
        matches!(
            self,
            Consonance::MildDissonance | Consonance::HarshDissonance | Consonance::Dissonance
        )
    }
}

/// A historical convention for judging intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tradition {
    Medieval,
    Renaissance,
    Modern,
}

impl Tradition {
    pub fn name(self) -> &'static str {
        match self {
            Tradition::Medieval => "medieval",
            Tradition::Renaissance => "renaissance",
            Tradition::Modern => "modern",
        }
    }

    /// Classify an interval under this tradition. Compound intervals reduce
    /// to simple form first.
    pub fn classify(self, interval: DiatonicInterval) -> Consonance {
        let simple = interval.simple();
        let number = simple.number();
        let quality = simple.quality();
        match self {
            Tradition::Medieval | Tradition::Renaissance => {
                match (number, quality) {
                    (1 | 5 | 8, Quality::Perfect) => Consonance::PerfectConsonance,
                    // The fourth is where the two traditions part ways.
                    (4, Quality::Perfect) => {
                        if self == Tradition::Medieval {
                            Consonance::PerfectConsonance
                        } else {
                            Consonance::Dissonance
                        }
                    }
                    (3 | 6, Quality::Minor | Quality::Major) => Consonance::ImperfectConsonance,
                    _ => Consonance::Dissonance,
                }
            }
            Tradition::Modern => match (number, quality) {
                (1 | 5 | 8, Quality::Perfect) => Consonance::PerfectConsonance,
                (4, Quality::Perfect) => Consonance::Contextual,
                (3 | 6, Quality::Minor | Quality::Major) => Consonance::ImperfectConsonance,
                (2, Quality::Major) | (7, Quality::Minor) => Consonance::MildDissonance,
                (2, Quality::Minor) | (7, Quality::Major) => Consonance::HarshDissonance,
                _ => Consonance::Dissonance,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(s: &str) -> DiatonicInterval {
        DiatonicInterval::parse(s).unwrap()
    }

    #[test]
    fn test_fourth_splits_the_traditions() {
        let fourth = iv("P4");
        assert_eq!(
            Tradition::Medieval.classify(fourth),
            Consonance::PerfectConsonance
        );
        assert_eq!(
            Tradition::Renaissance.classify(fourth),
            Consonance::Dissonance
        );
        assert_eq!(Tradition::Modern.classify(fourth), Consonance::Contextual);
    }

    #[test]
    fn test_shared_core() {
        for tradition in [
            Tradition::Medieval,
            Tradition::Renaissance,
            Tradition::Modern,
        ] {
            for name in ["P1", "P5", "P8"] {
                assert_eq!(
                    tradition.classify(iv(name)),
                    Consonance::PerfectConsonance,
                    "{} under {}",
                    name,
                    tradition.name()
                );
            }
            for name in ["m3", "M3", "m6", "M6"] {
                assert_eq!(
                    tradition.classify(iv(name)),
                    Consonance::ImperfectConsonance,
                    "{} under {}",
                    name,
                    tradition.name()
                );
            }
        }
    }

    #[test]
    fn test_modern_dissonance_grades() {
        assert_eq!(
            Tradition::Modern.classify(iv("M2")),
            Consonance::MildDissonance
        );
        assert_eq!(
            Tradition::Modern.classify(iv("m7")),
            Consonance::MildDissonance
        );
        assert_eq!(
            Tradition::Modern.classify(iv("m2")),
            Consonance::HarshDissonance
        );
        assert_eq!(
            Tradition::Modern.classify(iv("M7")),
            Consonance::HarshDissonance
        );
        // Tritones and altered intervals fall through to the plain bucket.
        assert_eq!(Tradition::Modern.classify(iv("A4")), Consonance::Dissonance);
        assert_eq!(Tradition::Modern.classify(iv("d5")), Consonance::Dissonance);
        assert_eq!(Tradition::Modern.classify(iv("A1")), Consonance::Dissonance);
    }

    #[test]
    fn test_renaissance_coarse_dissonance() {
        for name in ["m2", "M2", "m7", "M7", "A4", "d5"] {
            assert_eq!(
                Tradition::Renaissance.classify(iv(name)),
                Consonance::Dissonance,
                "{}",
                name
            );
        }
    }

    #[test]
    fn test_compound_classifies_as_simple() {
        // P11 is a compound P4 and must answer exactly as a P4 does.
        let eleventh = iv("P11");
        for tradition in [
            Tradition::Medieval,
            Tradition::Renaissance,
            Tradition::Modern,
        ] {
            assert_eq!(
                tradition.classify(eleventh),
                tradition.classify(iv("P4")),
                "under {}",
                tradition.name()
            );
        }
        assert_eq!(
            Tradition::Renaissance.classify(iv("M10")),
            Consonance::ImperfectConsonance
        );
    }

    #[test]
    fn test_consonance_predicates() {
        assert!(Consonance::PerfectConsonance.is_consonant());
        assert!(Consonance::ImperfectConsonance.is_consonant());
        assert!(!Consonance::Contextual.is_consonant());
        assert!(!Consonance::Contextual.is_dissonant());
        assert!(Consonance::MildDissonance.is_dissonant());
        assert!(Consonance::Dissonance.is_dissonant());
    }
}
