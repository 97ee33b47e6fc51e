// Gradus Critique: CLI entry point.
//
// Analyzes a composition against a named guide and prints the verdict per
// voice. The pipeline: load composition → resolve guide and voices →
// evaluate rules in parallel → report fitness, advice, and flagged spans.
//
// Usage:
//   cargo run -p gradus_style -- [composition.json] [--guide NAME] [--voice N]
//     [--json] [--list-guides]
//
// Every voice is analyzed unless --voice picks one. With no input file the
// built-in Gradus ad Parnassum exercises are analyzed: the dorian cantus
// firmus for melodic guides, the two-voice first-species setting for
// harmony guides.

use std::path::Path;

use gradus_score::{Composition, VoiceId};
use gradus_style::analysis::Analysis;
use gradus_style::demo;
use gradus_style::guide::Guide;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--list-guides") {
        for guide in Guide::all() {
            println!("{:<24} {} rules", guide.name(), guide.rules().len());
        }
        return;
    }

    // Parse arguments
    let input_path = args
        .get(1)
        .filter(|s| !s.starts_with("--"))
        .map(|s| s.as_str());
    let guide_name: String =
        parse_flag(&args, "--guide").unwrap_or_else(|| "fux-cantus-firmus".to_string());
    let voice_flag: Option<usize> = parse_flag(&args, "--voice");
    let as_json = args.iter().any(|a| a == "--json");

    let Some(guide) = Guide::named(&guide_name) else {
        eprintln!("Unknown guide '{}'. Try --list-guides.", guide_name);
        std::process::exit(1);
    };

    if !as_json {
        println!("=== Gradus Critique ===");
        println!("Guide: {} ({} rules)", guide.name(), guide.rules().len());
        println!();
    }

    // Load the composition
    if !as_json {
        println!("[1/3] Loading composition...");
    }
    let composition = match input_path {
        Some(path) => match Composition::load(Path::new(path)) {
            Ok(c) => {
                if !as_json {
                    println!("  Loaded '{}' ({} voices).", c.title(), c.voices().len());
                }
                c
            }
            Err(e) => {
                eprintln!("  Error loading {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => {
            // Harmony guides need a cantus firmus to judge against.
            let c = if guide.name().ends_with("harmony") {
                demo::two_voice_first_species()
            } else {
                demo::fux_dorian_cantus_firmus()
            };
            if !as_json {
                println!("  No input file. Using built-in '{}'.", c.title());
            }
            c
        }
    };

    let voices: Vec<usize> = match voice_flag {
        Some(v) => vec![v],
        None => (0..composition.voices().len()).collect(),
    };

    // Analyze
    if !as_json {
        println!("[2/3] Analyzing {} voice(s)...", voices.len());
    }
    let mut analyses = Vec::new();
    for index in voices {
        match Analysis::run(&guide, &composition, VoiceId(index)) {
            Some(analysis) => analyses.push((index, analysis)),
            None => {
                eprintln!(
                    "  No voice {} in '{}' ({} voices).",
                    index,
                    composition.title(),
                    composition.voices().len()
                );
                std::process::exit(1);
            }
        }
    }

    // Report
    if as_json {
        let reports: Vec<&Analysis> = analyses.iter().map(|(_, a)| a).collect();
        match serde_json::to_string_pretty(&reports) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Error serializing analyses: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    println!("[3/3] Report for '{}':", composition.title());
    for (index, analysis) in &analyses {
        println!();
        println!("Voice {} ('{}')", index, analysis.voice());
        for outcome in analysis.outcomes() {
            let annotation = outcome.annotation();
            if annotation.is_perfect() {
                println!("  {:<32} 1.000", outcome.rule().name());
            } else {
                println!(
                    "  {:<32} {:.3}  {}",
                    outcome.rule().name(),
                    annotation.fitness(),
                    annotation.message().unwrap_or("")
                );
                for mark in annotation.marks() {
                    println!("      {} .. {}  (x{:.3})", mark.start, mark.end, mark.weight);
                }
            }
        }
        println!("  Fitness: {:.6}", analysis.fitness());
        if analysis.is_adherent() {
            println!("  Adheres to {}.", guide.name());
        } else {
            let advice = analysis.messages().len();
            println!(
                "  {} piece{} of advice. See above.",
                advice,
                if advice == 1 { "" } else { "s" }
            );
        }
    }
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
}
