//! Guide analysis benchmarks

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use gradus_score::VoiceId;
use gradus_style::analysis::Analysis;
use gradus_style::demo;
use gradus_style::guide::Guide;
use gradus_style::melody::Subject;
use gradus_style::rules::Rule;

fn bench_fux_guide(c: &mut Criterion) {
    let composition = demo::fux_dorian_cantus_firmus();
    let guide = Guide::fux_cantus_firmus();

    c.bench_function("fux_guide_cantus_firmus", |b| {
        b.iter(|| Analysis::run(black_box(&guide), black_box(&composition), VoiceId(0)))
    });
}

fn bench_harmony_guide(c: &mut Criterion) {
    let composition = demo::two_voice_first_species();
    let guide = Guide::first_species_harmony();

    c.bench_function("first_species_harmony_duet", |b| {
        b.iter(|| Analysis::run(black_box(&guide), black_box(&composition), VoiceId(1)))
    });
}

fn bench_single_rule(c: &mut Criterion) {
    let composition = demo::fux_dorian_cantus_firmus();
    let subject = Subject::new(&composition, VoiceId(0)).unwrap();

    c.bench_function("always_move_rule", |b| {
        b.iter(|| Rule::AlwaysMove.evaluate(black_box(&subject)))
    });
}

criterion_group!(benches, bench_fux_guide, bench_harmony_guide, bench_single_rule);
criterion_main!(benches);
