use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;

use tm_energy::melt_builtin;
use tm_energy::Environment;
use tm_energy::EnvironmentSpec;
use tm_sequence::Hybridization;

pub fn melting(c: &mut Criterion) {
    let mut group = c.benchmark_group("Melting");

    let primer = EnvironmentSpec {
        sequence: "GTCGTATCCAGTGCAGGG".to_string(),
        sodium: 0.05,
        strand_concentration: 5e-8,
        ..EnvironmentSpec::default()
    };
    let fifty = EnvironmentSpec {
        sequence: "GTCGTATCCAGTGCAGGGTCCGAGGTATTCGCACTGGATACGACTTCCAC".to_string(),
        ..primer.clone()
    };
    let hairpin = EnvironmentSpec {
        sequence: "GCGAAAACGC".to_string(),
        hybridization: Hybridization::Hairpin,
        loop_span: Some((3, 7)),
        sodium: 0.1,
        ..EnvironmentSpec::default()
    };

    let primer_env = Environment::new(&primer).unwrap();
    let fifty_env = Environment::new(&fifty).unwrap();
    let hairpin_env = Environment::new(&hairpin).unwrap();

    group.bench_function("Environment validation", |b| {
        b.iter(|| {
            let _ = Environment::new(&fifty);
        });
    });
    group.bench_function("18-mer primer", |b| {
        b.iter(|| {
            let _ = melt_builtin(&primer_env);
        });
    });
    group.bench_function("50-mer duplex", |b| {
        b.iter(|| {
            let _ = melt_builtin(&fifty_env);
        });
    });
    group.bench_function("Hairpin", |b| {
        b.iter(|| {
            let _ = melt_builtin(&hairpin_env);
        });
    });
}

criterion_group!(benches, melting);
criterion_main!(benches);
