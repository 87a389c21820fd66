use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use rrnevo_sim::base::Locus;
use rrnevo_sim::evolution::{GeneConversionModel, MutationModel};
use rrnevo_sim::genome::{Genome, GenomeLayout};
use rrnevo_sim::simulation::TrajectorySampler;

fn bench_mutation(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutation");
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);

    let rates = [1e-10, 5e-9, 1e-4];
    let lengths = [1_541, 2_904, 100_000];

    for &len in &lengths {
        group.throughput(Throughput::Elements(1));

        for &rate in &rates {
            let model = MutationModel::new(rate).unwrap();
            let parameter_string = format!("len={len}/rate={rate}");

            group.bench_with_input(
                BenchmarkId::new("mutate_locus", &parameter_string),
                &len,
                |b, &len| {
                    let mut locus = Locus::reference(len);
                    b.iter(|| black_box(model.mutate_locus(&mut locus, &mut rng)))
                },
            );
        }
    }

    let layout = GenomeLayout::default();
    let model = MutationModel::new(5e-9).unwrap();
    group.bench_function("mutate_genome", |b| {
        let mut genome = Genome::uniform(&layout).unwrap();
        b.iter(|| black_box(model.mutate_genome(&mut genome, &mut rng)))
    });

    group.finish();
}

fn bench_gene_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("gene_conversion");
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
    let layout = GenomeLayout::default();

    // 42 ordered pairs per generation
    group.throughput(Throughput::Elements(42));

    for rate in [8.6e-6, 1e-2, 1.0] {
        let model = GeneConversionModel::new(rate).unwrap();
        group.bench_with_input(
            BenchmarkId::new("convert_genome", rate),
            &model,
            |b, model| {
                let mut genome = Genome::initialize(&layout, 0.01, &mut rng).unwrap();
                b.iter(|| black_box(model.convert_genome(&mut genome, &mut rng)))
            },
        );
    }

    group.finish();
}

fn bench_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampling");
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
    let genome = Genome::initialize(&GenomeLayout::default(), 0.01, &mut rng).unwrap();
    let sampler = TrajectorySampler::new(2_500);

    group.bench_function("sample", |b| b.iter(|| black_box(sampler.sample(0, &genome))));
    group.bench_function("mean_pairwise_divergence", |b| {
        b.iter(|| black_box(genome.mean_pairwise_divergence()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_mutation,
    bench_gene_conversion,
    bench_sampling
);
criterion_main!(benches);
