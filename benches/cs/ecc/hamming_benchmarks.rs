use bitvec::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hamcode::hamming::{
    decode_stream, encode_stream, par_decode_stream, par_encode_stream, total_bits_for,
    TrailingBlock,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn random_bits(len: usize) -> BitVec<u8, Msb0> {
    let mut rng = ChaCha20Rng::seed_from_u64(42);
    (0..len).map(|_| rng.gen::<bool>()).collect()
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("hamming_encode");
    for &d in &[4usize, 8, 26, 57] {
        let bits = random_bits(d * 4096);
        group.bench_with_input(BenchmarkId::new("sequential", d), &d, |b, &d| {
            b.iter(|| encode_stream(black_box(&bits), d).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("parallel", d), &d, |b, &d| {
            b.iter(|| par_encode_stream(black_box(&bits), d).unwrap())
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("hamming_decode");
    for &d in &[4usize, 8, 26, 57] {
        let bits = random_bits(d * 4096);
        let encoded = encode_stream(&bits, d).unwrap();
        let total = total_bits_for(d);
        group.bench_with_input(BenchmarkId::new("sequential", d), &total, |b, &total| {
            b.iter(|| decode_stream(black_box(&encoded), total, true).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("parallel", d), &total, |b, &total| {
            b.iter(|| {
                par_decode_stream(black_box(&encoded), total, true, TrailingBlock::Reject)
                    .unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
