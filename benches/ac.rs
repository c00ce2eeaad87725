use criterion::{criterion_group, criterion_main, Criterion};
use entropy_codec::ac::{decode, encode};

fn criterion_benchmark(c: &mut Criterion) {
    let src: Vec<u8> = (0..8000).map(|_| rand::random::<u8>()).collect();

    c.bench_function("ac encode 8k random bytes", |b| {
        b.iter(|| encode(&src).unwrap())
    });

    let (bits, model) = encode(&src).unwrap();
    c.bench_function("ac decode 8k random bytes", |b| {
        b.iter(|| decode(src.len(), &bits, &model).unwrap())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
