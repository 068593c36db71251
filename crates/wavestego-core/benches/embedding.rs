use criterion::{criterion_group, criterion_main, Criterion};
use wavestego_core::media::synthetic;
use wavestego_core::WaveletCodec;

pub fn image_hiding(c: &mut Criterion) {
    c.bench_function("Hide in 256x256", |b| {
        let carrier = synthetic::apple(256, 256, 1).expect("Cannot render carrier");
        let codec = WaveletCodec::default();

        b.iter(|| {
            codec
                .hide(&carrier, "Hello World!")
                .expect("Cannot hide secret message")
        })
    });
}

pub fn image_unveiling(c: &mut Criterion) {
    c.bench_function("Unveil from 256x256", |b| {
        let carrier = synthetic::apple(256, 256, 1).expect("Cannot render carrier");
        let codec = WaveletCodec::default();
        let embedded = codec
            .hide(&carrier, "Hello World!")
            .expect("Cannot hide secret message");

        b.iter(|| {
            codec
                .unveil(&embedded.grid)
                .expect("Cannot unveil secret message")
        })
    });
}

criterion_group!(benches, image_hiding, image_unveiling);
criterion_main!(benches);
