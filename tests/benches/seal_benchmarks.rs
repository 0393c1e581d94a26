//! # Seal Codec Benchmarks
//!
//! | Group | Operation |
//! |-------|-----------|
//! | vds-build | header + messages + P-256 signature |
//! | vds-parse | Base-256 transport back to a resolved seal |
//! | vds-verify | single verify and parallel batch verify |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use shared_crypto::EcPublicKey;
use std::time::Duration;
use vds_seal::{Seal, SealCodecApi};
use vds_tests::integration::fixtures::{p256_signer, service, visa_header, visa_messages};

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("vds-build");
    group.measurement_time(Duration::from_secs(10));

    let service = service();
    let signer = p256_signer();
    let messages = visa_messages();

    group.bench_function("visa_p256", |b| {
        b.iter(|| {
            black_box(
                service
                    .build_vds(visa_header(), &messages, &signer)
                    .map(|seal| seal.encoded().len()),
            )
        })
    });

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("vds-parse");

    let service = service();
    let Ok(seal) = service.build_vds(visa_header(), &visa_messages(), &p256_signer()) else {
        return;
    };
    let text = service.transport_string(&seal);

    group.throughput(Throughput::Bytes(seal.encoded().len() as u64));
    group.bench_function("visa_transport", |b| {
        b.iter(|| black_box(service.parse_transport(&text).is_ok()))
    });

    group.finish();
}

fn bench_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("vds-verify");
    group.measurement_time(Duration::from_secs(10));

    let service = service();
    let signer = p256_signer();
    let Ok(key) = signer.public_key() else {
        return;
    };
    let seals: Vec<Seal> = (0..500)
        .filter_map(|_| {
            service
                .build_vds(visa_header(), &visa_messages(), &signer)
                .ok()
        })
        .collect();

    group.bench_function("verify_single", |b| {
        b.iter(|| black_box(service.verify(&seals[0], &key).is_valid()))
    });

    for size in [10, 100, 500] {
        let batch: Vec<(&Seal, &EcPublicKey)> = seals.iter().take(size).map(|s| (s, &key)).collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("verify_batch", size), &batch, |b, batch| {
            b.iter(|| black_box(service.verify_batch(batch).valid_count))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build, bench_parse, bench_verify);
criterion_main!(benches);
