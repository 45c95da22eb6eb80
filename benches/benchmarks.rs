//! Performance benchmarks for the core operations

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use num_bigint::ToBigUint;
use zpz::{classic_pow, dh, elgamal, is_probable_prime, pow, rsa::RsaKeyPair, GroupParams};

fn benchmark_exponentiation(c: &mut Criterion) {
    let mut group = c.benchmark_group("exponentiation");

    let base = 3u32.to_biguint().unwrap();

    for exp in [64u64, 256, 1024].iter() {
        group.bench_with_input(BenchmarkId::new("square_and_multiply", exp), exp, |b, &exp| {
            b.iter(|| pow(black_box(&base), black_box(exp)));
        });
        group.bench_with_input(BenchmarkId::new("classic", exp), exp, |b, &exp| {
            b.iter(|| classic_pow(black_box(&base), black_box(exp)));
        });
    }

    group.finish();
}

fn benchmark_mod_pow(c: &mut Criterion) {
    let params = GroupParams::default();
    let exp = dh::generate_secret(Some(&params));

    c.bench_function("mod_pow_1536", |b| {
        b.iter(|| {
            zpz::mod_pow(
                black_box(params.generator()),
                black_box(&exp),
                black_box(params.modulus()),
            )
        });
    });
}

fn benchmark_primality(c: &mut Criterion) {
    let mut group = c.benchmark_group("primality");

    // The Mersenne prime 2^521 - 1
    let prime = (num_bigint::BigUint::from(1u32) << 521) - 1u32;
    let composite = (num_bigint::BigUint::from(1u32) << 521) + 1u32;

    group.bench_function("known_prime_521_bits", |b| {
        b.iter(|| is_probable_prime(black_box(&prime), 20));
    });
    group.bench_function("known_composite_521_bits", |b| {
        b.iter(|| is_probable_prime(black_box(&composite), 20));
    });

    group.finish();
}

fn benchmark_dh(c: &mut Criterion) {
    let params = GroupParams::default();
    let a = dh::generate_secret(Some(&params));
    let b_public = dh::step1(&dh::generate_secret(Some(&params)), Some(&params));

    c.bench_function("dh_step2_default_group", |bench| {
        bench.iter(|| dh::step2(black_box(&a), black_box(&b_public), Some(&params)));
    });
}

fn benchmark_elgamal(c: &mut Criterion) {
    let mut group = c.benchmark_group("elgamal");

    let params = GroupParams::generate(256).expect("Failed to generate group");
    let a = dh::generate_secret(Some(&params));
    let public_key = elgamal::key_generator(&a, Some(&params));
    let m = 424242u32.to_biguint().unwrap();

    group.bench_function("encrypt_256", |b| {
        b.iter(|| elgamal::encrypt_random(black_box(&public_key), black_box(&m), Some(&params)));
    });

    let ct = elgamal::encrypt_random(&public_key, &m, Some(&params)).unwrap();
    group.bench_function("decrypt_256", |b| {
        b.iter(|| elgamal::decrypt(black_box(&ct), black_box(&a), Some(&params)));
    });

    group.finish();
}

fn benchmark_rsa(c: &mut Criterion) {
    let mut group = c.benchmark_group("rsa");
    group.sample_size(10);

    for bits in [256u64, 512].iter() {
        group.bench_with_input(BenchmarkId::new("keygen", bits), bits, |b, &bits| {
            b.iter(|| RsaKeyPair::generate(bits).expect("Failed to generate keys"));
        });
    }

    let keypair = RsaKeyPair::generate(512).expect("Failed to generate keys");
    let m = 123456789u64.to_biguint().unwrap();

    group.bench_function("encrypt_512", |b| {
        b.iter(|| keypair.public_key.encrypt(black_box(&m)));
    });

    let ct = keypair.public_key.encrypt(&m).unwrap();
    group.bench_function("decrypt_512", |b| {
        b.iter(|| keypair.private_key.decrypt(black_box(&ct)));
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_exponentiation,
    benchmark_mod_pow,
    benchmark_primality,
    benchmark_dh,
    benchmark_elgamal,
    benchmark_rsa
);
criterion_main!(benches);
