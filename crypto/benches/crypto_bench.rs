use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn blake2b_256_bench(c: &mut Criterion) {
    let data = [0xABu8; 256];

    c.bench_function("blake2b_256_256B", |b| {
        b.iter(|| chainwallet_crypto::blake2b_256(black_box(&data)))
    });
}

fn state_cipher_bench(c: &mut Criterion) {
    let cipher = chainwallet_crypto::StateCipher::from_key([9u8; 32]);
    let snapshot = vec![0x5Au8; 4096];
    let sealed = cipher.encrypt(&snapshot).unwrap();

    c.bench_function("state_encrypt_4KB", |b| {
        b.iter(|| cipher.encrypt(black_box(&snapshot)).unwrap())
    });
    c.bench_function("state_decrypt_4KB", |b| {
        b.iter(|| cipher.decrypt(black_box(&sealed)).unwrap())
    });
}

criterion_group!(benches, blake2b_256_bench, state_cipher_bench);
criterion_main!(benches);
