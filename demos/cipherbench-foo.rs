use cipher_bencher::{cipherbench_main_with_seeds, BenchRng, RawBencher, Word, Word32};
use rand::Rng;

// Toy ARX round standing in for a real cipher: mix every message word with the matching key
// word. Enough work to time, no cryptographic value.
fn toy_encrypt(message: &mut [Word], key: &mut [Word]) {
    for (m, k) in message.iter_mut().zip(key.iter()) {
        *m = m.wrapping_add(*k).rotate_left(13) ^ *k;
    }
}

// Time the toy cipher on 2-word buffers over a 64 MiB budget of 16-byte blocks. The harness
// seeds the buffers itself (zeroed message, key[0] == 1) and reuses them for every invocation,
// so the cipher runs on its own output from the second call on.
fn toy_encrypt_64mib(b: &mut RawBencher, _rng: &mut BenchRng) {
    b.time_encrypt(2, 64 << 20, 16, toy_encrypt);
}

// Time a mixing permutation on a 4-word state over a 64 MiB budget of 32-byte blocks. The
// rotation amount is drawn from the bench RNG before the timed loop starts, so different seeds
// exercise different (but reproducible) variants.
fn toy_permutation_64mib(b: &mut RawBencher, rng: &mut BenchRng) {
    let r: u32 = rng.random_range(1..64);
    b.time_permutation(4, 64 << 20, 32, move |state| {
        let mut carry = state[state.len() - 1];
        for w in state.iter_mut() {
            let next = *w;
            *w = w.rotate_left(r) ^ carry;
            carry = next;
        }
    });
}

// Fixed-width flavor of the toy cipher: 4x32 buffers with the measurement count given directly
// instead of derived from a byte budget
fn toy_encrypt_fixed_4x32(b: &mut RawBencher, _rng: &mut BenchRng) {
    b.time_encrypt_fixed::<4, _>(1 << 22, |message: &mut [Word32; 4], key: &mut [Word32; 4]| {
        message[0] = message[0].wrapping_add(key[0]).rotate_left(5);
        message[1] ^= message[0];
        message[2] = message[2].wrapping_add(key[2]).rotate_left(11);
        message[3] ^= message[2];
    });
}

// Expand the main function to include all three benches
cipherbench_main_with_seeds!(
    (toy_encrypt_64mib, Some(0x6b6c816d)),
    (toy_permutation_64mib, None),
    (toy_encrypt_fixed_4x32, None)
);
// Alternatively, for no explicit seeds, you can use
// cipherbench_main!(toy_encrypt_64mib, toy_permutation_64mib, toy_encrypt_fixed_4x32);
