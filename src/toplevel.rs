// Copyright 2012 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

/// Defines a `fn main()` that will run all benchmarks defined by listed functions `$function`
/// and their associated seeds (if present). Seeds are represented as `Option<u64>`. If `None` is
/// given, a seed is drawn from entropy. Either way, the seed is used to seed the
/// [`BenchRng`](crate::BenchRng) that's passed to each function, and is echoed next to the bench
/// name so the run can be reproduced.
///
/// ```ignore
/// use cipher_bencher::{cipherbench_main_with_seeds, BenchRng, RawBencher, Word};
/// use rand::Rng;
///
/// // Toy mixing permutation: rotate and xor every word of the state
/// fn rotate_xor(state: &mut [Word]) {
///     for w in state.iter_mut() {
///         *w = w.rotate_left(7) ^ 0x9e37_79b9_7f4a_7c15;
///     }
/// }
///
/// // Time the permutation on a 4-word state over a 16 MiB budget of 32-byte blocks
/// fn rotate_xor_16mib(b: &mut RawBencher, _rng: &mut BenchRng) {
///     b.time_permutation(4, 16 << 20, 32, rotate_xor);
/// }
///
/// // The rotation schedule is drawn from the given RNG before the timed loop starts, so this
/// // bench exercises a different (but reproducible) variant on every seed
/// fn random_rotation_16mib(b: &mut RawBencher, rng: &mut BenchRng) {
///     let r: u32 = rng.random_range(1..64);
///     b.time_permutation(4, 16 << 20, 32, move |state| {
///         for w in state.iter_mut() {
///             *w = w.rotate_left(r) ^ 0x9e37_79b9_7f4a_7c15;
///         }
///     });
/// }
///
/// cipherbench_main_with_seeds!(
///     (rotate_xor_16mib, None),
///     (random_rotation_16mib, Some(0x6b6c816d))
/// );
/// ```
#[macro_export]
macro_rules! cipherbench_main_with_seeds {
    ($(($function:path, $seed:expr)),+ $(,)?) => {
        fn main() {
            let mut benches = ::std::vec::Vec::new();
            $(
                benches.push($crate::cipherbench::BenchMetadata {
                    name: $crate::cipherbench::BenchName(stringify!($function)),
                    seed: $seed,
                    benchfn: $function,
                });
            )+

            let matches = ::clap::App::new("cipher-bencher")
                .arg_from_usage(
                    "--filter [BENCH] 'Only run the benchmarks whose name contains BENCH'",
                )
                .arg_from_usage(
                    "--continuous [BENCH] 'Runs a continuous benchmark on the first bench \
                     matching BENCH'",
                )
                .arg_from_usage("--out [FILE] 'Appends raw timing data in CSV format to FILE'")
                .get_matches();

            let mut bench_opts = $crate::cipherbench::BenchOpts::default();
            bench_opts.filter = matches
                .value_of("continuous")
                .or(matches.value_of("filter"))
                .map(|s| s.to_string());
            bench_opts.continuous = matches.is_present("continuous");
            bench_opts.file_out = matches.value_of("out").map(::std::path::PathBuf::from);

            $crate::cipherbench::run_benches_console(bench_opts, benches).unwrap();
        }
    }
}

/// Defines a `fn main()` that will run all benchmarks defined by listed functions `$function`.
/// The [`BenchRng`](crate::BenchRng)s given to each function are seeded from entropy. Example
/// usage:
///
/// ```ignore
/// use cipher_bencher::{cipherbench_main, BenchRng, RawBencher, Word, Word32};
///
/// // Toy encrypt-style operation: mix every message word with the matching key word. The
/// // harness hands it a zeroed message and a key whose first word is 1, and reuses the same
/// // buffers for every invocation.
/// fn mix_encrypt(message: &mut [Word], key: &mut [Word]) {
///     for (m, k) in message.iter_mut().zip(key.iter()) {
///         *m = m.wrapping_add(*k).rotate_left(13) ^ *k;
///     }
/// }
///
/// // Time it on 2-word buffers over a 64 MiB budget of 16-byte blocks
/// fn mix_encrypt_64mib(b: &mut RawBencher, _rng: &mut BenchRng) {
///     b.time_encrypt(2, 64 << 20, 16, mix_encrypt);
/// }
///
/// // Fixed-width flavor: 4x32 buffers, measurement count given directly
/// fn mix_encrypt_fixed(b: &mut RawBencher, _rng: &mut BenchRng) {
///     b.time_encrypt_fixed::<4, _>(1 << 22, |message: &mut [Word32; 4], key: &mut [Word32; 4]| {
///         message[0] = message[0].wrapping_add(key[0]).rotate_left(5);
///         message[1] ^= message[0];
///     });
/// }
///
/// cipherbench_main!(mix_encrypt_64mib, mix_encrypt_fixed);
/// ```
#[macro_export]
macro_rules! cipherbench_main {
    ($($function:path),+ $(,)?) => {
        $crate::cipherbench_main_with_seeds!($(($function, None)),+);
    }
}
