// Copyright 2012-2016 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! This crate implements a raw-speed microbenchmark harness for cipher and permutation
//! primitives. It is based loosely off of the [`bencher`](https://github.com/bluss/bencher)
//! crate.
//!
//! The harness times an opaque operation over fixed-width-word buffers. The caller supplies a
//! buffer length in words, a total byte budget, and a block size in bytes; the harness derives
//! `measurements = byte_budget / block_size` (truncating division), seeds its buffers, and
//! invokes the operation exactly that many times back to back between a single pair of
//! monotonic-clock readings. Encrypt-style operations receive a `message` and a `key` buffer;
//! permutation-style operations receive a single state buffer. A fixed-width variant trades the
//! runtime buffer length for a const-generic word count over 32-bit words and takes the
//! measurement count directly.
//!
//! Buffers start zero-filled except for one seed element set to 1 (a nonzero input, so
//! primitives that would short-circuit on all-zero state still do real work): the key buffer's
//! element 0 for encrypt-style runs, the state buffer's element 0 for permutation-style runs.
//! Buffer contents are never reset between invocations, so an operation that mutates in place
//! runs on its own previous output. That is the intended steady-state measurement: setup stays
//! outside the timed loop and the input keeps changing without any per-iteration bookkeeping.
//!
//! The program output looks like
//!
//! ```text
//! running 2 benches
//! bench toy_encrypt_64mib     [seed 0x000000006b6c816d] ...
//! Time required: 0.43s
//! bench toy_permutation_64mib [seed 0x1f2e3d4c5b6a7988] ...
//! Time required: 0.39s
//!
//! cipher benches complete
//! ```
//!
//! Every timed run reports exactly one `Time required: <seconds>s` line, with two-decimal
//! precision, on standard output. The seed next to each bench name feeds the [`BenchRng`] that
//! bench functions may use for setup work outside the timed loop; passing the same seed
//! reproduces the run. Raw per-run data can additionally be appended to a CSV file with the
//! `--out` flag. See [`cipherbench_main!`] for the command-line options and
//! `demos/cipherbench-foo.rs` for example code.

pub mod cipherbench;
mod report;
mod toplevel;

pub use cipherbench::{BenchRng, RawBencher, Word, Word32};
pub use report::TimedRun;
