use crate::report::TimedRun;

use std::{
    fs::{File, OpenOptions},
    io::{self, Write},
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Instant,
};

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// The RNG handed to every bench function for setup work outside the timed loop. It is seeded
/// from [`BenchMetadata::seed`] or from entropy, and the seed in use is echoed on the console so
/// any run can be reproduced.
pub type BenchRng = ChaCha20Rng;

/// Machine word processed by the runtime-sized entry points
pub type Word = u64;

/// Narrower machine word processed by the fixed-width entry points
pub type Word32 = u32;

/// Just a static str representing the name of a bench function
#[derive(Clone)]
pub struct BenchName(pub &'static str);

impl BenchName {
    fn padded(&self, column_count: usize) -> String {
        let mut name = self.0.to_string();
        let fill = column_count.saturating_sub(name.len());
        name.push_str(&" ".repeat(fill));

        name
    }
}

/// A function that is to be benchmarked. This crate only supports statically-defined functions.
pub type BenchFn = fn(&mut RawBencher, &mut BenchRng);

#[derive(Clone)]
enum BenchEvent {
    BContStart,
    BBegin(Vec<BenchName>),
    BWait(BenchName, u64),
    BResult(MonitorMsg),
}

type MonitorMsg = (BenchName, Vec<TimedRun>);

#[cfg(feature = "core-hint-black-box")]
fn black_box<T>(x: T) -> T {
    core::hint::black_box(x)
}

// NOTE: Without `core::hint::black_box` this is a workaround implementation that may have a too
// big performance overhead, depending on operation, or may fail to properly avoid having code
// optimized out.
//
// A function that is opaque to the optimizer, so that the timed loop cannot have its buffer
// traffic eliminated as dead code.
#[cfg(not(feature = "core-hint-black-box"))]
fn black_box<T>(dummy: T) -> T {
    unsafe {
        let ret = std::ptr::read_volatile(&dummy);
        std::mem::forget(dummy);
        ret
    }
}

/// RawBencher is the primary interface for timing. Each `time_*` call seeds fresh buffers,
/// invokes the supplied operation in a timed loop, and records one [`TimedRun`]; the console
/// runner reports every recorded run after the bench function returns.
#[derive(Default)]
pub struct RawBencher {
    runs: Vec<TimedRun>,
}

impl RawBencher {
    /// Times an encrypt-style operation over a message and a key buffer of `input_size` words
    /// each. Both buffers start zero-filled with element 0 of the key set to 1, and the
    /// operation runs `byte_count / block_size` times (truncating division) against the same two
    /// buffers. Contents are never reset between invocations: an operation that mutates in
    /// place runs on its own previous output, which keeps setup cost out of the steady-state
    /// measurement.
    ///
    /// # Panics
    ///
    /// Panics if `block_size` is zero or `input_size` is zero.
    pub fn time_encrypt<F>(
        &mut self,
        input_size: usize,
        byte_count: u64,
        block_size: u64,
        mut cipher_encrypt: F,
    ) -> TimedRun
    where
        F: FnMut(&mut [Word], &mut [Word]),
    {
        let mut message: Vec<Word> = vec![0; input_size];
        let mut key: Vec<Word> = vec![0; input_size];
        key[0] = 1;

        let measurements = byte_count / block_size;
        let begin = Instant::now();
        for _ in 0..measurements {
            cipher_encrypt(
                black_box(message.as_mut_slice()),
                black_box(key.as_mut_slice()),
            );
        }
        let elapsed = begin.elapsed();

        self.record(TimedRun {
            words: input_size,
            measurements,
            elapsed,
        })
    }

    /// Times a permutation-style operation over a single buffer of `input_size` words,
    /// zero-filled with element 0 set to 1. The loop behaves exactly like
    /// [`time_encrypt`](Self::time_encrypt).
    ///
    /// # Panics
    ///
    /// Panics if `block_size` is zero or `input_size` is zero.
    pub fn time_permutation<F>(
        &mut self,
        input_size: usize,
        byte_count: u64,
        block_size: u64,
        mut permutation: F,
    ) -> TimedRun
    where
        F: FnMut(&mut [Word]),
    {
        let mut message: Vec<Word> = vec![0; input_size];
        message[0] = 1;

        let measurements = byte_count / block_size;
        let begin = Instant::now();
        for _ in 0..measurements {
            permutation(black_box(message.as_mut_slice()));
        }
        let elapsed = begin.elapsed();

        self.record(TimedRun {
            words: input_size,
            measurements,
            elapsed,
        })
    }

    /// Fixed-width variant of [`time_encrypt`](Self::time_encrypt): the buffer length is a
    /// compile-time word count over 32-bit words, and the measurement count is supplied directly
    /// instead of being derived from a byte budget. Buffer seeding and the timed loop are
    /// otherwise identical.
    ///
    /// # Panics
    ///
    /// Panics if `WORDS` is zero.
    pub fn time_encrypt_fixed<const WORDS: usize, F>(
        &mut self,
        measurements: u64,
        mut cipher_encrypt: F,
    ) -> TimedRun
    where
        F: FnMut(&mut [Word32; WORDS], &mut [Word32; WORDS]),
    {
        let mut message: [Word32; WORDS] = [0; WORDS];
        let mut key: [Word32; WORDS] = [0; WORDS];
        key[0] = 1;

        let begin = Instant::now();
        for _ in 0..measurements {
            cipher_encrypt(black_box(&mut message), black_box(&mut key));
        }
        let elapsed = begin.elapsed();

        self.record(TimedRun {
            words: WORDS,
            measurements,
            elapsed,
        })
    }

    fn record(&mut self, run: TimedRun) -> TimedRun {
        self.runs.push(run);
        run
    }

    // Runs the bench function and drains everything it recorded
    pub(crate) fn go(&mut self, benchfn: BenchFn, rng: &mut BenchRng) -> Vec<TimedRun> {
        benchfn(self, rng);
        std::mem::take(&mut self.runs)
    }
}

/// Represents a single benchmark to conduct
pub struct BenchMetadata {
    pub name: BenchName,
    pub seed: Option<u64>,
    pub benchfn: BenchFn,
}

/// Benchmarking options.
///
/// When `continuous` is set, the runner continuously re-runs the first (alphabetically) of the
/// benchmarks after they have been optionally filtered.
///
/// When `filter` is set and `continuous` is not set, only benchmarks whose names contain the
/// filter string as a substring will be executed.
///
/// When `file_out` is set, one CSV row per timed run is appended to the file, in the form
/// `name,words,measurements,elapsed_ns`.
#[derive(Default)]
pub struct BenchOpts {
    pub continuous: bool,
    pub filter: Option<String>,
    pub file_out: Option<PathBuf>,
}

#[derive(Default)]
struct ConsoleBenchState {
    max_name_len: usize, // Number of columns to fill when aligning names
    file_out: Option<File>,
}

impl ConsoleBenchState {
    fn write_plain(&mut self, s: &str) -> io::Result<()> {
        let mut stdout = io::stdout();
        stdout.write_all(s.as_bytes())?;
        stdout.flush()
    }

    fn write_run_start(&mut self, len: usize) -> io::Result<()> {
        let noun = if len != 1 { "benches" } else { "bench" };
        self.write_plain(&format!("\nrunning {} {}\n", len, noun))
    }

    fn write_continuous_start(&mut self) -> io::Result<()> {
        self.write_plain("running 1 benchmark continuously\n")
    }

    fn write_bench_start(&mut self, name: &BenchName, seed: u64) -> io::Result<()> {
        let name = name.padded(self.max_name_len);
        // Results go on the following line so that every timed run reports as exactly
        // `Time required: <seconds>s`
        self.write_plain(&format!("bench {} [seed {:#018x}] ...\n", name, seed))
    }

    fn write_result(&mut self, name: &BenchName, runs: &[TimedRun]) -> io::Result<()> {
        if let Some(file) = self.file_out.as_mut() {
            for run in runs {
                writeln!(file, "{}", run.csv_row(name.0))?;
            }
        }
        for run in runs {
            self.write_plain(&format!("{}\n", run.fmt()))?;
        }

        Ok(())
    }

    fn write_run_finish(&mut self) -> io::Result<()> {
        self.write_plain("\ncipher benches complete\n\n")
    }
}

/// Runs the given benches under the given options and prints the output to the console
pub fn run_benches_console(opts: BenchOpts, benches: Vec<BenchMetadata>) -> io::Result<()> {
    // TODO: Consider overwriting the previous result lines in continuous mode instead of
    // appending
    fn callback(event: &BenchEvent, st: &mut ConsoleBenchState) -> io::Result<()> {
        match (*event).clone() {
            BenchEvent::BContStart => st.write_continuous_start(),
            BenchEvent::BBegin(ref filtered_benches) => st.write_run_start(filtered_benches.len()),
            BenchEvent::BWait(ref b, seed) => st.write_bench_start(b, seed),
            BenchEvent::BResult(msg) => {
                let (name, runs) = msg;
                st.write_result(&name, &runs)
            }
        }
    }

    let mut st = ConsoleBenchState::default();
    st.max_name_len = benches.iter().map(|t| t.name.0.len()).max().unwrap_or(0);
    st.file_out = match opts.file_out {
        Some(ref path) => Some(OpenOptions::new().append(true).create(true).open(path)?),
        None => None,
    };

    run_benches(&opts, benches, |x| callback(&x, &mut st))?;
    st.write_run_finish()
}

fn run_benches<F>(opts: &BenchOpts, benches: Vec<BenchMetadata>, mut callback: F) -> io::Result<()>
where
    F: FnMut(BenchEvent) -> io::Result<()>,
{
    use self::BenchEvent::*;

    let filtered_benches = filter_benches(&opts.filter, benches);
    let filtered_names = filtered_benches.iter().map(|t| t.name.clone()).collect();

    if opts.continuous {
        callback(BContStart)?;

        if filtered_benches.is_empty() {
            match &opts.filter {
                Some(f) => panic!("No benchmark matching '{}' was found", f),
                None => return Ok(()),
            }
        }

        // Stop at the next run boundary on Ctrl-C, so the CSV file still gets flushed and the
        // closing banner still prints
        let stop = Arc::new(AtomicBool::new(false));
        {
            let stop = stop.clone();
            ctrlc::set_handler(move || stop.store(true, Ordering::Relaxed))
                .map_err(io::Error::other)?;
        }

        let mut filtered_benches = filtered_benches;
        let t = filtered_benches.remove(0);
        let mut b = RawBencher::default();
        let seed = t.seed.unwrap_or_else(rand::random);
        let mut rng = BenchRng::seed_from_u64(seed);
        let name = t.name.clone();

        while !stop.load(Ordering::Relaxed) {
            callback(BWait(name.clone(), seed))?;
            let msg = run_bench_with_bencher(&t, &mut b, &mut rng);
            callback(BResult(msg))?;
        }
        Ok(())
    } else {
        callback(BBegin(filtered_names))?;

        for t in filtered_benches {
            let mut b = RawBencher::default();
            let seed = t.seed.unwrap_or_else(rand::random);
            let mut rng = BenchRng::seed_from_u64(seed);
            callback(BWait(t.name.clone(), seed))?;
            let msg = run_bench_with_bencher(&t, &mut b, &mut rng);
            callback(BResult(msg))?;
        }
        Ok(())
    }
}

fn filter_benches(filter: &Option<String>, bs: Vec<BenchMetadata>) -> Vec<BenchMetadata> {
    let mut filtered = bs;

    // Remove benches that don't match the filter
    if let Some(filter) = filter {
        filtered.retain(|b| b.name.0.contains(filter.as_str()));
    }

    // Sort them alphabetically
    filtered.sort_by(|b1, b2| b1.name.0.cmp(b2.name.0));

    filtered
}

fn run_bench_with_bencher(
    bench: &BenchMetadata,
    b: &mut RawBencher,
    rng: &mut BenchRng,
) -> MonitorMsg {
    let runs = b.go(bench.benchfn, rng);

    (bench.name.clone(), runs)
}
