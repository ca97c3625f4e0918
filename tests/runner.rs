use std::{env, fs, path::PathBuf, process};

use cipher_bencher::cipherbench::{run_benches_console, BenchMetadata, BenchName, BenchOpts};
use cipher_bencher::{BenchRng, RawBencher};

fn quick_encrypt(b: &mut RawBencher, _rng: &mut BenchRng) {
    b.time_encrypt(4, 1 << 12, 16, |message, key| {
        for (m, k) in message.iter_mut().zip(key.iter()) {
            *m ^= *k;
        }
    });
}

fn quick_permutation(b: &mut RawBencher, _rng: &mut BenchRng) {
    b.time_permutation(4, 1 << 12, 32, |state| state.reverse());
}

fn scratch_csv(tag: &str) -> PathBuf {
    let path = env::temp_dir().join(format!("cipherbench-{}-{}.csv", tag, process::id()));
    let _ = fs::remove_file(&path);
    path
}

fn quick_benches() -> Vec<BenchMetadata> {
    vec![
        BenchMetadata {
            name: BenchName("quick_encrypt"),
            seed: Some(0x6b6c816d),
            benchfn: quick_encrypt,
        },
        BenchMetadata {
            name: BenchName("quick_permutation"),
            seed: None,
            benchfn: quick_permutation,
        },
    ]
}

#[test]
fn full_run_appends_csv_rows() {
    let csv_path = scratch_csv("full");

    let opts = BenchOpts {
        continuous: false,
        filter: None,
        file_out: Some(csv_path.clone()),
    };
    run_benches_console(opts, quick_benches()).unwrap();

    let csv = fs::read_to_string(&csv_path).unwrap();
    let rows: Vec<&str> = csv.lines().collect();
    assert_eq!(rows.len(), 2);
    // Benches run in alphabetical order; 4096-byte budget over 16- and 32-byte blocks
    assert!(rows[0].starts_with("quick_encrypt,4,256,"));
    assert!(rows[1].starts_with("quick_permutation,4,128,"));

    let _ = fs::remove_file(&csv_path);
}

#[test]
fn filter_limits_the_run() {
    let csv_path = scratch_csv("filtered");

    let opts = BenchOpts {
        continuous: false,
        filter: Some("permutation".to_string()),
        file_out: Some(csv_path.clone()),
    };
    run_benches_console(opts, quick_benches()).unwrap();

    let csv = fs::read_to_string(&csv_path).unwrap();
    let rows: Vec<&str> = csv.lines().collect();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].starts_with("quick_permutation,4,128,"));

    let _ = fs::remove_file(&csv_path);
}

#[test]
fn unmatched_filter_runs_nothing() {
    let csv_path = scratch_csv("unmatched");

    let opts = BenchOpts {
        continuous: false,
        filter: Some("no_such_bench".to_string()),
        file_out: Some(csv_path.clone()),
    };
    run_benches_console(opts, quick_benches()).unwrap();

    // The CSV file is created but no rows are appended
    let csv = fs::read_to_string(&csv_path).unwrap();
    assert!(csv.is_empty());

    let _ = fs::remove_file(&csv_path);
}

#[test]
#[should_panic(expected = "No benchmark matching")]
fn continuous_run_with_unmatched_filter_panics() {
    let opts = BenchOpts {
        continuous: true,
        filter: Some("no_such_bench".to_string()),
        file_out: None,
    };
    let _ = run_benches_console(opts, quick_benches());
}
