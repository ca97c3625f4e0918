// Copyright 2012 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::time::Duration;

/// The result of one timed run: how many times the operation was invoked and how long the loop
/// took in total.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TimedRun {
    /// Length in words of each buffer handed to the operation
    pub words: usize,
    /// Number of times the operation was invoked
    pub measurements: u64,
    /// Wall-clock time spent in the timed loop
    pub elapsed: Duration,
}

impl TimedRun {
    /// Elapsed wall-clock time in seconds
    pub fn seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// The console report line for this run
    pub fn fmt(&self) -> String {
        format!("Time required: {:.2}s", self.seconds())
    }

    /// One CSV row of raw run data, in the form `name,words,measurements,elapsed_ns`
    pub fn csv_row(&self, name: &str) -> String {
        format!(
            "{},{},{},{}",
            name,
            self.words,
            self.measurements,
            self.elapsed.as_nanos()
        )
    }
}
