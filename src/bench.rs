//! Benchmark Harness
//!
//! Compares the runtime of several trials that all satisfy one
//! specification. Each trial is calibrated on its own: the repetition count
//! doubles until a batch takes at least the target duration, then the best
//! of a fixed number of batches is kept.

use std::time::{Duration, Instant};

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::catalog::Specification;
use crate::engine::{guarded, Permutation, Trial};

/// Measurement knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchConfig {
    /// Minimum wall time of one calibrated batch
    pub target: Duration,
    /// Batches measured after calibration
    pub batches: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            target: Duration::from_secs(1),
            batches: 5,
        }
    }
}

/// Best batch time of one trial
#[derive(Debug, Clone, Serialize)]
pub struct Timing {
    pub candidate: &'static str,
    pub permutation: Permutation,
    #[serde(rename = "seconds", serialize_with = "as_seconds")]
    pub elapsed: Duration,
    pub repetitions: u64,
}

fn as_seconds<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64())
}

/// Time `repetitions` back-to-back runs of `spec` against `trial`
fn batch(spec: &Specification, trial: &Trial, repetitions: u64) -> Duration {
    let start = Instant::now();
    for _ in 0..repetitions {
        // the trial already passed; only its cost matters here
        let _ = guarded(|| spec.check(trial));
    }
    start.elapsed()
}

/// Smallest repetition count, a power of two, whose batch reaches `target`
pub fn calibrate(spec: &Specification, trial: &Trial, target: Duration) -> u64 {
    let repetitions = calibrate_with(target, |n| batch(spec, trial, n));
    debug!("{} calibrated to {} repetitions", trial, repetitions);
    repetitions
}

/// Doubling search over `measure`, which times a batch of the given size
pub fn calibrate_with(target: Duration, mut measure: impl FnMut(u64) -> Duration) -> u64 {
    let mut repetitions = 1u64;
    while measure(repetitions) < target && repetitions < u64::MAX / 2 {
        repetitions *= 2;
    }
    repetitions
}

/// Minimum of `batches` measurements; at least one is always taken
pub fn best_of(batches: usize, mut measure: impl FnMut() -> Duration) -> Duration {
    (0..batches.max(1)).map(|_| measure()).min().unwrap_or_default()
}

/// Time every trial under `spec`, keeping the order they were given in
pub fn rank(spec: &Specification, trials: &[Trial], config: &BenchConfig) -> Vec<Timing> {
    rank_with(trials, config, |trial, n| batch(spec, trial, n))
}

/// [`rank`] over an arbitrary batch measurement
pub fn rank_with(
    trials: &[Trial],
    config: &BenchConfig,
    mut measure: impl FnMut(&Trial, u64) -> Duration,
) -> Vec<Timing> {
    trials
        .iter()
        .map(|trial| {
            let repetitions = calibrate_with(config.target, |n| measure(trial, n));
            let elapsed = best_of(config.batches, || measure(trial, repetitions));
            debug!("{}: best batch {:?} at {} repetitions", trial, elapsed, repetitions);
            Timing {
                candidate: trial.candidate().name(),
                permutation: trial.permutation().clone(),
                elapsed,
                repetitions,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use crate::assertions::assert_equal;
    use crate::fault::{Fallible, Outcome};
    use crate::subject::Subject;
    use crate::unit::{Origin, SourceFile};
    use serde_json::{json, Value};
    use std::thread;

    static SOURCE: SourceFile = SourceFile::new(file!(), include_str!("bench.rs"));

    const PER_CALL: Duration = Duration::from_millis(3);

    fn slow_identity(x: &Value) -> Fallible {
        thread::sleep(PER_CALL);
        Ok(x.clone())
    }

    fn fast_identity(x: &Value) -> Fallible {
        Ok(x.clone())
    }

    fn returns_its_argument(subject: &dyn Subject) -> Outcome {
        assert_equal(&subject.call(args![7])?, &json!(7))
    }

    crate::answer! { static SLOW = slow_identity(x) in SOURCE as Origin::Other; }
    crate::answer! { static FAST = fast_identity(x) in SOURCE as Origin::Other; }
    crate::question! { static RETURNS_ITS_ARGUMENT = returns_its_argument in SOURCE; }

    #[test]
    fn test_calibration_reaches_target() {
        let target = Duration::from_millis(10);
        let repetitions = calibrate(&RETURNS_ITS_ARGUMENT, &Trial::identity(&SLOW), target);
        assert!(repetitions.is_power_of_two());
        // sleeping never undershoots, so half as many calls fell short
        if repetitions > 1 {
            assert!(PER_CALL * (repetitions / 2) as u32 <= target);
        }
        let batch_time = batch(&RETURNS_ITS_ARGUMENT, &Trial::identity(&SLOW), repetitions);
        assert!(batch_time >= PER_CALL * repetitions as u32);
    }

    #[test]
    fn test_repetitions_times_per_call_reach_target() {
        let target = Duration::from_millis(10);
        let repetitions = calibrate_with(target, |n| PER_CALL * n as u32);
        assert_eq!(repetitions, 4);
        assert!(PER_CALL * repetitions as u32 >= target);
        assert!(PER_CALL * ((repetitions / 2) as u32) < target);
    }

    #[test]
    fn test_rank_reports_minimum_of_default_batches() {
        let config = BenchConfig::default();
        let jitter = [0, 0, 0, 40, 15, 30, 5, 20];
        let mut sizes = Vec::new();
        let trials = [Trial::identity(&SLOW)];
        let timings = rank_with(&trials, &config, |_, n| {
            let extra = jitter[sizes.len() % jitter.len()];
            sizes.push(n);
            Duration::from_millis(300) * n as u32 + Duration::from_millis(extra)
        });

        // three calibration batches (1, 2, 4) then five timed ones
        assert_eq!(sizes, vec![1, 2, 4, 4, 4, 4, 4, 4]);
        assert_eq!(timings[0].repetitions, 4);
        assert_eq!(timings[0].elapsed, Duration::from_millis(1205));
    }

    #[test]
    fn test_best_of_takes_minimum() {
        let mut scripted = [40, 12, 30, 25, 18].into_iter().map(Duration::from_millis);
        let best = best_of(5, || scripted.next().unwrap_or_default());
        assert_eq!(best, Duration::from_millis(12));
    }

    #[test]
    fn test_best_of_measures_at_least_once() {
        let mut calls = 0;
        best_of(0, || {
            calls += 1;
            Duration::ZERO
        });
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_rank_keeps_order_and_reports_repetitions() {
        let config = BenchConfig {
            target: Duration::from_millis(10),
            batches: 3,
        };
        let trials = [Trial::identity(&SLOW), Trial::identity(&FAST)];
        let timings = rank(&RETURNS_ITS_ARGUMENT, &trials, &config);

        assert_eq!(timings.len(), 2);
        assert_eq!(timings[0].candidate, "slow_identity");
        assert_eq!(timings[1].candidate, "fast_identity");
        assert!(timings[0].elapsed >= PER_CALL * timings[0].repetitions as u32);
        assert!(timings[1].repetitions > timings[0].repetitions);
    }

    #[test]
    fn test_timing_serializes_seconds() {
        let timing = Timing {
            candidate: "slow_identity",
            permutation: Permutation::identity(1),
            elapsed: Duration::from_millis(1500),
            repetitions: 4,
        };
        let json = serde_json::to_value(&timing).unwrap();
        assert_eq!(json["seconds"], json!(1.5));
        assert_eq!(json["permutation"], json!([0]));
    }
}
