//! Fan-out/fan-in over the worker pool.
//!
//! Every branch runs to completion even when another one has already
//! failed, so no task is abandoned mid-read. Failures are stamped in the
//! order they are observed and the earliest one is returned, wrapped with
//! the name of the stage that produced it. Successful results of a failed
//! join are dropped.

use crate::error::{MappingError, Result};
use std::sync::atomic::{AtomicUsize, Ordering};

struct Observed {
    order: usize,
    error: MappingError,
}

fn run_stage<T, F>(stage: &'static str, task: F, clock: &AtomicUsize) -> std::result::Result<T, Observed>
where
    F: FnOnce() -> Result<T>,
{
    task().map_err(|error| {
        tracing::debug!("Stage {} failed: {}", stage, error);
        Observed {
            order: clock.fetch_add(1, Ordering::SeqCst),
            error: error.in_stage(stage),
        }
    })
}

fn earliest(failures: impl IntoIterator<Item = Option<Observed>>) -> Option<MappingError> {
    failures
        .into_iter()
        .flatten()
        .min_by_key(|observed| observed.order)
        .map(|observed| observed.error)
}

pub fn try_join<A, B, RA, RB>(a: (&'static str, A), b: (&'static str, B)) -> Result<(RA, RB)>
where
    A: FnOnce() -> Result<RA> + Send,
    B: FnOnce() -> Result<RB> + Send,
    RA: Send,
    RB: Send,
{
    let clock = AtomicUsize::new(0);
    let (ra, rb) = rayon::join(
        || run_stage(a.0, a.1, &clock),
        || run_stage(b.0, b.1, &clock),
    );

    match (ra, rb) {
        (Ok(ra), Ok(rb)) => Ok((ra, rb)),
        (ra, rb) => Err(earliest([ra.err(), rb.err()]).unwrap_or_else(unreachable_failure)),
    }
}

pub fn try_join3<A, B, C, RA, RB, RC>(
    a: (&'static str, A),
    b: (&'static str, B),
    c: (&'static str, C),
) -> Result<(RA, RB, RC)>
where
    A: FnOnce() -> Result<RA> + Send,
    B: FnOnce() -> Result<RB> + Send,
    C: FnOnce() -> Result<RC> + Send,
    RA: Send,
    RB: Send,
    RC: Send,
{
    let clock = AtomicUsize::new(0);
    let (ra, (rb, rc)) = rayon::join(
        || run_stage(a.0, a.1, &clock),
        || {
            rayon::join(
                || run_stage(b.0, b.1, &clock),
                || run_stage(c.0, c.1, &clock),
            )
        },
    );

    match (ra, rb, rc) {
        (Ok(ra), Ok(rb), Ok(rc)) => Ok((ra, rb, rc)),
        (ra, rb, rc) => {
            Err(earliest([ra.err(), rb.err(), rc.err()]).unwrap_or_else(unreachable_failure))
        }
    }
}

fn unreachable_failure() -> MappingError {
    MappingError::Metadata("join reported failure without an error".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn test_all_results_returned_in_order() {
        let (a, b, c) = try_join3(
            ("a", || Ok(1)),
            ("b", || Ok("two")),
            ("c", || Ok(vec![3])),
        )
        .unwrap();
        assert_eq!((a, b, c), (1, "two", vec![3]));
    }

    #[test]
    fn test_failure_is_wrapped_with_stage() {
        let err = try_join(
            ("parse", || Err::<(), _>(MappingError::malformed("x", 3, "bad"))),
            ("other", || Ok(())),
        )
        .unwrap_err();

        match &err {
            MappingError::Stage { stage, .. } => assert_eq!(*stage, "parse"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(err.root_cause(), MappingError::MalformedInput { line: 3, .. }));
    }

    #[test]
    fn test_stragglers_finish_before_returning() {
        let finished = AtomicBool::new(false);
        let err = try_join(
            ("fails", || Err::<(), _>(MappingError::Metadata("boom".into()))),
            ("slow", || {
                std::thread::sleep(Duration::from_millis(50));
                finished.store(true, Ordering::SeqCst);
                Ok(())
            }),
        )
        .unwrap_err();

        assert!(finished.load(Ordering::SeqCst));
        assert!(matches!(err, MappingError::Stage { stage: "fails", .. }));
    }

    #[test]
    fn test_first_observed_failure_wins() {
        let (tx, rx) = mpsc::channel::<()>();
        let pool = rayon::ThreadPoolBuilder::new().num_threads(3).build().unwrap();

        let err = pool
            .install(|| {
                try_join3(
                    ("late", move || {
                        // Wait until "early" has failed before failing ourselves
                        rx.recv_timeout(Duration::from_secs(5)).ok();
                        Err::<(), _>(MappingError::Metadata("late".into()))
                    }),
                    ("early", move || {
                        let result = Err::<(), _>(MappingError::Metadata("early".into()));
                        // The stamp is taken after we return, give it a moment before releasing "late"
                        std::thread::spawn(move || {
                            std::thread::sleep(Duration::from_millis(100));
                            tx.send(()).ok();
                        });
                        result
                    }),
                    ("fine", || Ok(())),
                )
            })
            .unwrap_err();

        assert!(matches!(err, MappingError::Stage { stage: "early", .. }));
    }
}
