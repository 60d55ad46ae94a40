// src/submit/orchestrator.rs
use super::{batch_count, partition, submit_batch, FailedBatch, RunReport};
use crate::config::options::{ImportOptions, RetryPolicy};
use crate::core::net::Transport;
use crate::progress::Progress;
use crate::record::Record;

/// Push every record to `opts.endpoint` in batches and report the outcome.
///
/// Batches go out in order with a fixed pause between them, each with the full
/// `opts.retry` policy. Batches that fail get exactly one more attempt after the
/// first pass; whatever still fails lands in `RunReport::failed`. Nothing is
/// written to disk here.
pub fn submit_in_batches(
    transport: &dyn Transport,
    records: &[Record],
    opts: &ImportOptions,
    mut progress: Option<&mut dyn Progress>,
) -> RunReport {
    let total_items = records.len();
    let total_batches = batch_count(total_items, opts.batch_size);
    logf!(
        "Submitting {total_items} records in {total_batches} batches of {} to {}",
        opts.batch_size,
        opts.endpoint
    );

    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!(
            "Submitting {total_items} records, {} per batch…",
            opts.batch_size
        ));
        p.begin(total_batches);
    }

    let mut successful_items = 0;
    let mut failed: Vec<FailedBatch> = Vec::new();

    for batch in partition(records, opts.batch_size) {
        if batch.number > 1 {
            transport.pause(opts.throttle.batch_pause);
        }
        logd!("Batch {}/{total_batches} ({} records)", batch.number, batch.len());

        if submit_batch(transport, &opts.endpoint, batch, &opts.retry) {
            successful_items += batch.len();
            if let Some(p) = progress.as_deref_mut() {
                p.item_done(batch.number, batch.len());
            }
        } else {
            loge!("Batch {} failed", batch.number);
            if let Some(p) = progress.as_deref_mut() {
                p.item_failed(batch.number, batch.len());
            }
            failed.push(batch.into());
        }
    }

    if !failed.is_empty() {
        if let Some(p) = progress.as_deref_mut() {
            p.log(&format!("Retrying {} failed batches…", failed.len()));
        }

        let once = RetryPolicy { max_attempts: 1, ..opts.retry };
        let mut still_failing = Vec::with_capacity(failed.len());
        for (i, fb) in failed.into_iter().enumerate() {
            if i > 0 {
                transport.pause(opts.throttle.batch_pause);
            }
            logf!("Retrying batch {}", fb.number);

            if submit_batch(transport, &opts.endpoint, fb.as_batch(), &once) {
                successful_items += fb.records.len();
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(fb.number, fb.records.len());
                }
            } else {
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(fb.number, fb.records.len());
                }
                still_failing.push(fb);
            }
        }
        failed = still_failing;
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    let report = RunReport { total_items, successful_items, failed };
    logf!("{report}");
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NullProgress;
    use crate::submit::testing::{
        fast_options, records, reply, timed_out, Event, FakeTransport,
    };
    use std::num::NonZeroUsize;
    use std::time::Duration;

    fn post(date: &str) -> Event {
        Event::Post(s!(date))
    }

    const BATCH_PAUSE: Event = Event::Pause(Duration::from_secs(2));
    const RETRY_DELAY: Event = Event::Pause(Duration::from_secs(5));

    /// Stock delays; the fake transport records pauses instead of sleeping.
    fn paced_options(batch_size: usize) -> ImportOptions {
        ImportOptions {
            batch_size: NonZeroUsize::new(batch_size).unwrap(),
            ..ImportOptions::default()
        }
    }

    #[test]
    fn all_success() {
        let recs = records(120);
        let t = FakeTransport::new(|_, _| reply(200));
        let report = submit_in_batches(&t, &recs, &fast_options(50), None);

        assert_eq!(report.total_items, 120);
        assert_eq!(report.successful_items, 120);
        assert!(report.is_complete());
        assert_eq!(t.call_count(), 3);
    }

    #[test]
    fn empty_input_sends_nothing() {
        let t = FakeTransport::new(|_, _| reply(200));
        let report = submit_in_batches(&t, &[], &fast_options(50), Some(&mut NullProgress));
        assert_eq!(report, RunReport::default());
        assert_eq!(t.call_count(), 0);
    }

    #[test]
    fn always_failing_batch_gets_max_attempts_plus_one() {
        let recs = records(10);
        let t = FakeTransport::new(|_, _| reply(500));
        let opts = fast_options(50);
        let report = submit_in_batches(&t, &recs, &opts, None);

        assert_eq!(t.call_count(), opts.retry.max_attempts as usize + 1);
        assert_eq!(report.successful_items, 0);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].number, 1);
        assert_eq!(report.failed_records(), recs);
    }

    #[test]
    fn middle_batch_failing_is_isolated() {
        let recs = records(12);
        let bad = recs[5..10].to_vec();
        let t = {
            let bad = bad.clone();
            FakeTransport::new(move |sent, _| if sent == bad.as_slice() { reply(500) } else { reply(200) })
        };
        let report = submit_in_batches(&t, &recs, &fast_options(5), None);

        assert_eq!(report.total_items, 12);
        assert_eq!(report.successful_items, 5 + 2);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].number, 2);
        assert_eq!(report.failed_records(), bad);
        assert_eq!(t.calls_for(&bad), 4);
        assert_eq!(report.successful_items + report.failed_items(), report.total_items);
    }

    #[test]
    fn batch_recovering_in_retry_pass_is_counted() {
        let recs = records(6);
        // Batch 2 fails all three first-pass attempts, then the retry pass succeeds.
        let t = FakeTransport::new(|sent, attempt| {
            if sent[0].date == "2025-01-04" && attempt <= 3 { timed_out() } else { reply(200) }
        });
        let report = submit_in_batches(&t, &recs, &fast_options(3), None);

        assert_eq!(report.successful_items, 6);
        assert!(report.is_complete());
        assert!(report.failed_records().is_empty());
        assert_eq!(t.call_count(), 1 + 3 + 1);
    }

    #[test]
    fn retry_pass_keeps_only_still_failing_batches_in_order() {
        let recs = records(8);
        // Batches 1 and 3 fail the first pass; only batch 1 recovers. Batch 4 always fails.
        let t = FakeTransport::new(|sent, attempt| match sent[0].date.as_str() {
            "2025-01-01" if attempt <= 3 => reply(503),
            "2025-01-05" | "2025-01-07" => reply(500),
            _ => reply(200),
        });
        let report = submit_in_batches(&t, &recs, &fast_options(2), None);

        let numbers: Vec<usize> = report.failed.iter().map(|b| b.number).collect();
        assert_eq!(numbers, [3, 4]);
        assert_eq!(report.successful_items, 4);
        assert_eq!(report.failed_records(), recs[4..].to_vec());
    }

    #[test]
    fn partial_acceptance_status_fails_whole_batch() {
        let recs = records(50);
        let t = FakeTransport::new(|_, _| reply(207));
        let report = submit_in_batches(&t, &recs, &fast_options(50), None);
        assert_eq!(report.successful_items, 0);
        assert_eq!(report.failed_items(), 50);
    }

    #[test]
    fn single_record_batches_one_always_failing() {
        let recs = records(3);
        let t = FakeTransport::new(|sent, _| {
            if sent[0].date == "2025-01-02" { reply(500) } else { reply(200) }
        });
        let report = submit_in_batches(&t, &recs, &fast_options(1), None);

        assert_eq!(t.call_count(), 1 + 4 + 1);
        assert_eq!(t.calls_for(&recs[1..2]), 4);
        assert_eq!(report.successful_items, 2);
        assert_eq!(report.failed_records(), recs[1..2].to_vec());
    }

    #[test]
    fn pauses_between_batches_but_not_after_the_last() {
        let recs = records(5);
        let t = FakeTransport::new(|_, _| reply(200));
        submit_in_batches(&t, &recs, &paced_options(2), None);

        assert_eq!(
            t.events(),
            [
                post("2025-01-01"),
                BATCH_PAUSE,
                post("2025-01-03"),
                BATCH_PAUSE,
                post("2025-01-05"),
            ]
        );
    }

    #[test]
    fn retry_pass_follows_first_pass_without_a_pause_and_tries_once() {
        let recs = records(3);
        let t = FakeTransport::new(|sent, _| {
            if sent[0].date == "2025-01-02" { reply(500) } else { reply(200) }
        });
        submit_in_batches(&t, &recs, &paced_options(1), None);

        assert_eq!(
            t.events(),
            [
                post("2025-01-01"),
                BATCH_PAUSE,
                post("2025-01-02"),
                RETRY_DELAY,
                post("2025-01-02"),
                RETRY_DELAY,
                post("2025-01-02"),
                BATCH_PAUSE,
                post("2025-01-03"),
                post("2025-01-02"),
            ]
        );
    }

    #[test]
    fn retries_of_several_batches_are_spaced_by_the_batch_pause() {
        let recs = records(3);
        let t = FakeTransport::new(|sent, _| {
            if sent[0].date == "2025-01-02" { reply(200) } else { timed_out() }
        });
        let opts = ImportOptions {
            retry: RetryPolicy { max_attempts: 1, ..RetryPolicy::default() },
            ..paced_options(1)
        };
        let report = submit_in_batches(&t, &recs, &opts, None);

        assert_eq!(
            t.events(),
            [
                post("2025-01-01"),
                BATCH_PAUSE,
                post("2025-01-02"),
                BATCH_PAUSE,
                post("2025-01-03"),
                post("2025-01-01"),
                BATCH_PAUSE,
                post("2025-01-03"),
            ]
        );
        let numbers: Vec<usize> = report.failed.iter().map(|b| b.number).collect();
        assert_eq!(numbers, [1, 3]);
    }
}
