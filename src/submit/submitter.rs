// src/submit/submitter.rs
use std::time::Duration;

use serde_json::Value;

use super::Batch;
use crate::config::options::RetryPolicy;
use crate::core::net::{HttpReply, Transport};
use crate::error::Result;
use crate::record::Record;

/// Deliver one batch, retrying per `policy`.
///
/// The batch goes out as a single JSON array; only status 200 counts as accepted and
/// then every record in it is accepted. Rejections and transport errors are logged
/// and retried alike. Never returns an error: after the last attempt it returns `false`.
pub fn submit_batch(
    transport: &dyn Transport,
    endpoint: &str,
    batch: Batch<'_>,
    policy: &RetryPolicy,
) -> bool {
    let body = match serde_json::to_string(batch.records) {
        Ok(b) => b,
        Err(e) => {
            loge!(batch = batch.number, "Cannot serialize batch: {e}");
            return false;
        }
    };

    let max = policy.max_attempts;
    for attempt in 1..=max {
        match transport.post_json(endpoint, &body, policy.timeout) {
            Ok(reply) if reply.is_success() => {
                log_ack(batch, &reply);
                return true;
            }
            Ok(reply) => logw!(
                batch = batch.number,
                "Attempt {attempt}/{max} rejected with status {}: {}",
                reply.status,
                reply.body
            ),
            Err(e) => logw!(batch = batch.number, "Attempt {attempt}/{max} failed: {e}"),
        }

        match policy.delay_after(attempt) {
            Some(delay) => {
                logf!(batch = batch.number, "Retrying in {}s…", delay.as_secs_f32());
                transport.pause(delay);
            }
            None => loge!(batch = batch.number, "Giving up after {max} attempts"),
        }
    }
    false
}

fn log_ack(batch: Batch<'_>, reply: &HttpReply) {
    match serde_json::from_str::<Value>(&reply.body) {
        Ok(ack) => logf!(batch = batch.number, "Submitted {} records: {ack}", batch.len()),
        Err(_) => logw!(
            batch = batch.number,
            "Submitted {} records; response was not JSON: {}",
            batch.len(),
            reply.body
        ),
    }
}

/// POST a single record as a bare JSON object, for checking an endpoint by hand.
/// Any completed exchange is returned as-is, whatever its status.
pub fn probe(
    transport: &dyn Transport,
    endpoint: &str,
    record: &Record,
    timeout: Duration,
) -> Result<HttpReply> {
    let body = serde_json::to_string(record)?;
    logd!("Probing {endpoint} with {body}");
    transport.post_json(endpoint, &body, timeout)
}
