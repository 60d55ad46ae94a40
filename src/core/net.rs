// src/core/net.rs
// JSON POST over a blocking reqwest client

use std::{thread, time::Duration};

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

use crate::config::consts::USER_AGENT;
use crate::error::Result;

/// Status and body of a completed HTTP exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    /// Only a plain 200 counts as acceptance.
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Seam between the submitter and the network, and the clock it paces itself by.
///
/// `Err` means the exchange never completed (connect error, timeout, DNS); a
/// completed exchange with any status is `Ok`.
pub trait Transport {
    fn post_json(&self, endpoint: &str, body: &str, timeout: Duration) -> Result<HttpReply>;

    /// Block between requests. Zero returns immediately.
    fn pause(&self, d: Duration) {
        if !d.is_zero() {
            thread::sleep(d);
        }
    }
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn post_json(&self, endpoint: &str, body: &str, timeout: Duration) -> Result<HttpReply> {
        let resp = self
            .client
            .post(endpoint)
            .header(CONTENT_TYPE, "application/json")
            .timeout(timeout)
            .body(body.to_owned())
            .send()?;
        let status = resp.status().as_u16();
        let body = resp.text()?;
        Ok(HttpReply { status, body })
    }
}
