//! Dataplane-facing client: poll resolved whitelists.

use reqwest::header::ACCEPT;
use reqwest::StatusCode;

use netpolicy_core::error::{NetPolicyError, Result};
use netpolicy_core::models::IngressWhitelist;

use crate::http::{base, expect_status, transport};

#[derive(Debug, Clone)]
pub struct InnerClient {
    http: reqwest::Client,
    base_url: String,
}

impl InnerClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: base(base_url),
        }
    }

    /// One whitelist per requested group, in request order.
    pub async fn get_whitelists(&self, groups: &[String]) -> Result<Vec<IngressWhitelist>> {
        const OP: &str = "get whitelists";
        let resp = self
            .http
            .get(format!("{}/whitelists", self.base_url))
            .query(&[("groups", groups.join(","))])
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(transport(OP))?;
        expect_status(OP, &resp, StatusCode::OK)?;
        resp.json::<Vec<IngressWhitelist>>()
            .await
            .map_err(|e| NetPolicyError::Transport(format!("{OP}: decode: {e}")))
    }
}
