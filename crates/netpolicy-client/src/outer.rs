//! Operator-facing client: list, add, and delete rules.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;

use netpolicy_core::error::{NetPolicyError, Result};
use netpolicy_core::models::Rule;

use crate::http::{base, expect_status, transport};

/// Rule CRUD as seen by tooling. `OuterClient` is the HTTP implementation.
#[async_trait]
pub trait RulesApi: Send + Sync {
    async fn list_rules(&self) -> Result<Vec<Rule>>;
    async fn add_rule(&self, rule: &Rule) -> Result<()>;
    async fn delete_rule(&self, rule: &Rule) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct OuterClient {
    http: reqwest::Client,
    base_url: String,
}

impl OuterClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: base(base_url),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn post_rule(
        &self,
        op: &'static str,
        path: &str,
        rule: &Rule,
        expected: StatusCode,
    ) -> Result<()> {
        let resp = self
            .http
            .post(self.url(path))
            .header(ACCEPT, "application/json")
            .json(rule)
            .send()
            .await
            .map_err(transport(op))?;
        expect_status(op, &resp, expected)
    }
}

#[async_trait]
impl RulesApi for OuterClient {
    async fn list_rules(&self) -> Result<Vec<Rule>> {
        const OP: &str = "list rules";
        let resp = self
            .http
            .get(self.url("/rules"))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(transport(OP))?;
        expect_status(OP, &resp, StatusCode::OK)?;
        resp.json::<Vec<Rule>>()
            .await
            .map_err(|e| NetPolicyError::Transport(format!("{OP}: decode: {e}")))
    }

    async fn add_rule(&self, rule: &Rule) -> Result<()> {
        self.post_rule("add rule", "/rules/add", rule, StatusCode::CREATED)
            .await
    }

    async fn delete_rule(&self, rule: &Rule) -> Result<()> {
        self.post_rule("delete rule", "/rules/delete", rule, StatusCode::NO_CONTENT)
            .await
    }
}
