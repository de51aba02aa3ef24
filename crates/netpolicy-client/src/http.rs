//! Shared request helpers. Any status other than the expected one is a hard
//! error; nothing is retried.

use reqwest::{Response, StatusCode};

use netpolicy_core::error::{NetPolicyError, Result};

pub(crate) fn base(url: impl Into<String>) -> String {
    url.into().trim_end_matches('/').to_string()
}

pub(crate) fn transport(op: &'static str) -> impl Fn(reqwest::Error) -> NetPolicyError {
    move |e| NetPolicyError::Transport(format!("{op}: {e}"))
}

pub(crate) fn expect_status(op: &'static str, resp: &Response, expected: StatusCode) -> Result<()> {
    let status = resp.status();
    if status != expected {
        tracing::debug!(op, status = status.as_u16(), "unexpected status");
        return Err(NetPolicyError::UnexpectedStatus {
            op,
            status: status.as_u16(),
        });
    }
    Ok(())
}
