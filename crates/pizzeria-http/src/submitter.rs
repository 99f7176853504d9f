#![forbid(unsafe_code)]

use pizzeria_core::{OrderDraft, OrderSubmitter, SubmitError, SubmitResponse};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, info_span, warn};

/// Where orders go unless configured otherwise.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:9009/api/order";

/// Settings for [`HttpSubmitter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSubmitterConfig {
    /// Full URL of the order endpoint.
    pub endpoint: String,
    /// Whole-request timeout. `None` keeps the transport default.
    pub timeout: Option<Duration>,
    /// Value for the `User-Agent` header.
    pub user_agent: String,
}

impl Default for HttpSubmitterConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
            user_agent: concat!("pizzeria/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HttpSubmitterConfig {
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Posts orders over HTTP with a blocking client.
///
/// Meant to be called from a background task, never from the UI thread.
#[derive(Debug, Clone)]
pub struct HttpSubmitter {
    client: Client,
    config: HttpSubmitterConfig,
}

impl HttpSubmitter {
    /// Build the HTTP client.
    pub fn new(config: HttpSubmitterConfig) -> Result<Self, SubmitError> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| SubmitError::Transport(err.to_string()))?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}

impl OrderSubmitter for HttpSubmitter {
    fn submit(&self, draft: &OrderDraft) -> Result<SubmitResponse, SubmitError> {
        let span = info_span!("submit_order", endpoint = %self.config.endpoint);
        let _guard = span.enter();
        debug!(toppings = draft.toppings.len(), "posting order");

        let response = self
            .client
            .post(self.config.endpoint.as_str())
            .json(draft)
            .send()
            .map_err(|err| {
                warn!(error = %err, "order request failed");
                SubmitError::Transport(err.to_string())
            })?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|err| SubmitError::Transport(err.to_string()))?;

        let reply = interpret_reply(status, &body);
        match &reply {
            Ok(SubmitResponse::Success { message }) => info!(status, %message, "order accepted"),
            Ok(SubmitResponse::Failure { message }) => warn!(status, %message, "order rejected"),
            Err(err) => warn!(status, error = %err, "unexpected order reply"),
        }
        reply
    }
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    message: String,
}

/// Classify a reply by status code and body.
///
/// # Errors
///
/// Returns [`SubmitError::UnexpectedResponse`] when the body is not a JSON
/// object with a string `message` field.
pub fn interpret_reply(status: u16, body: &str) -> Result<SubmitResponse, SubmitError> {
    let Ok(MessageBody { message }) = serde_json::from_str::<MessageBody>(body) else {
        return Err(SubmitError::UnexpectedResponse {
            status,
            body: body.trim().to_string(),
        });
    };
    if (200..300).contains(&status) {
        Ok(SubmitResponse::Success { message })
    } else {
        Ok(SubmitResponse::Failure { message })
    }
}
