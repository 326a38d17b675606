//! HTTP client for the hosted AI completion endpoint.
//!
//! The assist flow forwards a visitor question plus the curated
//! knowledge base to a managed inference API and relays its answer. The
//! wire format is the endpoint's own (camelCase `knowledgeBase`).

use serde::{Deserialize, Serialize};

/// Client for the AI completion endpoint.
pub struct AssistClient {
    client: reqwest::Client,
    endpoint: String,
}

/// Request body sent to the completion endpoint.
#[derive(Debug, Serialize)]
struct AssistRequest<'a> {
    message: &'a str,
    topic: &'a str,
    #[serde(rename = "knowledgeBase")]
    knowledge_base: &'a [String],
}

/// Response returned by the completion endpoint.
#[derive(Debug, Deserialize, Serialize)]
pub struct AssistReply {
    pub success: bool,
    pub message: String,
}

/// Errors from the assist client.
#[derive(Debug, thiserror::Error)]
pub enum AssistError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint returned a non-2xx status code.
    #[error("Assist endpoint error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl AssistClient {
    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn new(client: reqwest::Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }

    /// Forward a question with its knowledge context, returning the
    /// endpoint's answer.
    pub async fn complete(
        &self,
        message: &str,
        topic: &str,
        knowledge_base: &[String],
    ) -> Result<AssistReply, AssistError> {
        let body = AssistRequest {
            message,
            topic,
            knowledge_base,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(AssistError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<AssistReply>().await?)
    }
}
