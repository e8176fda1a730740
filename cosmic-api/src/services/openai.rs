//! OpenAI chat completions client
//!
//! Talks to the public OpenAI API with a bearer token, or to an Azure OpenAI
//! deployment with an `api-key` header when one is configured.

use serde::{Deserialize, Serialize};

use super::{join_url, status_error, UpstreamError};

const AZURE_API_VERSION: &str = "2023-05-15";

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    error: Option<ApiErrorPayload>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorPayload {
    message: String,
}

/// Single-prompt chat request
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone)]
struct AzureDeployment {
    resource: String,
    deployment: String,
}

pub struct OpenAiClient {
    http_client: reqwest::Client,
    base_url: String,
    model: String,
    azure: Option<AzureDeployment>,
}

impl OpenAiClient {
    pub fn new(
        http_client: reqwest::Client,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
            model: model.into(),
            azure: None,
        }
    }

    /// Route requests to an Azure OpenAI deployment
    pub fn with_azure(mut self, resource: &str, deployment: &str) -> Self {
        self.azure = Some(AzureDeployment {
            resource: resource.to_string(),
            deployment: deployment.to_string(),
        });
        self
    }

    fn endpoint(&self) -> String {
        match &self.azure {
            Some(azure) => format!(
                "https://{}.openai.azure.com/openai/deployments/{}/chat/completions?api-version={}",
                azure.resource, azure.deployment, AZURE_API_VERSION
            ),
            None => join_url(&self.base_url, "chat/completions"),
        }
    }

    /// Send one user message and return the first choice's content
    pub async fn complete(
        &self,
        api_key: &str,
        request: &ChatRequest,
    ) -> Result<String, UpstreamError> {
        let url = self.endpoint();
        let body = ChatCompletionRequest {
            // Azure deployments pin the model server-side
            model: self.azure.is_none().then_some(self.model.as_str()),
            messages: vec![ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        tracing::debug!(
            url = %url,
            model = %self.model,
            max_tokens = request.max_tokens,
            "Sending chat completion request"
        );

        let builder = self.http_client.post(&url).json(&body);
        let builder = if self.azure.is_some() {
            builder.header("api-key", api_key)
        } else {
            builder.bearer_auth(api_key)
        };

        let response = builder
            .send()
            .await
            .map_err(|e| UpstreamError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Parse(e.to_string()))?;

        if let Some(error) = completion.error {
            return Err(UpstreamError::Api(error.message));
        }

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| UpstreamError::MissingContent("no content in chat completion".to_string()))
    }
}
