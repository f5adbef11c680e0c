//! Report-writing client for hosted and local LLMs
//!
//! One request shape: a system prompt plus a single user prompt, answered by
//! a single text reply. Anthropic gets its Messages API; every other backend
//! speaks the OpenAI chat-completions format. Sync HTTP via ureq.

use crate::ai::{AiError, AiResult};
use crate::quiz::ReportService;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::env;
use std::net::{SocketAddr, TcpStream};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

const ANTHROPIC_VERSION: &str = "2023-06-01";
const OLLAMA_ADDR: &str = "127.0.0.1:11434";

/// Supported LLM backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmBackend {
    #[default]
    Anthropic,
    OpenAi,
    Deepinfra,
    OpenRouter,
    Ollama,
}

impl LlmBackend {
    pub const ALL: [LlmBackend; 5] = [
        LlmBackend::Anthropic,
        LlmBackend::OpenAi,
        LlmBackend::Deepinfra,
        LlmBackend::OpenRouter,
        LlmBackend::Ollama,
    ];

    /// Environment variable holding the API key; `None` for local Ollama
    pub fn api_key_var(&self) -> Option<&'static str> {
        match self {
            LlmBackend::Anthropic => Some("ANTHROPIC_API_KEY"),
            LlmBackend::OpenAi => Some("OPENAI_API_KEY"),
            LlmBackend::Deepinfra => Some("DEEPINFRA_API_KEY"),
            LlmBackend::OpenRouter => Some("OPENROUTER_API_KEY"),
            LlmBackend::Ollama => None,
        }
    }

    fn signup_url(&self) -> &'static str {
        match self {
            LlmBackend::Anthropic => "https://console.anthropic.com/settings/keys",
            LlmBackend::OpenAi => "https://platform.openai.com/api-keys",
            LlmBackend::Deepinfra => "https://deepinfra.com/dash/api_keys",
            LlmBackend::OpenRouter => "https://openrouter.ai/keys",
            LlmBackend::Ollama => "https://ollama.com",
        }
    }

    /// Small, fast general-purpose models; a report is a few hundred words
    pub fn default_model(&self) -> &'static str {
        match self {
            LlmBackend::Anthropic => "claude-3-5-haiku-latest",
            LlmBackend::OpenAi => "gpt-4o-mini",
            LlmBackend::Deepinfra => "meta-llama/Llama-3.3-70B-Instruct",
            LlmBackend::OpenRouter => "anthropic/claude-3.5-haiku",
            LlmBackend::Ollama => "llama3.2",
        }
    }

    fn endpoint(&self) -> &'static str {
        match self {
            LlmBackend::Anthropic => "https://api.anthropic.com/v1/messages",
            LlmBackend::OpenAi => "https://api.openai.com/v1/chat/completions",
            LlmBackend::Deepinfra => "https://api.deepinfra.com/v1/openai/chat/completions",
            LlmBackend::OpenRouter => "https://openrouter.ai/api/v1/chat/completions",
            LlmBackend::Ollama => "http://localhost:11434/v1/chat/completions",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LlmBackend::Anthropic => "Anthropic",
            LlmBackend::OpenAi => "OpenAI",
            LlmBackend::Deepinfra => "Deepinfra",
            LlmBackend::OpenRouter => "OpenRouter",
            LlmBackend::Ollama => "Ollama (local)",
        }
    }
}

impl FromStr for LlmBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "anthropic" | "claude" => Ok(LlmBackend::Anthropic),
            "openai" | "gpt" => Ok(LlmBackend::OpenAi),
            "deepinfra" => Ok(LlmBackend::Deepinfra),
            "openrouter" => Ok(LlmBackend::OpenRouter),
            "ollama" | "local" => Ok(LlmBackend::Ollama),
            _ => Err(format!(
                "Unknown backend '{}'. Valid backends: anthropic, openai, deepinfra, openrouter, ollama",
                s
            )),
        }
    }
}

impl std::fmt::Display for LlmBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LlmBackend::Anthropic => "anthropic",
            LlmBackend::OpenAi => "openai",
            LlmBackend::Deepinfra => "deepinfra",
            LlmBackend::OpenRouter => "openrouter",
            LlmBackend::Ollama => "ollama",
        };
        write!(f, "{}", name)
    }
}

/// Resolved report settings (see `config::resolve_ai_config`)
#[derive(Debug, Clone, PartialEq)]
pub struct AiConfig {
    pub backend: LlmBackend,
    pub model: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            backend: LlmBackend::default(),
            model: None,
            max_tokens: 1024,
            temperature: 0.7,
            timeout_secs: 120,
        }
    }
}

impl AiConfig {
    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.backend.default_model())
    }
}

/// Client bound to one backend and (for hosted backends) one API key
pub struct AiClient {
    config: AiConfig,
    api_key: Option<String>,
    agent: ureq::Agent,
}

impl AiClient {
    pub fn new(config: AiConfig, api_key: Option<String>) -> Self {
        let agent = ureq::config::Config::builder()
            .http_status_as_error(false)
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .build()
            .new_agent();
        Self {
            config,
            api_key,
            agent,
        }
    }

    /// Read the backend's key (or `OLLAMA_MODEL`) from the environment now
    pub fn from_env(mut config: AiConfig) -> AiResult<Self> {
        let Some(var) = config.backend.api_key_var() else {
            if let Ok(model) = env::var("OLLAMA_MODEL") {
                config.model = Some(model);
            }
            return Ok(Self::new(config, None));
        };
        let key = env::var(var).map_err(|_| AiError::MissingApiKey {
            env_var: var.to_string(),
            signup_url: config.backend.signup_url().to_string(),
        })?;
        Ok(Self::new(config, Some(key)))
    }

    /// Whether a local Ollama server is accepting connections
    pub fn ollama_available() -> bool {
        match OLLAMA_ADDR.parse::<SocketAddr>() {
            Ok(addr) => TcpStream::connect_timeout(&addr, Duration::from_millis(300)).is_ok(),
            Err(_) => false,
        }
    }

    /// Send one system + user prompt and return the reply text
    pub fn write_report(&self, system: &str, prompt: &str) -> AiResult<String> {
        let backend = self.config.backend;
        debug!("POST {} ({})", backend.endpoint(), self.config.model());

        let request = self
            .agent
            .post(backend.endpoint())
            .header("Content-Type", "application/json");

        match (backend, self.api_key.as_deref()) {
            (LlmBackend::Anthropic, key) => {
                let response = request
                    .header("x-api-key", key.unwrap_or_default())
                    .header("anthropic-version", ANTHROPIC_VERSION)
                    .send_json(self.anthropic_request(system, prompt))
                    .map_err(|e| AiError::RequestFailed(e.to_string()))?;
                let reply: AnthropicResponse = decode(response)?;
                reply
                    .content
                    .into_iter()
                    .find(|block| block.kind == "text")
                    .map(|block| block.text)
                    .ok_or_else(|| AiError::ParseError("no text block in reply".to_string()))
            }
            (_, key) => {
                let request = match key {
                    Some(key) => request.header("Authorization", &format!("Bearer {}", key)),
                    None => request,
                };
                let response = request
                    .send_json(self.chat_request(system, prompt))
                    .map_err(|e| AiError::RequestFailed(e.to_string()))?;
                let reply: ChatResponse = decode(response)?;
                reply
                    .choices
                    .into_iter()
                    .next()
                    .map(|choice| choice.message.content)
                    .ok_or_else(|| AiError::ParseError("no choices in reply".to_string()))
            }
        }
    }

    fn anthropic_request<'a>(&'a self, system: &'a str, prompt: &'a str) -> AnthropicRequest<'a> {
        AnthropicRequest {
            model: self.config.model(),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            system,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        }
    }

    fn chat_request<'a>(&'a self, system: &'a str, prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: self.config.model(),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        }
    }
}

/// Map HTTP errors to [`AiError::ApiError`] and parse the JSON body
fn decode<T: DeserializeOwned>(response: ureq::http::Response<ureq::Body>) -> AiResult<T> {
    let status = response.status().as_u16();
    if status >= 400 {
        let message = response.into_body().read_to_string().unwrap_or_default();
        return Err(AiError::ApiError { status, message });
    }
    response
        .into_body()
        .read_json()
        .map_err(|e| AiError::ParseError(e.to_string()))
}

/// Report service that resolves the API key on every request
///
/// A missing key surfaces as [`AiError::MissingApiKey`] from
/// `generate_report`, which the quiz turns into its fallback report.
#[derive(Debug, Clone, Default)]
pub struct EnvReportService {
    config: AiConfig,
}

impl EnvReportService {
    pub fn new(config: AiConfig) -> Self {
        Self { config }
    }
}

impl ReportService for EnvReportService {
    fn generate_report(&self, system: &str, prompt: &str) -> AiResult<String> {
        AiClient::from_env(self.config.clone())?.write_report(system, prompt)
    }
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: String,
}

#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}
