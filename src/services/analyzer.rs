// src/services/analyzer.rs

//! Análise de texto livre via API de LLM (chat completions, formato OpenAI).
//!
//! O resto do sistema só conhece o trait `SpeechAnalyzer`; nos testes usamos
//! uma implementação falsa.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::common::error::AppError;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama3-8b-8192";

const TEMPERATURE: f32 = 0.7;
const SPEECH_MAX_TOKENS: u32 = 200;
const POST_CALL_MAX_TOKENS: u32 = 300;

const SPEECH_PROMPT: &str = "Analyze conversation for:
1. Sentiment: Overall mood, key emotions
2. Intent: Primary goal, required actions
3. Tone: Speech style, pitch patterns
Provide brief bullet points.";

const POST_CALL_PROMPT: &str = "Provide a detailed post-call analysis with the following structure:
1. Key Discussion Points
2. Customer Concerns
Be concise but short.";

#[async_trait]
pub trait SpeechAnalyzer: Send + Sync {
    /// Sentimento, intenção e tom de uma transcrição.
    async fn analyze_speech(&self, transcript: &str) -> Result<String, AppError>;

    /// Resumo pós-ligação da última interação.
    async fn post_call_analysis(&self, transcript: &str) -> Result<String, AppError>;
}

// --- CONFIGURAÇÃO ---

#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    // Opcional: sem chave o servidor sobe, mas as análises falham com 500
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

// --- TIPOS DO PROTOCOLO ---

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

// --- CLIENTE GROQ ---

#[derive(Clone)]
pub struct GroqAnalyzer {
    client: Client,
    config: AnalyzerConfig,
}

impl GroqAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Result<Self, AppError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    async fn complete(
        &self,
        system_prompt: &str,
        user_text: &str,
        max_tokens: u32,
    ) -> Result<String, AppError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AppError::ExternalServiceError("GROQ_API_KEY not configured".to_string()))?;

        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage { role: "system", content: system_prompt },
                ChatMessage { role: "user", content: user_text },
            ],
            temperature: TEMPERATURE,
            max_tokens,
        };

        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        tracing::debug!("Calling analysis service at {} (model {})", url, self.config.model);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "analysis service returned {}: {}",
                status, body
            )));
        }

        let chat: ChatResponse = response.json().await?;
        extract_content(chat)
    }
}

fn extract_content(chat: ChatResponse) -> Result<String, AppError> {
    chat.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .ok_or_else(|| {
            AppError::ExternalServiceError("analysis service returned no content".to_string())
        })
}

#[async_trait]
impl SpeechAnalyzer for GroqAnalyzer {
    async fn analyze_speech(&self, transcript: &str) -> Result<String, AppError> {
        self.complete(SPEECH_PROMPT, transcript, SPEECH_MAX_TOKENS).await
    }

    async fn post_call_analysis(&self, transcript: &str) -> Result<String, AppError> {
        self.complete(POST_CALL_PROMPT, transcript, POST_CALL_MAX_TOKENS).await
    }
}
