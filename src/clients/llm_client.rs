/// LLM 评分服务客户端
///
/// 封装与 chat completion 接口的 HTTP 交互
use async_trait::async_trait;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{ScoringError, ScoringResult};
use crate::utils::retry::{retry_when, RetryPolicy};

/// 系统消息：演讲教练角色
pub const COACH_SYSTEM_MESSAGE: &str = "You are a helpful assistant and public speaking coach.";

/// 评分服务能力
///
/// 输入提示词，返回模型的原始文字（预期是 JSON 字符串）
#[async_trait]
pub trait ScoringClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> ScoringResult<String>;
}

// ========== 请求 / 响应结构 ==========

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// chat completion 客户端
pub struct ChatCompletionClient {
    http: reqwest::Client,
    api_key: String,
    api_base_url: String,
    model_name: String,
    max_tokens: u32,
    temperature: f32,
    retry: RetryPolicy,
}

impl ChatCompletionClient {
    /// 根据配置创建客户端
    ///
    /// API Key 和端点在每次请求前校验，这里不做检查
    pub fn new(config: &Config) -> ScoringResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ScoringError::configuration(format!("无法创建 HTTP 客户端: {}", e)))?;

        Ok(Self {
            http,
            api_key: config.llm_api_key.clone(),
            api_base_url: config.llm_api_base_url.clone(),
            model_name: config.llm_model_name.clone(),
            max_tokens: config.llm_max_tokens,
            temperature: config.llm_temperature,
            retry: RetryPolicy::new(
                config.llm_max_attempts,
                Duration::from_millis(config.llm_retry_backoff_ms),
            ),
        })
    }

    /// 替换重试策略
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// chat completion 端点
    pub fn endpoint(&self) -> ScoringResult<Url> {
        let raw = format!("{}/chat/completions", self.api_base_url.trim_end_matches('/'));
        let url = Url::parse(&raw)
            .map_err(|e| ScoringError::configuration(format!("端点格式错误 {}: {}", raw, e)))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ScoringError::configuration(format!(
                "端点协议不受支持: {}",
                other
            ))),
        }
    }

    fn build_request<'a>(&'a self, prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model_name,
            messages: [
                ChatMessage {
                    role: "system",
                    content: COACH_SYSTEM_MESSAGE,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        }
    }

    /// 发送一次请求
    async fn send_once(&self, url: &Url, request: &ChatRequest<'_>) -> ScoringResult<String> {
        let response = self
            .http
            .post(url.clone())
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(ScoringError::Transport)?;

        let status = response.status();
        if status.as_u16() >= 300 {
            let body = response.text().await.unwrap_or_default();
            warn!("评分服务返回 HTTP {}: {}", status.as_u16(), body);
            return Err(ScoringError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(ScoringError::Transport)?;
        let decoded: ChatResponse = serde_json::from_slice(&bytes)
            .map_err(|e| ScoringError::protocol(format!("无法解析 chat completion 响应: {}", e)))?;

        let content = decoded
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .ok_or_else(|| ScoringError::protocol("响应中没有 message content"))?;

        if content.trim().is_empty() {
            return Err(ScoringError::protocol("LLM 返回内容为空"));
        }

        Ok(content.trim().to_string())
    }
}

#[async_trait]
impl ScoringClient for ChatCompletionClient {
    async fn complete(&self, prompt: &str) -> ScoringResult<String> {
        if self.api_key.trim().is_empty() {
            return Err(ScoringError::configuration("缺少 API Key"));
        }
        let url = self.endpoint()?;

        debug!("调用评分服务，模型: {}，端点: {}", self.model_name, url);
        debug!("提示词长度: {} 字符", prompt.chars().count());

        let request = self.build_request(prompt);
        let content = retry_when(&self.retry, ScoringError::is_transient, || {
            self.send_once(&url, &request)
        })
        .await?;

        debug!("评分服务调用成功，返回 {} 字符", content.chars().count());
        Ok(content)
    }
}
