use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// 指定配置文件路径的环境变量
pub const CONFIG_FILE_ENV: &str = "COACH_CONFIG";

/// 程序配置
#[derive(Clone)]
pub struct Config {
    // --- LLM 配置 ---
    /// API Key，只能从环境变量或配置文件读取
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    pub llm_max_tokens: u32,
    pub llm_temperature: f32,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    /// 网络失败时的最大尝试次数（1 表示不重试）
    pub llm_max_attempts: u32,
    /// 重试的初始退避时间（毫秒）
    pub llm_retry_backoff_ms: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- 练习数据 ---
    pub script_path: Option<String>,
    pub slides_path: Option<String>,
    pub marking_path: Option<String>,
    /// 目标练习时长（分钟）
    pub duration_minutes: u32,
    /// 实际用时（秒），未设置时使用完整时长
    pub used_seconds: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.deepseek.com".to_string(),
            llm_model_name: "deepseek-chat".to_string(),
            llm_max_tokens: 800,
            llm_temperature: 0.4,
            request_timeout_secs: 60,
            llm_max_attempts: 1,
            llm_retry_backoff_ms: 500,
            verbose_logging: false,
            script_path: None,
            slides_path: None,
            marking_path: None,
            duration_minutes: 5,
            used_seconds: None,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.llm_api_key.is_empty() {
            "<empty>"
        } else {
            "<redacted>"
        };
        f.debug_struct("Config")
            .field("llm_api_key", &api_key)
            .field("llm_api_base_url", &self.llm_api_base_url)
            .field("llm_model_name", &self.llm_model_name)
            .field("llm_max_tokens", &self.llm_max_tokens)
            .field("llm_temperature", &self.llm_temperature)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("llm_max_attempts", &self.llm_max_attempts)
            .field("llm_retry_backoff_ms", &self.llm_retry_backoff_ms)
            .field("verbose_logging", &self.verbose_logging)
            .field("script_path", &self.script_path)
            .field("slides_path", &self.slides_path)
            .field("marking_path", &self.marking_path)
            .field("duration_minutes", &self.duration_minutes)
            .field("used_seconds", &self.used_seconds)
            .finish()
    }
}

/// TOML 配置文件结构，所有字段都可以省略
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    llm_api_key: Option<String>,
    llm_api_base_url: Option<String>,
    llm_model_name: Option<String>,
    llm_max_tokens: Option<u32>,
    llm_temperature: Option<f32>,
    request_timeout_secs: Option<u64>,
    llm_max_attempts: Option<u32>,
    llm_retry_backoff_ms: Option<u64>,
    verbose_logging: Option<bool>,
    script_path: Option<String>,
    slides_path: Option<String>,
    marking_path: Option<String>,
    duration_minutes: Option<u32>,
    used_seconds: Option<u32>,
}

impl Config {
    /// 从环境变量读取配置，未设置的项使用默认值
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 加载配置：先读 `COACH_CONFIG` 指向的文件（如果有），再用环境变量覆盖
    pub async fn load() -> Result<Self> {
        match std::env::var(CONFIG_FILE_ENV) {
            Ok(path) if !path.trim().is_empty() => {
                Ok(Self::from_file(Path::new(&path)).await?.with_env_overrides())
            }
            _ => Ok(Self::from_env()),
        }
    }

    /// 从 TOML 文件读取配置
    pub async fn from_file(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("无法读取配置文件: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("无法解析配置文件: {}", path.display()))
    }

    /// 从 TOML 文本解析配置，缺省的键使用默认值
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        let default = Self::default();
        Ok(Self {
            llm_api_key: file.llm_api_key.unwrap_or(default.llm_api_key),
            llm_api_base_url: file.llm_api_base_url.unwrap_or(default.llm_api_base_url),
            llm_model_name: file.llm_model_name.unwrap_or(default.llm_model_name),
            llm_max_tokens: file.llm_max_tokens.unwrap_or(default.llm_max_tokens),
            llm_temperature: file.llm_temperature.unwrap_or(default.llm_temperature),
            request_timeout_secs: file.request_timeout_secs.unwrap_or(default.request_timeout_secs),
            llm_max_attempts: file.llm_max_attempts.unwrap_or(default.llm_max_attempts),
            llm_retry_backoff_ms: file.llm_retry_backoff_ms.unwrap_or(default.llm_retry_backoff_ms),
            verbose_logging: file.verbose_logging.unwrap_or(default.verbose_logging),
            script_path: file.script_path,
            slides_path: file.slides_path,
            marking_path: file.marking_path,
            duration_minutes: file.duration_minutes.unwrap_or(default.duration_minutes),
            used_seconds: file.used_seconds,
        })
    }

    /// 用环境变量覆盖当前配置，无法解析的值保留原值
    pub fn with_env_overrides(self) -> Self {
        Self {
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(self.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(self.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(self.llm_model_name),
            llm_max_tokens: parse_env("LLM_MAX_TOKENS").unwrap_or(self.llm_max_tokens),
            llm_temperature: parse_env("LLM_TEMPERATURE").unwrap_or(self.llm_temperature),
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS").unwrap_or(self.request_timeout_secs),
            llm_max_attempts: parse_env("LLM_MAX_ATTEMPTS").unwrap_or(self.llm_max_attempts),
            llm_retry_backoff_ms: parse_env("LLM_RETRY_BACKOFF_MS").unwrap_or(self.llm_retry_backoff_ms),
            verbose_logging: parse_env("VERBOSE_LOGGING").unwrap_or(self.verbose_logging),
            script_path: std::env::var("SCRIPT_PATH").ok().or(self.script_path),
            slides_path: std::env::var("SLIDES_PATH").ok().or(self.slides_path),
            marking_path: std::env::var("MARKING_PATH").ok().or(self.marking_path),
            duration_minutes: parse_env("DURATION_MINUTES").unwrap_or(self.duration_minutes),
            used_seconds: parse_env("USED_SECONDS").or(self.used_seconds),
        }
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
