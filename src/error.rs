use thiserror::Error;

/// 评分流程错误类型
///
/// 每一种失败都对应一个独立的变体，调用方可以按类型区分处理
#[derive(Debug, Error)]
pub enum ScoringError {
    /// 配置错误（缺少 API Key、端点格式错误等），不会发起网络请求
    #[error("配置错误: {0}")]
    Configuration(String),

    /// 评分服务返回了非成功状态码（>= 300）
    #[error("评分服务返回错误 (HTTP {status}): {body}")]
    Service { status: u16, body: String },

    /// 响应结构不符合 chat completion 协议（没有可提取的 message content）
    #[error("响应协议错误: {0}")]
    Protocol(String),

    /// 模型返回的内容不是合法的评分 JSON
    #[error("评分结果解析失败: {0}")]
    Parse(#[from] serde_json::Error),

    /// 网络层失败（超时、连接被重置等）
    #[error("网络请求失败: {0}")]
    Transport(#[source] reqwest::Error),

    /// 同一个会话已经有评分任务在进行
    #[error("已有评分任务正在进行，本次请求被拒绝")]
    AlreadyAnalyzing,
}

impl ScoringError {
    /// 是否属于可以重试的临时性错误
    ///
    /// 只有网络层失败被视为临时性错误
    pub fn is_transient(&self) -> bool {
        matches!(self, ScoringError::Transport(_))
    }

    /// 创建配置错误
    pub fn configuration(message: impl Into<String>) -> Self {
        ScoringError::Configuration(message.into())
    }

    /// 创建协议错误
    pub fn protocol(message: impl Into<String>) -> Self {
        ScoringError::Protocol(message.into())
    }
}

/// 会话状态错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// 计时器已经启动，练习时长不能再修改
    #[error("计时器已启动，练习时长不能再修改")]
    DurationLocked,

    /// 本轮练习的实际用时已经记录过
    #[error("本轮练习的实际用时已记录 ({recorded} 秒)")]
    UsedTimeAlreadyRecorded { recorded: u32 },
}

// ========== Result 类型别名 ==========

/// 评分流程结果类型
pub type ScoringResult<T> = Result<T, ScoringError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_transport_is_transient() {
        assert!(!ScoringError::configuration("缺少 API Key").is_transient());
        assert!(!ScoringError::protocol("没有 choices").is_transient());
        assert!(!ScoringError::AlreadyAnalyzing.is_transient());
        assert!(!ScoringError::Service {
            status: 503,
            body: String::new()
        }
        .is_transient());
    }

    #[test]
    fn test_service_error_message_carries_status_and_body() {
        let err = ScoringError::Service {
            status: 429,
            body: r#"{"error":"rate limited"}"#.to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("429"));
        assert!(message.contains("rate limited"));
    }
}
