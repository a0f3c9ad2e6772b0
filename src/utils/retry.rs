use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// 重试策略
///
/// `max_attempts` 为总尝试次数，1 表示不重试
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::no_retry()
    }
}

impl RetryPolicy {
    /// 只尝试一次
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            base_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(8),
        }
    }

    pub fn new(max_attempts: u32, base_backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_backoff,
            max_backoff: base_backoff.saturating_mul(16),
        }
    }
}

/// 按策略重试，只有 `should_retry` 返回 true 的错误才会重试
///
/// 每次失败后退避时间翻倍，不超过 `max_backoff`
pub async fn retry_when<F, Fut, T, E, P>(policy: &RetryPolicy, should_retry: P, mut f: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
    E: std::fmt::Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut backoff = policy.base_backoff;
    let mut attempt = 1;

    loop {
        match f().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < max_attempts && should_retry(&e) => {
                warn!(
                    "第 {}/{} 次尝试失败: {}，{:?} 后重试",
                    attempt, max_attempts, e, backoff
                );
                tokio::time::sleep(backoff).await;
                backoff = std::cmp::min(backoff.saturating_mul(2), policy.max_backoff);
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
