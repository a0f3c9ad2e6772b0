//! 评分结果解析 - 业务能力层
//!
//! 把模型返回的文字解析成 [`ScoreReport`]。分数不做截断或校验，
//! 超出 0–10 的值原样保留，只记录警告。

use tracing::warn;

use crate::error::ScoringResult;
use crate::models::report::{ScoreDimension, ScoreReport};

/// 解析评分结果
///
/// - 各维度分数和建议可以缺省或为 null
/// - 不是合法 JSON，或缺少 `scores` / `feedback` 对象时返回 [`ScoringError::Parse`]
///
/// [`ScoringError::Parse`]: crate::error::ScoringError::Parse
pub fn parse_score_report(raw: &str) -> ScoringResult<ScoreReport> {
    let json = strip_code_fence(raw);
    let report: ScoreReport = serde_json::from_str(json)?;

    for dimension in ScoreDimension::ALL {
        if let Some(score) = report.scores.get(dimension) {
            warn_if_out_of_range(dimension.key(), score);
        }
    }
    if let Some(overall) = report.scores.overall {
        warn_if_out_of_range("overall", overall);
    }

    Ok(report)
}

/// 去掉模型偶尔包裹的 Markdown 代码块
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn warn_if_out_of_range(name: &str, score: f64) {
    if !(0.0..=10.0).contains(&score) {
        warn!("评分 {} = {} 超出 0-10 范围，按原值保留", name, score);
    }
}
