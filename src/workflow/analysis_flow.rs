//! 演讲评分流程 - 流程层
//!
//! 核心职责：定义"一次评分"的完整流程
//!
//! 状态流转：
//! 1. Idle → Analyzing：设置 `is_analyzing`，清空上次结果
//! 2. 没有任何文档 → Skipped：写入提示短评，不调用评分服务
//! 3. 构建提示词 → 调用评分服务 → 解析结果
//!    - 成功 → 写入分数和建议，追加历史记录 → Succeeded
//!    - 失败 → 分数保持清空状态，记录错误 → Failed
//! 4. 任何结束路径都会把 `is_analyzing` 复位

use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info, warn};

use crate::clients::ScoringClient;
use crate::error::{ScoringError, ScoringResult};
use crate::models::report::ScoreReport;
use crate::models::session::PresentationSession;
use crate::services::prompt_builder::{build_prompt, PromptInput};
use crate::services::response_parser::parse_score_report;

/// 没有文档可分析时写入的短评
pub const NO_DATA_COMMENT: &str = "No data for analysis.";

/// 评分结果
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// 评分成功，结果已写入会话
    Succeeded(ScoreReport),
    /// 没有文档，跳过评分
    Skipped,
}

/// 演讲评分流程
///
/// - 持有评分服务客户端（由调用方注入）
/// - 每次调用只处理一个会话
/// - 不在 `.await` 期间持有会话锁
pub struct PresentationAnalyzer<C> {
    client: C,
}

impl<C: ScoringClient> PresentationAnalyzer<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// 对会话执行一次评分
    ///
    /// 同一会话已有评分在进行时返回 [`ScoringError::AlreadyAnalyzing`]，不修改任何状态
    pub async fn analyze(&self, session: &Mutex<PresentationSession>) -> ScoringResult<AnalysisOutcome> {
        // ========== 进入 Analyzing ==========
        let inputs = {
            let mut state = lock(session);
            if state.is_analyzing() {
                warn!("⚠️ 已有评分任务正在进行，拒绝本次请求");
                return Err(ScoringError::AlreadyAnalyzing);
            }
            state.set_analyzing(true);
            state.reset_results();
            SessionInputs::capture(&state)
        };
        let _analyzing = AnalyzingGuard { session };

        let input = inputs.as_prompt_input();
        if !input.has_documents() {
            info!("📭 没有可分析的文档，跳过评分");
            lock(session).overall_comment = Some(NO_DATA_COMMENT.to_string());
            return Ok(AnalysisOutcome::Skipped);
        }

        let prompt = build_prompt(&input);
        debug!("提示词已生成，长度 {} 字符", prompt.chars().count());

        match self.score(&prompt).await {
            Ok(report) => {
                let mut state = lock(session);
                state.apply_report(&report);
                state.add_practice_record_from_current_scores();
                info!(
                    "✓ 评分完成: overall {:?} {:?}，历史记录 {} 条",
                    report.scores.overall,
                    report.scores.overall_comment,
                    state.practice_records().len()
                );
                Ok(AnalysisOutcome::Succeeded(report))
            }
            Err(e) => {
                error!("❌ 演讲评分失败: {}", e);
                Err(e)
            }
        }
    }

    async fn score(&self, prompt: &str) -> ScoringResult<ScoreReport> {
        let raw = self.client.complete(prompt).await?;
        parse_score_report(&raw)
    }
}

/// 进入 Analyzing 时复制出的输入，之后不再持有会话锁
struct SessionInputs {
    script: String,
    slides: String,
    marking: String,
    duration_minutes: u32,
    actual_used_seconds: u32,
}

impl SessionInputs {
    fn capture(session: &PresentationSession) -> Self {
        Self {
            script: session.script_text.clone(),
            slides: session.slides_text.clone(),
            marking: session.marking_text.clone(),
            duration_minutes: session.duration_minutes(),
            actual_used_seconds: session.actual_used_seconds(),
        }
    }

    fn as_prompt_input(&self) -> PromptInput<'_> {
        PromptInput {
            script: &self.script,
            slides: &self.slides,
            marking: &self.marking,
            duration_minutes: self.duration_minutes,
            actual_used_seconds: self.actual_used_seconds,
        }
    }
}

/// 离开 Analyzing 时复位标志，future 被丢弃时同样生效
struct AnalyzingGuard<'a> {
    session: &'a Mutex<PresentationSession>,
}

impl Drop for AnalyzingGuard<'_> {
    fn drop(&mut self) {
        lock(self.session).set_analyzing(false);
    }
}

fn lock(session: &Mutex<PresentationSession>) -> MutexGuard<'_, PresentationSession> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}
