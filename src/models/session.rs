//! 练习会话状态
//!
//! 一次练习的全部数据：上传文档提取出的文字、计时设置、评分结果和历史记录。
//! 本身不做任何 I/O，也不加锁；跨任务共享时使用 [`SharedSession`]。

use std::sync::{Arc, Mutex};

use crate::error::SessionError;
use crate::models::history::HistoryLedger;
use crate::models::practice_timer::{format_mm_ss, PracticeTimer};
use crate::models::record::{PracticeRecord, RecordScores, CLASS_PRESENTATION};
use crate::models::report::ScoreReport;

/// 在多个任务之间共享的会话
pub type SharedSession = Arc<Mutex<PresentationSession>>;

/// 分数尚未算出时显示的文字
pub const PENDING_LABEL: &str = "Updating";

/// 练习会话
#[derive(Debug, Clone)]
pub struct PresentationSession {
    // --- 文档内容 ---
    pub script_text: String,
    pub slides_text: String,
    pub marking_text: String,

    // --- 计时 ---
    duration_minutes: u32,
    actual_used_seconds: Option<u32>,
    timer_started: bool,

    is_analyzing: bool,

    // --- 分数（0–10） ---
    pub score_verbal_content: Option<f64>,
    pub score_visual_aids: Option<f64>,
    pub score_time_management: Option<f64>,
    pub score_audience_engagement: Option<f64>,
    pub score_vocal_delivery: Option<f64>,
    pub score_nonverbal: Option<f64>,

    pub overall_score: Option<f64>,
    pub overall_comment: Option<String>,

    // --- 每个维度的文字建议 ---
    pub feedback_verbal_content: String,
    pub feedback_visual_aids: String,
    pub feedback_time_management: String,
    pub feedback_audience_engagement: String,
    pub feedback_vocal_delivery: String,
    pub feedback_nonverbal: String,

    history: HistoryLedger,
}

impl Default for PresentationSession {
    fn default() -> Self {
        Self {
            script_text: String::new(),
            slides_text: String::new(),
            marking_text: String::new(),
            duration_minutes: 5,
            actual_used_seconds: None,
            timer_started: false,
            is_analyzing: false,
            score_verbal_content: None,
            score_visual_aids: None,
            score_time_management: None,
            score_audience_engagement: None,
            score_vocal_delivery: None,
            score_nonverbal: None,
            overall_score: None,
            overall_comment: None,
            feedback_verbal_content: String::new(),
            feedback_visual_aids: String::new(),
            feedback_time_management: String::new(),
            feedback_audience_engagement: String::new(),
            feedback_vocal_delivery: String::new(),
            feedback_nonverbal: String::new(),
            history: HistoryLedger::new(),
        }
    }
}

impl PresentationSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// 包装成可共享的会话
    pub fn into_shared(self) -> SharedSession {
        Arc::new(Mutex::new(self))
    }

    // ========== 计时 ==========

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    /// 设置目标练习时长；计时器启动后不能再改
    pub fn set_duration_minutes(&mut self, minutes: u32) -> Result<(), SessionError> {
        if self.timer_started {
            return Err(SessionError::DurationLocked);
        }
        self.duration_minutes = minutes;
        Ok(())
    }

    /// 实际用时（秒），尚未记录时为 0
    pub fn actual_used_seconds(&self) -> u32 {
        self.actual_used_seconds.unwrap_or(0)
    }

    pub fn has_recorded_used_time(&self) -> bool {
        self.actual_used_seconds.is_some()
    }

    /// 记录实际用时，每轮练习只能记录一次
    pub fn record_used_seconds(&mut self, seconds: u32) -> Result<(), SessionError> {
        if let Some(recorded) = self.actual_used_seconds {
            return Err(SessionError::UsedTimeAlreadyRecorded { recorded });
        }
        self.actual_used_seconds = Some(seconds);
        Ok(())
    }

    /// 启动计时：锁定练习时长，返回对应的计时器
    pub fn start_timer(&mut self) -> PracticeTimer {
        self.timer_started = true;
        let mut timer = PracticeTimer::new(self.duration_minutes);
        timer.toggle();
        timer
    }

    /// 结束计时并记录实际用时
    pub fn finish_timer(&mut self, mut timer: PracticeTimer) -> Result<u32, SessionError> {
        timer.stop();
        let used = timer.used_seconds();
        self.record_used_seconds(used)?;
        Ok(used)
    }

    /// 开始新一轮练习：清空计时和评分结果，保留文档和历史记录
    pub fn start_new_practice(&mut self) {
        self.timer_started = false;
        self.actual_used_seconds = None;
        self.reset_results();
    }

    /// 实际用时，格式 `MM:SS`
    pub fn formatted_used_time(&self) -> String {
        format_mm_ss(self.actual_used_seconds())
    }

    // ========== 评分状态 ==========

    pub fn is_analyzing(&self) -> bool {
        self.is_analyzing
    }

    pub(crate) fn set_analyzing(&mut self, analyzing: bool) {
        self.is_analyzing = analyzing;
    }

    /// 清空所有分数和建议；不会清除历史记录
    pub fn reset_results(&mut self) {
        self.score_verbal_content = None;
        self.score_visual_aids = None;
        self.score_time_management = None;
        self.score_audience_engagement = None;
        self.score_vocal_delivery = None;
        self.score_nonverbal = None;

        self.overall_score = None;
        self.overall_comment = None;

        self.feedback_verbal_content.clear();
        self.feedback_visual_aids.clear();
        self.feedback_time_management.clear();
        self.feedback_audience_engagement.clear();
        self.feedback_vocal_delivery.clear();
        self.feedback_nonverbal.clear();
    }

    /// 把评分结果写入会话
    pub fn apply_report(&mut self, report: &ScoreReport) {
        let scores = &report.scores;
        self.score_verbal_content = scores.verbal_content;
        self.score_visual_aids = scores.visual_aids_slides;
        self.score_time_management = scores.time_management;
        self.score_audience_engagement = scores.audience_engagement;
        self.score_vocal_delivery = scores.vocal_delivery;
        self.score_nonverbal = scores.nonverbal_body_language;

        self.overall_score = scores.overall;
        self.overall_comment = scores.overall_comment.clone();

        let feedback = &report.feedback;
        self.feedback_verbal_content = feedback.verbal_content.clone().unwrap_or_default();
        self.feedback_visual_aids = feedback.visual_aids_slides.clone().unwrap_or_default();
        self.feedback_time_management = feedback.time_management.clone().unwrap_or_default();
        self.feedback_audience_engagement =
            feedback.audience_engagement.clone().unwrap_or_default();
        self.feedback_vocal_delivery = feedback.vocal_delivery.clone().unwrap_or_default();
        self.feedback_nonverbal = feedback.nonverbal_body_language.clone().unwrap_or_default();
    }

    pub fn vocal_delivery_label(&self) -> String {
        score_label(self.score_vocal_delivery)
    }

    pub fn nonverbal_label(&self) -> String {
        score_label(self.score_nonverbal)
    }

    // ========== 历史记录 ==========

    /// 用当前分数生成一条练习记录，插入到历史最前面
    ///
    /// 未算出的分数记为 0.0，未给出的短评记为空字符串
    pub fn add_practice_record_from_current_scores(&mut self) {
        let record = PracticeRecord::new(
            CLASS_PRESENTATION,
            RecordScores {
                verbal: self.score_verbal_content.unwrap_or(0.0),
                visual: self.score_visual_aids.unwrap_or(0.0),
                time: self.score_time_management.unwrap_or(0.0),
                audience: self.score_audience_engagement.unwrap_or(0.0),
                vocal: self.score_vocal_delivery.unwrap_or(0.0),
                nonverbal: self.score_nonverbal.unwrap_or(0.0),
                overall: self.overall_score.unwrap_or(0.0),
                overall_comment: self.overall_comment.clone().unwrap_or_default(),
            },
        );
        self.history.prepend(record);
    }

    /// 历史记录，最新在前
    pub fn practice_records(&self) -> &[PracticeRecord] {
        self.history.records()
    }

    pub fn history(&self) -> &HistoryLedger {
        &self.history
    }
}

fn score_label(score: Option<f64>) -> String {
    match score {
        Some(value) => format!("{:.1}", value),
        None => PENDING_LABEL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::report::{ReportFeedback, ReportScores};
    use tokio_test::{assert_err, assert_ok};

    fn filled_session() -> PresentationSession {
        let mut session = PresentationSession::new();
        session.score_verbal_content = Some(7.5);
        session.score_visual_aids = Some(8.0);
        session.score_time_management = Some(6.0);
        session.score_audience_engagement = Some(7.0);
        session.score_vocal_delivery = Some(5.5);
        session.score_nonverbal = Some(6.5);
        session.overall_score = Some(7.1);
        session.overall_comment = Some("Good progress".to_string());
        session.feedback_verbal_content = "Clear structure.".to_string();
        session.feedback_visual_aids = "Slides are tidy.".to_string();
        session.feedback_time_management = "Slightly rushed.".to_string();
        session.feedback_audience_engagement = "Ask questions.".to_string();
        session.feedback_vocal_delivery = "Vary your pace.".to_string();
        session.feedback_nonverbal = "Use gestures.".to_string();
        session
    }

    #[test]
    fn test_reset_results_clears_everything_but_history() {
        let mut session = filled_session();
        session.add_practice_record_from_current_scores();
        let before = session.practice_records().to_vec();

        session.reset_results();

        assert!(session.score_verbal_content.is_none());
        assert!(session.score_visual_aids.is_none());
        assert!(session.score_time_management.is_none());
        assert!(session.score_audience_engagement.is_none());
        assert!(session.score_vocal_delivery.is_none());
        assert!(session.score_nonverbal.is_none());
        assert!(session.overall_score.is_none());
        assert!(session.overall_comment.is_none());
        assert!(session.feedback_verbal_content.is_empty());
        assert!(session.feedback_visual_aids.is_empty());
        assert!(session.feedback_time_management.is_empty());
        assert!(session.feedback_audience_engagement.is_empty());
        assert!(session.feedback_vocal_delivery.is_empty());
        assert!(session.feedback_nonverbal.is_empty());
        assert_eq!(session.practice_records(), before.as_slice());
    }

    #[test]
    fn test_record_snapshot_substitutes_zero_for_missing_scores() {
        let mut session = PresentationSession::new();
        session.score_verbal_content = Some(7.5);
        session.score_time_management = Some(9.0);

        session.add_practice_record_from_current_scores();

        let record = &session.practice_records()[0];
        assert_eq!(record.scenario_title(), CLASS_PRESENTATION);
        assert_eq!(record.verbal_score(), 7.5);
        assert_eq!(record.visual_score(), 0.0);
        assert_eq!(record.time_score(), 9.0);
        assert_eq!(record.audience_score(), 0.0);
        assert_eq!(record.vocal_score(), 0.0);
        assert_eq!(record.nonverbal_score(), 0.0);
        assert_eq!(record.overall(), 0.0);
        assert_eq!(record.overall_comment(), "");
    }

    #[test]
    fn test_record_is_not_affected_by_later_changes() {
        let mut session = filled_session();
        session.add_practice_record_from_current_scores();
        session.score_verbal_content = Some(1.0);
        session.reset_results();

        assert_eq!(session.practice_records()[0].verbal_score(), 7.5);
        assert_eq!(session.practice_records()[0].overall_comment(), "Good progress");
    }

    #[test]
    fn test_new_records_are_prepended() {
        let mut session = filled_session();
        session.add_practice_record_from_current_scores();
        let first_id = session.practice_records()[0].id();

        session.overall_score = Some(9.0);
        session.add_practice_record_from_current_scores();

        assert_eq!(session.practice_records().len(), 2);
        assert_eq!(session.practice_records()[0].overall(), 9.0);
        assert_eq!(session.practice_records()[1].id(), first_id);
    }

    #[test]
    fn test_apply_report_maps_nulls() {
        let mut session = filled_session();
        session.reset_results();
        let report = ScoreReport {
            scores: ReportScores {
                verbal_content: Some(8.0),
                vocal_delivery: None,
                overall: Some(7.0),
                overall_comment: Some("Well Done".to_string()),
                ..Default::default()
            },
            feedback: ReportFeedback {
                verbal_content: Some("Strong opening.".to_string()),
                ..Default::default()
            },
        };

        session.apply_report(&report);

        assert_eq!(session.score_verbal_content, Some(8.0));
        assert!(session.score_vocal_delivery.is_none());
        assert_eq!(session.overall_score, Some(7.0));
        assert_eq!(session.overall_comment.as_deref(), Some("Well Done"));
        assert_eq!(session.feedback_verbal_content, "Strong opening.");
        assert!(session.feedback_nonverbal.is_empty());
    }

    #[test]
    fn test_labels_show_pending_until_scored() {
        let mut session = PresentationSession::new();
        assert_eq!(session.vocal_delivery_label(), PENDING_LABEL);
        assert_eq!(session.nonverbal_label(), PENDING_LABEL);

        session.score_vocal_delivery = Some(7.34);
        session.score_nonverbal = Some(6.0);
        assert_eq!(session.vocal_delivery_label(), "7.3");
        assert_eq!(session.nonverbal_label(), "6.0");
    }

    #[test]
    fn test_duration_locked_after_timer_start() {
        let mut session = PresentationSession::new();
        assert_ok!(session.set_duration_minutes(3));
        let timer = session.start_timer();
        assert_eq!(timer.total_seconds(), 180);
        assert!(timer.is_running());

        let err = assert_err!(session.set_duration_minutes(10));
        assert_eq!(err, SessionError::DurationLocked);
        assert_eq!(session.duration_minutes(), 3);
    }

    #[test]
    fn test_used_seconds_recorded_once() {
        let mut session = PresentationSession::new();
        session.set_duration_minutes(1).unwrap();
        let mut timer = session.start_timer();
        for _ in 0..42 {
            timer.tick();
        }

        assert_eq!(assert_ok!(session.finish_timer(timer)), 42);
        assert_eq!(session.actual_used_seconds(), 42);
        assert_eq!(session.formatted_used_time(), "00:42");
        assert_eq!(
            session.record_used_seconds(10),
            Err(SessionError::UsedTimeAlreadyRecorded { recorded: 42 })
        );
    }

    #[test]
    fn test_used_seconds_may_exceed_duration() {
        let mut session = PresentationSession::new();
        session.set_duration_minutes(1).unwrap();
        session.record_used_seconds(600).unwrap();
        assert_eq!(session.actual_used_seconds(), 600);
    }

    #[test]
    fn test_start_new_practice_keeps_documents_and_history() {
        let mut session = filled_session();
        session.script_text = "Hello world".to_string();
        session.add_practice_record_from_current_scores();
        let _timer = session.start_timer();
        session.record_used_seconds(120).unwrap();

        session.start_new_practice();

        assert_eq!(session.script_text, "Hello world");
        assert_eq!(session.practice_records().len(), 1);
        assert!(!session.has_recorded_used_time());
        assert!(session.overall_score.is_none());
        assert_ok!(session.set_duration_minutes(8));
    }
}
