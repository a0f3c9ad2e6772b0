use chrono::{DateTime, Local};
use serde::Serialize;
use uuid::Uuid;

/// 练习场景名称
pub const CLASS_PRESENTATION: &str = "Class Presentation";

/// 一次练习的历史记录
///
/// 创建后不可修改，是当时分数的快照，不会跟随会话后续的变化
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PracticeRecord {
    id: Uuid,
    created_at: DateTime<Local>,
    scenario_title: String,
    verbal_score: f64,
    visual_score: f64,
    time_score: f64,
    audience_score: f64,
    vocal_score: f64,
    nonverbal_score: f64,
    overall: f64,
    overall_comment: String,
}

/// 构造 [`PracticeRecord`] 所需的分数
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordScores {
    pub verbal: f64,
    pub visual: f64,
    pub time: f64,
    pub audience: f64,
    pub vocal: f64,
    pub nonverbal: f64,
    pub overall: f64,
    pub overall_comment: String,
}

impl PracticeRecord {
    /// 以当前时间创建记录
    pub fn new(scenario_title: impl Into<String>, scores: RecordScores) -> Self {
        Self::with_timestamp(scenario_title, scores, Local::now())
    }

    /// 以指定时间创建记录
    pub fn with_timestamp(
        scenario_title: impl Into<String>,
        scores: RecordScores,
        created_at: DateTime<Local>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at,
            scenario_title: scenario_title.into(),
            verbal_score: scores.verbal,
            visual_score: scores.visual,
            time_score: scores.time,
            audience_score: scores.audience,
            vocal_score: scores.vocal,
            nonverbal_score: scores.nonverbal,
            overall: scores.overall,
            overall_comment: scores.overall_comment,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }

    pub fn scenario_title(&self) -> &str {
        &self.scenario_title
    }

    pub fn verbal_score(&self) -> f64 {
        self.verbal_score
    }

    pub fn visual_score(&self) -> f64 {
        self.visual_score
    }

    pub fn time_score(&self) -> f64 {
        self.time_score
    }

    pub fn audience_score(&self) -> f64 {
        self.audience_score
    }

    pub fn vocal_score(&self) -> f64 {
        self.vocal_score
    }

    pub fn nonverbal_score(&self) -> f64 {
        self.nonverbal_score
    }

    pub fn overall(&self) -> f64 {
        self.overall
    }

    pub fn overall_comment(&self) -> &str {
        &self.overall_comment
    }

    /// 历史列表显示用的时间，例如 `12/5/2025\n11:30 AM`
    pub fn formatted_date(&self) -> String {
        self.created_at.format("%-d/%-m/%Y\n%I:%M %p").to_string()
    }

    pub fn vocal_label(&self) -> String {
        format!("{:.1}", self.vocal_score)
    }

    pub fn nonverbal_label(&self) -> String {
        format!("{:.1}", self.nonverbal_score)
    }
}
