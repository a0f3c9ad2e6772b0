//! 评分结果数据结构
//!
//! 与评分服务约定的 JSON 结构一一对应：
//!
//! ```text
//! { "scores": { ...六个维度..., "overall", "overall_comment" },
//!   "feedback": { ...六个维度... } }
//! ```

use serde::{Deserialize, Serialize};

/// 六个评分维度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreDimension {
    VerbalContent,
    VisualAidsSlides,
    TimeManagement,
    AudienceEngagement,
    VocalDelivery,
    NonverbalBodyLanguage,
}

impl ScoreDimension {
    /// 所有维度，按提示词中的顺序排列
    pub const ALL: [ScoreDimension; 6] = [
        ScoreDimension::VerbalContent,
        ScoreDimension::VisualAidsSlides,
        ScoreDimension::TimeManagement,
        ScoreDimension::AudienceEngagement,
        ScoreDimension::VocalDelivery,
        ScoreDimension::NonverbalBodyLanguage,
    ];

    /// JSON 中使用的键名
    pub fn key(self) -> &'static str {
        match self {
            ScoreDimension::VerbalContent => "verbal_content",
            ScoreDimension::VisualAidsSlides => "visual_aids_slides",
            ScoreDimension::TimeManagement => "time_management",
            ScoreDimension::AudienceEngagement => "audience_engagement",
            ScoreDimension::VocalDelivery => "vocal_delivery",
            ScoreDimension::NonverbalBodyLanguage => "nonverbal_body_language",
        }
    }
}

/// 各维度分数（0–10），全部允许缺省或为 null
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportScores {
    pub verbal_content: Option<f64>,
    pub visual_aids_slides: Option<f64>,
    pub time_management: Option<f64>,
    pub audience_engagement: Option<f64>,
    pub vocal_delivery: Option<f64>,
    pub nonverbal_body_language: Option<f64>,
    pub overall: Option<f64>,
    pub overall_comment: Option<String>,
}

impl ReportScores {
    /// 按维度读取分数
    pub fn get(&self, dimension: ScoreDimension) -> Option<f64> {
        match dimension {
            ScoreDimension::VerbalContent => self.verbal_content,
            ScoreDimension::VisualAidsSlides => self.visual_aids_slides,
            ScoreDimension::TimeManagement => self.time_management,
            ScoreDimension::AudienceEngagement => self.audience_engagement,
            ScoreDimension::VocalDelivery => self.vocal_delivery,
            ScoreDimension::NonverbalBodyLanguage => self.nonverbal_body_language,
        }
    }
}

/// 各维度文字建议，全部允许缺省或为 null
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportFeedback {
    pub verbal_content: Option<String>,
    pub visual_aids_slides: Option<String>,
    pub time_management: Option<String>,
    pub audience_engagement: Option<String>,
    pub vocal_delivery: Option<String>,
    pub nonverbal_body_language: Option<String>,
}

/// 一次评分的完整结果
///
/// `scores` 和 `feedback` 两个顶层对象必须存在
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub scores: ReportScores,
    pub feedback: ReportFeedback,
}
