//! # Presentation Coach
//!
//! 演讲练习评分：把练习时的文档文字和用时交给 LLM 评分，结果写回会话并记入历史
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models）
//! - `models/` - 会话状态、评分结果、历史记录、练习计时器
//! - `PresentationSession` - 一次练习的全部状态，不做 I/O
//! - `HistoryLedger` - 最新在前的练习记录
//! - `TextExtractor` - 文档文字提取（外部能力的接口）
//!
//! ### ② 客户端层（Clients）
//! - `clients/` - 与评分服务的 HTTP 交互
//! - `ScoringClient` - 评分服务接口，`ChatCompletionClient` 为 reqwest 实现
//!
//! ### ③ 业务能力层（Services）
//! - `services/` - 纯函数，不关心流程
//! - `prompt_builder` - 会话输入 → 提示词
//! - `response_parser` - 模型返回文字 → `ScoreReport`
//!
//! ### ④ 流程层（Workflow）
//! - `workflow/` - 定义"一次评分"的完整流程
//! - `PresentationAnalyzer` - 状态流转（Idle → Analyzing → 成功 / 失败 / 跳过）
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{ChatCompletionClient, ScoringClient};
pub use config::Config;
pub use error::{ScoringError, ScoringResult, SessionError};
pub use models::{
    HistoryLedger, PracticeRecord, PracticeTimer, PresentationSession, ScoreReport, SharedSession,
};
pub use utils::logging;
pub use workflow::{AnalysisOutcome, PresentationAnalyzer};
