/// 日志工具模块
///
/// 提供日志初始化和输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::models::session::PresentationSession;

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则按 `verbose` 选择 debug / info 级别。
/// 重复调用不会报错。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🎤 演讲练习评分启动");
    info!("🤖 模型: {} @ {}", config.llm_model_name, config.llm_api_base_url);
    info!("⏱️ 目标时长: {} 分钟", config.duration_minutes);
    info!("{}", "=".repeat(60));
}

/// 打印本次评分结果
pub fn print_session_summary(session: &PresentationSession) {
    info!("\n{}", "=".repeat(60));
    info!("📊 评分结果 (用时 {})", session.formatted_used_time());
    info!("{}", "=".repeat(60));
    info!("Verbal content:      {}", format_score(session.score_verbal_content));
    info!("Visual aids:         {}", format_score(session.score_visual_aids));
    info!("Time management:     {}", format_score(session.score_time_management));
    info!("Audience engagement: {}", format_score(session.score_audience_engagement));
    info!("Vocal delivery:      {}", session.vocal_delivery_label());
    info!("Non-verbal:          {}", session.nonverbal_label());
    info!(
        "Overall:             {} {}",
        format_score(session.overall_score),
        session.overall_comment.as_deref().unwrap_or("")
    );

    let feedback = [
        ("Verbal content", &session.feedback_verbal_content),
        ("Visual aids", &session.feedback_visual_aids),
        ("Time management", &session.feedback_time_management),
        ("Audience engagement", &session.feedback_audience_engagement),
        ("Vocal delivery", &session.feedback_vocal_delivery),
        ("Non-verbal", &session.feedback_nonverbal),
    ];
    for (name, text) in feedback {
        if !text.is_empty() {
            info!("💬 {}: {}", name, truncate_text(text, 200));
        }
    }

    let history = session.history();
    info!("\n📚 历史记录: {} 条", history.len());
    for record in history.iter() {
        info!(
            "  {} | {} | overall {:.1} {}",
            record.formatted_date().replace('\n', " "),
            record.scenario_title(),
            record.overall(),
            record.overall_comment()
        );
    }
    info!("{}", "=".repeat(60));
}

fn format_score(score: Option<f64>) -> String {
    score.map(|s| format!("{:.1}", s)).unwrap_or_else(|| "-".to_string())
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
