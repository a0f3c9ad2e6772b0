use anyhow::{Context, Result};
use presentation_coach::logging;
use presentation_coach::models::{load_document, PlainTextExtractor};
use presentation_coach::{
    AnalysisOutcome, ChatCompletionClient, Config, PresentationAnalyzer, PresentationSession,
};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load().await?;

    // 初始化日志
    logging::init(config.verbose_logging);
    logging::log_startup(&config);

    // 读取文档
    let extractor = PlainTextExtractor;
    let mut session = PresentationSession::new();
    session.script_text = load_document(&extractor, config.script_path.as_deref()).await;
    session.slides_text = load_document(&extractor, config.slides_path.as_deref()).await;
    session.marking_text = load_document(&extractor, config.marking_path.as_deref()).await;
    session
        .set_duration_minutes(config.duration_minutes)
        .context("无法设置练习时长")?;

    // 未给出实际用时则按完整时长计算
    let used_seconds = config
        .used_seconds
        .unwrap_or_else(|| config.duration_minutes.max(1).saturating_mul(60));
    session
        .record_used_seconds(used_seconds)
        .context("无法记录实际用时")?;

    let client = ChatCompletionClient::new(&config).context("无法创建评分客户端")?;
    let analyzer = PresentationAnalyzer::new(client);
    let session = session.into_shared();

    info!("🤖 正在评分...");
    match analyzer.analyze(&session).await {
        Ok(AnalysisOutcome::Succeeded(_)) => info!("✅ 评分完成"),
        Ok(AnalysisOutcome::Skipped) => warn!("⚠️ 没有提供任何文档，未进行评分"),
        Err(e) => error!("❌ 评分失败: {}", e),
    }

    let state = session
        .lock()
        .map_err(|_| anyhow::anyhow!("会话锁已损坏"))?;
    logging::print_session_summary(&state);

    Ok(())
}
