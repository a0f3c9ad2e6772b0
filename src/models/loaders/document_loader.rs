use async_trait::async_trait;
use std::path::Path;
use tokio::fs;

/// 文档文字提取能力
///
/// 实现方负责把上传的文档转换成纯文本；任何失败都返回空字符串
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, path: &Path) -> String;
}

/// 读取纯文本文件（.txt / .md 等）
///
/// 非 UTF-8 字节按替换字符处理
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

#[async_trait]
impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> String {
        match fs::read(path).await {
            Ok(bytes) => {
                let text = String::from_utf8_lossy(&bytes).into_owned();
                tracing::debug!("已读取 {}: {} 字符", path.display(), text.chars().count());
                text
            }
            Err(e) => {
                tracing::warn!("读取文档失败 {}: {}", path.display(), e);
                String::new()
            }
        }
    }
}

/// 按可选路径加载文档，未提供路径时返回空字符串
pub async fn load_document<E: TextExtractor + ?Sized>(extractor: &E, path: Option<&str>) -> String {
    match path {
        Some(p) if !p.trim().is_empty() => extractor.extract(Path::new(p)).await,
        _ => String::new(),
    }
}
