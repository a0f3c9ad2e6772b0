//! 提示词构建 - 业务能力层
//!
//! 纯函数：会话里的文档文字 + 计时数据 → 发给评分服务的提示词。
//! 不做任何 I/O，相同输入总是得到相同输出。

use crate::models::report::ScoreDimension;

/// 每份文档写入提示词的最大字符数
pub const MAX_DOCUMENT_CHARS: usize = 8000;

/// 构建提示词所需的输入
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptInput<'a> {
    pub script: &'a str,
    pub slides: &'a str,
    pub marking: &'a str,
    pub duration_minutes: u32,
    pub actual_used_seconds: u32,
}

impl<'a> PromptInput<'a> {
    /// 至少有一份文档截断后去掉空白仍不为空
    ///
    /// 与 `build_prompt` 是否写入文档标题的判断一致
    pub fn has_documents(&self) -> bool {
        self.document_sections()
            .iter()
            .any(|(_, text)| !text.trim().is_empty())
    }

    /// 截断后的文档及其标题
    fn document_sections(&self) -> [(&'static str, &'a str); 3] {
        [
            ("Speech script text:", truncate_chars(self.script, MAX_DOCUMENT_CHARS)),
            ("Slides text or OCR content:", truncate_chars(self.slides, MAX_DOCUMENT_CHARS)),
            ("Marking scheme text:", truncate_chars(self.marking, MAX_DOCUMENT_CHARS)),
        ]
    }
}

/// 截取前 `max_chars` 个字符，不会切断多字节字符
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// 构建评分提示词
pub fn build_prompt(input: &PromptInput<'_>) -> String {
    let dimension_list = ScoreDimension::ALL
        .iter()
        .enumerate()
        .map(|(i, d)| format!("{}) {}", i + 1, d.key()))
        .collect::<Vec<_>>()
        .join(", ");

    let mut components: Vec<String> = vec![
        "You are an experienced public speaking coach.".to_string(),
        "You will receive the student's speech script, slides text and marking scheme, plus timing data.".to_string(),
        "Evaluate the presentation on six aspects, each scored from 0 to 10:".to_string(),
        format!("{}.", dimension_list),
        "Also compute an overall score (0-10) and a short overall_comment (at most two words, like 'Well Done').".to_string(),
        "Then give about 20 English words of feedback for EACH of the six aspects.".to_string(),
        "Return ONLY a single JSON object with this structure:\n".to_string(),
        response_shape(),
        "Timing data:".to_string(),
        format!("Target duration (minutes): {}", input.duration_minutes),
        format!("Actual used seconds: {}", input.actual_used_seconds),
    ];

    // 空白文档不出现标题
    for (heading, text) in input.document_sections() {
        if !text.trim().is_empty() {
            components.push(format!("\n{}\n{}", heading, text));
        }
    }

    components.join("\n\n")
}

/// 要求模型返回的 JSON 结构
fn response_shape() -> String {
    let score_lines = ScoreDimension::ALL
        .iter()
        .map(|d| format!("    \"{}\": 0-10 number,", d.key()))
        .collect::<Vec<_>>()
        .join("\n");
    let feedback_lines = ScoreDimension::ALL
        .iter()
        .map(|d| format!("    \"{}\": \"about 20 English words of feedback\"", d.key()))
        .collect::<Vec<_>>()
        .join(",\n");

    format!(
        r#"{{
  "scores": {{
{}
    "overall": 0-10 number,
    "overall_comment": "short phrase"
  }},
  "feedback": {{
{}
  }}
}}"#,
        score_lines, feedback_lines
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input<'a>(script: &'a str, slides: &'a str, marking: &'a str) -> PromptInput<'a> {
        PromptInput {
            script,
            slides,
            marking,
            duration_minutes: 5,
            actual_used_seconds: 240,
        }
    }

    #[test]
    fn test_script_only_prompt() {
        let prompt = build_prompt(&input("Hello world", "", ""));

        assert!(prompt.contains("Speech script text:\nHello world"));
        assert!(prompt.contains("Timing data:"));
        assert!(prompt.contains("Target duration (minutes): 5"));
        assert!(prompt.contains("Actual used seconds: 240"));
        assert!(!prompt.contains("Slides text or OCR content:"));
        assert!(!prompt.contains("Marking scheme text:"));
    }

    #[test]
    fn test_prompt_names_every_dimension_and_shape() {
        let prompt = build_prompt(&input("a", "b", "c"));

        for dimension in ScoreDimension::ALL {
            let key = format!("\"{}\"", dimension.key());
            // scores 和 feedback 各出现一次
            assert_eq!(prompt.matches(&key).count(), 2, "{}", key);
        }
        assert!(prompt.contains("\"scores\""));
        assert!(prompt.contains("\"feedback\""));
        assert!(prompt.contains("\"overall\""));
        assert!(prompt.contains("\"overall_comment\""));
        assert!(prompt.contains("about 20 English words"));
        assert!(prompt.contains("Slides text or OCR content:\nb"));
        assert!(prompt.contains("Marking scheme text:\nc"));
    }

    #[test]
    fn test_whitespace_only_section_is_omitted() {
        let prompt = build_prompt(&input("Hello", " \n ", ""));
        assert!(!prompt.contains("Slides text or OCR content:"));
    }

    #[test]
    fn test_documents_truncated_to_limit() {
        let long_script = "é".repeat(MAX_DOCUMENT_CHARS + 500);
        let prompt = build_prompt(&input(&long_script, "", ""));

        let embedded = prompt
            .split("Speech script text:\n")
            .nth(1)
            .expect("script section");
        assert_eq!(embedded.chars().count(), MAX_DOCUMENT_CHARS);
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("abc", 3), "abc");
        assert_eq!(truncate_chars("ab", 3), "ab");
        assert_eq!(truncate_chars("你好世界", 2), "你好");
        assert_eq!(truncate_chars("", 8000), "");
    }

    #[test]
    fn test_has_documents() {
        assert!(!input("", "", "").has_documents());
        assert!(!input(" \n ", " \n ", " \n ").has_documents());
        assert!(input("", "", "rubric").has_documents());
    }

    #[test]
    fn test_text_beyond_limit_does_not_count_as_document() {
        let padded = format!("{}Hello", " ".repeat(MAX_DOCUMENT_CHARS));
        let padded_input = input(&padded, "", "");

        assert!(!padded_input.has_documents());
        assert!(!build_prompt(&padded_input).contains("Speech script text:"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let a = build_prompt(&input("x", "y", "z"));
        let b = build_prompt(&input("x", "y", "z"));
        assert_eq!(a, b);
    }
}
