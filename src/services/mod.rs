pub mod prompt_builder;
pub mod response_parser;

pub use prompt_builder::{build_prompt, PromptInput, MAX_DOCUMENT_CHARS};
pub use response_parser::parse_score_report;
