pub mod document_loader;

pub use document_loader::{load_document, PlainTextExtractor, TextExtractor};
