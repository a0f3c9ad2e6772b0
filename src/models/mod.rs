pub mod history;
pub mod loaders;
pub mod practice_timer;
pub mod record;
pub mod report;
pub mod session;

pub use history::HistoryLedger;
pub use loaders::{load_document, PlainTextExtractor, TextExtractor};
pub use practice_timer::PracticeTimer;
pub use record::{PracticeRecord, RecordScores, CLASS_PRESENTATION};
pub use report::{ReportFeedback, ReportScores, ScoreDimension, ScoreReport};
pub use session::{PresentationSession, SharedSession};
