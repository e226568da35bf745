pub mod analyze;
pub mod error;
pub mod parse;
pub mod record;

pub use analyze::{
    summarize, summarize_with_threshold, ExistenceSummary, GrowthClass, GrowthSummary, KRatioGroup,
    Report, VerificationSummary, DEFAULT_SPREAD_THRESHOLD,
};
pub use error::{KbenchError, KbenchResult};
pub use parse::{parse_file, parse_str};
pub use record::{ExistenceRecord, ModelComparisonRecord, ResultSet, VerificationRecord};
